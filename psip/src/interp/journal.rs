//! Undo log for a Vec-backed stack
//!
//! A command only ever removes from the top and pushes back on top, so the
//! state at a checkpoint is the untouched prefix `items[..base]` plus the
//! values that were removed from above it. Recording those values costs
//! what the command consumes, not the depth of the stack.

/// Values removed from a stack since a checkpoint
#[derive(Debug, Clone)]
pub(crate) struct Journal<T> {
    /// Length of the prefix that is unchanged since the checkpoint
    base: usize,
    /// Removed checkpoint values, topmost first
    below: Vec<T>,
}

impl<T: Clone> Journal<T> {
    /// Start journaling a stack that currently holds `len` items
    pub(crate) fn new(len: usize) -> Self {
        Journal {
            base: len,
            below: Vec::new(),
        }
    }

    /// Call before `items` is truncated to `keep`
    pub(crate) fn record(&mut self, items: &[T], keep: usize) {
        if keep < self.base {
            self.below.extend(items[keep..self.base].iter().rev().cloned());
            self.base = keep;
        }
    }

    /// Put `items` back to its state at the checkpoint
    pub(crate) fn rollback(self, items: &mut Vec<T>) {
        items.truncate(self.base);
        items.extend(self.below.into_iter().rev());
    }

    /// Number of values held for rollback
    #[cfg(test)]
    pub(crate) fn held(&self) -> usize {
        self.below.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_stack_holds_nothing() {
        let mut items = vec![1, 2, 3];
        let journal = Journal::new(items.len());
        items.push(4);
        assert_eq!(journal.held(), 0);
        journal.rollback(&mut items);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_rollback_after_pops_and_pushes() {
        let mut items = vec![1, 2, 3, 4];
        let mut journal = Journal::new(items.len());

        journal.record(&items, 3);
        items.truncate(3);
        items.push(9);
        items.push(8);
        // pushed values above the base are not kept
        journal.record(&items, 2);
        items.truncate(2);
        assert_eq!(journal.held(), 2);

        journal.rollback(&mut items);
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_rollback_after_clear() {
        let mut items = vec![5, 6, 7];
        let mut journal = Journal::new(items.len());
        journal.record(&items, 0);
        items.clear();
        items.push(1);
        journal.rollback(&mut items);
        assert_eq!(items, vec![5, 6, 7]);
    }
}
