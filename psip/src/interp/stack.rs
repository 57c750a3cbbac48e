//! Operand stack

use super::error::{InterpError, InterpResult};
use super::journal::Journal;
use super::value::Value;

/// LIFO sequence of values; the top is the end of the vector
#[derive(Debug, Clone, Default)]
pub struct OperandStack {
    values: Vec<Value>,
    /// Set between [`OperandStack::checkpoint`] and commit or rollback
    journal: Option<Journal<Value>>,
}

impl OperandStack {
    pub fn new() -> Self {
        OperandStack {
            values: Vec::new(),
            journal: None,
        }
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> Option<Value> {
        let keep = self.values.len().checked_sub(1)?;
        self.record(keep);
        self.values.pop()
    }

    /// Value `depth` places below the top (0 is the top)
    pub fn peek(&self, depth: usize) -> Option<&Value> {
        self.values
            .len()
            .checked_sub(depth + 1)
            .and_then(|index| self.values.get(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.record(0);
        self.values.clear();
    }

    /// Fail with a stack underflow unless `needed` operands are present
    pub fn require(&self, operator: &'static str, needed: usize) -> InterpResult<()> {
        if self.values.len() < needed {
            return Err(InterpError::stack_underflow(operator, needed, self.values.len()));
        }
        Ok(())
    }

    /// Drop the top `count` values
    pub fn discard(&mut self, count: usize) {
        let keep = self.values.len().saturating_sub(count);
        self.record(keep);
        self.values.truncate(keep);
    }

    /// The top `count` values, bottom-most first
    pub fn top(&self, count: usize) -> &[Value] {
        let start = self.values.len().saturating_sub(count);
        &self.values[start..]
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// Start recording removals so the current contents can be restored
    pub(crate) fn checkpoint(&mut self) {
        self.journal = Some(Journal::new(self.values.len()));
    }

    /// Keep every change since the checkpoint
    pub(crate) fn commit(&mut self) {
        self.journal = None;
    }

    /// Restore the contents at the checkpoint
    pub(crate) fn rollback(&mut self) {
        if let Some(journal) = self.journal.take() {
            journal.rollback(&mut self.values);
        }
    }

    /// Journal the values about to be cut when the stack shrinks to `keep`
    fn record(&mut self, keep: usize) {
        if let Some(journal) = &mut self.journal {
            journal.record(&self.values, keep);
        }
    }
}
