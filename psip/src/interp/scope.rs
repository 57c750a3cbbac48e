//! Dictionary stack for name resolution
//!
//! A plain `Vec` of shared dictionaries, index 0 being the system dictionary.
//! Lookup walks from the top (innermost `begin`) down to the system
//! dictionary, so resolution depends on the live stack at execution time
//! (dynamic scoping).

use super::builtins::Builtin;
use super::journal::Journal;
use super::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Shared reference to a dictionary
pub type DictRef = Rc<RefCell<Dictionary>>;

/// What a dictionary key maps to
#[derive(Debug, Clone)]
pub enum Entry {
    Builtin(Builtin),
    Value(Value),
}

/// Mapping from key (name without `/`) to entry
#[derive(Clone, Default)]
pub struct Dictionary {
    entries: HashMap<String, Entry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary {
            entries: HashMap::new(),
        }
    }

    /// Wrap in Rc<RefCell<>>
    pub fn into_ref(self) -> DictRef {
        Rc::new(RefCell::new(self))
    }

    /// Insert or overwrite a key
    pub fn define(&mut self, key: String, entry: Entry) {
        self.entries.insert(key, entry);
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// Keys only: a dictionary can hold itself.
impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Dictionary").field("keys", &keys).finish()
    }
}

/// Stack of dictionaries; never empty
#[derive(Debug, Clone)]
pub struct DictStack {
    dicts: Vec<DictRef>,
    journal: Option<Journal<DictRef>>,
}

impl DictStack {
    /// Create a stack whose bottom is `system`
    pub fn new(system: DictRef) -> Self {
        DictStack {
            dicts: vec![system],
            journal: None,
        }
    }

    pub fn push(&mut self, dict: DictRef) {
        self.dicts.push(dict);
    }

    /// Pop the current dictionary; `None` when only the system dictionary is left
    pub fn pop(&mut self) -> Option<DictRef> {
        if self.dicts.len() <= 1 {
            return None;
        }
        if let Some(journal) = &mut self.journal {
            journal.record(&self.dicts, self.dicts.len() - 1);
        }
        self.dicts.pop()
    }

    pub fn depth(&self) -> usize {
        self.dicts.len()
    }

    /// The dictionary `def` writes into
    pub fn current(&self) -> &DictRef {
        // `dicts` always holds the system dictionary
        &self.dicts[self.dicts.len() - 1]
    }

    /// Define a key in the current dictionary
    pub fn define(&mut self, key: String, value: Value) {
        self.current().borrow_mut().define(key, Entry::Value(value));
    }

    /// Look up a key, searching from the top of the stack to the bottom
    pub fn find(&self, key: &str) -> Option<Entry> {
        self.dicts
            .iter()
            .rev()
            .find_map(|dict| dict.borrow().get(key).cloned())
    }

    /// Every key visible from the current scope, sorted and deduplicated
    pub fn visible_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .dicts
            .iter()
            .flat_map(|dict| dict.borrow().keys().map(str::to_string).collect::<Vec<_>>())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Start recording pops so the current stack can be restored
    pub(crate) fn checkpoint(&mut self) {
        self.journal = Some(Journal::new(self.dicts.len()));
    }

    pub(crate) fn commit(&mut self) {
        self.journal = None;
    }

    /// Restore the stack at the checkpoint. Entries defined since then stay.
    pub(crate) fn rollback(&mut self) {
        if let Some(journal) = self.journal.take() {
            journal.rollback(&mut self.dicts);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(stack: &DictStack, key: &str) -> Option<Value> {
        match stack.find(key) {
            Some(Entry::Value(v)) => Some(v),
            _ => None,
        }
    }

    #[test]
    fn test_basic_define_find() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.define("x".to_string(), Value::Int(42));
        assert_eq!(value_of(&stack, "x"), Some(Value::Int(42)));
        assert!(stack.find("y").is_none());
    }

    #[test]
    fn test_push_pop_scope() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.define("x".to_string(), Value::Int(1));

        stack.push(Dictionary::new().into_ref());
        stack.define("y".to_string(), Value::Int(2));
        assert_eq!(value_of(&stack, "x"), Some(Value::Int(1)));
        assert_eq!(value_of(&stack, "y"), Some(Value::Int(2)));

        assert!(stack.pop().is_some());
        assert_eq!(value_of(&stack, "x"), Some(Value::Int(1)));
        assert_eq!(value_of(&stack, "y"), None);
    }

    #[test]
    fn test_shadowing_innermost_wins() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.define("x".to_string(), Value::Int(1));
        stack.push(Dictionary::new().into_ref());
        stack.define("x".to_string(), Value::Int(2));
        assert_eq!(value_of(&stack, "x"), Some(Value::Int(2)));
        stack.pop();
        assert_eq!(value_of(&stack, "x"), Some(Value::Int(1)));
    }

    #[test]
    fn test_pop_system_dictionary_refused() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        assert!(stack.pop().is_none());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_define_overwrites() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.define("x".to_string(), Value::Int(5));
        stack.define("x".to_string(), Value::Int(10));
        assert_eq!(value_of(&stack, "x"), Some(Value::Int(10)));
        assert_eq!(stack.current().borrow().len(), 1);
    }

    #[test]
    fn test_shared_dictionary_sees_definitions() {
        let dict = Dictionary::new().into_ref();
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.push(Rc::clone(&dict));
        stack.define("k".to_string(), Value::Bool(true));
        stack.pop();
        assert!(dict.borrow().get("k").is_some());
    }

    #[test]
    fn test_visible_names_dedup() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.define("b".to_string(), Value::Int(1));
        stack.define("a".to_string(), Value::Int(1));
        stack.push(Dictionary::new().into_ref());
        stack.define("a".to_string(), Value::Int(2));
        assert_eq!(stack.visible_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_deep_nesting() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        for i in 0..1000 {
            stack.push(Dictionary::new().into_ref());
            stack.define(format!("var_{i}"), Value::Int(i));
        }
        assert_eq!(stack.depth(), 1001);
        assert_eq!(value_of(&stack, "var_0"), Some(Value::Int(0)));
        assert_eq!(value_of(&stack, "var_999"), Some(Value::Int(999)));
        while stack.pop().is_some() {}
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_checkpoint_rollback() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.checkpoint();
        stack.push(Dictionary::new().into_ref());
        stack.push(Dictionary::new().into_ref());
        stack.rollback();
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_rollback_restores_popped_scopes() {
        let inner = Dictionary::new().into_ref();
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.push(Rc::clone(&inner));
        stack.checkpoint();
        stack.pop();
        stack.push(Dictionary::new().into_ref());
        stack.define("k".to_string(), Value::Int(1));
        stack.rollback();
        assert_eq!(stack.depth(), 2);
        assert!(Rc::ptr_eq(stack.current(), &inner));
        assert!(stack.find("k").is_none());
    }

    #[test]
    fn test_commit_keeps_changes() {
        let mut stack = DictStack::new(Dictionary::new().into_ref());
        stack.checkpoint();
        stack.push(Dictionary::new().into_ref());
        stack.commit();
        stack.rollback();
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_self_containing_dictionary_debug() {
        let dict = Dictionary::new().into_ref();
        dict.borrow_mut()
            .define("me".to_string(), Entry::Value(Value::Dict(Rc::clone(&dict))));
        let debug = format!("{:?}", dict.borrow());
        assert!(debug.contains("me"));
    }
}
