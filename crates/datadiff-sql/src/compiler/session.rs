use indexmap::IndexMap;
use std::{
    cell::{Cell, RefCell},
    mem,
};

/// State shared by every compiler derived from one top-level compiler.
///
/// Not thread safe: one compilation tree is driven from one thread.
#[derive(Debug, Default)]
pub(super) struct Session {
    /// Last value handed out for generated names
    counter: Cell<u64>,

    /// Hoisted subqueries, in registration order
    subqueries: RefCell<IndexMap<String, String>>,
}

impl Session {
    pub(super) fn next_id(&self) -> u64 {
        let id = self.counter.get() + 1;
        self.counter.set(id);
        id
    }

    /// Register a subquery. If the name is taken, nothing is stored and the
    /// text registered earlier is returned.
    pub(super) fn add_subquery(&self, name: String, sql: String) -> Option<String> {
        let mut subqueries = self.subqueries.borrow_mut();

        if let Some(existing) = subqueries.get(&name) {
            return Some(existing.clone());
        }

        subqueries.insert(name, sql);
        None
    }

    pub(super) fn take_subqueries(&self) -> IndexMap<String, String> {
        mem::take(&mut *self.subqueries.borrow_mut())
    }

    pub(super) fn clear_subqueries(&self) {
        self.subqueries.borrow_mut().clear();
    }

    pub(super) fn subquery_count(&self) -> usize {
        self.subqueries.borrow().len()
    }
}
