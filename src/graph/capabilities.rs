use serde::Serialize;

/// What a graph supports. Callers check these before relying on a
/// mutation succeeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    size_accurate: bool,
    add_allowed: bool,
    delete_allowed: bool,
    iterator_remove_allowed: bool,
    can_be_empty: bool,
    find_contract_safe: bool,
    handles_literal_typing: bool,
}

impl Capabilities {
    /// Capabilities of the in-memory graph
    pub const fn in_memory() -> Self {
        Self {
            size_accurate: true,
            add_allowed: true,
            delete_allowed: true,
            iterator_remove_allowed: true,
            can_be_empty: true,
            find_contract_safe: true,
            handles_literal_typing: true,
        }
    }

    /// Whether `size()` is exact
    pub fn size_accurate(&self) -> bool {
        self.size_accurate
    }

    pub fn add_allowed(&self) -> bool {
        self.add_allowed
    }

    /// Whether every concrete triple may be added
    pub fn add_allowed_every(&self) -> bool {
        self.add_allowed
    }

    pub fn delete_allowed(&self) -> bool {
        self.delete_allowed
    }

    /// Whether every triple may be deleted
    pub fn delete_allowed_every(&self) -> bool {
        self.delete_allowed
    }

    /// Whether cursors from `find_mut` support `remove`
    pub fn iterator_remove_allowed(&self) -> bool {
        self.iterator_remove_allowed
    }

    pub fn can_be_empty(&self) -> bool {
        self.can_be_empty
    }

    /// Whether `find` results are snapshots unaffected by later mutation
    pub fn find_contract_safe(&self) -> bool {
        self.find_contract_safe
    }

    /// Whether literals match by value in `find` and `contains`
    pub fn handles_literal_typing(&self) -> bool {
        self.handles_literal_typing
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::in_memory()
    }
}
