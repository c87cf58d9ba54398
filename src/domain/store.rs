use crate::domain::Entry;

/// In-memory, append-only sequence of entries for the current fetch cycle.
///
/// The store is reset at the start of every cycle and tagged with that
/// cycle's generation. Appends carry the writer's generation and are rejected
/// once a newer cycle has reset the store, so tasks from a superseded cycle
/// can run to completion without corrupting the new cycle's contents.
#[derive(Debug, Default)]
pub struct ArticleStore {
    generation: u64,
    entries: Vec<Entry>,
}

impl ArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all entries and adopt `generation` as the only generation
    /// allowed to write until the next reset.
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.entries.clear();
    }

    /// Append an entry on behalf of `generation`. Returns false (and drops
    /// the entry) if the store has since been reset by a newer cycle.
    pub fn append(&mut self, generation: u64, entry: Entry) -> bool {
        if generation != self.generation {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy of the accumulated entries, in append order.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }
}
