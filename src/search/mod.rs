use crate::domain::Entry;

/// Case-insensitive substring match over already-fetched entries, preserving
/// store order. An empty term matches everything. Never touches the network.
pub fn filter(term: &str, entries: &[Entry]) -> Vec<Entry> {
    let needle = term.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&needle)
                || entry.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
