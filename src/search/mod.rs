//! Local name filter over the in-memory catalog list.

use std::borrow::Cow;

use crate::catalog_store::Named;

/// Keep the entries whose name contains `query`, ignoring case.
///
/// An empty query hands back the input slice itself. The query is matched
/// literally: surrounding whitespace is significant.
pub fn filter_entries<'a, T>(entries: &'a [T], query: &str) -> Cow<'a, [T]>
where
    T: Named + Clone,
{
    if query.is_empty() {
        return Cow::Borrowed(entries);
    }

    let needle = query.to_lowercase();
    Cow::Owned(
        entries
            .iter()
            .filter(|entry| entry.name().to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}
