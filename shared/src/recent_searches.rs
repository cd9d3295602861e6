use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{NO_RECENT_SEARCHES, RECENT_SEARCH_CAPACITY};

/// Most-recent-first list of search terms, unique ignoring case, at most
/// [`RECENT_SEARCH_CAPACITY`] long.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearchList(Vec<String>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecentSearchesView {
    Empty { placeholder: String },
    /// Each entry is sent back verbatim in `Event::RecentSearchSelected`.
    Entries { entries: Vec<String> },
}

fn same_term(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl RecentSearchList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from persisted bytes. Absent or unreadable data gives
    /// an empty list; this never fails.
    pub fn decode(bytes: Option<&[u8]>) -> Self {
        let Some(bytes) = bytes else {
            return Self::new();
        };
        match serde_json::from_slice::<Vec<String>>(bytes) {
            Ok(terms) => Self::from_terms(terms),
            Err(e) => {
                warn!(error = %e, "discarding unreadable recent searches");
                Self::new()
            }
        }
    }

    /// Keeps the first occurrence of every term, drops blanks and caps the length.
    fn from_terms(terms: impl IntoIterator<Item = String>) -> Self {
        let mut list: Vec<String> = Vec::with_capacity(RECENT_SEARCH_CAPACITY);
        for term in terms {
            if list.len() == RECENT_SEARCH_CAPACITY {
                break;
            }
            if term.trim().is_empty() || list.iter().any(|kept| same_term(kept, &term)) {
                continue;
            }
            list.push(term);
        }
        Self(list)
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.0)
    }

    /// Moves `term` to the front, replacing any entry equal to it ignoring
    /// case, and evicts the oldest entry past capacity. The new casing wins.
    pub fn record(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.0.retain(|existing| !same_term(existing, &term));
        self.0.insert(0, term);
        self.0.truncate(RECENT_SEARCH_CAPACITY);
    }

    /// Appends entries loaded from storage behind the ones recorded in this
    /// session. Returns true if the list changed.
    pub fn merge_older(&mut self, older: RecentSearchList) -> bool {
        let before = std::mem::take(&mut self.0);
        let merged = Self::from_terms(before.iter().cloned().chain(older.0));
        let changed = merged.0 != before;
        *self = merged;
        changed
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn render(&self) -> RecentSearchesView {
        if self.is_empty() {
            RecentSearchesView::Empty {
                placeholder: NO_RECENT_SEARCHES.to_string(),
            }
        } else {
            RecentSearchesView::Entries {
                entries: self.0.clone(),
            }
        }
    }
}
