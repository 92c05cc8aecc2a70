//! Navigation capability and URL query helpers
//!
//! Page address mutation goes through the [`Navigation`] trait so the
//! relay can be exercised without a real address bar. A matched message
//! always pushes a new history entry, it never replaces the current one.

use std::sync::{Arc, Mutex, MutexGuard};

use url::Url;

use crate::error::Result;

/// Query parameter the relay writes on the hosting page's URL.
pub const VIDEO_ENDED_PARAM: &str = "video_ended";

/// Injected capability for reading and rewriting the page address.
pub trait Navigation: Send + Sync {
    /// Current page address.
    fn current_url(&self) -> Url;

    /// Rewrite the visible address, adding a new history entry without
    /// triggering a reload.
    fn push_url(&self, url: Url);
}

/// Set or overwrite a query parameter, preserving unrelated pairs.
///
/// An existing key keeps its position and loses any duplicates; a new
/// key is appended at the end.
pub fn set_query_param(url: &Url, name: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if let Some(first) = pairs.iter().position(|(k, _)| k == name) {
        pairs[first].1 = value.to_string();
        let mut seen = false;
        pairs.retain(|(k, _)| {
            if k == name {
                if seen {
                    return false;
                }
                seen = true;
            }
            true
        });
    } else {
        pairs.push((name.to_string(), value.to_string()));
    }

    with_query_pairs(url, &pairs)
}

/// Remove every occurrence of a query parameter, returning the first value.
pub fn take_query_param(url: &Url, name: &str) -> (Url, Option<String>) {
    let mut taken = None;
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(k, v)| {
            if k == name {
                if taken.is_none() {
                    taken = Some(v.into_owned());
                }
                None
            } else {
                Some((k.into_owned(), v.into_owned()))
            }
        })
        .collect();

    (with_query_pairs(url, &pairs), taken)
}

fn with_query_pairs(url: &Url, pairs: &[(String, String)]) -> Url {
    let mut updated = url.clone();
    if pairs.is_empty() {
        updated.set_query(None);
    } else {
        updated
            .query_pairs_mut()
            .clear()
            .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }
    updated
}

/// In-memory address bar holding the page's entry history.
///
/// Cloneable; clones share the same history. The first entry is the
/// address the page loaded with.
#[derive(Debug, Clone)]
pub struct AddressBar {
    initial: Url,
    pushed: Arc<Mutex<Vec<Url>>>,
}

impl AddressBar {
    pub fn new(initial: Url) -> Self {
        Self {
            initial,
            pushed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Parse the initial page address.
    pub fn parse(initial: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(initial)?))
    }

    /// Current page address (the newest history entry).
    pub fn current(&self) -> Url {
        self.entries()
            .last()
            .cloned()
            .unwrap_or_else(|| self.initial.clone())
    }

    /// Total history entries, the initial address included.
    pub fn history_len(&self) -> usize {
        1 + self.entries().len()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<Url>> {
        self.pushed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigation for AddressBar {
    fn current_url(&self) -> Url {
        self.current()
    }

    fn push_url(&self, url: Url) {
        tracing::debug!(url = %url, "address bar push");
        self.entries().push(url);
    }
}

/// Host-side consumption of a relayed video id.
///
/// If the current address carries the `video_ended` parameter, pushes a
/// new entry with the parameter cleared and returns the value. Without
/// the parameter this is a no-op returning `None`.
pub fn consume_video_ended(nav: &dyn Navigation) -> Option<String> {
    let (cleared, value) = take_query_param(&nav.current_url(), VIDEO_ENDED_PARAM);
    if value.is_some() {
        nav.push_url(cleared);
    }
    value
}
