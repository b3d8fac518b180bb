//! Response materialization and the paginated list envelope

use crate::error::translate;
use crate::transport::RawResponse;
use crate::{GatewayError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Turn a raw response into the typed result, or the structured remote error
pub fn materialize<T: DeserializeOwned>(raw: RawResponse) -> Result<T> {
    if !raw.is_success() {
        return Err(translate(raw.status, &raw.body));
    }

    serde_json::from_str(&raw.body).map_err(|source| GatewayError::Decode {
        status: raw.status,
        source,
    })
}

/// Resources addressable by id, used for pagination cursors
pub trait HasId {
    fn id(&self) -> &str;
}

/// Paginated collection: `{"object": "list", "data": [...], "has_more": ...}`
///
/// Decoding logs a warning when the reported total contradicts `has_more`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "ListEnvelopeRepr<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ListEnvelope<T> {
    pub object: Option<String>,
    pub url: Option<String>,
    pub has_more: bool,
    /// Size of the full result set, when the API reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    pub data: Vec<T>,
}

#[derive(Deserialize)]
struct ListEnvelopeRepr<T> {
    #[serde(default)]
    object: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    total_count: Option<u64>,
    /// Legacy name of `total_count`
    #[serde(default)]
    count: Option<u64>,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

impl<T> From<ListEnvelopeRepr<T>> for ListEnvelope<T> {
    fn from(repr: ListEnvelopeRepr<T>) -> Self {
        let list = Self {
            object: repr.object,
            url: repr.url,
            has_more: repr.has_more,
            total_count: repr.total_count.or(repr.count),
            data: repr.data,
        };
        if !list.is_consistent() {
            warn!(
                url = list.url.as_deref().unwrap_or_default(),
                has_more = list.has_more,
                total_count = ?list.total_count,
                returned = list.data.len(),
                "List envelope counts are inconsistent"
            );
        }
        list
    }
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        Self {
            object: Some("list".to_string()),
            url: None,
            has_more: false,
            total_count: None,
            data: Vec::new(),
        }
    }
}

impl<T> ListEnvelope<T> {
    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Whether this page holds the whole result set
    pub fn is_complete(&self) -> bool {
        !self.has_more
    }

    /// A final page must hold exactly the reported total; an intermediate
    /// page must not hold more than it.
    pub fn is_consistent(&self) -> bool {
        match self.total_count {
            Some(total) if !self.has_more => total == self.data.len() as u64,
            Some(total) => (self.data.len() as u64) <= total,
            None => true,
        }
    }
}

impl<T: HasId> ListEnvelope<T> {
    /// Id of the last item on this page
    pub fn last_id(&self) -> Option<&str> {
        self.data.last().map(HasId::id)
    }

    /// Cursor for the next page (`starting_after`), if there is one
    pub fn next_cursor(&self) -> Option<&str> {
        if self.has_more {
            self.last_id()
        } else {
            None
        }
    }
}

impl<T> IntoIterator for ListEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ListEnvelope<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
