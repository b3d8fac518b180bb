//! Value shapes shared across resources

use crate::response::ListEnvelope;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Free-form key/value pairs attached to a resource
pub type Metadata = BTreeMap<String, String>;

/// Result of deleting a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletedRef {
    pub id: String,
    pub deleted: bool,
}

/// Cursor parameters shared by list requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Page size, 1 to 100
    pub limit: Option<u32>,
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
}

impl Pagination {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Continue after the given object id
    pub fn after(id: impl Into<String>) -> Self {
        Self {
            starting_after: Some(id.into()),
            ..Default::default()
        }
    }

    pub(crate) fn check(&self) -> crate::Result<()> {
        if let Some(limit) = self.limit {
            if !(1..=100).contains(&limit) {
                return Err(crate::GatewayError::validation(format!(
                    "limit must be between 1 and 100, got {}",
                    limit
                )));
            }
        }
        if self.starting_after.is_some() && self.ending_before.is_some() {
            return Err(crate::GatewayError::validation(
                "starting_after and ending_before cannot both be set",
            ));
        }
        Ok(())
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// Accepts a nested collection either as a bare array (older API versions)
/// or as a list envelope.
pub(crate) fn list_or_vec<'de, D, T>(deserializer: D) -> Result<ListEnvelope<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Either<T> {
        Vec(Vec<T>),
        List(ListEnvelope<T>),
    }

    Ok(match Option::<Either<T>>::deserialize(deserializer)? {
        Some(Either::Vec(data)) => ListEnvelope {
            total_count: Some(data.len() as u64),
            data,
            ..Default::default()
        },
        Some(Either::List(list)) => list,
        None => ListEnvelope::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::encode;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "list_or_vec")]
        refunds: ListEnvelope<DeletedRef>,
    }

    #[test]
    fn test_list_or_vec_accepts_both_shapes() {
        let bare: Holder =
            serde_json::from_str(r#"{"refunds":[{"id":"re_1","deleted":false}]}"#).unwrap();
        assert_eq!(bare.refunds.len(), 1);
        assert!(bare.refunds.is_consistent());

        let wrapped: Holder = serde_json::from_str(
            r#"{"refunds":{"object":"list","has_more":false,"total_count":1,"data":[{"id":"re_1"}]}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.refunds.data[0].id, "re_1");

        let missing: Holder = serde_json::from_str("{}").unwrap();
        assert!(missing.refunds.is_empty());

        let null: Holder = serde_json::from_str(r#"{"refunds":null}"#).unwrap();
        assert!(null.refunds.is_empty());
    }

    #[test]
    fn test_pagination_encoding_and_checks() {
        let fields = encode(&Pagination::after("cus_9")).unwrap();
        assert_eq!(fields, vec![("starting_after".to_string(), "cus_9".to_string())]);

        assert!(Pagination::with_limit(100).check().is_ok());
        assert!(Pagination::with_limit(0).check().is_err());
        assert!(Pagination::with_limit(101).check().is_err());
        assert!(Pagination {
            starting_after: Some("a".into()),
            ending_before: Some("b".into()),
            ..Default::default()
        }
        .check()
        .is_err());
    }
}
