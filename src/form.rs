//! Flat form encoding of nested request values
//!
//! A request is serialized to a JSON tree and then flattened into ordered
//! `key=value` pairs the way the API expects them:
//!
//! - nested objects compose keys with brackets: `card[address_line1]`
//! - sequences embed the position: `items[0][plan]`
//! - absent (`None`) values, empty sequences and empty objects are omitted
//! - booleans render as `true`/`false`, numbers as their decimal literal
//!
//! Field names come only from each type's own serde attributes, so the
//! output never depends on anything configured outside the type.

use crate::{GatewayError, Result};
use chrono::{Datelike, NaiveDate};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use url::form_urlencoded;

/// Ordered flat form fields
pub type FormFields = Vec<(String, String)>;

/// Flatten a request value into ordered form fields
pub fn encode<T>(value: &T) -> Result<FormFields>
where
    T: Serialize + ?Sized,
{
    match serde_json::to_value(value)? {
        Value::Object(map) => {
            let mut fields = FormFields::new();
            flatten_object(None, map, &mut fields);
            Ok(fields)
        }
        Value::Null => Ok(FormFields::new()),
        other => Err(GatewayError::validation(format!(
            "request must serialize to named fields, got a {}",
            value_kind(&other)
        ))),
    }
}

/// Render form fields as an `application/x-www-form-urlencoded` body
pub fn to_form_body(fields: &[(String, String)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(fields.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

fn flatten_object(prefix: Option<&str>, map: Map<String, Value>, out: &mut FormFields) {
    for (name, value) in map {
        let key = match prefix {
            Some(prefix) => format!("{}[{}]", prefix, name),
            None => name,
        };
        flatten_value(key, value, out);
    }
}

fn flatten_value(key: String, value: Value, out: &mut FormFields) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key, b.to_string())),
        Value::Number(n) => out.push((key, n.to_string())),
        Value::String(s) => out.push((key, s)),
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                flatten_value(format!("{}[{}]", key, index), item, out);
            }
        }
        Value::Object(map) => flatten_object(Some(&key), map, out),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}

/// Calendar date with no time of day or zone.
///
/// On the wire it is three numeric fields, so a `dob` field encodes as
/// `dob[day]`, `dob[month]` and `dob[year]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StripeDate(NaiveDate);

impl StripeDate {
    /// Create a date, `None` if the components are not a real date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The underlying chrono date
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for StripeDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for StripeDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StripeDate", 3)?;
        state.serialize_field("day", &self.day())?;
        state.serialize_field("month", &self.month())?;
        state.serialize_field("year", &self.year())?;
        state.end()
    }
}

/// Wire form of a date. The API reports an unset date as all-null parts.
#[derive(Deserialize)]
struct DateParts {
    #[serde(default)]
    day: Option<u32>,
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    year: Option<i32>,
}

impl DateParts {
    /// `Ok(None)` when any part is unset
    fn into_date(self) -> std::result::Result<Option<StripeDate>, String> {
        match (self.year, self.month, self.day) {
            (Some(year), Some(month), Some(day)) => StripeDate::from_ymd(year, month, day)
                .map(Some)
                .ok_or_else(|| format!("invalid date {}-{}-{}", year, month, day)),
            _ => Ok(None),
        }
    }
}

impl<'de> Deserialize<'de> for StripeDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        DateParts::deserialize(deserializer)?
            .into_date()
            .map_err(D::Error::custom)?
            .ok_or_else(|| D::Error::custom("incomplete date"))
    }
}

/// Decode an optional date, accepting `null`, a missing key, or all-null
/// parts as "no date".
pub(crate) fn optional_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<StripeDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<DateParts>::deserialize(deserializer)? {
        Some(parts) => parts.into_date().map_err(D::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct Address {
        line1: String,
        city: Option<String>,
    }

    #[derive(Serialize)]
    struct Owner {
        first_name: String,
        address: Address,
        dob: StripeDate,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Interval {
        Month,
        PerYear,
    }

    #[derive(Serialize)]
    struct Item {
        plan: String,
        quantity: u32,
    }

    #[derive(Serialize)]
    struct Outer {
        email: Option<String>,
        description: Option<String>,
        amount: i64,
        capture: bool,
        interval: Interval,
        owner: Option<Owner>,
        items: Vec<Item>,
        tags: Vec<String>,
        metadata: BTreeMap<String, String>,
    }

    fn outer() -> Outer {
        Outer {
            email: Some("test@email.com".to_string()),
            description: None,
            amount: 100,
            capture: false,
            interval: Interval::PerYear,
            owner: Some(Owner {
                first_name: "Ada".to_string(),
                address: Address {
                    line1: "1 Address Road".to_string(),
                    city: None,
                },
                dob: StripeDate::from_ymd(1980, 7, 9).unwrap(),
            }),
            items: vec![
                Item {
                    plan: "gold".to_string(),
                    quantity: 1,
                },
                Item {
                    plan: "silver".to_string(),
                    quantity: 3,
                },
            ],
            tags: vec![],
            metadata: BTreeMap::new(),
        }
    }

    fn lookup<'a>(fields: &'a FormFields, key: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_scalars_and_omission() {
        let fields = encode(&outer()).unwrap();

        assert_eq!(lookup(&fields, "email"), Some("test@email.com"));
        assert_eq!(lookup(&fields, "amount"), Some("100"));
        assert_eq!(lookup(&fields, "capture"), Some("false"));
        assert!(lookup(&fields, "description").is_none());
        assert!(fields.iter().all(|(k, _)| !k.starts_with("description")));
        assert!(fields.iter().all(|(k, _)| !k.starts_with("tags")));
        assert!(fields.iter().all(|(k, _)| !k.starts_with("metadata")));
    }

    #[test]
    fn test_enum_uses_wire_name() {
        let fields = encode(&outer()).unwrap();
        assert_eq!(lookup(&fields, "interval"), Some("per_year"));

        let fields = encode(&BTreeMap::from([("interval", Interval::Month)])).unwrap();
        assert_eq!(fields, vec![("interval".to_string(), "month".to_string())]);
    }

    #[test]
    fn test_two_level_nesting() {
        let fields = encode(&outer()).unwrap();

        assert_eq!(lookup(&fields, "owner[first_name]"), Some("Ada"));
        assert_eq!(
            lookup(&fields, "owner[address][line1]"),
            Some("1 Address Road")
        );
        assert!(lookup(&fields, "owner[address][city]").is_none());
    }

    #[test]
    fn test_date_encodes_as_three_fields() {
        let fields = encode(&outer()).unwrap();

        assert_eq!(lookup(&fields, "owner[dob][day]"), Some("9"));
        assert_eq!(lookup(&fields, "owner[dob][month]"), Some("7"));
        assert_eq!(lookup(&fields, "owner[dob][year]"), Some("1980"));
    }

    #[test]
    fn test_collections_are_indexed() {
        let fields = encode(&outer()).unwrap();

        assert_eq!(lookup(&fields, "items[0][plan]"), Some("gold"));
        assert_eq!(lookup(&fields, "items[0][quantity]"), Some("1"));
        assert_eq!(lookup(&fields, "items[1][plan]"), Some("silver"));
        assert_eq!(lookup(&fields, "items[1][quantity]"), Some("3"));

        let fields = encode(&BTreeMap::from([("expand", vec!["customer", "invoice"])])).unwrap();
        assert_eq!(lookup(&fields, "expand[0]"), Some("customer"));
        assert_eq!(lookup(&fields, "expand[1]"), Some("invoice"));
    }

    #[test]
    fn test_keys_are_unique_and_ordered() {
        let fields = encode(&outer()).unwrap();

        let mut keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys[0], "email");
        assert_eq!(keys[1], "amount");

        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_non_object_request_is_rejected() {
        let err = encode(&42).unwrap_err();
        assert!(err.is_local());
        assert!(err.to_string().contains("number"));

        assert!(encode(&()).unwrap().is_empty());
    }

    #[test]
    fn test_form_body_round_trips() {
        let fields = encode(&outer()).unwrap();
        let body = to_form_body(&fields);

        assert!(body.contains("owner%5Baddress%5D%5Bline1%5D=1+Address+Road"));

        let parsed: FormFields = form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        assert_eq!(parsed, fields);
    }

    #[test]
    fn test_stripe_date_decodes() {
        let date: StripeDate =
            serde_json::from_str(r#"{"day": 29, "month": 2, "year": 2024}"#).unwrap();
        assert_eq!(date, StripeDate::from_ymd(2024, 2, 29).unwrap());

        let invalid = serde_json::from_str::<StripeDate>(r#"{"day": 30, "month": 2, "year": 2024}"#);
        assert!(invalid.is_err());
        assert!(StripeDate::from_ymd(2023, 2, 29).is_none());

        let unset = r#"{"day": null, "month": null, "year": null}"#;
        assert!(serde_json::from_str::<StripeDate>(unset).is_err());
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "optional_date")]
        dob: Option<StripeDate>,
    }

    #[test]
    fn test_optional_date_accepts_unset_shapes() {
        for body in [
            r#"{}"#,
            r#"{"dob": null}"#,
            r#"{"dob": {"day": null, "month": null, "year": null}}"#,
            r#"{"dob": {"day": 9, "month": null, "year": 1980}}"#,
        ] {
            let holder: Holder = serde_json::from_str(body).unwrap();
            assert_eq!(holder.dob, None, "body {}", body);
        }

        let holder: Holder =
            serde_json::from_str(r#"{"dob": {"day": 9, "month": 7, "year": 1980}}"#).unwrap();
        assert_eq!(holder.dob, StripeDate::from_ymd(1980, 7, 9));

        let impossible = r#"{"dob": {"day": 31, "month": 2, "year": 1980}}"#;
        assert!(serde_json::from_str::<Holder>(impossible).is_err());
    }
}
