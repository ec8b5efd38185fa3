//! Scalar extractors for MongoDB-style wrapper objects.
//!
//! Every function here is total: malformed or absent input degrades to an
//! empty sentinel instead of an error, so one bad record cannot abort a run.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Key of an identifier wrapper, e.g. `{"$oid": "507f1f77bcf86cd799439011"}`.
pub const OID_KEY: &str = "$oid";

/// Key of a date wrapper, e.g. `{"$date": "2025-01-15T10:30:00.000Z"}`.
pub const DATE_KEY: &str = "$date";

// Pre-compiled timestamp shapes; anything else is rejected before parsing
static ISO_DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$").unwrap()
});

static ISO_DATE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Extract the string identifier out of an identifier wrapper.
///
/// Returns the empty string for anything that is not a mapping holding a
/// string under [`OID_KEY`].
pub fn object_id(value: Option<&Value>) -> String {
    value
        .and_then(|wrapper| wrapper.get(OID_KEY))
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// Extract and parse the timestamp out of a date wrapper.
///
/// Timezone-aware inputs are converted to naive UTC; spreadsheet cells
/// cannot represent zone offsets. Absent or malformed wrappers yield `None`.
pub fn wrapped_date(value: Option<&Value>) -> Option<NaiveDateTime> {
    let raw = value?.get(DATE_KEY)?.as_str()?;
    parse_timestamp(raw.trim())
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if ISO_DATE_REGEX.is_match(raw) {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0);
    }

    if !ISO_DATETIME_REGEX.is_match(raw) {
        return None;
    }

    let raw = raw.replacen(' ', "T", 1);
    if let Ok(aware) = DateTime::parse_from_rfc3339(&raw) {
        return Some(aware.naive_utc());
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Walk a chain of keys through nested mappings.
///
/// Returns `None` the moment a step hits a missing key, a non-mapping, or a
/// null leaf. An empty path returns the (non-null) root itself.
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use sheetpress::shape::extract::safe_get;
///
/// let doc = json!({"user": {"address": {"city": "Fortaleza"}}});
/// assert_eq!(
///     safe_get(Some(&doc), &["user", "address", "city"]),
///     Some(&json!("Fortaleza"))
/// );
/// assert_eq!(safe_get(Some(&doc), &["user", "phone"]), None);
/// ```
pub fn safe_get<'a>(root: Option<&'a Value>, path: &[&str]) -> Option<&'a Value> {
    let mut current = root?;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}
