//! Representative scalar literals for well-known value types.
//!
//! A field-name heuristic makes string/number examples friendlier (url, email,
//! id, ...). Explicit per-field overrides are parsed here too; the caller
//! decides precedence (overrides always win).

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

const EXAMPLE_UUID: &str = "6f9619ff-8b86-d011-b42d-00c04fc964ff";

static URL_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(url|uri|link)$").unwrap());
static EMAIL_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)e?mail$").unwrap());
static PHONE_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(phone|mobile|tel)").unwrap());
// `Id` must be a word of its own ("id", "userId", "user_id"), not a tail of
// words like "paid".
static ID_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^id$|[a-z0-9]Id$|_id$)").unwrap());

/// Scalar example literal for a well-known type, optionally informed by the
/// declaring field's name. Unrecognized names fall back to a plain string so
/// the document stays well-formed.
pub fn scalar_value(type_name: &str, field_name: Option<&str>) -> Value {
    match type_name {
        "boolean" | "java.lang.Boolean" => json!(true),
        "byte" | "java.lang.Byte" | "short" | "java.lang.Short" | "int"
        | "java.lang.Integer" | "long" | "java.lang.Long" | "java.math.BigInteger" => {
            integer_value(field_name)
        }
        "float" | "java.lang.Float" | "double" | "java.lang.Double" | "java.lang.Number"
        | "java.math.BigDecimal" => json!(0.0),
        "char" | "java.lang.Character" => json!("c"),
        "java.lang.String" | "java.lang.CharSequence" => string_value(field_name),
        "java.util.UUID" => json!(EXAMPLE_UUID),
        "java.time.LocalDate" => json!(Utc::now().format("%Y-%m-%d").to_string()),
        "java.time.LocalTime" => json!(Utc::now().format("%H:%M:%S").to_string()),
        "java.util.Date" | "java.sql.Timestamp" | "java.time.LocalDateTime" => {
            json!(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
        }
        "java.time.OffsetDateTime" | "java.time.ZonedDateTime" | "java.time.Instant" => {
            json!(Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        }
        _ => json!("string"),
    }
}

fn string_value(field_name: Option<&str>) -> Value {
    let Some(name) = field_name else { return json!("string") };
    if URL_FIELD.is_match(name) {
        json!("https://www.example.com")
    } else if EMAIL_FIELD.is_match(name) {
        json!("user@example.com")
    } else if PHONE_FIELD.is_match(name) {
        json!("+1-202-555-0170")
    } else {
        json!("string")
    }
}

fn integer_value(field_name: Option<&str>) -> Value {
    match field_name {
        Some(name) if ID_FIELD.is_match(name) => json!(1),
        _ => json!(0),
    }
}

/// Parse an explicit per-field override. Valid JSON text is embedded as-is;
/// anything else becomes a string literal.
pub fn parse_override(text: &str) -> Value {
    serde_json::from_str::<Value>(text.trim()).unwrap_or_else(|_| json!(text.trim()))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_values_by_type() {
        assert_eq!(scalar_value("java.lang.Boolean", None), json!(true));
        assert_eq!(scalar_value("int", None), json!(0));
        assert_eq!(scalar_value("java.math.BigDecimal", None), json!(0.0));
        assert_eq!(scalar_value("java.lang.String", None), json!("string"));
        assert_eq!(scalar_value("char", None), json!("c"));
        assert_eq!(scalar_value("java.util.UUID", None), json!(EXAMPLE_UUID));
    }

    #[test]
    fn field_name_heuristics() {
        assert_eq!(
            scalar_value("java.lang.String", Some("avatarUrl")),
            json!("https://www.example.com")
        );
        assert_eq!(
            scalar_value("java.lang.String", Some("email")),
            json!("user@example.com")
        );
        assert_eq!(scalar_value("java.lang.Long", Some("userId")), json!(1));
        assert_eq!(scalar_value("java.lang.Long", Some("count")), json!(0));
    }

    #[test]
    fn date_values_are_formatted() {
        let v = scalar_value("java.time.LocalDate", None);
        let s = v.as_str().unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(&s[4..5], "-");
    }

    #[test]
    fn overrides_parse_as_json_when_possible() {
        assert_eq!(parse_override("42"), json!(42));
        assert_eq!(parse_override("{\"a\":1}"), json!({"a":1}));
        assert_eq!(parse_override("hello world"), json!("hello world"));
    }
}
