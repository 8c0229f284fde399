use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::cupi::entity::{Record, Value as RowValue};
use crate::cupi::entitydescriptor::{EntityDescriptor, FieldKind};

/// Key CUPI uses for the total row count of a collection.
const TOTAL_KEY: &str = "@total";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Why a payload field did not land on the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The record type has no field by that name.
    UnknownField,
    /// The field exists but the value could not be converted; the field was left unset.
    CoercionFailed { expected: &'static str, raw: String },
}

/// A payload field the mapper could not place. Informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDiagnostic {
    pub type_name: &'static str,
    pub field_name: String,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for PropertyDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::UnknownField => write!(
                f,
                "Unknown property {} found for {}",
                self.field_name, self.type_name
            ),
            DiagnosticKind::CoercionFailed { expected, raw } => write!(
                f,
                "Property {} on {} could not be read as {}: {}",
                self.field_name, self.type_name, expected, raw
            ),
        }
    }
}

/// Mapped value plus whatever the mapper had to skip.
#[derive(Debug, Clone)]
pub struct Populated<T> {
    pub value: T,
    pub diagnostics: Vec<PropertyDiagnostic>,
}

/// Map a single JSON object onto a record.
///
/// Fails only when the payload is not JSON or is not an object. Unknown keys and values that
/// cannot be coerced are reported as diagnostics and skipped.
pub fn populate_record_from_json(
    payload: &str,
    descriptor: &'static EntityDescriptor,
) -> Result<Populated<Record>, String> {
    let json: Value =
        serde_json::from_str(payload).map_err(|e| format!("Failed to parse JSON: {e}"))?;

    let object = json.as_object().ok_or_else(|| {
        format!(
            "Invalid response from Unity Connection: expected a {} object",
            descriptor.type_name
        )
    })?;

    Ok(populate_record(object, descriptor))
}

/// Map a collection payload onto records.
///
/// Accepts the CUPI wrapper (`{"@total":"2","User":[...]}`), a wrapper holding a single object,
/// a bare array, or a bare object. Blank payloads, invalid JSON and non-object shapes all come
/// back as an empty list; the caller decides success from the HTTP status, not from here.
pub fn populate_list_from_json(
    payload: &str,
    descriptor: &'static EntityDescriptor,
) -> Populated<Vec<Record>> {
    let mut populated = Populated {
        value: vec![],
        diagnostics: vec![],
    };

    if payload.trim().is_empty() {
        return populated;
    }

    let json: Value = match serde_json::from_str(payload) {
        Ok(json) => json,
        Err(e) => {
            log::debug!(
                "Ignoring unparseable {} list payload: {}",
                descriptor.type_name,
                e
            );
            return populated;
        }
    };

    for object in list_objects(&json, descriptor) {
        let record = populate_record(object, descriptor);
        populated.diagnostics.extend(record.diagnostics);
        populated.value.push(record.value);
    }

    populated
}

/// Total row count reported by a collection payload; 0 when absent or unreadable.
pub fn parse_total_count(payload: &str) -> usize {
    let Ok(json) = serde_json::from_str::<Value>(payload) else {
        return 0;
    };

    match json.get(TOTAL_KEY) {
        Some(Value::String(total)) => total.trim().parse().unwrap_or(0),
        Some(Value::Number(total)) => total.as_u64().unwrap_or(0) as usize,
        _ => 0,
    }
}

fn list_objects<'a>(
    json: &'a Value,
    descriptor: &'static EntityDescriptor,
) -> Vec<&'a Map<String, Value>> {
    match json {
        Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
        Value::Object(object) => match object.get(descriptor.list_key) {
            Some(inner) => list_objects(inner, descriptor),
            // A collection wrapper without our list key is an empty page, not a record.
            None if object.keys().any(|key| key.starts_with('@')) => vec![],
            None if object.is_empty() => vec![],
            None => vec![object],
        },
        _ => vec![],
    }
}

fn populate_record(
    object: &Map<String, Value>,
    descriptor: &'static EntityDescriptor,
) -> Populated<Record> {
    let mut record = Record::new(descriptor);
    let mut diagnostics = vec![];

    for (key, value) in object {
        let Some(field) = descriptor.field(key) else {
            diagnostics.push(PropertyDiagnostic {
                type_name: descriptor.type_name,
                field_name: key.clone(),
                kind: DiagnosticKind::UnknownField,
            });
            continue;
        };

        match coerce_value(field.kind, value) {
            Some(coerced) => record.insert_value(field.name, coerced),
            None => diagnostics.push(PropertyDiagnostic {
                type_name: descriptor.type_name,
                field_name: key.clone(),
                kind: DiagnosticKind::CoercionFailed {
                    expected: field.kind.label(),
                    raw: value.to_string(),
                },
            }),
        }
    }

    for diagnostic in &diagnostics {
        log::warn!("{}", diagnostic);
    }

    Populated {
        value: record,
        diagnostics,
    }
}

/// Convert a JSON value into a field value of the given kind.
pub(crate) fn coerce_value(kind: FieldKind, value: &Value) -> Option<RowValue> {
    if value.is_null() {
        return Some(RowValue::Null);
    }

    match kind {
        FieldKind::String => match value {
            Value::String(s) => Some(RowValue::String(s.clone())),
            Value::Number(n) => Some(RowValue::String(n.to_string())),
            Value::Bool(b) => Some(RowValue::String(b.to_string())),
            _ => None,
        },
        FieldKind::Int => coerce_int(value).map(RowValue::Int),
        FieldKind::Float => match value {
            Value::Number(n) => n.as_f64().map(RowValue::Float),
            Value::String(s) => s.trim().parse::<f64>().ok().map(RowValue::Float),
            _ => None,
        },
        FieldKind::Boolean => coerce_bool(value).map(RowValue::Boolean),
        FieldKind::DateTime => value
            .as_str()
            .and_then(parse_datetime)
            .map(RowValue::DateTime),
        FieldKind::Enum(descriptor) => coerce_int(value)
            .or_else(|| value.as_str().and_then(|name| descriptor.value_of(name)))
            .map(RowValue::Enum),
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") || s == "1" {
                Some(true)
            } else if s.eq_ignore_ascii_case("false") || s == "0" {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Parse the date-time shapes CUPI emits, with or without an offset.
pub(crate) fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cupi::entities::{CALL_HANDLER, USER};
    use crate::cupi::entitydescriptor::FieldDescriptor;

    const USER_JSON: &str = r#"{
        "ObjectId": "4f3a2b1c-0000-4000-8000-000000000001",
        "Alias": "jdoe",
        "FirstName": "Jane",
        "ListInDirectory": "true",
        "TimeZone": "35",
        "CreationTime": "2013-10-28 19:23:16.653",
        "ClockMode": "2"
    }"#;

    #[test]
    fn known_fields_map_without_diagnostics() {
        let populated = populate_record_from_json(USER_JSON, &USER).unwrap();
        let user = populated.value;

        assert!(populated.diagnostics.is_empty());
        assert_eq!(user.object_id(), Some("4f3a2b1c-0000-4000-8000-000000000001"));
        assert_eq!(user.get_str("Alias"), Some("jdoe"));
        assert_eq!(user.get_bool("ListInDirectory"), Some(true));
        assert_eq!(user.get_int("TimeZone"), Some(35));
        assert_eq!(user.get_enum_name("ClockMode"), Some("TwentyFourHour"));
        assert_eq!(
            user.get_datetime("CreationTime"),
            parse_datetime("2013-10-28T19:23:16.653Z")
        );
    }

    #[test]
    fn unknown_fields_produce_one_diagnostic_each() {
        let payload = r#"{"Alias":"jdoe","Bogus":"1","AlsoBogus":{"x":1}}"#;
        let populated = populate_record_from_json(payload, &USER).unwrap();

        assert_eq!(populated.value.get_str("Alias"), Some("jdoe"));
        assert_eq!(populated.diagnostics.len(), 2);
        assert!(
            populated
                .diagnostics
                .iter()
                .all(|d| d.kind == DiagnosticKind::UnknownField && d.type_name == "User")
        );
    }

    #[test]
    fn field_names_match_case_sensitively() {
        let populated = populate_record_from_json(r#"{"alias":"jdoe"}"#, &USER).unwrap();
        assert!(populated.value.get("Alias").is_none());
        assert_eq!(populated.diagnostics[0].field_name, "alias");
    }

    #[test]
    fn uncoercible_value_leaves_field_unset() {
        let payload = r#"{"Alias":"jdoe","TimeZone":"eastern","ListInDirectory":"maybe"}"#;
        let populated = populate_record_from_json(payload, &USER).unwrap();

        assert_eq!(populated.value.get("TimeZone"), None);
        assert_eq!(populated.value.get("ListInDirectory"), None);
        assert_eq!(populated.diagnostics.len(), 2);
        assert!(matches!(
            populated.diagnostics[0].kind,
            DiagnosticKind::CoercionFailed { .. }
        ));
    }

    #[test]
    fn invalid_json_fails_single_record() {
        assert!(populate_record_from_json("{not json", &USER).is_err());
        assert!(populate_record_from_json("\"just a string\"", &USER).is_err());
    }

    #[test]
    fn same_payload_populates_identical_records() {
        let first = populate_record_from_json(USER_JSON, &USER).unwrap().value;
        let second = populate_record_from_json(USER_JSON, &USER).unwrap().value;
        assert!(first.same_values(&second));
    }

    #[test]
    fn empty_list_payload_is_empty_list() {
        let populated = populate_list_from_json("", &USER);
        assert!(populated.value.is_empty());
        assert!(populated.diagnostics.is_empty());
    }

    #[test]
    fn garbage_list_payload_is_empty_list() {
        assert!(populate_list_from_json("\"garbage\"", &USER).value.is_empty());
        assert!(populate_list_from_json("42", &USER).value.is_empty());
        assert!(populate_list_from_json("{not json", &USER).value.is_empty());
    }

    #[test]
    fn wrapped_list_is_unwrapped() {
        let payload = r#"{"@total":"2","User":[{"Alias":"a"},{"Alias":"b"}]}"#;
        let populated = populate_list_from_json(payload, &USER);

        let aliases = populated
            .value
            .iter()
            .filter_map(|user| user.get_str("Alias"))
            .collect::<Vec<&str>>();
        assert_eq!(aliases, vec!["a", "b"]);
        assert_eq!(parse_total_count(payload), 2);
    }

    #[test]
    fn single_object_is_normalized_to_one_element_list() {
        let payload = r#"{"@total":"1","Callhandler":{"DisplayName":"Opening Greeting"}}"#;
        let populated = populate_list_from_json(payload, &CALL_HANDLER);

        assert_eq!(populated.value.len(), 1);
        assert_eq!(
            populated.value[0].get_str("DisplayName"),
            Some("Opening Greeting")
        );
    }

    #[test]
    fn zero_total_is_empty_list() {
        let payload = r#"{"@total":"0"}"#;
        assert!(populate_list_from_json(payload, &USER).value.is_empty());
        assert_eq!(parse_total_count(payload), 0);
    }

    #[test]
    fn bare_array_is_mapped() {
        let payload = r#"[{"Alias":"a"},"skip me",{"Alias":"b"}]"#;
        assert_eq!(populate_list_from_json(payload, &USER).value.len(), 2);
    }

    #[test]
    fn wrapper_with_other_list_key_is_empty_list() {
        let payload = r#"{"@total":"2","Users":[{"Alias":"a"},{"Alias":"b"}]}"#;
        let populated = populate_list_from_json(payload, &USER);
        assert!(populated.value.is_empty());
        assert!(populated.diagnostics.is_empty());
    }

    #[test]
    fn bare_object_is_one_record() {
        let populated = populate_list_from_json(r#"{"Alias":"a"}"#, &USER);
        assert_eq!(populated.value.len(), 1);
        assert!(populate_list_from_json("{}", &USER).value.is_empty());
    }

    static METER: EntityDescriptor = EntityDescriptor {
        type_name: "Meter",
        resource_path: "meters",
        list_key: "Meter",
        id_field: "ObjectId",
        lookup_field: None,
        fields: &[
            FieldDescriptor::string("ObjectId").read_only(),
            FieldDescriptor::float("Reading"),
        ],
    };

    #[test]
    fn numeric_string_maps_to_float_field() {
        let populated = populate_record_from_json(r#"{"Reading":"1.5"}"#, &METER).unwrap();
        assert!(populated.diagnostics.is_empty());
        assert_eq!(populated.value.get_float("Reading"), Some(1.5));
    }

    #[test]
    fn json_number_maps_to_float_field() {
        let populated = populate_record_from_json(r#"{"Reading":2.25}"#, &METER).unwrap();
        assert_eq!(populated.value.get("Reading"), Some(&RowValue::Float(2.25)));

        let whole = populate_record_from_json(r#"{"Reading":3}"#, &METER).unwrap();
        assert_eq!(whole.value.get_float("Reading"), Some(3.0));
    }

    #[test]
    fn non_numeric_float_value_is_left_unset() {
        let populated = populate_record_from_json(r#"{"Reading":"abc"}"#, &METER).unwrap();
        assert_eq!(populated.value.get("Reading"), None);
        assert_eq!(populated.diagnostics.len(), 1);
        assert_eq!(
            populated.diagnostics[0].kind,
            DiagnosticKind::CoercionFailed {
                expected: "float",
                raw: "\"abc\"".to_string(),
            }
        );
    }

    #[test]
    fn datetime_shapes() {
        assert!(parse_datetime("2013-10-28 19:23:16.653").is_some());
        assert!(parse_datetime("2013-10-28T19:23:16").is_some());
        assert!(parse_datetime("2013-10-28T19:23:16+02:00").is_some());
        assert!(parse_datetime("2013-10-28").is_some());
        assert!(parse_datetime("yesterday").is_none());
    }
}
