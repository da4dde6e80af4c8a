//! Lenient decoding of ServiceNow-shaped record fields.
//!
//! Choice fields arrive as numbers, code strings (`"1"`), display strings
//! (`"1 - High"`), blanks, or `{ "value", "display_value" }` objects depending
//! on how the backend was queried. Encoding always produces the code string.

use crate::model::{IncidentState, Level, Priority};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Leading decimal digits of `raw`, ignoring leading whitespace.
pub fn leading_code(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

pub(crate) fn code_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => leading_code(s),
        Value::Object(map) => map.get("value").and_then(code_from_value),
        _ => None,
    }
}

pub(crate) fn state_from_value(value: &Value) -> Option<IncidentState> {
    match value {
        Value::Number(n) => {
            let code = n.as_u64()?;
            Some(IncidentState::from_code(code).unwrap_or_else(|| IncidentState::Other(code.to_string())))
        }
        Value::String(s) => IncidentState::parse(s),
        Value::Object(map) => map.get("value").and_then(state_from_value),
        _ => None,
    }
}

fn string_from_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Object(mut map) => map
            .remove("value")
            .map(string_from_value)
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

pub(crate) fn lenient_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_from_value(Value::deserialize(d)?))
}

pub(crate) fn opt_level<'de, D>(d: D) -> Result<Option<Level>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(code_from_value(&value).and_then(Level::from_code))
}

pub(crate) fn opt_priority<'de, D>(d: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(code_from_value(&value).and_then(Priority::from_code))
}

pub(crate) fn opt_state<'de, D>(d: D) -> Result<Option<IncidentState>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(state_from_value(&value))
}

pub(crate) fn present_string<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_string(d).map(Some)
}

pub(crate) fn present_level<'de, D>(d: D) -> Result<Option<Option<Level>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_level(d).map(Some)
}

pub(crate) fn present_priority<'de, D>(d: D) -> Result<Option<Option<Priority>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_priority(d).map(Some)
}

pub(crate) fn present_state<'de, D>(d: D) -> Result<Option<Option<IncidentState>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_state(d).map(Some)
}

pub(crate) fn ser_opt_level<S>(value: &Option<Level>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(value.as_ref().map_or("", Level::as_code))
}

pub(crate) fn ser_opt_priority<S>(value: &Option<Priority>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(value.as_ref().map_or("", Priority::as_code))
}

pub(crate) fn ser_opt_state<S>(value: &Option<IncidentState>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(value.as_ref().map_or("", IncidentState::label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn codes_come_from_numbers_strings_and_value_objects() {
        assert_eq!(code_from_value(&json!(2)), Some(2));
        assert_eq!(code_from_value(&json!("3 - Low")), Some(3));
        assert_eq!(code_from_value(&json!({"value": "1", "display_value": "1 - High"})), Some(1));
        assert_eq!(code_from_value(&json!("")), None);
        assert_eq!(code_from_value(&json!(null)), None);
        assert_eq!(code_from_value(&json!(-1)), None);
    }

    #[test]
    fn numeric_states_map_to_servicenow_codes() {
        assert_eq!(state_from_value(&json!(7)), Some(IncidentState::Closed));
        assert_eq!(
            state_from_value(&json!(8)),
            Some(IncidentState::Other("8".into()))
        );
        assert_eq!(state_from_value(&json!("")), None);
    }
}
