use incident_core::{IncidentState, Level};
use serde_json::{Map, Value};

/// Fields from a create/update body. The outer `Option` is presence in the
/// body; the inner one is the (possibly blank) value sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IncidentFields {
    pub short_description: Option<String>,
    pub state: Option<Option<IncidentState>>,
    pub urgency: Option<Option<Level>>,
    pub impact: Option<Option<Level>>,
}

pub fn parse_fields(body: &Value, creating: bool) -> Result<IncidentFields, String> {
    let obj = body
        .as_object()
        .ok_or_else(|| "request body must be a JSON object".to_string())?;

    let short_description = match obj.get("short_description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(_) => return Err("short_description must be a string".into()),
    };
    match short_description.as_deref() {
        None if creating => return Err("short_description is required".into()),
        Some("") => return Err("short_description is required".into()),
        _ => {}
    }

    let state = match obj.get("state") {
        None => None,
        Some(Value::Null) => Some(None),
        Some(Value::String(s)) if s.trim().is_empty() => Some(None),
        Some(Value::String(s)) => Some(Some(
            IncidentState::parse_label(s).ok_or_else(|| format!("invalid state '{s}'"))?,
        )),
        Some(other) => return Err(format!("invalid state {other}")),
    };

    Ok(IncidentFields {
        short_description,
        state,
        urgency: level_field(obj, "urgency")?,
        impact: level_field(obj, "impact")?,
    })
}

fn level_field(obj: &Map<String, Value>, name: &str) -> Result<Option<Option<Level>>, String> {
    let code = match obj.get(name) {
        None => return Ok(None),
        Some(Value::Null) => return Ok(Some(None)),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(Some(None)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        Some(Value::Number(n)) => n.as_u64(),
        Some(_) => None,
    };
    code.and_then(Level::from_code)
        .map(|level| Some(Some(level)))
        .ok_or_else(|| format!("{name} must be 1, 2 or 3"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validates_create_body() {
        let fields = parse_fields(
            &json!({
                "short_description": "Server down",
                "state": "New",
                "urgency": "1",
                "impact": 2
            }),
            true,
        )
        .expect("valid");
        assert_eq!(fields.short_description.as_deref(), Some("Server down"));
        assert_eq!(fields.state, Some(Some(IncidentState::New)));
        assert_eq!(fields.urgency, Some(Some(Level::High)));
        assert_eq!(fields.impact, Some(Some(Level::Medium)));
    }

    #[test]
    fn blank_choices_are_unset() {
        let fields = parse_fields(
            &json!({"short_description": "x", "state": "", "urgency": "", "impact": null}),
            true,
        )
        .expect("valid");
        assert_eq!(fields.state, Some(None));
        assert_eq!(fields.urgency, Some(None));
        assert_eq!(fields.impact, Some(None));
    }

    #[test]
    fn rejects_missing_description_on_create_only() {
        assert_eq!(
            parse_fields(&json!({"state": "New"}), true),
            Err("short_description is required".into())
        );
        assert!(parse_fields(&json!({"state": "Closed"}), false).is_ok());
        assert!(parse_fields(&json!({"short_description": "  "}), false).is_err());
    }

    #[test]
    fn rejects_out_of_range_levels_and_unknown_states() {
        assert_eq!(
            parse_fields(&json!({"short_description": "x", "urgency": "4"}), true),
            Err("urgency must be 1, 2 or 3".into())
        );
        assert_eq!(
            parse_fields(&json!({"short_description": "x", "impact": "high"}), true),
            Err("impact must be 1, 2 or 3".into())
        );
        assert_eq!(
            parse_fields(&json!({"short_description": "x", "state": "On Hold"}), true),
            Err("invalid state 'On Hold'".into())
        );
        assert!(parse_fields(&json!(["not", "an", "object"]), true).is_err());
    }
}
