use incident_core::http::{decode_list, decode_patch, decode_record, error_message};
use incident_core::{IncidentDraft, IncidentError, IncidentState, Level, Priority};
use serde_json::json;

#[test]
fn list_envelope_decodes_servicenow_records() {
    let body = json!({
        "result": [
            {
                "sys_id": "9d385017c611228701d22104cc95c371",
                "number": "INC0000060",
                "short_description": "Unable to connect to email",
                "state": "2",
                "urgency": "1 - High",
                "impact": {"value": "2", "display_value": "2 - Medium"},
                "priority": 2,
                "assignment_group": {"link": "https://example/api", "value": "8a5055c9"},
                "sys_updated_on": "2024-05-02 10:11:12"
            },
            {
                "sys_id": "b2",
                "number": "INC0000061",
                "short_description": "Printer jam",
                "state": "On Hold",
                "urgency": "",
                "impact": "",
                "priority": ""
            }
        ]
    })
    .to_string();

    let list = decode_list(&body).expect("decode list");
    assert_eq!(list.len(), 2);

    let first = &list[0];
    assert_eq!(first.number, "INC0000060");
    assert_eq!(first.state, Some(IncidentState::InProgress));
    assert_eq!(first.urgency, Some(Level::High));
    assert_eq!(first.impact, Some(Level::Medium));
    assert_eq!(first.priority, Some(Priority::High));
    assert_eq!(first.extra["sys_updated_on"], json!("2024-05-02 10:11:12"));

    let second = &list[1];
    assert_eq!(second.state, Some(IncidentState::Other("On Hold".into())));
    assert_eq!(second.urgency, None);
    assert_eq!(second.priority_code(), "");
}

#[test]
fn list_without_result_is_a_decode_error() {
    let err = decode_list(r#"{"records": []}"#).expect_err("missing result");
    assert!(matches!(err, IncidentError::Decode(_)));
}

#[test]
fn update_echo_accepts_wrapped_and_bare_shapes() {
    let wrapped = decode_patch(r#"{"result": {"sys_id": "a1", "state": "Resolved"}}"#)
        .expect("wrapped");
    let bare = decode_patch(r#"{"sys_id": "a1", "state": "Resolved"}"#).expect("bare");

    assert_eq!(wrapped, bare);
    assert_eq!(bare.state, Some(Some(IncidentState::Resolved)));
    assert_eq!(bare.short_description, None);
    assert!(bare.extra.is_empty());
}

#[test]
fn created_record_comes_from_result() {
    let record = decode_record(
        r#"{"result": {"sys_id": "n1", "number": "INC0010001", "short_description": "Server down",
            "state": "New", "urgency": "1", "impact": "1", "priority": "1"}}"#,
    )
    .expect("record");
    assert_eq!(record.sys_id, "n1");
    assert_eq!(record.priority, Some(Priority::Critical));
}

#[test]
fn error_field_may_be_text_or_object() {
    assert_eq!(
        error_message(r#"{"error": "short_description is required"}"#).as_deref(),
        Some("short_description is required")
    );
    assert_eq!(
        error_message(r#"{"error": {"message": "Invalid table", "detail": null}, "status": "failure"}"#)
            .as_deref(),
        Some("Invalid table")
    );
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}

#[test]
fn draft_encodes_codes_and_blanks() {
    let draft = IncidentDraft::new("Server down", Some(IncidentState::InProgress), Some(Level::High), None);
    let value = serde_json::to_value(&draft).expect("encode");
    assert_eq!(
        value,
        json!({
            "short_description": "Server down",
            "state": "In Progress",
            "urgency": "1",
            "impact": ""
        })
    );
}

#[test]
fn created_record_must_be_a_wrapped_record_with_an_id() {
    for body in [
        "{}",
        r#"{"error": "boom"}"#,
        r#"{"result": "ok"}"#,
        r#"{"result": [{"sys_id": "n1"}]}"#,
        r#"{"result": {"number": "INC0010001"}}"#,
        r#"{"sys_id": "n1", "number": "INC0010001"}"#,
    ] {
        let err = decode_record(body).expect_err(body);
        assert!(matches!(err, IncidentError::Decode(_)), "{body}: {err:?}");
    }
}

#[test]
fn update_echo_result_must_be_an_object() {
    for body in [r#"{"result": "ok"}"#, r#"{"result": null}"#, "[]", r#""done""#] {
        let err = decode_patch(body).expect_err(body);
        assert!(matches!(err, IncidentError::Decode(_)), "{body}: {err:?}");
    }
}
