use crate::model::{Incident, IncidentDraft, IncidentState, Level};
use crate::priority::derive_priority;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// State of the create/edit dialog, holding field values exactly as the
/// inputs hold them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncidentForm {
    pub description: String,
    pub state: String,
    pub urgency: String,
    pub impact: String,
    /// `sys_id` of the record being edited; `None` while creating.
    pub editing_id: Option<String>,
}

impl IncidentForm {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn edit(incident: &Incident) -> Self {
        Self {
            description: incident.short_description.clone(),
            state: incident.state_label().to_string(),
            urgency: incident
                .urgency
                .as_ref()
                .map_or("", Level::as_code)
                .to_string(),
            impact: incident
                .impact
                .as_ref()
                .map_or("", Level::as_code)
                .to_string(),
            editing_id: Some(incident.sys_id.clone()),
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.editing_id.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Create New Incident",
            FormMode::Edit => "Edit Incident",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode() {
            FormMode::Create => "Create",
            FormMode::Edit => "Update",
        }
    }

    /// Read-only preview such as `"1 - Critical"`; empty until both urgency
    /// and impact are picked. The backend has the final say.
    pub fn priority_preview(&self) -> String {
        derive_priority(
            Level::parse_field(&self.urgency),
            Level::parse_field(&self.impact),
        )
        .map(|p| p.label())
        .unwrap_or_default()
    }

    pub fn to_draft(&self) -> IncidentDraft {
        IncidentDraft {
            short_description: self.description.clone(),
            state: IncidentState::parse(&self.state),
            urgency: Level::parse_field(&self.urgency),
            impact: Level::parse_field(&self.impact),
        }
    }
}
