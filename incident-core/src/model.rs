use crate::wire;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Urgency and impact share the same 1..=3 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Level {
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::High, Level::Medium, Level::Low];

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::High),
            2 => Some(Self::Medium),
            3 => Some(Self::Low),
            _ => None,
        }
    }

    /// Form fields hold raw strings; blank or unparseable input means unset.
    pub fn parse_field(raw: &str) -> Option<Self> {
        wire::leading_code(raw).and_then(Self::from_code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::High => "1",
            Self::Medium => "2",
            Self::Low => "3",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn label(self) -> String {
        format!("{} - {}", self.code(), self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Critical = 1,
    High = 2,
    Medium = 3,
    Low = 4,
}

impl Priority {
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Critical),
            2 => Some(Self::High),
            3 => Some(Self::Medium),
            4 => Some(Self::Low),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Critical => "1",
            Self::High => "2",
            Self::Medium => "3",
            Self::Low => "4",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn label(self) -> String {
        format!("{} - {}", self.code(), self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum IncidentState {
    New,
    InProgress,
    Resolved,
    Closed,
    /// A state the backend reports that the console has no option for.
    Other(String),
}

impl IncidentState {
    pub const KNOWN: [IncidentState; 4] = [
        IncidentState::New,
        IncidentState::InProgress,
        IncidentState::Resolved,
        IncidentState::Closed,
    ];

    /// ServiceNow's numeric state codes for the four known states.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::New),
            2 => Some(Self::InProgress),
            6 => Some(Self::Resolved),
            7 => Some(Self::Closed),
            _ => None,
        }
    }

    /// Blank input is unset; anything unrecognised is kept as `Other`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(known) = Self::parse_label(trimmed) {
            return Some(known);
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            if let Some(known) = trimmed.parse().ok().and_then(Self::from_code) {
                return Some(known);
            }
        }
        Some(Self::Other(trimmed.to_string()))
    }

    /// Strict variant used for validating input: only the four labels.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "new" => Some(Self::New),
            "in progress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for IncidentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(default, deserialize_with = "wire::lenient_string")]
    pub sys_id: String,
    #[serde(default, deserialize_with = "wire::lenient_string")]
    pub number: String,
    #[serde(default, deserialize_with = "wire::lenient_string")]
    pub short_description: String,
    #[serde(
        default,
        deserialize_with = "wire::opt_state",
        serialize_with = "wire::ser_opt_state"
    )]
    pub state: Option<IncidentState>,
    #[serde(
        default,
        deserialize_with = "wire::opt_level",
        serialize_with = "wire::ser_opt_level"
    )]
    pub urgency: Option<Level>,
    #[serde(
        default,
        deserialize_with = "wire::opt_level",
        serialize_with = "wire::ser_opt_level"
    )]
    pub impact: Option<Level>,
    #[serde(
        default,
        deserialize_with = "wire::opt_priority",
        serialize_with = "wire::ser_opt_priority"
    )]
    pub priority: Option<Priority>,
    /// Every other field the backend sent, kept so merges and re-renders
    /// do not drop them.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Incident {
    /// Applies an echoed representation. The identifier never changes.
    pub fn merge(&mut self, patch: IncidentPatch) {
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(description) = patch.short_description {
            self.short_description = description;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(urgency) = patch.urgency {
            self.urgency = urgency;
        }
        if let Some(impact) = patch.impact {
            self.impact = impact;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.extra.extend(patch.extra);
    }

    pub fn state_label(&self) -> &str {
        self.state.as_ref().map_or("", IncidentState::label)
    }

    pub fn priority_code(&self) -> &'static str {
        self.priority.as_ref().map_or("", Priority::as_code)
    }
}

/// Outgoing body of a create or update.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IncidentDraft {
    pub short_description: String,
    #[serde(serialize_with = "wire::ser_opt_state")]
    pub state: Option<IncidentState>,
    #[serde(serialize_with = "wire::ser_opt_level")]
    pub urgency: Option<Level>,
    #[serde(serialize_with = "wire::ser_opt_level")]
    pub impact: Option<Level>,
}

impl IncidentDraft {
    pub fn new(
        short_description: impl Into<String>,
        state: Option<IncidentState>,
        urgency: Option<Level>,
        impact: Option<Level>,
    ) -> Self {
        Self {
            short_description: short_description.into(),
            state,
            urgency,
            impact,
        }
    }
}

/// Echo of a record after an update.
///
/// The outer `Option` on each field records whether the backend sent it at
/// all; the inner value is what it sent. Absent fields leave local values alone.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct IncidentPatch {
    #[serde(default, deserialize_with = "wire::present_string")]
    pub sys_id: Option<String>,
    #[serde(default, deserialize_with = "wire::present_string")]
    pub number: Option<String>,
    #[serde(default, deserialize_with = "wire::present_string")]
    pub short_description: Option<String>,
    #[serde(default, deserialize_with = "wire::present_state")]
    pub state: Option<Option<IncidentState>>,
    #[serde(default, deserialize_with = "wire::present_level")]
    pub urgency: Option<Option<Level>>,
    #[serde(default, deserialize_with = "wire::present_level")]
    pub impact: Option<Option<Level>>,
    #[serde(default, deserialize_with = "wire::present_priority")]
    pub priority: Option<Option<Priority>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl From<Incident> for IncidentPatch {
    fn from(incident: Incident) -> Self {
        Self {
            sys_id: Some(incident.sys_id),
            number: Some(incident.number),
            short_description: Some(incident.short_description),
            state: Some(incident.state),
            urgency: Some(incident.urgency),
            impact: Some(incident.impact),
            priority: Some(incident.priority),
            extra: incident.extra,
        }
    }
}
