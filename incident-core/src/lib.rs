pub mod backend;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod model;
pub mod notice;
pub mod priority;
pub mod store;
mod wire;

pub use backend::{AuthState, IncidentBackend};
pub use config::ClientConfig;
pub use error::{IncidentError, Operation};
pub use form::{FormMode, IncidentForm};
pub use http::HttpBackend;
pub use list::IncidentList;
pub use model::{Incident, IncidentDraft, IncidentPatch, IncidentState, Level, Priority};
pub use notice::{Notice, NoticeKind};
pub use priority::{derive_priority, priority_code};
pub use store::{IncidentStore, Refresh};
pub use wire::leading_code;
