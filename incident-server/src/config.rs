#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub addr: String,
    /// Browser origin of the console; allowed by CORS and used as the
    /// post-login redirect target.
    pub ui_origin: String,
    /// `true` answers PUT with `{ "result": record }`, `false` with the bare record.
    pub wrap_update_response: bool,
    /// Start with a few sample incidents.
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:3001".into(),
            ui_origin: "http://localhost:8080".into(),
            wrap_update_response: true,
            seed_demo_data: false,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            addr: std::env::var("INCIDENT_SERVER_ADDR").unwrap_or(defaults.addr),
            ui_origin: std::env::var("INCIDENT_UI_ORIGIN")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.ui_origin),
            wrap_update_response: !std::env::var("INCIDENT_SERVER_BARE_UPDATES")
                .map(|v| flag(&v))
                .unwrap_or(false),
            seed_demo_data: std::env::var("INCIDENT_SERVER_SEED")
                .map(|v| flag(&v))
                .unwrap_or(defaults.seed_demo_data),
        }
    }
}

fn flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
