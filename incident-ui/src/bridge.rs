use crate::theme::ThemeMode;
use incident_core::config::DEFAULT_BASE_URL;
use incident_core::{ClientConfig, HttpBackend, IncidentError};
use tracing::warn;
use web_sys::Storage;

/// API origin baked in at build time (`INCIDENT_API_BASE`).
pub fn api_base() -> &'static str {
    option_env!("INCIDENT_API_BASE").unwrap_or(DEFAULT_BASE_URL)
}

pub fn build_backend() -> Result<HttpBackend, IncidentError> {
    HttpBackend::new(ClientConfig::new(api_base())?)
}

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    window
        .local_storage()
        .map_err(|e| format!("local storage unavailable: {e:?}"))?
        .ok_or_else(|| "local storage disabled".to_string())
}

pub fn load_theme() -> ThemeMode {
    let stored = local_storage().and_then(|storage| {
        storage
            .get_item(ThemeMode::STORAGE_KEY)
            .map_err(|e| format!("failed to read theme: {e:?}"))
    });
    match stored {
        Ok(value) => ThemeMode::from_stored(value.as_deref()),
        Err(err) => {
            warn!(%err, "theme preference unavailable");
            ThemeMode::default()
        }
    }
}

pub fn store_theme(mode: ThemeMode) -> Result<(), String> {
    local_storage()?
        .set_item(ThemeMode::STORAGE_KEY, mode.as_str())
        .map_err(|e| format!("failed to persist theme: {e:?}"))
}

/// Full-page navigation, used to hand over to the backend's login flow.
pub fn navigate(url: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    window
        .location()
        .set_href(url)
        .map_err(|e| format!("navigation to {url} failed: {e:?}"))
}
