use crate::app::Console;
use crate::bridge;
use incident_core::{AuthState, IncidentBackend};
use leptos::*;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;

/// Session state shared with the whole tree.
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<AuthState>,
    console: StoredValue<Console>,
}

impl AuthContext {
    pub fn is_logged_in(&self) -> bool {
        self.state.get().is_logged_in()
    }

    pub fn login(&self) {
        let url = self.console.with_value(|c| c.backend().login_url());
        if let Err(err) = bridge::navigate(&url) {
            warn!(%err, "could not start login");
        }
    }

    pub fn logout(&self) {
        let state = self.state;
        let console = self.console.get_value();
        spawn_local(async move {
            if let Err(err) = console.backend().logout().await {
                warn!(error = %err, "logout request failed");
            }
            console.clear();
            state.set(AuthState::LoggedOut);
        });
    }
}

/// Probes the backend session once on mount and provides [`AuthContext`].
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let console = store_value(expect_context::<Console>());
    let state = create_rw_signal(AuthState::Checking);
    provide_context(AuthContext { state, console });

    spawn_local(async move {
        let probed = console.get_value().backend().session().await;
        let next = match probed {
            Ok(auth) => auth,
            Err(err) => {
                warn!(error = %err, "session probe failed; treating as logged out");
                AuthState::LoggedOut
            }
        };
        info!(?next, "session checked");
        state.set(next);
    });

    children()
}
