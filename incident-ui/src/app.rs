use crate::auth::{AuthContext, AuthProvider};
use crate::bridge;
use crate::home::Home;
use crate::theme::ThemeMode;
use incident_core::{AuthState, HttpBackend, IncidentStore};
use leptos::*;
use leptos_router::{Route, Router, Routes, A};
use std::rc::Rc;
use tracing::{error, warn};

/// The one view model instance, shared through context.
pub type Console = Rc<IncidentStore<HttpBackend>>;

#[component]
pub fn Root() -> impl IntoView {
    let mode = create_rw_signal(bridge::load_theme());
    let toggle_theme = move || {
        mode.update(|m| *m = m.toggled());
        if let Err(err) = bridge::store_theme(mode.get_untracked()) {
            warn!(%err, "theme preference not saved");
        }
    };

    let backend = match bridge::build_backend() {
        Ok(backend) => backend,
        Err(err) => {
            error!(error = %err, "incident backend misconfigured");
            return view! { <pre class="error">{format!("Configuration error: {err}")}</pre> }
                .into_view();
        }
    };
    provide_context::<Console>(Rc::new(IncidentStore::new(backend)));

    view! {
      <div
        class=move || format!("app theme-{}", mode.get().as_str())
        style=move || mode.get().palette().css_vars()
      >
        <Router>
          <AuthProvider>
            <TopBar mode=mode on_toggle=move |_| toggle_theme()/>
            <main class="content">
              <Routes>
                <Route path="/" view=Home/>
                <Route path="/login" view=Login/>
                <Route path="/*any" view=NotFound/>
              </Routes>
            </main>
          </AuthProvider>
        </Router>
      </div>
    }
    .into_view()
}

#[component]
fn TopBar(mode: RwSignal<ThemeMode>, #[prop(into)] on_toggle: Callback<()>) -> impl IntoView {
    let auth = expect_context::<AuthContext>();

    view! {
      <header class="topbar">
        <A href="/" class="brand">"Incident Console"</A>
        <div class="row">
          <button class="btn" on:click=move |_| on_toggle.call(())>
            {move || mode.get().toggle_label()}
          </button>
          {move || match auth.state.get() {
            AuthState::LoggedIn => view! {
              <button class="btn" on:click=move |_| auth.logout()>"Log out"</button>
            }
            .into_view(),
            AuthState::LoggedOut => view! { <A href="/login" class="btn">"Log in"</A> }.into_view(),
            AuthState::Checking => ().into_view(),
          }}
        </div>
      </header>
    }
}

#[component]
fn Login() -> impl IntoView {
    let auth = expect_context::<AuthContext>();

    view! {
      <section class="panel">
        <Show
          when=move || auth.is_logged_in()
          fallback=move || view! {
            <p>"Please log in"</p>
            <button class="btn contained" on:click=move |_| auth.login()>"Log in with ServiceNow"</button>
          }
        >
          <p>"You are logged in."</p>
          <A href="/">"Go to incidents"</A>
        </Show>
      </section>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
      <section class="panel">
        <h2>"Page not found"</h2>
        <A href="/">"Back to incidents"</A>
      </section>
    }
}
