use crate::app::Console;
use crate::auth::AuthContext;
use incident_core::{AuthState, Incident, IncidentForm, IncidentList, IncidentState, Level, Notice};
use leptos::*;
use std::time::Duration;
use wasm_bindgen_futures::spawn_local;

/// What the home route shows for a given session state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HomeScreen {
    Records,
    Checking,
    LoginPrompt,
}

impl HomeScreen {
    fn for_auth(state: AuthState) -> Self {
        match state {
            AuthState::LoggedIn => Self::Records,
            AuthState::Checking => Self::Checking,
            AuthState::LoggedOut => Self::LoginPrompt,
        }
    }

    fn message(self) -> Option<&'static str> {
        match self {
            Self::Records => None,
            Self::Checking => Some("Checking session..."),
            Self::LoginPrompt => Some("Please log in"),
        }
    }
}

fn show_notice(slot: RwSignal<Option<Notice>>, notice: Notice) {
    let hide_after = Duration::from_millis(notice.auto_hide_ms());
    slot.set(Some(notice.clone()));
    set_timeout(
        move || {
            if slot.get_untracked().as_ref() == Some(&notice) {
                slot.set(None);
            }
        },
        hide_after,
    );
}

fn level_options(selected: impl Fn() -> String + Copy + 'static) -> impl IntoView {
    Level::ALL
        .iter()
        .map(move |level| {
            let code = level.as_code();
            view! { <option value=code prop:selected=move || selected() == code>{level.label()}</option> }
        })
        .collect_view()
}

#[component]
pub fn Home() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let console = store_value(expect_context::<Console>());

    let incidents = create_rw_signal(console.with_value(|c| c.snapshot()));
    let notice = create_rw_signal(None::<Notice>);
    let form = create_rw_signal(IncidentForm::blank());
    let dialog_open = create_rw_signal(false);

    // Copies view-model state into signals after each completed round-trip.
    let sync = move || {
        let c = console.get_value();
        incidents.set(c.snapshot());
        if let Some(n) = c.take_notice() {
            show_notice(notice, n);
        }
    };

    create_effect(move |_| {
        let state = auth.state.get();
        if !state.is_logged_in() {
            incidents.set(IncidentList::default());
            return;
        }
        spawn_local(async move {
            let _ = console.get_value().refresh(state).await;
            sync();
        });
    });

    let open_create = move || {
        form.set(IncidentForm::blank());
        dialog_open.set(true);
    };

    let close_dialog = move || {
        dialog_open.set(false);
        form.set(IncidentForm::blank());
    };

    let edit = move |incident: Incident| {
        form.set(IncidentForm::edit(&incident));
        dialog_open.set(true);
    };

    let delete = move |sys_id: String| {
        spawn_local(async move {
            let _ = console.get_value().delete(&sys_id).await;
            sync();
        });
    };

    let submit = move || {
        let current = form.get_untracked();
        let draft = current.to_draft();
        spawn_local(async move {
            let c = console.get_value();
            let saved = match current.editing_id.as_deref() {
                Some(sys_id) => c.update(sys_id, &draft).await.is_ok(),
                None => c.create(&draft).await.is_ok(),
            };
            sync();
            if saved {
                close_dialog();
            }
        });
    };

    let cards = move || {
        incidents
            .get()
            .items()
            .iter()
            .cloned()
            .map(move |inc| {
                let sys_id = inc.sys_id.clone();
                let for_edit = inc.clone();
                view! {
                  <div class="card">
                    <h3>{format!("Incident #: {}", inc.number)}</h3>
                    <p>{format!("Description: {}", inc.short_description)}</p>
                    <p>{format!("State: {}", inc.state_label())}</p>
                    <p>{format!("Priority: {}", inc.priority_code())}</p>
                    <div class="row">
                      <button class="btn contained success" on:click=move |_| edit(for_edit.clone())>"Edit"</button>
                      <button class="btn contained error" on:click=move |_| delete(sys_id.clone())>"Delete"</button>
                    </div>
                  </div>
                }
            })
            .collect_view()
    };

    let dialog = move || {
        view! {
          <div class="backdrop" on:click=move |_| close_dialog()>
            <div class="dialog" role="dialog" on:click=|ev| ev.stop_propagation()>
              <h2>{move || form.with(|f| f.title())}</h2>
              <div class="stack">
                <label>
                  "Description"
                  <textarea
                    rows="1"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                  ></textarea>
                </label>
                <label>
                  "State"
                  <select on:change=move |ev| form.update(|f| f.state = event_target_value(&ev))>
                    <option value="" prop:selected=move || form.with(|f| f.state.is_empty())></option>
                    {IncidentState::KNOWN
                      .iter()
                      .map(|state| {
                        let label = state.label().to_string();
                        let value = label.clone();
                        let matches = label.clone();
                        view! {
                          <option value=value prop:selected=move || form.with(|f| f.state == matches)>{label}</option>
                        }
                      })
                      .collect_view()}
                  </select>
                </label>
                <label>
                  "Urgency"
                  <select on:change=move |ev| form.update(|f| f.urgency = event_target_value(&ev))>
                    <option value="" prop:selected=move || form.with(|f| f.urgency.is_empty())></option>
                    {level_options(move || form.with(|f| f.urgency.clone()))}
                  </select>
                </label>
                <label>
                  "Impact"
                  <select on:change=move |ev| form.update(|f| f.impact = event_target_value(&ev))>
                    <option value="" prop:selected=move || form.with(|f| f.impact.is_empty())></option>
                    {level_options(move || form.with(|f| f.impact.clone()))}
                  </select>
                </label>
                <label>
                  "Priority (Auto-calculated)"
                  <input disabled=true prop:value=move || form.with(|f| f.priority_preview())/>
                </label>
              </div>
              <div class="actions">
                <button class="btn" on:click=move |_| close_dialog()>"Cancel"</button>
                <button class="btn contained" on:click=move |_| submit()>
                  {move || form.with(|f| f.submit_label())}
                </button>
              </div>
            </div>
          </div>
        }
    };

    let snackbar = move || {
        notice.get().map(|n| {
            let class = if n.is_error() { "snackbar error" } else { "snackbar success" };
            view! {
              <div class=class role="status">
                <span>{n.message}</span>
                <button class="close" on:click=move |_| notice.set(None)>"×"</button>
              </div>
            }
        })
    };

    view! {
      {move || match HomeScreen::for_auth(auth.state.get()) {
        HomeScreen::Records => view! {
          <section class="stack">
            <div class="row spread">
              <h2>"Incident Records:"</h2>
              <button class="btn contained" on:click=move |_| open_create()>"+ Create Incident"</button>
            </div>
            <div class="grid">{cards}</div>
          </section>
          <Show when=move || dialog_open.get() fallback=|| ()>
            {dialog}
          </Show>
          {snackbar}
        }
        .into_view(),
        HomeScreen::Checking => view! { <p class="meta">{HomeScreen::Checking.message()}</p> }.into_view(),
        HomeScreen::LoginPrompt => view! { <p>{HomeScreen::LoginPrompt.message()}</p> }.into_view(),
      }}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_out_home_asks_for_login() {
        let screen = HomeScreen::for_auth(AuthState::LoggedOut);
        assert_eq!(screen, HomeScreen::LoginPrompt);
        assert_eq!(screen.message(), Some("Please log in"));
    }

    #[test]
    fn records_show_only_when_logged_in() {
        assert_eq!(HomeScreen::for_auth(AuthState::LoggedIn), HomeScreen::Records);
        assert_eq!(HomeScreen::for_auth(AuthState::LoggedIn).message(), None);
        assert_eq!(HomeScreen::for_auth(AuthState::Checking), HomeScreen::Checking);
    }
}
