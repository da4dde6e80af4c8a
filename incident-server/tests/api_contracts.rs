use incident_core::{
    AuthState, ClientConfig, HttpBackend, IncidentBackend, IncidentDraft, IncidentError,
    IncidentState, IncidentStore, Level, NoticeKind, Refresh,
};
use incident_server::api::api_router;
use incident_server::config::ServerConfig;
use incident_server::state::AppState;
use reqwest::header::SET_COOKIE;
use reqwest::StatusCode;

async fn spawn_server(config: ServerConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let app = api_router(AppState::new(), config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn login(base: &str) -> String {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client");
    let response = client
        .get(format!("{base}/api/auth/login"))
        .send()
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("set-cookie")
        .to_str()
        .expect("ascii cookie");
    cookie.split(';').next().expect("cookie pair").to_string()
}

fn backend(base: &str, cookie: Option<String>) -> HttpBackend {
    let mut config = ClientConfig::new(base).expect("config");
    config.session_cookie = cookie;
    HttpBackend::new(config).expect("backend")
}

async fn logged_in_store(base: &str) -> IncidentStore<HttpBackend> {
    let cookie = login(base).await;
    let store = IncidentStore::new(backend(base, Some(cookie)));
    let auth = store.backend().session().await.expect("session");
    assert_eq!(auth, AuthState::LoggedIn);
    assert_eq!(store.refresh(auth).await.expect("refresh"), Refresh::Loaded(0));
    store
}

fn draft(description: &str, state: IncidentState, urgency: Level, impact: Level) -> IncidentDraft {
    IncidentDraft::new(description, Some(state), Some(urgency), Some(impact))
}

#[tokio::test]
async fn anonymous_console_never_loads_the_list() {
    let base = spawn_server(ServerConfig::default()).await;
    let store = IncidentStore::new(backend(&base, None));

    let auth = store.backend().session().await.expect("session");
    assert_eq!(auth, AuthState::LoggedOut);
    assert_eq!(store.refresh(auth).await.expect("refresh"), Refresh::Skipped);
    assert!(store.is_empty());

    let err = store.backend().list().await.expect_err("unauthenticated");
    assert_eq!(err, IncidentError::Unauthenticated);
}

#[tokio::test]
async fn create_update_delete_round_trip() {
    let base = spawn_server(ServerConfig::default()).await;
    let store = logged_in_store(&base).await;

    let outage = store
        .create(&draft("Server down", IncidentState::New, Level::High, Level::High))
        .await
        .expect("create outage");
    assert_eq!(outage.number, "INC0010001");
    store
        .create(&draft("Slow wiki", IncidentState::New, Level::Low, Level::Medium))
        .await
        .expect("create wiki");

    let list = store.snapshot();
    assert_eq!(list.len(), 2);
    assert_eq!(list.items()[0].short_description, "Slow wiki");
    assert_eq!(list.items()[0].priority_code(), "3");
    assert_eq!(list.items()[1].priority_code(), "1");

    let before = store.snapshot();
    let merged = store
        .update(
            &outage.sys_id,
            &draft("Server down", IncidentState::Resolved, Level::High, Level::High),
        )
        .await
        .expect("update")
        .expect("held locally");
    assert_eq!(merged.state, Some(IncidentState::Resolved));
    let after = store.snapshot();
    assert_eq!(after.items()[0], before.items()[0]);
    assert_eq!(after.items()[1].state, Some(IncidentState::Resolved));
    assert_eq!(after.items()[1].number, "INC0010001");

    assert!(store.delete(&outage.sys_id).await.expect("delete"));
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.notice().expect("notice").message,
        "Incident deleted successfully"
    );

    // The server agrees with the local view.
    let local = store.snapshot();
    store.refresh(AuthState::LoggedIn).await.expect("refresh");
    assert_eq!(store.snapshot(), local);
}

#[tokio::test]
async fn validation_errors_surface_the_backend_message() {
    let base = spawn_server(ServerConfig::default()).await;
    let store = logged_in_store(&base).await;
    store
        .create(&draft("Existing", IncidentState::New, Level::Medium, Level::Medium))
        .await
        .expect("create");
    let before = store.snapshot();

    let blank = IncidentDraft::new("   ", Some(IncidentState::New), None, None);
    let err = store.create(&blank).await.expect_err("blank description");
    assert_eq!(
        err,
        IncidentError::Backend {
            status: 400,
            message: Some("short_description is required".into()),
        }
    );
    assert_eq!(store.snapshot(), before);
    let notice = store.notice().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "short_description is required");
}

#[tokio::test]
async fn bare_update_responses_are_merged_too() {
    let config = ServerConfig {
        wrap_update_response: false,
        ..ServerConfig::default()
    };
    let base = spawn_server(config).await;
    let store = logged_in_store(&base).await;
    let created = store
        .create(&draft("Disk full", IncidentState::New, Level::Medium, Level::Medium))
        .await
        .expect("create");

    let merged = store
        .update(
            &created.sys_id,
            &draft("Disk full", IncidentState::InProgress, Level::Medium, Level::Low),
        )
        .await
        .expect("update")
        .expect("held locally");
    assert_eq!(merged.state, Some(IncidentState::InProgress));
    assert_eq!(merged.priority_code(), "3");
}

#[tokio::test]
async fn failed_delete_leaves_list_unchanged() {
    let base = spawn_server(ServerConfig::default()).await;
    let store = logged_in_store(&base).await;
    store
        .create(&draft("Keep me", IncidentState::New, Level::Low, Level::Low))
        .await
        .expect("create");
    let before = store.snapshot();

    let err = store.delete("does-not-exist").await.expect_err("missing");
    assert!(matches!(err, IncidentError::Backend { status: 404, .. }));
    assert_eq!(store.snapshot(), before);
    assert_eq!(
        store.notice().expect("notice").message,
        "incident does-not-exist not found"
    );
}

#[tokio::test]
async fn logout_ends_the_session() {
    let base = spawn_server(ServerConfig::default()).await;
    let store = logged_in_store(&base).await;

    store.backend().logout().await.expect("logout");
    assert_eq!(
        store.backend().session().await.expect("session"),
        AuthState::LoggedOut
    );
}
