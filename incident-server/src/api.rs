use crate::config::ServerConfig;
use crate::state::AppState;
use crate::validate::parse_fields;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub const SESSION_COOKIE: &str = "incident_session";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not logged in")]
    Unauthenticated,
    #[error("{0}")]
    Invalid(String),
    #[error("incident {0} not found")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Clone)]
struct ApiContext {
    store: AppState,
    config: Arc<ServerConfig>,
}

pub fn api_router(store: AppState, config: ServerConfig) -> Router {
    let cors = cors_layer(&config.ui_origin);
    let ctx = ApiContext {
        store,
        config: Arc::new(config),
    };

    Router::new()
        .route("/api/incidents", get(list_incidents).post(create_incident))
        .route(
            "/api/incidents/:id",
            put(update_incident).delete(delete_incident),
        )
        .route("/api/auth/session", get(session))
        .route("/api/auth/login", get(login))
        .route("/api/auth/logout", post(logout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!(origin, "ui origin is not a valid header value; CORS disabled");
            layer
        }
    }
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

fn require_session(ctx: &ApiContext, headers: &HeaderMap) -> Result<(), ApiError> {
    match session_token(headers) {
        Some(token) if ctx.store.has_session(&token) => Ok(()),
        _ => Err(ApiError::Unauthenticated),
    }
}

async fn list_incidents(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_session(&ctx, &headers)?;
    Ok(Json(json!({ "result": ctx.store.list() })))
}

async fn create_incident(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_session(&ctx, &headers)?;
    let fields = parse_fields(&body, true).map_err(ApiError::Invalid)?;
    let incident = ctx.store.insert(fields);
    info!(sys_id = %incident.sys_id, number = %incident.number, "incident created");
    Ok((StatusCode::CREATED, Json(json!({ "result": incident }))))
}

async fn update_incident(
    State(ctx): State<ApiContext>,
    Path(sys_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    require_session(&ctx, &headers)?;
    let fields = parse_fields(&body, false).map_err(ApiError::Invalid)?;
    let incident = ctx
        .store
        .update(&sys_id, fields)
        .ok_or_else(|| ApiError::NotFound(sys_id.clone()))?;
    info!(sys_id = %incident.sys_id, "incident updated");

    let body = if ctx.config.wrap_update_response {
        json!({ "result": incident })
    } else {
        json!(incident)
    };
    Ok(Json(body))
}

async fn delete_incident(
    State(ctx): State<ApiContext>,
    Path(sys_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    require_session(&ctx, &headers)?;
    if !ctx.store.remove(&sys_id) {
        return Err(ApiError::NotFound(sys_id));
    }
    info!(sys_id, "incident deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn session(State(ctx): State<ApiContext>, headers: HeaderMap) -> Json<Value> {
    let authenticated = session_token(&headers).is_some_and(|t| ctx.store.has_session(&t));
    Json(json!({ "authenticated": authenticated }))
}

async fn login(State(ctx): State<ApiContext>) -> impl IntoResponse {
    let token = ctx.store.open_session();
    info!("session opened");
    (
        StatusCode::SEE_OTHER,
        [
            (
                header::SET_COOKIE,
                format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax"),
            ),
            (header::LOCATION, ctx.config.ui_origin.clone()),
        ],
    )
}

async fn logout(State(ctx): State<ApiContext>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        if ctx.store.close_session(&token) {
            info!("session closed");
        }
    }
    (
        StatusCode::NO_CONTENT,
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"),
        )],
    )
}
