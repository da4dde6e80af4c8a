use crate::backend::{AuthState, IncidentBackend};
use crate::config::ClientConfig;
use crate::error::IncidentError;
use crate::model::{Incident, IncidentDraft, IncidentPatch};
use reqwest::{Client, IntoUrl, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const INCIDENTS_PATH: &str = "/api/incidents";
pub const SESSION_PATH: &str = "/api/auth/session";
pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

#[derive(Deserialize)]
struct ListEnvelope {
    result: Vec<Incident>,
}

#[derive(Deserialize)]
struct SessionBody {
    #[serde(default)]
    authenticated: bool,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, IncidentError> {
    serde_json::from_str(body).map_err(|e| IncidentError::Decode(e.to_string()))
}

pub fn decode_list(body: &str) -> Result<Vec<Incident>, IncidentError> {
    decode::<ListEnvelope>(body).map(|e| e.result)
}

fn from_record<T: DeserializeOwned>(record: Value) -> Result<T, IncidentError> {
    if !record.is_object() {
        return Err(IncidentError::Decode("expected a record object".into()));
    }
    serde_json::from_value(record).map_err(|e| IncidentError::Decode(e.to_string()))
}

/// A created record. Only `{ "result": { .. } }` with a `sys_id` is accepted.
pub fn decode_record(body: &str) -> Result<Incident, IncidentError> {
    let result = match decode::<Value>(body)? {
        Value::Object(mut obj) => obj.remove("result"),
        _ => None,
    }
    .ok_or_else(|| IncidentError::Decode("missing `result` record".into()))?;
    let incident: Incident = from_record(result)?;
    if incident.sys_id.trim().is_empty() {
        return Err(IncidentError::Decode("record has no sys_id".into()));
    }
    Ok(incident)
}

/// An update echo, wrapped in `result` or bare.
pub fn decode_patch(body: &str) -> Result<IncidentPatch, IncidentError> {
    let record = match decode::<Value>(body)? {
        Value::Object(mut obj) => match obj.remove("result") {
            Some(result) => result,
            None => Value::Object(obj),
        },
        other => other,
    };
    from_record(record)
}

/// The `error` field of a failure body: either a plain string or a
/// ServiceNow `{ "message", "detail" }` object.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}

async fn parse_response(response: Response) -> Result<String, IncidentError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return Ok(text);
    }
    warn!(status = status.as_u16(), "incident backend request failed");
    if status == StatusCode::UNAUTHORIZED {
        return Err(IncidentError::Unauthenticated);
    }
    Err(IncidentError::Backend {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

/// [`IncidentBackend`] over the REST API. In the browser requests go through
/// fetch with credentials included; elsewhere the configured session cookie
/// is attached explicitly.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self, IncidentError> {
        let config = config.validated()?;
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Where the browser goes to start the backend-owned login flow.
    pub fn login_url(&self) -> String {
        self.config.url(LOGIN_PATH)
    }

    /// URL of one record, with the id percent-encoded as a single segment.
    pub fn record_url(&self, sys_id: &str) -> Result<Url, IncidentError> {
        let mut url = Url::parse(&self.config.url(INCIDENTS_PATH))
            .map_err(|e| IncidentError::Config(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| IncidentError::Config("base URL cannot hold a path".into()))?
            .push(sys_id);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_to(method, self.config.url(path))
    }

    fn request_to(&self, method: Method, url: impl IntoUrl + AsRef<str>) -> RequestBuilder {
        debug!(%method, url = url.as_ref(), "incident backend request");
        let builder = self.client.request(method, url);
        self.with_credentials(builder)
    }

    #[cfg(target_arch = "wasm32")]
    fn with_credentials(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.fetch_credentials_include()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn with_credentials(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.session_cookie {
            Some(cookie) => builder.header(reqwest::header::COOKIE, cookie.as_str()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<String, IncidentError> {
        let response = builder.send().await?;
        parse_response(response).await
    }
}

impl IncidentBackend for HttpBackend {
    async fn session(&self) -> Result<AuthState, IncidentError> {
        match self.send(self.request(Method::GET, SESSION_PATH)).await {
            Ok(body) => {
                let session: SessionBody = decode(&body)?;
                Ok(if session.authenticated {
                    AuthState::LoggedIn
                } else {
                    AuthState::LoggedOut
                })
            }
            Err(IncidentError::Unauthenticated) => Ok(AuthState::LoggedOut),
            Err(err) => Err(err),
        }
    }

    async fn logout(&self) -> Result<(), IncidentError> {
        self.send(self.request(Method::POST, LOGOUT_PATH))
            .await
            .map(|_| ())
    }

    async fn list(&self) -> Result<Vec<Incident>, IncidentError> {
        let body = self.send(self.request(Method::GET, INCIDENTS_PATH)).await?;
        decode_list(&body)
    }

    async fn create(&self, draft: &IncidentDraft) -> Result<Incident, IncidentError> {
        let body = self
            .send(self.request(Method::POST, INCIDENTS_PATH).json(draft))
            .await?;
        decode_record(&body)
    }

    async fn update(
        &self,
        sys_id: &str,
        draft: &IncidentDraft,
    ) -> Result<IncidentPatch, IncidentError> {
        let body = self
            .send(self.request_to(Method::PUT, self.record_url(sys_id)?).json(draft))
            .await?;
        decode_patch(&body)
    }

    async fn delete(&self, sys_id: &str) -> Result<(), IncidentError> {
        self.send(self.request_to(Method::DELETE, self.record_url(sys_id)?))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_stay_one_path_segment() {
        let backend = HttpBackend::new(ClientConfig::default()).expect("backend");
        let url = backend.record_url("a/b?c#d").expect("url");
        assert_eq!(url.as_str(), "http://localhost:3001/api/incidents/a%2Fb%3Fc%23d");

        let plain = backend.record_url("9d385017").expect("url");
        assert_eq!(plain.as_str(), "http://localhost:3001/api/incidents/9d385017");
    }
}
