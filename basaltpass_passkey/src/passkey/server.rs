use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::errors::PasskeyError;
use super::types::{
    CredentialCreationOptionsJson, CredentialRequestOptionsJson, LoginBeginRequest,
    LoginFinishRequest, LoginTokens, PasskeyInfo, RegistrationFinishRequest,
};
use crate::config::{PASSKEY_API_PREFIX, PASSKEY_HTTP_POOL_IDLE_TIMEOUT, PASSKEY_SERVER_URL};

/// The server half of the passkey protocol.
///
/// Registration, listing and deletion act on the caller's authenticated
/// session; login is keyed by an identifier (email or phone).
#[async_trait]
pub trait PasskeyServer: Send + Sync {
    /// `POST /passkey/register/begin`
    async fn begin_registration(&self) -> Result<CredentialCreationOptionsJson, PasskeyError>;

    /// `POST /passkey/register/finish`
    async fn finish_registration(
        &self,
        request: &RegistrationFinishRequest,
    ) -> Result<PasskeyInfo, PasskeyError>;

    /// `POST /passkey/login/begin`
    async fn begin_login(&self, email: &str) -> Result<CredentialRequestOptionsJson, PasskeyError>;

    /// `POST /passkey/login/finish`
    async fn finish_login(&self, request: &LoginFinishRequest)
    -> Result<LoginTokens, PasskeyError>;

    /// `GET /passkey/list`
    async fn list_passkeys(&self) -> Result<Vec<PasskeyInfo>, PasskeyError>;

    /// `DELETE /passkey/{id}`
    async fn delete_passkey(&self, passkey_id: u64) -> Result<(), PasskeyError>;
}

/// [`PasskeyServer`] over HTTPS/JSON.
#[derive(Clone)]
pub struct HttpPasskeyServer {
    client: reqwest::Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl std::fmt::Debug for HttpPasskeyServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPasskeyServer")
            .field("endpoint", &self.endpoint.as_str())
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

impl HttpPasskeyServer {
    /// Creates a transport for `server_url`, with passkey routes mounted
    /// under `api_prefix` (e.g. `/api/v1`).
    pub fn new(server_url: &str, api_prefix: &str) -> Result<Self, PasskeyError> {
        let server_url = server_url.trim_end_matches('/');
        let prefix = api_prefix.trim_matches('/');
        let base = if prefix.is_empty() {
            format!("{server_url}/passkey/")
        } else {
            format!("{server_url}/{prefix}/passkey/")
        };

        let endpoint = Url::parse(&base)
            .map_err(|e| PasskeyError::Config(format!("Invalid server URL {server_url}: {e}")))?;

        Ok(Self {
            client: get_client()?,
            endpoint,
            access_token: None,
        })
    }

    /// Creates a transport from `PASSKEY_SERVER_URL` and `PASSKEY_API_PREFIX`.
    pub fn from_env() -> Result<Self, PasskeyError> {
        Self::new(PASSKEY_SERVER_URL.as_str(), PASSKEY_API_PREFIX.as_str())
    }

    /// Sends `Authorization: Bearer <token>` on session-scoped endpoints.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    /// Base URL every passkey route is resolved against.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn url(&self, path: &str) -> Result<Url, PasskeyError> {
        self.endpoint
            .join(path)
            .map_err(|e| PasskeyError::Config(format!("Invalid route {path}: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Builds the HTTP client.
///
/// No request timeout is configured; only idle pooled connections expire.
fn get_client() -> Result<reqwest::Client, PasskeyError> {
    reqwest::Client::builder()
        .pool_idle_timeout(Duration::from_secs(*PASSKEY_HTTP_POOL_IDLE_TIMEOUT))
        .build()
        .map_err(|e| PasskeyError::Config(format!("Failed to create HTTP client: {e}")))
}

/// Turns a non-success response into [`PasskeyError::Server`].
async fn check_status(response: Response) -> Result<Response, PasskeyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = server_error_message(status, &body);
    tracing::debug!("Passkey server rejected request: {} {}", status, message);

    Err(PasskeyError::Server {
        status: status.as_u16(),
        message,
    })
}

/// Picks the message to show for a rejected request.
///
/// Prefers the JSON `error` member, then `message`, then the raw body, then
/// the status reason phrase.
fn server_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }

    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, PasskeyError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    tracing::trace!("Passkey server response: {} bytes", body.len());
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl PasskeyServer for HttpPasskeyServer {
    async fn begin_registration(&self) -> Result<CredentialCreationOptionsJson, PasskeyError> {
        let url = self.url("register/begin")?;
        tracing::debug!("Requesting registration options from {}", url);
        let response = self.authorize(self.client.post(url)).send().await?;
        read_json(response).await
    }

    async fn finish_registration(
        &self,
        request: &RegistrationFinishRequest,
    ) -> Result<PasskeyInfo, PasskeyError> {
        let url = self.url("register/finish")?;
        tracing::debug!("Submitting registration credential {}", request.credential.id);
        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }

    async fn begin_login(&self, email: &str) -> Result<CredentialRequestOptionsJson, PasskeyError> {
        let url = self.url("login/begin")?;
        tracing::debug!("Requesting authentication options from {}", url);
        let response = self
            .client
            .post(url)
            .json(&LoginBeginRequest { email })
            .send()
            .await?;
        read_json(response).await
    }

    async fn finish_login(
        &self,
        request: &LoginFinishRequest,
    ) -> Result<LoginTokens, PasskeyError> {
        let url = self.url("login/finish")?;
        tracing::debug!("Submitting authentication assertion {}", request.credential.id);
        let response = self.client.post(url).json(request).send().await?;
        read_json(response).await
    }

    async fn list_passkeys(&self) -> Result<Vec<PasskeyInfo>, PasskeyError> {
        let url = self.url("list")?;
        let response = self.authorize(self.client.get(url)).send().await?;
        // The server encodes an empty list as `null`
        let passkeys: Option<Vec<PasskeyInfo>> = read_json(response).await?;
        Ok(passkeys.unwrap_or_default())
    }

    async fn delete_passkey(&self, passkey_id: u64) -> Result<(), PasskeyError> {
        let url = self.url(&passkey_id.to_string())?;
        tracing::debug!("Deleting passkey {}", passkey_id);
        let response = self.authorize(self.client.delete(url)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
