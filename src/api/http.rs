use super::client::{
    Ack, ApiError, ApiResult, ChatApi, ChatReply, ChatRequest, PremiumStatusResponse,
    SessionHistory, SessionList, UpdateTitleRequest,
};
use super::collaborators::AuthProvider;
use crate::config::AppConfig;
use crate::types::{Session, SystemStatus};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// `reqwest` implementation of [`ChatApi`] against the guidance service's JSON endpoints.
pub struct HttpApi {
    client: Client,
    base_url: String,
    auth: Arc<dyn AuthProvider>,
}

// FastAPI-style error body
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpApi {
    pub fn new(config: &AppConfig, auth: Arc<dyn AuthProvider>) -> ApiResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.api_base.trim_end_matches('/').to_string(),
            auth,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        match self.auth.auth_state().await {
            Ok(state) => {
                if let Some(token) = state.access_token {
                    request = request.bearer_auth(token);
                }
            }
            Err(err) => tracing::warn!("sending request without credentials: {err}"),
        }
        request
    }

    /// Sends `request` and decodes a JSON body, mapping non-2xx statuses to [`ApiError::Status`].
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(ErrorBody {
                    detail: Some(detail),
                    ..
                }) => detail,
                Ok(ErrorBody {
                    message: Some(message),
                    ..
                }) => message,
                _ => body,
            };
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Authenticated GET of an arbitrary service path.
    pub async fn make_request<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let request = self.request(Method::GET, path).await;
        self.execute(request).await
    }
}

fn session_path(session_id: &str, suffix: &str) -> String {
    if suffix.is_empty() {
        format!("/sessions/{session_id}")
    } else {
        format!("/sessions/{session_id}/{suffix}")
    }
}

#[async_trait]
impl ChatApi for HttpApi {
    async fn fetch_system_status(&self) -> ApiResult<SystemStatus> {
        self.make_request("/status").await
    }

    async fn fetch_user_sessions(&self) -> ApiResult<SessionList> {
        self.make_request("/auth/user/sessions").await
    }

    async fn send_message(&self, text: &str, session_id: Option<&str>) -> ApiResult<ChatReply> {
        let request = self
            .request(Method::POST, "/chat")
            .await
            .json(&ChatRequest {
                message: text,
                session_id,
            });
        self.execute(request).await
    }

    async fn load_session_messages(&self, session_id: &str) -> ApiResult<SessionHistory> {
        self.make_request(&session_path(session_id, "history")).await
    }

    async fn update_session_title(&self, session_id: &str, title: &str) -> ApiResult<Ack> {
        let request = self
            .request(Method::PUT, &session_path(session_id, "title"))
            .await
            .json(&UpdateTitleRequest { title });
        self.execute(request).await
    }

    async fn archive_session(&self, session_id: &str) -> ApiResult<Ack> {
        let request = self
            .request(Method::POST, &session_path(session_id, "archive"))
            .await;
        self.execute(request).await
    }

    async fn delete_session(&self, session_id: &str) -> ApiResult<Ack> {
        let request = self
            .request(Method::DELETE, &session_path(session_id, ""))
            .await;
        self.execute(request).await
    }

    async fn fetch_archived_sessions(&self) -> ApiResult<Vec<Session>> {
        self.make_request("/sessions/archived").await
    }

    async fn unarchive_session(&self, session_id: &str) -> ApiResult<Ack> {
        let request = self
            .request(Method::POST, &session_path(session_id, "unarchive"))
            .await;
        self.execute(request).await
    }

    async fn fetch_premium_status(&self) -> ApiResult<PremiumStatusResponse> {
        self.make_request("/auth/premium-status").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StaticAuth;
    use std::time::Duration;

    fn api_with_base(base: &str) -> HttpApi {
        let config = AppConfig {
            api_base: base.to_string(),
            request_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        };
        HttpApi::new(&config, Arc::new(StaticAuth::anonymous())).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = api_with_base("https://guide.example.com/");
        assert_eq!(api.url("/status"), "https://guide.example.com/status");
        assert_eq!(api.url("status"), "https://guide.example.com/status");
    }

    #[test]
    fn test_session_paths() {
        assert_eq!(session_path("abc", "history"), "/sessions/abc/history");
        assert_eq!(session_path("abc", ""), "/sessions/abc");
    }
}
