use async_trait::async_trait;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{ApiError, ErrorPolicy};
use crate::models::{
    DashboardPayload, DepartmentStats, FacultyRecord, Grievance, LoginRequest, LoginResponse,
    NotificationRecord, ReportRecord, ScheduleEntry, Student,
};
use crate::normalize::FromRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub token: Option<String>,
    pub request_id: Uuid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        }
        .header("X-Request-Id", request.request_id.to_string());

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let transport_error = |err: reqwest::Error| ApiError::Transport {
            path: request.path.clone(),
            message: err.to_string(),
        };

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport_error)?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else if (200..300).contains(&status) {
            serde_json::from_str(&text).map_err(|source| ApiError::Decode {
                path: request.path.clone(),
                source,
            })?
        } else {
            serde_json::from_str(&text).unwrap_or(Value::Null)
        };

        Ok(RawResponse { status, body })
    }
}

pub struct DashboardClient<T> {
    transport: T,
    token: Option<String>,
}

impl<T: Transport> DashboardClient<T> {
    pub fn new(transport: T, token: Option<String>) -> Self {
        Self { transport, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        let response = self
            .transport
            .send(ApiRequest {
                method,
                path: path.to_string(),
                body,
                token: self.token.clone(),
                request_id,
            })
            .await?;

        if !response.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }

        tracing::debug!(%request_id, path, status = response.status, "request completed");
        Ok(response.body)
    }

    /// GET `path` and normalize it, applying `policy` to any failure.
    pub async fn fetch<R>(&self, path: &str, policy: ErrorPolicy) -> Result<R, ApiError>
    where
        R: FromRecord + Default,
    {
        match self.request(Method::Get, path, None).await {
            Ok(body) => Ok(R::from_record(&body)),
            Err(err @ (ApiError::Transport { .. } | ApiError::Decode { .. }))
                if policy == ErrorPolicy::Surface =>
            {
                tracing::error!(path, error = %err, "request failed");
                Err(err)
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "using default payload");
                Ok(R::default())
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(LoginRequest { username, password }).map_err(|source| {
            ApiError::Decode {
                path: "/auth/login".to_string(),
                source,
            }
        })?;

        // Rejected credentials may come back as 401 with a JSON message.
        let response = self
            .transport
            .send(ApiRequest {
                method: Method::Post,
                path: "/auth/login".to_string(),
                body: Some(body),
                token: None,
                request_id: Uuid::new_v4(),
            })
            .await?;

        let login: LoginResponse = serde_json::from_value(response.body).unwrap_or_default();
        if login.success && login.token.is_some() {
            tracing::info!(username, "login succeeded");
            Ok(login)
        } else {
            let message = login
                .message
                .unwrap_or_else(|| format!("HTTP {}", response.status));
            Err(ApiError::LoginRejected(message))
        }
    }

    pub async fn dashboard(&self, policy: ErrorPolicy) -> Result<DashboardPayload, ApiError> {
        self.fetch("/principal/dashboard", policy).await
    }

    pub async fn faculty(&self, policy: ErrorPolicy) -> Result<Vec<FacultyRecord>, ApiError> {
        self.fetch("/principal/faculty/all", policy).await
    }

    pub async fn timetables(&self, policy: ErrorPolicy) -> Result<Vec<ScheduleEntry>, ApiError> {
        self.fetch("/principal/timetables", policy).await
    }

    pub async fn circulars(
        &self,
        policy: ErrorPolicy,
    ) -> Result<Vec<NotificationRecord>, ApiError> {
        self.fetch("/principal/circulars", policy).await
    }

    pub async fn reports(&self, policy: ErrorPolicy) -> Result<Vec<ReportRecord>, ApiError> {
        self.fetch("/principal/reports", policy).await
    }

    pub async fn grievances(&self, policy: ErrorPolicy) -> Result<Vec<Grievance>, ApiError> {
        self.fetch("/principal/grievances", policy).await
    }

    pub async fn department_stats(
        &self,
        department_id: &str,
        policy: ErrorPolicy,
    ) -> Result<DepartmentStats, ApiError> {
        let path = format!("/analytics/department/{}/stats", urlencoding::encode(department_id));
        self.fetch(&path, policy).await
    }

    pub async fn department_students(
        &self,
        department_id: &str,
        policy: ErrorPolicy,
    ) -> Result<Vec<Student>, ApiError> {
        let path = format!("/principal/students/{}", urlencoding::encode(department_id));
        self.fetch(&path, policy).await
    }

    pub async fn delete_notification(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/notifications/{}", urlencoding::encode(id));
        self.request(Method::Delete, &path, None).await.map(|_| ())
    }

    pub async fn clear_notifications(&self) -> Result<(), ApiError> {
        self.request(Method::Delete, "/notifications/clear", None)
            .await
            .map(|_| ())
    }

    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("/notifications/{}/read", urlencoding::encode(id));
        self.request(Method::Post, &path, None).await.map(|_| ())
    }

    /// Returns the backend's confirmation message, if any.
    pub async fn broadcast(
        &self,
        sender_id: &str,
        message: &str,
        target_role: &str,
    ) -> Result<Option<String>, ApiError> {
        let body = json!({
            "senderId": sender_id,
            "message": message,
            "targetRole": target_role,
        });
        let response = self
            .request(Method::Post, "/notifications/broadcast", Some(body))
            .await?;
        Ok(response
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use super::*;

    enum Reply {
        Ready(Result<RawResponse, String>),
        Deferred(oneshot::Receiver<RawResponse>),
    }

    /// Scripted transport keyed by `"METHOD path"`; unscripted requests
    /// answer 404.
    #[derive(Default)]
    pub struct FakeTransport {
        replies: Mutex<HashMap<String, Vec<Reply>>>,
        pub seen: Mutex<Vec<ApiRequest>>,
    }

    fn key(method: Method, path: &str) -> String {
        format!("{method:?} {path}")
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, method: Method, path: &str, reply: Reply) {
            self.replies
                .lock()
                .unwrap()
                .entry(key(method, path))
                .or_default()
                .push(reply);
        }

        pub fn ok(self, method: Method, path: &str, body: Value) -> Self {
            self.push(method, path, Reply::Ready(Ok(RawResponse { status: 200, body })));
            self
        }

        pub fn status(self, method: Method, path: &str, status: u16) -> Self {
            self.push(
                method,
                path,
                Reply::Ready(Ok(RawResponse {
                    status,
                    body: Value::Null,
                })),
            );
            self
        }

        pub fn fail(self, method: Method, path: &str, message: &str) -> Self {
            self.push(method, path, Reply::Ready(Err(message.to_string())));
            self
        }

        /// Holds the reply until the returned sender fires.
        pub fn deferred(&self, method: Method, path: &str) -> oneshot::Sender<RawResponse> {
            let (tx, rx) = oneshot::channel();
            self.push(method, path, Reply::Deferred(rx));
            tx
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            let reply = {
                let mut replies = self.replies.lock().unwrap();
                replies
                    .get_mut(&key(request.method, &request.path))
                    .filter(|queue| !queue.is_empty())
                    .map(|queue| queue.remove(0))
            };

            let transport = |message: String| ApiError::Transport {
                path: request.path.clone(),
                message,
            };
            match reply {
                None => Ok(RawResponse {
                    status: 404,
                    body: Value::Null,
                }),
                Some(Reply::Ready(result)) => result.map_err(transport),
                Some(Reply::Deferred(rx)) => rx.await.map_err(|_| transport("dropped".into())),
            }
        }
    }
}
