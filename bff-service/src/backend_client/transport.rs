use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::errors::{ErrorCode, Result, ServiceError};
use shared::BearerToken;
use std::time::{Duration, Instant};

/// Shared HTTP connection pool for all backend clients.
pub fn build_http_client(timeout_ms: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .connect_timeout(Duration::from_millis(timeout_ms.min(2000)))
        .user_agent(format!("bff-service/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ServiceError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// One outbound call: method, resource path, query pairs and an optional JSON body.
#[derive(Debug, Clone)]
pub struct BackendRequest {
    method: Method,
    path: &'static str,
    query: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
}

impl BackendRequest {
    pub fn new(method: Method, path: &'static str) -> Self {
        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: &'static str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &'static str) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: &'static str) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: &'static str) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Appends `key` once per value, e.g. `excludeStrategies[]=A&excludeStrategies[]=B`.
    pub fn query_all<I, V>(mut self, key: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.query
            .extend(values.into_iter().map(|v| (key, v.to_string())));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            ServiceError::Internal(format!("Failed to encode request body: {}", e))
        })?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Transport wrapper around one downstream service.
///
/// Knows nothing about workflows: the caller passes the [`ErrorCode`] to raise
/// and gets back either the decoded body or `Upstream { code, status }`.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    service: &'static str,
    base_url: String,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("service", &self.service)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(http: Client, service: &'static str, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            service,
            base_url,
        }
    }

    /// Sends the request and decodes a 2xx body as `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: BackendRequest,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<T> {
        let response = self.execute(request, token, code).await?;
        self.ensure_success(response.status(), code)?;
        self.decode(response, code).await
    }

    /// Sends the request and discards any 2xx body.
    pub async fn call_no_content(
        &self,
        request: BackendRequest,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<()> {
        let response = self.execute(request, token, code).await?;
        self.ensure_success(response.status(), code)
    }

    /// Like [`call`](Self::call), but a 404 yields `Ok(None)` instead of an error.
    pub async fn call_optional<T: DeserializeOwned>(
        &self,
        request: BackendRequest,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<Option<T>> {
        let response = self.execute(request, token, code).await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(service = self.service, code = %code, "Backend reported not found");
            return Ok(None);
        }

        self.ensure_success(response.status(), code)?;
        self.decode(response, code).await.map(Some)
    }

    async fn execute(
        &self,
        request: BackendRequest,
        token: &BearerToken,
        code: ErrorCode,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let method = request.method.clone();

        let mut builder = self
            .http
            .request(request.method, &url)
            .header(AUTHORIZATION, token.header_value());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let result = builder.send().await;
        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let success = response.status().is_success()
                    || response.status() == StatusCode::NOT_FOUND;
                shared::record_backend_timing(self.service, success, elapsed.as_secs_f64());

                tracing::debug!(
                    service = self.service,
                    method = %method,
                    url = %url,
                    status = response.status().as_u16(),
                    duration_ms = elapsed.as_millis(),
                    "Backend call completed"
                );

                Ok(response)
            }
            Err(e) => {
                shared::record_backend_timing(self.service, false, elapsed.as_secs_f64());
                shared::record_counter("bff.backend.failures", 1);

                tracing::error!(
                    service = self.service,
                    method = %method,
                    url = %url,
                    code = %code,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Backend call failed in transport"
                );

                Err(ServiceError::transport(code))
            }
        }
    }

    fn ensure_success(&self, status: StatusCode, code: ErrorCode) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }

        shared::record_counter("bff.backend.failures", 1);
        tracing::warn!(
            service = self.service,
            status = status.as_u16(),
            code = %code,
            "Backend returned non-success status"
        );

        Err(ServiceError::upstream(code, status.as_u16()))
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        code: ErrorCode,
    ) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!(
                service = self.service,
                code = %code,
                error = %e,
                "Failed to decode backend response"
            );
            ServiceError::transport(code)
        })
    }
}
