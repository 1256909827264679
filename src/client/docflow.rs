//! HTTP implementation of the workflow backend API

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api::{DirectoryApi, WorkflowApi};
use super::models::{NextNode, Organization, Person, TransferRequest};
use crate::error::{ApiError, Result};

/// API prefix appended to the configured host
const API_PREFIX: &str = "/api/v1";

/// Client-side request quota
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope used by every backend endpoint
#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Workflow backend client
pub struct DocflowClient {
    http: HttpClient,
    base_url: String,
    token: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl DocflowClient {
    /// Create a client for `host` (scheme + authority) using a bearer token
    pub fn new(host: &str, token: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota =
            Quota::per_second(NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            base_url: format!("{}{}", host.trim_end_matches('/'), API_PREFIX),
            token: token.into(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Full URL for an API path
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .header("Authorization", format!("Bearer {}", self.token))
    }

    /// GET a path and decode the `data` field of the envelope
    async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;
        debug!("GET {}", path);

        let response = self
            .authorized(Method::GET, path)
            .send()
            .await
            .map_err(ApiError::from)?;

        let response = check_status(response).await?;
        let envelope = response.json::<Envelope<T>>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        Ok(envelope.data)
    }

    /// POST a JSON body; the response body is ignored
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        self.rate_limiter.until_ready().await;
        debug!("POST {}", path);

        let response = self
            .authorized(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from)?;

        check_status(response).await?;
        Ok(())
    }
}

/// Map non-success status codes onto `ApiError`
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let err = match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => {
            let msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Resource not found".to_string());
            ApiError::NotFound(msg)
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            ApiError::RateLimit(Duration::from_secs(retry_after))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Bad request".to_string());
            ApiError::BadRequest(msg)
        }
        status if status.is_server_error() => {
            let msg = response
                .text()
                .await
                .unwrap_or_else(|_| format!("Server error: {}", status));
            ApiError::ServerError(msg)
        }
        _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    };

    Err(err.into())
}

#[async_trait]
impl DirectoryApi for DocflowClient {
    async fn fetch_organizations(&self) -> Result<Vec<Organization>> {
        self.get_data("/orgs").await
    }

    async fn fetch_users_for_role(&self, role_id: u64) -> Result<Vec<Person>> {
        self.get_data(&format!("/roles/{}/users", role_id)).await
    }
}

#[async_trait]
impl WorkflowApi for DocflowClient {
    async fn list_next_nodes(&self, task_id: u64) -> Result<Vec<NextNode>> {
        self.get_data(&format!("/tasks/{}/next-nodes", task_id)).await
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> Result<()> {
        let path = format!(
            "/tasks/{}/{}",
            request.task_id,
            request.kind.path_segment()
        );
        self.post(&path, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::TransferKind;
    use crate::error::Error;

    fn client_for(server: &mockito::Server) -> DocflowClient {
        DocflowClient::new(&server.url(), "test-token").unwrap()
    }

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let client = DocflowClient::new("https://oa.example.com/", "t").unwrap();
        assert_eq!(client.url("/orgs"), "https://oa.example.com/api/v1/orgs");
    }

    #[tokio::test]
    async fn test_fetch_organizations_decodes_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/orgs")
            .match_header("authorization", "Bearer test-token")
            .with_status(200)
            .with_body(
                r#"{"data": [
                    {"id": 1, "name": "Head Office"},
                    {"id": 2, "name": "Finance", "parentId": 1}
                ]}"#,
            )
            .create_async()
            .await;

        let orgs = client_for(&server).fetch_organizations().await.unwrap();

        mock.assert_async().await;
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].parent_id, None);
        assert_eq!(orgs[1].parent_id, Some(1));
    }

    #[tokio::test]
    async fn test_fetch_users_for_role() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/roles/5/users")
            .with_status(200)
            .with_body(r#"{"data": [{"id": 10, "name": "Li Wei", "orgId": 2, "isLeader": true}]}"#)
            .create_async()
            .await;

        let users = client_for(&server).fetch_users_for_role(5).await.unwrap();

        assert_eq!(users.len(), 1);
        assert!(users[0].is_leader);
        assert_eq!(users[0].org_id, 2);
    }

    #[tokio::test]
    async fn test_submit_consult_posts_to_consult_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/tasks/9/consult")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"roleId": 3, "selectedUserIds": [10]}"#.to_string(),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let request = TransferRequest {
            task_id: 9,
            role_id: 3,
            kind: TransferKind::Consult,
            selected_user_ids: vec![10],
            ..Default::default()
        };
        client_for(&server).submit_transfer(&request).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let mut server = mockito::Server::new_async().await;
        let _unauthorized = server
            .mock("GET", "/api/v1/orgs")
            .with_status(401)
            .create_async()
            .await;
        let _server_error = server
            .mock("GET", "/api/v1/tasks/1/next-nodes")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = client_for(&server);

        let err = client.fetch_organizations().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::Unauthorized)));

        let err = client.list_next_nodes(1).await.unwrap_err();
        match err {
            Error::Api(ApiError::ServerError(msg)) => assert!(msg.contains("maintenance")),
            other => panic!("Expected ServerError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/orgs")
            .with_status(200)
            .with_body(r#"{"items": []}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_organizations().await.unwrap_err();
        assert!(matches!(err, Error::Api(ApiError::InvalidResponse(_))));
    }
}
