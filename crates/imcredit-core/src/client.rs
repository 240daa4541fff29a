//! HTTP client for the imcredit server API

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Author, AuthorFields, Project, ProjectRef, ProjectSummary, RoleInfo};
use crate::error::CreditError;
use crate::order::Direction;
use crate::render::RenderedOutput;
use crate::sync::AuthorSource;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status and `{"error": ...}`
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl From<ClientError> for CreditError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status: 404, message } => {
                CreditError::NotFound(message.trim_end_matches(" not found").to_string())
            }
            ClientError::Api { status: 400, message } if message == "Cannot move further" => {
                CreditError::Boundary
            }
            ClientError::Api { status: 400, message } => CreditError::Validation(message),
            other => CreditError::Storage(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct CreateProjectBody<'a> {
    title: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReorderBody {
    author_id: Uuid,
    direction: Direction,
}

#[derive(Deserialize)]
struct Health {
    status: String,
}

/// Typed access to every server endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8787`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        reqwest::Url::parse(trimmed).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("imcredit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/api{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn create_project(&self, title: Option<&str>) -> Result<ProjectRef, ClientError> {
        self.send(
            self.request(Method::POST, "/projects")
                .json(&CreateProjectBody { title }),
        )
        .await
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ClientError> {
        self.send(self.request(Method::GET, "/projects-list")).await
    }

    pub async fn get_project(&self, project_id: Uuid) -> Result<Project, ClientError> {
        self.send(self.request(Method::GET, &format!("/projects/{}", project_id)))
            .await
    }

    pub async fn list_authors(&self, project_id: Uuid) -> Result<Vec<Author>, ClientError> {
        self.send(self.request(Method::GET, &format!("/projects/{}/authors", project_id)))
            .await
    }

    pub async fn create_author(
        &self,
        project_id: Uuid,
        fields: &AuthorFields,
    ) -> Result<Author, ClientError> {
        self.send(
            self.request(Method::POST, &format!("/projects/{}/authors", project_id))
                .json(fields),
        )
        .await
    }

    pub async fn update_author(
        &self,
        project_id: Uuid,
        author_id: Uuid,
        fields: &AuthorFields,
    ) -> Result<Author, ClientError> {
        self.send(
            self.request(
                Method::PUT,
                &format!("/projects/{}/authors/{}", project_id, author_id),
            )
            .json(fields),
        )
        .await
    }

    pub async fn delete_author(&self, project_id: Uuid, author_id: Uuid) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(self.request(
                Method::DELETE,
                &format!("/projects/{}/authors/{}", project_id, author_id),
            ))
            .await?;
        Ok(())
    }

    pub async fn reorder_author(
        &self,
        project_id: Uuid,
        author_id: Uuid,
        direction: Direction,
    ) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(
                self.request(
                    Method::POST,
                    &format!("/projects/{}/authors/reorder", project_id),
                )
                .json(&ReorderBody {
                    author_id,
                    direction,
                }),
            )
            .await?;
        Ok(())
    }

    /// Server-rendered author list and CRediT statement
    pub async fn output(&self, project_id: Uuid) -> Result<RenderedOutput, ClientError> {
        self.send(self.request(Method::GET, &format!("/projects/{}/output", project_id)))
            .await
    }

    pub async fn roles(&self) -> Result<Vec<RoleInfo>, ClientError> {
        self.send(self.request(Method::GET, "/roles")).await
    }

    /// True when the server reports itself healthy
    pub async fn health(&self) -> Result<bool, ClientError> {
        let health: Health = self.send(self.request(Method::GET, "/health")).await?;
        Ok(health.status == "ok")
    }
}

async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ClientError {
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };
    ClientError::Api {
        status: status.as_u16(),
        message,
    }
}

impl AuthorSource for ApiClient {
    fn fetch_authors(
        &self,
        project_id: Uuid,
    ) -> impl Future<Output = crate::Result<Vec<Author>>> + Send {
        async move { self.list_authors(project_id).await.map_err(CreditError::from) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8787/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8787");
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn api_errors_map_to_credit_errors() {
        let boundary: CreditError = ClientError::Api {
            status: 400,
            message: "Cannot move further".into(),
        }
        .into();
        assert!(matches!(boundary, CreditError::Boundary));

        let missing: CreditError = ClientError::Api {
            status: 404,
            message: "Author not found".into(),
        }
        .into();
        assert_eq!(missing.to_string(), "Author not found");

        let transient: CreditError = ClientError::RequestFailed("connection reset".into()).into();
        assert!(!transient.is_user_facing());
    }

    #[test]
    fn reorder_body_wire_format() {
        let id = Uuid::nil();
        let body = serde_json::to_value(ReorderBody {
            author_id: id,
            direction: Direction::Up,
        })
        .unwrap();
        assert_eq!(body["authorId"], id.to_string());
        assert_eq!(body["direction"], -1);
    }
}
