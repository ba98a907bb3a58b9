//! Firestore REST API client
//!
//! Only the two RPCs this service needs are wrapped: `commit` for writes with
//! server-side transforms and `runQuery` for ordered, limited reads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use super::auth::{Authenticator, ServiceAccountAuth};
use crate::config::Credentials;
use crate::error::FirestoreError;

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Firestore REST client bound to one project's default database
pub struct FirestoreClient {
    http: Client,
    base_url: String,
    database: String,
    auth: Authenticator,
}

impl FirestoreClient {
    pub fn new(credentials: Credentials) -> Self {
        let http = Client::new();
        let project_id = credentials.project_id().to_string();

        let (base_url, auth) = match credentials {
            Credentials::ServiceAccount(key) => (
                FIRESTORE_BASE_URL.to_string(),
                Authenticator::ServiceAccount(ServiceAccountAuth::new(http.clone(), key)),
            ),
            Credentials::Emulator { host, .. } => {
                (format!("http://{}", host), Authenticator::Emulator)
            }
        };

        Self::with_parts(http, base_url, &project_id, auth)
    }

    fn with_parts(http: Client, base_url: String, project_id: &str, auth: Authenticator) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            database: format!("projects/{}/databases/(default)", encode(project_id)),
            auth,
        }
    }

    /// Full resource name of a document
    pub fn document_name(&self, collection: &str, id: &str) -> String {
        format!("{}/documents/{}/{}", self.database, collection, id)
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/v1/{}/documents:{}", self.base_url, self.database, method)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, FirestoreError> {
        let status = response.status();
        let body = response.text().await?;
        parse_response(status, &body)
    }

    /// Apply a batch of writes atomically
    pub async fn commit(&self, writes: Vec<Write>) -> Result<CommitResponse, FirestoreError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .http
            .post(self.api_url("commit"))
            .bearer_auth(token)
            .json(&CommitRequest { writes })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Run a structured query and return the matching documents
    pub async fn run_query(&self, query: StructuredQuery) -> Result<Vec<Document>, FirestoreError> {
        let token = self.auth.bearer_token().await?;
        let response = self
            .http
            .post(self.api_url("runQuery"))
            .bearer_auth(token)
            .json(&RunQueryRequest {
                structured_query: query,
            })
            .send()
            .await?;

        let results: Vec<RunQueryResult> = self.handle_response(response).await?;

        // Results without a document only carry progress information.
        Ok(results.into_iter().filter_map(|r| r.document).collect())
    }
}

/// A typed Firestore value (only the kinds this service reads or writes)
///
/// Other kinds deserialize with every field empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<DateTime<Utc>>,
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            string_value: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp_value
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Document {
    /// Last path segment of the resource name
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Write {
    pub update: Document,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update_transforms: Vec<FieldTransform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_document: Option<Precondition>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTransform {
    pub field_path: String,
    pub set_to_server_value: ServerValue,
}

impl FieldTransform {
    pub fn request_time(field_path: &str) -> Self {
        Self {
            field_path: field_path.to_string(),
            set_to_server_value: ServerValue::RequestTime,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerValue {
    RequestTime,
}

#[derive(Debug, Serialize)]
pub struct Precondition {
    pub exists: bool,
}

#[derive(Serialize)]
struct CommitRequest {
    writes: Vec<Write>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    #[serde(default)]
    pub commit_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    pub from: Vec<CollectionSelector>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl StructuredQuery {
    /// Newest-first query over one collection
    pub fn latest(collection: &str, order_field: &str, limit: usize) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection.to_string(),
            }],
            order_by: vec![Order {
                field: FieldReference {
                    field_path: order_field.to_string(),
                },
                direction: Direction::Descending,
            }],
            limit: Some(i32::try_from(limit).unwrap_or(i32::MAX)),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    pub collection_id: String,
}

#[derive(Debug, Serialize)]
pub struct Order {
    pub field: FieldReference,
    pub direction: Direction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    pub field_path: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Descending,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunQueryRequest {
    structured_query: StructuredQuery,
}

#[derive(Deserialize)]
struct RunQueryResult {
    #[serde(default)]
    document: Option<Document>,
}

/// Decode a response body, mapping error statuses to `FirestoreError`
fn parse_response<T: for<'de> Deserialize<'de>>(
    status: StatusCode,
    body: &str,
) -> Result<T, FirestoreError> {
    if status.is_success() {
        serde_json::from_str(body).map_err(|e| FirestoreError::Deserialization(e.to_string()))
    } else if status == StatusCode::UNAUTHORIZED {
        Err(FirestoreError::Unauthorized)
    } else {
        Err(FirestoreError::Api {
            status: status.as_u16(),
            message: body.to_string(),
        })
    }
}
