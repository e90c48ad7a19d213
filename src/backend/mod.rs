//! Client for the backend API.
//!
//! Every route in the portal funnels through this client, so the bearer
//! header, status branching, and timeout policy are defined once. One
//! method per backend endpoint; no retries.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::models::{ocr_fields_from_json, KtpRecord, OcrFields};

/// Request timeout for every backend call. The system this replaces had
/// none, which let a hung backend hang the browser request with it.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from backend calls, one taxonomy for all routes.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend rejected the bearer token; the session is invalid.
    #[error("session is no longer valid")]
    Unauthorized,

    /// The backend reported a business error for this operation.
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
    },

    /// The backend was unreachable or the request failed in transit.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a body we could not make sense of.
    #[error("unexpected backend response: {0}")]
    BadResponse(String),
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingBody {
    #[serde(default)]
    data: Vec<KtpRecord>,
    #[serde(default, rename = "recordsFiltered")]
    records_filtered: u64,
}

#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    ktp_record: Option<KtpRecord>,
}

#[derive(Debug, Deserialize)]
struct OcrBody {
    #[serde(default)]
    data: serde_json::Map<String, Value>,
}

/// One page of the record listing.
#[derive(Debug, Default)]
pub struct RecordPage {
    pub records: Vec<KtpRecord>,
    pub total_filtered: u64,
}

/// HTTP client bound to the backend base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: &str) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Any non-200 answer means the credentials were not accepted; a
    /// 401 here is bad credentials, not an expired session.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, BackendError> {
        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BackendError::Rejected {
                status,
                message: "Invalid credentials".to_string(),
            });
        }

        let body: TokenBody = response
            .json()
            .await
            .map_err(|e| BackendError::BadResponse(e.to_string()))?;
        Ok(body.token)
    }

    /// Fetch one page of records, optionally filtered by a search string.
    pub async fn list_records(
        &self,
        token: &str,
        start: u64,
        length: u64,
        search: &str,
    ) -> Result<RecordPage, BackendError> {
        let params = [
            ("draw", "1".to_string()),
            ("start", start.to_string()),
            ("length", length.to_string()),
            ("search[value]", search.to_string()),
        ];

        let response = self
            .http
            .get(self.endpoint("/api/ktp"))
            .bearer_auth(token)
            .query(&params)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: ListingBody = response
                    .json()
                    .await
                    .map_err(|e| BackendError::BadResponse(e.to_string()))?;
                Ok(RecordPage {
                    records: body.data,
                    total_filtered: body.records_filtered,
                })
            }
            _ => Err(self.rejection(response, "Failed to fetch data").await),
        }
    }

    /// Fetch a single record by its NIK.
    pub async fn get_record(&self, token: &str, nik: &str) -> Result<KtpRecord, BackendError> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/ktp/{}", nik)))
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: RecordEnvelope = response
                    .json()
                    .await
                    .map_err(|e| BackendError::BadResponse(e.to_string()))?;
                body.ktp_record
                    .ok_or_else(|| BackendError::BadResponse("missing ktp_record".to_string()))
            }
            _ => Err(self.rejection(response, "Record not found").await),
        }
    }

    /// Create a record. The backend answers 200 or 201 on success.
    pub async fn create_record(
        &self,
        token: &str,
        record: &KtpRecord,
    ) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.endpoint("/api/ktp"))
            .bearer_auth(token)
            .json(record)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(()),
            _ => Err(self.rejection(response, "Failed to create record").await),
        }
    }

    /// Update a record. The NIK travels in the URL, not the body.
    pub async fn update_record(
        &self,
        token: &str,
        nik: &str,
        record: &KtpRecord,
    ) -> Result<(), BackendError> {
        let response = self
            .http
            .put(self.endpoint(&format!("/api/ktp/{}", nik)))
            .bearer_auth(token)
            .json(&record.update_payload())
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            _ => Err(self.rejection(response, "Failed to update record").await),
        }
    }

    /// Delete a record by its NIK.
    pub async fn delete_record(&self, token: &str, nik: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("/api/ktp/{}", nik)))
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            _ => Err(self.rejection(response, "Failed to delete record").await),
        }
    }

    /// Forward an uploaded document to the OCR extraction endpoint.
    ///
    /// The file stream, name, and MIME type pass through unmodified.
    pub async fn extract_document(
        &self,
        token: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<OcrFields, BackendError> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(self.endpoint("/api/ocr/extract"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: OcrBody = response
                    .json()
                    .await
                    .map_err(|e| BackendError::BadResponse(e.to_string()))?;
                Ok(ocr_fields_from_json(&body.data))
            }
            _ => Err(self.rejection(response, "Unknown error").await),
        }
    }

    /// Turn a non-success response into a `BackendError`.
    ///
    /// A 401 uniformly means the session is invalid. Anything else
    /// surfaces the backend's `message` verbatim, or the fallback when
    /// the body is missing or malformed.
    async fn rejection(&self, response: reqwest::Response, fallback: &str) -> BackendError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return BackendError::Unauthorized;
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| fallback.to_string());

        BackendError::Rejected { status, message }
    }
}
