//! Request parsing and response encoding shared by the file handlers.

use crate::error::{ApiError, ApiResult};
use axum::Json;
use axum::extract::{Form, FromRequest, FromRequestParts, Query, Request};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use filecat_core::{FileFilter, FileId, FileRecord, NewFile, base_name};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

/// Parse an id path segment.
///
/// Tokens that are not a positive integer are reported as a missing file,
/// the same as an id with no record.
pub fn parse_file_id(token: &str) -> ApiResult<FileId> {
    token.parse().map_err(|_| ApiError::file_not_found(token))
}

/// Search criteria from the query string.
///
/// Recognized keys are `filename`, `hash` and `acl`. When a key repeats,
/// its first value is used; empty values and unknown keys are ignored.
#[derive(Debug)]
pub struct FileQuery(pub FileFilter);

impl<S> FromRequestParts<S> for FileQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("invalid query: {}", e.body_text())))?;

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map_or("", |(_, v)| v.as_str())
        };

        Ok(Self(FileFilter::new(
            first("filename"),
            first("hash"),
            first("acl"),
        )))
    }
}

/// Raw file fields as sent by clients. Missing fields are empty.
#[derive(Debug, Default, Deserialize)]
struct FileFields {
    #[serde(default)]
    filename: String,
    #[serde(default)]
    hash: String,
    #[serde(default)]
    acl: String,
}

/// File fields from a request body, JSON or form-urlencoded.
///
/// Only the base name of `filename` is kept.
#[derive(Debug)]
pub struct FileForm(pub NewFile);

impl<S> FromRequest<S> for FileForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let fields = if is_json {
            let Json(fields) = Json::<FileFields>::from_request(req, state)
                .await
                .map_err(|e| body_rejection("JSON", e.status(), e.body_text()))?;
            fields
        } else {
            let Form(fields) = Form::<FileFields>::from_request(req, state)
                .await
                .map_err(|e| body_rejection("form", e.status(), e.body_text()))?;
            fields
        };

        Ok(Self(NewFile::new(
            base_name(&fields.filename),
            fields.hash,
            fields.acl,
        )))
    }
}

/// Bodies over the configured limit keep their 413; anything else is a 400.
fn body_rejection(kind: &str, status: StatusCode, text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("request body too large: {text}"))
    } else {
        ApiError::BadRequest(format!("invalid {kind}: {text}"))
    }
}

/// XML view of a record: `<file id="1"><filename>..</filename>..</file>`.
#[derive(Serialize)]
#[serde(rename = "file")]
struct XmlFile<'a> {
    #[serde(rename = "@id")]
    id: u64,
    filename: &'a str,
    hash: &'a str,
    acl: &'a str,
}

impl<'a> From<&'a FileRecord> for XmlFile<'a> {
    fn from(record: &'a FileRecord) -> Self {
        Self {
            id: record.id.get(),
            filename: &record.file_name,
            hash: &record.hash,
            acl: &record.acl,
        }
    }
}

/// XML list wrapper: `<files><file ..>..</file>..</files>`.
#[derive(Serialize)]
#[serde(rename = "files")]
struct XmlFiles<'a> {
    #[serde(rename = "file")]
    files: Vec<XmlFile<'a>>,
}

fn to_xml<T: Serialize>(value: &T) -> ApiResult<String> {
    quick_xml::se::to_string(value)
        .map_err(|e| ApiError::Internal(format!("failed to encode XML: {e}")))
}

/// Wire format for successful responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    /// One record per line, `<filename> - <hash> (<acl>)`.
    Text,
}

impl ResponseFormat {
    /// Pick the format from the `Accept` header.
    ///
    /// The first listed media type we can produce wins; anything else
    /// falls back to JSON.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(accept) = headers.get(ACCEPT).and_then(|v| v.to_str().ok()) else {
            return Self::Json;
        };

        accept
            .split(',')
            .filter_map(|item| item.split(';').next())
            .map(str::trim)
            .find_map(|media_type| match media_type {
                "application/json" => Some(Self::Json),
                "application/xml" | "text/xml" => Some(Self::Xml),
                "text/plain" => Some(Self::Text),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Encode a single record.
    pub fn record(self, status: StatusCode, record: &FileRecord) -> ApiResult<Response> {
        Ok(match self {
            Self::Json => (status, Json(record)).into_response(),
            Self::Xml => xml_response(status, to_xml(&XmlFile::from(record))?),
            Self::Text => (status, format!("{record}\n")).into_response(),
        })
    }

    /// Encode a list of records. An empty list is `[]` in JSON, an empty
    /// `<files>` element in XML and an empty body in text.
    pub fn records(self, records: &[FileRecord]) -> ApiResult<Response> {
        Ok(match self {
            Self::Json => (StatusCode::OK, Json(records)).into_response(),
            Self::Xml => {
                let files = XmlFiles {
                    files: records.iter().map(XmlFile::from).collect(),
                };
                xml_response(StatusCode::OK, to_xml(&files)?)
            }
            Self::Text => {
                let body: String = records.iter().map(|r| format!("{r}\n")).collect();
                (StatusCode::OK, body).into_response()
            }
        })
    }
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (status, [(CONTENT_TYPE, "application/xml")], body).into_response()
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
