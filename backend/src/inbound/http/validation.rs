//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces a domain `invalid_request` error whose `details`
//! carry `{field, code, value?}` so clients can point at the offending input.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{EmailAddress, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidBody,
    InvalidUuid,
    InvalidTimestamp,
    InvalidEmail,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBody => "invalid_body",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ValidationCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// `8-4-4-4-12` layout; the simple, braced and URN forms are rejected.
fn is_hyphenated_layout(value: &str) -> bool {
    value.len() == 36
        && value
            .bytes()
            .enumerate()
            .all(|(index, byte)| matches!(index, 8 | 13 | 18 | 23) == (byte == b'-'))
}

/// Parse a UUID given in its canonical hyphenated form.
pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    is_hyphenated_layout(value)
        .then(|| Uuid::parse_str(value).ok())
        .flatten()
        .ok_or_else(|| {
            field_error(
                field,
                ValidationCode::InvalidUuid,
                format!("{} must be a valid UUID", field.as_str()),
                value,
            )
        })
}

/// Deserialise an optional field that may be omitted but not `null`.
pub(crate) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Parse an RFC 3339 timestamp with any offset and normalise it to UTC.
pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            field_error(
                field,
                ValidationCode::InvalidTimestamp,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
                value,
            )
        })
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| parse_rfc3339_timestamp(raw, field))
        .transpose()
}

pub(crate) fn parse_email(value: String, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(value.clone()).map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidEmail,
            format!("{} must be a valid email address", field.as_str()),
            &value,
        )
    })
}

/// Convert JSON extractor failures into `400 invalid_request` domain errors.
pub(crate) fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = req.path(), error = %err, "rejected JSON payload");
    let message = match &err {
        JsonPayloadError::ContentType => "expected a JSON request body".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid request body: {inner}"),
        other => format!("invalid request body: {other}"),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": ValidationCode::InvalidBody.as_str() }))
        .into()
}
