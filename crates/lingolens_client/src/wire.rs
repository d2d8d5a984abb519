//! JSON shapes of the translation backend and their conversion into core types.
use std::collections::BTreeMap;

use lingolens_core::{LanguageCatalog, TranslationOutcome};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::ClientError;

#[derive(Debug, Deserialize)]
struct LanguagesResponse {
    languages: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    success: bool,
    #[serde(default)]
    data: Option<TranslateData>,
    #[serde(default)]
    target_language: Option<String>,
    #[serde(default)]
    target_language_name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    original_text: String,
    translated_text: String,
    source_language: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: serde_json::Value,
}

pub(crate) fn parse_catalog(body: &[u8]) -> Result<LanguageCatalog, ClientError> {
    let response: LanguagesResponse = serde_json::from_slice(body)
        .map_err(|err| ClientError::CatalogFetch(format!("malformed catalog: {err}")))?;
    if response.languages.is_empty() {
        return Err(ClientError::CatalogFetch("catalog is empty".to_string()));
    }
    Ok(LanguageCatalog::new(response.languages))
}

/// Parses a 2xx body of `/translate-image`.
pub(crate) fn parse_translation(body: &[u8]) -> Result<TranslationOutcome, ClientError> {
    let response: TranslateResponse = serde_json::from_slice(body)
        .map_err(|err| ClientError::ResponseFormat(err.to_string()))?;

    if !response.success {
        let reason = response
            .message
            .or_else(|| response.data.and_then(|data| data.message))
            .unwrap_or_else(|| "Translation failed".to_string());
        return Err(ClientError::Backend(reason));
    }

    let data = response
        .data
        .ok_or_else(|| ClientError::ResponseFormat("missing field `data`".to_string()))?;
    let target_language = response
        .target_language
        .ok_or_else(|| ClientError::ResponseFormat("missing field `target_language`".to_string()))?;
    let target_language_name = response.target_language_name.ok_or_else(|| {
        ClientError::ResponseFormat("missing field `target_language_name`".to_string())
    })?;

    Ok(TranslationOutcome {
        original_text: data.original_text,
        translated_text: data.translated_text,
        source_language: data.source_language,
        target_language,
        target_language_name,
        message: data.message,
    })
}

/// Maps a non-2xx response to the reason shown to the user.
pub(crate) fn parse_failure(status: StatusCode, body: &[u8]) -> ClientError {
    let detail = serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| match envelope.detail {
            serde_json::Value::String(text) => Some(text),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        });

    match detail {
        Some(detail) => ClientError::Backend(detail),
        None => ClientError::Backend(format!(
            "HTTP {}: {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status")
        )),
    }
}
