use base64::{
    engine::general_purpose::STANDARD,
    Engine,
};
use reqwest::blocking::Client;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    errors::LexankiError,
    models::Note,
    pipeline::NoteSink,
};

const ANKI_CONNECT_URL: &str = "http://localhost:8765/";

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<Option<T>, LexankiError> {
        match self.error {
            Some(err) => Err(LexankiError::AnkiConnect(err)),
            None => Ok(self.result),
        }
    }
}

/// Blocking client for the AnkiConnect version-6 envelope.
pub struct AnkiClient {
    client: Client,
    endpoint: String,
}

impl AnkiClient {
    pub fn new() -> Self {
        Self::with_endpoint(ANKI_CONNECT_URL)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        Self { client: Client::new(), endpoint: endpoint.to_string() }
    }

    fn make_request<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<ApiResponse<T>, LexankiError> {
        let mut body = serde_json::Map::new();
        body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
        body.insert("version".to_string(), serde_json::Value::Number((6).into()));

        if let Some(params) = params {
            body.insert("params".to_string(), params);
        }

        let response = self.client.post(&self.endpoint).json(&body).send()?.json()?;

        Ok(response)
    }

    /// Used to check that AnkiConnect is reachable before a run starts.
    pub fn version(&self) -> Result<u32, LexankiError> {
        let response: ApiResponse<u32> = self.make_request("version", None)?;
        Ok(response.into_result()?.unwrap_or_default())
    }

    pub fn add_note(&self, note: &Note) -> Result<u64, LexankiError> {
        let params = serde_json::json!({
            "note": {
                "deckName": note.deck_name,
                "modelName": note.model_name,
                "fields": note.fields,
            }
        });

        let response: ApiResponse<u64> = self.make_request("addNote", Some(params))?;
        Ok(response.into_result()?.unwrap_or_default())
    }

    pub fn store_media_file(&self, filename: &str, bytes: &[u8]) -> Result<String, LexankiError> {
        let params = serde_json::json!({
            "filename": filename,
            "data": STANDARD.encode(bytes),
        });

        let response: ApiResponse<String> = self.make_request("storeMediaFile", Some(params))?;
        Ok(response.into_result()?.unwrap_or_default())
    }
}

impl NoteSink for AnkiClient {
    fn add_note(&self, note: &Note) -> Result<(), LexankiError> {
        AnkiClient::add_note(self, note).map(|_| ())
    }

    fn store_media(&self, filename: &str, bytes: &[u8]) -> Result<(), LexankiError> {
        self.store_media_file(filename, bytes).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_becomes_submission_error() {
        let response: ApiResponse<u64> =
            ApiResponse { result: None, error: Some("cannot create note because it is a duplicate".to_string()) };

        let result = response.into_result();
        assert!(matches!(result, Err(LexankiError::AnkiConnect(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_api_result_passes_through() {
        let response: ApiResponse<u64> = ApiResponse { result: Some(1483959289817), error: None };
        assert_eq!(response.into_result().unwrap(), Some(1483959289817));
    }

    #[test]
    fn test_response_envelope_shape() {
        // AnkiConnect answers {"result": ..., "error": null} on success.
        let parsed: ApiResponse<Vec<u64>> =
            serde_json::from_str(r#"{"result": [1483959289817, 1483959291695], "error": null}"#)
                .unwrap();
        assert_eq!(parsed.result, Some(vec![1483959289817, 1483959291695]));
        assert!(parsed.error.is_none());
    }
}
