// Remote catalog client: tracks known files by fingerprint

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::error::{ClipVaultError, Result};
use crate::hash::Fingerprint;

/// A file record as stored by the remote catalog.
/// Created by `register`, enriched later with remote object metadata.
/// Updates are a full-record replace, not a patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    pub id: i64,
    pub file_path: String,
    pub fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Remote record-keeping service tracking known files by fingerprint.
pub trait CatalogClient: Send + Sync {
    /// Is this fingerprint already known to the catalog?
    fn exists(&self, fingerprint: &Fingerprint) -> Result<bool>;

    /// Register a new file and return its catalog id.
    fn register(&self, path: &Path, fingerprint: &Fingerprint) -> Result<i64>;

    /// Read back the full record for an id.
    fn fetch(&self, id: i64) -> Result<CatalogRecord>;

    /// Replace the full record for an id.
    fn update(&self, id: i64, record: &CatalogRecord) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct DedupResponse {
    status: bool,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    id: i64,
}

/// HTTP implementation backed by the catalog's REST API, authenticated
/// with static basic-auth credentials.
pub struct HttpCatalogClient {
    base_url: String,
    auth_header: String,
    http: ureq::Agent,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Self {
        let credentials = STANDARD.encode(format!("{}:{}", config.user, config.pass));
        HttpCatalogClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_header: format!("Basic {}", credentials),
            http: ureq::Agent::new(),
        }
    }
}

fn request_failed(e: ureq::Error) -> ClipVaultError {
    ClipVaultError::Network(e.to_string())
}

fn bad_response(e: std::io::Error) -> ClipVaultError {
    ClipVaultError::Schema(format!("unexpected catalog response: {}", e))
}

impl CatalogClient for HttpCatalogClient {
    fn exists(&self, fingerprint: &Fingerprint) -> Result<bool> {
        let url = format!("{}/dedup", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query("fingerprint", &fingerprint.to_hex())
            .call()
            .map_err(request_failed)?;
        let body: DedupResponse = resp.into_json().map_err(bad_response)?;
        Ok(body.status)
    }

    fn register(&self, path: &Path, fingerprint: &Fingerprint) -> Result<i64> {
        let url = format!("{}/files", self.base_url);
        let resp = self
            .http
            .post(&url)
            .set("Authorization", &self.auth_header)
            .send_json(serde_json::json!({
                "fingerprint": fingerprint.to_hex(),
                "filePath": path.to_string_lossy(),
            }))
            .map_err(request_failed)?;
        let body: RegisterResponse = resp.into_json().map_err(bad_response)?;
        Ok(body.id)
    }

    fn fetch(&self, id: i64) -> Result<CatalogRecord> {
        let url = format!("{}/files/{}", self.base_url, id);
        let resp = self.http.get(&url).call().map_err(request_failed)?;
        resp.into_json().map_err(bad_response)
    }

    fn update(&self, id: i64, record: &CatalogRecord) -> Result<()> {
        let url = format!("{}/files/{}", self.base_url, id);
        self.http
            .put(&url)
            .set("Authorization", &self.auth_header)
            .send_json(record)
            .map_err(request_failed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_names_are_camel_case() {
        let record = CatalogRecord {
            id: 7,
            file_path: "/inbox/a.mp4".to_string(),
            fingerprint: "00112233445566778899aabbccddeeff".to_string(),
            remote_id: None,
            size_bytes: None,
            web_link: None,
            mime_type: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["filePath"], "/inbox/a.mp4");
        assert!(json.get("remoteId").is_none());
    }

    #[test]
    fn test_record_round_trip_with_remote_fields() {
        let json = r#"{
            "id": 3,
            "filePath": "/inbox/b.mov",
            "fingerprint": "ffeeddccbbaa99887766554433221100",
            "remoteId": "r-42",
            "sizeBytes": 1024,
            "webLink": "https://store.example/r-42",
            "mimeType": "video/quicktime"
        }"#;
        let record: CatalogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.remote_id.as_deref(), Some("r-42"));
        assert_eq!(record.size_bytes, Some(1024));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        // No "id" field: must fail fast at the boundary
        let json = r#"{"filePath": "/inbox/c.mp4", "fingerprint": "00"}"#;
        assert!(serde_json::from_str::<CatalogRecord>(json).is_err());
    }
}
