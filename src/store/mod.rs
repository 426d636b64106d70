// Remote object store client: holds archived file bytes

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::config::StoreConfig;
use crate::error::{ClipVaultError, Result};

/// Metadata the store reports for an uploaded object.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteMetadata {
    pub size_bytes: i64,
    pub web_link: String,
    pub mime_type: String,
}

/// Remote blob storage service holding archived file bytes.
pub trait ObjectStore: Send + Sync {
    /// Upload a local file into the named remote folder; returns the
    /// remote object id.
    fn upload(&self, local_path: &Path, folder_name: &str) -> Result<String>;

    /// Read back size, public link and MIME type for a remote object.
    fn fetch_metadata(&self, remote_id: &str) -> Result<RemoteMetadata>;

    /// Set one custom key/value property with public visibility.
    fn set_property(&self, remote_id: &str, key: &str, value: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct FolderEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct FolderListResponse {
    folders: Vec<FolderEntry>,
}

#[derive(Debug, Deserialize)]
struct CreateFileResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileDetailResponse {
    file_size: i64,
    web_content_link: String,
    mime_type: String,
}

/// HTTP implementation backed by the store's REST API.
pub struct HttpObjectStore {
    base_url: String,
    http: ureq::Agent,
}

impl HttpObjectStore {
    pub fn new(config: &StoreConfig) -> Self {
        HttpObjectStore {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: ureq::Agent::new(),
        }
    }

    /// Resolve the fixed archive folder id by its display name.
    fn resolve_folder_id(&self, name: &str) -> Result<String> {
        let url = format!("{}/folders", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query("name", name)
            .call()
            .map_err(request_failed)?;
        let body: FolderListResponse = resp.into_json().map_err(bad_response)?;
        body.folders
            .into_iter()
            .find(|f| f.name == name)
            .map(|f| f.id)
            .ok_or_else(|| {
                ClipVaultError::Schema(format!("no remote folder named '{}'", name))
            })
    }
}

fn request_failed(e: ureq::Error) -> ClipVaultError {
    ClipVaultError::Network(e.to_string())
}

fn bad_response(e: std::io::Error) -> ClipVaultError {
    ClipVaultError::Schema(format!("unexpected object store response: {}", e))
}

impl ObjectStore for HttpObjectStore {
    fn upload(&self, local_path: &Path, folder_name: &str) -> Result<String> {
        let folder_id = self.resolve_folder_id(folder_name)?;

        let title = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClipVaultError::InvalidPath(local_path.display().to_string()))?;

        // Create the file entry, then stream its content
        let resp = self
            .http
            .post(&format!("{}/files", self.base_url))
            .send_json(serde_json::json!({
                "title": title,
                "parentFolderId": folder_id,
            }))
            .map_err(request_failed)?;
        let created: CreateFileResponse = resp.into_json().map_err(bad_response)?;

        let file = File::open(local_path)?;
        self.http
            .put(&format!("{}/files/{}/content", self.base_url, created.id))
            .set("Content-Type", "application/octet-stream")
            .send(file)
            .map_err(request_failed)?;

        Ok(created.id)
    }

    fn fetch_metadata(&self, remote_id: &str) -> Result<RemoteMetadata> {
        let url = format!("{}/files/{}", self.base_url, remote_id);
        let resp = self.http.get(&url).call().map_err(request_failed)?;
        let body: FileDetailResponse = resp.into_json().map_err(bad_response)?;
        Ok(RemoteMetadata {
            size_bytes: body.file_size,
            web_link: body.web_content_link,
            mime_type: body.mime_type,
        })
    }

    fn set_property(&self, remote_id: &str, key: &str, value: &str) -> Result<()> {
        self.http
            .post(&format!("{}/files/{}/properties", self.base_url, remote_id))
            .send_json(serde_json::json!({
                "key": key,
                "value": value,
                "visibility": "public",
            }))
            .map_err(request_failed)?;
        Ok(())
    }
}
