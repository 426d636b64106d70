// Ingest pipeline: classification, dedup and disposition of incoming files

pub mod relocate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::classify::{self, Classification};
use crate::config::Config;
use crate::constants::ORIGIN_PATH_PROPERTY;
use crate::error::Result;
use crate::hash;
use crate::store::ObjectStore;
use crate::watch::FileEventHandler;

/// A freshly observed filesystem entry, consumed exactly once by the pipeline.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub path: PathBuf,
    pub mime_guess: Option<String>,
}

impl IncomingFile {
    pub fn from_path(path: &Path) -> Self {
        IncomingFile {
            path: path.to_path_buf(),
            mime_guess: classify::guess_mime(path).map(String::from),
        }
    }
}

/// The pipeline's final decision for one file.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Unique video content: registered in the catalog, destined for the
    /// archive directory under its new `<id>.<ext>` name.
    Archive {
        new_path: PathBuf,
        registered_id: i64,
    },
    /// Video content already known to the catalog.
    Duplicate { target_dir: PathBuf },
    /// Not recognized as video.
    Reject { target_dir: PathBuf },
}

/// Orchestrates classification and disposition of one incoming file at a
/// time using the hash computer and the two remote collaborators.
pub struct IngestPipeline {
    archive_dir: PathBuf,
    clone_dir: PathBuf,
    broken_dir: PathBuf,
    archive_folder: String,
    catalog: Arc<dyn CatalogClient>,
    store: Arc<dyn ObjectStore>,
}

impl IngestPipeline {
    pub fn new(
        config: &Config,
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        IngestPipeline {
            archive_dir: config.archive_dir.clone(),
            clone_dir: config.clone_dir.clone(),
            broken_dir: config.broken_dir.clone(),
            archive_folder: config.store.archive_folder.clone(),
            catalog,
            store,
        }
    }

    /// Decide the disposition of one incoming file.
    /// Deterministic, no retries: fingerprint, classify, dedup check, branch.
    /// Unique video content is registered with the catalog here; physically
    /// relocating and uploading the file is the caller's job (see `process`).
    pub fn classify(&self, file: &IncomingFile) -> Result<Disposition> {
        let fingerprint = hash::fingerprint_file(&file.path)?;
        let classification = Classification::from_mime(file.mime_guess.as_deref());
        let known = self.catalog.exists(&fingerprint)?;

        log::info!(
            "New file: {}, fingerprint: {}, classification: {:?}, known: {}",
            file.path.display(),
            fingerprint,
            classification,
            known
        );

        match (classification, known) {
            (Classification::Video, false) => {
                let id = self.catalog.register(&file.path, &fingerprint)?;
                let archived_name = match file.path.extension().and_then(|e| e.to_str()) {
                    Some(ext) => format!("{}.{}", id, ext),
                    None => id.to_string(),
                };
                log::info!(
                    "Registered {} in catalog: fingerprint: {}, id: {}",
                    file.path.display(),
                    fingerprint,
                    id
                );
                Ok(Disposition::Archive {
                    new_path: self.archive_dir.join(archived_name),
                    registered_id: id,
                })
            }
            (Classification::Video, true) => Ok(Disposition::Duplicate {
                target_dir: self.clone_dir.clone(),
            }),
            (Classification::NonVideo, _) => Ok(Disposition::Reject {
                target_dir: self.broken_dir.clone(),
            }),
        }
    }

    /// Post-archive enrichment: merge remote object metadata into the
    /// catalog record. The catalog update is a full-record replace, so the
    /// current record is read back first to preserve its fingerprint and
    /// original path.
    pub fn enrich(&self, registered_id: i64, remote_id: &str) -> Result<()> {
        let mut record = self.catalog.fetch(registered_id)?;
        let metadata = self.store.fetch_metadata(remote_id)?;

        let origin_path = record.file_path.clone();
        record.remote_id = Some(remote_id.to_string());
        record.size_bytes = Some(metadata.size_bytes);
        record.web_link = Some(metadata.web_link);
        record.mime_type = Some(metadata.mime_type);
        self.catalog.update(registered_id, &record)?;

        log::info!(
            "Enriched catalog record {} with remote metadata from {}",
            registered_id,
            remote_id
        );

        // Independent side effect: failure is surfaced but not propagated,
        // and there is no retry.
        if let Err(e) = self
            .store
            .set_property(remote_id, ORIGIN_PATH_PROPERTY, &origin_path)
        {
            log::warn!(
                "Failed to set {} property on remote object {}: {}",
                ORIGIN_PATH_PROPERTY,
                remote_id,
                e
            );
        }

        Ok(())
    }

    /// Run one file through the full lifecycle: classify, relocate per
    /// disposition, and for archived files upload and enrich.
    ///
    /// If registration succeeded but the upload fails, the file stays at its
    /// archived path and the catalog entry is not rolled back; the error
    /// propagates so the gap is observable.
    pub fn process(&self, path: &Path) -> Result<Disposition> {
        let file = IncomingFile::from_path(path);
        let disposition = self.classify(&file)?;

        match &disposition {
            Disposition::Archive {
                new_path,
                registered_id,
            } => {
                relocate::move_file(path, new_path)?;
                log::info!(
                    "Archived {} -> {}, id: {}",
                    path.display(),
                    new_path.display(),
                    registered_id
                );

                let remote_id = self.store.upload(new_path, &self.archive_folder)?;
                log::info!(
                    "Uploaded {} to object store, remote id: {}",
                    new_path.display(),
                    remote_id
                );

                self.enrich(*registered_id, &remote_id)?;
            }
            Disposition::Duplicate { target_dir } => {
                let dest = relocate::move_into_dir(path, target_dir)?;
                log::info!(
                    "Moved duplicate {} -> {}",
                    path.display(),
                    dest.display()
                );
            }
            Disposition::Reject { target_dir } => {
                let dest = relocate::move_into_dir(path, target_dir)?;
                log::info!(
                    "Moved non-video {} -> {}",
                    path.display(),
                    dest.display()
                );
            }
        }

        Ok(disposition)
    }
}

impl FileEventHandler for IngestPipeline {
    fn on_file_created(&self, path: &Path) {
        if let Err(e) = self.process(path) {
            log::error!("Failed to process {}: {}", path.display(), e);
        }
    }
}
