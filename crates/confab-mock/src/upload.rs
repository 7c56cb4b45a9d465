//! Mock attachment uploader.
//!
//! Simulates the upload half of the composer: every file "uploads"
//! successfully after a short delay, and a cancelled file disappears
//! from the current batch. State lives in memory only.

use std::time::Duration;

use rand::Rng;
use tokio::sync::Mutex;

use confab_core::session::{Attachment, AttachmentStatus};

/// In-memory stand-in for the attachment upload service.
///
/// Holds the latest upload batch, mirroring what the composer's
/// attachment row shows.
#[derive(Debug, Default)]
pub struct MockUploader {
    files: Mutex<Vec<Attachment>>,
}

impl MockUploader {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(Vec::new()),
        }
    }

    /// "Uploads" a batch of files.
    ///
    /// Every file comes back with `Success` status and full progress;
    /// the batch replaces the previous one. Returns the updated batch.
    pub async fn upload_files(&self, files: Vec<Attachment>) -> Vec<Attachment> {
        self.upload_jitter().await;
        let uploaded: Vec<Attachment> = files
            .into_iter()
            .map(|mut file| {
                file.status = AttachmentStatus::Success;
                file.progress = Some(100);
                file
            })
            .collect();
        tracing::debug!("[MockUploader] Uploaded {} file(s)", uploaded.len());
        let mut store = self.files.lock().await;
        *store = uploaded.clone();
        uploaded
    }

    /// Cancels an upload, removing the file from the current batch.
    ///
    /// Unknown ids are ignored. Returns the remaining batch.
    pub async fn cancel_upload(&self, file_id: &str) -> Vec<Attachment> {
        self.upload_jitter().await;
        let mut store = self.files.lock().await;
        store.retain(|file| file.id != file_id);
        store.clone()
    }

    /// Returns the current batch.
    pub async fn files(&self) -> Vec<Attachment> {
        self.files.lock().await.clone()
    }

    async fn upload_jitter(&self) {
        let ms = rand::thread_rng().gen_range(500..=1000);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}
