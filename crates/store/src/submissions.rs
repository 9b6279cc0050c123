//! `submissions.json` accessor for the generic form endpoint.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use lifesavers_core::submission::{FormSubmission, SUBMISSIONS_FILE};
use lifesavers_core::types::Timestamp;

use crate::error::StoreError;
use crate::local;

pub struct SubmissionStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SubmissionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SUBMISSIONS_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// All stored submissions. A missing or unreadable file lists as empty.
    pub async fn list(&self) -> Vec<FormSubmission> {
        match local::read_array(&self.path).await {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Unreadable submissions file, listing none");
                Vec::new()
            }
        }
    }

    /// Record a submission. Returns it together with whether the file write
    /// succeeded; a failed write still yields the submission so the caller
    /// can report it.
    ///
    /// An existing file that cannot be read or parsed fails the call and is
    /// left as it is.
    pub async fn append(
        &self,
        form_type: String,
        data: serde_json::Value,
        now: Timestamp,
    ) -> Result<(FormSubmission, bool), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut items: Vec<FormSubmission> =
            local::read_array(&self.path).await?.unwrap_or_default();
        let submission = FormSubmission::next(&items, form_type, data, now);
        items.push(submission.clone());

        let bytes = local::to_pretty(&items)?;
        let saved = match local::write_atomic(&self.path, &bytes).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, id = submission.id, "Could not write submissions file");
                false
            }
        };

        tracing::info!(id = submission.id, form_type = %submission.form_type, saved, "Form submission recorded");
        Ok((submission, saved))
    }
}
