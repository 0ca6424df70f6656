use super::{FilePanel, FileService};
use crate::model::{FileId, FileRecord};

impl<S: FileService> FilePanel<S> {
    /// Fetches the full file list and replaces the registry snapshot.
    ///
    /// On failure the registry is left unchanged; the error is recorded and
    /// swallowed. No retry.
    pub fn refresh(&mut self) {
        let ticket = self.registry.begin_refresh();
        match self.service.list_files() {
            Ok(records) => {
                self.registry.complete_refresh(ticket, records);
            }
            Err(err) => self.diagnostics.record("list files", &err),
        }
    }

    /// Uploads one file. The bytes are discarded either way; a successful
    /// create is followed by exactly one refresh.
    pub fn upload(&mut self, name: &str, bytes: Vec<u8>) {
        match self.service.upload_file(name, bytes) {
            Ok(()) => self.refresh(),
            Err(err) => self.diagnostics.record("upload", &err),
        }
    }

    /// Deletes by id without checking the registry first. Deleting the same
    /// id twice issues two requests; the second failing remotely is an
    /// ordinary logged failure.
    pub fn delete(&mut self, id: &FileId) {
        match self.service.delete_file(id) {
            Ok(()) => self.refresh(),
            Err(err) => self.diagnostics.record("delete", &err),
        }
    }

    /// Starts (or restarts) an edit session on `record`, initializing the
    /// draft to its current name. Any prior uncommitted draft is abandoned
    /// without a request.
    pub fn start_edit(&mut self, record: &FileRecord) {
        self.session = Some(super::EditSession::begin(record));
    }

    /// Replaces the current draft. No-op outside an edit session.
    pub fn update_draft(&mut self, text: &str) {
        if let Some(session) = self.session.as_mut() {
            session.set_draft(text);
        }
    }

    /// Issues one rename request carrying the then-current draft. The session
    /// is cleared whether or not the service accepts the rename; only a
    /// success triggers a refresh, so a failed rename silently drops the UI
    /// back to the stale name.
    pub fn commit_rename(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match self
            .service
            .rename_file(session.target_id(), session.draft_name())
        {
            Ok(()) => self.refresh(),
            Err(err) => self.diagnostics.record("rename", &err),
        }
    }
}
