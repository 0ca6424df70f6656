use crate::model::{FileId, FileRecord};

/// Transient rename draft for a single registry row.
///
/// At most one session is live at a time; starting a new one abandons any
/// prior uncommitted draft. The session is not re-validated against the
/// registry: if a refresh removes the target row, the session goes stale and
/// simply disappears with the row.
pub struct EditSession {
    target_id: FileId,
    draft_name: String,
}

impl EditSession {
    pub fn begin(record: &FileRecord) -> Self {
        Self {
            target_id: record.id.clone(),
            draft_name: record.name.clone(),
        }
    }

    pub fn target_id(&self) -> &FileId {
        &self.target_id
    }

    pub fn draft_name(&self) -> &str {
        &self.draft_name
    }

    // Empty drafts are permitted and sent as-is on commit.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_name = text.into();
    }
}
