use crate::model::{FileId, FileRecord};

/// Ordered snapshot of the remote file list.
///
/// The snapshot is always taken verbatim from the last applied list fetch; it
/// is never patched locally after a mutation. Refreshes are tagged with a
/// monotonically increasing generation so that a completion arriving after a
/// newer one has already been applied is discarded instead of rolling the
/// registry back.
#[derive(Default)]
pub struct Registry {
    records: Vec<FileRecord>,
    issued: u64,
    applied: u64,
}

/// Token pairing a refresh completion with the fetch that produced it.
#[derive(Debug)]
pub struct RefreshTicket(u64);

impl Registry {
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &FileId) -> Option<&FileRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replaces the snapshot wholesale. Returns false (leaving the snapshot
    /// untouched) when a refresh issued later has already completed.
    pub fn complete_refresh(&mut self, ticket: RefreshTicket, records: Vec<FileRecord>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        self.records = records;
        true
    }
}
