//! Registry synchronization for the remote file list.
//!
//! The panel keeps a local snapshot of the remote file collection and a
//! transient rename draft, and turns user commands (upload, delete,
//! rename-commit) into remote calls followed by a full registry refresh.
//! It has no rendering surface of its own; a view is a projection of
//! (registry, edit session).

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::model::{FileId, FileRecord};

mod commands;
mod registry;
mod session;

pub use self::registry::{RefreshTicket, Registry};
pub use self::session::EditSession;

/// Remote file-store capability the panel is wired to.
///
/// The production implementation is [`crate::remote::RemoteClient`]; tests
/// substitute a scripted double.
pub trait FileService {
    fn list_files(&self) -> Result<Vec<FileRecord>>;
    fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<()>;
    fn delete_file(&self, id: &FileId) -> Result<()>;
    fn rename_file(&self, id: &FileId, name: &str) -> Result<()>;
}

/// Sink for failures the panel swallows at its command boundary.
///
/// Commands never surface errors to the caller; every failure is recorded
/// here and the panel returns to a stable state.
pub trait Diagnostics {
    fn record(&mut self, context: &str, err: &anyhow::Error);
}

pub struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn record(&mut self, context: &str, err: &anyhow::Error) {
        eprintln!("{}: {:#}", context, err);
    }
}

/// In-memory sink. Cloning yields a handle onto the same entries, so a test
/// or UI can hand one clone to the panel and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryDiagnostics {
    entries: Rc<RefCell<Vec<String>>>,
}

impl MemoryDiagnostics {
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn record(&mut self, context: &str, err: &anyhow::Error) {
        self.entries
            .borrow_mut()
            .push(format!("{}: {:#}", context, err));
    }
}

/// Command dispatcher over a remote file store.
///
/// Holds the registry snapshot and at most one live edit session. Every
/// mutation that the service acknowledges is followed by exactly one refresh;
/// a failed mutation leaves the registry untouched and records a diagnostic.
pub struct FilePanel<S> {
    service: S,
    diagnostics: Box<dyn Diagnostics>,
    registry: Registry,
    session: Option<EditSession>,
}

impl<S: FileService> FilePanel<S> {
    pub fn new(service: S, diagnostics: Box<dyn Diagnostics>) -> Self {
        Self {
            service,
            diagnostics,
            registry: Registry::default(),
            session: None,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}
