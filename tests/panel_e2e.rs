//! The full panel contract driven against a real server process.

mod common;

use anyhow::Result;

use filedock::model::{FileId, RemoteConfig};
use filedock::panel::{FilePanel, MemoryDiagnostics};
use filedock::remote::RemoteClient;

fn panel_for(base_url: &str) -> Result<(FilePanel<RemoteClient>, MemoryDiagnostics)> {
    let client = RemoteClient::new(RemoteConfig {
        base_url: base_url.to_string(),
    })?;
    let diags = MemoryDiagnostics::default();
    Ok((FilePanel::new(client, Box::new(diags.clone())), diags))
}

#[test]
fn panel_mutations_are_reflected_by_refetch() -> Result<()> {
    let server = common::spawn_server()?;
    let (mut panel, diags) = panel_for(&server.base_url)?;

    panel.refresh();
    assert!(panel.registry().is_empty());

    panel.upload("a.txt", b"aaaa".to_vec());
    assert_eq!(panel.registry().len(), 1);
    assert_eq!(panel.registry().records()[0].name, "a.txt");
    assert_eq!(panel.registry().records()[0].size, 4);

    // Rename flow: edit, retype, commit; the registry shows the refetched name.
    let record = panel.registry().records()[0].clone();
    panel.start_edit(&record);
    panel.update_draft("b.txt");
    panel.commit_rename();

    assert!(panel.session().is_none());
    assert_eq!(panel.registry().len(), 1);
    assert_eq!(panel.registry().records()[0].name, "b.txt");
    assert_eq!(panel.registry().records()[0].id, record.id);

    let id = panel.registry().records()[0].id.clone();
    panel.delete(&id);
    assert!(panel.registry().is_empty());
    assert!(diags.is_empty());

    Ok(())
}

#[test]
fn panel_swallows_remote_failures_and_keeps_state() -> Result<()> {
    let server = common::spawn_server()?;
    let (mut panel, diags) = panel_for(&server.base_url)?;

    panel.upload("keep.txt", b"keep".to_vec());
    assert_eq!(panel.registry().len(), 1);

    // Deleting an id the server never issued: request goes out, server says
    // 404, the panel records one diagnostic and the registry is untouched.
    panel.delete(&FileId("bogus".to_string()));
    assert_eq!(panel.registry().len(), 1);
    assert_eq!(panel.registry().records()[0].name, "keep.txt");
    assert_eq!(diags.len(), 1);

    // A failed rename still clears the session and changes nothing visible.
    let record = panel.registry().records()[0].clone();
    panel.start_edit(&record);
    panel.update_draft("new-name.txt");
    panel.delete(&record.id); // row vanishes under the live edit session
    panel.commit_rename(); // rename of a deleted id fails remotely

    assert!(panel.session().is_none());
    assert!(panel.registry().is_empty());
    assert_eq!(diags.len(), 2);

    Ok(())
}
