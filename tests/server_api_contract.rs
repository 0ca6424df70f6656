mod common;

use anyhow::{Context, Result};
use reqwest::blocking::multipart;

#[test]
fn server_api_contract_crud_and_missing_ids() -> Result<()> {
    let server = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    // Health reports ok.
    let health: serde_json::Value = client
        .get(format!("{}/health", server.base_url))
        .send()
        .context("health")?
        .error_for_status()
        .context("health status")?
        .json()
        .context("parse health")?;
    assert_eq!(
        health.get("status"),
        Some(&serde_json::Value::String("ok".to_string()))
    );

    // Empty store lists as an empty array.
    let files: serde_json::Value = client
        .get(format!("{}/files", server.base_url))
        .send()
        .context("list empty")?
        .error_for_status()
        .context("list empty status")?
        .json()
        .context("parse empty list")?;
    assert_eq!(files, serde_json::json!([]));

    // Upload via multipart field `file`.
    let form = multipart::Form::new().part(
        "file",
        multipart::Part::bytes(b"hello dock".to_vec())
            .file_name("hello.txt")
            .mime_str("text/plain")
            .context("part mime")?,
    );
    let created: serde_json::Value = client
        .post(format!("{}/upload", server.base_url))
        .multipart(form)
        .send()
        .context("upload")?
        .error_for_status()
        .context("upload status")?
        .json()
        .context("parse upload response")?;
    let id = created
        .get("id")
        .and_then(|v| v.as_str())
        .context("upload response missing id")?
        .to_string();
    assert_eq!(
        created.get("name"),
        Some(&serde_json::Value::String("hello.txt".to_string()))
    );
    assert_eq!(created.get("size"), Some(&serde_json::json!(10)));

    // A multipart body without a `file` field is rejected.
    let form = multipart::Form::new().text("other", "x");
    let bad = client
        .post(format!("{}/upload", server.base_url))
        .multipart(form)
        .send()
        .context("upload without file field")?;
    assert_eq!(bad.status(), reqwest::StatusCode::BAD_REQUEST);

    // The listing now contains exactly the uploaded record.
    let files: Vec<serde_json::Value> = client
        .get(format!("{}/files", server.base_url))
        .send()
        .context("list")?
        .error_for_status()
        .context("list status")?
        .json()
        .context("parse list")?;
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].get("id").and_then(|v| v.as_str()), Some(&*id));

    // Metadata and content fetch.
    let meta: serde_json::Value = client
        .get(format!("{}/files/{}", server.base_url, id))
        .send()
        .context("get meta")?
        .error_for_status()
        .context("get meta status")?
        .json()
        .context("parse meta")?;
    assert_eq!(
        meta.get("content_type"),
        Some(&serde_json::Value::String("text/plain".to_string()))
    );

    let content = client
        .get(format!("{}/files/{}/content", server.base_url, id))
        .send()
        .context("get content")?
        .error_for_status()
        .context("get content status")?
        .bytes()
        .context("read content")?;
    assert_eq!(&content[..], b"hello dock");

    // Rename bumps last_modified and keeps the id.
    let before = meta
        .get("last_modified")
        .and_then(|v| v.as_str())
        .context("meta missing last_modified")?
        .to_string();
    let renamed: serde_json::Value = client
        .put(format!("{}/files/{}", server.base_url, id))
        .json(&serde_json::json!({"name": "renamed.txt"}))
        .send()
        .context("rename")?
        .error_for_status()
        .context("rename status")?
        .json()
        .context("parse rename response")?;
    assert_eq!(
        renamed.get("name"),
        Some(&serde_json::Value::String("renamed.txt".to_string()))
    );
    assert_eq!(renamed.get("id").and_then(|v| v.as_str()), Some(&*id));
    assert!(renamed.get("last_modified").and_then(|v| v.as_str()) >= Some(&*before));

    // Unknown ids are 404s.
    let missing = client
        .get(format!("{}/files/nope", server.base_url))
        .send()
        .context("get missing")?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    let missing = client
        .put(format!("{}/files/nope", server.base_url))
        .json(&serde_json::json!({"name": "x"}))
        .send()
        .context("rename missing")?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    // Delete succeeds once; the second delete of the same id fails remotely.
    let deleted = client
        .delete(format!("{}/files/{}", server.base_url, id))
        .send()
        .context("delete")?;
    assert_eq!(deleted.status(), reqwest::StatusCode::NO_CONTENT);

    let deleted_again = client
        .delete(format!("{}/files/{}", server.base_url, id))
        .send()
        .context("delete again")?;
    assert_eq!(deleted_again.status(), reqwest::StatusCode::NOT_FOUND);

    let files: Vec<serde_json::Value> = client
        .get(format!("{}/files", server.base_url))
        .send()
        .context("list after delete")?
        .error_for_status()
        .context("list after delete status")?
        .json()
        .context("parse list after delete")?;
    assert!(files.is_empty());

    Ok(())
}

#[test]
fn server_lists_files_in_upload_order() -> Result<()> {
    let server = common::spawn_server()?;
    let client = reqwest::blocking::Client::new();

    for name in ["first.bin", "second.bin", "third.bin"] {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(vec![0u8; 4]).file_name(name.to_string()),
        );
        client
            .post(format!("{}/upload", server.base_url))
            .multipart(form)
            .send()
            .with_context(|| format!("upload {}", name))?
            .error_for_status()
            .with_context(|| format!("upload {} status", name))?;
    }

    let files: Vec<serde_json::Value> = client
        .get(format!("{}/files", server.base_url))
        .send()
        .context("list")?
        .error_for_status()
        .context("list status")?
        .json()
        .context("parse list")?;

    let names: Vec<&str> = files
        .iter()
        .filter_map(|f| f.get("name").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(names, vec!["first.bin", "second.bin", "third.bin"]);

    Ok(())
}
