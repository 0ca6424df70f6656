use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use super::*;

pub(super) async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "timestamp": now_ts()}))
}

pub(super) async fn list_files(State(state): State<AppState>) -> Json<Vec<FileMeta>> {
    let files = state.files.read().await;
    Json(files.iter().map(|f| f.meta.clone()).collect())
}

pub(super) async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, Response> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(anyhow::anyhow!(e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or("unnamed").to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(anyhow::anyhow!(e)))?
            .to_vec();

        let id = new_file_id().map_err(internal_error)?;
        let ts = now_ts();
        let meta = FileMeta {
            id,
            name,
            size: bytes.len() as u64,
            last_modified: ts.clone(),
            content_type,
            created_at: ts,
        };

        let mut files = state.files.write().await;
        files.push(StoredFile {
            meta: meta.clone(),
            bytes,
        });

        return Ok((StatusCode::CREATED, Json(meta)).into_response());
    }

    Err(bad_request(anyhow::anyhow!("missing multipart field `file`")))
}

pub(super) async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FileMeta>, Response> {
    let files = state.files.read().await;
    files
        .iter()
        .find(|f| f.meta.id == id)
        .map(|f| Json(f.meta.clone()))
        .ok_or_else(not_found)
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct RenameRequest {
    name: String,
}

pub(super) async fn rename_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<FileMeta>, Response> {
    let mut files = state.files.write().await;
    let Some(file) = files.iter_mut().find(|f| f.meta.id == id) else {
        return Err(not_found());
    };

    // Empty names are accepted as-is; validation is not this server's job.
    file.meta.name = payload.name;
    file.meta.last_modified = now_ts();
    Ok(Json(file.meta.clone()))
}

pub(super) async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    let mut files = state.files.write().await;
    let before = files.len();
    files.retain(|f| f.meta.id != id);
    if files.len() == before {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

pub(super) async fn download_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let files = state.files.read().await;
    let Some(file) = files.iter().find(|f| f.meta.id == id) else {
        return Err(not_found());
    };

    let content_type = file
        .meta
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((
        [(header::CONTENT_TYPE, content_type)],
        axum::body::Bytes::from(file.bytes.clone()),
    )
        .into_response())
}
