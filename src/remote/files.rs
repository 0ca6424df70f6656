//! File-store operations over the wire contract.

use reqwest::blocking::multipart;

use super::*;
use crate::model::{FileId, FileRecord};
use crate::panel::FileService;

#[derive(Debug, serde::Serialize)]
struct RenameRequest<'a> {
    name: &'a str,
}

impl RemoteClient {
    pub fn health(&self) -> Result<()> {
        let resp = self
            .client
            .get(self.url("/health"))
            .send()
            .context("health request")?;
        let _ = self.ensure_ok(resp, "health")?;
        Ok(())
    }

    pub fn list_files(&self) -> Result<Vec<FileRecord>> {
        let resp = self
            .client
            .get(self.url("/files"))
            .send()
            .context("list files request")?;
        let records: Vec<FileRecord> = self
            .ensure_ok(resp, "list files")?
            .json()
            .context("parse file list")?;
        Ok(records)
    }

    pub fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<()> {
        let part = multipart::Part::bytes(bytes).file_name(name.to_string());
        let form = multipart::Form::new().part("file", part);

        let resp = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .context("upload request")?;
        let _ = self.ensure_ok(resp, "upload")?;
        Ok(())
    }

    pub fn delete_file(&self, id: &FileId) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("/files/{}", id)))
            .send()
            .context("delete request")?;
        let _ = self.ensure_ok(resp, "delete")?;
        Ok(())
    }

    pub fn rename_file(&self, id: &FileId, name: &str) -> Result<()> {
        let resp = self
            .client
            .put(self.url(&format!("/files/{}", id)))
            .json(&RenameRequest { name })
            .send()
            .context("rename request")?;
        let _ = self.ensure_ok(resp, "rename")?;
        Ok(())
    }

    pub fn get_file(&self, id: &FileId) -> Result<FileRecord> {
        let resp = self
            .client
            .get(self.url(&format!("/files/{}", id)))
            .send()
            .context("get file request")?;
        let record: FileRecord = self
            .ensure_ok(resp, "get file")?
            .json()
            .context("parse file record")?;
        Ok(record)
    }

    pub fn download_file(&self, id: &FileId) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(self.url(&format!("/files/{}/content", id)))
            .send()
            .context("download request")?;
        let bytes = self
            .ensure_ok(resp, "download")?
            .bytes()
            .context("read download bytes")?;
        Ok(bytes.to_vec())
    }
}

impl FileService for RemoteClient {
    fn list_files(&self) -> Result<Vec<FileRecord>> {
        RemoteClient::list_files(self)
    }

    fn upload_file(&self, name: &str, bytes: Vec<u8>) -> Result<()> {
        RemoteClient::upload_file(self, name, bytes)
    }

    fn delete_file(&self, id: &FileId) -> Result<()> {
        RemoteClient::delete_file(self, id)
    }

    fn rename_file(&self, id: &FileId, name: &str) -> Result<()> {
        RemoteClient::rename_file(self, id, name)
    }
}
