use std::path::Path;

use crate::error::ApiError;

use super::RemoteClient;

impl RemoteClient {
    /// `POST /upload` as multipart field `file`; returns the stored `file_path`.
    pub fn upload_file(&self, path: &Path) -> Result<String, ApiError> {
        if !path.is_file() {
            return Err(ApiError::validation(format!(
                "Not a file: {}",
                path.display()
            )));
        }
        let form = reqwest::blocking::multipart::Form::new()
            .file("file", path)
            .map_err(|err| ApiError::validation(format!("Cannot read {}: {}", path.display(), err)))?;

        let req = self.client.post(self.url("/upload")).multipart(form);
        let resp = self.send(self.authed(req)?, "upload")?;
        let env = self.read_envelope::<serde_json::Value>(resp, "upload", "Upload failed.")?;
        match env.file_path {
            Some(p) if !p.trim().is_empty() => {
                tracing::info!(file = %path.display(), stored = %p, "uploaded");
                Ok(p)
            }
            _ => Err(ApiError::api("Upload failed.")),
        }
    }
}
