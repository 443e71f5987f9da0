//! CSV exports

use crate::client::ApiClient;
use crate::client::models::ExportFile;
use crate::client::normalize::require_id;
use crate::error::Result;

impl ApiClient {
    /// Download `GET /export/{module}`.
    ///
    /// The filename comes from `Content-Disposition`, else `{module}_export.csv`.
    pub async fn export(&self, module: &str) -> Result<ExportFile> {
        let module = require_id(module, "export module")?;
        let download = self.download(&format!("/export/{}", module)).await?;

        let filename = download
            .filename
            .unwrap_or_else(|| format!("{}_export.csv", module));

        Ok(ExportFile {
            filename,
            bytes: download.bytes,
        })
    }
}
