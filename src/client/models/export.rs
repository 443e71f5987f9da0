//! Export payloads

/// A CSV export as delivered by `GET /export/{module}`
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}
