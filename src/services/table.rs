use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

use crate::utils::AppError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads a headed CSV table into typed rows. `Ok(None)` when the file is absent.
pub async fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, AppError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    parse_table(&bytes).map(Some)
}

pub fn parse_table<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, AppError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
