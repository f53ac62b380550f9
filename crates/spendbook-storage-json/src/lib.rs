use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use spendbook_core::{CoreError, DocumentStore};
use tracing::debug;

const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed JSON persistence for ledger documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentStore;

impl JsonDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for JsonDocumentStore {
    fn load(&self, path: &Path) -> Result<Value, CoreError> {
        load_document(path)
    }

    fn save(&self, document: &Value, path: &Path) -> Result<(), CoreError> {
        save_document(document, path)
    }
}

/// Reads the JSON document at `path`. A missing file yields an empty object.
pub fn load_document(path: &Path) -> Result<Value, CoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "document missing; starting empty");
            return Ok(Value::Object(Map::new()));
        }
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&data)
        .map_err(|err| CoreError::Parse(format!("{}: {}", path.display(), err)))
}

/// Overwrites `path` with the pretty-printed document.
///
/// The document is staged next to the target and renamed into place, so the
/// previous content survives any failure before the rename. The parent
/// directory must already exist.
pub fn save_document(document: &Value, path: &Path) -> Result<(), CoreError> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|err| CoreError::Parse(err.to_string()))?;
    let tmp = tmp_path(path);
    if let Err(err) = write_staged(&tmp, &json).and_then(|()| fs::rename(&tmp, path)) {
        discard_staged(&tmp);
        return Err(err.into());
    }
    Ok(())
}

fn discard_staged(tmp: &Path) {
    if tmp.is_file() {
        if let Err(err) = fs::remove_file(tmp) {
            debug!(path = %tmp.display(), error = %err, "staging file left behind");
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_staged(path: &Path, data: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
