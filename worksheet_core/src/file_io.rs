//! # File I/O Module
//!
//! Reading and writing request files, problem-set dumps and rendered
//! documents.
//!
//! - **Atomic saves**: write to `.tmp`, sync, rename, so a crash never
//!   leaves a truncated file behind
//! - **Version validation**: request files carry a schema version
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use worksheet_core::file_io::{load_request, save_request};
//! use worksheet_core::problems::Operator;
//! use worksheet_core::worksheet::WorksheetRequest;
//!
//! let request = WorksheetRequest::new(Operator::Addition).with_grid_pages(3);
//! save_request(&request, Path::new("addition.json")).unwrap();
//! let loaded = load_request(Path::new("addition.json")).unwrap();
//! assert_eq!(loaded, request);
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{SheetError, SheetResult};
use crate::worksheet::{ProblemSet, RenderedDocument, WorksheetRequest, SCHEMA_VERSION};

/// Write bytes atomically via a temp file in the same directory.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> SheetResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut tmp_file = File::create(&tmp_path).map_err(io_error("create temp file", &tmp_path))?;
    tmp_file
        .write_all(bytes)
        .and_then(|()| tmp_file.sync_all())
        .map_err(io_error("write temp file", &tmp_path))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_error("rename to final", path)(e)
    })
}

fn io_error(operation: &'static str, at: &Path) -> impl FnOnce(io::Error) -> SheetError {
    let at = at.display().to_string();
    move |e| SheetError::file_error(operation, at, e.to_string())
}

/// Save a request as pretty JSON.
pub fn save_request(request: &WorksheetRequest, path: &Path) -> SheetResult<()> {
    save_json(request, path)
}

/// Load a request file and check its schema version.
///
/// # Errors
///
/// * `FileError` if the file cannot be read
/// * `SerializationError` on invalid JSON, unknown operators or bad fields
/// * `VersionMismatch` if the file was written by an incompatible version
pub fn load_request(path: &Path) -> SheetResult<WorksheetRequest> {
    let request: WorksheetRequest = load_json(path)?;
    validate_version(&request.version)?;
    Ok(request)
}

/// Save generated problem sets so they can be re-rendered later.
pub fn save_problem_sets(sets: &[ProblemSet], path: &Path) -> SheetResult<()> {
    save_json(sets, path)
}

/// Load problem sets written by [`save_problem_sets`].
///
/// Records are not checked here; the layout engine rejects malformed ones.
pub fn load_problem_sets(path: &Path) -> SheetResult<Vec<ProblemSet>> {
    load_json(path)
}

/// Write every document into `dir`, creating it if needed.
///
/// Returns the written paths in document order.
pub fn save_documents(dir: &Path, docs: &[RenderedDocument]) -> SheetResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .map_err(|e| SheetError::file_error("create directory", dir.display().to_string(), e.to_string()))?;

    docs.iter()
        .map(|doc| {
            let path = dir.join(&doc.file_name);
            write_atomic(&path, &doc.bytes)?;
            Ok(path)
        })
        .collect()
}

fn save_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> SheetResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SheetError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(path, json.as_bytes())
}

fn load_json<T: DeserializeOwned>(path: &Path) -> SheetResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| SheetError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| SheetError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// `major.minor.patch`, all numeric
fn schema_parts(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let parsed = (parts.next()??, parts.next()??, parts.next()??);
    parts.next().is_none().then_some(parsed)
}

/// Accept files from the same major version. While the schema is 0.x a
/// newer minor may break the format, so those are refused too.
fn validate_version(file_version: &str) -> SheetResult<()> {
    let (current_major, current_minor, _) = schema_parts(SCHEMA_VERSION)
        .ok_or_else(|| SheetError::internal(format!("malformed schema version {SCHEMA_VERSION}")))?;

    let compatible = match schema_parts(file_version) {
        Some((major, _, _)) if major != current_major => false,
        Some((0, minor, _)) => minor <= current_minor,
        Some(_) => true,
        None => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(SheetError::version_mismatch(file_version, SCHEMA_VERSION))
    }
}
