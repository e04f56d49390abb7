//! DSNs for single-file engines.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Component, DburlError, DburlResult};
use crate::fs::{FileKind, Filesystem, HEADER_LEN};
use crate::url::Url;

use super::{FileStyle, Generated};

const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";
const DUCKDB_MAGIC: &[u8] = b"DUCK";
const DUCKDB_MAGIC_OFFSET: usize = 8;

pub(crate) fn generate(
    style: &FileStyle,
    url: &Url,
    fs: &dyn Filesystem,
) -> DburlResult<Generated> {
    let path = file_path(url);
    let dsn = format!("{}{}", path, url.query().encode_with_prefix());

    match style {
        FileStyle::Opaque => Ok(Generated::dsn(dsn)),
        FileStyle::Sniff { default } => {
            if path.is_empty() {
                return Err(DburlError::Missing(Component::Path));
            }
            let engine = sniff_engine(fs, &path, default)?;
            Ok(Generated {
                dsn,
                open_driver: Some(engine),
                endpoint: None,
            })
        }
    }
}

fn file_path(url: &Url) -> String {
    if !url.opaque().is_empty() {
        return url.opaque().to_string();
    }
    format!("{}{}", url.parts.host_port(), url.path())
}

/// Detect the engine of a database file.
///
/// Unambiguous extensions decide on their own. Otherwise the header of an
/// existing file is inspected; a missing or unreadable file, or a header
/// that matches nothing, yields `default`.
///
/// ```rust
/// use dburl::dsn::sniff_engine;
/// use dburl::fs::MemoryFilesystem;
///
/// let fs = MemoryFilesystem::new().with_file("/data/app.db", b"SQLite format 3\0".to_vec());
/// assert_eq!(sniff_engine(&fs, "/data/app.db", "duckdb").unwrap(), "sqlite3");
/// assert_eq!(sniff_engine(&fs, "/data/new.db", "duckdb").unwrap(), "duckdb");
/// assert_eq!(sniff_engine(&fs, "/data/x.duckdb", "sqlite3").unwrap(), "duckdb");
/// ```
pub fn sniff_engine(fs: &dyn Filesystem, path: &str, default: &str) -> DburlResult<String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("duckdb" | "ddb") => return Ok("duckdb".to_string()),
        Some("sqlite" | "sqlite3") => return Ok("sqlite3".to_string()),
        _ => {}
    }

    if fs.kind(path) != Some(FileKind::File) {
        debug!(path, engine = default, "no file to sniff, using default engine");
        return Ok(default.to_string());
    }

    let header = match fs.read_header(path, HEADER_LEN) {
        Ok(header) => header,
        Err(err)
            if matches!(
                err.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
            ) =>
        {
            debug!(path, error = %err, engine = default, "unreadable file, using default engine");
            return Ok(default.to_string());
        }
        Err(err) => return Err(DburlError::probe(path, &err)),
    };

    let engine = if header.is_empty() || header.starts_with(SQLITE_MAGIC) {
        "sqlite3"
    } else if header.get(DUCKDB_MAGIC_OFFSET..DUCKDB_MAGIC_OFFSET + DUCKDB_MAGIC.len())
        == Some(DUCKDB_MAGIC)
    {
        "duckdb"
    } else {
        default
    };
    debug!(path, engine, "sniffed file header");
    Ok(engine.to_string())
}
