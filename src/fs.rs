//! Filesystem probing used to resolve unix socket paths and sniff files.
//!
//! Probing is the only non-pure step of DSN generation, so it goes through
//! the [`Filesystem`] trait. [`StdFilesystem`] reads the real disk;
//! [`MemoryFilesystem`] is an in-memory stand-in for tests.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read};

use tracing::trace;

/// Maximum number of header bytes read when sniffing a file.
pub const HEADER_LEN: usize = 64;

/// The kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// A directory.
    Directory,
    /// A unix domain socket.
    Socket,
    /// A regular file.
    File,
    /// Anything else (device, fifo, ...).
    Other,
}

/// Source of filesystem metadata.
pub trait Filesystem: Send + Sync + fmt::Debug {
    /// Get the kind of the entry at `path`.
    fn stat(&self, path: &str) -> io::Result<FileKind>;

    /// Read up to `len` bytes from the start of the file at `path`.
    fn read_header(&self, path: &str, len: usize) -> io::Result<Vec<u8>>;

    /// Get the kind of the entry, treating any error as "no entry".
    fn kind(&self, path: &str) -> Option<FileKind> {
        match self.stat(path) {
            Ok(kind) => {
                trace!(path, ?kind, "stat");
                Some(kind)
            }
            Err(err) => {
                trace!(path, error = %err, "stat failed");
                None
            }
        }
    }
}

/// Filesystem backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn stat(&self, path: &str) -> io::Result<FileKind> {
        let file_type = std::fs::metadata(path)?.file_type();
        if file_type.is_dir() {
            return Ok(FileKind::Directory);
        }
        if file_type.is_file() {
            return Ok(FileKind::File);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileTypeExt;
            if file_type.is_socket() {
                return Ok(FileKind::Socket);
            }
        }
        Ok(FileKind::Other)
    }

    fn read_header(&self, path: &str, len: usize) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len);
        std::fs::File::open(path)?
            .take(len as u64)
            .read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Filesystem backed by a map of paths.
///
/// ```rust
/// use dburl::fs::{FileKind, Filesystem, MemoryFilesystem};
///
/// let fs = MemoryFilesystem::new()
///     .with_dir("/var/run/postgresql")
///     .with_socket("/var/run/mysqld/mysqld.sock");
/// assert_eq!(fs.stat("/var/run/postgresql").unwrap(), FileKind::Directory);
/// assert!(fs.stat("/nope").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    entries: HashMap<String, (FileKind, Vec<u8>)>,
}

impl MemoryFilesystem {
    /// Create an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory.
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        self.entries
            .insert(path.into(), (FileKind::Directory, Vec::new()));
        self
    }

    /// Add a unix socket.
    pub fn with_socket(mut self, path: impl Into<String>) -> Self {
        self.entries.insert(path.into(), (FileKind::Socket, Vec::new()));
        self
    }

    /// Add a regular file with contents.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.entries
            .insert(path.into(), (FileKind::File, contents.into()));
        self
    }
}

impl Filesystem for MemoryFilesystem {
    fn stat(&self, path: &str) -> io::Result<FileKind> {
        self.entries
            .get(path)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn read_header(&self, path: &str, len: usize) -> io::Result<Vec<u8>> {
        match self.entries.get(path) {
            Some((FileKind::File, contents)) => Ok(contents[..contents.len().min(len)].to_vec()),
            Some(_) => Err(io::Error::from(io::ErrorKind::InvalidInput)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}

/// Join path segments, dropping empty and `.` segments.
///
/// A leading `/` on the first non-empty segment is kept.
pub fn join_clean(segments: &[&str]) -> String {
    let absolute = segments
        .iter()
        .find(|s| !s.is_empty())
        .is_some_and(|s| s.starts_with('/'));
    let joined = segments
        .iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/");
    if absolute {
        format!("/{}", joined)
    } else {
        joined
    }
}

fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "",
    }
}

/// Split `path` into a unix socket file and the database name after it.
///
/// Walks from the leaf upward and stops at the first prefix that is a socket.
/// When none is, the whole path is the socket and the database name is empty.
///
/// ```rust
/// use dburl::fs::{MemoryFilesystem, resolve_socket};
///
/// let fs = MemoryFilesystem::new().with_socket("/run/mysqld/mysqld.sock");
/// assert_eq!(
///     resolve_socket(&fs, "/run/mysqld/mysqld.sock/mydb"),
///     ("/run/mysqld/mysqld.sock".to_string(), "mydb".to_string())
/// );
/// ```
pub fn resolve_socket(fs: &dyn Filesystem, path: &str) -> (String, String) {
    let mut dir = path;
    while !dir.is_empty() && dir != "/" && dir != "." {
        if fs.kind(dir) == Some(FileKind::Socket) {
            let rest = path[dir.len()..].trim_start_matches('/');
            return (dir.to_string(), rest.to_string());
        }
        dir = parent(dir);
    }
    (path.to_string(), String::new())
}

/// Split `path` into a socket directory, an optional `:port` suffix on that
/// directory, and the database name after it.
///
/// ```rust
/// use dburl::fs::{MemoryFilesystem, resolve_dir};
///
/// let fs = MemoryFilesystem::new().with_dir("/var/run/postgresql");
/// assert_eq!(
///     resolve_dir(&fs, "/var/run/postgresql:6666/mydb"),
///     (
///         "/var/run/postgresql".to_string(),
///         "6666".to_string(),
///         "mydb".to_string()
///     )
/// );
/// ```
pub fn resolve_dir(fs: &dyn Filesystem, path: &str) -> (String, String, String) {
    let mut dir = path;
    while !dir.is_empty() && dir != "/" && dir != "." {
        let slash = dir.rfind('/');
        let (candidate, port) = match dir.rfind(':') {
            Some(colon) if slash.is_none_or(|s| colon > s) => (&dir[..colon], &dir[colon + 1..]),
            _ => (dir, ""),
        };

        if fs.kind(candidate) == Some(FileKind::Directory) {
            let rest = path[candidate.len()..].trim_start_matches(':');
            let rest = rest.strip_prefix(port).unwrap_or(rest);
            return (
                candidate.to_string(),
                port.to_string(),
                rest.trim_start_matches('/').to_string(),
            );
        }

        dir = match slash {
            Some(s) => &dir[..s],
            None => "",
        };
    }
    (path.to_string(), String::new(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake() -> MemoryFilesystem {
        MemoryFilesystem::new()
            .with_dir("/var/run/postgresql")
            .with_socket("/var/run/mysqld/mysqld.sock")
            .with_file("/data/app.db", b"SQLite format 3\0".to_vec())
    }

    #[test]
    fn test_join_clean() {
        assert_eq!(join_clean(&["", "/var/run//x/"]), "/var/run/x");
        assert_eq!(join_clean(&["mysqld.sock", ""]), "mysqld.sock");
        assert_eq!(join_clean(&["host", "./db"]), "host/db");
        assert_eq!(join_clean(&["", ""]), "");
    }

    #[test]
    fn test_resolve_socket_found() {
        assert_eq!(
            resolve_socket(&fake(), "/var/run/mysqld/mysqld.sock/mydb"),
            ("/var/run/mysqld/mysqld.sock".into(), "mydb".into())
        );
        assert_eq!(
            resolve_socket(&fake(), "/var/run/mysqld/mysqld.sock"),
            ("/var/run/mysqld/mysqld.sock".into(), "".into())
        );
    }

    #[test]
    fn test_resolve_socket_keeps_full_remainder() {
        assert_eq!(
            resolve_socket(&fake(), "/var/run/mysqld/mysqld.sock/a/b"),
            ("/var/run/mysqld/mysqld.sock".into(), "a/b".into())
        );
    }

    #[test]
    fn test_resolve_socket_fallback() {
        assert_eq!(
            resolve_socket(&fake(), "/no/such/socket/db"),
            ("/no/such/socket/db".into(), "".into())
        );
        assert_eq!(
            resolve_socket(&fake(), "mysqld.sock"),
            ("mysqld.sock".into(), "".into())
        );
    }

    #[test]
    fn test_resolve_socket_ignores_directories() {
        assert_eq!(
            resolve_socket(&fake(), "/var/run/postgresql/db"),
            ("/var/run/postgresql/db".into(), "".into())
        );
    }

    #[test]
    fn test_resolve_dir() {
        let fs = fake();
        assert_eq!(
            resolve_dir(&fs, "/var/run/postgresql"),
            ("/var/run/postgresql".into(), "".into(), "".into())
        );
        assert_eq!(
            resolve_dir(&fs, "/var/run/postgresql:7777"),
            ("/var/run/postgresql".into(), "7777".into(), "".into())
        );
        assert_eq!(
            resolve_dir(&fs, "/var/run/postgresql/mydb"),
            ("/var/run/postgresql".into(), "".into(), "mydb".into())
        );
        assert_eq!(
            resolve_dir(&fs, "/var/run/postgresql:6666/mydb"),
            ("/var/run/postgresql".into(), "6666".into(), "mydb".into())
        );
    }

    #[test]
    fn test_resolve_dir_fallback() {
        assert_eq!(
            resolve_dir(&fake(), "/really/bad/path"),
            ("/really/bad/path".into(), "".into(), "".into())
        );
    }

    #[test]
    fn test_memory_read_header_is_bounded() {
        let fs = fake();
        assert_eq!(fs.read_header("/data/app.db", 6).unwrap(), b"SQLite");
        assert!(fs.read_header("/var/run/postgresql", 6).is_err());
    }

    #[test]
    fn test_std_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.db");
        std::fs::write(&file, b"SQLite format 3\0rest").unwrap();

        let fs = StdFilesystem;
        let dir_str = dir.path().to_str().unwrap();
        let file_str = file.to_str().unwrap();
        assert_eq!(fs.stat(dir_str).unwrap(), FileKind::Directory);
        assert_eq!(fs.stat(file_str).unwrap(), FileKind::File);
        assert_eq!(fs.read_header(file_str, 6).unwrap(), b"SQLite");
        assert!(fs.stat(&format!("{}/missing", dir_str)).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_std_filesystem_socket() {
        let dir = tempfile::tempdir().unwrap();
        let sock = dir.path().join("db.sock");
        let _listener = std::os::unix::net::UnixListener::bind(&sock).unwrap();

        let sock_str = sock.to_str().unwrap();
        assert_eq!(StdFilesystem.stat(sock_str).unwrap(), FileKind::Socket);
        assert_eq!(
            resolve_socket(&StdFilesystem, &format!("{}/mydb", sock_str)),
            (sock_str.to_string(), "mydb".to_string())
        );
    }
}
