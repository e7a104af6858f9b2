use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

// @module: File and directory utilities

// @const: UTF-8 byte order mark some subtitle editors prepend
const BOM: char = '\u{feff}';

// @const: Mode of a newly written output file
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a whole text file, dropping a leading byte order mark
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> io::Result<String> {
        let content = fs::read_to_string(path)?;
        match content.strip_prefix(BOM) {
            Some(stripped) => Ok(stripped.to_string()),
            None => Ok(content),
        }
    }

    /// Write a string to a file atomically.
    ///
    /// The content goes to a temporary file in the target directory which is
    /// then renamed over `path`. A failed write leaves `path` untouched.
    /// The result keeps the permissions of the file it replaces; a new file
    /// gets `0644` on unix.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> io::Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;

        let permissions = fs::metadata(path)
            .ok()
            .map(|meta| meta.permissions())
            .or_else(new_file_permissions);
        if let Some(permissions) = permissions {
            temp.as_file().set_permissions(permissions)?;
        }

        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Whether two paths name the same existing file
    pub fn is_same_file<P1: AsRef<Path>, P2: AsRef<Path>>(a: P1, b: P2) -> bool {
        match (fs::canonicalize(a), fs::canonicalize(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
