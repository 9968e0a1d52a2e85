//! Capability-scoped file access for the file-backed adapters.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};

/// Open the directory containing `path` and return it with the file name.
fn open_parent(path: &Path) -> io::Result<(Dir, OsString)> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "path must name a file")
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name.to_os_string()))
}

/// Read `path` as UTF-8 text.
pub(crate) fn read_to_string(path: &Path) -> io::Result<String> {
    let (dir, file_name) = open_parent(path)?;
    dir.read_to_string(Path::new(&file_name))
}

/// Read `path` as UTF-8 text, treating a missing file as `None`.
pub(crate) fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error),
    }
}

/// Replace the contents of `path`.
pub(crate) fn write(path: &Path, contents: &[u8]) -> io::Result<()> {
    let (dir, file_name) = open_parent(path)?;
    dir.write(Path::new(&file_name), contents)
}
