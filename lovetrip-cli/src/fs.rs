//! Filesystem helpers built on `cap-std` and `camino`.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

use crate::CliError;

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Return whether a path exists and is a regular file.
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing_file(
    path: &Utf8Path,
    field: &'static str,
) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}
