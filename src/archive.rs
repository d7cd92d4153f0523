//! Archive codec
//!
//! Packs a directory tree into a gzip-compressed tar blob and unpacks such a
//! blob back into a directory tree. Directory entries and regular files are
//! preserved (including unix mode bits); symlinks and special files are
//! skipped on both sides. Entries are written in sorted order so the same
//! tree always produces the same archive layout.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tar::EntryType;

use crate::error::{HobbesError, HobbesResult};

/// Gzip level 6: good balance of speed vs ratio
const COMPRESSION_LEVEL: u32 = 6;

/// Pack `source_dir` into a gzip-compressed tar archive at `archive_path`.
pub fn pack(source_dir: &Path, archive_path: &Path) -> HobbesResult<()> {
    if !source_dir.is_dir() {
        return Err(HobbesError::DirectoryNotFound {
            path: source_dir.to_path_buf(),
        });
    }

    let file = File::create(archive_path)?;
    let encoder = GzEncoder::new(file, Compression::new(COMPRESSION_LEVEL));
    let mut builder = tar::Builder::new(encoder);

    append_tree(&mut builder, source_dir, Path::new(""))?;

    let encoder = builder.into_inner()?;
    encoder.finish()?;
    Ok(())
}

/// Recursively append `dir` to the archive under the relative path
/// `relative`, children sorted by file name.
fn append_tree<W: io::Write>(
    builder: &mut tar::Builder<W>,
    dir: &Path,
    relative: &Path,
) -> HobbesResult<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let rel = relative.join(entry.file_name());
        // file_type() does not follow symlinks, so links never masquerade
        // as their targets here
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            builder.append_dir(&rel, &path)?;
            append_tree(builder, &path, &rel)?;
        } else if file_type.is_file() {
            builder.append_path_with_name(&path, &rel)?;
        }
        // symlinks and special files are outside the archive contract
    }
    Ok(())
}

/// Unpack the archive at `archive_path` into `dest_dir`, creating it if
/// absent.
///
/// Entries are consumed sequentially; directories are created as encountered
/// (or on demand for parents), regular files are restored with their original
/// content and mode, and any other entry type is skipped silently. A failure
/// on any entry fails the whole operation.
pub fn unpack(archive_path: &Path, dest_dir: &Path) -> HobbesResult<()> {
    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = tar::Archive::new(decoder);

    fs::create_dir_all(dest_dir)?;

    for entry in archive.entries()? {
        let mut entry = entry?;
        let rel = entry.path()?.into_owned();
        let dest = dest_dir.join(&rel);

        match entry.header().entry_type() {
            EntryType::Directory => {
                fs::create_dir_all(&dest)?;
            }
            EntryType::Regular => {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out = File::create(&dest)?;
                io::copy(&mut entry, &mut out)?;
                restore_mode(&entry, &dest)?;
            }
            _ => {}
        }
    }
    Ok(())
}

#[cfg(unix)]
fn restore_mode<R: io::Read>(entry: &tar::Entry<R>, dest: &Path) -> HobbesResult<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = entry.header().mode()?;
    fs::set_permissions(dest, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn restore_mode<R: io::Read>(_entry: &tar::Entry<R>, _dest: &Path) -> HobbesResult<()> {
    Ok(())
}
