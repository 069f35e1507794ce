//! Source tree traversal

use std::path::{Path, PathBuf};
use log::{debug, info};
use walkdir::WalkDir;

use crate::errors::{MediaError, MediaResult};
use crate::extractor::{extension_of, FormatRegistry};

fn walk_media_files<'a>(dir: &Path, registry: &'a FormatRegistry)
    -> impl Iterator<Item = MediaResult<walkdir::DirEntry>> + 'a {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) => {
                let wanted = entry.file_type().is_file()
                    && registry.is_supported(&extension_of(entry.path()));
                wanted.then_some(Ok(entry))
            },
            Err(e) => Some(Err(MediaError::GenericError(format!("Failed to walk directory: {}", e)))),
        })
}

/// Counts supported media files below `dir` and their total size in bytes
pub fn count_media_files(dir: &Path, registry: &FormatRegistry) -> MediaResult<(usize, u64)> {
    let mut count = 0;
    let mut total_size = 0;

    for entry in walk_media_files(dir, registry) {
        let entry = entry?;
        let metadata = entry
            .metadata()
            .map_err(|e| MediaError::GenericError(format!("Failed to stat {}: {}", entry.path().display(), e)))?;
        count += 1;
        total_size += metadata.len();
    }

    info!("Found {} files ({} bytes) in {}", count, total_size, dir.display());
    Ok((count, total_size))
}

/// All supported media files below `dir`, sorted by path
pub fn collect_media_files(dir: &Path, registry: &FormatRegistry) -> MediaResult<Vec<PathBuf>> {
    let mut files = walk_media_files(dir, registry)
        .map(|entry| entry.map(walkdir::DirEntry::into_path))
        .collect::<MediaResult<Vec<_>>>()?;
    files.sort();

    debug!("Collected {} media files", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_walk_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("a.JPG"), b"1234").unwrap();
        fs::write(dir.path().join("nested/b.cr2"), b"123456").unwrap();
        fs::write(dir.path().join("clip.mp4"), b"xx").unwrap();
        fs::write(dir.path().join("notes.txt"), b"xx").unwrap();

        let registry = FormatRegistry::builtin();
        let (count, size) = count_media_files(dir.path(), registry).unwrap();
        assert_eq!(count, 2);
        assert_eq!(size, 10);

        let files = collect_media_files(dir.path(), registry).unwrap();
        assert_eq!(files, vec![dir.path().join("a.JPG"), dir.path().join("nested/b.cr2")]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = count_media_files(&dir.path().join("gone"), FormatRegistry::builtin());
        assert!(result.is_err());
    }
}
