// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use crate::error::SorrelError;

/// Ensure an output directory exists, creating it if necessary
///
/// Conversion reruns must land in the same task folder so that the
/// descriptor and annotation directory stay paired; an existing
/// directory is reused rather than suffixed.
///
/// # Arguments
///
/// * `directory` - Path to the output directory
pub fn ensure_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, SorrelError> {
    let directory = directory.as_ref();

    if !directory.exists() {
        std::fs::create_dir_all(directory)
            .map_err(|err| SorrelError::DirError(err.to_string()))?;
    }

    Ok(directory.to_path_buf())
}

/// Collect sorted file paths from a directory filtered by extension
///
/// Paths are returned in ascending filename order so batch runs
/// enumerate inputs deterministically.
///
/// # Arguments
///
/// * `directory` - Path to directory containing files
/// * `valid_ext` - Only include files with one of these extensions
///
/// # Examples
///
/// ```no_run
/// use sorrel_core::ut::path::collect_file_paths;
/// use sorrel_core::constant::MASK_IMAGE_FORMATS;
/// let files = collect_file_paths("directory/", MASK_IMAGE_FORMATS.as_slice());
/// ```
pub fn collect_file_paths<P>(directory: P, valid_ext: &[&str]) -> Result<Vec<PathBuf>, SorrelError>
where
    P: AsRef<Path> + ToString,
{
    let message = directory.to_string();

    let mut files: Vec<PathBuf> = std::fs::read_dir(directory)
        .map_err(|_| SorrelError::DirError(message))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.to_lowercase())
                    .is_some_and(|ext| valid_ext.contains(&ext.as_str()))
        })
        .collect();

    files.sort_unstable();

    Ok(files)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_collect_file_paths() {
        let base = std::env::temp_dir().join("SORREL_TEST_COLLECT_FILE_PATHS");
        std::fs::create_dir_all(&base).unwrap();

        std::fs::write(base.join("b.png"), b"").unwrap();
        std::fs::write(base.join("a.png"), b"").unwrap();
        std::fs::write(base.join("c.txt"), b"").unwrap();

        let files = collect_file_paths(base.to_str().unwrap(), &["png"]).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name().unwrap(), "a.png");
        assert_eq!(files[1].file_name().unwrap(), "b.png");

        std::fs::remove_dir_all(&base).unwrap();
    }

    #[test]
    fn test_collect_file_paths_missing_dir() {
        assert!(collect_file_paths("does_not_exist/", &["png"]).is_err());
    }

    #[test]
    fn test_ensure_directory() {
        let base = std::env::temp_dir().join("SORREL_TEST_ENSURE_DIRECTORY");

        let created = ensure_directory(&base).unwrap();
        assert!(created.exists());

        // Reuse, not suffix
        let reused = ensure_directory(&base).unwrap();
        assert_eq!(created, reused);

        std::fs::remove_dir_all(&base).unwrap();
    }
}
