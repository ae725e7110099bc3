use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::CliError;

/// Write to `path` through a sibling temp file, or to stdout without one.
pub fn emit(path: Option<&Path>, data: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => write_bytes_atomic(path, data),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }
    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, CliError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| {
            CliError::InvalidConfig(format!("invalid output path '{}'", path.display()))
        })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

/// Persist the directory entry after a rename.
fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_sits_next_to_the_target() {
        let tmp = temp_path(Path::new("out/samples.rs")).expect("temp path");
        assert_eq!(tmp, PathBuf::from("out/samples.rs.tmp"));
        assert!(temp_path(Path::new("/")).is_err());
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = std::env::temp_dir().join(format!("sampleforge-out-{}", std::process::id()));
        let path = dir.join("nested").join("fixtures.json");
        write_bytes_atomic(&path, b"first").expect("write");
        write_bytes_atomic(&path, b"second").expect("write");
        assert_eq!(std::fs::read(&path).expect("read"), b"second");
        assert!(!path.with_file_name("fixtures.json.tmp").exists());
        let _ = std::fs::remove_dir_all(dir);
    }
}
