//! Bundle production
//!
//! Concatenates a server executable and a model payload into one output
//! file, appends the trailer, and marks the result executable. The server
//! bytes stay at the start of the file so that the OS loader still accepts
//! the bundle as the original executable; the trailing payload and trailer
//! are ignored by the loader.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::BundleError;
use crate::trailer::{Trailer, TRAILER_SIZE};

/// Sizes recorded while producing a bundle, for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleReport {
    /// Byte length of the server executable.
    pub server_size: u64,
    /// Byte length of the model payload.
    pub payload_size: u64,
    /// Offset of the payload in the output; equals `server_size`.
    pub payload_offset: u64,
}

impl BundleReport {
    /// Total byte length of the produced bundle file.
    pub fn bundle_size(&self) -> u64 {
        self.server_size + self.payload_size + TRAILER_SIZE as u64
    }
}

/// Produce one bundle file from a server executable and a model payload.
///
/// Reads both inputs fully into memory, writes `[server][model][trailer]`
/// to `output_path` (truncating any existing file there), then adds execute
/// permissions to whatever mode bits the output already has.
///
/// Both inputs are read before the output is opened, so an input failure
/// never leaves a partial output behind. No write-to-temp-then-rename is
/// performed: a failure mid-write can leave a partial file at
/// `output_path`, and such a file must be treated as invalid.
pub fn bundle(
    server_path: impl AsRef<Path>,
    model_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<BundleReport, BundleError> {
    let server_path = server_path.as_ref();
    let model_path = model_path.as_ref();
    let output_path = output_path.as_ref();

    let server_data = read_input(server_path)?;
    let model_data = read_input(model_path)?;

    let report = BundleReport {
        server_size: server_data.len() as u64,
        payload_size: model_data.len() as u64,
        payload_offset: server_data.len() as u64,
    };
    let trailer = Trailer::new(report.payload_offset, report.payload_size);

    write_output(output_path, &server_data, &model_data, &trailer)?;
    set_executable(output_path)?;

    Ok(report)
}

fn read_input(path: &Path) -> Result<Vec<u8>, BundleError> {
    fs::read(path).map_err(|source| BundleError::InputNotFound {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(
    path: &Path,
    server_data: &[u8],
    model_data: &[u8],
    trailer: &Trailer,
) -> Result<(), BundleError> {
    write_parts(path, server_data, model_data, trailer).map_err(|source| {
        BundleError::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

// The writer is flushed and dropped before `bundle` moves on to the
// permission update, so the chmod observes a fully-written file.
fn write_parts(
    path: &Path,
    server_data: &[u8],
    model_data: &[u8],
    trailer: &Trailer,
) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(server_data)?;
    writer.write_all(model_data)?;
    trailer.encode(&mut writer)?;
    writer.flush()
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<(), BundleError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| BundleError::PermissionUpdate {
        path: path.to_path_buf(),
        source,
    })?;
    let mut perms = metadata.permissions();
    perms.set_mode(perms.mode() | 0o111);
    fs::set_permissions(path, perms).map_err(|source| BundleError::PermissionUpdate {
        path: path.to_path_buf(),
        source,
    })
}

// Execute bits have no meaning on non-unix filesystems.
#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<(), BundleError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_bundle_size() {
        let report = BundleReport {
            server_size: 10,
            payload_size: 5,
            payload_offset: 10,
        };
        assert_eq!(report.bundle_size(), 35);
    }

    #[test]
    fn test_missing_server_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.gguf");
        std::fs::write(&model, b"weights").unwrap();
        let out = dir.path().join("out.bin");

        let err = bundle(dir.path().join("no-such-server"), &model, &out).unwrap_err();
        match err {
            BundleError::InputNotFound { path, .. } => {
                assert_eq!(path, dir.path().join("no-such-server"));
            }
            other => panic!("expected InputNotFound, got {other:?}"),
        }
        assert!(!out.exists(), "no output may be created on input failure");
    }
}
