//! Bundle reading
//!
//! The consumer side of the bundle format: read the trailer from the last
//! 20 bytes of a file, validate the magic, then read the payload region it
//! describes. A bundled runtime uses [`self_payload`] to pull the model out
//! of its own executable.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::BundleError;
use crate::trailer::{Trailer, TRAILER_SIZE};

/// Read and validate the trailer of a bundle file.
pub fn read_trailer(path: impl AsRef<Path>) -> Result<Trailer, BundleError> {
    let mut file = File::open(path.as_ref())?;
    let (trailer, _) = trailer_from(&mut file)?;
    Ok(trailer)
}

/// Read the payload embedded in a bundle file.
pub fn extract_payload(path: impl AsRef<Path>) -> Result<Vec<u8>, BundleError> {
    let mut file = File::open(path.as_ref())?;
    let (trailer, file_len) = trailer_from(&mut file)?;

    let in_bounds = trailer
        .payload_offset
        .checked_add(trailer.payload_size)
        .and_then(|end| end.checked_add(TRAILER_SIZE as u64))
        .is_some_and(|end| end <= file_len);
    if !in_bounds {
        return Err(BundleError::NotABundle {
            reason: format!(
                "trailer describes payload at {}..{} but the file is only {} bytes",
                trailer.payload_offset,
                trailer.payload_offset.saturating_add(trailer.payload_size),
                file_len
            ),
        });
    }

    file.seek(SeekFrom::Start(trailer.payload_offset))?;
    let mut payload = vec![0u8; trailer.payload_size as usize];
    file.read_exact(&mut payload)?;
    Ok(payload)
}

/// Extract the payload embedded in the currently running executable.
pub fn self_payload() -> Result<Vec<u8>, BundleError> {
    let exe = std::env::current_exe()?;
    extract_payload(exe)
}

fn trailer_from(file: &mut File) -> Result<(Trailer, u64), BundleError> {
    let file_len = file.seek(SeekFrom::End(0))?;
    if file_len < TRAILER_SIZE as u64 {
        return Err(BundleError::NotABundle {
            reason: format!(
                "file is {} bytes, shorter than the {}-byte trailer",
                file_len, TRAILER_SIZE
            ),
        });
    }

    file.seek(SeekFrom::End(-(TRAILER_SIZE as i64)))?;
    let trailer = Trailer::decode(file)?;
    trailer.validate()?;
    Ok((trailer, file_len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trailer::BUNDLE_MAGIC;

    #[test]
    fn test_short_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        std::fs::write(&path, b"tiny").unwrap();

        assert!(matches!(
            read_trailer(&path),
            Err(BundleError::NotABundle { .. })
        ));
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notabundle.bin");
        // 20 trailing bytes that decode to a trailer with the wrong magic
        let mut data = b"some leading bytes".to_vec();
        data.extend_from_slice(&Trailer { magic: 0, ..Trailer::new(0, 0) }.to_bytes());
        std::fs::write(&path, &data).unwrap();

        assert!(matches!(
            read_trailer(&path),
            Err(BundleError::NotABundle { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_payload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oob.bin");
        // Valid magic, but the claimed payload does not fit in the file
        let mut data = vec![0u8; 8];
        data.extend_from_slice(&Trailer::new(0, 1 << 32).to_bytes());
        std::fs::write(&path, &data).unwrap();

        let trailer = read_trailer(&path).unwrap();
        assert_eq!(trailer.magic, BUNDLE_MAGIC);
        assert!(matches!(
            extract_payload(&path),
            Err(BundleError::NotABundle { .. })
        ));
    }
}
