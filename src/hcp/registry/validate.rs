//! Local checks run before any registry request is sent

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, TfeError};

/// Parse a version string as semver
pub fn version(input: &str) -> Result<semver::Version> {
    semver::Version::parse(input.trim())
        .map_err(|e| TfeError::Validation(format!("'{}' is not a semantic version: {}", input, e)))
}

/// Require a SHA-256 sum: 64 hexadecimal characters, normalised to lowercase
pub fn shasum(input: &str) -> Result<String> {
    let sum = input.trim();
    if sum.len() == 64 && sum.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(sum.to_ascii_lowercase())
    } else {
        Err(TfeError::Validation(format!(
            "'{}' is not a SHA-256 sum (expected 64 hex characters)",
            input
        )))
    }
}

/// Hex SHA-256 of a file's content
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| TfeError::Config(format!("failed to open {}: {}", path.display(), e)))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_version() {
        assert_eq!(version("1.2.3").unwrap(), semver::Version::new(1, 2, 3));
        assert!(version(" 0.1.0-beta.1 ").is_ok());
        assert_eq!(version("1.2").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(version("v1.2.3").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_shasum() {
        let sum = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
        assert_eq!(shasum(sum).unwrap(), sum.to_ascii_lowercase());
        assert_eq!(shasum("abc").unwrap_err().kind(), ErrorKind::Validation);
        let not_hex = "z".repeat(64);
        assert_eq!(shasum(&not_hex).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_sha256_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        std::fs::write(&empty, b"").unwrap();
        assert_eq!(
            sha256_file(&empty).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let err = sha256_file(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
