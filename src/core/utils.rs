//! Stateless string, encoding and file utilities exposed to templates.
//!
//! Nothing here touches the [`Environment`](super::environment::Environment);
//! every function is fully determined by its inputs, apart from
//! [`file_exist_or_default`] which works on the filesystem.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use sha2::{Digest, Sha224, Sha256, Sha512};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use super::error::UtilityError;

/// True when `s` is empty or whitespace only.
pub fn is_empty(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn is_not_empty(s: &str) -> bool {
    !is_empty(s)
}

pub fn contains(s: &str, substr: &str) -> bool {
    s.contains(substr)
}

pub fn contains_case_insensitive(s: &str, substr: &str) -> bool {
    s.to_lowercase().contains(&substr.to_lowercase())
}

/// True when `s` contains at least one character of `chars`.
pub fn contains_any(s: &str, chars: &str) -> bool {
    s.chars().any(|c| chars.contains(c))
}

pub fn has_prefix(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

pub fn has_suffix(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

pub fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

/// Removes every leading and trailing character found in `cutset`.
pub fn trim<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_matches(|c: char| cutset.contains(c))
}

pub fn trim_left<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_start_matches(|c: char| cutset.contains(c))
}

pub fn trim_right<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_end_matches(|c: char| cutset.contains(c))
}

pub fn trim_space(s: &str) -> &str {
    s.trim()
}

/// Standard, padded base64.
pub fn base64_encode(s: &str) -> String {
    BASE64.encode(s.as_bytes())
}

/// Decodes standard base64; invalid UTF-8 in the payload is replaced
/// rather than rejected.
pub fn base64_decode(s: &str) -> Result<String, UtilityError> {
    let bytes = BASE64.decode(s)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Digest algorithms accepted by [`hash`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 5] = [
        HashAlgorithm::Md5,
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha224,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha512,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Lowercase hex digest of `input`.
    pub fn hex_digest(&self, input: &[u8]) -> String {
        match self {
            Self::Md5 => format!("{:x}", md5::compute(input)),
            Self::Sha1 => hex::encode(sha1::Sha1::digest(input)),
            Self::Sha224 => hex::encode(Sha224::digest(input)),
            Self::Sha256 => hex::encode(Sha256::digest(input)),
            Self::Sha512 => hex::encode(Sha512::digest(input)),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = UtilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == lower)
            .ok_or_else(|| UtilityError::UnsupportedHash(s.to_string()))
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hashes `input` with the named algorithm (case-insensitive).
pub fn hash(input: &str, algorithm: &str) -> Result<String, UtilityError> {
    let algorithm: HashAlgorithm = algorithm.parse()?;
    Ok(algorithm.hex_digest(input.as_bytes()))
}

/// Consecutive integers from `start` to `end` inclusive; empty when
/// `start > end`.
pub fn sequence(start: i64, end: i64) -> Vec<i64> {
    (start..=end).collect()
}

/// Seeds `destination` from `default_path` when it does not exist yet.
///
/// Contents and permission bits are copied; ownership and extended
/// attributes are not. Returns `true` both when the destination was already
/// there and after a successful copy.
pub fn file_exist_or_default(
    destination: impl AsRef<Path>,
    default_path: impl AsRef<Path>,
) -> Result<bool, UtilityError> {
    let destination = destination.as_ref();
    let default_path = default_path.as_ref();

    match fs::metadata(destination) {
        Ok(_) => {
            debug!(destination = %destination.display(), "Destination exists, nothing to seed");
            return Ok(true);
        }
        Err(err) if err.kind() != io::ErrorKind::NotFound => {
            debug!(
                destination = %destination.display(),
                error = %err,
                "Destination not accessible, leaving it untouched"
            );
            return Ok(true);
        }
        Err(_) => {}
    }

    fs::metadata(default_path).map_err(|source| UtilityError::SeedSource {
        path: default_path.to_path_buf(),
        source,
    })?;

    // fs::copy carries the permission bits over as well
    let bytes = fs::copy(default_path, destination).map_err(|source| UtilityError::SeedCopy {
        from: default_path.to_path_buf(),
        to: destination.to_path_buf(),
        source,
    })?;

    info!(
        destination = %destination.display(),
        default = %default_path.display(),
        bytes,
        "Seeded destination from default file"
    );
    Ok(true)
}
