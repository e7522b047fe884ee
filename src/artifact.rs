//! Binary persistence of a trained network.
//!
//! Layout: an 8-byte magic header followed by the postcard encoding of the
//! value.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ArtifactError;

/// Leading bytes of every artifact file.
pub const MAGIC: &[u8; 8] = b"FLAPNET1";

/// Encodes `value` into artifact bytes.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ArtifactError> {
    let mut bytes = MAGIC.to_vec();
    bytes.extend(postcard::to_allocvec(value)?);
    Ok(bytes)
}

/// Decodes artifact bytes produced by [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8], path: &Path) -> Result<T, ArtifactError> {
    let payload = bytes
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| ArtifactError::BadHeader(path.to_path_buf()))?;
    Ok(postcard::from_bytes(payload)?)
}

/// Writes `value` to `path`, replacing any previous artifact.
pub fn save<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    let bytes = encode(value)?;
    std::fs::write(path, bytes).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a value previously written by [`save`].
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ArtifactError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes, path)
}
