use sha2::{Digest, Sha256};

/// Compute the digest of a serialized output artefact.
///
/// `digest = sha256( 0x00 || artefact_bytes )`
///
/// The prefix keeps artefact digests apart from any other sha256 use of the
/// same bytes. Two runs over the same snapshot and configuration must produce
/// the same digest.
pub fn artefact_digest(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update([0x00]);
    hasher.update(bytes);
    hasher.finalize().into()
}

/// Lowercase hex form of [`artefact_digest`], as printed in run logs.
pub fn artefact_digest_hex(bytes: &[u8]) -> String {
    hex::encode(artefact_digest(bytes))
}
