//! Shared-secret gate for the billing screen

use sha2::{Digest, Sha256};
use tripstamp_types::{Error, Result};

/// SHA-256 hex digest of a secret
pub fn hash_secret(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}

/// Check an entered secret against the configured hash
pub fn verify_secret(configured_sha256: Option<&str>, attempt: &str) -> Result<()> {
    let expected = configured_sha256.ok_or_else(|| {
        Error::Unauthorized(
            "billing secret is not configured; set it with `tripstamp config --set-billing-secret`"
                .to_string(),
        )
    })?;

    if hash_secret(attempt).eq_ignore_ascii_case(expected.trim()) {
        Ok(())
    } else {
        Err(Error::Unauthorized("wrong billing secret".to_string()))
    }
}
