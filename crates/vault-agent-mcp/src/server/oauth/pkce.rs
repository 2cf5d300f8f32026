//! PKCE (Proof Key for Code Exchange) verification.
//!
//! Implements S256 and plain code challenge verification per RFC 7636.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// The only challenge method the authorization endpoint accepts.
pub const METHOD_S256: &str = "S256";

/// Accepted at verification time for completeness; never issued.
pub const METHOD_PLAIN: &str = "plain";

/// Verify a PKCE code challenge.
///
/// For `S256`, computes `BASE64URL(SHA256(code_verifier))` and compares it to
/// the stored challenge. The comparison is on the encoded form: unpadded
/// base64url has a single canonical representation, so string equality is
/// exact. Unknown methods fail verification without erroring.
#[must_use]
pub fn verify(code_verifier: &str, code_challenge: &str, method: &str) -> bool {
    match method {
        METHOD_S256 => {
            let hash = Sha256::digest(code_verifier.as_bytes());
            URL_SAFE_NO_PAD.encode(hash) == code_challenge
        }
        METHOD_PLAIN => code_verifier == code_challenge,
        _ => false,
    }
}
