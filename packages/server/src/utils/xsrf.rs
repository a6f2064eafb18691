use rand::RngCore;
use sha2::{Digest, Sha256};

/// Mint a session-bound XSRF token: SHA-256 over the session id and 32
/// fresh random bytes, hex-encoded. The randomness makes the token
/// unguessable; the session id ties it to exactly one session.
pub fn mint_token(session_id: &str) -> String {
    let mut nonce = [0u8; 32];
    rand::rng().fill_bytes(&mut nonce);

    let mut hasher = Sha256::new();
    hasher.update(session_id.as_bytes());
    hasher.update(nonce);
    hex::encode(hasher.finalize())
}
