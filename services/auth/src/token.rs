//! Opaque bearer token generation

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};

const NONCE_LEN: usize = 16;

/// Issue a new opaque token for `email`
///
/// The token is the base64 encoding of `email:unix-millis:nonce`. Uniqueness
/// is probabilistic only.
pub fn generate_token(email: &str) -> String {
    let issued_at = Utc::now().timestamp_millis();
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect();

    STANDARD.encode(format!("{email}:{issued_at}:{nonce}"))
}
