//! One-way password hashing for generated users.
//!
//! Encoded form: `pbkdf2-sha256$<cost>$<salt>$<hash>` with base64 (no
//! padding) salt and hash. The cost is the base-2 logarithm of the
//! PBKDF2 round count.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::CryptoError;

pub const HASH_SCHEME: &str = "pbkdf2-sha256";
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;
pub const HASH_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 32;

/// Secret-hashing collaborator.
pub trait PasswordHasher {
    fn hash(&self, plaintext: &str, cost: u32) -> Result<String, CryptoError>;
}

/// PBKDF2-HMAC-SHA256 with a fresh random salt per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pbkdf2Hasher;

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, plaintext: &str, cost: u32) -> Result<String, CryptoError> {
        let salt = generate_salt();
        let digest = derive(plaintext, &salt, cost)?;
        Ok(format!(
            "{HASH_SCHEME}${cost}${}${}",
            STANDARD_NO_PAD.encode(salt),
            STANDARD_NO_PAD.encode(digest)
        ))
    }
}

/// Check `plaintext` against an encoded hash in constant time.
pub fn verify_password(plaintext: &str, encoded: &str) -> Result<bool, CryptoError> {
    let mut parts = encoded.split('$');
    let (Some(scheme), Some(cost), Some(salt), Some(hash), None) =
        (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(CryptoError::MalformedHash);
    };
    if scheme != HASH_SCHEME {
        return Err(CryptoError::MalformedHash);
    }

    let cost: u32 = cost.parse().map_err(|_| CryptoError::MalformedHash)?;
    let salt = STANDARD_NO_PAD.decode(salt).map_err(|_| CryptoError::MalformedHash)?;
    let expected = STANDARD_NO_PAD.decode(hash).map_err(|_| CryptoError::MalformedHash)?;

    let actual = derive(plaintext, &salt, cost)?;
    Ok(actual.as_slice().ct_eq(expected.as_slice()).into())
}

fn derive(plaintext: &str, salt: &[u8], cost: u32) -> Result<[u8; HASH_LENGTH], CryptoError> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(CryptoError::InvalidCost(cost));
    }
    let mut out = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(plaintext.as_bytes(), salt, 1u32 << cost, &mut out);
    Ok(out)
}

/// Generate a cryptographically random salt
fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_against_same_password() {
        let encoded = Pbkdf2Hasher.hash("Demo@1234", 6).unwrap();
        assert!(encoded.starts_with("pbkdf2-sha256$6$"));
        assert!(verify_password("Demo@1234", &encoded).unwrap());
        assert!(!verify_password("demo@1234", &encoded).unwrap());
    }

    #[test]
    fn same_password_gets_fresh_salt() {
        let a = Pbkdf2Hasher.hash("Demo@1234", 4).unwrap();
        let b = Pbkdf2Hasher.hash("Demo@1234", 4).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn plaintext_never_stored() {
        let encoded = Pbkdf2Hasher.hash("Demo@1234", 4).unwrap();
        assert!(!encoded.contains("Demo@1234"));
    }

    #[test]
    fn cost_out_of_range_rejected() {
        assert!(matches!(Pbkdf2Hasher.hash("x", 3), Err(CryptoError::InvalidCost(3))));
        assert!(matches!(Pbkdf2Hasher.hash("x", 32), Err(CryptoError::InvalidCost(32))));
    }

    #[test]
    fn malformed_hash_rejected() {
        assert!(matches!(verify_password("x", "plain"), Err(CryptoError::MalformedHash)));
        assert!(matches!(
            verify_password("x", "bcrypt$10$abc$def"),
            Err(CryptoError::MalformedHash)
        ));
        assert!(matches!(
            verify_password("x", "pbkdf2-sha256$ten$abc$def"),
            Err(CryptoError::MalformedHash)
        ));
    }
}
