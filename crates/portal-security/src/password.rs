//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Password too weak")]
    TooWeak,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Random throwaway password assigned at provisioning; the user picks
    /// their own through the recovery link.
    pub fn generate_initial() -> String {
        use rand::{distr::Alphanumeric, Rng};
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect()
    }

    /// Strength gate applied when a user chooses a password (reset flow).
    pub fn check_strength(password: &str) -> Result<(), PasswordError> {
        let entropy = zxcvbn::zxcvbn(password, &[]);
        if entropy.score() < zxcvbn::Score::Three {
            return Err(PasswordError::TooWeak);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = PasswordService::hash("Tr3s-bon-mot-de-passe").unwrap();
        assert!(PasswordService::verify("Tr3s-bon-mot-de-passe", &hash).unwrap());
        assert!(!PasswordService::verify("autre", &hash).unwrap());
    }

    #[test]
    fn test_strength_rejects_trivial_password() {
        assert!(PasswordService::check_strength("azerty").is_err());
        assert!(PasswordService::check_strength("corridor-mauve-83-fenetre").is_ok());
    }
}
