//! Signed document URLs
//!
//! HMAC-SHA256 over `path + "\n" + expiry`; the signature rides as a query
//! parameter and is verified on download. Time-bounded, no revocation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone)]
pub struct UrlSigner {
    key: Vec<u8>,
}

impl UrlSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    pub fn sign(&self, path: &str, expires_at: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any size");
        mac.update(format!("{}\n{}", path, expires_at).as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    pub fn verify(&self, path: &str, expires_at: i64, signature: &str) -> bool {
        let Ok(decoded) = URL_SAFE_NO_PAD.decode(signature) else {
            return false;
        };
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any size");
        mac.update(format!("{}\n{}", path, expires_at).as_bytes());
        mac.verify_slice(&decoded).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify() {
        let signer = UrlSigner::new("signing-key");
        let sig = signer.sign("documents/abc/passport.pdf", 1_900_000_000);
        assert!(signer.verify("documents/abc/passport.pdf", 1_900_000_000, &sig));
    }

    #[test]
    fn test_tampered_path_rejected() {
        let signer = UrlSigner::new("signing-key");
        let sig = signer.sign("documents/abc/passport.pdf", 1_900_000_000);
        assert!(!signer.verify("documents/xyz/passport.pdf", 1_900_000_000, &sig));
        assert!(!signer.verify("documents/abc/passport.pdf", 1_900_000_001, &sig));
    }

    #[test]
    fn test_garbage_signature_rejected() {
        let signer = UrlSigner::new("signing-key");
        assert!(!signer.verify("documents/abc/passport.pdf", 1_900_000_000, "not base64 !!"));
    }
}
