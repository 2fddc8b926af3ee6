//! Signed Access Tokens
//!
//! RS256 JWTs: the private key signs at login, the public key verifies on
//! every protected request. Claims are caller-defined; `exp` is mandatory and
//! checked with zero leeway.

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Token errors
///
/// Verification failures are deliberately coarse: callers answer 401 for
/// both variants.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to load signing key: {0}")]
    KeyLoad(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),

    #[error("Token expired")]
    Expired,

    #[error("Token invalid")]
    Invalid,
}

/// RSA key pair used to sign and verify access tokens
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    /// Load the key pair from PEM (PKCS#1 or PKCS#8 private, SPKI public).
    pub fn from_rsa_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, TokenError> {
        let encoding = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| TokenError::KeyLoad(format!("private key: {}", e)))?;
        let decoding = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| TokenError::KeyLoad(format!("public key: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;

        Ok(Self {
            encoding,
            decoding,
            validation,
        })
    }

    /// Sign claims into a compact JWT
    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        jsonwebtoken::decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys")
            .field("algorithm", &"RS256")
            .finish_non_exhaustive()
    }
}
