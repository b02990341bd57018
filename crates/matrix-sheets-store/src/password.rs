//! Salted password digests
//!
//! Stored as `<salt hex>$<sha256 hex>` where the digest covers
//! `salt || password`.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use rand::RngCore;
use sha2::{Digest as _, Sha256};

use crate::error::StoreError;

const SALT_LEN: usize = 16;

/// A salted SHA-256 digest of a password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest {
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl PasswordDigest {
    /// Digest `password` with a fresh random salt
    pub fn new(password: &str) -> Self {
        let mut salt = vec![0u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(salt, password)
    }

    fn with_salt(salt: Vec<u8>, password: &str) -> Self {
        let digest = hash(&salt, password);
        Self { salt, digest }
    }

    /// Check a candidate password
    pub fn verify(&self, password: &str) -> bool {
        let candidate = hash(&self.salt, password);
        // Compare every byte so timing does not depend on the first mismatch
        candidate.len() == self.digest.len()
            && candidate
                .iter()
                .zip(&self.digest)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

fn hash(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}${}", to_hex(&self.salt), to_hex(&self.digest))
    }
}

impl FromStr for PasswordDigest {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidDigest(s.to_string());
        let (salt, digest) = s.split_once('$').ok_or_else(invalid)?;
        Ok(Self {
            salt: from_hex(salt).ok_or_else(invalid)?,
            digest: from_hex(digest).ok_or_else(invalid)?,
        })
    }
}
