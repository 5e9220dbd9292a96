//! Stored credentials
//!
//! A credential is never kept in plaintext. The default scheme is a salted
//! Argon2id hash in PHC string format. The legacy character-shift scheme is
//! reversible and offers no protection at all; it exists only so data
//! produced by the old shift encoding can still be verified.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// Offset used by the legacy shift encoding
pub const DEFAULT_SHIFT_OFFSET: u32 = 3;

/// How new credentials are derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "scheme")]
pub enum CredentialScheme {
    /// Salted Argon2id hash (one-way)
    #[default]
    Argon2id,
    /// Shift every character forward by `offset` (reversible, insecure)
    LegacyShift { offset: u32 },
}

impl CredentialScheme {
    pub fn name(&self) -> &'static str {
        match self {
            CredentialScheme::Argon2id => "argon2id",
            CredentialScheme::LegacyShift { .. } => "legacy-shift",
        }
    }
}

/// The stored form of an account password
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Argon2id { phc: String },
    LegacyShift { encoded: String, offset: u32 },
}

impl Credential {
    /// Derive the stored form of `raw` under `scheme`
    pub fn derive(raw: &str, scheme: CredentialScheme) -> Result<Self> {
        match scheme {
            CredentialScheme::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);
                let phc = Argon2::default()
                    .hash_password(raw.as_bytes(), &salt)
                    .map_err(|e| Error::credential(format!("failed to hash password: {}", e)))?
                    .to_string();
                Ok(Credential::Argon2id { phc })
            }
            CredentialScheme::LegacyShift { offset } => Ok(Credential::LegacyShift {
                encoded: shift::encode(raw, offset)?,
                offset,
            }),
        }
    }

    /// True iff `candidate` is the password this credential was derived from
    pub fn verify(&self, candidate: &str) -> bool {
        match self {
            Credential::Argon2id { phc } => match PasswordHash::new(phc) {
                Ok(parsed) => Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            },
            Credential::LegacyShift { encoded, offset } => shift::encode(candidate, *offset)
                .map(|candidate| &candidate == encoded)
                .unwrap_or(false),
        }
    }

    pub fn scheme(&self) -> CredentialScheme {
        match self {
            Credential::Argon2id { .. } => CredentialScheme::Argon2id,
            Credential::LegacyShift { offset, .. } => CredentialScheme::LegacyShift { offset: *offset },
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("scheme", &self.scheme().name())
            .finish_non_exhaustive()
    }
}

/// Legacy character-shift encoding
pub mod shift {
    use super::{Error, Result};

    pub fn encode(raw: &str, offset: u32) -> Result<String> {
        raw.chars()
            .map(|c| {
                (c as u32)
                    .checked_add(offset)
                    .and_then(char::from_u32)
                    .ok_or_else(|| Error::credential("password contains an unencodable character"))
            })
            .collect()
    }

    pub fn decode(encoded: &str, offset: u32) -> Result<String> {
        encoded
            .chars()
            .map(|c| {
                (c as u32)
                    .checked_sub(offset)
                    .and_then(char::from_u32)
                    .ok_or_else(|| Error::credential("stored credential is not shift-encoded"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_verify() {
        let credential = Credential::derive("pass1234", CredentialScheme::Argon2id).unwrap();
        assert!(credential.verify("pass1234"));
        assert!(!credential.verify("pass1235"));
        assert!(!credential.verify(""));
    }

    #[test]
    fn test_argon2_is_salted() {
        let a = Credential::derive("pass1234", CredentialScheme::Argon2id).unwrap();
        let b = Credential::derive("pass1234", CredentialScheme::Argon2id).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_argon2_never_stores_plaintext() {
        match Credential::derive("pass1234", CredentialScheme::Argon2id).unwrap() {
            Credential::Argon2id { phc } => {
                assert!(!phc.contains("pass1234"));
                assert!(phc.starts_with("$argon2id$"));
            }
            other => panic!("unexpected credential {:?}", other),
        }
    }

    #[test]
    fn test_shift_round_trip() {
        let encoded = shift::encode("pass1234", DEFAULT_SHIFT_OFFSET).unwrap();
        assert_eq!(encoded, "sdvv4567");
        assert_eq!(shift::decode(&encoded, DEFAULT_SHIFT_OFFSET).unwrap(), "pass1234");
    }

    #[test]
    fn test_legacy_verify() {
        let scheme = CredentialScheme::LegacyShift { offset: DEFAULT_SHIFT_OFFSET };
        let credential = Credential::derive("pass1234", scheme).unwrap();
        assert!(credential.verify("pass1234"));
        assert!(!credential.verify("wrong"));
        assert_eq!(credential.scheme(), scheme);
    }

    #[test]
    fn test_shift_rejects_out_of_range() {
        assert!(shift::encode(&char::MAX.to_string(), 1).is_err());
        assert!(shift::decode("\u{0}", 1).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let scheme = CredentialScheme::LegacyShift { offset: DEFAULT_SHIFT_OFFSET };
        let credential = Credential::derive("pass1234", scheme).unwrap();
        let printed = format!("{:?}", credential);
        assert!(!printed.contains("sdvv4567"));
        assert!(printed.contains("legacy-shift"));
    }
}
