//! Salted one-way password digests.

use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult};

/// Domain tag mixed into every digest so a credential digest can never be
/// confused with a plain content hash of the same bytes.
const DOMAIN_TAG: &[u8] = b"stockroom-credential-v1";

const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

/// Salted BLAKE3 digest of a password.
///
/// The plaintext only ever flows through [`PasswordHash::new`] and
/// [`PasswordHash::verify`]; it is never stored or compared directly.
/// Serialized as `"{salt_hex}${digest_hex}"`. `Debug` output is redacted so
/// the stored digest cannot leak into logs.
///
/// Single-round BLAKE3 is not a memory-hard KDF; a networked deployment
/// should replace this with an iterated scheme at the transport boundary.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash {
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

impl PasswordHash {
    /// Hash a password under a fresh random salt.
    pub fn new(password: &str) -> Self {
        let salt: [u8; SALT_LEN] = rand::thread_rng().r#gen();
        let digest = digest(&salt, password);
        Self { salt, digest }
    }

    /// Recompute the digest of `candidate` under this hash's salt and
    /// compare digests.
    pub fn verify(&self, candidate: &str) -> bool {
        digest(&self.salt, candidate) == self.digest
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; DIGEST_LEN] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DOMAIN_TAG);
    hasher.update(b":");
    hasher.update(salt);
    hasher.update(b":");
    hasher.update(password.as_bytes());
    *hasher.finalize().as_bytes()
}

impl FromStr for PasswordHash {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DomainError::validation("malformed password hash");
        let (salt_hex, digest_hex) = s.split_once('$').ok_or_else(malformed)?;

        let mut salt = [0u8; SALT_LEN];
        hex::decode_to_slice(salt_hex, &mut salt).map_err(|_| malformed())?;
        let mut digest = [0u8; DIGEST_LEN];
        hex::decode_to_slice(digest_hex, &mut digest).map_err(|_| malformed())?;

        Ok(Self { salt, digest })
    }
}

impl TryFrom<String> for PasswordHash {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<PasswordHash> for String {
    fn from(value: PasswordHash) -> Self {
        format!("{}${}", hex::encode(value.salt), hex::encode(value.digest))
    }
}

impl core::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}
