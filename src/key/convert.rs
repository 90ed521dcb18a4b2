use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::purpose::local::{LocalVersion, SymmetricKey};
use crate::PasetoError;

#[cfg(any(feature = "v3-public", feature = "v4-public"))]
use crate::purpose::public::{PublicKey, SecretKey};

#[cfg(feature = "v3-public")]
use crate::version::V3;
#[cfg(feature = "v4-public")]
use crate::version::V4;

impl<V: LocalVersion> SymmetricKey<V> {
    /// Generate a random local key from the given entropy source
    pub fn generate(rng: &mut (impl RngCore + CryptoRng)) -> Result<Self, PasetoError> {
        let mut key = Zeroizing::new([0; 32]);
        rng.try_fill_bytes(&mut *key)
            .map_err(|_| PasetoError::EntropyError)?;
        Ok(Self { key })
    }

    /// Create a local key from seed material.
    ///
    /// The seed must be at least 32 bytes long. Only the first 32 bytes are
    /// used.
    pub fn from_seed(seed: &[u8]) -> Result<Self, PasetoError> {
        let seed = seed.get(..32).ok_or(PasetoError::SeedTooShort)?;
        let mut key = Zeroizing::new([0; 32]);
        key.copy_from_slice(seed);
        Ok(Self { key })
    }

    /// Create a local key from raw bytes
    pub fn from_bytes(key: [u8; 32]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Get the raw bytes from this key
    pub fn to_bytes(&self) -> [u8; 32] {
        *self.key
    }
}

#[cfg(feature = "v3-public")]
impl SecretKey<V3> {
    /// Decode a secret key from a raw P-384 scalar
    pub fn from_bytes(sk: &[u8]) -> Result<Self, PasetoError> {
        let key = p384::ecdsa::SigningKey::from_slice(sk).map_err(|_| PasetoError::InvalidKey)?;
        Ok(Self { key })
    }

    /// Generate a random V3 secret key from the given entropy source
    pub fn generate(rng: &mut (impl RngCore + CryptoRng)) -> Result<Self, PasetoError> {
        // rejection sampling. a 48 byte draw falls outside the scalar field
        // with negligible probability, so this loop all but never repeats
        let mut scalar = Zeroizing::new([0; 48]);
        loop {
            rng.try_fill_bytes(&mut *scalar)
                .map_err(|_| PasetoError::EntropyError)?;
            if let Ok(key) = p384::ecdsa::SigningKey::from_slice(&*scalar) {
                return Ok(Self { key });
            }
        }
    }

    /// Get the corresponding V3 public key for this V3 secret key
    pub fn public_key(&self) -> PublicKey<V3> {
        PublicKey {
            key: self.key.verifying_key().to_owned(),
        }
    }
}

#[cfg(feature = "v3-public")]
impl PublicKey<V3> {
    /// Decode a public key from a SEC1 encoded P-384 point, compressed or not
    pub fn from_sec1_bytes(pk: &[u8]) -> Result<Self, PasetoError> {
        let key =
            p384::ecdsa::VerifyingKey::from_sec1_bytes(pk).map_err(|_| PasetoError::InvalidKey)?;
        Ok(Self { key })
    }
}

#[cfg(feature = "v4-public")]
impl SecretKey<V4> {
    /// Create a secret key from a 32 byte Ed25519 seed
    pub fn from_secret_key(key: [u8; 32]) -> Self {
        Self {
            key: ed25519_dalek::SigningKey::from_bytes(&key),
        }
    }

    /// Decode an Ed25519 secret keypair (seed then public key, 64 bytes).
    ///
    /// Fails if the public half does not belong to the secret half.
    pub fn from_keypair_bytes(key: &[u8]) -> Result<Self, PasetoError> {
        let key: [u8; 64] = key.try_into().map_err(|_| PasetoError::InvalidKey)?;
        let key = ed25519_dalek::SigningKey::from_keypair_bytes(&key)
            .map_err(|_| PasetoError::InvalidKey)?;
        Ok(Self { key })
    }

    /// Generate a random V4 secret key from the given entropy source
    pub fn generate(rng: &mut (impl RngCore + CryptoRng)) -> Result<Self, PasetoError> {
        let mut seed = Zeroizing::new([0; 32]);
        rng.try_fill_bytes(&mut *seed)
            .map_err(|_| PasetoError::EntropyError)?;
        Ok(Self {
            key: ed25519_dalek::SigningKey::from_bytes(&seed),
        })
    }

    /// Get the corresponding V4 public key for this V4 secret key
    pub fn public_key(&self) -> PublicKey<V4> {
        PublicKey {
            key: self.key.verifying_key(),
        }
    }
}

#[cfg(feature = "v4-public")]
impl PublicKey<V4> {
    /// Decode a public key from 32 raw Ed25519 bytes
    pub fn from_public_key(key: &[u8]) -> Result<Self, PasetoError> {
        let key: [u8; 32] = key.try_into().map_err(|_| PasetoError::InvalidKey)?;
        let key =
            ed25519_dalek::VerifyingKey::from_bytes(&key).map_err(|_| PasetoError::InvalidKey)?;
        Ok(Self { key })
    }
}
