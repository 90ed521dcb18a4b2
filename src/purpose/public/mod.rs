//! PASETO public signatures
//!
//! Example use cases:
//! * Transparent claims provided by a third party.
//!   + e.g. Authentication and authorization protocols (OAuth 2, OIDC).

use cipher::Unsigned;
use generic_array::ArrayLength;

use crate::{key::KeyType, version::Version, Bytes, PasetoError};

/// A public key for verifying `public` tokens
pub type PublicKey<V> = crate::key::Key<V, Public>;
/// A secret key for signing `public` tokens
pub type SecretKey<V> = crate::key::Key<V, Secret>;

/// PASETO public signatures
///
/// Example use cases:
/// * Transparent claims provided by a third party.
///   + e.g. Authentication and authorization protocols (OAuth 2, OIDC).
#[derive(Debug, Default)]
pub struct Public;

/// Secret signing keys
#[derive(Debug, Default)]
pub struct Secret;

impl super::Purpose for Public {
    const HEADER: &'static str = "public";
}

#[cfg(feature = "v3-public")]
mod v3;

#[cfg(feature = "v4-public")]
mod v4;

/// General information about a PASETO signing version
pub trait PublicVersion: Version {
    #[doc(hidden)]
    type InnerPublicKey: Clone;
    #[doc(hidden)]
    type InnerSecretKey: Clone;

    /// Length of the signature this signing version produces
    type SignatureSize: ArrayLength<u8>;

    #[doc(hidden)]
    fn sign(
        sk: &Self::InnerSecretKey,
        message: &[u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<Bytes<Self::SignatureSize>, PasetoError>;

    #[doc(hidden)]
    fn verify(
        pk: &Self::InnerPublicKey,
        message: &[u8],
        footer: &[u8],
        implicit: &[u8],
        signature: &[u8],
    ) -> Result<(), PasetoError>;
}

impl<V: PublicVersion> KeyType<V> for Public {
    type InnerKeyType = V::InnerPublicKey;
}

impl<V: PublicVersion> KeyType<V> for Secret {
    type InnerKeyType = V::InnerSecretKey;
}

impl<V: PublicVersion> SecretKey<V> {
    /// Sign the message into a token. The message rides in the token in the
    /// clear; the signature covers message, footer and implicit assertion.
    pub fn sign(
        &self,
        message: &[u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<String, PasetoError> {
        let sig = V::sign(&self.key, message, footer, implicit)?;

        let mut body =
            Vec::with_capacity(message.len() + <V::SignatureSize as Unsigned>::USIZE);
        body.extend_from_slice(message);
        body.extend_from_slice(&sig);

        Ok(crate::tokens::encode::<V, Public>(&body, footer))
    }
}

impl<V: PublicVersion> PublicKey<V> {
    /// Verify that this token was signed with the associated secret key, and
    /// return the message.
    ///
    /// `footer` and `implicit` must match the values used at signing,
    /// byte for byte.
    pub fn verify(
        &self,
        token: &str,
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        let mut raw = crate::tokens::decode::<V, Public>(token, footer)?;

        let sig_len = <V::SignatureSize as Unsigned>::USIZE;
        if raw.len() < sig_len {
            return Err(PasetoError::InvalidLayout);
        }

        let message_len = raw.len() - sig_len;
        let (message, sig) = raw.split_at(message_len);
        V::verify(&self.key, message, footer, implicit, sig)?;

        raw.truncate(message_len);
        Ok(raw)
    }
}
