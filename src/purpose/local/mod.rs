//! PASETO shared-key authenticated encryption
//!
//! Example use cases:
//! * Tamper-proof, short-lived immutable data stored on client machines.
//!   + e.g. "remember me on this computer" cookies, which secure a unique ID that are used in a database lookup upon successful validation to provide long-term user authentication across multiple browsing sessions.

use cipher::{KeyInit, StreamCipher, Unsigned};
use digest::Mac;
use generic_array::ArrayLength;
use rand::{CryptoRng, RngCore};

use crate::{key::KeyType, purpose::Purpose, version::Version, Bytes, PasetoError};

/// A symmetric key for `local` encrypted tokens
pub type SymmetricKey<V> = crate::key::Key<V, Local>;

/// PASETO shared-key authenticated encryption
///
/// Example use cases:
/// * Tamper-proof, short-lived immutable data stored on client machines.
///   + e.g. "remember me on this computer" cookies, which secure a unique ID that are used in a database lookup upon successful validation to provide long-term user authentication across multiple browsing sessions.
#[derive(Debug, Default)]
pub struct Local;

impl Purpose for Local {
    const HEADER: &'static str = "local";
}

#[cfg(feature = "v3-local")]
mod v3;

#[cfg(feature = "v4-local")]
mod v4;

#[cfg(feature = "v4x")]
mod v4x;

impl<V: LocalVersion> KeyType<V> for Local {
    type InnerKeyType = zeroize::Zeroizing<[u8; 32]>;
}

/// General information about a PASETO encryption version
pub trait LocalVersion: Version {
    /// The size of the authentication tag that this encryption version produces
    type TagSize: ArrayLength<u8>;

    #[doc(hidden)]
    fn encrypt(
        key: &[u8; 32],
        nonce: &[u8],
        message: &mut [u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> Bytes<Self::TagSize>;

    #[doc(hidden)]
    fn decrypt(
        key: &[u8; 32],
        nonce: &[u8],
        message: &mut [u8],
        tag: &[u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<(), PasetoError>;
}

#[allow(dead_code)]
pub(crate) trait GenericMac<OutputSize: ArrayLength<u8>> {
    type Mac: digest::Mac<OutputSize = OutputSize> + KeyInit;
}

#[allow(dead_code)]
pub(crate) trait Kdf<OutputSize: ArrayLength<u8>> {
    fn mac<const N: usize>(key: &[u8], info: [&[u8]; N]) -> Bytes<OutputSize>;
}

#[allow(dead_code)]
pub(crate) trait GenericCipher {
    type KeyIvPair: ArrayLength<u8>;
    type Stream: cipher::StreamCipher;
    fn key_iv_init(pair: Bytes<Self::KeyIvPair>) -> Self::Stream;
}

/// The standard versions differ only in which KDF, cipher and MAC they plug
/// into the same dataflow.
#[allow(dead_code)]
pub(crate) trait LocalEncryption: LocalVersion {
    type AuthKeySize: ArrayLength<u8>;
    type Cipher: GenericCipher;
    type Mac: Kdf<Self::AuthKeySize>
        + Kdf<<Self::Cipher as GenericCipher>::KeyIvPair>
        + GenericMac<Self::TagSize>;
}

pub(crate) const NONCE_LEN: usize = 32;

#[allow(dead_code)]
fn generic_digest<V: LocalEncryption>(
    auth_key: &Bytes<V::AuthKeySize>,
    nonce: &[u8],
    ciphertext: &[u8],
    footer: &[u8],
    implicit: &[u8],
) -> Bytes<V::TagSize> {
    let mut mac =
        <<V::Mac as GenericMac<V::TagSize>>::Mac as digest::Mac>::new_from_slice(auth_key)
            .expect("ak should be a valid mac key");
    crate::pae::pre_auth_encode(
        [
            &[
                V::PASETO_HEADER.as_bytes(),
                b".",
                Local::HEADER.as_bytes(),
                b".",
            ],
            &[nonce],
            &[ciphertext],
            &[footer],
            &[implicit],
        ],
        crate::pae::Mac(&mut mac),
    );
    mac.finalize().into_bytes()
}

#[allow(dead_code)]
pub(crate) fn generic_encrypt<V: LocalEncryption>(
    key: &[u8; 32],
    nonce: &[u8],
    message: &mut [u8],
    footer: &[u8],
    implicit: &[u8],
) -> Bytes<V::TagSize> {
    let ek_iv_pair = <V::Mac as Kdf<<V::Cipher as GenericCipher>::KeyIvPair>>::mac(
        key,
        [b"paseto-encryption-key", nonce],
    );

    let ak = <V::Mac as Kdf<V::AuthKeySize>>::mac(key, [b"paseto-auth-key-for-aead", nonce]);

    <V::Cipher as GenericCipher>::key_iv_init(ek_iv_pair).apply_keystream(message);

    generic_digest::<V>(&ak, nonce, message, footer, implicit)
}

#[allow(dead_code)]
pub(crate) fn generic_decrypt<V: LocalEncryption>(
    key: &[u8; 32],
    nonce: &[u8],
    message: &mut [u8],
    tag: &[u8],
    footer: &[u8],
    implicit: &[u8],
) -> Result<(), PasetoError> {
    let ek_iv_pair = <V::Mac as Kdf<<V::Cipher as GenericCipher>::KeyIvPair>>::mac(
        key,
        [b"paseto-encryption-key", nonce],
    );

    let ak = <V::Mac as Kdf<V::AuthKeySize>>::mac(key, [b"paseto-auth-key-for-aead", nonce]);

    let tag2 = generic_digest::<V>(&ak, nonce, message, footer, implicit);

    if !crate::tokens::secure_compare(tag, &tag2) {
        return Err(PasetoError::CryptoError);
    }

    <V::Cipher as GenericCipher>::key_iv_init(ek_iv_pair).apply_keystream(message);
    Ok(())
}

impl<V: LocalVersion> SymmetricKey<V> {
    /// Encrypt the payload into a token, drawing the nonce from OS entropy.
    ///
    /// The footer is carried in the token, authenticated but readable.
    /// The implicit assertion is authenticated but never leaves this call;
    /// [`decrypt`](Self::decrypt) must be handed the same bytes.
    pub fn encrypt(
        &self,
        payload: &[u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<String, PasetoError> {
        self.encrypt_with_rng(&mut rand::rngs::OsRng, payload, footer, implicit)
    }

    /// Encrypt the payload into a token, drawing the nonce from the given
    /// entropy source.
    pub fn encrypt_with_rng(
        &self,
        rng: &mut (impl RngCore + CryptoRng),
        payload: &[u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<String, PasetoError> {
        let mut nonce = [0; NONCE_LEN];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|_| PasetoError::EntropyError)?;
        Ok(self.encrypt_with_nonce(nonce, payload, footer, implicit))
    }

    /// Encrypting twice with one nonce forfeits every guarantee this token
    /// format makes. Exists for the published test vectors.
    #[doc(hidden)]
    pub fn encrypt_with_nonce(
        &self,
        nonce: [u8; NONCE_LEN],
        payload: &[u8],
        footer: &[u8],
        implicit: &[u8],
    ) -> String {
        let tag_len = <V::TagSize as Unsigned>::USIZE;

        let mut body = Vec::with_capacity(NONCE_LEN + payload.len() + tag_len);
        body.extend_from_slice(&nonce);
        body.extend_from_slice(payload);

        let tag = V::encrypt(&self.key, &nonce, &mut body[NONCE_LEN..], footer, implicit);
        body.extend_from_slice(&tag);

        crate::tokens::encode::<V, Local>(&body, footer)
    }

    /// Decrypt a token.
    ///
    /// `footer` and `implicit` must match the values used at encryption,
    /// byte for byte.
    pub fn decrypt(
        &self,
        token: &str,
        footer: &[u8],
        implicit: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        let mut raw = crate::tokens::decode::<V, Local>(token, footer)?;

        let tag_len = <V::TagSize as Unsigned>::USIZE;
        if raw.len() < NONCE_LEN + tag_len {
            return Err(PasetoError::InvalidLayout);
        }

        let (nonce, rest) = raw.split_at_mut(NONCE_LEN);
        let message_len = rest.len() - tag_len;
        let (message, tag) = rest.split_at_mut(message_len);
        V::decrypt(&self.key, nonce, message, tag, footer, implicit)?;

        raw.truncate(NONCE_LEN + message_len);
        raw.drain(..NONCE_LEN);
        Ok(raw)
    }
}
