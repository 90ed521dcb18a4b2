//! Experimental construction: keyed BLAKE3 for both the KDF and the tag,
//! with the XChaCha20 keystream itself supplying the authentication key.
//! Keystream block 0 is reserved for the auth key; the payload is encrypted
//! from block 1 onwards.

use chacha20::XChaCha20;
use cipher::{KeyIvInit, StreamCipher, StreamCipherSeek};
use generic_array::typenum::U32;
use zeroize::Zeroizing;

use super::{Local, LocalVersion};
use crate::pae::WriteBytes;
use crate::purpose::Purpose;
use crate::version::{V4x, Version};
use crate::{Bytes, PasetoError};

struct Blake3Write<'a>(&'a mut blake3::Hasher);

impl WriteBytes for Blake3Write<'_> {
    fn write(&mut self, slice: &[u8]) {
        self.0.update(slice);
    }
}

/// One 56 byte keyed BLAKE3 read covers the cipher key and the XChaCha20
/// nonce. There is no second KDF call; see [`keys`].
fn kdf(key: &[u8; 32], nonce: &[u8]) -> Zeroizing<[u8; 56]> {
    let mut kdf = blake3::Hasher::new_keyed(key);
    kdf.update(b"paseto-encryption-key");
    kdf.update(nonce);

    let mut tmp = Zeroizing::new([0; 56]);
    kdf.finalize_xof().fill(&mut *tmp);
    tmp
}

/// Build the cipher and pull the 32 byte auth key out of keystream block 0,
/// leaving the cipher parked at block 1 for the payload.
fn keys(key: &[u8; 32], nonce: &[u8]) -> (XChaCha20, Zeroizing<[u8; 32]>) {
    let tmp = kdf(key, nonce);
    let (ek, n2) = tmp.split_at(32);

    let mut cipher = XChaCha20::new(ek.into(), n2.into());

    let mut ak = Zeroizing::new([0; 32]);
    cipher.apply_keystream(&mut *ak);
    cipher.seek(64u64);

    (cipher, ak)
}

fn tag(
    auth_key: &[u8; 32],
    nonce: &[u8],
    ciphertext: &[u8],
    footer: &[u8],
    implicit: &[u8],
) -> Bytes<U32> {
    let mut mac = blake3::Hasher::new_keyed(auth_key);
    crate::pae::pre_auth_encode(
        [
            &[
                V4x::PASETO_HEADER.as_bytes(),
                b".",
                Local::HEADER.as_bytes(),
                b".",
            ],
            &[nonce],
            &[ciphertext],
            &[footer],
            &[implicit],
        ],
        Blake3Write(&mut mac),
    );
    Bytes::from(*mac.finalize().as_bytes())
}

impl LocalVersion for V4x {
    type TagSize = U32;

    fn encrypt(
        k: &[u8; 32],
        n: &[u8],
        m: &mut [u8],
        f: &[u8],
        i: &[u8],
    ) -> Bytes<Self::TagSize> {
        let (mut cipher, ak) = keys(k, n);
        cipher.apply_keystream(m);
        tag(&ak, n, m, f, i)
    }

    fn decrypt(
        k: &[u8; 32],
        n: &[u8],
        m: &mut [u8],
        t: &[u8],
        f: &[u8],
        i: &[u8],
    ) -> Result<(), PasetoError> {
        let (mut cipher, ak) = keys(k, n);
        let tag2 = tag(&ak, n, m, f, i);
        if !crate::tokens::secure_compare(t, &tag2) {
            return Err(PasetoError::CryptoError);
        }
        cipher.apply_keystream(m);
        Ok(())
    }
}
