use generic_array::typenum::U64;
use signature::{Signer, Verifier};

use super::{Public, PublicVersion};
use crate::purpose::Purpose;
use crate::version::{Version, V4};
use crate::{Bytes, PasetoError};

/// Ed25519 needs the whole message up front, so the PAE stream lands in a
/// buffer rather than a digest.
fn preauth(m: &[u8], f: &[u8], i: &[u8]) -> Vec<u8> {
    let mut message = Vec::new();
    crate::pae::pre_auth_encode(
        [
            &[
                V4::PASETO_HEADER.as_bytes(),
                b".",
                Public::HEADER.as_bytes(),
                b".",
            ],
            &[m],
            &[f],
            &[i],
        ],
        &mut message,
    );
    message
}

impl PublicVersion for V4 {
    type InnerPublicKey = ed25519_dalek::VerifyingKey;
    type InnerSecretKey = ed25519_dalek::SigningKey;

    type SignatureSize = U64;

    fn sign(
        sk: &Self::InnerSecretKey,
        m: &[u8],
        f: &[u8],
        i: &[u8],
    ) -> Result<Bytes<Self::SignatureSize>, PasetoError> {
        let preauth = preauth(m, f, i);
        let sig: ed25519_dalek::Signature = sk.sign(&preauth);
        Ok(sig.to_bytes().into())
    }

    fn verify(
        k: &Self::InnerPublicKey,
        m: &[u8],
        f: &[u8],
        i: &[u8],
        sig: &[u8],
    ) -> Result<(), PasetoError> {
        let sig = ed25519_dalek::Signature::from_slice(sig).map_err(|_| PasetoError::CryptoError)?;
        let preauth = preauth(m, f, i);
        k.verify(&preauth, &sig).map_err(|_| PasetoError::CryptoError)
    }
}
