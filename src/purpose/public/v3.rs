use generic_array::typenum::U96;
use signature::{DigestSigner, DigestVerifier};

use super::{Public, PublicVersion};
use crate::purpose::Purpose;
use crate::version::{Version, V3};
use crate::{Bytes, PasetoError};

/// The compressed public key is the first PAE piece. Leaving it out (or
/// using the uncompressed point) silently breaks interop with every other
/// implementation.
fn digest(pk: &[u8], m: &[u8], f: &[u8], i: &[u8]) -> sha2::Sha384 {
    let mut digest = <sha2::Sha384 as digest::Digest>::new();
    crate::pae::pre_auth_encode(
        [
            &[pk],
            &[
                V3::PASETO_HEADER.as_bytes(),
                b".",
                Public::HEADER.as_bytes(),
                b".",
            ],
            &[m],
            &[f],
            &[i],
        ],
        crate::pae::Digest(&mut digest),
    );
    digest
}

impl PublicVersion for V3 {
    type InnerPublicKey = p384::ecdsa::VerifyingKey;
    type InnerSecretKey = p384::ecdsa::SigningKey;

    /// 96 bytes: `r || s`, each padded to the 48 byte curve width
    type SignatureSize = U96;

    fn sign(
        sk: &Self::InnerSecretKey,
        m: &[u8],
        f: &[u8],
        i: &[u8],
    ) -> Result<Bytes<Self::SignatureSize>, PasetoError> {
        let pk = sk.verifying_key().to_encoded_point(true);

        let digest = digest(pk.as_bytes(), m, f, i);

        // RFC 6979: the ephemeral scalar is derived, never drawn
        let sig: p384::ecdsa::Signature = sk
            .try_sign_digest(digest)
            .map_err(|_| PasetoError::CryptoError)?;
        Ok(sig.to_bytes())
    }

    fn verify(
        k: &Self::InnerPublicKey,
        m: &[u8],
        f: &[u8],
        i: &[u8],
        sig: &[u8],
    ) -> Result<(), PasetoError> {
        let sig =
            p384::ecdsa::Signature::from_slice(sig).map_err(|_| PasetoError::CryptoError)?;

        let pk = k.to_encoded_point(true);

        let digest = digest(pk.as_bytes(), m, f, i);

        k.verify_digest(digest, &sig)
            .map_err(|_| PasetoError::CryptoError)
    }
}
