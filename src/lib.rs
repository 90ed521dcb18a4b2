#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
//! PASETO - **P**latform **A**gnostic **Se**curity **To**kens.
//!
//! Paseto is everything you love about JOSE (JWT, JWE, JWS) without any of the [many design deficits that plague the JOSE standards](https://paragonie.com/blog/2017/03/jwt-json-web-tokens-is-bad-standard-that-everyone-should-avoid).
//! See more about PASETO in the [specification](https://github.com/paseto-standard/paseto-spec).
//!
//! This crate implements the four token primitives of PASETO versions 3 and 4
//! over opaque byte payloads. Payload semantics (claims, expiry, JSON) are the
//! caller's business; the crate guarantees that a token is a bit-exact function
//! of key, nonce, payload, footer and implicit assertion.
//!
//! * `local` tokens are encrypted and authenticated with a shared symmetric key.
//! * `public` tokens are signed, with the payload readable by anyone.
//!
//! Footers travel with the token (base64url encoded, authenticated but not
//! encrypted). Implicit assertions are authenticated but never serialized into
//! the token; whoever validates the token must present the same bytes.
//!
//! ## Features
//!
//! * `v4`: V4 PASETO (Sodium suite)
//!   - `v4-local`: XChaCha20 + keyed BLAKE2b encrypted tokens
//!   - `v4-public`: Ed25519 signed tokens
//! * `v3`: V3 PASETO (NIST suite)
//!   - `v3-local`: AES-256-CTR + HMAC-SHA384 encrypted tokens
//!   - `v3-public`: deterministic ECDSA P-384 signed tokens
//! * `v4x`: a non-standard XChaCha20 + keyed BLAKE3 construction. Not
//!   interoperable with anything; off by default for a reason.
//!
//! ## Examples
//!
//! ```
//! use paseto_tokens::v4;
//!
//! // load your shared key
//! let key = hex::decode("707172737475767778797a7b7c7d7e7f808182838485868788898a8b8c8d8e8f").unwrap();
//! let key = v4::SymmetricKey::from_bytes(key.try_into().unwrap());
//!
//! let token = key
//!     .encrypt(b"ordered the hit on alfredo", b"", b"for your eyes only")
//!     .unwrap();
//! // "v4.local.yh4-..."
//!
//! // the payload comes back only with the right key and the same assertion
//! let payload = key.decrypt(&token, b"", b"for your eyes only").unwrap();
//! assert_eq!(payload, b"ordered the hit on alfredo");
//! assert!(key.decrypt(&token, b"", b"someone else").is_err());
//! ```
//!
//! ```
//! use paseto_tokens::v4;
//!
//! let secret_key = v4::SecretKey::generate(&mut rand::rngs::OsRng).unwrap();
//! let public_key = secret_key.public_key();
//!
//! let token = secret_key.sign(b"signed, not secret", b"key-id-1", b"").unwrap();
//!
//! // anyone holding the public key can read and check the message
//! let message = public_key.verify(&token, b"key-id-1", b"").unwrap();
//! assert_eq!(message, b"signed, not secret");
//! ```

#[allow(dead_code)]
pub(crate) type Bytes<N> = generic_array::GenericArray<u8, N>;

/// PASETO V4 using only algorithms that are provided by libsodium
#[cfg(any(feature = "v4-local", feature = "v4-public"))]
pub mod v4 {
    use crate::version::V4;

    /// A symmetric key for `local` encrypted tokens
    #[cfg(feature = "v4-local")]
    pub type SymmetricKey = crate::purpose::local::SymmetricKey<V4>;

    /// A public key for verifying `public` tokens
    #[cfg(feature = "v4-public")]
    pub type PublicKey = crate::purpose::public::PublicKey<V4>;
    /// A secret key for signing `public` tokens
    #[cfg(feature = "v4-public")]
    pub type SecretKey = crate::purpose::public::SecretKey<V4>;
}

/// PASETO V3 using only NIST approved algorithms
#[cfg(any(feature = "v3-local", feature = "v3-public"))]
pub mod v3 {
    use crate::version::V3;

    /// A symmetric key for `local` encrypted tokens
    #[cfg(feature = "v3-local")]
    pub type SymmetricKey = crate::purpose::local::SymmetricKey<V3>;

    /// A public key for verifying `public` tokens
    #[cfg(feature = "v3-public")]
    pub type PublicKey = crate::purpose::public::PublicKey<V3>;
    /// A secret key for signing `public` tokens
    #[cfg(feature = "v3-public")]
    pub type SecretKey = crate::purpose::public::SecretKey<V3>;
}

/// Experimental XChaCha20 + keyed BLAKE3 tokens. **Not PASETO.**
///
/// Tokens carry the `v4x.local.` header and no other implementation will
/// accept them. The construction derives the authentication key from the
/// cipher keystream itself instead of a second KDF invocation.
#[cfg(feature = "v4x")]
pub mod v4x {
    use crate::version::V4x;

    /// A symmetric key for `v4x.local` encrypted tokens
    pub type SymmetricKey = crate::purpose::local::SymmetricKey<V4x>;
}

pub mod purpose {
    //! Purpose of the PASETO. Supports either [`local`] or [`public`]

    pub mod local;
    pub mod public;

    pub use local::Local;
    pub use public::{Public, Secret};

    /// Purpose of the PASETO.
    ///
    /// * `public` - signed tokens. payload included in plaintext
    /// * `local` - encrypted tokens. payload is not readable without key
    pub trait Purpose: Default {
        /// "local" or "public"
        const HEADER: &'static str;
    }
}

pub mod key;

mod pae;
mod tokens;

pub mod version {
    //! Versions of PASETO. Supports [`V3`] or [`V4`]

    /// PASETO Version 3 (NIST)
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct V3;

    /// PASETO Version 4 (Sodium)
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct V4;

    /// Experimental version "4x" (XChaCha20 + keyed BLAKE3). Not PASETO.
    #[cfg(feature = "v4x")]
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct V4x;

    /// General information about a PASETO version.
    ///
    /// This library supports [`V3`], [`V4`] and (opt-in) `V4x`.
    pub trait Version: Default + crate::sealed::Sealed {
        /// Header for PASETO
        const PASETO_HEADER: &'static str;
    }

    impl Version for V3 {
        const PASETO_HEADER: &'static str = "v3";
    }

    impl Version for V4 {
        const PASETO_HEADER: &'static str = "v4";
    }

    #[cfg(feature = "v4x")]
    impl Version for V4x {
        const PASETO_HEADER: &'static str = "v4x";
    }

    impl crate::sealed::Sealed for V3 {}

    impl crate::sealed::Sealed for V4 {}

    #[cfg(feature = "v4x")]
    impl crate::sealed::Sealed for V4x {}
}

mod sealed {
    pub trait Sealed {}
}

#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
/// Error returned for all PASETO operations that can fail
pub enum PasetoError {
    /// Seed material shorter than the 32 bytes a local key needs.
    SeedTooShort,
    /// The random source could not produce enough bytes.
    EntropyError,
    /// Could not decode the provided key material.
    InvalidKey,
    /// The input token was empty.
    EmptyToken,
    /// The token does not start with the expected version/purpose prefix.
    WrongHeader,
    /// The token was not Base64 URL encoded correctly.
    Base64DecodeError,
    /// The token body is shorter than its fixed fields require.
    InvalidLayout,
    /// A footer was expected but the token carries none.
    FooterMissing,
    /// The token footer does not match the expected footer.
    FooterMismatch,
    /// Could not verify/decrypt the PASETO.
    CryptoError,
}

impl std::error::Error for PasetoError {}

impl std::fmt::Display for PasetoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // validation failures share one bland message. callers logging the
        // Display output must not reveal which check tripped
        match self {
            PasetoError::SeedTooShort => f.write_str("Key seed must be at least 32 bytes"),
            PasetoError::EntropyError => f.write_str("The random source failed"),
            PasetoError::InvalidKey => f.write_str("Could not parse the key"),
            PasetoError::EmptyToken | PasetoError::WrongHeader => {
                f.write_str("Could not parse the token")
            }
            PasetoError::Base64DecodeError => f.write_str("The token could not be base64 decoded"),
            PasetoError::InvalidLayout
            | PasetoError::FooterMissing
            | PasetoError::FooterMismatch
            | PasetoError::CryptoError => f.write_str("Token could not be validated"),
        }
    }
}
