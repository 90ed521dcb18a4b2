//! Round-trip, tampering and failure-mode properties over random inputs.

use paseto_tokens::PasetoError;
use rand::{rngs::OsRng, Rng, RngCore};

fn random_bytes(max_len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(0..=max_len);
    let mut out = vec![0; len];
    rng.fill_bytes(&mut out);
    out
}

#[cfg(any(feature = "v3-local", feature = "v4-local", feature = "v4x"))]
mod local {
    use paseto_tokens::purpose::local::{LocalVersion, SymmetricKey};

    use super::*;

    fn round_trips<V: LocalVersion>() {
        let key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();
        for _ in 0..1000 {
            let payload = random_bytes(256);
            let footer = random_bytes(64);
            let implicit = random_bytes(64);

            let token = key.encrypt(&payload, &footer, &implicit).unwrap();
            let decrypted = key.decrypt(&token, &footer, &implicit).unwrap();
            assert_eq!(decrypted, payload);
        }
    }

    fn nonces_randomize<V: LocalVersion>() {
        let key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();
        let token1 = key.encrypt(b"same payload", b"", b"").unwrap();
        let token2 = key.encrypt(b"same payload", b"", b"").unwrap();
        assert_ne!(token1, token2);
    }

    fn empty_payload<V: LocalVersion>() {
        let key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();
        let token = key.encrypt(b"", b"", b"").unwrap();
        assert_eq!(key.decrypt(&token, b"", b"").unwrap(), b"");
    }

    fn tampered_token_rejected<V: LocalVersion>() {
        let key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();
        let token = key
            .encrypt(b"attack at dawn", b"squad 7", b"operation neptune")
            .unwrap();

        for at in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[at] ^= 1;
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(
                key.decrypt(&tampered, b"squad 7", b"operation neptune")
                    .is_err(),
                "byte {at} of {token:?}"
            );
        }
    }

    fn wrong_inputs_rejected<V: LocalVersion>() {
        let key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();
        let token = key.encrypt(b"payload", b"footer", b"implicit").unwrap();

        assert_eq!(
            key.decrypt(&token, b"ffooter", b"implicit").unwrap_err(),
            PasetoError::FooterMismatch
        );
        assert_eq!(
            key.decrypt(&token, b"footer", b"explicit").unwrap_err(),
            PasetoError::CryptoError
        );
        // an empty expectation does not silently accept the token footer
        assert_eq!(
            key.decrypt(&token, b"", b"implicit").unwrap_err(),
            PasetoError::Base64DecodeError
        );

        let other_key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();
        assert_eq!(
            other_key
                .decrypt(&token, b"footer", b"implicit")
                .unwrap_err(),
            PasetoError::CryptoError
        );
    }

    fn parse_failures<V: LocalVersion>() {
        let key = SymmetricKey::<V>::generate(&mut OsRng).unwrap();

        assert_eq!(
            key.decrypt("", b"", b"").unwrap_err(),
            PasetoError::EmptyToken
        );
        assert_eq!(
            key.decrypt("v9.local.AAAA", b"", b"").unwrap_err(),
            PasetoError::WrongHeader
        );

        let prefix = format!("{}.local.", V::PASETO_HEADER);
        assert_eq!(
            key.decrypt(&format!("{prefix}not!base64url"), b"", b"")
                .unwrap_err(),
            PasetoError::Base64DecodeError
        );
        // 8 bytes of body cannot hold a nonce and a tag
        assert_eq!(
            key.decrypt(&format!("{prefix}AAAAAAAAAAA"), b"", b"")
                .unwrap_err(),
            PasetoError::InvalidLayout
        );
        assert_eq!(
            key.decrypt(&format!("{prefix}AAAAAAAAAAA"), b"footer", b"")
                .unwrap_err(),
            PasetoError::FooterMissing
        );
    }

    macro_rules! local_suite {
        ($name:ident, $version:ty) => {
            mod $name {
                #[test]
                fn round_trips() {
                    super::round_trips::<$version>();
                }
                #[test]
                fn nonces_randomize() {
                    super::nonces_randomize::<$version>();
                }
                #[test]
                fn empty_payload() {
                    super::empty_payload::<$version>();
                }
                #[test]
                fn tampered_token_rejected() {
                    super::tampered_token_rejected::<$version>();
                }
                #[test]
                fn wrong_inputs_rejected() {
                    super::wrong_inputs_rejected::<$version>();
                }
                #[test]
                fn parse_failures() {
                    super::parse_failures::<$version>();
                }
            }
        };
    }

    #[cfg(feature = "v3-local")]
    local_suite!(v3, paseto_tokens::version::V3);
    #[cfg(feature = "v4-local")]
    local_suite!(v4, paseto_tokens::version::V4);
    #[cfg(feature = "v4x")]
    local_suite!(v4x, paseto_tokens::version::V4x);

    #[cfg(all(feature = "v3-local", feature = "v4-local"))]
    #[test]
    fn tokens_do_not_cross_versions() {
        let v3_key = paseto_tokens::v3::SymmetricKey::generate(&mut OsRng).unwrap();
        let v4_key = paseto_tokens::v4::SymmetricKey::generate(&mut OsRng).unwrap();

        let token = v3_key.encrypt(b"payload", b"", b"").unwrap();
        assert_eq!(
            v4_key.decrypt(&token, b"", b"").unwrap_err(),
            PasetoError::WrongHeader
        );
    }
}

#[cfg(any(feature = "v3-public", feature = "v4-public"))]
mod public {
    use super::*;

    macro_rules! public_suite {
        ($name:ident, $sk:ty) => {
            mod $name {
                use super::*;

                type Sk = $sk;

                #[test]
                fn round_trips() {
                    let sk = <Sk>::generate(&mut OsRng).unwrap();
                    let pk = sk.public_key();
                    for _ in 0..16 {
                        let message = random_bytes(256);
                        let footer = random_bytes(64);
                        let implicit = random_bytes(64);

                        let token = sk.sign(&message, &footer, &implicit).unwrap();
                        let verified = pk.verify(&token, &footer, &implicit).unwrap();
                        assert_eq!(verified, message);
                    }
                }

                #[test]
                fn sign_is_deterministic() {
                    let sk = <Sk>::generate(&mut OsRng).unwrap();
                    let token1 = sk.sign(b"message", b"footer", b"implicit").unwrap();
                    let token2 = sk.sign(b"message", b"footer", b"implicit").unwrap();
                    assert_eq!(token1, token2);
                }

                #[test]
                fn tampered_token_rejected() {
                    let sk = <Sk>::generate(&mut OsRng).unwrap();
                    let pk = sk.public_key();
                    let token = sk
                        .sign(b"attack at dawn", b"squad 7", b"operation neptune")
                        .unwrap();

                    for at in 0..token.len() {
                        let mut bytes = token.clone().into_bytes();
                        bytes[at] ^= 1;
                        let tampered = String::from_utf8(bytes).unwrap();
                        assert!(
                            pk.verify(&tampered, b"squad 7", b"operation neptune")
                                .is_err(),
                            "byte {at} of {token:?}"
                        );
                    }
                }

                #[test]
                fn wrong_inputs_rejected() {
                    let sk = <Sk>::generate(&mut OsRng).unwrap();
                    let pk = sk.public_key();
                    let token = sk.sign(b"message", b"footer", b"implicit").unwrap();

                    assert_eq!(
                        pk.verify(&token, b"ffooter", b"implicit").unwrap_err(),
                        PasetoError::FooterMismatch
                    );
                    assert_eq!(
                        pk.verify(&token, b"footer", b"explicit").unwrap_err(),
                        PasetoError::CryptoError
                    );

                    let other = <Sk>::generate(&mut OsRng).unwrap();
                    assert_eq!(
                        other
                            .public_key()
                            .verify(&token, b"footer", b"implicit")
                            .unwrap_err(),
                        PasetoError::CryptoError
                    );
                }

                #[test]
                fn short_body_rejected() {
                    let sk = <Sk>::generate(&mut OsRng).unwrap();
                    let pk = sk.public_key();
                    let token = sk.sign(b"", b"", b"").unwrap();

                    // a three byte body cannot hold any signature
                    let header = &token[..token.find("public.").unwrap() + "public.".len()];
                    assert_eq!(
                        pk.verify(&format!("{header}AAAA"), b"", b"").unwrap_err(),
                        PasetoError::InvalidLayout
                    );
                }
            }
        };
    }

    #[cfg(feature = "v3-public")]
    public_suite!(v3, paseto_tokens::v3::SecretKey);
    #[cfg(feature = "v4-public")]
    public_suite!(v4, paseto_tokens::v4::SecretKey);
}
