//! Adaptor signing

use super::EncryptedSignature;
use crate::{
    arithmetic,
    nonce::{NonceGenerator, Rfc6979},
    DleqProof, Error, PrivateKey, PublicKey, Result,
};
use elliptic_curve::{ops::Invert, rand_core::CryptoRngCore};
use k256::{ProjectivePoint, Scalar};
use tracing::debug;

/// Encrypt a signature over the 32-byte message digest `msg` to
/// `encryption_key`, using an [RFC6979] nonce bound to the encryption key.
///
/// `rng` is only used for the commitment nonce of the [`DleqProof`].
///
/// [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979
pub fn adaptor_sign(
    rng: &mut impl CryptoRngCore,
    private_key: &PrivateKey,
    msg: &[u8],
    encryption_key: &PublicKey,
) -> Result<EncryptedSignature> {
    adaptor_sign_with_nonce(rng, private_key, msg, encryption_key, &mut Rfc6979)
}

/// Encrypt a signature to `encryption_key` with a nonce from
/// `nonce_generator`, which receives the encryption key as counterparty.
#[allow(non_snake_case)]
pub fn adaptor_sign_with_nonce(
    rng: &mut impl CryptoRngCore,
    private_key: &PrivateKey,
    msg: &[u8],
    encryption_key: &PublicKey,
    nonce_generator: &mut impl NonceGenerator,
) -> Result<EncryptedSignature> {
    let msg = arithmetic::check_message(msg)?;
    let x = private_key.as_nonzero_scalar();
    let k = nonce_generator.generate_nonce(x, msg, Some(encryption_key))?;

    // 𝑹ₐ = 𝑘×𝑮, 𝑹 = 𝑘×𝒀
    let R_a = ephemeral_point(ProjectivePoint::GENERATOR * *k)?;
    let R = ephemeral_point(encryption_key.to_projective() * *k)?;

    let r = arithmetic::x_to_scalar(R.as_affine());
    let z = arithmetic::message_scalar(msg);
    let k_inv = Invert::invert(&k);

    // 𝑠' = (𝑧 + 𝑟×𝑥) × 𝑘⁻¹
    let s: Scalar = (z + r * **x) * *k_inv;
    let proof = DleqProof::prove(rng, &k, &R_a, &R, encryption_key);

    Ok(EncryptedSignature {
        encrypted_nonce_point: R,
        nonce_point: R_a,
        s,
        proof,
    })
}

fn ephemeral_point(point: ProjectivePoint) -> Result<PublicKey> {
    PublicKey::from_affine(point.to_affine()).map_err(|_| {
        debug!("adaptor nonce produced the point at infinity");
        Error::DegenerateEphemeralPoint
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Keypair, RandomNonce};
    use k256::NonZeroScalar;
    use rand_core::OsRng;

    #[test]
    fn nonce_is_shared_by_both_points() {
        let alice = Keypair::generate(&mut OsRng);
        let one_time = Keypair::generate(&mut OsRng);
        let k = NonZeroScalar::random(&mut OsRng);
        let mut fixed =
            |_: &NonZeroScalar, _: &[u8; 32], _: Option<&PublicKey>| -> Result<NonZeroScalar> {
                Ok(k)
            };

        let encrypted = alice
            .adaptor_sign_with_nonce(&mut OsRng, &[9u8; 32], one_time.public_key(), &mut fixed)
            .unwrap();

        assert_eq!(
            encrypted.nonce_point().to_projective(),
            ProjectivePoint::GENERATOR * *k
        );
        assert_eq!(
            encrypted.encrypted_nonce_point().to_projective(),
            one_time.public_key().to_projective() * *k
        );
    }

    #[test]
    fn nonce_generator_sees_encryption_key() {
        let alice = Keypair::generate(&mut OsRng);
        let one_time = Keypair::generate(&mut OsRng);
        let expected = *one_time.public_key();
        let mut seen = None;
        let mut recording = |_: &NonZeroScalar,
                             _: &[u8; 32],
                             counterparty: Option<&PublicKey>|
         -> Result<NonZeroScalar> {
            seen = counterparty.copied();
            Ok(NonZeroScalar::random(&mut OsRng))
        };

        alice
            .adaptor_sign_with_nonce(&mut OsRng, &[9u8; 32], &expected, &mut recording)
            .unwrap();
        assert_eq!(seen, Some(expected));
    }

    #[test]
    fn rfc6979_nonce_depends_on_encryption_key() {
        let alice = Keypair::generate(&mut OsRng);
        let bob = Keypair::generate(&mut OsRng);
        let carol = Keypair::generate(&mut OsRng);
        let msg = [0x42; 32];

        let to_bob = alice.adaptor_sign(&mut OsRng, &msg, bob.public_key()).unwrap();
        let to_bob_again = alice.adaptor_sign(&mut OsRng, &msg, bob.public_key()).unwrap();
        let to_carol = alice.adaptor_sign(&mut OsRng, &msg, carol.public_key()).unwrap();

        assert_eq!(to_bob.nonce_point(), to_bob_again.nonce_point());
        assert_ne!(to_bob.nonce_point(), to_carol.nonce_point());
    }

    #[test]
    fn random_nonces() {
        let alice = Keypair::generate(&mut OsRng);
        let one_time = Keypair::generate(&mut OsRng);
        let msg = [0x42; 32];
        let mut nonces = OsRng;
        let mut generator = RandomNonce(&mut nonces);

        let e1 = alice
            .adaptor_sign_with_nonce(&mut OsRng, &msg, one_time.public_key(), &mut generator)
            .unwrap();
        let e2 = alice
            .adaptor_sign_with_nonce(&mut OsRng, &msg, one_time.public_key(), &mut generator)
            .unwrap();

        assert_ne!(e1.nonce_point(), e2.nonce_point());
    }

    #[test]
    fn rejects_bad_message_length() {
        let alice = Keypair::generate(&mut OsRng);
        let one_time = Keypair::generate(&mut OsRng);
        assert_eq!(
            alice.adaptor_sign(&mut OsRng, &[0u8; 31], one_time.public_key()),
            Err(Error::InvalidMessageLength(31))
        );
    }

    #[test]
    fn nonce_failure_aborts_signing() {
        let alice = Keypair::generate(&mut OsRng);
        let one_time = Keypair::generate(&mut OsRng);
        let mut failing =
            |_: &NonZeroScalar, _: &[u8; 32], _: Option<&PublicKey>| -> Result<NonZeroScalar> {
                Err(Error::NonceGenerationFailed)
            };

        let result =
            alice.adaptor_sign_with_nonce(&mut OsRng, &[1u8; 32], one_time.public_key(), &mut failing);
        assert_eq!(result, Err(Error::NonceGenerationFailed));
    }
}
