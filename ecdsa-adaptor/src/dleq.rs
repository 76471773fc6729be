//! Non-interactive proof of discrete logarithm equality (Chaum–Pedersen),
//! made non-interactive with the Fiat–Shamir transform.
//!
//! A [`DleqProof`] convinces a verifier that `R_a = k×G` and `R = k×Y` for
//! the same secret `k`, without revealing `k`. Adaptor signatures carry one
//! to bind the encrypted nonce point to the encryption key.
//!
//! The challenge is a BIP340-style tagged SHA-256 hash over the compressed
//! encodings of `G, Y, R_a, R, A, B`, reduced modulo the group order.

use crate::{arithmetic, Error, PublicKey, Result, SCALAR_SIZE};
use elliptic_curve::{
    bigint::U256,
    ops::{LinearCombination, Reduce},
    rand_core::CryptoRngCore,
    subtle::ConstantTimeEq,
};
use k256::{NonZeroScalar, ProjectivePoint, Scalar};
use sha2::{Digest, Sha256};
use tracing::debug;

#[cfg(feature = "serde")]
use serdect::serde::{de, ser, Deserialize, Serialize};

const CHALLENGE_TAG: &[u8] = b"ECDSA-adaptor/DLEQ";

/// Proof that two point pairs share a discrete logarithm.
///
/// Serialized as 64 bytes:
///
/// - `z`: 32-byte challenge, big endian
/// - `s`: 32-byte response, big endian
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DleqProof {
    z: Scalar,
    s: Scalar,
}

impl DleqProof {
    /// Size of a serialized proof in bytes.
    pub const BYTE_SIZE: usize = 2 * SCALAR_SIZE;

    /// Prove that `nonce_point = k×G` and `encrypted_nonce_point =
    /// k×encryption_key`.
    ///
    /// The commitment nonce is drawn from `rng` and must never be reused:
    /// two proofs for different `k` sharing a nonce reveal both secrets.
    #[allow(non_snake_case)]
    pub fn prove(
        rng: &mut impl CryptoRngCore,
        k: &NonZeroScalar,
        nonce_point: &PublicKey,
        encrypted_nonce_point: &PublicKey,
        encryption_key: &PublicKey,
    ) -> Self {
        let t = NonZeroScalar::random(rng);
        let A = ProjectivePoint::GENERATOR * *t;
        let B = encryption_key.to_projective() * *t;

        let z = challenge(encryption_key, nonce_point, encrypted_nonce_point, &A, &B);
        let s = *t + z * **k;

        Self { z, s }
    }

    /// Verify this proof against `encryption_key = Y`, `nonce_point = R_a`
    /// and `encrypted_nonce_point = R`.
    ///
    /// Never errors: a proof that doesn't check out, including one whose
    /// recomputed commitments are the point at infinity, is rejected with
    /// `false`.
    #[allow(non_snake_case)]
    pub fn verify(
        &self,
        encryption_key: &PublicKey,
        nonce_point: &PublicKey,
        encrypted_nonce_point: &PublicKey,
    ) -> bool {
        let neg_z = -self.z;

        // 𝑨' = 𝑠×𝑮 − 𝑧×𝑹ₐ
        let A = ProjectivePoint::lincomb(
            &ProjectivePoint::GENERATOR,
            &self.s,
            &nonce_point.to_projective(),
            &neg_z,
        );

        // 𝑩' = 𝑠×𝒀 − 𝑧×𝑹
        let B = ProjectivePoint::lincomb(
            &encryption_key.to_projective(),
            &self.s,
            &encrypted_nonce_point.to_projective(),
            &neg_z,
        );

        if arithmetic::is_identity(&A) || arithmetic::is_identity(&B) {
            debug!("rejecting DLEQ proof with a commitment at infinity");
            return false;
        }

        let z = challenge(encryption_key, nonce_point, encrypted_nonce_point, &A, &B);
        z.ct_eq(&self.z).into()
    }

    /// Parse a 64-byte `z || s` proof, rejecting components which are not
    /// below the group order.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTE_SIZE {
            return Err(Error::InvalidEncodingLength {
                expected: Self::BYTE_SIZE,
                actual: bytes.len(),
            });
        }

        let (z, s) = bytes.split_at(SCALAR_SIZE);
        Ok(Self {
            z: arithmetic::scalar_from_slice(z)?,
            s: arithmetic::scalar_from_slice(s)?,
        })
    }

    /// Serialize as `z || s`.
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        let (z, s) = bytes.split_at_mut(SCALAR_SIZE);
        z.copy_from_slice(&arithmetic::scalar_to_bytes(&self.z));
        s.copy_from_slice(&arithmetic::scalar_to_bytes(&self.s));
        bytes
    }

    /// Fiat–Shamir challenge.
    pub fn z(&self) -> &Scalar {
        &self.z
    }

    /// Response.
    pub fn s(&self) -> &Scalar {
        &self.s
    }
}

impl TryFrom<&[u8]> for DleqProof {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for DleqProof {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DleqProof {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_slice(&bytes).map_err(de::Error::custom)
    }
}

#[allow(non_snake_case)]
fn challenge(
    Y: &PublicKey,
    R_a: &PublicKey,
    R: &PublicKey,
    A: &ProjectivePoint,
    B: &ProjectivePoint,
) -> Scalar {
    let G = arithmetic::encode_point(&ProjectivePoint::GENERATOR);

    <Scalar as Reduce<U256>>::reduce_bytes(
        &tagged_hash(CHALLENGE_TAG)
            .chain_update(G.as_bytes())
            .chain_update(Y.to_bytes())
            .chain_update(R_a.to_bytes())
            .chain_update(R.to_bytes())
            .chain_update(arithmetic::encode_point(A).as_bytes())
            .chain_update(arithmetic::encode_point(B).as_bytes())
            .finalize(),
    )
}

fn tagged_hash(tag: &[u8]) -> Sha256 {
    let tag_hash = Sha256::digest(tag);
    let mut digest = Sha256::new();
    digest.update(tag_hash);
    digest.update(tag_hash);
    digest
}
