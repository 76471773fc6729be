//! ECDSA adaptor signatures.
//!
//! The lifecycle of an [`EncryptedSignature`]:
//!
//! 1. The signer produces it with [`adaptor_sign`], encrypting a signature
//!    over a message digest to an encryption key `Y`.
//! 2. The counterparty checks it with [`verify_adaptor`] before relying on
//!    it.
//! 3. The holder of the decryption key `y` turns it into an ordinary ECDSA
//!    [`Signature`] with [`decrypt`].
//! 4. Anyone holding the encrypted signature and the published signature can
//!    learn `y` with [`recover_decryption_key`].
//!
//! [`Signature`]: crate::Signature

mod decrypt;
mod sign;
mod verify;

pub use self::{
    decrypt::{decrypt, recover_decryption_key},
    sign::{adaptor_sign, adaptor_sign_with_nonce},
    verify::verify_adaptor,
};

use crate::{arithmetic, DleqProof, Error, PublicKey, Result, COMPRESSED_POINT_SIZE, SCALAR_SIZE};
use k256::Scalar;

#[cfg(feature = "serde")]
use serdect::serde::{de, ser, Deserialize, Serialize};

/// An ECDSA signature encrypted to an encryption key `Y`.
///
/// Serialized as 162 bytes:
///
/// - `R`: 33-byte compressed encrypted nonce point `k×Y`
/// - `R_a`: 33-byte compressed nonce point `k×G`
/// - `s`: 32-byte adaptor response, big endian
/// - `proof`: 64-byte [`DleqProof`] that `R` and `R_a` share `k`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncryptedSignature {
    encrypted_nonce_point: PublicKey,
    nonce_point: PublicKey,
    s: Scalar,
    proof: DleqProof,
}

impl EncryptedSignature {
    /// Size of a serialized encrypted signature in bytes.
    pub const BYTE_SIZE: usize = 2 * COMPRESSED_POINT_SIZE + SCALAR_SIZE + DleqProof::BYTE_SIZE;

    /// Parse a 162-byte encrypted signature.
    ///
    /// Both points must be valid compressed curve points and every scalar
    /// must be below the group order. The proof is *not* checked; use
    /// [`verify_adaptor`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTE_SIZE {
            return Err(Error::InvalidEncodingLength {
                expected: Self::BYTE_SIZE,
                actual: bytes.len(),
            });
        }

        let (encrypted_nonce_point, rest) = bytes.split_at(COMPRESSED_POINT_SIZE);
        let (nonce_point, rest) = rest.split_at(COMPRESSED_POINT_SIZE);
        let (s, proof) = rest.split_at(SCALAR_SIZE);

        Ok(Self {
            encrypted_nonce_point: PublicKey::from_compressed_bytes(encrypted_nonce_point)?,
            nonce_point: PublicKey::from_compressed_bytes(nonce_point)?,
            s: arithmetic::scalar_from_slice(s)?,
            proof: DleqProof::from_slice(proof)?,
        })
    }

    /// Serialize as `R || R_a || s || proof`.
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        let (encrypted_nonce_point, rest) = bytes.split_at_mut(COMPRESSED_POINT_SIZE);
        let (nonce_point, rest) = rest.split_at_mut(COMPRESSED_POINT_SIZE);
        let (s, proof) = rest.split_at_mut(SCALAR_SIZE);

        encrypted_nonce_point.copy_from_slice(&self.encrypted_nonce_point.to_bytes());
        nonce_point.copy_from_slice(&self.nonce_point.to_bytes());
        s.copy_from_slice(&arithmetic::scalar_to_bytes(&self.s));
        proof.copy_from_slice(&self.proof.to_bytes());
        bytes
    }

    /// The encrypted nonce point `R = k×Y`.
    pub fn encrypted_nonce_point(&self) -> &PublicKey {
        &self.encrypted_nonce_point
    }

    /// The nonce point `R_a = k×G`.
    pub fn nonce_point(&self) -> &PublicKey {
        &self.nonce_point
    }

    /// The adaptor response `s`.
    pub fn s(&self) -> &Scalar {
        &self.s
    }

    /// Proof that [`Self::nonce_point`] and [`Self::encrypted_nonce_point`]
    /// share a discrete logarithm.
    pub fn proof(&self) -> &DleqProof {
        &self.proof
    }

    /// The `r` component the decrypted signature will carry: the
    /// x-coordinate of `R` reduced modulo the group order.
    pub fn r(&self) -> Scalar {
        arithmetic::x_to_scalar(self.encrypted_nonce_point.as_affine())
    }
}

impl TryFrom<&[u8]> for EncryptedSignature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl From<EncryptedSignature> for [u8; EncryptedSignature::BYTE_SIZE] {
    fn from(encrypted: EncryptedSignature) -> Self {
        encrypted.to_bytes()
    }
}

#[cfg(feature = "serde")]
impl Serialize for EncryptedSignature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for EncryptedSignature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_slice(&bytes).map_err(de::Error::custom)
    }
}
