//! Private keys, public keys and keypairs.

use crate::{
    adaptor::{self, EncryptedSignature},
    arithmetic,
    ecdsa::{self, Signature},
    nonce::NonceGenerator,
    Error, Result, COMPRESSED_POINT_SIZE, SCALAR_SIZE, UNCOMPRESSED_POINT_SIZE,
};
use core::fmt;
use elliptic_curve::{
    rand_core::CryptoRngCore,
    sec1::ToEncodedPoint,
    zeroize::{Zeroize, ZeroizeOnDrop},
};
use k256::{AffinePoint, NonZeroScalar, ProjectivePoint};

#[cfg(feature = "serde")]
use serdect::serde::{de, ser, Deserialize, Serialize};

/// secp256k1 private key: a non-zero scalar.
///
/// The scalar is zeroized when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    scalar: NonZeroScalar,
}

impl PrivateKey {
    /// Generate a random [`PrivateKey`].
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        Self {
            scalar: NonZeroScalar::random(rng),
        }
    }

    /// Parse a private key from a 32-byte big endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let scalar = arithmetic::scalar_from_slice(bytes)?;
        Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar))
            .map(Self::from)
            .ok_or(Error::ZeroScalar)
    }

    /// Serialize as 32 big endian bytes.
    pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
        arithmetic::scalar_to_bytes(&self.scalar)
    }

    /// Compute the [`PublicKey`] for this private key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            inner: k256::PublicKey::from_secret_scalar(&self.scalar),
        }
    }

    /// The additive inverse of this key, whose public key is the negation
    /// of this key's public key.
    pub fn negate(&self) -> Self {
        Self {
            scalar: -self.scalar,
        }
    }

    /// Borrow the secret [`NonZeroScalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_nonzero_scalar(&self) -> &NonZeroScalar {
        &self.scalar
    }
}

impl From<NonZeroScalar> for PrivateKey {
    fn from(scalar: NonZeroScalar) -> Self {
        Self { scalar }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

/// secp256k1 public key: a point on the curve other than the identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey {
    inner: k256::PublicKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded public key, compressed (33 bytes) or
    /// uncompressed (65 bytes).
    ///
    /// Rejects the identity and points which are not on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        k256::PublicKey::from_sec1_bytes(bytes)
            .map(Self::from)
            .map_err(|_| Error::PointDecodeFailed)
    }

    /// Parse a SEC1 compressed point (`0x02`/`0x03` tag followed by the
    /// 32-byte x-coordinate).
    pub fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != COMPRESSED_POINT_SIZE {
            return Err(Error::InvalidEncodingLength {
                expected: COMPRESSED_POINT_SIZE,
                actual: bytes.len(),
            });
        }

        match bytes[0] {
            0x02 | 0x03 => Self::from_sec1_bytes(bytes),
            _ => Err(Error::PointDecodeFailed),
        }
    }

    /// Convert an affine point into a public key, rejecting the identity.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        k256::PublicKey::from_affine(point)
            .map(Self::from)
            .map_err(|_| Error::PointDecodeFailed)
    }

    /// Serialize as a SEC1 compressed point.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_POINT_SIZE] {
        let mut bytes = [0u8; COMPRESSED_POINT_SIZE];
        bytes.copy_from_slice(self.inner.to_encoded_point(true).as_bytes());
        bytes
    }

    /// Serialize as a SEC1 uncompressed point (`0x04 || X || Y`).
    pub fn to_uncompressed_bytes(&self) -> [u8; UNCOMPRESSED_POINT_SIZE] {
        let mut bytes = [0u8; UNCOMPRESSED_POINT_SIZE];
        bytes.copy_from_slice(self.inner.to_encoded_point(false).as_bytes());
        bytes
    }

    /// Borrow the inner [`AffinePoint`].
    pub fn as_affine(&self) -> &AffinePoint {
        self.inner.as_affine()
    }

    /// Convert to a [`ProjectivePoint`].
    pub fn to_projective(&self) -> ProjectivePoint {
        self.inner.to_projective()
    }

    /// Verify an ECDSA signature over a 32-byte message digest.
    ///
    /// See [`ecdsa::verify`].
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> Result<bool> {
        ecdsa::verify(self, msg, signature)
    }

    /// Verify an adaptor signature encrypted under `encryption_key`.
    ///
    /// See [`adaptor::verify_adaptor`].
    pub fn verify_adaptor(
        &self,
        msg: &[u8],
        encryption_key: &PublicKey,
        encrypted: &EncryptedSignature,
    ) -> Result<bool> {
        adaptor::verify_adaptor(self, msg, encryption_key, encrypted)
    }
}

impl From<k256::PublicKey> for PublicKey {
    fn from(inner: k256::PublicKey) -> Self {
        Self { inner }
    }
}

impl From<PublicKey> for k256::PublicKey {
    fn from(public_key: PublicKey) -> Self {
        public_key.inner
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(private_key: &PrivateKey) -> Self {
        private_key.public_key()
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_sec1_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; COMPRESSED_POINT_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_compressed_bytes(&bytes).map_err(de::Error::custom)
    }
}

/// A [`PrivateKey`] together with the [`PublicKey`] it determines.
#[derive(Clone, Debug)]
pub struct Keypair {
    private: PrivateKey,
    public: PublicKey,
}

impl Keypair {
    /// Generate a keypair, drawing the private scalar from `rng`.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self::from_private_key(PrivateKey::random(rng))
    }

    /// Build a keypair around an existing private key.
    pub fn from_private_key(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    /// Borrow the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Borrow the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Sign a 32-byte message digest with an RFC6979 nonce.
    ///
    /// See [`ecdsa::sign`].
    pub fn sign(&self, msg: &[u8]) -> Result<Signature> {
        ecdsa::sign(&self.private, msg)
    }

    /// Sign a 32-byte message digest with a caller-supplied nonce generator.
    pub fn sign_with_nonce(
        &self,
        msg: &[u8],
        nonce_generator: &mut impl NonceGenerator,
    ) -> Result<Signature> {
        ecdsa::sign_with_nonce(&self.private, msg, nonce_generator)
    }

    /// Encrypt a signature over a 32-byte message digest to `encryption_key`.
    ///
    /// See [`adaptor::adaptor_sign`].
    pub fn adaptor_sign(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
        encryption_key: &PublicKey,
    ) -> Result<EncryptedSignature> {
        adaptor::adaptor_sign(rng, &self.private, msg, encryption_key)
    }

    /// Encrypt a signature to `encryption_key` with a caller-supplied nonce
    /// generator.
    pub fn adaptor_sign_with_nonce(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
        encryption_key: &PublicKey,
        nonce_generator: &mut impl NonceGenerator,
    ) -> Result<EncryptedSignature> {
        adaptor::adaptor_sign_with_nonce(rng, &self.private, msg, encryption_key, nonce_generator)
    }
}

impl From<PrivateKey> for Keypair {
    fn from(private: PrivateKey) -> Self {
        Self::from_private_key(private)
    }
}
