//! Signing nonce generation.
//!
//! Every signing operation asks a [`NonceGenerator`] for exactly one nonce.
//! The default is [`Rfc6979`], which derives the nonce deterministically
//! from the private key, the message digest and, for adaptor signatures,
//! the encryption key.

use crate::{Error, PublicKey, Result, MESSAGE_SIZE};
use elliptic_curve::{
    bigint::U256, consts::U32, rand_core::CryptoRngCore, Curve, FieldBytesEncoding, PrimeField,
};
use k256::{FieldBytes, NonZeroScalar, Secp256k1};
use sha2::Sha256;

/// Source of per-signature nonces.
///
/// A generator is invoked at most once per signing operation. A failure
/// aborts the operation; generators report it as
/// [`Error::NonceGenerationFailed`].
///
/// Any closure with the signature of [`NonceGenerator::generate_nonce`] is a
/// generator.
pub trait NonceGenerator {
    /// Produce the nonce for signing `msg` with `secret`.
    ///
    /// `counterparty` is the encryption key when producing an adaptor
    /// signature, and `None` for plain ECDSA.
    fn generate_nonce(
        &mut self,
        secret: &NonZeroScalar,
        msg: &[u8; MESSAGE_SIZE],
        counterparty: Option<&PublicKey>,
    ) -> Result<NonZeroScalar>;
}

impl<F> NonceGenerator for F
where
    F: FnMut(&NonZeroScalar, &[u8; MESSAGE_SIZE], Option<&PublicKey>) -> Result<NonZeroScalar>,
{
    fn generate_nonce(
        &mut self,
        secret: &NonZeroScalar,
        msg: &[u8; MESSAGE_SIZE],
        counterparty: Option<&PublicKey>,
    ) -> Result<NonZeroScalar> {
        self(secret, msg, counterparty)
    }
}

/// Deterministic nonces as described in [RFC6979] (HMAC-DRBG with SHA-256).
///
/// When a counterparty key is present its compressed SEC1 encoding is used as
/// the RFC6979 "additional data", so encrypting the same message to two
/// different keys never reuses a nonce. Without a counterparty the nonce is
/// the one every RFC6979 ECDSA/secp256k1 implementation would use.
///
/// [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979
#[derive(Clone, Copy, Debug, Default)]
pub struct Rfc6979;

impl NonceGenerator for Rfc6979 {
    fn generate_nonce(
        &mut self,
        secret: &NonZeroScalar,
        msg: &[u8; MESSAGE_SIZE],
        counterparty: Option<&PublicKey>,
    ) -> Result<NonZeroScalar> {
        let order = <U256 as FieldBytesEncoding<Secp256k1>>::encode_field_bytes(&Secp256k1::ORDER);
        let counterparty = counterparty.map(PublicKey::to_bytes);
        let data = counterparty.as_ref().map(|bytes| &bytes[..]).unwrap_or(&[]);

        let k = rfc6979::generate_k::<Sha256, U32>(
            &secret.to_repr(),
            &order,
            &FieldBytes::from(*msg),
            data,
        );

        // RFC6979 only outputs values in `[1, n)`
        Option::from(NonZeroScalar::from_repr(k)).ok_or(Error::NonceGenerationFailed)
    }
}

/// Nonces drawn from a random number generator.
#[derive(Debug)]
pub struct RandomNonce<'a, R: CryptoRngCore>(pub &'a mut R);

impl<R: CryptoRngCore> NonceGenerator for RandomNonce<'_, R> {
    fn generate_nonce(
        &mut self,
        _secret: &NonZeroScalar,
        _msg: &[u8; MESSAGE_SIZE],
        _counterparty: Option<&PublicKey>,
    ) -> Result<NonZeroScalar> {
        Ok(NonZeroScalar::random(&mut *self.0))
    }
}
