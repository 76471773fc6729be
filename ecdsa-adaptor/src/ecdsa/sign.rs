//! ECDSA signing

use super::{recoverable, Signature};
use crate::{
    arithmetic,
    nonce::{NonceGenerator, Rfc6979},
    Error, PrivateKey, Result, MESSAGE_SIZE,
};
use elliptic_curve::ops::Invert;
use k256::{NonZeroScalar, ProjectivePoint, Scalar};
use tracing::debug;

/// Sign a 32-byte message digest using an [RFC6979] deterministic nonce.
///
/// The resulting `s` is *not* normalized; see [`Signature::normalize_s`].
///
/// [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979
pub fn sign(private_key: &PrivateKey, msg: &[u8]) -> Result<Signature> {
    sign_with_nonce(private_key, msg, &mut Rfc6979)
}

/// Sign a 32-byte message digest with a nonce from `nonce_generator`.
pub fn sign_with_nonce(
    private_key: &PrivateKey,
    msg: &[u8],
    nonce_generator: &mut impl NonceGenerator,
) -> Result<Signature> {
    let msg = arithmetic::check_message(msg)?;
    let x = private_key.as_nonzero_scalar();
    let k = nonce_generator.generate_nonce(x, msg, None)?;
    sign_prehashed(x, &k, msg)
}

/// Compute `(r, s, v)` for the digest `msg` with secret `x` and nonce `k`.
#[allow(non_snake_case)]
pub(crate) fn sign_prehashed(
    x: &NonZeroScalar,
    k: &NonZeroScalar,
    msg: &[u8; MESSAGE_SIZE],
) -> Result<Signature> {
    // Compute 𝐑 = 𝑘×𝑮
    let R = ProjectivePoint::GENERATOR * **k;
    if arithmetic::is_identity(&R) {
        debug!("signing nonce produced the point at infinity");
        return Err(Error::DegenerateEphemeralPoint);
    }
    let R = R.to_affine();

    // Lift x-coordinate of 𝐑 (element of base field) into a serialized big
    // integer, then reduce it into an element of the scalar field
    let r = arithmetic::x_to_scalar(&R);

    let z = arithmetic::message_scalar(msg);
    let k_inv = Invert::invert(k);

    // Compute `s` as a signature over `r` and `z`.
    let s: Scalar = (z + r * **x) * *k_inv;

    Ok(Signature::from_parts(r, s, recoverable::recovery_id(&R)))
}
