//! ECDSA verification

use super::Signature;
use crate::{arithmetic, Error, PublicKey, Result};
use k256::ProjectivePoint;
use tracing::debug;

/// Verify `signature` over the 32-byte message digest `msg`.
///
/// Returns `Ok(false)` for signatures which don't verify, including ones
/// with a zero `r` or `s`. Both "low S" and "high S" signatures are
/// accepted. Errors are reserved for a malformed message and for the
/// verification equation landing on the point at infinity.
#[allow(non_snake_case)]
pub fn verify(public_key: &PublicKey, msg: &[u8], signature: &Signature) -> Result<bool> {
    let msg = arithmetic::check_message(msg)?;
    let z = arithmetic::message_scalar(msg);
    let r = signature.r();

    if bool::from(r.is_zero()) {
        debug!("rejecting signature with zero r");
        return Ok(false);
    }

    let s_inv = match arithmetic::invert(signature.s()) {
        Some(s_inv) => s_inv,
        None => {
            debug!("rejecting signature with zero s");
            return Ok(false);
        }
    };

    // 𝐑' = (𝑟×𝑷 + 𝑧×𝑮) × 𝑠⁻¹
    let R = (public_key.to_projective() * r + ProjectivePoint::GENERATOR * z) * s_inv;
    if arithmetic::is_identity(&R) {
        return Err(Error::DegenerateEphemeralPoint);
    }

    Ok(arithmetic::x_to_scalar(&R.to_affine()) == *r)
}
