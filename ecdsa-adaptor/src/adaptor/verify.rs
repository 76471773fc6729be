//! Adaptor verification

use super::EncryptedSignature;
use crate::{arithmetic, PublicKey, Result};
use elliptic_curve::ops::LinearCombination;
use k256::ProjectivePoint;
use tracing::debug;

/// Verify that `encrypted` is a signature by `public_key` over the 32-byte
/// message digest `msg`, encrypted to `encryption_key`.
///
/// Two checks must pass:
///
/// 1. the nonce point `R_a` satisfies the ECDSA verification equation for
///    `public_key` with `r` taken from the encrypted nonce point `R`, and
/// 2. the [`DleqProof`](crate::DleqProof) shows `R_a` and `R` share a
///    discrete logarithm with respect to `G` and `encryption_key`.
///
/// A forged or mismatched adaptor yields `Ok(false)`; only a malformed
/// message is an error.
#[allow(non_snake_case)]
pub fn verify_adaptor(
    public_key: &PublicKey,
    msg: &[u8],
    encryption_key: &PublicKey,
    encrypted: &EncryptedSignature,
) -> Result<bool> {
    let msg = arithmetic::check_message(msg)?;
    let z = arithmetic::message_scalar(msg);
    let r = encrypted.r();

    if bool::from(r.is_zero()) {
        debug!("rejecting adaptor with zero r");
        return Ok(false);
    }

    let s_inv = match arithmetic::invert(encrypted.s()) {
        Some(s_inv) => s_inv,
        None => {
            debug!("rejecting adaptor with zero s");
            return Ok(false);
        }
    };

    // 𝑹ₐ = (𝑧×𝑮 + 𝑟×𝑷) × 𝑠'⁻¹
    let R_a = ProjectivePoint::lincomb(
        &ProjectivePoint::GENERATOR,
        &z,
        &public_key.to_projective(),
        &r,
    ) * s_inv;

    if R_a != encrypted.nonce_point().to_projective() {
        debug!("adaptor nonce point fails the ECDSA equation");
        return Ok(false);
    }

    let proof_ok = encrypted.proof().verify(
        encryption_key,
        encrypted.nonce_point(),
        encrypted.encrypted_nonce_point(),
    );

    if !proof_ok {
        debug!("adaptor DLEQ proof rejected");
    }

    Ok(proof_ok)
}
