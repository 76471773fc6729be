//! Adaptor decryption and decryption key recovery

use super::EncryptedSignature;
use crate::{arithmetic, ecdsa, Error, PrivateKey, PublicKey, Result, Signature};
use elliptic_curve::ops::Invert;
use k256::NonZeroScalar;
use tracing::{debug, trace};

/// Decrypt `encrypted` with the decryption key `y` into an ordinary ECDSA
/// [`Signature`].
///
/// The result is always normalized to "low S" form and carries the recovery
/// id of the encrypted nonce point. `encrypted` is assumed to have passed
/// [`verify_adaptor`](super::verify_adaptor); decrypting an unverified or
/// mismatched adaptor yields a signature which won't verify.
pub fn decrypt(encrypted: &EncryptedSignature, decryption_key: &PrivateKey) -> Signature {
    // 𝑠 = 𝑠' × 𝑦⁻¹
    let s = encrypted.s * *Invert::invert(decryption_key.as_nonzero_scalar());
    let v = ecdsa::recovery_id(encrypted.encrypted_nonce_point.as_affine());
    let signature = Signature::from_parts(encrypted.r(), s, v);

    if !signature.is_low_s() {
        trace!("normalizing decrypted signature to low S");
    }

    signature.normalize_s()
}

/// Recover the decryption key from an encrypted signature and the
/// signature it was decrypted into.
///
/// Since `s` may have been negated during decryption, the scalar
/// `s⁻¹ × s'` is either `y` or `-y`; whichever of the two matches
/// `encryption_key` is returned.
///
/// Fails with [`Error::RCheckFailed`] if `signature` doesn't share `r` with
/// `encrypted`, and with [`Error::YCheckFailed`] if neither candidate
/// matches `encryption_key`.
pub fn recover_decryption_key(
    encrypted: &EncryptedSignature,
    encryption_key: &PublicKey,
    signature: &Signature,
) -> Result<PrivateKey> {
    if *signature.r() != encrypted.r() {
        debug!("signature r doesn't match the adaptor's encrypted nonce point");
        return Err(Error::RCheckFailed);
    }

    // 𝑦 = 𝑠⁻¹ × 𝑠'
    let y = arithmetic::invert(signature.s())
        .and_then(|s_inv| Option::<NonZeroScalar>::from(NonZeroScalar::new(s_inv * encrypted.s)))
        .map(PrivateKey::from)
        .ok_or_else(|| {
            debug!("signature or adaptor has zero s");
            Error::YCheckFailed
        })?;

    let negated = y.negate();
    [y, negated]
        .into_iter()
        .find(|candidate| candidate.public_key() == *encryption_key)
        .ok_or_else(|| {
            debug!("recovered scalar doesn't match the encryption key");
            Error::YCheckFailed
        })
}
