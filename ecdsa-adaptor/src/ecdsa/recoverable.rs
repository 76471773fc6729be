//! Ethereum-style public key recovery.
//!
//! A signature's recovery id `v` identifies which of the (up to four)
//! points with x-coordinate `r` or `r + n` was the ephemeral point. Given
//! `v`, the signer's public key can be computed from the signature and the
//! message digest alone.

use super::{Signature, RECOVERY_ID_X_REDUCED, RECOVERY_ID_Y_ODD};
use crate::{arithmetic, Error, PublicKey, Result};
use elliptic_curve::{
    bigint::{ArrayEncoding, Limb, U256},
    point::{AffineCoordinates, DecompressPoint},
    Curve, PrimeField,
};
use k256::{AffinePoint, ProjectivePoint, Secp256k1};

/// Recovery id for a signature whose ephemeral point is `R`.
#[allow(non_snake_case)]
pub(crate) fn recovery_id(R: &AffinePoint) -> u8 {
    let mut v = 0;

    if bool::from(R.y_is_odd()) {
        v |= RECOVERY_ID_Y_ODD;
    }

    if arithmetic::is_x_reduced(R) {
        v |= RECOVERY_ID_X_REDUCED;
    }

    v
}

impl Signature {
    /// Recover the [`PublicKey`] which produced this signature over the
    /// 32-byte message digest `msg`.
    ///
    /// The result is only meaningful if `v` was produced alongside `r` and
    /// `s`; callers wanting assurance should verify the signature against
    /// the recovered key.
    #[allow(non_snake_case)]
    pub fn recover_public_key(&self, msg: &[u8]) -> Result<PublicKey> {
        let msg = arithmetic::check_message(msg)?;
        let z = arithmetic::message_scalar(msg);
        let r_inv = arithmetic::invert(self.r()).ok_or(Error::RecoveryFailed)?;

        let mut x = U256::from_be_byte_array(self.r().to_repr());
        if self.v() & RECOVERY_ID_X_REDUCED != 0 {
            let (sum, carry) = x.adc(&Secp256k1::ORDER, Limb::ZERO);
            if carry.0 != 0 {
                return Err(Error::RecoveryFailed);
            }
            x = sum;
        }

        let y_is_odd = (self.v() & RECOVERY_ID_Y_ODD).into();
        let R: AffinePoint =
            Option::from(AffinePoint::decompress(&x.to_be_byte_array(), y_is_odd))
                .ok_or(Error::RecoveryFailed)?;

        // 𝑷 = 𝑟⁻¹ × (𝑠×𝑹 − 𝑧×𝑮)
        let P = (ProjectivePoint::from(R) * self.s() - ProjectivePoint::GENERATOR * z) * r_inv;
        PublicKey::from_affine(P.to_affine()).map_err(|_| Error::RecoveryFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Keypair;
    use hex_literal::hex;
    use rand_core::OsRng;
    use sha2::{Digest, Sha256};

    /// Signature recovery test vectors
    struct RecoveryTestVector {
        pk: [u8; 33],
        sig: [u8; 65],
        msg: &'static [u8],
    }

    const RECOVERY_TEST_VECTORS: &[RecoveryTestVector] = &[
        // Recovery ID 0
        RecoveryTestVector {
            pk: hex!("021a7a569e91dbf60581509c7fc946d1003b60c7dee85299538db6353538d59574"),
            sig: hex!(
                "ce53abb3721bafc561408ce8ff99c909f7f0b18a2f788649d6470162ab1aa03239
                 71edc523a6d6453f3fb6128d318d9db1a5ff3386feb1047d9816e780039d5200"
            ),
            msg: b"example message",
        },
        // Recovery ID 1
        RecoveryTestVector {
            pk: hex!("036d6caac248af96f6afa7f904f550253a0f3ef3f5aa2fe6838a95b216691468e2"),
            sig: hex!(
                "46c05b6368a44b8810d79859441d819b8e7cdc8bfd371e35c53196f4bcacdb5135
                 c7facce2a97b95eacba8a586d87b7958aaf8368ab29cee481f76e871dbd9cb01"
            ),
            msg: b"example message",
        },
    ];

    #[test]
    fn public_key_recovery() {
        for vector in RECOVERY_TEST_VECTORS {
            let sig = Signature::from_slice(&vector.sig).unwrap();
            let digest = Sha256::digest(vector.msg);
            let pk = sig.recover_public_key(&digest).unwrap();
            assert_eq!(pk.to_bytes(), vector.pk);
        }
    }

    #[test]
    fn recovers_own_signatures() {
        for _ in 0..8 {
            let keypair = Keypair::generate(&mut OsRng);
            let msg = [0xa5; 32];

            let sig = keypair.sign(&msg).unwrap();
            assert_eq!(&sig.recover_public_key(&msg).unwrap(), keypair.public_key());

            let normalized = sig.normalize_s();
            assert_eq!(
                &normalized.recover_public_key(&msg).unwrap(),
                keypair.public_key()
            );
        }
    }

    #[test]
    fn wrong_recovery_id_recovers_other_key() {
        let keypair = Keypair::generate(&mut OsRng);
        let msg = [0x3c; 32];
        let sig = keypair.sign(&msg).unwrap();
        let wrong =
            Signature::from_scalars(*sig.r(), *sig.s(), sig.v() ^ RECOVERY_ID_Y_ODD).unwrap();

        assert_ne!(&wrong.recover_public_key(&msg).unwrap(), keypair.public_key());
    }
}
