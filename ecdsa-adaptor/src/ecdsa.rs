//! Elliptic Curve Digital Signature Algorithm (ECDSA) over pre-hashed
//! 32-byte messages.
//!
//! Signing does *not* normalize `s` into the lower half of the scalar range;
//! call [`Signature::normalize_s`] where "low S" signatures are required
//! (e.g. Bitcoin consensus, or verifiers such as `k256::ecdsa`).

mod recoverable;
mod sign;
mod verify;

pub use self::{
    sign::{sign, sign_with_nonce},
    verify::verify,
};

pub(crate) use self::recoverable::recovery_id;

use crate::{arithmetic, Error, Result, SCALAR_SIZE};
use elliptic_curve::scalar::IsHigh;
use k256::Scalar;

#[cfg(feature = "serde")]
use serdect::serde::{de, ser, Deserialize, Serialize};

/// Recovery id bit set when the ephemeral point has an odd y-coordinate.
const RECOVERY_ID_Y_ODD: u8 = 0b01;

/// Recovery id bit set when the ephemeral point's x-coordinate was reduced
/// modulo the group order.
const RECOVERY_ID_X_REDUCED: u8 = 0b10;

/// Largest valid recovery id.
const RECOVERY_ID_MAX: u8 = RECOVERY_ID_X_REDUCED | RECOVERY_ID_Y_ODD;

/// ECDSA/secp256k1 signature with a recovery id.
///
/// Serialized either in compact form:
///
/// - `r`: 32-byte integer, big endian
/// - `s`: 32-byte integer, big endian
///
/// or in Ethereum-style recoverable form, with a trailing byte:
///
/// - `v`: 1-byte recovery id
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
    v: u8,
}

impl Signature {
    /// Size of a compact signature in bytes.
    pub const BYTE_SIZE: usize = 2 * SCALAR_SIZE;

    /// Size of a recoverable signature in bytes.
    pub const RECOVERABLE_BYTE_SIZE: usize = Self::BYTE_SIZE + 1;

    /// Create a signature from its components.
    pub fn from_scalars(r: Scalar, s: Scalar, v: u8) -> Result<Self> {
        if v > RECOVERY_ID_MAX {
            return Err(Error::InvalidRecoveryId(v));
        }

        Ok(Self { r, s, v })
    }

    /// Assemble a signature from components whose recovery id is known to
    /// be in range.
    pub(crate) fn from_parts(r: Scalar, s: Scalar, v: u8) -> Self {
        debug_assert!(v <= RECOVERY_ID_MAX);
        Self { r, s, v }
    }

    /// Parse a compact (64-byte) or recoverable (65-byte) signature.
    ///
    /// Compact signatures get a recovery id of `0`. Components which are
    /// not below the group order are rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let v = match bytes.len() {
            Self::BYTE_SIZE => 0,
            Self::RECOVERABLE_BYTE_SIZE => bytes[Self::BYTE_SIZE],
            actual => {
                return Err(Error::InvalidEncodingLength {
                    expected: Self::BYTE_SIZE,
                    actual,
                })
            }
        };

        let r = arithmetic::scalar_from_slice(&bytes[..SCALAR_SIZE])?;
        let s = arithmetic::scalar_from_slice(&bytes[SCALAR_SIZE..Self::BYTE_SIZE])?;
        Self::from_scalars(r, s, v)
    }

    /// Serialize as `r || s`.
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        let mut bytes = [0u8; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = bytes.split_at_mut(SCALAR_SIZE);
        r_bytes.copy_from_slice(&arithmetic::scalar_to_bytes(&self.r));
        s_bytes.copy_from_slice(&arithmetic::scalar_to_bytes(&self.s));
        bytes
    }

    /// Serialize as `r || s || v`.
    pub fn to_recoverable_bytes(&self) -> [u8; Self::RECOVERABLE_BYTE_SIZE] {
        let mut bytes = [0u8; Self::RECOVERABLE_BYTE_SIZE];
        bytes[..Self::BYTE_SIZE].copy_from_slice(&self.to_bytes());
        bytes[Self::BYTE_SIZE] = self.v;
        bytes
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &Scalar {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &Scalar {
        &self.s
    }

    /// Get the recovery id.
    ///
    /// Bit 0 is set if the ephemeral point's y-coordinate is odd, bit 1 if
    /// its x-coordinate was reduced modulo the group order.
    pub fn v(&self) -> u8 {
        self.v
    }

    /// Is `s` in the lower half of the scalar range?
    pub fn is_low_s(&self) -> bool {
        !bool::from(self.s.is_high())
    }

    /// Normalize into "low S" form as described in
    /// [BIP 0062: Dealing with Malleability][1].
    ///
    /// Negating `s` corresponds to negating the ephemeral point, so the
    /// y-parity bit of the recovery id is flipped along with it.
    ///
    /// [1]: https://github.com/bitcoin/bips/blob/master/bip-0062.mediawiki
    pub fn normalize_s(&self) -> Self {
        if self.is_low_s() {
            *self
        } else {
            Self {
                r: self.r,
                s: -self.s,
                v: self.v ^ RECOVERY_ID_Y_ODD,
            }
        }
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl From<Signature> for [u8; Signature::RECOVERABLE_BYTE_SIZE] {
    fn from(signature: Signature) -> Self {
        signature.to_recoverable_bytes()
    }
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_recoverable_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; Self::RECOVERABLE_BYTE_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_slice(&bytes).map_err(de::Error::custom)
    }
}
