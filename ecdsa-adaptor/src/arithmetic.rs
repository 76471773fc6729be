//! Glue between the signature engines and `k256` group arithmetic.

use crate::{Error, Result, MESSAGE_SIZE, SCALAR_SIZE};
use elliptic_curve::{
    bigint::U256,
    group::Group,
    ops::Reduce,
    point::AffineCoordinates,
    sec1::ToEncodedPoint,
    PrimeField,
};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};
use tracing::trace;

/// Check a message is a 32-byte digest.
pub(crate) fn check_message(msg: &[u8]) -> Result<&[u8; MESSAGE_SIZE]> {
    msg.try_into()
        .map_err(|_| Error::InvalidMessageLength(msg.len()))
}

/// Interpret a message digest as a big endian integer and reduce it into
/// the scalar field.
///
/// Unlike [`scalar_from_slice`], a digest which is not below the group
/// order is reduced rather than rejected. Every ECDSA implementation treats
/// `z` this way, and rejecting such digests would make roughly one in
/// 2¹²⁸ messages unsignable.
pub(crate) fn message_scalar(msg: &[u8; MESSAGE_SIZE]) -> Scalar {
    let bytes = FieldBytes::from(*msg);

    if bool::from(Scalar::from_repr(bytes).is_none()) {
        trace!("message digest exceeds the group order, reducing");
    }

    <Scalar as Reduce<U256>>::reduce_bytes(&bytes)
}

/// Lift the x-coordinate of a point (an element of the base field) into a
/// big endian integer, then reduce it into the scalar field.
pub(crate) fn x_to_scalar(point: &AffinePoint) -> Scalar {
    <Scalar as Reduce<U256>>::reduce_bytes(&point.x())
}

/// Is the x-coordinate of this point at least the group order?
///
/// Such points need the "x reduced" bit of a recovery id.
pub(crate) fn is_x_reduced(point: &AffinePoint) -> bool {
    Scalar::from_repr(point.x()).is_none().into()
}

/// Decode a big endian scalar, rejecting values not below the group order.
pub(crate) fn scalar_from_slice(bytes: &[u8]) -> Result<Scalar> {
    if bytes.len() != SCALAR_SIZE {
        return Err(Error::InvalidEncodingLength {
            expected: SCALAR_SIZE,
            actual: bytes.len(),
        });
    }

    Option::from(Scalar::from_repr(*FieldBytes::from_slice(bytes))).ok_or(Error::ScalarOverflow)
}

/// Serialize a scalar as 32 big endian bytes.
pub(crate) fn scalar_to_bytes(scalar: &Scalar) -> [u8; SCALAR_SIZE] {
    let mut bytes = [0u8; SCALAR_SIZE];
    bytes.copy_from_slice(&scalar.to_repr());
    bytes
}

/// Multiplicative inverse, or `None` for zero.
pub(crate) fn invert(scalar: &Scalar) -> Option<Scalar> {
    scalar.invert().into()
}

/// SEC1 compressed encoding; the identity encodes as the single byte `0x00`.
pub(crate) fn encode_point(point: &ProjectivePoint) -> EncodedPoint {
    point.to_affine().to_encoded_point(true)
}

pub(crate) fn is_identity(point: &ProjectivePoint) -> bool {
    point.is_identity().into()
}
