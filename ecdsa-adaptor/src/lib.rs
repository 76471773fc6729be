//! ECDSA adaptor signatures over secp256k1.
//!
//! An adaptor signature ("encrypted signature") is an ECDSA signature that
//! has been verifiably encrypted under a public *encryption key* `Y = y×G`.
//! Anyone holding the *decryption key* `y` can turn it into an ordinary
//! ECDSA signature, and anyone who sees both the encrypted and the completed
//! signature learns `y`. This is the building block of atomic cross-chain
//! swaps and other conditional payment protocols.
//!
//! The crate provides:
//!
//! - [`ecdsa`]: plain ECDSA signing/verification over pre-hashed 32-byte
//!   messages, with 64-byte compact and 65-byte recoverable encodings
//!   compatible with Bitcoin and Ethereum tooling.
//! - [`dleq`]: a non-interactive Chaum–Pedersen proof that two point pairs
//!   share a discrete logarithm.
//! - [`adaptor`]: encrypting, verifying, decrypting and recovering adaptor
//!   signatures.
//!
//! Group and field arithmetic come from the [`k256`] crate.
//!
//! ## Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn main() -> Result<(), ecdsa_adaptor::Error> {
//! use ecdsa_adaptor::{adaptor, Keypair};
//! use rand_core::OsRng; // requires 'getrandom' feature
//!
//! let alice = Keypair::generate(&mut OsRng);
//! let one_time = Keypair::generate(&mut OsRng);
//! let digest = [0x42; 32];
//!
//! // Alice encrypts a signature to the one-time key...
//! let encrypted = alice.adaptor_sign(&mut OsRng, &digest, one_time.public_key())?;
//! assert!(adaptor::verify_adaptor(alice.public_key(), &digest, one_time.public_key(), &encrypted)?);
//!
//! // ...the holder of the one-time secret completes it...
//! let signature = adaptor::decrypt(&encrypted, one_time.private_key());
//! assert!(alice.public_key().verify(&digest, &signature)?);
//!
//! // ...and publishing the signature reveals the one-time secret.
//! let recovered = adaptor::recover_decryption_key(&encrypted, one_time.public_key(), &signature)?;
//! assert_eq!(&recovered.public_key(), one_time.public_key());
//! # Ok(())
//! # }
//! ```

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(feature = "std")]
extern crate std;

pub mod adaptor;
pub mod dleq;
pub mod ecdsa;
pub mod nonce;

mod arithmetic;
mod keys;

pub use crate::{
    adaptor::EncryptedSignature,
    dleq::DleqProof,
    ecdsa::Signature,
    keys::{Keypair, PrivateKey, PublicKey},
    nonce::{NonceGenerator, RandomNonce, Rfc6979},
};
pub use elliptic_curve::rand_core::CryptoRngCore;
pub use k256;

use thiserror::Error;

/// Size of a message digest accepted by the signing and verification
/// operations in bytes.
pub const MESSAGE_SIZE: usize = 32;

/// Size of a SEC1 compressed point in bytes.
pub const COMPRESSED_POINT_SIZE: usize = 33;

/// Size of a SEC1 uncompressed point in bytes.
pub const UNCOMPRESSED_POINT_SIZE: usize = 65;

/// Size of a serialized scalar in bytes.
pub const SCALAR_SIZE: usize = 32;

/// Errors produced by this crate.
///
/// Verification failures are *not* errors: the verification functions
/// return `Ok(false)` for well-formed inputs which simply don't verify.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// Message is not a 32-byte digest.
    #[error("invalid message length: expected a 32-byte digest, got {0} bytes")]
    InvalidMessageLength(usize),

    /// An ephemeral point turned out to be the point at infinity.
    #[error("ephemeral point is the point at infinity")]
    DegenerateEphemeralPoint,

    /// Fixed-width decoding was given an input of the wrong size.
    #[error("invalid encoding length: expected {expected} bytes, got {actual}")]
    InvalidEncodingLength {
        /// Expected size in bytes.
        expected: usize,
        /// Size of the input in bytes.
        actual: usize,
    },

    /// Bytes don't encode a point on the curve (or encode the identity).
    #[error("point decoding failed: not a valid secp256k1 point")]
    PointDecodeFailed,

    /// Decoded integer is not below the group order.
    #[error("scalar overflow: value is not below the group order")]
    ScalarOverflow,

    /// Decoded scalar is zero where a non-zero value is required.
    #[error("scalar is zero")]
    ZeroScalar,

    /// Recovery id is outside of `0..=3`.
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// No public key could be recovered from a signature.
    #[error("public key recovery failed")]
    RecoveryFailed,

    /// Signature `r` doesn't match the adaptor's encrypted nonce point.
    #[error("invalid signature for adaptor: r check failed")]
    RCheckFailed,

    /// Recovered decryption key doesn't match the encryption key.
    #[error("invalid signature for adaptor: y check failed")]
    YCheckFailed,

    /// The nonce generator failed to produce a nonce.
    #[error("nonce generation failed")]
    NonceGenerationFailed,
}

/// Result type with the crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
