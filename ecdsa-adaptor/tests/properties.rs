//! Property-based tests for signing, adaptor signatures and encodings.

use ecdsa_adaptor::{
    adaptor, ecdsa, k256::NonZeroScalar, EncryptedSignature, Error, Keypair, PrivateKey, PublicKey,
    Signature,
};
use elliptic_curve::{bigint::U256, ops::Reduce};
use proptest::prelude::*;
use rand_core::OsRng;

prop_compose! {
    fn keypair()(bytes in any::<[u8; 32]>()) -> Keypair {
        let scalar = <NonZeroScalar as Reduce<U256>>::reduce_bytes(&bytes.into());
        Keypair::from(PrivateKey::from(scalar))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn ecdsa_correctness(kp in keypair(), msg in any::<[u8; 32]>()) {
        let sig = ecdsa::sign(kp.private_key(), &msg).unwrap();
        prop_assert!(ecdsa::verify(kp.public_key(), &msg, &sig).unwrap());
        prop_assert!(kp.public_key().verify(&msg, &sig.normalize_s()).unwrap());
        prop_assert_eq!(&sig.recover_public_key(&msg).unwrap(), kp.public_key());
    }

    #[test]
    fn adaptor_soundness(alice in keypair(), one_time in keypair(), msg in any::<[u8; 32]>()) {
        let encrypted = alice.adaptor_sign(&mut OsRng, &msg, one_time.public_key()).unwrap();
        prop_assert!(
            adaptor::verify_adaptor(alice.public_key(), &msg, one_time.public_key(), &encrypted)
                .unwrap()
        );
    }

    #[test]
    fn adaptor_completion(alice in keypair(), one_time in keypair(), msg in any::<[u8; 32]>()) {
        let encrypted = alice.adaptor_sign(&mut OsRng, &msg, one_time.public_key()).unwrap();
        let sig = adaptor::decrypt(&encrypted, one_time.private_key());

        prop_assert!(sig.is_low_s());
        prop_assert!(alice.public_key().verify(&msg, &sig).unwrap());
        prop_assert_eq!(&sig.recover_public_key(&msg).unwrap(), alice.public_key());
    }

    #[test]
    fn recoverability(alice in keypair(), one_time in keypair(), msg in any::<[u8; 32]>()) {
        let encrypted = alice.adaptor_sign(&mut OsRng, &msg, one_time.public_key()).unwrap();
        let sig = adaptor::decrypt(&encrypted, one_time.private_key());
        let y = adaptor::recover_decryption_key(&encrypted, one_time.public_key(), &sig).unwrap();

        prop_assert_eq!(&y.public_key(), one_time.public_key());
    }

    #[test]
    fn signature_round_trip(kp in keypair(), msg in any::<[u8; 32]>()) {
        let sig = kp.sign(&msg).unwrap();
        prop_assert_eq!(Signature::from_slice(&sig.to_recoverable_bytes()).unwrap(), sig);

        let compact = Signature::from_slice(&sig.to_bytes()).unwrap();
        prop_assert_eq!(compact.r(), sig.r());
        prop_assert_eq!(compact.s(), sig.s());
    }

    #[test]
    fn encrypted_signature_round_trip(
        alice in keypair(),
        one_time in keypair(),
        msg in any::<[u8; 32]>()
    ) {
        let encrypted = alice.adaptor_sign(&mut OsRng, &msg, one_time.public_key()).unwrap();
        let decoded = EncryptedSignature::from_slice(&encrypted.to_bytes()).unwrap();

        prop_assert_eq!(decoded, encrypted);
        prop_assert!(alice.public_key().verify_adaptor(&msg, one_time.public_key(), &decoded).unwrap());
    }

    #[test]
    fn public_key_round_trip(kp in keypair()) {
        let public = kp.public_key();
        prop_assert_eq!(&PublicKey::from_sec1_bytes(&public.to_bytes()).unwrap(), public);
        prop_assert_eq!(&PublicKey::from_sec1_bytes(&public.to_uncompressed_bytes()).unwrap(), public);
    }

    #[test]
    fn encrypted_signature_rejects_wrong_lengths(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        prop_assume!(bytes.len() != EncryptedSignature::BYTE_SIZE);
        prop_assert_eq!(
            EncryptedSignature::from_slice(&bytes),
            Err(Error::InvalidEncodingLength {
                expected: EncryptedSignature::BYTE_SIZE,
                actual: bytes.len(),
            })
        );
    }

    #[test]
    fn short_messages_are_rejected(kp in keypair(), len in 0usize..32) {
        let msg = vec![0x5au8; len];
        let sig = kp.sign(&[0u8; 32]).unwrap();

        prop_assert_eq!(kp.sign(&msg), Err(Error::InvalidMessageLength(len)));
        prop_assert_eq!(kp.public_key().verify(&msg, &sig), Err(Error::InvalidMessageLength(len)));
        prop_assert_eq!(
            kp.adaptor_sign(&mut OsRng, &msg, kp.public_key()),
            Err(Error::InvalidMessageLength(len))
        );
    }
}

#[test]
fn adaptor_with_proof_for_different_nonce_is_rejected() {
    let alice = Keypair::generate(&mut OsRng);
    let one_time = Keypair::generate(&mut OsRng);
    let msg = [0x42; 32];
    let encrypted = alice
        .adaptor_sign(&mut OsRng, &msg, one_time.public_key())
        .unwrap();

    // re-prove the statement for an unrelated nonce and splice it in
    let proof = ecdsa_adaptor::DleqProof::prove(
        &mut OsRng,
        &NonZeroScalar::random(&mut OsRng),
        encrypted.nonce_point(),
        encrypted.encrypted_nonce_point(),
        one_time.public_key(),
    );
    let mut bytes = encrypted.to_bytes();
    bytes[98..].copy_from_slice(&proof.to_bytes());
    let forged = EncryptedSignature::from_slice(&bytes).unwrap();

    assert_eq!(
        adaptor::verify_adaptor(alice.public_key(), &msg, one_time.public_key(), &forged),
        Ok(false)
    );
}

#[test]
fn tampered_signature_fails() {
    use sha2::{Digest, Sha256};

    let keypair = Keypair::generate(&mut OsRng);
    let digest = Sha256::digest(b"test");
    let sig = keypair.sign(&digest).unwrap();
    let encoded = sig.to_bytes();
    assert_eq!(encoded.len(), 64);
    assert!(keypair.public_key().verify(&digest, &sig).unwrap());

    for i in 32..64 {
        let mut tampered = encoded;
        tampered[i] ^= 0x80;
        let verified = Signature::from_slice(&tampered)
            .map(|sig| keypair.public_key().verify(&digest, &sig).unwrap())
            .unwrap_or(false);
        assert!(!verified);
    }
}
