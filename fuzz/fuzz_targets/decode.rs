#![no_main]
// Decodes untrusted encrypted signatures and signatures, then runs every
// verification path over them. None of these may panic on any input.
use ecdsa_adaptor::{adaptor, EncryptedSignature, PublicKey, Signature};
use libfuzzer_sys::fuzz_target;

const MSG: [u8; 32] = [0x42; 32];

fuzz_target!(|data: &[u8]| {
    // key material: signer and encryption key from the leading bytes
    if data.len() < 66 {
        return;
    }
    let (keys, rest) = data.split_at(66);
    let (Ok(signer), Ok(encryption_key)) = (
        PublicKey::from_sec1_bytes(&keys[..33]),
        PublicKey::from_sec1_bytes(&keys[33..]),
    ) else {
        return;
    };

    let encrypted = rest
        .get(..EncryptedSignature::BYTE_SIZE)
        .and_then(|bytes| EncryptedSignature::from_slice(bytes).ok());
    let signature = rest
        .get(rest.len().saturating_sub(Signature::RECOVERABLE_BYTE_SIZE)..)
        .and_then(|bytes| Signature::from_slice(bytes).ok());

    if let Some(encrypted) = &encrypted {
        assert_eq!(EncryptedSignature::from_slice(&encrypted.to_bytes()).as_ref(), Ok(encrypted));
        let _ = adaptor::verify_adaptor(&signer, &MSG, &encryption_key, encrypted);
        let _ = encrypted
            .proof()
            .verify(&encryption_key, encrypted.nonce_point(), encrypted.encrypted_nonce_point());
    }

    if let Some(signature) = &signature {
        assert_eq!(Signature::from_slice(&signature.to_recoverable_bytes()).as_ref(), Ok(signature));
        let _ = signer.verify(&MSG, signature);
        let _ = signature.recover_public_key(&MSG);

        if let Some(encrypted) = &encrypted {
            let _ = adaptor::recover_decryption_key(encrypted, &encryption_key, signature);
        }
    }
});
