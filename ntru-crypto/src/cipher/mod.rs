//! Encryption and decryption.
//!
//! `c = r * h + m (mod q)` and `m = f_p^-1 * ((f * c mod q) centered mod p) (mod p)`.
//! Decryption has no integrity check: with an unsuitable key or parameters it returns a wrong
//! polynomial rather than an error.

use crate::errors::NtruCryptoError;
use crate::keypair::{PrivateKey, PublicKey};
use crate::ring::Polynomial;

use rand::Rng;
use tracing::trace;
use zeroize::Zeroize;

/// Ciphertext polynomial, coefficients in `[0, q)`.
pub type Ciphertext = Polynomial;

/// Encrypts a message polynomial with coefficients in `[0, p)`.
pub fn encrypt<R: Rng + ?Sized>(
    message: &Polynomial,
    public_key: &PublicKey,
    rng: &mut R,
) -> Result<Ciphertext, NtruCryptoError> {
    let params = public_key.params();
    let d = params.d();

    let mut r = params.sampler().sample(d, d, rng)?;
    let ciphertext = encrypt_with_blinding(message, public_key, &r);
    r.zeroize();

    ciphertext
}

/// Encryption with a caller-chosen blinding polynomial `r`.
///
/// # Errors
///
/// * `DimensionMismatch` if `message` or `r` is not of length N.
/// * `InvalidParameters` if a message coefficient lies outside `[0, p)`.
pub fn encrypt_with_blinding(
    message: &Polynomial,
    public_key: &PublicKey,
    r: &Polynomial,
) -> Result<Ciphertext, NtruCryptoError> {
    let params = public_key.params();
    let ring_q = params.ring_q();

    if message.len() != params.n() {
        return Err(NtruCryptoError::DimensionMismatch(format!(
            "Message has {} coefficients, expected N={}",
            message.len(),
            params.n()
        )));
    }
    if !message.is_reduced(&params.ring_p()) {
        return Err(NtruCryptoError::InvalidParameters(format!(
            "Message coefficients must lie in [0, {})",
            params.p()
        )));
    }

    let blinded = r.multiply_mod(public_key.h(), &ring_q)?;

    Ok(blinded.add(message)?.reduce_coeffs_mod(&ring_q))
}

/// Recovers the message polynomial, coefficients in `[0, p)`.
pub fn decrypt(
    ciphertext: &Ciphertext,
    private_key: &PrivateKey,
) -> Result<Polynomial, NtruCryptoError> {
    let params = private_key.params();
    if ciphertext.len() != params.n() {
        return Err(NtruCryptoError::DimensionMismatch(format!(
            "Ciphertext has {} coefficients, expected N={}",
            ciphertext.len(),
            params.n()
        )));
    }

    let ring_q = params.ring_q();
    let ring_p = params.ring_p();

    let mut a = private_key.f().multiply_mod(ciphertext, &ring_q)?;
    let mut a_centered = a.center(&ring_q);
    trace!(%a_centered, "centered f * c");

    let mut b = a_centered.reduce_coeffs_mod(&ring_p);
    let message = private_key.fp_inv().multiply_mod(&b, &ring_p);

    a.zeroize();
    a_centered.zeroize();
    b.zeroize();

    message
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::keypair::{KeyPair, NtruParams};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const TEST_SEED: u64 = 7;
    const MESSAGE: [i64; 11] = [1, 0, 1, 1, 0, 0, 1, 0, 1, 0, 0];

    fn poly(coeffs: &[i64]) -> Polynomial {
        Polynomial::from_coeffs(coeffs.to_vec())
    }

    fn known_key_pair() -> KeyPair {
        let f = poly(&[1, 1, -1, 0, 1, -1, 0, 1, -1, 0, 0]);
        let g = poly(&[0, -1, 1, 0, 1, 0, -1, 0, 0, 1, -1]);
        KeyPair::from_polynomials(&NtruParams::TOY, f, &g).unwrap()
    }

    #[test]
    fn test_known_answer_encryption() -> Result<(), NtruCryptoError> {
        let key_pair = known_key_pair();
        let r = poly(&[-1, 0, 0, 1, 0, 1, 0, -1, 1, 0, -1]);

        let ciphertext = encrypt_with_blinding(&poly(&MESSAGE), &key_pair.public_key, &r)?;
        assert_eq!(ciphertext.coeffs(), &[14, 9, 4, 3, 17, 7, 21, 19, 23, 7, 9]);

        let recovered = decrypt(&ciphertext, &key_pair.private_key)?;
        assert_eq!(recovered.coeffs(), &MESSAGE);
        Ok(())
    }

    #[test]
    fn test_wrong_key_decrypts_silently_to_garbage() -> Result<(), NtruCryptoError> {
        let key_pair = known_key_pair();
        let r = poly(&[-1, 0, 0, 1, 0, 1, 0, -1, 1, 0, -1]);
        let ciphertext = encrypt_with_blinding(&poly(&MESSAGE), &key_pair.public_key, &r)?;

        let other = KeyPair::from_polynomials(
            &NtruParams::TOY,
            poly(&[1, -1, 1, 1, 0, 0, -1, 0, 1, -1, 0]),
            &poly(&[0, -1, 1, 0, 1, 0, -1, 0, 0, 1, -1]),
        )?;

        let recovered = decrypt(&ciphertext, &other.private_key)?;
        assert_eq!(recovered.coeffs(), &[0, 0, 1, 2, 2, 1, 2, 2, 1, 0, 0]);
        assert_ne!(recovered.coeffs(), &MESSAGE);
        Ok(())
    }

    #[test]
    fn test_round_trip_with_guaranteed_parameters() -> Result<(), NtruCryptoError> {
        let params = NtruParams::try_with(11, 3, 64)?;
        assert!(params.decryption_guaranteed());
        let mut rng = StdRng::seed_from_u64(TEST_SEED);

        for _ in 0..20 {
            let key_pair = KeyPair::generate(&params, &mut rng)?;
            let message =
                Polynomial::from_coeffs((0..11).map(|_| rng.random_range(0..3)).collect());

            let ciphertext = encrypt(&message, &key_pair.public_key, &mut rng)?;
            assert!(ciphertext.is_reduced(&params.ring_q()));
            assert_eq!(decrypt(&ciphertext, &key_pair.private_key)?, message);
        }
        Ok(())
    }

    #[test]
    fn test_encryption_is_randomized() -> Result<(), NtruCryptoError> {
        let key_pair = known_key_pair();
        let mut rng = StdRng::seed_from_u64(TEST_SEED);
        let message = poly(&MESSAGE);

        let ciphertexts: Vec<Ciphertext> = (0..5)
            .map(|_| encrypt(&message, &key_pair.public_key, &mut rng))
            .collect::<Result<_, _>>()?;

        assert!(ciphertexts.iter().any(|c| c != &ciphertexts[0]));
        Ok(())
    }

    #[test]
    fn test_rejects_malformed_messages() {
        let key_pair = known_key_pair();
        let mut rng = StdRng::seed_from_u64(TEST_SEED);

        assert!(matches!(
            encrypt(&poly(&[1, 0, 1]), &key_pair.public_key, &mut rng),
            Err(NtruCryptoError::DimensionMismatch(_))
        ));
        assert!(matches!(
            encrypt(&poly(&[3; 11]), &key_pair.public_key, &mut rng),
            Err(NtruCryptoError::InvalidParameters(_))
        ));
        assert!(matches!(
            encrypt(&poly(&[-1; 11]), &key_pair.public_key, &mut rng),
            Err(NtruCryptoError::InvalidParameters(_))
        ));
        assert!(matches!(
            decrypt(&Polynomial::zero(5), &key_pair.private_key),
            Err(NtruCryptoError::DimensionMismatch(_))
        ));
    }
}
