//! Message codec: maps application bytes to message polynomials and back.
//!
//! Every byte becomes a fixed number of base-p digits (little-endian). The digit stream starts
//! with a 4-byte big-endian length prefix and is cut into blocks of N coefficients, the last one
//! zero padded. Ciphertext blocks are exchanged as JSON.

use crate::cipher::{self, Ciphertext};
use crate::errors::NtruCryptoError;
use crate::keypair::{NtruParams, PrivateKey, PublicKey};
use crate::ring::Polynomial;

use rand::Rng;

const LENGTH_PREFIX_BYTES: usize = std::mem::size_of::<u32>();

/// Number of base-p digits needed to hold one byte.
///
/// # Example
///
/// ```
/// # use ntru_crypto::codec::digits_per_byte;
/// assert_eq!(digits_per_byte(3), 6); // 3^6 = 729 >= 256
/// assert_eq!(digits_per_byte(2), 8);
/// assert_eq!(digits_per_byte(257), 1);
/// ```
pub fn digits_per_byte(p: u64) -> usize {
    let mut digits = 1;
    let mut capacity = p.max(2);
    while capacity < 256 {
        capacity = capacity.saturating_mul(p.max(2));
        digits += 1;
    }
    digits
}

/// Encodes `bytes` losslessly into message polynomials with coefficients in `[0, p)`.
///
/// # Errors
///
/// Returns `NtruCryptoError::EncodingError` if the input is longer than `u32::MAX` bytes.
pub fn encode_bytes(params: &NtruParams, bytes: &[u8]) -> Result<Vec<Polynomial>, NtruCryptoError> {
    let length = u32::try_from(bytes.len()).map_err(|_| {
        NtruCryptoError::EncodingError(format!("Input of {} bytes is too long", bytes.len()))
    })?;

    let p = params.p();
    let width = digits_per_byte(p);

    let mut digits = Vec::with_capacity((bytes.len() + LENGTH_PREFIX_BYTES) * width);
    for &byte in length.to_be_bytes().iter().chain(bytes) {
        let mut value = byte as u64;
        for _ in 0..width {
            digits.push((value % p) as i64);
            value /= p;
        }
    }

    Ok(digits
        .chunks(params.n())
        .map(|chunk| {
            let mut coeffs = chunk.to_vec();
            coeffs.resize(params.n(), 0);
            Polynomial::from_coeffs(coeffs)
        })
        .collect())
}

/// Inverse of [`encode_bytes`].
///
/// # Errors
///
/// Returns `NtruCryptoError::DecodingError` on malformed blocks, digit groups that do not form a
/// byte, or a length prefix that exceeds the decoded data.
pub fn decode_bytes(
    params: &NtruParams,
    blocks: &[Polynomial],
) -> Result<Vec<u8>, NtruCryptoError> {
    let ring_p = params.ring_p();
    let p = params.p();
    let width = digits_per_byte(p);

    let mut digits = Vec::with_capacity(blocks.len() * params.n());
    for (index, block) in blocks.iter().enumerate() {
        if block.len() != params.n() || !block.is_reduced(&ring_p) {
            return Err(NtruCryptoError::DecodingError(format!(
                "Block {} is not a message polynomial of dimension {} mod {}",
                index,
                params.n(),
                p
            )));
        }
        digits.extend_from_slice(block.coeffs());
    }

    let mut bytes = Vec::with_capacity(digits.len() / width);
    for group in digits.chunks_exact(width) {
        let value = group
            .iter()
            .rev()
            .fold(0u64, |acc, &digit| acc * p + digit as u64);
        let byte = u8::try_from(value).map_err(|_| {
            NtruCryptoError::DecodingError(format!("Digit group {:?} is not a byte", group))
        })?;
        bytes.push(byte);
    }

    if bytes.len() < LENGTH_PREFIX_BYTES {
        return Err(NtruCryptoError::DecodingError(
            "Missing length prefix".to_string(),
        ));
    }
    let (prefix, payload) = bytes.split_at(LENGTH_PREFIX_BYTES);
    let mut length_bytes = [0u8; LENGTH_PREFIX_BYTES];
    length_bytes.copy_from_slice(prefix);
    let length = u32::from_be_bytes(length_bytes) as usize;

    if length > payload.len() {
        return Err(NtruCryptoError::DecodingError(format!(
            "Length prefix {} exceeds the {} decoded bytes",
            length,
            payload.len()
        )));
    }

    Ok(payload[..length].to_vec())
}

/// Single-block lossy encoding: the first N characters, each as `code point mod p`.
pub fn encode_ascii_mod_p(params: &NtruParams, text: &str) -> Polynomial {
    let mut coeffs: Vec<i64> = text
        .chars()
        .take(params.n())
        .map(|c| (c as u64 % params.p()) as i64)
        .collect();
    coeffs.resize(params.n(), 0);

    Polynomial::from_coeffs(coeffs)
}

/// Encodes and encrypts `bytes`, returning the ciphertext blocks as a JSON array.
pub fn encrypt_bytes<R: Rng + ?Sized>(
    public_key: &PublicKey,
    bytes: &[u8],
    rng: &mut R,
) -> Result<String, NtruCryptoError> {
    let blocks = encode_bytes(public_key.params(), bytes)?;

    let mut ciphertexts: Vec<Ciphertext> = Vec::with_capacity(blocks.len());
    for block in blocks.iter() {
        ciphertexts.push(cipher::encrypt(block, public_key, rng)?);
    }

    Ok(serde_json::to_string(&ciphertexts)?)
}

/// Decrypts a JSON array produced by [`encrypt_bytes`].
pub fn decrypt_bytes(
    private_key: &PrivateKey,
    ciphertext: &str,
) -> Result<Vec<u8>, NtruCryptoError> {
    let ciphertexts: Vec<Ciphertext> = serde_json::from_str(ciphertext)?;

    let blocks = ciphertexts
        .iter()
        .map(|block| cipher::decrypt(block, private_key))
        .collect::<Result<Vec<_>, _>>()?;

    decode_bytes(private_key.params(), &blocks)
}

pub fn encrypt_string<R: Rng + ?Sized>(
    public_key: &PublicKey,
    text: &str,
    rng: &mut R,
) -> Result<String, NtruCryptoError> {
    encrypt_bytes(public_key, text.as_bytes(), rng)
}

pub fn decrypt_string(
    private_key: &PrivateKey,
    ciphertext: &str,
) -> Result<String, NtruCryptoError> {
    let bytes = decrypt_bytes(private_key, ciphertext)?;

    String::from_utf8(bytes).map_err(|e| {
        NtruCryptoError::DecodingError(format!("Decrypted bytes are not UTF-8: {}", e))
    })
}
