//! # NTRU Crypto
//!
//! Educational NTRU-style public-key encryption over the truncated polynomial ring
//! Z[x]/(x^N - 1). Not secure: parameters are toy-sized and nothing is constant time.

pub mod cipher;
pub mod codec;
pub mod errors;
pub mod keypair;
pub mod ring;
pub mod sampler;

pub use cipher::{Ciphertext, decrypt, encrypt};
pub use errors::NtruCryptoError;
pub use keypair::{KeyPair, NtruParams, PrivateKey, PublicKey};
pub use ring::Polynomial;
pub use sampler::SmallPolynomialSampler;

/// Generates a key pair for `params`; see [`KeyPair::generate`].
pub fn keygen<R: rand::Rng + ?Sized>(
    params: &NtruParams,
    rng: &mut R,
) -> Result<(PrivateKey, PublicKey), NtruCryptoError> {
    let KeyPair {
        private_key,
        public_key,
    } = KeyPair::generate(params, rng)?;

    Ok((private_key, public_key))
}
