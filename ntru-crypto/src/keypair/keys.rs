use crate::cipher::{self, Ciphertext};
use crate::errors::NtruCryptoError;
use crate::keypair::params::NtruParams;
use crate::ring::{Polynomial, invert};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public key `h = p * f_q^-1 * g (mod q)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    params: NtruParams,
    h: Polynomial,
}

/// Private key `(f, f_p^-1)` with `f * f_p^-1 = 1 (mod p)`. Wiped on drop.
///
/// Deserialization recomputes `f_p^-1` from `f` and rejects keys whose stored inverse differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(try_from = "RawPrivateKey")]
pub struct PrivateKey {
    #[zeroize(skip)]
    params: NtruParams,
    f: Polynomial,
    fp_inv: Polynomial,
}

#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
struct RawPrivateKey {
    #[zeroize(skip)]
    params: NtruParams,
    f: Polynomial,
    fp_inv: Polynomial,
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl PublicKey {
    /// Rebuilds a public key from its polynomial, e.g. one received from a peer.
    pub fn try_with(params: NtruParams, h: Polynomial) -> Result<Self, NtruCryptoError> {
        if h.len() != params.n() {
            return Err(NtruCryptoError::DimensionMismatch(format!(
                "Public key has {} coefficients, expected N={}",
                h.len(),
                params.n()
            )));
        }
        if !h.is_reduced(&params.ring_q()) {
            return Err(NtruCryptoError::InvalidParameters(format!(
                "Public key coefficients must lie in [0, {})",
                params.q()
            )));
        }

        Ok(Self { params, h })
    }

    pub fn params(&self) -> &NtruParams {
        &self.params
    }

    pub fn h(&self) -> &Polynomial {
        &self.h
    }

    pub fn encrypt<R: Rng + ?Sized>(
        &self,
        message: &Polynomial,
        rng: &mut R,
    ) -> Result<Ciphertext, NtruCryptoError> {
        cipher::encrypt(message, self, rng)
    }

    pub fn to_json(&self) -> Result<String, NtruCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses and re-validates a key produced by [`PublicKey::to_json`].
    pub fn from_json(json: &str) -> Result<Self, NtruCryptoError> {
        let raw: PublicKey = serde_json::from_str(json)?;
        PublicKey::try_with(raw.params, raw.h)
    }
}

impl PrivateKey {
    /// Builds a private key from `f`, computing `f_p^-1`. A rejected `f` is wiped.
    pub fn try_with(params: NtruParams, mut f: Polynomial) -> Result<Self, NtruCryptoError> {
        let inverted = Self::invert_f(&params, &f);
        let fp_inv = wipe_on_error(&mut f, inverted)?;

        Ok(Self { params, f, fp_inv })
    }

    fn invert_f(params: &NtruParams, f: &Polynomial) -> Result<Polynomial, NtruCryptoError> {
        if f.len() != params.n() {
            return Err(NtruCryptoError::DimensionMismatch(format!(
                "f has {} coefficients, expected N={}",
                f.len(),
                params.n()
            )));
        }

        invert(f, params.p())
    }

    pub fn params(&self) -> &NtruParams {
        &self.params
    }

    pub fn f(&self) -> &Polynomial {
        &self.f
    }

    pub fn fp_inv(&self) -> &Polynomial {
        &self.fp_inv
    }

    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<Polynomial, NtruCryptoError> {
        cipher::decrypt(ciphertext, self)
    }

    pub fn to_json(&self) -> Result<String, NtruCryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a key produced by [`PrivateKey::to_json`]; see the type docs for the checks.
    pub fn from_json(json: &str) -> Result<Self, NtruCryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<RawPrivateKey> for PrivateKey {
    type Error = NtruCryptoError;

    fn try_from(mut raw: RawPrivateKey) -> Result<Self, Self::Error> {
        let key = PrivateKey::try_with(raw.params, std::mem::take(&mut raw.f))?;

        if key.fp_inv != raw.fp_inv {
            return Err(NtruCryptoError::InvalidParameters(
                "Stored f_p^-1 is not the inverse of f mod p".to_string(),
            ));
        }

        Ok(key)
    }
}

/// Zeroizes `secret` if `result` is an error.
fn wipe_on_error<T>(
    secret: &mut Polynomial,
    result: Result<T, NtruCryptoError>,
) -> Result<T, NtruCryptoError> {
    if result.is_err() {
        secret.zeroize();
    }
    result
}

impl KeyPair {
    /// Samples `f` (d+1 ones, d minus ones) and `g` (d ones, d minus ones) until `f` is
    /// invertible both mod p and mod q, giving up after `params.max_keygen_attempts()` draws.
    ///
    /// # Errors
    ///
    /// * `KeyGenerationExhausted` when no invertible `f` was found within the cap.
    /// * `Unsupported` / `InvalidParameters` are returned immediately, never retried.
    pub fn generate<R: Rng + ?Sized>(
        params: &NtruParams,
        rng: &mut R,
    ) -> Result<Self, NtruCryptoError> {
        if !params.decryption_guaranteed() {
            warn!(
                n = params.n(),
                p = params.p(),
                q = params.q(),
                noise_bound = params.noise_bound(),
                "parameters do not guarantee correct decryption"
            );
        }

        let sampler = params.sampler();
        let d = params.d();
        let attempts = params.max_keygen_attempts();

        for attempt in 1..=attempts {
            let f = sampler.sample(d + 1, d, rng)?;
            let mut g = sampler.sample(d, d, rng)?;

            let result = Self::from_polynomials(params, f, &g);
            g.zeroize();

            match result {
                Ok(key_pair) => {
                    info!(attempt, n = params.n(), "generated key pair");
                    return Ok(key_pair);
                }
                Err(NtruCryptoError::NoInverse(reason)) => {
                    debug!(attempt, %reason, "f is not invertible, drawing again");
                }
                Err(e) => return Err(e),
            }
        }

        Err(NtruCryptoError::KeyGenerationExhausted { attempts })
    }

    /// Deterministic key derivation from given `f` and `g`.
    ///
    /// # Errors
    ///
    /// Returns `NoInverse` if `f` is not a unit mod p or mod q.
    pub fn from_polynomials(
        params: &NtruParams,
        f: Polynomial,
        g: &Polynomial,
    ) -> Result<Self, NtruCryptoError> {
        if g.len() != params.n() {
            return Err(NtruCryptoError::DimensionMismatch(format!(
                "g has {} coefficients, expected N={}",
                g.len(),
                params.n()
            )));
        }

        let private_key = PrivateKey::try_with(*params, f)?;
        let mut fq_inv = invert(private_key.f(), params.q())?;

        let ring_q = params.ring_q();
        let mut scaled = fq_inv.scalar_mul(params.p() as i64, &ring_q);
        let h = scaled.multiply_mod(g, &ring_q);
        fq_inv.zeroize();
        scaled.zeroize();
        let h = h?;

        Ok(Self {
            private_key,
            public_key: PublicKey {
                params: *params,
                h,
            },
        })
    }
}
