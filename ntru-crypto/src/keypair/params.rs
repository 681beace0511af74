use crate::errors::NtruCryptoError;
use crate::ring::{Ring, gcd, is_prime, power_of_two_exponent};
use crate::sampler::SmallPolynomialSampler;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_KEYGEN_ATTEMPTS: usize = 100;

/// Parameter set of one cryptosystem instance.
///
/// Every operation receives its parameters explicitly (keys carry theirs), so instances with
/// different parameters can coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParams", into = "RawParams")]
pub struct NtruParams {
    /// Ring dimension N of Z[x]/(x^N - 1).
    n: usize,
    /// Small modulus, prime.
    p: u64,
    /// Large modulus, a power of two.
    q: u64,
    /// Key generation gives up after this many draws of `f`.
    max_keygen_attempts: usize,
}

impl NtruParams {
    /// Toy parameters (N=11, p=3, q=32). Not secure.
    pub const TOY: NtruParams = NtruParams {
        n: 11,
        p: 3,
        q: 32,
        max_keygen_attempts: DEFAULT_MAX_KEYGEN_ATTEMPTS,
    };

    /// Creates a parameter set, checking the shapes the scheme relies on:
    /// `N > 0`, `p` prime, `q` a power of two, `q > p` and `gcd(p, q) = 1`.
    pub fn try_with(n: usize, p: u64, q: u64) -> Result<Self, NtruCryptoError> {
        if n == 0 {
            return Err(NtruCryptoError::InvalidParameters(
                "Ring dimension N must be > 0".to_string(),
            ));
        }

        if !is_prime(p) {
            return Err(NtruCryptoError::InvalidParameters(format!(
                "Small modulus p must be prime, got {}",
                p
            )));
        }

        if power_of_two_exponent(q).is_none() {
            return Err(NtruCryptoError::InvalidParameters(format!(
                "Large modulus q must be a power of two, got {}",
                q
            )));
        }

        if q <= p {
            return Err(NtruCryptoError::InvalidParameters(format!(
                "Large modulus q ({}) must be greater than p ({})",
                q, p
            )));
        }

        if gcd(p as i64, q as i64) != 1 {
            return Err(NtruCryptoError::InvalidParameters(format!(
                "p ({}) and q ({}) must be coprime",
                p, q
            )));
        }

        // Rejects q > i64::MAX
        Ring::try_with(q).map_err(|e| NtruCryptoError::InvalidParameters(e.to_string()))?;

        Ok(Self {
            n,
            p,
            q,
            max_keygen_attempts: DEFAULT_MAX_KEYGEN_ATTEMPTS,
        })
    }

    /// Sets the key generation retry cap.
    pub fn with_max_keygen_attempts(self, attempts: usize) -> Result<Self, NtruCryptoError> {
        if attempts == 0 {
            return Err(NtruCryptoError::InvalidParameters(
                "At least one key generation attempt is required".to_string(),
            ));
        }

        Ok(Self {
            max_keygen_attempts: attempts,
            ..self
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn p(&self) -> u64 {
        self.p
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    /// `floor(N / 3)`, the number of `+1`/`-1` coefficients of g and r.
    pub fn d(&self) -> usize {
        self.n / 3
    }

    /// Largest possible absolute coefficient of the decryption noise `p*r*g + f*m`.
    ///
    /// r has `2d` non-zero entries, f has `2d + 1` and message coefficients are below p.
    /// Saturates at `u64::MAX`.
    pub fn noise_bound(&self) -> u64 {
        let d = self.d() as u64;
        let blinding = self.p.saturating_mul(2).saturating_mul(d);
        let message = (d + 1).saturating_mul(self.p - 1);

        blinding.saturating_add(message)
    }

    /// True when every message decrypts correctly, i.e. the noise never leaves `(-q/2, q/2]`.
    pub fn decryption_guaranteed(&self) -> bool {
        self.noise_bound().saturating_mul(2) < self.q
    }

    pub fn max_keygen_attempts(&self) -> usize {
        self.max_keygen_attempts
    }

    pub fn ring_p(&self) -> Ring {
        Ring { modulus: self.p }
    }

    pub fn ring_q(&self) -> Ring {
        Ring { modulus: self.q }
    }

    pub fn sampler(&self) -> SmallPolynomialSampler {
        SmallPolynomialSampler::new(self.n)
    }
}

impl Default for NtruParams {
    fn default() -> Self {
        Self::TOY
    }
}

#[derive(Serialize, Deserialize)]
struct RawParams {
    n: usize,
    p: u64,
    q: u64,
    max_keygen_attempts: usize,
}

impl TryFrom<RawParams> for NtruParams {
    type Error = NtruCryptoError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        NtruParams::try_with(raw.n, raw.p, raw.q)?.with_max_keygen_attempts(raw.max_keygen_attempts)
    }
}

impl From<NtruParams> for RawParams {
    fn from(params: NtruParams) -> Self {
        Self {
            n: params.n,
            p: params.p,
            q: params.q,
            max_keygen_attempts: params.max_keygen_attempts,
        }
    }
}
