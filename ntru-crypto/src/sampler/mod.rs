//! Ternary ("small") polynomial sampling.

use crate::errors::NtruCryptoError;
use crate::ring::Polynomial;

use rand::Rng;
use rand::seq::index;

/// Draws polynomials with exactly `d1` coefficients equal to `+1`, `d2` equal to `-1` and the
/// rest zero, from an injected randomness source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallPolynomialSampler {
    n: usize,
}

impl SmallPolynomialSampler {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Picks `d1 + d2` distinct positions uniformly without replacement; the first `d1` become
    /// `+1`, the next `d2` become `-1`.
    ///
    /// # Errors
    ///
    /// Returns `NtruCryptoError::InvalidParameters` if `d1 + d2 > N`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        d1: usize,
        d2: usize,
        rng: &mut R,
    ) -> Result<Polynomial, NtruCryptoError> {
        let total = d1.checked_add(d2).filter(|&t| t <= self.n).ok_or_else(|| {
            NtruCryptoError::InvalidParameters(format!(
                "Cannot place {} + {} non-zero coefficients in a ring of dimension {}",
                d1, d2, self.n
            ))
        })?;

        let mut coeffs = vec![0i64; self.n];
        for (rank, position) in index::sample(rng, self.n, total).iter().enumerate() {
            coeffs[position] = if rank < d1 { 1 } else { -1 };
        }

        Ok(Polynomial::from_coeffs(coeffs))
    }
}
