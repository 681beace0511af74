//! Elements of the truncated polynomial ring Z[x]/(x^N - 1).
//!
//! A [`Polynomial`] is a coefficient vector of fixed length N where index `i` holds the
//! coefficient of `x^i`. N is carried by the vector length; every binary operation checks that
//! both operands live in the same ring. Operations never mutate their operands.

use crate::errors::NtruCryptoError;
use crate::ring::{Ring, Vector};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Zeroize)]
pub struct Polynomial {
    coeffs: Vector,
}

impl Polynomial {
    /// Wraps a coefficient vector; its length fixes N for this element.
    pub fn from_coeffs(coeffs: Vector) -> Self {
        Self { coeffs }
    }

    pub fn zero(n: usize) -> Self {
        Self {
            coeffs: vec![0; n],
        }
    }

    /// The multiplicative identity: 1 at index 0, 0 elsewhere.
    pub fn one(n: usize) -> Self {
        let mut poly = Self::zero(n);
        if let Some(c) = poly.coeffs.first_mut() {
            *c = 1;
        }
        poly
    }

    pub fn coeffs(&self) -> &[i64] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vector {
        self.coeffs
    }

    /// Ring dimension N.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Index of the highest non-zero coefficient, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|&c| c != 0)
    }

    /// True when every coefficient already lies in `[0, m)`.
    pub fn is_reduced(&self, ring: &Ring) -> bool {
        let m = ring.modulus() as i64;
        self.coeffs.iter().all(|&c| (0..m).contains(&c))
    }

    /// Coefficient-wise integer sum (no modular reduction).
    pub fn add(&self, other: &Self) -> Result<Self, NtruCryptoError> {
        self.ensure_same_ring(other)?;

        Ok(Self::from_coeffs(
            self.coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(&a, &b)| a + b)
                .collect(),
        ))
    }

    /// Coefficient-wise integer difference (no modular reduction).
    pub fn sub(&self, other: &Self) -> Result<Self, NtruCryptoError> {
        self.ensure_same_ring(other)?;

        Ok(Self::from_coeffs(
            self.coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(&a, &b)| a - b)
                .collect(),
        ))
    }

    /// `scalar * self` in Z_m[x]/(x^N - 1), coefficients in `[0, m)`.
    pub fn scalar_mul(&self, scalar: i64, ring: &Ring) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|&c| ring.mul(c, scalar)).collect())
    }

    /// Replaces each coefficient by its residue in `[0, m)`.
    pub fn reduce_coeffs_mod(&self, ring: &Ring) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|&c| ring.normalize(c)).collect())
    }

    /// Centered representatives in `(-m/2, m/2]`; see [`Ring::center`] for the tie-break.
    pub fn center(&self, ring: &Ring) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|&c| ring.center(c)).collect())
    }

    /// Product in Z_m[x]/(x^N - 1): full convolution, fold by `x^N = 1`, reduce mod m.
    ///
    /// # Errors
    ///
    /// Returns `NtruCryptoError::DimensionMismatch` if the operands have different lengths.
    pub fn multiply_mod(&self, other: &Self, ring: &Ring) -> Result<Self, NtruCryptoError> {
        self.ensure_same_ring(other)?;
        let n = self.len();
        if n == 0 {
            return Ok(Self::zero(0));
        }

        let product = convolve(&self.coeffs, &other.coeffs, ring);
        let folded = reduce_mod_xn_minus_1(&product, n)?;

        reduce_coeffs_mod(folded.coeffs(), n, ring)
    }

    fn ensure_same_ring(&self, other: &Self) -> Result<(), NtruCryptoError> {
        if self.len() != other.len() {
            return Err(NtruCryptoError::DimensionMismatch(format!(
                "Polynomials live in different rings: N={} vs N={}",
                self.len(),
                other.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self
            .coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != 0)
            .map(|(i, c)| match i {
                0 => format!("{}", c),
                1 => format!("{}x", c),
                _ => format!("{}x^{}", c, i),
            })
            .join(" + ");

        if terms.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{}", terms)
    }
}

/// Plain product of two coefficient vectors in Z_m[x], without wrapping.
///
/// The result has length `a.len() + b.len() - 1` (empty if either input is empty) and
/// coefficients in `[0, m)`.
pub fn convolve(a: &[i64], b: &[i64], ring: &Ring) -> Vector {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut product = vec![0i64; a.len() + b.len() - 1];
    for (i, &a_i) in a.iter().enumerate() {
        if ring.normalize(a_i) == 0 {
            continue;
        }
        for (j, &b_j) in b.iter().enumerate() {
            product[i + j] = ring.add(product[i + j], ring.mul(a_i, b_j));
        }
    }
    product
}

/// Folds a polynomial of any degree into Z[x]/(x^N - 1): the coefficient of `x^e` is added to
/// slot `e mod N`.
///
/// # Errors
///
/// Returns `NtruCryptoError::InvalidParameters` if `n == 0`.
pub fn reduce_mod_xn_minus_1(coeffs: &[i64], n: usize) -> Result<Polynomial, NtruCryptoError> {
    if n == 0 {
        return Err(NtruCryptoError::InvalidParameters(
            "Ring dimension N must be > 0".to_string(),
        ));
    }

    let mut folded = vec![0i64; n];
    for (e, &c) in coeffs.iter().enumerate() {
        folded[e % n] += c;
    }
    Ok(Polynomial::from_coeffs(folded))
}

/// Pads `coeffs` with zeros up to length N and reduces every coefficient into `[0, m)`.
///
/// # Errors
///
/// Returns `NtruCryptoError::DimensionMismatch` if the input is longer than N: higher powers must
/// be folded with [`reduce_mod_xn_minus_1`] first.
pub fn reduce_coeffs_mod(
    coeffs: &[i64],
    n: usize,
    ring: &Ring,
) -> Result<Polynomial, NtruCryptoError> {
    if coeffs.len() > n {
        return Err(NtruCryptoError::DimensionMismatch(format!(
            "Got {} coefficients for a ring of dimension {}",
            coeffs.len(),
            n
        )));
    }

    let mut reduced: Vector = coeffs.iter().map(|&c| ring.normalize(c)).collect();
    reduced.resize(n, 0);
    Ok(Polynomial::from_coeffs(reduced))
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck_macros::quickcheck;

    fn ring(m: u64) -> Ring {
        Ring::try_with(m).unwrap()
    }

    #[test]
    fn test_fold_wraps_exponents() {
        // 1 + 2x + 3x^2 + 4x^3 + 5x^4 with N = 3 -> (1+4) + (2+5)x + 3x^2
        let folded = reduce_mod_xn_minus_1(&[1, 2, 3, 4, 5], 3).unwrap();
        assert_eq!(folded.coeffs(), &[5, 7, 3]);

        let short = reduce_mod_xn_minus_1(&[1], 3).unwrap();
        assert_eq!(short.coeffs(), &[1, 0, 0]);

        assert!(reduce_mod_xn_minus_1(&[1, 2], 0).is_err());
    }

    #[test]
    fn test_reduce_coeffs_pads_and_normalizes() {
        let reduced = reduce_coeffs_mod(&[-1, 4, 33], 5, &ring(32)).unwrap();
        assert_eq!(reduced.coeffs(), &[31, 4, 1, 0, 0]);

        assert!(matches!(
            reduce_coeffs_mod(&[1, 2, 3], 2, &ring(32)),
            Err(NtruCryptoError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_multiply_by_x_rotates() {
        // x * (a0 + a1 x + a2 x^2 + a3 x^3) = a3 + a0 x + a1 x^2 + a2 x^3 in Z[x]/(x^4 - 1)
        let x = Polynomial::from_coeffs(vec![0, 1, 0, 0]);
        let a = Polynomial::from_coeffs(vec![1, 2, 3, 4]);

        let product = x.multiply_mod(&a, &ring(32)).unwrap();
        assert_eq!(product.coeffs(), &[4, 1, 2, 3]);
    }

    #[test]
    fn test_multiply_mod_known_product() {
        // (1 - x) * (1 + x + x^2) = 1 - x^3 = 0 in Z[x]/(x^3 - 1)
        let a = Polynomial::from_coeffs(vec![1, -1, 0]);
        let b = Polynomial::from_coeffs(vec![1, 1, 1]);
        assert!(a.multiply_mod(&b, &ring(3)).unwrap().is_zero());

        // (1 + x)^2 = 1 + 2x + x^2, reduced mod 2 -> 1 + x^2
        let c = Polynomial::from_coeffs(vec![1, 1, 0]);
        let square = c.multiply_mod(&c, &ring(2)).unwrap();
        assert_eq!(square.coeffs(), &[1, 0, 1]);
    }

    #[test]
    fn test_multiply_mod_dimension_mismatch() {
        let a = Polynomial::zero(3);
        let b = Polynomial::zero(4);
        assert!(matches!(
            a.multiply_mod(&b, &ring(3)),
            Err(NtruCryptoError::DimensionMismatch(_))
        ));
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn test_add_and_sub_are_plain_integer_ops() {
        let a = Polynomial::from_coeffs(vec![1, -1, 0, 5]);
        let b = Polynomial::from_coeffs(vec![2, 3, -4, 5]);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.coeffs(), &[3, 2, -4, 10]);

        let diff = sum.sub(&b).unwrap();
        assert_eq!(diff, a);
        assert_eq!(a.sub(&a).unwrap().into_coeffs(), vec![0; 4]);

        assert!(matches!(
            a.sub(&Polynomial::zero(3)),
            Err(NtruCryptoError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_scalar_mul_reduces_without_overflow() {
        let a = Polynomial::from_coeffs(vec![1, -1, 0, 2]);
        assert_eq!(a.scalar_mul(3, &ring(32)).coeffs(), &[3, 29, 0, 6]);

        // (2^62 - 1) * 3 does not fit an i64
        let q = 1u64 << 62;
        let big = Polynomial::from_coeffs(vec![(q - 1) as i64, 1, 0, 0]);
        let scaled = big.scalar_mul(3, &ring(q));
        assert_eq!(scaled.coeffs(), &[(q - 3) as i64, 3, 0, 0]);
        assert!(scaled.is_reduced(&ring(q)));
    }

    #[test]
    fn test_center_polynomial() {
        let poly = Polynomial::from_coeffs(vec![0, 15, 16, 17, 31]);
        assert_eq!(poly.center(&ring(32)).coeffs(), &[0, 15, 16, -15, -1]);
    }

    #[test]
    fn test_identity_and_degree() {
        let one = Polynomial::one(5);
        assert_eq!(one.coeffs(), &[1, 0, 0, 0, 0]);
        assert_eq!(one.degree(), Some(0));
        assert_eq!(Polynomial::zero(5).degree(), None);
        assert_eq!(Polynomial::from_coeffs(vec![1, 0, -1, 0]).degree(), Some(2));
    }

    #[test]
    fn test_display() {
        let poly = Polynomial::from_coeffs(vec![1, 0, -1, 3]);
        assert_eq!(poly.to_string(), "1 + -1x^2 + 3x^3");
        assert_eq!(Polynomial::from_coeffs(vec![0, 2]).to_string(), "2x");
        assert_eq!(Polynomial::zero(3).to_string(), "0");
    }

    #[quickcheck]
    fn prop_ring_closure(a: Vec<i8>, b: Vec<i8>, m: u8) -> bool {
        let n = a.len().min(b.len()).max(1);
        let modulus = (m as u64).max(2);
        let ring = ring(modulus);

        let pad = |v: &[i8]| {
            let mut coeffs: Vector = v.iter().take(n).map(|&c| c as i64).collect();
            coeffs.resize(n, 0);
            Polynomial::from_coeffs(coeffs)
        };

        let product = pad(&a).multiply_mod(&pad(&b), &ring).unwrap();
        product.len() == n && product.is_reduced(&ring)
    }

    #[quickcheck]
    fn prop_multiplication_commutes(a: Vec<i8>, b: Vec<i8>) -> bool {
        let n = a.len().max(b.len()).max(1);
        let ring = ring(32);

        let pad = |v: &[i8]| {
            let mut coeffs: Vector = v.iter().map(|&c| c as i64).collect();
            coeffs.resize(n, 0);
            Polynomial::from_coeffs(coeffs)
        };
        let (a, b) = (pad(&a), pad(&b));

        a.multiply_mod(&b, &ring).unwrap() == b.multiply_mod(&a, &ring).unwrap()
    }
}
