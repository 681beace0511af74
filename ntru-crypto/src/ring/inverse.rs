//! Multiplicative inverses in Z_m[x]/(x^N - 1).
//!
//! Two moduli shapes are handled:
//! - `m` prime: Z_m is a field and the extended Euclidean algorithm runs on `a(x)` and
//!   `x^N - 1` directly. An inverse exists iff their gcd is a non-zero constant.
//! - `m = 2^k`: invert modulo 2, then Newton/Hensel-lift `b <- b * (2 - a * b)`, doubling the
//!   exponent of the modulus at every step until `2^k` is reached.
//!
//! Anything else is reported as `Unsupported`.

use crate::errors::NtruCryptoError;
use crate::ring::polynomial::{convolve, reduce_coeffs_mod, reduce_mod_xn_minus_1};
use crate::ring::{Polynomial, Ring, Vector, is_prime, power_of_two_exponent};

/// Inverse of `a` modulo `m` and modulo `x^N - 1`, where N is `a.len()`.
///
/// # Errors
///
/// * `InvalidModulus` if `m <= 1`.
/// * `NoInverse` if `a` is not a unit.
/// * `Unsupported` if `m` is neither prime nor a power of two.
pub fn invert(a: &Polynomial, modulus: u64) -> Result<Polynomial, NtruCryptoError> {
    let ring = Ring::try_with(modulus)?;

    if is_prime(modulus) {
        return invert_prime(a, &ring);
    }

    match power_of_two_exponent(modulus) {
        Some(k) => invert_power_of_two(a, k),
        None => Err(NtruCryptoError::Unsupported(format!(
            "Polynomial inversion mod {} (neither prime nor a power of two)",
            modulus
        ))),
    }
}

/// Extended Euclid over the field Z_p.
pub fn invert_prime(a: &Polynomial, ring: &Ring) -> Result<Polynomial, NtruCryptoError> {
    if !is_prime(ring.modulus()) {
        return Err(NtruCryptoError::Unsupported(format!(
            "Field inversion needs a prime modulus, got {}",
            ring.modulus()
        )));
    }
    let n = a.len();
    if n == 0 {
        return Err(NtruCryptoError::InvalidParameters(
            "Ring dimension N must be > 0".to_string(),
        ));
    }

    let a_reduced = trim(a.coeffs().iter().map(|&c| ring.normalize(c)).collect());
    if a_reduced.is_empty() {
        return Err(NtruCryptoError::NoInverse(format!(
            "Zero polynomial is not a unit mod {}",
            ring.modulus()
        )));
    }

    // x^N - 1
    let mut ideal = vec![0i64; n + 1];
    ideal[0] = ring.neg(1);
    ideal[n] = 1;

    // Invariant: r_i = t_i * a (mod x^N - 1, mod p)
    let (mut old_r, mut r) = (ideal, a_reduced);
    let (mut old_t, mut t): (Vector, Vector) = (Vec::new(), vec![1]);

    while !r.is_empty() {
        let (quotient, remainder) = div_rem(&old_r, &r, ring)?;
        let next_t = poly_sub(&old_t, &convolve(&quotient, &t, ring), ring);

        old_r = std::mem::replace(&mut r, remainder);
        old_t = std::mem::replace(&mut t, next_t);
    }

    if old_r.len() != 1 {
        return Err(NtruCryptoError::NoInverse(format!(
            "gcd(a, x^{} - 1) has degree {} mod {}",
            n,
            old_r.len() - 1,
            ring.modulus()
        )));
    }

    let scale = ring.inv(old_r[0])?;
    let scaled: Vector = old_t.iter().map(|&c| ring.mul(c, scale)).collect();
    let folded = reduce_mod_xn_minus_1(&scaled, n)?;

    reduce_coeffs_mod(folded.coeffs(), n, ring)
}

/// Inverse modulo `2^k`, lifted from the inverse modulo 2.
pub fn invert_power_of_two(a: &Polynomial, k: u32) -> Result<Polynomial, NtruCryptoError> {
    if k == 0 {
        return Err(NtruCryptoError::InvalidModulus(
            "Power-of-two modulus needs an exponent >= 1".to_string(),
        ));
    }

    let mut inverse = invert_prime(a, &Ring::try_with(2)?)?;
    let mut exponent = 1u32;

    while exponent < k {
        exponent = (exponent * 2).min(k);
        let ring = Ring::try_with(1u64.checked_shl(exponent).unwrap_or(0))?;
        inverse = hensel_lift_step(a, &inverse, &ring)?;
    }

    Ok(inverse)
}

/// One Newton step `b * (2 - a * b)` computed in `ring`.
///
/// If `a * b = 1 (mod 2^e)` the result is an inverse of `a` modulo `2^(2e)`; `ring` should have
/// a modulus dividing `2^(2e)`.
pub fn hensel_lift_step(
    a: &Polynomial,
    b: &Polynomial,
    ring: &Ring,
) -> Result<Polynomial, NtruCryptoError> {
    let ab = a.multiply_mod(b, ring)?;

    let mut correction: Vector = ab.coeffs().iter().map(|&c| ring.neg(c)).collect();
    if let Some(c0) = correction.first_mut() {
        *c0 = ring.add(*c0, 2);
    }

    b.multiply_mod(&Polynomial::from_coeffs(correction), ring)
}

fn trim(mut v: Vector) -> Vector {
    while v.last() == Some(&0) {
        v.pop();
    }
    v
}

fn poly_sub(a: &[i64], b: &[i64], ring: &Ring) -> Vector {
    let len = a.len().max(b.len());
    let diff = (0..len)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(0);
            let y = b.get(i).copied().unwrap_or(0);
            ring.sub(x, y)
        })
        .collect();
    trim(diff)
}

/// Long division in Z_p[x]; `den` must be trimmed and non-empty.
fn div_rem(num: &[i64], den: &[i64], ring: &Ring) -> Result<(Vector, Vector), NtruCryptoError> {
    let Some(&lead) = den.last() else {
        return Err(NtruCryptoError::InvalidParameters(
            "Division by the zero polynomial".to_string(),
        ));
    };
    let lead_inv = ring.inv(lead)?;

    let mut remainder = trim(num.iter().map(|&c| ring.normalize(c)).collect());
    let mut quotient = vec![0i64; remainder.len().saturating_sub(den.len()) + 1];

    while remainder.len() >= den.len() {
        let shift = remainder.len() - den.len();
        let coef = ring.mul(remainder[remainder.len() - 1], lead_inv);
        quotient[shift] = coef;

        for (j, &d) in den.iter().enumerate() {
            remainder[shift + j] = ring.sub(remainder[shift + j], ring.mul(coef, d));
        }
        remainder = trim(remainder);
    }

    Ok((trim(quotient), remainder))
}
