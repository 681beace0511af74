//! Scalar arithmetic in Z_m, the coefficient ring of every polynomial.

use crate::errors::NtruCryptoError;

use super::extended_gcd;

use serde::{Deserialize, Serialize};

/// Represents the finite ring Z_m using modular arithmetic.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub modulus: u64,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be greater than 1 and fit into an `i64`.
    pub fn try_with(modulus: u64) -> Result<Self, NtruCryptoError> {
        if modulus <= 1 {
            return Err(NtruCryptoError::InvalidModulus(format!(
                "Modulus must be greater than 1, got {}",
                modulus
            )));
        }
        if modulus > i64::MAX as u64 {
            return Err(NtruCryptoError::InvalidModulus(format!(
                "Modulus {} does not fit into a signed coefficient",
                modulus
            )));
        }

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(32).unwrap();
    /// assert_eq!(ring.modulus(), 32);
    /// ```
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(3).unwrap();
    /// assert_eq!(ring.normalize(5), 2);
    /// assert_eq!(ring.normalize(-1), 2);
    /// assert_eq!(ring.normalize(3), 0);
    /// ```
    pub fn normalize(&self, value: i64) -> i64 {
        value.rem_euclid(self.modulus as i64)
    }

    /// Computes `(a + b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(32).unwrap();
    /// assert_eq!(ring.add(30, 5), 3);
    /// assert_eq!(ring.add(-2, 1), 31);
    /// ```
    pub fn add(&self, a: i64, b: i64) -> i64 {
        let sum = self.normalize(a) as i128 + self.normalize(b) as i128;

        (sum % self.modulus as i128) as i64
    }

    /// Computes `(a - b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(32).unwrap();
    /// assert_eq!(ring.sub(3, 5), 30);
    /// ```
    pub fn sub(&self, a: i64, b: i64) -> i64 {
        self.add(a, self.neg(b))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// Uses `i128` internally to prevent overflow during multiplication before the modulo
    /// operation.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(32).unwrap();
    /// assert_eq!(ring.mul(7, 5), 3);
    /// assert_eq!(ring.mul(-1, 6), 26);
    /// ```
    pub fn mul(&self, a: i64, b: i64) -> i64 {
        let product = self.normalize(a) as i128 * self.normalize(b) as i128;

        (product % self.modulus as i128) as i64
    }

    /// Computes the additive inverse `-a mod modulus`.
    pub fn neg(&self, a: i64) -> i64 {
        let a_norm = self.normalize(a);
        if a_norm == 0 {
            return 0;
        }

        self.modulus as i64 - a_norm
    }

    /// Maps a value to its centered representative in `(-m/2, m/2]`.
    ///
    /// A residue `c` is shifted down by `m` only when `c > floor(m/2)`, so `m/2` itself stays
    /// positive for even moduli.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(32).unwrap();
    /// assert_eq!(ring.center(16), 16);
    /// assert_eq!(ring.center(17), -15);
    /// assert_eq!(ring.center(-1), -1);
    /// ```
    pub fn center(&self, value: i64) -> i64 {
        let c = self.normalize(value);
        let m = self.modulus as i64;

        if c > m / 2 { c - m } else { c }
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// # Errors
    ///
    /// Returns `NtruCryptoError::NoInverse` if `a` is 0 or `gcd(a, modulus) != 1`.
    ///
    /// # Example
    ///
    /// ```
    /// # use ntru_crypto::ring::Ring;
    /// let ring = Ring::try_with(32).unwrap();
    /// assert_eq!(ring.inv(3).unwrap(), 11); // 3 * 11 = 33 = 1 mod 32
    /// assert!(ring.inv(2).is_err());
    /// assert!(ring.inv(0).is_err());
    /// ```
    pub fn inv(&self, a: i64) -> Result<i64, NtruCryptoError> {
        let a_norm = self.normalize(a);
        if a_norm == 0 {
            return Err(NtruCryptoError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        let (g, x, _) = extended_gcd(a_norm, self.modulus as i64);
        if g != 1 {
            return Err(NtruCryptoError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm, self.modulus, g
            )));
        }

        Ok(self.normalize(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_creation() {
        assert!(Ring::try_with(3).is_ok());
        assert!(Ring::try_with(32).is_ok());
        assert!(Ring::try_with(1).is_err());
        assert!(Ring::try_with(0).is_err());
        assert!(Ring::try_with(u64::MAX).is_err());
    }

    #[test]
    fn test_element_normalization() -> Result<(), NtruCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.normalize(5), 5);
        assert_eq!(ring.normalize(16), 5);
        assert_eq!(ring.normalize(-6), 5);
        Ok(())
    }

    #[test]
    fn test_addition_and_subtraction() -> Result<(), NtruCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.add(5, 8), 2);
        assert_eq!(ring.add(-3, 8), 5);
        assert_eq!(ring.sub(5, 8), 8);
        assert_eq!(ring.sub(8, 5), 3);
        Ok(())
    }

    #[test]
    fn test_multiplication() -> Result<(), NtruCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.mul(5, 8), 7);
        assert_eq!(ring.mul(-2, 8), 6);
        Ok(())
    }

    #[test]
    fn test_negation() -> Result<(), NtruCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.neg(5), 6);
        assert_eq!(ring.neg(0), 0);
        assert_eq!(ring.neg(-5), 5);
        Ok(())
    }

    #[test]
    fn test_center_boundary() -> Result<(), NtruCryptoError> {
        let even = Ring::try_with(32)?;
        assert_eq!(even.center(0), 0);
        assert_eq!(even.center(15), 15);
        assert_eq!(even.center(16), 16);
        assert_eq!(even.center(31), -1);

        let odd = Ring::try_with(3)?;
        assert_eq!(odd.center(1), 1);
        assert_eq!(odd.center(2), -1);
        Ok(())
    }

    #[test]
    fn test_inversion() -> Result<(), NtruCryptoError> {
        let ring = Ring::try_with(11)?;
        assert_eq!(ring.inv(5)?, 9);

        let ring = Ring::try_with(3)?;
        assert_eq!(ring.inv(2)?, 2);
        assert!(matches!(ring.inv(3), Err(NtruCryptoError::NoInverse(_))));
        Ok(())
    }
}
