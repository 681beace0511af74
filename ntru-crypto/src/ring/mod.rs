//! # Ring Module
//!
//! Arithmetic in Z_m and in the truncated polynomial ring Z_m[x]/(x^N - 1): the [`Ring`] scalar
//! helper, the [`Polynomial`] element type and polynomial inversion.

pub mod helper;
pub mod inverse;
pub mod math;
pub mod polynomial;

/// Represents a coefficient vector using a `Vec<i64>`.
pub type Vector = Vec<i64>;

pub use helper::{extended_gcd, gcd, is_prime, power_of_two_exponent};
pub use inverse::{hensel_lift_step, invert, invert_power_of_two, invert_prime};
pub use math::Ring;
pub use polynomial::{Polynomial, reduce_coeffs_mod, reduce_mod_xn_minus_1};
