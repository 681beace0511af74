use num_integer::Roots;

/// Computes the greatest common divisor of two numbers.
pub fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// Finds (g, x, y) such that ax + by = g = gcd(a, b), with `g >= 0`.
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1i64, 0i64);
    let (mut old_y, mut y) = (0i64, 1i64);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }

    if old_r < 0 {
        return (-old_r, -old_x, -old_y);
    }

    (old_r, old_x, old_y)
}

/// Trial-division primality check; moduli here are small.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }

    let limit = n.sqrt();
    (3..=limit).step_by(2).all(|d| n % d != 0)
}

/// Returns `k` when `n == 2^k` with `k >= 1`.
pub fn power_of_two_exponent(n: u64) -> Option<u32> {
    if n >= 2 && n.is_power_of_two() {
        Some(n.trailing_zeros())
    } else {
        None
    }
}
