use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Exact integer square root: the largest `r` with `r * r <= n`.
///
/// Newton's iteration over `BigUint`, seeded at `2^ceil(bits/2)`, which is
/// always at or above the true root. The sequence then decreases strictly
/// until it reaches the floor of the root, so the first non-decreasing step
/// terminates the loop.
pub fn isqrt(n: &BigUint) -> BigUint {
    if n.is_zero() {
        return BigUint::zero();
    }

    let half_bits = ((n.bits() + 1) / 2) as usize;
    let mut x = BigUint::one() << half_bits;
    loop {
        let y = (&x + n / &x) >> 1usize;
        if y >= x {
            return x;
        }
        x = y;
    }
}
