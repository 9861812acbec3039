//! Arbitrary-precision modular arithmetic.
//!
//! Everything the protocol engine needs on top of [`BigInt`]: canonical
//! residues, gcd/extended-gcd, inverses, square-and-multiply
//! exponentiation and a CRT-accelerated variant for callers that know the
//! factorization of their modulus. All functions take and return signed
//! integers; canonical nonnegative residues are produced wherever a result
//! is defined modulo n.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Pow, Signed, Zero};

use crate::errors::DomainError;

/// A prime-power factor `p^k` of a modulus.
pub type PrimePower = (BigInt, u32);

/// Result of [`extended_gcd`]: `g = gcd(a, b)` with `a*x + b*y == g`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExtendedGcd {
    pub g: BigInt,
    pub x: BigInt,
    pub y: BigInt,
}

/// Greatest common divisor of the magnitudes of `a` and `b`.
///
/// Binary (Stein) algorithm; `gcd(0, b) == |b|` and `gcd(0, 0) == 0`.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.magnitude().clone();
    let mut b = b.magnitude().clone();
    if a.is_zero() {
        return BigInt::from(b);
    }
    if b.is_zero() {
        return BigInt::from(a);
    }

    let mut shift = 0u64;
    while !a.bit(0) && !b.bit(0) {
        a >>= 1;
        b >>= 1;
        shift += 1;
    }
    while !a.bit(0) {
        a >>= 1;
    }
    loop {
        while !b.bit(0) {
            b >>= 1;
        }
        if a > b {
            core::mem::swap(&mut a, &mut b);
        }
        b -= &a;
        if b.is_zero() {
            break;
        }
    }

    BigInt::from(a << shift)
}

/// Extended Euclidean algorithm over strictly positive inputs.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> Result<ExtendedGcd, DomainError> {
    if !a.is_positive() || !b.is_positive() {
        return Err(DomainError::NonPositiveOperand);
    }

    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;
        let next_r = &old_r - &q * &r;
        old_r = core::mem::replace(&mut r, next_r);
        let next_x = &old_x - &q * &x;
        old_x = core::mem::replace(&mut x, next_x);
        let next_y = &old_y - &q * &y;
        old_y = core::mem::replace(&mut y, next_y);
    }

    Ok(ExtendedGcd {
        g: old_r,
        x: old_x,
        y: old_y,
    })
}

/// Canonical residue of `a` modulo `n`, in `[0, n)`.
pub fn mod_reduce(a: &BigInt, n: &BigInt) -> Result<BigInt, DomainError> {
    if !n.is_positive() {
        return Err(DomainError::NonPositiveModulus);
    }
    let r = a % n;
    if r.is_negative() {
        Ok(r + n)
    } else {
        Ok(r)
    }
}

/// Modular inverse of `a` modulo `n`.
pub fn mod_inverse(a: &BigInt, n: &BigInt) -> Result<BigInt, DomainError> {
    let r = mod_reduce(a, n)?;
    if r.is_zero() {
        return Err(DomainError::NoInverse);
    }
    let e = extended_gcd(&r, n).map_err(|_| DomainError::NoInverse)?;
    if !e.g.is_one() {
        return Err(DomainError::NoInverse);
    }
    mod_reduce(&e.x, n)
}

/// Sum of `terms` modulo `n`.
pub fn mod_add(terms: &[BigInt], n: &BigInt) -> Result<BigInt, DomainError> {
    let mut acc = BigInt::zero();
    for t in terms {
        acc += mod_reduce(t, n)?;
    }
    mod_reduce(&acc, n)
}

/// Product of `terms` modulo `n`.
pub fn mod_multiply(terms: &[BigInt], n: &BigInt) -> Result<BigInt, DomainError> {
    let mut acc = BigInt::one();
    for t in terms {
        acc = mod_reduce(&(acc * mod_reduce(t, n)?), n)?;
    }
    mod_reduce(&acc, n)
}

/// Least common multiple of the magnitudes; `lcm(0, 0) == 0`.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() && b.is_zero() {
        return BigInt::zero();
    }
    (a / gcd(a, b) * b).abs()
}

/// The smaller of two integers.
pub fn min<'a>(a: &'a BigInt, b: &'a BigInt) -> &'a BigInt {
    if a <= b {
        a
    } else {
        b
    }
}

/// The larger of two integers.
pub fn max<'a>(a: &'a BigInt, b: &'a BigInt) -> &'a BigInt {
    if a >= b {
        a
    } else {
        b
    }
}

/// Number of bits in the magnitude of `a`; zero has bit length 0.
pub fn bit_length(a: &BigInt) -> u64 {
    a.magnitude().bits()
}

/// `base^exponent mod modulus` by square-and-multiply.
///
/// A negative exponent yields the modular inverse of the positive-exponent
/// result, so it fails with [`DomainError::NoInverse`] unless
/// `gcd(base, modulus) == 1`. A modulus of 1 yields 0.
pub fn mod_pow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt, DomainError> {
    if !modulus.is_positive() {
        return Err(DomainError::NonPositiveModulus);
    }
    if modulus.is_one() {
        return Ok(BigInt::zero());
    }
    if exponent.is_negative() {
        let inv = mod_pow(base, &-exponent, modulus)?;
        return mod_inverse(&inv, modulus);
    }

    let base = mod_reduce(base, modulus)?;
    let m = modulus.magnitude();
    let mut result = BigUint::one();
    let mut b = base.magnitude() % m;
    let mut e = exponent.magnitude().clone();
    while !e.is_zero() {
        if e.bit(0) {
            result = &result * &b % m;
        }
        e >>= 1;
        b = &b * &b % m;
    }
    Ok(BigInt::from(result))
}

/// Euler's totient of a modulus given as prime-power factors:
/// the product of `p^(k-1) * (p - 1)`.
pub fn euler_totient(factors: &[PrimePower]) -> BigInt {
    let mut phi = BigInt::one();
    for (p, k) in factors {
        if *k == 0 {
            continue;
        }
        phi *= p.pow(*k - 1) * (p - 1u32);
    }
    phi
}

/// Chinese Remainder reconstruction.
///
/// Finds the value congruent to `remainders[i]` modulo `moduli[i]` for all
/// `i`, reduced modulo `modulus` (the product of `moduli` when not
/// supplied). The moduli must be pairwise coprime or the per-factor inverse
/// fails with [`DomainError::NoInverse`].
pub fn crt(
    remainders: &[BigInt],
    moduli: &[BigInt],
    modulus: Option<&BigInt>,
) -> Result<BigInt, DomainError> {
    if remainders.len() != moduli.len() {
        return Err(DomainError::LengthMismatch {
            left: remainders.len(),
            right: moduli.len(),
        });
    }

    let total = match modulus {
        Some(m) => m.clone(),
        None => moduli.iter().product(),
    };

    let mut acc = BigInt::zero();
    for (r, m) in remainders.iter().zip(moduli) {
        let q = &total / m;
        let term = mod_reduce(&(&q * mod_inverse(&q, m)?), &total)?;
        acc += mod_reduce(&(term * r), &total)?;
    }
    mod_reduce(&acc, &total)
}

/// `base^exponent mod modulus`, accelerated by a known prime-power
/// factorization of the modulus.
///
/// The exponent is reduced per factor modulo `phi(p^k)` before a
/// per-factor [`mod_pow`], and the partial results are reassembled with
/// [`crt`]. The factor list must multiply out to `modulus`; the result is
/// identical to the plain [`mod_pow`] path.
pub fn mod_pow_crt(
    base: &BigInt,
    exponent: &BigInt,
    modulus: &BigInt,
    factors: &[PrimePower],
) -> Result<BigInt, DomainError> {
    if !modulus.is_positive() {
        return Err(DomainError::NonPositiveModulus);
    }
    if modulus.is_one() {
        return Ok(BigInt::zero());
    }
    if exponent.is_negative() {
        let inv = mod_pow_crt(base, &-exponent, modulus, factors)?;
        return mod_inverse(&inv, modulus);
    }

    let base = mod_reduce(base, modulus)?;
    let mut residues = Vec::with_capacity(factors.len());
    let mut moduli = Vec::with_capacity(factors.len());
    for factor in factors {
        let m = (&factor.0).pow(factor.1);
        let phi = euler_totient(core::slice::from_ref(factor));
        let e = mod_reduce(exponent, &phi)?;
        residues.push(mod_pow(&base, &e, &m)?);
        moduli.push(m);
    }
    crt(&residues, &moduli, Some(modulus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    fn random_int(bytes: usize) -> BigInt {
        let mut buf = vec![0u8; bytes];
        rand::rngs::OsRng.fill_bytes(&mut buf);
        BigInt::from(BigUint::from_bytes_be(&buf))
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(&int(0), &int(0)), int(0));
        assert_eq!(gcd(&int(0), &int(12)), int(12));
        assert_eq!(gcd(&int(54), &int(24)), int(6));
        assert_eq!(gcd(&int(-54), &int(24)), int(6));
        assert_eq!(gcd(&int(17), &int(31)), int(1));
    }

    #[test]
    fn extended_gcd_identity_holds() {
        for _ in 0..32 {
            let a = random_int(48) + 1u32;
            let b = random_int(48) + 1u32;
            let e = extended_gcd(&a, &b).unwrap();
            assert_eq!(&a * &e.x + &b * &e.y, e.g);
            assert_eq!(e.g, gcd(&a, &b));
        }
    }

    #[test]
    fn extended_gcd_rejects_non_positive() {
        assert_eq!(
            extended_gcd(&int(0), &int(5)),
            Err(DomainError::NonPositiveOperand)
        );
        assert_eq!(
            extended_gcd(&int(5), &int(-1)),
            Err(DomainError::NonPositiveOperand)
        );
    }

    #[test]
    fn mod_reduce_canonicalizes() {
        assert_eq!(mod_reduce(&int(7), &int(5)).unwrap(), int(2));
        assert_eq!(mod_reduce(&int(-7), &int(5)).unwrap(), int(3));
        assert_eq!(mod_reduce(&int(0), &int(5)).unwrap(), int(0));
        assert_eq!(
            mod_reduce(&int(1), &int(0)),
            Err(DomainError::NonPositiveModulus)
        );
    }

    #[test]
    fn mod_inverse_round_trips() {
        let n = int(101 * 103);
        for _ in 0..32 {
            let a = mod_reduce(&random_int(16), &n).unwrap();
            if !gcd(&a, &n).is_one() {
                continue;
            }
            let inv = mod_inverse(&a, &n).unwrap();
            assert_eq!(mod_reduce(&(a * inv), &n).unwrap(), int(1));
        }
    }

    #[test]
    fn mod_inverse_fails_for_non_coprime() {
        assert_eq!(mod_inverse(&int(6), &int(9)), Err(DomainError::NoInverse));
        assert_eq!(mod_inverse(&int(0), &int(9)), Err(DomainError::NoInverse));
    }

    #[test]
    fn mod_add_and_multiply_over_terms() {
        let n = int(13);
        let terms = [int(11), int(-4), int(29)];
        assert_eq!(mod_add(&terms, &n).unwrap(), int((11 - 4 + 29) % 13));
        assert_eq!(
            mod_multiply(&terms, &n).unwrap(),
            mod_reduce(&int(11 * -4 * 29), &n).unwrap()
        );
    }

    #[test]
    fn lcm_min_max() {
        assert_eq!(lcm(&int(4), &int(6)), int(12));
        assert_eq!(lcm(&int(0), &int(6)), int(0));
        assert_eq!(lcm(&int(0), &int(0)), int(0));
        assert_eq!(min(&int(3), &int(7)), &int(3));
        assert_eq!(max(&int(3), &int(7)), &int(7));
    }

    #[test]
    fn bit_length_matches_magnitude() {
        assert_eq!(bit_length(&int(0)), 0);
        assert_eq!(bit_length(&int(1)), 1);
        assert_eq!(bit_length(&int(255)), 8);
        assert_eq!(bit_length(&int(-256)), 9);
    }

    #[test]
    fn mod_pow_known_values() {
        assert_eq!(mod_pow(&int(4), &int(13), &int(497)).unwrap(), int(445));
        assert_eq!(mod_pow(&int(2), &int(10), &int(1024)).unwrap(), int(0));
        assert_eq!(mod_pow(&int(7), &int(0), &int(10)).unwrap(), int(1));
        assert_eq!(mod_pow(&int(7), &int(5), &int(1)).unwrap(), int(0));
        assert_eq!(
            mod_pow(&int(7), &int(5), &int(0)),
            Err(DomainError::NonPositiveModulus)
        );
    }

    #[test]
    fn mod_pow_negative_exponent() {
        // 3^-1 mod 11 == 4, so 3^-2 == 16 mod 11 == 5
        assert_eq!(mod_pow(&int(3), &int(-2), &int(11)).unwrap(), int(5));
        assert_eq!(
            mod_pow(&int(3), &int(-1), &int(9)),
            Err(DomainError::NoInverse)
        );
    }

    #[test]
    fn euler_totient_of_factorizations() {
        // phi(2^3 * 5) = 4 * 4 = 16
        assert_eq!(euler_totient(&[(int(2), 3), (int(5), 1)]), int(16));
        assert_eq!(euler_totient(&[(int(101), 1)]), int(100));
    }

    #[test]
    fn crt_reconstructs() {
        // x = 2 mod 3, x = 3 mod 5, x = 2 mod 7 -> 23
        let r = [int(2), int(3), int(2)];
        let m = [int(3), int(5), int(7)];
        assert_eq!(crt(&r, &m, None).unwrap(), int(23));
        assert_eq!(crt(&r, &m, Some(&int(105))).unwrap(), int(23));
        assert_eq!(
            crt(&r, &m[..2], None),
            Err(DomainError::LengthMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn crt_path_agrees_with_plain_mod_pow() {
        let factorizations: &[&[PrimePower]] = &[
            &[(int(3), 2), (int(5), 1), (int(7), 1)],
            &[(int(2), 5), (int(11), 1)],
            &[(int(101), 1), (int(103), 1)],
        ];
        for factors in factorizations {
            let modulus: BigInt = factors.iter().map(|(p, k)| p.pow(*k)).product();
            for _ in 0..16 {
                let base = random_int(8);
                // keep the base coprime so negative exponents work too
                if !gcd(&base, &modulus).is_one() {
                    continue;
                }
                let exp = random_int(8);
                assert_eq!(
                    mod_pow_crt(&base, &exp, &modulus, factors).unwrap(),
                    mod_pow(&base, &exp, &modulus).unwrap()
                );
                assert_eq!(
                    mod_pow_crt(&base, &-&exp, &modulus, factors).unwrap(),
                    mod_pow(&base, &-&exp, &modulus).unwrap()
                );
            }
        }
    }
}
