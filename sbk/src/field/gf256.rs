//! # GF(256) — the Rijndael Field
//!
//! Arithmetic in GF(2⁸) with the irreducible polynomial
//! `x⁸ + x⁴ + x³ + x + 1` (0x11B), the same field AES uses. Bytes are
//! polynomials over GF(2); addition and subtraction are both XOR.
//!
//! Multiplicative structure comes from discrete logarithms. The element
//! 0x03 generates the full 255-element multiplicative group, so one walk
//! of its powers at compile time yields a power table and its inverse
//! log table in a single pass. From there:
//!
//! ```text
//! a · b   = g^(log a + log b)
//! a⁻¹     = g^(255 − log a)          (the table form of a^254)
//! a / b   = a · b⁻¹
//! ```
//!
//! Exponents are reduced mod 255 at lookup time; the tables stay at 256
//! entries each and nothing here ever leaves the module.

use super::Field;

/// The AES reducing polynomial, x⁸ + x⁴ + x³ + x + 1.
const REDUCING_POLY: u16 = 0x11B;

/// Multiply a field element by x (i.e. by 0x02), reducing on overflow.
const fn xtime(b: u8) -> u8 {
    let doubled = (b as u16) << 1;
    if doubled & 0x100 != 0 {
        (doubled ^ REDUCING_POLY) as u8
    } else {
        doubled as u8
    }
}

/// Discrete-log tables over the generator 0x03.
///
/// `pow[i] = 3^i` for i < 255 (index 255 is never consulted, exponent
/// reduction keeps lookups below it), and `log[pow[i]] = i`. `log[0]`
/// stays zero and is meaningless; zero has no logarithm and every
/// operation special-cases it first.
struct LogTables {
    pow: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> LogTables {
    let mut t = LogTables {
        pow: [0; 256],
        log: [0; 256],
    };
    // 3 = x + 1, so multiplying by the generator is xtime(a) ^ a.
    let mut value: u8 = 1;
    let mut exponent: usize = 0;
    while exponent < 255 {
        t.pow[exponent] = value;
        t.log[value as usize] = exponent as u8;
        value = xtime(value) ^ value;
        exponent += 1;
    }
    t
}

static TABLES: LogTables = build_tables();

/// `3^e` for an exponent that may exceed the group order.
#[inline]
fn pow3(e: u16) -> u8 {
    TABLES.pow[(e % 255) as usize]
}

/// Add two elements. Addition in GF(2⁸) is XOR.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtract two elements. Identical to addition in characteristic 2.
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two elements through the log tables.
#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    pow3(TABLES.log[a as usize] as u16 + TABLES.log[b as usize] as u16)
}

/// Multiplicative inverse. Panics on zero, which has none.
#[inline]
pub fn inv(a: u8) -> u8 {
    assert!(a != 0, "zero has no inverse in GF(256)");
    pow3(255 - TABLES.log[a as usize] as u16)
}

/// Divide `a` by `b`, defined as `a · b⁻¹`. Panics if `b` is zero;
/// callers validate their denominators before they get here.
#[inline]
pub fn div(a: u8, b: u8) -> u8 {
    mul(a, inv(b))
}

/// Raise `a` to the power `e`. `pow(0, 0)` follows the polynomial
/// convention and returns 1.
pub fn pow(a: u8, e: u32) -> u8 {
    if a == 0 {
        return if e == 0 { 1 } else { 0 };
    }
    let log_a = TABLES.log[a as usize] as u64;
    pow3(((log_a * (e as u64 % 255)) % 255) as u16)
}

/// Marker instance implementing [`Field`] over `u8` elements, for the
/// generic polynomial layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gf256;

impl Field for Gf256 {
    type El = u8;

    fn zero(&self) -> u8 {
        0
    }

    fn one(&self) -> u8 {
        1
    }

    fn add(&self, a: &u8, b: &u8) -> u8 {
        add(*a, *b)
    }

    fn sub(&self, a: &u8, b: &u8) -> u8 {
        sub(*a, *b)
    }

    fn mul(&self, a: &u8, b: &u8) -> u8 {
        mul(*a, *b)
    }

    fn div(&self, a: &u8, b: &u8) -> u8 {
        div(*a, *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xtime_reduces_on_overflow() {
        assert_eq!(xtime(0x01), 0x02);
        assert_eq!(xtime(0x80), 0x1B); // 0x100 ^ 0x11B
        assert_eq!(xtime(0xFF), 0xE5);
    }

    #[test]
    fn tables_are_mutually_inverse() {
        // The generator walk must visit every nonzero element exactly
        // once, and the two tables must agree about where.
        let mut visited = [false; 256];
        for e in 0..255usize {
            let v = TABLES.pow[e];
            assert!(!visited[v as usize], "3^{} revisits {:#04x}", e, v);
            visited[v as usize] = true;
            assert_eq!(TABLES.log[v as usize] as usize, e);
        }
        assert!(!visited[0], "zero is not a power of the generator");
    }

    #[test]
    fn known_answers_from_fips_197() {
        assert_eq!(mul(0x57, 0x83), 0xC1);
        assert_eq!(inv(0x53), 0xCA);
        assert_eq!(mul(0x53, 0xCA), 1);
    }

    #[test]
    fn additive_structure_is_xor() {
        for a in [0x00u8, 0x01, 0x53, 0xFF] {
            assert_eq!(add(a, 0), a);
            assert_eq!(sub(a, a), 0);
            // Adding twice undoes itself.
            assert_eq!(add(add(a, 0xB7), 0xB7), a);
        }
    }

    #[test]
    fn multiplicative_identities_hold_everywhere() {
        for a in 0..=255u8 {
            assert_eq!(mul(a, 1), a);
            assert_eq!(mul(1, a), a);
            assert_eq!(mul(a, 0), 0);
            assert_eq!(mul(0, a), 0);
        }
    }

    #[test]
    fn inverse_and_division_agree() {
        for a in 1..=255u8 {
            assert_eq!(mul(a, inv(a)), 1, "inv failed for {:#04x}", a);
            // div is mul-by-inverse, so this is the round trip.
            for b in [0x01u8, 0x03, 0x57, 0xFE] {
                assert_eq!(div(mul(a, b), b), a);
                assert_eq!(mul(div(a, b), b), a);
            }
        }
    }

    #[test]
    fn multiplication_distributes_over_addition() {
        for a in [0x02u8, 0x53, 0x9D] {
            for b in [0x07u8, 0x46, 0xE0] {
                for c in [0x01u8, 0x8C, 0xFF] {
                    assert_eq!(mul(a, add(b, c)), add(mul(a, b), mul(a, c)));
                }
            }
        }
    }

    #[test]
    fn pow_matches_repeated_multiplication() {
        for a in [0x02u8, 0x53, 0xFF] {
            let mut acc = 1u8;
            for e in 0..20u32 {
                assert_eq!(pow(a, e), acc, "a={:#04x} e={}", a, e);
                acc = mul(acc, a);
            }
        }
    }

    #[test]
    fn inv_is_a_to_the_254() {
        // The table shortcut must agree with the mathematical definition.
        for a in 1..=255u8 {
            assert_eq!(inv(a), pow(a, 254));
        }
    }

    #[test]
    fn pow_at_zero_base() {
        assert_eq!(pow(0, 0), 1);
        assert_eq!(pow(0, 5), 0);
    }
}
