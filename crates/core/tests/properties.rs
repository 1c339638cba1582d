//! Property-based checks over "all 32-bit addresses"/"all x": sign
//! extension and the address round-trip. Exhaustive-feeling inputs are
//! a better fit for `proptest` than a handful of hand-picked cases.

use pipe5_core::common::{sign_extend, split_addr};
use proptest::prelude::*;

proptest! {
    /// `sign_extend(x, n)` equals `x` if `x < 2^(n-1)`, else `x - 2^n`
    /// interpreted as a 32-bit two's-complement value.
    #[test]
    fn sign_extend_matches_two_complement_definition(x in 0u32..(1u32 << 20), n in 2u32..=20) {
        let field = x & ((1u32 << n) - 1);
        let extended = sign_extend(field, n);
        let half = 1u32 << (n - 1);
        let expected = if field < half {
            field as i32
        } else {
            (field as i64 - (1i64 << n)) as i32
        };
        prop_assert_eq!(extended, expected);
    }

    /// `cache_tag(a) * 2^(s+b) + cache_set(a) * 2^b + (a & ((1<<b)-1)) == a`
    /// for any 32-bit address and any geometry that leaves room for a tag.
    #[test]
    fn address_split_round_trips(addr in any::<u32>(), s in 0u32..8, b in 0u32..8) {
        prop_assume!(s + b < 32);
        let split = split_addr(addr, s, b);
        let rebuilt = (split.tag << (s + b)) | (split.set_index << b) | split.block_offset;
        prop_assert_eq!(rebuilt, addr);
    }
}
