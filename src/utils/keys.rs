//! Letter, digit and control-key conversions on ASCII key codes.
//!
//! These trust their caller: `letter_index` expects a lowercase letter and
//! `digit_index` a decimal digit. Other inputs give meaningless values
//! (arithmetic wraps), never a panic.

/// The escape key.
pub const ESCAPE: u8 = 0x1B;

/// `'a'` → 0, `'b'` → 1, ...
#[inline]
pub const fn letter_index(c: u8) -> i32 {
    c as i32 - b'a' as i32
}

/// 0 → `'a'`, 1 → `'b'`, ...
#[inline]
pub const fn index_to_letter(index: i32) -> u8 {
    index.wrapping_add(b'a' as i32) as u8
}

/// `'0'` → 0 ... `'9'` → 9.
#[inline]
pub const fn digit_index(c: u8) -> i32 {
    c as i32 - b'0' as i32
}

#[inline]
pub const fn index_to_digit(index: i32) -> u8 {
    index.wrapping_add(b'0' as i32) as u8
}

/// The control code for a key: `control_of(b'A') == 0x01`.
#[inline]
pub const fn control_of(c: u8) -> u8 {
    c & 0x1F
}

/// Maps a control code back to its uppercase key. Exact for `'@'..='_'`.
#[inline]
pub const fn un_control_of(c: u8) -> u8 {
    c.wrapping_add(64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_letters() {
        assert_eq!(letter_index(b'a'), 0);
        assert_eq!(letter_index(b'c'), 2);
        assert_eq!(letter_index(b'z'), 25);
        assert_eq!(index_to_letter(0), b'a');
        assert_eq!(index_to_letter(25), b'z');
    }

    #[test]
    fn test_digits() {
        assert_eq!(digit_index(b'0'), 0);
        assert_eq!(digit_index(b'7'), 7);
        assert_eq!(index_to_digit(9), b'9');
    }

    #[test]
    fn test_out_of_domain_does_not_panic() {
        assert_eq!(letter_index(b'A'), -32);
        let _ = index_to_letter(i32::MAX);
        let _ = index_to_digit(-1000);
        assert_eq!(un_control_of(0xFF), 63);
    }

    #[test]
    fn test_control_codes() {
        assert_eq!(control_of(b'A'), 0x01);
        assert_eq!(control_of(b'a'), 0x01);
        assert_eq!(control_of(b'['), ESCAPE);
        assert_eq!(un_control_of(control_of(b'X')), b'X');
        assert_eq!(ESCAPE, 27);
    }

    proptest! {
        #[test]
        fn prop_letter_round_trip(index in 0i32..26) {
            prop_assert_eq!(letter_index(index_to_letter(index)), index);
            prop_assert!(index_to_letter(index).is_ascii_lowercase());
        }

        #[test]
        fn prop_digit_round_trip(index in 0i32..10) {
            prop_assert_eq!(digit_index(index_to_digit(index)), index);
        }

        #[test]
        fn prop_control_round_trip(c in 64u8..=95) {
            prop_assert_eq!(un_control_of(control_of(c)), c);
        }
    }
}
