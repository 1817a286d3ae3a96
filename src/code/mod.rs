//! Console access codes.
//!
//! A code is a fixed-width base-6 numeral over the alphabet
//! `A B O S X Y` (rightmost symbol least significant). The symbols are
//! the ones a console keypad can enter.

mod generator;

pub use generator::{CodeGenerator, GeneratorError, DEFAULT_COUNTER_KEY, DEFAULT_MAX_ATTEMPTS};

/// Code symbols in ascending digit order.
pub const ALPHABET: [char; 6] = ['A', 'B', 'O', 'S', 'X', 'Y'];

/// Number of symbols in [`ALPHABET`].
pub const RADIX: u64 = ALPHABET.len() as u64;

/// First code issued when the counter has never been written.
pub const DEFAULT_SEED_CODE: &str = "ABXYSO";

/// Digit value of `symbol`, or `None` if it is not in the alphabet.
pub fn symbol_index(symbol: char) -> Option<usize> {
    ALPHABET.iter().position(|&c| c == symbol)
}

/// True if `code` is non-empty and every symbol is in the alphabet.
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| symbol_index(c).is_some())
}

/// The code one tick after `code`.
///
/// Adds one with ripple carry from the rightmost symbol. A symbol outside
/// the alphabet is read as digit 0 when the carry reaches it. Carry out of
/// the leftmost symbol is dropped, so `YYYYYY` wraps to `AAAAAA`.
pub fn next_code(code: &str) -> String {
    let mut symbols: Vec<char> = code.chars().collect();
    let mut carry = 1;

    for symbol in symbols.iter_mut().rev() {
        if carry == 0 {
            break;
        }
        let digit = symbol_index(*symbol).unwrap_or(0) + carry;
        *symbol = ALPHABET[digit % ALPHABET.len()];
        carry = digit / ALPHABET.len();
    }

    symbols.into_iter().collect()
}

/// Position of `code` in the sequence (its base-6 value).
///
/// Symbols outside the alphabet count as 0.
pub fn code_to_index(code: &str) -> u64 {
    code.chars().fold(0u64, |acc, symbol| {
        acc.wrapping_mul(RADIX)
            .wrapping_add(symbol_index(symbol).unwrap_or(0) as u64)
    })
}

/// The code at position `index`, left-padded to `width` symbols.
///
/// Positions beyond `6^width - 1` wrap, matching [`next_code`].
pub fn index_to_code(index: u64, width: usize) -> String {
    let mut symbols = vec![ALPHABET[0]; width];
    let mut rest = index;
    for slot in symbols.iter_mut().rev() {
        *slot = ALPHABET[(rest % RADIX) as usize];
        rest /= RADIX;
    }
    symbols.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_code_increments_last_symbol() {
        assert_eq!(next_code("ABXYSO"), "ABXYSS");
        assert_eq!(next_code("AAAAAA"), "AAAAAB");
    }

    #[test]
    fn test_next_code_carries() {
        assert_eq!(next_code("ABXYSY"), "ABXYXA");
        assert_eq!(next_code("AYYYYY"), "BAAAAA");
    }

    #[test]
    fn test_next_code_wraps_at_width() {
        assert_eq!(next_code("YYYYYY"), "AAAAAA");
    }

    #[test]
    fn test_next_code_treats_unknown_symbol_as_zero() {
        assert_eq!(next_code("ABXYSZ"), "ABXYSB");
        // Unknown symbols left of the carry are untouched.
        assert_eq!(next_code("ZBXYSO"), "ZBXYSS");
    }

    #[test]
    fn test_six_ticks_cycle_last_symbol_and_carry_once() {
        let seed = "ABXYSA";
        let mut code = seed.to_string();
        let mut seen_last = Vec::new();
        let mut carries = 0;

        for _ in 0..6 {
            let next = next_code(&code);
            if next.chars().nth(4) != code.chars().nth(4) {
                carries += 1;
            }
            seen_last.push(next.chars().last().unwrap());
            code = next;
        }

        let mut sorted = seen_last.clone();
        sorted.sort();
        let mut alphabet = ALPHABET.to_vec();
        alphabet.sort();
        assert_eq!(sorted, alphabet);
        assert_eq!(carries, 1);
        assert_eq!(code, "ABXYXA");
    }

    #[test]
    fn test_sequence_is_strictly_increasing() {
        let mut code = DEFAULT_SEED_CODE.to_string();
        let mut index = code_to_index(&code);
        for _ in 0..500 {
            code = next_code(&code);
            let next_index = code_to_index(&code);
            assert_eq!(next_index, index + 1);
            index = next_index;
        }
    }

    #[test]
    fn test_index_round_trip_matches_next_code() {
        let width = DEFAULT_SEED_CODE.len();
        let index = code_to_index(DEFAULT_SEED_CODE);
        assert_eq!(index_to_code(index, width), DEFAULT_SEED_CODE);
        assert_eq!(index_to_code(index + 1, width), next_code(DEFAULT_SEED_CODE));
        assert_eq!(index_to_code(RADIX.pow(6), width), "AAAAAA");
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("ABXYSO"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("ABC123"));
    }
}
