//! The fixed, ordered DNA alphabet used by the suffix trie.

/// Permitted DNA symbols, in rank order.
pub const LETTERS: &[u8; 4] = b"ACGT";

/// Number of symbols in the alphabet (and child slots per trie node).
pub const SIGMA: usize = LETTERS.len();

/// Rank of a symbol within [`LETTERS`], or `None` for anything else.
#[inline]
pub fn rank(symbol: u8) -> Option<usize> {
    match symbol {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Map every byte of `text` to its rank.
///
/// On failure returns the position and byte of the first symbol outside the
/// alphabet.
pub fn encode(text: &[u8]) -> Result<Vec<u8>, (usize, u8)> {
    text.iter()
        .enumerate()
        .map(|(position, &symbol)| match rank(symbol) {
            Some(r) => Ok(r as u8),
            None => Err((position, symbol)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_letter_order() {
        for (expected, &symbol) in LETTERS.iter().enumerate() {
            assert_eq!(rank(symbol), Some(expected));
        }
        assert_eq!(rank(b'N'), None);
        assert_eq!(rank(b'a'), None);
    }

    #[test]
    fn encode_reports_first_foreign_symbol() {
        assert_eq!(encode(b"GATTACA").unwrap(), vec![2, 0, 3, 3, 0, 1, 0]);
        assert_eq!(encode(b"ACNGX"), Err((2, b'N')));
        assert!(encode(b"").unwrap().is_empty());
    }
}
