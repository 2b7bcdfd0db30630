//! Node label allocation from a fixed ordered alphabet.

use crate::graph::GraphError;

/// The default label alphabet.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Hands out unique labels, one character each, in alphabet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelAllocator {
    alphabet: &'static str,
}

impl Default for LabelAllocator {
    fn default() -> Self {
        Self { alphabet: ALPHABET }
    }
}

impl LabelAllocator {
    /// Allocator over a custom alphabet. Duplicate characters are the
    /// caller's problem; labels are taken positionally.
    #[must_use]
    pub const fn with_alphabet(alphabet: &'static str) -> Self {
        Self { alphabet }
    }

    /// Number of labels this allocator can produce.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.alphabet.chars().count()
    }

    /// The first `count` labels of the alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::AlphabetExhausted`] when `count` exceeds the
    /// alphabet instead of silently returning fewer labels.
    pub fn allocate(&self, count: usize) -> Result<Vec<String>, GraphError> {
        let available = self.capacity();
        if count > available {
            return Err(GraphError::AlphabetExhausted {
                requested: count,
                available,
            });
        }
        Ok(self
            .alphabet
            .chars()
            .take(count)
            .map(String::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_prefix_in_order() {
        let labels = LabelAllocator::default().allocate(5).expect("five labels");
        assert_eq!(labels, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn allocates_whole_alphabet() {
        let labels = LabelAllocator::default().allocate(26).expect("all labels");
        assert_eq!(labels.len(), 26);
        assert_eq!(labels.last().map(String::as_str), Some("Z"));
    }

    #[test]
    fn zero_labels_is_empty() {
        assert!(LabelAllocator::default().allocate(0).expect("empty").is_empty());
    }

    #[test]
    fn exhausting_alphabet_fails_fast() {
        let err = LabelAllocator::with_alphabet("XYZ")
            .allocate(4)
            .expect_err("only three labels");
        assert!(matches!(
            err,
            GraphError::AlphabetExhausted {
                requested: 4,
                available: 3
            }
        ));
    }
}
