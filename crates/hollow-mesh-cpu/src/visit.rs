use crate::constants::{BITS_PER_WORD, WORD_INDEX_MASK, WORD_INDEX_SHIFT};

/// Flat bitset over a chunk volume, one bit per cell. Backs the visited
/// tables of both visibility passes.
#[derive(Clone, Debug, Default)]
pub struct VisitSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitSet {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(BITS_PER_WORD)],
            len,
        }
    }

    /// Resizes to `len` bits and clears every bit.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        let need = len.div_ceil(BITS_PER_WORD);
        self.words.clear();
        self.words.resize(need, 0);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        debug_assert!(i < self.len);
        self.words[i >> WORD_INDEX_SHIFT] |= 1u64 << (i & WORD_INDEX_MASK);
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        self.words[i >> WORD_INDEX_SHIFT] & (1u64 << (i & WORD_INDEX_MASK)) != 0
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }
}
