use std::fmt::Debug;

use crate::error::ExactError;

/// Backing storage for the words of an [`ExtInt`](super::ExtInt).
///
/// Implementations hold a prefix of live words; resizing zero-fills any newly
/// exposed words.
pub trait WordStore: Clone + Default + Debug {
    /// Maximum number of live words, or `None` when the store grows freely.
    const CAPACITY: Option<usize>;

    fn words(&self) -> &[u64];

    fn words_mut(&mut self) -> &mut [u64];

    /// Sets the number of live words, zero-filling new ones.
    fn try_resize(&mut self, len: usize) -> Result<(), ExactError>;

    /// Drops live words beyond `len`.
    fn truncate(&mut self, len: usize);

    #[inline(always)]
    fn len(&self) -> usize {
        self.words().len()
    }

    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordStore for Vec<u64> {
    const CAPACITY: Option<usize> = None;

    #[inline(always)]
    fn words(&self) -> &[u64] {
        self
    }

    #[inline(always)]
    fn words_mut(&mut self) -> &mut [u64] {
        self
    }

    fn try_resize(&mut self, len: usize) -> Result<(), ExactError> {
        self.resize(len, 0);
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}

/// Inline storage for at most `N` words.
#[derive(Clone, Copy)]
pub struct ArrayWords<const N: usize> {
    len: usize,
    words: [u64; N],
}

impl<const N: usize> ArrayWords<N> {
    pub const fn new() -> Self {
        Self {
            len: 0,
            words: [0; N],
        }
    }
}

impl<const N: usize> Default for ArrayWords<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Debug for ArrayWords<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.words()).finish()
    }
}

impl<const N: usize> PartialEq for ArrayWords<N> {
    fn eq(&self, other: &Self) -> bool {
        self.words() == other.words()
    }
}

impl<const N: usize> Eq for ArrayWords<N> {}

impl<const N: usize> WordStore for ArrayWords<N> {
    const CAPACITY: Option<usize> = Some(N);

    #[inline(always)]
    fn words(&self) -> &[u64] {
        &self.words[..self.len]
    }

    #[inline(always)]
    fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words[..self.len]
    }

    fn try_resize(&mut self, len: usize) -> Result<(), ExactError> {
        if len > N {
            return Err(ExactError::CapacityExceeded {
                needed: len,
                capacity: N,
            });
        }
        if len > self.len {
            self.words[self.len..len].fill(0);
        }
        self.len = len;
        Ok(())
    }

    fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_zero_fills_stale_words() {
        let mut store = ArrayWords::<3>::new();
        store.try_resize(2).unwrap();
        store.words_mut().copy_from_slice(&[7, 9]);
        store.truncate(1);
        store.try_resize(3).unwrap();
        assert_eq!(store.words(), &[7, 0, 0]);
    }

    #[test]
    fn resize_past_capacity_fails() {
        let mut store = ArrayWords::<2>::new();
        assert_eq!(
            store.try_resize(3),
            Err(ExactError::CapacityExceeded {
                needed: 3,
                capacity: 2
            })
        );
        assert!(store.is_empty());
    }
}
