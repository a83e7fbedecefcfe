//! Word-level kernels over little-endian `u64` slices.
//!
//! Callers size the output slices; nothing here allocates.

use std::cmp::Ordering;

/// Number of words below the highest nonzero word, plus one.
#[inline(always)]
pub(crate) fn significant_len(words: &[u64]) -> usize {
    let mut len = words.len();
    while len > 0 && words[len - 1] == 0 {
        len -= 1;
    }
    len
}

/// Position of the highest set bit plus one, or zero for zero.
#[inline(always)]
pub(crate) fn bit_len(words: &[u64]) -> usize {
    let len = significant_len(words);
    if len == 0 {
        return 0;
    }
    len * 64 - words[len - 1].leading_zeros() as usize
}

/// Number of zero bits below the lowest set bit. Zero for a zero value.
#[inline(always)]
pub(crate) fn trailing_zeros(words: &[u64]) -> usize {
    for (index, &word) in words.iter().enumerate() {
        if word != 0 {
            return index * 64 + word.trailing_zeros() as usize;
        }
    }
    0
}

/// Compares two magnitudes, most significant word first.
#[inline(always)]
pub(crate) fn cmp_words(a: &[u64], b: &[u64]) -> Ordering {
    let a = &a[..significant_len(a)];
    let b = &b[..significant_len(b)];
    a.len()
        .cmp(&b.len())
        .then_with(|| a.iter().rev().cmp(b.iter().rev()))
}

/// Writes `a + b` into `out[..max(a.len(), b.len())]` and returns the carry.
pub(crate) fn add_into(out: &mut [u64], a: &[u64], b: &[u64]) -> u64 {
    let len = a.len().max(b.len());
    debug_assert!(out.len() >= len);
    let mut carry = 0u64;
    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        let (sum1, c1) = x.overflowing_add(y);
        let (sum2, c2) = sum1.overflowing_add(carry);
        out[i] = sum2;
        carry = (c1 as u64) + (c2 as u64);
    }
    carry
}

/// Writes `a - b` into `out[..a.len()]`, assuming `a >= b`.
pub(crate) fn sub_into(out: &mut [u64], a: &[u64], b: &[u64]) {
    debug_assert!(out.len() >= a.len());
    debug_assert!(cmp_words(a, b) != Ordering::Less);
    let mut borrow = 0u64;
    for i in 0..a.len() {
        let y = b.get(i).copied().unwrap_or(0);
        let (diff1, b1) = a[i].overflowing_sub(y);
        let (diff2, b2) = diff1.overflowing_sub(borrow);
        out[i] = diff2;
        borrow = (b1 as u64) + (b2 as u64);
    }
    debug_assert_eq!(borrow, 0);
}

/// Schoolbook product. Only the lowest `out.len()` words are kept.
#[allow(clippy::needless_range_loop)]
pub(crate) fn mul_into(out: &mut [u64], a: &[u64], b: &[u64]) {
    out.fill(0);
    let limit = out.len();
    for i in 0..a.len() {
        if a[i] == 0 {
            continue;
        }
        let mut carry = 0u128;
        for j in 0..b.len() {
            let idx = i + j;
            if idx >= limit {
                break;
            }
            let prod = (a[i] as u128) * (b[j] as u128) + (out[idx] as u128) + carry;
            out[idx] = prod as u64;
            carry = prod >> 64;
        }
        let mut idx = i + b.len();
        while carry != 0 && idx < limit {
            let sum = (out[idx] as u128) + carry;
            out[idx] = sum as u64;
            carry = sum >> 64;
            idx += 1;
        }
    }
}

/// Word `index` of `a << shift`.
#[inline(always)]
pub(crate) fn shifted_word(a: &[u64], shift: usize, index: usize) -> u64 {
    let word_shift = shift / 64;
    let bit_shift = shift % 64;
    if index < word_shift {
        return 0;
    }
    let source = index - word_shift;
    let low = a.get(source).copied().unwrap_or(0);
    if bit_shift == 0 {
        return low;
    }
    let below = if source == 0 {
        0
    } else {
        a.get(source - 1).copied().unwrap_or(0)
    };
    (low << bit_shift) | (below >> (64 - bit_shift))
}

/// Writes `a << shift` into every word of `out`, truncating above it.
pub(crate) fn shl_into(out: &mut [u64], a: &[u64], shift: usize) {
    for (index, word) in out.iter_mut().enumerate() {
        *word = shifted_word(a, shift, index);
    }
}

/// Shifts `words` right by `shift` bits in place. Vacated high words become zero.
pub(crate) fn shr_in_place(words: &mut [u64], shift: usize) {
    let word_shift = shift / 64;
    let bit_shift = shift % 64;
    let len = words.len();
    if word_shift >= len {
        words.fill(0);
        return;
    }
    for i in 0..len - word_shift {
        let low = words[i + word_shift];
        let high = if bit_shift == 0 {
            0
        } else {
            words.get(i + word_shift + 1).copied().unwrap_or(0) << (64 - bit_shift)
        };
        words[i] = if bit_shift == 0 {
            low
        } else {
            (low >> bit_shift) | high
        };
    }
    words[len - word_shift..].fill(0);
}
