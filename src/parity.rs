//! Hamming-style parity over field checksums.
//!
//! Field positions are 1-based. Parity word `k` is the XOR of every field
//! checksum whose position has bit `k` set, so `p = ceil(log2(n + 1))`
//! words are enough to address any of `n` fields plus the all-zero
//! "no difference" syndrome.
//!
//! If exactly one checksum differs between the stored and current
//! vectors, the set of differing parity words spells out its position,
//! and every differing word differs by the same XOR delta (the change in
//! that one checksum). Two or more changes can still produce an in-range
//! position, so a candidate is only accepted when the deltas agree.
//! Anything else is reported as unlocalizable.

/// Number of parity words for `n` fields: the bit length of `n`.
#[must_use]
pub const fn parity_count(n: usize) -> usize {
    (usize::BITS - n.leading_zeros()) as usize
}

/// Compute the parity words for checksums in canonical order.
#[must_use]
pub fn encode_parity(checksums: &[u32]) -> Vec<u32> {
    let mut parity = vec![0_u32; parity_count(checksums.len())];

    for (index, checksum) in checksums.iter().enumerate() {
        let position = index + 1;
        for (bit, word) in parity.iter_mut().enumerate() {
            if position & (1 << bit) != 0 {
                *word ^= checksum;
            }
        }
    }

    parity
}

/// Per-word XOR difference between recomputed and stored parity.
///
/// Returns `None` when the word counts disagree, i.e. the stored parity
/// was built for a different number of fields.
fn parity_deltas(checksums: &[u32], stored: &[u32]) -> Option<Vec<u32>> {
    let expected = encode_parity(checksums);
    if expected.len() != stored.len() {
        return None;
    }
    Some(expected.iter().zip(stored).map(|(a, b)| a ^ b).collect())
}

/// Syndrome of current checksums against stored parity.
///
/// Bit `k` is set when recomputed word `k` differs from stored word `k`.
/// `None` if the parity was built for a different field count.
#[must_use]
pub fn syndrome(checksums: &[u32], stored: &[u32]) -> Option<usize> {
    let deltas = parity_deltas(checksums, stored)?;
    Some(
        deltas
            .iter()
            .enumerate()
            .filter(|(_, delta)| **delta != 0)
            .fold(0, |loc, (bit, _)| loc | (1 << bit)),
    )
}

/// 0-based index of the single changed field, if one can be singled out.
///
/// `None` means no parity difference, a syndrome outside `1..=n`, or
/// differing words that disagree on the delta (more than one change).
#[must_use]
pub fn locate_change(checksums: &[u32], stored: &[u32]) -> Option<usize> {
    let deltas = parity_deltas(checksums, stored)?;

    let mut loc = 0_usize;
    let mut delta = None;
    for (bit, d) in deltas.iter().enumerate() {
        if *d == 0 {
            continue;
        }
        match delta {
            None => delta = Some(*d),
            Some(seen) if seen != *d => return None,
            Some(_) => {}
        }
        loc |= 1 << bit;
    }

    if loc == 0 || loc > checksums.len() {
        return None;
    }
    Some(loc - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_count() {
        assert_eq!(parity_count(0), 0);
        assert_eq!(parity_count(1), 1);
        assert_eq!(parity_count(2), 2);
        assert_eq!(parity_count(3), 2);
        assert_eq!(parity_count(4), 3);
        assert_eq!(parity_count(7), 3);
        assert_eq!(parity_count(8), 4);
        for n in 0..128_usize {
            let expected = f64::from(u32::try_from(n + 1).unwrap()).log2().ceil();
            assert_eq!(parity_count(n), expected as usize, "n = {n}");
        }
    }

    #[test]
    fn test_encode_parity_by_hand() {
        // positions 1 (0b01), 2 (0b10), 3 (0b11)
        let parity = encode_parity(&[0xA, 0xB, 0xC]);
        assert_eq!(parity, vec![0xA ^ 0xC, 0xB ^ 0xC]);
    }

    #[test]
    fn test_encode_parity_empty() {
        assert!(encode_parity(&[]).is_empty());
    }

    #[test]
    fn test_locate_each_single_change() {
        let original: Vec<u32> = (0..13).map(|i| 0x1000_0001_u32.wrapping_mul(i + 7)).collect();
        let stored = encode_parity(&original);

        assert_eq!(syndrome(&original, &stored), Some(0));
        assert_eq!(locate_change(&original, &stored), None);

        for index in 0..original.len() {
            let mut current = original.clone();
            current[index] ^= 0xdead_beef;
            assert_eq!(locate_change(&current, &stored), Some(index));
        }
    }

    #[test]
    fn test_syndrome_out_of_range() {
        // Positions 2 (0b010) and 5 (0b101) of five fields: syndrome 7.
        let original = vec![1, 2, 3, 4, 5];
        let stored = encode_parity(&original);

        let mut current = original.clone();
        current[1] = 20;
        current[4] = 50;
        assert_eq!(syndrome(&current, &stored), Some(7));
        assert_eq!(locate_change(&current, &stored), None);
    }

    #[test]
    fn test_in_range_syndrome_from_two_changes_is_rejected() {
        // Positions 1 (0b001) and 4 (0b100) changed: syndrome 5 points at an
        // untouched field, but the two differing words carry different deltas.
        let original = vec![1, 2, 3, 4, 5];
        let stored = encode_parity(&original);

        let mut current = original.clone();
        current[0] = 10;
        current[3] = 40;
        assert_eq!(syndrome(&current, &stored), Some(5));
        assert_eq!(locate_change(&current, &stored), None);
    }

    #[test]
    fn test_mismatched_word_count() {
        let stored = encode_parity(&[1, 2, 3]);
        assert_eq!(syndrome(&[1, 2, 3, 4], &stored), None);
        assert_eq!(locate_change(&[1, 2, 3, 4], &stored), None);
    }
}
