//! Merkle tree implementation
//!
//! Used for computing transaction merkle roots in blocks.

use super::{hash_pair, Hash};

/// Compute the merkle root of a list of transaction ids
///
/// If the list is empty, returns zero hash.
/// If a level has an odd number of elements, the last one is paired with itself.
pub fn compute_merkle_root(hashes: &[Hash]) -> Hash {
    let mut current_level: Vec<Hash> = hashes.to_vec();

    while current_level.len() > 1 {
        if let Some(&last) = current_level.last() {
            if current_level.len() % 2 == 1 {
                current_level.push(last);
            }
        }

        current_level = current_level
            .chunks(2)
            .map(|pair| hash_pair(&pair[0], &pair[1]))
            .collect();
    }

    current_level.first().copied().unwrap_or_else(Hash::zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::double_sha256;

    fn make_hashes(n: usize) -> Vec<Hash> {
        (0..n).map(|i| double_sha256(&i.to_le_bytes())).collect()
    }

    #[test]
    fn test_empty_merkle_root() {
        assert_eq!(compute_merkle_root(&[]), Hash::zero());
    }

    #[test]
    fn test_single_element() {
        let hashes = make_hashes(1);
        assert_eq!(compute_merkle_root(&hashes), hashes[0]);
    }

    #[test]
    fn test_two_elements() {
        let hashes = make_hashes(2);
        assert_eq!(compute_merkle_root(&hashes), hash_pair(&hashes[0], &hashes[1]));
    }

    #[test]
    fn test_odd_number_duplicates_last() {
        let hashes = make_hashes(3);
        let left = hash_pair(&hashes[0], &hashes[1]);
        let right = hash_pair(&hashes[2], &hashes[2]);
        assert_eq!(compute_merkle_root(&hashes), hash_pair(&left, &right));
    }
}
