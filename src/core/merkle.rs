// src/core/merkle.rs

use crate::core::hash::{sha3_256_concat, Digest32};
use crate::error::{Result, SealError};

/// Merkle tree over one chapter's ordered unit digests.
///
/// Parents hash the concatenation of their children's digests in
/// left-right order; the leaf order is part of the commitment, so pairs
/// are never reordered. At a level with an odd node count the final
/// unpaired node is promoted unchanged to the next level (never hashed
/// with itself), so a duplicated trailing leaf remains distinguishable
/// from a carried-up one.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// The root digest of the tree.
    root: Digest32,
    /// The leaf digests, in unit order.
    leaves: Vec<Digest32>,
}

impl MerkleTree {
    /// Builds a tree from a chapter's unit digests, in unit order.
    ///
    /// A single-leaf chapter has `root == leaves[0]`. An empty chapter has
    /// no root and is rejected with [`SealError::InvalidInput`]; callers
    /// with chapter context use [`chapter_root`] instead.
    pub fn new(leaves: Vec<Digest32>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(SealError::invalid_input(
                "cannot build a merkle tree over zero unit digests",
            ));
        }

        let mut current_level = leaves.clone();
        while current_level.len() > 1 {
            let mut next_level = Vec::with_capacity((current_level.len() + 1) / 2);
            for pair in current_level.chunks(2) {
                if pair.len() == 2 {
                    next_level.push(Self::hash_pair(&pair[0], &pair[1]));
                } else {
                    // Odd node count: carry the last node up unchanged.
                    next_level.push(pair[0]);
                }
            }
            current_level = next_level;
        }

        Ok(Self {
            root: current_level[0],
            leaves,
        })
    }

    /// Returns the root digest of the tree.
    pub fn root(&self) -> &Digest32 {
        &self.root
    }

    /// Returns the leaf digests, in unit order.
    pub fn leaves(&self) -> &[Digest32] {
        &self.leaves
    }

    /// Hashes a parent from an adjacent pair, left digest bytes first.
    fn hash_pair(left: &Digest32, right: &Digest32) -> Digest32 {
        sha3_256_concat(&[left, right])
    }
}

/// Derives the chapter root for an ordered slice of unit digests.
///
/// Fails with [`SealError::EmptyChapter`] when the chapter has zero units,
/// naming the work and chapter so the offending input can be located.
pub fn chapter_root(work: &str, chapter: &str, unit_digests: &[Digest32]) -> Result<Digest32> {
    if unit_digests.is_empty() {
        return Err(SealError::empty_chapter(work, chapter));
    }
    Ok(*MerkleTree::new(unit_digests.to_vec())?.root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::sha3_256;
    use assert_matches::assert_matches;

    fn leaf(tag: &[u8]) -> Digest32 {
        sha3_256(tag)
    }

    #[test]
    fn test_single_leaf_root_is_the_leaf() {
        let a = leaf(b"only unit");
        let tree = MerkleTree::new(vec![a]).unwrap();
        assert_eq!(tree.root(), &a);
    }

    #[test]
    fn test_two_leaves_hash_in_order() {
        let a = leaf(b"a");
        let b = leaf(b"b");
        let tree = MerkleTree::new(vec![a, b]).unwrap();
        assert_eq!(tree.root(), &sha3_256_concat(&[&a, &b]));
        // Reversing the leaves must change the root: order is committed.
        let reversed = MerkleTree::new(vec![b, a]).unwrap();
        assert_ne!(tree.root(), reversed.root());
    }

    #[test]
    fn test_three_leaves_carry_up_last() {
        let a = leaf(b"a");
        let b = leaf(b"b");
        let c = leaf(b"c");
        let tree = MerkleTree::new(vec![a, b, c]).unwrap();
        let ab = sha3_256_concat(&[&a, &b]);
        // C is promoted unchanged, not hashed with itself.
        assert_eq!(tree.root(), &sha3_256_concat(&[&ab, &c]));
        assert_ne!(
            tree.root(),
            &sha3_256_concat(&[&ab, &sha3_256_concat(&[&c, &c])])
        );
    }

    #[test]
    fn test_five_leaves_carry_up_across_levels() {
        let d: Vec<Digest32> = (0u8..5).map(|i| leaf(&[i])).collect();
        let tree = MerkleTree::new(d.clone()).unwrap();
        let ab = sha3_256_concat(&[&d[0], &d[1]]);
        let cd = sha3_256_concat(&[&d[2], &d[3]]);
        let abcd = sha3_256_concat(&[&ab, &cd]);
        // The fifth leaf rides up two levels before pairing with abcd.
        assert_eq!(tree.root(), &sha3_256_concat(&[&abcd, &d[4]]));
    }

    #[test]
    fn test_four_leaves_balanced() {
        let d: Vec<Digest32> = (0u8..4).map(|i| leaf(&[i])).collect();
        let tree = MerkleTree::new(d.clone()).unwrap();
        let ab = sha3_256_concat(&[&d[0], &d[1]]);
        let cd = sha3_256_concat(&[&d[2], &d[3]]);
        assert_eq!(tree.root(), &sha3_256_concat(&[&ab, &cd]));
    }

    #[test]
    fn test_empty_chapter_rejected() {
        assert_matches!(
            chapter_root("QURAN", "Sura 1", &[]),
            Err(SealError::EmptyChapter { .. })
        );
    }

    #[test]
    fn test_chapter_root_matches_tree() {
        let d: Vec<Digest32> = (0u8..3).map(|i| leaf(&[i])).collect();
        let root = chapter_root("QURAN", "Sura 1", &d).unwrap();
        assert_eq!(&root, MerkleTree::new(d).unwrap().root());
    }
}
