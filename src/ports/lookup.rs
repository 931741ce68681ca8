//! # Lookup Port
//!
//! Trait for finding members of an ordered collection of identity-bearing
//! objects.
//!
//! Both searches share one contract: an ordered collection of matches,
//! empty when nothing qualifies. Absence is never an error here; operations
//! that need a member (delete) report `NotFound` themselves.
//!
//! Implemented by `Contour` (over its segments) and `Session` (over its
//! workspace).

use crate::core::similarity::{IndelRatio, Similarity, DEFAULT_FUZZY_THRESHOLD};
use crate::core::{Identified, Uid};

/// A search hit: the member, its position in the collection, and its score
#[derive(Debug)]
pub struct Found<'a, T> {
    /// The matching member
    pub item: &'a T,

    /// Index of the member in collection order
    pub index: usize,

    /// Similarity score in `0..=100`; uid hits score 100
    pub score: u8,
}

impl<'a, T> Clone for Found<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Found<'a, T> {}

/// Trait for uid and fuzzy-name search over ordered members
pub trait Lookup {
    /// Member type
    type Item: Identified;

    /// Members in collection order
    fn members(&self) -> &[Self::Item];

    /// Best scores below this produce no match
    fn fuzzy_threshold(&self) -> u8 {
        DEFAULT_FUZZY_THRESHOLD
    }

    /// Scoring function for name search
    fn similarity(&self) -> &dyn Similarity {
        &IndelRatio
    }

    /// Exact uid match, zero or one result
    fn search_by_uid(&self, uid: Uid) -> Vec<Found<'_, Self::Item>> {
        self.members()
            .iter()
            .enumerate()
            .find(|(_, m)| m.uid() == uid)
            .map(|(index, item)| Found {
                item,
                index,
                score: 100,
            })
            .into_iter()
            .collect()
    }

    /// Every member tied for the best name score, in collection order
    ///
    /// Empty when the collection is empty or the best score is below
    /// `fuzzy_threshold`. Ties are all returned rather than guessing one.
    fn search_by_name(&self, name: &str) -> Vec<Found<'_, Self::Item>> {
        let similarity = self.similarity();
        let scores: Vec<u8> = self
            .members()
            .iter()
            .map(|m| similarity.score(m.name(), name))
            .collect();

        let best = match scores.iter().max() {
            Some(&best) if best >= self.fuzzy_threshold() => best,
            _ => return Vec::new(),
        };

        self.members()
            .iter()
            .zip(scores)
            .enumerate()
            .filter(|(_, (_, score))| *score == best)
            .map(|(index, (item, score))| Found { item, index, score })
            .collect()
    }

    /// Member with this uid, if any
    fn get(&self, uid: Uid) -> Option<&Self::Item> {
        self.members().iter().find(|m| m.uid() == uid)
    }

    /// Check if a member carries this uid
    fn contains(&self, uid: Uid) -> bool {
        self.get(uid).is_some()
    }
}
