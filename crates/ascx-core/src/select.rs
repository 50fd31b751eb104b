// Rust guideline compliant 2026-10-12

//! Deterministic "latest item" selection.

use crate::models::{
    AppStoreVersionAttributes, BetaAppReviewSubmissionAttributes, Resource,
    ReviewSubmissionAttributes,
};

/// An item with an identifier and a fixed-width ISO-8601 timestamp.
///
/// Timestamps compare lexicographically, which matches chronological order for
/// that format.
pub trait Timestamped {
    /// Identifier used to break timestamp ties.
    fn id(&self) -> &str;
    /// Timestamp used for ordering.
    fn timestamp(&self) -> &str;
}

impl Timestamped for Resource<AppStoreVersionAttributes> {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> &str {
        &self.attributes.created_date
    }
}

impl Timestamped for Resource<ReviewSubmissionAttributes> {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> &str {
        &self.attributes.submitted_date
    }
}

impl Timestamped for Resource<BetaAppReviewSubmissionAttributes> {
    fn id(&self) -> &str {
        &self.id
    }

    fn timestamp(&self) -> &str {
        &self.attributes.submitted_date
    }
}

/// Picks the item with the greatest timestamp.
///
/// Ties on timestamp go to the lexicographically greater identifier. Items
/// equal on both keep the earliest one. The input is not reordered.
///
/// # Arguments
///
/// * `items` - Candidates in any order
///
/// # Returns
///
/// The selected item, or `None` for an empty slice.
pub fn select_latest<T: Timestamped>(items: &[T]) -> Option<&T> {
    let (first, rest) = items.split_first()?;
    let mut best = first;
    for current in rest {
        let newer = current.timestamp() > best.timestamp();
        let tie_wins = current.timestamp() == best.timestamp() && current.id() > best.id();
        if newer || tie_wins {
            best = current;
        }
    }
    Some(best)
}
