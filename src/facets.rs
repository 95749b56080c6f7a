//! Facet value sets
//!
//! A sorted, deduplicated `SmallVec<[String; 5]>`-based set for facet values
//! (categories, sizes, colors, brands). Values keep the casing they were
//! inserted with, but membership and intersection checks fold case, so a
//! filter built from "white" still matches a product tagged "White". An empty
//! set used as a filter constraint means "no constraint on this facet", never
//! "exclude all".

use std::{cmp::Ordering, string::ToString};

use smallvec::SmallVec;

/// Case-folded ordering used for sorting, membership and intersection checks.
fn cmp_folded(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// A sorted, case-preserving set of facet values using `SmallVec<[String; 5]>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetSet {
    values: SmallVec<[String; 5]>,
}

impl FacetSet {
    /// Create a new facet set from a vector of values.
    ///
    /// Values that differ only by case collapse to the first occurrence.
    #[must_use]
    pub fn new(values: SmallVec<[String; 5]>) -> Self {
        let mut set = Self { values };

        // Stable sort, so the first-inserted casing survives the dedup.
        set.values.sort_by(|a, b| cmp_folded(a, b));
        set.values.dedup_by(|a, b| cmp_folded(a, b).is_eq());

        set
    }

    /// Create a new facet set from string slices.
    pub fn from_strs(values: &[&str]) -> Self {
        Self::new(
            values
                .iter()
                .map(ToString::to_string)
                .collect::<SmallVec<[String; 5]>>(),
        )
    }

    /// Create an empty facet set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            values: SmallVec::with_capacity(0),
        }
    }

    /// Whether any value is shared with `other`, ignoring case.
    pub fn intersects(&self, other: &Self) -> bool {
        // Two pointers over sorted vectors for O(n + m) performance.
        let mut left = self.values.iter();
        let mut right = other.values.iter();
        let mut left_value = left.next();
        let mut right_value = right.next();

        while let (Some(left_ref), Some(right_ref)) = (left_value, right_value) {
            match cmp_folded(left_ref, right_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_value = left.next(),
                Ordering::Greater => right_value = right.next(),
            }
        }

        false
    }

    /// The values shared with `other`, as a new set keeping this set's casing.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = SmallVec::new();
        let mut left = self.values.iter();
        let mut right = other.values.iter();
        let mut left_value = left.next();
        let mut right_value = right.next();

        while let (Some(left_ref), Some(right_ref)) = (left_value, right_value) {
            match cmp_folded(left_ref, right_ref) {
                Ordering::Equal => {
                    result.push(left_ref.clone());
                    left_value = left.next();
                    right_value = right.next();
                }
                Ordering::Less => left_value = left.next(),
                Ordering::Greater => right_value = right.next(),
            }
        }

        Self { values: result }
    }

    /// Whether the set contains `value`, ignoring case.
    pub fn contains(&self, value: &str) -> bool {
        self.values
            .binary_search_by(|probe| cmp_folded(probe, value))
            .is_ok()
    }

    /// Whether the set has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Add a value, keeping the set sorted; adding a value already present
    /// under any casing is a no-op and keeps the existing casing.
    pub fn add(&mut self, value: &str) {
        if let Err(pos) = self
            .values
            .binary_search_by(|probe| cmp_folded(probe, value))
        {
            self.values.insert(pos, value.to_string());
        }
    }

    /// Remove a value, ignoring case; removing an absent value is a no-op.
    pub fn remove(&mut self, value: &str) {
        if let Ok(pos) = self
            .values
            .binary_search_by(|probe| cmp_folded(probe, value))
        {
            self.values.remove(pos);
        }
    }

    /// Toggle a value, returning whether it is now present.
    pub fn toggle(&mut self, value: &str) -> bool {
        match self
            .values
            .binary_search_by(|probe| cmp_folded(probe, value))
        {
            Ok(pos) => {
                self.values.remove(pos);
                false
            }
            Err(pos) => {
                self.values.insert(pos, value.to_string());
                true
            }
        }
    }

    /// Iterate over the values in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_set_intersection_works() {
        let mens = FacetSet::from_strs(&["White", "Green", "Navy"]);
        let womens = FacetSet::from_strs(&["White", "Pink", "Coral"]);
        let kids = FacetSet::from_strs(&["Yellow", "Orange"]);

        assert!(mens.intersects(&womens));
        assert!(!mens.intersects(&kids));
        assert!(!womens.intersects(&kids));

        let intersection = mens.intersection(&womens);
        assert_eq!(intersection.len(), 1);
        assert!(intersection.contains("White"));
    }

    #[test]
    fn facet_set_contains_works() {
        let colors = FacetSet::from_strs(&["White", "Green", "Navy"]);

        assert!(colors.contains("White"));
        assert!(colors.contains("Green"));
        assert!(colors.contains("Navy"));
        assert!(!colors.contains("Black"));
    }

    #[test]
    fn facet_set_ignores_case() {
        let colors = FacetSet::from_strs(&["White", "Green", "Navy"]);

        assert!(colors.contains("white"));
        assert!(colors.contains("GREEN"));
        assert!(!colors.contains("black"));

        let lowered = FacetSet::from_strs(&["navy", "coral"]);
        assert!(colors.intersects(&lowered));

        let intersection = colors.intersection(&lowered);
        assert_eq!(intersection.len(), 1);
        assert!(intersection.contains("Navy"));
    }

    #[test]
    fn facet_set_add_keeps_existing_casing() {
        let mut colors = FacetSet::from_strs(&["White"]);

        colors.add("WHITE");
        assert_eq!(colors.len(), 1);

        let values: Vec<&str> = colors.iter().collect();
        assert_eq!(values, ["White"]);
    }

    #[test]
    fn facet_set_add_remove_works() {
        let mut colors = FacetSet::from_strs(&["White", "Green"]);

        assert_eq!(colors.len(), 2);
        assert!(!colors.contains("Navy"));
        assert!(!colors.is_empty());

        colors.add("Navy");
        assert_eq!(colors.len(), 3);
        assert!(colors.contains("Navy"));

        colors.remove("green");
        assert_eq!(colors.len(), 2);
        assert!(!colors.contains("Green"));
    }

    #[test]
    fn facet_set_toggle_flips_membership() {
        let mut brands = FacetSet::empty();

        assert!(brands.toggle("Adidas"));
        assert!(brands.contains("Adidas"));

        assert!(!brands.toggle("adidas"));
        assert!(!brands.contains("Adidas"));
        assert!(brands.is_empty());
    }

    #[test]
    fn facet_set_is_empty_works() {
        let empty = FacetSet::empty();
        assert!(empty.is_empty());

        let empty_from_strs = FacetSet::from_strs(&[]);
        assert!(empty_from_strs.is_empty());

        let brands = FacetSet::from_strs(&["Nike"]);
        assert!(!brands.is_empty());
    }

    #[test]
    fn facet_set_deduplicates_values() {
        let sizes = FacetSet::from_strs(&["8", "9", "8", "10", "9"]);

        assert_eq!(sizes.len(), 3);
        assert!(sizes.contains("8"));
        assert!(sizes.contains("9"));
        assert!(sizes.contains("10"));
    }

    #[test]
    fn facet_set_maintains_sorted_order() {
        let brands = FacetSet::from_strs(&["Puma", "Adidas", "Nike"]);

        let values: Vec<&str> = brands.iter().collect();
        assert_eq!(values, ["Adidas", "Nike", "Puma"]);
    }

    #[test]
    fn facet_set_add_to_empty_keeps_order() {
        let mut set = FacetSet::empty();

        set.add("Women");
        set.add("Kids");
        set.add("Men");

        let values: Vec<&str> = set.iter().collect();
        assert_eq!(values, ["Kids", "Men", "Women"]);
    }
}
