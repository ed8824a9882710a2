//! Sorted set of field values with binary-search lookups.

use crate::pattern::PatternValueType;
use std::collections::BTreeSet;

/// Sorted ascending sequence of distinct values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct ValueSet(Vec<PatternValueType>);

impl ValueSet {
    #[inline]
    pub(crate) fn contains(&self, value: PatternValueType) -> bool {
        self.0.binary_search(&value).is_ok()
    }

    #[inline]
    pub(crate) fn first(&self) -> Option<PatternValueType> {
        self.0.first().copied()
    }

    /// Smallest value `>= value`.
    #[inline]
    pub(crate) fn first_at_or_after(&self, value: PatternValueType) -> Option<PatternValueType> {
        let index = self.0.partition_point(|v| *v < value);
        self.0.get(index).copied()
    }

    /// Smallest value `> value`.
    #[inline]
    pub(crate) fn next_after(&self, value: PatternValueType) -> Option<PatternValueType> {
        let index = self.0.partition_point(|v| *v <= value);
        self.0.get(index).copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = PatternValueType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<PatternValueType> for ValueSet {
    fn from_iter<I: IntoIterator<Item = PatternValueType>>(iter: I) -> Self {
        let sorted: BTreeSet<PatternValueType> = iter.into_iter().collect();
        Self(sorted.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_iter_sorts_and_dedups() {
        let set: ValueSet = [30, 5, 15, 5, 0, 30].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 5, 15, 30]);
        assert_eq!(set.first(), Some(0));
        assert!(set.contains(15));
        assert!(!set.contains(16));
    }

    #[rstest]
    #[case(0, Some(0), Some(5))]
    #[case(1, Some(5), Some(5))]
    #[case(5, Some(5), Some(15))]
    #[case(29, Some(30), Some(30))]
    #[case(30, Some(30), None)]
    #[case(59, None, None)]
    fn test_lookups(
        #[case] value: PatternValueType,
        #[case] at_or_after: Option<PatternValueType>,
        #[case] after: Option<PatternValueType>,
    ) {
        let set: ValueSet = [0, 5, 15, 30].into_iter().collect();
        assert_eq!(set.first_at_or_after(value), at_or_after, "value = {value}");
        assert_eq!(set.next_after(value), after, "value = {value}");
    }

    #[test]
    fn test_empty_set() {
        let set = ValueSet::default();
        assert_eq!(set.iter().next(), None);
        assert_eq!(set.first(), None);
        assert_eq!(set.first_at_or_after(0), None);
        assert_eq!(set.next_after(0), None);
    }
}
