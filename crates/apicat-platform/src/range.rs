//! Canonical support timeline for a single platform.
//!
//! A [`PlatformSupportRange`] is built from an unordered multiset of
//! [`VersionPoint`]s. Construction sorts the points, drops the ones that do
//! not change the support state, and cancels contradictory pairs, leaving
//! an alternating sequence whose first point (the head) decides whether the
//! range is an allow-list or a deny-list.
//!
//! # Invariants
//!
//! - Retained points are sorted by version.
//! - No two adjacent retained points share the same support state.
//! - Equality and hashing are by the retained points only.

use std::fmt;

use apicat_types::Version;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// "Support changes to `is_supported` at `version`, inclusive."
///
/// Points order by version first, then unsupported before supported, which
/// is the order range construction walks them in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VersionPoint {
    pub version: Version,
    pub is_supported: bool,
}

impl VersionPoint {
    pub const fn new(version: Version, is_supported: bool) -> Self {
        Self {
            version,
            is_supported,
        }
    }

    pub const fn supported(version: Version) -> Self {
        Self::new(version, true)
    }

    pub const fn unsupported(version: Version) -> Self {
        Self::new(version, false)
    }
}

impl From<(Version, bool)> for VersionPoint {
    fn from((version, is_supported): (Version, bool)) -> Self {
        Self::new(version, is_supported)
    }
}

/// A half-open version span: `[start_inclusive, end_exclusive)`.
///
/// `None` on either side means unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SupportSpan {
    pub start_inclusive: Option<Version>,
    pub end_exclusive: Option<Version>,
}

impl fmt::Display for SupportSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.start_inclusive, &self.end_exclusive) {
            (None, None) => f.write_str("any"),
            (None, Some(end)) => write!(f, "< {end}"),
            (Some(start), None) => write!(f, ">= {start}"),
            (Some(start), Some(end)) => write!(f, "{start} - {end}"),
        }
    }
}

/// Canonical, conflict-resolved support timeline for one platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PlatformSupportRange {
    points: Vec<VersionPoint>,
}

impl PlatformSupportRange {
    /// Build a range from support facts in any order.
    ///
    /// A point whose state equals the previously retained point's state is
    /// redundant and skipped. A supported point at the same version as a
    /// retained unsupported point contradicts it: both are dropped.
    pub fn new<I>(points: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VersionPoint>,
    {
        let mut sorted: Vec<VersionPoint> = points.into_iter().map(Into::into).collect();
        sorted.sort();

        let mut retained: Vec<VersionPoint> = Vec::with_capacity(sorted.len());
        for point in sorted {
            if let Some(previous) = retained.last() {
                if previous.is_supported == point.is_supported {
                    continue;
                }

                if previous.version == point.version && !previous.is_supported && point.is_supported
                {
                    trace!(version = %point.version, "conflicting support facts cancel");
                    retained.pop();
                    continue;
                }
            }

            retained.push(point);
        }

        Self { points: retained }
    }

    /// A range with no facts.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of retained points (head included).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// All retained points, head first.
    pub fn points(&self) -> &[VersionPoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&VersionPoint> {
        self.points.get(index)
    }

    pub fn head(&self) -> Option<&VersionPoint> {
        self.points.first()
    }

    /// The state flips after the head.
    pub fn tail(&self) -> &[VersionPoint] {
        self.points.get(1..).unwrap_or(&[])
    }

    /// `true` when the head says "supported": everything before the head,
    /// and every platform not listed, is unsupported. An empty range is not
    /// an allow-list.
    pub fn is_allow_list(&self) -> bool {
        self.head().is_some_and(|head| head.is_supported)
    }

    /// `true` when the range is a single point at version zero, so the
    /// head's state applies to every version.
    pub fn covers_all_versions(&self) -> bool {
        self.points.len() == 1 && self.points[0].version.is_zero()
    }

    /// Support state at `version`.
    ///
    /// The state of the last point at or before `version`; before the head
    /// the complement of [`is_allow_list`](Self::is_allow_list).
    pub fn is_supported(&self, version: &Version) -> bool {
        self.points
            .iter()
            .take_while(|point| point.version <= *version)
            .last()
            .map_or(!self.is_allow_list(), |point| point.is_supported)
    }

    /// The spans whose state matches the head's state.
    ///
    /// For an allow-list these are the supported spans; for a deny-list the
    /// unsupported ones.
    pub fn ranges(&self) -> Vec<SupportSpan> {
        let Some(head) = self.head() else {
            return Vec::new();
        };

        let mut spans = Vec::new();
        for (i, point) in self.points.iter().enumerate() {
            if point.is_supported != head.is_supported {
                continue;
            }
            spans.push(SupportSpan {
                start_inclusive: Some(point.version),
                end_exclusive: self.points.get(i + 1).map(|next| next.version),
            });
        }
        spans
    }
}

impl<P: Into<VersionPoint>> FromIterator<P> for PlatformSupportRange {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for PlatformSupportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, span) in self.ranges().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{span}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(s: &str) -> Version {
        s.parse().unwrap()
    }

    fn range(points: &[(&str, bool)]) -> PlatformSupportRange {
        points.iter().map(|(s, supported)| (v(s), *supported)).collect()
    }

    #[test]
    fn empty_input_is_empty_range() {
        let r = PlatformSupportRange::new(Vec::<VersionPoint>::new());
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert!(!r.is_allow_list());
        assert!(!r.covers_all_versions());
        assert!(r.ranges().is_empty());
        assert_eq!(r.to_string(), "");
    }

    #[test]
    fn empty_range_support_is_complement_of_allow_list() {
        let nothing = PlatformSupportRange::empty();
        let cancelled = range(&[("5.0", false), ("5.0", true)]);
        assert!(cancelled.is_empty());

        for r in [nothing, cancelled] {
            for version in ["0", "1.0", "99.9.9.9"] {
                assert_eq!(r.is_supported(&v(version)), !r.is_allow_list());
            }
        }
    }

    #[test]
    fn single_supported_fact_is_allow_list() {
        let r = range(&[("13.0", true)]);
        assert!(r.is_allow_list());
        assert!(!r.is_supported(&v("12.4")));
        assert!(r.is_supported(&v("13.0")));
        assert!(r.is_supported(&v("17.2")));
        assert_eq!(r.to_string(), ">= 13");
    }

    #[test]
    fn single_unsupported_fact_is_deny_list() {
        let r = range(&[("10.0", false)]);
        assert!(!r.is_allow_list());
        assert!(r.is_supported(&v("9.0")));
        assert!(!r.is_supported(&v("10.0")));
        assert_eq!(r.to_string(), ">= 10");
    }

    #[test]
    fn unversioned_fact_covers_all_versions() {
        let r = range(&[("0", true)]);
        assert!(r.covers_all_versions());
        assert!(r.is_supported(&Version::ZERO));
    }

    #[test]
    fn points_are_sorted_regardless_of_input_order() {
        let r = range(&[("15.0", false), ("10.0", true)]);
        assert_eq!(
            r.points(),
            &[
                VersionPoint::supported(v("10.0")),
                VersionPoint::unsupported(v("15.0")),
            ]
        );
        assert_eq!(r.to_string(), "10 - 15");
    }

    #[test]
    fn redundant_points_are_skipped() {
        let r = range(&[("10.0", true), ("11.0", true), ("12.0", false), ("13.0", false)]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.head(), Some(&VersionPoint::supported(v("10.0"))));
        assert_eq!(r.tail(), &[VersionPoint::unsupported(v("12.0"))]);
    }

    #[test]
    fn unsupported_then_supported_at_same_version_cancel() {
        let r = range(&[("14.0", true), ("14.0", false)]);
        assert!(r.is_empty());
    }

    #[test]
    fn cancellation_only_removes_the_conflicting_pair() {
        let r = range(&[("10.0", true), ("14.0", false), ("14.0", true)]);
        // The 14.0 pair contradicts itself; 10.0 survives.
        assert_eq!(r.points(), &[VersionPoint::supported(v("10.0"))]);
    }

    #[test]
    fn redundant_point_does_not_shield_a_flip() {
        // 12.0 unsupported is redundant, so 12.0 supported flips against
        // the retained 10.0 point instead of cancelling.
        let r = range(&[("10.0", false), ("12.0", true), ("12.0", false)]);
        assert_eq!(
            r.points(),
            &[
                VersionPoint::unsupported(v("10.0")),
                VersionPoint::supported(v("12.0")),
            ]
        );
        assert!(!r.is_allow_list());
        assert_eq!(r.to_string(), "10 - 12");
    }

    #[test]
    fn alternating_timeline_ranges() {
        let r = range(&[("10.0", true), ("12.0", false), ("14.0", true)]);
        assert!(r.is_allow_list());
        assert_eq!(
            r.ranges(),
            vec![
                SupportSpan {
                    start_inclusive: Some(v("10.0")),
                    end_exclusive: Some(v("12.0")),
                },
                SupportSpan {
                    start_inclusive: Some(v("14.0")),
                    end_exclusive: None,
                },
            ]
        );
        assert_eq!(r.to_string(), "10 - 12, >= 14");
        assert!(r.is_supported(&v("11.5")));
        assert!(!r.is_supported(&v("12.0")));
        assert!(!r.is_supported(&v("13.9")));
        assert!(r.is_supported(&v("14.0")));
    }

    #[test]
    fn span_formatting() {
        let any = SupportSpan {
            start_inclusive: None,
            end_exclusive: None,
        };
        let below = SupportSpan {
            start_inclusive: None,
            end_exclusive: Some(v("6.0")),
        };
        assert_eq!(any.to_string(), "any");
        assert_eq!(below.to_string(), "< 6");
    }

    #[test]
    fn equality_is_by_retained_points() {
        let a = range(&[("10.0", true), ("11.0", true)]);
        let b = range(&[("10.0", true)]);
        let c = range(&[("10.0", false)]);
        assert_eq!(a, b);
        assert_ne!(b, c);

        use std::collections::HashSet;
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn rendering_is_idempotent() {
        let r = range(&[("10.0", true), ("12.0", false), ("14.0", true)]);
        let first = r.to_string();
        assert_eq!(r.to_string(), first);
        assert_eq!(r.len(), 3);
        assert_eq!(r.to_string(), first);
        assert_eq!(r.len(), 3);
    }

    fn arb_points() -> impl Strategy<Value = Vec<(Version, bool)>> {
        proptest::collection::vec(
            ((0u32..6).prop_map(|m| Version::new(m, 0, 0, 0)), any::<bool>()),
            0..12,
        )
    }

    proptest! {
        #[test]
        fn retained_points_alternate_and_ascend(points in arb_points()) {
            let r: PlatformSupportRange = points.into_iter().collect();
            for pair in r.points().windows(2) {
                prop_assert_ne!(pair[0].is_supported, pair[1].is_supported);
                prop_assert!(pair[0].version <= pair[1].version);
            }
        }

        #[test]
        fn construction_is_order_independent(points in arb_points()) {
            let forward: PlatformSupportRange = points.iter().copied().collect();
            let backward: PlatformSupportRange = points.iter().rev().copied().collect();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn rebuilding_from_retained_points_is_stable(points in arb_points()) {
            let r: PlatformSupportRange = points.into_iter().collect();
            let again = PlatformSupportRange::new(r.points().to_vec());
            prop_assert_eq!(again, r);
        }

        #[test]
        fn query_agrees_with_spans(points in arb_points(), query in 0u32..7) {
            let r: PlatformSupportRange = points.into_iter().collect();
            let q = Version::new(query, 0, 0, 0);
            let in_span = r.ranges().iter().any(|span| {
                span.start_inclusive.map_or(true, |s| s <= q)
                    && span.end_exclusive.map_or(true, |e| q < e)
            });
            // Spans list the head's state; outside them the opposite holds.
            let expected = if r.is_empty() {
                !r.is_allow_list()
            } else if in_span {
                r.is_allow_list()
            } else {
                !r.is_allow_list()
            };
            prop_assert_eq!(r.is_supported(&q), expected);
        }
    }
}
