//! Ranked leaderboard view.
//!
//! # Invariants
//! - Order is points descending; equal points keep insertion order.
//! - The order is recomputed on every `iter()` call and never cached.

use crate::model::member::Member;
use std::iter::Enumerate;
use std::vec::IntoIter;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Returns the medal glyph for 1-based ranks 1..=3.
pub fn rank_medal(rank: usize) -> Option<&'static str> {
    rank.checked_sub(1).and_then(|index| MEDALS.get(index).copied())
}

/// Restartable view of members sorted by points.
#[derive(Debug, Clone, Copy)]
pub struct RankedMembers<'a> {
    members: &'a [Member],
}

impl<'a> RankedMembers<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        Self { members }
    }

    /// Iterates ranked entries, sorting the current member slice afresh.
    pub fn iter(&self) -> RankedIter<'a> {
        let mut ordered = self.members.iter().collect::<Vec<_>>();
        // `sort_by` is stable, so ties keep insertion order.
        ordered.sort_by(|left, right| right.points.cmp(&left.points));
        RankedIter {
            inner: ordered.into_iter().enumerate(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &RankedMembers<'a> {
    type Item = RankedEntry<'a>;
    type IntoIter = RankedIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over [`RankedEntry`] values.
pub struct RankedIter<'a> {
    inner: Enumerate<IntoIter<&'a Member>>,
}

impl<'a> Iterator for RankedIter<'a> {
    type Item = RankedEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, member)| RankedEntry {
                rank: index + 1,
                member,
            })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedEntry<'a> {
    /// 1-based position.
    pub rank: usize,
    pub member: &'a Member,
}

impl RankedEntry<'_> {
    pub fn medal(&self) -> Option<&'static str> {
        rank_medal(self.rank)
    }

    /// Medal for the top three, the rank number otherwise.
    pub fn badge(&self) -> String {
        self.medal()
            .map(str::to_string)
            .unwrap_or_else(|| self.rank.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{rank_medal, RankedMembers};
    use crate::model::member::Member;

    fn member_with_points(name: &str, points: i64) -> Member {
        let mut member = Member::new(name).unwrap();
        member.points = points;
        member
    }

    #[test]
    fn medals_cover_top_three_only() {
        assert_eq!(rank_medal(0), None);
        assert_eq!(rank_medal(1), Some("🥇"));
        assert_eq!(rank_medal(3), Some("🥉"));
        assert_eq!(rank_medal(4), None);
    }

    #[test]
    fn view_is_restartable() {
        let members = vec![member_with_points("a", 1), member_with_points("b", 2)];
        let view = RankedMembers::new(&members);

        let first = view.iter().map(|entry| entry.member.name.clone()).collect::<Vec<_>>();
        let second = view.iter().map(|entry| entry.member.name.clone()).collect::<Vec<_>>();
        assert_eq!(first, vec!["b", "a"]);
        assert_eq!(first, second);
    }

    #[test]
    fn badge_falls_back_to_rank_number() {
        let members = (0..5)
            .map(|points| member_with_points("m", points))
            .collect::<Vec<_>>();
        let badges = RankedMembers::new(&members)
            .iter()
            .map(|entry| entry.badge())
            .collect::<Vec<_>>();
        assert_eq!(badges, vec!["🥇", "🥈", "🥉", "4", "5"]);
    }
}
