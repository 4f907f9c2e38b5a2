//! Final score of a game run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::player::{Player, PlayerId};

/// Points per player. Exactly one entry per player passed to setup.
///
/// Uses BTreeMap so iteration follows seat order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    points: BTreeMap<PlayerId, u32>,
}

impl Score {
    /// Create an empty score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every player at zero points.
    pub fn for_players(players: &[Player]) -> Self {
        players.iter().map(|p| (p.id(), 0)).collect()
    }

    /// Give a player one point.
    pub fn add_point(&mut self, id: PlayerId) {
        *self.points.entry(id).or_insert(0) += 1;
    }

    /// Points of a player, if present.
    pub fn get(&self, id: PlayerId) -> Option<u32> {
        self.points.get(&id).copied()
    }

    /// Number of players scored.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no player is scored.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest score, `None` when empty.
    pub fn max_points(&self) -> Option<u32> {
        self.points.values().copied().max()
    }

    /// Iterate `(player, points)` in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.points.iter().map(|(id, pts)| (*id, *pts))
    }
}

impl FromIterator<(PlayerId, u32)> for Score {
    fn from_iter<I: IntoIterator<Item = (PlayerId, u32)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Players sharing the maximum score, in seat order.
///
/// Ties produce several winners; an empty score produces none.
pub fn find_winners(score: &Score) -> Vec<PlayerId> {
    let Some(max) = score.max_points() else {
        return Vec::new();
    };
    score
        .iter()
        .filter(|(_, pts)| *pts == max)
        .map(|(id, _)| id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn score(entries: &[(u8, u32)]) -> Score {
        entries.iter().map(|(seat, pts)| (PlayerId::new(*seat), *pts)).collect()
    }

    #[test]
    fn test_single_winner() {
        let s = score(&[(1, 0), (2, 3), (3, 1)]);
        assert_eq!(find_winners(&s), vec![PlayerId::new(2)]);
    }

    #[test]
    fn test_tie_produces_multiple_winners() {
        let s = score(&[(1, 2), (2, 1), (3, 2), (4, 0)]);
        assert_eq!(find_winners(&s), vec![PlayerId::new(1), PlayerId::new(3)]);
    }

    #[test]
    fn test_all_equal_all_win() {
        let s = score(&[(1, 0), (2, 0), (3, 0)]);
        assert_eq!(find_winners(&s).len(), 3);
    }

    #[test]
    fn test_empty_score_no_winner() {
        assert!(find_winners(&Score::new()).is_empty());
        assert_eq!(Score::new().max_points(), None);
    }

    #[test]
    fn test_add_point() {
        let mut s = score(&[(1, 0)]);
        s.add_point(PlayerId::new(1));
        s.add_point(PlayerId::new(1));
        assert_eq!(s.get(PlayerId::new(1)), Some(2));
        assert_eq!(s.get(PlayerId::new(2)), None);
        assert_eq!(s.len(), 1);
    }

    proptest! {
        #[test]
        fn winners_are_exactly_the_max_scorers(points in proptest::collection::vec(0u32..5, 0..=4)) {
            let s: Score = points
                .iter()
                .enumerate()
                .map(|(i, pts)| (PlayerId::new(i as u8 + 1), *pts))
                .collect();
            let winners = find_winners(&s);

            match points.iter().max() {
                None => prop_assert!(winners.is_empty()),
                Some(max) => {
                    for (id, pts) in s.iter() {
                        prop_assert_eq!(winners.contains(&id), pts == *max);
                    }
                    if points.iter().all(|p| p == max) {
                        prop_assert_eq!(winners.len(), points.len());
                    }
                }
            }
        }
    }
}
