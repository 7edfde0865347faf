use serde::{Deserialize, Serialize};

/// Result of a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one candidate held the top count at closure.
    Decided(String),
    /// Two or more candidates shared the top count; a runoff follows.
    Tied(Vec<String>),
    /// The round is still accepting ballots.
    InProgress,
}

/// Vote counts for the current round, index-aligned with the candidate
/// registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tally {
    counts: Vec<u64>,
}

impl Tally {
    pub fn push_candidate(&mut self) {
        self.counts.push(0);
    }

    /// Add one vote. `slot` is a registry position, so it is always in
    /// bounds while the two stay aligned.
    pub fn record(&mut self, slot: usize) {
        self.counts[slot] += 1;
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn reset(&mut self, candidates: usize) {
        self.counts = vec![0; candidates];
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Outcome of the round given the registry's names. Depends only on
    /// the final counts, never on ballot order. No numeric tie-break is
    /// applied: a shared top count is resolved by a runoff, and the
    /// tied names keep registry order for deterministic display.
    pub fn outcome(&self, names: &[String], closed: bool) -> Outcome {
        if !closed || names.is_empty() {
            return Outcome::InProgress;
        }
        let top = self.counts.iter().copied().max().unwrap_or(0);
        let mut winners: Vec<String> = names
            .iter()
            .zip(&self.counts)
            .filter(|(_, count)| **count == top)
            .map(|(name, _)| name.clone())
            .collect();
        if winners.len() == 1 {
            Outcome::Decided(winners.remove(0))
        } else {
            Outcome::Tied(winners)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn open_round_is_in_progress() {
        let mut tally = Tally::default();
        tally.push_candidate();
        tally.record(0);
        assert_eq!(tally.outcome(&names(&["alice"]), false), Outcome::InProgress);
    }

    #[test]
    fn single_leader_is_decided() {
        let mut tally = Tally::default();
        tally.push_candidate();
        tally.push_candidate();
        tally.record(0);
        tally.record(0);
        tally.record(1);
        assert_eq!(
            tally.outcome(&names(&["alice", "bob"]), true),
            Outcome::Decided("alice".to_string())
        );
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn shared_top_count_is_tied_in_registry_order() {
        let mut tally = Tally::default();
        tally.reset(3);
        tally.record(2);
        tally.record(0);
        assert_eq!(
            tally.outcome(&names(&["alice", "bob", "carol"]), true),
            Outcome::Tied(vec!["alice".to_string(), "carol".to_string()])
        );
    }

    #[test]
    fn zero_vote_closure_ties_the_whole_field() {
        let mut tally = Tally::default();
        tally.reset(2);
        assert_eq!(
            tally.outcome(&names(&["alice", "bob"]), true),
            Outcome::Tied(vec!["alice".to_string(), "bob".to_string()])
        );
    }
}
