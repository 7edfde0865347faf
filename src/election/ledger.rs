use super::{ElectionError, ElectionResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tracks who has voted in the current round and enforces the voter cap.
///
/// `voted` keeps ballot order so the electorate can be listed and
/// re-enfranchised between rounds. `eligible` is `None` for an open
/// electorate (anyone may vote until the cap is hit); an explicit set
/// restricts admission to the listed identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoterLedger {
    max_voters: u32,
    voted: Vec<String>,
    eligible: Option<BTreeSet<String>>,
}

impl VoterLedger {
    pub fn new(max_voters: u32) -> Self {
        Self {
            max_voters,
            voted: Vec::new(),
            eligible: None,
        }
    }

    pub fn has_voted(&self, identity: &str) -> bool {
        self.voted.iter().any(|v| v == identity)
    }

    pub fn can_vote(&self, identity: &str) -> bool {
        self.check(identity).is_ok()
    }

    fn check(&self, identity: &str) -> ElectionResult<()> {
        if let Some(eligible) = &self.eligible {
            if !eligible.contains(identity) {
                return Err(ElectionError::VotingClosed);
            }
        }
        if self.has_voted(identity) {
            return Err(ElectionError::AlreadyVoted);
        }
        if self.total_votes() >= self.max_voters {
            return Err(ElectionError::VoterCapReached);
        }
        Ok(())
    }

    /// Admit and record one ballot. Check and mark happen under the
    /// same `&mut` borrow, so two ballots from one identity can never
    /// both pass the admission check.
    pub fn record_vote(&mut self, identity: &str) -> ElectionResult<()> {
        self.check(identity)?;
        self.voted.push(identity.to_string());
        Ok(())
    }

    /// True once every ballot the round can accept has been cast: the
    /// cap is reached for an open electorate, or every listed identity
    /// has voted for a restricted one.
    pub fn round_exhausted(&self) -> bool {
        match &self.eligible {
            Some(eligible) => {
                !eligible.is_empty() && eligible.iter().all(|id| self.has_voted(id))
            }
            None => self.total_votes() >= self.max_voters,
        }
    }

    /// Clear per-round flags. `eligible = None` re-enfranchises
    /// everyone (the runoff default); an explicit list restricts the
    /// next round to those identities.
    pub fn reset_for_new_round(&mut self, eligible: Option<Vec<String>>) {
        self.voted.clear();
        self.eligible = eligible.map(|ids| ids.into_iter().collect());
    }

    pub fn set_max_voters(&mut self, max_voters: u32) -> ElectionResult<()> {
        let current = self.total_votes();
        if max_voters < current {
            return Err(ElectionError::InvalidCap {
                requested: max_voters,
                current,
            });
        }
        self.max_voters = max_voters;
        Ok(())
    }

    pub fn max_voters(&self) -> u32 {
        self.max_voters
    }

    pub fn total_votes(&self) -> u32 {
        self.voted.len() as u32
    }

    pub fn remaining_votes(&self) -> u32 {
        self.max_voters.saturating_sub(self.total_votes())
    }

    pub fn voters(&self) -> &[String] {
        &self.voted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ballot_per_identity() {
        let mut ledger = VoterLedger::new(5);
        ledger.record_vote("0xv1").unwrap();
        assert_eq!(
            ledger.record_vote("0xv1"),
            Err(ElectionError::AlreadyVoted)
        );
        assert_eq!(ledger.total_votes(), 1);
        assert_eq!(ledger.remaining_votes(), 4);
    }

    #[test]
    fn cap_blocks_extra_voters() {
        let mut ledger = VoterLedger::new(2);
        ledger.record_vote("0xv1").unwrap();
        ledger.record_vote("0xv2").unwrap();
        assert_eq!(
            ledger.record_vote("0xv3"),
            Err(ElectionError::VoterCapReached)
        );
        assert_eq!(ledger.total_votes(), 2);
        assert!(ledger.round_exhausted());
    }

    #[test]
    fn restricted_eligibility() {
        let mut ledger = VoterLedger::new(10);
        ledger.reset_for_new_round(Some(vec!["0xv1".to_string(), "0xv2".to_string()]));
        assert_eq!(
            ledger.record_vote("0xv9"),
            Err(ElectionError::VotingClosed)
        );
        ledger.record_vote("0xv1").unwrap();
        assert!(!ledger.round_exhausted());
        ledger.record_vote("0xv2").unwrap();
        assert!(ledger.round_exhausted());
    }

    #[test]
    fn reset_reenfranchises_everyone() {
        let mut ledger = VoterLedger::new(3);
        ledger.record_vote("0xv1").unwrap();
        ledger.reset_for_new_round(None);
        assert!(!ledger.has_voted("0xv1"));
        assert!(ledger.can_vote("0xv1"));
        assert_eq!(ledger.total_votes(), 0);
    }

    #[test]
    fn cap_cannot_drop_below_recorded_voters() {
        let mut ledger = VoterLedger::new(5);
        ledger.record_vote("0xv1").unwrap();
        ledger.record_vote("0xv2").unwrap();
        assert_eq!(
            ledger.set_max_voters(1),
            Err(ElectionError::InvalidCap {
                requested: 1,
                current: 2
            })
        );
        ledger.set_max_voters(2).unwrap();
        assert_eq!(ledger.remaining_votes(), 0);
    }
}
