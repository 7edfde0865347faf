pub mod admin;
pub mod ledger;
pub mod registry;
pub mod tally;

use admin::AdminGate;
use ledger::VoterLedger;
use registry::CandidateRegistry;
use serde::{Deserialize, Serialize};
use tally::Tally;

pub use tally::Outcome;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElectionError {
    #[error("caller is not the election administrator")]
    NotAuthorized,
    #[error("candidate already registered: {0}")]
    DuplicateCandidate(String),
    #[error("candidate name must be non-empty")]
    InvalidCandidateName,
    #[error("candidate registration is only open during round 1")]
    RegistrationClosed,
    #[error("no such candidate: {0}")]
    UnknownCandidate(String),
    #[error("identity has already voted in this round")]
    AlreadyVoted,
    #[error("voting is closed for this identity")]
    VotingClosed,
    #[error("voter cap reached")]
    VoterCapReached,
    #[error("voter cap {requested} is below the {current} voters already recorded")]
    InvalidCap { requested: u32, current: u32 },
}

pub type ElectionResult<T> = std::result::Result<T, ElectionError>;

/// Round status snapshot for the UI/CLI collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingStatus {
    pub current_round: u32,
    pub total_votes: u32,
    pub max_voters: u32,
    pub remaining_votes: u32,
    pub voting_active: bool,
    pub is_complete: bool,
}

/// Per-candidate counts for the current round, index-aligned with the
/// candidate list so renderers can keep stable colors/positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    pub candidates: Vec<String>,
    pub counts: Vec<u64>,
}

/// The election state machine.
///
/// Owns the round lifecycle and the three per-round components: the
/// candidate registry, the voter ledger, and the tally. Mutating
/// commands take `&mut self` plus the caller identity; the exclusive
/// borrow is what makes each check-then-apply sequence atomic. When a
/// round closes with two or more candidates tied at the top count, the
/// registry is reseeded with the tied set, the ledger and tally are
/// reset, and the round number advances. A single top candidate at
/// closure ends the election until an explicit restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Election {
    gate: AdminGate,
    round: u32,
    active: bool,
    complete: bool,
    registry: CandidateRegistry,
    ledger: VoterLedger,
    tally: Tally,
    winners: Vec<String>,
}

impl Election {
    pub fn new(admin: &str, max_voters: u32) -> Self {
        Self {
            gate: AdminGate::new(admin),
            round: 1,
            active: true,
            complete: false,
            registry: CandidateRegistry::default(),
            ledger: VoterLedger::new(max_voters),
            tally: Tally::default(),
            winners: Vec::new(),
        }
    }

    /// Register a candidate for round 1. Admin only; closed once the
    /// first round has ended or a runoff has started.
    pub fn add_candidate(&mut self, caller: &str, name: &str) -> ElectionResult<()> {
        self.gate.require_admin(caller)?;
        if self.round != 1 || !self.active || self.complete {
            return Err(ElectionError::RegistrationClosed);
        }
        self.registry.register(name)?;
        self.tally.push_candidate();
        Ok(())
    }

    /// Cast the caller's ballot for `candidate`, then check whether the
    /// round is exhausted and resolve its outcome if so. All admission
    /// checks run before any state changes, so a rejected ballot leaves
    /// the election untouched.
    pub fn cast_vote(&mut self, caller: &str, candidate: &str) -> ElectionResult<()> {
        if !self.active || self.complete {
            return Err(ElectionError::VotingClosed);
        }
        let slot = self
            .registry
            .position(candidate)
            .ok_or_else(|| ElectionError::UnknownCandidate(candidate.to_string()))?;
        self.ledger.record_vote(caller)?;
        self.tally.record(slot);
        self.close_round_if_exhausted();
        Ok(())
    }

    /// Raise (or set) the voter cap. Admin only; cannot go below the
    /// number of voters already recorded this round.
    pub fn set_max_voters(&mut self, caller: &str, max_voters: u32) -> ElectionResult<()> {
        self.gate.require_admin(caller)?;
        self.ledger.set_max_voters(max_voters)
    }

    /// Close the current round without waiting for remaining ballots.
    pub fn force_close_round(&mut self, caller: &str) -> ElectionResult<()> {
        self.gate.require_admin(caller)?;
        if !self.active || self.complete {
            return Err(ElectionError::VotingClosed);
        }
        self.resolve_outcome();
        Ok(())
    }

    /// Clear per-round voting flags. With an empty list every identity
    /// is eligible again (bounded by the cap); with an explicit list,
    /// eligibility is restricted to the listed identities. Normally
    /// invoked internally by the runoff transition.
    pub fn reset_voters_for_new_round(
        &mut self,
        caller: &str,
        eligible: Option<Vec<String>>,
    ) -> ElectionResult<()> {
        self.gate.require_admin(caller)?;
        self.ledger.reset_for_new_round(eligible);
        Ok(())
    }

    /// Return the whole election to its initial state: round 1, no
    /// candidates, no votes. The admin identity and voter cap survive.
    /// This is the only way out of a decided election.
    pub fn restart(&mut self, caller: &str) -> ElectionResult<()> {
        self.gate.require_admin(caller)?;
        self.round = 1;
        self.active = true;
        self.complete = false;
        self.registry.clear();
        self.tally.clear();
        self.ledger.reset_for_new_round(None);
        self.winners.clear();
        Ok(())
    }

    fn close_round_if_exhausted(&mut self) {
        if self.active && !self.complete && self.ledger.round_exhausted() {
            self.resolve_outcome();
        }
    }

    /// Resolve a closed round. A single top candidate is terminal; a
    /// tied set reseeds the registry and opens the next round with the
    /// same electorate. Registry, tally, ledger, and round counter all
    /// change inside this one call, so no reader can observe a round
    /// number that does not match its candidate set.
    fn resolve_outcome(&mut self) {
        match self.tally.outcome(self.registry.names(), true) {
            Outcome::Decided(winner) => {
                self.active = false;
                self.complete = true;
                self.winners = vec![winner];
            }
            Outcome::Tied(tied) => {
                self.round += 1;
                self.registry.replace_with(&tied);
                self.tally.reset(tied.len());
                self.ledger.reset_for_new_round(None);
                self.active = true;
                self.complete = false;
                self.winners = tied;
            }
            Outcome::InProgress => {}
        }
    }

    pub fn status(&self) -> VotingStatus {
        VotingStatus {
            current_round: self.round,
            total_votes: self.ledger.total_votes(),
            max_voters: self.ledger.max_voters(),
            remaining_votes: self.ledger.remaining_votes(),
            voting_active: self.active,
            is_complete: self.complete,
        }
    }

    pub fn results(&self) -> ElectionResults {
        ElectionResults {
            candidates: self.registry.names().to_vec(),
            counts: self.tally.counts().to_vec(),
        }
    }

    pub fn candidates(&self) -> &[String] {
        self.registry.names()
    }

    /// Outcome snapshot of the most recently closed round: one name
    /// once decided, the tied set while a runoff is pending or open,
    /// empty before any round has closed.
    pub fn winners(&self) -> &[String] {
        &self.winners
    }

    /// Identities that have voted in the current round, in ballot order.
    pub fn voters(&self) -> &[String] {
        self.ledger.voters()
    }

    pub fn has_voted(&self, identity: &str) -> bool {
        self.ledger.has_voted(identity)
    }

    pub fn can_vote(&self, identity: &str) -> bool {
        self.active && !self.complete && self.ledger.can_vote(identity)
    }

    pub fn is_admin(&self, identity: &str) -> bool {
        self.gate.is_admin(identity)
    }

    pub fn admin(&self) -> &str {
        self.gate.admin()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
