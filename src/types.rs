multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Outcome reasons — recorded when a proposal is finished
// ============================================================

pub const QUORUM_NOT_PRESENT: &str = "Quorum is not present";
pub const QUORUM_VOTED_AGAINST: &str = "Quorum voted against";
pub const CALL_FAILED: &str = "Call to contract failed";
pub const CALL_EXECUTED: &str = "Quorum voted pro and call data executed";

// ============================================================
// Proposal Call — the deferred operation
// ============================================================

/// Endpoint name and raw arguments forwarded to the proposal recipient
/// once the vote passes. Stored and sent as-is, never decoded.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct ProposalCall<M: ManagedTypeApi> {
    pub endpoint: ManagedBuffer<M>,
    pub arguments: ManagedVec<M, ManagedBuffer<M>>,
}

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    pub description: ManagedBuffer<M>,
    pub call: ProposalCall<M>,
    pub recipient: ManagedAddress<M>,
    pub created_at: u64,
    /// True until the proposal is finished. Never set back.
    pub open: bool,
    pub votes_for: BigUint<M>,
    pub votes_against: BigUint<M>,
}

impl<M: ManagedTypeApi> Proposal<M> {
    pub fn total_votes(&self) -> BigUint<M> {
        &self.votes_for + &self.votes_against
    }

    /// End of the debate window under the given debating period.
    pub fn debate_ends_at(&self, debating_period: u64) -> u64 {
        self.created_at.saturating_add(debating_period)
    }
}

// ============================================================
// Proposal Outcome — fixed once the proposal is finished
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, PartialEq, Debug)]
pub struct ProposalOutcome<M: ManagedTypeApi> {
    pub success: bool,
    pub total_votes: BigUint<M>,
    pub reason: ManagedBuffer<M>,
}
