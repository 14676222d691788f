#![no_std]

multiversx_sc::imports!();

pub mod errors;
pub mod quorum_dao_proxy;
pub mod types;

use errors::*;
use types::{
    Proposal, ProposalCall, ProposalOutcome, CALL_EXECUTED, CALL_FAILED, QUORUM_NOT_PRESENT,
    QUORUM_VOTED_AGAINST,
};

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait QuorumDao {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        chairman: ManagedAddress,
        governance_token: TokenIdentifier,
        min_quorum: BigUint,
        debating_period: u64,
    ) {
        require!(
            governance_token.is_valid_esdt_identifier(),
            ERR_INVALID_TOKEN_ID
        );

        self.chairman().set(&chairman);
        self.governance_token().set(&governance_token);
        self.min_quorum().set(&min_quorum);
        self.debating_period().set(debating_period);
        self.proposal_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: deposit
    // Governance tokens attached to the call become voting weight.
    // ========================================================

    #[endpoint(deposit)]
    #[payable("*")]
    fn deposit(&self) {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().single_esdt();

        require!(payment.amount > 0u64, ERR_INVALID_AMOUNT);
        require!(
            payment.token_identifier == self.governance_token().get(),
            ERR_INVALID_PAYMENT_TOKEN
        );

        self.deposits(&caller).update(|d| *d += &payment.amount);

        self.deposit_event(&caller, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: withdraw
    // Pays back the whole deposit. Blocked while any proposal
    // the caller voted on is still unfinished.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            self.open_vote_count(&caller).get() == 0,
            ERR_LOCKED_BY_OPEN_VOTE
        );

        let amount = self.deposits(&caller).take();
        let payment = EsdtTokenPayment::new(self.governance_token().get(), 0, amount);
        self.send().direct_non_zero_esdt_payment(&caller, &payment);

        self.withdraw_event(&caller, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: addProposal
    // Chairman only. The call is forwarded to `recipient` if the
    // proposal passes.
    // ========================================================

    #[endpoint(addProposal)]
    fn add_proposal(
        &self,
        recipient: ManagedAddress,
        description: ManagedBuffer,
        endpoint: ManagedBuffer,
        arguments: MultiValueEncoded<ManagedBuffer>,
    ) -> u64 {
        self.require_chairman();

        let proposal_id = self.proposal_count().get() + 1u64;
        let created_at = self.blockchain().get_block_timestamp();

        let proposal = Proposal {
            id: proposal_id,
            description,
            call: ProposalCall {
                endpoint,
                arguments: arguments.to_vec(),
            },
            recipient,
            created_at,
            open: true,
            votes_for: BigUint::zero(),
            votes_against: BigUint::zero(),
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);

        self.add_proposal_event(
            proposal_id,
            &proposal.recipient,
            &proposal.description,
            created_at,
            &proposal.call,
        );

        proposal_id
    }

    // ========================================================
    // ENDPOINT: vote
    // Weight is the caller's deposit at the moment of the vote.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, support: bool) {
        let caller = self.blockchain().get_caller();
        let mut proposal = self.require_proposal(proposal_id);

        let now = self.blockchain().get_block_timestamp();
        require!(
            proposal.open && now < proposal.debate_ends_at(self.debating_period().get()),
            ERR_VOTING_CLOSED
        );

        let weight = self.deposits(&caller).get();
        require!(weight > 0u64, ERR_NO_DEPOSIT);
        require!(
            !self.has_voted(proposal_id, &caller).get(),
            ERR_ALREADY_VOTED
        );

        if support {
            proposal.votes_for += &weight;
        } else {
            proposal.votes_against += &weight;
        }
        self.proposals(proposal_id).set(&proposal);

        self.has_voted(proposal_id, &caller).set(true);
        self.proposal_voters(proposal_id).push(&caller);
        self.open_vote_count(&caller).update(|count| *count += 1);

        self.vote_event(&caller, proposal_id, support, &weight);
    }

    // ========================================================
    // ENDPOINT: finishProposal
    // Anyone can call once the debate window is over. Closes the
    // proposal, releases voter locks, then either records a
    // failed outcome or dispatches the deferred call.
    // ========================================================

    #[endpoint(finishProposal)]
    fn finish_proposal(&self, proposal_id: u64) {
        let mut proposal = self.require_proposal(proposal_id);
        require!(proposal.open, ERR_ALREADY_FINISHED);

        let now = self.blockchain().get_block_timestamp();
        require!(
            now >= proposal.debate_ends_at(self.debating_period().get()),
            ERR_TOO_EARLY
        );

        proposal.open = false;
        self.proposals(proposal_id).set(&proposal);
        self.release_vote_locks(proposal_id);

        let total_votes = proposal.total_votes();
        if total_votes < self.min_quorum().get() {
            self.record_outcome(proposal_id, false, total_votes, QUORUM_NOT_PRESENT);
            return;
        }
        if proposal.votes_against >= proposal.votes_for {
            self.record_outcome(proposal_id, false, total_votes, QUORUM_VOTED_AGAINST);
            return;
        }

        self.dispatch_proposal_call(proposal_id, proposal.recipient, proposal.call, total_votes);
    }

    // ========================================================
    // ENDPOINTS: chairman configuration
    // Read at vote/finish time, so changes apply to open proposals.
    // ========================================================

    #[endpoint(setMinQuorum)]
    fn set_min_quorum(&self, min_quorum: BigUint) {
        self.require_chairman();
        self.min_quorum().set(&min_quorum);
    }

    #[endpoint(setDebatingPeriod)]
    fn set_debating_period(&self, debating_period: u64) {
        self.require_chairman();
        self.debating_period().set(debating_period);
    }

    // ========================================================
    // INTERNAL: deferred call dispatch
    // The async call leaves with all remaining gas. Whatever the
    // recipient does, the result comes back to the callback and
    // never reverts the finishing transaction.
    // ========================================================

    fn dispatch_proposal_call(
        &self,
        proposal_id: u64,
        recipient: ManagedAddress,
        call: ProposalCall<Self::Api>,
        total_votes: BigUint,
    ) {
        let mut tx = self.tx().to(&recipient).raw_call(call.endpoint);
        for argument in call.arguments.iter() {
            tx = tx.argument(&*argument);
        }

        tx.callback(
            self.callbacks()
                .proposal_call_callback(proposal_id, total_votes),
        )
        .async_call_and_exit();
    }

    #[callback]
    fn proposal_call_callback(
        &self,
        proposal_id: u64,
        total_votes: BigUint,
        #[call_result] result: ManagedAsyncCallResult<MultiValueEncoded<ManagedBuffer>>,
    ) {
        match result {
            ManagedAsyncCallResult::Ok(_) => {
                self.record_outcome(proposal_id, true, total_votes, CALL_EXECUTED);
            }
            ManagedAsyncCallResult::Err(_) => {
                self.record_outcome(proposal_id, false, total_votes, CALL_FAILED);
            }
        }
    }

    // ========================================================
    // INTERNAL: helpers
    // ========================================================

    fn require_chairman(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.chairman().get(), ERR_NOT_CHAIRMAN);
    }

    fn require_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        let mapper = self.proposals(proposal_id);
        require!(!mapper.is_empty(), ERR_NO_SUCH_PROPOSAL);
        mapper.get()
    }

    /// Every voter of the proposal gets one lock released.
    /// Walks the whole voter list in a single call, so the gas cost of
    /// finishing grows with the number of voters.
    fn release_vote_locks(&self, proposal_id: u64) {
        for voter in self.proposal_voters(proposal_id).iter() {
            self.open_vote_count(&voter).update(|count| *count -= 1);
        }
    }

    fn record_outcome(&self, proposal_id: u64, success: bool, total_votes: BigUint, reason: &str) {
        let outcome = ProposalOutcome {
            success,
            total_votes,
            reason: ManagedBuffer::from(reason),
        };

        self.proposal_outcome(proposal_id).set(&outcome);
        self.proposal_finished_event(proposal_id, success, &outcome.total_votes, &outcome.reason);
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal(proposal_id)
    }

    #[view(getProposals)]
    fn get_proposals(&self, from: u64, count: u64) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        if count == 0 || total == 0 {
            return result;
        }
        let start = if from == 0 { 1u64 } else { from };
        if start > total {
            return result;
        }
        let end = core::cmp::min(start.saturating_add(count - 1), total);

        for id in start..=end {
            result.push(self.proposals(id).get());
        }
        result
    }

    #[view(getOpenProposals)]
    fn get_open_proposals(&self) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();

        for id in 1..=total {
            let proposal = self.proposals(id).get();
            if proposal.open {
                result.push(proposal);
            }
        }
        result
    }

    #[view(getProposalOutcome)]
    fn get_proposal_outcome(&self, proposal_id: u64) -> ProposalOutcome<Self::Api> {
        let mapper = self.proposal_outcome(proposal_id);
        require!(!mapper.is_empty(), ERR_NOT_FINISHED);
        mapper.get()
    }

    #[view(getProposalVoters)]
    fn get_proposal_voters(&self, proposal_id: u64) -> MultiValueEncoded<ManagedAddress> {
        let mut result = MultiValueEncoded::new();
        for voter in self.proposal_voters(proposal_id).iter() {
            result.push(voter);
        }
        result
    }

    #[view(getGovernanceConfig)]
    fn get_governance_config(
        &self,
    ) -> MultiValue4<ManagedAddress, TokenIdentifier, BigUint, u64> {
        let chairman = self.chairman().get();
        let token = self.governance_token().get();
        let min_quorum = self.min_quorum().get();
        let debating_period = self.debating_period().get();
        (chairman, token, min_quorum, debating_period).into()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("deposit")]
    fn deposit_event(&self, #[indexed] holder: &ManagedAddress, amount: &BigUint);

    #[event("withdraw")]
    fn withdraw_event(&self, #[indexed] holder: &ManagedAddress, amount: &BigUint);

    #[event("addProposal")]
    fn add_proposal_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] recipient: &ManagedAddress,
        #[indexed] description: &ManagedBuffer,
        #[indexed] created_at: u64,
        call: &ProposalCall<Self::Api>,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] voter: &ManagedAddress,
        #[indexed] proposal_id: u64,
        #[indexed] support: bool,
        weight: &BigUint,
    );

    #[event("proposalFinished")]
    fn proposal_finished_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] success: bool,
        #[indexed] total_votes: &BigUint,
        reason: &ManagedBuffer,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration ──

    #[view(getChairman)]
    #[storage_mapper("chairman")]
    fn chairman(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getGovernanceToken)]
    #[storage_mapper("governanceToken")]
    fn governance_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[view(getMinQuorum)]
    #[storage_mapper("minQuorum")]
    fn min_quorum(&self) -> SingleValueMapper<BigUint>;

    #[view(getDebatingPeriod)]
    #[storage_mapper("debatingPeriod")]
    fn debating_period(&self) -> SingleValueMapper<u64>;

    // ── Deposits and locks ──

    #[view(getDeposit)]
    #[storage_mapper("deposits")]
    fn deposits(&self, holder: &ManagedAddress) -> SingleValueMapper<BigUint>;

    /// Unfinished proposals the holder voted on. Withdraw needs zero.
    #[view(getOpenVoteCount)]
    #[storage_mapper("openVoteCount")]
    fn open_vote_count(&self, holder: &ManagedAddress) -> SingleValueMapper<u64>;

    // ── Proposals ──

    #[view(getProposalCount)]
    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("proposalOutcome")]
    fn proposal_outcome(&self, id: u64) -> SingleValueMapper<ProposalOutcome<Self::Api>>;

    #[view(hasVoted)]
    #[storage_mapper("hasVoted")]
    fn has_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> SingleValueMapper<bool>;

    #[storage_mapper("proposalVoters")]
    fn proposal_voters(&self, proposal_id: u64) -> VecMapper<ManagedAddress>;
}
