// Configuration
pub const ERR_INVALID_TOKEN_ID: &str = "Invalid governance token";
pub const ERR_NOT_CHAIRMAN: &str = "Not the chairman";

// Proposals
pub const ERR_NO_SUCH_PROPOSAL: &str = "No such proposal";
pub const ERR_ALREADY_FINISHED: &str = "Voting finished already";
pub const ERR_TOO_EARLY: &str = "Voting period not finished yet";
pub const ERR_NOT_FINISHED: &str = "Proposal not finished";

// Voting
pub const ERR_VOTING_CLOSED: &str = "Voting period finished";
pub const ERR_NO_DEPOSIT: &str = "No deposit for vote";
pub const ERR_ALREADY_VOTED: &str = "Already voted on this proposal";

// Deposits
pub const ERR_INVALID_AMOUNT: &str = "Deposit amount must be positive";
pub const ERR_INVALID_PAYMENT_TOKEN: &str = "Invalid deposit token";
pub const ERR_LOCKED_BY_OPEN_VOTE: &str = "Voting not finished yet, can't withdraw";
