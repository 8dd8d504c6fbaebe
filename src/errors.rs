// Ledger
pub const ERR_INSUFFICIENT_BALANCE: &str = "Insufficient balance";
pub const ERR_INSUFFICIENT_APPROVAL: &str = "Insufficient approval";
pub const ERR_TRANSFER_PAUSED: &str = "Transfers paused";
pub const ERR_NOT_YET_DETERMINED: &str = "Not yet determined";
pub const ERR_CHECKPOINT_OUT_OF_RANGE: &str = "Checkpoint index out of range";
pub const ERR_ARRAY_LENGTH_MISMATCH: &str = "Array length mismatch";

// Signatures
pub const ERR_INVALID_NONCE: &str = "Invalid nonce";
pub const ERR_SIGNATURE_EXPIRED: &str = "Signature expired";
pub const ERR_INVALID_SIGNATURE: &str = "Invalid signature";

// Permissions
pub const ERR_NOT_AUTHORIZED: &str = "Not authorized";
pub const ERR_SYSTEM_ONLY: &str = "Only callable by the treasury itself";

// Configuration
pub const ERR_INVALID_PERCENT: &str = "Percent must not exceed 100";
pub const ERR_ZERO_VOTING_PERIOD: &str = "Voting period cannot be zero";

// Proposals
pub const ERR_PROPOSAL_NOT_FOUND: &str = "Proposal does not exist";
pub const ERR_PROPOSAL_EXPIRED: &str = "Proposal expired";
pub const ERR_GAS_BUDGET_ZERO: &str = "Gas budget cannot be zero";
pub const ERR_GAS_BUDGET_TOO_HIGH: &str = "Gas budget too high";
pub const ERR_DEPOSIT_REQUIRED: &str = "Deposit required";
pub const ERR_NOT_SUBMITTED: &str = "Not submitted";
pub const ERR_BELOW_SPONSOR_THRESHOLD: &str = "Below sponsor threshold";
pub const ERR_NOT_VOTING: &str = "Not voting";
pub const ERR_ALREADY_VOTED: &str = "Already voted";
pub const ERR_NOT_A_MEMBER: &str = "Not a member";
pub const ERR_NOT_CANCELLABLE: &str = "Not cancellable";
pub const ERR_NOT_READY: &str = "Not ready";
pub const ERR_PREVIOUS_NOT_PROCESSED: &str = "Previous proposal not processed";
pub const ERR_INCORRECT_CALLDATA: &str = "Incorrect calldata";
pub const ERR_NOT_ENOUGH_GAS: &str = "Not enough gas";

// Executor
pub const ERR_UNKNOWN_SELF_CALL: &str = "Unknown self-call endpoint";
pub const ERR_INVALID_ACTION_ARGUMENT: &str = "Invalid action argument";
pub const ERR_WRONG_ARGUMENT_COUNT: &str = "Wrong number of arguments";

// Ragequit
pub const ERR_UNORDERED_TOKENS: &str = "Unordered token list";
pub const ERR_NOTHING_TO_BURN: &str = "Nothing to burn";
pub const ERR_TOKEN_ID_TOO_LONG: &str = "Token identifier too long";

// Treasury
pub const ERR_NOTHING_TO_FUND: &str = "Nothing to fund";
