use ownable::OwnershipError;
use soroban_sdk::{contracterror, symbol_short, Symbol};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // --- Lifecycle (1–2) ---
    AlreadyInitialized = 1,
    NotInitialized = 2,

    // --- Authorization (3–4) ---
    NotAuthorized = 3,
    NoPendingOwner = 4,

    // --- Phase gates (5–10) ---
    SaleNotActive = 5,
    ConfigLocked = 6,
    NotEnded = 7,
    MinCapNotReached = 8,
    MinCapReached = 9,
    RecoveryCompleted = 10,

    // --- Caps (11) ---
    CapExceeded = 11,

    // --- One-time actions (12–14) ---
    AlreadyRefunded = 12,
    AlreadyClaimed = 13,
    NoContribution = 14,

    // --- Settlement ordering (15–16) ---
    PrematureRecovery = 15,
    TransferFailed = 16,

    // --- Input validation (17–21) ---
    InvalidAmount = 17,
    InvalidCaps = 18,
    InvalidSchedule = 19,
    LengthMismatch = 20,
    Overflow = 21,

    // --- Missing configuration (22–24) ---
    TokenNotSet = 22,
    RecipientNotSet = 23,
    PartnerNotSet = 24,
}

impl From<OwnershipError> for Error {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotOwner | OwnershipError::NotPendingOwner => Error::NotAuthorized,
            OwnershipError::NoPendingOwner => Error::NoPendingOwner,
            OwnershipError::OwnerNotSet => Error::NotInitialized,
        }
    }
}

/// Taxonomy class of an error, for indexers and operator tooling.
pub fn kind(error: Error) -> Symbol {
    match error {
        Error::NotAuthorized | Error::NoPendingOwner => symbol_short!("AUTH"),
        Error::SaleNotActive
        | Error::ConfigLocked
        | Error::NotEnded
        | Error::MinCapNotReached
        | Error::MinCapReached
        | Error::RecoveryCompleted => symbol_short!("PHASE"),
        Error::CapExceeded => symbol_short!("CAP"),
        Error::AlreadyRefunded | Error::AlreadyClaimed | Error::NoContribution => {
            symbol_short!("DOUBLE")
        }
        Error::PrematureRecovery => symbol_short!("EARLY"),
        Error::TransferFailed => symbol_short!("TRANSFER"),
        Error::InvalidAmount
        | Error::InvalidCaps
        | Error::InvalidSchedule
        | Error::LengthMismatch
        | Error::Overflow => symbol_short!("INPUT"),
        Error::AlreadyInitialized
        | Error::NotInitialized
        | Error::TokenNotSet
        | Error::RecipientNotSet
        | Error::PartnerNotSet => symbol_short!("CONFIG"),
    }
}
