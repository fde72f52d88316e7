use soroban_sdk::{contracttype, Address, Env};

/// Campaign lifecycle. Discriminants are ordered so phases compare by progress.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Phase {
    Pending = 0,
    PreSaleWhitelisted = 1,
    PreSaleOpenWhitelisted = 2,
    PublicSale = 3,
    Ended = 4,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Schedule {
    pub presale_start: u64,
    pub presale_unlimited_start: u64,
    pub public_start: u64,
    pub end: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignConfig {
    pub currency: Address,               // raised currency, fixed at initialization
    pub token: Option<Address>,          // issued token, minted through its controller hook
    pub funds_recipient: Option<Address>,
    pub partner: Option<Address>,
    pub min_cap: i128,
    pub max_cap: i128,
    pub max_token_supply: i128,
    pub partner_reward: i128,
    pub token_rate: i128, // issued-token units per accepted currency unit
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignState {
    pub phase: Phase,
    pub raised_total: i128,
    pub min_reached: bool,
    pub refund_cursor: u32,
    pub batch_refund_count: u32,
    pub refund_pass_complete: bool,
    pub recovered: bool,
    pub core_team_claimed: bool,
    pub partner_claimed: bool,
}

impl Default for CampaignState {
    fn default() -> Self {
        CampaignState {
            phase: Phase::Pending,
            raised_total: 0,
            min_reached: false,
            refund_cursor: 0,
            batch_refund_count: 0,
            refund_pass_complete: false,
            recovered: false,
            core_team_claimed: false,
            partner_claimed: false,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct WhitelistEntry {
    pub tier_a: i128,
    pub tier_b: i128,
}

impl WhitelistEntry {
    pub fn total(&self) -> i128 {
        self.tier_a.saturating_add(self.tier_b)
    }

    pub fn is_member(&self) -> bool {
        self.tier_a > 0 || self.tier_b > 0
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Contribution {
    pub amount: i128,
    pub refunded: bool,
    pub refund_failed: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct ContributionReceipt {
    pub accepted: i128,
    pub returned: i128,
    pub phase: Phase,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct BatchRefundReport {
    pub processed: u32,
    pub refunded: u32,
    pub failed: u32,
    pub cursor: u32,
}

#[contracttype]
pub enum DataKey {
    Config,
    Schedule,
    State,
    WhitelistCount,
    ContributorCount,
    Allowance(Address),
    Contribution(Address),
    Contributor(u32),
}

pub fn get_ledger_timestamp(env: &Env) -> u64 {
    env.ledger().timestamp()
}
