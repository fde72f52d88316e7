//! Campaign fixture: the default whitelist, caps and reward split shared by every scenario.

use super::constants::*;
use crowdsale::testutils::{BlockableCurrency, BlockableCurrencyClient};
use crowdsale::{CrowdsaleContract, CrowdsaleContractClient, Phase};
use crowdsale_token::{CrowdsaleToken, CrowdsaleTokenClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, vec, Address, Env, String,
};

/// Caps and token economics derived from raise targets expressed in whole units.
#[derive(Clone, Copy, Debug)]
pub struct CapsData {
    pub min_cap: i128,
    pub max_cap: i128,
    pub max_token_supply: i128,
    pub tokens_to_sell: i128,
    pub token_rate: i128,
}

impl CapsData {
    /// A quarter of the supply is sold; the rest covers the partner and core-team rewards.
    pub fn from_units(min_units: i128, max_units: i128, max_supply_units: i128) -> Self {
        let max_token_supply = max_supply_units * UNIT;
        let max_cap = max_units * UNIT;
        let tokens_to_sell = max_token_supply / 4;
        Self {
            min_cap: min_units * UNIT,
            max_cap,
            max_token_supply,
            tokens_to_sell,
            token_rate: tokens_to_sell / max_cap,
        }
    }
}

/// Which raised currency the campaign runs on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CurrencyKind {
    StellarAsset,
    Blockable,
}

enum Funder {
    StellarAsset(token::StellarAssetClient<'static>),
    Blockable(BlockableCurrencyClient<'static>),
}

pub struct CampaignFixture {
    pub env: Env,
    pub crowdsale: CrowdsaleContractClient<'static>,
    pub token: CrowdsaleTokenClient<'static>,
    pub currency: token::Client<'static>,
    pub caps: CapsData,
    pub partner_reward: i128,

    pub owner: Address,
    pub multisig: Address,
    pub partner: Address,
    pub other: Address,
    pub pp_user1: Address,
    pub pp_user2: Address,
    pub community_user1: Address,
    pub community_user2: Address,
    pub public_user1: Address,
    pub public_user2: Address,

    pub starting_balances: std::vec::Vec<i128>,
    funder: Funder,
}

impl CampaignFixture {
    /// Deploys and configures the campaign with the default whitelist: pre-sale allowances
    /// (10, 5, 0, 0) and community allowances (15, 0, 15, 15), caps of 10 and 20 units.
    pub fn setup_defaults(kind: CurrencyKind) -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let owner = Address::generate(&env);
        let multisig = Address::generate(&env);
        let partner = Address::generate(&env);

        let (currency_id, funder) = match kind {
            CurrencyKind::StellarAsset => {
                let sac = env.register_stellar_asset_contract_v2(Address::generate(&env));
                let id = sac.address();
                (id.clone(), Funder::StellarAsset(token::StellarAssetClient::new(&env, &id)))
            }
            CurrencyKind::Blockable => {
                let id = env.register_contract(None, BlockableCurrency);
                (id.clone(), Funder::Blockable(BlockableCurrencyClient::new(&env, &id)))
            }
        };

        let crowdsale_id = env.register_contract(None, CrowdsaleContract);
        let crowdsale = CrowdsaleContractClient::new(&env, &crowdsale_id);
        let token_id = env.register_contract(None, CrowdsaleToken);
        let token = CrowdsaleTokenClient::new(&env, &token_id);
        token.initialize(
            &owner,
            &crowdsale_id,
            &7u32,
            &String::from_str(&env, "Crowdsale Token"),
            &String::from_str(&env, "CRWD"),
            &0u64,
        );

        let caps = CapsData::from_units(10, 20, 100_000_000);
        let partner_reward = caps.max_token_supply / 50;

        let mut fixture = Self {
            crowdsale,
            token,
            currency: token::Client::new(&env, &currency_id),
            caps,
            partner_reward,
            owner,
            multisig,
            partner,
            other: Address::generate(&env),
            pp_user1: Address::generate(&env),
            pp_user2: Address::generate(&env),
            community_user1: Address::generate(&env),
            community_user2: Address::generate(&env),
            public_user1: Address::generate(&env),
            public_user2: Address::generate(&env),
            starting_balances: std::vec::Vec::new(),
            funder,
            env,
        };

        for user in fixture.users() {
            fixture.fund(&user, INITIAL_BALANCE);
        }
        fixture.starting_balances = fixture.balances();

        let f = &fixture;
        f.crowdsale.initialize(&f.owner, &currency_id);
        f.crowdsale.set_token(&f.owner, &token_id);
        f.crowdsale.edit_contributors(
            &f.owner,
            &vec![
                &f.env,
                f.pp_user1.clone(),
                f.pp_user2.clone(),
                f.community_user1.clone(),
                f.community_user2.clone(),
            ],
            &vec![&f.env, 10 * UNIT, 5 * UNIT, 0, 0],
            &vec![&f.env, 15 * UNIT, 0, 15 * UNIT, 15 * UNIT],
        );
        f.crowdsale.set_caps(&f.owner, &caps.min_cap, &caps.max_cap);
        f.crowdsale.set_funds_recipient(&f.owner, &f.multisig);
        f.crowdsale.set_max_token_supply(&f.owner, &caps.max_token_supply);
        f.crowdsale.set_token_rate(&f.owner, &caps.token_rate);
        f.crowdsale.set_partner_reward(&f.owner, &partner_reward);
        f.crowdsale.set_partner(&f.owner, &f.partner);

        fixture
    }

    /// Contributors and payees whose balances the scenarios track.
    pub fn users(&self) -> std::vec::Vec<Address> {
        std::vec![
            self.pp_user1.clone(),
            self.pp_user2.clone(),
            self.community_user1.clone(),
            self.community_user2.clone(),
            self.public_user1.clone(),
            self.public_user2.clone(),
            self.other.clone(),
            self.multisig.clone(),
        ]
    }

    pub fn balances(&self) -> std::vec::Vec<i128> {
        self.users().iter().map(|u| self.currency.balance(u)).collect()
    }

    pub fn fund(&self, who: &Address, amount: i128) {
        match &self.funder {
            Funder::StellarAsset(admin) => admin.mint(who, &amount),
            Funder::Blockable(currency) => currency.mint(who, &amount),
        }
    }

    /// Makes every later payment to `who` fail. Only available on the blockable currency.
    pub fn block(&self, who: &Address) {
        match &self.funder {
            Funder::Blockable(currency) => currency.block(who),
            Funder::StellarAsset(_) => panic!("stellar asset fixture cannot block recipients"),
        }
    }

    pub fn set_schedule(&self, presale: u64, presale_unlimited: u64, public: u64, end: u64) {
        self.crowdsale
            .set_schedule(&self.owner, &presale, &presale_unlimited, &public, &end);
    }

    pub fn wait_until(&self, timestamp: u64) {
        self.env.ledger().with_mut(|l| l.timestamp = timestamp);
    }

    pub fn contribute(&self, who: &Address, amount: i128) -> i128 {
        self.crowdsale.contribute(who, &amount).accepted
    }

    pub fn contract_balance(&self) -> i128 {
        self.currency.balance(&self.crowdsale.address)
    }

    pub fn phase(&self) -> Phase {
        self.crowdsale.get_phase()
    }
}
