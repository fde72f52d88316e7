#![no_std]

mod caps;
mod contract;
pub mod errors;
mod events;
mod ledger;
mod phase;
mod settlement;
mod storage;
mod types;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;


pub use caps::{admit, max_contribution, remaining_global_room};
pub use contract::{CrowdsaleContract, CrowdsaleContractClient};
pub use errors::Error;
pub use phase::derive_phase;
pub use settlement::{core_team_reward, RewardTokenClient, RewardTokenInterface};
pub use types::*;
