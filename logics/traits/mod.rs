use ink::env::{DefaultEnvironment, Environment};
use openbrush::contracts::access_control::RoleType;

pub type AccountId = <DefaultEnvironment as Environment>::AccountId;
pub type Balance = <DefaultEnvironment as Environment>::Balance;
pub type Timestamp = <DefaultEnvironment as Environment>::Timestamp;

/// correlation token of a randomness request
pub type RequestId = u128;
/// opaque value delivered by the oracle, only used modulo the number of players
pub type RandomWord = u128;

pub const RAFFLE_MANAGER_ROLE: RoleType = ink::selector_id!("RAFFLE_MANAGER");
pub const RANDOMNESS_PROVIDER_ROLE: RoleType = ink::selector_id!("RANDOMNESS_PROVIDER");

pub mod entry_ledger;
pub mod error;
pub mod events;
pub mod payout;
pub mod raffle;
pub mod randomness_bridge;
pub mod timing_gate;
pub mod vrf_coordinator;
