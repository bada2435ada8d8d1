use crate::traits::entry_ledger::BaseEntryLedger;
use crate::traits::error::RaffleError;
use crate::traits::error::RaffleError::*;
use crate::traits::randomness_bridge::{BaseRandomnessBridge, PendingRequest};
use crate::traits::timing_gate::is_due;
use crate::traits::{AccountId, Balance, RequestId, Timestamp};
use ink::prelude::collections::BTreeMap;
use ink::prelude::vec::Vec;

/// max number of players by round
/// the players are stored in the same cell as the round, keep it under the cell size
pub const MAX_PLAYERS: usize = 400;

#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub enum RaffleState {
    #[default]
    Open,
    Calculating,
}

/// One open-to-payout cycle
#[derive(Debug, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Round {
    pub(crate) round_id: u32,
    pub(crate) state: RaffleState,
    /// insertion order is the entry order
    pub(crate) players: Vec<AccountId>,
    pub(crate) balance: Balance,
    pub(crate) entrance_fee: Balance,
    pub(crate) last_timestamp: Timestamp,
    pub(crate) interval: Timestamp,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct WinnerRecord {
    pub address: AccountId,
    pub payout: Balance,
    pub round_id: u32,
}

#[derive(Debug, Clone, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct RaffleData {
    pub(crate) round: Round,
    pub(crate) pending_requests: BTreeMap<RequestId, PendingRequest>,
    pub(crate) recent_winner: Option<WinnerRecord>,
}

impl RaffleData {
    pub fn new(entrance_fee: Balance, interval: Timestamp, now: Timestamp) -> Self {
        RaffleData {
            round: Round {
                round_id: 1,
                state: RaffleState::Open,
                players: Vec::new(),
                balance: 0,
                entrance_fee,
                last_timestamp: now,
                interval,
            },
            pending_requests: BTreeMap::new(),
            recent_winner: None,
        }
    }
}

impl Default for RaffleData {
    fn default() -> Self {
        RaffleData::new(0, 0, 0)
    }
}

pub trait RaffleStorage {
    fn get_storage(&self) -> &RaffleData;
    fn get_mut_storage(&mut self) -> &mut RaffleData;
}

/// Lifecycle of the raffle: Open -> Calculating on upkeep, Calculating -> Open on fulfillment
pub trait BaseRaffle: RaffleStorage + BaseEntryLedger + BaseRandomnessBridge {
    /// Return true if the round can be closed: open, with players and funds, and the interval elapsed.
    /// Read only, it can be simulated without committing anything.
    fn inner_check_upkeep_needed(&self, now: Timestamp) -> bool {
        let round = &RaffleStorage::get_storage(self).round;
        round.state == RaffleState::Open
            && !round.players.is_empty()
            && round.balance > 0
            && is_due(now, round.last_timestamp, round.interval)
    }

    /// Close the round and request the randomness used to pick the winner
    fn inner_perform_upkeep(&mut self, now: Timestamp) -> Result<RequestId, RaffleError> {
        if !self.inner_check_upkeep_needed(now) {
            let round = &RaffleStorage::get_storage(self).round;
            return Err(UpkeepNotNeeded {
                balance: round.balance,
                nb_players: round.players.len() as u32,
                state: round.state,
            });
        }

        // nothing is written if the oracle fails
        let request_id = self.inner_request_randomness(now)?;

        let round = &mut RaffleStorage::get_mut_storage(self).round;
        round.state = RaffleState::Calculating;
        let round_id = round.round_id;

        ink::env::debug_println!("round {} closed, randomness requested {}", round_id, request_id);
        self.emit_randomness_requested(request_id, round_id);

        Ok(request_id)
    }

    fn inner_get_raffle_state(&self) -> RaffleState {
        RaffleStorage::get_storage(self).round.state
    }

    fn inner_get_entrance_fee(&self) -> Balance {
        RaffleStorage::get_storage(self).round.entrance_fee
    }

    fn inner_get_interval(&self) -> Timestamp {
        RaffleStorage::get_storage(self).round.interval
    }

    fn inner_get_last_timestamp(&self) -> Timestamp {
        RaffleStorage::get_storage(self).round.last_timestamp
    }

    fn inner_get_round_id(&self) -> u32 {
        RaffleStorage::get_storage(self).round.round_id
    }

    fn inner_get_recent_winner(&self) -> Option<WinnerRecord> {
        RaffleStorage::get_storage(self).recent_winner
    }
}
