#![allow(dead_code)]

use core::cell::RefCell;

use fortuna::traits::entry_ledger::BaseEntryLedger;
use fortuna::traits::error::RaffleError;
use fortuna::traits::events::RaffleEventBroadcaster;
use fortuna::traits::payout::{BasePayout, FundTransfer};
use fortuna::traits::raffle::{BaseRaffle, RaffleData, RaffleStorage};
use fortuna::traits::randomness_bridge::{BaseRandomnessBridge, RandomnessOracle};
use fortuna::traits::{AccountId, Balance, RequestId, Timestamp};

pub const ENTRANCE_FEE: Balance = 100;
pub const INTERVAL: Timestamp = 30_000;
pub const START: Timestamp = 1_000;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RecordedEvent {
    PlayerEntered {
        player: AccountId,
        amount: Balance,
    },
    RandomnessRequested {
        request_id: RequestId,
        round_id: u32,
    },
    WinnerPicked {
        winner: AccountId,
        amount: Balance,
        request_id: RequestId,
        round_id: u32,
    },
}

/// Raffle hosted outside of any contract, with a fake oracle and a fake fund transfer
pub struct TestRaffle {
    data: RaffleData,
    events: RefCell<Vec<RecordedEvent>>,
    /// next id returned by the oracle
    pub next_request_id: RequestId,
    /// when set, the oracle returns this id instead of the next one
    pub forced_request_id: Option<RequestId>,
    pub oracle_down: bool,
    /// recipient refusing the transfers
    pub rejecting: Option<AccountId>,
    pub transfers: Vec<(AccountId, Balance)>,
}

impl TestRaffle {
    pub fn new(entrance_fee: Balance, interval: Timestamp, now: Timestamp) -> Self {
        TestRaffle {
            data: RaffleData::new(entrance_fee, interval, now),
            events: RefCell::new(Vec::new()),
            next_request_id: 1,
            forced_request_id: None,
            oracle_down: false,
            rejecting: None,
            transfers: Vec::new(),
        }
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for TestRaffle {
    fn default() -> Self {
        TestRaffle::new(ENTRANCE_FEE, INTERVAL, START)
    }
}

impl RaffleStorage for TestRaffle {
    fn get_storage(&self) -> &RaffleData {
        &self.data
    }

    fn get_mut_storage(&mut self) -> &mut RaffleData {
        &mut self.data
    }
}

impl RaffleEventBroadcaster for TestRaffle {
    fn emit_player_entered(&self, player: AccountId, amount: Balance) {
        self.events
            .borrow_mut()
            .push(RecordedEvent::PlayerEntered { player, amount });
    }

    fn emit_randomness_requested(&self, request_id: RequestId, round_id: u32) {
        self.events
            .borrow_mut()
            .push(RecordedEvent::RandomnessRequested { request_id, round_id });
    }

    fn emit_winner_picked(
        &self,
        winner: AccountId,
        amount: Balance,
        request_id: RequestId,
        round_id: u32,
    ) {
        self.events.borrow_mut().push(RecordedEvent::WinnerPicked {
            winner,
            amount,
            request_id,
            round_id,
        });
    }
}

impl RandomnessOracle for TestRaffle {
    fn request_random_words(&mut self) -> Result<RequestId, RaffleError> {
        if self.oracle_down {
            return Err(RaffleError::OracleCallFailed);
        }
        if let Some(request_id) = self.forced_request_id {
            return Ok(request_id);
        }
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        Ok(request_id)
    }
}

impl FundTransfer for TestRaffle {
    fn transfer_to(&mut self, to: AccountId, amount: Balance) -> Result<(), RaffleError> {
        if self.rejecting == Some(to) {
            return Err(RaffleError::TransferFailed);
        }
        self.transfers.push((to, amount));
        Ok(())
    }
}

impl BaseEntryLedger for TestRaffle {}
impl BasePayout for TestRaffle {}
impl BaseRandomnessBridge for TestRaffle {}
impl BaseRaffle for TestRaffle {}

pub fn account(index: u8) -> AccountId {
    AccountId::from([index; 32])
}

/// enter the given players with the entrance fee
pub fn enter_players(raffle: &mut TestRaffle, players: &[AccountId]) {
    for player in players {
        raffle
            .inner_enter(*player, ENTRANCE_FEE)
            .expect("entering the raffle should succeed");
    }
}

/// four players entered, the interval elapsed and the upkeep performed
pub fn calculating_raffle() -> (TestRaffle, Vec<AccountId>, RequestId) {
    let mut raffle = TestRaffle::default();
    let players = vec![account(1), account(2), account(3), account(4)];
    enter_players(&mut raffle, &players);
    let request_id = raffle
        .inner_perform_upkeep(START + INTERVAL + 1)
        .expect("upkeep should be performed");
    (raffle, players, request_id)
}
