use crate::traits::error::RaffleError;
use crate::traits::error::RaffleError::*;
use crate::traits::payout::BasePayout;
use crate::traits::raffle::{RaffleState, RaffleStorage, WinnerRecord};
use crate::traits::{AccountId, RandomWord, RequestId, Timestamp};

/// Snapshot of the round when the randomness was requested
#[derive(Debug, Copy, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub round_id: u32,
    pub player_count: u32,
    pub requested_at: Timestamp,
}

/// Out-of-band source of randomness.
/// The value comes back later through an independent call to `inner_fulfill`.
pub trait RandomnessOracle {
    fn request_random_words(&mut self) -> Result<RequestId, RaffleError>;
}

pub trait BaseRandomnessBridge: RaffleStorage + BasePayout + RandomnessOracle {
    /// Ask the oracle for randomness and keep the round snapshot to correlate the answer
    fn inner_request_randomness(&mut self, now: Timestamp) -> Result<RequestId, RaffleError> {
        let request_id = self.request_random_words()?;

        let data = RaffleStorage::get_storage(self);
        if data.pending_requests.contains_key(&request_id) {
            return Err(DuplicateRequest);
        }
        let pending = PendingRequest {
            request_id,
            round_id: data.round.round_id,
            player_count: data.round.players.len() as u32,
            requested_at: now,
        };

        RaffleStorage::get_mut_storage(self)
            .pending_requests
            .insert(request_id, pending);
        Ok(request_id)
    }

    /// Resolve the round matching the request: pick the winner, pay and reopen the raffle
    fn inner_fulfill(
        &mut self,
        request_id: RequestId,
        random_word: RandomWord,
        now: Timestamp,
    ) -> Result<AccountId, RaffleError> {
        let pending = *RaffleStorage::get_storage(self)
            .pending_requests
            .get(&request_id)
            .ok_or(UnknownRequest)?;

        if pending.player_count == 0 {
            // the upkeep is never performed without player
            ink::env::debug_println!("request {} has been recorded without player", request_id);
            return Err(NoPlayerInSnapshot);
        }

        let winner_index = random_word % RandomWord::from(pending.player_count);
        let winner = self.inner_get_player(winner_index as u32)?;

        // the round stays in Calculating and the request stays pending if the transfer fails
        let amount = self.inner_payout(winner)?;

        let data = RaffleStorage::get_mut_storage(self);
        data.pending_requests.remove(&request_id);
        data.recent_winner = Some(WinnerRecord {
            address: winner,
            payout: amount,
            round_id: pending.round_id,
        });
        data.round.state = RaffleState::Open;
        data.round.last_timestamp = now;
        data.round.round_id = pending.round_id.saturating_add(1);

        ink::env::debug_println!(
            "round {} resolved by request {}: winner index {}, payout {}",
            pending.round_id,
            request_id,
            winner_index,
            amount
        );
        self.emit_winner_picked(winner, amount, request_id, pending.round_id);

        Ok(winner)
    }

    /// Drop the pending requests of the current round and ask the oracle again
    fn inner_reissue_request(&mut self, now: Timestamp) -> Result<RequestId, RaffleError> {
        let round = &RaffleStorage::get_storage(self).round;
        if round.state != RaffleState::Calculating {
            return Err(NotCalculating);
        }
        let round_id = round.round_id;

        let request_id = self.request_random_words()?;
        let data = RaffleStorage::get_mut_storage(self);
        if data.pending_requests.contains_key(&request_id) {
            return Err(DuplicateRequest);
        }
        data.pending_requests.clear();
        data.pending_requests.insert(
            request_id,
            PendingRequest {
                request_id,
                round_id,
                player_count: data.round.players.len() as u32,
                requested_at: now,
            },
        );

        ink::env::debug_println!("round {}: randomness requested again {}", round_id, request_id);
        self.emit_randomness_requested(request_id, round_id);
        Ok(request_id)
    }

    fn inner_get_pending_request(&self, request_id: RequestId) -> Option<PendingRequest> {
        RaffleStorage::get_storage(self)
            .pending_requests
            .get(&request_id)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::entry_ledger::BaseEntryLedger;
    use crate::traits::events::RaffleEventBroadcaster;
    use crate::traits::payout::FundTransfer;
    use crate::traits::raffle::RaffleData;
    use crate::traits::Balance;

    struct Host {
        data: RaffleData,
        transfers: u32,
        events: core::cell::Cell<u32>,
    }

    impl RaffleStorage for Host {
        fn get_storage(&self) -> &RaffleData {
            &self.data
        }

        fn get_mut_storage(&mut self) -> &mut RaffleData {
            &mut self.data
        }
    }

    impl RaffleEventBroadcaster for Host {
        fn emit_player_entered(&self, _player: AccountId, _amount: Balance) {
            self.events.set(self.events.get() + 1);
        }

        fn emit_randomness_requested(&self, _request_id: RequestId, _round_id: u32) {
            self.events.set(self.events.get() + 1);
        }

        fn emit_winner_picked(&self, _: AccountId, _: Balance, _: RequestId, _: u32) {
            self.events.set(self.events.get() + 1);
        }
    }

    impl RandomnessOracle for Host {
        fn request_random_words(&mut self) -> Result<RequestId, RaffleError> {
            Ok(1)
        }
    }

    impl FundTransfer for Host {
        fn transfer_to(&mut self, _to: AccountId, _amount: Balance) -> Result<(), RaffleError> {
            self.transfers += 1;
            Ok(())
        }
    }

    impl BaseEntryLedger for Host {}
    impl BasePayout for Host {}
    impl BaseRandomnessBridge for Host {}

    #[ink::test]
    fn test_fulfill_snapshot_without_player() {
        let mut host = Host {
            data: RaffleData::new(100, 30_000, 1_000),
            transfers: 0,
            events: core::cell::Cell::new(0),
        };
        host.inner_enter(AccountId::from([1u8; 32]), 100).unwrap();
        host.inner_enter(AccountId::from([2u8; 32]), 100).unwrap();
        host.data.round.state = RaffleState::Calculating;
        let pending = PendingRequest {
            request_id: 9,
            round_id: 1,
            player_count: 0,
            requested_at: 31_000,
        };
        host.data.pending_requests.insert(9, pending);
        host.events.set(0);

        assert_eq!(Err(NoPlayerInSnapshot), host.inner_fulfill(9, 3, 40_000));

        // nothing has changed
        assert_eq!(Some(pending), host.inner_get_pending_request(9));
        assert_eq!(RaffleState::Calculating, host.data.round.state);
        assert_eq!(2, host.inner_get_nb_players());
        assert_eq!(200, host.inner_get_balance());
        assert_eq!(1_000, host.data.round.last_timestamp);
        assert_eq!(1, host.data.round.round_id);
        assert_eq!(None, host.data.recent_winner);
        assert_eq!(0, host.transfers);
        assert_eq!(0, host.events.get());
    }
}
