use crate::traits::error::RaffleError;
use crate::traits::error::RaffleError::*;
use crate::traits::events::RaffleEventBroadcaster;
use crate::traits::raffle::{RaffleState, RaffleStorage, MAX_PLAYERS};
use crate::traits::{AccountId, Balance};

/// Players and funds collected during the current round
pub trait BaseEntryLedger: RaffleStorage + RaffleEventBroadcaster {
    /// Register the player for the current round.
    /// The whole amount goes to the pot, even if it is higher than the entrance fee.
    fn inner_enter(&mut self, player: AccountId, amount: Balance) -> Result<(), RaffleError> {
        let round = &RaffleStorage::get_storage(self).round;
        if amount < round.entrance_fee {
            return Err(InsufficientFunds);
        }
        if round.state != RaffleState::Open {
            return Err(RoundNotOpen);
        }
        if round.players.len() >= MAX_PLAYERS {
            return Err(TooManyPlayers);
        }
        let balance = round.balance.checked_add(amount).ok_or(AddOverFlow)?;

        let round = &mut RaffleStorage::get_mut_storage(self).round;
        round.players.push(player);
        round.balance = balance;

        self.emit_player_entered(player, amount);
        Ok(())
    }

    /// Clear the players and the pot once the prize is paid
    fn inner_reset(&mut self) {
        let round = &mut RaffleStorage::get_mut_storage(self).round;
        round.players.clear();
        round.balance = 0;
    }

    fn inner_get_nb_players(&self) -> u32 {
        RaffleStorage::get_storage(self).round.players.len() as u32
    }

    fn inner_get_player(&self, index: u32) -> Result<AccountId, RaffleError> {
        RaffleStorage::get_storage(self)
            .round
            .players
            .get(index as usize)
            .copied()
            .ok_or(IndexOutOfRange)
    }

    fn inner_get_balance(&self) -> Balance {
        RaffleStorage::get_storage(self).round.balance
    }
}
