use crate::traits::{AccountId, Balance, RequestId};

/// Sink of the raffle events, implemented by the contract hosting the raffle.
/// The events are ordered within a round: players entered, randomness requested, winner picked.
pub trait RaffleEventBroadcaster {
    fn emit_player_entered(&self, player: AccountId, amount: Balance);

    fn emit_randomness_requested(&self, request_id: RequestId, round_id: u32);

    fn emit_winner_picked(
        &self,
        winner: AccountId,
        amount: Balance,
        request_id: RequestId,
        round_id: u32,
    );
}
