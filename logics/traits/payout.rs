use crate::traits::entry_ledger::BaseEntryLedger;
use crate::traits::error::RaffleError;
use crate::traits::{AccountId, Balance};

/// Moves the funds out of the raffle
pub trait FundTransfer {
    /// return TransferFailed if the recipient rejects the transfer
    fn transfer_to(&mut self, to: AccountId, amount: Balance) -> Result<(), RaffleError>;
}

pub trait BasePayout: BaseEntryLedger + FundTransfer {
    /// Transfer the whole pot to the winner and reset the ledger.
    /// If the transfer fails, the ledger is untouched.
    fn inner_payout(&mut self, winner: AccountId) -> Result<Balance, RaffleError> {
        let amount = self.inner_get_balance();
        if let Err(e) = self.transfer_to(winner, amount) {
            ink::env::debug_println!("transfer of {} to the winner failed: {:?}", amount, e);
            return Err(e);
        }
        self.inner_reset();
        Ok(amount)
    }
}
