use crate::traits::raffle::RaffleState;
use crate::traits::vrf_coordinator::VrfCoordinatorError;
use crate::traits::Balance;
use openbrush::contracts::access_control::AccessControlError;

#[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum RaffleError {
    /// the transferred value is lower than the entrance fee
    InsufficientFunds,
    /// the round is calculating the winner
    RoundNotOpen,
    UpkeepNotNeeded {
        balance: Balance,
        nb_players: u32,
        state: RaffleState,
    },
    /// the request id was never issued or has already been fulfilled
    UnknownRequest,
    IndexOutOfRange,
    /// the winner refused the prize
    TransferFailed,
    TooManyPlayers,
    AddOverFlow,
    DuplicateRequest,
    /// a pending request was recorded for a round without player
    NoPlayerInSnapshot,
    MissingRandomWord,
    NotCalculating,
    OracleCallFailed,
    CoordinatorError(VrfCoordinatorError),
    AccessControlError(AccessControlError),
}

/// convertor from AccessControlError to RaffleError
impl From<AccessControlError> for RaffleError {
    fn from(error: AccessControlError) -> Self {
        RaffleError::AccessControlError(error)
    }
}

/// convertor from VrfCoordinatorError to RaffleError
impl From<VrfCoordinatorError> for RaffleError {
    fn from(error: VrfCoordinatorError) -> Self {
        RaffleError::CoordinatorError(error)
    }
}
