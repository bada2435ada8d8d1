use crate::traits::{AccountId, Balance};
use ink::prelude::vec::Vec;

// Selector of VrfCoordinator::request_random_words: "0x5d3b1d30"
pub const REQUEST_RANDOM_WORDS_SELECTOR: [u8; 4] = [0x5d, 0x3b, 0x1d, 0x30];
// Selector of the consumer callback raw_fulfill_random_words: "0x1fe543e3"
pub const RAW_FULFILL_RANDOM_WORDS_SELECTOR: [u8; 4] = [0x1f, 0xe5, 0x43, 0xe3];

pub const NUM_WORDS: u32 = 1;
pub const MAX_NUM_WORDS: u32 = 500;
pub const MAX_CONSUMERS: usize = 100;
pub const DEFAULT_REQUEST_CONFIRMATIONS: u16 = 3;
pub const DEFAULT_CALLBACK_GAS_LIMIT: u64 = 500_000;

/// Oracle wiring of a consumer, supplied at construction time
#[derive(Debug, Copy, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct VrfConfig {
    pub coordinator: AccountId,
    /// gas lane
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u64,
}

impl VrfConfig {
    pub fn new(coordinator: AccountId, key_hash: [u8; 32], subscription_id: u64) -> Self {
        VrfConfig {
            coordinator,
            key_hash,
            subscription_id,
            request_confirmations: DEFAULT_REQUEST_CONFIRMATIONS,
            callback_gas_limit: DEFAULT_CALLBACK_GAS_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct Subscription {
    pub owner: AccountId,
    pub balance: Balance,
    pub consumers: Vec<AccountId>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(
    feature = "std",
    derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
)]
pub struct RandomWordsRequest {
    pub subscription_id: u64,
    pub consumer: AccountId,
    pub num_words: u32,
    pub callback_gas_limit: u64,
}

#[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum VrfCoordinatorError {
    NonexistentRequest,
    InvalidSubscription,
    InvalidConsumer,
    MustBeSubOwner,
    TooManyConsumers,
    InsufficientBalance,
    InvalidNumWords,
    InvalidRandomWords,
    ConsumerCallFailed,
    AddOverFlow,
}
