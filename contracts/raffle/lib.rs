#![cfg_attr(not(feature = "std"), no_std, no_main)]

#[openbrush::implementation(AccessControl)]
#[openbrush::contract]
pub mod raffle_contract {
    use ink::codegen::{EmitEvent, Env};
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::env::DefaultEnvironment;
    use ink::prelude::vec::Vec;
    use openbrush::contracts::access_control::*;
    use openbrush::{modifiers, traits::Storage};

    use fortuna::traits::entry_ledger::BaseEntryLedger;
    use fortuna::traits::error::RaffleError;
    use fortuna::traits::events::RaffleEventBroadcaster;
    use fortuna::traits::payout::{BasePayout, FundTransfer};
    use fortuna::traits::raffle::*;
    use fortuna::traits::randomness_bridge::*;
    use fortuna::traits::vrf_coordinator::*;
    use fortuna::traits::{RandomWord, RequestId, RAFFLE_MANAGER_ROLE, RANDOMNESS_PROVIDER_ROLE};

    /// Event emitted when a player enters the raffle
    #[ink(event)]
    pub struct PlayerEntered {
        #[ink(topic)]
        player: AccountId,
        amount: Balance,
    }

    /// Event emitted when the round is closed and the randomness requested
    #[ink(event)]
    pub struct RandomnessRequested {
        #[ink(topic)]
        request_id: RequestId,
        round_id: u32,
    }

    /// Event emitted when the winner has been paid
    #[ink(event)]
    pub struct WinnerPicked {
        #[ink(topic)]
        winner: AccountId,
        amount: Balance,
        #[ink(topic)]
        request_id: RequestId,
        round_id: u32,
    }

    /// Errors occurred in the contract
    #[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum ContractError {
        AccessControlError(AccessControlError),
        RaffleError(RaffleError),
    }

    /// convertor from AccessControlError to ContractError
    impl From<AccessControlError> for ContractError {
        fn from(error: AccessControlError) -> Self {
            ContractError::AccessControlError(error)
        }
    }

    /// convertor from RaffleError to ContractError
    impl From<RaffleError> for ContractError {
        fn from(error: RaffleError) -> Self {
            ContractError::RaffleError(error)
        }
    }

    /// Contract storage
    #[ink(storage)]
    #[derive(Default, Storage)]
    pub struct Contract {
        #[storage_field]
        access: access_control::Data,
        raffle: RaffleData,
        /// coordinator used to request the randomness.
        /// When missing, the request ids are allocated here and the randomness comes from a provider.
        vrf_config: Option<VrfConfig>,
        last_local_request_id: RequestId,
    }

    impl RaffleStorage for Contract {
        fn get_storage(&self) -> &RaffleData {
            &self.raffle
        }

        fn get_mut_storage(&mut self) -> &mut RaffleData {
            &mut self.raffle
        }
    }

    impl RaffleEventBroadcaster for Contract {
        fn emit_player_entered(&self, player: AccountId, amount: Balance) {
            self.env().emit_event(PlayerEntered { player, amount });
        }

        fn emit_randomness_requested(&self, request_id: RequestId, round_id: u32) {
            self.env().emit_event(RandomnessRequested {
                request_id,
                round_id,
            });
        }

        fn emit_winner_picked(
            &self,
            winner: AccountId,
            amount: Balance,
            request_id: RequestId,
            round_id: u32,
        ) {
            self.env().emit_event(WinnerPicked {
                winner,
                amount,
                request_id,
                round_id,
            });
        }
    }

    impl RandomnessOracle for Contract {
        fn request_random_words(&mut self) -> Result<RequestId, RaffleError> {
            let Some(config) = self.vrf_config else {
                let request_id = self
                    .last_local_request_id
                    .checked_add(1)
                    .ok_or(RaffleError::AddOverFlow)?;
                self.last_local_request_id = request_id;
                return Ok(request_id);
            };

            ink::env::debug_println!("call the coordinator {:?}", config.coordinator);
            let result = build_call::<DefaultEnvironment>()
                .call(config.coordinator)
                .exec_input(
                    ExecutionInput::new(Selector::new(REQUEST_RANDOM_WORDS_SELECTOR))
                        .push_arg(config.key_hash)
                        .push_arg(config.subscription_id)
                        .push_arg(config.request_confirmations)
                        .push_arg(config.callback_gas_limit)
                        .push_arg(NUM_WORDS),
                )
                .returns::<Result<RequestId, VrfCoordinatorError>>()
                .try_invoke();

            match result {
                Ok(Ok(Ok(request_id))) => Ok(request_id),
                Ok(Ok(Err(e))) => Err(e.into()),
                _ => Err(RaffleError::OracleCallFailed),
            }
        }
    }

    impl FundTransfer for Contract {
        fn transfer_to(&mut self, to: AccountId, amount: Balance) -> Result<(), RaffleError> {
            self.env()
                .transfer(to, amount)
                .map_err(|_| RaffleError::TransferFailed)
        }
    }

    /// implementations of the raffle
    impl BaseEntryLedger for Contract {}
    impl BasePayout for Contract {}
    impl BaseRandomnessBridge for Contract {}
    impl BaseRaffle for Contract {}

    impl Contract {
        #[ink(constructor)]
        pub fn new(
            entrance_fee: Balance,
            interval: Timestamp,
            vrf_config: Option<VrfConfig>,
        ) -> Self {
            let mut instance = Self::default();
            let caller = instance.env().caller();
            let now = instance.env().block_timestamp();
            // set the admin of this contract
            access_control::Internal::_init_with_admin(&mut instance, Some(caller));
            // grant the role manager
            AccessControl::grant_role(&mut instance, RAFFLE_MANAGER_ROLE, Some(caller))
                .expect("Should grant the role RAFFLE_MANAGER_ROLE");
            // the coordinator delivers the randomness
            if let Some(config) = vrf_config {
                AccessControl::grant_role(
                    &mut instance,
                    RANDOMNESS_PROVIDER_ROLE,
                    Some(config.coordinator),
                )
                .expect("Should grant the role RANDOMNESS_PROVIDER_ROLE");
            }
            instance.raffle = RaffleData::new(entrance_fee, interval, now);
            instance.vrf_config = vrf_config;
            instance
        }

        /// Enter the current round, the whole transferred value goes to the pot
        #[ink(message, payable)]
        pub fn enter_raffle(&mut self) -> Result<(), ContractError> {
            let player = self.env().caller();
            let amount = self.env().transferred_value();
            self.inner_enter(player, amount)?;
            Ok(())
        }

        /// Return true if the round can be closed. The data are not used.
        #[ink(message)]
        pub fn check_upkeep(&self, _check_data: Vec<u8>) -> (bool, Vec<u8>) {
            let now = self.env().block_timestamp();
            (self.inner_check_upkeep_needed(now), Vec::new())
        }

        /// Close the round and request the randomness. Anyone can call it.
        #[ink(message)]
        pub fn perform_upkeep(&mut self, _perform_data: Vec<u8>) -> Result<RequestId, ContractError> {
            let now = self.env().block_timestamp();
            let request_id = self.inner_perform_upkeep(now)?;
            Ok(request_id)
        }

        /// Callback of the randomness provider, only the first word is used
        #[ink(message, selector = 0x1fe543e3)]
        #[modifiers(only_role(RANDOMNESS_PROVIDER_ROLE))]
        pub fn raw_fulfill_random_words(
            &mut self,
            request_id: RequestId,
            random_words: Vec<RandomWord>,
        ) -> Result<(), RaffleError> {
            let random_word = *random_words
                .first()
                .ok_or(RaffleError::MissingRandomWord)?;
            let now = self.env().block_timestamp();
            self.inner_fulfill(request_id, random_word, now)?;
            Ok(())
        }

        /// Drop the pending request of the current round and ask again for the randomness
        #[ink(message)]
        #[modifiers(only_role(RAFFLE_MANAGER_ROLE))]
        pub fn reissue_randomness_request(&mut self) -> Result<RequestId, ContractError> {
            let now = self.env().block_timestamp();
            let request_id = self.inner_reissue_request(now)?;
            Ok(request_id)
        }

        /// Set the coordinator used for the next requests, the coordinator is granted as provider
        #[ink(message)]
        #[modifiers(only_role(DEFAULT_ADMIN_ROLE))]
        pub fn set_vrf_config(&mut self, vrf_config: Option<VrfConfig>) -> Result<(), ContractError> {
            if let Some(config) = vrf_config {
                self.grant_randomness_provider(config.coordinator)?;
            }
            self.vrf_config = vrf_config;
            Ok(())
        }

        #[ink(message)]
        #[modifiers(only_role(DEFAULT_ADMIN_ROLE))]
        pub fn register_randomness_provider(
            &mut self,
            provider: AccountId,
        ) -> Result<(), ContractError> {
            self.grant_randomness_provider(provider)?;
            Ok(())
        }

        fn grant_randomness_provider(&mut self, provider: AccountId) -> Result<(), AccessControlError> {
            if AccessControl::has_role(self, RANDOMNESS_PROVIDER_ROLE, Some(provider)) {
                return Ok(());
            }
            AccessControl::grant_role(self, RANDOMNESS_PROVIDER_ROLE, Some(provider))
        }

        #[ink(message)]
        pub fn get_vrf_config(&self) -> Option<VrfConfig> {
            self.vrf_config
        }

        #[ink(message)]
        pub fn get_raffle_state(&self) -> RaffleState {
            self.inner_get_raffle_state()
        }

        #[ink(message)]
        pub fn get_entrance_fee(&self) -> Balance {
            self.inner_get_entrance_fee()
        }

        #[ink(message)]
        pub fn get_interval(&self) -> Timestamp {
            self.inner_get_interval()
        }

        #[ink(message)]
        pub fn get_last_timestamp(&self) -> Timestamp {
            self.inner_get_last_timestamp()
        }

        #[ink(message)]
        pub fn get_round_id(&self) -> u32 {
            self.inner_get_round_id()
        }

        #[ink(message)]
        pub fn get_number_of_players(&self) -> u32 {
            self.inner_get_nb_players()
        }

        #[ink(message)]
        pub fn get_player(&self, index: u32) -> Result<AccountId, ContractError> {
            let player = self.inner_get_player(index)?;
            Ok(player)
        }

        /// pot of the current round
        #[ink(message)]
        pub fn get_balance(&self) -> Balance {
            self.inner_get_balance()
        }

        #[ink(message)]
        pub fn get_recent_winner(&self) -> Option<AccountId> {
            self.inner_get_recent_winner().map(|w| w.address)
        }

        #[ink(message)]
        pub fn get_recent_winner_record(&self) -> Option<WinnerRecord> {
            self.inner_get_recent_winner()
        }

        #[ink(message)]
        pub fn get_pending_request(&self, request_id: RequestId) -> Option<PendingRequest> {
            self.inner_get_pending_request(request_id)
        }

        #[ink(message)]
        pub fn get_role_raffle_manager(&self) -> RoleType {
            RAFFLE_MANAGER_ROLE
        }

        #[ink(message)]
        pub fn get_role_randomness_provider(&self) -> RoleType {
            RANDOMNESS_PROVIDER_ROLE
        }
    }

}
