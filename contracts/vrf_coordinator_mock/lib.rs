#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// Coordinator delivering verifiable random words to the consumers of a subscription.
/// The words are derived from the request id.
#[openbrush::implementation(AccessControl)]
#[openbrush::contract]
pub mod vrf_coordinator_mock {
    use ink::codegen::{EmitEvent, Env};
    use ink::env::call::{build_call, ExecutionInput, Selector};
    use ink::env::hash::{HashOutput, Keccak256};
    use ink::env::DefaultEnvironment;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;
    use openbrush::contracts::access_control::*;
    use openbrush::{modifiers, traits::Storage};

    use fortuna::traits::error::RaffleError;
    use fortuna::traits::vrf_coordinator::VrfCoordinatorError::*;
    use fortuna::traits::vrf_coordinator::*;
    use fortuna::traits::{RandomWord, RequestId};

    #[ink(event)]
    pub struct SubscriptionCreated {
        #[ink(topic)]
        subscription_id: u64,
        owner: AccountId,
    }

    #[ink(event)]
    pub struct SubscriptionFunded {
        #[ink(topic)]
        subscription_id: u64,
        old_balance: Balance,
        new_balance: Balance,
    }

    #[ink(event)]
    pub struct ConsumerAdded {
        #[ink(topic)]
        subscription_id: u64,
        consumer: AccountId,
    }

    #[ink(event)]
    pub struct ConsumerRemoved {
        #[ink(topic)]
        subscription_id: u64,
        consumer: AccountId,
    }

    /// Event emitted when a consumer asks for random words
    #[ink(event)]
    pub struct RandomWordsRequested {
        #[ink(topic)]
        request_id: RequestId,
        key_hash: [u8; 32],
        subscription_id: u64,
        request_confirmations: u16,
        callback_gas_limit: u64,
        num_words: u32,
        #[ink(topic)]
        consumer: AccountId,
    }

    /// Event emitted when the random words have been delivered to the consumer
    #[ink(event)]
    pub struct RandomWordsFulfilled {
        #[ink(topic)]
        request_id: RequestId,
        consumer: AccountId,
        payment: Balance,
    }

    /// Errors occurred in the contract
    #[derive(Debug, Eq, PartialEq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum ContractError {
        AccessControlError(AccessControlError),
        VrfCoordinatorError(VrfCoordinatorError),
    }

    /// convertor from AccessControlError to ContractError
    impl From<AccessControlError> for ContractError {
        fn from(error: AccessControlError) -> Self {
            ContractError::AccessControlError(error)
        }
    }

    /// convertor from VrfCoordinatorError to ContractError
    impl From<VrfCoordinatorError> for ContractError {
        fn from(error: VrfCoordinatorError) -> Self {
            ContractError::VrfCoordinatorError(error)
        }
    }

    /// Contract storage
    #[ink(storage)]
    #[derive(Default, Storage)]
    pub struct Contract {
        #[storage_field]
        access: access_control::Data,
        /// amount charged to the subscription for each fulfillment
        base_fee: Balance,
        next_subscription_id: u64,
        next_request_id: RequestId,
        subscriptions: Mapping<u64, Subscription>,
        requests: Mapping<RequestId, RandomWordsRequest>,
    }

    impl Contract {
        #[ink(constructor)]
        pub fn new(base_fee: Balance) -> Self {
            let mut instance = Self::default();
            let caller = instance.env().caller();
            access_control::Internal::_init_with_admin(&mut instance, Some(caller));
            instance.base_fee = base_fee;
            instance.next_subscription_id = 1;
            instance.next_request_id = 1;
            instance
        }

        #[ink(message)]
        pub fn create_subscription(&mut self) -> Result<u64, VrfCoordinatorError> {
            let subscription_id = self.next_subscription_id;
            self.next_subscription_id = subscription_id.checked_add(1).ok_or(AddOverFlow)?;

            let owner = self.env().caller();
            self.subscriptions.insert(
                subscription_id,
                &Subscription {
                    owner,
                    balance: 0,
                    consumers: Vec::new(),
                },
            );

            self.env().emit_event(SubscriptionCreated {
                subscription_id,
                owner,
            });
            Ok(subscription_id)
        }

        /// Credit the subscription, the funds are only accounted, nothing is transferred
        #[ink(message)]
        pub fn fund_subscription(
            &mut self,
            subscription_id: u64,
            amount: Balance,
        ) -> Result<(), VrfCoordinatorError> {
            let mut subscription = self
                .subscriptions
                .get(subscription_id)
                .ok_or(InvalidSubscription)?;
            let old_balance = subscription.balance;
            let new_balance = old_balance.checked_add(amount).ok_or(AddOverFlow)?;
            subscription.balance = new_balance;
            self.subscriptions.insert(subscription_id, &subscription);

            self.env().emit_event(SubscriptionFunded {
                subscription_id,
                old_balance,
                new_balance,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn add_consumer(
            &mut self,
            subscription_id: u64,
            consumer: AccountId,
        ) -> Result<(), VrfCoordinatorError> {
            let mut subscription = self.get_owned_subscription(subscription_id)?;
            if subscription.consumers.contains(&consumer) {
                // already added
                return Ok(());
            }
            if subscription.consumers.len() >= MAX_CONSUMERS {
                return Err(TooManyConsumers);
            }
            subscription.consumers.push(consumer);
            self.subscriptions.insert(subscription_id, &subscription);

            self.env().emit_event(ConsumerAdded {
                subscription_id,
                consumer,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn remove_consumer(
            &mut self,
            subscription_id: u64,
            consumer: AccountId,
        ) -> Result<(), VrfCoordinatorError> {
            let mut subscription = self.get_owned_subscription(subscription_id)?;
            let index = subscription
                .consumers
                .iter()
                .position(|c| *c == consumer)
                .ok_or(InvalidConsumer)?;
            subscription.consumers.swap_remove(index);
            self.subscriptions.insert(subscription_id, &subscription);

            self.env().emit_event(ConsumerRemoved {
                subscription_id,
                consumer,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn get_subscription(&self, subscription_id: u64) -> Option<Subscription> {
            self.subscriptions.get(subscription_id)
        }

        #[ink(message)]
        pub fn consumer_is_added(&self, subscription_id: u64, consumer: AccountId) -> bool {
            self.subscriptions
                .get(subscription_id)
                .map(|s| s.consumers.contains(&consumer))
                .unwrap_or(false)
        }

        /// Record a request of random words for the caller.
        /// The words are delivered later by `fulfill_random_words`.
        #[ink(message, selector = 0x5d3b1d30)]
        pub fn request_random_words(
            &mut self,
            key_hash: [u8; 32],
            subscription_id: u64,
            request_confirmations: u16,
            callback_gas_limit: u64,
            num_words: u32,
        ) -> Result<RequestId, VrfCoordinatorError> {
            let consumer = self.env().caller();
            let subscription = self
                .subscriptions
                .get(subscription_id)
                .ok_or(InvalidSubscription)?;
            if !subscription.consumers.contains(&consumer) {
                return Err(InvalidConsumer);
            }
            if num_words == 0 || num_words > MAX_NUM_WORDS {
                return Err(InvalidNumWords);
            }

            let request_id = self.next_request_id;
            self.next_request_id = request_id.checked_add(1).ok_or(AddOverFlow)?;
            self.requests.insert(
                request_id,
                &RandomWordsRequest {
                    subscription_id,
                    consumer,
                    num_words,
                    callback_gas_limit,
                },
            );

            ink::env::debug_println!(
                "request {} of {} words for subscription {}",
                request_id,
                num_words,
                subscription_id
            );
            self.env().emit_event(RandomWordsRequested {
                request_id,
                key_hash,
                subscription_id,
                request_confirmations,
                callback_gas_limit,
                num_words,
                consumer,
            });
            Ok(request_id)
        }

        /// Deliver the words derived from the request id to the consumer
        #[ink(message)]
        pub fn fulfill_random_words(
            &mut self,
            request_id: RequestId,
            consumer: AccountId,
        ) -> Result<(), VrfCoordinatorError> {
            self.inner_fulfill_random_words(request_id, consumer, None)
        }

        /// Deliver the given words to the consumer
        #[ink(message)]
        pub fn fulfill_random_words_with_override(
            &mut self,
            request_id: RequestId,
            consumer: AccountId,
            random_words: Vec<RandomWord>,
        ) -> Result<(), VrfCoordinatorError> {
            self.inner_fulfill_random_words(request_id, consumer, Some(random_words))
        }

        #[ink(message)]
        pub fn get_request(&self, request_id: RequestId) -> Option<RandomWordsRequest> {
            self.requests.get(request_id)
        }

        #[ink(message)]
        #[modifiers(only_role(DEFAULT_ADMIN_ROLE))]
        pub fn set_base_fee(&mut self, base_fee: Balance) -> Result<(), ContractError> {
            self.base_fee = base_fee;
            Ok(())
        }

        #[ink(message)]
        pub fn get_base_fee(&self) -> Balance {
            self.base_fee
        }

        fn get_owned_subscription(
            &self,
            subscription_id: u64,
        ) -> Result<Subscription, VrfCoordinatorError> {
            let subscription = self
                .subscriptions
                .get(subscription_id)
                .ok_or(InvalidSubscription)?;
            if subscription.owner != self.env().caller() {
                return Err(MustBeSubOwner);
            }
            Ok(subscription)
        }

        fn inner_fulfill_random_words(
            &mut self,
            request_id: RequestId,
            consumer: AccountId,
            random_words: Option<Vec<RandomWord>>,
        ) -> Result<(), VrfCoordinatorError> {
            let request = self.requests.get(request_id).ok_or(NonexistentRequest)?;
            if request.consumer != consumer {
                return Err(NonexistentRequest);
            }

            let random_words = match random_words {
                Some(words) => {
                    if words.len() != request.num_words as usize {
                        return Err(InvalidRandomWords);
                    }
                    words
                }
                None => generate_random_words(request_id, request.num_words),
            };

            let mut subscription = self
                .subscriptions
                .get(request.subscription_id)
                .ok_or(InvalidSubscription)?;
            let payment = self.base_fee;
            subscription.balance = subscription
                .balance
                .checked_sub(payment)
                .ok_or(InsufficientBalance)?;

            // the request stays pending if the consumer fails
            let result = build_call::<DefaultEnvironment>()
                .call(consumer)
                .exec_input(
                    ExecutionInput::new(Selector::new(RAW_FULFILL_RANDOM_WORDS_SELECTOR))
                        .push_arg(request_id)
                        .push_arg(&random_words),
                )
                .returns::<Result<(), RaffleError>>()
                .try_invoke();

            match result {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => {
                    ink::env::debug_println!("consumer rejected request {}: {:?}", request_id, e);
                    return Err(ConsumerCallFailed);
                }
                Ok(Err(e)) => {
                    ink::env::debug_println!("consumer call for request {} failed: {:?}", request_id, e);
                    return Err(ConsumerCallFailed);
                }
                Err(e) => {
                    ink::env::debug_println!("consumer call for request {} failed: {:?}", request_id, e);
                    return Err(ConsumerCallFailed);
                }
            }

            self.requests.remove(request_id);
            self.subscriptions
                .insert(request.subscription_id, &subscription);

            self.env().emit_event(RandomWordsFulfilled {
                request_id,
                consumer,
                payment,
            });
            Ok(())
        }
    }

    /// keccak256(request_id || index), truncated to the size of a word
    pub fn generate_random_words(request_id: RequestId, num_words: u32) -> Vec<RandomWord> {
        (0..num_words)
            .map(|index| {
                let mut input: Vec<u8> = Vec::new();
                input.extend_from_slice(&request_id.to_be_bytes());
                input.extend_from_slice(&index.to_be_bytes());
                let mut output = <Keccak256 as HashOutput>::Type::default();
                ink::env::hash_bytes::<Keccak256>(&input, &mut output);

                let mut word = [0u8; 16];
                word.copy_from_slice(&output[..16]);
                RandomWord::from_be_bytes(word)
            })
            .collect()
    }

}
