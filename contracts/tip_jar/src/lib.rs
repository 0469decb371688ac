#![cfg_attr(not(feature = "std"), no_std, no_main)]

/// # Tip Jar: Tiered Supporter NFTs
///
/// **Role:** Accepts native value transfers ("tips") and mints the sender a
/// supporter NFT whose tier is fixed by the size of the tip.  Carries the
/// full token ledger (ownership, enumeration, approvals), per-tier metadata
/// bases, a contract-wide royalty record, and an owner-gated admin surface.
///
/// ## Tier classification
///
/// Two configurable boundaries split tips into three tiers.  Boundary
/// amounts fall into the lower tier (inclusive upper bound):
///
/// ```text
/// 0 < amount ≤ tier1_threshold                    → Tier1
/// tier1_threshold < amount ≤ tier2_threshold      → Tier2
/// amount > tier2_threshold                        → Tier3
///
/// Invariant (checked at deploy and on every update):
///   0 < tier1_threshold < tier2_threshold
/// ```
///
/// A token's tier is recorded once at mint and never mutated.  Token ids are
/// strictly sequential from 0 with no burn, so the global enumeration is the
/// identity function and `total_supply` equals the next unminted id.
///
/// ## Entry points
///
/// Tipping is exposed twice: the explicit `tip()` message, and the catch-all
/// payable `receive()` for wallets that just push value at the contract.
/// Both route through the same processor; `receive()` additionally emits a
/// `Received` event so indexers can tell the paths apart.
///
/// ## Reentrancy
///
/// Minting and withdrawal can call out to foreign code.  Every guarded
/// message (`tip`, `receive`, `withdraw`) sets a single storage flag on
/// entry and clears it on every exit path; a nested guarded call observes
/// the flag and fails with `ReentrantCall`.
///
/// **Compatibility:** ink! v5 / `pallet-contracts` (WASM).
#[ink::contract]
mod tip_jar {
    use ink::prelude::format;
    use ink::prelude::string::String;
    use ink::prelude::vec::Vec;
    use ink::storage::Mapping;

    // =========================================================================
    // CONSTANTS
    // =========================================================================

    /// Denominator for royalty basis-point calculations.
    pub const ROYALTY_DENOMINATOR: u128 = 10_000;

    /// Default royalty fee: 5% = 500 BPS, paid to the deployer until changed.
    pub const DEFAULT_ROYALTY_BPS: u128 = 500;

    /// One native token in base units (18 decimals).
    pub const ONE_NATIVE: u128 = 1_000_000_000_000_000_000;

    /// Default Tier1 upper bound: 0.05 native.
    pub const DEFAULT_TIER1_THRESHOLD: Balance = ONE_NATIVE / 20;

    /// Default Tier2 upper bound: 0.2 native.
    pub const DEFAULT_TIER2_THRESHOLD: Balance = ONE_NATIVE / 5;

    /// The all-zero account.  Rejected wherever a real destination is
    /// required; becomes the owner after `renounce_ownership`.
    pub const ZERO_ADDRESS: [u8; 32] = [0u8; 32];

    /// Sequential token identifier, dense from 0.
    pub type TokenId = u64;

    // =========================================================================
    // TIERS
    // =========================================================================

    /// Discrete classification of a minted token, fixed at mint time.
    ///
    /// `None` is the unassigned storage sentinel; no minted token ever
    /// carries it, and the metadata table rejects it as a key.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub enum Tier {
        /// Unassigned sentinel.
        None,
        /// `0 < amount ≤ tier1_threshold`
        Tier1,
        /// `tier1_threshold < amount ≤ tier2_threshold`
        Tier2,
        /// `amount > tier2_threshold`
        Tier3,
    }

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct TipJar {
        // ── Access control ────────────────────────────────────────────────
        owner: AccountId,

        // ── Tier configuration ────────────────────────────────────────────
        /// Upper bound (inclusive) of Tier1.  Always `> 0` and `< tier2`.
        tier1_threshold: Balance,
        /// Upper bound (inclusive) of Tier2.
        tier2_threshold: Balance,

        // ── Token ledger ──────────────────────────────────────────────────
        /// Next id to mint.  Only ever increases; doubles as total supply.
        next_token_id: TokenId,
        token_owner: Mapping<TokenId, AccountId>,
        token_approvals: Mapping<TokenId, AccountId>,
        operator_approvals: Mapping<(AccountId, AccountId), ()>,

        // ── Per-owner enumeration ─────────────────────────────────────────
        /// Token count per account; doubles as the account's NFT balance.
        owned_count: Mapping<AccountId, u32>,
        /// `(account, index) → token id`, dense in `0..owned_count`.
        owned_tokens: Mapping<(AccountId, u32), TokenId>,
        /// Reverse index into `owned_tokens` for swap-and-pop removal.
        owned_token_index: Mapping<TokenId, u32>,

        // ── Tier records ──────────────────────────────────────────────────
        /// Tier assigned at mint.  Never rewritten.
        token_tiers: Mapping<TokenId, Tier>,
        /// Per-tier metadata prefix.  Empty until the owner sets it.
        base_uris: Mapping<Tier, String>,

        // ── Tip ledger ────────────────────────────────────────────────────
        /// Cumulative amount ever tipped per sender.  Never reset.
        total_tipped: Mapping<AccountId, Balance>,

        // ── Royalty ───────────────────────────────────────────────────────
        royalty_receiver: AccountId,
        royalty_fee_bps: u128,

        // ── Safety ────────────────────────────────────────────────────────
        paused: bool,
        /// Single-flight flag shared by all guarded entry points.
        entered: bool,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Emitted for every accepted tip, on both entry points.
    #[ink(event)]
    pub struct TipReceived {
        #[ink(topic)]
        from: AccountId,
        #[ink(topic)]
        token_id: TokenId,
        tier: Tier,
        amount: Balance,
    }

    /// Emitted by the catch-all `receive()` path in addition to
    /// [`TipReceived`], so indexers can distinguish bare transfers.
    #[ink(event)]
    pub struct Received {
        #[ink(topic)]
        from: AccountId,
        amount: Balance,
    }

    /// Token moved.  `from` is `None` for mints.
    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)]
        from: Option<AccountId>,
        #[ink(topic)]
        to: Option<AccountId>,
        #[ink(topic)]
        token_id: TokenId,
    }

    #[ink(event)]
    pub struct Approval {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        to: AccountId,
        #[ink(topic)]
        token_id: TokenId,
    }

    #[ink(event)]
    pub struct ApprovalForAll {
        #[ink(topic)]
        owner: AccountId,
        #[ink(topic)]
        operator: AccountId,
        approved: bool,
    }

    /// Emitted when the owner replaces the tier boundaries.
    #[ink(event)]
    pub struct ThresholdsUpdated {
        tier1: Balance,
        tier2: Balance,
    }

    /// Emitted when the owner replaces a tier's metadata prefix.
    #[ink(event)]
    pub struct BaseUriUpdated {
        #[ink(topic)]
        tier: Tier,
        uri: String,
    }

    #[ink(event)]
    pub struct RoyaltyUpdated {
        #[ink(topic)]
        receiver: AccountId,
        fee_bps: u128,
    }

    /// Emitted only after a successful full-balance withdrawal.
    #[ink(event)]
    pub struct Withdrawal {
        #[ink(topic)]
        to: AccountId,
        amount: Balance,
    }

    #[ink(event)]
    pub struct Paused {
        account: AccountId,
    }

    #[ink(event)]
    pub struct Unpaused {
        account: AccountId,
    }

    #[ink(event)]
    pub struct OwnershipTransferred {
        #[ink(topic)]
        previous_owner: AccountId,
        #[ink(topic)]
        new_owner: AccountId,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the contract owner.
        NotOwner,
        /// Zero-value tip attempt.
        EmptyTip,
        /// The sentinel tier was used where a concrete tier is required.
        InvalidTier,
        /// Tier1 bound must be positive and strictly below the Tier2 bound.
        InvalidThresholds,
        /// The zero address was supplied where a real account is required.
        ZeroAddress,
        /// Royalty fee would exceed the sale price.
        InvalidRoyalty,
        /// Queried token was never minted.
        UnknownToken,
        /// Caller is neither the token's owner nor approved for it.
        NotApproved,
        /// Enumeration index is past the end.
        IndexOutOfBounds,
        /// Nothing to withdraw, or the native transfer failed.
        WithdrawFailed,
        /// An arithmetic operation overflowed.
        Overflow,
        /// Contract is paused.
        ContractPaused,
        /// Contract is not paused.
        NotPaused,
        /// A guarded entry point was re-entered.
        ReentrantCall,
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl TipJar {
        // ---------------------------------------------------------------------
        // Constructors
        // ---------------------------------------------------------------------

        /// Deploy with explicit tier boundaries.
        ///
        /// The deployer becomes owner and initial royalty receiver (at
        /// [`DEFAULT_ROYALTY_BPS`]).  Rejects boundaries violating
        /// `0 < tier1 < tier2` with [`Error::InvalidThresholds`].
        #[ink(constructor)]
        pub fn new(tier1_threshold: Balance, tier2_threshold: Balance) -> Result<Self, Error> {
            Self::validate_thresholds(tier1_threshold, tier2_threshold)?;
            Ok(Self::init(tier1_threshold, tier2_threshold))
        }

        /// Deploy with the stock 0.05 / 0.2 native boundaries.
        #[ink(constructor)]
        pub fn with_default_thresholds() -> Self {
            Self::init(DEFAULT_TIER1_THRESHOLD, DEFAULT_TIER2_THRESHOLD)
        }

        fn init(tier1_threshold: Balance, tier2_threshold: Balance) -> Self {
            let caller = Self::env().caller();
            Self {
                owner: caller,
                tier1_threshold,
                tier2_threshold,
                next_token_id: 0,
                token_owner: Mapping::default(),
                token_approvals: Mapping::default(),
                operator_approvals: Mapping::default(),
                owned_count: Mapping::default(),
                owned_tokens: Mapping::default(),
                owned_token_index: Mapping::default(),
                token_tiers: Mapping::default(),
                base_uris: Mapping::default(),
                total_tipped: Mapping::default(),
                royalty_receiver: caller,
                royalty_fee_bps: DEFAULT_ROYALTY_BPS,
                paused: false,
                entered: false,
            }
        }

        // =====================================================================
        // TIP PROCESSING
        // =====================================================================

        /// Accept a tip and mint the sender a supporter NFT.
        ///
        /// The attached value decides the tier (see module doc).  Everything
        /// is atomic: on any failure no token is minted and neither the tier
        /// record nor the sender's ledger entry survives.
        ///
        /// # Errors
        /// - [`Error::ReentrantCall`]  - nested call into a guarded message.
        /// - [`Error::ContractPaused`] - contract is paused.
        /// - [`Error::EmptyTip`]       - no value attached.
        #[ink(message, payable)]
        pub fn tip(&mut self) -> Result<(), Error> {
            self.enter_guard()?;
            let outcome = self.process_tip();
            self.exit_guard();
            outcome.map(|_| ())
        }

        /// Catch-all for bare value transfers.
        ///
        /// The chain runs no code on a plain balance transfer, so wallets
        /// that only push value call this selector.  Identical to [`tip`],
        /// plus a [`Received`] marker event.
        #[ink(message, payable)]
        pub fn receive(&mut self) -> Result<(), Error> {
            self.enter_guard()?;
            let outcome = self.process_tip();
            self.exit_guard();
            let _token_id = outcome?;
            self.env().emit_event(Received {
                from: self.env().caller(),
                amount: self.env().transferred_value(),
            });
            Ok(())
        }

        /// Shared tip pipeline: classify, assign id, record, mint, announce.
        fn process_tip(&mut self) -> Result<TokenId, Error> {
            self.assert_not_paused()?;

            let from = self.env().caller();
            let amount = self.env().transferred_value();
            if amount == 0 {
                return Err(Error::EmptyTip);
            }

            let tier = self.classify_tier(amount);

            let token_id = self.next_token_id;
            self.next_token_id = token_id.checked_add(1).ok_or(Error::Overflow)?;

            self.token_tiers.insert(token_id, &tier);

            let tipped = self.total_tipped.get(from).unwrap_or(0);
            let new_total = tipped.checked_add(amount).ok_or(Error::Overflow)?;
            self.total_tipped.insert(from, &new_total);

            self.mint_to(from, token_id)?;

            self.env().emit_event(TipReceived {
                from,
                token_id,
                tier,
                amount,
            });

            Ok(token_id)
        }

        /// Boundary amounts classify into the lower tier.
        /// Callers guarantee `amount > 0`; thresholds are valid by invariant.
        fn classify_tier(&self, amount: Balance) -> Tier {
            if amount <= self.tier1_threshold {
                Tier::Tier1
            } else if amount <= self.tier2_threshold {
                Tier::Tier2
            } else {
                Tier::Tier3
            }
        }

        // =====================================================================
        // METADATA
        // =====================================================================

        /// Metadata locator for a token: the tier's base prefix followed by
        /// the decimal token id, or the empty string while no prefix is set.
        ///
        /// # Errors
        /// - [`Error::UnknownToken`] - id was never minted.
        /// - [`Error::InvalidTier`]  - stored tier is the sentinel (cannot be
        ///   reached through minting; kept as a hard stop).
        #[ink(message)]
        pub fn token_uri(&self, token_id: TokenId) -> Result<String, Error> {
            if !self.token_owner.contains(token_id) {
                return Err(Error::UnknownToken);
            }
            let tier = self.token_tiers.get(token_id).unwrap_or(Tier::None);
            if tier == Tier::None {
                return Err(Error::InvalidTier);
            }
            let base = self.base_uris.get(tier).unwrap_or_default();
            if base.is_empty() {
                return Ok(String::new());
            }
            Ok(format!("{}{}", base, token_id))
        }

        // =====================================================================
        // TOKEN LEDGER: ownership, approvals, transfers
        // =====================================================================

        #[ink(message)]
        pub fn owner_of(&self, token_id: TokenId) -> Result<AccountId, Error> {
            self.token_owner.get(token_id).ok_or(Error::UnknownToken)
        }

        #[ink(message)]
        pub fn balance_of(&self, account: AccountId) -> u32 {
            self.owned_count.get(account).unwrap_or(0)
        }

        /// Count of tokens ever minted.  Ids are dense with no burn, so this
        /// is also the next unminted id.
        #[ink(message)]
        pub fn total_supply(&self) -> u64 {
            self.next_token_id
        }

        /// Move own token.  Shorthand for [`transfer_from`] with the caller
        /// as source.
        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, token_id: TokenId) -> Result<(), Error> {
            let caller = self.env().caller();
            self.transfer_token_from(caller, to, token_id)
        }

        /// Move a token on behalf of its owner.  Caller must be the owner,
        /// the token's approved account, or an approved operator.
        #[ink(message)]
        pub fn transfer_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            token_id: TokenId,
        ) -> Result<(), Error> {
            self.transfer_token_from(from, to, token_id)
        }

        /// Approve one account for one token.  Overwritten by the next
        /// approval, cleared automatically on transfer.
        #[ink(message)]
        pub fn approve(&mut self, to: AccountId, token_id: TokenId) -> Result<(), Error> {
            let caller = self.env().caller();
            let owner = self.token_owner.get(token_id).ok_or(Error::UnknownToken)?;
            if caller != owner && !self.operator_approvals.contains((owner, caller)) {
                return Err(Error::NotApproved);
            }
            self.token_approvals.insert(token_id, &to);
            self.env().emit_event(Approval {
                owner,
                to,
                token_id,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn get_approved(&self, token_id: TokenId) -> Option<AccountId> {
            self.token_approvals.get(token_id)
        }

        /// Grant or revoke an operator over every token the caller owns.
        #[ink(message)]
        pub fn set_approval_for_all(
            &mut self,
            operator: AccountId,
            approved: bool,
        ) -> Result<(), Error> {
            let owner = self.env().caller();
            if operator == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }
            if approved {
                self.operator_approvals.insert((owner, operator), &());
            } else {
                self.operator_approvals.remove((owner, operator));
            }
            self.env().emit_event(ApprovalForAll {
                owner,
                operator,
                approved,
            });
            Ok(())
        }

        #[ink(message)]
        pub fn is_approved_for_all(&self, account: AccountId, operator: AccountId) -> bool {
            self.operator_approvals.contains((account, operator))
        }

        // =====================================================================
        // ENUMERATION
        // =====================================================================

        /// Ids are dense and sequential, so the global index is the id.
        #[ink(message)]
        pub fn token_by_index(&self, index: u64) -> Result<TokenId, Error> {
            if index >= self.next_token_id {
                return Err(Error::IndexOutOfBounds);
            }
            Ok(index)
        }

        #[ink(message)]
        pub fn token_of_owner_by_index(
            &self,
            account: AccountId,
            index: u32,
        ) -> Result<TokenId, Error> {
            self.owned_tokens
                .get((account, index))
                .ok_or(Error::IndexOutOfBounds)
        }

        /// Ordered ids owned by `account`, built fresh from the per-owner
        /// index on every call.  Empty vec for an account with no tokens,
        /// never an error.
        #[ink(message)]
        pub fn get_owned_tokens(&self, account: AccountId) -> Vec<TokenId> {
            let count = self.owned_count.get(account).unwrap_or(0);
            let mut tokens = Vec::with_capacity(count as usize);
            for index in 0..count {
                if let Some(token_id) = self.owned_tokens.get((account, index)) {
                    tokens.push(token_id);
                }
            }
            tokens
        }

        // =====================================================================
        // ROYALTY
        // =====================================================================

        /// Royalty terms for a sale.  Terms are contract-wide; the token id
        /// is accepted for interface parity with per-token royalty schemes.
        #[ink(message)]
        pub fn royalty_info(
            &self,
            _token_id: TokenId,
            sale_price: Balance,
        ) -> Result<(AccountId, Balance), Error> {
            let amount = sale_price
                .checked_mul(self.royalty_fee_bps)
                .ok_or(Error::Overflow)?
                .checked_div(ROYALTY_DENOMINATOR)
                .ok_or(Error::Overflow)?;
            Ok((self.royalty_receiver, amount))
        }

        // =====================================================================
        // VIEW FUNCTIONS
        // =====================================================================

        #[ink(message)]
        pub fn get_tier_thresholds(&self) -> (Balance, Balance) {
            (self.tier1_threshold, self.tier2_threshold)
        }

        /// Tier recorded for a minted token.
        #[ink(message)]
        pub fn tier_of(&self, token_id: TokenId) -> Result<Tier, Error> {
            if !self.token_owner.contains(token_id) {
                return Err(Error::UnknownToken);
            }
            Ok(self.token_tiers.get(token_id).unwrap_or(Tier::None))
        }

        /// Metadata prefix currently stored for a tier; empty until set.
        #[ink(message)]
        pub fn get_base_uri(&self, tier: Tier) -> Result<String, Error> {
            if tier == Tier::None {
                return Err(Error::InvalidTier);
            }
            Ok(self.base_uris.get(tier).unwrap_or_default())
        }

        /// Cumulative amount ever tipped by `account`.
        #[ink(message)]
        pub fn total_tipped_by(&self, account: AccountId) -> Balance {
            self.total_tipped.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn get_royalty(&self) -> (AccountId, u128) {
            (self.royalty_receiver, self.royalty_fee_bps)
        }

        #[ink(message)]
        pub fn get_owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn is_paused(&self) -> bool {
            self.paused
        }

        // =====================================================================
        // ADMIN
        // =====================================================================

        /// Replace both tier boundaries.  Classification of later tips
        /// reflects the new pair immediately; existing tokens keep the tier
        /// they were minted with.
        #[ink(message)]
        pub fn set_tier_thresholds(
            &mut self,
            tier1_threshold: Balance,
            tier2_threshold: Balance,
        ) -> Result<(), Error> {
            self.only_owner()?;
            Self::validate_thresholds(tier1_threshold, tier2_threshold)?;
            self.tier1_threshold = tier1_threshold;
            self.tier2_threshold = tier2_threshold;
            self.env().emit_event(ThresholdsUpdated {
                tier1: tier1_threshold,
                tier2: tier2_threshold,
            });
            Ok(())
        }

        /// Replace a tier's metadata prefix.  The sentinel tier is not a
        /// real tier and is rejected.
        #[ink(message)]
        pub fn set_base_uri(&mut self, tier: Tier, uri: String) -> Result<(), Error> {
            self.only_owner()?;
            if tier == Tier::None {
                return Err(Error::InvalidTier);
            }
            self.base_uris.insert(tier, &uri);
            self.env().emit_event(BaseUriUpdated { tier, uri });
            Ok(())
        }

        /// Replace the contract-wide royalty terms.
        ///
        /// # Errors
        /// - [`Error::ZeroAddress`]    - receiver is the zero account.
        /// - [`Error::InvalidRoyalty`] - fee above the full denominator.
        #[ink(message)]
        pub fn set_royalty(&mut self, receiver: AccountId, fee_bps: u128) -> Result<(), Error> {
            self.only_owner()?;
            if receiver == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }
            if fee_bps > ROYALTY_DENOMINATOR {
                return Err(Error::InvalidRoyalty);
            }
            self.royalty_receiver = receiver;
            self.royalty_fee_bps = fee_bps;
            self.env().emit_event(RoyaltyUpdated { receiver, fee_bps });
            Ok(())
        }

        /// Send the contract's entire held balance to `to`.
        ///
        /// Reentry-guarded: a withdrawal triggered from inside another
        /// guarded call is rejected, not serialized.
        ///
        /// # Errors
        /// - [`Error::ReentrantCall`]  - nested guarded call.
        /// - [`Error::NotOwner`]       - caller is not the owner.
        /// - [`Error::ZeroAddress`]    - destination is the zero account.
        /// - [`Error::WithdrawFailed`] - nothing held, or the native
        ///   transfer did not succeed (balance left untouched).
        #[ink(message)]
        pub fn withdraw(&mut self, to: AccountId) -> Result<(), Error> {
            self.enter_guard()?;
            let outcome = self.withdraw_impl(to);
            self.exit_guard();
            outcome
        }

        fn withdraw_impl(&mut self, to: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            if to == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }
            let amount = self.env().balance();
            if amount == 0 {
                return Err(Error::WithdrawFailed);
            }
            self.env()
                .transfer(to, amount)
                .map_err(|_| Error::WithdrawFailed)?;
            self.env().emit_event(Withdrawal { to, amount });
            Ok(())
        }

        /// Halt tipping and transfers.  Rejects a redundant call.
        #[ink(message)]
        pub fn pause(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            if self.paused {
                return Err(Error::ContractPaused);
            }
            self.paused = true;
            self.env().emit_event(Paused {
                account: self.env().caller(),
            });
            Ok(())
        }

        /// Resume tipping and transfers.  Rejects a redundant call.
        #[ink(message)]
        pub fn unpause(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            if !self.paused {
                return Err(Error::NotPaused);
            }
            self.paused = false;
            self.env().emit_event(Unpaused {
                account: self.env().caller(),
            });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer_ownership(&mut self, new_owner: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            if new_owner == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }
            let previous_owner = self.owner;
            self.owner = new_owner;
            self.env().emit_event(OwnershipTransferred {
                previous_owner,
                new_owner,
            });
            Ok(())
        }

        /// Give up the owner capability permanently.  Every gated operation
        /// fails afterwards; tipping and queries are unaffected.
        #[ink(message)]
        pub fn renounce_ownership(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            let previous_owner = self.owner;
            self.owner = AccountId::from(ZERO_ADDRESS);
            self.env().emit_event(OwnershipTransferred {
                previous_owner,
                new_owner: AccountId::from(ZERO_ADDRESS),
            });
            Ok(())
        }

        // =====================================================================
        // INTERNAL HELPERS
        // =====================================================================

        fn validate_thresholds(tier1: Balance, tier2: Balance) -> Result<(), Error> {
            if tier1 == 0 || tier1 >= tier2 {
                return Err(Error::InvalidThresholds);
            }
            Ok(())
        }

        /// Record `to` as owner of `token_id` and index it for enumeration.
        fn mint_to(&mut self, to: AccountId, token_id: TokenId) -> Result<(), Error> {
            self.add_to_owner_enumeration(to, token_id)?;
            self.token_owner.insert(token_id, &to);
            self.env().emit_event(Transfer {
                from: None,
                to: Some(to),
                token_id,
            });
            Ok(())
        }

        fn transfer_token_from(
            &mut self,
            from: AccountId,
            to: AccountId,
            token_id: TokenId,
        ) -> Result<(), Error> {
            self.assert_not_paused()?;

            let caller = self.env().caller();
            let owner = self.token_owner.get(token_id).ok_or(Error::UnknownToken)?;
            if owner != from {
                return Err(Error::NotApproved);
            }
            if to == AccountId::from(ZERO_ADDRESS) {
                return Err(Error::ZeroAddress);
            }
            if !self.approved_or_owner(caller, token_id, owner) {
                return Err(Error::NotApproved);
            }

            self.token_approvals.remove(token_id);
            self.remove_from_owner_enumeration(from, token_id)?;
            self.add_to_owner_enumeration(to, token_id)?;
            self.token_owner.insert(token_id, &to);

            self.env().emit_event(Transfer {
                from: Some(from),
                to: Some(to),
                token_id,
            });
            Ok(())
        }

        fn approved_or_owner(
            &self,
            caller: AccountId,
            token_id: TokenId,
            owner: AccountId,
        ) -> bool {
            caller == owner
                || self.token_approvals.get(token_id) == Some(caller)
                || self.operator_approvals.contains((owner, caller))
        }

        /// Append `token_id` at the tail of `to`'s index.
        fn add_to_owner_enumeration(
            &mut self,
            to: AccountId,
            token_id: TokenId,
        ) -> Result<(), Error> {
            let index = self.owned_count.get(to).unwrap_or(0);
            self.owned_tokens.insert((to, index), &token_id);
            self.owned_token_index.insert(token_id, &index);
            let new_count = index.checked_add(1).ok_or(Error::Overflow)?;
            self.owned_count.insert(to, &new_count);
            Ok(())
        }

        /// Swap-and-pop `token_id` out of `from`'s index: the tail token
        /// takes the vacated slot so the list stays dense.
        fn remove_from_owner_enumeration(
            &mut self,
            from: AccountId,
            token_id: TokenId,
        ) -> Result<(), Error> {
            let count = self.owned_count.get(from).unwrap_or(0);
            let last_index = count.checked_sub(1).ok_or(Error::UnknownToken)?;
            let token_index = self
                .owned_token_index
                .get(token_id)
                .ok_or(Error::UnknownToken)?;

            if token_index != last_index {
                let last_token = self
                    .owned_tokens
                    .get((from, last_index))
                    .ok_or(Error::UnknownToken)?;
                self.owned_tokens.insert((from, token_index), &last_token);
                self.owned_token_index.insert(last_token, &token_index);
            }

            self.owned_tokens.remove((from, last_index));
            self.owned_token_index.remove(token_id);
            self.owned_count.insert(from, &last_index);
            Ok(())
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotOwner);
            }
            Ok(())
        }

        fn assert_not_paused(&self) -> Result<(), Error> {
            if self.paused {
                return Err(Error::ContractPaused);
            }
            Ok(())
        }

        /// Take the single-flight flag.  Held for the duration of the
        /// outermost guarded call; a nested guarded call fails here.
        fn enter_guard(&mut self) -> Result<(), Error> {
            if self.entered {
                return Err(Error::ReentrantCall);
            }
            self.entered = true;
            Ok(())
        }

        /// Release the flag on every exit path, success or failure.
        fn exit_guard(&mut self) {
            self.entered = false;
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
