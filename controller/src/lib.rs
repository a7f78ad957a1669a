#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

pub mod cache;
pub mod config;
pub mod helpers;
pub mod oracle;
pub mod positions;
pub mod ratio;
pub mod reserve;
pub mod storage;
pub mod validation;
pub mod views;

use cache::Cache;
pub use common_errors::*;
pub use common_proxies::*;
pub use common_structs::*;

#[multiversx_sc::contract]
pub trait Controller:
    positions::deposit::PositionDepositModule
    + positions::borrow::PositionBorrowModule
    + positions::withdraw::PositionWithdrawModule
    + positions::repay::PositionRepayModule
    + positions::liquidation::PositionLiquidationModule
    + positions::update::PositionUpdateModule
    + reserve::ReserveModule
    + config::ConfigModule
    + common_events::EventsModule
    + storage::Storage
    + oracle::OracleModule
    + ratio::CollateralRatioModule
    + validation::ValidationModule
    + views::ViewsModule
    + helpers::math::MathsModule
    + helpers::swaps::SwapsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + multiversx_sc_modules::only_admin::OnlyAdminModule
{
    /// Initializes the engine with its full configuration.
    ///
    /// The deployer becomes the first admin. The contract needs the local
    /// mint and burn roles of `stable_token` before borrowing can work.
    ///
    /// # Arguments
    /// - `parameters`: Rates, thresholds, fees, tokens, AMM wiring and treasury.
    #[init]
    fn init(&self, parameters: ProtocolParameters<Self::Api>) {
        self.validate_protocol_parameters(&parameters);
        self.protocol_parameters().set(&parameters);

        let caller = self.blockchain().get_caller();
        self.admins().insert(caller);

        self.protocol_parameters_updated_event(&parameters);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Deposits collateral. Creates the position on first use.
    ///
    /// # Payment
    /// - The collateral token, amount greater than zero.
    #[payable]
    #[endpoint(deposit)]
    fn deposit(&self) {
        let cache = Cache::new(self);
        let (token_id, amount) = self.call_value().egld_or_single_fungible_esdt();
        self.validate_payment(&token_id, &amount, &cache.parameters.collateral_token);

        let caller = self.blockchain().get_caller();
        self.process_deposit(&caller, &amount, &cache);
    }

    /// Borrows `amount` of the stable token against the caller's collateral.
    #[endpoint(borrow)]
    fn borrow(&self, amount: BigUint) {
        let cache = Cache::new(self);
        let caller = self.blockchain().get_caller();

        self.process_borrow(&caller, &amount, &cache);
    }

    /// Withdraws `amount` of collateral, subject to the borrow threshold
    /// while debt is outstanding.
    #[endpoint(withdraw)]
    fn withdraw(&self, amount: BigUint) {
        let cache = Cache::new(self);
        let caller = self.blockchain().get_caller();

        self.process_withdraw(&caller, &amount, &cache);
    }

    /// Repays debt with the stable token, accrued interest first.
    ///
    /// # Payment
    /// - The stable token. Any amount above the total owed is returned.
    ///
    /// # Returns
    /// - `BigUint`: Amount applied to the debt.
    #[payable]
    #[endpoint(repay)]
    fn repay(&self) -> BigUint {
        let cache = Cache::new(self);
        let (token_id, amount) = self.call_value().egld_or_single_fungible_esdt();
        require!(cache.is_stable_token(&token_id), ERROR_INVALID_PAYMENT_TOKEN);
        self.require_amount_greater_than_zero(&amount);

        let caller = self.blockchain().get_caller();
        self.process_repay(&caller, &amount, &cache)
    }

    /// Liquidates `account` when its ratio is below the liquidation
    /// threshold. Open to every caller, the position owner included.
    ///
    /// # Returns
    /// - `LiquidationSettlement`: How the sale proceeds were split.
    #[endpoint(liquidate)]
    fn liquidate(&self, account: ManagedAddress) -> LiquidationSettlement<Self::Api> {
        let cache = Cache::new(self);
        let caller = self.blockchain().get_caller();

        self.process_liquidation(&caller, &account, &cache)
    }

    /// Swaps the reserve asset for newly minted stable tokens at 1:1.
    ///
    /// # Payment
    /// - The reserve token, amount greater than zero.
    #[payable]
    #[endpoint(swapReserveForStable)]
    fn swap_reserve_for_stable(&self) -> BigUint {
        let cache = Cache::new(self);
        let (token_id, amount) = self.call_value().egld_or_single_fungible_esdt();
        self.validate_payment(&token_id, &amount, &cache.parameters.reserve_token);

        let caller = self.blockchain().get_caller();
        self.process_reserve_swap(&caller, &amount, &cache)
    }

    /// Withdraws the liquidation surplus credited to the caller.
    #[endpoint(claimRefund)]
    fn claim_refund(&self) -> BigUint {
        let cache = Cache::new(self);
        let caller = self.blockchain().get_caller();

        self.process_refund_claim(&caller, &cache)
    }
}
