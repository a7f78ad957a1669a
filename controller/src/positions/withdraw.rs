use common_errors::{ERROR_BELOW_BORROW_THRESHOLD, ERROR_INSUFFICIENT_COLLATERAL, ERROR_NO_POSITION};

use crate::{cache::Cache, helpers, oracle, ratio, storage, validation};

use super::update;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionWithdrawModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + ratio::CollateralRatioModule
    + helpers::math::MathsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + update::PositionUpdateModule
{
    /// Returns collateral to the caller.
    ///
    /// Without debt the whole collateral can leave. With debt, the ratio of
    /// the remaining collateral against the total owed has to stay at or
    /// above the borrow threshold.
    ///
    /// # Errors
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: If `amount` is zero.
    /// - `ERROR_NO_POSITION`: If the caller holds no collateral.
    /// - `ERROR_INSUFFICIENT_COLLATERAL`: If `amount` exceeds the collateral.
    /// - `ERROR_BELOW_BORROW_THRESHOLD`: If the remaining collateral is too little.
    fn process_withdraw(&self, caller: &ManagedAddress, amount: &BigUint, cache: &Cache<Self>) {
        self.require_amount_greater_than_zero(amount);

        let parameters = &cache.parameters;
        let mut position = self.load_accrued_position(caller, cache);

        require!(position.has_collateral(), ERROR_NO_POSITION);
        require!(amount <= &position.collateral, ERROR_INSUFFICIENT_COLLATERAL);

        let remaining_collateral = &position.collateral - amount;
        if position.has_debt() {
            let ratio =
                self.ratio_for_collateral(&remaining_collateral, &position.total_owed(), parameters);
            require!(
                ratio >= parameters.borrow_threshold_bps,
                ERROR_BELOW_BORROW_THRESHOLD
            );
        }

        position.collateral = remaining_collateral;
        self.store_position(caller, &position);

        self.tx()
            .to(caller)
            .egld_or_single_esdt(&parameters.collateral_token, 0, amount)
            .transfer();

        self.withdraw_event(caller, amount);
    }
}
