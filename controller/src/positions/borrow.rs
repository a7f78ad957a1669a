use common_errors::ERROR_BELOW_BORROW_THRESHOLD;

use crate::{cache::Cache, helpers, oracle, ratio, storage, validation};

use super::update;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionBorrowModule:
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
    /// Mints `amount` of the stable token to the caller against its collateral.
    ///
    /// The forward ratio with the new debt must stay at or above the borrow
    /// threshold; borrowing exactly up to the threshold is allowed.
    ///
    /// # Arguments
    /// - `caller`: Borrowing account.
    /// - `amount`: Stable units to borrow.
    /// - `cache`: Call snapshot.
    ///
    /// # Errors
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: If `amount` is zero.
    /// - `ERROR_BELOW_BORROW_THRESHOLD`: If the new debt would breach the threshold.
    fn process_borrow(&self, caller: &ManagedAddress, amount: &BigUint, cache: &Cache<Self>) {
        self.require_amount_greater_than_zero(amount);

        let parameters = &cache.parameters;
        let mut position = self.load_accrued_position(caller, cache);

        let new_total_owed = position.total_owed() + amount;
        let forward_ratio = self.forward_ratio(&position, &new_total_owed, parameters);
        require!(
            forward_ratio >= parameters.borrow_threshold_bps,
            ERROR_BELOW_BORROW_THRESHOLD
        );

        position.principal += amount;
        self.store_position(caller, &position);

        self.send()
            .esdt_local_mint(&parameters.stable_token, 0, amount);
        self.tx()
            .to(caller)
            .single_esdt(&parameters.stable_token, 0, amount)
            .transfer();

        self.borrow_event(caller, amount, &position.principal, &position.collateral);
    }
}
