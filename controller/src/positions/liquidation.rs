use common_errors::{ERROR_NOT_LIQUIDATABLE, ERROR_NO_POSITION};
use common_structs::LiquidationSettlement;

use crate::{cache::Cache, helpers, oracle, ratio, storage, validation};

use super::update;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionLiquidationModule:
    storage::Storage
    + validation::ValidationModule
    + oracle::OracleModule
    + ratio::CollateralRatioModule
    + helpers::math::MathsModule
    + helpers::swaps::SwapsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + update::PositionUpdateModule
{
    /// Seizes and sells the whole collateral of `account` once its ratio is
    /// below the liquidation threshold.
    ///
    /// **Flow**:
    /// 1. Accrue interest and require collateral.
    /// 2. Require `current_ratio < liquidation_threshold`.
    /// 3. Sell all collateral through the AMM for the reserve asset.
    /// 4. Pay the liquidator fee to `liquidator` and the protocol fee to the
    ///    treasury, keep the part covering the debt as reserves, credit any
    ///    surplus to the borrower's refundable balance.
    /// 5. Zero the position. A shortfall is absorbed, no debt is carried.
    ///
    /// Anyone may call this, the owner of the position included.
    ///
    /// # Errors
    /// - `ERROR_NO_POSITION`: If `account` holds no collateral.
    /// - `ERROR_NOT_LIQUIDATABLE`: If the ratio is at or above the threshold.
    fn process_liquidation(
        &self,
        liquidator: &ManagedAddress,
        account: &ManagedAddress,
        cache: &Cache<Self>,
    ) -> LiquidationSettlement<Self::Api> {
        let parameters = &cache.parameters;
        let mut position = self.load_accrued_position(account, cache);

        require!(position.has_collateral(), ERROR_NO_POSITION);

        let current_ratio = self.current_ratio(&position, parameters);
        require!(
            current_ratio < parameters.liquidation_threshold_bps,
            ERROR_NOT_LIQUIDATABLE
        );

        let total_owed = position.total_owed();
        let proceeds = self.swap_collateral_for_reserve(&position.collateral, parameters);
        let debt_in_reserve = self.stable_to_reserve_up(&total_owed, parameters);
        let settlement = self.compute_liquidation_settlement(
            &proceeds,
            &debt_in_reserve,
            &parameters.liquidation_fee_total_bps,
            &parameters.liquidator_fee_share_bps,
        );

        position.clear();
        self.store_position(account, &position);

        self.reserves()
            .update(|reserves| *reserves += &settlement.debt_covered);
        if settlement.refund > 0 {
            self.refundable_balance(account)
                .update(|balance| *balance += &settlement.refund);
        }

        self.tx()
            .to(liquidator)
            .egld_or_single_esdt(&parameters.reserve_token, 0, &settlement.liquidator_fee)
            .transfer_if_not_empty();
        self.tx()
            .to(&parameters.treasury_address)
            .egld_or_single_esdt(&parameters.reserve_token, 0, &settlement.protocol_fee)
            .transfer_if_not_empty();

        self.liquidation_event(
            account,
            liquidator,
            &settlement.proceeds,
            &settlement.fee_paid(),
            &settlement.refund,
        );

        settlement
    }
}
