use common_constants::BPS;
use common_structs::Position;

use crate::{cache::Cache, helpers, oracle, positions, ratio, storage};

multiversx_sc::imports!();

/// Read-only endpoints.
///
/// Position based views project interest up to the current block time
/// without writing it, so they show what the next mutating call would see.
#[multiversx_sc::module]
pub trait ViewsModule:
    storage::Storage
    + oracle::OracleModule
    + ratio::CollateralRatioModule
    + helpers::math::MathsModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + positions::update::PositionUpdateModule
{
    /// Stored record of `account`: collateral, principal, accrued interest
    /// and last accrual timestamp. Zeros for an unknown account.
    #[view(getPosition)]
    fn get_position(
        &self,
        account: ManagedAddress,
    ) -> MultiValue4<BigUint, BigUint, BigUint, u64> {
        let mapper = self.positions(&account);
        let position = if mapper.is_empty() {
            Position::new(0)
        } else {
            mapper.get()
        };

        (
            position.collateral,
            position.principal,
            position.accrued_interest,
            position.last_accrual_timestamp,
        )
            .into()
    }

    /// Ratio in BPS with interest projected to now. `u64::MAX` without debt.
    #[view(getCurrentCollateralRatio)]
    fn get_current_collateral_ratio(&self, account: ManagedAddress) -> BigUint {
        let cache = Cache::new(self);
        let (position, _) = self.project_position(&account, &cache);

        self.current_ratio(&position, &cache.parameters)
    }

    /// Ratio the current collateral would have against `hypothetical_debt`.
    #[view(getForwardCollateralRatio)]
    fn get_forward_collateral_ratio(
        &self,
        account: ManagedAddress,
        hypothetical_debt: BigUint,
    ) -> BigUint {
        let cache = Cache::new(self);
        let (position, _) = self.project_position(&account, &cache);

        self.forward_ratio(&position, &hypothetical_debt, &cache.parameters)
    }

    /// Interest that would be added if the position were accrued now.
    #[view(calcInterest)]
    fn calc_interest(&self, account: ManagedAddress) -> BigUint {
        let cache = Cache::new(self);
        let (_, interest_delta) = self.project_position(&account, &cache);

        interest_delta
    }

    /// Additional stable units `account` could borrow right now.
    #[view(getMaxBorrow)]
    fn get_max_borrow(&self, account: ManagedAddress) -> BigUint {
        let cache = Cache::new(self);
        let parameters = &cache.parameters;
        let (position, _) = self.project_position(&account, &cache);

        let collateral_value = self.get_collateral_value(&position.collateral, parameters);
        let max_debt = self.compute_max_debt(&collateral_value, &parameters.borrow_threshold_bps);
        let total_owed = position.total_owed();
        if max_debt <= total_owed {
            return BigUint::zero();
        }

        max_debt - total_owed
    }

    #[view(getWithdrawableCollateral)]
    fn get_withdrawable_collateral(&self, account: ManagedAddress) -> BigUint {
        let cache = Cache::new(self);
        let parameters = &cache.parameters;
        let (position, _) = self.project_position(&account, &cache);

        if !position.has_debt() {
            return position.collateral;
        }

        let collateral_value = self.get_collateral_value(&position.collateral, parameters);
        self.compute_withdrawable_collateral(
            &position.collateral,
            &collateral_value,
            &position.total_owed(),
            &parameters.borrow_threshold_bps,
        )
    }

    /// Oracle value of `amount` collateral, in stable units.
    #[view(getCollateralValue)]
    fn get_collateral_value_view(&self, amount: BigUint) -> BigUint {
        let parameters = self.protocol_parameters().get();
        self.get_collateral_value(&amount, &parameters)
    }

    /// Denominator of every ratio, rate and fee, in basis points.
    #[view(getScalingFactor)]
    fn get_scaling_factor(&self) -> BigUint {
        BigUint::from(BPS)
    }

    #[view(getInterestRate)]
    fn get_interest_rate(&self) -> BigUint {
        self.protocol_parameters().get().annual_interest_rate_bps
    }

    #[view(getBorrowThreshold)]
    fn get_borrow_threshold(&self) -> BigUint {
        self.protocol_parameters().get().borrow_threshold_bps
    }

    #[view(getLiquidationThreshold)]
    fn get_liquidation_threshold(&self) -> BigUint {
        self.protocol_parameters().get().liquidation_threshold_bps
    }

    #[view(getLiquidationFee)]
    fn get_liquidation_fee(&self) -> BigUint {
        self.protocol_parameters().get().liquidation_fee_total_bps
    }

    #[view(getLiquidatorFeeShare)]
    fn get_liquidator_fee_share(&self) -> BigUint {
        self.protocol_parameters().get().liquidator_fee_share_bps
    }

    #[view(getConversionPath)]
    fn get_conversion_path(&self) -> MultiValueEncoded<EgldOrEsdtTokenIdentifier> {
        self.protocol_parameters().get().conversion_path.into()
    }
}
