use common_structs::{Position, ProtocolParameters};

use crate::{helpers, oracle, storage};

multiversx_sc::imports!();

/// Collateral ratios priced against a fresh oracle quote.
#[multiversx_sc::module]
pub trait CollateralRatioModule:
    storage::Storage
    + oracle::OracleModule
    + helpers::math::MathsModule
    + common_math::SharedMathModule
{
    /// `value(collateral) * BPS / total_owed`, with the position already accrued.
    fn current_ratio(
        &self,
        position: &Position<Self::Api>,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        self.forward_ratio(position, &position.total_owed(), parameters)
    }

    /// Same as `current_ratio` with `hypothetical_debt` in place of the
    /// amount owed.
    fn forward_ratio(
        &self,
        position: &Position<Self::Api>,
        hypothetical_debt: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        self.ratio_for_collateral(&position.collateral, hypothetical_debt, parameters)
    }

    /// Ratio of an arbitrary collateral amount against a debt. Skips the
    /// oracle entirely when there is no debt.
    fn ratio_for_collateral(
        &self,
        collateral: &BigUint,
        debt: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        if debt == &BigUint::zero() {
            return self.compute_collateral_ratio(&BigUint::zero(), debt);
        }

        let collateral_value = self.get_collateral_value(collateral, parameters);
        self.compute_collateral_ratio(&collateral_value, debt)
    }
}
