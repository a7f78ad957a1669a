use common_constants::{BPS, INFINITE_COLLATERAL_RATIO};
use common_structs::LiquidationSettlement;

multiversx_sc::imports!();

/// # Collateral Ratio Calculator
///
/// Pure integer arithmetic over values already expressed in stable token
/// units. All ratios are scaled by `BPS` (20_000 = 200%).
///
/// - **Ratio**: `floor(collateral_value * BPS / total_owed)`, or
///   `INFINITE_COLLATERAL_RATIO` when nothing is owed.
/// - **Max debt**: `floor(collateral_value * BPS / threshold)`, the largest
///   debt whose ratio is still `>= threshold`.
#[multiversx_sc::module]
pub trait MathsModule: common_math::SharedMathModule {
    fn compute_collateral_ratio(&self, collateral_value: &BigUint, total_owed: &BigUint) -> BigUint {
        if total_owed == &BigUint::zero() {
            return BigUint::from(INFINITE_COLLATERAL_RATIO);
        }

        self.mul_div_down(collateral_value, &BigUint::from(BPS), total_owed)
    }

    fn compute_max_debt(&self, collateral_value: &BigUint, threshold_bps: &BigUint) -> BigUint {
        self.mul_div_down(collateral_value, &BigUint::from(BPS), threshold_bps)
    }

    /// Largest collateral amount that can leave the position while keeping
    /// the ratio at or above `threshold_bps`.
    ///
    /// Solves `value * (collateral - x) / collateral * BPS / owed >= threshold`
    /// for `x`, assuming the price is linear in the amount. The locked part is
    /// rounded up so the result never overstates what can be withdrawn.
    ///
    /// # Arguments
    /// - `collateral`: Collateral held, in collateral units.
    /// - `collateral_value`: Value of `collateral`, in stable units.
    /// - `total_owed`: Principal plus accrued interest.
    /// - `threshold_bps`: Ratio to preserve.
    ///
    /// # Returns
    /// - `BigUint`: Withdrawable collateral units.
    fn compute_withdrawable_collateral(
        &self,
        collateral: &BigUint,
        collateral_value: &BigUint,
        total_owed: &BigUint,
        threshold_bps: &BigUint,
    ) -> BigUint {
        if total_owed == &BigUint::zero() {
            return collateral.clone();
        }

        let required_value = self.mul_div_up(total_owed, threshold_bps, &BigUint::from(BPS));
        if collateral_value <= &required_value {
            return BigUint::zero();
        }

        let locked = self.mul_div_up(collateral, &required_value, collateral_value);
        collateral - &locked
    }

    /// Splits the proceeds of a liquidation sale.
    ///
    /// **Formula** (reserve units, each share floored):
    /// - `liquidator_fee = proceeds * fee_total * share / BPS / BPS`
    /// - `protocol_fee = proceeds * fee_total * (BPS - share) / BPS / BPS`
    /// - `net = proceeds - liquidator_fee - protocol_fee`
    /// - `debt_covered = min(net, debt)`, `shortfall = debt - debt_covered`,
    ///   `refund = net - debt_covered`
    ///
    /// # Arguments
    /// - `proceeds`: Reserve asset realized by selling the collateral.
    /// - `debt`: Total owed, already converted to reserve units.
    /// - `fee_total_bps`: Share of the proceeds taken as fee.
    /// - `liquidator_share_bps`: Share of the fee paid to the caller.
    fn compute_liquidation_settlement(
        &self,
        proceeds: &BigUint,
        debt: &BigUint,
        fee_total_bps: &BigUint,
        liquidator_share_bps: &BigUint,
    ) -> LiquidationSettlement<Self::Api> {
        let bps = BigUint::from(BPS);
        let bps_squared = &bps * &bps;
        let gross_fee = proceeds * fee_total_bps;

        let liquidator_fee = self.mul_div_down(&gross_fee, liquidator_share_bps, &bps_squared);
        let protocol_fee = self.mul_div_down(&gross_fee, &(&bps - liquidator_share_bps), &bps_squared);

        let net = proceeds - &liquidator_fee - &protocol_fee;
        let debt_covered = self.get_min(net.clone(), debt.clone());

        LiquidationSettlement {
            proceeds: proceeds.clone(),
            shortfall: debt - &debt_covered,
            refund: &net - &debt_covered,
            liquidator_fee,
            protocol_fee,
            debt_covered,
        }
    }
}
