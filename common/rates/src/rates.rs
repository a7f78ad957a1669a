#![no_std]
use common_constants::{BPS, MAX_TAYLOR_TERMS, RAY, SECONDS_PER_YEAR};
use common_structs::Position;

multiversx_sc::imports!();

/// Continuously compounded interest on a fixed annual rate.
///
/// All arithmetic is done at RAY precision and truncated toward zero, so the
/// computed growth factor is never above `e^x` and accrued interest can only
/// be under-stated by a few RAY units, never over-stated.
#[multiversx_sc::module]
pub trait InterestRates: common_math::SharedMathModule {
    /// Converts an annual rate in basis points and an elapsed time into the
    /// exponent `x = rate * elapsed / SECONDS_PER_YEAR` (RAY-based, floored).
    fn annual_rate_to_exponent(
        &self,
        annual_rate_bps: &BigUint,
        elapsed_seconds: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let numerator = annual_rate_bps * &BigUint::from(elapsed_seconds) * BigUint::from(RAY);
        let denominator = BigUint::from(BPS) * BigUint::from(SECONDS_PER_YEAR);

        self.to_decimal_ray(numerator / denominator)
    }

    /// Computes `e^x` for a RAY-based `x`, rounded down.
    ///
    /// **Algorithm**: scaling and squaring. `x` is halved `k` times until
    /// `x <= 1`, the Taylor series `1 + x + x^2/2! + ...` is summed with each
    /// term floored until a term becomes zero (at most `MAX_TAYLOR_TERMS`),
    /// and the partial sum is squared `k` times with floored products.
    ///
    /// **Error bound**: the series contributes at most `MAX_TAYLOR_TERMS + 2`
    /// RAY units of truncation; each squaring at most doubles the relative
    /// error, so the result lies in `[e^x * (1 - 2^k * 34 / RAY), e^x]`.
    ///
    /// # Arguments
    /// - `x`: Exponent (`ManagedDecimal`), RAY-based.
    ///
    /// # Returns
    /// - `ManagedDecimal<Self::Api, NumDecimals>`: `e^x`, RAY-based.
    fn exp_down(
        &self,
        x: &ManagedDecimal<Self::Api, NumDecimals>,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let one = BigUint::from(RAY);
        let mut reduced = x.into_raw_units().clone();

        if reduced == 0 {
            return self.ray();
        }

        let mut squarings = 0u32;
        while reduced > one {
            reduced = &reduced / 2u64;
            squarings += 1;
        }

        let mut sum = one.clone();
        let mut term = one.clone();
        for n in 1..=MAX_TAYLOR_TERMS {
            term = &term * &reduced / &one / n;
            if term == 0 {
                break;
            }
            sum += &term;
        }

        for _ in 0..squarings {
            sum = &sum * &sum / &one;
        }

        self.to_decimal_ray(sum)
    }

    /// Growth factor `e^(rate * elapsed / year)`, RAY-based. Zero elapsed
    /// time or a zero rate returns exactly `1`.
    fn calculate_compounded_interest(
        &self,
        annual_rate_bps: &BigUint,
        elapsed_seconds: u64,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        if elapsed_seconds == 0 || annual_rate_bps == &BigUint::zero() {
            return self.ray();
        }

        let x = self.annual_rate_to_exponent(annual_rate_bps, elapsed_seconds);
        self.exp_down(&x)
    }

    /// Interest owed on `principal` over `elapsed_seconds`:
    /// `floor(principal * (e^(rate * t) - 1))`.
    fn calculate_interest_delta(
        &self,
        principal: &BigUint,
        annual_rate_bps: &BigUint,
        elapsed_seconds: u64,
    ) -> BigUint {
        if principal == &BigUint::zero() {
            return BigUint::zero();
        }

        let factor = self.calculate_compounded_interest(annual_rate_bps, elapsed_seconds);
        let growth = factor.into_raw_units() - &BigUint::from(RAY);

        self.mul_div_down(principal, &growth, &BigUint::from(RAY))
    }

    /// Folds the interest for `[last_accrual_timestamp, now)` into the
    /// position and moves its clock to `now`.
    ///
    /// The clock never moves backwards; a `now` older than the stored
    /// timestamp accrues nothing.
    ///
    /// # Returns
    /// - `BigUint`: The interest added by this call.
    fn accrue_interest(
        &self,
        position: &mut Position<Self::Api>,
        annual_rate_bps: &BigUint,
        now: u64,
    ) -> BigUint {
        if now <= position.last_accrual_timestamp {
            return BigUint::zero();
        }

        let elapsed = now - position.last_accrual_timestamp;
        let delta = self.calculate_interest_delta(&position.principal, annual_rate_bps, elapsed);

        position.accrued_interest += &delta;
        position.last_accrual_timestamp = now;

        delta
    }
}
