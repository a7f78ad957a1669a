#![no_std]

use core::cmp::Ordering;

use common_constants::{RAY, RAY_PRECISION};

multiversx_sc::imports!();

/// Fixed point helpers shared by the engine and the interest crate.
///
/// Every operation here rounds toward zero unless its name says otherwise;
/// amounts owed to the protocol are rounded up explicitly by the caller.
#[multiversx_sc::module]
pub trait SharedMathModule {
    /// `floor(a * b / denominator)` on raw integers.
    fn mul_div_down(&self, a: &BigUint, b: &BigUint, denominator: &BigUint) -> BigUint {
        (a * b) / denominator
    }

    /// `ceil(a * b / denominator)` on raw integers.
    fn mul_div_up(&self, a: &BigUint, b: &BigUint, denominator: &BigUint) -> BigUint {
        let product = a * b;
        let quotient = &product / denominator;
        if &quotient * denominator == product {
            quotient
        } else {
            quotient + 1u64
        }
    }

    /// Moves `value` to `new_precision`, dropping the discarded digits.
    fn rescale_down(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        new_precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let old_precision = value.scale();

        match new_precision.cmp(&old_precision) {
            Ordering::Equal => value.clone(),
            Ordering::Less => {
                let factor = BigUint::from(10u64).pow((old_precision - new_precision) as u32);
                ManagedDecimal::from_raw_units(value.into_raw_units() / &factor, new_precision)
            },
            Ordering::Greater => value.rescale(new_precision),
        }
    }

    /// Moves `value` to `new_precision`, bumping the last digit when any
    /// discarded digit is non zero.
    fn rescale_up(
        &self,
        value: &ManagedDecimal<Self::Api, NumDecimals>,
        new_precision: NumDecimals,
    ) -> ManagedDecimal<Self::Api, NumDecimals> {
        let old_precision = value.scale();

        match new_precision.cmp(&old_precision) {
            Ordering::Equal => value.clone(),
            Ordering::Less => {
                let factor = BigUint::from(10u64).pow((old_precision - new_precision) as u32);
                let raw_value = value.into_raw_units();
                let mut downscaled = raw_value / &factor;
                if &downscaled * &factor != *raw_value {
                    downscaled += 1u64;
                }
                ManagedDecimal::from_raw_units(downscaled, new_precision)
            },
            Ordering::Greater => value.rescale(new_precision),
        }
    }

    fn to_decimal(
        self,
        value: BigUint,
        precision: NumDecimals,
    ) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        ManagedDecimal::from_raw_units(value, precision)
    }

    fn to_decimal_ray(self, value: BigUint) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(value, RAY_PRECISION)
    }

    fn ray(self) -> ManagedDecimal<<Self as ContractBase>::Api, usize> {
        self.to_decimal(BigUint::from(RAY), RAY_PRECISION)
    }

    fn get_min(self, a: BigUint, b: BigUint) -> BigUint {
        if a < b {
            a
        } else {
            b
        }
    }
}
