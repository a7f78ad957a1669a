use common_proxies::proxy_amm;
use common_structs::ProtocolParameters;

use crate::storage;

multiversx_sc::imports!();

/// Price Oracle Adapter.
///
/// Values collateral by asking the AMM for a spot quote along the configured
/// conversion path. Nothing is cached: every call reads the current pool
/// state, so results are only authoritative for the call that requested them.
#[multiversx_sc::module]
pub trait OracleModule: storage::Storage + common_math::SharedMathModule {
    /// Quotes `amount` of collateral in reserve asset units.
    fn quote_collateral_in_reserve(
        &self,
        amount: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        if amount == &BigUint::zero() {
            return BigUint::zero();
        }

        self.tx()
            .to(&parameters.amm_address)
            .typed(proxy_amm::AmmProxy)
            .get_amount_out(amount, parameters.conversion_path.clone())
            .returns(ReturnsResult)
            .sync_call_readonly()
    }

    /// Value of `amount` collateral in stable token units, rounded down.
    fn get_collateral_value(
        &self,
        amount: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        let reserve_amount = self.quote_collateral_in_reserve(amount, parameters);
        self.reserve_to_stable(&reserve_amount, parameters)
    }

    /// Converts reserve units to stable units at 1:1, rounded down.
    fn reserve_to_stable(
        &self,
        amount: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        let reserve = self.to_decimal(amount.clone(), parameters.reserve_decimals);
        self.rescale_down(&reserve, parameters.stable_decimals)
            .into_raw_units()
            .clone()
    }

    /// Converts stable units to reserve units at 1:1, rounded up.
    fn stable_to_reserve_up(
        &self,
        amount: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        let stable = self.to_decimal(amount.clone(), parameters.stable_decimals);
        self.rescale_up(&stable, parameters.reserve_decimals)
            .into_raw_units()
            .clone()
    }
}
