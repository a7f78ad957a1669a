multiversx_sc::imports!();

use crate::{storage, validation};
use common_structs::ProtocolParameters;

/// Administrative setters for the protocol parameters.
///
/// Every setter is restricted to the admin set of
/// `multiversx_sc_modules::only_admin`, validates the whole resulting
/// configuration, stores it and emits `protocol_parameters_updated`. Changes
/// take effect for the next call, existing positions included.
#[multiversx_sc::module]
pub trait ConfigModule:
    storage::Storage
    + validation::ValidationModule
    + common_events::EventsModule
    + multiversx_sc_modules::only_admin::OnlyAdminModule
{
    /// Updates the liquidation fee split and the annual interest rate.
    ///
    /// # Arguments
    /// - `liquidation_fee_total_bps`: Share of liquidation proceeds taken as fee.
    /// - `liquidator_fee_share_bps`: Part of that fee paid to the liquidator.
    /// - `annual_interest_rate_bps`: Continuously compounded yearly rate.
    ///
    /// # Errors
    /// - `ERROR_INVALID_FEE`: If either fee value exceeds `BPS`.
    #[endpoint(setFeesAndRates)]
    fn set_fees_and_rates(
        &self,
        liquidation_fee_total_bps: BigUint,
        liquidator_fee_share_bps: BigUint,
        annual_interest_rate_bps: BigUint,
    ) {
        self.require_caller_is_admin();
        self.validate_fees(&liquidation_fee_total_bps, &liquidator_fee_share_bps);

        let mut parameters = self.protocol_parameters().get();
        parameters.liquidation_fee_total_bps = liquidation_fee_total_bps;
        parameters.liquidator_fee_share_bps = liquidator_fee_share_bps;
        parameters.annual_interest_rate_bps = annual_interest_rate_bps;

        self.save_protocol_parameters(&parameters);
    }

    /// # Errors
    /// - `ERROR_INVALID_THRESHOLDS`: Unless `0 < liquidation < borrow`.
    #[endpoint(setThresholds)]
    fn set_thresholds(&self, borrow_threshold_bps: BigUint, liquidation_threshold_bps: BigUint) {
        self.require_caller_is_admin();
        self.validate_thresholds(&borrow_threshold_bps, &liquidation_threshold_bps);

        let mut parameters = self.protocol_parameters().get();
        parameters.borrow_threshold_bps = borrow_threshold_bps;
        parameters.liquidation_threshold_bps = liquidation_threshold_bps;

        self.save_protocol_parameters(&parameters);
    }

    /// Replaces the three tokens and their decimals.
    ///
    /// When the stored conversion path no longer starts at the collateral
    /// token or no longer ends at the reserve token, it is reset to the
    /// direct pair `[collateral, reserve]`.
    ///
    /// # Errors
    /// - `ERROR_INVALID_TOKEN`: If a token is malformed or two tokens coincide.
    /// - `ERROR_INVALID_DECIMALS`: If a decimal count exceeds 18.
    #[endpoint(setTokenAddresses)]
    fn set_token_addresses(
        &self,
        collateral_token: EgldOrEsdtTokenIdentifier,
        stable_token: TokenIdentifier,
        stable_decimals: usize,
        reserve_token: EgldOrEsdtTokenIdentifier,
        reserve_decimals: usize,
    ) {
        self.require_caller_is_admin();
        self.validate_tokens(
            &collateral_token,
            &stable_token,
            stable_decimals,
            &reserve_token,
            reserve_decimals,
        );

        let mut parameters = self.protocol_parameters().get();
        let path = &parameters.conversion_path;
        let path_matches = !path.is_empty()
            && *path.get(0) == collateral_token
            && *path.get(path.len() - 1) == reserve_token;
        if !path_matches {
            let mut direct_path = ManagedVec::new();
            direct_path.push(collateral_token.clone());
            direct_path.push(reserve_token.clone());
            parameters.conversion_path = direct_path;
        }

        parameters.collateral_token = collateral_token;
        parameters.stable_token = stable_token;
        parameters.stable_decimals = stable_decimals;
        parameters.reserve_token = reserve_token;
        parameters.reserve_decimals = reserve_decimals;

        self.save_protocol_parameters(&parameters);
    }

    /// Points the oracle and the liquidation swaps at an AMM and a route.
    ///
    /// # Errors
    /// - `ERROR_INVALID_ADDRESS`: If `amm_address` is zero.
    /// - `ERROR_INVALID_CONVERSION_PATH`: If the path does not go from the
    ///   collateral token to the reserve token.
    #[endpoint(setOracleAddresses)]
    fn set_oracle_addresses(
        &self,
        amm_address: ManagedAddress,
        conversion_path: MultiValueEncoded<EgldOrEsdtTokenIdentifier>,
    ) {
        self.require_caller_is_admin();
        self.require_non_zero_address(&amm_address);

        let conversion_path = conversion_path.to_vec();
        let mut parameters = self.protocol_parameters().get();
        self.validate_conversion_path(
            &conversion_path,
            &parameters.collateral_token,
            &parameters.reserve_token,
        );

        parameters.amm_address = amm_address;
        parameters.conversion_path = conversion_path;

        self.save_protocol_parameters(&parameters);
    }

    #[endpoint(setTreasuryAddress)]
    fn set_treasury_address(&self, treasury_address: ManagedAddress) {
        self.require_caller_is_admin();
        self.require_non_zero_address(&treasury_address);

        let mut parameters = self.protocol_parameters().get();
        parameters.treasury_address = treasury_address;

        self.save_protocol_parameters(&parameters);
    }

    fn save_protocol_parameters(&self, parameters: &ProtocolParameters<Self::Api>) {
        self.protocol_parameters().set(parameters);
        self.protocol_parameters_updated_event(parameters);
    }
}
