multiversx_sc::imports!();

use common_constants::{BPS, MAX_TOKEN_DECIMALS, MIN_CONVERSION_PATH_LEN};
use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_INVALID_ADDRESS, ERROR_INVALID_CONVERSION_PATH,
    ERROR_INVALID_DECIMALS, ERROR_INVALID_FEE, ERROR_INVALID_PAYMENT_TOKEN,
    ERROR_INVALID_THRESHOLDS, ERROR_INVALID_TOKEN,
};
use common_structs::ProtocolParameters;

use crate::storage;

#[multiversx_sc::module]
pub trait ValidationModule: storage::Storage {
    /// Validates the single fungible payment attached to a call.
    ///
    /// # Arguments
    /// - `token_id`: Token received.
    /// - `amount`: Amount received.
    /// - `expected_token`: Token the endpoint accepts.
    ///
    /// # Errors
    /// - `ERROR_INVALID_PAYMENT_TOKEN`: If another token was sent.
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: If the amount is zero.
    fn validate_payment(
        &self,
        token_id: &EgldOrEsdtTokenIdentifier,
        amount: &BigUint,
        expected_token: &EgldOrEsdtTokenIdentifier,
    ) {
        require!(token_id == expected_token, ERROR_INVALID_PAYMENT_TOKEN);
        self.require_amount_greater_than_zero(amount);
    }

    /// Ensures an amount is greater than zero.
    ///
    /// # Errors
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: If the amount is zero.
    fn require_amount_greater_than_zero(&self, amount: &BigUint) {
        require!(
            amount > &BigUint::zero(),
            ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO
        );
    }

    /// Requires `0 < liquidation_threshold < borrow_threshold`.
    fn validate_thresholds(&self, borrow_threshold_bps: &BigUint, liquidation_threshold_bps: &BigUint) {
        require!(
            liquidation_threshold_bps > &BigUint::zero(),
            ERROR_INVALID_THRESHOLDS
        );
        require!(
            liquidation_threshold_bps < borrow_threshold_bps,
            ERROR_INVALID_THRESHOLDS
        );
    }

    fn validate_fees(&self, liquidation_fee_total_bps: &BigUint, liquidator_fee_share_bps: &BigUint) {
        let bps = BigUint::from(BPS);
        require!(liquidation_fee_total_bps <= &bps, ERROR_INVALID_FEE);
        require!(liquidator_fee_share_bps <= &bps, ERROR_INVALID_FEE);
    }

    fn validate_tokens(
        &self,
        collateral_token: &EgldOrEsdtTokenIdentifier,
        stable_token: &TokenIdentifier,
        stable_decimals: usize,
        reserve_token: &EgldOrEsdtTokenIdentifier,
        reserve_decimals: usize,
    ) {
        require!(collateral_token.is_valid(), ERROR_INVALID_TOKEN);
        require!(reserve_token.is_valid(), ERROR_INVALID_TOKEN);
        require!(stable_token.is_valid_esdt_identifier(), ERROR_INVALID_TOKEN);

        let stable = EgldOrEsdtTokenIdentifier::esdt(stable_token.clone());
        require!(collateral_token != &stable, ERROR_INVALID_TOKEN);
        require!(reserve_token != &stable, ERROR_INVALID_TOKEN);
        require!(collateral_token != reserve_token, ERROR_INVALID_TOKEN);

        require!(stable_decimals <= MAX_TOKEN_DECIMALS, ERROR_INVALID_DECIMALS);
        require!(reserve_decimals <= MAX_TOKEN_DECIMALS, ERROR_INVALID_DECIMALS);
    }

    /// The path has to start at the collateral token and end at the
    /// reserve token, with any number of intermediate hops.
    fn validate_conversion_path(
        &self,
        conversion_path: &ManagedVec<EgldOrEsdtTokenIdentifier>,
        collateral_token: &EgldOrEsdtTokenIdentifier,
        reserve_token: &EgldOrEsdtTokenIdentifier,
    ) {
        let len = conversion_path.len();
        require!(len >= MIN_CONVERSION_PATH_LEN, ERROR_INVALID_CONVERSION_PATH);
        require!(
            *conversion_path.get(0) == *collateral_token,
            ERROR_INVALID_CONVERSION_PATH
        );
        require!(
            *conversion_path.get(len - 1) == *reserve_token,
            ERROR_INVALID_CONVERSION_PATH
        );
    }

    fn require_non_zero_address(&self, address: &ManagedAddress) {
        require!(!address.is_zero(), ERROR_INVALID_ADDRESS);
    }

    fn validate_protocol_parameters(&self, parameters: &ProtocolParameters<Self::Api>) {
        self.validate_thresholds(
            &parameters.borrow_threshold_bps,
            &parameters.liquidation_threshold_bps,
        );
        self.validate_fees(
            &parameters.liquidation_fee_total_bps,
            &parameters.liquidator_fee_share_bps,
        );
        self.validate_tokens(
            &parameters.collateral_token,
            &parameters.stable_token,
            parameters.stable_decimals,
            &parameters.reserve_token,
            parameters.reserve_decimals,
        );
        self.validate_conversion_path(
            &parameters.conversion_path,
            &parameters.collateral_token,
            &parameters.reserve_token,
        );
        self.require_non_zero_address(&parameters.amm_address);
        self.require_non_zero_address(&parameters.treasury_address);
    }
}
