use common_structs::{Position, ProtocolParameters};

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait Storage {
    /// Get the protocol parameters
    /// This storage mapper holds the whole configuration: rates, thresholds, fees, tokens and the AMM wiring.
    #[view(getProtocolParameters)]
    #[storage_mapper("protocol_parameters")]
    fn protocol_parameters(&self) -> SingleValueMapper<ProtocolParameters<Self::Api>>;

    /// Get the position of an account
    /// This storage mapper holds the collateral, principal, accrued interest and last accrual time of one account.
    #[storage_mapper("positions")]
    fn positions(&self, account: &ManagedAddress) -> SingleValueMapper<Position<Self::Api>>;

    /// Get the accounts
    /// This storage mapper holds every account that ever opened a position.
    #[view(getAccounts)]
    #[storage_mapper("accounts")]
    fn accounts(&self) -> UnorderedSetMapper<ManagedAddress>;

    /// Get the reserves
    /// Reserve asset held by the protocol as backing of the stable token, fed by reserve swaps and liquidations.
    #[view(getReserves)]
    #[storage_mapper("reserves")]
    fn reserves(&self) -> SingleValueMapper<BigUint>;

    /// Get the refundable balance of an account
    /// Liquidation surplus, in reserve asset, that the borrower can claim.
    #[view(getRefundableBalance)]
    #[storage_mapper("refundable_balance")]
    fn refundable_balance(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;
}
