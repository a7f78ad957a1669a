use common_proxies::proxy_amm;
use common_structs::ProtocolParameters;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait SwapsModule {
    /// Sells `amount` of collateral along the conversion path and returns
    /// the reserve asset received.
    ///
    /// No minimum output is enforced, the seizure has to go through at
    /// whatever the pool pays. A swap that pays nothing back counts as zero
    /// proceeds, any other token sent back is ignored.
    fn swap_collateral_for_reserve(
        &self,
        amount: &BigUint,
        parameters: &ProtocolParameters<Self::Api>,
    ) -> BigUint {
        if amount == &BigUint::zero() {
            return BigUint::zero();
        }

        let back_transfers = self
            .tx()
            .to(&parameters.amm_address)
            .typed(proxy_amm::AmmProxy)
            .swap_exact_tokens_for_tokens(BigUint::zero(), parameters.conversion_path.clone())
            .egld_or_single_esdt(&parameters.collateral_token, 0, amount)
            .returns(ReturnsBackTransfers)
            .sync_call();

        let mut received = BigUint::zero();
        for payment in back_transfers.payments.iter() {
            if payment.token_identifier == parameters.reserve_token {
                received += &payment.amount;
            }
        }

        received
    }
}
