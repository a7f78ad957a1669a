#![no_std]

use common_errors::{
    ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_INVALID_CONVERSION_PATH,
    ERROR_SWAP_OUTPUT_TOO_LOW, ERROR_UNKNOWN_PAIR,
};

multiversx_sc::imports!();

/// Constant rate AMM used to stand in for the real pool router.
///
/// Every hop of a path converts with a fixed `numerator / denominator`
/// rate set by the owner, rounded down, so quotes and swaps are exact and
/// reproducible inside scenario tests.
#[multiversx_sc::contract]
pub trait AmmMock {
    #[init]
    fn init(&self) {}

    #[upgrade]
    fn upgrade(&self) {}

    #[only_owner]
    #[endpoint(setRate)]
    fn set_rate(
        &self,
        token_in: EgldOrEsdtTokenIdentifier,
        token_out: EgldOrEsdtTokenIdentifier,
        numerator: BigUint,
        denominator: BigUint,
    ) {
        require!(denominator > 0, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO);
        self.rates(&token_in, &token_out)
            .set((numerator, denominator));
    }

    /// Quotes `amount_in` of `path[0]` in units of the last token of the path.
    #[view(getAmountOut)]
    fn get_amount_out(
        &self,
        amount_in: BigUint,
        path: ManagedVec<EgldOrEsdtTokenIdentifier>,
    ) -> BigUint {
        require!(path.len() >= 2, ERROR_INVALID_CONVERSION_PATH);

        let mut amount = amount_in;
        for hop in 0..path.len() - 1 {
            let from = path.get(hop);
            let to = path.get(hop + 1);
            let mapper = self.rates(&from, &to);
            require!(!mapper.is_empty(), ERROR_UNKNOWN_PAIR);

            let (numerator, denominator) = mapper.get();
            amount = amount * numerator / denominator;
        }

        amount
    }

    #[payable]
    #[endpoint(swapExactTokensForTokens)]
    fn swap_exact_tokens_for_tokens(
        &self,
        amount_out_min: BigUint,
        path: ManagedVec<EgldOrEsdtTokenIdentifier>,
    ) -> EgldOrEsdtTokenPayment {
        let (token_in, amount_in) = self.call_value().egld_or_single_fungible_esdt();
        require!(path.len() >= 2, ERROR_INVALID_CONVERSION_PATH);
        require!(*path.get(0) == token_in, ERROR_INVALID_CONVERSION_PATH);

        let token_out = path.get(path.len() - 1).clone_value();
        let amount_out = self.get_amount_out(amount_in, path);
        require!(amount_out >= amount_out_min, ERROR_SWAP_OUTPUT_TOO_LOW);

        let caller = self.blockchain().get_caller();
        let payment = EgldOrEsdtTokenPayment::new(token_out, 0, amount_out);
        self.tx()
            .to(&caller)
            .payment(payment.clone())
            .transfer_if_not_empty();

        payment
    }

    #[storage_mapper("rates")]
    fn rates(
        &self,
        token_in: &EgldOrEsdtTokenIdentifier,
        token_out: &EgldOrEsdtTokenIdentifier,
    ) -> SingleValueMapper<(BigUint, BigUint)>;
}
