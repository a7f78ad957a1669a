use common_errors::{ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO, ERROR_NOTHING_TO_CLAIM};

use crate::{cache::Cache, oracle, storage};

multiversx_sc::imports!();

/// Reserve side of the stable token.
///
/// The reserve asset enters either by swapping it for newly minted stable
/// tokens or by covering debt during liquidations. Surpluses left over from a
/// liquidation wait in the borrower's refundable balance until claimed.
#[multiversx_sc::module]
pub trait ReserveModule:
    storage::Storage
    + oracle::OracleModule
    + common_events::EventsModule
    + common_math::SharedMathModule
{
    /// Mints stable tokens 1:1 for the reserve asset received, rescaled
    /// between the two decimal counts and rounded down.
    ///
    /// # Errors
    /// - `ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO`: If the rescaled amount is zero.
    fn process_reserve_swap(
        &self,
        caller: &ManagedAddress,
        reserve_amount: &BigUint,
        cache: &Cache<Self>,
    ) -> BigUint {
        let parameters = &cache.parameters;
        let stable_amount = self.reserve_to_stable(reserve_amount, parameters);
        require!(stable_amount > 0, ERROR_AMOUNT_MUST_BE_GREATER_THAN_ZERO);

        self.reserves().update(|reserves| *reserves += reserve_amount);

        self.send()
            .esdt_local_mint(&parameters.stable_token, 0, &stable_amount);
        self.tx()
            .to(caller)
            .single_esdt(&parameters.stable_token, 0, &stable_amount)
            .transfer();

        self.reserve_swap_event(caller, reserve_amount, &stable_amount);

        stable_amount
    }

    /// Pays out the whole refundable balance of `caller` in the reserve asset.
    ///
    /// # Errors
    /// - `ERROR_NOTHING_TO_CLAIM`: If the balance is zero.
    fn process_refund_claim(&self, caller: &ManagedAddress, cache: &Cache<Self>) -> BigUint {
        let amount = self.refundable_balance(caller).take();
        require!(amount > 0, ERROR_NOTHING_TO_CLAIM);

        self.tx()
            .to(caller)
            .egld_or_single_esdt(&cache.parameters.reserve_token, 0, &amount)
            .transfer();

        self.refund_claimed_event(caller, &amount);

        amount
    }
}
