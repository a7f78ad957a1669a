use crate::{cache::Cache, storage, validation};

use super::update;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionRepayModule:
    storage::Storage
    + validation::ValidationModule
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + update::PositionUpdateModule
{
    /// Applies a stable token payment to the caller's debt, interest first.
    ///
    /// Only what is owed is kept and burned. Anything above that is sent
    /// back in the same transaction.
    ///
    /// # Arguments
    /// - `caller`: Repaying account.
    /// - `payment_amount`: Stable units received with the call.
    /// - `cache`: Call snapshot.
    ///
    /// # Returns
    /// - `BigUint`: Amount collected toward the debt.
    fn process_repay(
        &self,
        caller: &ManagedAddress,
        payment_amount: &BigUint,
        cache: &Cache<Self>,
    ) -> BigUint {
        let parameters = &cache.parameters;
        let mut position = self.load_accrued_position(caller, cache);

        let interest_paid = self.get_min(payment_amount.clone(), position.accrued_interest.clone());
        let principal_paid = self.get_min(payment_amount - &interest_paid, position.principal.clone());
        let collected = &interest_paid + &principal_paid;
        let excess = payment_amount - &collected;

        position.accrued_interest -= &interest_paid;
        position.principal -= &principal_paid;
        // Repaying never opens a position
        if !self.positions(caller).is_empty() {
            self.store_position(caller, &position);
        }

        if collected > 0 {
            self.send()
                .esdt_local_burn(&parameters.stable_token, 0, &collected);
        }

        self.tx()
            .to(caller)
            .single_esdt(&parameters.stable_token, 0, &excess)
            .transfer_if_not_empty();

        self.repay_event(
            caller,
            &collected,
            &position.total_owed(),
            &position.collateral,
        );

        collected
    }
}
