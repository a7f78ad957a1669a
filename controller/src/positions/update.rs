use common_structs::Position;

use crate::{cache::Cache, storage};

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionUpdateModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
{
    /// Returns the position of `account` as it would look after accruing
    /// interest up to the cached block time. Nothing is written.
    fn project_position(
        &self,
        account: &ManagedAddress,
        cache: &Cache<Self>,
    ) -> (Position<Self::Api>, BigUint) {
        let mut position = cache.get_position(account);
        let interest_delta = self.accrue_interest(
            &mut position,
            &cache.parameters.annual_interest_rate_bps,
            cache.current_timestamp,
        );

        (position, interest_delta)
    }

    /// First step of every mutating entry point: load and accrue.
    ///
    /// The accrued position is only persisted by `store_position`, so a call
    /// that fails afterwards leaves no partial accrual behind.
    fn load_accrued_position(
        &self,
        account: &ManagedAddress,
        cache: &Cache<Self>,
    ) -> Position<Self::Api> {
        let (position, interest_delta) = self.project_position(account, cache);

        if interest_delta > 0 {
            self.interest_accrued_event(account, &interest_delta, cache.current_timestamp);
        }

        position
    }

    fn store_position(&self, account: &ManagedAddress, position: &Position<Self::Api>) {
        self.positions(account).set(position);
        self.accounts().insert(account.clone());
    }
}
