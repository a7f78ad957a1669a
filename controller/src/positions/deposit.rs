use crate::{cache::Cache, storage};

use super::update;

multiversx_sc::imports!();

#[multiversx_sc::module]
pub trait PositionDepositModule:
    storage::Storage
    + common_events::EventsModule
    + common_math::SharedMathModule
    + common_rates::InterestRates
    + update::PositionUpdateModule
{
    /// Adds collateral already received in the call payment.
    ///
    /// Deposits only increase safety, so no ratio check happens. The
    /// position is created on the first deposit.
    ///
    /// # Arguments
    /// - `caller`: Depositing account.
    /// - `amount`: Collateral units received.
    /// - `cache`: Call snapshot.
    fn process_deposit(&self, caller: &ManagedAddress, amount: &BigUint, cache: &Cache<Self>) {
        let mut position = self.load_accrued_position(caller, cache);

        position.collateral += amount;

        self.store_position(caller, &position);
        self.deposit_event(caller, amount);
    }
}
