#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();
pub use common_structs::*;

#[multiversx_sc::module]
pub trait EventsModule {
    #[event("deposit")]
    fn deposit_event(&self, #[indexed] account: &ManagedAddress, #[indexed] amount: &BigUint);

    #[event("borrow")]
    fn borrow_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] amount: &BigUint,
        #[indexed] new_principal: &BigUint,
        #[indexed] collateral: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(&self, #[indexed] account: &ManagedAddress, #[indexed] amount: &BigUint);

    // remaining_debt is principal plus the interest still owed after the repayment
    #[event("repay")]
    fn repay_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] amount_collected: &BigUint,
        #[indexed] remaining_debt: &BigUint,
        #[indexed] collateral: &BigUint,
    );

    #[event("liquidation")]
    fn liquidation_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] liquidator: &ManagedAddress,
        #[indexed] proceeds: &BigUint,
        #[indexed] fee_paid: &BigUint,
        #[indexed] refund: &BigUint,
    );

    #[event("interest_accrued")]
    fn interest_accrued_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] interest_delta: &BigUint,
        #[indexed] timestamp: u64,
    );

    #[event("protocol_parameters_updated")]
    fn protocol_parameters_updated_event(
        &self,
        #[indexed] parameters: &ProtocolParameters<Self::Api>,
    );

    #[event("reserve_swap")]
    fn reserve_swap_event(
        &self,
        #[indexed] account: &ManagedAddress,
        #[indexed] reserve_in: &BigUint,
        #[indexed] stable_out: &BigUint,
    );

    #[event("refund_claimed")]
    fn refund_claimed_event(&self, #[indexed] account: &ManagedAddress, #[indexed] amount: &BigUint);
}
