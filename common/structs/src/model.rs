#![no_std]

multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// Collateralized debt record of a single account.
///
/// `principal` is the only interest base; `accrued_interest` is tracked on
/// its own and is cleared first when the account repays.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Eq, Debug)]
pub struct Position<M: ManagedTypeApi> {
    pub collateral: BigUint<M>,
    pub principal: BigUint<M>,
    pub accrued_interest: BigUint<M>,
    pub last_accrual_timestamp: u64,
}

impl<M: ManagedTypeApi> Position<M> {
    pub fn new(timestamp: u64) -> Self {
        Position {
            collateral: BigUint::zero(),
            principal: BigUint::zero(),
            accrued_interest: BigUint::zero(),
            last_accrual_timestamp: timestamp,
        }
    }

    /// Principal plus accrued interest.
    pub fn total_owed(&self) -> BigUint<M> {
        &self.principal + &self.accrued_interest
    }

    pub fn has_debt(&self) -> bool {
        self.principal > 0 || self.accrued_interest > 0
    }

    pub fn has_collateral(&self) -> bool {
        self.collateral > 0
    }

    pub fn is_empty(&self) -> bool {
        !self.has_collateral() && !self.has_debt()
    }

    /// Zeroes the balances, the accrual clock is kept.
    pub fn clear(&mut self) {
        self.collateral = BigUint::zero();
        self.principal = BigUint::zero();
        self.accrued_interest = BigUint::zero();
    }
}

/// Process wide configuration, written by administrators only.
///
/// Every basis point field is scaled by `BPS` (10_000 = 100%).
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Eq, Debug)]
pub struct ProtocolParameters<M: ManagedTypeApi> {
    pub annual_interest_rate_bps: BigUint<M>,
    pub borrow_threshold_bps: BigUint<M>,
    pub liquidation_threshold_bps: BigUint<M>,
    pub liquidation_fee_total_bps: BigUint<M>,
    pub liquidator_fee_share_bps: BigUint<M>,
    pub collateral_token: EgldOrEsdtTokenIdentifier<M>,
    pub stable_token: TokenIdentifier<M>,
    pub stable_decimals: usize,
    pub reserve_token: EgldOrEsdtTokenIdentifier<M>,
    pub reserve_decimals: usize,
    pub amm_address: ManagedAddress<M>,
    pub conversion_path: ManagedVec<M, EgldOrEsdtTokenIdentifier<M>>,
    pub treasury_address: ManagedAddress<M>,
}

/// Result of splitting liquidation proceeds, all amounts in reserve units.
#[type_abi]
#[derive(NestedEncode, NestedDecode, TopEncode, TopDecode, Clone, PartialEq, Eq, Debug)]
pub struct LiquidationSettlement<M: ManagedTypeApi> {
    pub proceeds: BigUint<M>,
    pub liquidator_fee: BigUint<M>,
    pub protocol_fee: BigUint<M>,
    pub debt_covered: BigUint<M>,
    pub shortfall: BigUint<M>,
    pub refund: BigUint<M>,
}

impl<M: ManagedTypeApi> LiquidationSettlement<M> {
    pub fn fee_paid(&self) -> BigUint<M> {
        &self.liquidator_fee + &self.protocol_fee
    }
}
