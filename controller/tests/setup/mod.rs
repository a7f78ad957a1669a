use crate::constants::*;

use cdp_controller::{
    cache::Cache,
    positions::update::PositionUpdateModule,
    proxy_amm, proxy_controller, LiquidationSettlement, ProtocolParameters,
};
use multiversx_sc::codec::{top_encode_to_vec_u8_or_panic, TopEncode};
use multiversx_sc::types::{
    BigUint, EgldOrEsdtTokenIdentifier, EsdtLocalRole, EsdtTokenPayment, ManagedAddress,
    ManagedVec, MultiValueEncoded, ReturnsNewManagedAddress, ReturnsResult, TestTokenIdentifier,
};
use multiversx_sc_scenario::{
    api::StaticApi,
    imports::{ExpectMessage, TestAddress},
    scenario_model::Log,
    ReturnsLogs, ScenarioTxRun, ScenarioTxWhitebox, ScenarioWorld,
};

pub static STABLE_ROLES: &[EsdtLocalRole] = &[EsdtLocalRole::Mint, EsdtLocalRole::Burn];

pub fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();

    blockchain.register_contract(CONTROLLER_PATH, cdp_controller::ContractBuilder);
    blockchain.register_contract(AMM_PATH, amm_mock::ContractBuilder);

    blockchain
}

/// `amount` whole tokens expressed in raw units of `decimals`.
pub fn units(amount: u64, decimals: u64) -> BigUint<StaticApi> {
    BigUint::from(amount) * BigUint::from(10u64).pow(decimals as u32)
}

pub fn esdt(token: TestTokenIdentifier) -> EgldOrEsdtTokenIdentifier<StaticApi> {
    EgldOrEsdtTokenIdentifier::esdt(token.to_token_identifier())
}

pub fn error_text(error_message: &[u8]) -> &str {
    core::str::from_utf8(error_message).unwrap()
}

/// Indexed topics of the single `identifier` event in `logs`, identifier excluded.
pub fn event_topics(logs: &[Log], identifier: &str) -> Vec<Vec<u8>> {
    let matching: Vec<&Log> = logs
        .iter()
        .filter(|log| log.topics.first().map(Vec::as_slice) == Some(identifier.as_bytes()))
        .collect();
    assert_eq!(matching.len(), 1, "expected one {identifier} event");

    matching[0].topics[1..].to_vec()
}

pub fn has_event(logs: &[Log], identifier: &str) -> bool {
    logs.iter()
        .any(|log| log.topics.first().map(Vec::as_slice) == Some(identifier.as_bytes()))
}

pub fn topic<T: TopEncode>(value: &T) -> Vec<u8> {
    top_encode_to_vec_u8_or_panic(value)
}

pub struct CdpTestState {
    pub world: ScenarioWorld,
    pub controller_sc: ManagedAddress<StaticApi>,
    pub amm_sc: ManagedAddress<StaticApi>,
}

impl CdpTestState {
    pub fn new() -> Self {
        let mut world = world();
        setup_accounts(&mut world);
        world.current_block().block_timestamp(0);

        let amm_sc = setup_amm(&mut world);
        let controller_sc = setup_controller(&mut world, &amm_sc);

        Self {
            world,
            controller_sc,
            amm_sc,
        }
    }

    pub fn change_timestamp(&mut self, timestamp: u64) {
        self.world.current_block().block_timestamp(timestamp);
    }

    /// Price of one whole collateral token in reserve asset, in thousandths.
    pub fn set_price(&mut self, price: u64) {
        set_amm_price(&mut self.world, &self.amm_sc, price);
    }

    // Core operations
    pub fn deposit(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) {
        let payment = EsdtTokenPayment::new(COLLATERAL_TOKEN.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .deposit()
            .esdt(payment)
            .run();
    }

    pub fn deposit_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        let payment = EsdtTokenPayment::new(token.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .deposit()
            .esdt(payment)
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn borrow(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .borrow(amount)
            .run();
    }

    pub fn borrow_error(
        &mut self,
        from: &TestAddress,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .borrow(amount)
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn withdraw(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .withdraw(amount)
            .run();
    }

    pub fn withdraw_error(
        &mut self,
        from: &TestAddress,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .withdraw(amount)
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn repay(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) -> BigUint<StaticApi> {
        let payment = EsdtTokenPayment::new(STABLE_TOKEN.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .repay()
            .esdt(payment)
            .returns(ReturnsResult)
            .run()
    }

    pub fn repay_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        let payment = EsdtTokenPayment::new(token.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .repay()
            .esdt(payment)
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn liquidate(
        &mut self,
        from: &TestAddress,
        account: &TestAddress,
    ) -> LiquidationSettlement<StaticApi> {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .liquidate(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
    }

    pub fn liquidate_error(&mut self, from: &TestAddress, account: &TestAddress, error_message: &[u8]) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .liquidate(account.to_managed_address())
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn swap_reserve_for_stable(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
    ) -> BigUint<StaticApi> {
        let payment = EsdtTokenPayment::new(token.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .swap_reserve_for_stable()
            .esdt(payment)
            .returns(ReturnsResult)
            .run()
    }

    pub fn swap_reserve_for_stable_error(
        &mut self,
        from: &TestAddress,
        token: TestTokenIdentifier,
        amount: BigUint<StaticApi>,
        error_message: &[u8],
    ) {
        let payment = EsdtTokenPayment::new(token.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .swap_reserve_for_stable()
            .esdt(payment)
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn claim_refund(&mut self, from: &TestAddress) -> BigUint<StaticApi> {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .claim_refund()
            .returns(ReturnsResult)
            .run()
    }

    pub fn claim_refund_error(&mut self, from: &TestAddress, error_message: &[u8]) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .claim_refund()
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    // Operations returning the emitted logs
    pub fn deposit_logs(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) -> Vec<Log> {
        let payment = EsdtTokenPayment::new(COLLATERAL_TOKEN.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .deposit()
            .esdt(payment)
            .returns(ReturnsLogs)
            .run()
    }

    pub fn borrow_logs(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) -> Vec<Log> {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .borrow(amount)
            .returns(ReturnsLogs)
            .run()
    }

    pub fn withdraw_logs(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) -> Vec<Log> {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .withdraw(amount)
            .returns(ReturnsLogs)
            .run()
    }

    pub fn repay_logs(&mut self, from: &TestAddress, amount: BigUint<StaticApi>) -> Vec<Log> {
        let payment = EsdtTokenPayment::new(STABLE_TOKEN.to_token_identifier(), 0, amount);

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .repay()
            .esdt(payment)
            .returns(ReturnsLogs)
            .run()
    }

    pub fn liquidate_logs(&mut self, from: &TestAddress, account: &TestAddress) -> Vec<Log> {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .liquidate(account.to_managed_address())
            .returns(ReturnsLogs)
            .run()
    }

    /// Accrues and persists the position of `account` without any other change.
    pub fn sync_position(&mut self, account: &TestAddress) {
        let address = account.to_address();
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(self.controller_sc.clone())
            .whitebox(cdp_controller::contract_obj, |sc| {
                let account = ManagedAddress::from(address);
                let cache = Cache::new(&sc);
                let position = sc.load_accrued_position(&account, &cache);
                sc.store_position(&account, &position);
            });
    }

    // Administration
    pub fn set_thresholds(&mut self, from: &TestAddress, borrow_threshold: u64, liquidation_threshold: u64) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_thresholds(
                BigUint::from(borrow_threshold),
                BigUint::from(liquidation_threshold),
            )
            .run();
    }

    pub fn set_thresholds_error(
        &mut self,
        from: &TestAddress,
        borrow_threshold: u64,
        liquidation_threshold: u64,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_thresholds(
                BigUint::from(borrow_threshold),
                BigUint::from(liquidation_threshold),
            )
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn set_fees_and_rates(
        &mut self,
        from: &TestAddress,
        fee_total: u64,
        liquidator_share: u64,
        annual_rate: u64,
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_fees_and_rates(
                BigUint::from(fee_total),
                BigUint::from(liquidator_share),
                BigUint::from(annual_rate),
            )
            .run();
    }

    pub fn set_fees_and_rates_error(
        &mut self,
        from: &TestAddress,
        fee_total: u64,
        liquidator_share: u64,
        annual_rate: u64,
        error_message: &[u8],
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_fees_and_rates(
                BigUint::from(fee_total),
                BigUint::from(liquidator_share),
                BigUint::from(annual_rate),
            )
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn set_token_addresses(
        &mut self,
        from: &TestAddress,
        collateral: TestTokenIdentifier,
        stable: TestTokenIdentifier,
        reserve: TestTokenIdentifier,
    ) {
        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_token_addresses(
                esdt(collateral),
                stable.to_token_identifier(),
                STABLE_DECIMALS as usize,
                esdt(reserve),
                RESERVE_DECIMALS as usize,
            )
            .run();
    }

    pub fn set_oracle_addresses_error(
        &mut self,
        from: &TestAddress,
        path: &[TestTokenIdentifier],
        error_message: &[u8],
    ) {
        let mut conversion_path = MultiValueEncoded::new();
        for token in path {
            conversion_path.push(esdt(*token));
        }

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_oracle_addresses(self.amm_sc.clone(), conversion_path)
            .returns(ExpectMessage(error_text(error_message)))
            .run();
    }

    pub fn set_oracle_addresses(&mut self, from: &TestAddress, path: &[TestTokenIdentifier]) {
        let mut conversion_path = MultiValueEncoded::new();
        for token in path {
            conversion_path.push(esdt(*token));
        }

        self.world
            .tx()
            .from(from.to_managed_address())
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .set_oracle_addresses(self.amm_sc.clone(), conversion_path)
            .run();
    }

    pub fn add_admin(&mut self, address: &TestAddress) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .add_admin(address.to_managed_address())
            .run();
    }

    pub fn remove_admin(&mut self, address: &TestAddress) {
        self.world
            .tx()
            .from(OWNER_ADDRESS)
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .remove_admin(address.to_managed_address())
            .run();
    }

    // Views
    pub fn get_position(
        &mut self,
        account: &TestAddress,
    ) -> (BigUint<StaticApi>, BigUint<StaticApi>, BigUint<StaticApi>, u64) {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_position(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
            .into_tuple()
    }

    pub fn get_collateral(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        self.get_position(account).0
    }

    /// Principal plus interest stored on the position.
    pub fn get_total_owed(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        let (_, principal, accrued_interest, _) = self.get_position(account);
        principal + accrued_interest
    }

    pub fn get_current_collateral_ratio(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_current_collateral_ratio(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_forward_collateral_ratio(
        &mut self,
        account: &TestAddress,
        hypothetical_debt: BigUint<StaticApi>,
    ) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_forward_collateral_ratio(account.to_managed_address(), hypothetical_debt)
            .returns(ReturnsResult)
            .run()
    }

    pub fn calc_interest(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .calc_interest(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_max_borrow(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_max_borrow(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_withdrawable_collateral(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_withdrawable_collateral(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_collateral_value(&mut self, amount: BigUint<StaticApi>) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_collateral_value_view(amount)
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_accounts(&mut self) -> Vec<ManagedAddress<StaticApi>> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .accounts()
            .returns(ReturnsResult)
            .run()
            .into_iter()
            .collect()
    }

    pub fn get_scaling_factor(&mut self) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_scaling_factor()
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_reserves(&mut self) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .reserves()
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_refundable_balance(&mut self, account: &TestAddress) -> BigUint<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .refundable_balance(account.to_managed_address())
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_protocol_parameters(&mut self) -> ProtocolParameters<StaticApi> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .protocol_parameters()
            .returns(ReturnsResult)
            .run()
    }

    pub fn get_conversion_path(&mut self) -> Vec<EgldOrEsdtTokenIdentifier<StaticApi>> {
        self.world
            .query()
            .to(self.controller_sc.clone())
            .typed(proxy_controller::ControllerProxy)
            .get_conversion_path()
            .returns(ReturnsResult)
            .run()
            .into_iter()
            .collect()
    }
}

pub fn default_parameters(amm_sc: &ManagedAddress<StaticApi>) -> ProtocolParameters<StaticApi> {
    let mut conversion_path = ManagedVec::new();
    conversion_path.push(esdt(COLLATERAL_TOKEN));
    conversion_path.push(esdt(RESERVE_TOKEN));

    ProtocolParameters {
        annual_interest_rate_bps: BigUint::from(ANNUAL_INTEREST_RATE_BPS),
        borrow_threshold_bps: BigUint::from(BORROW_THRESHOLD_BPS),
        liquidation_threshold_bps: BigUint::from(LIQUIDATION_THRESHOLD_BPS),
        liquidation_fee_total_bps: BigUint::from(LIQUIDATION_FEE_TOTAL_BPS),
        liquidator_fee_share_bps: BigUint::from(LIQUIDATOR_FEE_SHARE_BPS),
        collateral_token: esdt(COLLATERAL_TOKEN),
        stable_token: STABLE_TOKEN.to_token_identifier(),
        stable_decimals: STABLE_DECIMALS as usize,
        reserve_token: esdt(RESERVE_TOKEN),
        reserve_decimals: RESERVE_DECIMALS as usize,
        amm_address: amm_sc.clone(),
        conversion_path,
        treasury_address: TREASURY_ADDRESS.to_managed_address(),
    }
}

pub fn setup_amm(world: &mut ScenarioWorld) -> ManagedAddress<StaticApi> {
    let amm_sc = world
        .tx()
        .from(OWNER_ADDRESS)
        .typed(proxy_amm::AmmProxy)
        .init()
        .code(AMM_PATH)
        .returns(ReturnsNewManagedAddress)
        .run();

    world.set_esdt_balance(
        amm_sc.clone(),
        RESERVE_TOKEN.as_bytes(),
        units(100_000_000, RESERVE_DECIMALS),
    );
    set_amm_price(world, &amm_sc, PRICE_ONE_DOLLAR);

    amm_sc
}

pub fn set_amm_price(world: &mut ScenarioWorld, amm_sc: &ManagedAddress<StaticApi>, price: u64) {
    world
        .tx()
        .from(OWNER_ADDRESS)
        .to(amm_sc.clone())
        .typed(proxy_amm::AmmProxy)
        .set_rate(
            esdt(COLLATERAL_TOKEN),
            esdt(RESERVE_TOKEN),
            BigUint::from(price),
            BigUint::from(PRICE_DENOMINATOR),
        )
        .run();
}

pub fn setup_controller(
    world: &mut ScenarioWorld,
    amm_sc: &ManagedAddress<StaticApi>,
) -> ManagedAddress<StaticApi> {
    let controller_sc = world
        .tx()
        .from(OWNER_ADDRESS)
        .typed(proxy_controller::ControllerProxy)
        .init(default_parameters(amm_sc))
        .code(CONTROLLER_PATH)
        .returns(ReturnsNewManagedAddress)
        .run();

    world.set_esdt_local_roles(controller_sc.clone(), STABLE_TOKEN.as_bytes(), STABLE_ROLES);

    controller_sc
}

pub fn setup_accounts(world: &mut ScenarioWorld) {
    world.account(OWNER_ADDRESS).nonce(1);
    world.account(TREASURY_ADDRESS).nonce(1);
    world.account(ADMIN_ADDRESS).nonce(1);

    world
        .account(BORROWER_ADDRESS)
        .nonce(1)
        .esdt_balance(COLLATERAL_TOKEN, units(1_000, COLLATERAL_DECIMALS))
        .esdt_balance(STABLE_TOKEN, units(100, STABLE_DECIMALS))
        .esdt_balance(RESERVE_TOKEN, units(1_000, RESERVE_DECIMALS))
        .esdt_balance(OTHER_TOKEN, units(1_000, 18));

    world
        .account(LIQUIDATOR_ADDRESS)
        .nonce(1)
        .esdt_balance(COLLATERAL_TOKEN, units(1_000, COLLATERAL_DECIMALS));
}
