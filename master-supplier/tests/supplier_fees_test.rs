use multiversx_sc_scenario::imports::*;

use master_supplier::fees::FeeModule;
use master_supplier::MasterSupplier;
use power_token::PowerToken;

const OWNER: TestAddress = TestAddress::new("owner");
const ALICE: TestAddress = TestAddress::new("alice");
const DEV: TestAddress = TestAddress::new("dev");
const LIQUIDITY: TestAddress = TestAddress::new("liquidity");
const COMMUNITY: TestAddress = TestAddress::new("community");
const FOUNDER: TestAddress = TestAddress::new("founder");
const TOKEN_ADDRESS: TestSCAddress = TestSCAddress::new("power-token");
const SUPPLIER_ADDRESS: TestSCAddress = TestSCAddress::new("master-supplier");
const TOKEN_PATH: MxscPath = MxscPath::new("../power-token/output/power-token.mxsc.json");
const SUPPLIER_PATH: MxscPath = MxscPath::new("output/master-supplier.mxsc.json");
const STAKE_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("STAKE-123456");

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.register_contract(TOKEN_PATH, power_token::ContractBuilder);
    blockchain.register_contract(SUPPLIER_PATH, master_supplier::ContractBuilder);
    blockchain
}

fn setup(world: &mut ScenarioWorld) {
    world.account(OWNER).nonce(1);
    world
        .account(ALICE)
        .nonce(1)
        .esdt_balance(STAKE_TOKEN, 1_000_000u64);
    world.account(DEV).nonce(1);
    world.account(LIQUIDITY).nonce(1);
    world.account(COMMUNITY).nonce(1);
    world.account(FOUNDER).nonce(1);

    world
        .tx()
        .from(OWNER)
        .raw_deploy()
        .code(TOKEN_PATH)
        .new_address(TOKEN_ADDRESS)
        .whitebox(power_token::contract_obj, |sc| {
            sc.init(BigUint::from(1_000_000_000u64), 10_000u64, 20_000u64)
        });

    // Reward start far in the future: fee behavior only.
    world
        .tx()
        .from(OWNER)
        .raw_deploy()
        .code(SUPPLIER_PATH)
        .new_address(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.init(
                TOKEN_ADDRESS.to_managed_address(),
                DEV.to_managed_address(),
                LIQUIDITY.to_managed_address(),
                COMMUNITY.to_managed_address(),
                FOUNDER.to_managed_address(),
                BigUint::from(1_000u64),
                1_000u64,
                100u64,
            )
        });

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false)
        });
}

#[test]
fn default_rates_applied_on_deploy() {
    let mut world = world();
    setup(&mut world);

    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            assert_eq!(sc.user_deposit_fee().get(), 75);
            assert_eq!(sc.dev_deposit_fee().get(), 9_925);
            assert_eq!(sc.user_withdraw_fee().get(), 800);
            assert_eq!(sc.dev_withdraw_fee().get(), 9_200);
            assert_eq!(sc.percent_for_dev().get(), 10);
            assert_eq!(sc.percent_for_lp().get(), 5);
            assert_eq!(sc.percent_for_com().get(), 5);
            assert_eq!(sc.percent_for_founders().get(), 5);
            assert_eq!(sc.percent_lock_reward().get(), 75);
        });
}

#[test]
fn deposit_credits_user_and_dev() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .single_esdt(
            &STAKE_TOKEN.to_token_identifier(),
            0,
            &BigUint::from(10_000u64),
        )
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.deposit(0u64, OptionalValue::None)
        });

    world
        .check_account(ALICE)
        .esdt_balance(STAKE_TOKEN, 990_000u64);
    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            let user = sc.get_user_info_view(0, ALICE.to_managed_address());
            let dev = sc.get_user_info_view(0, DEV.to_managed_address());
            assert_eq!(user.amount, BigUint::from(9_925u64));
            assert_eq!(dev.amount, BigUint::from(75u64));
            assert_eq!(sc.get_pool_info(0).total_staked, BigUint::from(10_000u64));
        });
}

#[test]
fn zero_fee_deposit_credits_full_amount() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.set_user_deposit_fee(0u64);
            sc.set_dev_deposit_fee(10_000u64);
        });

    for _ in 0..2 {
        world
            .tx()
            .from(ALICE)
            .to(SUPPLIER_ADDRESS)
            .single_esdt(&STAKE_TOKEN.to_token_identifier(), 0, &BigUint::from(100u64))
            .whitebox(master_supplier::contract_obj, |sc| {
                sc.deposit(0u64, OptionalValue::None)
            });
    }

    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            let user = sc.get_user_info_view(0, ALICE.to_managed_address());
            let dev = sc.get_user_info_view(0, DEV.to_managed_address());
            assert_eq!(user.amount, BigUint::from(200u64));
            assert_eq!(dev.amount, BigUint::zero());
            assert_eq!(sc.get_pool_info(0).total_staked, BigUint::from(200u64));
        });
}

#[test]
fn withdraw_splits_between_user_and_dev() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.set_user_deposit_fee(0u64);
            sc.set_dev_deposit_fee(10_000u64);
        });

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .single_esdt(&STAKE_TOKEN.to_token_identifier(), 0, &BigUint::from(200u64))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.deposit(0u64, OptionalValue::None)
        });

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.withdraw(0u64, BigUint::from(200u64), OptionalValue::None)
        });

    // 8% withdrawal fee: 184 back to alice, 16 to the dev.
    world
        .check_account(ALICE)
        .esdt_balance(STAKE_TOKEN, 999_984u64);
    world.check_account(DEV).esdt_balance(STAKE_TOKEN, 16u64);
    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            assert_eq!(sc.get_pool_info(0).total_staked, BigUint::zero());
        });
}

#[test]
fn fee_rates_are_bounded() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("invalid fee rate"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.set_user_deposit_fee(10_001u64)
        });

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("invalid fee rate"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.set_emission_split(50u64, 30u64, 20u64, 10u64)
        });
}

#[test]
fn fee_setters_require_authorization() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("unauthorized"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.set_user_withdraw_fee(0u64)
        });
}
