use multiversx_sc_scenario::imports::*;

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
const OTHER_TOKEN: TestTokenIdentifier = TestTokenIdentifier::new("OTHER-123456");

fn world() -> ScenarioWorld {
    let mut blockchain = ScenarioWorld::new();
    blockchain.register_contract(TOKEN_PATH, power_token::ContractBuilder);
    blockchain.register_contract(SUPPLIER_PATH, master_supplier::ContractBuilder);
    blockchain
}

/// Deploys token + supplier with the reward start far in the
/// future, so pool management can be tested without emission.
fn setup(world: &mut ScenarioWorld) {
    world.account(OWNER).nonce(1);
    world
        .account(ALICE)
        .nonce(1)
        .esdt_balance(STAKE_TOKEN, 1_000_000u64)
        .esdt_balance(OTHER_TOKEN, 1_000_000u64);
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
}

#[test]
fn add_pool_assigns_sequential_ids() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false);
            sc.add_pool(300u64, OTHER_TOKEN.to_token_identifier(), false);
        });

    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            assert_eq!(sc.pool_length(), 2);
            assert!(sc.pool_existence(STAKE_TOKEN.to_token_identifier()));
            assert!(sc.pool_existence(OTHER_TOKEN.to_token_identifier()));
            assert_eq!(sc.total_alloc_weight().get(), 400);

            let pool = sc.get_pool_info(0);
            assert_eq!(pool.stake_token, STAKE_TOKEN.to_token_identifier());
            assert_eq!(pool.alloc_weight, 100);
            // Reward start is in the future; settlement begins there.
            assert_eq!(pool.last_reward_block, 1_000);
            assert_eq!(pool.total_staked, BigUint::zero());
        });
}

#[test]
fn duplicate_stake_token_rejected() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false)
        });

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("duplicated pool"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(200u64, STAKE_TOKEN.to_token_identifier(), false)
        });

    // The rejected registration mutated nothing.
    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            assert_eq!(sc.pool_length(), 1);
            assert_eq!(sc.total_alloc_weight().get(), 100);
            assert_eq!(sc.get_pool_info(0).alloc_weight, 100);
        });
}

#[test]
fn set_pool_weight_adjusts_total() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false);
            sc.add_pool(300u64, OTHER_TOKEN.to_token_identifier(), false);
            sc.set_pool_weight(1u64, 100u64, false);
        });

    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            assert_eq!(sc.total_alloc_weight().get(), 200);
            assert_eq!(sc.get_pool_info(1).alloc_weight, 100);
        });
}

#[test]
fn unknown_pool_is_rejected_everywhere() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("unknown pool"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.set_pool_weight(0u64, 100u64, false)
        });

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("unknown pool"))
        .whitebox(master_supplier::contract_obj, |sc| sc.update_pool(7u64));
}

#[test]
fn deposit_requires_matching_stake_token() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false)
        });

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .single_esdt(&OTHER_TOKEN.to_token_identifier(), 0, &BigUint::from(100u64))
        .returns(ExpectMessage("wrong stake token"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.deposit(0u64, OptionalValue::None)
        });
}

#[test]
fn withdraw_over_stake_fails() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false)
        });

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

    // 9925 credited after the default deposit fee.
    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .returns(ExpectMessage("insufficient staked balance"))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.withdraw(0u64, BigUint::from(9_926u64), OptionalValue::None)
        });
}

#[test]
fn emergency_withdraw_returns_stake_without_fee() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false)
        });

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
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.emergency_withdraw(0u64)
        });

    // The 9925 credited stake comes back whole; the dev's 75
    // deposit cut stays staked.
    world
        .check_account(ALICE)
        .esdt_balance(STAKE_TOKEN, 999_925u64);
    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            let user = sc.get_user_info_view(0, ALICE.to_managed_address());
            assert_eq!(user.amount, BigUint::zero());
            assert_eq!(user.reward_debt, BigUint::zero());
            assert_eq!(sc.get_pool_info(0).total_staked, BigUint::from(75u64));
        });
}

#[test]
fn referrer_recorded_once() {
    let mut world = world();
    setup(&mut world);

    world
        .tx()
        .from(OWNER)
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.add_pool(100u64, STAKE_TOKEN.to_token_identifier(), false)
        });

    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .single_esdt(&STAKE_TOKEN.to_token_identifier(), 0, &BigUint::from(100u64))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.deposit(0u64, OptionalValue::Some(DEV.to_managed_address()))
        });

    // A later deposit cannot overwrite the referrer.
    world
        .tx()
        .from(ALICE)
        .to(SUPPLIER_ADDRESS)
        .single_esdt(&STAKE_TOKEN.to_token_identifier(), 0, &BigUint::from(100u64))
        .whitebox(master_supplier::contract_obj, |sc| {
            sc.deposit(0u64, OptionalValue::Some(FOUNDER.to_managed_address()))
        });

    world
        .query()
        .to(SUPPLIER_ADDRESS)
        .whitebox(master_supplier::contract_obj, |sc| {
            assert_eq!(
                sc.referrer(&ALICE.to_managed_address()).get(),
                DEV.to_managed_address()
            );
        });
}
