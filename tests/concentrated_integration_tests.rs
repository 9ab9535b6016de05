// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Participant discovery and balances for the Uniswap V4 and Thruster integrations

mod helpers;

use alloy_primitives::{address, aliases::I24, Address, B256, I256, U256};
use helpers::{init_tracing, MockEventSource, MockPositionReader};
use pointscan::config::constants::{thruster, uniswap_v4};
use pointscan::{
    IncreaseLiquidity, IntegrationError, LiquidityPosition, MaxBlockRange, ModifyLiquidity,
    PoolState, PositionValuer, SourceError, ThrusterIntegration, TickRange, TokenDecimals,
    UniswapV4Integration,
};

const ALICE: Address = address!("1111111111111111111111111111111111111111");
const BOB: Address = address!("2222222222222222222222222222222222222222");

fn modify_liquidity(pool_id: B256, sender: Address, token_id: u64) -> ModifyLiquidity {
    ModifyLiquidity {
        id: pool_id,
        sender,
        tickLower: I24::try_from(-60i32).unwrap(),
        tickUpper: I24::try_from(60i32).unwrap(),
        liquidityDelta: I256::ONE,
        salt: B256::from(U256::from(token_id)),
    }
}

fn increase_liquidity(pool: Address, token_id: u64) -> IncreaseLiquidity {
    IncreaseLiquidity {
        tokenId: U256::from(token_id),
        liquidity: 1,
        amount0: U256::ZERO,
        amount1: U256::ZERO,
        pool,
    }
}

fn position(liquidity: u128, lower: i32, upper: i32) -> LiquidityPosition {
    LiquidityPosition::new(liquidity, TickRange::new(lower, upper).unwrap())
}

fn v4_for_test() -> UniswapV4Integration {
    UniswapV4Integration::new(
        uniswap_v4::POOL_MANAGER,
        uniswap_v4::POSITION_MANAGER,
        uniswap_v4::USDE_USDC_POOL_ID,
        100,
        100,
        PositionValuer::new(TokenDecimals::STANDARD, TokenDecimals::STANDARD),
    )
}

#[tokio::test]
async fn test_v4_discovery_keeps_position_manager_events_for_pool() {
    init_tracing();
    let other_sender = address!("00000000000000000000000000000000000000aa");
    let source = MockEventSource::new()
        .with_event(
            uniswap_v4::POOL_MANAGER,
            150,
            &modify_liquidity(uniswap_v4::USDE_USDC_POOL_ID, uniswap_v4::POSITION_MANAGER, 1),
        )
        .with_event(
            uniswap_v4::POOL_MANAGER,
            2_500,
            &modify_liquidity(uniswap_v4::USDE_USDC_POOL_ID, uniswap_v4::POSITION_MANAGER, 2),
        )
        .with_event(
            uniswap_v4::POOL_MANAGER,
            300,
            &modify_liquidity(uniswap_v4::USDE_USDC_POOL_ID, other_sender, 3),
        )
        .with_event(
            uniswap_v4::POOL_MANAGER,
            400,
            &modify_liquidity(B256::repeat_byte(0x11), uniswap_v4::POSITION_MANAGER, 4),
        )
        // Minted then burned: no owner at the end block
        .with_event(
            uniswap_v4::POOL_MANAGER,
            500,
            &modify_liquidity(uniswap_v4::USDE_USDC_POOL_ID, uniswap_v4::POSITION_MANAGER, 5),
        );

    let reader = MockPositionReader::new(PoolState::new(0, 1.0).unwrap())
        .with_token(1, ALICE, position(1_000, -60, 60))
        .with_token(2, ALICE, position(1_000, -60, 60))
        .with_token(3, BOB, position(1_000, -60, 60))
        .with_token(4, BOB, position(1_000, -60, 60));

    let v4 = v4_for_test();
    let participants = v4.discover_participants(&source, &reader, 3_000).await.unwrap();

    assert_eq!(participants.len(), 1);
    let alice_tokens: Vec<U256> = participants[&ALICE].iter().copied().collect();
    assert_eq!(alice_tokens, vec![U256::from(1), U256::from(2)]);

    // Default page size: 100..=1099, 1100..=2099, 2100..=3000
    assert_eq!(
        source.requests(),
        vec![(100, 1_099), (1_100, 2_099), (2_100, 3_000)]
    );
}

#[tokio::test]
async fn test_v4_discovery_fails_on_page_error() {
    let source = MockEventSource::new().failing_from(1_500);
    let reader = MockPositionReader::new(PoolState::new(0, 1.0).unwrap());

    let result = v4_for_test()
        .with_max_block_range(MaxBlockRange::new(1_000))
        .discover_participants(&source, &reader, 3_000)
        .await;

    assert!(matches!(
        result,
        Err(IntegrationError::Source(SourceError::GetLogsFailed { .. }))
    ));
    assert_eq!(source.requests().len(), 2);
}

#[tokio::test]
async fn test_thruster_discovery_applies_exclusions() {
    let other_pool = address!("00000000000000000000000000000000000000bb");
    let from = thruster::USDE_POOL_START_BLOCK;
    let source = MockEventSource::new()
        .with_event(thruster::POSITION_MANAGER, from + 1, &increase_liquidity(thruster::USDE_POOL, 10))
        .with_event(thruster::POSITION_MANAGER, from + 2, &increase_liquidity(thruster::USDE_POOL, 11))
        .with_event(thruster::POSITION_MANAGER, from + 3, &increase_liquidity(thruster::USDE_POOL, 12))
        .with_event(
            thruster::POSITION_MANAGER,
            from + 4,
            &increase_liquidity(thruster::USDE_POOL, thruster::JUICE_TOKEN_ID),
        )
        .with_event(thruster::POSITION_MANAGER, from + 5, &increase_liquidity(other_pool, 13));

    let reader = MockPositionReader::new(PoolState::new(0, 1.0).unwrap())
        .with_token(10, ALICE, position(1_000, -60, 60))
        .with_token(11, thruster::HYPERLOCK_DEPOSIT, position(1_000, -60, 60))
        .with_token(12, thruster::PARTICLE_LEVERAGED_POOL, position(1_000, -60, 60))
        .with_token(thruster::JUICE_TOKEN_ID, BOB, position(1_000, -60, 60))
        .with_token(13, BOB, position(1_000, -60, 60));

    let participants = ThrusterIntegration::usde()
        .discover_participants(&source, &reader, from + 10)
        .await
        .unwrap();

    assert_eq!(participants.len(), 1);
    assert!(participants[&ALICE].contains(&U256::from(10)));
}

#[tokio::test]
async fn test_user_balance_sums_owned_positions_only() {
    // Symmetric range at price 1: equal raw amounts of both tokens
    let reader = MockPositionReader::new(PoolState::new(0, 1.0).unwrap())
        .with_token(1, ALICE, position(10u128.pow(24), -100, 100))
        .with_token(2, ALICE, position(10u128.pow(24), -100, 100))
        .with_token(3, BOB, position(10u128.pow(24), -100, 100));
    let v4 = v4_for_test();

    let one = v4
        .user_balance(&reader, ALICE, &[U256::from(1)].into(), 200)
        .await
        .unwrap();
    let both = v4
        .user_balance(&reader, ALICE, &[U256::from(1), U256::from(2)].into(), 200)
        .await
        .unwrap();
    let with_transferred = v4
        .user_balance(
            &reader,
            ALICE,
            &[U256::from(1), U256::from(2), U256::from(3)].into(),
            200,
        )
        .await
        .unwrap();

    assert!(one > 0.0);
    assert!((both - 2.0 * one).abs() < 1e-3);
    assert_eq!(with_transferred, both);
}

#[tokio::test]
async fn test_user_balance_is_zero_before_start_block() {
    let reader = MockPositionReader::without_pool();
    let balance = v4_for_test()
        .user_balance(&reader, ALICE, &[U256::from(1)].into(), 99)
        .await
        .unwrap();
    assert_eq!(balance, 0.0);
}

#[tokio::test]
async fn test_unresolvable_tokens_are_worth_zero() {
    let reader = MockPositionReader::new(PoolState::new(0, 1.0).unwrap())
        .with_token(1, ALICE, position(10u128.pow(24), -100, 100))
        .with_owner_only(2, ALICE);
    let v4 = v4_for_test();

    let resolvable = v4
        .user_balance(&reader, ALICE, &[U256::from(1)].into(), 200)
        .await
        .unwrap();
    // Token 2 has no position, token 9 has no owner
    let mixed = v4
        .user_balance(
            &reader,
            ALICE,
            &[U256::from(1), U256::from(2), U256::from(9)].into(),
            200,
        )
        .await
        .unwrap();

    assert!(resolvable > 0.0);
    assert_eq!(mixed, resolvable);
}

#[tokio::test]
async fn test_missing_pool_state_is_an_error() {
    let reader = MockPositionReader::without_pool().with_token(1, ALICE, position(1_000, -100, 100));
    let result = v4_for_test()
        .user_balance(&reader, ALICE, &[U256::from(1)].into(), 200)
        .await;
    assert!(matches!(
        result,
        Err(IntegrationError::Source(SourceError::NotAvailable { block: 200, .. }))
    ));
}

#[tokio::test]
async fn test_thruster_ignores_wide_ranges() {
    let reader = MockPositionReader::new(PoolState::new(0, 1.0).unwrap())
        .with_token(1, ALICE, position(10u128.pow(24), -100, 100))
        .with_token(2, ALICE, position(10u128.pow(24), -8_000, 8_000));
    let thruster = ThrusterIntegration::usde();
    let block = thruster.start_block() + 1;

    let narrow = thruster
        .user_balance(&reader, ALICE, &[U256::from(1)].into(), block)
        .await
        .unwrap();
    let both = thruster
        .user_balance(&reader, ALICE, &[U256::from(1), U256::from(2)].into(), block)
        .await
        .unwrap();

    assert!(narrow > 0.0);
    assert_eq!(both, narrow);
}
