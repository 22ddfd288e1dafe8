//! Field layouts of the presale program's events.
//!
//! Fields are declared in on-chain order; Borsh decoding depends on it.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::events::address::Address;
use crate::events::hex_int;

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializedPoolEvent {
    pub pool: Address,
    pub authority: Address,
    #[serde(default)]
    pub delegate: Option<Address>,
    pub mint: Address,
    pub quote_mint: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub decimals: u8,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub presale_target: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub presale_time_limit: i64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub vesting_period: i64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub creator_fee_basis_points: u16,
    #[serde(default, deserialize_with = "hex_int::option")]
    pub max_amount_per_purchase: Option<u64>,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseAuthorisationEvent {
    pub pool: Address,
    pub payer: Address,
    pub collection: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedPresaleEvent {
    pub pool: Address,
    pub payer: Address,
    pub original_mint: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckClaimEvent {
    pub pool: Address,
    pub payer: Address,
    pub original_mint: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub mint_eligible: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub lp_eligible: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub lp_eligible_after_fees: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRewardsEvent {
    pub pool: Address,
    pub payer: Address,
    pub original_mint: Address,
    pub original_mint_owner: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub mint_claimed: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub last_claimed_at: i64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchTokenAmmEvent {
    pub pool: Address,
    pub payer: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount_coin: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount_pc: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount_lp_received: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub vesting_started_at: i64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub vesting_ending_at: i64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawLpTokenEvent {
    pub pool: Address,
    pub payer: Address,
    pub original_mint: Address,
    pub original_mint_owner: Address,
    /// LP tokens moved out of the pool by this withdrawal.
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount: u64,
    /// Cumulative LP claimed for this mint, as tracked on-chain.
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub lp_claimed: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawEvent {
    pub pool: Address,
    pub payer: Address,
    pub original_mint: Address,
    pub original_mint_owner: Address,
    /// Wrapped SOL moved out of the pool by this withdrawal.
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount: u64,
    /// Cumulative wrapped SOL withdrawn for this mint, as tracked on-chain.
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub wsol_withdrawn: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorClaimVestingEvent {
    pub pool: Address,
    pub creator: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorWithdrawLpTokenEvent {
    pub pool: Address,
    pub creator: Address,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub amount: u64,
    #[serde(deserialize_with = "hex_int::deserialize")]
    pub created_at: i64,
}
