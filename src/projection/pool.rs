use crate::error::Error;
use crate::events::{
    CreatePurchaseAuthorisationEvent, EventKind, InitializedPoolEvent, LaunchTokenAmmEvent,
    checked_u64_to_i64,
};
use crate::lifecycle::PoolStatus;
use crate::projection::{UPDATED_AT, history};
use crate::store::{DocumentPath, DocumentWrite, WriteSet};

/// Creates the pool document with its full presale configuration.
///
/// Optional fields are written only when the event carries them.
pub fn initialized_pool(event: &InitializedPoolEvent, signature: &str) -> Result<WriteSet, Error> {
    let mut pool = DocumentWrite::merge(DocumentPath::pool(event.pool))
        .set("pool", event.pool.to_string())
        .set("authority", event.authority.to_string())
        .set("mint", event.mint.to_string())
        .set("quoteMint", event.quote_mint.to_string())
        .set("decimals", event.decimals)
        .set(
            "presaleTarget",
            checked_u64_to_i64(event.presale_target, "presale_target")?,
        )
        .set("presaleTimeLimit", event.presale_time_limit)
        .set("vestingPeriod", event.vesting_period)
        .set("creatorFeeBasisPoints", event.creator_fee_basis_points)
        .set("name", event.name.as_str())
        .set("symbol", event.symbol.as_str())
        .set("uri", event.uri.as_str())
        .set("collectionsRequired", serde_json::Value::Array(Vec::new()))
        .set("status", PoolStatus::Initialized.as_ref())
        .set("liquidityCollected", 0)
        .set("createdAt", event.created_at)
        .server_timestamp(UPDATED_AT);

    if let Some(delegate) = event.delegate {
        pool = pool.set("delegate", delegate.to_string());
    }
    if let Some(max) = event.max_amount_per_purchase {
        pool = pool.set(
            "maxAmountPerPurchase",
            checked_u64_to_i64(max, "max_amount_per_purchase")?,
        );
    }

    let mut writes = WriteSet::new();
    writes.push(pool);
    writes.push(history::user_transaction(
        &event.authority,
        signature,
        EventKind::InitializedPool,
        event,
        event.created_at,
    )?);
    Ok(writes)
}

pub fn create_purchase_authorisation(
    event: &CreatePurchaseAuthorisationEvent,
    signature: &str,
) -> Result<WriteSet, Error> {
    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::pool(event.pool))
            .array_union("collectionsRequired", event.collection.to_string())
            .server_timestamp(UPDATED_AT),
    );
    writes.push(history::user_transaction(
        &event.payer,
        signature,
        EventKind::CreatePurchaseAuthorisation,
        event,
        event.created_at,
    )?);
    Ok(writes)
}

/// Records the AMM launch result and moves the pool to `Launched`.
pub fn launch_token_amm(event: &LaunchTokenAmmEvent, signature: &str) -> Result<WriteSet, Error> {
    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::pool(event.pool))
            .set(
                "amountCoin",
                checked_u64_to_i64(event.amount_coin, "amount_coin")?,
            )
            .set("amountPc", checked_u64_to_i64(event.amount_pc, "amount_pc")?)
            .set(
                "amountLpReceived",
                checked_u64_to_i64(event.amount_lp_received, "amount_lp_received")?,
            )
            .set("vestingStartedAt", event.vesting_started_at)
            .set("vestingEndingAt", event.vesting_ending_at)
            .set("status", PoolStatus::Launched.as_ref())
            .server_timestamp(UPDATED_AT),
    );
    writes.push(history::user_transaction(
        &event.payer,
        signature,
        EventKind::LaunchTokenAmm,
        event,
        event.created_at,
    )?);
    Ok(writes)
}
