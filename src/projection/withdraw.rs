use crate::error::Error;
use crate::events::{EventKind, WithdrawEvent, WithdrawLpTokenEvent, checked_u64_to_i64};
use crate::projection::{UPDATED_AT, history};
use crate::store::{DocumentPath, DocumentWrite, WriteSet};

/// The pool total grows by the withdrawn amount; the link takes the program's cumulative figure.
pub fn withdraw(event: &WithdrawEvent, signature: &str) -> Result<WriteSet, Error> {
    let amount = checked_u64_to_i64(event.amount, "amount")?;

    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::pool(event.pool))
            .increment("amountWsolWithdrawn", amount)
            .server_timestamp(UPDATED_AT),
    );
    writes.push(
        DocumentWrite::merge(DocumentPath::mint_pool(event.original_mint, event.pool))
            .set(
                "wsolWithdrawn",
                checked_u64_to_i64(event.wsol_withdrawn, "wsol_withdrawn")?,
            )
            .server_timestamp(UPDATED_AT),
    );
    history::payer_and_owner(
        &mut writes,
        &event.payer,
        &event.original_mint_owner,
        signature,
        EventKind::Withdraw,
        event,
        event.created_at,
    )?;
    Ok(writes)
}

pub fn withdraw_lp_token(event: &WithdrawLpTokenEvent, signature: &str) -> Result<WriteSet, Error> {
    let amount = checked_u64_to_i64(event.amount, "amount")?;

    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::pool(event.pool))
            .increment("amountLpWithdrawn", amount)
            .server_timestamp(UPDATED_AT),
    );
    writes.push(
        DocumentWrite::merge(DocumentPath::mint_pool(event.original_mint, event.pool))
            .set(
                "lpClaimed",
                checked_u64_to_i64(event.lp_claimed, "lp_claimed")?,
            )
            .server_timestamp(UPDATED_AT),
    );
    history::payer_and_owner(
        &mut writes,
        &event.payer,
        &event.original_mint_owner,
        signature,
        EventKind::WithdrawLpToken,
        event,
        event.created_at,
    )?;
    Ok(writes)
}
