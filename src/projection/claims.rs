use crate::error::Error;
use crate::events::{CheckClaimEvent, ClaimRewardsEvent, EventKind, checked_u64_to_i64};
use crate::projection::{UPDATED_AT, history};
use crate::store::{DocumentPath, DocumentWrite, WriteSet};

/// Eligibility figures are absolute snapshots from the program, so they overwrite.
pub fn check_claim(event: &CheckClaimEvent, signature: &str) -> Result<WriteSet, Error> {
    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::mint_pool(event.original_mint, event.pool))
            .set(
                "mintEligible",
                checked_u64_to_i64(event.mint_eligible, "mint_eligible")?,
            )
            .set(
                "lpEligible",
                checked_u64_to_i64(event.lp_eligible, "lp_eligible")?,
            )
            .set(
                "lpEligibleAfterFees",
                checked_u64_to_i64(event.lp_eligible_after_fees, "lp_eligible_after_fees")?,
            )
            .server_timestamp(UPDATED_AT),
    );
    writes.push(history::user_transaction(
        &event.payer,
        signature,
        EventKind::CheckClaim,
        event,
        event.created_at,
    )?);
    Ok(writes)
}

/// `mintClaimed` accumulates; `lastClaimedAt` is replaced.
pub fn claim_rewards(event: &ClaimRewardsEvent, signature: &str) -> Result<WriteSet, Error> {
    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::mint_pool(event.original_mint, event.pool))
            .increment(
                "mintClaimed",
                checked_u64_to_i64(event.mint_claimed, "mint_claimed")?,
            )
            .set("lastClaimedAt", event.last_claimed_at)
            .server_timestamp(UPDATED_AT),
    );
    history::payer_and_owner(
        &mut writes,
        &event.payer,
        &event.original_mint_owner,
        signature,
        EventKind::ClaimRewards,
        event,
        event.created_at,
    )?;
    Ok(writes)
}
