//! Projection of decoded events into document merge-writes.
//!
//! Every projector is a pure function of the event and its transaction
//! signature. Nothing here reads the store: increments and array unions are
//! resolved at commit time, so two events touching the same document in one
//! delivery compose in order.

pub mod claims;
pub mod history;
pub mod pool;
pub mod purchase;
pub mod withdraw;

use tracing::debug;

use crate::error::Error;
use crate::events::DecodedEvent;
use crate::store::WriteSet;

/// Stamped with the store's commit time on every written document.
pub const UPDATED_AT: &str = "updatedAt";

/// Writes for one decoded event. Creator-side events have no projection yet.
pub fn project(event: &DecodedEvent, signature: &str) -> Result<WriteSet, Error> {
    match event {
        DecodedEvent::InitializedPool(e) => pool::initialized_pool(e, signature),
        DecodedEvent::CreatePurchaseAuthorisation(e) => {
            pool::create_purchase_authorisation(e, signature)
        }
        DecodedEvent::PurchasedPresale(e) => purchase::purchased_presale(e, signature),
        DecodedEvent::CheckClaim(e) => claims::check_claim(e, signature),
        DecodedEvent::ClaimRewards(e) => claims::claim_rewards(e, signature),
        DecodedEvent::LaunchTokenAmm(e) => pool::launch_token_amm(e, signature),
        DecodedEvent::WithdrawLpToken(e) => withdraw::withdraw_lp_token(e, signature),
        DecodedEvent::Withdraw(e) => withdraw::withdraw(e, signature),
        DecodedEvent::CreatorClaimVesting(_) | DecodedEvent::CreatorWithdrawLpToken(_) => {
            debug!(
                kind = %event.kind(),
                pool = %event.pool(),
                signature,
                "no projection for creator event"
            );
            Ok(WriteSet::new())
        }
    }
}
