use crate::events::DecodedEvent;
use crate::lifecycle::PoolStatus;

/// Canonical mapping from a decoded event to the [`PoolStatus`] it sets on its pool.
///
/// `Ended` is never produced here; the scheduled status dispatcher owns it.
pub fn status_after(event: &DecodedEvent) -> Option<PoolStatus> {
    match event {
        DecodedEvent::InitializedPool(_) => Some(PoolStatus::Initialized),
        DecodedEvent::LaunchTokenAmm(_) => Some(PoolStatus::Launched),
        DecodedEvent::CreatePurchaseAuthorisation(_)
        | DecodedEvent::PurchasedPresale(_)
        | DecodedEvent::CheckClaim(_)
        | DecodedEvent::ClaimRewards(_)
        | DecodedEvent::WithdrawLpToken(_)
        | DecodedEvent::Withdraw(_)
        | DecodedEvent::CreatorClaimVesting(_)
        | DecodedEvent::CreatorWithdrawLpToken(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Address, CheckClaimEvent, LaunchTokenAmmEvent};

    fn addr(byte: u8) -> Address {
        Address::new_from_array([byte; 32])
    }

    #[test]
    fn launch_sets_launched() {
        let event = DecodedEvent::LaunchTokenAmm(LaunchTokenAmmEvent {
            pool: addr(1),
            payer: addr(2),
            amount_coin: 1,
            amount_pc: 1,
            amount_lp_received: 1,
            vesting_started_at: 0,
            vesting_ending_at: 1,
            created_at: 0,
        });
        assert_eq!(status_after(&event), Some(PoolStatus::Launched));
    }

    #[test]
    fn claim_checks_leave_status_alone() {
        let event = DecodedEvent::CheckClaim(CheckClaimEvent {
            pool: addr(1),
            payer: addr(2),
            original_mint: addr(3),
            mint_eligible: 0,
            lp_eligible: 0,
            lp_eligible_after_fees: 0,
            created_at: 0,
        });
        assert_eq!(status_after(&event), None);
    }
}
