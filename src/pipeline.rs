use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::events::{Address, decode_event_data};
use crate::lifecycle::PoolStatus;
use crate::lifecycle::mapping::status_after;
use crate::locator::matched_event_payloads;
use crate::projection::project;
use crate::store::{DocumentStore, WriteSet};
use crate::types::{PipelineContext, TransactionEnvelope};

/// Per-delivery counters, logged once per delivery and returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeliveryReport {
    pub transactions: usize,
    /// Instructions carrying a trusted self-CPI event.
    pub matched: usize,
    /// Matched payloads that decoded to a known event.
    pub decoded: usize,
    /// Decoded events whose projection succeeded, including no-op projections.
    pub projected: usize,
    /// Payloads that failed to decode plus events whose projection failed.
    pub dropped: usize,
    /// Status transitions that did not move a pool forward of an earlier one in the same delivery.
    /// They are still applied in delivery order.
    pub out_of_order: usize,
    pub writes: usize,
}

/// Everything one delivery would commit, before it reaches the store.
#[derive(Debug, Clone, Default)]
pub struct StagedDelivery {
    pub writes: WriteSet,
    pub report: DeliveryReport,
}

/// Locate, decode and project every event in the delivery.
///
/// A failing instruction contributes nothing; the rest of the delivery is
/// unaffected. Writes keep program order across transactions.
pub fn stage_delivery(ctx: &PipelineContext, txs: &[TransactionEnvelope]) -> StagedDelivery {
    let mut staged = StagedDelivery::default();
    staged.report.transactions = txs.len();
    let mut statuses: HashMap<Address, PoolStatus> = HashMap::new();

    for tx in txs {
        let signature = tx.signature.as_str();
        for payload in matched_event_payloads(ctx, tx) {
            staged.report.matched += 1;

            let event = match decode_event_data(payload) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    warn!(signature, error = %e, "dropping undecodable event");
                    staged.report.dropped += 1;
                    continue;
                }
            };
            staged.report.decoded += 1;

            let writes = match project(&event, signature) {
                Ok(writes) => writes,
                Err(e) => {
                    warn!(signature, event = %event.kind(), error = %e, "dropping unprojectable event");
                    staged.report.dropped += 1;
                    continue;
                }
            };

            if let Some(status) = status_after(&event) {
                let pool = *event.pool();
                match statuses.insert(pool, status) {
                    Some(previous) if !status.is_forward_of(previous) => {
                        warn!(signature, %pool, %previous, %status, "pool status transition out of order");
                        staged.report.out_of_order += 1;
                    }
                    _ => info!(signature, %pool, %status, "pool status transition"),
                }
            }
            debug!(signature, event = %event.kind(), writes = writes.len(), "projected event");

            staged.report.projected += 1;
            staged.writes.extend(writes);
        }
    }

    staged.report.writes = staged.writes.len();
    staged
}

/// Stage the delivery and commit it as a single batch.
///
/// Nothing is written when no event produced writes. A store failure fails
/// the whole delivery and, the batch being atomic, leaves the store untouched.
pub async fn process_delivery(
    ctx: &PipelineContext,
    store: &dyn DocumentStore,
    txs: &[TransactionEnvelope],
) -> Result<DeliveryReport, Error> {
    let StagedDelivery { writes, report } = stage_delivery(ctx, txs);

    if !writes.is_empty() {
        store.commit(writes).await.map_err(|e| {
            error!(error = %e, writes = report.writes, "delivery commit failed");
            Error::Store(e)
        })?;
    }

    info!(
        transactions = report.transactions,
        matched = report.matched,
        decoded = report.decoded,
        projected = report.projected,
        dropped = report.dropped,
        out_of_order = report.out_of_order,
        writes = report.writes,
        "delivery processed"
    );
    Ok(report)
}
