use serde::Serialize;

use crate::error::Error;
use crate::events::{Address, EventKind};
use crate::store::{DocumentPath, DocumentWrite, WriteSet};
use crate::projection::UPDATED_AT;

/// One audit entry under `users/{user}/transactions/{signature}`.
///
/// `eventData` is the typed record itself, so every integer lands as a JSON
/// number rather than the decoder's hex string.
pub fn user_transaction<T: Serialize>(
    user: &Address,
    signature: &str,
    kind: EventKind,
    record: &T,
    created_at: i64,
) -> Result<DocumentWrite, Error> {
    let event_data = serde_json::to_value(record)?;
    Ok(
        DocumentWrite::merge(DocumentPath::user_transaction(user, signature))
            .set("signature", signature)
            .set("user", user.to_string())
            .set("event", kind.as_ref())
            .set("eventData", event_data)
            .set("createdAt", created_at)
            .server_timestamp(UPDATED_AT),
    )
}

/// History under the payer, plus the original mint owner when that is someone else.
pub fn payer_and_owner<T: Serialize>(
    writes: &mut WriteSet,
    payer: &Address,
    owner: &Address,
    signature: &str,
    kind: EventKind,
    record: &T,
    created_at: i64,
) -> Result<(), Error> {
    writes.push(user_transaction(payer, signature, kind, record, created_at)?);
    if owner != payer {
        writes.push(user_transaction(owner, signature, kind, record, created_at)?);
    }
    Ok(())
}
