use crate::error::Error;
use crate::events::{EventKind, PurchasedPresaleEvent, checked_u64_to_i64};
use crate::projection::{UPDATED_AT, history};
use crate::store::{DocumentPath, DocumentWrite, WriteSet};

/// Adds the purchase to both mint/pool link documents and to the pool total.
///
/// The same delta goes to three documents independently. Redelivering the
/// event adds it again.
pub fn purchased_presale(event: &PurchasedPresaleEvent, signature: &str) -> Result<WriteSet, Error> {
    let amount = checked_u64_to_i64(event.amount, "amount")?;
    let pool = event.pool.to_string();
    let mint = event.original_mint.to_string();

    let mut writes = WriteSet::new();
    writes.push(
        DocumentWrite::merge(DocumentPath::mint_pool(&mint, &pool))
            .set("pool", pool.as_str())
            .set("mint", mint.as_str())
            .increment("amount", amount)
            .server_timestamp(UPDATED_AT),
    );
    writes.push(
        DocumentWrite::merge(DocumentPath::pool_mint(&pool, &mint))
            .set("pool", pool.as_str())
            .set("mint", mint.as_str())
            .increment("amount", amount)
            .server_timestamp(UPDATED_AT),
    );
    writes.push(
        DocumentWrite::merge(DocumentPath::pool(&pool))
            .increment("liquidityCollected", amount)
            .array_union("backers", event.payer.to_string())
            .server_timestamp(UPDATED_AT),
    );
    writes.push(history::user_transaction(
        &event.payer,
        signature,
        EventKind::PurchasedPresale,
        event,
        event.created_at,
    )?);
    Ok(writes)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, clippy::panic, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::events::Address;
    use crate::store::FieldValue;
    use serde_json::json;

    fn addr(byte: u8) -> Address {
        Address::new_from_array([byte; 32])
    }

    fn event(amount: u64) -> PurchasedPresaleEvent {
        PurchasedPresaleEvent {
            pool: addr(1),
            payer: addr(2),
            original_mint: addr(3),
            amount,
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn increments_both_links_and_pool() {
        let writes = purchased_presale(&event(10), "sig").unwrap();
        assert_eq!(writes.len(), 4);

        for path in [
            DocumentPath::mint_pool(addr(3), addr(1)),
            DocumentPath::pool_mint(addr(1), addr(3)),
        ] {
            let link = writes.writes_to(&path).next().unwrap();
            assert_eq!(link.field("amount"), Some(&FieldValue::Increment(10)));
        }

        let pool = writes.writes_to(&DocumentPath::pool(addr(1))).next().unwrap();
        assert_eq!(
            pool.field("liquidityCollected"),
            Some(&FieldValue::Increment(10))
        );
        assert_eq!(
            pool.field("backers"),
            Some(&FieldValue::ArrayUnion(vec![json!(addr(2).to_string())]))
        );
    }

    #[test]
    fn history_record_carries_native_integers() {
        let writes = purchased_presale(&event(0xa), "sig").unwrap();
        let record = writes
            .writes_to(&DocumentPath::user_transaction(addr(2), "sig"))
            .next()
            .unwrap();
        let Some(FieldValue::Set(data)) = record.field("eventData") else {
            panic!("expected eventData");
        };
        assert_eq!(data["amount"], json!(10));
        assert_eq!(data["createdAt"], json!(1_700_000_000));
        assert_eq!(data["originalMint"], json!(addr(3).to_string()));
    }

    #[test]
    fn rejects_amount_overflow() {
        assert!(purchased_presale(&event(u64::MAX), "sig").is_err());
    }
}
