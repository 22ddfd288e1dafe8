use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::store::{Document, DocumentPath, DocumentStore, FieldValue, StoreError, WriteSet};

fn unix_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

/// In-process [`DocumentStore`].
///
/// A commit applies the batch to staged copies of the documents it touches
/// and swaps them in, so a rejected write leaves every document as it was. `ServerTimestamp` resolves to one
/// unix-millisecond value per commit.
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, Document>>,
    clock: fn() -> i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(unix_millis)
    }

    pub fn with_clock(clock: fn() -> i64) -> Self {
        Self {
            docs: Mutex::new(BTreeMap::new()),
            clock,
        }
    }

    /// Copy of every document keyed by its rendered path.
    pub fn snapshot(&self) -> Result<BTreeMap<String, Document>, StoreError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Document>>, StoreError> {
        self.docs.lock().map_err(|_| StoreError::Unavailable {
            reason: "memory store lock poisoned".into(),
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn commit(&self, batch: WriteSet) -> Result<(), StoreError> {
        let now = (self.clock)();
        let mut docs = self.lock()?;
        // Only documents the batch touches are copied.
        let mut staged: BTreeMap<String, Document> = BTreeMap::new();

        for write in batch {
            let key = write.path.to_string();
            let doc = staged
                .entry(key.clone())
                .or_insert_with(|| docs.get(&key).cloned().unwrap_or_default());
            for (field, value) in write.fields {
                apply_field(doc, &field, value, now).map_err(|reason| StoreError::Rejected {
                    reason: format!("{key}.{field}: {reason}"),
                })?;
            }
        }

        docs.extend(staged);
        Ok(())
    }

    async fn get(&self, path: &DocumentPath) -> Result<Option<Document>, StoreError> {
        Ok(self.lock()?.get(&path.to_string()).cloned())
    }
}

fn apply_field(doc: &mut Document, field: &str, value: FieldValue, now: i64) -> Result<(), String> {
    match value {
        FieldValue::Set(v) => {
            doc.insert(field.to_string(), v);
        }
        FieldValue::ServerTimestamp => {
            doc.insert(field.to_string(), Value::from(now));
        }
        FieldValue::Increment(delta) => {
            let current = doc.get(field).and_then(Value::as_i64).unwrap_or(0);
            let next = current
                .checked_add(delta)
                .ok_or_else(|| format!("increment {current} + {delta} overflows"))?;
            doc.insert(field.to_string(), Value::from(next));
        }
        FieldValue::ArrayUnion(values) => {
            let mut items = take_array(doc, field);
            for v in values {
                if !items.contains(&v) {
                    items.push(v);
                }
            }
            doc.insert(field.to_string(), Value::Array(items));
        }
        FieldValue::ArrayRemove(values) => {
            let mut items = take_array(doc, field);
            items.retain(|item| !values.contains(item));
            doc.insert(field.to_string(), Value::Array(items));
        }
    }
    Ok(())
}

fn take_array(doc: &mut Document, field: &str) -> Vec<Value> {
    match doc.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::store::DocumentWrite;
    use serde_json::json;

    fn fixed_clock() -> i64 {
        1_700_000_000_000
    }

    #[tokio::test]
    async fn merge_leaves_other_fields_untouched() {
        let store = MemoryStore::with_clock(fixed_clock);
        let path = DocumentPath::pool("P");
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(path.clone()).set("a", 1).set("b", 2),
            ]))
            .await
            .unwrap();
        store
            .commit(WriteSet::from(vec![DocumentWrite::merge(path.clone()).set("b", 3)]))
            .await
            .unwrap();

        let doc = store.get(&path).await.unwrap().unwrap();
        assert_eq!(doc.get("a"), Some(&json!(1)));
        assert_eq!(doc.get("b"), Some(&json!(3)));
    }

    #[tokio::test]
    async fn increments_default_to_zero_and_compose_in_order() {
        let store = MemoryStore::with_clock(fixed_clock);
        let path = DocumentPath::pool("P");
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(path.clone()).increment("total", 4),
                DocumentWrite::merge(path.clone()).increment("total", 6),
            ]))
            .await
            .unwrap();
        let doc = store.get(&path).await.unwrap().unwrap();
        assert_eq!(doc.get("total"), Some(&json!(10)));
    }

    #[tokio::test]
    async fn array_union_skips_duplicates_and_remove_drops_matches() {
        let store = MemoryStore::with_clock(fixed_clock);
        let path = DocumentPath::pool("P");
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(path.clone()).array_union("xs", "a"),
                DocumentWrite::merge(path.clone()).array_union("xs", "b"),
                DocumentWrite::merge(path.clone()).array_union("xs", "a"),
            ]))
            .await
            .unwrap();
        let doc = store.get(&path).await.unwrap().unwrap();
        assert_eq!(doc.get("xs"), Some(&json!(["a", "b"])));

        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(path.clone()).array_remove("xs", "a"),
            ]))
            .await
            .unwrap();
        let doc = store.get(&path).await.unwrap().unwrap();
        assert_eq!(doc.get("xs"), Some(&json!(["b"])));
    }

    #[tokio::test]
    async fn server_timestamp_uses_store_clock() {
        let store = MemoryStore::with_clock(fixed_clock);
        let path = DocumentPath::pool("P");
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(path.clone()).server_timestamp("updatedAt"),
            ]))
            .await
            .unwrap();
        let doc = store.get(&path).await.unwrap().unwrap();
        assert_eq!(doc.get("updatedAt"), Some(&json!(1_700_000_000_000_i64)));
    }

    #[tokio::test]
    async fn rejected_batch_applies_nothing() {
        let store = MemoryStore::with_clock(fixed_clock);
        let ok = DocumentPath::pool("OK");
        let big = DocumentPath::pool("BIG");
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(big.clone()).set("n", i64::MAX),
            ]))
            .await
            .unwrap();

        let result = store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(ok.clone()).set("touched", true),
                DocumentWrite::merge(big.clone()).increment("n", 1),
            ]))
            .await;
        assert!(matches!(result, Err(StoreError::Rejected { .. })));
        assert!(store.get(&ok).await.unwrap().is_none());
        assert_eq!(
            store.get(&big).await.unwrap().unwrap().get("n"),
            Some(&json!(i64::MAX))
        );
    }

    #[tokio::test]
    async fn commit_keeps_documents_outside_the_batch() {
        let store = MemoryStore::with_clock(fixed_clock);
        let first = DocumentPath::pool("A");
        let second = DocumentPath::pool("B");
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(first.clone()).set("n", 1),
            ]))
            .await
            .unwrap();
        store
            .commit(WriteSet::from(vec![
                DocumentWrite::merge(second.clone()).set("n", 2),
                DocumentWrite::merge(second.clone()).increment("n", 3),
            ]))
            .await
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot["pools/A"].get("n"), Some(&json!(1)));
        assert_eq!(snapshot["pools/B"].get("n"), Some(&json!(5)));
    }
}
