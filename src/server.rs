use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{Json, WithStatus};
use warp::{Filter, Rejection, Reply};

use crate::pipeline::process_delivery;
use crate::store::DocumentStore;
use crate::types::{PipelineContext, TransactionEnvelope};

/// Largest webhook body accepted.
pub const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shared handles every delivery needs.
#[derive(Clone)]
pub struct WebhookState {
    ctx: Arc<PipelineContext>,
    store: Arc<dyn DocumentStore>,
    auth: Option<Arc<str>>,
}

impl WebhookState {
    pub fn new(ctx: Arc<PipelineContext>, store: Arc<dyn DocumentStore>, auth: Option<String>) -> Self {
        Self {
            ctx,
            store,
            auth: auth.map(Arc::from),
        }
    }
}

fn ok() -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&StatusResponse {
            status: "ok".to_string(),
        }),
        StatusCode::OK,
    )
}

fn error_reply(status: StatusCode, error: impl Into<String>) -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse {
            error: error.into(),
        }),
        status,
    )
}

/// The webhook endpoint at `/`.
///
/// `POST` takes a JSON array of transactions and commits one batch. `GET` is a
/// liveness probe. Other methods get `405`.
pub fn routes(
    state: WebhookState,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let with_state = warp::any().map(move || state.clone());

    let delivery = warp::path::end()
        .and(warp::post())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(with_state)
        .and_then(handle_delivery);

    let health = warp::path::end().and(warp::get()).map(ok);

    delivery.or(health).recover(handle_rejection)
}

async fn handle_delivery(
    authorization: Option<String>,
    body: Bytes,
    state: WebhookState,
) -> Result<WithStatus<Json>, Rejection> {
    let authorized = state
        .auth
        .as_deref()
        .is_none_or(|expected| authorization.as_deref() == Some(expected));
    if !authorized {
        warn!("rejecting webhook with missing or wrong authorization");
        return Ok(error_reply(StatusCode::UNAUTHORIZED, "unauthorized"));
    }

    let txs: Vec<TransactionEnvelope> = match serde_json::from_slice(&body) {
        Ok(txs) => txs,
        Err(e) => {
            warn!(error = %e, "malformed webhook body");
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                format!("malformed webhook body: {e}"),
            ));
        }
    };

    match process_delivery(&state.ctx, state.store.as_ref(), &txs).await {
        Ok(_) => Ok(ok()),
        Err(e) => {
            error!(error = %e, transactions = txs.len(), "webhook delivery failed");
            Ok(error_reply(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

async fn handle_rejection(rejection: Rejection) -> Result<WithStatus<Json>, Infallible> {
    let reply = if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        error_reply(StatusCode::PAYLOAD_TOO_LARGE, "payload too large")
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        error_reply(StatusCode::LENGTH_REQUIRED, "content length required")
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    } else if rejection.is_not_found() {
        error_reply(StatusCode::NOT_FOUND, "not found")
    } else {
        warn!(?rejection, "unhandled webhook rejection");
        error_reply(StatusCode::BAD_REQUEST, "bad request")
    };
    Ok(reply)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::events::{Address, DecodedEvent, PurchasedPresaleEvent};
    use crate::store::{Document, DocumentPath, MemoryStore, StoreError, WriteSet};
    use serde_json::{Value, json};
    use solana_pubkey::Pubkey;

    struct UnavailableStore;

    #[async_trait::async_trait]
    impl DocumentStore for UnavailableStore {
        async fn commit(&self, _batch: WriteSet) -> Result<(), StoreError> {
            Err(StoreError::Unavailable {
                reason: "offline".into(),
            })
        }

        async fn get(&self, _path: &DocumentPath) -> Result<Option<Document>, StoreError> {
            Ok(None)
        }
    }

    fn ctx() -> Arc<PipelineContext> {
        Arc::new(PipelineContext::new(
            Pubkey::new_from_array([1; 32]),
            Pubkey::new_from_array([2; 32]),
        ))
    }

    fn purchase_delivery(ctx: &PipelineContext) -> Value {
        let event = DecodedEvent::PurchasedPresale(PurchasedPresaleEvent {
            pool: Address::new_from_array([10; 32]),
            payer: Address::new_from_array([11; 32]),
            original_mint: Address::new_from_array([12; 32]),
            amount: 10,
            created_at: 1_700_000_000,
        });
        json!([{
            "signature": "sig",
            "instructions": [{
                "programId": ctx.trusted_program_str(),
                "accounts": [],
                "data": "",
                "innerInstructions": [{
                    "programId": ctx.trusted_program_str(),
                    "accounts": [ctx.event_authority_str()],
                    "data": event.to_base58().unwrap(),
                }]
            }]
        }])
    }

    fn body(res: &warp::http::Response<Bytes>) -> Value {
        serde_json::from_slice(res.body()).unwrap()
    }

    #[tokio::test]
    async fn post_commits_delivery() {
        let ctx = ctx();
        let store = Arc::new(MemoryStore::new());
        let filter = routes(WebhookState::new(ctx.clone(), store.clone(), None));

        let res = warp::test::request()
            .method("POST")
            .path("/")
            .json(&purchase_delivery(&ctx))
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(&res), json!({"status": "ok"}));
        let pool = store
            .get(&DocumentPath::pool(Address::new_from_array([10; 32])))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(pool["liquidityCollected"], json!(10));
    }

    #[tokio::test]
    async fn get_is_liveness_only() {
        let store = Arc::new(MemoryStore::new());
        let filter = routes(WebhookState::new(ctx(), store.clone(), None));

        let res = warp::test::request()
            .method("GET")
            .path("/")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let filter = routes(WebhookState::new(ctx(), Arc::new(MemoryStore::new()), None));

        let res = warp::test::request()
            .method("PUT")
            .path("/")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body(&res), json!({"error": "method not allowed"}));
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let filter = routes(WebhookState::new(ctx(), Arc::new(MemoryStore::new()), None));

        let res = warp::test::request()
            .method("POST")
            .path("/")
            .body("{not json")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body(&res)["error"].is_string());
    }

    #[tokio::test]
    async fn commit_failure_is_server_error() {
        let ctx = ctx();
        let filter = routes(WebhookState::new(ctx.clone(), Arc::new(UnavailableStore), None));

        let res = warp::test::request()
            .method("POST")
            .path("/")
            .json(&purchase_delivery(&ctx))
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn configured_auth_is_enforced() {
        let ctx = ctx();
        let store = Arc::new(MemoryStore::new());
        let filter = routes(WebhookState::new(
            ctx.clone(),
            store.clone(),
            Some("secret".to_string()),
        ));

        let denied = warp::test::request()
            .method("POST")
            .path("/")
            .header("authorization", "wrong")
            .json(&purchase_delivery(&ctx))
            .reply(&filter)
            .await;
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
        assert!(store.snapshot().unwrap().is_empty());

        let allowed = warp::test::request()
            .method("POST")
            .path("/")
            .header("authorization", "secret")
            .json(&purchase_delivery(&ctx))
            .reply(&filter)
            .await;
        assert_eq!(allowed.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_auth_header_is_unauthorized() {
        let ctx = ctx();
        let store = Arc::new(MemoryStore::new());
        let filter = routes(WebhookState::new(
            ctx.clone(),
            store.clone(),
            Some("secret".to_string()),
        ));

        let res = warp::test::request()
            .method("POST")
            .path("/")
            .json(&purchase_delivery(&ctx))
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let filter = routes(WebhookState::new(ctx(), Arc::new(MemoryStore::new()), None));

        let res = warp::test::request()
            .method("POST")
            .path("/")
            .body("[]")
            .header("content-length", (MAX_BODY_BYTES + 1).to_string())
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn post_without_length_is_rejected() {
        let filter = routes(WebhookState::new(ctx(), Arc::new(MemoryStore::new()), None));

        let res = warp::test::request()
            .method("POST")
            .path("/")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::LENGTH_REQUIRED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let filter = routes(WebhookState::new(ctx(), Arc::new(MemoryStore::new()), None));

        let res = warp::test::request()
            .method("GET")
            .path("/pools")
            .reply(&filter)
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&res), json!({"error": "not found"}));
    }
}
