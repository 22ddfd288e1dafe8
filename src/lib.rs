#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod config;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod locator;
pub mod pipeline;
pub mod projection;
pub mod server;
pub mod store;
pub mod telemetry;
pub mod types;

pub use error::Error;
pub use events::{
    Address, DecodedEvent, EventKind, decode_event_bytes, decode_event_data, resolve_field_map,
};
pub use lifecycle::PoolStatus;
pub use lifecycle::mapping::status_after;
pub use locator::{matched_event_payloads, qualifying_inner};
pub use pipeline::{DeliveryReport, StagedDelivery, process_delivery, stage_delivery};
pub use projection::project;
pub use store::{
    Document, DocumentPath, DocumentStore, DocumentWrite, FieldValue, MemoryStore, StoreError,
    WriteSet,
};
pub use types::{InnerInstruction, Instruction, PipelineContext, TransactionEnvelope};
