// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod classify;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod event;
pub mod ingest;
pub mod lexicon;
pub mod locate;
pub mod metrics;
pub mod pipeline;
pub mod rank;

// Sibling analyses over the same records
pub mod military;
pub mod predictions;
pub mod signals;

// ---- Re-exports for stable public API ----
pub use crate::api::create_router;
pub use crate::engine::{EngineHandle, EnrichmentEngine};
pub use crate::event::{Category, Classification, EnrichedEvent, Location, Severity};
pub use crate::ingest::types::{RawRecord, SourceProvider, SourceSystem};
pub use crate::pipeline::{enrich_and_rank, RankedEventSet};
