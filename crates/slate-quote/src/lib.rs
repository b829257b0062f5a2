//! # Slate Quote
//!
//! Subscription pricing and production package quoting for Slate.
//!
//! ## Pricing Pipeline
//!
//! ```text
//! QuoteRequest ─▶ overages ─▶ discounts ─▶ aggregate ─▶ QuoteBreakdown
//!                                                   └─▶ phases ─▶ PackageQuote
//! ```
//!
//! Where:
//! - overages: excess seats per role, storage/bandwidth in whole blocks
//! - discounts: volume band on seat cost, bug reward on base, annual prepay
//! - phases: one monthly pipeline run per phase, summed over phase months
//!
//! The pipeline is synchronous and pure. Rate cards are swapped as whole
//! snapshots through [`CatalogStore`].

pub mod catalog;
pub mod config;
pub mod engine;
pub mod pricing;

pub use catalog::{BuiltinSource, CatalogStore, FileSource, RateCardSource};
pub use config::EngineConfig;
pub use engine::QuoteEngine;
pub use pricing::{aggregate_phases, compute_overages, price};
