// refmart-core/src/lib.rs

#![allow(missing_docs)]
// Memory safety
#![deny(unsafe_code)]
// Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (interfaces / traits)
// The storage contract the application depends on (Warehouse).
pub mod ports;

// 2. Domain (business core)
// Referral records, dimension builders, fact builder, quality rules.
// Depends on nothing else in the crate.
pub mod domain;

// 3. Infrastructure (adapters)
// DuckDB warehouse, CSV extract readers, YAML config, atomic file writes.
// Depends on the domain and the ports.
pub mod infrastructure;

// 4. Application (use cases)
// Pipeline orchestration, audit engine, report emitter, ad-hoc queries.
// Depends on the domain, the infra and the ports.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// Lets callers import the main error simply: use refmart_core::RefmartError;
pub use error::RefmartError;
