//! # Sparlog Architecture
//!
//! Sparlog is a purchase-and-savings tracker built as a **UI-agnostic
//! library** with a CLI client on top. The interesting parts are the storage
//! abstraction and the metrics engine; everything around them is thin glue.
//!
//! ## Layers
//!
//! - **CLI** (`main.rs` / `args.rs`): argument parsing and terminal output.
//!   The only place that knows about stdout, stderr, or exit codes.
//! - **API** ([`api`]): a thin facade, one method per operation, returning
//!   structured `CmdResult`s.
//! - **Commands** ([`commands`]): business logic. Regular arguments in,
//!   regular types out, no I/O assumptions.
//! - **Storage** ([`store`]): the dual-backend persistence layer. A shared
//!   [`store::EntryStore`] trait with a local JSON-file backend and an
//!   optional remote document-store backend; [`store::Storage`] re-resolves
//!   the active one on every call from the persisted profile preference plus
//!   remote availability, so switching modes needs no restart and a remote
//!   backend that failed to initialize falls back to local silently.
//! - **Metrics** ([`metrics`]): pure functions over the purchase log —
//!   totals, the SmartScore engagement blend, top savings category, best
//!   ISO week.
//!
//! ## Error philosophy
//!
//! Configuration absence (no remote credentials, malformed local JSON) is a
//! default, not an error: it shows up as `Option`/fallback values in type
//! signatures rather than as suppressed exceptions. Remote I/O failures are
//! real errors and propagate to the caller of the triggering operation;
//! nothing is fatal to the process.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod store;
