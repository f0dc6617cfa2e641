//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `session.rs` — load a series into a session, run adjust/check, build reports.
//! - `input.rs` — cell parsing for text, JSON, CSV and inline sources.
//! - `writeback.rs` — put adjusted values back into the source layout.
//! - `storage.rs` — config file and source reading/writing, source digest.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod input;
pub mod output;
pub mod session;
pub mod storage;
pub mod writeback;
