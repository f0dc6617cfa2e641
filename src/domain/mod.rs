//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep config, session and report structs in one place.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem side effects.
//!
//! ## Compatibility note
//! Changes in the report structs affect `--json` output.
//! Keep them synchronized with `docs/contracts/*`.

pub mod models;
