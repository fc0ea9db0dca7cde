//! Research note scaffolding and search/extract API tooling.
//!
//! Quarry keeps a research workspace laid out as
//!
//! ```text
//! <workspace>/research/<topic>/TEMPLATE.md
//! <workspace>/research/<topic>/<YYYY-MM-DD>/<YYYY-MM-DD>_<HHMM>_<slug>.md
//! ```
//!
//! and talks to an external search / extract / chat service whose raw JSON
//! responses are saved next to the notes they feed.
//!
//! | Topic | Directory |
//! |-------|-----------|
//! | FinOps | `finops` |
//! | Native Apps | `native-apps` |
//! | Snowpark | `snowpark` |
//! | Container Services | `scs` |
//! | Governance | `governance` |
//! | Observability | `observability` |
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`notes`]: Note scaffolding: topic validation, slugs, templates, no-clobber creation
//! - [`api`]: Async client for the search, extract, and chat endpoints
//! - [`research`]: Source ranking, response persistence, and multi-query gather sessions

pub mod api;
pub mod config;
pub mod notes;
pub mod research;
