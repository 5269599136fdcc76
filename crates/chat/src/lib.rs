//! Chat pipeline - keyword preference extraction and reply rendering
//!
//! This crate turns one free-text chat message into one rendered reply:
//! - Scans the message for recognized attribute keywords and a price figure
//! - Queries the catalog with the extracted constraints
//! - Renders the matches (or an apology) into the reply template
//!
//! # Architecture
//!
//! Every message runs the same three-step pass:
//! 1. **Preference Extraction** (`extract`) - Scan text → `ConstraintSet`
//! 2. **Catalog Search** (`showroom-db`) - Equality filters + price ceiling
//! 3. **Reply Rendering** (`reply`) - Format listings into the fixed template
//!
//! # Key Types
//!
//! - `ChatRuntime` - Main orchestrator (see `runtime` module)
//! - `PreferenceExtractor` - Deterministic keyword scanner
//!
//! # Determinism Principle
//!
//! Extraction is pure string scanning. Nothing here ranks, scores, or guesses:
//! the same message always yields the same constraints and the same reply for
//! a given catalog state.

pub mod extract;
pub mod reply;
pub mod runtime;

pub use extract::PreferenceExtractor;
pub use reply::{render_reply, NO_MATCH_REPLY};
pub use runtime::ChatRuntime;
