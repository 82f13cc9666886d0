//! Domain logic for the stock relocation backend.
//!
//! Pure types and validation shared by the persistence, engine, and API
//! layers: the error taxonomy, the acting context extracted from a
//! session, quantity classification, relocation state rules, and the
//! outcome/message aggregation that both response adapters render.

pub mod context;
pub mod error;
pub mod outcome;
pub mod quantity;
pub mod relocation;
pub mod types;
