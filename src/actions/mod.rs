//! Action Executor port and the available-actions catalog.
//!
//! The Action Executor runs named actions in an external system. The engine
//! only ever hands it an entity id through [`ActionRunner::run`]; the
//! catalog maps user-facing action names to those ids and tracks which
//! actions the user has allowed as trigger targets.

mod catalog;
mod runner;

pub use catalog::{ActionCatalog, ScriptAction};
pub use runner::{ActionRunner, NoopRunner, RecordingRunner};
