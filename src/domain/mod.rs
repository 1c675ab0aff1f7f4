//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has NO external dependencies (except serde for serialization).

mod chest;
mod entity;
mod item;
mod profile;
mod tab;

pub use chest::{
    build_command, command_budget, Chest, CommandBudget, InsertError, COMMAND_LIMIT,
    COMMAND_PREFIX,
};
pub use entity::{DomainError, DomainResult};
pub use item::Item;
pub use profile::Profile;
pub use tab::Tab;
