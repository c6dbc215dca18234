//! Domain layer for VoxShell
//!
//! Contains the conversation model, UI preference state, dispatcher effects,
//! and domain errors. This layer has no external collaborators and defines
//! the ubiquitous language.

pub mod effects;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use effects::UiEffect;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
