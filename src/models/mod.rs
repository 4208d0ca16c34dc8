//! Data models for the navigation-menu store.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod item;
mod menu;
mod snapshot;

pub use item::*;
pub use menu::*;
pub use snapshot::*;
