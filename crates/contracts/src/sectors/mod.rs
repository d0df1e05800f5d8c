//! Record types of the sector pages.
//!
//! Records are static fixture data: loaded once, never mutated. Ids are
//! unique within a collection and references between collections are plain
//! string ids.

pub mod billing;
pub mod fleet;
pub mod healthcare;
pub mod inventory;
pub mod law;
pub mod staffing;
pub mod tax;
