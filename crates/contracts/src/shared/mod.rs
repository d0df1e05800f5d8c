pub mod indicators;
pub mod list_state;
