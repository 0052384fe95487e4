//! Running pactl: listings, server info and the control commands.

pub mod control;
mod runner;

pub use control::{null_sink, stringify_props, ControlCommand, Endpoint, MuteAction, Target};
pub use runner::Pactl;
