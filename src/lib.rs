//! pulsecontrol - Typed access to PulseAudio through pactl
//!
//! The core is a parser that turns the indentation-structured text printed by
//! `pactl list` into typed records. Around it sit a runner for the pactl
//! binary, command builders for the mutating subcommands, and a small CLI.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod pactl;
pub mod parser;
pub mod types;

pub use config::Config;
pub use error::{PulseError, Result};
pub use pactl::{ControlCommand, Endpoint, MuteAction, Pactl, Target};
pub use parser::{parse_event, parse_info, parse_listing, parse_stat, Event, MemoryStats};
pub use types::{
    Card, CardPort, ChannelVolumeList, Client, Entity, EntityKind, Format, Latency, Module, Port,
    Profile, PropertyList, Sample, SampleSpecification, Sink, SinkInput, Source, SourceOutput,
    Volume,
};
