//! Parser for `pactl list` output.
//!
//! The listing is a sequence of entity blocks. Each block starts with a
//! `<Type> #<id>` header followed by tab-indented fields:
//!
//! ```text
//! Sink #0
//! 	State: SUSPENDED
//! 	Name: alsa_output.pci-0000_00_1f.3.analog-stereo
//! 	Volume: front-left: 65536 / 100% / 0.00 dB,   front-right: 65536 / 100% / 0.00 dB
//! 	        balance 0.00
//! 	Properties:
//! 		device.description = "Built-in Audio"
//! 	Ports:
//! 		analog-output-speaker: Speakers (type: Speaker, priority: 10000, available)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pulsecontrol::parser::parse_listing;
//!
//! let output = std::fs::read_to_string("listing.txt")?;
//! for entity in parse_listing(&output)? {
//!     println!("{} #{}", entity.kind(), entity.id());
//! }
//! ```

pub mod block;
pub mod cursor;
mod detailed;
mod entity;
pub mod event;
pub mod primitive;
pub mod proplist;
pub mod stat;
pub mod structured;

// Re-export main entry points
pub use block::{FieldReader, FieldTable, FieldValue, Fields, Primitive, Structured};
pub use cursor::Cursor;
pub use detailed::read_detailed_list;
pub use entity::{field_table, match_header, parse_listing};
pub use event::{parse_event, Event};
pub use proplist::{read_inline_proplist, read_properties, PropScanner};
pub use stat::{parse_info, parse_stat, MemoryStats};
