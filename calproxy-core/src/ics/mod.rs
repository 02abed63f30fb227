//! iCalendar reading and writing.
//!
//! Parsing goes through the icalendar crate's parser; output is written
//! line by line so that components the pipeline does not understand survive
//! unchanged.

mod parse;
mod text;
mod write;

pub use parse::{parse_feed, parse_feed_str};
pub use text::{escape, escape_list};
pub use write::write_feed;
