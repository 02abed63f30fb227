//! Calendar feed normalization.
//!
//! Takes a raw timetable feed and produces a cleaned one:
//! - `summary` shortens titles (tags, boilerplate, course name replacements)
//! - `location` turns room codes into building addresses and navigation links
//! - `assemble` drops duplicates and hidden courses and applies time offsets
//! - `courses` lists the distinct courses of a feed

pub mod assemble;
pub mod buildings;
pub mod constants;
pub mod courses;
pub mod error;
pub mod event;
pub mod feed;
pub mod ics;
pub mod location;
pub mod normalize;
pub mod offset;
pub mod replacements;
pub mod summary;
pub mod tables;

pub use assemble::{FeedAssembler, FeedOptions};
pub use courses::{Course, CourseRecurrence};
pub use error::{CalProxyError, CalProxyResult};
pub use event::{Event, EventStatus, EventTime};
pub use feed::{Feed, FeedComponent};
pub use offset::Offsets;
pub use tables::Tables;
