//! Text output for operators.
//!
//! * `tabwriter` - column alignment of tab-separated text
//! * `table` - header, separator and rows on top of the tab writer
//! * `fields` - formatting of queue lists and uptimes
mod fields;
mod table;
mod tabwriter;

pub use fields::{format_duration, format_queues, round_to_seconds, time_ago};
pub use table::{RowTemplate, TableRenderer, TableRows};
pub use tabwriter::TabWriter;
