//! SBS BaseStation feed: line decoding and the TCP client task

mod client;
mod parser;

pub use client::{run_feed, FeedEvent};
pub use parser::{parse_line, SbsMessage};
