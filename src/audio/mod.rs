//! Channel sets and audio file input
//!
//! This module provides the sample container consumed by the analysis engine
//! and the WAV loader used by the command-line front end.

mod buffer;
mod io;

pub use buffer::ChannelSet;
pub use io::load_wav;
