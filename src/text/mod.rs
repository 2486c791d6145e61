//! Text preparation for layout.
//!
//! Turns raw input into the flat list of lines the writer lays out, and
//! encodes those lines into the single-byte form content streams carry.
//!
//! - [`wrap`]: logical line splitting and greedy word wrapping
//! - [`latin1`]: ISO-8859-1 encoding with a strict or replacing policy

pub mod latin1;
pub mod wrap;

pub use latin1::{encode_latin1, encode_lines};
pub use wrap::{prepare_lines, wrap_line};
