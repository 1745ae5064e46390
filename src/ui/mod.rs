//! Terminal presentation for the CLI
//!
//! Views render to `String` so they can be tested without a terminal;
//! commands decide where the text goes.

pub mod blocks;
pub mod context;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
