//! Parsing utilities shared across service parsers
//!
//! - [`xml_decode`]: namespace stripping and serde helpers for escaped XML

pub mod xml_decode;
