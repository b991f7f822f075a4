//! # sonos-parser
//!
//! XML parsing for the documents Sonos speakers return about their household,
//! chiefly the ZoneGroupState topology used to tell group coordinators apart.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sonos_parser::ZoneGroupState;
//!
//! let state = ZoneGroupState::from_xml(&xml)?;
//! let member = state.member_at_host("192.168.1.20");
//! ```

pub mod common;
pub mod error;
pub mod services;

pub use error::{ParseError, ParseResult};

pub use services::zone_group_topology::{
    Property, Satellite, ZoneGroup, ZoneGroupMember, ZoneGroupState, ZoneGroupTopologyParser,
    ZoneGroups,
};
