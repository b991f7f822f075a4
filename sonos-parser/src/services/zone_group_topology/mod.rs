//! ZoneGroupTopology documents
//!
//! Decodes the household topology (groups, coordinators and member locations)
//! either from a `GetZoneGroupState` response or from a UPnP event body.

mod parser;

pub use parser::{
    Property, Satellite, ZoneGroup, ZoneGroupMember, ZoneGroupState, ZoneGroupTopologyParser,
    ZoneGroups,
};
