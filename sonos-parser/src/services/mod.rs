//! Service-specific parsers

pub mod zone_group_topology;
