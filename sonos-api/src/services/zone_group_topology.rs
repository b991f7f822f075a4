//! ZoneGroupTopology actions
//!
//! The state arrives as an escaped XML document; `sonos-parser` reads it.

use crate::upnp_action;

upnp_action! {
    fn get_zone_group_state => GetZoneGroupState on ZoneGroupTopology {} -> TopologyDocument {
        zone_group_state: String => "ZoneGroupState",
    }
}
