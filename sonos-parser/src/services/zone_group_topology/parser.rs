//! ZoneGroupTopology parser implementation

use serde::{Deserialize, Serialize};
use url::Url;

use crate::common::xml_decode;
use crate::error::{ParseError, ParseResult};

/// Root parser for ZoneGroupTopology UPnP events.
///
/// UPnP events are wrapped in a propertyset structure:
/// ```xml
/// <e:propertyset xmlns:e="urn:schemas-upnp-org:event-1-0">
///   <e:property>
///     <ZoneGroupState>...escaped document...</ZoneGroupState>
///   </e:property>
/// </e:propertyset>
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename = "propertyset")]
pub struct ZoneGroupTopologyParser {
    #[serde(rename = "property", default)]
    pub properties: Vec<Property>,
}

/// One `<property>` of a topology event.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Property {
    #[serde(
        rename = "ZoneGroupState",
        deserialize_with = "xml_decode::deserialize_nested_option",
        default
    )]
    pub zone_group_state: Option<ZoneGroupState>,
}

/// The household topology.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename = "ZoneGroupState")]
pub struct ZoneGroupState {
    #[serde(rename = "ZoneGroups", default)]
    pub zone_groups: ZoneGroups,
}

/// Container for all zone groups in the system.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ZoneGroups {
    #[serde(rename = "ZoneGroup", default)]
    pub zone_groups: Vec<ZoneGroup>,
}

/// Speakers playing together, driven by one coordinator.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZoneGroup {
    /// UUID of the member that owns the group's transport
    #[serde(rename = "@Coordinator")]
    pub coordinator: String,

    #[serde(rename = "@ID")]
    pub id: String,

    #[serde(rename = "ZoneGroupMember", default)]
    pub zone_group_members: Vec<ZoneGroupMember>,
}

/// A speaker that is part of a zone group.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ZoneGroupMember {
    /// Unique identifier for this speaker (RINCON_...)
    #[serde(rename = "@UUID")]
    pub uuid: String,

    /// Device description URL, e.g. `http://192.168.4.40:1400/xml/device_description.xml`
    #[serde(rename = "@Location")]
    pub location: String,

    #[serde(rename = "@ZoneName", default)]
    pub zone_name: String,

    #[serde(rename = "@Invisible", default)]
    pub invisible: Option<String>,

    /// Home theater satellites bonded to this member
    #[serde(rename = "Satellite", default)]
    pub satellites: Vec<Satellite>,
}

/// A satellite speaker (surround or sub) bonded to a member.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Satellite {
    #[serde(rename = "@UUID")]
    pub uuid: String,

    #[serde(rename = "@Location")]
    pub location: String,

    #[serde(rename = "@ZoneName", default)]
    pub zone_name: String,
}

impl ZoneGroupTopologyParser {
    /// Parse a ZoneGroupTopology event body.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        xml_decode::parse(xml)
    }

    /// The first ZoneGroupState property in the event, if any.
    pub fn zone_group_state(&self) -> Option<&ZoneGroupState> {
        self.properties
            .iter()
            .find_map(|p| p.zone_group_state.as_ref())
    }
}

impl ZoneGroupState {
    /// Parse a topology document.
    ///
    /// Accepts the document rooted at `<ZoneGroupState>` as well as the bare
    /// `<ZoneGroups>` form some firmware returns from `GetZoneGroupState`.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        match root_element(xml) {
            Some("ZoneGroupState") => xml_decode::parse(xml),
            Some("ZoneGroups") => Ok(Self {
                zone_groups: xml_decode::parse(xml)?,
            }),
            Some("propertyset") => ZoneGroupTopologyParser::from_xml(xml)?
                .zone_group_state()
                .cloned()
                .ok_or_else(|| ParseError::MissingRequiredElement("ZoneGroupState".to_string())),
            Some(other) => Err(ParseError::InvalidXmlStructure(format!(
                "unexpected root element <{}>",
                other
            ))),
            None => Err(ParseError::InvalidXmlStructure(
                "document has no root element".to_string(),
            )),
        }
    }

    /// All zone groups in the household.
    pub fn groups(&self) -> &[ZoneGroup] {
        &self.zone_groups.zone_groups
    }

    /// The group containing the speaker with `uuid`, including bonded satellites.
    pub fn group_of(&self, uuid: &str) -> Option<&ZoneGroup> {
        self.groups().iter().find(|group| group.contains(uuid))
    }

    /// The group member whose location URL points at `host`.
    pub fn member_at_host(&self, host: &str) -> Option<&ZoneGroupMember> {
        self.groups()
            .iter()
            .flat_map(|group| group.zone_group_members.iter())
            .find(|member| member.host().as_deref() == Some(host))
    }

    /// Whether the speaker with `uuid` coordinates its group.
    pub fn is_coordinator(&self, uuid: &str) -> bool {
        self.group_of(uuid)
            .map(|group| group.coordinator == uuid)
            .unwrap_or(false)
    }

    /// UUIDs of every group coordinator.
    pub fn coordinators(&self) -> Vec<&str> {
        self.groups()
            .iter()
            .map(|group| group.coordinator.as_str())
            .collect()
    }
}

impl ZoneGroup {
    /// Check if this group has multiple speakers.
    pub fn is_multi_speaker_group(&self) -> bool {
        self.zone_group_members.len() > 1
    }

    /// Get the coordinator member details.
    pub fn coordinator_member(&self) -> Option<&ZoneGroupMember> {
        self.zone_group_members
            .iter()
            .find(|member| member.uuid == self.coordinator)
    }

    fn contains(&self, uuid: &str) -> bool {
        self.zone_group_members.iter().any(|member| {
            member.uuid == uuid || member.satellites.iter().any(|sat| sat.uuid == uuid)
        })
    }
}

impl ZoneGroupMember {
    /// Host portion of the location URL.
    pub fn host(&self) -> Option<String> {
        location_host(&self.location)
    }
}

impl Satellite {
    /// Host portion of the location URL.
    pub fn host(&self) -> Option<String> {
        location_host(&self.location)
    }
}

fn location_host(location: &str) -> Option<String> {
    Url::parse(location)
        .ok()?
        .host_str()
        .map(|host| host.to_string())
}

/// Name of the first element, skipping the prolog, with any prefix removed.
fn root_element(xml: &str) -> Option<&str> {
    let mut rest = xml;
    loop {
        let start = rest.find('<')?;
        rest = &rest[start + 1..];
        if rest.starts_with('?') || rest.starts_with('!') {
            continue;
        }
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
            .unwrap_or(rest.len());
        let name = &rest[..end];
        return Some(name.rsplit(':').next().unwrap_or(name));
    }
}
