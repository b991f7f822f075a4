//! DIDL-Lite track metadata
//!
//! Sonos describes a streamed item with a small DIDL-Lite document. Only the
//! fields needed to hand the item back to `SetAVTransportURI` are kept.

use std::sync::LazyLock;

use quick_xml::escape::{escape, unescape};
use regex::Regex;
use serde::{Deserialize, Serialize};

const DIDL_OPEN: &str = concat!(
    r#"<DIDL-Lite xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
    r#"xmlns:upnp="urn:schemas-upnp-org:metadata-1-0/upnp/" "#,
    r#"xmlns:r="urn:schemas-rinconnetworks-com:metadata-1-0/" "#,
    r#"xmlns="urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/">"#,
    r#"<item id="-1" parentID="-1" restricted="true">"#,
);
const DIDL_CLOSE: &str = "</item></DIDL-Lite>";

/// How field text is written into the DIDL-Lite fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataEncoding {
    /// XML-escape field text so titles like `Rock & Roll` stay well-formed
    #[default]
    Escaped,
    /// Concatenate field text unchanged, matching older controllers byte for byte
    Verbatim,
}

/// Descriptive metadata for a non-queue media item
///
/// Every field is optional; a fragment missing some elements still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub protocol_info: Option<String>,
    pub res: Option<String>,
    pub stream_content: Option<String>,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub album_art_uri: Option<String>,
}

impl TrackMetadata {
    /// Extract metadata from a DIDL-Lite fragment
    ///
    /// Each field is matched on its own. Elements that are missing or empty
    /// come back as `None`; entity references are decoded.
    pub fn parse(fragment: &str) -> Self {
        let Some(patterns) = PATTERNS.as_ref() else {
            return Self::default();
        };
        Self {
            protocol_info: capture(&patterns.protocol_info, fragment),
            res: capture(&patterns.res, fragment),
            stream_content: capture(&patterns.stream_content, fragment),
            title: capture(&patterns.title, fragment),
            creator: capture(&patterns.creator, fragment),
            album_artist: capture(&patterns.album_artist, fragment),
            album: capture(&patterns.album, fragment),
            album_art_uri: capture(&patterns.album_art_uri, fragment),
        }
    }

    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the DIDL-Lite fragment accepted by `SetAVTransportURI`
    ///
    /// Absent fields are written as empty elements.
    pub fn to_didl(&self, encoding: MetadataEncoding) -> String {
        let text = |value: &Option<String>| -> String {
            let raw = value.as_deref().unwrap_or_default();
            match encoding {
                MetadataEncoding::Escaped => escape(raw).into_owned(),
                MetadataEncoding::Verbatim => raw.to_string(),
            }
        };

        let mut didl = String::from(DIDL_OPEN);
        didl.push_str(&format!(
            r#"<res protocolInfo="{}">{}</res>"#,
            text(&self.protocol_info),
            text(&self.res)
        ));
        for (tag, value) in [
            ("r:streamContent", &self.stream_content),
            ("dc:title", &self.title),
            ("dc:creator", &self.creator),
            ("r:albumArtist", &self.album_artist),
            ("upnp:album", &self.album),
            ("upnp:albumArtURI", &self.album_art_uri),
        ] {
            didl.push_str(&format!("<{tag}>{}</{tag}>", text(value)));
        }
        didl.push_str(DIDL_CLOSE);
        didl
    }
}

static PATTERNS: LazyLock<Option<FieldPatterns>> = LazyLock::new(FieldPatterns::compile);

/// One compiled pattern per extracted field, capture group 1 holding the value
struct FieldPatterns {
    protocol_info: Regex,
    res: Regex,
    stream_content: Regex,
    title: Regex,
    creator: Regex,
    album_artist: Regex,
    album: Regex,
    album_art_uri: Regex,
}

impl FieldPatterns {
    fn compile() -> Option<Self> {
        Some(Self {
            protocol_info: Regex::new(r#"(?s)<res\b[^>]*?\bprotocolInfo="([^"]*)""#).ok()?,
            res: Regex::new(r"(?s)<res\b[^>]*>(.*?)</res>").ok()?,
            stream_content: element("r:streamContent")?,
            title: element("dc:title")?,
            creator: element("dc:creator")?,
            album_artist: element("r:albumArtist")?,
            album: element("upnp:album")?,
            album_art_uri: element("upnp:albumArtURI")?,
        })
    }
}

fn element(tag: &str) -> Option<Regex> {
    let tag = regex::escape(tag);
    Regex::new(&format!(r"(?s)<{tag}>(.*?)</{tag}>")).ok()
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    let raw = re.captures(text)?.get(1)?.as_str();
    if raw.is_empty() {
        return None;
    }
    // Verbatim fragments may hold a bare `&`; keep the raw text then
    let decoded = unescape(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    Some(decoded)
}
