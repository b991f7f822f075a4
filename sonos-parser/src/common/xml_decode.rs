//! XML decoding utilities
//!
//! Sonos documents mix namespace prefixes and, inside events, carry whole XML
//! documents as escaped text. These helpers flatten both so plain serde
//! structs can describe the content.

use crate::error::{ParseError, ParseResult};
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::iter::Peekable;
use std::str::Chars;

/// Parse XML string into a deserializable type with namespace stripping.
pub fn parse<T: DeserializeOwned>(xml: &str) -> ParseResult<T> {
    let stripped = strip_namespaces(xml);
    quick_xml::de::from_str(&stripped)
        .map_err(|e| ParseError::XmlDeserializationFailed(e.to_string()))
}

/// Strip namespace prefixes from XML content to simplify parsing.
///
/// Element and attribute prefixes are dropped and `xmlns` declarations are
/// removed. Text content, processing instructions and comments are copied
/// unchanged.
///
/// # Example
///
/// Input: `<e:propertyset><dc:title>Song</dc:title></e:propertyset>`
/// Output: `<propertyset><title>Song</title></propertyset>`
pub fn strip_namespaces(xml: &str) -> String {
    let mut result = String::with_capacity(xml.len());
    let mut chars = xml.chars().peekable();

    while let Some(c) = chars.next() {
        result.push(c);
        if c != '<' {
            continue;
        }

        if let Some(slash) = chars.next_if_eq(&'/') {
            result.push(slash);
        }

        if matches!(chars.peek(), Some('?') | Some('!')) {
            copy_through(&mut chars, &mut result, '>');
            continue;
        }

        let tag_name = take_while(&mut chars, |ch| !(ch.is_whitespace() || ch == '>' || ch == '/'));
        result.push_str(local_name(&tag_name));

        strip_attributes(&mut chars, &mut result);
    }

    result
}

fn strip_attributes(chars: &mut Peekable<Chars<'_>>, result: &mut String) {
    while let Some(&ch) = chars.peek() {
        if ch == '>' {
            result.push(ch);
            chars.next();
            return;
        }
        if ch == '/' || ch.is_whitespace() {
            result.push(ch);
            chars.next();
            continue;
        }

        let attr_name = take_while(chars, |a| !(a == '=' || a.is_whitespace() || a == '>' || a == '/'));

        if attr_name.starts_with("xmlns") {
            chars.next_if_eq(&'=');
            if let Some(quote) = chars.next_if(|q| *q == '"' || *q == '\'') {
                skip_through(chars, quote);
            }
            continue;
        }

        result.push_str(local_name(&attr_name));

        // Copy `="value"` verbatim
        while let Some(&a) = chars.peek() {
            if a == '>' || a == '/' {
                break;
            }
            chars.next();
            result.push(a);
            if a == '"' || a == '\'' {
                copy_through(chars, result, a);
                break;
            }
        }
    }
}

fn local_name(name: &str) -> &str {
    match name.find(':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

fn take_while(chars: &mut Peekable<Chars<'_>>, keep: impl Fn(char) -> bool) -> String {
    let mut taken = String::new();
    while let Some(ch) = chars.next_if(|c| keep(*c)) {
        taken.push(ch);
    }
    taken
}

fn copy_through(chars: &mut Peekable<Chars<'_>>, result: &mut String, end: char) {
    for ch in chars.by_ref() {
        result.push(ch);
        if ch == end {
            break;
        }
    }
}

fn skip_through(chars: &mut Peekable<Chars<'_>>, end: char) {
    for ch in chars.by_ref() {
        if ch == end {
            break;
        }
    }
}

/// Custom deserializer for nested XML content.
///
/// For elements whose text is an escaped XML document, used with serde's
/// `deserialize_with` attribute.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Property {
///     #[serde(deserialize_with = "deserialize_nested")]
///     zone_group_state: ZoneGroupState,
/// }
/// ```
pub fn deserialize_nested<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let s = String::deserialize(deserializer)?;
    parse::<T>(&s).map_err(serde::de::Error::custom)
}

/// Like [`deserialize_nested`], but an absent or empty element yields `None`.
pub fn deserialize_nested_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let s = Option::<String>::deserialize(deserializer)?;
    match s {
        Some(text) if !text.trim().is_empty() => {
            parse::<T>(&text).map(Some).map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}
