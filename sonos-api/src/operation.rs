//! Typed UPnP actions
//!
//! Each action type names its service and SOAP action, writes its arguments
//! into the request body and reads its `{Action}Response` element back. The
//! action types themselves are generated by [`crate::upnp_action!`].

use std::fmt;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use quick_xml::escape::escape;
use thiserror::Error;

use crate::error::ApiError;
use crate::service::Service;

pub use xmltree::Element;

/// One SOAP action on one service
pub trait UPnPOperation {
    type Request: Validate + fmt::Debug;
    type Response;

    const SERVICE: Service;
    const ACTION: &'static str;

    /// The argument elements, `InstanceID` first where the service takes one
    fn write_arguments(request: &Self::Request) -> String;

    /// Decode the `{Action}Response` element
    fn read_response(xml: &Element) -> Result<Self::Response, ApiError>;
}

/// Argument checks run before a request leaves the process
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// An argument the device would reject
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{parameter} {value} is outside {min}..={max}")]
    OutOfRange {
        parameter: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error("{parameter} '{value}' is not one of {allowed:?}")]
    NotAllowed {
        parameter: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("{parameter} must not be empty")]
    Empty { parameter: &'static str },
}

impl ValidationError {
    pub fn check_range<T>(parameter: &'static str, value: T, range: RangeInclusive<T>) -> Result<(), Self>
    where
        T: Copy + PartialOrd + Into<i64>,
    {
        if range.contains(&value) {
            return Ok(());
        }
        Err(Self::OutOfRange {
            parameter,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }

    pub fn check_allowed(
        parameter: &'static str,
        value: &str,
        allowed: &'static [&'static str],
    ) -> Result<(), Self> {
        if allowed.contains(&value) {
            return Ok(());
        }
        Err(Self::NotAllowed {
            parameter,
            value: value.to_string(),
            allowed,
        })
    }

    pub fn check_not_empty(parameter: &'static str, value: &str) -> Result<(), Self> {
        if value.is_empty() {
            Err(Self::Empty { parameter })
        } else {
            Ok(())
        }
    }
}

/// A request for one action, ready for [`crate::SonosClient::execute`]
pub struct Operation<Op: UPnPOperation> {
    request: Op::Request,
    _action: PhantomData<Op>,
}

impl<Op: UPnPOperation> Operation<Op> {
    pub fn new(request: Op::Request) -> Self {
        Self {
            request,
            _action: PhantomData,
        }
    }

    pub fn request(&self) -> &Op::Request {
        &self.request
    }

    /// Validate the arguments and render the SOAP body
    pub fn payload(&self) -> Result<String, ValidationError> {
        self.request.validate()?;
        Ok(Op::write_arguments(&self.request))
    }
}

impl<Op: UPnPOperation> fmt::Debug for Operation<Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("service", &Op::SERVICE.name())
            .field("action", &Op::ACTION)
            .field("request", &self.request)
            .finish()
    }
}

/// How an argument value is spelled inside its element
pub trait ArgumentValue {
    fn to_argument(&self) -> String;
}

impl ArgumentValue for String {
    fn to_argument(&self) -> String {
        escape(self.as_str()).into_owned()
    }
}

impl ArgumentValue for bool {
    fn to_argument(&self) -> String {
        let flag = if *self { "1" } else { "0" };
        flag.to_string()
    }
}

macro_rules! numeric_argument {
    ($($ty:ty),*) => {
        $(impl ArgumentValue for $ty {
            fn to_argument(&self) -> String {
                self.to_string()
            }
        })*
    };
}

numeric_argument!(u8, i8, u32);

/// A response element's text decoded into a field
pub trait ResponseValue: Sized {
    fn from_response(text: &str) -> Option<Self>;
}

impl ResponseValue for String {
    fn from_response(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

impl ResponseValue for bool {
    fn from_response(text: &str) -> Option<Self> {
        match text {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        }
    }
}

macro_rules! numeric_response {
    ($($ty:ty),*) => {
        $(impl ResponseValue for $ty {
            fn from_response(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        })*
    };
}

numeric_response!(u8, i8, u32);

#[doc(hidden)]
pub fn write_argument(body: &mut String, element: &str, value: &impl ArgumentValue) {
    body.push_str(&format!("<{element}>{}</{element}>", value.to_argument()));
}

/// Read a required child element of a response
///
/// An empty element reads as an empty string. A missing element, or text the
/// field type cannot hold, is a parse error.
#[doc(hidden)]
pub fn read_value<T: ResponseValue>(xml: &Element, element: &str) -> Result<T, ApiError> {
    let child = xml
        .get_child(element)
        .ok_or_else(|| ApiError::Parse(format!("{} has no <{}>", xml.name, element)))?;
    let text = child
        .get_text()
        .map(|text| text.trim().to_string())
        .unwrap_or_default();
    T::from_response(&text)
        .ok_or_else(|| ApiError::Parse(format!("<{}> holds unexpected value '{}'", element, text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[rstest]
    #[case(0u8, true)]
    #[case(100u8, true)]
    #[case(101u8, false)]
    fn test_check_range(#[case] value: u8, #[case] ok: bool) {
        assert_eq!(ValidationError::check_range("DesiredVolume", value, 0..=100).is_ok(), ok);
    }

    #[test]
    fn test_range_error_message() {
        let error = ValidationError::check_range("DesiredBass", -11i8, -10..=10).unwrap_err();
        assert_eq!(error.to_string(), "DesiredBass -11 is outside -10..=10");
    }

    #[test]
    fn test_check_allowed() {
        assert!(ValidationError::check_allowed("Unit", "REL_TIME", &["TRACK_NR", "REL_TIME"]).is_ok());
        match ValidationError::check_allowed("Unit", "BEAT", &["TRACK_NR", "REL_TIME"]) {
            Err(ValidationError::NotAllowed { value, .. }) => assert_eq!(value, "BEAT"),
            other => panic!("Expected NotAllowed, got {:?}", other),
        }
    }

    #[test]
    fn test_arguments_are_escaped_and_flags_numeric() {
        let mut body = String::new();
        write_argument(&mut body, "CurrentURI", &"http://a/?x=1&y=2".to_string());
        write_argument(&mut body, "DesiredMute", &true);
        write_argument(&mut body, "DesiredBass", &-3i8);
        assert_eq!(
            body,
            "<CurrentURI>http://a/?x=1&amp;y=2</CurrentURI><DesiredMute>1</DesiredMute><DesiredBass>-3</DesiredBass>"
        );
    }

    #[test]
    fn test_read_value() {
        let xml = response("<GetMuteResponse><CurrentMute> 1 </CurrentMute><Empty/></GetMuteResponse>");
        assert!(read_value::<bool>(&xml, "CurrentMute").unwrap());
        assert_eq!(read_value::<String>(&xml, "Empty").unwrap(), "");
    }

    #[test]
    fn test_read_value_rejects_missing_and_garbled() {
        let xml = response("<GetVolumeResponse><CurrentVolume>loud</CurrentVolume></GetVolumeResponse>");
        assert!(matches!(read_value::<u8>(&xml, "CurrentVolume"), Err(ApiError::Parse(_))));
        match read_value::<u8>(&xml, "CurrentBass") {
            Err(ApiError::Parse(msg)) => assert!(msg.contains("GetVolumeResponse")),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }
}
