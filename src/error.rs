use roxmltree::{Error as XmlError};
use svgtypes::Error as SvgError;
use std::fmt;

/// Why a path string was rejected.
#[derive(Debug)]
pub enum PathFault {
    Empty,
    Syntax(SvgError),
    MissingMoveTo,
    DanglingClose,
    NonFinite,
}
impl From<SvgError> for PathFault {
    fn from(e: SvgError) -> Self {
        PathFault::Syntax(e)
    }
}
impl fmt::Display for PathFault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PathFault::Empty => write!(f, "empty path data"),
            PathFault::Syntax(ref e) => write!(f, "{}", e),
            PathFault::MissingMoveTo => write!(f, "path does not start with a move"),
            PathFault::DanglingClose => write!(f, "close without an open subpath"),
            PathFault::NonFinite => write!(f, "non-finite number"),
        }
    }
}

/// A path string that could not be converted.
///
/// The message always contains the raw path data so callers can log it as-is.
#[derive(Debug)]
pub struct MalformedPathError {
    data: String,
    fault: PathFault,
}
impl MalformedPathError {
    pub fn new(data: &str, fault: PathFault) -> MalformedPathError {
        MalformedPathError { data: data.into(), fault }
    }
    pub fn data(&self) -> &str {
        &self.data
    }
    pub fn fault(&self) -> &PathFault {
        &self.fault
    }
}
impl fmt::Display for MalformedPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error Path!\nData:{}\nPlease check whether the path is correct.", self.data)
    }
}
impl std::error::Error for MalformedPathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.fault {
            PathFault::Syntax(ref e) => Some(e),
            _ => None
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Xml(XmlError),
    NotSvg,
    TooShort,
    InvalidAttributeValue(String),
    MalformedPath(MalformedPathError),
}
impl From<XmlError> for Error {
    fn from(e: XmlError) -> Self {
        Error::Xml(e)
    }
}
impl From<SvgError> for Error {
    fn from(e: SvgError) -> Self {
        Error::InvalidAttributeValue(e.to_string())
    }
}
impl From<MalformedPathError> for Error {
    fn from(e: MalformedPathError) -> Self {
        Error::MalformedPath(e)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Xml(ref e) => write!(f, "xml: {}", e),
            Error::NotSvg => write!(f, "root element is not <svg>"),
            Error::TooShort => write!(f, "attribute list too short"),
            Error::InvalidAttributeValue(ref s) => write!(f, "invalid attribute value: {}", s),
            Error::MalformedPath(ref e) => write!(f, "{}", e),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Xml(ref e) => Some(e),
            Error::MalformedPath(ref e) => Some(e),
            _ => None
        }
    }
}

#[test]
fn test_message() {
    let e = MalformedPathError::new("Z", PathFault::DanglingClose);
    assert_eq!(e.to_string(), "Error Path!\nData:Z\nPlease check whether the path is correct.");
}
