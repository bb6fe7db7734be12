use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Byte sequence that terminates a request line on the wire.
///
/// The same sequence terminates each response line.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RequestDelimiter {
    /// Carriage return followed by line feed.
    #[default]
    Crlf,
    /// A bare line feed.
    Lf,
}

impl RequestDelimiter {
    /// Raw delimiter bytes.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Crlf => b"\r\n",
            Self::Lf => b"\n",
        }
    }

    /// Delimiter as text, for building responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// Errors encountered while parsing a [`RequestDelimiter`] from text.
pub type RequestDelimiterParseError = strum::ParseError;
