//! The request catalog served by the daemon.

use tracing::{debug, warn};

use crate::message_log::{Message, MessageError, MessageLog, Priority};

use super::errors::CommandError;
use super::{DISPATCH_TARGET, Parsed, Request, RequestDispatcher, ResponseBuffer, ResultCode};

/// Known request verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Ping,
    Post,
    PostOnce,
    Dump,
    Count,
}

impl Verb {
    /// Parses a verb (case-insensitive).
    fn parse(value: &str) -> Result<Self, CommandError> {
        match value.to_ascii_uppercase().as_str() {
            "PING" => Ok(Self::Ping),
            "POST" => Ok(Self::Post),
            "POSTONCE" => Ok(Self::PostOnce),
            "DUMP" => Ok(Self::Dump),
            "COUNT" => Ok(Self::Count),
            _ => Err(CommandError::unknown_verb(value)),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Ping => "PING",
            Self::Post => "POST",
            Self::PostOnce => "POSTONCE",
            Self::Dump => "DUMP",
            Self::Count => "COUNT",
        }
    }
}

/// Dispatcher for the built-in request catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Creates a dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn parse_request(line: &str) -> Result<Box<dyn Request>, CommandError> {
        let (verb, arguments) = split_token(line).unwrap_or((line, ""));
        let verb = Verb::parse(verb)?;
        match verb {
            Verb::Ping => {
                expect_no_arguments(verb, arguments)?;
                Ok(Box::new(PingRequest))
            }
            Verb::Post => Ok(Box::new(PostRequest {
                message: parse_message(verb, arguments)?,
            })),
            Verb::PostOnce => Ok(Box::new(PostOnceRequest {
                message: parse_message(verb, arguments)?,
            })),
            Verb::Dump => Ok(Box::new(DumpRequest {
                floor: parse_floor(verb, arguments)?,
            })),
            Verb::Count => {
                expect_no_arguments(verb, arguments)?;
                Ok(Box::new(CountRequest))
            }
        }
    }
}

impl RequestDispatcher for CommandDispatcher {
    fn parse(&self, line: &str) -> Parsed {
        match Self::parse_request(line) {
            Ok(request) => (ResultCode::Ok, Some(request)),
            Err(error) => {
                debug!(target: DISPATCH_TARGET, %error, "rejected request line");
                (error.result_code(), None)
            }
        }
    }
}

/// Splits off the first space-separated token, skipping leading spaces.
///
/// Returns `None` when no token remains.
fn split_token(input: &str) -> Option<(&str, &str)> {
    let trimmed = input.trim_start_matches(' ');
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.split_once(' ').unwrap_or((trimmed, "")))
}

fn expect_no_arguments(verb: Verb, arguments: &str) -> Result<(), CommandError> {
    match split_token(arguments) {
        None => Ok(()),
        Some((extra, _)) => Err(CommandError::unexpected_argument(verb.as_str(), extra)),
    }
}

fn parse_priority(text: &str) -> Result<Priority, CommandError> {
    let priority = Priority::from_text(text);
    if priority.is_legal() {
        Ok(priority)
    } else {
        Err(CommandError::invalid_priority(text))
    }
}

fn parse_message(verb: Verb, arguments: &str) -> Result<Message, CommandError> {
    let (priority, rest) = split_token(arguments)
        .ok_or_else(|| CommandError::missing_argument(verb.as_str(), "priority"))?;
    let (username, body) = split_token(rest)
        .ok_or_else(|| CommandError::missing_argument(verb.as_str(), "username"))?;
    let body = body.trim_start_matches(' ');
    if body.is_empty() {
        return Err(CommandError::missing_argument(verb.as_str(), "body"));
    }

    let priority = parse_priority(priority)?;
    Message::new(body, username, priority).map_err(|error| match error {
        MessageError::IllegalPriority => CommandError::invalid_priority(priority.as_str()),
    })
}

fn parse_floor(verb: Verb, arguments: &str) -> Result<Priority, CommandError> {
    match split_token(arguments) {
        None => Ok(Priority::Debug),
        Some((floor, rest)) => {
            expect_no_arguments(verb, rest)?;
            parse_priority(floor)
        }
    }
}

/// Liveness probe; answers with the status line only.
#[derive(Debug)]
struct PingRequest;

impl Request for PingRequest {
    fn serve(self: Box<Self>, _log: &MessageLog, _response: &mut ResponseBuffer) {}
}

/// Appends a message.
#[derive(Debug)]
struct PostRequest {
    message: Message,
}

impl Request for PostRequest {
    fn serve(self: Box<Self>, log: &MessageLog, _response: &mut ResponseBuffer) {
        log.append(self.message);
    }
}

/// Appends a message unless an equal one is already stored.
#[derive(Debug)]
struct PostOnceRequest {
    message: Message,
}

impl Request for PostOnceRequest {
    fn serve(self: Box<Self>, log: &MessageLog, response: &mut ResponseBuffer) {
        let mut access = log.scoped_access();
        if access.contains(&self.message) {
            response.write_line("duplicate");
        } else {
            access.append(self.message);
        }
    }
}

/// Writes every message at or above a floor.
#[derive(Debug)]
struct DumpRequest {
    floor: Priority,
}

impl Request for DumpRequest {
    fn serve(self: Box<Self>, log: &MessageLog, response: &mut ResponseBuffer) {
        if let Err(error) = log.snapshot_dump(response, self.floor) {
            warn!(target: DISPATCH_TARGET, %error, "failed to render log dump");
        }
    }
}

/// Writes the number of stored messages.
#[derive(Debug)]
struct CountRequest;

impl Request for CountRequest {
    fn serve(self: Box<Self>, log: &MessageLog, response: &mut ResponseBuffer) {
        response.write_line(&log.len().to_string());
    }
}
