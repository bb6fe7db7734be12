//! Test suites for the message log daemon.

mod behaviour;
mod support;
