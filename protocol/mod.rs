/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Inbound message protocol from the rendered content.
//!
//! The console page may post structured messages back to the lifecycle
//! manager. The protocol is a closed tagged set over the `command` field;
//! anything unrecognized (or malformed) decodes to [`InboundMessage::Unknown`]
//! and is dropped without error, which keeps the protocol extensible.

use serde::Deserialize;

/// A message posted by the rendered content.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum InboundMessage {
    /// Show a user-visible error notification with the given text.
    Alert { text: String },
    /// Any command this build does not recognize.
    #[serde(other)]
    Unknown,
}

/// Decode a raw message payload. Malformed payloads are treated the same as
/// unrecognized commands.
pub fn parse_message(raw: &serde_json::Value) -> InboundMessage {
    serde_json::from_value(raw.clone()).unwrap_or(InboundMessage::Unknown)
}
