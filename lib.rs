/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Queryshell hosts an embedded API-query console inside an editor panel and
//! remembers the last-used endpoint across sessions.
//!
//! The crate is a thin orchestration layer: a singleton panel lifecycle
//! manager ([`panel::PanelRuntime`]), an endpoint resolver
//! ([`endpoint::resolve_endpoint`]), a redb-backed settings store
//! ([`persistence::SettingsStore`]), and a narrow inbound message protocol
//! ([`protocol::InboundMessage`]). The host's windowing and prompt facilities
//! are reached exclusively through the capability traits in [`host`]; the
//! console surface itself is a bundled third-party script this crate only
//! embeds.

pub mod command;
pub mod endpoint;
pub mod host;
pub mod panel;
pub mod persistence;
pub mod protocol;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
