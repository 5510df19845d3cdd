/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The user-invokable open command.
//!
//! Resolves an endpoint, then opens or focuses the console panel. All
//! collaborators are passed in explicitly; the command owns no state.

use crate::endpoint::{self, EndpointSource, Resolution};
use crate::host::{PromptHost, ViewColumn, WorkbenchHost};
use crate::panel::PanelRuntime;
use crate::persistence::{SettingsStore, SettingsStoreError};

/// Command identifier the host binds to the open action.
pub const OPEN_BROWSER_COMMAND: &str = "queryshell.openBrowser";

const CANCELLED_MESSAGE: &str = "Cannot open the query console without a valid endpoint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened,
    Cancelled,
}

/// Open (or focus) the console panel against a resolved endpoint.
///
/// A cancelled resolution shows one error notification and opens nothing;
/// no state is written.
pub fn open_browser(
    runtime: &mut PanelRuntime,
    host: &mut dyn WorkbenchHost,
    prompts: &mut dyn PromptHost,
    store: &SettingsStore,
    source: &EndpointSource,
) -> Result<OpenOutcome, SettingsStoreError> {
    match endpoint::resolve_from_source(source, prompts, store)? {
        Resolution::Endpoint(url) => {
            runtime.create_or_show(host, &url, ViewColumn::default());
            Ok(OpenOutcome::Opened)
        }
        Resolution::Cancelled => {
            prompts.show_error_message(CANCELLED_MESSAGE);
            Ok(OpenOutcome::Cancelled)
        }
    }
}
