/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Endpoint resolution: reuse the persisted endpoint or prompt for a new one.
//!
//! The resolver is a sequential chain of suspend points (choice, then input)
//! running on the host's UI event loop. Cancelling any prompt aborts the
//! whole resolution with zero side effects; a successful resolution writes
//! the chosen value to the settings store before returning it.

use url::Url;

use crate::host::PromptHost;
use crate::persistence::{SettingsStore, SettingsStoreError};

const NEW_ENDPOINT_ITEM: &str = "Enter a new endpoint...";
const PICK_PLACEHOLDER: &str = "Select the API endpoint to query";
const INPUT_PROMPT: &str = "API endpoint URL";
const INVALID_URL_MESSAGE: &str = "Not a valid URL";

/// Where the command obtains its endpoint.
///
/// `Fixed` exists for embeddings that pin the console to a known endpoint;
/// it bypasses prompting and never touches the settings store.
#[derive(Debug, Clone)]
pub enum EndpointSource {
    Prompted,
    Fixed(String),
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Endpoint(String),
    /// The user dismissed a prompt; nothing was persisted.
    Cancelled,
}

/// Resolve an endpoint according to the given source.
pub fn resolve_from_source(
    source: &EndpointSource,
    prompts: &mut dyn PromptHost,
    store: &SettingsStore,
) -> Result<Resolution, SettingsStoreError> {
    match source {
        EndpointSource::Prompted => resolve_endpoint(prompts, store),
        EndpointSource::Fixed(url) => Ok(Resolution::Endpoint(url.clone())),
    }
}

/// Resolve an endpoint interactively, preferring reuse of the persisted
/// value over re-entry.
pub fn resolve_endpoint(
    prompts: &mut dyn PromptHost,
    store: &SettingsStore,
) -> Result<Resolution, SettingsStoreError> {
    let prior = store.endpoint()?;

    let chosen = if prior.is_empty() {
        prompt_for_url(prompts)
    } else {
        let items = vec![NEW_ENDPOINT_ITEM.to_string(), prior.clone()];
        match prompts.quick_pick(PICK_PLACEHOLDER, &items) {
            Some(0) => prompt_for_url(prompts),
            Some(_) => Some(prior),
            None => None,
        }
    };

    let Some(url) = chosen else {
        log::debug!("endpoint: resolution cancelled");
        return Ok(Resolution::Cancelled);
    };

    store.set_endpoint(&url)?;
    Ok(Resolution::Endpoint(url))
}

/// Prompt for a free-text URL, re-prompting with an inline error until the
/// input parses or the user cancels. The accepted value is returned exactly
/// as entered.
fn prompt_for_url(prompts: &mut dyn PromptHost) -> Option<String> {
    let mut inline_error = None;
    loop {
        let input = prompts.input_box(INPUT_PROMPT, inline_error)?;
        if Url::parse(&input).is_ok() {
            return Some(input);
        }
        log::debug!("endpoint: rejected input that does not parse as a URL");
        inline_error = Some(INVALID_URL_MESSAGE);
    }
}
