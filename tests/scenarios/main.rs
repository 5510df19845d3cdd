/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! End-to-end scenarios driving the open command, the lifecycle manager,
//! and the settings store together through the fake host.

use std::cell::RefCell;
use std::rc::Rc;

use queryshell::command::{self, OpenOutcome};
use queryshell::endpoint::EndpointSource;
use queryshell::host::{RevivalHook, WorkbenchHost};
use queryshell::panel::{PANEL_VIEW_TYPE, PanelRuntime, Reviver};
use queryshell::persistence::SettingsStore;
use queryshell::test_utils::{FakeWorkbench, ScriptedPrompts};
use tempfile::TempDir;

#[test]
fn version_smoke() {
    assert!(!queryshell::VERSION.is_empty());
}

/// Fresh install: no persisted endpoint, one invalid entry, then a valid
/// one. The resolver re-prompts once, persists the accepted value, and the
/// panel renders with that exact URL in its fetcher configuration.
#[test]
fn first_open_rejects_bad_input_then_persists_and_renders() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::open(dir.path()).unwrap();
    let mut host = FakeWorkbench::new();
    let mut runtime = PanelRuntime::new();
    let mut prompts =
        ScriptedPrompts::new().with_inputs(["not a url", "https://api.example.org/graphql"]);

    let outcome = command::open_browser(
        &mut runtime,
        &mut host,
        &mut prompts,
        &store,
        &EndpointSource::Prompted,
    )
    .unwrap();

    assert_eq!(outcome, OpenOutcome::Opened);
    assert_eq!(prompts.inline_errors().len(), 2);
    assert_eq!(prompts.inline_errors()[1], Some("Not a valid URL".to_string()));
    assert_eq!(store.endpoint().unwrap(), "https://api.example.org/graphql");

    let html = host.panels[0].html().unwrap();
    assert!(html.contains(r#"createFetcher({ url: "https://api.example.org/graphql" })"#));
}

/// Invoking the open command twice leaves exactly one panel; the second
/// invocation only brings the existing one to the foreground.
#[test]
fn double_open_keeps_a_single_panel() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::open(dir.path()).unwrap();
    let mut host = FakeWorkbench::new();
    let mut runtime = PanelRuntime::new();

    let mut prompts = ScriptedPrompts::new().with_inputs(["https://one.example.com"]);
    command::open_browser(&mut runtime, &mut host, &mut prompts, &store, &EndpointSource::Prompted)
        .unwrap();

    // Second invocation reuses the persisted endpoint.
    let mut prompts = ScriptedPrompts::new().with_picks([1]);
    command::open_browser(&mut runtime, &mut host, &mut prompts, &store, &EndpointSource::Prompted)
        .unwrap();

    assert_eq!(host.panels.len(), 1);
    assert_eq!(host.panels[0].reveals().len(), 1);
    assert_eq!(host.panels[0].html_render_count(), 1);
}

/// After persisting endpoint E, a later resolver invocation offers E as the
/// reusable prior choice.
#[test]
fn persisted_endpoint_is_offered_on_next_open() {
    let dir = TempDir::new().unwrap();
    let mut host = FakeWorkbench::new();

    {
        let store = SettingsStore::open(dir.path()).unwrap();
        let mut runtime = PanelRuntime::new();
        let mut prompts = ScriptedPrompts::new().with_inputs(["https://api.example.org/graphql"]);
        command::open_browser(
            &mut runtime,
            &mut host,
            &mut prompts,
            &store,
            &EndpointSource::Prompted,
        )
        .unwrap();
    }

    // Simulated restart: a fresh store over the same directory.
    let store = SettingsStore::open(dir.path()).unwrap();
    let mut runtime = PanelRuntime::new();
    let mut prompts = ScriptedPrompts::new().with_picks([1]);
    command::open_browser(&mut runtime, &mut host, &mut prompts, &store, &EndpointSource::Prompted)
        .unwrap();

    assert_eq!(
        prompts.pick_items()[0],
        vec![
            "Enter a new endpoint...".to_string(),
            "https://api.example.org/graphql".to_string()
        ]
    );
    assert_eq!(
        runtime.rendered_endpoint(),
        Some("https://api.example.org/graphql")
    );
}

/// Host-driven restoration: the registered revival hook rebuilds the panel
/// from the persisted endpoint alone, ignoring the host's saved state.
#[test]
fn registered_revival_hook_restores_from_persisted_endpoint() {
    let dir = TempDir::new().unwrap();
    let store = Rc::new(SettingsStore::open(dir.path()).unwrap());
    store.set_endpoint("https://restored.example.com").unwrap();

    let runtime = Rc::new(RefCell::new(PanelRuntime::new()));
    let mut host = FakeWorkbench::new();
    host.register_revival(
        PANEL_VIEW_TYPE,
        Box::new(Reviver::new(runtime.clone(), store.clone())),
    );

    // The host restores the serialized panel after restart.
    let mut hook = host.take_revival(PANEL_VIEW_TYPE).unwrap();
    let restored = host.make_panel();
    hook.revive(restored, Some(serde_json::json!({"ignored": true})));

    assert!(runtime.borrow().is_open());
    assert_eq!(
        runtime.borrow().rendered_endpoint(),
        Some("https://restored.example.com")
    );
    assert!(
        host.panels[0]
            .html()
            .unwrap()
            .contains("https://restored.example.com")
    );
}

/// Closing the panel clears the singleton; the next open constructs a fresh
/// instance instead of reusing the disposed handle.
#[test]
fn close_then_reopen_constructs_a_fresh_panel() {
    let dir = TempDir::new().unwrap();
    let store = SettingsStore::open(dir.path()).unwrap();
    let mut host = FakeWorkbench::new();
    let mut runtime = PanelRuntime::new();

    let mut prompts = ScriptedPrompts::new().with_inputs(["https://one.example.com"]);
    command::open_browser(&mut runtime, &mut host, &mut prompts, &store, &EndpointSource::Prompted)
        .unwrap();

    // User closes the tab; the host emits the disposal event.
    host.panels[0].close();
    runtime.pump(&mut prompts);
    assert!(!runtime.is_open());

    let mut prompts = ScriptedPrompts::new().with_picks([1]);
    command::open_browser(&mut runtime, &mut host, &mut prompts, &store, &EndpointSource::Prompted)
        .unwrap();

    assert_eq!(host.panels.len(), 2);
    assert!(host.panels[0].is_disposed());
    assert!(runtime.is_open());
}
