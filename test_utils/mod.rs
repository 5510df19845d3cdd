/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Fake host implementations for unit and scenario tests.
//!
//! `FakeWorkbench` stands in for the host panel system, `ScriptedPrompts`
//! for its modal prompt facilities. Both record every interaction so tests
//! can assert on the exact sequence of host calls.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossbeam_channel::Sender;

use crate::host::{
    CreatedPanel, PanelEvent, PanelHandle, PanelInterest, PanelOptions, PromptHost, RevivalHook,
    Subscription, ViewColumn, WorkbenchHost,
};

#[derive(Default)]
struct FakePanelState {
    title: String,
    html_history: Vec<String>,
    reveals: Vec<ViewColumn>,
    disposed: bool,
    subscription_releases: Vec<PanelInterest>,
}

/// Test-side controller for one fake panel: inspect what the lifecycle
/// manager did with the handle, and inject host events.
pub struct FakePanel {
    state: Rc<RefCell<FakePanelState>>,
    events: Sender<PanelEvent>,
}

impl FakePanel {
    /// Build a panel pair: the `CreatedPanel` handed to the lifecycle
    /// manager, and the controller kept by the test.
    pub fn create() -> (CreatedPanel, FakePanel) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let state = Rc::new(RefCell::new(FakePanelState::default()));
        let handle = FakePanelHandle {
            state: state.clone(),
            events: tx.clone(),
        };
        (
            CreatedPanel {
                handle: Box::new(handle),
                events: rx,
            },
            FakePanel { state, events: tx },
        )
    }

    /// Post a content message, as the rendered page would.
    pub fn post_message(&self, raw: serde_json::Value) {
        let _ = self.events.send(PanelEvent::Message(raw));
    }

    /// Close the panel from the host side, as a user closing the tab would.
    pub fn close(&self) {
        self.state.borrow_mut().disposed = true;
        let _ = self.events.send(PanelEvent::Disposed);
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    /// The most recently assigned markup document.
    pub fn html(&self) -> Option<String> {
        self.state.borrow().html_history.last().cloned()
    }

    pub fn html_render_count(&self) -> usize {
        self.state.borrow().html_history.len()
    }

    pub fn reveals(&self) -> Vec<ViewColumn> {
        self.state.borrow().reveals.clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.state.borrow().disposed
    }

    /// Subscription interests in the order they were released.
    pub fn subscription_releases(&self) -> Vec<PanelInterest> {
        self.state.borrow().subscription_releases.clone()
    }
}

struct FakePanelHandle {
    state: Rc<RefCell<FakePanelState>>,
    events: Sender<PanelEvent>,
}

impl PanelHandle for FakePanelHandle {
    fn reveal(&mut self, column: ViewColumn) {
        self.state.borrow_mut().reveals.push(column);
    }

    fn set_title(&mut self, title: &str) {
        self.state.borrow_mut().title = title.to_string();
    }

    fn set_html(&mut self, html: &str) {
        self.state.borrow_mut().html_history.push(html.to_string());
    }

    fn asset_uri(&self, relative_path: &str) -> String {
        format!("fake-resource://host/{relative_path}")
    }

    fn style_origin(&self) -> String {
        "fake-resource:".to_string()
    }

    fn subscribe(&mut self, interest: PanelInterest) -> Subscription {
        let state = self.state.clone();
        Subscription::new(move || {
            state.borrow_mut().subscription_releases.push(interest);
        })
    }

    fn dispose(&mut self) {
        let mut state = self.state.borrow_mut();
        if !state.disposed {
            state.disposed = true;
            drop(state);
            let _ = self.events.send(PanelEvent::Disposed);
        }
    }
}

/// Fake host panel system: records every created panel and registered
/// revival hook.
#[derive(Default)]
pub struct FakeWorkbench {
    pub panels: Vec<FakePanel>,
    pub created_options: Vec<PanelOptions>,
    revivals: Vec<(String, Box<dyn RevivalHook>)>,
}

impl FakeWorkbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a panel outside of `create_panel`, as the host does when
    /// restoring a serialized panel across a restart.
    pub fn make_panel(&mut self) -> CreatedPanel {
        let (created, controller) = FakePanel::create();
        self.panels.push(controller);
        created
    }

    /// Remove and return the revival hook registered for a view type.
    pub fn take_revival(&mut self, view_type: &str) -> Option<Box<dyn RevivalHook>> {
        let index = self.revivals.iter().position(|(vt, _)| vt == view_type)?;
        Some(self.revivals.remove(index).1)
    }
}

impl WorkbenchHost for FakeWorkbench {
    fn create_panel(&mut self, options: &PanelOptions) -> CreatedPanel {
        self.created_options.push(options.clone());
        self.make_panel()
    }

    fn register_revival(&mut self, view_type: &str, hook: Box<dyn RevivalHook>) {
        self.revivals.push((view_type.to_string(), hook));
    }
}

/// Scripted prompt host: answers prompts from pre-seeded queues and records
/// everything it was asked. An empty queue means the user dismissed the
/// prompt.
#[derive(Default)]
pub struct ScriptedPrompts {
    picks: VecDeque<usize>,
    inputs: VecDeque<String>,
    pick_items: Vec<Vec<String>>,
    inline_errors: Vec<Option<String>>,
    errors: Vec<String>,
}

impl ScriptedPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn with_inputs<S: Into<String>>(mut self, inputs: impl IntoIterator<Item = S>) -> Self {
        self.inputs.extend(inputs.into_iter().map(Into::into));
        self
    }

    /// The item lists offered by each quick pick, in invocation order.
    pub fn pick_items(&self) -> &[Vec<String>] {
        &self.pick_items
    }

    /// The inline validation message shown by each input box invocation.
    pub fn inline_errors(&self) -> &[Option<String>] {
        &self.inline_errors
    }

    /// Error notifications shown so far.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl PromptHost for ScriptedPrompts {
    fn quick_pick(&mut self, _placeholder: &str, items: &[String]) -> Option<usize> {
        self.pick_items.push(items.to_vec());
        self.picks.pop_front()
    }

    fn input_box(&mut self, _prompt: &str, inline_error: Option<&str>) -> Option<String> {
        self.inline_errors.push(inline_error.map(ToOwned::to_owned));
        self.inputs.pop_front()
    }

    fn show_error_message(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}
