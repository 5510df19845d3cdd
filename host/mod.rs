/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Capability traits for the surrounding editor shell.
//!
//! Every interaction with the host — panel creation, prompts, notifications,
//! revival after restart — goes through these traits. The crate never talks
//! to a concrete windowing system, which keeps the lifecycle manager testable
//! against the fakes in `test_utils`.

use std::path::PathBuf;

use crossbeam_channel::Receiver;

/// Placement of a panel inside the editor layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewColumn {
    /// The standard placement for the console panel.
    #[default]
    One,
    Two,
    Three,
    /// Whatever column currently has focus.
    Active,
    /// Alongside the focused column.
    Beside,
}

/// Which panel event stream a subscription covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInterest {
    Messages,
    Disposed,
}

/// Options for constructing a host panel.
#[derive(Debug, Clone)]
pub struct PanelOptions {
    /// Stable identifier the host uses to serialize the panel across restarts.
    pub view_type: String,
    pub title: String,
    pub column: ViewColumn,
    pub enable_scripts: bool,
    /// The single directory the rendered content may load resources from.
    pub local_resource_root: PathBuf,
}

/// An event the host delivers from a live panel.
#[derive(Debug, Clone)]
pub enum PanelEvent {
    /// Structured message posted by the rendered content.
    Message(serde_json::Value),
    /// The panel was closed, by the user or programmatically.
    Disposed,
}

/// Disposable registration token handed out by the host.
///
/// Releasing is idempotent: the wrapped cancel action runs at most once, and
/// disposing an already-released token is a no-op.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn dispose(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.cancel.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// One live host panel.
///
/// Handles are single-owner: the lifecycle manager holds the only reference
/// and disposes it when the singleton tears down.
pub trait PanelHandle {
    /// Bring the panel to the foreground at the given column.
    fn reveal(&mut self, column: ViewColumn);

    fn set_title(&mut self, title: &str);

    /// Assign the full markup document rendered into the panel.
    fn set_html(&mut self, html: &str);

    /// Translate a path relative to the extension root into a URI loadable
    /// from inside the rendered content.
    fn asset_uri(&self, relative_path: &str) -> String;

    /// The origin the host assigns to panel-local stylesheets, for use in the
    /// content-security policy.
    fn style_origin(&self) -> String;

    /// Register interest in one of the panel's event streams.
    fn subscribe(&mut self, interest: PanelInterest) -> Subscription;

    /// Destroy the underlying host panel. The host is expected to emit a
    /// final [`PanelEvent::Disposed`] if the panel was still live.
    fn dispose(&mut self);
}

/// A freshly constructed (or host-revived) panel: the handle plus the channel
/// the host feeds with its events. Events are drained on the UI event loop
/// via [`crate::panel::PanelRuntime::pump`].
pub struct CreatedPanel {
    pub handle: Box<dyn PanelHandle>,
    pub events: Receiver<PanelEvent>,
}

/// Host-driven restoration callback, registered once at startup.
///
/// After a restart the host rebuilds serialized panels and hands each one to
/// the hook along with whatever state it saved. Implementations are free to
/// ignore the saved state and re-derive everything from persisted settings.
pub trait RevivalHook {
    fn revive(&mut self, panel: CreatedPanel, saved_state: Option<serde_json::Value>);
}

/// The host's panel system.
pub trait WorkbenchHost {
    /// Construct and show a new panel.
    fn create_panel(&mut self, options: &PanelOptions) -> CreatedPanel;

    /// Register the revival hook for a serialized view type.
    fn register_revival(&mut self, view_type: &str, hook: Box<dyn RevivalHook>);
}

/// The host's modal prompt and notification facilities.
///
/// Prompts suspend the invoking command until the user responds; `None`
/// means the prompt was dismissed.
pub trait PromptHost {
    /// Present a flat list of choices; returns the selected index.
    fn quick_pick(&mut self, placeholder: &str, items: &[String]) -> Option<usize>;

    /// Prompt for free-text input. `inline_error` carries the validation
    /// message shown when re-prompting after rejected input.
    fn input_box(&mut self, prompt: &str, inline_error: Option<&str>) -> Option<String>;

    /// Show a user-visible error notification.
    fn show_error_message(&mut self, text: &str);
}
