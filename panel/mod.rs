/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Console panel lifecycle management.
//!
//! [`PanelRuntime`] owns the process-wide singleton: at most one console
//! panel is live at any time. Opening while a panel exists reveals it;
//! closing clears the singleton so the next open constructs a fresh
//! instance. The runtime is explicitly owned by the embedding shell and
//! passed into command handlers rather than accessed as an ambient global.
//!
//! State machine: `Absent -> Active` (create or revive), `Active -> Active`
//! (show-existing or revive), `Active -> Absent` (dispose).

pub mod markup;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use crossbeam_channel::Receiver;

use crate::host::{
    CreatedPanel, PanelEvent, PanelHandle, PanelInterest, PanelOptions, PromptHost, RevivalHook,
    Subscription, ViewColumn, WorkbenchHost,
};
use crate::persistence::{SettingsStore, SettingsStoreError};
use crate::protocol::{self, InboundMessage};

/// Stable view type the host serializes the panel under.
pub const PANEL_VIEW_TYPE: &str = "queryshell.console";
pub const PANEL_TITLE: &str = "Query Console";
/// The single directory the rendered content may load resources from.
pub const ASSET_ROOT: &str = "media";

/// Singleton lifecycle manager for the console panel.
#[derive(Default)]
pub struct PanelRuntime {
    instance: Option<PanelInstance>,
}

/// One live panel: the host handle, its event stream, the subscriptions
/// registered against it, and the endpoint its content was rendered with.
struct PanelInstance {
    handle: Box<dyn PanelHandle>,
    events: Receiver<PanelEvent>,
    subscriptions: Vec<Subscription>,
    endpoint: String,
}

impl PanelRuntime {
    pub fn new() -> Self {
        Self { instance: None }
    }

    pub fn is_open(&self) -> bool {
        self.instance.is_some()
    }

    /// The endpoint the live panel was rendered with, if any.
    pub fn rendered_endpoint(&self) -> Option<&str> {
        self.instance.as_ref().map(|i| i.endpoint.as_str())
    }

    /// Show the console panel.
    ///
    /// If a panel already exists it is brought to the foreground at the
    /// requested column and left as-is: its content is not re-rendered and
    /// its endpoint does not change. Otherwise a new panel is constructed
    /// with scripting enabled and resource access restricted to
    /// [`ASSET_ROOT`], and content is rendered into it.
    pub fn create_or_show(
        &mut self,
        host: &mut dyn WorkbenchHost,
        endpoint: &str,
        column: ViewColumn,
    ) {
        if let Some(instance) = &mut self.instance {
            log::debug!("panel: revealing existing console panel");
            instance.handle.reveal(column);
            return;
        }

        log::debug!("panel: creating console panel for {endpoint}");
        let options = PanelOptions {
            view_type: PANEL_VIEW_TYPE.to_string(),
            title: PANEL_TITLE.to_string(),
            column,
            enable_scripts: true,
            local_resource_root: PathBuf::from(ASSET_ROOT),
        };
        let created = host.create_panel(&options);
        self.install(created, endpoint.to_string());
    }

    /// Rebuild the singleton around a panel handle the host restored after a
    /// restart. The endpoint is re-read from persisted settings; the host's
    /// saved state is accepted but not consulted.
    pub fn revive(
        &mut self,
        created: CreatedPanel,
        _saved_state: Option<serde_json::Value>,
        store: &SettingsStore,
    ) -> Result<(), SettingsStoreError> {
        if self.instance.is_some() {
            // The singleton is already live; discard the duplicate handle.
            log::warn!("panel: revival while a console panel is live; disposing duplicate");
            let CreatedPanel { mut handle, .. } = created;
            handle.dispose();
            if let Some(instance) = &mut self.instance {
                instance.handle.reveal(ViewColumn::default());
            }
            return Ok(());
        }

        let endpoint = store.endpoint()?;
        log::debug!("panel: reviving console panel");
        self.install(created, endpoint);
        Ok(())
    }

    fn install(&mut self, created: CreatedPanel, endpoint: String) {
        let CreatedPanel { mut handle, events } = created;
        let mut subscriptions = Vec::new();
        subscriptions.push(handle.subscribe(PanelInterest::Messages));
        subscriptions.push(handle.subscribe(PanelInterest::Disposed));
        handle.set_title(PANEL_TITLE);

        let mut instance = PanelInstance {
            handle,
            events,
            subscriptions,
            endpoint,
        };
        instance.render();
        self.instance = Some(instance);
    }

    /// Drain pending panel events (non-blocking). Call from the host's UI
    /// event loop.
    ///
    /// The only recognized content command is `alert`, whose text is
    /// forwarded verbatim to the host's error notification facility.
    /// Unrecognized commands are ignored. A disposal event tears the
    /// singleton down.
    pub fn pump(&mut self, prompts: &mut dyn PromptHost) {
        loop {
            let Some(instance) = &self.instance else {
                return;
            };
            let Ok(event) = instance.events.try_recv() else {
                return;
            };
            match event {
                PanelEvent::Message(raw) => match protocol::parse_message(&raw) {
                    InboundMessage::Alert { text } => prompts.show_error_message(&text),
                    InboundMessage::Unknown => {
                        log::debug!("panel: ignoring unrecognized content message");
                    }
                },
                PanelEvent::Disposed => self.dispose(),
            }
        }
    }

    /// Tear the singleton down: clear the reference, dispose the host panel,
    /// and release held subscriptions in reverse registration order.
    /// Already-released subscriptions are tolerated. A no-op when absent.
    pub fn dispose(&mut self) {
        let Some(mut instance) = self.instance.take() else {
            return;
        };
        log::debug!("panel: disposing console panel");
        instance.handle.dispose();
        while let Some(mut subscription) = instance.subscriptions.pop() {
            subscription.dispose();
        }
    }
}

/// Revival capability registered with the host once at startup.
///
/// The host invokes it with each restored panel handle plus whatever state
/// it serialized; the runtime re-derives everything from persisted settings
/// instead.
pub struct Reviver {
    runtime: Rc<RefCell<PanelRuntime>>,
    store: Rc<SettingsStore>,
}

impl Reviver {
    pub fn new(runtime: Rc<RefCell<PanelRuntime>>, store: Rc<SettingsStore>) -> Self {
        Self { runtime, store }
    }
}

impl RevivalHook for Reviver {
    fn revive(&mut self, panel: CreatedPanel, saved_state: Option<serde_json::Value>) {
        if let Err(e) = self
            .runtime
            .borrow_mut()
            .revive(panel, saved_state, &self.store)
        {
            log::warn!("panel: revival failed to read persisted endpoint: {e}");
        }
    }
}

impl PanelInstance {
    /// Build the full markup document with the current endpoint and a fresh
    /// nonce and assign it into the panel.
    fn render(&mut self) {
        let nonce = markup::render_nonce();
        let style_origin = self.handle.style_origin();
        let page = markup::ConsolePage {
            endpoint: &self.endpoint,
            nonce: &nonce,
            style_origin: &style_origin,
            assets: markup::PageAssets::resolve(self.handle.as_ref()),
        };
        self.handle.set_html(&markup::render_document(&page));
    }
}
