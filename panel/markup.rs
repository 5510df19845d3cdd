/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Markup rendering for the console panel.
//!
//! Builds the complete HTML document assigned to the panel: a default-deny
//! content-security policy, the bundled console assets, and one inline
//! nonce-tagged script that instantiates the console against the resolved
//! endpoint. The nonce is regenerated on every render and never persisted.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::host::PanelHandle;

pub const NONCE_LEN: usize = 32;

const RESET_CSS: &str = "media/reset.css";
const APP_CSS: &str = "media/app.css";
const RUNTIME_JS: &str = "media/vendor/react.min.js";
const DOM_JS: &str = "media/vendor/react-dom.min.js";
const CONSOLE_JS: &str = "media/vendor/console.min.js";
const CONSOLE_CSS: &str = "media/vendor/console.min.css";

/// Generate a fresh render nonce: 32 random alphanumeric characters.
pub fn render_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LEN)
        .map(char::from)
        .collect()
}

/// Resolved URIs for the local asset bundles the document loads.
pub struct PageAssets {
    pub reset_css: String,
    pub app_css: String,
    pub runtime_js: String,
    pub dom_js: String,
    pub console_js: String,
    pub console_css: String,
}

impl PageAssets {
    /// Translate the bundled asset paths through the panel's URI scheme.
    pub fn resolve(handle: &dyn PanelHandle) -> Self {
        Self {
            reset_css: handle.asset_uri(RESET_CSS),
            app_css: handle.asset_uri(APP_CSS),
            runtime_js: handle.asset_uri(RUNTIME_JS),
            dom_js: handle.asset_uri(DOM_JS),
            console_js: handle.asset_uri(CONSOLE_JS),
            console_css: handle.asset_uri(CONSOLE_CSS),
        }
    }
}

/// Inputs for one render pass.
pub struct ConsolePage<'a> {
    pub endpoint: &'a str,
    pub nonce: &'a str,
    pub style_origin: &'a str,
    pub assets: PageAssets,
}

/// Render the full console document.
pub fn render_document(page: &ConsolePage<'_>) -> String {
    // Embed the endpoint as a JSON string literal so arbitrary URLs cannot
    // break out of the script context. A literal `</` would still terminate
    // the surrounding script element, so escape it on top of JSON encoding.
    let endpoint_literal = serde_json::to_string(page.endpoint)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta http-equiv="Content-Security-Policy"
          content="default-src 'none'; style-src {style_origin} 'unsafe-inline'; script-src 'nonce-{nonce}'; connect-src *; font-src data:;">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Query Console</title>
    <link rel="stylesheet" href="{reset_css}">
    <link rel="stylesheet" href="{console_css}">
    <link rel="stylesheet" href="{app_css}">
    <script nonce="{nonce}" src="{runtime_js}"></script>
    <script nonce="{nonce}" src="{dom_js}"></script>
    <script nonce="{nonce}" src="{console_js}"></script>
</head>
<body>
    <div id="console">Loading the query console...</div>
    <script nonce="{nonce}">
        const fetcher = QueryConsole.createFetcher({{ url: {endpoint_literal} }});
        const root = ReactDOM.createRoot(document.getElementById("console"));
        root.render(React.createElement(QueryConsole, {{
            fetcher: fetcher,
            defaultEditorToolsVisibility: true,
        }}));
    </script>
</body>
</html>"#,
        style_origin = page.style_origin,
        nonce = page.nonce,
        reset_css = page.assets.reset_css,
        console_css = page.assets.console_css,
        app_css = page.assets.app_css,
        runtime_js = page.assets.runtime_js,
        dom_js = page.assets.dom_js,
        console_js = page.assets.console_js,
        endpoint_literal = endpoint_literal,
    )
}
