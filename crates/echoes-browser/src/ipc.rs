//! Page bridge protocol.
//!
//! Desktop webviews expose no native hooks for file inputs, scroll changes
//! or the back action. [`PAGE_BRIDGE_JS`] is injected into every document
//! and reports those events as JSON over the webview IPC channel; the host
//! answers file requests by evaluating [`resolve_files_script`].

use echoes_types::error::{EchoesError, Result};
use serde::Deserialize;

/// IPC bodies larger than this are dropped.
pub const MAX_MESSAGE_LEN: usize = 16 * 1024;

/// A message posted by the page bridge or the toolbar page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageMessage {
    /// Vertical scroll offset of the document.
    Scroll { y: i32 },
    /// A file input was activated. `id` correlates the answer.
    FileRequest {
        id: u64,
        #[serde(default)]
        multiple: bool,
    },
    /// Position of the current entry in this origin's history. Sent on
    /// load, `pushState`, `popstate` and `pageshow`.
    History { index: u32 },
    /// Back action (BrowserBack key, Alt+Left, mouse back button).
    Back,
    /// Toolbar refresh button.
    Refresh,
}

/// Decode one IPC body.
pub fn parse_message(body: &str) -> Result<PageMessage> {
    if body.len() > MAX_MESSAGE_LEN {
        return Err(EchoesError::Bridge(format!(
            "message of {} bytes exceeds {MAX_MESSAGE_LEN}",
            body.len()
        )));
    }
    Ok(serde_json::from_str(body)?)
}

/// Script completing file request `id` with `uris` (empty = cancelled).
pub fn resolve_files_script(id: u64, uris: &[String]) -> String {
    let list = serde_json::Value::from(uris.to_vec());
    format!("window.__echoes && window.__echoes.resolveFiles({id}, {list});")
}

/// Injected into every document loaded by the content surface.
pub const PAGE_BRIDGE_JS: &str = r#"(function () {
  if (window.__echoes) { return; }
  function post(msg) {
    try { window.ipc.postMessage(JSON.stringify(msg)); } catch (e) {}
  }

  var lastY = 0;
  var queued = false;
  window.addEventListener("scroll", function () {
    if (queued) { return; }
    queued = true;
    requestAnimationFrame(function () {
      queued = false;
      var y = Math.round(window.scrollY);
      if (y !== lastY) {
        lastY = y;
        post({ kind: "scroll", y: y });
      }
    });
  }, { passive: true });

  var KEY = "__echoesIndex";
  var nativePush = history.pushState;
  var nativeReplace = history.replaceState;
  function stateIndex(state) {
    return state && typeof state === "object" && typeof state[KEY] === "number" ? state[KEY] : null;
  }
  function stamp(state, i) {
    if (state === null || state === undefined) {
      var fresh = {};
      fresh[KEY] = i;
      return fresh;
    }
    if (typeof state === "object" && !Array.isArray(state)) {
      var copy = Object.assign({}, state);
      copy[KEY] = i;
      return copy;
    }
    return state;
  }
  function storedIndex() {
    try {
      var v = parseInt(sessionStorage.getItem(KEY), 10);
      return isNaN(v) ? -1 : v;
    } catch (e) { return -1; }
  }
  function reportIndex() {
    try { sessionStorage.setItem(KEY, String(index)); } catch (e) {}
    post({ kind: "history", index: index });
  }
  var index = stateIndex(history.state);
  if (index === null) {
    index = storedIndex() + 1;
    nativeReplace.call(history, stamp(history.state, index), "");
  }
  history.pushState = function (state, title, url) {
    var r = nativePush.call(history, stamp(state, index + 1), title, url);
    index += 1;
    reportIndex();
    return r;
  };
  history.replaceState = function (state, title, url) {
    return nativeReplace.call(history, stamp(state, index), title, url);
  };
  window.addEventListener("popstate", function (ev) {
    var i = stateIndex(ev.state);
    if (i !== null) {
      index = i;
    } else if (index > 0) {
      index -= 1;
    }
    reportIndex();
  });
  window.addEventListener("pageshow", reportIndex);
  reportIndex();

  var pending = {};
  var nextId = 1;
  document.addEventListener("click", function (ev) {
    var el = ev.target;
    if (!(el instanceof HTMLInputElement) || el.type !== "file" || el.disabled) { return; }
    ev.preventDefault();
    ev.stopImmediatePropagation();
    var id = nextId++;
    pending[id] = el;
    post({ kind: "file_request", id: id, multiple: el.multiple });
  }, true);

  window.addEventListener("keydown", function (ev) {
    if (ev.key === "BrowserBack" || (ev.altKey && ev.key === "ArrowLeft")) {
      ev.preventDefault();
      post({ kind: "back" });
    }
  }, true);
  window.addEventListener("mouseup", function (ev) {
    if (ev.button === 3) {
      ev.preventDefault();
      post({ kind: "back" });
    }
  }, true);

  function toFile(uri) {
    return fetch(uri).then(function (res) {
      return res.blob().then(function (blob) {
        var name = decodeURIComponent(uri.split("/").pop() || "file");
        return new File([blob], name, { type: blob.type });
      });
    });
  }

  window.__echoes = {
    resolveFiles: function (id, uris) {
      var input = pending[id];
      delete pending[id];
      if (!input) { return; }
      if (!uris.length) {
        input.dispatchEvent(new Event("cancel", { bubbles: false }));
        return;
      }
      if (!input.multiple) { uris = uris.slice(0, 1); }
      Promise.all(uris.map(toFile)).then(function (files) {
        var dt = new DataTransfer();
        files.forEach(function (f) { dt.items.add(f); });
        input.files = dt.files;
        input.dispatchEvent(new Event("input", { bubbles: true }));
        input.dispatchEvent(new Event("change", { bubbles: true }));
      }).catch(function () {
        input.dispatchEvent(new Event("cancel", { bubbles: false }));
      });
    }
  };
})();"#;
