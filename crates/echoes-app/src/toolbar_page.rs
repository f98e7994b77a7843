//! Document shown in the bottom toolbar webview.

/// A single refresh button. Clicking it posts `{"kind":"refresh"}`.
pub const TOOLBAR_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>
  html, body { margin: 0; height: 100%; overflow: hidden; }
  body {
    display: flex; align-items: center; justify-content: center;
    background: #ffffff; border-top: 1px solid #e0e0e0;
    font-family: system-ui, sans-serif; user-select: none;
  }
  button {
    display: flex; align-items: center; gap: 6px;
    border: none; background: transparent; color: #333333;
    font-size: 15px; padding: 8px 16px; border-radius: 18px; cursor: pointer;
  }
  button:hover { background: #f0f0f0; }
  button:active { background: #e0e0e0; }
</style>
</head>
<body>
<button id="refresh" type="button" aria-label="Refresh">
  <svg width="20" height="20" viewBox="0 0 24 24" aria-hidden="true">
    <path fill="currentColor" d="M17.65 6.35A7.96 7.96 0 0 0 12 4a8 8 0 1 0 7.73 10h-2.08A6 6 0 1 1 12 6c1.66 0 3.14.69 4.22 1.78L13 11h7V4l-2.35 2.35z"/>
  </svg>
  <span>Refresh</span>
</button>
<script>
  document.getElementById("refresh").addEventListener("click", function () {
    window.ipc.postMessage(JSON.stringify({ kind: "refresh" }));
  });
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use echoes_browser::PageMessage;
    use echoes_browser::ipc::parse_message;

    #[test]
    fn refresh_button_posts_refresh_message() {
        assert!(TOOLBAR_HTML.contains(r#"kind: "refresh""#));
        assert_eq!(
            parse_message(r#"{"kind":"refresh"}"#).unwrap(),
            PageMessage::Refresh
        );
    }
}
