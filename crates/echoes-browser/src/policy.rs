//! Navigation policy: which navigations stay in the surface.
//!
//! HTTP(S) stays in the rendering surface so single-page-app state and
//! cookies survive. Every other scheme (`tel:`, `mailto:`, app links) goes
//! to the OS, and the surface is told the navigation was handled.

use echoes_platform::UrlDispatcher;
use echoes_types::event::NavigationRequest;
use url::Url;

/// Outcome of evaluating one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the rendering surface load it.
    HandleInternally,
    /// Hand the URL to the OS.
    DelegateExternally(String),
}

/// Decide where a navigation goes. Pure; the frame flag is not consulted.
pub fn decide(request: &NavigationRequest) -> NavigationDecision {
    match Url::parse(&request.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => NavigationDecision::HandleInternally,
        _ => NavigationDecision::DelegateExternally(request.url.clone()),
    }
}

/// Decide, and dispatch delegated URLs.
///
/// Returns `true` when the host took the navigation, in which case the
/// surface must not load it. A missing OS handler is logged and swallowed.
pub fn route(request: &NavigationRequest, dispatcher: &dyn UrlDispatcher) -> bool {
    match decide(request) {
        NavigationDecision::HandleInternally => {
            log::debug!(
                "navigation stays in surface: {} (main frame: {})",
                request.url,
                request.is_main_frame
            );
            false
        },
        NavigationDecision::DelegateExternally(url) => {
            log::debug!("delegating navigation to OS: {url}");
            if let Err(e) = dispatcher.dispatch(&url) {
                log::warn!("no handler for {url}: {e}");
            }
            true
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingDispatcher;

    fn decide_url(url: &str) -> NavigationDecision {
        decide(&NavigationRequest::main_frame(url))
    }

    #[test]
    fn http_and_https_stay_internal() {
        assert_eq!(decide_url("https://example.com/x"), NavigationDecision::HandleInternally);
        assert_eq!(decide_url("http://x"), NavigationDecision::HandleInternally);
    }

    #[test]
    fn scheme_match_is_case_insensitive() {
        assert_eq!(decide_url("HTTPS://Example.com/"), NavigationDecision::HandleInternally);
    }

    #[test]
    fn other_schemes_are_delegated() {
        assert_eq!(
            decide_url("tel:123"),
            NavigationDecision::DelegateExternally("tel:123".into())
        );
        assert_eq!(
            decide_url("mailto:a@b.com"),
            NavigationDecision::DelegateExternally("mailto:a@b.com".into())
        );
        assert_eq!(
            decide_url("weixin://dl/chat"),
            NavigationDecision::DelegateExternally("weixin://dl/chat".into())
        );
    }

    #[test]
    fn lookalike_scheme_is_delegated() {
        assert!(matches!(
            decide_url("https-legacy://x"),
            NavigationDecision::DelegateExternally(_)
        ));
    }

    #[test]
    fn unparseable_url_is_delegated_verbatim() {
        assert_eq!(
            decide_url("not a url"),
            NavigationDecision::DelegateExternally("not a url".into())
        );
    }

    #[test]
    fn subframe_flag_does_not_change_decision() {
        let req = NavigationRequest::new("tel:555", false);
        assert!(matches!(decide(&req), NavigationDecision::DelegateExternally(_)));
    }

    #[test]
    fn route_internal_does_not_dispatch() {
        let dispatcher = RecordingDispatcher::new();
        let handled = route(&NavigationRequest::main_frame("https://a.com"), &dispatcher);
        assert!(!handled);
        assert!(dispatcher.dispatched().is_empty());
    }

    #[test]
    fn route_external_dispatches_once() {
        let dispatcher = RecordingDispatcher::new();
        let handled = route(&NavigationRequest::main_frame("mailto:a@b.com"), &dispatcher);
        assert!(handled);
        assert_eq!(dispatcher.dispatched(), vec!["mailto:a@b.com".to_string()]);
    }

    #[test]
    fn route_swallows_dispatch_failure() {
        let dispatcher = RecordingDispatcher::failing();
        let handled = route(&NavigationRequest::main_frame("tel:123"), &dispatcher);
        assert!(handled);
        assert_eq!(dispatcher.dispatched().len(), 1);
    }
}
