//! Session history for surfaces that do not expose their own.
//!
//! Some webview engines can go back but cannot say whether there is
//! anything to go back to. Two sources are combined here:
//!
//! - the page bridge reports how many entries of the current origin lie
//!   behind the current one ([`SessionHistory::set_page_index`]). This
//!   covers `pushState` routes of single-page apps and same-origin loads.
//! - the embedder feeds every top-level load into
//!   [`SessionHistory::record`]; loads that change origin stack up here.

use url::Url;

/// A single cross-origin entry in the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
}

impl HistoryEntry {
    fn origin(&self) -> String {
        origin_of(&self.url)
    }
}

/// Which kind of entry a back step lands on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackStep {
    /// An earlier entry of the current origin, tracked by the page.
    InPage,
    /// The last entry of the previous origin.
    Document(String),
}

#[derive(Debug, Default)]
pub struct SessionHistory {
    back_stack: Vec<HistoryEntry>,
    current: Option<HistoryEntry>,
    /// Entries behind the current one on the current origin.
    page_index: u32,
    /// Origin the surface is expected to report for an in-flight back step.
    traversal: Option<String>,
}

fn origin_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => url.to_string(),
    }
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A top-level load was reported by the surface.
    ///
    /// Loads on the current origin only move the current URL. The arrival
    /// of a pending back step does not create an entry either.
    pub fn record(&mut self, url: &str) {
        let origin = origin_of(url);
        if self.traversal.take().is_some_and(|expected| expected == origin) {
            self.current = Some(HistoryEntry {
                url: url.to_string(),
            });
            return;
        }
        if let Some(current) = self.current.as_mut() {
            if current.origin() == origin {
                current.url = url.to_string();
                return;
            }
        }
        if let Some(entry) = self.current.take() {
            self.back_stack.push(entry);
        }
        self.current = Some(HistoryEntry {
            url: url.to_string(),
        });
        self.page_index = 0;
    }

    /// The page bridge reported its position in the current origin's history.
    pub fn set_page_index(&mut self, index: u32) {
        self.page_index = index;
    }

    /// Account for one back step and say where it lands.
    pub fn begin_back(&mut self) -> Option<BackStep> {
        if self.page_index > 0 {
            self.page_index -= 1;
            self.traversal = None;
            return Some(BackStep::InPage);
        }
        let prev = self.back_stack.pop()?;
        let url = prev.url.clone();
        self.traversal = Some(prev.origin());
        self.current = Some(prev);
        Some(BackStep::Document(url))
    }

    pub fn can_go_back(&self) -> bool {
        self.page_index > 0 || !self.back_stack.is_empty()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|e| e.url.as_str())
    }

    /// Number of entries behind the current one.
    pub fn depth(&self) -> usize {
        self.page_index as usize + self.back_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_change_pushes_to_back_stack() {
        let mut h = SessionHistory::new();
        h.record("https://a.com");
        assert!(!h.can_go_back());
        h.record("https://b.com");
        assert!(h.can_go_back());
        assert_eq!(h.current_url(), Some("https://b.com"));
    }

    #[test]
    fn reload_does_not_add_entry() {
        let mut h = SessionHistory::new();
        h.record("https://a.com");
        h.record("https://a.com");
        assert_eq!(h.depth(), 0);
    }

    #[test]
    fn same_origin_loads_are_left_to_the_page() {
        let mut h = SessionHistory::new();
        h.record("https://a.com/");
        h.record("https://a.com/gallery");
        assert_eq!(h.depth(), 0);
        assert_eq!(h.current_url(), Some("https://a.com/gallery"));

        h.set_page_index(1);
        assert!(h.can_go_back());
    }

    #[test]
    fn spa_route_change_goes_back_in_page() {
        let mut h = SessionHistory::new();
        h.record("https://echoes.zeabur.app/");
        h.set_page_index(0);
        // pushState to /post/1, no load reported.
        h.set_page_index(1);

        assert_eq!(h.begin_back(), Some(BackStep::InPage));
        assert!(!h.can_go_back());
        assert_eq!(h.begin_back(), None);
    }

    #[test]
    fn page_entries_are_walked_before_previous_origin() {
        let mut h = SessionHistory::new();
        h.record("https://a.com/");
        h.record("https://b.com/");
        h.set_page_index(2);

        assert_eq!(h.depth(), 3);
        assert_eq!(h.begin_back(), Some(BackStep::InPage));
        assert_eq!(h.begin_back(), Some(BackStep::InPage));
        assert_eq!(
            h.begin_back(),
            Some(BackStep::Document("https://a.com/".into()))
        );
        assert!(!h.can_go_back());
    }

    #[test]
    fn load_on_new_origin_resets_page_index() {
        let mut h = SessionHistory::new();
        h.record("https://a.com/");
        h.set_page_index(3);
        h.record("https://b.com/");
        assert_eq!(h.depth(), 1);
    }

    #[test]
    fn back_step_is_not_recorded_as_new_entry() {
        let mut h = SessionHistory::new();
        h.record("https://a.com");
        h.record("https://b.com");

        assert_eq!(
            h.begin_back(),
            Some(BackStep::Document("https://a.com".into()))
        );
        h.record("https://a.com/");

        assert!(!h.can_go_back());
        assert_eq!(h.current_url(), Some("https://a.com/"));
    }

    #[test]
    fn redirected_back_step_becomes_new_entry() {
        let mut h = SessionHistory::new();
        h.record("https://a.com");
        h.record("https://b.com");
        h.begin_back();
        h.record("https://login.c.com");

        assert_eq!(h.current_url(), Some("https://login.c.com"));
        assert_eq!(h.depth(), 1);
    }

    #[test]
    fn begin_back_on_empty_history() {
        let mut h = SessionHistory::new();
        h.record("https://a.com");
        assert!(h.begin_back().is_none());
        assert_eq!(h.current_url(), Some("https://a.com"));
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_urls(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec("[a-z]{3,10}".prop_map(|s| format!("https://{s}.com")), min..max)
        }

        proptest! {
            #[test]
            fn current_url_equals_last_recorded(urls in arb_urls(1, 20)) {
                let mut h = SessionHistory::new();
                for url in &urls {
                    h.record(url);
                }
                prop_assert_eq!(h.current_url(), Some(urls.last().unwrap().as_str()));
            }

            #[test]
            fn back_until_empty_terminates(urls in arb_urls(1, 20), page_index in 0u32..5) {
                let mut h = SessionHistory::new();
                for url in &urls {
                    h.record(url);
                }
                h.set_page_index(page_index);
                let depth = h.depth();
                let mut steps = 0;
                while let Some(step) = h.begin_back() {
                    if let BackStep::Document(url) = step {
                        h.record(&url);
                    }
                    steps += 1;
                }
                prop_assert_eq!(steps, depth);
                prop_assert!(!h.can_go_back());
            }
        }
    }
}
