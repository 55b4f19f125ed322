//! DOM facade
//!
//! The scrollspy never touches `web_sys` directly. Everything it reads or
//! mutates goes through [`Dom`], so the selection and activation logic runs
//! against the in-memory fake in tests and against `BrowserDom` in a page.

use std::cmp::Ordering;
use std::rc::Rc;

/// Viewport-relative box, as returned by `getBoundingClientRect()`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Scroll state of a scrollable element
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Largest valid `scrollTop`
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }
}

/// Animation used for programmatic scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    Instant,
    Smooth,
}

/// Where an event subscription should be attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenTarget {
    Window,
    /// `document.scrollingElement`
    ScrollingRoot,
    /// First element matching the selector
    Selector(String),
}

/// Events that feed the frame scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpyEvent {
    Scroll,
    Resize,
    HashChange,
}

impl SpyEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SpyEvent::Scroll => "scroll",
            SpyEvent::Resize => "resize",
            SpyEvent::HashChange => "hashchange",
        }
    }

    /// Scroll listeners never call `preventDefault`, so they are registered passive
    pub fn passive(&self) -> bool {
        matches!(self, SpyEvent::Scroll)
    }
}

/// Minimal view of a document the scrollspy needs.
///
/// Every lookup is optional: a missing element, attribute or capability is
/// reported as `None` and the caller skips that unit of work.
pub trait Dom {
    /// Handle to an element owned by the host document
    type Element: Clone + PartialEq;
    /// Anything events can be subscribed on (window or element)
    type Target: Clone + PartialEq;
    /// Live subscription, released through [`Dom::unlisten`]
    type Listener;

    /// First element in the document matching `selector`
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;

    /// All descendants of `root` matching `selector`, in tree order
    fn query_selector_all(&self, root: &Self::Element, selector: &str) -> Vec<Self::Element>;

    fn get_attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn get_element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Nearest inclusive ancestor matching `selector`
    fn closest(&self, element: &Self::Element, selector: &str) -> Option<Self::Element>;

    /// Tree-order comparison of two elements
    fn compare_document_position(&self, a: &Self::Element, b: &Self::Element) -> Ordering;

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn scroll_metrics(&self, element: &Self::Element) -> ScrollMetrics;

    fn scroll_to(&self, element: &Self::Element, top: f64, mode: ScrollMode);

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    /// `None` when media queries are unsupported
    fn media_matches(&self, query: &str) -> Option<bool>;

    fn resolve_target(&self, target: &ListenTarget) -> Option<Self::Target>;

    /// `None` when the target refuses the subscription
    fn listen(
        &self,
        target: &Self::Target,
        event: SpyEvent,
        handler: Rc<dyn Fn()>,
    ) -> Option<Self::Listener>;

    fn unlisten(&self, listener: Self::Listener);
}
