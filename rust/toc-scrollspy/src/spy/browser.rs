//! `web_sys` backend: the real document and `requestAnimationFrame`

use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, Node, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::spy::dom::{Dom, ListenTarget, Rect, ScrollMetrics, ScrollMode, SpyEvent};
use crate::spy::scheduler::{FrameScheduler, FrameTask};

// =============================================================================
// BrowserDom
// =============================================================================

/// [`Dom`] over the page's window and document
#[derive(Debug, Clone)]
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    /// `None` outside a browsing context (workers, node without jsdom)
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// A registered listener; owns the closure JS calls into
pub struct BrowserListener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl Dom for BrowserDom {
    type Element = Element;
    type Target = EventTarget;
    type Listener = BrowserListener;

    fn query_selector(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_selector_all(&self, root: &Element, selector: &str) -> Vec<Element> {
        let Ok(list) = root.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn get_attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn closest(&self, element: &Element, selector: &str) -> Option<Element> {
        element.closest(selector).ok().flatten()
    }

    fn compare_document_position(&self, a: &Element, b: &Element) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let position = a.compare_document_position(b);
        if position & Node::DOCUMENT_POSITION_FOLLOWING != 0 {
            Ordering::Less
        } else if position & Node::DOCUMENT_POSITION_PRECEDING != 0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.top(), rect.bottom())
    }

    fn scroll_metrics(&self, element: &Element) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: element.scroll_top() as f64,
            scroll_height: element.scroll_height() as f64,
            client_height: element.client_height() as f64,
        }
    }

    fn scroll_to(&self, element: &Element, top: f64, mode: ScrollMode) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match mode {
            ScrollMode::Instant => ScrollBehavior::Instant,
            ScrollMode::Smooth => ScrollBehavior::Smooth,
        });
        element.scroll_to_with_scroll_to_options(&options);
    }

    // DOMTokenList only throws for empty or whitespace tokens, which validate() rejects
    fn add_class(&self, element: &Element, class: &str) {
        element.class_list().add_1(class).ok();
    }

    fn remove_class(&self, element: &Element, class: &str) {
        element.class_list().remove_1(class).ok();
    }

    fn media_matches(&self, query: &str) -> Option<bool> {
        self.window
            .match_media(query)
            .ok()
            .flatten()
            .map(|list| list.matches())
    }

    fn resolve_target(&self, target: &ListenTarget) -> Option<EventTarget> {
        match target {
            ListenTarget::Window => Some(self.window.clone().into()),
            ListenTarget::ScrollingRoot => self.document.scrolling_element().map(Into::into),
            ListenTarget::Selector(selector) => self.query_selector(selector).map(Into::into),
        }
    }

    fn listen(
        &self,
        target: &EventTarget,
        event: SpyEvent,
        handler: Rc<dyn Fn()>,
    ) -> Option<BrowserListener> {
        let closure = Closure::<dyn FnMut()>::new(move || handler());
        let options = AddEventListenerOptions::new();
        options.set_passive(event.passive());

        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event.name(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .ok()?;

        Some(BrowserListener {
            target: target.clone(),
            event: event.name(),
            closure,
        })
    }

    fn unlisten(&self, listener: BrowserListener) {
        let _ = listener.target.remove_event_listener_with_callback(
            listener.event,
            listener.closure.as_ref().unchecked_ref(),
        );
    }
}

// =============================================================================
// AnimationFrameScheduler
// =============================================================================

/// [`FrameScheduler`] backed by `requestAnimationFrame`
#[derive(Debug, Clone)]
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule(&self, task: FrameTask) {
        let slot = Rc::new(RefCell::new(Some(task)));
        let deferred = Rc::clone(&slot);
        let callback: Closure<dyn FnMut()> = Closure::once(move || {
            let task = deferred.borrow_mut().take();
            if let Some(task) = task {
                task();
            }
        });

        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            // JS owns it now; a once-closure frees itself after the call
            Ok(_) => drop(callback.into_js_value()),
            Err(_) => {
                drop(callback);
                // no frame source: run now rather than leave the gate pending forever
                let task = slot.borrow_mut().take();
                if let Some(task) = task {
                    task();
                }
            }
        }
    }
}
