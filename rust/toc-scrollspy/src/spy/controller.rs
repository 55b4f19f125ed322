//! ScrollSpyController: ties catalog, selector, applier and scheduler together
//!
//! Lifecycle:
//! 1. `attach` / `with_panel` builds the catalog, or fails and nothing is set up
//! 2. `start` subscribes to scroll sources and schedules the first frame
//! 3. every event requests a frame; each delivered frame recomputes once
//! 4. `dispose` (or drop) unsubscribes and clears the active marker

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;

use crate::config::{ConfigError, ScrollSpyConfig};
use crate::spy::applier;
use crate::spy::catalog::{build_catalog, Catalog, CatalogError};
use crate::spy::dom::{Dom, ListenTarget, SpyEvent};
use crate::spy::scheduler::{FrameGate, FrameScheduler};
use crate::spy::selector;

// =============================================================================
// Errors
// =============================================================================

/// Why a controller could not be attached
#[derive(Debug, Clone, PartialEq)]
pub enum AttachError {
    Config(ConfigError),
    PanelNotFound(String),
    Catalog(CatalogError),
}

impl std::fmt::Display for AttachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachError::Config(e) => write!(f, "Invalid config: {}", e),
            AttachError::PanelNotFound(selector) => write!(f, "No TOC panel matches {}", selector),
            AttachError::Catalog(e) => write!(f, "Nothing to track: {}", e),
        }
    }
}

impl std::error::Error for AttachError {}

impl From<ConfigError> for AttachError {
    fn from(e: ConfigError) -> Self {
        AttachError::Config(e)
    }
}

impl From<CatalogError> for AttachError {
    fn from(e: CatalogError) -> Self {
        AttachError::Catalog(e)
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Snapshot of controller state for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpyStats {
    pub items: usize,
    pub active_id: Option<String>,
    pub requests: u64,
    pub recomputations: u64,
    pub listeners: usize,
    pub started: bool,
    pub disposed: bool,
}

// =============================================================================
// Shared state
// =============================================================================

/// State reachable from event handlers and frame tasks
struct SpyState<D: Dom> {
    dom: D,
    config: ScrollSpyConfig,
    panel: D::Element,
    catalog: Catalog<D::Element>,
    active: RefCell<Option<String>>,
    gate: FrameGate,
    disposed: Cell<bool>,
}

impl<D: Dom> SpyState<D> {
    fn on_frame(&self) {
        self.gate.complete();
        if self.disposed.get() {
            return;
        }

        let current = selector::pick_current(&self.dom, &self.catalog, self.config.activation_offset)
            .map(str::to_owned);
        applier::apply_active(
            &self.dom,
            &self.panel,
            &self.catalog,
            current.as_deref(),
            &self.config,
        );
        *self.active.borrow_mut() = current;
    }
}

fn request_frame<D, S>(state: &Rc<SpyState<D>>, scheduler: &Rc<S>)
where
    D: Dom + 'static,
    S: FrameScheduler + 'static,
{
    if state.disposed.get() {
        return;
    }
    if state.gate.request() {
        let state = Rc::clone(state);
        scheduler.schedule(Box::new(move || state.on_frame()));
    }
}

// =============================================================================
// ScrollSpyController
// =============================================================================

/// Tracks the heading in view and highlights its TOC link
pub struct ScrollSpyController<D: Dom, S: FrameScheduler> {
    state: Rc<SpyState<D>>,
    scheduler: Rc<S>,
    listeners: Vec<D::Listener>,
    started: bool,
}

impl<D, S> ScrollSpyController<D, S>
where
    D: Dom + 'static,
    S: FrameScheduler + 'static,
{
    /// Find the TOC panel by `config.panel_selector` and attach to it
    pub fn attach(dom: D, scheduler: Rc<S>, config: ScrollSpyConfig) -> Result<Self, AttachError> {
        config.validate()?;
        let panel = dom
            .query_selector(&config.panel_selector)
            .ok_or_else(|| AttachError::PanelNotFound(config.panel_selector.clone()))?;
        Self::with_panel(dom, panel, scheduler, config)
    }

    /// Attach to an explicit TOC panel element
    pub fn with_panel(
        dom: D,
        panel: D::Element,
        scheduler: Rc<S>,
        config: ScrollSpyConfig,
    ) -> Result<Self, AttachError> {
        config.validate()?;
        let catalog = build_catalog(&dom, &panel, &config)?;

        Ok(Self {
            state: Rc::new(SpyState {
                dom,
                config,
                panel,
                catalog,
                active: RefCell::new(None),
                gate: FrameGate::new(),
                disposed: Cell::new(false),
            }),
            scheduler,
            listeners: Vec::new(),
            started: false,
        })
    }

    /// Subscribe to every scroll source and schedule the initial frame.
    /// Calling it again, or after `dispose`, does nothing.
    pub fn start(&mut self) {
        if self.started || self.state.disposed.get() {
            return;
        }
        self.started = true;

        let handler: Rc<dyn Fn()> = {
            let state = Rc::clone(&self.state);
            let scheduler = Rc::clone(&self.scheduler);
            Rc::new(move || request_frame(&state, &scheduler))
        };

        let dom = &self.state.dom;
        let mut candidates = vec![ListenTarget::Window, ListenTarget::ScrollingRoot];
        candidates.extend(
            self.state
                .config
                .scroll_containers
                .iter()
                .cloned()
                .map(ListenTarget::Selector),
        );

        // the scrolling root is often also one of the layout containers
        let mut scroll_targets: Vec<D::Target> = Vec::new();
        for candidate in &candidates {
            if let Some(target) = dom.resolve_target(candidate) {
                if !scroll_targets.contains(&target) {
                    scroll_targets.push(target);
                }
            }
        }

        for target in &scroll_targets {
            if let Some(listener) = dom.listen(target, SpyEvent::Scroll, Rc::clone(&handler)) {
                self.listeners.push(listener);
            }
        }

        if let Some(window) = dom.resolve_target(&ListenTarget::Window) {
            for event in [SpyEvent::Resize, SpyEvent::HashChange] {
                if let Some(listener) = dom.listen(&window, event, Rc::clone(&handler)) {
                    self.listeners.push(listener);
                }
            }
        }

        log::info!(
            "[toc-scrollspy] loaded: {} headings, {} listeners",
            self.state.catalog.len(),
            self.listeners.len()
        );

        request_frame(&self.state, &self.scheduler);
    }

    /// Request a coalesced recomputation, e.g. after the host changed layout
    pub fn refresh(&self) {
        if self.started {
            request_frame(&self.state, &self.scheduler);
        }
    }

    pub fn catalog(&self) -> &Catalog<D::Element> {
        &self.state.catalog
    }

    pub fn config(&self) -> &ScrollSpyConfig {
        &self.state.config
    }

    pub fn dom(&self) -> &D {
        &self.state.dom
    }

    pub fn active_id(&self) -> Option<String> {
        self.state.active.borrow().clone()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_pending(&self) -> bool {
        self.state.gate.is_pending()
    }

    /// Frames that actually ran the select/apply pass
    pub fn recompute_count(&self) -> u64 {
        self.state.gate.frame_count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn stats(&self) -> SpyStats {
        SpyStats {
            items: self.state.catalog.len(),
            active_id: self.active_id(),
            requests: self.state.gate.request_count(),
            recomputations: self.recompute_count(),
            listeners: self.listeners.len(),
            started: self.started,
            disposed: self.is_disposed(),
        }
    }
}

impl<D: Dom, S: FrameScheduler> ScrollSpyController<D, S> {
    /// Unsubscribe everything and clear the active marker.
    /// A frame already queued still fires but does nothing.
    pub fn dispose(&mut self) {
        if self.state.disposed.replace(true) {
            return;
        }
        for listener in self.listeners.drain(..) {
            self.state.dom.unlisten(listener);
        }
        applier::clear_active(&self.state.dom, &self.state.catalog, &self.state.config.active_class);
        self.state.active.borrow_mut().take();
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.get()
    }
}

impl<D: Dom, S: FrameScheduler> Drop for ScrollSpyController<D, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
