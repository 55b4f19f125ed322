//! Active-state applier
//!
//! Moves the active class to the current item and keeps its link in view
//! inside the TOC panel.

use crate::config::{PanelScrollPolicy, ScrollSpyConfig};
use crate::spy::catalog::{Catalog, CatalogItem};
use crate::spy::dom::{Dom, Rect, ScrollMetrics, ScrollMode};

// =============================================================================
// Panel scrolling
// =============================================================================

/// Panel geometry captured in one read pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelGeometry {
    /// Panel's bounding box in viewport coordinates
    pub rect: Rect,
    pub metrics: ScrollMetrics,
}

/// Scroll offset the panel should move to so `link` is comfortably visible,
/// or `None` when no scrolling is needed.
///
/// The result is always within `[0, scroll_height - client_height]`.
pub fn panel_scroll_target(
    panel: PanelGeometry,
    link: Rect,
    config: &ScrollSpyConfig,
) -> Option<f64> {
    let metrics = panel.metrics;
    if metrics.scroll_height <= metrics.client_height + config.overflow_tolerance {
        return None;
    }

    // relative to the panel's box, not the viewport
    let link_top = link.top - panel.rect.top;
    let link_bottom = link.bottom - panel.rect.top;

    let target = match config.scroll_policy {
        PanelScrollPolicy::Center => {
            let pad = config.edge_padding;
            if link_top >= pad && link_bottom <= metrics.client_height - pad {
                return None;
            }
            let center_in_content = link_top + metrics.scroll_top + link.height() * 0.5;
            center_in_content - metrics.client_height * 0.5
        }
        PanelScrollPolicy::NearestEdge => {
            if link_top < 0.0 {
                metrics.scroll_top + link_top
            } else if link_bottom > metrics.client_height {
                metrics.scroll_top + link_bottom - metrics.client_height
            } else {
                return None;
            }
        }
    };

    Some(clamp_scroll(target, &metrics))
}

fn clamp_scroll(target: f64, metrics: &ScrollMetrics) -> f64 {
    if target.is_nan() {
        return 0.0;
    }
    target.clamp(0.0, metrics.max_scroll())
}

/// Instant when reduced motion is requested or cannot be queried
pub fn scroll_mode<D: Dom>(dom: &D, config: &ScrollSpyConfig) -> ScrollMode {
    match dom.media_matches(&config.reduced_motion_query) {
        Some(false) => ScrollMode::Smooth,
        Some(true) | None => ScrollMode::Instant,
    }
}

/// Scroll `panel` so `link` sits in a comfortable position, if needed
pub fn reveal_in_panel<D: Dom>(
    dom: &D,
    panel: &D::Element,
    link: &D::Element,
    config: &ScrollSpyConfig,
) -> Option<f64> {
    let geometry = PanelGeometry {
        rect: dom.bounding_rect(panel),
        metrics: dom.scroll_metrics(panel),
    };
    let target = panel_scroll_target(geometry, dom.bounding_rect(link), config)?;
    dom.scroll_to(panel, target, scroll_mode(dom, config));
    Some(target)
}

// =============================================================================
// Class state
// =============================================================================

/// Clear the active class from every item, then mark the one matching `id`.
///
/// Returns the marked item; `None` leaves every item cleared.
pub fn mark_active<'a, D: Dom>(
    dom: &D,
    catalog: &'a Catalog<D::Element>,
    id: Option<&str>,
    class: &str,
) -> Option<&'a CatalogItem<D::Element>> {
    clear_active(dom, catalog, class);

    let item = catalog.get(id?)?;
    dom.add_class(&item.link, class);
    if let Some(li) = &item.list_item {
        dom.add_class(li, class);
    }
    Some(item)
}

pub fn clear_active<D: Dom>(dom: &D, catalog: &Catalog<D::Element>, class: &str) {
    for item in catalog.iter() {
        dom.remove_class(&item.link, class);
        if let Some(li) = &item.list_item {
            dom.remove_class(li, class);
        }
    }
}

/// Mark `id` active and bring its link into view within the panel.
/// Returns true when an item was marked.
pub fn apply_active<D: Dom>(
    dom: &D,
    panel: &D::Element,
    catalog: &Catalog<D::Element>,
    id: Option<&str>,
    config: &ScrollSpyConfig,
) -> bool {
    match mark_active(dom, catalog, id, &config.active_class) {
        Some(item) => {
            reveal_in_panel(dom, panel, &item.link, config);
            true
        }
        None => false,
    }
}
