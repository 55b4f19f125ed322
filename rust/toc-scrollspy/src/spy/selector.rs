//! Current-item selection
//!
//! The reader's focal point is a horizontal "activation line" a fixed
//! distance below the viewport top. The current item is the last heading in
//! document order whose top edge has reached that line.

use crate::spy::catalog::Catalog;
use crate::spy::dom::Dom;

/// Index of the current item given heading tops in document order.
///
/// Stops at the first heading still below the line. Returns 0 when no
/// heading has been passed, and also for an empty sequence.
pub fn pick_index<I>(tops: I, activation_line: f64) -> usize
where
    I: IntoIterator<Item = f64>,
{
    let mut current = 0;
    for (idx, top) in tops.into_iter().enumerate() {
        if top <= activation_line {
            current = idx;
        } else {
            break;
        }
    }
    current
}

/// Id of the current catalog item, measured against the live layout
pub fn pick_current<'a, D: Dom>(
    dom: &D,
    catalog: &'a Catalog<D::Element>,
    activation_line: f64,
) -> Option<&'a str> {
    // lazy: headings past the first unpassed one are never measured
    let tops = catalog.iter().map(|item| dom.bounding_rect(&item.target).top);
    let idx = pick_index(tops, activation_line);
    catalog.items().get(idx).map(|item| item.id.as_str())
}
