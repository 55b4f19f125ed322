//! Item catalog: TOC links resolved to the headings they point at
//!
//! Built once when the controller attaches. Broken links are dropped without
//! complaint; an empty result means there is nothing to track.

use std::collections::HashSet;

use crate::config::ScrollSpyConfig;
use crate::spy::dom::Dom;

// =============================================================================
// Types
// =============================================================================

/// One navigable TOC entry
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem<E> {
    /// Decoded fragment id
    pub id: String,
    /// Heading or section in the main document
    pub target: E,
    /// Anchor inside the TOC
    pub link: E,
    /// Enclosing list item, if the link is wrapped in one
    pub list_item: Option<E>,
}

/// TOC entries ordered by the document position of their targets
#[derive(Debug, Clone)]
pub struct Catalog<E> {
    items: Vec<CatalogItem<E>>,
}

impl<E> Catalog<E> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CatalogItem<E>] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogItem<E>> {
        self.items.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem<E>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn first(&self) -> Option<&CatalogItem<E>> {
        self.items.first()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}

/// Why a catalog came out empty
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    NoLinks,
    NoResolvableTargets { links: usize },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NoLinks => write!(f, "TOC contains no fragment links"),
            CatalogError::NoResolvableTargets { links } => {
                write!(f, "none of {} TOC links point at an element in the document", links)
            }
        }
    }
}

impl std::error::Error for CatalogError {}

// =============================================================================
// Builder
// =============================================================================

/// Decode a URL fragment the way `decodeURIComponent` would, returning the
/// raw text when it is not valid percent-encoded UTF-8.
pub fn decode_fragment(raw: &str) -> String {
    // urlencoding passes malformed escapes through; decodeURIComponent rejects the whole input
    if !has_well_formed_escapes(raw) {
        return raw.to_string();
    }
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// Every `%` is followed by two hex digits
fn has_well_formed_escapes(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

/// Scan the TOC panel and build the catalog
pub fn build_catalog<D: Dom>(
    dom: &D,
    panel: &D::Element,
    config: &ScrollSpyConfig,
) -> Result<Catalog<D::Element>, CatalogError> {
    let links = dom.query_selector_all(panel, &config.link_selector);
    if links.is_empty() {
        return Err(CatalogError::NoLinks);
    }

    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(links.len());

    for link in &links {
        let Some(href) = dom.get_attribute(link, "href") else {
            continue;
        };
        let Some(fragment) = href.strip_prefix('#') else {
            continue;
        };
        let id = decode_fragment(fragment);
        if id.is_empty() || seen.contains(&id) {
            continue;
        }
        let Some(target) = dom.get_element_by_id(&id) else {
            log::debug!("[toc-scrollspy] skipping #{}: no matching element", id);
            continue;
        };

        let list_item = dom.closest(link, &config.list_item_selector);
        seen.insert(id.clone());
        items.push(CatalogItem {
            id,
            target,
            link: link.clone(),
            list_item,
        });
    }

    if items.is_empty() {
        return Err(CatalogError::NoResolvableTargets { links: links.len() });
    }

    // stable: links to targets at the same position keep TOC order
    items.sort_by(|a, b| dom.compare_document_position(&a.target, &b.target));

    Ok(Catalog { items })
}
