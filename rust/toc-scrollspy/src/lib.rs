//! toc-scrollspy: Active-heading tracking for sticky documentation TOCs
//!
//! A Rust/WASM scrollspy. As the reader scrolls, the TOC link for the section
//! in view gets the `is-active` class, and a scrollable TOC panel follows it.
//!
//! # Architecture
//!
//! - `config.rs` - ScrollSpyConfig: selectors, activation line, panel policy
//! - `spy/dom.rs` - Dom: the facade every DOM read and write goes through
//! - `spy/catalog.rs` - Catalog: TOC links resolved to headings, document order
//! - `spy/selector.rs` - Current item from heading tops vs. the activation line
//! - `spy/applier.rs` - Class toggling and panel auto-scroll
//! - `spy/scheduler.rs` - FrameGate: one recomputation per animation frame
//! - `spy/controller.rs` - ScrollSpyController: attach / start / dispose
//! - `spy/browser.rs` - `web_sys` Dom and `requestAnimationFrame` scheduler
//! - `spy/wasm.rs` - TocScrollSpy: the JavaScript surface
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { startScrollSpy } from 'toc-scrollspy';
//!
//! await init();
//!
//! // Defaults: .sticky-toc panel, 110px activation line, centered panel scroll
//! const spy = startScrollSpy({ activationOffset: 96 });
//!
//! console.log(spy.isActive, spy.itemCount, spy.activeId);
//!
//! // Single-page navigation away from this document
//! spy.dispose();
//! ```
//!
//! # Usage (Rust)
//! ```ignore
//! let scheduler = Rc::new(ManualScheduler::new());
//! let mut spy = ScrollSpyController::attach(dom, scheduler.clone(), ScrollSpyConfig::default())?;
//! spy.start();
//! scheduler.flush();
//! assert_eq!(spy.active_id().as_deref(), Some("introduction"));
//! ```

pub mod config;
pub mod spy;

pub use config::*;
pub use spy::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook and console logging
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Info).ok();
    }
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("toc-scrollspy v{}", env!("CARGO_PKG_VERSION"))
}
