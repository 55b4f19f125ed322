use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::ScrollSpyConfig;
use crate::spy::browser::{AnimationFrameScheduler, BrowserDom};
use crate::spy::controller::ScrollSpyController;

type BrowserController = ScrollSpyController<BrowserDom, AnimationFrameScheduler>;

fn parse_options(options: JsValue) -> Result<ScrollSpyConfig, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(ScrollSpyConfig::default());
    }
    let config: ScrollSpyConfig = serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))?;
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}

/// Scrollspy bound to the page's TOC panel.
///
/// A missing panel or a TOC without resolvable links gives an inactive
/// instance; every method on it is a no-op.
#[wasm_bindgen]
pub struct TocScrollSpy {
    inner: Option<BrowserController>,
}

#[wasm_bindgen]
impl TocScrollSpy {
    /// `options` takes the camelCase fields of `ScrollSpyConfig`, all optional
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<TocScrollSpy, JsValue> {
        let config = parse_options(options)?;

        let Some(dom) = BrowserDom::new() else {
            log::debug!("[toc-scrollspy] no document, staying inactive");
            return Ok(TocScrollSpy { inner: None });
        };
        let scheduler = Rc::new(AnimationFrameScheduler::new(dom.window().clone()));

        match ScrollSpyController::attach(dom, scheduler, config) {
            Ok(controller) => Ok(TocScrollSpy {
                inner: Some(controller),
            }),
            Err(e) => {
                log::debug!("[toc-scrollspy] inactive: {}", e);
                Ok(TocScrollSpy { inner: None })
            }
        }
    }

    #[wasm_bindgen]
    pub fn start(&mut self) {
        if let Some(controller) = self.inner.as_mut() {
            controller.start();
        }
    }

    /// Request a recomputation on the next frame
    #[wasm_bindgen]
    pub fn refresh(&self) {
        if let Some(controller) = self.inner.as_ref() {
            controller.refresh();
        }
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        if let Some(controller) = self.inner.as_mut() {
            controller.dispose();
        }
    }

    /// True when a TOC was found and has trackable links
    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner
            .as_ref()
            .is_some_and(|controller| !controller.is_disposed())
    }

    #[wasm_bindgen(getter, js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.inner.as_ref().and_then(|controller| controller.active_id())
    }

    #[wasm_bindgen(getter, js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |controller| controller.catalog().len())
    }

    /// Tracked ids in document order
    #[wasm_bindgen(js_name = itemIds)]
    pub fn item_ids(&self) -> Vec<String> {
        self.inner.as_ref().map_or_else(Vec::new, |controller| {
            controller
                .catalog()
                .iter()
                .map(|item| item.id.clone())
                .collect()
        })
    }

    /// { items, activeId, requests, recomputations, listeners, started, disposed }
    #[wasm_bindgen]
    pub fn stats(&self) -> JsValue {
        let Some(controller) = self.inner.as_ref() else {
            return JsValue::NULL;
        };
        match serde_wasm_bindgen::to_value(&controller.stats()) {
            Ok(v) => v,
            Err(e) => {
                web_sys::console::error_1(
                    &format!("[toc-scrollspy] Serialization failed: {:?}", e).into(),
                );
                JsValue::NULL
            }
        }
    }
}

/// Create and start a scrollspy in one call, the usual page-script entry point
#[wasm_bindgen(js_name = startScrollSpy)]
pub fn start_scroll_spy(options: JsValue) -> Result<TocScrollSpy, JsValue> {
    let mut spy = TocScrollSpy::new(options)?;
    spy.start();
    Ok(spy)
}
