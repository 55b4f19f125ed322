use super::fake_dom::TocFixture;
use crate::config::{PanelScrollPolicy, ScrollSpyConfig};
use crate::spy::applier::{
    apply_active, mark_active, panel_scroll_target, reveal_in_panel, PanelGeometry,
};
use crate::spy::catalog::build_catalog;
use crate::spy::dom::{Dom, Rect, ScrollMetrics, ScrollMode};

const CLASS: &str = "is-active";

/// Panel at viewport y=100, 200px tall, 1000px of content
fn panel(scroll_top: f64) -> PanelGeometry {
    PanelGeometry {
        rect: Rect::new(100.0, 300.0),
        metrics: ScrollMetrics {
            scroll_top,
            scroll_height: 1000.0,
            client_height: 200.0,
        },
    }
}

/// 20px link whose top is `offset` below the panel's top edge
fn link_at(offset: f64) -> Rect {
    Rect::new(100.0 + offset, 120.0 + offset)
}

// -------------------------------------------------------------------------
// Panel scroll target
// -------------------------------------------------------------------------

#[test]
fn test_no_overflow_never_scrolls() {
    let config = ScrollSpyConfig::default();
    let geometry = PanelGeometry {
        rect: Rect::new(100.0, 300.0),
        metrics: ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 200.0,
            client_height: 200.0,
        },
    };
    for offset in [-500.0, -10.0, 0.0, 100.0, 190.0, 800.0] {
        assert_eq!(panel_scroll_target(geometry, link_at(offset), &config), None);
    }
}

#[test]
fn test_one_pixel_overflow_is_tolerated() {
    let config = ScrollSpyConfig::default();
    let mut geometry = panel(0.0);
    geometry.metrics.scroll_height = 201.0;
    assert_eq!(panel_scroll_target(geometry, link_at(300.0), &config), None);

    geometry.metrics.scroll_height = 202.0;
    assert!(panel_scroll_target(geometry, link_at(300.0), &config).is_some());
}

#[test]
fn test_comfortable_link_left_alone() {
    let config = ScrollSpyConfig::default();
    assert_eq!(panel_scroll_target(panel(0.0), link_at(50.0), &config), None);
    // exactly on the padding edges
    assert_eq!(panel_scroll_target(panel(0.0), link_at(40.0), &config), None);
    assert_eq!(panel_scroll_target(panel(0.0), link_at(140.0), &config), None);
}

#[test]
fn test_link_near_bottom_is_centered() {
    let config = ScrollSpyConfig::default();
    // link spans 220..240 in the panel: center 230 -> scrollTop 130
    assert_eq!(panel_scroll_target(panel(0.0), link_at(220.0), &config), Some(130.0));
}

#[test]
fn test_link_near_top_is_centered() {
    let config = ScrollSpyConfig::default();
    // at 10px from top with 300 already scrolled: center 320 -> 220
    assert_eq!(panel_scroll_target(panel(300.0), link_at(10.0), &config), Some(220.0));
}

#[test]
fn test_center_target_clamped() {
    let config = ScrollSpyConfig::default();
    assert_eq!(panel_scroll_target(panel(0.0), link_at(-30.0), &config), Some(0.0));
    assert_eq!(panel_scroll_target(panel(790.0), link_at(190.0), &config), Some(800.0));
}

#[test]
fn test_target_always_within_scroll_range() {
    for policy in [PanelScrollPolicy::Center, PanelScrollPolicy::NearestEdge] {
        let config = ScrollSpyConfig {
            scroll_policy: policy,
            ..ScrollSpyConfig::default()
        };
        for scroll_top in [0.0, 120.0, 400.0, 800.0] {
            let mut offset = -1200.0;
            while offset <= 1200.0 {
                if let Some(target) = panel_scroll_target(panel(scroll_top), link_at(offset), &config) {
                    assert!(
                        (0.0..=800.0).contains(&target),
                        "{:?}: target {} out of range (scroll {}, offset {})",
                        policy,
                        target,
                        scroll_top,
                        offset
                    );
                }
                offset += 13.0;
            }
        }
    }
}

#[test]
fn test_nearest_edge_policy() {
    let config = ScrollSpyConfig::nearest_edge();
    // clipped above: align top
    assert_eq!(panel_scroll_target(panel(300.0), link_at(-30.0), &config), Some(270.0));
    // clipped below: align bottom (bottom at 230 in a 200px panel)
    assert_eq!(panel_scroll_target(panel(0.0), link_at(210.0), &config), Some(30.0));
    // fully visible, even hugging the edge
    assert_eq!(panel_scroll_target(panel(0.0), link_at(0.0), &config), None);
    assert_eq!(panel_scroll_target(panel(0.0), link_at(180.0), &config), None);
}

// -------------------------------------------------------------------------
// Class state
// -------------------------------------------------------------------------

#[test]
fn test_marks_link_and_list_item() {
    let fx = TocFixture::new(&[("a", 0.0), ("b", 200.0), ("c", 500.0)]);
    let catalog = build_catalog(&fx.dom, &fx.panel, &ScrollSpyConfig::default()).unwrap();

    let item = mark_active(&fx.dom, &catalog, Some("b"), CLASS).unwrap();
    assert_eq!(item.id, "b");
    assert_eq!(fx.dom.elements_with_class(CLASS), vec![fx.items[1], fx.links[1]]);

    mark_active(&fx.dom, &catalog, Some("c"), CLASS);
    assert_eq!(fx.dom.elements_with_class(CLASS), vec![fx.items[2], fx.links[2]]);
}

#[test]
fn test_mark_is_idempotent() {
    let fx = TocFixture::new(&[("a", 0.0), ("b", 200.0)]);
    let catalog = build_catalog(&fx.dom, &fx.panel, &ScrollSpyConfig::default()).unwrap();

    mark_active(&fx.dom, &catalog, Some("a"), CLASS);
    let once = fx.dom.elements_with_class(CLASS);
    mark_active(&fx.dom, &catalog, Some("a"), CLASS);
    assert_eq!(fx.dom.elements_with_class(CLASS), once);
}

#[test]
fn test_unknown_id_clears_everything() {
    let fx = TocFixture::new(&[("a", 0.0), ("b", 200.0)]);
    let catalog = build_catalog(&fx.dom, &fx.panel, &ScrollSpyConfig::default()).unwrap();

    mark_active(&fx.dom, &catalog, Some("a"), CLASS);
    assert!(mark_active(&fx.dom, &catalog, Some("removed"), CLASS).is_none());
    assert!(fx.dom.elements_with_class(CLASS).is_empty());

    mark_active(&fx.dom, &catalog, Some("b"), CLASS);
    assert!(mark_active(&fx.dom, &catalog, None, CLASS).is_none());
    assert!(fx.dom.elements_with_class(CLASS).is_empty());
}

#[test]
fn test_other_classes_untouched() {
    let fx = TocFixture::new(&[("a", 0.0)]);
    let catalog = build_catalog(&fx.dom, &fx.panel, &ScrollSpyConfig::default()).unwrap();
    fx.dom.add_class(&fx.links[0], "toc-link");

    mark_active(&fx.dom, &catalog, Some("a"), CLASS);
    mark_active(&fx.dom, &catalog, None, CLASS);
    assert!(fx.dom.has_class(fx.links[0], "toc-link"));
}

// -------------------------------------------------------------------------
// Reveal
// -------------------------------------------------------------------------

fn scrollable_fixture() -> TocFixture {
    let fx = TocFixture::new(&[("a", 0.0), ("b", 200.0)]);
    fx.dom.set_rect(fx.panel, Rect::new(100.0, 300.0));
    fx.dom.set_metrics(
        fx.panel,
        ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 1000.0,
            client_height: 200.0,
        },
    );
    fx.dom.set_rect(fx.links[0], link_at(60.0));
    fx.dom.set_rect(fx.links[1], link_at(220.0));
    fx
}

#[test]
fn test_reveal_scrolls_smoothly_by_default() {
    let fx = scrollable_fixture();
    let config = ScrollSpyConfig::default();

    assert_eq!(reveal_in_panel(&fx.dom, &fx.panel, &fx.links[1], &config), Some(130.0));
    assert_eq!(fx.dom.scroll_calls(), vec![(fx.panel, 130.0, ScrollMode::Smooth)]);
    assert_eq!(fx.dom.scroll_top(fx.panel), 130.0);
}

#[test]
fn test_reveal_respects_reduced_motion() {
    let fx = scrollable_fixture();
    fx.dom.set_media(Some(true));

    reveal_in_panel(&fx.dom, &fx.panel, &fx.links[1], &ScrollSpyConfig::default());
    assert_eq!(fx.dom.scroll_calls()[0].2, ScrollMode::Instant);
}

#[test]
fn test_reveal_without_media_queries_is_instant() {
    let fx = scrollable_fixture();
    fx.dom.set_media(None);

    reveal_in_panel(&fx.dom, &fx.panel, &fx.links[1], &ScrollSpyConfig::default());
    assert_eq!(fx.dom.scroll_calls()[0].2, ScrollMode::Instant);
}

#[test]
fn test_apply_active_skips_comfortable_link() {
    let fx = scrollable_fixture();
    let config = ScrollSpyConfig::default();
    let catalog = build_catalog(&fx.dom, &fx.panel, &config).unwrap();

    assert!(apply_active(&fx.dom, &fx.panel, &catalog, Some("a"), &config));
    assert!(fx.dom.has_class(fx.links[0], CLASS));
    assert!(fx.dom.scroll_calls().is_empty());
}

#[test]
fn test_apply_active_unknown_id_does_not_scroll() {
    let fx = scrollable_fixture();
    let config = ScrollSpyConfig::default();
    let catalog = build_catalog(&fx.dom, &fx.panel, &config).unwrap();

    assert!(!apply_active(&fx.dom, &fx.panel, &catalog, Some("zzz"), &config));
    assert!(fx.dom.scroll_calls().is_empty());
}
