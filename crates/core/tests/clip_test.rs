//! Tests for clipping: the clip path stack and the clip operators.

mod common;

use common::{assert_rect_eq, rect, run, run_with};
use psvg_core::interp::UNMARKED;
use psvg_core::{ClippingStack, ConversionParams, GraphicsPath, PathFormat};

fn intersecting() -> ConversionParams {
    ConversionParams {
        compute_clip_intersections: true,
        ..ConversionParams::default()
    }
}

// ============================================================================
// Clip stack
// ============================================================================

/// Test: balanced gsave/grestore pairs leave the stack depth unchanged.
#[test]
fn test_balanced_gsave_grestore() {
    let mut stack = ClippingStack::new();
    stack.push(&GraphicsPath::from_rect(0.0, 0.0, 5.0, 5.0), UNMARKED);
    for n in 1..=4 {
        for _ in 0..n {
            stack.dup(UNMARKED);
        }
        stack.replace(&GraphicsPath::from_rect(1.0, 1.0, 2.0, 2.0));
        for _ in 0..n {
            stack.pop(UNMARKED, false);
        }
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top_id(), 1);
    }
}

/// Test: restore returns to the depth and clip path of its save, even with
/// unbalanced gsave frames in between.
#[test]
fn test_save_restore_discards_unmarked_frames() {
    let mut stack = ClippingStack::new();
    let outer = GraphicsPath::from_rect(0.0, 0.0, 10.0, 10.0);
    stack.push(&outer, UNMARKED);
    stack.dup(UNMARKED);
    let depth = stack.depth();

    stack.dup(42);
    stack.replace(&GraphicsPath::from_rect(0.0, 0.0, 3.0, 3.0));
    stack.dup(UNMARKED);
    stack.push_empty_path();
    stack.dup(UNMARKED);
    stack.pop(42, false);

    assert_eq!(stack.depth(), depth);
    assert_eq!(stack.top(), Some(&outer));
}

// ============================================================================
// Clip operators
// ============================================================================

/// Test: a clip defines a clipPath that the next fill references.
#[test]
fn test_clip_applies_to_fill() {
    let device = run(|h| {
        rect(h, 0.0, 0.0, 5.0, 5.0);
        h.do_clip(false);
        // clip keeps the current path
        assert!(!h.path().is_empty());
        h.do_newpath(false);
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.do_fill(false);
    });

    assert_eq!(device.defs.len(), 1);
    let clip = &device.defs[0];
    assert_eq!(clip.name(), "clipPath");
    assert_eq!(clip.attribute("id"), Some("clip1"));
    assert!(!clip.has_attribute("clip-path"));
    assert_eq!(clip.children()[0].attribute("d"), Some("M0 0H5V5H0Z"));
    assert!(!clip.children()[0].has_attribute("clip-rule"));

    let path = &device.page[0];
    assert_eq!(path.attribute("clip-path"), Some("url(#clip1)"));
    assert_eq!(device.embedded, vec![(0.0, 0.0, 5.0, 5.0)]);
}

/// Test: eoclip writes the clip rule.
#[test]
fn test_eoclip_rule() {
    let device = run(|h| {
        rect(h, 0.0, 0.0, 5.0, 5.0);
        h.do_clip(true);
    });
    assert_eq!(
        device.defs[0].children()[0].attribute("clip-rule"),
        Some("evenodd")
    );
}

/// Test: clipping with an empty path defines nothing.
#[test]
fn test_clip_empty_path() {
    let device = run(|h| {
        h.do_clip(false);
        h.do_moveto(1.0, 1.0);
        h.do_closepath();
        h.do_newpath(false);
        h.do_clip(false);
    });
    assert!(device.defs.is_empty());
}

/// Test: a clip set between gsave and grestore ends with grestore.
#[test]
fn test_grestore_removes_clip() {
    let device = run(|h| {
        h.do_gsave();
        rect(h, 0.0, 0.0, 5.0, 5.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_grestore();
        assert_eq!(h.clip_stack().top_id(), 0);
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.do_fill(false);
    });
    assert!(!device.page[0].has_attribute("clip-path"));
    assert_eq!(device.embedded, vec![(0.0, 0.0, 10.0, 10.0)]);
}

/// Test: without intersection mode, nested clips reference their parent.
#[test]
fn test_nested_clip_references_parent() {
    let device = run(|h| {
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.do_clip(false);
        h.do_newpath(false);
        rect(h, 5.0, 5.0, 15.0, 15.0);
        h.do_clip(false);
        h.do_newpath(false);
    });
    assert_eq!(device.defs.len(), 2);
    assert_eq!(device.defs[1].attribute("id"), Some("clip2"));
    assert_eq!(device.defs[1].attribute("clip-path"), Some("url(#clip1)"));
}

/// Test: intersection of two overlapping squares.
#[test]
fn test_clip_intersection() {
    let device = run_with(intersecting(), |h| {
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.do_clip(false);
        h.do_newpath(false);
        rect(h, 5.0, 5.0, 15.0, 15.0);
        h.do_clip(false);
        h.do_newpath(false);

        let clip = h.clip_stack().top().and_then(GraphicsPath::bbox);
        assert_rect_eq(clip.unwrap(), (5.0, 5.0, 10.0, 10.0));
    });
    assert_eq!(device.defs.len(), 2);
    assert!(!device.defs[1].has_attribute("clip-path"));
}

/// Test: disjoint clip regions leave an empty clip region in effect.
#[test]
fn test_disjoint_clip_intersection() {
    let device = run_with(intersecting(), |h| {
        rect(h, 0.0, 0.0, 1.0, 1.0);
        h.do_clip(false);
        h.do_newpath(false);
        rect(h, 5.0, 5.0, 6.0, 6.0);
        h.do_clip(false);
        h.do_newpath(false);
        assert_eq!(h.clip_stack().top_id(), 2);
        assert!(h.clip_stack().top().is_some_and(GraphicsPath::is_empty));
        rect(h, 5.0, 5.0, 6.0, 6.0);
        h.do_fill(false);
    });
    let clip = &device.defs[1];
    assert_eq!(clip.attribute("id"), Some("clip2"));
    assert!(!clip.has_attribute("clip-path"));
    assert!(clip.children().is_empty());
    assert_eq!(device.page[0].attribute("clip-path"), Some("url(#clip2)"));
    assert!(device.embedded.is_empty());
}

/// Test: once the clip region is empty, later clips stay empty.
#[test]
fn test_empty_clip_region_persists() {
    let device = run_with(intersecting(), |h| {
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.do_clip(false);
        h.do_newpath(false);
        rect(h, 20.0, 20.0, 30.0, 30.0);
        h.do_clip(false);
        h.do_newpath(false);
        rect(h, 20.0, 20.0, 30.0, 30.0);
        h.do_clip(false);
        h.do_newpath(false);
        rect(h, 20.0, 20.0, 30.0, 30.0);
        h.do_fill(false);
    });

    assert_eq!(device.defs.len(), 3);
    let last = &device.defs[2];
    assert_eq!(last.attribute("id"), Some("clip3"));
    assert!(last.children().is_empty());
    assert_eq!(device.page.len(), 1);
    assert_eq!(device.page[0].attribute("clip-path"), Some("url(#clip3)"));
    assert_eq!(device.bbox(), None);
}

/// Test: an empty clip region ends with the grestore of its frame.
#[test]
fn test_empty_clip_region_restored() {
    let device = run_with(intersecting(), |h| {
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_gsave();
        rect(h, 20.0, 20.0, 30.0, 30.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_grestore();
        rect(h, 0.0, 0.0, 20.0, 20.0);
        h.do_fill(false);
    });
    assert_eq!(device.page[0].attribute("clip-path"), Some("url(#clip1)"));
    assert_eq!(device.embedded, vec![(0.0, 0.0, 10.0, 10.0)]);
}

/// Test: clip paths are stored in device space.
#[test]
fn test_clip_transformed() {
    let device = run(|h| {
        h.do_translate(10.0, 0.0);
        rect(h, 0.0, 0.0, 1.0, 1.0);
        h.do_clip(false);
    });
    assert_eq!(
        device.defs[0].children()[0].attribute("d"),
        Some("M10 0H11V1H10Z")
    );
}

/// Test: initclip removes the clip of the current frame only.
#[test]
fn test_initclip() {
    run(|h| {
        h.do_gsave();
        rect(h, 0.0, 0.0, 1.0, 1.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_gsave();
        h.do_initclip();
        assert_eq!(h.clip_stack().top_id(), 0);
        h.do_grestore();
        h.do_grestore();
        assert_eq!(h.clip_stack().top_id(), 1);
    });
}

/// Test: grestoreall returns to the clip of the innermost save.
#[test]
fn test_grestoreall_operator() {
    let device = run(|h| {
        h.execute("save", &mut vec![1.0]).unwrap();
        rect(h, 0.0, 0.0, 5.0, 5.0);
        h.execute("clip", &mut vec![]).unwrap();
        h.execute("newpath", &mut vec![]).unwrap();
        h.execute("gsave", &mut vec![]).unwrap();
        h.execute("gsave", &mut vec![]).unwrap();
        rect(h, 1.0, 1.0, 2.0, 2.0);
        h.execute("clip", &mut vec![]).unwrap();
        h.execute("newpath", &mut vec![]).unwrap();
        assert_eq!(h.clip_stack().top_id(), 2);

        h.execute("grestoreall", &mut vec![]).unwrap();
        assert_eq!(h.clip_stack().depth(), 1);
        assert_eq!(h.clip_stack().top_id(), 1);
        rect(h, 0.0, 0.0, 10.0, 10.0);
        h.execute("fill", &mut vec![]).unwrap();
    });
    assert_eq!(device.page[0].attribute("clip-path"), Some("url(#clip1)"));
    assert_eq!(device.embedded, vec![(0.0, 0.0, 5.0, 5.0)]);
}

/// Test: clip path data follows the configured path format.
#[test]
fn test_clip_relative_path_format() {
    let params = ConversionParams {
        path_format: PathFormat::Relative,
        ..ConversionParams::default()
    };
    let device = run_with(params, |h| {
        rect(h, 1.0, 2.0, 11.0, 12.0);
        h.do_clip(false);
    });
    assert_eq!(
        device.defs[0].children()[0].attribute("d"),
        Some("m1 2h10v10h-10z")
    );
}

/// Test: save/restore through the handler restores the saved clip.
#[test]
fn test_save_restore_operators() {
    run(|h| {
        h.do_save(3);
        rect(h, 0.0, 0.0, 1.0, 1.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_gsave();
        h.do_gsave();
        h.do_restore(3);
        assert_eq!(h.clip_stack().top_id(), 0);
        assert!(h.clip_stack().is_empty());
    });
}

/// Test: clippath loads the clip geometry into the next painted path.
#[test]
fn test_clippath_then_fill() {
    let device = run(|h| {
        rect(h, 0.0, 0.0, 5.0, 5.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_clippath();
        assert!(h.clip_stack().clippath_loaded());
        // newpath while drawing keeps the loaded clip path
        h.do_newpath(true);
        assert!(h.clip_stack().clippath_loaded());
        h.do_fill(false);
        assert!(!h.clip_stack().clippath_loaded());
    });
    let path = &device.page[0];
    assert_eq!(path.attribute("d"), Some("M0 0H5V5H0Z"));
    assert_eq!(path.attribute("clip-path"), Some("url(#clip1)"));
    assert_eq!(device.embedded, vec![(0.0, 0.0, 5.0, 5.0)]);
}

/// Test: a plain newpath discards a loaded clip path.
#[test]
fn test_newpath_discards_clippath() {
    let device = run(|h| {
        rect(h, 0.0, 0.0, 5.0, 5.0);
        h.do_clip(false);
        h.do_newpath(false);
        h.do_clippath();
        h.do_newpath(false);
        h.do_fill(false);
    });
    assert!(device.page.is_empty());
}
