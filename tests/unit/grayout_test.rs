//! Integration-level unit tests for the BackgroundGrayout service and the
//! darken color math.

use readescape::dom::PageDocument;
use readescape::services::grayout::{darken, BackgroundGrayout, BackgroundGrayoutTrait};
use readescape::types::settings::ReadingSettings;
use rstest::rstest;

/// Tabular check of the darken math across input formats.
#[rstest]
#[case("#ffffff", 0.2, "rgb(204,204,204)")]
#[case("#fff", 0.2, "rgb(204,204,204)")]
#[case("#000000", 0.5, "rgb(0,0,0)")]
#[case("rgb(100,150,200)", 0.5, "rgb(50,75,100)")]
#[case("rgb(100, 150, 200)", 0.5, "rgb(50,75,100)")]
#[case("rgba(100,150,200,0.3)", 0.5, "rgb(50,75,100)")]
#[case("rgb(255,255,255)", 0.0, "rgb(255,255,255)")]
#[case("rgb(255,255,255)", 1.0, "rgb(0,0,0)")]
#[case("white", 0.2, "rgb(204,204,204)")]
#[case("black", 0.2, "rgb(0,0,0)")]
#[case("gray", 0.5, "rgb(64,64,64)")]
#[case("transparent", 0.2, "rgb(204,204,204)")]
#[case("inherit", 0.2, "rgb(204,204,204)")]
#[case("", 0.2, "rgb(204,204,204)")]
#[case("no-such-color", 0.2, "rgb(204,204,204)")]
fn test_darken_cases(#[case] input: &str, #[case] amount: f64, #[case] expected: &str) {
    assert_eq!(darken(input, amount), expected);
}

/// Out-of-range amounts are clamped into [0, 1] instead of under- or
/// overshooting.
#[rstest]
#[case(-0.5, "rgb(100,100,100)")]
#[case(1.5, "rgb(0,0,0)")]
fn test_darken_clamps_amount(#[case] amount: f64, #[case] expected: &str) {
    assert_eq!(darken("rgb(100,100,100)", amount), expected);
}

/// Initialization captures the pre-existing background and applies the
/// grayout when enabled; removal restores the captured value verbatim.
#[test]
fn test_initialize_apply_remove_cycle() {
    let mut page =
        PageDocument::parse("<body style=\"background-color: #e0e0e0\"><p>x</p></body>");
    let body = page.body_id().unwrap();
    let settings = ReadingSettings::default();
    let mut grayout = BackgroundGrayout::new();

    grayout.initialize(&mut page, &settings);
    assert!(grayout.is_applied());
    // #e0e0e0 = 224 per channel, darkened by 0.2 -> 179.
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "rgb(179,179,179)"
    );

    grayout.remove(&mut page);
    assert!(!grayout.is_applied());
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "#e0e0e0"
    );
}

/// With the grayout disabled in settings, initialization only captures the
/// original background and leaves the page alone.
#[test]
fn test_initialize_disabled_leaves_page_untouched() {
    let mut page =
        PageDocument::parse("<body style=\"background-color: rgb(10,20,30)\"></body>");
    let body = page.body_id().unwrap();
    let mut settings = ReadingSettings::default();
    settings.grayout_background = false;
    let mut grayout = BackgroundGrayout::new();

    grayout.initialize(&mut page, &settings);
    assert!(!grayout.is_applied());
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "rgb(10,20,30)"
    );
}

/// Toggling off then on again darkens from the restored background, not
/// from the already-darkened value.
#[test]
fn test_toggle_roundtrip_from_original() {
    let mut page =
        PageDocument::parse("<body style=\"background-color: rgb(200,200,200)\"></body>");
    let body = page.body_id().unwrap();
    let mut grayout = BackgroundGrayout::new();
    grayout.initialize(&mut page, &ReadingSettings::default());
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "rgb(160,160,160)"
    );

    grayout.toggle(&mut page, false, 0.2);
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "rgb(200,200,200)"
    );

    grayout.toggle(&mut page, true, 0.2);
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "rgb(160,160,160)"
    );
}

/// A page with no inline background is treated as white; removal drops the
/// property instead of inventing one.
#[test]
fn test_no_original_background() {
    let mut page = PageDocument::parse("<body><p>x</p></body>");
    let body = page.body_id().unwrap();
    let mut grayout = BackgroundGrayout::new();

    grayout.initialize(&mut page, &ReadingSettings::default());
    assert_eq!(
        page.style_property(body, "background-color").unwrap(),
        "rgb(204,204,204)"
    );

    grayout.remove(&mut page);
    assert!(page.style_property(body, "background-color").is_none());
}
