//! Integration tests for flag image resolution

use flagkit::flags::{
    flag_image, resolve_width, resolve_width_px, DisplaySize, FlagError, FlagResolver,
    ProviderWidth, PLACEHOLDER_CODE,
};
use proptest::prelude::*;

fn width_param(url: &str) -> u32 {
    let segment = url
        .rsplit('/')
        .nth(1)
        .expect("url should have a width segment");
    segment
        .strip_prefix('w')
        .and_then(|w| w.parse().ok())
        .unwrap_or_else(|| panic!("bad width segment in {url}"))
}

#[test]
fn ghana_at_twenty_pixels() {
    let width = resolve_width(DisplaySize::Px20);
    assert_eq!(width.px(), 20);

    let image = FlagResolver::default().resolve("GH", width);
    assert!(image.url.ends_with("w20/gh.png"), "{}", image.url);
    assert!(image.high_density_url.ends_with("w40/gh.png"));
    assert!(image.alt.contains("GH"));
}

#[test]
fn nigeria_at_forty_pixels() {
    let width = resolve_width(DisplaySize::Px40);
    assert_eq!(width.px(), 80);

    let image = FlagResolver::default().resolve("ng", width);
    assert!(image.url.ends_with("w80/ng.png"));
}

#[test]
fn empty_code_falls_back_to_placeholder() {
    let image = FlagResolver::default().resolve("", ProviderWidth::W20);
    assert_eq!(image.code, PLACEHOLDER_CODE);
    assert_eq!(image.url, format!("https://flagcdn.com/w20/{PLACEHOLDER_CODE}.png"));
    assert!(image.alt.to_lowercase().contains("unknown"));
}

#[test]
fn three_letter_code_falls_back_like_empty() {
    let resolver = FlagResolver::default();
    let usa = resolver.resolve("USA", ProviderWidth::W20);
    let empty = resolver.resolve("", ProviderWidth::W20);
    assert_eq!(usa.url, empty.url);
    assert_eq!(usa.alt, empty.alt);
}

#[test]
fn unsupported_display_size_is_invalid_argument() {
    assert!(matches!(
        resolve_width_px(30),
        Err(FlagError::InvalidArgument(_))
    ));
}

#[test]
fn widget_output_for_unknown_code_is_still_renderable() {
    let flag = flag_image(&FlagResolver::default(), "??", DisplaySize::Px64, true);
    let html = flag.to_html();
    assert!(html.contains("xx.png"));
    assert!(html.contains(r#"alt="Unknown country flag""#));
    assert!(html.contains(r#"width="64" height="48""#));
}

fn display_size() -> impl Strategy<Value = DisplaySize> {
    prop::sample::select(DisplaySize::ALL.to_vec())
}

fn provider_width() -> impl Strategy<Value = ProviderWidth> {
    prop::sample::select(ProviderWidth::ALL.to_vec())
}

proptest! {
    #[test]
    fn width_mapping_is_closed_and_deterministic(size in display_size()) {
        let width = resolve_width(size);
        prop_assert!(ProviderWidth::ALL.contains(&width));
        prop_assert_eq!(width, resolve_width(size));
        prop_assert_eq!(resolve_width_px(size.px()).unwrap(), width);
    }

    #[test]
    fn casing_does_not_change_the_url(
        code in "[a-zA-Z]{2}",
        width in provider_width(),
    ) {
        let resolver = FlagResolver::default();
        let original = resolver.resolve(&code, width);
        prop_assert_eq!(&original, &resolver.resolve(&code.to_uppercase(), width));
        prop_assert_eq!(&original, &resolver.resolve(&code.to_lowercase(), width));
    }

    #[test]
    fn any_input_resolves_to_a_well_formed_reference(
        code in ".*",
        width in provider_width(),
    ) {
        let image = FlagResolver::default().resolve(&code, width);
        prop_assert!(image.url.starts_with("https://flagcdn.com/w"));
        prop_assert!(image.url.ends_with(".png"));
        prop_assert!(!image.alt.is_empty());
        prop_assert_eq!(image.code.len(), 2);
        prop_assert!(image.code.bytes().all(|b| b.is_ascii_lowercase()));
    }

    #[test]
    fn malformed_codes_use_the_placeholder(
        code in prop_oneof![
            Just(String::new()),
            "[a-zA-Z]",
            "[0-9]{1,4}",
            "[a-zA-Z]{3,8}",
        ],
    ) {
        let image = FlagResolver::default().resolve(&code, ProviderWidth::W20);
        prop_assert_eq!(image.code.as_str(), PLACEHOLDER_CODE);
        prop_assert!(image.is_placeholder());
    }

    #[test]
    fn high_density_width_is_double(width in provider_width(), code in "[a-z]{2}") {
        let image = FlagResolver::default().resolve(&code, width);
        prop_assert_eq!(
            width_param(&image.high_density_url),
            width_param(&image.url) * 2
        );
    }
}
