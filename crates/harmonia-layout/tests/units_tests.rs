//! Integration tests for length parsing, shorthands and configuration.

use harmonia_layout::layout::AnchorBand;
use harmonia_layout::{BoxSides, ColorValue, EngineConfig, LengthPair, ParseError, Unit};

#[test]
fn test_parse_each_unit() {
    assert_eq!("12px".parse(), Ok(LengthPair::px(12.0)));
    assert_eq!("12".parse(), Ok(LengthPair::px(12.0)));
    assert_eq!("50%".parse(), Ok(LengthPair::percent(0.5)));
    assert_eq!("50vw".parse(), Ok(LengthPair::vw(0.5)));
    assert_eq!("25VH".parse(), Ok(LengthPair::vh(0.25)));
    assert_eq!("unset".parse(), Ok(LengthPair::UNSET));
}

#[test]
fn test_parse_errors() {
    assert_eq!(LengthPair::parse(""), Err(ParseError::Empty));
    assert_eq!(
        LengthPair::parse("abc"),
        Err(ParseError::InvalidNumber("abc".to_string()))
    );
    assert_eq!(
        LengthPair::parse("3em"),
        Err(ParseError::UnknownUnit {
            input: "3em".to_string(),
            suffix: "em".to_string(),
        })
    );
    assert!(LengthPair::parse("-").is_err());
    assert!(LengthPair::parse("1.2.3px").is_err());
}

#[test]
fn test_string_form_uses_written_numbers() {
    assert_eq!(LengthPair::percent(0.25).to_string(), "25%");
    assert_eq!(LengthPair::vh(1.0).to_string(), "100vh");
    assert_eq!(LengthPair::px(-3.5).to_string(), "-3.5px");
    assert_eq!(LengthPair::percent(0.25).written_value(), 25.0);
    assert_eq!(Unit::ViewportWidth.suffix(), "vw");
}

#[test]
fn test_shorthand_expansion() {
    let one = BoxSides::parse_shorthand("10px").unwrap();
    assert_eq!(one, BoxSides::uniform(LengthPair::px(10.0)));

    let two = BoxSides::parse_shorthand("10px 20%").unwrap();
    assert_eq!(two.up, LengthPair::px(10.0));
    assert_eq!(two.down, LengthPair::px(10.0));
    assert_eq!(two.left, LengthPair::percent(0.2));
    assert_eq!(two.right, LengthPair::percent(0.2));

    let four = BoxSides::parse_shorthand(" 1px  2px 3px 4px ").unwrap();
    assert_eq!(
        (four.up, four.right, four.down, four.left),
        (
            LengthPair::px(1.0),
            LengthPair::px(2.0),
            LengthPair::px(3.0),
            LengthPair::px(4.0)
        )
    );
}

#[test]
fn test_shorthand_errors() {
    assert_eq!(BoxSides::parse_shorthand(""), Err(ParseError::ShorthandArity(0)));
    assert_eq!(
        BoxSides::parse_shorthand("1 2 3 4 5"),
        Err(ParseError::ShorthandArity(5))
    );
    assert!(BoxSides::parse_shorthand("1px 2zz").is_err());
}

#[test]
fn test_serde_uses_the_string_form() {
    let pair: LengthPair = serde_json::from_str("\"50%\"").unwrap();
    assert_eq!(pair, LengthPair::percent(0.5));
    assert_eq!(serde_json::to_string(&pair).unwrap(), "\"50%\"");
    assert!(serde_json::from_str::<LengthPair>("\"50furlongs\"").is_err());

    let color: ColorValue = serde_json::from_str("\"#336699\"").unwrap();
    assert_eq!(color, ColorValue::rgba(0x33, 0x66, 0x99, 255));
}

#[test]
fn test_config_defaults_and_overrides() {
    let config = EngineConfig::default();
    assert_eq!(config.update_interval_secs, 1.0);
    assert_eq!((config.viewport_width, config.viewport_height), (1152.0, 648.0));
    assert_eq!(config.anchor_band, AnchorBand::ContentHeight);
    assert!(config.relayout_on_change);

    let parsed: EngineConfig = serde_json::from_str(
        r#"{ "anchor_band": "legacy_width", "max_relayout_passes": 2, "debug_outputs": true }"#,
    )
    .unwrap();
    assert_eq!(parsed.anchor_band, AnchorBand::LegacyWidth);
    assert_eq!(parsed.max_relayout_passes, 2);
    assert!(parsed.debug_outputs);
    assert_eq!(parsed.update_interval_secs, 1.0);
}
