use super::*;

#[test]
fn short_forms_keep_nibble_values() {
    assert_eq!(parse_colour("#F00").unwrap(), Colour::rgba(15, 0, 0, 255));
    assert_eq!(parse_colour("#abc").unwrap(), Colour::rgba(10, 11, 12, 255));
    assert_eq!(parse_colour("#1234").unwrap(), Colour::rgba(1, 2, 3, 4));
}

#[test]
fn long_forms_use_two_digits_per_channel() {
    assert_eq!(
        parse_colour("#FF0000").unwrap(),
        Colour::rgba(255, 0, 0, 255)
    );
    assert_eq!(
        parse_colour("#0a141e80").unwrap(),
        Colour::rgba(10, 20, 30, 128)
    );
}

#[test]
fn colour_rejects_other_shapes() {
    for bad in [
        "", "#", "FF0000", "#FF", "#FFFFF", "#FFFFFFF", "#FFFFFFFFF", "#GG0000", "#+F0000",
        "#ÿÿÿ", " #FFF",
    ] {
        let err = parse_colour(bad).unwrap_err();
        assert!(
            matches!(err, OverlayError::InvalidFormat(_)),
            "{bad:?} gave {err}"
        );
    }
}

#[test]
fn six_digit_colour_roundtrips_through_display() {
    for s in ["#000000", "#FFFFFF", "#12AB9F", "#7F0080"] {
        assert_eq!(parse_colour(s).unwrap().to_string(), s);
    }
    // alpha is dropped by the textual form
    assert_eq!(parse_colour("#10203040").unwrap().to_string(), "#102030");
}

#[test]
fn point_parses_signed_pairs() {
    assert_eq!(parse_point("10,20").unwrap(), Point::new(10, 20));
    assert_eq!(parse_point("-5,0").unwrap(), Point::new(-5, 0));
    assert_eq!(
        parse_point("2147483647,-2147483648").unwrap(),
        Point::new(i32::MAX, i32::MIN)
    );
}

#[test]
fn point_rejects_other_shapes() {
    for bad in [
        "", "1", "1,2,3", "1;2", "a,2", "1,b", " 1,2", "1, 2", "2147483648,0", "1.5,2",
    ] {
        let err = parse_point(bad).unwrap_err();
        assert!(
            matches!(err, OverlayError::InvalidFormat(_)),
            "{bad:?} gave {err}"
        );
    }
}

#[test]
fn point_roundtrips_through_display() {
    for p in [
        Point::ORIGIN,
        Point::new(-1, 1),
        Point::new(i32::MAX, i32::MIN),
        Point::new(640, -480),
    ] {
        assert_eq!(parse_point(&p.to_string()).unwrap(), p);
    }
}

#[test]
fn size_rejects_negative_components() {
    assert_eq!(parse_size("600,400").unwrap(), Size::new(600, 400));
    assert_eq!(parse_size("0,0").unwrap(), Size::new(0, 0));
    assert!(matches!(
        parse_size("-1,4"),
        Err(OverlayError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_size("4,-1"),
        Err(OverlayError::InvalidFormat(_))
    ));
}

#[test]
fn from_str_delegates_to_parsers() {
    let c: Colour = "#00FF00".parse().unwrap();
    assert_eq!(c, Colour::rgba(0, 255, 0, 255));
    let p: Point = "3,4".parse().unwrap();
    assert_eq!(p, Point::new(3, 4));
    assert!("nope".parse::<Size>().is_err());
}

#[test]
fn serde_uses_textual_forms() {
    let json = serde_json::to_string(&Point::new(-3, 9)).unwrap();
    assert_eq!(json, "\"-3,9\"");
    let p: Point = serde_json::from_str(&json).unwrap();
    assert_eq!(p, Point::new(-3, 9));

    let c: Colour = serde_json::from_str("\"#F00\"").unwrap();
    assert_eq!(c, Colour::rgba(15, 0, 0, 255));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#0F0000\"");

    assert!(serde_json::from_str::<Size>("\"1\"").is_err());
}
