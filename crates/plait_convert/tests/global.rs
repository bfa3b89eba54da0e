//! Conversions through the global registry.

use plait_convert::registry::Parser;
use plait_convert::{Convertible, DecodeError, EncodeError, FieldSet, Plain, global, global_mut};
use serde_json::json;

#[derive(Convertible, Debug, PartialEq)]
#[convertible(auto_register)]
struct Point {
    x: i64,
    y: i64,
}

#[derive(Convertible, Debug, Default, PartialEq)]
#[convertible(default, auto_register)]
struct Sheldon {
    a: Option<String>,
    #[convertible(parsed)]
    member: Option<Point>,
    #[convertible(supplied)]
    supplied: FieldSet,
}

fn setup() {
    global_mut(|registry| {
        registry.register::<Point>();
        registry.register::<Sheldon>();
        registry
            .register_parser::<Sheldon>(
                "member",
                Parser::new(|raw| {
                    global()
                        .decoder()
                        .decode_value::<Point>(raw, Vec::new())
                        .map(Some)
                }),
            )
            .unwrap();
    });
}

#[cfg(feature = "auto_register")]
#[test]
fn auto_registered_types_are_global() {
    assert!(global().contains::<Point>());
    assert!(plait_convert::Registry::new().contains::<Sheldon>());
    assert!(!plait_convert::Registry::empty().contains::<Point>());
}

#[test]
fn point_round_trip() {
    setup();
    let json = Point { x: 1, y: 2 }.to_json().unwrap();
    assert_eq!(json, r#"{"x":1,"y":2}"#);
    assert_eq!(Point::from_json(&json).unwrap(), Point { x: 1, y: 2 });
}

#[test]
fn positional_arguments() {
    setup();
    let point = Point::from_json_with(r#"{"y":2}"#, vec![json!(1)]).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });

    let point = Point::from_plain_with(Default::default(), vec![json!(3), json!(4)]).unwrap();
    assert_eq!(point, Point { x: 3, y: 4 });
}

#[test]
fn member_parser_round_trip() {
    setup();
    let sheldon = Sheldon {
        a: Some("x".into()),
        member: Some(Point { x: 1, y: 2 }),
        supplied: ["a", "member"].into_iter().collect(),
    };

    let json = sheldon.to_json().unwrap();
    assert_eq!(json, r#"{"a":"x","member":{"x":1,"y":2}}"#);
    assert_eq!(Sheldon::from_json(&json).unwrap(), sheldon);
}

#[test]
fn excluding_fields() {
    setup();
    let plain = Point { x: 1, y: 2 }.to_plain_excluding(&["x"]).unwrap();
    assert_eq!(plain, json!({ "y": 2 }));

    let json = Point { x: 1, y: 2 }.to_json_excluding(&["y"]).unwrap();
    assert_eq!(json, r#"{"x":1}"#);
}

#[test]
fn decode_errors() {
    setup();
    assert!(matches!(
        Point::from_json("[1, 2]"),
        Err(DecodeError::NotAMapping { found: "sequence" })
    ));
    assert!(matches!(Point::from_json("{"), Err(DecodeError::Codec(_))));
    assert!(matches!(
        Sheldon::from_json(r#"{"member": 5}"#),
        Err(DecodeError::Parser { .. })
    ));
}

#[test]
fn plain_values_round_trip() {
    setup();
    let plain: Plain = Point { x: -1, y: 0 }.to_plain().unwrap();
    let Plain::Object(map) = plain else {
        panic!("expected a mapping");
    };
    assert_eq!(Point::from_plain(map).unwrap(), Point { x: -1, y: 0 });
}

#[test]
fn unregistered_types_fail() {
    #[derive(Convertible)]
    struct Stray {
        value: u8,
    }

    let err = Stray { value: 1 }.to_plain().unwrap_err();
    assert!(matches!(err, EncodeError::Unsupported { .. }));
    assert!(matches!(
        Stray::from_json(r#"{"value":1}"#),
        Err(DecodeError::NotRegistered { .. })
    ));
}

#[cfg(feature = "ron")]
#[test]
fn ron_text() {
    use plait_convert::codec::Ron;

    setup();
    let registry = global();
    let text = registry
        .encoder()
        .encode_text(&Point { x: 5, y: 6 }, &[], &Ron::compact())
        .unwrap();
    let point: Point = registry.decoder().decode_text(&Ron::compact(), &text, Vec::new()).unwrap();
    assert_eq!(point, Point { x: 5, y: 6 });
}
