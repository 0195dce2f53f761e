use physio_bodymap::transform::{to_logical, PointerEvent, ScreenTransform};
use physio_core::models::geometry::Point;

#[test]
fn maps_client_position_through_the_inverse_transform() {
    // 200x400 logical canvas drawn at 2x, offset (50, 20) in the viewport.
    let surface = ScreenTransform::scaled(2.0, 50.0, 20.0);
    let point = to_logical(Some(&surface), &PointerEvent::mouse(250.0, 420.0)).unwrap();
    assert_eq!(point, Point::new(100.0, 200.0));
}

#[test]
fn viewport_round_trip_is_stable_for_any_scale() {
    let surface = ScreenTransform {
        a: 0.75,
        d: 1.25,
        e: -12.0,
        f: 7.5,
    };
    let logical = Point::new(33.0, 310.0);
    let back = surface.to_logical(surface.to_viewport(logical)).unwrap();
    assert!((back.x - logical.x).abs() < 1e-9);
    assert!((back.y - logical.y).abs() < 1e-9);
}

#[test]
fn missing_transform_drops_the_event() {
    assert_eq!(to_logical(None, &PointerEvent::mouse(1.0, 1.0)), None);
}

#[test]
fn degenerate_transform_drops_the_event() {
    let flat = ScreenTransform::scaled(0.0, 0.0, 0.0);
    assert_eq!(to_logical(Some(&flat), &PointerEvent::mouse(1.0, 1.0)), None);

    let nan = ScreenTransform {
        a: f64::NAN,
        ..ScreenTransform::identity()
    };
    assert_eq!(to_logical(Some(&nan), &PointerEvent::mouse(1.0, 1.0)), None);
}

#[test]
fn touch_events_use_the_first_touch() {
    let event = PointerEvent::Touch {
        touches: vec![Point::new(10.0, 20.0), Point::new(99.0, 99.0)],
    };
    let point = to_logical(Some(&ScreenTransform::identity()), &event).unwrap();
    assert_eq!(point, Point::new(10.0, 20.0));

    let empty = PointerEvent::Touch { touches: vec![] };
    assert_eq!(to_logical(Some(&ScreenTransform::identity()), &empty), None);
}

#[test]
fn pointer_events_deserialize_from_tagged_json() {
    let event: PointerEvent =
        serde_json::from_str(r#"{"kind":"mouse","client_x":4.0,"client_y":5.0}"#).unwrap();
    assert_eq!(event, PointerEvent::mouse(4.0, 5.0));
}
