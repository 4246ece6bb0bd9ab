use super::*;

fn line(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(i as f64 * 10.0, 5.0)).collect()
}

#[test]
fn reveal_count_is_never_zero() {
    assert_eq!(reveal_count(0.0, 60), 1);
    assert_eq!(reveal_count(-1.0, 60), 1);
    assert_eq!(reveal_count(f64::NAN, 60), 1);
    assert_eq!(reveal_count(0.001, 60), 1);
}

#[test]
fn reveal_count_reaches_all_points() {
    assert_eq!(reveal_count(1.0, 60), 60);
    assert_eq!(reveal_count(1.5, 60), 60);
    assert_eq!(reveal_count(0.5, 60), 30);
    assert_eq!(reveal_count(0.99, 60), 59);
    assert_eq!(reveal_count(0.5, 0), 0);
}

#[test]
fn mask_keeps_prefix_of_points() {
    let pts = line(10);
    let m = RevealMask::new(&pts, 0.35, Canvas::new(100, 10).unwrap(), 30.0);
    assert_eq!(m.markers.len(), 3);
    for (marker, p) in m.markers.iter().zip(&pts) {
        assert_eq!(marker.center, *p);
        assert_eq!(marker.radius, 30.0);
        assert_eq!(marker.blur, 15.0);
    }
}

#[test]
fn markup_is_black_backdrop_with_white_discs() {
    let pts = line(4);
    let m = RevealMask::new(&pts, 1.0, Canvas::new(100, 10).unwrap(), 30.0);
    let svg = m.to_markup();
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"width="100" height="10""#));
    assert!(svg.contains(r#"fill="black""#));
    assert!(svg.contains(r#"stdDeviation="15""#));
    assert_eq!(svg.matches("<circle").count(), 4);
    assert!(svg.contains(r#"<circle cx="30" cy="5" r="30" fill="white" filter="url(#reveal-soft)"/>"#));
}

#[test]
fn empty_points_produce_plain_backdrop() {
    let m = RevealMask::new(&[], 0.5, Canvas::new(8, 8).unwrap(), 30.0);
    assert!(m.markers.is_empty());
    assert_eq!(m.to_markup().matches("<circle").count(), 0);
}
