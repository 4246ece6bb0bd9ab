use super::*;

fn scale_of(state: StyleState) -> f64 {
    match state.transform {
        SpatialTransform::Scale(s) => s,
        other => panic!("expected scale, got {other:?}"),
    }
}

fn translate_of(state: StyleState) -> Vec2 {
    match state.transform {
        SpatialTransform::TranslateX(x) => Vec2::new(x, 0.0),
        SpatialTransform::TranslateY(y) => Vec2::new(0.0, y),
        other => panic!("expected translate, got {other:?}"),
    }
}

#[test]
fn fade_in_has_no_spatial_transform() {
    for i in 0..=10 {
        let p = f64::from(i) / 10.0;
        let s = Effect::FadeIn.style_at(p);
        assert_eq!(s.opacity, p);
        assert_eq!(s.transform, SpatialTransform::None);
    }
    assert_eq!(Effect::FadeIn.style_at(0.0).opacity, 0.0);
    assert_eq!(Effect::FadeIn.style_at(1.0).opacity, 1.0);
}

#[test]
fn fade_out_inverts_opacity() {
    assert_eq!(Effect::FadeOut.style_at(0.0).opacity, 1.0);
    assert_eq!(Effect::FadeOut.style_at(1.0).opacity, 0.0);
}

#[test]
fn scale_effects_follow_table() {
    assert!((scale_of(Effect::ScaleUp.style_at(0.0)) - 0.3).abs() < 1e-12);
    assert!((scale_of(Effect::ScaleUp.style_at(1.0)) - 1.0).abs() < 1e-12);
    assert!((scale_of(Effect::ScaleDown.style_at(0.0)) - 1.5).abs() < 1e-12);
    assert!((scale_of(Effect::ScaleDown.style_at(1.0)) - 1.0).abs() < 1e-12);

    let out = Effect::ScaleOut.style_at(1.0);
    assert!((scale_of(out) - 1.5).abs() < 1e-12);
    assert_eq!(out.opacity, 0.0);
}

#[test]
fn slides_start_offset_and_settle_at_origin() {
    assert_eq!(translate_of(Effect::SlideUp.style_at(0.0)), Vec2::new(0.0, 120.0));
    assert_eq!(translate_of(Effect::SlideDown.style_at(0.0)), Vec2::new(0.0, -120.0));
    assert_eq!(translate_of(Effect::SlideLeft.style_at(0.0)), Vec2::new(120.0, 0.0));
    assert_eq!(translate_of(Effect::SlideRight.style_at(0.0)), Vec2::new(-120.0, 0.0));

    for effect in [
        Effect::SlideUp,
        Effect::SlideDown,
        Effect::SlideLeft,
        Effect::SlideRight,
    ] {
        let end = effect.style_at(1.0);
        assert_eq!(end.opacity, 1.0);
        assert_eq!(translate_of(end).hypot(), 0.0);
    }
}

#[test]
fn bounce_in_pieces() {
    assert_eq!(Effect::BounceIn.style_at(0.5).opacity, 1.0);
    assert_eq!(Effect::BounceIn.style_at(0.25).opacity, 0.5);
    assert!((scale_of(Effect::BounceIn.style_at(0.6)) - 1.15).abs() < 1e-12);
    assert!((scale_of(Effect::BounceIn.style_at(0.8)) - 0.95).abs() < 1e-12);
    assert!((scale_of(Effect::BounceIn.style_at(1.0)) - 1.0).abs() < 1e-12);
    assert_eq!(scale_of(Effect::BounceIn.style_at(0.0)), 0.0);
}

#[test]
fn unknown_names_fall_back_to_fade_in() {
    assert_eq!(Effect::from_name("spin_3d"), None);
    assert_eq!(Effect::from_name_or_default("spin_3d"), Effect::FadeIn);
    assert_eq!(Effect::from_name("slide-up"), Some(Effect::SlideUp));

    let e: Effect = serde_json::from_str("\"zoom_blur\"").unwrap();
    assert_eq!(e, Effect::FadeIn);
}

#[test]
fn scale_affine_keeps_origin_fixed() {
    let origin = Point::new(360.0, 640.0);
    let a = SpatialTransform::Scale(2.0).to_affine(origin);
    assert_eq!(a * origin, origin);
    assert_eq!(a * Point::new(370.0, 640.0), Point::new(380.0, 640.0));
    assert_eq!(
        SpatialTransform::TranslateX(5.0).to_affine(origin) * Point::ZERO,
        Point::new(5.0, 0.0)
    );
    assert_eq!(
        SpatialTransform::TranslateY(-3.0).to_affine(origin) * Point::ZERO,
        Point::new(0.0, -3.0)
    );
}

#[test]
fn css_projection_matches_browser_form() {
    assert_eq!(Effect::FadeIn.style_at(0.5).to_css(), "opacity:0.500;");
    assert_eq!(
        Effect::ScaleUp.style_at(1.0).to_css(),
        "transform:scale(1.000);opacity:1.000;transform-origin:center center;"
    );
    assert_eq!(
        Effect::SlideUp.style_at(0.5).to_css(),
        "transform:translateY(60.0px);opacity:0.500;"
    );
    assert_eq!(
        Effect::SlideLeft.style_at(0.5).to_css(),
        "transform:translateX(60.0px);opacity:0.500;"
    );
    assert_eq!(StyleState::hidden().to_css(), "opacity:0.000;");
}

#[test]
fn settled_slides_keep_their_axis_in_css() {
    assert_eq!(
        Effect::SlideLeft.style_at(1.0).to_css(),
        "transform:translateX(0.0px);opacity:1.000;"
    );
    assert_eq!(
        Effect::SlideRight.style_at(1.0).to_css(),
        "transform:translateX(0.0px);opacity:1.000;"
    );
    assert_eq!(
        Effect::SlideDown.style_at(1.0).to_css(),
        "transform:translateY(0.0px);opacity:1.000;"
    );
    assert_eq!(
        Effect::SlideLeft.style_at(1.0).transform,
        SpatialTransform::TranslateX(0.0)
    );
}

#[test]
fn clamped_opacity_limits_overshoot() {
    let s = StyleState::new(1.08, SpatialTransform::None);
    assert_eq!(s.clamped_opacity(), 1.0);
    let s = StyleState::new(-0.2, SpatialTransform::None);
    assert_eq!(s.clamped_opacity(), 0.0);
}
