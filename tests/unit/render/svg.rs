use super::*;
use crate::{
    animation::effect::SpatialTransform,
    foundation::core::{Canvas, PixelRect},
};

fn rasterizer() -> SvgRasterizer {
    let mut r = SvgRasterizer::new(SvgRasterizerOpts {
        font_dirs: Vec::new(),
        load_system_fonts: false,
    });
    r.initialize().unwrap();
    r
}

fn job(markup: &str, style: Option<StyleState>) -> RasterJob<'_> {
    RasterJob {
        markup,
        canvas: Canvas::new(40, 20).unwrap(),
        fonts: &[],
        style,
    }
}

fn pixel(r: &Raster, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * r.width + x) * 4) as usize;
    [r.data[i], r.data[i + 1], r.data[i + 2], r.data[i + 3]]
}

const SQUARE: &str = r##"<rect x="10" y="5" width="4" height="4" fill="#ff0000"/>"##;

#[test]
fn rasterize_requires_initialize() {
    let mut r = SvgRasterizer::new(SvgRasterizerOpts {
        font_dirs: Vec::new(),
        load_system_fonts: false,
    });
    assert!(r.rasterize(&job(SQUARE, None)).is_err());
}

#[test]
fn fragment_renders_at_authored_position() {
    let mut r = rasterizer();
    let out = r.rasterize(&job(SQUARE, None)).unwrap();
    assert_eq!((out.width, out.height), (40, 20));
    assert_eq!(
        out.content_bounds,
        Some(PixelRect {
            x: 10,
            y: 5,
            width: 4,
            height: 4
        })
    );
    assert_eq!(pixel(&out, 11, 6), [255, 0, 0, 255]);
    assert_eq!(pixel(&out, 0, 0)[3], 0);
}

#[test]
fn standalone_document_with_prolog_is_nested() {
    let mut r = rasterizer();
    let doc = r#"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"><rect x="0" y="0" width="2" height="2" fill="white"/></svg>"#;
    let out = r.rasterize(&job(doc, None)).unwrap();
    assert_eq!(pixel(&out, 1, 1), [255, 255, 255, 255]);
}

#[test]
fn style_opacity_is_straight_alpha() {
    let mut r = rasterizer();
    let style = StyleState::new(0.5, SpatialTransform::None);
    let out = r.rasterize(&job(SQUARE, Some(style))).unwrap();
    let px = pixel(&out, 11, 6);
    assert_eq!(px[0], 255);
    assert!((126..=129).contains(&px[3]), "alpha {}", px[3]);
}

#[test]
fn style_translate_moves_content() {
    let mut r = rasterizer();
    let style = StyleState::new(1.0, SpatialTransform::TranslateY(10.0));
    let out = r.rasterize(&job(SQUARE, Some(style))).unwrap();
    assert_eq!(out.content_bounds.map(|b| (b.x, b.y)), Some((10, 15)));
}

#[test]
fn hidden_style_draws_nothing() {
    let mut r = rasterizer();
    let out = r
        .rasterize(&job(SQUARE, Some(StyleState::hidden())))
        .unwrap();
    assert_eq!(out.content_bounds, None);
}

#[test]
fn html_markup_renders_blank() {
    let mut r = rasterizer();
    let out = r.rasterize(&job("<div><p>hello</p></div>", None)).unwrap();
    assert_eq!(out.content_bounds, None);
}

#[test]
fn malformed_markup_is_an_error() {
    let mut r = rasterizer();
    assert!(r.rasterize(&job("<rect", None)).is_err());
}

#[test]
fn fork_shares_fonts_and_renders_independently() {
    let r = rasterizer();
    let mut f = r.fork().unwrap();
    f.initialize().unwrap();
    assert!(f.rasterize(&job(SQUARE, None)).is_ok());
}

#[test]
fn prolog_is_stripped() {
    assert_eq!(strip_prolog("  <?xml version=\"1.0\"?>\n<svg/>"), "<svg/>");
    assert_eq!(strip_prolog("<rect/>"), "<rect/>");
}
