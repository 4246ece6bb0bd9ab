use std::{
    fmt::Write as _,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    animation::effect::StyleState,
    foundation::{
        error::{LayerframeError, LayerframeResult},
        math::unpremultiply_rgba8_in_place,
    },
    render::rasterizer::{Raster, RasterJob, Rasterizer},
};

/// Options for [`SvgRasterizer`].
#[derive(Clone, Debug)]
pub struct SvgRasterizerOpts {
    /// Directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Also load fonts installed on the host.
    pub load_system_fonts: bool,
}

impl Default for SvgRasterizerOpts {
    fn default() -> Self {
        Self {
            font_dirs: Vec::new(),
            load_system_fonts: true,
        }
    }
}

/// CPU rasterizer for SVG markup, backed by `usvg`/`resvg`.
///
/// Every job is wrapped in a canvas-sized `<svg>` root. A job style becomes a `<g>` with the
/// clamped opacity and the transform as a matrix, scaled about the canvas centre. Fragments
/// may be bare SVG elements or complete `<svg>` documents. Non-SVG elements such as HTML are
/// parsed but draw nothing.
pub struct SvgRasterizer {
    opts: SvgRasterizerOpts,
    fontdb: Option<Arc<usvg::fontdb::Database>>,
}

impl SvgRasterizer {
    pub fn new(opts: SvgRasterizerOpts) -> Self {
        Self { opts, fontdb: None }
    }

    pub fn opts(&self) -> &SvgRasterizerOpts {
        &self.opts
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new(SvgRasterizerOpts::default())
    }
}

impl Rasterizer for SvgRasterizer {
    fn initialize(&mut self) -> LayerframeResult<()> {
        if self.fontdb.is_none() {
            let db = build_fontdb(&self.opts);
            tracing::debug!(faces = db.len(), "svg rasterizer font database loaded");
            self.fontdb = Some(Arc::new(db));
        }
        Ok(())
    }

    fn rasterize(&mut self, job: &RasterJob<'_>) -> LayerframeResult<Raster> {
        let fontdb = self
            .fontdb
            .clone()
            .ok_or_else(|| LayerframeError::validation("svg rasterizer is not initialized"))?;

        let mut opts = usvg::Options {
            fontdb,
            ..Default::default()
        };
        if let Some(family) = job.fonts.first() {
            opts.font_family = family.clone();
        }

        let doc = wrap_document(job);
        let tree = usvg::Tree::from_str(&doc, &opts).context("parse svg markup")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(job.canvas.width, job.canvas.height)
            .ok_or_else(|| LayerframeError::Other(anyhow::anyhow!("failed to allocate pixmap")))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let mut data = pixmap.take();
        unpremultiply_rgba8_in_place(&mut data);
        Raster::from_rgba8(job.canvas.width, job.canvas.height, data)
    }

    fn shutdown(&mut self) {
        self.fontdb = None;
    }

    fn fork(&self) -> Option<Self> {
        Some(Self {
            opts: self.opts.clone(),
            fontdb: self.fontdb.clone(),
        })
    }
}

fn build_fontdb(opts: &SvgRasterizerOpts) -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    if opts.load_system_fonts {
        db.load_system_fonts();
    }
    for dir in &opts.font_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    db
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(err) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), %err, "failed to load font");
        }
    }
}

/// Drop a leading XML declaration so the fragment can be nested.
fn strip_prolog(markup: &str) -> &str {
    let s = markup.trim_start();
    if s.starts_with("<?xml")
        && let Some(end) = s.find("?>")
    {
        return s[end + 2..].trim_start();
    }
    s
}

fn wrap_document(job: &RasterJob<'_>) -> String {
    let (w, h) = (job.canvas.width, job.canvas.height);
    let body = strip_prolog(job.markup);

    let mut out = String::with_capacity(body.len() + 256);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    match job.style {
        Some(style) => {
            out.push_str(&style_group_open(&style, job));
            out.push_str(body);
            out.push_str("</g>");
        }
        None => out.push_str(body),
    }
    out.push_str("</svg>");
    out
}

fn style_group_open(style: &StyleState, job: &RasterJob<'_>) -> String {
    let [a, b, c, d, e, f] = style
        .transform
        .to_affine(job.canvas.center())
        .as_coeffs();
    format!(
        r#"<g opacity="{}" transform="matrix({a} {b} {c} {d} {e} {f})">"#,
        style.clamped_opacity()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
