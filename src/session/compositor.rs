use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use rayon::prelude::*;

use crate::{
    animation::timeline::{AnimationSpec, Timeline},
    encode::{
        png::encode_png,
        sink::{AssetName, AssetSink, RasterRef},
    },
    foundation::{
        core::{Canvas, Fps},
        error::{LayerframeError, LayerframeResult},
    },
    render::{
        rasterizer::{Raster, Rasterizer},
        surface::Surface,
    },
    scene::{
        model::{STROKE_REVEAL_TYPE, SceneDef},
        normalize::{
            DEFAULT_MAX_LAYERS, Layer, LayerKind, Scene, SceneWarning, WarningKind,
            normalize_scene,
        },
        result::{AnimationSequence, LayerRender, SceneRenderResult, StrokeRevealRender},
    },
    stroke::{
        DEFAULT_MASK_POINTS, RevealSchedule, RevealSpec, StrokeStyle,
        mask::{DEFAULT_MARKER_RADIUS, RevealMask},
        sampler::sample_path,
        stroke_markup,
    },
};

/// Options controlling [`SceneCompositor`] rendering.
#[derive(Clone, Debug)]
pub struct CompositorOpts {
    /// Canvas (viewport) size of every render.
    pub canvas: Canvas,
    /// Frame rate of animation sequences and stroke masks.
    pub fps: Fps,
    /// Web font family names made available to layer markup.
    pub fonts: Vec<String>,
    /// Render frame sequences for animated, non-static layers. Off renders baselines only.
    pub render_animations: bool,
    /// Crop static renders to their content instead of returning the full canvas.
    pub crop_static_layers: bool,
    /// Points sampled along each stroke path.
    pub mask_points: usize,
    /// Radius of each reveal mask marker, in pixels.
    pub mask_radius: f64,
    /// Soft cap on layers per scene; extra layers are dropped with a warning.
    pub max_layers: usize,
    /// Render layers concurrently, one forked surface per worker.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

impl Default for CompositorOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            fonts: Vec::new(),
            render_animations: false,
            crop_static_layers: false,
            mask_points: DEFAULT_MASK_POINTS,
            mask_radius: DEFAULT_MARKER_RADIUS,
            max_layers: DEFAULT_MAX_LAYERS,
            parallel: false,
            threads: None,
        }
    }
}

impl CompositorOpts {
    /// Check option ranges.
    pub fn validate(&self) -> LayerframeResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        Fps::new(self.fps.num, self.fps.den)?;
        if self.mask_points == 0 {
            return Err(LayerframeError::validation("mask_points must be >= 1"));
        }
        if !self.mask_radius.is_finite() || self.mask_radius < 0.0 {
            return Err(LayerframeError::validation(
                "mask_radius must be finite and >= 0",
            ));
        }
        if self.max_layers == 0 {
            return Err(LayerframeError::validation("max_layers must be >= 1"));
        }
        if self.threads == Some(0) {
            return Err(LayerframeError::validation(
                "threads must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Shared flag for cancelling an in-flight scene render.
///
/// Checked before every layer and every frame. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> LayerframeResult<()> {
        if self.is_cancelled() {
            return Err(LayerframeError::Cancelled);
        }
        Ok(())
    }
}

/// Result of a render that may have stopped early.
///
/// `result` holds every layer that completed. `error` is the failure or cancellation that
/// stopped the render, if any.
#[derive(Debug)]
pub struct PartialRender {
    pub result: SceneRenderResult,
    pub error: Option<LayerframeError>,
}

impl PartialRender {
    /// Discard partial output and return the error, if there was one.
    pub fn into_result(self) -> LayerframeResult<SceneRenderResult> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.result),
        }
    }
}

/// Renders scenes layer by layer through one owned rasterizer surface.
///
/// Construct one compositor per logical worker. The surface is initialized on first use and
/// shut down by [`SceneCompositor::shutdown`] or on drop.
pub struct SceneCompositor<R: Rasterizer> {
    surface: Surface<R>,
    opts: CompositorOpts,
    cancel: CancelToken,
}

impl<R: Rasterizer> SceneCompositor<R> {
    pub fn new(rasterizer: R, opts: CompositorOpts) -> LayerframeResult<Self> {
        opts.validate()?;
        Ok(Self {
            surface: Surface::new(rasterizer),
            opts,
            cancel: CancelToken::new(),
        })
    }

    /// Replace the cancellation token, e.g. with one shared across compositors.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn opts(&self) -> &CompositorOpts {
        &self.opts
    }

    pub fn surface(&self) -> &Surface<R> {
        &self.surface
    }

    /// Shut the surface down. The next render re-initializes it.
    pub fn shutdown(&mut self) {
        self.surface.shutdown();
    }

    /// Render `def`, failing on the first rasterizer error or cancellation.
    ///
    /// `scene_index` is the scene's position in its storyboard and feeds generated layer ids.
    pub fn render<S: AssetSink + ?Sized>(
        &mut self,
        def: &SceneDef,
        scene_index: usize,
        sink: &mut S,
    ) -> LayerframeResult<SceneRenderResult> {
        self.render_partial(def, scene_index, sink).into_result()
    }

    /// Render `def`, keeping every completed layer when the render stops early.
    ///
    /// Sequential renders stop at the first failing layer. Parallel renders keep every layer
    /// that completed and report the first failure in declared order. A layer that fails
    /// part-way is left out entirely, although rasters it already stored stay in the sink.
    #[tracing::instrument(skip(self, def, sink), fields(scene = %def.scene_id))]
    pub fn render_partial<S: AssetSink + ?Sized>(
        &mut self,
        def: &SceneDef,
        scene_index: usize,
        sink: &mut S,
    ) -> PartialRender {
        let (scene, warnings) = normalize_scene(def, scene_index, self.opts.max_layers);
        let mut result = SceneRenderResult::empty(scene.scene_id.clone(), warnings);

        let shared = SharedSink(Mutex::new(sink));
        let cx = LayerCtx {
            opts: &self.opts,
            cancel: &self.cancel,
            sink: &shared,
        };

        let error = if self.opts.parallel && scene.layers.len() > 1 {
            match render_parallel(&self.surface, &scene, &cx) {
                Ok(Some(outputs)) => {
                    let mut first_err = None;
                    for out in outputs {
                        match out {
                            Ok(out) => result.accept(out),
                            Err(e) => {
                                first_err.get_or_insert(e);
                            }
                        }
                    }
                    first_err
                }
                Ok(None) => render_sequential(&mut self.surface, &scene, &cx, &mut result),
                Err(e) => Some(e),
            }
        } else {
            render_sequential(&mut self.surface, &scene, &cx, &mut result)
        };

        match &error {
            Some(e) => tracing::warn!(
                error = %e,
                layers = result.layers.len(),
                strokes = result.stroke_reveals.len(),
                "scene render stopped early"
            ),
            None => tracing::info!(
                layers = result.layers.len(),
                strokes = result.stroke_reveals.len(),
                warnings = result.warnings.len(),
                "scene rendered"
            ),
        }

        PartialRender { result, error }
    }
}

struct SharedSink<'a, S: ?Sized>(Mutex<&'a mut S>);

impl<S: AssetSink + ?Sized> SharedSink<'_, S> {
    fn store(
        &self,
        layer_id: &str,
        name: AssetName,
        raster: &Raster,
    ) -> LayerframeResult<RasterRef> {
        let png = encode_png(raster)?;
        let mut sink = self
            .0
            .lock()
            .map_err(|_| LayerframeError::Other(anyhow::anyhow!("asset sink lock poisoned")))?;
        sink.store_png(layer_id, name, png)
    }
}

struct LayerCtx<'a, 's, S: ?Sized> {
    opts: &'a CompositorOpts,
    cancel: &'a CancelToken,
    sink: &'a SharedSink<'s, S>,
}

enum LayerOutput {
    Markup(LayerRender),
    Stroke {
        render: StrokeRevealRender,
        fallback: bool,
    },
}

impl SceneRenderResult {
    fn accept(&mut self, out: LayerOutput) {
        match out {
            LayerOutput::Markup(layer) => self.layers.push(layer),
            LayerOutput::Stroke { render, fallback } => {
                if fallback {
                    self.warnings.push(SceneWarning::new(
                        WarningKind::FallbackPath,
                        Some(render.id.as_str()),
                        format!(
                            "stroke '{}' has fewer than two coordinate pairs; using a horizontal line",
                            render.id
                        ),
                    ));
                }
                self.stroke_reveals.push(render);
            }
        }
    }
}

fn render_sequential<R: Rasterizer, S: AssetSink + ?Sized>(
    surface: &mut Surface<R>,
    scene: &Scene,
    cx: &LayerCtx<'_, '_, S>,
    result: &mut SceneRenderResult,
) -> Option<LayerframeError> {
    for layer in &scene.layers {
        match render_layer(surface, layer, cx) {
            Ok(out) => result.accept(out),
            Err(e) => return Some(e),
        }
    }
    None
}

/// Render every layer on a rayon pool. `Ok(None)` when the rasterizer cannot fork.
fn render_parallel<R: Rasterizer, S: AssetSink + ?Sized>(
    surface: &Surface<R>,
    scene: &Scene,
    cx: &LayerCtx<'_, '_, S>,
) -> LayerframeResult<Option<Vec<LayerframeResult<LayerOutput>>>> {
    let Some(proto) = surface.fork() else {
        tracing::warn!("rasterizer cannot fork; rendering layers sequentially");
        return Ok(None);
    };
    let proto = Mutex::new(proto);
    let pool = build_thread_pool(cx.opts.threads)?;
    tracing::debug!(
        threads = pool.current_num_threads(),
        layers = scene.layers.len(),
        "rendering layers in parallel"
    );

    let outputs = pool.install(|| {
        scene
            .layers
            .par_iter()
            .map_init(
                || proto.lock().ok().and_then(|p| p.fork()),
                |worker, layer| -> LayerframeResult<LayerOutput> {
                    let Some(worker) = worker.as_mut() else {
                        return Err(LayerframeError::render(
                            &layer.id,
                            "failed to fork a rasterizer surface",
                        ));
                    };
                    render_layer(worker, layer, cx)
                },
            )
            .collect::<Vec<_>>()
    });
    Ok(Some(outputs))
}

fn build_thread_pool(threads: Option<usize>) -> LayerframeResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| {
            LayerframeError::validation(format!("failed to build rayon thread pool: {e}"))
        })
}

fn render_layer<R: Rasterizer, S: AssetSink + ?Sized>(
    surface: &mut Surface<R>,
    layer: &Layer,
    cx: &LayerCtx<'_, '_, S>,
) -> LayerframeResult<LayerOutput> {
    cx.cancel.check()?;
    match &layer.kind {
        LayerKind::Markup {
            layer_type,
            markup,
            is_static,
            animation,
        } => render_markup_layer(
            surface,
            layer,
            layer_type,
            markup,
            *is_static,
            *animation,
            cx,
        )
        .map(LayerOutput::Markup),
        LayerKind::StrokeReveal {
            svg_path,
            style,
            reveal,
        } => render_stroke_layer(surface, layer, svg_path, style, *reveal, cx),
    }
}

#[tracing::instrument(level = "debug", skip_all, fields(layer = %layer.id))]
fn render_markup_layer<R: Rasterizer, S: AssetSink + ?Sized>(
    surface: &mut Surface<R>,
    layer: &Layer,
    layer_type: &str,
    markup: &str,
    is_static: bool,
    animation: Option<AnimationSpec>,
    cx: &LayerCtx<'_, '_, S>,
) -> LayerframeResult<LayerRender> {
    let opts = cx.opts;
    let st = surface
        .render_static(markup, opts.canvas, &opts.fonts, opts.crop_static_layers)
        .map_err(|e| LayerframeError::render(&layer.id, e))?;
    let raster = cx.sink.store(&layer.id, AssetName::Static, &st.raster)?;

    let sequence = match animation {
        Some(spec) if opts.render_animations && !is_static => {
            Some(render_sequence(surface, layer, markup, spec, cx)?)
        }
        _ => None,
    };

    tracing::info!(
        layer = %layer.id,
        width = st.raster.width,
        height = st.raster.height,
        frames = sequence.as_ref().map_or(0, |s| s.total_frames),
        "layer rendered"
    );

    Ok(LayerRender {
        id: layer.id.clone(),
        layer_type: layer_type.to_string(),
        description: layer.description.clone(),
        z_index: layer.z_index,
        is_static,
        animation,
        raster,
        width: st.raster.width,
        height: st.raster.height,
        position: st.position,
        anchor_point: st.anchor_point,
        sequence,
    })
}

fn render_sequence<R: Rasterizer, S: AssetSink + ?Sized>(
    surface: &mut Surface<R>,
    layer: &Layer,
    markup: &str,
    spec: AnimationSpec,
    cx: &LayerCtx<'_, '_, S>,
) -> LayerframeResult<AnimationSequence> {
    let opts = cx.opts;
    let timeline = Timeline::new(spec, opts.fps);
    let plan = *timeline.plan();

    let mut frames = Vec::new();
    for (f, style) in timeline.styles() {
        cx.cancel.check()?;
        let raster = surface
            .apply_style_and_capture(markup, opts.canvas, style, &opts.fonts)
            .map_err(|e| LayerframeError::render_frame(&layer.id, f.0, e))?;
        frames.push(cx.sink.store(&layer.id, AssetName::Frame(f.0), &raster)?);
    }

    Ok(AnimationSequence {
        frames,
        total_frames: plan.total_frames,
        delay_frames: plan.delay_frames,
        anim_frames: plan.anim_frames,
        hold_frames: plan.hold_frames,
        fps: plan.fps,
        duration_ms: spec.delay_ms.saturating_add(spec.duration_ms),
        effect: spec.effect,
    })
}

#[tracing::instrument(level = "debug", skip_all, fields(layer = %layer.id))]
fn render_stroke_layer<R: Rasterizer, S: AssetSink + ?Sized>(
    surface: &mut Surface<R>,
    layer: &Layer,
    svg_path: &str,
    style: &StrokeStyle,
    reveal: RevealSpec,
    cx: &LayerCtx<'_, '_, S>,
) -> LayerframeResult<LayerOutput> {
    let opts = cx.opts;
    let samples = sample_path(svg_path, opts.mask_points, opts.canvas);
    let schedule = RevealSchedule::new(&reveal, opts.fps);

    let hq_markup = stroke_markup(svg_path, style, opts.canvas);
    let hq = surface
        .render_static(&hq_markup, opts.canvas, &[], false)
        .map_err(|e| LayerframeError::render(&layer.id, e))?;
    let hq = cx.sink.store(&layer.id, AssetName::Hq, &hq.raster)?;

    let mut masks = Vec::new();
    for i in 0..schedule.total_frames {
        cx.cancel.check()?;
        let mask = RevealMask::new(
            &samples.points,
            schedule.progress(i),
            opts.canvas,
            opts.mask_radius,
        );
        let raster = surface
            .render_static(&mask.to_markup(), opts.canvas, &[], false)
            .map_err(|e| LayerframeError::render_frame(&layer.id, i, e))?;
        masks.push(cx.sink.store(&layer.id, AssetName::Mask(i), &raster.raster)?);
    }

    tracing::info!(
        layer = %layer.id,
        masks = masks.len(),
        fallback = samples.fallback,
        "stroke reveal rendered"
    );

    Ok(LayerOutput::Stroke {
        render: StrokeRevealRender {
            id: layer.id.clone(),
            layer_type: STROKE_REVEAL_TYPE.to_string(),
            description: layer.description.clone(),
            z_index: layer.z_index,
            hq,
            masks,
            reveal,
            total_frames: schedule.total_frames,
            fps: opts.fps,
        },
        fallback: samples.fallback,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/compositor.rs"]
mod tests;
