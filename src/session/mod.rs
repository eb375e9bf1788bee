//! Render session: loaded slots, current parameters, and the render pass.
//!
//! A [`RenderSession`] owns everything a render pass reads. Each pass starts
//! from the loaded source rasters, so parameter changes never compound.

pub mod console;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::compositor::compose;
use crate::error::{LevelsError, Result};
use crate::export::{default_path, export_png, ExportKind};
use crate::overlay::GridOverlayRenderer;
use crate::raster::Frame;
use crate::solar::{LimbRasterizer, SolarMapRasterizer};
use crate::source::LoadedSource;
use crate::tone::{self, LevelParams, ToneLut};

/// The two image positions in the side-by-side view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Left image
    Primary,
    /// Right image
    Comparison,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Comparison];
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Primary => write!(f, "primary"),
            Slot::Comparison => write!(f, "comparison"),
        }
    }
}

/// A slot left out of a pass because its source couldn't be rasterized.
#[derive(Debug)]
pub struct SkippedSlot {
    pub slot: Slot,
    pub error: LevelsError,
}

/// Outcome of one render pass.
#[derive(Debug, Default)]
pub struct RenderPass {
    /// Slots that made it into the output, left to right
    pub rendered: Vec<Slot>,
    pub skipped: Vec<SkippedSlot>,
}

impl RenderPass {
    /// Whether the pass produced no image.
    pub fn is_empty(&self) -> bool {
        self.rendered.is_empty()
    }

    /// How an export of this pass should be named.
    pub fn export_kind(&self) -> ExportKind {
        if self.rendered.len() > 1 {
            ExportKind::View
        } else {
            ExportKind::Adjusted
        }
    }
}

/// Session state shared by the CLI and the interactive console.
pub struct RenderSession {
    primary: Option<LoadedSource>,
    comparison: Option<LoadedSource>,
    params: LevelParams,
    lut: ToneLut,
    grid: bool,
    overlay: GridOverlayRenderer,
    rasterizer: Box<dyn SolarMapRasterizer>,
    last_render: Option<(Frame, ExportKind)>,
}

impl RenderSession {
    pub fn new(params: LevelParams, overlay: GridOverlayRenderer) -> Self {
        Self {
            primary: None,
            comparison: None,
            params,
            lut: ToneLut::build(&params),
            grid: true,
            overlay,
            rasterizer: Box::new(LimbRasterizer::default()),
            last_render: None,
        }
    }

    /// Replace the solar map rasterizer.
    pub fn with_rasterizer(mut self, rasterizer: Box<dyn SolarMapRasterizer>) -> Self {
        self.rasterizer = rasterizer;
        self
    }

    pub fn params(&self) -> LevelParams {
        self.params
    }

    /// Replace the parameters, rebuilding the lookup table if they changed.
    pub fn set_params(&mut self, params: LevelParams) {
        if params != self.params {
            self.params = params;
            self.lut = ToneLut::build(&params);
            log::debug!("Rebuilt tone table for {}", params);
        }
    }

    pub fn grid_enabled(&self) -> bool {
        self.grid
    }

    pub fn set_grid(&mut self, enabled: bool) {
        self.grid = enabled;
    }

    pub fn slot(&self, slot: Slot) -> Option<&LoadedSource> {
        match slot {
            Slot::Primary => self.primary.as_ref(),
            Slot::Comparison => self.comparison.as_ref(),
        }
    }

    /// Put an already loaded source into a slot, replacing what was there.
    pub fn set_slot(&mut self, slot: Slot, source: Option<LoadedSource>) {
        match slot {
            Slot::Primary => self.primary = source,
            Slot::Comparison => self.comparison = source,
        }
    }

    /// Load a photo, or a solar map when `meta` is given, into a slot.
    ///
    /// On failure the slot keeps its previous contents.
    pub fn load(&mut self, slot: Slot, path: &Path, meta: Option<&Path>) -> Result<()> {
        let source = LoadedSource::load(path, meta)?;
        log::info!("Loaded {} into {} slot", source, slot);
        self.set_slot(slot, Some(source));
        Ok(())
    }

    pub fn has_images(&self) -> bool {
        self.primary.is_some() || self.comparison.is_some()
    }

    /// Run one full pass: rasterize, tone map, overlay, then compose.
    ///
    /// A slot whose source can't be rasterized is skipped and reported in the
    /// returned [`RenderPass`]; the other slot still renders. The previous
    /// render is dropped up front, so it is only replaced by a complete pass.
    ///
    /// # Errors
    /// `InvalidGeometry` from any stage, which aborts the whole pass.
    pub fn render(&mut self) -> Result<RenderPass> {
        let started = Instant::now();
        self.last_render = None;
        let mut pass = RenderPass::default();
        let mut frames = Vec::with_capacity(2);

        for slot in Slot::ALL {
            let Some(source) = self.slot(slot) else {
                continue;
            };
            let raster = match source.image.to_raster(self.rasterizer.as_ref()) {
                Ok(raster) => raster,
                Err(error @ LevelsError::UnsupportedSource { .. }) => {
                    log::warn!("Skipping {} slot: {}", slot, error);
                    pass.skipped.push(SkippedSlot { slot, error });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let adjusted = tone::apply(&raster, &self.lut)?;
            let annotated = if self.grid {
                self.overlay.draw_overlay(adjusted)?
            } else {
                adjusted
            };
            frames.push(annotated);
            pass.rendered.push(slot);
        }

        self.last_render = compose(frames)?.map(|frame| (frame, pass.export_kind()));
        log::debug!(
            "Render pass: {} image(s), {} skipped, {:?}",
            pass.rendered.len(),
            pass.skipped.len(),
            started.elapsed()
        );
        Ok(pass)
    }

    /// The image produced by the most recent pass, if any.
    pub fn last_render(&self) -> Option<&Frame> {
        self.last_render.as_ref().map(|(frame, _)| frame)
    }

    /// Write the last rendered image as PNG.
    ///
    /// With no `path`, a timestamped name in `default_dir` is used. Returns
    /// the path written.
    ///
    /// # Errors
    /// `InvalidParameter` if nothing has been rendered yet.
    pub fn export(&self, path: Option<&Path>, default_dir: &Path) -> Result<PathBuf> {
        let (frame, kind) = self.last_render.as_ref().ok_or_else(|| {
            LevelsError::InvalidParameter("nothing to export, load an image first".to_string())
        })?;
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_path(default_dir, *kind),
        };
        export_png(frame, &path)?;
        Ok(path)
    }
}

impl Default for RenderSession {
    fn default() -> Self {
        Self::new(LevelParams::default(), GridOverlayRenderer::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelFormat;
    use crate::solar::SolarMap;
    use crate::source::SourceImage;
    use tempfile::TempDir;

    fn photo(width: u32, height: u32, value: u8) -> LoadedSource {
        LoadedSource {
            path: PathBuf::from(format!("{}x{}.png", width, height)),
            meta_path: None,
            image: SourceImage::Photo(
                Frame::filled(width, height, PixelFormat::Rgb, &[value, value, value]).unwrap(),
            ),
        }
    }

    struct FailingRasterizer;

    struct BrokenRasterizer;

    impl SolarMapRasterizer for BrokenRasterizer {
        fn rasterize(&self, _map: &SolarMap) -> Result<Frame> {
            Err(LevelsError::geometry(0, 0, "empty raster"))
        }
    }

    fn solar_source() -> LoadedSource {
        LoadedSource {
            path: PathBuf::from("map.png"),
            meta_path: Some(PathBuf::from("map.toml")),
            image: SourceImage::SolarMap(SolarMap {
                raster: Frame::filled(3, 3, PixelFormat::Rgb, &[0, 0, 0]).unwrap(),
                meta: crate::solar::SolarMapMeta::new(1.0, 1.0, 1.0).unwrap(),
            }),
        }
    }

    impl SolarMapRasterizer for FailingRasterizer {
        fn rasterize(&self, _map: &SolarMap) -> Result<Frame> {
            Err(LevelsError::unsupported("map.fits", "projection not supported"))
        }
    }

    // ==================== Render Tests ====================

    #[test]
    fn test_render_nothing_loaded() {
        let mut session = RenderSession::default();
        let pass = session.render().unwrap();
        assert!(pass.is_empty());
        assert!(session.last_render().is_none());
    }

    #[test]
    fn test_render_single_slot() {
        let mut session = RenderSession::default();
        session.set_grid(false);
        session.set_slot(Slot::Primary, Some(photo(4, 4, 100)));
        let pass = session.render().unwrap();
        assert_eq!(pass.rendered, vec![Slot::Primary]);
        assert_eq!(pass.export_kind(), ExportKind::Adjusted);
        assert_eq!(session.last_render().unwrap().pixel(0, 0).unwrap(), &[100, 100, 100]);
    }

    #[test]
    fn test_render_two_slots_composes() {
        let mut session = RenderSession::default();
        session.set_slot(Slot::Primary, Some(photo(20, 10, 0)));
        session.set_slot(Slot::Comparison, Some(photo(30, 40, 0)));
        let pass = session.render().unwrap();
        assert_eq!(pass.export_kind(), ExportKind::View);
        let out = session.last_render().unwrap();
        assert_eq!((out.width, out.height, out.format), (50, 40, PixelFormat::Rgba));
    }

    #[test]
    fn test_render_always_from_source() {
        let mut session = RenderSession::default();
        session.set_grid(false);
        session.set_slot(Slot::Primary, Some(photo(2, 2, 100)));

        session.set_params(LevelParams::new(50, 150, 1.0).unwrap());
        session.render().unwrap();
        session.render().unwrap();
        // (100 - 50) / 100 = 0.5 → 128, not re-mapped a second time
        assert_eq!(session.last_render().unwrap().pixel(1, 1).unwrap(), &[128, 128, 128]);

        session.set_params(LevelParams::default());
        session.render().unwrap();
        assert_eq!(session.last_render().unwrap().pixel(1, 1).unwrap(), &[100, 100, 100]);
    }

    #[test]
    fn test_unsupported_slot_is_skipped() {
        let mut session = RenderSession::default().with_rasterizer(Box::new(FailingRasterizer));
        session.set_grid(false);
        session.set_slot(Slot::Primary, Some(photo(3, 3, 7)));
        session.set_slot(Slot::Comparison, Some(solar_source()));

        let pass = session.render().unwrap();
        assert_eq!(pass.rendered, vec![Slot::Primary]);
        assert_eq!(pass.skipped.len(), 1);
        assert_eq!(pass.skipped[0].slot, Slot::Comparison);
        let out = session.last_render().unwrap();
        assert_eq!((out.width, out.height, out.format), (3, 3, PixelFormat::Rgb));
    }

    #[test]
    fn test_clearing_slots_clears_render() {
        let mut session = RenderSession::default();
        session.set_slot(Slot::Primary, Some(photo(4, 4, 1)));
        session.render().unwrap();
        assert!(session.last_render().is_some());

        session.set_slot(Slot::Primary, None);
        assert!(!session.has_images());
        session.render().unwrap();
        assert!(session.last_render().is_none());
    }

    #[test]
    fn test_failed_pass_drops_previous_render() {
        let dir = TempDir::new().unwrap();
        let mut session = RenderSession::default().with_rasterizer(Box::new(BrokenRasterizer));
        session.set_slot(Slot::Primary, Some(photo(4, 4, 1)));
        session.render().unwrap();
        assert!(session.last_render().is_some());

        session.set_params(LevelParams::new(10, 200, 2.0).unwrap());
        session.set_slot(Slot::Comparison, Some(solar_source()));
        assert!(matches!(
            session.render(),
            Err(LevelsError::InvalidGeometry { .. })
        ));
        assert!(session.last_render().is_none());
        assert!(session.export(None, dir.path()).is_err());
    }

    // ==================== Export Tests ====================

    #[test]
    fn test_export_before_render_refused() {
        let dir = TempDir::new().unwrap();
        let session = RenderSession::default();
        assert!(matches!(
            session.export(None, dir.path()),
            Err(LevelsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_export_default_name() {
        let dir = TempDir::new().unwrap();
        let mut session = RenderSession::default();
        session.set_slot(Slot::Primary, Some(photo(8, 8, 50)));
        session.set_slot(Slot::Comparison, Some(photo(8, 8, 50)));
        session.render().unwrap();

        let path = session.export(None, dir.path()).unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("view_"), "got {}", name);
    }

    #[test]
    fn test_failed_load_keeps_slot() {
        let mut session = RenderSession::default();
        session.set_slot(Slot::Primary, Some(photo(4, 4, 1)));
        assert!(session
            .load(Slot::Primary, Path::new("/nonexistent/sun.png"), None)
            .is_err());
        assert!(session.slot(Slot::Primary).is_some());
    }
}
