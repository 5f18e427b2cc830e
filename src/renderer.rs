//! Windowed sprite renderers - map global animation frames onto sheet frames
//! and screen positions

use std::rc::Rc;

use image::{imageops, RgbaImage};

use crate::blend;
use crate::motion::{MotionError, MotionPath, Point2D};
use crate::spritesheet::SpriteSheet;
use crate::transform;

/// Drawing contract shared by every renderer variant.
pub trait Render {
    /// Composite this renderer's sprite for `global_index` onto a copy of
    /// `canvas` and return it.
    ///
    /// The caller's canvas is never mutated. Outside the renderer's active
    /// window the copy comes back pixel-identical, and `position` is
    /// ignored. `position` is normalized: it marks where the sprite's
    /// *center* lands, as a fraction of the canvas dimensions.
    fn render_frame(&self, global_index: usize, canvas: &RgbaImage, position: Point2D)
        -> RgbaImage;
}

/// Base renderer: while `global_index` is inside `[start, end)`, draws sheet
/// frame `global_index - start` (wrapping past the sheet's length) centered
/// at the caller's position.
pub struct SpriteRenderer {
    sheet: Rc<SpriteSheet>,
    start: usize,
    end: usize,
}

impl SpriteRenderer {
    /// Renderer whose window spans one full traversal of the sheet from
    /// `start`.
    pub fn new(sheet: Rc<SpriteSheet>, start: usize) -> Self {
        let end = start + sheet.frame_count() - 1;
        Self { sheet, start, end }
    }

    /// Renderer with an explicit half-open window. A window longer than the
    /// sheet loops its frames.
    pub fn with_end(sheet: Rc<SpriteSheet>, start: usize, end: usize) -> Self {
        Self { sheet, start, end }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    fn in_window(&self, global_index: usize) -> bool {
        self.start <= global_index && global_index < self.end
    }

    /// Copy the canvas and paste `sprite` centered on the normalized
    /// position. Pixel coordinates truncate; off-canvas overhang clips.
    fn composite(&self, sprite: &RgbaImage, canvas: &RgbaImage, position: Point2D) -> RgbaImage {
        let mut out = canvas.clone();
        let x = (position.x * canvas.width() as f64) as i32 - (sprite.width() / 2) as i32;
        let y = (position.y * canvas.height() as f64) as i32 - (sprite.height() / 2) as i32;
        blend::blit(&mut out, sprite, x, y);
        out
    }
}

impl Render for SpriteRenderer {
    fn render_frame(
        &self,
        global_index: usize,
        canvas: &RgbaImage,
        position: Point2D,
    ) -> RgbaImage {
        if !self.in_window(global_index) {
            return canvas.clone();
        }
        self.composite(self.sheet.frame(global_index - self.start), canvas, position)
    }
}

/// Renderer that follows a waypoint path, advancing one sheet frame and one
/// path position per elapsed global frame. The caller's position argument is
/// ignored.
pub struct MovingRenderer {
    base: SpriteRenderer,
    path: MotionPath,
}

impl MovingRenderer {
    /// Renderer travelling along `waypoints` from frame `start`, spending
    /// `segment_frames[i]` frames on segment i. The window end is
    /// `start + sum(segment_frames) - (waypoints.len() - 1)`, exactly one
    /// frame per path position.
    pub fn new(
        sheet: Rc<SpriteSheet>,
        start: usize,
        waypoints: &[Point2D],
        segment_frames: &[u32],
    ) -> Result<Self, MotionError> {
        let path = MotionPath::build(waypoints, segment_frames)?;
        let end = start + path.len();
        Ok(Self {
            base: SpriteRenderer::with_end(sheet, start, end),
            path,
        })
    }

    pub fn start(&self) -> usize {
        self.base.start()
    }

    pub fn end(&self) -> usize {
        self.base.end()
    }
}

impl Render for MovingRenderer {
    fn render_frame(
        &self,
        global_index: usize,
        canvas: &RgbaImage,
        _position: Point2D,
    ) -> RgbaImage {
        if !self.base.in_window(global_index) {
            return canvas.clone();
        }
        let offset = global_index - self.base.start;
        self.base
            .composite(self.base.sheet.frame(offset), canvas, self.path.position(offset))
    }
}

/// Renderer that holds one fixed sheet frame for its whole window - how a
/// settled die face stays on screen.
pub struct StaticRenderer {
    base: SpriteRenderer,
    frame_index: usize,
}

impl StaticRenderer {
    /// Renderer drawing sheet frame `frame_index` for every global frame in
    /// `[start, end)`.
    pub fn new(sheet: Rc<SpriteSheet>, start: usize, end: usize, frame_index: usize) -> Self {
        Self {
            base: SpriteRenderer::with_end(sheet, start, end),
            frame_index,
        }
    }
}

impl Render for StaticRenderer {
    fn render_frame(
        &self,
        global_index: usize,
        canvas: &RgbaImage,
        position: Point2D,
    ) -> RgbaImage {
        if !self.base.in_window(global_index) {
            return canvas.clone();
        }
        self.base
            .composite(self.base.sheet.frame(self.frame_index), canvas, position)
    }
}

/// Renderer that flips and/or rotates each frame before compositing - used
/// for impact effects oriented per screen quadrant.
pub struct RotatedRenderer {
    base: SpriteRenderer,
    angle: f64,
    flip: bool,
}

impl RotatedRenderer {
    /// Renderer with the default one-traversal window. Each drawn frame is
    /// optionally flipped vertically, then rotated `angle` degrees
    /// counter-clockwise with its bounding box expanded, so centering uses
    /// the post-rotation dimensions.
    pub fn new(sheet: Rc<SpriteSheet>, start: usize, angle: f64, flip: bool) -> Self {
        Self {
            base: SpriteRenderer::new(sheet, start),
            angle,
            flip,
        }
    }
}

impl Render for RotatedRenderer {
    fn render_frame(
        &self,
        global_index: usize,
        canvas: &RgbaImage,
        position: Point2D,
    ) -> RgbaImage {
        if !self.base.in_window(global_index) {
            return canvas.clone();
        }
        let frame = self.base.sheet.frame(global_index - self.base.start);
        let flipped = self.flip.then(|| imageops::flip_vertical(frame));
        let upright = flipped.as_ref().unwrap_or(frame);
        let rotated = transform::rotate_expand(upright, self.angle);
        self.base.composite(&rotated, canvas, position)
    }
}
