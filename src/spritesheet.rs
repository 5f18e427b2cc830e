//! Sprite sheet slicing - cuts a grid image into individually addressable frames

use std::path::{Path, PathBuf};

use image::{imageops, RgbaImage};
use thiserror::Error;

/// Errors from sprite sheet construction.
#[derive(Debug, Error)]
pub enum SheetError {
    /// The sheet image is missing or not decodable.
    #[error("failed to load sprite sheet '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A grid with zero rows or zero columns.
    #[error("sprite sheet grid needs at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u32, cols: u32 },
    /// The image has fewer pixels than grid cells in one dimension.
    #[error("a {width}x{height} image cannot be sliced into a {rows}x{cols} grid")]
    FrameTooSmall {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
}

/// A source image sliced into a fixed grid of equally sized frames.
///
/// Frames are stored row-major (left to right, top to bottom) and addressed
/// modulo the frame count, so every index is valid once construction
/// succeeds. There are no mutation operations.
#[derive(Debug)]
pub struct SpriteSheet {
    frames: Vec<RgbaImage>,
    frame_width: u32,
    frame_height: u32,
}

impl SpriteSheet {
    /// Slice a decoded image into a `rows` x `cols` grid.
    ///
    /// Frame dimensions are the integer quotients of the image dimensions by
    /// the grid counts; remainder pixels on the right and bottom edges are
    /// dropped.
    ///
    /// # Arguments
    ///
    /// * `image` - Source image containing the frame grid
    /// * `rows` - Number of frame rows in the grid
    /// * `cols` - Number of frame columns in the grid
    pub fn new(image: &RgbaImage, rows: u32, cols: u32) -> Result<Self, SheetError> {
        if rows == 0 || cols == 0 {
            return Err(SheetError::EmptyGrid { rows, cols });
        }
        let frame_width = image.width() / cols;
        let frame_height = image.height() / rows;
        if frame_width == 0 || frame_height == 0 {
            return Err(SheetError::FrameTooSmall {
                width: image.width(),
                height: image.height(),
                rows,
                cols,
            });
        }

        let mut frames = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let cell = imageops::crop_imm(
                    image,
                    col * frame_width,
                    row * frame_height,
                    frame_width,
                    frame_height,
                );
                frames.push(cell.to_image());
            }
        }

        Ok(Self {
            frames,
            frame_width,
            frame_height,
        })
    }

    /// Load the sheet image from disk, then slice it.
    pub fn load(path: &Path, rows: u32, cols: u32) -> Result<Self, SheetError> {
        let image = image::open(path)
            .map_err(|source| SheetError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        Self::new(&image, rows, cols)
    }

    /// Look up a frame by index, wrapping modulo the frame count.
    ///
    /// Every index is valid: `frame(i)` and `frame(i + frame_count)` are the
    /// same frame.
    pub fn frame(&self, index: usize) -> &RgbaImage {
        &self.frames[index % self.frames.len()]
    }

    /// Number of frames in the sheet (always rows * cols).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Width of every frame in pixels.
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    /// Height of every frame in pixels.
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }
}
