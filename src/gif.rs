//! Animated GIF encoding

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use thiserror::Error;

/// Errors raised while writing the output GIF.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GIF encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Write a sequence of frames as an infinitely looping animated GIF.
///
/// # Arguments
///
/// * `frames` - The image frames to include in the animation
/// * `duration_ms` - Duration per frame in milliseconds
/// * `path` - Output file path
///
/// # Returns
///
/// * `Ok(())` on success; an empty frame list writes nothing
/// * `Err(EncodeError)` on failure
pub fn write_gif(frames: &[RgbaImage], duration_ms: u32, path: &Path) -> Result<(), EncodeError> {
    if frames.is_empty() {
        return Ok(());
    }

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| EncodeError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }

    let file = File::create(path).map_err(|source| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);
    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(Repeat::Infinite)?;

    // GIF delays are stored in centiseconds, so sub-centisecond durations
    // clamp up to 1 and everything else rounds down
    let delay_cs = (duration_ms / 10).max(1);

    for rgba_image in frames {
        let delay = Delay::from_numer_denom_ms(delay_cs * 10, 1);
        let frame = Frame::from_parts(rgba_image.clone(), 0, 0, delay);
        encoder.encode_frame(frame)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, Rgba};
    use std::io::BufReader;
    use tempfile::tempdir;

    fn solid_frame(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    fn decode_frames(path: &Path) -> Vec<Frame> {
        let reader = BufReader::new(File::open(path).unwrap());
        let decoder = GifDecoder::new(reader).unwrap();
        decoder.into_frames().collect_frames().unwrap()
    }

    #[test]
    fn test_write_gif_creates_valid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.gif");

        let frames = vec![
            solid_frame(2, 2, Rgba([255, 0, 0, 255])),
            solid_frame(2, 2, Rgba([0, 255, 0, 255])),
        ];

        write_gif(&frames, 100, &path).unwrap();
        assert!(path.exists());
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_write_gif_frame_delay_quantizes_to_centiseconds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("delay.gif");

        let frames = vec![
            solid_frame(4, 4, Rgba([255, 0, 0, 255])),
            solid_frame(4, 4, Rgba([255, 0, 0, 255])),
            solid_frame(4, 4, Rgba([255, 0, 0, 255])),
        ];

        // 32ms truncates to 3 centiseconds on the wire
        write_gif(&frames, 32, &path).unwrap();

        let decoded = decode_frames(&path);
        assert_eq!(decoded.len(), 3);
        for frame in &decoded {
            assert_eq!(frame.delay().numer_denom_ms(), (30, 1));
        }
        // Solid red survives palettization exactly
        assert_eq!(
            *decoded[0].buffer().get_pixel(0, 0),
            Rgba([255, 0, 0, 255])
        );
    }

    #[test]
    fn test_write_gif_minimum_delay() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("min_delay.gif");

        let frames = vec![solid_frame(2, 2, Rgba([0, 0, 255, 255]))];

        // 5ms is below one centisecond and clamps up
        write_gif(&frames, 5, &path).unwrap();

        let decoded = decode_frames(&path);
        assert_eq!(decoded[0].delay().numer_denom_ms(), (10, 1));
    }

    #[test]
    fn test_write_gif_loops_forever() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loop.gif");

        let frames = vec![
            solid_frame(2, 2, Rgba([255, 0, 0, 255])),
            solid_frame(2, 2, Rgba([0, 0, 255, 255])),
        ];
        write_gif(&frames, 100, &path).unwrap();

        // Infinite looping rides on the Netscape application extension
        let bytes = std::fs::read(&path).unwrap();
        let marker = b"NETSCAPE2.0";
        assert!(bytes.windows(marker.len()).any(|window| window == marker));
    }

    #[test]
    fn test_write_gif_empty_frames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.gif");

        let frames: Vec<RgbaImage> = vec![];
        write_gif(&frames, 100, &path).unwrap();

        // Nothing to write, no file
        assert!(!path.exists());
    }

    #[test]
    fn test_write_gif_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.gif");

        let frames = vec![solid_frame(2, 2, Rgba([255, 0, 0, 255]))];

        write_gif(&frames, 100, &path).unwrap();
        assert!(path.exists());
    }
}
