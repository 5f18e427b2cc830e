//! Motion paths - piecewise-linear interpolation between normalized waypoints

use thiserror::Error;

/// Errors from motion path construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionError {
    /// A path needs somewhere to go.
    #[error("a motion path needs at least two waypoints (got {0})")]
    TooFewWaypoints(usize),
    /// The frame-count list must pair up with the segments between waypoints.
    #[error("expected one frame count per segment ({segments}), got {counts}")]
    CountMismatch { segments: usize, counts: usize },
    /// A segment cannot span its two endpoints in under two frames.
    #[error("segment {index} spans {frames} frame(s); every segment needs at least 2")]
    SegmentTooShort { index: usize, frames: u32 },
}

/// A position in normalized screen space: (0, 0) is the top-left corner of
/// the canvas, (1, 1) the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation toward `other`. Exact at t = 0 and t = 1.
    pub fn lerp(self, other: Point2D, t: f64) -> Point2D {
        Point2D {
            x: self.x * (1.0 - t) + other.x * t,
            y: self.y * (1.0 - t) + other.y * t,
        }
    }
}

/// One normalized position per animation frame, following a waypoint chain
/// with a fixed number of frames per segment.
///
/// Segments share their endpoints, so each interior waypoint appears exactly
/// once, and the path closes exactly on the final waypoint. The total length
/// is `sum(segment_frames) - (waypoints - 1)`.
#[derive(Debug, Clone)]
pub struct MotionPath {
    points: Vec<Point2D>,
}

impl MotionPath {
    /// Interpolate `waypoints` into per-frame positions, spending
    /// `segment_frames[i]` frames travelling from `waypoints[i]` to
    /// `waypoints[i + 1]`.
    pub fn build(waypoints: &[Point2D], segment_frames: &[u32]) -> Result<Self, MotionError> {
        if waypoints.len() < 2 {
            return Err(MotionError::TooFewWaypoints(waypoints.len()));
        }
        let segments = waypoints.len() - 1;
        if segment_frames.len() != segments {
            return Err(MotionError::CountMismatch {
                segments,
                counts: segment_frames.len(),
            });
        }
        if let Some(index) = segment_frames.iter().position(|&frames| frames < 2) {
            return Err(MotionError::SegmentTooShort {
                index,
                frames: segment_frames[index],
            });
        }

        let mut points = Vec::new();
        for (i, &frames) in segment_frames.iter().enumerate() {
            let from = waypoints[i];
            let to = waypoints[i + 1];
            if i + 1 < segments {
                // Half-open: the shared waypoint is supplied by the next segment.
                let pts = line_points(from, to, frames);
                points.extend_from_slice(&pts[..pts.len() - 1]);
            } else {
                // The last segment closes on the final waypoint.
                points.extend(line_points(from, to, frames - 1));
            }
        }
        Ok(Self { points })
    }

    /// Position for the given frame offset into the path's window.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= len()`.
    pub fn position(&self, offset: usize) -> Point2D {
        self.points[offset]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// `count` points evenly spaced from `from` to `to`, inclusive of both ends.
fn line_points(from: Point2D, to: Point2D, count: u32) -> Vec<Point2D> {
    match count {
        0 => Vec::new(),
        1 => vec![to],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| from.lerp(to, i as f64 / last))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lerp() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 0.5);

        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point2D::new(0.5, 0.25));
    }

    #[test]
    fn test_lerp_endpoints_exact_for_awkward_values() {
        // Values whose difference is not exactly representable
        let a = Point2D::new(0.1, 0.7);
        let b = Point2D::new(0.7, 0.1);

        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(b.lerp(a, 1.0), a);
    }

    #[test]
    fn test_single_segment_path() {
        let waypoints = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.5)];
        let path = MotionPath::build(&waypoints, &[6]).unwrap();

        // 6 frames over one segment: 5 positions, both endpoints included
        assert_eq!(path.len(), 5);
        assert_eq!(path.position(0), waypoints[0]);
        assert_eq!(path.position(4), waypoints[1]);
    }

    #[test]
    fn test_single_segment_points_equally_spaced() {
        let waypoints = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)];
        let path = MotionPath::build(&waypoints, &[6]).unwrap();

        for (i, expected) in [0.0, 0.25, 0.5, 0.75, 1.0].into_iter().enumerate() {
            assert_eq!(path.position(i), Point2D::new(expected, expected));
        }
    }

    #[test]
    fn test_multi_segment_length_and_endpoints() {
        let waypoints = [
            Point2D::new(0.5, 0.5),
            Point2D::new(0.2, 0.7),
            Point2D::new(0.8, 0.1),
        ];
        let segment_frames = [7, 5];
        let path = MotionPath::build(&waypoints, &segment_frames).unwrap();

        // sum(frames) - (waypoints - 1) = 12 - 2
        assert_eq!(path.len(), 10);
        assert_eq!(path.position(0), waypoints[0]);
        assert_eq!(path.position(9), waypoints[2]);
    }

    #[test]
    fn test_shared_waypoints_not_duplicated() {
        let waypoints = [
            Point2D::new(0.0, 0.0),
            Point2D::new(0.5, 0.5),
            Point2D::new(1.0, 0.0),
        ];
        let path = MotionPath::build(&waypoints, &[3, 3]).unwrap();

        // Segment one: (0,0), (0.25,0.25); segment two: (0.5,0.5), (1,0)
        assert_eq!(path.len(), 4);
        let hits = (0..path.len())
            .filter(|&i| path.position(i) == waypoints[1])
            .count();
        assert_eq!(hits, 1, "interior waypoint must appear exactly once");
    }

    #[test]
    fn test_too_few_waypoints() {
        let one = [Point2D::new(0.0, 0.0)];
        assert_eq!(
            MotionPath::build(&one, &[]).unwrap_err(),
            MotionError::TooFewWaypoints(1)
        );
    }

    #[test]
    fn test_count_mismatch() {
        let waypoints = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)];
        assert_eq!(
            MotionPath::build(&waypoints, &[3, 3]).unwrap_err(),
            MotionError::CountMismatch {
                segments: 1,
                counts: 2
            }
        );
    }

    #[test]
    fn test_segment_too_short() {
        let waypoints = [
            Point2D::new(0.0, 0.0),
            Point2D::new(0.5, 0.5),
            Point2D::new(1.0, 1.0),
        ];
        assert_eq!(
            MotionPath::build(&waypoints, &[3, 1]).unwrap_err(),
            MotionError::SegmentTooShort {
                index: 1,
                frames: 1
            }
        );
    }
}
