use crate::core_modules::chunk::chunk::Region;

/// Failures surfaced by the fallible edges of the engine: bitmap construction,
/// image I/O, checked pattern capture and the worker pool. The comparison
/// functions themselves never fail.
#[derive(Debug)]
pub enum MatchError {
    BufferTooSmall {
        expected: usize,
        actual: usize,
    },
    RegionOutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },
    Image(image::ImageError),
    WorkerUnavailable,
    WorkerDropped,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BufferTooSmall { expected, actual } => write!(
                f,
                "bitmap buffer holds {actual} bytes but its dimensions need {expected}"
            ),
            Self::RegionOutOfBounds {
                region,
                width,
                height,
            } => write!(
                f,
                "region {}x{} at ({}, {}) exceeds bitmap of {width}x{height}",
                region.width, region.height, region.left, region.top
            ),
            Self::Image(err) => write!(f, "image error: {err}"),
            Self::WorkerUnavailable => f.write_str("no matcher worker is accepting requests"),
            Self::WorkerDropped => f.write_str("matcher worker dropped the request before replying"),
        }
    }
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for MatchError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err)
    }
}
