//! Dimension checks run before any binarization or decode attempt.

use crate::config::Limits;
use crate::error::Rejection;

/// Rejects images that are degenerate or too expensive to search.
#[derive(Debug, Clone, Copy)]
pub struct ImageGuard {
    max_pixels: u64,
}

impl ImageGuard {
    /// Create a guard with an explicit pixel ceiling
    pub fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }

    /// Create a guard from the request limits
    pub fn from_limits(limits: &Limits) -> Self {
        Self::new(limits.max_pixels)
    }

    /// Check image dimensions.
    ///
    /// Symbol search cost scales with pixel count, so anything above the
    /// ceiling is refused before a pixel buffer is even allocated.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), Rejection> {
        if width <= 1 || height <= 1 {
            return Err(Rejection::TooSmall { width, height });
        }
        if u64::from(width) * u64::from(height) > self.max_pixels {
            return Err(Rejection::TooLarge { width, height });
        }
        Ok(())
    }
}

impl Default for ImageGuard {
    fn default() -> Self {
        Self::from_limits(&Limits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let guard = ImageGuard::default();
        for (w, h) in [(0, 0), (1, 100), (100, 1), (1, 1), (0, 5000)] {
            assert_eq!(
                guard.validate(w, h),
                Err(Rejection::TooSmall {
                    width: w,
                    height: h
                })
            );
        }
    }

    #[test]
    fn test_rejects_oversized_images() {
        let guard = ImageGuard::default();
        assert_eq!(
            guard.validate(6000, 6000),
            Err(Rejection::TooLarge {
                width: 6000,
                height: 6000
            })
        );
        // Product would overflow u32
        assert!(matches!(
            guard.validate(u32::MAX, u32::MAX),
            Err(Rejection::TooLarge { .. })
        ));
    }

    #[test]
    fn test_pixel_ceiling_is_inclusive() {
        let guard = ImageGuard::default();
        assert_eq!(guard.validate(1 << 13, 1 << 12), Ok(()));
        assert!(guard.validate((1 << 13) + 1, 1 << 12).is_err());
    }

    #[test]
    fn test_accepts_small_images() {
        let guard = ImageGuard::new(16);
        assert_eq!(guard.validate(2, 2), Ok(()));
        assert_eq!(guard.validate(4, 4), Ok(()));
        assert!(guard.validate(4, 5).is_err());
    }
}
