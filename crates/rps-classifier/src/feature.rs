use image::{
    RgbImage,
    imageops::{self, FilterType},
};
use rps_engine::EmptyRegionError;

/// Converts an image region into a feature vector.
///
/// The region is reduced to a single intensity channel, resized to
/// `width` x `height` with a triangle filter, and flattened row by row. Each
/// feature is a raw intensity in `0.0..=255.0`.
///
/// Extraction is a pure function of the region: the same pixels always yield
/// the same vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureExtractor {
    width: u32,
    height: u32,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE, Self::DEFAULT_SIZE)
    }
}

impl FeatureExtractor {
    pub const DEFAULT_SIZE: u32 = 32;

    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0);
        Self { width, height }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Length of every vector returned by [`Self::extract`].
    #[must_use]
    pub const fn feature_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn extract(&self, region: &RgbImage) -> Result<Vec<f32>, EmptyRegionError> {
        if region.width() == 0 || region.height() == 0 {
            return Err(EmptyRegionError);
        }
        let gray = imageops::grayscale(region);
        let resized = imageops::resize(&gray, self.width, self.height, FilterType::Triangle);
        Ok(resized.pixels().map(|p| f32::from(p.0[0])).collect())
    }
}
