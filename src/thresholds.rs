//! Sensitivity thresholds for the print-readiness checks

/// Numeric thresholds governing how sensitive the three checks are.
///
/// Constructed once (usually via [`Default`]) and passed by reference into
/// every analysis call; never mutated. Passing the model explicitly keeps
/// the classifier deterministic and lets tests exercise arbitrary threshold
/// combinations without process-wide state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdModel {
    /// Per-channel color difference, on the 0-255 scale, beyond which a
    /// fill/stroke color counts as non-gray. Compared against normalized
    /// [0,1] components by dividing this value by 255.
    pub color_delta_threshold: u8,
    /// Percentage of the page area (0-100) a single rectangle must exceed
    /// to count as a background element.
    pub background_area_percent_threshold: f64,
    /// Image size threshold in millions of pixels. An image triggers the
    /// flag when width * height strictly exceeds this value * 1,000,000.
    pub large_image_pixel_threshold: f64,
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self {
            color_delta_threshold: 30,
            background_area_percent_threshold: 50.0,
            large_image_pixel_threshold: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = ThresholdModel::default();
        assert_eq!(thresholds.color_delta_threshold, 30);
        assert_eq!(thresholds.background_area_percent_threshold, 50.0);
        assert_eq!(thresholds.large_image_pixel_threshold, 1.0);
    }
}
