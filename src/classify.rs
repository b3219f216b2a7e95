//! Operator stream classification
//!
//! Single-pass scan over a page's drawing operators that decides which
//! print-optimization issues the page exhibits. The scan is pure: same
//! operators, geometry, and thresholds always produce the same flags.

use crate::thresholds::ThresholdModel;

/// A drawing operator relevant to print-readiness analysis.
///
/// Produced by the content stream adapter in [`crate::pdf::content`] from
/// the decoded page operators. Operators outside this vocabulary map to
/// [`Operator::Other`] and are ignored by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    /// Set fill color, RGB components normalized to [0,1] (`rg`)
    SetFillColor { r: f64, g: f64, b: f64 },
    /// Set stroke color, RGB components normalized to [0,1] (`RG`)
    SetStrokeColor { r: f64, g: f64, b: f64 },
    /// Append a rectangle to the current path, page-space units (`re`)
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    /// Paint an image XObject with the given pixel dimensions (`Do`)
    PaintImage { pixel_width: i64, pixel_height: i64 },
    /// Any other operator; never affects the result
    Other,
}

/// Page dimensions in the same page-space units as [`Operator::Rectangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Scan state for one classification pass.
///
/// All flags start false and only ever flip to true; nothing un-sets a flag
/// within a pass. Each call to [`classify`] owns a fresh accumulator, so no
/// state leaks between analyses.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisAccumulator {
    pub has_color_content: bool,
    pub has_background_elements: bool,
    pub has_large_images: bool,
}

/// Classify a page's operator stream in one linear pass.
///
/// Applies exactly one rule per operator:
/// - `SetFillColor`/`SetStrokeColor`: the color is non-gray when any two of
///   its channels differ by more than `color_delta_threshold / 255`.
/// - `Rectangle`: flags a background element when the rectangle covers
///   strictly more than `background_area_percent_threshold` percent of the
///   page. A page with zero area never flags (no division by zero).
/// - `PaintImage`: flags a large image when the pixel count strictly
///   exceeds `large_image_pixel_threshold` million. Non-positive
///   dimensions never trigger.
/// - `Other`: no-op.
///
/// The checks are existence queries: operator order does not change the
/// outcome, and a set flag stays set for the rest of the pass.
pub fn classify(
    operators: &[Operator],
    geometry: &PageGeometry,
    thresholds: &ThresholdModel,
) -> AnalysisAccumulator {
    let mut acc = AnalysisAccumulator::default();

    // Normalize the 0-255 threshold once to the [0,1] color scale
    let color_delta = f64::from(thresholds.color_delta_threshold) / 255.0;
    let page_area = geometry.area();
    let max_image_pixels = thresholds.large_image_pixel_threshold * 1_000_000.0;

    for op in operators {
        match *op {
            Operator::SetFillColor { r, g, b } | Operator::SetStrokeColor { r, g, b } => {
                if is_non_gray(r, g, b, color_delta) {
                    acc.has_color_content = true;
                }
            }
            Operator::Rectangle { width, height, .. } => {
                if page_area > 0.0 {
                    let area_percent = (width * height) / page_area * 100.0;
                    if area_percent > thresholds.background_area_percent_threshold {
                        acc.has_background_elements = true;
                    }
                }
            }
            Operator::PaintImage {
                pixel_width,
                pixel_height,
            } => {
                if pixel_width > 0 && pixel_height > 0 {
                    let pixels = pixel_width.saturating_mul(pixel_height) as f64;
                    if pixels > max_image_pixels {
                        acc.has_large_images = true;
                    }
                }
            }
            Operator::Other => {}
        }
    }

    acc
}

/// A color counts as non-gray when any pairwise channel difference strictly
/// exceeds the tolerance. Pure grays (r = g = b) never qualify.
fn is_non_gray(r: f64, g: f64, b: f64, tolerance: f64) -> bool {
    (r - g).abs() > tolerance || (g - b).abs() > tolerance || (r - b).abs() > tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: PageGeometry = PageGeometry {
        width: 800.0,
        height: 600.0,
    };

    fn defaults() -> ThresholdModel {
        ThresholdModel::default()
    }

    #[test]
    fn test_empty_stream_sets_nothing() {
        let acc = classify(&[], &PAGE, &defaults());
        assert_eq!(acc, AnalysisAccumulator::default());
    }

    #[test]
    fn test_irrelevant_operators_ignored() {
        let ops = vec![Operator::Other, Operator::Other, Operator::Other];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(!acc.has_color_content);
        assert!(!acc.has_background_elements);
        assert!(!acc.has_large_images);
    }

    #[test]
    fn test_pure_red_fill_is_color() {
        // 1.0 vs 0.0 differs by far more than 30/255
        let ops = vec![Operator::SetFillColor {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(acc.has_color_content);
    }

    #[test]
    fn test_neutral_gray_fill_is_not_color() {
        let ops = vec![Operator::SetFillColor {
            r: 0.5,
            g: 0.5,
            b: 0.5,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(!acc.has_color_content);
    }

    #[test]
    fn test_near_gray_within_tolerance_is_not_color() {
        // Channel spread of 0.1 is below the default 30/255 ~= 0.1176
        let ops = vec![Operator::SetStrokeColor {
            r: 0.5,
            g: 0.55,
            b: 0.6,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(!acc.has_color_content);
    }

    #[test]
    fn test_stroke_color_also_counts() {
        let ops = vec![Operator::SetStrokeColor {
            r: 0.0,
            g: 0.0,
            b: 1.0,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(acc.has_color_content);
    }

    #[test]
    fn test_color_threshold_is_strict() {
        // With a threshold of 51, the normalized tolerance is exactly 0.2.
        // A spread of exactly 0.2 must not trigger; just above must.
        let thresholds = ThresholdModel {
            color_delta_threshold: 51,
            ..ThresholdModel::default()
        };
        let at = vec![Operator::SetFillColor {
            r: 0.2,
            g: 0.0,
            b: 0.0,
        }];
        assert!(!classify(&at, &PAGE, &thresholds).has_color_content);

        let above = vec![Operator::SetFillColor {
            r: 0.201,
            g: 0.0,
            b: 0.0,
        }];
        assert!(classify(&above, &PAGE, &thresholds).has_color_content);
    }

    #[test]
    fn test_full_page_rectangle_is_background() {
        // 600x400 on an 800x600 page is exactly 50% of the area, which the
        // strict comparison must not flag. Full coverage must.
        let exactly_half = vec![Operator::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 600.0,
            height: 400.0,
        }];
        let acc = classify(&exactly_half, &PAGE, &defaults());
        assert!(!acc.has_background_elements);

        let full_page = vec![Operator::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }];
        let acc = classify(&full_page, &PAGE, &defaults());
        assert!(acc.has_background_elements);
    }

    #[test]
    fn test_rectangle_just_above_threshold() {
        // One page-space unit above half the area
        let ops = vec![Operator::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 600.0,
            height: 400.01,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(acc.has_background_elements);
    }

    #[test]
    fn test_zero_area_page_never_flags_background() {
        let degenerate = PageGeometry {
            width: 0.0,
            height: 600.0,
        };
        let ops = vec![Operator::Rectangle {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 1000.0,
        }];
        let acc = classify(&ops, &degenerate, &defaults());
        assert!(!acc.has_background_elements);
    }

    #[test]
    fn test_image_at_exact_threshold_does_not_flag() {
        // 1000x1000 = exactly one million pixels at the default threshold
        let ops = vec![Operator::PaintImage {
            pixel_width: 1000,
            pixel_height: 1000,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(!acc.has_large_images);
    }

    #[test]
    fn test_image_one_pixel_above_threshold_flags() {
        let ops = vec![Operator::PaintImage {
            pixel_width: 1000,
            pixel_height: 1001,
        }];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(acc.has_large_images);
    }

    #[test]
    fn test_non_positive_image_dimensions_never_flag() {
        let ops = vec![
            Operator::PaintImage {
                pixel_width: 0,
                pixel_height: 5000,
            },
            Operator::PaintImage {
                pixel_width: -2000,
                pixel_height: 2000,
            },
        ];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(!acc.has_large_images);
    }

    #[test]
    fn test_flags_are_monotone_within_a_pass() {
        // A triggering operator followed by non-triggering ones of the same
        // category leaves the flag set.
        let ops = vec![
            Operator::SetFillColor {
                r: 1.0,
                g: 0.0,
                b: 0.0,
            },
            Operator::SetFillColor {
                r: 0.5,
                g: 0.5,
                b: 0.5,
            },
            Operator::Rectangle {
                x: 0.0,
                y: 0.0,
                width: 800.0,
                height: 600.0,
            },
            Operator::Rectangle {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
        ];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(acc.has_color_content);
        assert!(acc.has_background_elements);
        assert!(!acc.has_large_images);
    }

    #[test]
    fn test_independent_categories() {
        let ops = vec![
            Operator::SetFillColor {
                r: 0.3,
                g: 0.3,
                b: 0.3,
            },
            Operator::PaintImage {
                pixel_width: 4000,
                pixel_height: 3000,
            },
        ];
        let acc = classify(&ops, &PAGE, &defaults());
        assert!(!acc.has_color_content);
        assert!(!acc.has_background_elements);
        assert!(acc.has_large_images);
    }

    #[test]
    fn test_custom_image_threshold() {
        let thresholds = ThresholdModel {
            large_image_pixel_threshold: 12.0,
            ..ThresholdModel::default()
        };
        let ops = vec![Operator::PaintImage {
            pixel_width: 4000,
            pixel_height: 3000,
        }];
        // 12 million pixels exactly: strict comparison, no flag
        assert!(!classify(&ops, &PAGE, &thresholds).has_large_images);

        let ops = vec![Operator::PaintImage {
            pixel_width: 4000,
            pixel_height: 3001,
        }];
        assert!(classify(&ops, &PAGE, &thresholds).has_large_images);
    }
}
