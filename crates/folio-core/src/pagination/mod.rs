//! Horizontal pagination of a rendered chapter
//!
//! A chapter is rendered by the host as one wide content strip laid out in
//! columns. The strip is padded by the margin on its outer edges and adjacent
//! columns sit `margin + gap` apart, so turning a page slides the strip left by
//! `page_width + margin + gap`. With a zero margin this is a plain
//! `page_width + gap` stride.

mod paginator;

pub use paginator::{PageChangeHandler, Paginator};

use crate::error::{ReaderError, Result};
use serde::{Deserialize, Serialize};

/// Physical extents reported by the host for one rendered chapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMeasurements {
    /// Visible width of the reading container
    pub container_width: f64,

    /// Visible height of the reading container (unused by horizontal pagination)
    pub container_height: f64,

    /// Full scrollable width of the content strip
    pub content_scroll_width: f64,
}

/// Layout inputs that turn raw measurements into a page count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub margin: f64,
    pub gap: f64,
}

impl PaginationConfig {
    /// Both values must be finite and non-negative
    pub fn new(margin: f64, gap: f64) -> Result<Self> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(ReaderError::InvalidSetting { field: "margin", value: margin });
        }
        if !gap.is_finite() || gap < 0.0 {
            return Err(ReaderError::InvalidSetting { field: "gap", value: gap });
        }
        Ok(Self { margin, gap })
    }
}

/// A surface the paginator can measure and slide
pub trait PageSurface {
    /// Current extents of the rendered content
    fn measure(&self) -> LayoutMeasurements;

    /// Translate the content strip along the pagination axis
    fn set_offset(&mut self, offset: f64);
}

/// Where to land when a chapter is (re)opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageTarget {
    #[default]
    Start,
    End,
    /// Clamped into range once the chapter is measured
    Page(i64),
}

/// Snapshot of the position inside the current chapter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: usize,
    pub total_pages: usize,
    pub progress: f64,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl PageState {
    pub(crate) fn new(current_page: usize, total_pages: usize) -> Self {
        let progress = if total_pages > 1 {
            current_page as f64 / (total_pages - 1) as f64
        } else {
            1.0
        };

        Self {
            current_page,
            total_pages,
            progress,
            is_first_page: current_page == 0,
            is_last_page: current_page + 1 >= total_pages,
        }
    }
}

/// Page geometry derived from one set of measurements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    /// Container width minus both margins
    pub page_width: f64,

    /// Scroll distance between the starts of consecutive pages
    pub stride: f64,

    /// Always at least one
    pub total_pages: usize,
}

impl PageLayout {
    /// Compute geometry, failing fast when no usable page width remains
    pub fn compute(measurements: &LayoutMeasurements, config: &PaginationConfig) -> Result<Self> {
        let container_width = measurements.container_width;
        let page_width = container_width - 2.0 * config.margin;
        // also rejects NaN
        if !(page_width > 0.0) {
            return Err(ReaderError::NonPositivePageWidth {
                container_width,
                margin: config.margin,
            });
        }

        let stride = page_width + config.margin + config.gap;
        let scroll_width = measurements.content_scroll_width;

        let total_pages = if scroll_width > page_width {
            let extra = ((scroll_width - container_width) / stride).ceil().max(0.0);
            (extra as usize).saturating_add(1)
        } else {
            1
        };

        Ok(Self {
            page_width,
            stride,
            total_pages,
        })
    }

    pub fn last_page(&self) -> usize {
        self.total_pages - 1
    }

    /// Clamp a signed page request into range
    pub fn clamp_page(&self, page: i64) -> usize {
        if page <= 0 {
            0
        } else {
            (page as u64).min(self.last_page() as u64) as usize
        }
    }

    pub fn resolve(&self, target: PageTarget) -> usize {
        match target {
            PageTarget::Start => 0,
            PageTarget::End => self.last_page(),
            PageTarget::Page(page) => self.clamp_page(page),
        }
    }

    /// Translation that brings `page` into view
    pub fn offset_for(&self, page: usize) -> f64 {
        -(page as f64 * self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(container_width: f64, content_scroll_width: f64) -> LayoutMeasurements {
        LayoutMeasurements {
            container_width,
            container_height: 600.0,
            content_scroll_width,
        }
    }

    fn config(margin: f64, gap: f64) -> PaginationConfig {
        PaginationConfig::new(margin, gap).unwrap()
    }

    #[test]
    fn test_four_page_chapter() {
        let layout = PageLayout::compute(&measurements(400.0, 1600.0), &config(20.0, 20.0)).unwrap();
        assert_eq!(layout.page_width, 360.0);
        assert_eq!(layout.total_pages, 4);
        assert_eq!(layout.offset_for(2), -800.0);
    }

    #[test]
    fn test_no_overflow_is_one_page() {
        let cfg = config(20.0, 20.0);
        for scroll in [0.0, 100.0, 360.0, 380.0, 400.0] {
            let layout = PageLayout::compute(&measurements(400.0, scroll), &cfg).unwrap();
            assert_eq!(layout.total_pages, 1, "scroll width {scroll}");
        }
    }

    #[test]
    fn test_zero_margin_uses_page_width_plus_gap() {
        // (1600 - 400) / 420 -> 3 more pages after the first
        let layout = PageLayout::compute(&measurements(400.0, 1600.0), &config(0.0, 20.0)).unwrap();
        assert_eq!(layout.stride, 420.0);
        assert_eq!(layout.total_pages, 4);

        let layout = PageLayout::compute(&measurements(400.0, 1700.0), &config(0.0, 0.0)).unwrap();
        assert_eq!(layout.total_pages, 5);
    }

    #[test]
    fn test_page_count_never_below_one() {
        let cfg = config(10.0, 5.0);
        for container in [25.0, 100.0, 640.0] {
            for scroll in [0.0, 1.0, 99.0, 1_000.0, 123_456.0] {
                let layout = PageLayout::compute(&measurements(container, scroll), &cfg).unwrap();
                assert!(layout.total_pages >= 1);
            }
        }
    }

    #[test]
    fn test_non_positive_page_width_fails() {
        let err = PageLayout::compute(&measurements(40.0, 1000.0), &config(20.0, 0.0)).unwrap_err();
        assert!(matches!(err, ReaderError::NonPositivePageWidth { .. }));

        let err = PageLayout::compute(&measurements(f64::NAN, 1000.0), &config(0.0, 0.0)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(PaginationConfig::new(-1.0, 0.0).is_err());
        assert!(PaginationConfig::new(0.0, f64::INFINITY).is_err());
        assert!(PaginationConfig::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_resolve_targets() {
        let layout = PageLayout::compute(&measurements(400.0, 1600.0), &config(20.0, 20.0)).unwrap();
        assert_eq!(layout.resolve(PageTarget::Start), 0);
        assert_eq!(layout.resolve(PageTarget::End), 3);
        assert_eq!(layout.resolve(PageTarget::Page(-5)), 0);
        assert_eq!(layout.resolve(PageTarget::Page(2)), 2);
        assert_eq!(layout.resolve(PageTarget::Page(i64::MAX)), 3);
    }

    #[test]
    fn test_page_state_progress() {
        let state = PageState::new(0, 1);
        assert_eq!(state.progress, 1.0);
        assert!(state.is_first_page && state.is_last_page);

        let state = PageState::new(2, 4);
        assert!((state.progress - 2.0 / 3.0).abs() < 1e-12);
        assert!(!state.is_first_page && !state.is_last_page);
    }
}
