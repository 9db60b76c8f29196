//! Page geometry and the visual offset of the page strip.
//!
//! Pages are laid out in a single strip along the primary axis. The strip is
//! centered in the container, so the offset that brings page `i` into focus
//! is
//!
//! ```text
//! (displayed / 2 - i) * page_distance - page_distance / 2
//!     + drag_offset + alignment_offset
//! ```
//!
//! clamped to the bounce bounds of the first and last page.

use crate::{
    geometry::Size,
    settings::{Alignment, PagerSettings},
};

/// Bounds the strip offset may not cross.
///
/// `leading` is the largest allowed offset (first page pulled towards the
/// trailing edge), `trailing` the smallest one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetBounds {
    /// Largest allowed offset.
    pub leading: f32,
    /// Smallest allowed offset.
    pub trailing: f32,
}

impl OffsetBounds {
    /// Clamps `offset` into the bounds. The trailing bound wins if the bounds
    /// cross.
    pub fn clamp(self, offset: f32) -> f32 {
        offset.min(self.leading).max(self.trailing)
    }
}

/// Computes page sizes and strip offsets for a container.
#[derive(Debug, Clone, Copy)]
pub struct OffsetCalculator<'a> {
    settings: &'a PagerSettings,
    container: Size,
}

impl<'a> OffsetCalculator<'a> {
    /// Creates a calculator for `container` under `settings`.
    pub fn new(settings: &'a PagerSettings, container: Size) -> Self {
        Self {
            settings,
            container,
        }
    }

    /// Extent of the container along the primary axis.
    pub fn container_main(&self) -> f32 {
        self.settings.axis.main(self.container)
    }

    /// Height the pager asks for, when it can be derived from the settings.
    pub fn pager_height(&self) -> Option<f32> {
        if let Some(height) = self.settings.container_height {
            return Some(height);
        }
        let height = self.settings.preferred_item_height?;
        Some(match self.settings.item_vertical_insets {
            Some(insets) => height + insets * 2.0,
            None => height,
        })
    }

    /// Size of every page.
    ///
    /// Preferred sizes are capped by the container; otherwise the page fills
    /// the container minus the insets. An aspect ratio above 1 divides the
    /// height, and the width is always scaled by the ratio.
    pub fn page_size(&self) -> Size {
        if self.container.is_empty() {
            return Size::ZERO;
        }

        let settings = self.settings;
        let container_height = self.pager_height().unwrap_or(self.container.height);

        let mut height = match settings.preferred_item_height {
            Some(preferred) => preferred.min(container_height),
            None => container_height - 2.0 * settings.item_vertical_insets.unwrap_or(0.0),
        };
        let width = match settings.preferred_item_width {
            Some(preferred) => preferred.min(self.container.width),
            None => {
                self.container.width - 2.0 * settings.item_horizontal_insets.unwrap_or(0.0)
            }
        };

        let Some(aspect_ratio) = settings.item_aspect_ratio else {
            return Size::new(width.max(0.0), height.max(0.0));
        };
        if aspect_ratio > 1.0 {
            height /= aspect_ratio;
        }
        Size::new((width * aspect_ratio).max(0.0), height.max(0.0))
    }

    /// Spacing between two pages, widened when unfocused pages shrink.
    pub fn interactive_item_spacing(&self) -> f32 {
        let page_main = self.settings.axis.main(self.page_size());
        self.settings.interitem_spacing - page_main * self.settings.scale_increment() / 2.0
    }

    /// Distance between the origins of two neighbouring pages.
    ///
    /// Zero when the container has no size yet.
    pub fn page_distance(&self) -> f32 {
        if self.container.is_empty() {
            return 0.0;
        }
        let page_main = self.settings.axis.main(self.page_size());
        (page_main + self.interactive_item_spacing()).max(0.0)
    }

    /// Shift applied by the alignment to the page at `internal`.
    pub fn alignment_offset(&self, internal: usize, displayed: usize) -> f32 {
        let page_main = self.settings.axis.main(self.page_size());
        let free_space = (self.container_main() - page_main) / 2.0;
        let is_first = internal == 0;
        let is_last = internal + 1 == displayed;

        match self.settings.alignment {
            Alignment::End(insets) => free_space - insets,
            Alignment::Justified(insets) if is_last => free_space - insets,
            Alignment::Start(insets) => -free_space + insets,
            Alignment::Justified(insets) if is_first => -free_space + insets,
            Alignment::Center | Alignment::Justified(_) => 0.0,
        }
    }

    /// Bounds of the strip offset while the page at `internal` is focused.
    ///
    /// Only the first and last pages of a finite pager are bounded; they may
    /// be overscrolled by a quarter page when bounces are enabled. Every other
    /// case gets bounds far outside the visible range.
    pub fn bounds(&self, internal: usize, displayed: usize) -> OffsetBounds {
        let distance = self.page_distance();
        let alignment = self.alignment_offset(internal, displayed);
        let unbounded = displayed as f32 * self.container_main();
        let bounce = if self.settings.bounces {
            distance / 4.0
        } else {
            distance / 2.0
        };
        let half_pages = displayed as f32 / 2.0;
        let is_finite = !self.settings.is_infinite_pager;

        let leading = if is_finite && internal == 0 {
            half_pages * distance - bounce + alignment
        } else {
            unbounded
        };
        let trailing = if is_finite && internal + 1 == displayed {
            -half_pages * distance + bounce + alignment
        } else {
            -unbounded
        };

        OffsetBounds { leading, trailing }
    }

    /// Offset of the page strip that focuses `internal`, displaced by
    /// `drag_offset`.
    ///
    /// Returns zero when nothing is laid out yet.
    pub fn visual_offset(
        &self,
        internal: Option<usize>,
        displayed: usize,
        drag_offset: f32,
    ) -> f32 {
        let Some(internal) = internal else {
            return 0.0;
        };
        let distance = self.page_distance();
        if displayed == 0 || distance <= f32::EPSILON {
            return 0.0;
        }

        let half_pages = displayed as f32 / 2.0;
        let offset = (half_pages - internal as f32) * distance - distance / 2.0
            + drag_offset
            + self.alignment_offset(internal, displayed);
        self.bounds(internal, displayed).clamp(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_page_fills_container_minus_insets() {
        let settings = PagerSettings::default()
            .item_horizontal_insets(20.0)
            .item_vertical_insets(10.0);
        let calculator = OffsetCalculator::new(&settings, Size::new(400.0, 300.0));
        assert_eq!(calculator.page_size(), Size::new(360.0, 280.0));
    }

    #[test]
    fn test_preferred_size_is_capped_by_container() {
        let settings = PagerSettings::default()
            .preferred_item_width(500.0)
            .preferred_item_height(120.0);
        let calculator = OffsetCalculator::new(&settings, Size::new(400.0, 300.0));
        assert_eq!(calculator.page_size(), Size::new(400.0, 120.0));
        assert_eq!(calculator.pager_height(), Some(120.0));
    }

    #[test]
    fn test_aspect_ratio() {
        let settings = PagerSettings::default()
            .preferred_item_width(100.0)
            .item_aspect_ratio(2.0);
        let calculator = OffsetCalculator::new(&settings, Size::new(400.0, 300.0));
        assert_eq!(calculator.page_size(), Size::new(200.0, 150.0));

        let settings = PagerSettings::default()
            .preferred_item_width(100.0)
            .item_aspect_ratio(0.5);
        let calculator = OffsetCalculator::new(&settings, Size::new(400.0, 300.0));
        assert_eq!(calculator.page_size(), Size::new(50.0, 300.0));
    }

    #[test]
    fn test_zero_container_is_neutral() {
        let settings = PagerSettings::default().interitem_spacing(10.0);
        let calculator = OffsetCalculator::new(&settings, Size::ZERO);
        assert_eq!(calculator.page_size(), Size::ZERO);
        assert_eq!(calculator.page_distance(), 0.0);
        assert_eq!(calculator.visual_offset(Some(2), 5, -40.0), 0.0);
    }

    #[test]
    fn test_page_distance_includes_interactive_spacing() {
        let settings = PagerSettings::default()
            .preferred_item_width(200.0)
            .interitem_spacing(10.0)
            .interactive_scale(0.8);
        let calculator = OffsetCalculator::new(&settings, Size::new(400.0, 300.0));
        // 10 - 200 * 0.2 / 2
        assert_close(calculator.interactive_item_spacing(), -10.0);
        assert_close(calculator.page_distance(), 190.0);
    }

    #[test]
    fn test_visual_offset_centers_focused_page() {
        let settings = PagerSettings::default();
        let calculator = OffsetCalculator::new(&settings, Size::new(300.0, 200.0));
        // Five pages of 300: the strip is 1500 wide and centered.
        assert_close(calculator.visual_offset(Some(2), 5, 0.0), 0.0);
        assert_close(calculator.visual_offset(Some(1), 5, 0.0), 300.0);
        assert_close(calculator.visual_offset(Some(3), 5, -50.0), -350.0);
        assert_eq!(calculator.visual_offset(None, 5, 0.0), 0.0);
    }

    #[test]
    fn test_first_page_bounces_by_a_quarter_page() {
        let settings = PagerSettings::default();
        let calculator = OffsetCalculator::new(&settings, Size::new(300.0, 200.0));
        let rest = calculator.visual_offset(Some(0), 5, 0.0);
        assert_close(rest, 600.0);
        assert_close(calculator.visual_offset(Some(0), 5, 200.0), rest + 75.0);

        let settings = PagerSettings::default().bounces(false);
        let calculator = OffsetCalculator::new(&settings, Size::new(300.0, 200.0));
        assert_close(calculator.visual_offset(Some(0), 5, 200.0), rest);
    }

    #[test]
    fn test_last_page_bounces_by_a_quarter_page() {
        let settings = PagerSettings::default();
        let calculator = OffsetCalculator::new(&settings, Size::new(300.0, 200.0));
        let rest = calculator.visual_offset(Some(4), 5, 0.0);
        assert_close(rest, -600.0);
        assert_close(calculator.visual_offset(Some(4), 5, -200.0), rest - 75.0);
    }

    #[test]
    fn test_infinite_pager_is_unbounded() {
        let settings = PagerSettings::default().is_infinite_pager(true);
        let calculator = OffsetCalculator::new(&settings, Size::new(300.0, 200.0));
        let rest = calculator.visual_offset(Some(0), 9, 0.0);
        assert_close(calculator.visual_offset(Some(0), 9, 200.0), rest + 200.0);
    }

    #[test]
    fn test_alignment_offsets() {
        let container = Size::new(400.0, 200.0);
        let base = PagerSettings::default().preferred_item_width(300.0);

        let start = base.clone().alignment(Alignment::Start(10.0));
        let calculator = OffsetCalculator::new(&start, container);
        assert_close(calculator.alignment_offset(2, 5), -40.0);

        let end = base.clone().alignment(Alignment::End(10.0));
        let calculator = OffsetCalculator::new(&end, container);
        assert_close(calculator.alignment_offset(2, 5), 40.0);

        let justified = base.clone().alignment(Alignment::Justified(10.0));
        let calculator = OffsetCalculator::new(&justified, container);
        assert_close(calculator.alignment_offset(0, 5), -40.0);
        assert_close(calculator.alignment_offset(2, 5), 0.0);
        assert_close(calculator.alignment_offset(4, 5), 40.0);

        let calculator = OffsetCalculator::new(&base, container);
        assert_close(calculator.alignment_offset(0, 5), 0.0);
    }
}
