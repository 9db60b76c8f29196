//! Conversion between real and internal page indices.
//!
//! The *real* index is the logical page the application observes, in
//! `0..count`. The *internal* index addresses the displayed sequence, which in
//! infinite mode is padded on both sides with duplicated edge pages:
//!
//! ```text
//! count = 5, padding = 2
//!
//! internal  0  1 | 2  3  4  5  6 | 7  8
//! real      3  4 | 0  1  2  3  4 | 0  1
//!           ^^^^   main pages      ^^^^
//!           suffix padding         prefix padding
//! ```
//!
//! Without infinite mode both index spaces are the same.

/// Maps indices between the real and the internal (padded) index spaces.
///
/// # Examples
///
/// ```
/// use tessera_pager::index::IndexMapper;
///
/// let mapper = IndexMapper::new(5, 2, true);
/// assert_eq!(mapper.displayed_len(), 9);
/// assert_eq!(mapper.to_real(0), 3);
/// assert_eq!(mapper.to_real(7), 0);
/// assert_eq!(mapper.to_internal(1, None), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexMapper {
    count: usize,
    padding: usize,
    is_infinite: bool,
}

impl IndexMapper {
    /// Creates a mapper for `count` real pages.
    ///
    /// `padding` is the configured looping padding; it is capped at `count`.
    pub fn new(count: usize, padding: usize, is_infinite: bool) -> Self {
        Self {
            count,
            padding,
            is_infinite,
        }
    }

    /// Number of real pages.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the displayed sequence is padded for looping.
    pub fn is_infinite(&self) -> bool {
        self.is_infinite
    }

    /// Padding actually applied on each side: `min(padding, count)`, or zero
    /// when not looping.
    pub fn effective_padding(&self) -> usize {
        if self.is_infinite {
            self.padding.min(self.count)
        } else {
            0
        }
    }

    /// Length of the displayed sequence: `count + 2 * effective_padding`.
    pub fn displayed_len(&self) -> usize {
        self.count + 2 * self.effective_padding()
    }

    /// Internal index of the last real page.
    ///
    /// `None` when there are no pages.
    pub fn trailing_edge(&self) -> Option<usize> {
        (self.count + self.effective_padding()).checked_sub(1)
    }

    /// Whether `internal` addresses a duplicated padding page.
    pub fn is_in_padding(&self, internal: usize) -> bool {
        let offset = self.effective_padding();
        self.is_infinite && (internal < offset || internal >= self.count + offset)
    }

    /// Converts an internal index to the real page it displays.
    ///
    /// Inputs within `0..displayed_len()` map into `0..count`.
    pub fn to_real(&self, internal: usize) -> usize {
        if !self.is_infinite {
            return internal;
        }

        let offset = self.effective_padding();
        if internal < offset {
            self.count - (offset - internal)
        } else if internal >= self.count + offset {
            internal - self.count - offset
        } else {
            internal - offset
        }
    }

    /// Converts a real index to the internal index to display.
    ///
    /// When the selection wraps between the last and the first real page,
    /// the padded duplicate next to `previous` is returned instead of the
    /// canonical index, so the transition moves by a single page.
    pub fn to_internal(&self, real: usize, previous: Option<usize>) -> usize {
        if !self.is_infinite {
            return real;
        }

        let offset = self.effective_padding();
        let candidate = real + offset;
        let (Some(previous), Some(trailing_edge)) = (previous, self.trailing_edge()) else {
            return candidate;
        };

        if offset == 0 {
            return candidate;
        }

        if candidate == offset && previous == trailing_edge {
            trailing_edge + 1
        } else if candidate == trailing_edge && previous == offset {
            offset - 1
        } else {
            candidate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_not_infinite() {
        let mapper = IndexMapper::new(5, 2, false);
        assert_eq!(mapper.displayed_len(), 5);
        assert_eq!(mapper.effective_padding(), 0);
        for index in 0..5 {
            assert_eq!(mapper.to_real(index), index);
            assert_eq!(mapper.to_internal(index, Some(4)), index);
            assert!(!mapper.is_in_padding(index));
        }
    }

    #[test]
    fn test_to_real_boundaries() {
        let mapper = IndexMapper::new(5, 2, true);
        assert_eq!(mapper.to_real(0), 3);
        assert_eq!(mapper.to_real(1), 4);
        assert_eq!(mapper.to_real(2), 0);
        assert_eq!(mapper.to_real(6), 4);
        assert_eq!(mapper.to_real(7), 0);
        assert_eq!(mapper.to_real(8), 1);
    }

    #[test]
    fn test_to_internal_wraps_forward_from_last_page() {
        let mapper = IndexMapper::new(5, 2, true);
        assert_eq!(mapper.trailing_edge(), Some(6));
        assert_eq!(mapper.to_internal(0, Some(6)), 7);
        assert_eq!(mapper.to_real(7), 0);
    }

    #[test]
    fn test_to_internal_wraps_backward_from_first_page() {
        let mapper = IndexMapper::new(5, 2, true);
        assert_eq!(mapper.to_internal(4, Some(2)), 1);
        assert_eq!(mapper.to_real(1), 4);
    }

    #[test]
    fn test_to_internal_without_wrap() {
        let mapper = IndexMapper::new(5, 2, true);
        assert_eq!(mapper.to_internal(0, None), 2);
        assert_eq!(mapper.to_internal(4, None), 6);
        assert_eq!(mapper.to_internal(3, Some(2)), 5);
        assert_eq!(mapper.to_internal(0, Some(5)), 2);
    }

    #[test]
    fn test_padding_is_capped_by_count() {
        let mapper = IndexMapper::new(2, 5, true);
        assert_eq!(mapper.effective_padding(), 2);
        assert_eq!(mapper.displayed_len(), 6);
        assert_eq!(mapper.to_internal(0, None), 2);
        assert_eq!(mapper.to_real(mapper.to_internal(1, None)), 1);
    }

    #[test]
    fn test_padding_region() {
        let mapper = IndexMapper::new(5, 2, true);
        let padded: Vec<_> = (0..9).filter(|&i| mapper.is_in_padding(i)).collect();
        assert_eq!(padded, vec![0, 1, 7, 8]);
    }

    #[test]
    fn test_zero_padding_never_wraps_below_zero() {
        let mapper = IndexMapper::new(3, 0, true);
        assert_eq!(mapper.displayed_len(), 3);
        assert_eq!(mapper.to_internal(2, Some(0)), 2);
        assert_eq!(mapper.to_internal(0, Some(2)), 0);
    }

    #[test]
    fn test_empty_collection() {
        let mapper = IndexMapper::new(0, 2, true);
        assert_eq!(mapper.displayed_len(), 0);
        assert_eq!(mapper.trailing_edge(), None);
        assert_eq!(mapper.to_internal(0, Some(0)), 0);
    }
}
