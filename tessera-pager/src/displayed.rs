//! The displayed page sequence.
//!
//! In infinite mode the sequence handed to the rendering layer is the page
//! collection surrounded by duplicated edge pages. Every entry remembers
//! which part of the sequence it belongs to, so duplicates of the same element
//! still get distinct, stable keys.

use std::hash::Hash;

use crate::index::IndexMapper;

/// Part of the displayed sequence a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BatchGroup {
    /// Copy of one of the first pages, appended after the main pages.
    Prefix,
    /// A page of the collection itself.
    Main,
    /// Copy of one of the last pages, inserted before the main pages.
    Suffix,
}

/// Identity of a displayed page, unique within the displayed sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey<Id> {
    /// Part of the sequence the page belongs to.
    pub group: BatchGroup,
    /// Identifier of the wrapped element.
    pub id: Id,
}

/// A page of the displayed sequence.
#[derive(Debug, PartialEq)]
pub struct PageWrapper<'a, T, Id> {
    /// Part of the sequence the page belongs to.
    pub group: BatchGroup,
    /// The wrapped element.
    pub element: &'a T,
    /// Identifier of the wrapped element.
    pub id: Id,
}

impl<T, Id: Clone> PageWrapper<'_, T, Id> {
    /// Rendering key of this page.
    pub fn key(&self) -> PageKey<Id> {
        PageKey {
            group: self.group,
            id: self.id.clone(),
        }
    }
}

impl<T, Id: Clone> Clone for PageWrapper<'_, T, Id> {
    fn clone(&self) -> Self {
        Self {
            group: self.group,
            element: self.element,
            id: self.id.clone(),
        }
    }
}

/// Builds the displayed sequence for `data`.
///
/// When `mapper` is infinite the result is `[suffix padding] + [main] +
/// [prefix padding]`, where each padding holds `mapper.effective_padding()`
/// pages; otherwise every page is [`BatchGroup::Main`].
pub fn displayed_pages<'a, T, Id>(
    data: &'a [T],
    id_of: impl Fn(&T) -> Id,
    mapper: &IndexMapper,
) -> Vec<PageWrapper<'a, T, Id>>
where
    Id: Clone + Eq + Hash,
{
    let id_of = &id_of;
    let wrap = move |group: BatchGroup, element: &'a T| PageWrapper {
        group,
        element,
        id: id_of(element),
    };

    let padding = mapper.effective_padding().min(data.len());
    let mut pages = Vec::with_capacity(mapper.displayed_len());
    if padding > 0 {
        let suffix_start = data.len() - padding;
        pages.extend(
            data[suffix_start..]
                .iter()
                .map(|element| wrap(BatchGroup::Suffix, element)),
        );
    }
    pages.extend(data.iter().map(|element| wrap(BatchGroup::Main, element)));
    if padding > 0 {
        pages.extend(
            data[..padding]
                .iter()
                .map(|element| wrap(BatchGroup::Prefix, element)),
        );
    }
    pages
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn letters(count: usize) -> Vec<char> {
        ('a'..='z').take(count).collect()
    }

    #[test]
    fn test_finite_sequence_is_one_to_one() {
        let data = letters(4);
        let mapper = IndexMapper::new(data.len(), 2, false);
        let pages = displayed_pages(&data, |c| *c, &mapper);
        assert_eq!(pages.len(), 4);
        assert!(pages.iter().all(|page| page.group == BatchGroup::Main));
        let elements: Vec<char> = pages.iter().map(|page| *page.element).collect();
        assert_eq!(elements, data);
    }

    #[test]
    fn test_infinite_sequence_layout() {
        let data = letters(5);
        let mapper = IndexMapper::new(data.len(), 2, true);
        let pages = displayed_pages(&data, |c| *c, &mapper);
        let elements: String = pages.iter().map(|page| *page.element).collect();
        assert_eq!(elements, "deabcdeab");
        assert_eq!(pages[0].group, BatchGroup::Suffix);
        assert_eq!(pages[2].group, BatchGroup::Main);
        assert_eq!(pages[8].group, BatchGroup::Prefix);
    }

    #[test]
    fn test_displayed_length_invariant() {
        for count in 0..8 {
            for padding in 0..10 {
                let data = letters(count);
                let mapper = IndexMapper::new(count, padding, true);
                let pages = displayed_pages(&data, |c| *c, &mapper);
                assert_eq!(pages.len(), count + 2 * padding.min(count));
                assert_eq!(pages.len(), mapper.displayed_len());

                let finite = IndexMapper::new(count, padding, false);
                assert_eq!(displayed_pages(&data, |c| *c, &finite).len(), count);
            }
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let data = letters(3);
        let mapper = IndexMapper::new(data.len(), 3, true);
        let pages = displayed_pages(&data, |c| *c, &mapper);
        let keys: HashSet<_> = pages.iter().map(PageWrapper::key).collect();
        assert_eq!(keys.len(), pages.len());
    }

    #[test]
    fn test_displayed_page_matches_real_index() {
        let data = letters(6);
        let mapper = IndexMapper::new(data.len(), 2, true);
        let pages = displayed_pages(&data, |c| *c, &mapper);
        for (internal, page) in pages.iter().enumerate() {
            assert_eq!(*page.element, data[mapper.to_real(internal)]);
        }
    }
}
