//! Sub-sequence Layout

use std::ops::Range;

/// Handle to a registered sub-sequence. 1-D and 2-D handles are numbered
/// independently, densely from zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubSequenceId(pub(crate) usize);

impl SubSequenceId {
    /// Returns the dense index of the handle.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Size and offset of a registered sub-sequence within the flat sample
/// buffers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SubSequence {
    /// Offset of the first value.
    pub offset: usize,

    /// Number of values.
    pub size: usize,
}

impl SubSequence {
    /// Returns the index range covered in the flat buffer.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.size
    }
}

/// Append-only table of registered 1-D and 2-D sub-sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubSequenceLayout {
    sequences_1d: Vec<SubSequence>,
    sequences_2d: Vec<SubSequence>,
}

impl SubSequenceLayout {
    /// Register a 1-D sub-sequence and return its handle.
    ///
    /// * `size` - Number of values.
    pub fn add_1d(&mut self, size: usize) -> SubSequenceId {
        Self::push(&mut self.sequences_1d, size)
    }

    /// Register a 2-D sub-sequence and return its handle.
    ///
    /// * `size` - Number of values.
    pub fn add_2d(&mut self, size: usize) -> SubSequenceId {
        Self::push(&mut self.sequences_2d, size)
    }

    fn push(sequences: &mut Vec<SubSequence>, size: usize) -> SubSequenceId {
        let offset = sequences.last().map_or(0, |s| s.offset + s.size);
        sequences.push(SubSequence { offset, size });
        SubSequenceId(sequences.len() - 1)
    }

    /// Returns the registered 1-D sub-sequences in handle order.
    pub fn sequences_1d(&self) -> &[SubSequence] {
        &self.sequences_1d
    }

    /// Returns the registered 2-D sub-sequences in handle order.
    pub fn sequences_2d(&self) -> &[SubSequence] {
        &self.sequences_2d
    }

    /// Returns the total number of 1-D values.
    pub fn total_size_1d(&self) -> usize {
        self.sequences_1d.last().map_or(0, |s| s.offset + s.size)
    }

    /// Returns the total number of 2-D values.
    pub fn total_size_2d(&self) -> usize {
        self.sequences_2d.last().map_or(0, |s| s.offset + s.size)
    }

    /// Returns the buffer range of a 1-D sub-sequence.
    ///
    /// * `id` - The handle.
    pub fn range_1d(&self, id: SubSequenceId) -> Range<usize> {
        self.sequences_1d[id.0].range()
    }

    /// Returns the buffer range of a 2-D sub-sequence.
    ///
    /// * `id` - The handle.
    pub fn range_2d(&self, id: SubSequenceId) -> Range<usize> {
        self.sequences_2d[id.0].range()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offsets_are_prefix_sums(
            requests in prop::collection::vec((any::<bool>(), 1..64usize), 0..32)
        ) {
            let mut layout = SubSequenceLayout::default();
            let mut sizes_1d = vec![];
            let mut sizes_2d = vec![];
            for &(is_2d, size) in requests.iter() {
                if is_2d {
                    let id = layout.add_2d(size);
                    prop_assert_eq!(id.index(), sizes_2d.len());
                    sizes_2d.push(size);
                } else {
                    let id = layout.add_1d(size);
                    prop_assert_eq!(id.index(), sizes_1d.len());
                    sizes_1d.push(size);
                }
            }

            let mut offset = 0;
            for (s, &size) in layout.sequences_1d().iter().zip(sizes_1d.iter()) {
                prop_assert_eq!(s.offset, offset);
                prop_assert_eq!(s.size, size);
                offset += size;
            }
            prop_assert_eq!(layout.total_size_1d(), offset);

            let mut offset = 0;
            for (s, &size) in layout.sequences_2d().iter().zip(sizes_2d.iter()) {
                prop_assert_eq!(s.offset, offset);
                offset += size;
            }
            prop_assert_eq!(layout.total_size_2d(), offset);
        }
    }
}
