//! Index and range selectors used to slice coordinate systems.
//!
//! Selectors follow array-slicing conventions: negative positions count back
//! from the end of the axis and an open bound means "from the first" or "to
//! the last" element.

use std::ops::{Range, RangeFrom, RangeFull, RangeTo};

use crate::error::{WcsError, WcsResult};

/// A `start:stop:step` selection along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisSlice {
    pub start: Option<isize>,
    pub stop: Option<isize>,
    pub step: Option<isize>,
}

impl AxisSlice {
    pub fn new(start: Option<isize>, stop: Option<isize>, step: Option<isize>) -> Self {
        Self { start, stop, step }
    }

    /// The whole axis.
    pub fn full() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, step: isize) -> Self {
        self.step = Some(step);
        self
    }

    /// Resolves to a contiguous `start..stop` window of an axis of `len`
    /// elements, clamped into `[0, len]`. Only unit steps are accepted.
    pub(crate) fn contiguous(&self, len: usize) -> WcsResult<Range<usize>> {
        if let Some(step) = self.step {
            if step != 1 {
                return Err(WcsError::unsupported_stride(step));
            }
        }
        let start = self.start.map_or(0, |s| clamp_to_axis(s, len));
        let stop = self.stop.map_or(len, |s| clamp_to_axis(s, len));
        Ok(start..stop.max(start))
    }

    /// Expands into the list of positions the slice visits, without clamping.
    ///
    /// Negative bounds and an open stop need `len`; without it the operation
    /// fails with [`WcsError::MissingLength`].
    pub(crate) fn positions(&self, len: Option<usize>) -> WcsResult<Vec<isize>> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(WcsError::invalid_parameter("slice step cannot be zero"));
        }

        let from_end = |pos: isize| -> WcsResult<isize> {
            if pos >= 0 {
                return Ok(pos);
            }
            len.map(|n| n as isize + pos)
                .ok_or_else(|| WcsError::missing_length("index from the end of the axis"))
        };

        let start = match self.start {
            Some(s) => from_end(s)?,
            None => 0,
        };
        let stop = match self.stop {
            Some(s) => from_end(s)?,
            None => len
                .map(|n| n as isize)
                .ok_or_else(|| WcsError::missing_length("slice to the end of the axis"))?,
        };

        let mut positions = Vec::new();
        let mut pos = start;
        while (step > 0 && pos < stop) || (step < 0 && pos > stop) {
            positions.push(pos);
            pos += step;
        }
        Ok(positions)
    }
}

/// Selects either one element or a slice of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisSelector {
    Index(isize),
    Range(AxisSlice),
}

impl AxisSelector {
    pub fn all() -> Self {
        Self::Range(AxisSlice::full())
    }

    pub fn range(start: isize, stop: isize) -> Self {
        Self::Range(AxisSlice::new(Some(start), Some(stop), None))
    }

    /// Contiguous window on an axis of `len` elements; a single index selects
    /// a window of one element.
    pub(crate) fn window(&self, len: usize) -> WcsResult<Range<usize>> {
        match self {
            Self::Index(i) => {
                let start = clamp_to_axis(*i, len);
                Ok(start..(start + 1).min(len))
            }
            Self::Range(slice) => slice.contiguous(len),
        }
    }
}

impl From<isize> for AxisSelector {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<AxisSlice> for AxisSelector {
    fn from(slice: AxisSlice) -> Self {
        Self::Range(slice)
    }
}

impl From<Range<isize>> for AxisSelector {
    fn from(range: Range<isize>) -> Self {
        Self::range(range.start, range.end)
    }
}

impl From<RangeFrom<isize>> for AxisSelector {
    fn from(range: RangeFrom<isize>) -> Self {
        Self::Range(AxisSlice::new(Some(range.start), None, None))
    }
}

impl From<RangeTo<isize>> for AxisSelector {
    fn from(range: RangeTo<isize>) -> Self {
        Self::Range(AxisSlice::new(None, Some(range.end), None))
    }
}

impl From<RangeFull> for AxisSelector {
    fn from(_: RangeFull) -> Self {
        Self::all()
    }
}

fn clamp_to_axis(pos: isize, len: usize) -> usize {
    let len = len as isize;
    let pos = if pos < 0 { len + pos } else { pos };
    pos.clamp(0, len) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous_defaults_to_whole_axis() {
        assert_eq!(AxisSlice::full().contiguous(6).unwrap(), 0..6);
    }

    #[test]
    fn test_contiguous_negative_and_clamped() {
        let slice = AxisSlice::new(Some(-3), Some(100), None);
        assert_eq!(slice.contiguous(6).unwrap(), 3..6);

        let slice = AxisSlice::new(Some(-100), Some(-1), None);
        assert_eq!(slice.contiguous(6).unwrap(), 0..5);
    }

    #[test]
    fn test_contiguous_empty_when_reversed() {
        let slice = AxisSlice::new(Some(4), Some(2), None);
        assert_eq!(slice.contiguous(6).unwrap(), 4..4);
    }

    #[test]
    fn test_contiguous_rejects_stride() {
        let err = AxisSlice::full().with_step(2).contiguous(6).unwrap_err();
        assert!(matches!(err, WcsError::UnsupportedStride { stride: 2 }));
        assert!(AxisSlice::full().with_step(1).contiguous(6).is_ok());
    }

    #[test]
    fn test_index_window() {
        assert_eq!(AxisSelector::Index(2).window(5).unwrap(), 2..3);
        assert_eq!(AxisSelector::Index(-1).window(5).unwrap(), 4..5);
        assert!(AxisSelector::Index(7).window(5).unwrap().is_empty());
    }

    #[test]
    fn test_positions_with_stride() {
        let slice = AxisSlice::new(Some(1), Some(8), Some(3));
        assert_eq!(slice.positions(None).unwrap(), vec![1, 4, 7]);
    }

    #[test]
    fn test_positions_not_clamped() {
        let slice = AxisSlice::new(Some(8), Some(12), None);
        assert_eq!(slice.positions(Some(10)).unwrap(), vec![8, 9, 10, 11]);
    }

    #[test]
    fn test_positions_negative_step() {
        let slice = AxisSlice::new(Some(5), Some(1), Some(-2));
        assert_eq!(slice.positions(None).unwrap(), vec![5, 3]);
    }

    #[test]
    fn test_positions_need_length() {
        let open = AxisSlice::new(Some(2), None, None);
        assert!(matches!(
            open.positions(None).unwrap_err(),
            WcsError::MissingLength { .. }
        ));
        assert_eq!(open.positions(Some(5)).unwrap(), vec![2, 3, 4]);

        let negative = AxisSlice::new(Some(-3), Some(10), None);
        assert!(negative.positions(None).is_err());
        assert_eq!(negative.positions(Some(10)).unwrap(), vec![7, 8, 9]);
    }

    #[test]
    fn test_positions_zero_step() {
        let slice = AxisSlice::new(Some(0), Some(4), Some(0));
        assert!(matches!(
            slice.positions(Some(4)).unwrap_err(),
            WcsError::InvalidParameter { .. }
        ));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(AxisSelector::from(3isize), AxisSelector::Index(3));
        assert_eq!(AxisSelector::from(1isize..4), AxisSelector::range(1, 4));
        assert_eq!(AxisSelector::from(..), AxisSelector::all());
        assert_eq!(
            AxisSelector::from(2isize..),
            AxisSelector::Range(AxisSlice::new(Some(2), None, None))
        );
    }
}
