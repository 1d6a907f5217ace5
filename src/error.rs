// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

/// An error produced by subset reads and subset assignment.
///
/// Every error is detected before the output array is written to, so a
/// failed call never leaves a partially assigned result behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The rank-aligned value can not be broadcast onto the selected subset.
    ShapeMismatch {
        /// Axis of the subset where the sizes conflict.
        axis: usize,
        /// Length of the value along that axis.
        value: usize,
        /// Length of the subset along that axis.
        subset: usize,
    },
    /// A resolved index or range bound lies outside its axis.
    IndexOutOfRange {
        axis: usize,
        /// The offending index or bound, as given by the caller.
        index: isize,
        len: usize,
    },
    /// The value could not be converted to the element type of the target.
    UnsupportedElementType {
        from: &'static str,
        to: &'static str,
    },
    /// The indexer or the value has the wrong number of axes.
    RankMismatch { expected: usize, found: usize },
    /// An explicit index set was handed to the strided slice builder.
    Irregular { axis: usize },
    /// A range selector with a step of zero.
    ZeroStep { axis: usize },
}

/// Error code for an `AssignError`.
///
/// This enumeration is not exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// value shape is not broadcastable onto the subset
    ShapeMismatch,
    /// index or bound outside of its axis
    IndexOutOfRange,
    /// element type conversion failed
    UnsupportedElementType,
    /// wrong number of axes
    RankMismatch,
    /// index set where a strided selector is required
    Irregular,
    /// range with zero step
    ZeroStep,
}

impl AssignError {
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            AssignError::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            AssignError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            AssignError::UnsupportedElementType { .. } => ErrorKind::UnsupportedElementType,
            AssignError::RankMismatch { .. } => ErrorKind::RankMismatch,
            AssignError::Irregular { .. } => ErrorKind::Irregular,
            AssignError::ZeroStep { .. } => ErrorKind::ZeroStep,
        }
    }
}

impl ErrorKind {
    fn description(self) -> &'static str {
        match self {
            ErrorKind::ShapeMismatch => "incompatible shapes",
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::UnsupportedElementType => "unsupported element type",
            ErrorKind::RankMismatch => "incompatible number of axes",
            ErrorKind::Irregular => "index set is not stridable",
            ErrorKind::ZeroStep => "step must be nonzero",
        }
    }
}

impl Error for AssignError {}

impl fmt::Display for AssignError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = self.kind().description();
        match *self {
            AssignError::ShapeMismatch { axis, value, subset } => write!(
                f,
                "{}: value of length {} can not be broadcast to length {} along axis {}",
                desc, value, subset, axis
            ),
            AssignError::IndexOutOfRange { axis, index, len } => write!(
                f,
                "{}: index {} along axis {} of length {}",
                desc, index, axis, len
            ),
            AssignError::UnsupportedElementType { from, to } => {
                write!(f, "{}: can not convert {} to {}", desc, from, to)
            }
            AssignError::RankMismatch { expected, found } => {
                write!(f, "{}: expected {}, found {}", desc, expected, found)
            }
            AssignError::Irregular { axis } | AssignError::ZeroStep { axis } => {
                write!(f, "{} (axis {})", desc, axis)
            }
        }
    }
}

#[inline]
pub(crate) fn shape_mismatch(axis: usize, value: usize, subset: usize) -> AssignError {
    AssignError::ShapeMismatch { axis, value, subset }
}

#[inline]
pub(crate) fn out_of_range(axis: usize, index: isize, len: usize) -> AssignError {
    AssignError::IndexOutOfRange { axis, index, len }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_axis_and_sizes() {
        let e = shape_mismatch(1, 4, 3);
        assert_eq!(e.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(
            e.to_string(),
            "incompatible shapes: value of length 4 can not be broadcast to length 3 along axis 1"
        );

        let e = out_of_range(0, -7, 2);
        assert_eq!(e.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(e.to_string(), "index out of range: index -7 along axis 0 of length 2");
    }
}
