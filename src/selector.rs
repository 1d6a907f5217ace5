// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Deref, Range, RangeFrom, RangeFull, RangeTo};

use ndarray::Slice;

/// A selection of positions along one axis.
///
/// Negative `start`, `end` and index set entries are counted from the back
/// of the axis.
///
/// ## Examples
///
/// `Selector::All` is every position of an axis. It can also be created with
/// `Selector::from(..)`. The macro equivalent is `sel![..]`.
///
/// `Selector::Range { start: a, end: Some(b), step: 2 }` is every second
/// position from `a` until `b`. It can also be created with
/// `Selector::from(a..b).step_by(2)`. The macro equivalent is `sel![a..b;2]`.
///
/// `Selector::IndexSet(vec![2, 0, 0])` is position 2 followed by position 0
/// twice. It can also be created with `Selector::from([2, 0, 0])`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selector {
    /// Every position along the axis.
    All,
    /// A range with step size. If `end` is `None`, the range extends to the
    /// end of the axis. A negative `step` visits the range back to front.
    Range {
        start: isize,
        end: Option<isize>,
        step: isize,
    },
    /// An explicit, ordered list of positions. May repeat and need not be
    /// monotonic.
    IndexSet(Vec<isize>),
}

impl Selector {
    /// Create a `Selector::Range`.
    ///
    /// `step` must be nonzero; a zero step is reported as an error when the
    /// selector is resolved against an axis.
    pub fn range(start: isize, end: Option<isize>, step: isize) -> Selector {
        Selector::Range { start, end, step }
    }

    /// Returns `true` if the selector is an arithmetic progression, i.e.
    /// `All` or `Range`.
    #[inline]
    pub fn is_regular(&self) -> bool {
        match *self {
            Selector::All | Selector::Range { .. } => true,
            Selector::IndexSet(_) => false,
        }
    }

    /// Returns a new `Selector` with the given step size (multiplied with
    /// the previous step size). Index sets are returned unchanged.
    ///
    /// A product that overflows saturates to `isize::MAX` in magnitude,
    /// which still picks only the start of any axis.
    #[inline]
    pub fn step_by(self, step: isize) -> Self {
        match self {
            Selector::All => Selector::Range {
                start: 0,
                end: None,
                step,
            },
            Selector::Range {
                start,
                end,
                step: orig_step,
            } => Selector::Range {
                start,
                end,
                step: orig_step.checked_mul(step).unwrap_or_else(|| {
                    if (orig_step < 0) != (step < 0) {
                        -isize::MAX
                    } else {
                        isize::MAX
                    }
                }),
            },
            set @ Selector::IndexSet(_) => set,
        }
    }

    /// Number of positions this selector picks on an axis of length `len`.
    ///
    /// Returns `None` for a range with a zero step or with a bound outside
    /// `[0, len]`; such a range does not count as empty, it fails when it is
    /// resolved. An `IndexSet` counts its entries without checking them.
    pub fn resolved_len(&self, len: usize) -> Option<usize> {
        match *self {
            Selector::All => Some(len),
            Selector::Range { start, end, step } => {
                if step == 0 {
                    return None;
                }
                let start = bound_in_axis(len, start)?;
                let end = match end {
                    Some(e) => bound_in_axis(len, e)?,
                    None => len,
                };
                if end <= start {
                    Some(0)
                } else {
                    let step = step.unsigned_abs();
                    Some((end - start + step - 1) / step)
                }
            }
            Selector::IndexSet(ref set) => Some(set.len()),
        }
    }

    /// Expand the selector into the explicit positions it visits on an axis
    /// of length `len`, in visiting order.
    ///
    /// Fails with the first position that lies outside the axis.
    pub fn positions(&self, axis: usize, len: usize) -> Result<Vec<usize>, crate::AssignError> {
        match *self {
            Selector::IndexSet(ref set) => set
                .iter()
                .map(|&i| resolve_position(axis, len, i))
                .collect(),
            _ => {
                let slice = crate::slice::resolve_slice(self, axis, len)?;
                Ok(slice_positions(slice))
            }
        }
    }
}

/// Positions visited by a resolved slice, whose bounds are non-negative and
/// within the axis.
pub(crate) fn slice_positions(slice: Slice) -> Vec<usize> {
    let start = slice.start as usize;
    let end = slice.end.map_or(start, |e| e as usize);
    let step = slice.step.unsigned_abs();
    if slice.step > 0 {
        (start..end).step_by(step).collect()
    } else {
        // a negative step starts from the end of the range
        (start..end).rev().step_by(step).collect()
    }
}

#[inline]
fn bound_in_axis(len: usize, bound: isize) -> Option<usize> {
    let abs = if bound < 0 { len as isize + bound } else { bound };
    if abs < 0 || abs > len as isize {
        None
    } else {
        Some(abs as usize)
    }
}

/// Resolve a single explicit position, counting negative values from the
/// end, and check it against `[0, len)`.
#[inline]
pub(crate) fn resolve_position(
    axis: usize,
    len: usize,
    index: isize,
) -> Result<usize, crate::AssignError> {
    let abs = if index < 0 { len as isize + index } else { index };
    if abs < 0 || abs >= len as isize {
        Err(crate::error::out_of_range(axis, index, len))
    } else {
        Ok(abs as usize)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Selector::All => write!(f, "..")?,
            Selector::Range { start, end, step } => {
                if start != 0 {
                    write!(f, "{}", start)?;
                }
                write!(f, "..")?;
                if let Some(i) = end {
                    write!(f, "{}", i)?;
                }
                if step != 1 {
                    write!(f, ";{}", step)?;
                }
            }
            Selector::IndexSet(ref set) => write!(f, "{:?}", set)?,
        }
        Ok(())
    }
}

impl From<RangeFull> for Selector {
    #[inline]
    fn from(_: RangeFull) -> Selector {
        Selector::All
    }
}

impl From<Slice> for Selector {
    #[inline]
    fn from(s: Slice) -> Selector {
        Selector::Range {
            start: s.start,
            end: s.end,
            step: s.step,
        }
    }
}

macro_rules! impl_selector_from_index_type {
    ($index:ty) => {
        impl From<Range<$index>> for Selector {
            #[inline]
            fn from(r: Range<$index>) -> Selector {
                Selector::Range {
                    start: r.start as isize,
                    end: Some(r.end as isize),
                    step: 1,
                }
            }
        }

        impl From<RangeFrom<$index>> for Selector {
            #[inline]
            fn from(r: RangeFrom<$index>) -> Selector {
                Selector::Range {
                    start: r.start as isize,
                    end: None,
                    step: 1,
                }
            }
        }

        impl From<RangeTo<$index>> for Selector {
            #[inline]
            fn from(r: RangeTo<$index>) -> Selector {
                Selector::Range {
                    start: 0,
                    end: Some(r.end as isize),
                    step: 1,
                }
            }
        }

        impl From<Vec<$index>> for Selector {
            #[inline]
            fn from(v: Vec<$index>) -> Selector {
                Selector::IndexSet(v.into_iter().map(|i| i as isize).collect())
            }
        }

        impl<'a> From<&'a [$index]> for Selector {
            #[inline]
            fn from(v: &'a [$index]) -> Selector {
                Selector::IndexSet(v.iter().map(|&i| i as isize).collect())
            }
        }

        impl<const N: usize> From<[$index; N]> for Selector {
            #[inline]
            fn from(v: [$index; N]) -> Selector {
                Selector::IndexSet(v.iter().map(|&i| i as isize).collect())
            }
        }
    };
}

impl_selector_from_index_type!(isize);
impl_selector_from_index_type!(usize);
impl_selector_from_index_type!(i32);

/// One `Selector` per axis of the array being indexed.
///
/// Created with `Indexer::from(vec![...])`, by collecting selectors, or with
/// the [`sel![]`](macro.sel.html) macro.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indexer {
    selectors: Vec<Selector>,
}

impl Indexer {
    /// Returns `true` if every selector is regular, so the whole selection
    /// can be described with strides.
    #[inline]
    pub fn is_stridable(&self) -> bool {
        is_stridable(&self.selectors)
    }

    /// Returns `true` if any selector picks no positions on its axis of
    /// `shape`.
    ///
    /// A range with a bound outside its axis is not empty. Axes beyond the
    /// end of `shape` are taken to have length zero.
    pub fn any_zero_length(&self, shape: &[usize]) -> bool {
        self.selectors
            .iter()
            .enumerate()
            .any(|(axis, sel)| sel.resolved_len(shape.get(axis).copied().unwrap_or(0)) == Some(0))
    }

    /// Expand every regular selector into an `IndexSet` of the positions it
    /// visits on the axes of `shape`.
    pub fn to_index_sets(&self, shape: &[usize]) -> Result<Indexer, crate::AssignError> {
        crate::slice::check_rank(self, shape)?;
        self.selectors
            .iter()
            .zip(shape)
            .enumerate()
            .map(|(axis, (sel, &len))| {
                let pos = sel.positions(axis, len)?;
                Ok::<_, crate::AssignError>(Selector::IndexSet(
                    pos.into_iter().map(|i| i as isize).collect(),
                ))
            })
            .collect()
    }
}

/// Returns `true` if every selector in `selectors` is `All` or `Range`.
pub fn is_stridable(selectors: &[Selector]) -> bool {
    selectors.iter().all(Selector::is_regular)
}

impl Deref for Indexer {
    type Target = [Selector];
    fn deref(&self) -> &[Selector] {
        &self.selectors
    }
}

impl From<Vec<Selector>> for Indexer {
    fn from(selectors: Vec<Selector>) -> Indexer {
        Indexer { selectors }
    }
}

impl FromIterator<Selector> for Indexer {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Selector>,
    {
        Indexer {
            selectors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Indexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, sel) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", sel)?;
        }
        write!(f, "]")
    }
}

/// Build an [`Indexer`](struct.Indexer.html) from one selector expression
/// per axis.
///
/// Each argument is converted with `Selector::from`: `..` selects a whole
/// axis, `a..b`, `a..` and `..b` select ranges, and a vector, slice or
/// array of integers selects an explicit index set. A range may be followed
/// by `;step`.
///
/// ```
/// use ndarray_subset::{sel, Selector};
///
/// let idx = sel![.., 1..;2, [0, 2]];
/// assert_eq!(idx[0], Selector::All);
/// assert_eq!(idx[1], Selector::range(1, None, 2));
/// assert_eq!(idx[2], Selector::IndexSet(vec![0, 2]));
/// ```
#[macro_export]
macro_rules! sel(
    // convert a..b;c into @convert(a..b, c), final item
    (@parse [$($stack:tt)*] $r:expr;$s:expr) => {
        $crate::Indexer::from(vec![$($stack)* $crate::sel!(@convert $r, $s)])
    };
    // convert a..b into @convert(a..b), final item
    (@parse [$($stack:tt)*] $r:expr) => {
        $crate::Indexer::from(vec![$($stack)* $crate::sel!(@convert $r)])
    };
    // convert a..b;c into @convert(a..b, c), final item, trailing comma
    (@parse [$($stack:tt)*] $r:expr;$s:expr ,) => {
        $crate::Indexer::from(vec![$($stack)* $crate::sel!(@convert $r, $s)])
    };
    // convert a..b into @convert(a..b), final item, trailing comma
    (@parse [$($stack:tt)*] $r:expr ,) => {
        $crate::Indexer::from(vec![$($stack)* $crate::sel!(@convert $r)])
    };
    // convert a..b;c into @convert(a..b, c)
    (@parse [$($stack:tt)*] $r:expr;$s:expr, $($t:tt)*) => {
        $crate::sel![@parse [$($stack)* $crate::sel!(@convert $r, $s),] $($t)*]
    };
    // convert a..b into @convert(a..b)
    (@parse [$($stack:tt)*] $r:expr, $($t:tt)*) => {
        $crate::sel![@parse [$($stack)* $crate::sel!(@convert $r),] $($t)*]
    };
    (@convert $r:expr) => {
        <$crate::Selector as ::std::convert::From<_>>::from($r)
    };
    (@convert $r:expr, $s:expr) => {
        <$crate::Selector as ::std::convert::From<_>>::from($r).step_by($s as isize)
    };
    () => {
        $crate::Indexer::default()
    };
    ($($t:tt)*) => {
        $crate::sel![@parse [] $($t)*]
    };
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert!(Selector::All.is_regular());
        assert!(Selector::from(1..3).is_regular());
        assert!(!Selector::from(vec![0, 2]).is_regular());

        assert!(sel![.., 1..2].is_stridable());
        assert!(!sel![.., [0, 2]].is_stridable());
        assert!(sel![].is_stridable());
    }

    #[test]
    fn resolved_len() {
        assert_eq!(Selector::All.resolved_len(4), Some(4));
        assert_eq!(Selector::from(1..3).resolved_len(4), Some(2));
        assert_eq!(Selector::from(1..).step_by(2).resolved_len(6), Some(3));
        assert_eq!(Selector::from(..-1).resolved_len(4), Some(3));
        assert_eq!(Selector::from(3..1).resolved_len(4), Some(0));
        assert_eq!(Selector::from(4..).resolved_len(4), Some(0));
        assert_eq!(Selector::from(..).step_by(-2).resolved_len(5), Some(3));
        assert_eq!(Selector::IndexSet(vec![]).resolved_len(4), Some(0));
        assert_eq!(Selector::from([0, 0, 0]).resolved_len(1), Some(3));
        assert_eq!(Selector::All.resolved_len(0), Some(0));
    }

    #[test]
    fn step_by_saturates() {
        assert_eq!(
            Selector::range(0, None, isize::MAX).step_by(2),
            Selector::range(0, None, isize::MAX)
        );
        assert_eq!(
            Selector::range(1, Some(3), isize::MAX).step_by(-2),
            Selector::range(1, Some(3), -isize::MAX)
        );
        assert_eq!(Selector::from(..).step_by(isize::MAX).positions(0, 4), Ok(vec![0]));
    }

    #[test]
    fn resolved_len_out_of_range() {
        assert_eq!(Selector::from(5..).resolved_len(3), None);
        assert_eq!(Selector::from(5..7).resolved_len(3), None);
        assert_eq!(Selector::from(-9..-7).resolved_len(3), None);
        assert_eq!(Selector::from(..4).resolved_len(3), None);
        assert_eq!(Selector::range(0, None, 0).resolved_len(3), None);
    }

    #[test]
    fn any_zero_length() {
        let idx = sel![[0usize; 0], ..];
        assert!(idx.any_zero_length(&[2, 3]));
        assert!(!sel![.., 1..2].any_zero_length(&[2, 3]));
        assert!(sel![.., 2..2].any_zero_length(&[2, 3]));
        assert!(!sel![.., 5..7].any_zero_length(&[2, 3]));
        assert!(sel![[0usize; 0], 5..7].any_zero_length(&[2, 3]));
    }

    #[test]
    fn positions() {
        assert_eq!(Selector::from(1..5).step_by(2).positions(0, 6), Ok(vec![1, 3]));
        assert_eq!(Selector::from(1..5).step_by(-2).positions(0, 6), Ok(vec![4, 2]));
        assert_eq!(Selector::from([-1, 0]).positions(0, 3), Ok(vec![2, 0]));
        assert!(Selector::from([3]).positions(0, 3).is_err());
    }

    #[test]
    fn display() {
        let idx = sel![.., 1..3;2, [2, 0]];
        assert_eq!(idx.to_string(), "[.., 1..3;2, [2, 0]]");
    }
}
