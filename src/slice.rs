// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::Deref;

use ndarray::Slice;

use crate::error::{out_of_range, AssignError};
use crate::selector::{resolve_position, Indexer, Selector};

/// A strided selection: one resolved `Slice` per axis.
///
/// Every `start` and `end` is a concrete offset in `[0, len]` with
/// `start <= end`, so the spec can be handed to `ndarray` slicing without
/// further checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompactSpec {
    slices: Vec<Slice>,
}

/// A resolved selection along one axis of a general spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxisSpec {
    /// A resolved strided range, as in `CompactSpec`.
    Range(Slice),
    /// Explicit positions, each in `[0, len)`.
    Indices(Vec<usize>),
}

/// A selection mixing strided ranges and explicit positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneralSpec {
    axes: Vec<AxisSpec>,
}

impl CompactSpec {
    /// Shape of the selected subset.
    pub fn shape(&self) -> Vec<usize> {
        self.slices.iter().map(|&s| slice_len(s)).collect()
    }
}

impl Deref for CompactSpec {
    type Target = [Slice];
    fn deref(&self) -> &[Slice] {
        &self.slices
    }
}

impl AxisSpec {
    /// Number of positions selected on this axis.
    pub fn len(&self) -> usize {
        match *self {
            AxisSpec::Range(s) => slice_len(s),
            AxisSpec::Indices(ref pos) => pos.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`th selected position of the underlying axis.
    ///
    /// **Panics** if `i >= self.len()`.
    #[inline]
    pub fn position(&self, i: usize) -> usize {
        match *self {
            AxisSpec::Range(s) => {
                assert!(i < slice_len(s));
                let start = s.start as usize;
                let step = s.step.unsigned_abs();
                if s.step > 0 {
                    start + i * step
                } else {
                    // reversed: count back from the last element of the range
                    let end = s.end.map_or(start, |e| e as usize);
                    end - 1 - i * step
                }
            }
            AxisSpec::Indices(ref pos) => pos[i],
        }
    }
}

impl GeneralSpec {
    /// Shape of the selected subset.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(AxisSpec::len).collect()
    }
}

impl Deref for GeneralSpec {
    type Target = [AxisSpec];
    fn deref(&self) -> &[AxisSpec] {
        &self.axes
    }
}

#[inline]
fn slice_len(s: Slice) -> usize {
    let start = s.start as usize;
    let end = s.end.map_or(start, |e| e as usize);
    let step = s.step.unsigned_abs();
    if end <= start {
        0
    } else {
        (end - start + step - 1) / step
    }
}

#[inline]
fn abs_bound(axis: usize, len: usize, bound: isize) -> Result<isize, AssignError> {
    let abs = if bound < 0 { len as isize + bound } else { bound };
    if abs < 0 || abs > len as isize {
        Err(out_of_range(axis, bound, len))
    } else {
        Ok(abs)
    }
}

/// Resolve a regular selector against an axis of length `len`.
///
/// Negative bounds count from the back and an omitted end becomes `len`.
/// Bounds must land in `[0, len]`; an `end` before `start` yields an empty
/// range at `start`.
pub(crate) fn resolve_slice(sel: &Selector, axis: usize, len: usize) -> Result<Slice, AssignError> {
    match *sel {
        Selector::All => Ok(Slice::new(0, Some(len as isize), 1)),
        Selector::Range { start, end, step } => {
            if step == 0 {
                return Err(AssignError::ZeroStep { axis });
            }
            let start = abs_bound(axis, len, start)?;
            let end = match end {
                Some(e) => abs_bound(axis, len, e)?,
                None => len as isize,
            };
            // a step as long as the axis already picks only one position
            let step = if step.unsigned_abs() > len {
                step.signum() * len.max(1) as isize
            } else {
                step
            };
            Ok(Slice::new(start, Some(end.max(start)), step))
        }
        Selector::IndexSet(_) => Err(AssignError::Irregular { axis }),
    }
}

pub(crate) fn check_rank(indexer: &Indexer, shape: &[usize]) -> Result<(), AssignError> {
    if indexer.len() != shape.len() {
        return Err(AssignError::RankMismatch {
            expected: shape.len(),
            found: indexer.len(),
        });
    }
    Ok(())
}

/// Build the strided spec for an indexer whose selectors are all regular.
///
/// **Errors** with `IndexOutOfRange` for a bound outside its axis, with
/// `Irregular` if an index set is present and with `RankMismatch` if the
/// indexer does not have one selector per axis of `shape`.
pub fn build_regular_slices(indexer: &Indexer, shape: &[usize]) -> Result<CompactSpec, AssignError> {
    check_rank(indexer, shape)?;
    let slices = indexer
        .iter()
        .zip(shape)
        .enumerate()
        .map(|(axis, (sel, &len))| resolve_slice(sel, axis, len))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CompactSpec { slices })
}

/// Build the general spec for any indexer.
///
/// Regular selectors are lowered exactly like `build_regular_slices` does;
/// every index set entry is resolved and checked against `[0, len)`, and the
/// first one outside is reported together with its axis.
pub fn build_general_slices(indexer: &Indexer, shape: &[usize]) -> Result<GeneralSpec, AssignError> {
    check_rank(indexer, shape)?;
    let mut axes = Vec::with_capacity(shape.len());
    for (axis, (sel, &len)) in indexer.iter().zip(shape).enumerate() {
        let spec = match *sel {
            Selector::IndexSet(ref set) => AxisSpec::Indices(
                set.iter()
                    .map(|&i| resolve_position(axis, len, i))
                    .collect::<Result<_, _>>()?,
            ),
            ref regular => AxisSpec::Range(resolve_slice(regular, axis, len)?),
        };
        axes.push(spec);
    }
    Ok(GeneralSpec { axes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sel, ErrorKind};

    #[test]
    fn regular_resolves_bounds() {
        let spec = build_regular_slices(&sel![.., 1..;2, -2..-1, ..-3], &[2, 5, 4, 3]).unwrap();
        assert_eq!(
            &spec[..],
            &[
                Slice::new(0, Some(2), 1),
                Slice::new(1, Some(5), 2),
                Slice::new(2, Some(3), 1),
                Slice::new(0, Some(0), 1),
            ]
        );
        assert_eq!(spec.shape(), vec![2, 2, 1, 0]);
    }

    #[test]
    fn regular_caps_long_steps() {
        let spec = build_regular_slices(&sel![..;isize::MAX, 1..;-7], &[3, 4]).unwrap();
        assert_eq!(&spec[..], &[Slice::new(0, Some(3), 3), Slice::new(1, Some(4), -4)]);
        assert_eq!(spec.shape(), vec![1, 1]);
    }

    #[test]
    fn regular_rejects_out_of_range() {
        let err = build_regular_slices(&sel![.., 1..4], &[2, 3]).unwrap_err();
        assert_eq!(err, AssignError::IndexOutOfRange { axis: 1, index: 4, len: 3 });

        let err = build_regular_slices(&sel![-3.., ..], &[2, 3]).unwrap_err();
        assert_eq!(err, AssignError::IndexOutOfRange { axis: 0, index: -3, len: 2 });

        let err = build_regular_slices(&sel![.., [0]], &[2, 3]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Irregular);

        let err = build_regular_slices(&sel![..;0], &[2]).unwrap_err();
        assert_eq!(err, AssignError::ZeroStep { axis: 0 });
    }

    #[test]
    fn rank_is_checked() {
        let err = build_general_slices(&sel![..], &[2, 3]).unwrap_err();
        assert_eq!(err, AssignError::RankMismatch { expected: 2, found: 1 });
    }

    #[test]
    fn general_mixes_ranges_and_indices() {
        let spec = build_general_slices(&sel![1.., [2, -1, 0]], &[3, 4]).unwrap();
        assert_eq!(
            &spec[..],
            &[
                AxisSpec::Range(Slice::new(1, Some(3), 1)),
                AxisSpec::Indices(vec![2, 3, 0]),
            ]
        );
        assert_eq!(spec.shape(), vec![2, 3]);
    }

    #[test]
    fn general_reports_first_bad_index() {
        let err = build_general_slices(&sel![.., [0, 4, 9]], &[2, 3]).unwrap_err();
        assert_eq!(err, AssignError::IndexOutOfRange { axis: 1, index: 4, len: 3 });

        let err = build_general_slices(&sel![[-3], ..], &[2, 3]).unwrap_err();
        assert_eq!(err, AssignError::IndexOutOfRange { axis: 0, index: -3, len: 2 });
    }

    #[test]
    fn axis_positions() {
        let fwd = AxisSpec::Range(Slice::new(1, Some(6), 2));
        assert_eq!((0..fwd.len()).map(|i| fwd.position(i)).collect::<Vec<_>>(), vec![1, 3, 5]);

        let rev = AxisSpec::Range(Slice::new(1, Some(6), -2));
        assert_eq!((0..rev.len()).map(|i| rev.position(i)).collect::<Vec<_>>(), vec![5, 3, 1]);
    }
}
