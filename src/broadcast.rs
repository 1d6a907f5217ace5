use itertools::{EitherOrBoth, Itertools};
use ndarray::{ArrayViewD, Axis};

use crate::error::{shape_mismatch, AssignError};

/// Check that an array of shape `source` can be broadcast to `target`.
///
/// Shapes are compared from the trailing axis. An axis pair is compatible
/// when the lengths are equal or the source length is 1. Leading axes
/// missing from `source` are compatible with anything; leading axes of
/// `source` beyond the length of `target` must have length 1.
///
/// **Errors** with `ShapeMismatch` naming the first (from the back)
/// conflicting axis of `target`, or with `RankMismatch` if `source` has an
/// extra axis that is not of length 1.
///
/// ```
/// use ndarray_subset::validate_broadcastable;
///
/// assert!(validate_broadcastable(&[1, 3], &[2, 3]).is_ok());
/// assert!(validate_broadcastable(&[], &[2, 3]).is_ok());
/// assert!(validate_broadcastable(&[2, 4], &[2, 3]).is_err());
/// ```
pub fn validate_broadcastable(source: &[usize], target: &[usize]) -> Result<(), AssignError> {
    let ndim = target.len();
    for (i, pair) in source.iter().rev().zip_longest(target.iter().rev()).enumerate() {
        match pair {
            EitherOrBoth::Both(&s, &t) => {
                if s != t && s != 1 {
                    return Err(shape_mismatch(ndim - 1 - i, s, t));
                }
            }
            EitherOrBoth::Left(&s) => {
                if s != 1 {
                    return Err(AssignError::RankMismatch {
                        expected: ndim,
                        found: source.len(),
                    });
                }
            }
            EitherOrBoth::Right(_) => {}
        }
    }
    Ok(())
}

/// Give `value` exactly `ndim` axes without copying.
///
/// Missing axes are inserted in front with length 1. Surplus leading axes
/// are removed if they have length 1.
///
/// **Errors** with `RankMismatch` if a surplus axis is longer than 1.
pub fn align_rank<A>(value: ArrayViewD<'_, A>, ndim: usize) -> Result<ArrayViewD<'_, A>, AssignError> {
    let found = value.ndim();
    let mut value = value;
    while value.ndim() < ndim {
        value = value.insert_axis(Axis(0));
    }
    while value.ndim() > ndim {
        if value.len_of(Axis(0)) != 1 {
            return Err(AssignError::RankMismatch { expected: ndim, found });
        }
        value = value.index_axis_move(Axis(0), 0);
    }
    Ok(value)
}
