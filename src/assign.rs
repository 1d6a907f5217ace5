// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use ndarray::{ArrayBase, ArrayD, Data, Dimension};
use tracing::trace;

use crate::broadcast::{align_rank, validate_broadcastable};
use crate::error::AssignError;
use crate::selector::Indexer;
use crate::slice::{build_general_slices, build_regular_slices, check_rank};
use crate::view::{gather, DynamicViewMut};

/// Return a copy of `x` where the subset selected by `indexer` is replaced
/// by `value`, broadcast to the shape of the subset.
///
/// `indexer` must hold one selector per axis of `x`. `value` is given
/// leading axes of length 1 until it has as many axes as `x`, and is then
/// broadcast onto the subset.
///
/// If any selector picks no positions, the result is an unmodified copy of
/// `x`; that check comes before every other one, so `value` is not looked
/// at in that case.
///
/// When every selector is `All` or a `Range`, the subset is written through
/// a strided view of the copy. Otherwise the selection is addressed position
/// by position with a [`DynamicViewMut`](struct.DynamicViewMut.html).
///
/// **Errors** with `RankMismatch` if `indexer` has the wrong length,
/// `IndexOutOfRange` or `ZeroStep` for a selector that does not fit its
/// axis, and `ShapeMismatch` if `value` can not be broadcast onto the
/// subset. Nothing is written before all checks have passed, and `x` is
/// never modified.
///
/// ```
/// use ndarray::arr2;
/// use ndarray_subset::{sel, subset_assign};
///
/// let x = arr2(&[[1, 2, 3], [4, 5, 6]]);
/// let value = arr2(&[[10, 30], [40, 60]]);
/// let out = subset_assign(&x, &sel![.., [0, 2]], &value).unwrap();
/// assert_eq!(out, arr2(&[[10, 2, 30], [40, 5, 60]]).into_dyn());
/// ```
pub fn subset_assign<A, S, D, S2, E>(
    x: &ArrayBase<S, D>,
    indexer: &Indexer,
    value: &ArrayBase<S2, E>,
) -> Result<ArrayD<A>, AssignError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
    S2: Data<Elem = A>,
    E: Dimension,
{
    let shape = x.shape();
    check_rank(indexer, shape)?;

    if indexer.any_zero_length(shape) {
        trace!(%indexer, ?shape, "empty selection, returning copy");
        return Ok(x.to_owned().into_dyn());
    }

    let value = align_rank(value.view().into_dyn(), x.ndim())?;
    let mut out = x.to_owned().into_dyn();

    if indexer.is_stridable() {
        let spec = build_regular_slices(indexer, shape)?;
        let mut subset = out.slice_each_axis_mut(|ax| spec[ax.axis.index()]);
        trace!(%indexer, subset = ?subset.shape(), "strided subset assign");
        validate_broadcastable(value.shape(), subset.shape())?;
        subset.assign(&value);
    } else {
        let spec = build_general_slices(indexer, shape)?;
        let mut subset = DynamicViewMut::new(out.view_mut(), spec)?;
        trace!(%indexer, subset = ?subset.shape(), "dynamic subset assign");
        // checks broadcastability before writing
        subset.assign(&value)?;
    }

    Ok(out)
}

/// Return a new array holding the subset of `x` selected by `indexer`.
///
/// The subset keeps one axis per selector, with the length of that
/// selection; an empty selection gives an array with a zero-length axis.
///
/// **Errors** like [`subset_assign`](fn.subset_assign.html) for an indexer
/// that does not fit `x`.
///
/// ```
/// use ndarray::arr2;
/// use ndarray_subset::{sel, subset};
///
/// let x = arr2(&[[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(subset(&x, &sel![1.., [2, 0]]).unwrap(), arr2(&[[6, 4]]).into_dyn());
/// ```
pub fn subset<A, S, D>(x: &ArrayBase<S, D>, indexer: &Indexer) -> Result<ArrayD<A>, AssignError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    let shape = x.shape();
    if indexer.is_stridable() {
        let spec = build_regular_slices(indexer, shape)?;
        let view = x.view().into_dyn();
        Ok(view.slice_each_axis(|ax| spec[ax.axis.index()]).to_owned())
    } else {
        let spec = build_general_slices(indexer, shape)?;
        Ok(gather(&x.view().into_dyn(), &spec))
    }
}
