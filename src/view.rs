// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use ndarray::{ArrayD, ArrayViewD, ArrayViewMutD};

use crate::broadcast::{align_rank, validate_broadcastable};
use crate::error::AssignError;
use crate::slice::GeneralSpec;

/// A mutable window over explicitly listed positions of an array.
///
/// Where a strided view can only describe arithmetic progressions, this view
/// maps every subset index through a per-axis position list, so axes may be
/// gathered in any order and with repeats. Writes go straight to the
/// borrowed array; nothing is copied.
pub struct DynamicViewMut<'a, A> {
    base: ArrayViewMutD<'a, A>,
    spec: GeneralSpec,
    shape: Vec<usize>,
}

impl<'a, A> DynamicViewMut<'a, A> {
    /// Create a view over `base` selecting the positions of `spec`.
    ///
    /// `spec` must have been built for the shape of `base`.
    ///
    /// **Errors** with `RankMismatch` if `spec` has the wrong number of
    /// axes, or `IndexOutOfRange` if it refers past the end of an axis.
    pub fn new(base: ArrayViewMutD<'a, A>, spec: GeneralSpec) -> Result<Self, AssignError> {
        if spec.len() != base.ndim() {
            return Err(AssignError::RankMismatch {
                expected: base.ndim(),
                found: spec.len(),
            });
        }
        for (axis, (ax, &len)) in spec.iter().zip(base.shape()).enumerate() {
            if let Some(bad) = (0..ax.len()).map(|i| ax.position(i)).find(|&p| p >= len) {
                return Err(crate::error::out_of_range(axis, bad as isize, len));
            }
        }
        let shape = spec.shape();
        Ok(DynamicViewMut { base, spec, shape })
    }

    /// Shape of the selected subset.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Return a reference to the element at `index` of the subset, or
    /// `None` if the index is out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<&A> {
        let base_index = self.base_index(index)?;
        self.base.get(&base_index[..])
    }

    /// Return a mutable reference to the element at `index` of the subset,
    /// or `None` if the index is out of bounds.
    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut A> {
        let base_index = self.base_index(index)?;
        self.base.get_mut(&base_index[..])
    }

    fn base_index(&self, index: &[usize]) -> Option<Vec<usize>> {
        if index.len() != self.ndim() {
            return None;
        }
        self.spec
            .iter()
            .zip(index)
            .map(|(ax, &i)| if i < ax.len() { Some(ax.position(i)) } else { None })
            .collect()
    }

    /// Write `value` into every position of the view, broadcasting it to
    /// the subset shape.
    ///
    /// Subset elements are visited in logical order, so when an axis lists
    /// the same position more than once the last write wins.
    ///
    /// **Errors** if `value` can not be broadcast to the subset shape. The
    /// check happens before anything is written.
    pub fn assign(&mut self, value: &ArrayViewD<'_, A>) -> Result<(), AssignError>
    where
        A: Clone,
    {
        let value = align_rank(value.view(), self.ndim())?;
        validate_broadcastable(value.shape(), &self.shape)?;
        let value = value
            .broadcast(self.shape.clone())
            .ok_or(AssignError::RankMismatch {
                expected: self.ndim(),
                found: value.ndim(),
            })?;

        let mut base_index = vec![0; self.ndim()];
        for (sub, elt) in value.indexed_iter() {
            for (axis, (dst, ax)) in base_index.iter_mut().zip(self.spec.iter()).enumerate() {
                *dst = ax.position(sub[axis]);
            }
            self.base[&base_index[..]] = elt.clone();
        }
        Ok(())
    }
}

/// Copy the positions of `spec` out of `x` into a new array.
pub(crate) fn gather<A>(x: &ArrayViewD<'_, A>, spec: &GeneralSpec) -> ArrayD<A>
where
    A: Clone,
{
    let mut base_index = vec![0; spec.len()];
    ArrayD::from_shape_fn(spec.shape(), |sub| {
        for (axis, (dst, ax)) in base_index.iter_mut().zip(spec.iter()).enumerate() {
            *dst = ax.position(sub[axis]);
        }
        x[&base_index[..]].clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sel;
    use crate::slice::build_general_slices;
    use ndarray::{arr0, arr2};

    #[test]
    fn writes_through() {
        let mut a = arr2(&[[1, 2, 3], [4, 5, 6]]).into_dyn();
        let spec = build_general_slices(&sel![.., [2, 0]], a.shape()).unwrap();
        {
            let mut v = DynamicViewMut::new(a.view_mut(), spec).unwrap();
            assert_eq!(v.shape(), &[2, 2]);
            assert_eq!(v.get(&[1, 0]), Some(&6));
            assert_eq!(v.get(&[2, 0]), None);
            *v.get_mut(&[0, 1]).unwrap() = 10;
        }
        assert_eq!(a, arr2(&[[10, 2, 3], [4, 5, 6]]).into_dyn());
    }

    #[test]
    fn repeated_positions_last_write_wins() {
        let mut a = arr2(&[[0, 0, 0]]).into_dyn();
        let spec = build_general_slices(&sel![.., [1, 1]], a.shape()).unwrap();
        let value = arr2(&[[7, 8]]).into_dyn();
        DynamicViewMut::new(a.view_mut(), spec)
            .unwrap()
            .assign(&value.view())
            .unwrap();
        assert_eq!(a, arr2(&[[0, 8, 0]]).into_dyn());
    }

    #[test]
    fn assign_broadcasts_scalar() {
        let mut a = arr2(&[[1, 2, 3], [4, 5, 6]]).into_dyn();
        let spec = build_general_slices(&sel![[1], [0, 2]], a.shape()).unwrap();
        let value = arr0(0).into_dyn();
        DynamicViewMut::new(a.view_mut(), spec)
            .unwrap()
            .assign(&value.view())
            .unwrap();
        assert_eq!(a, arr2(&[[1, 2, 3], [0, 5, 0]]).into_dyn());
    }

    #[test]
    fn assign_rejects_before_writing() {
        let mut a = arr2(&[[1, 2, 3], [4, 5, 6]]).into_dyn();
        let spec = build_general_slices(&sel![.., [0, 1]], a.shape()).unwrap();
        let value = arr2(&[[9, 9, 9]]).into_dyn();
        let err = DynamicViewMut::new(a.view_mut(), spec)
            .unwrap()
            .assign(&value.view())
            .unwrap_err();
        assert_eq!(err, AssignError::ShapeMismatch { axis: 1, value: 3, subset: 2 });
        assert_eq!(a, arr2(&[[1, 2, 3], [4, 5, 6]]).into_dyn());
    }

    #[test]
    fn gather_follows_positions() {
        let a = arr2(&[[1, 2, 3], [4, 5, 6]]).into_dyn();
        let spec = build_general_slices(&sel![..;-1, [2, 2, 0]], a.shape()).unwrap();
        assert_eq!(gather(&a.view(), &spec), arr2(&[[6, 6, 4], [3, 3, 1]]).into_dyn());
    }
}
