// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![doc(html_root_url = "https://docs.rs/ndarray-subset/0.1/")]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Subset assignment for [`ndarray`] arrays.
//!
//! [`subset_assign`] takes an array `x`, an [`Indexer`] with one
//! [`Selector`] per axis and a `value`, and returns a copy of `x` where the
//! selected subset holds `value`, broadcast to fit. The input array is never
//! modified and nothing is written unless every check passes.
//!
//! ## Selectors
//!
//! - `Selector::All` and `Selector::Range` are *regular*: they describe an
//!   arithmetic progression along their axis.
//! - `Selector::IndexSet` is *irregular*: an explicit list of positions, in
//!   any order and possibly with repeats.
//!
//! An indexer where every selector is regular is *stridable*. Its subset is
//! written through a strided `ArrayViewMut` built from a [`CompactSpec`]. Any
//! other indexer is lowered to a [`GeneralSpec`] and written through a
//! [`DynamicViewMut`], which addresses the subset position by position.
//!
//! The [`sel![]`](macro.sel.html) macro builds indexers from range syntax:
//!
//! ```
//! use ndarray::{arr0, arr2};
//! use ndarray_subset::{sel, subset_assign};
//!
//! let x = arr2(&[[1, 2, 3], [4, 5, 6]]);
//!
//! // column 1, through a strided view
//! let out = subset_assign(&x, &sel![.., 1..2], &arr0(99)).unwrap();
//! assert_eq!(out, arr2(&[[1, 99, 3], [4, 99, 6]]).into_dyn());
//!
//! // columns 2 and 0, through a dynamic view
//! let out = subset_assign(&x, &sel![.., [2, 0]], &arr2(&[[30, 10]])).unwrap();
//! assert_eq!(out, arr2(&[[10, 2, 30], [10, 5, 30]]).into_dyn());
//! ```
//!
//! ## Broadcasting
//!
//! The value is first given leading axes of length 1 until it has as many
//! axes as `x`. It is then broadcast onto the subset: trailing axes are
//! compared pairwise, and a value axis must either equal the subset axis or
//! have length 1. See [`validate_broadcastable`].
//!
//! ## Empty selections
//!
//! If any selector picks no positions the call is a no-op and returns an
//! unmodified copy of `x`, whatever the shape of the value.
//!
//! ## Dynamic element types
//!
//! [`AnyArray`] wraps arrays of `bool`, `i32`, `f64` and `Complex64` for
//! callers that only know the element type at runtime. The value is
//! converted to the element type of the target before the assignment.
//!
//! ## Crate Feature Flags
//!
//! - `serde`
//!   - Optional, compatible with Rust stable
//!   - Enables serialization support for [`Selector`] and [`Indexer`]

mod assign;
mod broadcast;
mod element;
mod error;
mod selector;
mod slice;
mod view;

pub use crate::assign::{subset, subset_assign};
pub use crate::broadcast::{align_rank, validate_broadcastable};
pub use crate::element::{coerce, AnyArray, Element};
pub use crate::error::{AssignError, ErrorKind};
pub use crate::selector::{is_stridable, Indexer, Selector};
pub use crate::slice::{build_general_slices, build_regular_slices, AxisSpec, CompactSpec, GeneralSpec};
pub use crate::view::DynamicViewMut;
