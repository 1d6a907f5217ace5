use std::borrow::Cow;

use ndarray::ArrayD;
use num_complex::Complex64;
use num_traits::{NumCast, One, Zero};

use crate::assign::{subset, subset_assign};
use crate::error::AssignError;
use crate::selector::Indexer;
use crate::slice::check_rank;

/// An array of one of the supported element types.
///
/// Callers that only know the element type at runtime hold an `AnyArray`;
/// the variant is matched once and the rest of the work runs on the
/// concrete `ArrayD<T>`.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyArray {
    Logical(ArrayD<bool>),
    Integer(ArrayD<i32>),
    Double(ArrayD<f64>),
    Complex(ArrayD<Complex64>),
}

/// Element types that can take part in a dynamically typed subset
/// assignment.
///
/// The conversions mirror what a value undergoes before it is written into
/// an array of `Self`: they return `None` when the element can not be
/// represented without loss.
pub trait Element: Clone + Default + 'static {
    /// Name of the element type, as reported in errors.
    const NAME: &'static str;

    fn from_logical(v: bool) -> Option<Self>;
    fn from_integer(v: i32) -> Option<Self>;
    fn from_double(v: f64) -> Option<Self>;
    fn from_complex(v: Complex64) -> Option<Self>;

    /// Borrow the array if `value` already holds elements of type `Self`.
    fn downcast(value: &AnyArray) -> Option<&ArrayD<Self>>;

    /// Assign `value` into the subset of `x` selected by `indexer`,
    /// converting it to `Self` first.
    fn assign_into(
        x: &ArrayD<Self>,
        indexer: &Indexer,
        value: &AnyArray,
    ) -> Result<ArrayD<Self>, AssignError> {
        check_rank(indexer, x.shape())?;
        // an empty selection never looks at the value, not even its type
        if indexer.any_zero_length(x.shape()) {
            return Ok(x.clone());
        }
        let value = coerce::<Self>(value)?;
        subset_assign(x, indexer, &*value)
    }
}

fn convert<A, T, F>(from: &ArrayD<A>, name: &'static str, f: F) -> Result<ArrayD<T>, AssignError>
where
    T: Element,
    F: Fn(&A) -> Option<T>,
{
    let mut out = ArrayD::<T>::default(from.raw_dim());
    for (dst, src) in out.iter_mut().zip(from.iter()) {
        *dst = f(src).ok_or(AssignError::UnsupportedElementType {
            from: name,
            to: T::NAME,
        })?;
    }
    Ok(out)
}

/// Convert `value` to an array of `T`, borrowing it if it already is one.
pub fn coerce<T: Element>(value: &AnyArray) -> Result<Cow<'_, ArrayD<T>>, AssignError> {
    if let Some(a) = T::downcast(value) {
        return Ok(Cow::Borrowed(a));
    }
    let name = value.type_name();
    let out = match *value {
        AnyArray::Logical(ref a) => convert(a, name, |&v| T::from_logical(v))?,
        AnyArray::Integer(ref a) => convert(a, name, |&v| T::from_integer(v))?,
        AnyArray::Double(ref a) => convert(a, name, |&v| T::from_double(v))?,
        AnyArray::Complex(ref a) => convert(a, name, |&v| T::from_complex(v))?,
    };
    Ok(Cow::Owned(out))
}

impl Element for bool {
    const NAME: &'static str = "logical";

    fn from_logical(v: bool) -> Option<Self> {
        Some(v)
    }
    fn from_integer(v: i32) -> Option<Self> {
        Some(v != 0)
    }
    fn from_double(v: f64) -> Option<Self> {
        if v.is_nan() {
            None
        } else {
            Some(v != 0.)
        }
    }
    fn from_complex(v: Complex64) -> Option<Self> {
        real_part(v).and_then(Self::from_double)
    }
    fn downcast(value: &AnyArray) -> Option<&ArrayD<Self>> {
        match *value {
            AnyArray::Logical(ref a) => Some(a),
            _ => None,
        }
    }
}

impl Element for i32 {
    const NAME: &'static str = "integer";

    fn from_logical(v: bool) -> Option<Self> {
        Some(v as i32)
    }
    fn from_integer(v: i32) -> Option<Self> {
        Some(v)
    }
    fn from_double(v: f64) -> Option<Self> {
        // NaN and infinities have a NaN fractional part
        if v.fract() != 0. {
            return None;
        }
        NumCast::from(v)
    }
    fn from_complex(v: Complex64) -> Option<Self> {
        real_part(v).and_then(Self::from_double)
    }
    fn downcast(value: &AnyArray) -> Option<&ArrayD<Self>> {
        match *value {
            AnyArray::Integer(ref a) => Some(a),
            _ => None,
        }
    }
}

impl Element for f64 {
    const NAME: &'static str = "double";

    fn from_logical(v: bool) -> Option<Self> {
        Some(if v { f64::one() } else { f64::zero() })
    }
    fn from_integer(v: i32) -> Option<Self> {
        NumCast::from(v)
    }
    fn from_double(v: f64) -> Option<Self> {
        Some(v)
    }
    fn from_complex(v: Complex64) -> Option<Self> {
        real_part(v)
    }
    fn downcast(value: &AnyArray) -> Option<&ArrayD<Self>> {
        match *value {
            AnyArray::Double(ref a) => Some(a),
            _ => None,
        }
    }
}

impl Element for Complex64 {
    const NAME: &'static str = "complex";

    fn from_logical(v: bool) -> Option<Self> {
        Some(if v { Complex64::one() } else { Complex64::zero() })
    }
    fn from_integer(v: i32) -> Option<Self> {
        f64::from_integer(v).map(|r| Complex64::new(r, 0.))
    }
    fn from_double(v: f64) -> Option<Self> {
        Some(Complex64::new(v, 0.))
    }
    fn from_complex(v: Complex64) -> Option<Self> {
        Some(v)
    }
    fn downcast(value: &AnyArray) -> Option<&ArrayD<Self>> {
        match *value {
            AnyArray::Complex(ref a) => Some(a),
            _ => None,
        }
    }
}

#[inline]
fn real_part(v: Complex64) -> Option<f64> {
    if v.im == 0. {
        Some(v.re)
    } else {
        None
    }
}

impl AnyArray {
    /// Name of the element type: `"logical"`, `"integer"`, `"double"` or
    /// `"complex"`.
    pub fn type_name(&self) -> &'static str {
        match *self {
            AnyArray::Logical(_) => bool::NAME,
            AnyArray::Integer(_) => i32::NAME,
            AnyArray::Double(_) => f64::NAME,
            AnyArray::Complex(_) => Complex64::NAME,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match *self {
            AnyArray::Logical(ref a) => a.shape(),
            AnyArray::Integer(ref a) => a.shape(),
            AnyArray::Double(ref a) => a.shape(),
            AnyArray::Complex(ref a) => a.shape(),
        }
    }

    /// Subset assignment on a dynamically typed array.
    ///
    /// `value` is converted to the element type of `self` before the
    /// assignment; the result has the element type and shape of `self`.
    ///
    /// **Errors** with `UnsupportedElementType` if an element of `value`
    /// can not be represented in the element type of `self`, and otherwise
    /// like [`subset_assign`](fn.subset_assign.html).
    pub fn subset_assign(&self, indexer: &Indexer, value: &AnyArray) -> Result<AnyArray, AssignError> {
        match *self {
            AnyArray::Logical(ref x) => bool::assign_into(x, indexer, value).map(AnyArray::Logical),
            AnyArray::Integer(ref x) => i32::assign_into(x, indexer, value).map(AnyArray::Integer),
            AnyArray::Double(ref x) => f64::assign_into(x, indexer, value).map(AnyArray::Double),
            AnyArray::Complex(ref x) => {
                Complex64::assign_into(x, indexer, value).map(AnyArray::Complex)
            }
        }
    }

    /// Read the subset selected by `indexer`, keeping the element type.
    pub fn subset(&self, indexer: &Indexer) -> Result<AnyArray, AssignError> {
        match *self {
            AnyArray::Logical(ref x) => subset(x, indexer).map(AnyArray::Logical),
            AnyArray::Integer(ref x) => subset(x, indexer).map(AnyArray::Integer),
            AnyArray::Double(ref x) => subset(x, indexer).map(AnyArray::Double),
            AnyArray::Complex(ref x) => subset(x, indexer).map(AnyArray::Complex),
        }
    }
}

macro_rules! impl_any_array_from {
    ($elem:ty, $variant:ident) => {
        impl From<ArrayD<$elem>> for AnyArray {
            fn from(a: ArrayD<$elem>) -> AnyArray {
                AnyArray::$variant(a)
            }
        }
    };
}

impl_any_array_from!(bool, Logical);
impl_any_array_from!(i32, Integer);
impl_any_array_from!(f64, Double);
impl_any_array_from!(Complex64, Complex);
