use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float64Array, Int32Array, Int64Array, StringArray,
    UInt64Array, new_null_array,
};
use arrow::datatypes::{ArrowPrimitiveType, DataType};
use kerncall_result::{Error, Result};

/// A single typed value, possibly missing.
///
/// Stored as a length-one Arrow array so it shares the element type space of
/// [`crate::Datum::Array`] and can be fed to kernels without conversion.
#[derive(Debug, Clone)]
pub struct Scalar {
    array: ArrayRef,
}

impl Scalar {
    /// Wrap a length-one array.
    pub fn try_new(array: ArrayRef) -> Result<Self> {
        if array.len() != 1 {
            return Err(Error::InvalidArgumentError(format!(
                "a scalar is backed by exactly one element, got {}",
                array.len()
            )));
        }
        Ok(Self { array })
    }

    /// A missing value of `data_type`.
    pub fn new_null(data_type: &DataType) -> Self {
        Self {
            array: new_null_array(data_type, 1),
        }
    }

    /// Logical nullness, so a `Null`-typed scalar counts as missing.
    pub fn is_null(&self) -> bool {
        self.array.logical_nulls().is_some_and(|nulls| nulls.is_null(0))
    }

    pub fn data_type(&self) -> &DataType {
        self.array.data_type()
    }

    pub fn as_array(&self) -> &ArrayRef {
        &self.array
    }

    pub fn into_array(self) -> ArrayRef {
        self.array
    }

    /// The primitive value, or `None` when missing or of another type.
    pub fn primitive_value<T: ArrowPrimitiveType>(&self) -> Option<T::Native> {
        let typed = self.array.as_primitive_opt::<T>()?;
        typed.is_valid(0).then(|| typed.value(0))
    }

    /// Project the child named `name` out of a struct-typed scalar.
    ///
    /// A missing struct yields a missing child.
    pub fn field(&self, name: &str) -> Result<Scalar> {
        let strukt = self.array.as_struct_opt().ok_or_else(|| {
            Error::Internal(format!(
                "cannot project field `{name}` out of a {} scalar",
                self.data_type()
            ))
        })?;
        let child = strukt
            .column_by_name(name)
            .ok_or_else(|| Error::Internal(format!("struct scalar has no field `{name}`")))?;
        if strukt.is_null(0) {
            return Ok(Scalar::new_null(child.data_type()));
        }
        Scalar::try_new(child.clone())
    }
}

macro_rules! scalar_from {
    ($native:ty, $array:ty) => {
        impl From<$native> for Scalar {
            fn from(value: $native) -> Self {
                Self {
                    array: Arc::new(<$array>::from(vec![value])),
                }
            }
        }
    };
}

scalar_from!(i32, Int32Array);
scalar_from!(i64, Int64Array);
scalar_from!(u64, UInt64Array);
scalar_from!(f64, Float64Array);
scalar_from!(bool, BooleanArray);
scalar_from!(&str, StringArray);
