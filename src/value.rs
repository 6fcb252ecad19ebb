//! Element types that readers can be parameterized over

use std::fmt;

use crate::descriptor::Vector;

/// Runtime tag for the element type of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// 32-bit signed integer
    Integer,
    /// 64-bit IEEE float
    Double,
    /// Single-byte logical
    Logical,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Integer => write!(f, "integer"),
            ElementType::Double => write!(f, "double"),
            ElementType::Logical => write!(f, "logical"),
        }
    }
}

/// A single-byte logical value; zero is `FALSE`
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Logical(pub u8);

impl Logical {
    pub const FALSE: Logical = Logical(0);
    pub const TRUE: Logical = Logical(1);

    /// Any non-zero byte counts as true
    pub fn is_true(self) -> bool {
        self.0 != 0
    }
}

impl From<bool> for Logical {
    fn from(value: bool) -> Self {
        if value {
            Logical::TRUE
        } else {
            Logical::FALSE
        }
    }
}

impl From<Logical> for bool {
    fn from(value: Logical) -> Self {
        value.is_true()
    }
}

/// Trait for types that can be stored as matrix elements
///
/// The zero element is fixed per type: sparse backends fill gaps with it during
/// dense extraction and dense backends drop it during sparse extraction.
pub trait MatrixValue: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag matching this type
    const ELEMENT_TYPE: ElementType;

    /// The value of an implicit (unstored) element
    fn zero() -> Self;

    /// Convert to f64 for type-converting extraction
    fn to_f64(self) -> f64;

    /// Convert from f64 for type-converting extraction
    fn from_f64(value: f64) -> Self;

    /// Take the buffer out of a descriptor vector if it holds this type
    ///
    /// On a type mismatch the vector is handed back unchanged.
    fn unwrap_vector(vector: Vector) -> std::result::Result<Vec<Self>, Vector>;

    /// Whether this value is the zero element
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl MatrixValue for i32 {
    const ELEMENT_TYPE: ElementType = ElementType::Integer;

    fn zero() -> Self {
        0
    }

    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }

    fn unwrap_vector(vector: Vector) -> std::result::Result<Vec<Self>, Vector> {
        match vector {
            Vector::Integer(values) => Ok(values),
            other => Err(other),
        }
    }
}

impl MatrixValue for f64 {
    const ELEMENT_TYPE: ElementType = ElementType::Double;

    fn zero() -> Self {
        0.0
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn unwrap_vector(vector: Vector) -> std::result::Result<Vec<Self>, Vector> {
        match vector {
            Vector::Double(values) => Ok(values),
            other => Err(other),
        }
    }
}

impl MatrixValue for Logical {
    const ELEMENT_TYPE: ElementType = ElementType::Logical;

    fn zero() -> Self {
        Logical::FALSE
    }

    fn to_f64(self) -> f64 {
        if self.is_true() {
            1.0
        } else {
            0.0
        }
    }

    fn from_f64(value: f64) -> Self {
        Logical::from(value != 0.0)
    }

    fn unwrap_vector(vector: Vector) -> std::result::Result<Vec<Self>, Vector> {
        match vector {
            Vector::Logical(values) => Ok(values),
            other => Err(other),
        }
    }
}
