//! Core type definitions: DType, Shape.

/// Supported data types for tensor elements.
///
/// "Unknown" is not a member of this set; an undetermined element type is
/// represented as `Option<DType>::None` in attribute slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    F32,
    F64,
    F16,
    I8,
    U8,
    I32,
    I64,
    Bool,
}

impl DType {
    /// Size in bytes of a single element.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
            DType::F16 => 2,
            DType::I8 | DType::U8 | DType::Bool => 1,
        }
    }

    /// Whether this is a floating-point type.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64 | DType::F16)
    }

    /// Whether this is an integer type (`Bool` is neither float nor integer).
    pub fn is_integer(self) -> bool {
        matches!(self, DType::I8 | DType::U8 | DType::I32 | DType::I64)
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
            DType::F16 => write!(f, "float16"),
            DType::I8 => write!(f, "int8"),
            DType::U8 => write!(f, "uint8"),
            DType::I32 => write!(f, "int32"),
            DType::I64 => write!(f, "int64"),
            DType::Bool => write!(f, "bool"),
        }
    }
}

/// Tensor shape attribute.
///
/// `None` means the rank itself is unknown. With a known rank, individual
/// dimension sizes may still be undetermined, marked by a negative value
/// (canonically [`Shape::UNKNOWN_DIM`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape(pub Option<Vec<i64>>);

impl Shape {
    /// Sentinel for a dimension whose size is not yet determined.
    pub const UNKNOWN_DIM: i64 = -1;

    pub fn new(dims: impl Into<Vec<i64>>) -> Self {
        Self(Some(dims.into()))
    }

    /// Shape of unknown rank.
    pub fn unknown() -> Self {
        Self(None)
    }

    /// Number of dimensions, if the rank is known.
    pub fn ndim(&self) -> Option<usize> {
        self.0.as_ref().map(|d| d.len())
    }

    /// Dimension sizes, if the rank is known.
    pub fn dims(&self) -> Option<&[i64]> {
        self.0.as_deref()
    }

    /// Whether the rank and every dimension size are determined.
    pub fn is_fully_known(&self) -> bool {
        self.0.as_ref().is_some_and(|d| d.iter().all(|&x| x >= 0))
    }

    /// Total number of elements; `None` unless fully known.
    pub fn numel(&self) -> Option<i64> {
        if self.is_fully_known() {
            self.0.as_ref().map(|d| d.iter().product())
        } else {
            None
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            None => write!(f, "?"),
            Some(dims) => {
                write!(f, "[")?;
                for (i, &d) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if d < 0 {
                        write!(f, "?")?;
                    } else {
                        write!(f, "{d}")?;
                    }
                }
                write!(f, "]")
            }
        }
    }
}
