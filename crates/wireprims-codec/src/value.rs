use bytes::Bytes;

/// A single decoded scalar or byte string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned integer (`u<N>` fields).
    Uint(u64),
    /// Signed integer (`s<N>` fields), sign-extended to 64 bits.
    Int(i64),
    /// Floating-point value (`f4` widens exactly to f64).
    Float(f64),
    /// Byte string (`c<N>` and `z` fields).
    Bytes(Bytes),
}

impl Value {
    pub fn as_uint(&self) -> Option<u64> {
        match *self {
            Value::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The value as a non-negative count, if it is numeric.
    ///
    /// This is what `c0` consumes to take its length from the previously
    /// decoded field. Negative integers and negative or non-finite floats
    /// have no count interpretation.
    pub fn numeric(&self) -> Option<u64> {
        match *self {
            Value::Uint(v) => Some(v),
            Value::Int(v) => u64::try_from(v).ok(),
            Value::Float(v) if v.is_finite() && v >= 0.0 => Some(v as u64),
            _ => None,
        }
    }
}

/// The successful outcome of one decode pass: how many input bytes the pass
/// consumed, and the values it produced in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub consumed: usize,
    pub values: Vec<Value>,
}
