//! Canonical field value encoding.
//!
//! Every field value is reduced to a [`FieldValue`] and written with a
//! fixed, tagged, length-prefixed byte encoding. The encoding is part of
//! the fingerprint format: changing it invalidates every stored
//! fingerprint, so it has no runtime options.
//!
//! # Format
//!
//! | Variant | Bytes |
//! |---------|-------|
//! | `Null`  | `0x00` |
//! | `Bool`  | `0x01`, `0x00`/`0x01` |
//! | `Int`   | `0x02`, i64 LE |
//! | `UInt`  | `0x03`, u64 LE |
//! | `Float` | `0x04`, f64 bits LE (`-0.0` → `0.0`, one NaN) |
//! | `Str`   | `0x05`, u32 LE length, UTF-8 bytes |
//! | `Bytes` | `0x06`, u32 LE length, bytes |
//! | `List`  | `0x07`, u32 LE count, items |
//! | `Map`   | `0x08`, u32 LE count, (u32 LE key length, key, value) sorted by key |

use std::collections::{BTreeMap, HashMap};

/// Revision of the byte format below. Bumped on any change to it.
pub const ENCODING_VERSION: u32 = 1;

const TAG_NULL: u8 = 0x00;
const TAG_BOOL: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_UINT: u8 = 0x03;
const TAG_FLOAT: u8 = 0x04;
const TAG_STR: u8 = 0x05;
const TAG_BYTES: u8 = 0x06;
const TAG_LIST: u8 = 0x07;
const TAG_MAP: u8 = 0x08;

/// A field value in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<FieldValue>),
    /// Keys are kept sorted, so two maps with the same entries encode identically.
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Append the canonical encoding of this value to `out`.
    pub fn write_canonical(&self, out: &mut Vec<u8>) {
        match self {
            Self::Null => out.push(TAG_NULL),
            Self::Bool(b) => {
                out.push(TAG_BOOL);
                out.push(u8::from(*b));
            }
            Self::Int(n) => {
                out.push(TAG_INT);
                out.extend_from_slice(&n.to_le_bytes());
            }
            Self::UInt(n) => {
                out.push(TAG_UINT);
                out.extend_from_slice(&n.to_le_bytes());
            }
            Self::Float(f) => {
                out.push(TAG_FLOAT);
                out.extend_from_slice(&canonical_float_bits(*f).to_le_bytes());
            }
            Self::Str(s) => {
                out.push(TAG_STR);
                write_len_prefixed(out, s.as_bytes());
            }
            Self::Bytes(b) => {
                out.push(TAG_BYTES);
                write_len_prefixed(out, b);
            }
            Self::List(items) => {
                out.push(TAG_LIST);
                write_len(out, items.len());
                for item in items {
                    item.write_canonical(out);
                }
            }
            Self::Map(entries) => {
                out.push(TAG_MAP);
                write_len(out, entries.len());
                for (key, value) in entries {
                    write_len_prefixed(out, key.as_bytes());
                    value.write_canonical(out);
                }
            }
        }
    }

    /// The canonical encoding as a fresh buffer.
    #[must_use]
    pub fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_canonical(&mut out);
        out
    }
}

/// Bit pattern used for floats: all NaNs collapse, negative zero becomes zero.
fn canonical_float_bits(f: f64) -> u64 {
    if f.is_nan() {
        f64::NAN.to_bits()
    } else if f == 0.0 {
        0
    } else {
        f.to_bits()
    }
}

/// Write a u32 LE length. Lengths beyond `u32::MAX` saturate; such values
/// are far outside anything a record field holds.
pub(crate) fn write_len(out: &mut Vec<u8>, len: usize) {
    let len = u32::try_from(len).unwrap_or(u32::MAX);
    out.extend_from_slice(&len.to_le_bytes());
}

pub(crate) fn write_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    write_len(out, bytes.len());
    out.extend_from_slice(bytes);
}

// ── Conversions ──────────────────────────────────────────────

/// Conversion of a Rust value into its canonical [`FieldValue`].
///
/// Implement this for your own field types when they are not covered
/// by the blanket implementations below.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Bool(*self)
    }
}

macro_rules! signed_to_field_value {
    ($($t:ty),*) => {$(
        impl ToFieldValue for $t {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::Int(i64::from(*self))
            }
        }
    )*};
}

macro_rules! unsigned_to_field_value {
    ($($t:ty),*) => {$(
        impl ToFieldValue for $t {
            fn to_field_value(&self) -> FieldValue {
                FieldValue::UInt(u64::from(*self))
            }
        }
    )*};
}

signed_to_field_value!(i8, i16, i32, i64);
unsigned_to_field_value!(u8, u16, u32, u64);

impl ToFieldValue for isize {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl ToFieldValue for usize {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::UInt(u64::try_from(*self).unwrap_or(u64::MAX))
    }
}

impl ToFieldValue for f32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(f64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Str(self.to_string())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Str(self.clone())
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_ref().map_or(FieldValue::Null, ToFieldValue::to_field_value)
    }
}

impl<T: ToFieldValue> ToFieldValue for [T] {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::List(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_slice().to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for BTreeMap<String, T> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_field_value()))
                .collect(),
        )
    }
}

impl<T: ToFieldValue, S> ToFieldValue for HashMap<String, T, S> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Map(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_field_value()))
                .collect(),
        )
    }
}

impl ToFieldValue for serde_json::Value {
    fn to_field_value(&self) -> FieldValue {
        use serde_json::Value;

        match self {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    FieldValue::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    FieldValue::Int(i)
                } else {
                    FieldValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => FieldValue::Str(s.clone()),
            Value::Array(items) => {
                FieldValue::List(items.iter().map(ToFieldValue::to_field_value).collect())
            }
            Value::Object(map) => FieldValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_field_value()))
                    .collect(),
            ),
        }
    }
}
