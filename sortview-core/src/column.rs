//! Fixed-width column storage.
//!
//! Every kind uses an NA-sentinel encoding: one slot per row, with the
//! minimum representable value reserved for null. Booleans are packed into
//! one `i8` per row (`0` false, `1` true, `i8::MIN` null).

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SortError};

pub const NA_I1: i8 = i8::MIN;
pub const NA_I2: i16 = i16::MIN;
pub const NA_I4: i32 = i32::MIN;
pub const NA_I8: i64 = i64::MIN;
pub const NA_BOOL: i8 = i8::MIN;
pub const BOOL_FALSE: i8 = 0;
pub const BOOL_TRUE: i8 = 1;

/// Storage kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Packed boolean with null.
    Bool1,
    Int1,
    Int2,
    Int4,
    Int8,
}

impl ColumnKind {
    pub const ALL: [ColumnKind; 5] = [
        ColumnKind::Bool1,
        ColumnKind::Int1,
        ColumnKind::Int2,
        ColumnKind::Int4,
        ColumnKind::Int8,
    ];

    /// Short storage code, e.g. `"i4i"`.
    pub fn code(self) -> &'static str {
        match self {
            ColumnKind::Bool1 => "i1b",
            ColumnKind::Int1 => "i1i",
            ColumnKind::Int2 => "i2i",
            ColumnKind::Int4 => "i4i",
            ColumnKind::Int8 => "i8i",
        }
    }

    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or_else(|| SortError::InvalidKind {
                kind: code.to_string(),
            })
    }

    /// Bytes per row in storage.
    pub fn byte_width(self) -> usize {
        match self {
            ColumnKind::Bool1 | ColumnKind::Int1 => 1,
            ColumnKind::Int2 => 2,
            ColumnKind::Int4 => 4,
            ColumnKind::Int8 => 8,
        }
    }

    /// Bit width of the radix key produced for this kind.
    pub fn key_bits(self) -> u32 {
        match self {
            ColumnKind::Bool1 => 2,
            other => 8 * other.byte_width() as u32,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ColumnKind {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// A single non-null cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    Int(i64),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
        }
    }
}

/// Typed storage, one variant per [`ColumnKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnData {
    Bool1(Vec<i8>),
    Int1(Vec<i8>),
    Int2(Vec<i16>),
    Int4(Vec<i32>),
    Int8(Vec<i64>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Bool1(_) => ColumnKind::Bool1,
            ColumnData::Int1(_) => ColumnKind::Int1,
            ColumnData::Int2(_) => ColumnKind::Int2,
            ColumnData::Int4(_) => ColumnKind::Int4,
            ColumnData::Int8(_) => ColumnKind::Int8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool1(v) | ColumnData::Int1(v) => v.len(),
            ColumnData::Int2(v) => v.len(),
            ColumnData::Int4(v) => v.len(),
            ColumnData::Int8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Null test for an in-range row.
    #[inline]
    pub fn is_null(&self, row: usize) -> bool {
        match self {
            ColumnData::Bool1(v) => v[row] == NA_BOOL,
            ColumnData::Int1(v) => v[row] == NA_I1,
            ColumnData::Int2(v) => v[row] == NA_I2,
            ColumnData::Int4(v) => v[row] == NA_I4,
            ColumnData::Int8(v) => v[row] == NA_I8,
        }
    }

    /// Cell at an in-range row.
    #[inline]
    pub fn get(&self, row: usize) -> Option<Value> {
        if self.is_null(row) {
            return None;
        }
        Some(match self {
            ColumnData::Bool1(v) => Value::Bool(v[row] == BOOL_TRUE),
            ColumnData::Int1(v) => Value::Int(i64::from(v[row])),
            ColumnData::Int2(v) => Value::Int(i64::from(v[row])),
            ColumnData::Int4(v) => Value::Int(i64::from(v[row])),
            ColumnData::Int8(v) => Value::Int(v[row]),
        })
    }

    /// Copy the rows named by `rows`, in that order.
    pub fn gather(&self, rows: &[u32]) -> ColumnData {
        fn pick<T: Copy>(v: &[T], rows: &[u32]) -> Vec<T> {
            rows.iter().map(|&r| v[r as usize]).collect()
        }
        match self {
            ColumnData::Bool1(v) => ColumnData::Bool1(pick(v, rows)),
            ColumnData::Int1(v) => ColumnData::Int1(pick(v, rows)),
            ColumnData::Int2(v) => ColumnData::Int2(pick(v, rows)),
            ColumnData::Int4(v) => ColumnData::Int4(pick(v, rows)),
            ColumnData::Int8(v) => ColumnData::Int8(pick(v, rows)),
        }
    }
}

/// A named, immutable column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

/// Encode optional integers with the kind's null sentinel, rejecting
/// non-null values that collide with it.
fn encode_ints<T: Copy + PartialEq>(
    name: &str,
    values: impl IntoIterator<Item = Option<T>>,
    na: T,
) -> Result<Vec<T>> {
    values
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            Some(x) if x == na => Err(SortError::SentinelCollision {
                column: name.to_string(),
                row,
            }),
            Some(x) => Ok(x),
            None => Ok(na),
        })
        .collect()
}

/// Every boolean byte must be `0`, `1` or the NA sentinel.
fn check_bool_bytes(values: &[i8]) -> Result<()> {
    match values
        .iter()
        .position(|&v| v != BOOL_FALSE && v != BOOL_TRUE && v != NA_BOOL)
    {
        Some(row) => Err(SortError::InvalidRawData {
            detail: format!("row {row}: byte {:#04x} is not a boolean", values[row] as u8),
        }),
        None => Ok(()),
    }
}

impl Column {
    /// Wrap existing storage. Boolean payloads are validated.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Result<Self> {
        if let ColumnData::Bool1(v) = &data {
            check_bool_bytes(v)?;
        }
        Ok(Self::from_parts(name, data))
    }

    /// Storage already known to be well formed.
    pub(crate) fn from_parts(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn bool1(name: impl Into<String>, values: impl IntoIterator<Item = Option<bool>>) -> Self {
        let data = values
            .into_iter()
            .map(|v| match v {
                Some(true) => BOOL_TRUE,
                Some(false) => BOOL_FALSE,
                None => NA_BOOL,
            })
            .collect();
        Self::from_parts(name, ColumnData::Bool1(data))
    }

    pub fn int1(name: impl Into<String>, values: impl IntoIterator<Item = Option<i8>>) -> Result<Self> {
        let name = name.into();
        let data = encode_ints(&name, values, NA_I1)?;
        Ok(Self::from_parts(name, ColumnData::Int1(data)))
    }

    pub fn int2(name: impl Into<String>, values: impl IntoIterator<Item = Option<i16>>) -> Result<Self> {
        let name = name.into();
        let data = encode_ints(&name, values, NA_I2)?;
        Ok(Self::from_parts(name, ColumnData::Int2(data)))
    }

    pub fn int4(name: impl Into<String>, values: impl IntoIterator<Item = Option<i32>>) -> Result<Self> {
        let name = name.into();
        let data = encode_ints(&name, values, NA_I4)?;
        Ok(Self::from_parts(name, ColumnData::Int4(data)))
    }

    pub fn int8(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Result<Self> {
        let name = name.into();
        let data = encode_ints(&name, values, NA_I8)?;
        Ok(Self::from_parts(name, ColumnData::Int8(data)))
    }

    /// Decode little-endian raw storage declared with a kind code.
    ///
    /// Sentinel values in the bytes are nulls. Boolean bytes must be `0`,
    /// `1` or `0x80`.
    pub fn from_raw(name: impl Into<String>, code: &str, bytes: &[u8]) -> Result<Self> {
        let kind = ColumnKind::from_code(code)?;
        let width = kind.byte_width();
        if bytes.len() % width != 0 {
            return Err(SortError::InvalidRawData {
                detail: format!(
                    "{} bytes is not a multiple of the {}-byte width of {}",
                    bytes.len(),
                    width,
                    kind
                ),
            });
        }

        let data = match kind {
            ColumnKind::Bool1 => {
                let out: Vec<i8> = bytes.iter().map(|&b| b as i8).collect();
                check_bool_bytes(&out)?;
                ColumnData::Bool1(out)
            }
            ColumnKind::Int1 => ColumnData::Int1(bytes.iter().map(|&b| b as i8).collect()),
            ColumnKind::Int2 => ColumnData::Int2(
                bytes
                    .chunks_exact(2)
                    .map(|c| i16::from_le_bytes([c[0], c[1]]))
                    .collect(),
            ),
            ColumnKind::Int4 => ColumnData::Int4(
                bytes
                    .chunks_exact(4)
                    .map(|c| {
                        let mut buf = [0u8; 4];
                        buf.copy_from_slice(c);
                        i32::from_le_bytes(buf)
                    })
                    .collect(),
            ),
            ColumnKind::Int8 => ColumnData::Int8(
                bytes
                    .chunks_exact(8)
                    .map(|c| {
                        let mut buf = [0u8; 8];
                        buf.copy_from_slice(c);
                        i64::from_le_bytes(buf)
                    })
                    .collect(),
            ),
        };
        Ok(Self::from_parts(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_null(&self, row: usize) -> bool {
        self.data.is_null(row)
    }

    pub fn null_count(&self) -> usize {
        (0..self.len()).filter(|&r| self.data.is_null(r)).count()
    }

    /// Bounds-checked cell read.
    pub fn value(&self, row: usize) -> Result<Option<Value>> {
        if row >= self.len() {
            return Err(SortError::RowOutOfBounds {
                row,
                nrows: self.len(),
            });
        }
        Ok(self.data.get(row))
    }

    /// All cells in storage order.
    pub fn values(&self) -> impl Iterator<Item = Option<Value>> + '_ {
        (0..self.len()).map(move |r| self.data.get(r))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
