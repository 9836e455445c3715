//! This module includes a high level abstraction over a DICOM data element's value.
//!
//! [`Value`] is a closed sum type over every value shape
//! that a data element may hold in memory:
//! binary numbers of a fixed width,
//! raw bytes, raw text,
//! nested data set items,
//! and encapsulated pixel data fragments.
use crate::element::Item;
use crate::header::Tag;
use smallvec::SmallVec;
use std::fmt;

/// An aggregation of one or more elements in a value.
pub type C<T> = SmallVec<[T; 2]>;

/// Type alias for the in-memory pixel data fragment data.
pub type InMemFragment = Vec<u8>;

/// Representation of a DICOM data element value.
///
/// Text values are kept as they should appear in the encoded stream,
/// including the trailing padding character.
/// Multiple text values are expected to be already joined by a backslash.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No data. Used for any value of length 0.
    Empty,
    /// A sequence of unsigned 16-bit integers.
    /// Used for the US and OW value representations.
    U16(C<u16>),
    /// A sequence of signed 16-bit integers.
    /// Used for the SS value representation.
    I16(C<i16>),
    /// A sequence of unsigned 32-bit integers.
    /// Used for the UL and OL value representations.
    U32(C<u32>),
    /// A sequence of signed 32-bit integers.
    /// Used for the SL value representation.
    I32(C<i32>),
    /// A sequence of unsigned 64-bit integers.
    /// Used for the UV and OV value representations.
    U64(C<u64>),
    /// A sequence of signed 64-bit integers.
    /// Used for the SV value representation.
    I64(C<i64>),
    /// A sequence of 32-bit floating point numbers.
    /// Used for the FL and OF value representations.
    F32(C<f32>),
    /// A sequence of 64-bit floating point numbers.
    /// Used for the FD and OD value representations.
    F64(C<f64>),
    /// A sequence of attribute tags.
    /// Used for the AT value representation.
    Tags(C<Tag>),
    /// A raw byte buffer.
    /// Used for OB and UN, and accepted by any textual representation.
    Bytes(Vec<u8>),
    /// Raw text, written verbatim.
    Text(String),
    /// A sequence of data set items (SQ).
    Sequence(C<Item>),
    /// Encapsulated pixel data: a basic offset table and compressed fragments.
    PixelSequence(PixelFragmentSequence),
}

impl Value {
    /// Retrieve the specific type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Empty => ValueType::Empty,
            Value::U16(_) => ValueType::U16,
            Value::I16(_) => ValueType::I16,
            Value::U32(_) => ValueType::U32,
            Value::I32(_) => ValueType::I32,
            Value::U64(_) => ValueType::U64,
            Value::I64(_) => ValueType::I64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::Tags(_) => ValueType::Tags,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Text(_) => ValueType::Text,
            Value::Sequence(_) => ValueType::Sequence,
            Value::PixelSequence(_) => ValueType::PixelSequence,
        }
    }

    /// Whether this value is a primitive value
    /// (neither a sequence of items nor a pixel fragment sequence).
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Sequence(_) | Value::PixelSequence(_))
    }

    /// Determine the number of bytes that this value occupies
    /// once encoded, without any padding.
    ///
    /// Returns `None` for sequences and pixel fragment sequences,
    /// whose size depends on the transfer syntax.
    pub fn primitive_byte_len(&self) -> Option<usize> {
        match self {
            Value::Empty => Some(0),
            Value::U16(v) => Some(v.len() * 2),
            Value::I16(v) => Some(v.len() * 2),
            Value::U32(v) => Some(v.len() * 4),
            Value::I32(v) => Some(v.len() * 4),
            Value::U64(v) => Some(v.len() * 8),
            Value::I64(v) => Some(v.len() * 8),
            Value::F32(v) => Some(v.len() * 4),
            Value::F64(v) => Some(v.len() * 8),
            Value::Tags(v) => Some(v.len() * 4),
            Value::Bytes(v) => Some(v.len()),
            Value::Text(v) => Some(v.len()),
            Value::Sequence(_) | Value::PixelSequence(_) => None,
        }
    }

    /// Obtain the items of a sequence value.
    pub fn items(&self) -> Option<&[Item]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Obtain the value as raw text, if it is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Item>> for Value {
    fn from(items: Vec<Item>) -> Self {
        Value::Sequence(C::from_vec(items))
    }
}

impl From<PixelFragmentSequence> for Value {
    fn from(value: PixelFragmentSequence) -> Self {
        Value::PixelSequence(value)
    }
}

/// An enum representing the shape of a [`Value`],
/// without its content.
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ValueType {
    /// No data.
    Empty,
    /// Unsigned 16-bit integers.
    U16,
    /// Signed 16-bit integers.
    I16,
    /// Unsigned 32-bit integers.
    U32,
    /// Signed 32-bit integers.
    I32,
    /// Unsigned 64-bit integers.
    U64,
    /// Signed 64-bit integers.
    I64,
    /// 32-bit floating point numbers.
    F32,
    /// 64-bit floating point numbers.
    F64,
    /// Attribute tags.
    Tags,
    /// Raw bytes.
    Bytes,
    /// Raw text.
    Text,
    /// Data set items.
    Sequence,
    /// Encapsulated pixel data fragments.
    PixelSequence,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            ValueType::Empty => "empty",
            ValueType::U16 => "u16",
            ValueType::I16 => "i16",
            ValueType::U32 => "u32",
            ValueType::I32 => "i32",
            ValueType::U64 => "u64",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
            ValueType::Tags => "tags",
            ValueType::Bytes => "bytes",
            ValueType::Text => "text",
            ValueType::Sequence => "items",
            ValueType::PixelSequence => "pixel fragments",
        };
        f.write_str(s)
    }
}

/// A sequence of compressed pixel data fragments,
/// as found in the Pixel Data attribute of encapsulated transfer syntaxes.
///
/// The basic offset table is encoded as the first item of the sequence,
/// and may be empty.
/// Each fragment is encoded as a separate item.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelFragmentSequence {
    /// The value contents of the basic offset table.
    offset_table: C<u32>,
    /// The sequence of pixel data fragments.
    fragments: C<InMemFragment>,
}

impl PixelFragmentSequence {
    /// Construct a DICOM pixel sequence
    /// from a basic offset table and a list of fragments.
    ///
    /// **Note:** This function does not validate the offset table
    /// against the fragments.
    pub fn new(offset_table: impl Into<C<u32>>, fragments: impl Into<C<InMemFragment>>) -> Self {
        PixelFragmentSequence {
            offset_table: offset_table.into(),
            fragments: fragments.into(),
        }
    }

    /// Construct a DICOM pixel sequence with an empty offset table.
    pub fn new_fragments(fragments: impl Into<C<InMemFragment>>) -> Self {
        PixelFragmentSequence {
            offset_table: C::new(),
            fragments: fragments.into(),
        }
    }

    /// Get a reference to the basic offset table.
    pub fn offset_table(&self) -> &[u32] {
        &self.offset_table
    }

    /// Get a reference to the pixel data fragments.
    pub fn fragments(&self) -> &[InMemFragment] {
        &self.fragments
    }
}

/// Construct a DICOM value.
///
/// ```
/// # use p10_core::{dicom_value, Value};
/// assert_eq!(dicom_value!(), Value::Empty);
/// assert_eq!(dicom_value!(U16, [1, 2]).primitive_byte_len(), Some(4));
/// assert_eq!(dicom_value!(Bytes, [0, 1]), Value::Bytes(vec![0, 1]));
/// assert_eq!(dicom_value!(Text, "DOE^JOHN "), Value::Text("DOE^JOHN ".into()));
/// ```
#[macro_export]
macro_rules! dicom_value {
    () => {
        $crate::value::Value::Empty
    };
    (Text, $text:expr) => {
        $crate::value::Value::Text(::std::string::String::from($text))
    };
    (Bytes, [$($elem:expr),* $(,)?]) => {
        $crate::value::Value::Bytes(vec![$($elem,)*])
    };
    (Bytes, $bytes:expr) => {
        $crate::value::Value::Bytes(::std::vec::Vec::from($bytes))
    };
    ($typ:ident, [$($elem:expr),* $(,)?]) => {
        $crate::value::Value::$typ($crate::smallvec::smallvec![$($elem,)*])
    };
    ($typ:ident, $elem:expr) => {
        $crate::value::Value::$typ($crate::smallvec::smallvec![$elem])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_of_primitive_values() {
        assert_eq!(Value::Empty.primitive_byte_len(), Some(0));
        assert_eq!(dicom_value!(U16, [1, 2, 3]).primitive_byte_len(), Some(6));
        assert_eq!(dicom_value!(F64, 1.5).primitive_byte_len(), Some(8));
        assert_eq!(
            dicom_value!(Tags, [Tag(0x0028, 0x2110)]).primitive_byte_len(),
            Some(4)
        );
        assert_eq!(Value::from("ABC ").primitive_byte_len(), Some(4));
        assert_eq!(Value::Sequence(C::new()).primitive_byte_len(), None);
    }

    #[test]
    fn value_type_names() {
        assert_eq!(dicom_value!(U32, 7).value_type(), ValueType::U32);
        assert_eq!(ValueType::PixelSequence.to_string(), "pixel fragments");
        assert!(!Value::from(PixelFragmentSequence::new_fragments(vec![vec![0, 1]])).is_primitive());
    }
}
