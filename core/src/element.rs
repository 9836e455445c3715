//! In-memory data elements and sequence items.
use crate::header::{Length, Tag, VR};
use crate::value::Value;
use std::convert::TryFrom;

/// A data type that represents and owns a DICOM data element.
///
/// The value representation is optional:
/// when absent, it is meant to be inferred from a data dictionary
/// at the time of encoding.
///
/// Data elements are never modified by the encoder.
#[derive(Debug, Clone)]
pub struct DataElement {
    tag: Tag,
    vr: Option<VR>,
    len: Length,
    value: Value,
}

/// Determine the default value length of a value:
/// its exact byte length for primitive values,
/// undefined for sequences and pixel fragment sequences.
fn default_length(value: &Value) -> Length {
    match value.primitive_byte_len() {
        Some(len) => byte_length(len),
        None => Length::UNDEFINED,
    }
}

/// Convert a byte count into a defined length.
/// Counts which do not fit saturate to [`Length::MAX`],
/// so that they are never mistaken for an undefined length.
fn byte_length(len: usize) -> Length {
    u32::try_from(len)
        .ok()
        .filter(|len| *len <= Length::MAX.0)
        .map(Length)
        .unwrap_or(Length::MAX)
}

impl DataElement {
    /// Create a data element from the given parts,
    /// with a value length derived from the value.
    ///
    /// Primitive values get their exact byte length,
    /// whereas sequences and encapsulated pixel data
    /// are given an undefined length.
    pub fn new<T>(tag: Tag, vr: VR, value: T) -> Self
    where
        T: Into<Value>,
    {
        let value = value.into();
        DataElement {
            tag,
            vr: Some(vr),
            len: default_length(&value),
            value,
        }
    }

    /// Create a data element from the given parts,
    /// with an explicitly declared value length.
    ///
    /// The length is taken verbatim:
    /// it is only checked against the value at encoding time.
    pub fn new_with_len<T>(tag: Tag, vr: VR, len: Length, value: T) -> Self
    where
        T: Into<Value>,
    {
        DataElement {
            tag,
            vr: Some(vr),
            len,
            value: value.into(),
        }
    }

    /// Create a data element without a declared value representation.
    ///
    /// The VR will be resolved from the data dictionary when encoding.
    pub fn inferred<T>(tag: Tag, value: T) -> Self
    where
        T: Into<Value>,
    {
        let value = value.into();
        DataElement {
            tag,
            vr: None,
            len: default_length(&value),
            value,
        }
    }

    /// Create a data element with an optional VR
    /// and an explicitly declared value length.
    pub fn from_parts(tag: Tag, vr: Option<VR>, len: Length, value: Value) -> Self {
        DataElement {
            tag,
            vr,
            len,
            value,
        }
    }

    /// Create an empty data element.
    pub fn empty(tag: Tag, vr: VR) -> Self {
        DataElement {
            tag,
            vr: Some(vr),
            len: Length(0),
            value: Value::Empty,
        }
    }

    /// Retrieve the element's tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Retrieve the declared value representation, if any.
    #[inline]
    pub fn vr(&self) -> Option<VR> {
        self.vr
    }

    /// Retrieve the declared value length.
    #[inline]
    pub fn length(&self) -> Length {
        self.len
    }

    /// Retrieve the data value.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Move the data value out of the element, discarding the rest.
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl PartialEq for DataElement {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && self.vr == other.vr
            && self.len.inner_eq(other.len)
            && self.value == other.value
    }
}

/// A sequence item: an ordered collection of data elements
/// with its own value length.
///
/// Items with an undefined length are terminated
/// by an item delimitation item in the encoded stream.
#[derive(Debug, Clone)]
pub struct Item {
    elements: Vec<DataElement>,
    len: Length,
}

impl Item {
    /// Create an item of undefined length.
    pub fn new(elements: impl IntoIterator<Item = DataElement>) -> Self {
        Item {
            elements: elements.into_iter().collect(),
            len: Length::UNDEFINED,
        }
    }

    /// Create an item with an explicitly declared length,
    /// which must match the byte count of its encoded elements.
    pub fn with_length(elements: impl IntoIterator<Item = DataElement>, len: Length) -> Self {
        Item {
            elements: elements.into_iter().collect(),
            len,
        }
    }

    /// Retrieve the declared item length.
    #[inline]
    pub fn length(&self) -> Length {
        self.len
    }

    /// Retrieve the item's data elements.
    #[inline]
    pub fn elements(&self) -> &[DataElement] {
        &self.elements
    }

    /// Fetch the first element in the item with the given tag.
    pub fn element(&self, tag: Tag) -> Option<&DataElement> {
        self.elements.iter().find(|e| e.tag() == tag)
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.len.inner_eq(other.len) && self.elements == other.elements
    }
}
