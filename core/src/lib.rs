#![crate_type = "lib"]
#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core library of the DICOM file writer,
//! containing the data model consumed by the encoder.
//!
//! The current structure of this crate is as follows:
//!
//! - [`header`] comprises the DICOM element header primitives:
//!   tags, value representations and value lengths.
//! - [`value`] holds the closed representation of data element values.
//! - [`element`] defines data elements and sequence items.
//! - [`dataset`] defines an ordered, in-memory data set.
//! - [`dictionary`] describes common behavior of DICOM data dictionaries,
//!   which translate tags to an entry with the expected value representation.

pub mod dataset;
pub mod dictionary;
pub mod element;
pub mod header;
pub mod value;

pub use dataset::DataSet;
pub use dictionary::{DataDictionary, DataDictionaryEntry, VirtualVr};
pub use element::{DataElement, Item};
pub use header::{DataElementHeader, Length, Tag, VR};
pub use value::{PixelFragmentSequence, Value};

// re-export crates that are part of the public API
pub use smallvec;
