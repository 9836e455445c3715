#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! This crate writes in-memory DICOM data sets
//! in the DICOM Part 10 file format:
//! a 128-byte preamble, the `DICM` magic code,
//! the file meta group in explicit VR little endian,
//! and the main data set in its own transfer syntax.
//!
//! The output is byte exact:
//! every element is validated against its value representation
//! before it is written, and any inconsistency is reported as an [`Error`]
//! instead of being silently corrected.
//!
//! # Example
//!
//! ```no_run
//! use p10_core::{dicom_value, DataElement, DataSet, VR};
//! use p10_dictionary_std::tags;
//! use p10_writer::WriteOptions;
//!
//! let dataset: DataSet = vec![
//!     DataElement::new(
//!         tags::FILE_META_INFORMATION_VERSION,
//!         VR::OB,
//!         dicom_value!(Bytes, [0x00, 0x01]),
//!     ),
//!     DataElement::new(tags::TRANSFER_SYNTAX_UID, VR::UI, "1.2.840.10008.1.2.1\0"),
//!     DataElement::new(tags::PATIENT_NAME, VR::PN, "DOE^JOHN"),
//! ]
//! .into_iter()
//! .collect();
//!
//! p10_writer::write_to_file("out.dcm", &dataset, &WriteOptions::new())?;
//! # Result::<(), Box<dyn std::error::Error>>::Ok(())
//! ```
//!
//! The main pieces are:
//!
//! - [`resolve_vr`], which reconciles declared VRs with the data dictionary;
//! - [`encode_element`], which writes a single data element,
//!   including sequences of items and encapsulated pixel data;
//! - [`write_file_header`], the file meta group builder;
//! - [`FileWriter`], which puts it all together.
pub mod element;
pub mod error;
pub mod meta;
pub mod options;
mod pixeldata;
mod sequence;
mod value;
pub mod vr;
pub mod writer;

pub use crate::element::{encode_element, encoded_len};
pub use crate::error::{Error, Result};
pub use crate::meta::write_file_header;
pub use crate::options::WriteOptions;
pub use crate::vr::resolve_vr;
pub use crate::writer::{resolve_transfer_syntax, write, write_to_file, FileWriter};
