//! This crate implements the standard DICOM data element dictionary
//! and a few constants used by the DICOM file writer.
//!
//! ## Run-time dictionary
//!
//! - [`data_element`]: contains information about the
//!   DICOM attributes covered by the writer,
//!   most notably their expected value representations.
//!   It is used by default whenever a value representation
//!   has to be resolved from a tag.
//!
//! The records in this dictionary are collected from [DICOM PS3.6].
//! The dictionary is provided as a singleton
//! behind a unit type for efficiency and ease of use.
//!
//! [DICOM PS3.6]: https://dicom.nema.org/medical/dicom/current/output/chtml/part06/ps3.6.html
//!
//! ## Constants
//!
//! The following modules contain constant declarations,
//! which perform an equivalent mapping at compile time,
//! thus without incurring a look-up cost:
//!
//! - [`tags`], which map an attribute alias to a DICOM tag
//! - [`uids`], for the transfer syntax unique identifiers
pub mod data_element;

pub mod tags;
pub mod uids;

pub use data_element::{StandardDataDictionary, StandardDataDictionaryRegistry};
