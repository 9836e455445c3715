//! DICOM encoding primitives for the DICOM file writer.
//!
//! This crate provides the low level pieces for writing
//! data in accordance to the DICOM standard:
//!
//! - [`encode`] holds the framing encoders,
//!   which lay out tags, element headers, item headers and delimiters
//!   for each combination of byte order and VR encoding;
//! - [`sink`] holds the [`ByteSink`],
//!   a stateful binary writer with a mutable framing configuration;
//! - [`transfer_syntax`] hosts the concept of [transfer syntax specifier]
//!   and the registry of transfer syntaxes known to the writer.
//!
//! For the time being, all APIs are based on synchronous I/O.
//!
//! [transfer syntax specifier]: ./transfer_syntax/index.html

pub mod encode;
pub mod sink;
pub mod transfer_syntax;

pub use byteordered::Endianness;
pub use encode::{Encode, Framing};
pub use sink::ByteSink;
pub use transfer_syntax::Codec;
pub use transfer_syntax::TransferSyntax;
