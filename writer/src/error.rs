//! Error types for the file writer.
use p10_core::value::ValueType;
use p10_core::{Tag, VirtualVr, VR};
use p10_encoding::sink;
use snafu::{Backtrace, Snafu};
use std::path::PathBuf;

/// An error which may occur while writing a DICOM file.
///
/// All errors are terminal:
/// the output is left in an unspecified state
/// and should be discarded by the caller.
#[derive(Debug, Snafu)]
#[non_exhaustive]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The declared value representation conflicts with the data dictionary.
    #[snafu(display(
        "VR mismatch for tag {}: element declares {}, but {} is expected",
        tag,
        declared,
        expected
    ))]
    VrMismatch {
        tag: Tag,
        declared: VR,
        expected: VirtualVr,
        backtrace: Backtrace,
    },

    /// No value representation was declared and none could be resolved.
    #[snafu(display("Element {} has no value representation", tag))]
    MissingVr { tag: Tag, backtrace: Backtrace },

    #[snafu(display("Value length of element {} must be even, but it is {}", tag, len))]
    OddValueLength {
        tag: Tag,
        len: u32,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Value of element {} does not match its VR {}: expected {}, found {}",
        tag,
        vr,
        expected,
        actual
    ))]
    ValueTypeMismatch {
        tag: Tag,
        vr: VR,
        expected: &'static str,
        actual: ValueType,
        backtrace: Backtrace,
    },

    #[snafu(display("Undefined length is not supported for element {} with VR {}", tag, vr))]
    UnsupportedUndefinedLength {
        tag: Tag,
        vr: VR,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Value of element {} ({} bytes) does not fit in the length field of VR {}",
        tag,
        len,
        vr
    ))]
    ValueTooLong {
        tag: Tag,
        vr: VR,
        len: u64,
        backtrace: Backtrace,
    },

    #[snafu(display(
        "Element {} declares a length of {} bytes, but its value takes {} bytes",
        tag,
        declared,
        actual
    ))]
    InconsistentValueLength {
        tag: Tag,
        declared: u32,
        actual: u64,
        backtrace: Backtrace,
    },

    #[snafu(display("Missing file meta element {} ({})", tag, alias))]
    MissingMetaElement {
        tag: Tag,
        alias: &'static str,
        backtrace: Backtrace,
    },

    #[snafu(display("Unsupported transfer syntax `{}`", uid))]
    UnsupportedTransferSyntax { uid: String, backtrace: Backtrace },

    #[snafu(display("Not implemented: {}", feature))]
    Unimplemented {
        feature: &'static str,
        backtrace: Backtrace,
    },

    /// Could not write the file preamble
    WritePreamble {
        #[snafu(backtrace)]
        source: sink::Error,
    },

    /// Could not write the magic code
    WriteMagicCode {
        #[snafu(backtrace)]
        source: sink::Error,
    },

    #[snafu(display("Could not write data element {}", tag))]
    WriteElement {
        tag: Tag,
        #[snafu(backtrace)]
        source: sink::Error,
    },

    /// Could not flush the output
    Flush {
        #[snafu(backtrace)]
        source: sink::Error,
    },

    #[snafu(display("Could not write to file '{}'", filename.display()))]
    WriteFile {
        filename: PathBuf,
        backtrace: Backtrace,
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
