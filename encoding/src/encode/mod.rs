//! This module contains the DICOM data element framing logic:
//! how tags, element headers, item headers and delimiters
//! are laid out in each combination of byte order and VR encoding.
//!
//! Value data is not handled here.
//! See [`ByteSink`](crate::sink::ByteSink) for a stateful writer
//! which combines framing with value data.
use byteordered::byteorder::{BigEndian, LittleEndian};
use byteordered::Endianness;
use p10_core::{DataElementHeader, Tag};
use snafu::{Backtrace, ResultExt, Snafu};
use std::io::{self, Write};

pub mod explicit;
pub mod implicit;

pub use self::explicit::ExplicitVREncoder;
pub use self::implicit::ImplicitVREncoder;

/// Encoder for Explicit VR Little Endian framing.
pub type ExplicitVRLittleEndianEncoder = ExplicitVREncoder<LittleEndian>;
/// Encoder for Explicit VR Big Endian framing.
pub type ExplicitVRBigEndianEncoder = ExplicitVREncoder<BigEndian>;
/// Encoder for Implicit VR Little Endian framing.
pub type ImplicitVRLittleEndianEncoder = ImplicitVREncoder<LittleEndian>;
/// Encoder for Implicit VR Big Endian framing.
///
/// This combination is not a standard transfer syntax,
/// but it is a valid framing configuration for a byte sink.
pub type ImplicitVRBigEndianEncoder = ImplicitVREncoder<BigEndian>;

/// Tag of the item pseudo-element `(FFFE,E000)`.
pub const ITEM: Tag = Tag(0xFFFE, 0xE000);
/// Tag of the item delimitation pseudo-element `(FFFE,E00D)`.
pub const ITEM_DELIMITER: Tag = Tag(0xFFFE, 0xE00D);
/// Tag of the sequence delimitation pseudo-element `(FFFE,E0DD)`.
pub const SEQUENCE_DELIMITER: Tag = Tag(0xFFFE, 0xE0DD);

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to write data element tag"))]
    WriteTag {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write data element header"))]
    WriteHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item header"))]
    WriteItemHeader {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write item delimiter"))]
    WriteItemDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
    #[snafu(display("Failed to write sequence delimiter"))]
    WriteSequenceDelimiter {
        backtrace: Backtrace,
        source: io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Type trait for a data element framing encoder.
pub trait Encode {
    /// Retrieve the encoder's byte order.
    fn endianness(&self) -> Endianness;

    /// Encode and write an element tag.
    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write;

    /// Encode and write a data element header to the given destination.
    /// Returns the number of bytes effectively written on success.
    ///
    /// Headers of the item group `(FFFE,xxxx)` and of the `NA` pseudo-VR
    /// always use implicit framing: tag followed by a 32-bit length.
    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write;

    /// Encode and write a DICOM sequence item header to the given destination.
    /* Although item element headers are always a tag and length sequence regardless of TS,
    the encoding of the length depends on the byte order. So no default impl. */
    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write;

    /// Encode and write a DICOM sequence item delimiter to the given destination.
    fn encode_item_delimiter<W>(&self, mut to: W) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag(&mut to, ITEM_DELIMITER)?;
        to.write_all(&[0u8; 4]).context(WriteItemDelimiterSnafu)
    }

    /// Encode and write a DICOM sequence delimiter to the given destination.
    fn encode_sequence_delimiter<W>(&self, mut to: W) -> Result<()>
    where
        W: Write,
    {
        self.encode_tag(&mut to, SEQUENCE_DELIMITER)?;
        to.write_all(&[0u8; 4]).context(WriteSequenceDelimiterSnafu)
    }
}

impl<T: ?Sized> Encode for &T
where
    T: Encode,
{
    fn endianness(&self) -> Endianness {
        (**self).endianness()
    }

    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_tag(to, tag)
    }

    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        (**self).encode_element_header(to, de)
    }

    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_item_header(to, len)
    }

    fn encode_item_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_item_delimiter(to)
    }

    fn encode_sequence_delimiter<W>(&self, to: W) -> Result<()>
    where
        W: Write,
    {
        (**self).encode_sequence_delimiter(to)
    }
}

/// The framing configuration of an encoded data set:
/// byte order and whether value representations are explicit.
///
/// This is the run-time counterpart of the concrete encoders in this module,
/// and implements [`Encode`] by delegating to the matching one.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Framing {
    /// The byte order of all multi-byte numbers.
    pub endianness: Endianness,
    /// Whether each element header carries its value representation.
    pub explicit_vr: bool,
}

impl Framing {
    /// Explicit VR Little Endian framing,
    /// as mandated for the file meta information group.
    pub const EXPLICIT_VR_LE: Framing = Framing::new(Endianness::Little, true);
    /// Explicit VR Big Endian framing.
    pub const EXPLICIT_VR_BE: Framing = Framing::new(Endianness::Big, true);
    /// Implicit VR Little Endian framing.
    pub const IMPLICIT_VR_LE: Framing = Framing::new(Endianness::Little, false);
    /// Implicit VR Big Endian framing.
    pub const IMPLICIT_VR_BE: Framing = Framing::new(Endianness::Big, false);

    /// Create a new framing configuration.
    pub const fn new(endianness: Endianness, explicit_vr: bool) -> Self {
        Framing {
            endianness,
            explicit_vr,
        }
    }
}

impl Encode for Framing {
    fn endianness(&self) -> Endianness {
        self.endianness
    }

    fn encode_tag<W>(&self, to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        match self.endianness {
            Endianness::Little => ImplicitVRLittleEndianEncoder::default().encode_tag(to, tag),
            Endianness::Big => ImplicitVRBigEndianEncoder::default().encode_tag(to, tag),
        }
    }

    fn encode_element_header<W>(&self, to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        match (self.explicit_vr, self.endianness) {
            (true, Endianness::Little) => {
                ExplicitVRLittleEndianEncoder::default().encode_element_header(to, de)
            }
            (true, Endianness::Big) => {
                ExplicitVRBigEndianEncoder::default().encode_element_header(to, de)
            }
            (false, Endianness::Little) => {
                ImplicitVRLittleEndianEncoder::default().encode_element_header(to, de)
            }
            (false, Endianness::Big) => {
                ImplicitVRBigEndianEncoder::default().encode_element_header(to, de)
            }
        }
    }

    fn encode_item_header<W>(&self, to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        match self.endianness {
            Endianness::Little => {
                ImplicitVRLittleEndianEncoder::default().encode_item_header(to, len)
            }
            Endianness::Big => ImplicitVRBigEndianEncoder::default().encode_item_header(to, len),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Encode, Framing};
    use p10_core::header::{DataElementHeader, Length};
    use p10_core::{Tag, VR};

    #[test]
    fn framing_delegates_by_configuration() {
        let header = DataElementHeader::new(Tag(0x0028, 0x0010), VR::US, Length(2));

        let mut out = Vec::new();
        let written = Framing::EXPLICIT_VR_BE
            .encode_element_header(&mut out, header)
            .unwrap();
        assert_eq!(written, 8);
        assert_eq!(&out[..], &[0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02]);

        let mut out = Vec::new();
        let written = Framing::IMPLICIT_VR_LE
            .encode_element_header(&mut out, header)
            .unwrap();
        assert_eq!(written, 8);
        assert_eq!(&out[..], &[0x28, 0x00, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn delimiters_follow_byte_order() {
        let mut out = Vec::new();
        Framing::IMPLICIT_VR_BE.encode_item_delimiter(&mut out).unwrap();
        Framing::IMPLICIT_VR_BE
            .encode_sequence_delimiter(&mut out)
            .unwrap();
        assert_eq!(
            &out[..],
            &[
                0xFF, 0xFE, 0xE0, 0x0D, 0x00, 0x00, 0x00, 0x00, //
                0xFF, 0xFE, 0xE0, 0xDD, 0x00, 0x00, 0x00, 0x00,
            ]
        );
    }
}
