//! Module holding the stateful byte sink abstraction.
//!
//! The [`ByteSink`] writes framing and value data
//! in the byte order of its current framing configuration,
//! while keeping track of how many bytes were written.

use crate::encode::{self, Encode, Framing};
use byteordered::ByteOrdered;
use p10_core::{DataElementHeader, Tag};
use snafu::{Backtrace, ResultExt, Snafu};
use std::io::{self, Write};

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Failed to encode a data piece at position {}", position))]
    EncodeData {
        position: u64,
        source: encode::Error,
    },

    #[snafu(display("Could not write value data at position {}", position))]
    WriteData {
        position: u64,
        source: io::Error,
        backtrace: Backtrace,
    },
}

impl Error {
    /// The position in the output at which the failure occurred.
    pub fn position(&self) -> u64 {
        match self {
            Error::EncodeData { position, .. } | Error::WriteData { position, .. } => *position,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An ordered, endianness-aware binary writer.
///
/// All numeric writes honor the byte order of the current framing,
/// which can be changed between sections of the output
/// with [`set_transfer_syntax`](ByteSink::set_transfer_syntax).
/// The framing is scoped to this sink only.
#[derive(Debug)]
pub struct ByteSink<W> {
    to: W,
    framing: Framing,
    bytes_written: u64,
}

/// A sink which accumulates all written data in memory.
pub type ScratchSink = ByteSink<Vec<u8>>;

/// A sink which discards all written data,
/// only keeping count of the bytes written.
pub type CountingSink = ByteSink<io::Sink>;

impl<W> ByteSink<W> {
    /// Create a new byte sink over the given writer.
    pub fn new(to: W, framing: Framing) -> Self {
        ByteSink {
            to,
            framing,
            bytes_written: 0,
        }
    }

    /// Change the framing configuration of all subsequent writes.
    pub fn set_transfer_syntax(&mut self, framing: Framing) {
        self.framing = framing;
    }

    /// Retrieve the current framing configuration.
    pub fn transfer_syntax(&self) -> Framing {
        self.framing
    }

    /// The number of bytes written to this sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Unwrap the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.to
    }
}

impl ScratchSink {
    /// Create a sink writing to a new in-memory buffer.
    pub fn scratch(framing: Framing) -> Self {
        ByteSink::new(Vec::new(), framing)
    }
}

impl CountingSink {
    /// Create a sink which only counts the bytes written to it.
    pub fn counting(framing: Framing) -> Self {
        ByteSink::new(io::sink(), framing)
    }
}

macro_rules! impl_write_number {
    ($(#[$doc:meta])* $name: ident, $t: ty, $size: expr) => {
        $(#[$doc])*
        pub fn $name(&mut self, value: $t) -> Result<()> {
            ByteOrdered::runtime(&mut self.to, self.framing.endianness)
                .$name(value)
                .context(WriteDataSnafu {
                    position: self.bytes_written,
                })?;
            self.bytes_written += $size;
            Ok(())
        }
    };
}

impl<W> ByteSink<W>
where
    W: Write,
{
    impl_write_number!(
        /// Write an unsigned 16-bit integer.
        write_u16, u16, 2
    );
    impl_write_number!(
        /// Write an unsigned 32-bit integer.
        write_u32, u32, 4
    );
    impl_write_number!(
        /// Write an unsigned 64-bit integer.
        write_u64, u64, 8
    );
    impl_write_number!(
        /// Write a signed 16-bit integer.
        write_i16, i16, 2
    );
    impl_write_number!(
        /// Write a signed 32-bit integer.
        write_i32, i32, 4
    );
    impl_write_number!(
        /// Write a signed 64-bit integer.
        write_i64, i64, 8
    );
    impl_write_number!(
        /// Write a single precision floating point number.
        write_f32, f32, 4
    );
    impl_write_number!(
        /// Write a double precision floating point number.
        write_f64, f64, 8
    );

    /// Write the given bytes verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.to.write_all(bytes).context(WriteDataSnafu {
            position: self.bytes_written,
        })?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Write `n` zero bytes.
    pub fn write_zeros(&mut self, n: usize) -> Result<()> {
        const ZEROS: [u8; 128] = [0; 128];
        let mut remaining = n;
        while remaining > 0 {
            let chunk = remaining.min(ZEROS.len());
            self.write_bytes(&ZEROS[..chunk])?;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Write the bytes of the given string verbatim, without padding.
    pub fn write_fixed_string(&mut self, s: &str) -> Result<()> {
        self.write_bytes(s.as_bytes())
    }

    /// Encode and write a data element tag.
    pub fn encode_tag(&mut self, tag: Tag) -> Result<()> {
        self.framing
            .encode_tag(&mut self.to, tag)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 4;
        Ok(())
    }

    /// Encode and write a data element header.
    ///
    /// The header's length is written as is:
    /// no padding or length correction is applied.
    pub fn encode_element_header(&mut self, de: DataElementHeader) -> Result<()> {
        let bytes = self
            .framing
            .encode_element_header(&mut self.to, de)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += bytes as u64;
        Ok(())
    }

    /// Encode and write an item header,
    /// where `len` is the specified length of the item
    /// (can be `0xFFFF_FFFF` for undefined length).
    pub fn encode_item_header(&mut self, len: u32) -> Result<()> {
        self.framing
            .encode_item_header(&mut self.to, len)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write an item delimiter.
    pub fn encode_item_delimiter(&mut self) -> Result<()> {
        self.framing
            .encode_item_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Encode and write a sequence delimiter.
    pub fn encode_sequence_delimiter(&mut self) -> Result<()> {
        self.framing
            .encode_sequence_delimiter(&mut self.to)
            .context(EncodeDataSnafu {
                position: self.bytes_written,
            })?;
        self.bytes_written += 8;
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.to.flush().context(WriteDataSnafu {
            position: self.bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ByteSink, CountingSink, ScratchSink};
    use crate::encode::Framing;
    use p10_core::header::{DataElementHeader, Length};
    use p10_core::{Tag, VR};

    #[test]
    fn numbers_follow_current_byte_order() {
        let mut sink = ScratchSink::scratch(Framing::EXPLICIT_VR_LE);
        sink.write_u16(0x0102).unwrap();
        sink.write_u32(0x0304_0506).unwrap();
        sink.set_transfer_syntax(Framing::IMPLICIT_VR_BE);
        sink.write_u16(0x0102).unwrap();
        sink.write_f32(1.0).unwrap();

        assert_eq!(sink.transfer_syntax(), Framing::IMPLICIT_VR_BE);
        assert_eq!(sink.bytes_written(), 12);
        assert_eq!(
            &sink.into_inner()[..],
            &[
                0x02, 0x01, // u16 (LE)
                0x06, 0x05, 0x04, 0x03, // u32 (LE)
                0x01, 0x02, // u16 (BE)
                0x3F, 0x80, 0x00, 0x00, // f32 1.0 (BE)
            ]
        );
    }

    #[test]
    fn zeros_and_strings() {
        let mut sink = ByteSink::new(Vec::new(), Framing::EXPLICIT_VR_LE);
        sink.write_zeros(130).unwrap();
        sink.write_fixed_string("DICM").unwrap();
        assert_eq!(sink.bytes_written(), 134);
        let out = sink.into_inner();
        assert!(out[..130].iter().all(|&b| b == 0));
        assert_eq!(&out[130..], b"DICM");
    }

    #[test]
    fn framing_is_counted() {
        let mut sink = CountingSink::counting(Framing::EXPLICIT_VR_LE);
        sink.encode_element_header(DataElementHeader::new(
            Tag(0x0008, 0x1140),
            VR::SQ,
            Length::UNDEFINED,
        ))
        .unwrap();
        sink.encode_item_header(Length::UNDEFINED.0).unwrap();
        sink.encode_element_header(DataElementHeader::new(
            Tag(0x0008, 0x1150),
            VR::UI,
            Length(4),
        ))
        .unwrap();
        sink.write_bytes(b"1.2\0").unwrap();
        sink.encode_item_delimiter().unwrap();
        sink.encode_sequence_delimiter().unwrap();
        assert_eq!(sink.bytes_written(), 12 + 8 + 8 + 4 + 8 + 8);
    }

    #[test]
    fn io_errors_carry_the_position() {
        struct Failing;
        impl std::io::Write for Failing {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "nope"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut sink = ByteSink::new(Failing, Framing::EXPLICIT_VR_LE);
        let err = sink.write_u32(1).unwrap_err();
        assert_eq!(err.position(), 0);
        assert!(matches!(err, super::Error::WriteData { .. }));
    }
}
