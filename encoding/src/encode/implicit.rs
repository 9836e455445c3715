//! Implicit VR transfer syntax framing, in either byte order.

use crate::encode::explicit::StaticEndianness;
use crate::encode::{Encode, Result, WriteHeaderSnafu, WriteItemHeaderSnafu, WriteTagSnafu};
use byteordered::Endianness;
use p10_core::header::DataElementHeader;
use p10_core::Tag;
use snafu::ResultExt;
use std::fmt;
use std::io::Write;
use std::marker::PhantomData;

/// A concrete encoder for implicit VR framing,
/// where `B` is the byte order of the transfer syntax.
pub struct ImplicitVREncoder<B> {
    phantom: PhantomData<B>,
}

impl<B> Default for ImplicitVREncoder<B> {
    fn default() -> Self {
        ImplicitVREncoder {
            phantom: PhantomData,
        }
    }
}

impl<B> Clone for ImplicitVREncoder<B> {
    fn clone(&self) -> Self {
        ImplicitVREncoder::default()
    }
}

impl<B> fmt::Debug for ImplicitVREncoder<B>
where
    Self: Encode,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ImplicitVREncoder")
            .field("endianness", &self.endianness())
            .finish()
    }
}

impl<B> Encode for ImplicitVREncoder<B>
where
    B: StaticEndianness,
{
    fn endianness(&self) -> Endianness {
        B::ENDIANNESS
    }

    fn encode_tag<W>(&self, mut to: W, tag: Tag) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 4];
        B::write_u16(&mut buf[..], tag.group());
        B::write_u16(&mut buf[2..], tag.element());
        to.write_all(&buf).context(WriteTagSnafu)
    }

    fn encode_element_header<W>(&self, mut to: W, de: DataElementHeader) -> Result<usize>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        B::write_u16(&mut buf[0..], de.tag.group());
        B::write_u16(&mut buf[2..], de.tag.element());
        B::write_u32(&mut buf[4..], de.len.0);
        to.write_all(&buf).context(WriteHeaderSnafu)?;
        Ok(8)
    }

    fn encode_item_header<W>(&self, mut to: W, len: u32) -> Result<()>
    where
        W: Write,
    {
        let mut buf = [0u8; 8];
        B::write_u16(&mut buf, 0xFFFE);
        B::write_u16(&mut buf[2..], 0xE000);
        B::write_u32(&mut buf[4..], len);
        to.write_all(&buf).context(WriteItemHeaderSnafu)
    }
}

#[cfg(test)]
mod tests {
    use crate::encode::{Encode, ImplicitVRBigEndianEncoder, ImplicitVRLittleEndianEncoder};
    use p10_core::header::{DataElementHeader, Length};
    use p10_core::{Tag, VR};

    type Result = std::result::Result<(), Box<dyn std::error::Error>>;

    #[rustfmt::skip]
    const RAW_LE: &[u8] = &[
        0x10, 0x00, 0x10, 0x00,     // (0010,0010) (LE) Patient's Name
            0x0A, 0x00, 0x00, 0x00, // Length: 10 bytes (LE)
        0xE0, 0x7F, 0x10, 0x00,     // (7FE0,0010) (LE) Pixel Data
            0xFF, 0xFF, 0xFF, 0xFF, // Length: undefined
        0xFE, 0xFF, 0x00, 0xE0,     // (FFFE,E000) (LE) Item
            0x00, 0x00, 0x00, 0x00, // Length: 0 (empty basic offset table)
    ];

    #[test]
    fn encode_headers_le() -> Result {
        let enc = ImplicitVRLittleEndianEncoder::default();
        let mut out = Vec::new();

        let n = enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x0010, 0x0010), VR::PN, Length(10)),
        )?;
        assert_eq!(n, 8);
        let n = enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x7FE0, 0x0010), VR::OB, Length::UNDEFINED),
        )?;
        assert_eq!(n, 8);
        enc.encode_item_header(&mut out, 0)?;

        assert_eq!(&out[..], RAW_LE);
        Ok(())
    }

    #[rustfmt::skip]
    const RAW_BE: &[u8] = &[
        0x00, 0x28, 0x01, 0x00,     // (0028,0100) (BE) Bits Allocated
            0x00, 0x00, 0x00, 0x02, // Length: 2 bytes (BE)
        0xFF, 0xFE, 0xE0, 0x00,     // (FFFE,E000) (BE) Item
            0xFF, 0xFF, 0xFF, 0xFF, // Length: undefined
    ];

    #[test]
    fn encode_headers_be() -> Result {
        let enc = ImplicitVRBigEndianEncoder::default();
        let mut out = Vec::new();

        enc.encode_element_header(
            &mut out,
            DataElementHeader::new(Tag(0x0028, 0x0100), VR::US, Length(2)),
        )?;
        enc.encode_item_header(&mut out, Length::UNDEFINED.0)?;

        assert_eq!(&out[..], RAW_BE);
        Ok(())
    }
}
