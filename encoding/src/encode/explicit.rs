//! Explicit VR transfer syntax framing, in either byte order.

use crate::encode::{
    Encode, ImplicitVREncoder, Result, WriteHeaderSnafu, WriteItemHeaderSnafu, WriteTagSnafu,
};
use byteordered::byteorder::{BigEndian, ByteOrder, LittleEndian};
use byteordered::Endianness;
use p10_core::header::DataElementHeader;
use p10_core::Tag;
use snafu::ResultExt;
use std::fmt;
use std::io::Write;
use std::marker::PhantomData;

/// A concrete encoder for explicit VR framing,
/// where `B` is the byte order of the transfer syntax.
pub struct ExplicitVREncoder<B> {
    phantom: PhantomData<B>,
}

impl<B> Default for ExplicitVREncoder<B> {
    fn default() -> Self {
        ExplicitVREncoder {
            phantom: PhantomData,
        }
    }
}

impl<B> Clone for ExplicitVREncoder<B> {
    fn clone(&self) -> Self {
        ExplicitVREncoder::default()
    }
}

impl<B> fmt::Debug for ExplicitVREncoder<B>
where
    Self: Encode,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExplicitVREncoder")
            .field("endianness", &self.endianness())
            .finish()
    }
}

/// Byte order of a concrete encoder, known at compile time.
pub trait StaticEndianness: ByteOrder {
    /// The run-time value of the byte order.
    const ENDIANNESS: Endianness;
}

impl StaticEndianness for LittleEndian {
    const ENDIANNESS: Endianness = Endianness::Little;
}

impl StaticEndianness for BigEndian {
    const ENDIANNESS: Endianness = Endianness::Big;
}

impl<B> Encode for ExplicitVREncoder<B>
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
        if de.is_item_framed() {
            // items and delimiters never carry a VR field
            return ImplicitVREncoder::<B>::default().encode_element_header(to, de);
        }

        if de.vr.has_long_length() {
            // PS3.5 7.1.2:
            // for VRs of OB, OD, OF, OL, OV, OW, SQ, SV, UC, UN, UR, UT and UV
            // the 16 bits following the two byte VR Field are reserved
            // for use by later versions of the DICOM Standard.
            // These reserved bytes shall be set to 0000H and shall not be
            // used or decoded (Table 7.1-1). The Value Length Field is a
            // 32-bit unsigned integer.
            let mut buf = [0u8; 12];
            B::write_u16(&mut buf[0..], de.tag.group());
            B::write_u16(&mut buf[2..], de.tag.element());
            let vr_bytes = de.vr.to_bytes();
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            // buf[6..8] is kept zero'd
            B::write_u32(&mut buf[8..], de.len.0);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(12)
        } else {
            // PS3.5 7.1.2:
            // for all other VRs the Value Length Field is the
            // 16-bit unsigned integer following the two byte VR Field
            // (Table 7.1-2).
            let mut buf = [0u8; 8];
            B::write_u16(&mut buf[0..], de.tag.group());
            B::write_u16(&mut buf[2..], de.tag.element());
            let vr_bytes = de.vr.to_bytes();
            buf[4] = vr_bytes[0];
            buf[5] = vr_bytes[1];
            B::write_u16(&mut buf[6..], de.len.0 as u16);
            to.write_all(&buf).context(WriteHeaderSnafu)?;
            Ok(8)
        }
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
