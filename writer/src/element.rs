//! Data element encoding.
//!
//! [`encode_element`] is the single entry point for writing a data element,
//! used for the file meta group, the main data set,
//! and recursively for the elements of sequence items.
use crate::error::{
    InconsistentValueLengthSnafu, OddValueLengthSnafu, Result, UnsupportedUndefinedLengthSnafu,
    ValueTooLongSnafu, ValueTypeMismatchSnafu, WriteElementSnafu,
};
use crate::options::WriteOptions;
use crate::vr::resolve_vr;
use crate::{pixeldata, sequence, value};
use p10_core::dictionary::DataDictionary;
use p10_core::value::PixelFragmentSequence;
use p10_core::{DataElement, DataElementHeader, Item, Length, Tag, Value, VR};
use p10_dictionary_std::tags;
use p10_encoding::sink::CountingSink;
use p10_encoding::{ByteSink, TransferSyntax};
use snafu::{ensure, ResultExt};
use std::io::Write;
use tracing::trace;

/// The value of an element, classified by how it is encoded.
#[derive(Debug, Copy, Clone)]
enum Body<'a> {
    Primitive(&'a Value),
    Items(&'a [Item]),
    Fragments(&'a PixelFragmentSequence),
}

/// Encode a data element into the given sink,
/// under the sink's current framing.
///
/// The element is validated before anything is written:
/// VR resolution, value length parity, undefined length admissibility,
/// value type and declared length consistency of primitive values.
/// The declared lengths of sequences and items
/// are checked against the bytes written for their contents,
/// so the output is unusable if they are found to be wrong.
pub fn encode_element<W, D>(
    sink: &mut ByteSink<W>,
    element: &DataElement,
    options: &WriteOptions<D>,
) -> Result<()>
where
    W: Write,
    D: DataDictionary,
{
    let tag = element.tag();
    let vr = resolve_vr(element, options)?;
    let len = element.length();

    let body = classify(tag, vr, len, element.value())?;

    if let Some(declared) = len.get() {
        if let Body::Primitive(value) = body {
            let actual = value.primitive_byte_len().unwrap_or(0) as u64;
            ensure!(
                actual <= u64::from(Length::MAX.0),
                ValueTooLongSnafu {
                    tag,
                    vr,
                    len: actual,
                }
            );
            ensure!(
                actual == u64::from(declared),
                InconsistentValueLengthSnafu {
                    tag,
                    declared,
                    actual,
                }
            );
        }

        let header = DataElementHeader::new(tag, vr, len);
        if sink.transfer_syntax().explicit_vr && !header.is_item_framed() {
            ensure!(
                vr.has_long_length() || declared <= u32::from(u16::MAX),
                ValueTooLongSnafu {
                    tag,
                    vr,
                    len: u64::from(declared),
                }
            );
        }
    }

    trace!("Writing element {} {} ({})", tag, vr, len);

    sink.encode_element_header(DataElementHeader::new(tag, vr, len))
        .context(WriteElementSnafu { tag })?;

    match body {
        Body::Primitive(value) => value::write_primitive(sink, tag, value),
        Body::Items(items) => sequence::write_items(sink, tag, items, len, options),
        Body::Fragments(fragments) => pixeldata::write_fragments(sink, tag, fragments),
    }
}

/// Calculate the number of bytes taken by a data element
/// when encoded in the given transfer syntax,
/// including its header.
///
/// This is useful for computing the defined length
/// of sequences and items ahead of writing.
pub fn encoded_len<D>(
    element: &DataElement,
    ts: &TransferSyntax,
    options: &WriteOptions<D>,
) -> Result<u64>
where
    D: DataDictionary,
{
    let mut counter = CountingSink::counting(ts.framing());
    encode_element(&mut counter, element, options)?;
    Ok(counter.bytes_written())
}

/// Check the element's length and value against its VR,
/// and decide how the value is encoded.
fn classify(tag: Tag, vr: VR, len: Length, value: &Value) -> Result<Body<'_>> {
    if let Some(len) = len.get() {
        ensure!(len % 2 == 0, OddValueLengthSnafu { tag, len });
    }

    let is_pixel_data = tag == tags::PIXEL_DATA && matches!(vr, VR::OB | VR::OW);
    if len.is_undefined() {
        ensure!(
            vr == VR::SQ || vr == VR::NA || is_pixel_data,
            UnsupportedUndefinedLengthSnafu { tag, vr }
        );
    }

    match (vr, value) {
        (VR::SQ, Value::Sequence(items)) => Ok(Body::Items(items)),
        (VR::SQ, Value::Empty) => Ok(Body::Items(&[])),
        (_, Value::PixelSequence(fragments)) if is_pixel_data && len.is_undefined() => {
            pixeldata::check_fragments(tag, fragments)?;
            Ok(Body::Fragments(fragments))
        }
        (_, value) if is_pixel_data && len.is_undefined() => ValueTypeMismatchSnafu {
            tag,
            vr,
            expected: "pixel fragments",
            actual: value.value_type(),
        }
        .fail(),
        (_, value) => {
            value::check_primitive(tag, vr, value)?;
            Ok(Body::Primitive(value))
        }
    }
}
