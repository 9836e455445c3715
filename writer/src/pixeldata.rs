//! Value codec for encapsulated pixel data.
//!
//! Native pixel data is a primitive value
//! and goes through the primitive value codec instead.
use crate::error::{OddValueLengthSnafu, Result, ValueTooLongSnafu, WriteElementSnafu};
use p10_core::value::PixelFragmentSequence;
use p10_core::{Tag, VR};
use p10_encoding::ByteSink;
use snafu::{ensure, OptionExt, ResultExt};
use std::convert::TryFrom;
use std::io::Write;

/// Ensure that the basic offset table and all fragments
/// can be framed as items of a defined, even length.
pub(crate) fn check_fragments(tag: Tag, fragments: &PixelFragmentSequence) -> Result<()> {
    let table_len = fragments.offset_table().len() as u64 * 4;
    ensure!(
        table_len <= u64::from(u32::MAX),
        ValueTooLongSnafu {
            tag,
            vr: VR::NA,
            len: table_len,
        }
    );

    for fragment in fragments.fragments() {
        let len = u32::try_from(fragment.len()).ok().context(ValueTooLongSnafu {
            tag,
            vr: VR::NA,
            len: fragment.len() as u64,
        })?;
        ensure!(len % 2 == 0, OddValueLengthSnafu { tag, len });
    }
    Ok(())
}

/// Write the fragment items of an encapsulated pixel data element,
/// after its header:
/// the basic offset table item, one item per fragment,
/// and a closing sequence delimiter.
pub(crate) fn write_fragments<W>(
    sink: &mut ByteSink<W>,
    tag: Tag,
    fragments: &PixelFragmentSequence,
) -> Result<()>
where
    W: Write,
{
    let offset_table = fragments.offset_table();
    sink.encode_item_header(offset_table.len() as u32 * 4)
        .context(WriteElementSnafu { tag })?;
    for offset in offset_table {
        sink.write_u32(*offset).context(WriteElementSnafu { tag })?;
    }

    for fragment in fragments.fragments() {
        sink.encode_item_header(fragment.len() as u32)
            .context(WriteElementSnafu { tag })?;
        sink.write_bytes(fragment)
            .context(WriteElementSnafu { tag })?;
    }

    sink.encode_sequence_delimiter()
        .context(WriteElementSnafu { tag })
}
