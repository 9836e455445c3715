//! Value codec for sequences of items.
use crate::element::encode_element;
use crate::error::{InconsistentValueLengthSnafu, Result, WriteElementSnafu};
use crate::options::WriteOptions;
use p10_core::dictionary::DataDictionary;
use p10_core::{Item, Length, Tag};
use p10_dictionary_std::tags;
use p10_encoding::ByteSink;
use snafu::{ensure, ResultExt};
use std::io::Write;

/// Write the items of a sequence element,
/// followed by a sequence delimiter if the sequence length is undefined.
///
/// Item elements follow the same framing as the enclosing data set.
/// A defined sequence length is checked against the bytes written for its items.
pub(crate) fn write_items<W, D>(
    sink: &mut ByteSink<W>,
    tag: Tag,
    items: &[Item],
    len: Length,
    options: &WriteOptions<D>,
) -> Result<()>
where
    W: Write,
    D: DataDictionary,
{
    let start = sink.bytes_written();
    for item in items {
        write_item(sink, item, options)?;
    }

    match len.get() {
        Some(declared) => check_len(tag, declared, sink.bytes_written() - start),
        None => sink
            .encode_sequence_delimiter()
            .context(WriteElementSnafu { tag }),
    }
}

/// Write a single item: header, elements,
/// and an item delimiter if the item length is undefined.
fn write_item<W, D>(sink: &mut ByteSink<W>, item: &Item, options: &WriteOptions<D>) -> Result<()>
where
    W: Write,
    D: DataDictionary,
{
    let len = item.length();
    sink.encode_item_header(len.0)
        .context(WriteElementSnafu { tag: tags::ITEM })?;

    let start = sink.bytes_written();
    for element in item.elements() {
        encode_element(sink, element, options)?;
    }

    match len.get() {
        Some(declared) => check_len(tags::ITEM, declared, sink.bytes_written() - start),
        None => sink
            .encode_item_delimiter()
            .context(WriteElementSnafu {
                tag: tags::ITEM_DELIMITATION_ITEM,
            }),
    }
}

/// Compare a declared length with the number of bytes actually written.
fn check_len(tag: Tag, declared: u32, actual: u64) -> Result<()> {
    ensure!(
        actual == u64::from(declared),
        InconsistentValueLengthSnafu {
            tag,
            declared,
            actual,
        }
    );
    Ok(())
}
