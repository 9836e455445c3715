//! Module containing the file meta information header builder.
//!
//! The file meta group is always encoded in explicit VR little endian,
//! regardless of the transfer syntax of the main data set,
//! and is preceded by the 128-byte preamble and the `DICM` magic code.
use crate::element::encode_element;
use crate::error::{
    MissingMetaElementSnafu, Result, ValueTooLongSnafu, WriteElementSnafu, WriteMagicCodeSnafu,
    WritePreambleSnafu,
};
use crate::options::WriteOptions;
use p10_core::dictionary::DataDictionary;
use p10_core::{dicom_value, DataElement, VR};
use p10_dictionary_std::tags;
use p10_encoding::sink::ScratchSink;
use p10_encoding::{ByteSink, Framing};
use snafu::{OptionExt, ResultExt};
use std::convert::TryFrom;
use std::io::Write;
use tracing::{debug, warn};

/// The size of the file preamble, in bytes.
pub const PREAMBLE_LEN: usize = 128;

/// The magic code following the preamble.
pub const DICM_MAGIC_CODE: [u8; 4] = [b'D', b'I', b'C', b'M'];

/// Write the file header:
/// preamble, magic code, and the file meta group
/// made of the given meta elements.
///
/// The _File Meta Information Version_ is written first,
/// followed by the other elements of group `0002` in ascending tag order.
/// Only the first occurrence of each tag is written,
/// and the _File Meta Information Group Length_ is always recomputed.
///
/// The meta group is fully encoded before anything is written to the sink,
/// which is then left in explicit VR little endian.
pub fn write_file_header<'a, W, D, I>(
    sink: &mut ByteSink<W>,
    meta_elements: I,
    options: &WriteOptions<D>,
) -> Result<()>
where
    W: Write,
    D: DataDictionary,
    I: IntoIterator<Item = &'a DataElement>,
{
    let mut elements: Vec<&DataElement> = meta_elements
        .into_iter()
        .filter(|e| e.tag().is_file_meta())
        .filter(|e| e.tag() != tags::FILE_META_INFORMATION_GROUP_LENGTH)
        .collect();
    // stable, so the first occurrence of a tag stays in front
    elements.sort_by_key(|e| e.tag());
    let before = elements.len();
    elements.dedup_by_key(|e| e.tag());
    if elements.len() != before {
        warn!(
            "Skipped {} duplicate file meta elements",
            before - elements.len()
        );
    }

    let version = elements
        .iter()
        .position(|e| e.tag() == tags::FILE_META_INFORMATION_VERSION)
        .context(MissingMetaElementSnafu {
            tag: tags::FILE_META_INFORMATION_VERSION,
            alias: "FileMetaInformationVersion",
        })?;
    let version = elements.remove(version);

    let mut group = ScratchSink::scratch(Framing::EXPLICIT_VR_LE);
    encode_element(&mut group, version, options)?;
    for element in elements {
        encode_element(&mut group, element, options)?;
    }
    let group = group.into_inner();

    let group_length = u32::try_from(group.len()).ok().context(ValueTooLongSnafu {
        tag: tags::FILE_META_INFORMATION_GROUP_LENGTH,
        vr: VR::UL,
        len: group.len() as u64,
    })?;
    debug!("File meta group length: {} bytes", group_length);

    sink.set_transfer_syntax(Framing::EXPLICIT_VR_LE);
    sink.write_zeros(PREAMBLE_LEN).context(WritePreambleSnafu)?;
    sink.write_bytes(&DICM_MAGIC_CODE)
        .context(WriteMagicCodeSnafu)?;

    let group_length_element = DataElement::new(
        tags::FILE_META_INFORMATION_GROUP_LENGTH,
        VR::UL,
        dicom_value!(U32, group_length),
    );
    encode_element(sink, &group_length_element, options)?;
    sink.write_bytes(&group).context(WriteElementSnafu {
        tag: tags::FILE_META_INFORMATION_GROUP_LENGTH,
    })
}

#[cfg(test)]
mod tests {
    use super::write_file_header;
    use crate::error::Error;
    use crate::options::WriteOptions;
    use p10_core::{dicom_value, DataElement, DataSet, Tag, VR};
    use p10_dictionary_std::tags;
    use p10_encoding::sink::ScratchSink;
    use p10_encoding::Framing;

    #[rustfmt::skip]
    const META_GROUP: &[u8] = &[
        0x02, 0x00, 0x00, 0x00,         // (0002,0000) FileMetaInformationGroupLength
            b'U', b'L', 0x04, 0x00,     // VR: UL, Length: 4
            0x28, 0x00, 0x00, 0x00,     // 40
        0x02, 0x00, 0x01, 0x00,         // (0002,0001) FileMetaInformationVersion
            b'O', b'B', 0x00, 0x00,     // VR: OB, reserved
            0x02, 0x00, 0x00, 0x00,     // Length: 2
            0x00, 0x01,
        0x02, 0x00, 0x10, 0x00,         // (0002,0010) TransferSyntaxUID
            b'U', b'I', 0x12, 0x00,     // VR: UI, Length: 18
            b'1', b'.', b'2', b'.', b'8', b'4', b'0', b'.', b'1',
            b'0', b'0', b'0', b'8', b'.', b'1', b'.', b'2', 0x00,
    ];

    #[test]
    fn meta_group_is_ordered_and_measured() {
        // deliberately out of order, with a stale group length
        let ds: DataSet = vec![
            DataElement::new(
                tags::TRANSFER_SYNTAX_UID,
                VR::UI,
                "1.2.840.10008.1.2\0",
            ),
            DataElement::new(
                tags::FILE_META_INFORMATION_GROUP_LENGTH,
                VR::UL,
                dicom_value!(U32, 9999),
            ),
            DataElement::new(
                tags::FILE_META_INFORMATION_VERSION,
                VR::OB,
                dicom_value!(Bytes, [0x00, 0x01]),
            ),
            DataElement::new(tags::PATIENT_NAME, VR::PN, "DOE^JOHN"),
        ]
        .into_iter()
        .collect();

        let mut sink = ScratchSink::scratch(Framing::IMPLICIT_VR_BE);
        write_file_header(&mut sink, ds.meta_elements(), &WriteOptions::new()).unwrap();
        assert_eq!(sink.transfer_syntax(), Framing::EXPLICIT_VR_LE);

        let out = sink.into_inner();
        assert!(out[..128].iter().all(|b| *b == 0));
        assert_eq!(&out[128..132], b"DICM");
        assert_eq!(&out[132..], META_GROUP);
    }

    #[test]
    fn duplicate_meta_elements_keep_the_first() {
        let elements = vec![
            DataElement::new(
                tags::FILE_META_INFORMATION_VERSION,
                VR::OB,
                dicom_value!(Bytes, [0x00, 0x01]),
            ),
            DataElement::new(tags::IMPLEMENTATION_VERSION_NAME, VR::SH, "FIRST "),
            DataElement::new(tags::IMPLEMENTATION_VERSION_NAME, VR::SH, "SECOND"),
        ];

        let mut sink = ScratchSink::scratch(Framing::EXPLICIT_VR_LE);
        write_file_header(&mut sink, &elements, &WriteOptions::new()).unwrap();
        let out = sink.into_inner();
        // group length (12) + version (14) + implementation version name (14)
        assert_eq!(out.len(), 132 + 12 + 14 + 14);
        assert_eq!(&out[out.len() - 6..], b"FIRST ");
    }

    #[test]
    fn missing_version_fails() {
        let elements = vec![DataElement::new(
            tags::TRANSFER_SYNTAX_UID,
            VR::UI,
            "1.2.840.10008.1.2\0",
        )];
        let mut sink = ScratchSink::scratch(Framing::EXPLICIT_VR_LE);
        let err = write_file_header(&mut sink, &elements, &WriteOptions::new()).unwrap_err();
        match err {
            Error::MissingMetaElement { tag, .. } => assert_eq!(tag, Tag(0x0002, 0x0001)),
            e => panic!("unexpected error {:?}", e),
        }
        assert_eq!(sink.bytes_written(), 0);
    }
}
