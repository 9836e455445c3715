//! Properties which must hold for every file written,
//! checked over all framings.
mod common;

use p10_core::value::PixelFragmentSequence;
use p10_core::{dicom_value, DataElement, DataSet, Item, Length, Tag, VR};
use p10_dictionary_std::tags;
use p10_encoding::sink::ScratchSink;
use p10_encoding::{Codec, Endianness, Framing, TransferSyntax};
use p10_writer::{encode_element, write, Error, WriteOptions};
use pretty_assertions::assert_eq;
use rstest::rstest;

const EXPLICIT_LE: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.1",
    "Explicit VR Little Endian",
    Endianness::Little,
    true,
    Codec::None,
);
const EXPLICIT_BE: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2.2",
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    Codec::None,
);
const IMPLICIT_LE: TransferSyntax = TransferSyntax::new(
    "1.2.840.10008.1.2",
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    Codec::None,
);
// not a standard transfer syntax, but a valid framing nonetheless
const IMPLICIT_BE: TransferSyntax = TransferSyntax::new(
    "1.2.3.4.5.6",
    "Implicit VR Big Endian",
    Endianness::Big,
    false,
    Codec::None,
);

fn meta_elements() -> Vec<DataElement> {
    vec![
        DataElement::new(
            tags::FILE_META_INFORMATION_VERSION,
            VR::OB,
            dicom_value!(Bytes, [0x00, 0x01]),
        ),
        DataElement::new(
            tags::MEDIA_STORAGE_SOP_CLASS_UID,
            VR::UI,
            "1.2.840.10008.5.1.4.1.1.7\0",
        ),
        DataElement::new(
            tags::MEDIA_STORAGE_SOP_INSTANCE_UID,
            VR::UI,
            "2.25.1234567890\0",
        ),
        DataElement::new(tags::TRANSFER_SYNTAX_UID, VR::UI, "1.2.840.10008.1.2\0"),
        DataElement::new(tags::IMPLEMENTATION_CLASS_UID, VR::UI, "1.2.3.4\0"),
    ]
}

fn body_elements() -> Vec<DataElement> {
    vec![
        DataElement::new(tags::STUDY_DATE, VR::DA, "20240131"),
        DataElement::new(
            tags::REFERENCED_STUDY_SEQUENCE,
            VR::SQ,
            vec![Item::new(vec![
                DataElement::new(tags::REFERENCED_SOP_CLASS_UID, VR::UI, "1.2.3\0"),
                DataElement::new(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, "1.2.3.4.5\0"),
            ])],
        ),
        DataElement::new_with_len(
            tags::REFERENCED_IMAGE_SEQUENCE,
            VR::SQ,
            Length(18),
            vec![Item::with_length(
                vec![DataElement::new(tags::ROWS, VR::US, dicom_value!(U16, 512))],
                Length(10),
            )],
        ),
        DataElement::new(tags::PATIENT_NAME, VR::PN, "DOE^JOHN"),
        DataElement::new(tags::PATIENT_ID, VR::LO, "12345 "),
        DataElement::new(tags::SLICE_THICKNESS, VR::DS, "2.5 "),
        DataElement::new(tags::INSTANCE_NUMBER, VR::IS, "1 "),
        DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, dicom_value!(U16, 1)),
        DataElement::new(
            tags::FRAME_INCREMENT_POINTER,
            VR::AT,
            dicom_value!(Tags, [Tag(0x0018, 0x1063)]),
        ),
        DataElement::new(tags::ROWS, VR::US, dicom_value!(U16, 2)),
        DataElement::new(tags::COLUMNS, VR::US, dicom_value!(U16, 2)),
        DataElement::new(
            tags::PIXEL_DATA,
            VR::OW,
            dicom_value!(U16, [0x0102, 0x0304, 0xFFFE, 0x8000]),
        ),
    ]
}

fn dataset() -> DataSet {
    meta_elements()
        .into_iter()
        .chain(body_elements())
        .collect()
}

fn write_with(ds: &DataSet, ts: TransferSyntax) -> Vec<u8> {
    let mut out = Vec::new();
    write(&mut out, ds, &WriteOptions::new().transfer_syntax(ts)).unwrap();
    out
}

#[rstest]
#[case(EXPLICIT_LE)]
#[case(EXPLICIT_BE)]
#[case(IMPLICIT_LE)]
#[case(IMPLICIT_BE)]
fn written_files_read_back(#[case] ts: TransferSyntax) {
    let ds = dataset();
    let out = write_with(&ds, ts);

    let (meta, body) = common::read_file(&out, ts.framing());
    assert_eq!(&meta[1..], &meta_elements()[..]);
    assert_eq!(body.iter().cloned().collect::<Vec<_>>(), body_elements());
}

#[rstest]
#[case(EXPLICIT_LE)]
#[case(EXPLICIT_BE)]
#[case(IMPLICIT_LE)]
#[case(IMPLICIT_BE)]
fn meta_group_does_not_depend_on_the_transfer_syntax(#[case] ts: TransferSyntax) {
    let ds = dataset();
    let reference = write_with(&ds, EXPLICIT_LE);
    let out = write_with(&ds, ts);

    let group_length = u32::from_le_bytes([out[140], out[141], out[142], out[143]]) as usize;
    let header_end = 144 + group_length;
    assert_eq!(&out[..header_end], &reference[..header_end]);
}

#[test]
fn group_length_counts_the_meta_group() {
    let ds = dataset();
    let out = write_with(&ds, IMPLICIT_BE);

    // (0002,0000) UL, length 4
    assert_eq!(&out[132..140], &[0x02, 0x00, 0x00, 0x00, b'U', b'L', 0x04, 0x00]);
    let group_length = u32::from_le_bytes([out[140], out[141], out[142], out[143]]) as usize;

    let expected: usize = meta_elements()
        .iter()
        .map(|e| 8 + e.length().get().unwrap() as usize + if e.vr() == Some(VR::OB) { 4 } else { 0 })
        .sum();
    assert_eq!(group_length, expected);

    // the main data set starts right after, in big endian
    assert_eq!(&out[144 + group_length..][..4], &[0x00, 0x08, 0x00, 0x20]);
}

#[rstest]
#[case(VR::AE, 8, 8)]
#[case(VR::CS, 8, 8)]
#[case(VR::DS, 8, 8)]
#[case(VR::LO, 8, 8)]
#[case(VR::LT, 8, 8)]
#[case(VR::PN, 8, 8)]
#[case(VR::SH, 8, 8)]
#[case(VR::ST, 8, 8)]
#[case(VR::UI, 8, 8)]
#[case(VR::US, 8, 8)]
#[case(VR::UL, 8, 8)]
#[case(VR::FD, 8, 8)]
#[case(VR::AT, 8, 8)]
#[case(VR::OB, 12, 8)]
#[case(VR::OD, 12, 8)]
#[case(VR::OF, 12, 8)]
#[case(VR::OL, 12, 8)]
#[case(VR::OV, 12, 8)]
#[case(VR::OW, 12, 8)]
#[case(VR::SQ, 12, 8)]
#[case(VR::SV, 12, 8)]
#[case(VR::UC, 12, 8)]
#[case(VR::UN, 12, 8)]
#[case(VR::UR, 12, 8)]
#[case(VR::UT, 12, 8)]
#[case(VR::UV, 12, 8)]
fn header_width(#[case] vr: VR, #[case] explicit: u64, #[case] implicit: u64) {
    // a private tag, so that any VR goes
    let element = DataElement::empty(Tag(0x0009, 0x1010), vr);
    let options = WriteOptions::new();

    for framing in [Framing::EXPLICIT_VR_LE, Framing::EXPLICIT_VR_BE].iter() {
        let mut sink = ScratchSink::scratch(*framing);
        encode_element(&mut sink, &element, &options).unwrap();
        assert_eq!(sink.bytes_written(), explicit, "{} in {:?}", vr, framing);
    }
    for framing in [Framing::IMPLICIT_VR_LE, Framing::IMPLICIT_VR_BE].iter() {
        let mut sink = ScratchSink::scratch(*framing);
        encode_element(&mut sink, &element, &options).unwrap();
        assert_eq!(sink.bytes_written(), implicit, "{} in {:?}", vr, framing);
    }
}

#[test]
fn implicit_vr_omits_the_vr() {
    let element = DataElement::new(tags::PATIENT_ID, VR::LO, "12345 ");

    let mut sink = ScratchSink::scratch(Framing::IMPLICIT_VR_LE);
    encode_element(&mut sink, &element, &WriteOptions::new()).unwrap();
    assert_eq!(
        &sink.into_inner()[..],
        &[0x10, 0x00, 0x20, 0x00, 0x06, 0x00, 0x00, 0x00, b'1', b'2', b'3', b'4', b'5', b' ']
    );

    let mut sink = ScratchSink::scratch(Framing::IMPLICIT_VR_BE);
    encode_element(&mut sink, &element, &WriteOptions::new()).unwrap();
    assert_eq!(
        &sink.into_inner()[..],
        &[0x00, 0x10, 0x00, 0x20, 0x00, 0x00, 0x00, 0x06, b'1', b'2', b'3', b'4', b'5', b' ']
    );
}

#[rstest]
#[case(Framing::EXPLICIT_VR_LE)]
#[case(Framing::EXPLICIT_VR_BE)]
#[case(Framing::IMPLICIT_VR_LE)]
#[case(Framing::IMPLICIT_VR_BE)]
fn odd_lengths_are_rejected(#[case] framing: Framing) {
    let element = DataElement::new(tags::PATIENT_ID, VR::LO, "12345");

    let mut sink = ScratchSink::scratch(framing);
    let err = encode_element(&mut sink, &element, &WriteOptions::new()).unwrap_err();
    match err {
        Error::OddValueLength { tag, len, .. } => {
            assert_eq!(tag, tags::PATIENT_ID);
            assert_eq!(len, 5);
        }
        e => panic!("unexpected error {:?}", e),
    }
    assert_eq!(sink.bytes_written(), 0);
}

#[rstest]
#[case(EXPLICIT_LE)]
#[case(EXPLICIT_BE)]
fn encapsulated_pixel_data_reads_back(#[case] ts: TransferSyntax) {
    let mut ds: DataSet = meta_elements().into_iter().collect();
    let pixel_data = DataElement::new(
        tags::PIXEL_DATA,
        VR::OB,
        PixelFragmentSequence::new(vec![0_u32, 12], vec![vec![0xFF_u8, 0xD8, 0xFF, 0xD9]; 2]),
    );
    ds.push(pixel_data.clone());

    let out = write_with(&ds, ts);
    let (_, body) = common::read_file(&out, ts.framing());
    assert_eq!(body.iter().cloned().collect::<Vec<_>>(), vec![pixel_data]);
}
