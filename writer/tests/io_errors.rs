//! Failures of the destination are reported with the part being written.
use p10_core::{dicom_value, DataElement, DataSet, Item, Tag, VR};
use p10_dictionary_std::tags;
use p10_encoding::{sink, ByteSink, Framing};
use p10_writer::{encode_element, write, Error, WriteOptions};
use std::io::{self, Write};

/// A destination which accepts `limit` bytes,
/// then fails on any write going past it.
#[derive(Debug)]
struct FailAfter {
    limit: usize,
    written: usize,
}

impl FailAfter {
    fn new(limit: usize) -> Self {
        FailAfter { limit, written: 0 }
    }
}

impl Write for FailAfter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written + buf.len() > self.limit {
            return Err(io::Error::new(io::ErrorKind::Other, "device full"));
        }
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn dataset() -> DataSet {
    vec![
        DataElement::new(
            tags::FILE_META_INFORMATION_VERSION,
            VR::OB,
            dicom_value!(Bytes, [0x00, 0x01]),
        ),
        DataElement::new(tags::TRANSFER_SYNTAX_UID, VR::UI, "1.2.840.10008.1.2.1\0"),
        DataElement::new(tags::PATIENT_NAME, VR::PN, "DOE^JOHN  "),
    ]
    .into_iter()
    .collect()
}

fn write_element_failure(element: &DataElement, limit: usize) -> (Tag, sink::Error) {
    let mut sink = ByteSink::new(FailAfter::new(limit), Framing::EXPLICIT_VR_LE);
    match encode_element(&mut sink, element, &WriteOptions::new()).unwrap_err() {
        Error::WriteElement { tag, source } => (tag, source),
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn failure_in_the_preamble() {
    let err = write(FailAfter::new(0), &dataset(), &WriteOptions::new()).unwrap_err();
    assert!(matches!(err, Error::WritePreamble { .. }), "{:?}", err);
}

#[test]
fn failure_in_the_magic_code() {
    let err = write(FailAfter::new(130), &dataset(), &WriteOptions::new()).unwrap_err();
    assert!(matches!(err, Error::WriteMagicCode { .. }), "{:?}", err);
}

#[test]
fn failure_in_the_group_length() {
    let err = write(FailAfter::new(132), &dataset(), &WriteOptions::new()).unwrap_err();
    match err {
        Error::WriteElement { tag, .. } => {
            assert_eq!(tag, tags::FILE_META_INFORMATION_GROUP_LENGTH)
        }
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn failure_in_an_element_header() {
    let e = DataElement::new(tags::PATIENT_NAME, VR::PN, "DOE^JOHN  ");
    let (tag, source) = write_element_failure(&e, 2);
    assert_eq!(tag, tags::PATIENT_NAME);
    assert!(matches!(source, sink::Error::EncodeData { .. }), "{:?}", source);
    assert_eq!(source.position(), 0);
}

#[test]
fn failure_in_an_element_value() {
    let e = DataElement::new(tags::PATIENT_NAME, VR::PN, "DOE^JOHN  ");
    let (tag, source) = write_element_failure(&e, 8);
    assert_eq!(tag, tags::PATIENT_NAME);
    assert!(matches!(source, sink::Error::WriteData { .. }), "{:?}", source);
    assert_eq!(source.position(), 8);
}

#[test]
fn failures_inside_a_sequence_name_the_innermost_part() {
    let sq = DataElement::new(
        tags::REFERENCED_IMAGE_SEQUENCE,
        VR::SQ,
        vec![Item::new(vec![DataElement::new(
            tags::ROWS,
            VR::US,
            dicom_value!(U16, 512),
        )])],
    );

    // SQ header (12), then the item header
    let (tag, _) = write_element_failure(&sq, 12);
    assert_eq!(tag, tags::ITEM);

    // SQ header (12), item header (8), Rows header (8), then the value
    let (tag, source) = write_element_failure(&sq, 28);
    assert_eq!(tag, tags::ROWS);
    assert_eq!(source.position(), 28);

    // everything but the sequence delimiter
    let (tag, _) = write_element_failure(&sq, 38);
    assert_eq!(tag, tags::REFERENCED_IMAGE_SEQUENCE);
}
