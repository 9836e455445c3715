//! A minimal DICOM reader, enough to check that written files
//! read back into the same data set.
#![allow(dead_code)]

use byteordered::{ByteOrdered, Endianness};
use p10_core::dictionary::{DataDictionary, DataDictionaryEntry};
use p10_core::value::PixelFragmentSequence;
use p10_core::{DataElement, DataSet, Item, Length, Tag, Value, VR};
use p10_dictionary_std::{tags, StandardDataDictionary};
use p10_encoding::Framing;
use std::io::Cursor;

/// Read a whole DICOM file.
/// Returns the file meta group elements,
/// including the group length, and the main data set.
pub fn read_file(data: &[u8], framing: Framing) -> (Vec<DataElement>, DataSet) {
    assert!(data.len() >= 132, "too short for a DICOM file");
    assert!(data[..128].iter().all(|b| *b == 0), "preamble is not zeroed");
    assert_eq!(&data[128..132], b"DICM");

    let mut meta_reader = Reader::new(&data[132..], Framing::EXPLICIT_VR_LE);
    let group_length = meta_reader.read_element();
    assert_eq!(group_length.tag(), tags::FILE_META_INFORMATION_GROUP_LENGTH);
    let len = match group_length.value() {
        Value::U32(v) => v[0] as usize,
        v => panic!("bad group length value {:?}", v),
    };
    let meta_start = meta_reader.pos();
    let mut meta = vec![group_length];
    while meta_reader.pos() < meta_start + len {
        meta.push(meta_reader.read_element());
    }
    assert_eq!(meta_reader.pos(), meta_start + len, "meta group overrun");

    let body_start = 132 + meta_reader.pos();
    let mut reader = Reader::new(&data[body_start..], framing);
    let mut body = DataSet::new();
    while !reader.is_empty() {
        body.push(reader.read_element());
    }
    (meta, body)
}

pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    framing: Framing,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8], framing: Framing) -> Self {
        Reader {
            data,
            pos: 0,
            framing,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn take(&mut self, n: usize) -> &'a [u8] {
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        out
    }

    fn endianness(&self) -> Endianness {
        self.framing.endianness
    }

    fn read_u16(&mut self) -> u16 {
        let e = self.endianness();
        ByteOrdered::runtime(Cursor::new(self.take(2)), e)
            .read_u16()
            .unwrap()
    }

    fn read_u32(&mut self) -> u32 {
        let e = self.endianness();
        ByteOrdered::runtime(Cursor::new(self.take(4)), e)
            .read_u32()
            .unwrap()
    }

    fn read_tag(&mut self) -> Tag {
        let group = self.read_u16();
        let element = self.read_u16();
        Tag(group, element)
    }

    /// Read an element header, resolving the VR
    /// from the dictionary in implicit VR.
    fn read_header(&mut self) -> (Tag, VR, Length) {
        let tag = self.read_tag();
        if tag.is_item_group() {
            return (tag, VR::NA, Length(self.read_u32()));
        }
        if self.framing.explicit_vr {
            let vr_bytes = self.take(2);
            let vr = VR::from_binary([vr_bytes[0], vr_bytes[1]]).expect("unknown VR");
            let len = if vr.has_long_length() {
                assert_eq!(self.take(2), &[0, 0], "reserved bytes must be zero");
                self.read_u32()
            } else {
                u32::from(self.read_u16())
            };
            (tag, vr, Length(len))
        } else {
            let vr = StandardDataDictionary
                .by_tag(tag)
                .map(|entry| entry.vr().relaxed())
                .unwrap_or(VR::UN);
            (tag, vr, Length(self.read_u32()))
        }
    }

    pub fn read_element(&mut self) -> DataElement {
        let (tag, vr, len) = self.read_header();
        let value = if vr == VR::SQ {
            self.read_items(len)
        } else if tag == tags::PIXEL_DATA && len.is_undefined() {
            self.read_fragments()
        } else {
            let len = len.get().expect("undefined length on a primitive value");
            self.read_primitive(vr, len as usize)
        };
        DataElement::from_parts(tag, Some(vr), len, value)
    }

    fn read_items(&mut self, len: Length) -> Value {
        let end = len.get().map(|l| self.pos + l as usize);
        let mut items = Vec::new();
        loop {
            if let Some(end) = end {
                if self.pos >= end {
                    assert_eq!(self.pos, end, "sequence overrun");
                    break;
                }
            }
            let tag = self.read_tag();
            let item_len = Length(self.read_u32());
            if tag == tags::SEQUENCE_DELIMITATION_ITEM {
                assert!(end.is_none(), "sequence delimiter in a defined length sequence");
                assert_eq!(item_len, Length(0));
                break;
            }
            assert_eq!(tag, tags::ITEM);
            items.push(self.read_item(item_len));
        }
        Value::from(items)
    }

    fn read_item(&mut self, len: Length) -> Item {
        let end = len.get().map(|l| self.pos + l as usize);
        let mut elements = Vec::new();
        loop {
            match end {
                Some(end) if self.pos >= end => {
                    assert_eq!(self.pos, end, "item overrun");
                    break;
                }
                Some(_) => {}
                None => {
                    let save = self.pos;
                    if self.read_tag() == tags::ITEM_DELIMITATION_ITEM {
                        assert_eq!(self.read_u32(), 0);
                        break;
                    }
                    self.pos = save;
                }
            }
            elements.push(self.read_element());
        }
        Item::with_length(elements, len)
    }

    fn read_fragments(&mut self) -> Value {
        let mut offset_table = Vec::new();
        let mut fragments = Vec::new();
        let mut first = true;
        loop {
            let tag = self.read_tag();
            let len = self.read_u32();
            if tag == tags::SEQUENCE_DELIMITATION_ITEM {
                assert_eq!(len, 0);
                break;
            }
            assert_eq!(tag, tags::ITEM);
            if first {
                for _ in 0..len / 4 {
                    offset_table.push(self.read_u32());
                }
                first = false;
            } else {
                fragments.push(self.take(len as usize).to_vec());
            }
        }
        Value::from(PixelFragmentSequence::new(offset_table, fragments))
    }

    fn read_primitive(&mut self, vr: VR, len: usize) -> Value {
        if len == 0 {
            return Value::Empty;
        }
        let bytes = self.take(len);
        let mut src = ByteOrdered::runtime(Cursor::new(bytes), self.framing.endianness);
        macro_rules! numbers {
            ($variant: ident, $read: ident, $size: expr) => {
                Value::$variant((0..len / $size).map(|_| src.$read().unwrap()).collect())
            };
        }
        match vr {
            VR::US | VR::OW => numbers!(U16, read_u16, 2),
            VR::SS => numbers!(I16, read_i16, 2),
            VR::UL | VR::OL => numbers!(U32, read_u32, 4),
            VR::SL => numbers!(I32, read_i32, 4),
            VR::UV | VR::OV => numbers!(U64, read_u64, 8),
            VR::SV => numbers!(I64, read_i64, 8),
            VR::FL | VR::OF => numbers!(F32, read_f32, 4),
            VR::FD | VR::OD => numbers!(F64, read_f64, 8),
            VR::AT => Value::Tags(
                (0..len / 4)
                    .map(|_| Tag(src.read_u16().unwrap(), src.read_u16().unwrap()))
                    .collect(),
            ),
            VR::OB | VR::UN | VR::NA => Value::Bytes(bytes.to_vec()),
            _ => Value::Text(String::from_utf8(bytes.to_vec()).expect("invalid text")),
        }
    }
}
