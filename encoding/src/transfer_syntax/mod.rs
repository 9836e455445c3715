//! Module containing the DICOM transfer syntax data structure
//! and the registry of transfer syntaxes known to the writer.
//!
//! A [`TransferSyntax`] describes how the main data set of a file
//! is framed (byte order and VR encoding)
//! and whether it requires further processing:
//! encapsulated pixel data or a deflated data set.
//! Look up a transfer syntax by UID through [`get_registry`].

pub mod entries;

use crate::encode::Framing;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

pub use byteordered::Endianness;

/// A description of the requirements of a transfer syntax
/// beyond its framing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Codec {
    /// No codec is required.
    /// Pixel data, if present, is written in native form.
    None,
    /// Pixel data is expected to be encapsulated:
    /// written as a sequence of fragments with an undefined length.
    /// Compressing the pixel data is the responsibility of the caller.
    EncapsulatedPixelData,
    /// The whole data set is deflated after encoding.
    Deflate,
}

/// A DICOM transfer syntax specifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TransferSyntax {
    /// The unique identifier of the transfer syntax.
    uid: &'static str,
    /// The name of the transfer syntax.
    name: &'static str,
    /// The byte order of data.
    byte_order: Endianness,
    /// Whether the transfer syntax mandates an explicit value representation,
    /// or the VR is implicit.
    explicit_vr: bool,
    /// The transfer syntax' requirements.
    codec: Codec,
}

impl TransferSyntax {
    /// Create a new transfer syntax descriptor.
    ///
    /// Note that only transfer syntax implementors are expected to construct
    /// TS descriptors from scratch. For a practical usage of transfer syntaxes,
    /// one should look up the transfer syntax registry by UID.
    pub const fn new(
        uid: &'static str,
        name: &'static str,
        byte_order: Endianness,
        explicit_vr: bool,
        codec: Codec,
    ) -> Self {
        TransferSyntax {
            uid,
            name,
            byte_order,
            explicit_vr,
            codec,
        }
    }

    /// Create a new descriptor
    /// for an explicit VR little endian transfer syntax.
    pub const fn new_ele(uid: &'static str, name: &'static str, codec: Codec) -> Self {
        TransferSyntax::new(uid, name, Endianness::Little, true, codec)
    }

    /// Obtain this transfer syntax' unique identifier.
    pub const fn uid(&self) -> &'static str {
        self.uid
    }

    /// Obtain the name of this transfer syntax.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Obtain this transfer syntax' expected endianness.
    pub const fn endianness(&self) -> Endianness {
        self.byte_order
    }

    /// Check whether this transfer syntax expects explicit VR.
    pub const fn explicit_vr(&self) -> bool {
        self.explicit_vr
    }

    /// Obtain this transfer syntax' codec specification.
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Check whether pixel data is encapsulated in this transfer syntax.
    pub fn is_encapsulated_pixel_data(&self) -> bool {
        matches!(self.codec, Codec::EncapsulatedPixelData)
    }

    /// Check whether the data set is deflated in this transfer syntax.
    pub fn is_deflated(&self) -> bool {
        matches!(self.codec, Codec::Deflate)
    }

    /// Obtain the framing configuration of data sets
    /// encoded in this transfer syntax.
    pub const fn framing(&self) -> Framing {
        Framing::new(self.byte_order, self.explicit_vr)
    }
}

impl fmt::Display for TransferSyntax {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.uid)
    }
}

/// Data type for the registry of transfer syntaxes known to the writer.
pub struct TransferSyntaxRegistry {
    m: HashMap<&'static str, TransferSyntax>,
}

impl fmt::Debug for TransferSyntaxRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries: HashMap<&str, &str> =
            self.m.iter().map(|(uid, ts)| (*uid, ts.name())).collect();
        f.debug_struct("TransferSyntaxRegistry")
            .field("m", &entries)
            .finish()
    }
}

impl TransferSyntaxRegistry {
    /// Obtain a transfer syntax by its UID.
    ///
    /// Trailing padding (`\0` or space) in `uid` is ignored,
    /// so the raw value of a _Transfer Syntax UID_ element can be used.
    pub fn get<U: AsRef<str>>(&self, uid: U) -> Option<&TransferSyntax> {
        let ts_uid = uid.as_ref().trim_end_matches(|c| c == '\0' || c == ' ');
        self.m.get(ts_uid)
    }

    /// Iterate over all registered transfer syntaxes, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferSyntax> {
        self.m.values()
    }
}

static REGISTRY: Lazy<TransferSyntaxRegistry> = Lazy::new(|| TransferSyntaxRegistry {
    m: initialize_registry(),
});

/// Retrieve the default transfer syntax.
pub fn default() -> TransferSyntax {
    entries::IMPLICIT_VR_LITTLE_ENDIAN
}

/// Retrieve the global transfer syntax registry.
pub fn get_registry() -> &'static TransferSyntaxRegistry {
    &REGISTRY
}

fn initialize_registry() -> HashMap<&'static str, TransferSyntax> {
    use self::entries::*;

    [
        // the three base transfer syntaxes
        IMPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_LITTLE_ENDIAN,
        EXPLICIT_VR_BIG_ENDIAN,
        // known, but deflating is not supported
        DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
        // encapsulated pixel data
        ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
        RLE_LOSSLESS,
        JPEG_BASELINE,
        JPEG_EXTENDED,
        JPEG_LOSSLESS_NON_HIERARCHICAL,
        JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION,
        JPEG_LS_LOSSLESS_IMAGE_COMPRESSION,
        JPEG_LS_LOSSY_IMAGE_COMPRESSION,
        JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
        JPEG_2000_IMAGE_COMPRESSION,
        HIGH_THROUGHPUT_JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY,
        HIGH_THROUGHPUT_JPEG_2000_WITH_RPCL_OPTIONS_IMAGE_COMPRESSION_LOSSLESS_ONLY,
        HIGH_THROUGHPUT_JPEG_2000_IMAGE_COMPRESSION,
    ]
    .iter()
    .map(|ts| (ts.uid(), *ts))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{get_registry, Codec, Endianness, TransferSyntax};
    use crate::encode::Framing;

    #[test]
    fn base_transfer_syntaxes_are_registered() {
        let reg = get_registry();

        let ts = reg.get("1.2.840.10008.1.2").expect("should find IVRLE");
        assert_eq!(ts.name(), "Implicit VR Little Endian");
        assert_eq!(ts.framing(), Framing::IMPLICIT_VR_LE);
        assert_eq!(ts.codec(), Codec::None);

        let ts = reg.get("1.2.840.10008.1.2.1").expect("should find EVRLE");
        assert_eq!(ts.framing(), Framing::EXPLICIT_VR_LE);

        let ts = reg.get("1.2.840.10008.1.2.2").expect("should find EVRBE");
        assert_eq!(ts.endianness(), Endianness::Big);
        assert!(ts.explicit_vr());
    }

    #[test]
    fn lookup_ignores_padding() {
        let reg = get_registry();
        assert!(reg.get("1.2.840.10008.1.2.1\0").is_some());
        assert!(reg.get("1.2.840.10008.1.2.4.50 ").is_some());
        assert!(reg.get("1.2.840.10008.1.2.999").is_none());
    }

    #[test]
    fn codecs_are_described() {
        let reg = get_registry();
        let ts = reg.get("1.2.840.10008.1.2.1.99").unwrap();
        assert!(ts.is_deflated());
        let ts = reg.get("1.2.840.10008.1.2.4.91").unwrap();
        assert!(ts.is_encapsulated_pixel_data());
        assert_eq!(ts.framing(), Framing::EXPLICIT_VR_LE);
        assert!(reg.iter().count() >= 17);
    }

    #[test]
    fn custom_transfer_syntax() {
        let ts = TransferSyntax::new(
            "1.2.3.4",
            "Implicit VR Big Endian",
            Endianness::Big,
            false,
            Codec::None,
        );
        assert_eq!(ts.framing(), Framing::IMPLICIT_VR_BE);
        assert_eq!(ts.to_string(), "Implicit VR Big Endian (1.2.3.4)");
    }
}
