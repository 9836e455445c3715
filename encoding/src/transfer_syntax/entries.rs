//! A list of compiled transfer syntax specifiers.
//!
//! - The three base transfer syntaxes are **fully implemented**.
//! - Transfer syntaxes with encapsulated pixel data are supported
//!   as long as the caller provides the pixel data fragments
//!   already encoded.
//! - _Deflated Explicit VR Little Endian_ is a **stub descriptor**:
//!   it is known, but writing data sets in it is not supported.

#![allow(deprecated)]

use super::{Codec, TransferSyntax as Ts};
use byteordered::Endianness;
use p10_dictionary_std::uids;

// -- the three base transfer syntaxes, fully supported --

/// **Fully implemented:** Implicit VR Little Endian: Default Transfer Syntax for DICOM
pub const IMPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new(
    uids::IMPLICIT_VR_LITTLE_ENDIAN,
    "Implicit VR Little Endian",
    Endianness::Little,
    false,
    Codec::None,
);

/// **Fully implemented:** Explicit VR Little Endian
pub const EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
    uids::EXPLICIT_VR_LITTLE_ENDIAN,
    "Explicit VR Little Endian",
    Codec::None,
);

/// **Fully implemented:** Explicit VR Big Endian
pub const EXPLICIT_VR_BIG_ENDIAN: Ts = Ts::new(
    uids::EXPLICIT_VR_BIG_ENDIAN,
    "Explicit VR Big Endian",
    Endianness::Big,
    true,
    Codec::None,
);

// -- stub transfer syntaxes, known but not supported --

/// **Stub descriptor:** Deflated Explicit VR Little Endian
pub const DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = Ts::new_ele(
    uids::DEFLATED_EXPLICIT_VR_LITTLE_ENDIAN,
    "Deflated Explicit VR Little Endian",
    Codec::Deflate,
);

// -- transfer syntaxes with encapsulated pixel data --

/// create a TS with encapsulated pixel data
const fn create_ts_encapsulated(uid: &'static str, name: &'static str) -> Ts {
    Ts::new_ele(uid, name, Codec::EncapsulatedPixelData)
}

/// **Implemented:** Encapsulated Uncompressed Explicit VR Little Endian
pub const ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN: Ts = create_ts_encapsulated(
    uids::ENCAPSULATED_UNCOMPRESSED_EXPLICIT_VR_LITTLE_ENDIAN,
    "Encapsulated Uncompressed Explicit VR Little Endian",
);

/// **Implemented:** RLE Lossless
pub const RLE_LOSSLESS: Ts = create_ts_encapsulated(uids::RLE_LOSSLESS, "RLE Lossless");

/// **Implemented:** JPEG Baseline (Process 1): Default Transfer Syntax for Lossy JPEG 8 Bit Image Compression
pub const JPEG_BASELINE: Ts =
    create_ts_encapsulated(uids::JPEG_BASELINE8_BIT, "JPEG Baseline (Process 1)");

/// **Implemented:** JPEG Extended (Process 2 & 4): Default Transfer Syntax for Lossy JPEG 12 Bit Image Compression (Process 4 only)
pub const JPEG_EXTENDED: Ts =
    create_ts_encapsulated(uids::JPEG_EXTENDED12_BIT, "JPEG Extended (Process 2 & 4)");

/// **Implemented:** JPEG Lossless, Non-Hierarchical (Process 14)
pub const JPEG_LOSSLESS_NON_HIERARCHICAL: Ts = create_ts_encapsulated(
    uids::JPEG_LOSSLESS,
    "JPEG Lossless, Non-Hierarchical (Process 14)",
);

/// **Implemented:** JPEG Lossless, Non-Hierarchical, First-Order Prediction
/// (Process 14 [Selection Value 1]):
/// Default Transfer Syntax for Lossless JPEG Image Compression
pub const JPEG_LOSSLESS_NON_HIERARCHICAL_FIRST_ORDER_PREDICTION: Ts = create_ts_encapsulated(
    uids::JPEG_LOSSLESS_SV1,
    "JPEG Lossless, Non-Hierarchical, First-Order Prediction",
);

/// **Implemented:** JPEG-LS Lossless Image Compression
pub const JPEG_LS_LOSSLESS_IMAGE_COMPRESSION: Ts = create_ts_encapsulated(
    uids::JPEGLS_LOSSLESS,
    "JPEG-LS Lossless Image Compression",
);

/// **Implemented:** JPEG-LS Lossy (Near-Lossless) Image Compression
pub const JPEG_LS_LOSSY_IMAGE_COMPRESSION: Ts = create_ts_encapsulated(
    uids::JPEGLS_NEAR_LOSSLESS,
    "JPEG-LS Lossy (Near-Lossless) Image Compression",
);

/// **Implemented:** JPEG 2000 Image Compression (Lossless Only)
pub const JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = create_ts_encapsulated(
    uids::JPEG2000_LOSSLESS,
    "JPEG 2000 Image Compression (Lossless Only)",
);

/// **Implemented:** JPEG 2000 Image Compression
pub const JPEG_2000_IMAGE_COMPRESSION: Ts =
    create_ts_encapsulated(uids::JPEG2000, "JPEG 2000 Image Compression");

/// **Implemented:** High-Throughput JPEG 2000 Image Compression (Lossless Only)
pub const HIGH_THROUGHPUT_JPEG_2000_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts = create_ts_encapsulated(
    uids::HTJ2K_LOSSLESS,
    "High-Throughput JPEG 2000 Image Compression (Lossless Only)",
);

/// **Implemented:** High-Throughput JPEG 2000 with RPCL Options Image Compression (Lossless Only)
pub const HIGH_THROUGHPUT_JPEG_2000_WITH_RPCL_OPTIONS_IMAGE_COMPRESSION_LOSSLESS_ONLY: Ts =
    create_ts_encapsulated(
        uids::HTJ2K_LOSSLESS_RPCL,
        "High-Throughput JPEG 2000 with RPCL Options Image Compression (Lossless Only)",
    );

/// **Implemented:** High-Throughput JPEG 2000 Image Compression
pub const HIGH_THROUGHPUT_JPEG_2000_IMAGE_COMPRESSION: Ts = create_ts_encapsulated(
    uids::HTJ2K,
    "High-Throughput JPEG 2000 Image Compression",
);
