//! This module contains the concept of a DICOM data dictionary.
//!
//! The encoder consults a data element dictionary
//! to determine the expected value representation of each attribute.
//! The standard dictionary lives in the `p10-dictionary-std` crate.
use crate::header::{Tag, VR};
use std::fmt;

pub mod stub;

pub use self::stub::StubDataDictionary;

/// Specification of a range of tags pertaining to an attribute.
/// Very often, the dictionary of attributes indicates a unique
/// group part and element part `(group,elem)`,
/// but occasionally an attribute may cover
/// a range of groups or elements instead.
/// For example,
/// _Overlay Data_ (60xx,3000) has more than one possible tag,
/// since it is part of a repeating group.
/// Moreover, a unique variant is defined for group length tags
/// and another one for private creator tags.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TagRange {
    /// Only a specific tag
    Single(Tag),
    /// The two rightmost digits of the _group_ portion are open:
    /// `(GGxx,EEEE)`
    Group100(Tag),
    /// The two rightmost digits of the _element_ portion are open:
    /// `(GGGG,EExx)`
    Element100(Tag),
    /// Generic group length tag,
    /// refers to any attribute of the form `(GGGG,0000)`.
    GroupLength,
    /// Generic private creator tag,
    /// refers to any tag from (GGGG,0010) to (GGGG,00FF),
    /// where `GGGG` is an odd number.
    PrivateCreator,
}

impl TagRange {
    /// Retrieve the inner tag representation of this range.
    ///
    /// Open components are zeroed out.
    /// Returns `Tag(0x0000, 0x0000)` for a group length tag
    /// and `Tag(0x0009, 0x0010)` for a private creator tag.
    pub fn inner(self) -> Tag {
        match self {
            TagRange::Single(tag) => tag,
            TagRange::Group100(tag) => tag,
            TagRange::Element100(tag) => tag,
            TagRange::GroupLength => Tag(0x0000, 0x0000),
            TagRange::PrivateCreator => Tag(0x0009, 0x0010),
        }
    }
}

/// A "virtual" value representation (VR) descriptor
/// which extends the standard enumeration with context-dependent VRs.
///
/// It is used by element dictionary entries to describe circumstances
/// in which the real VR may depend on context.
/// As an example, the _Pixel Data_ attribute
/// can have a value representation of either [`OB`](VR::OB) or [`OW`](VR::OW).
#[derive(Debug, Copy, Clone, Eq, Hash, PartialEq)]
pub enum VirtualVr {
    /// The value representation is exactly known
    /// and does not depend on context.
    Exact(VR),
    /// A pixel sample value with a short magnitude,
    /// either [`US`](VR::US) or [`SS`](VR::SS).
    Xs,
    /// Overlay data, either [`OB`](VR::OB) or [`OW`](VR::OW).
    Ox,
    /// Pixel data, either [`OB`](VR::OB) or [`OW`](VR::OW).
    Px,
    /// LUT data, either [`US`](VR::US), [`SS`](VR::SS) or [`OW`](VR::OW).
    Lt,
}

impl From<VR> for VirtualVr {
    fn from(value: VR) -> Self {
        VirtualVr::Exact(value)
    }
}

impl VirtualVr {
    /// Return the underlying value representation
    /// in the case that it can be unambiguously defined without context.
    pub fn exact(self) -> Option<VR> {
        match self {
            VirtualVr::Exact(vr) => Some(vr),
            _ => None,
        }
    }

    /// Return the underlying value representation,
    /// making a relaxed conversion if it cannot be
    /// accurately resolved without context.
    ///
    /// - [`Xs`](VirtualVr::Xs) is relaxed to [`US`](VR::US)
    /// - [`Ox`](VirtualVr::Ox) is relaxed to [`OW`](VR::OW)
    /// - [`Px`](VirtualVr::Px) is relaxed to [`OW`](VR::OW)
    /// - [`Lt`](VirtualVr::Lt) is relaxed to [`OW`](VR::OW)
    pub fn relaxed(self) -> VR {
        match self {
            VirtualVr::Exact(vr) => vr,
            VirtualVr::Xs => VR::US,
            VirtualVr::Ox => VR::OW,
            VirtualVr::Px => VR::OW,
            VirtualVr::Lt => VR::OW,
        }
    }

    /// Check whether the given value representation
    /// is admissible for this descriptor.
    pub fn contains(self, vr: VR) -> bool {
        match self {
            VirtualVr::Exact(exact) => exact == vr,
            VirtualVr::Xs => matches!(vr, VR::US | VR::SS),
            VirtualVr::Ox | VirtualVr::Px => matches!(vr, VR::OB | VR::OW),
            VirtualVr::Lt => matches!(vr, VR::US | VR::SS | VR::OW),
        }
    }
}

impl fmt::Display for VirtualVr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VirtualVr::Exact(vr) => write!(f, "{}", vr),
            VirtualVr::Xs => f.write_str("US or SS"),
            VirtualVr::Ox | VirtualVr::Px => f.write_str("OB or OW"),
            VirtualVr::Lt => f.write_str("US, SS or OW"),
        }
    }
}

/// Type trait for a dictionary of DICOM attributes.
///
/// The main purpose of an attribute dictionary is
/// to retrieve a record containing additional information about a data element,
/// either by DICOM tag via [`by_tag`](DataDictionary::by_tag)
/// or by its keyword via [`by_name`](DataDictionary::by_name).
/// These methods return `None`
/// when the tag or name is not recognized by the dictionary.
pub trait DataDictionary {
    /// The type of the dictionary entry.
    type Entry: DataDictionaryEntry;

    /// Fetch a data element entry by its tag.
    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry>;

    /// Fetch an entry by its usual alias
    /// (e.g. "PatientName" or "SOPInstanceUID").
    /// Aliases are in UpperCamelCase and case sensitive.
    fn by_name(&self, name: &str) -> Option<&Self::Entry>;
}

impl<D: ?Sized + DataDictionary> DataDictionary for &D {
    type Entry = D::Entry;

    fn by_tag(&self, tag: Tag) -> Option<&Self::Entry> {
        (**self).by_tag(tag)
    }

    fn by_name(&self, name: &str) -> Option<&Self::Entry> {
        (**self).by_name(name)
    }
}

/// The data element dictionary entry type,
/// representing a DICOM attribute.
pub trait DataDictionaryEntry {
    /// The full possible tag range of the attribute,
    /// which this dictionary entry can represent.
    fn tag_range(&self) -> TagRange;

    /// Fetch a single tag applicable to this attribute.
    ///
    /// Note that this is not necessarily
    /// the original tag used as key for this entry.
    fn tag(&self) -> Tag {
        self.tag_range().inner()
    }

    /// The alias of the attribute, with no spaces, usually in UpperCamelCase.
    fn alias(&self) -> &str;

    /// The extended value representation descriptor of the attribute.
    fn vr(&self) -> VirtualVr;
}

/// A data type for a dictionary entry with a string slice for its alias.
#[derive(Debug, PartialEq, Clone)]
pub struct DataDictionaryEntryRef<'a> {
    /// The attribute tag or tag range
    pub tag: TagRange,
    /// The alias of the attribute, with no spaces, usually InCapitalizedCamelCase
    pub alias: &'a str,
    /// The extended value representation descriptor of the attribute
    pub vr: VirtualVr,
}

impl<'a> DataDictionaryEntry for DataDictionaryEntryRef<'a> {
    fn tag_range(&self) -> TagRange {
        self.tag
    }
    fn alias(&self) -> &str {
        self.alias
    }
    fn vr(&self) -> VirtualVr {
        self.vr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_vr_membership() {
        assert!(VirtualVr::Px.contains(VR::OB));
        assert!(VirtualVr::Px.contains(VR::OW));
        assert!(!VirtualVr::Px.contains(VR::UN));
        assert!(VirtualVr::Xs.contains(VR::SS));
        assert!(VirtualVr::Exact(VR::SQ).contains(VR::SQ));
        assert!(!VirtualVr::Exact(VR::SQ).contains(VR::OB));
        assert_eq!(VirtualVr::Lt.relaxed(), VR::OW);
        assert_eq!(VirtualVr::Ox.to_string(), "OB or OW");
        assert_eq!(VirtualVr::from(VR::UL).exact(), Some(VR::UL));
    }

    #[test]
    fn tag_range_inner() {
        assert_eq!(
            TagRange::Group100(Tag(0x6000, 0x3000)).inner(),
            Tag(0x6000, 0x3000)
        );
        assert_eq!(TagRange::GroupLength.inner(), Tag(0x0000, 0x0000));
    }
}
