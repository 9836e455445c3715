//! Value representation resolution.
use crate::error::{MissingVrSnafu, Result, VrMismatchSnafu};
use crate::options::WriteOptions;
use p10_core::dictionary::{DataDictionary, DataDictionaryEntry, VirtualVr};
use p10_core::{DataElement, Value, VR};
use snafu::OptionExt;
use tracing::warn;

/// Determine the value representation with which an element is written.
///
/// When verification is skipped,
/// the element's declared VR is used verbatim.
/// Otherwise, the declared VR is checked against the dictionary:
///
/// - an element without a declared VR takes the dictionary's VR,
///   choosing by value type when the dictionary admits more than one;
/// - a declared VR outside of the admissible set is a [`VrMismatch`];
/// - tags unknown to the dictionary keep their declared VR,
///   or are written as `UN` if none was declared.
///
/// [`VrMismatch`]: crate::Error::VrMismatch
pub fn resolve_vr<D>(element: &DataElement, options: &WriteOptions<D>) -> Result<VR>
where
    D: DataDictionary,
{
    let tag = element.tag();
    if options.skip_vr_verification {
        return element.vr().context(MissingVrSnafu { tag });
    }

    let expected = match options.dictionary.by_tag(tag) {
        Some(entry) => entry.vr(),
        None => {
            return match element.vr() {
                Some(vr) => Ok(vr),
                None => {
                    warn!("Unknown tag {} without a declared VR, writing it as UN", tag);
                    Ok(VR::UN)
                }
            };
        }
    };

    match element.vr() {
        None => Ok(default_vr(expected, element.value())),
        Some(declared) if expected.contains(declared) => Ok(declared),
        Some(declared) => VrMismatchSnafu {
            tag,
            declared,
            expected,
        }
        .fail(),
    }
}

/// Choose a concrete VR for an attribute whose VR depends on its value.
fn default_vr(expected: VirtualVr, value: &Value) -> VR {
    match (expected, value) {
        (VirtualVr::Exact(vr), _) => vr,
        (VirtualVr::Xs, Value::I16(_)) | (VirtualVr::Lt, Value::I16(_)) => VR::SS,
        (VirtualVr::Xs, _) => VR::US,
        (VirtualVr::Ox, Value::U16(_)) | (VirtualVr::Px, Value::U16(_)) => VR::OW,
        (VirtualVr::Ox, _) | (VirtualVr::Px, _) => VR::OB,
        (VirtualVr::Lt, _) => VR::OW,
    }
}
