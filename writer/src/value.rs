//! Value codec for primitive values:
//! numbers, attribute tags, text and raw bytes.
use crate::error::{Result, ValueTypeMismatchSnafu, WriteElementSnafu};
use p10_core::value::ValueType;
use p10_core::{Tag, Value, VR};
use p10_encoding::ByteSink;
use snafu::{ensure, ResultExt};
use std::io::Write;

/// Check whether a primitive value of the given type
/// can be written under the given VR.
fn accepts(vr: VR, value_type: ValueType) -> bool {
    use p10_core::value::ValueType as T;
    match (vr, value_type) {
        (VR::SQ, _) => false,
        (_, T::Sequence) | (_, T::PixelSequence) => false,
        (_, T::Empty) => true,
        (VR::UN, _) => true,
        (VR::US, T::U16) | (VR::SS, T::I16) => true,
        (VR::UL, T::U32) | (VR::SL, T::I32) => true,
        (VR::UV, T::U64) | (VR::SV, T::I64) => true,
        (VR::FL, T::F32) | (VR::FD, T::F64) => true,
        (VR::AT, T::Tags) => true,
        (VR::OW, T::U16) | (VR::OL, T::U32) | (VR::OV, T::U64) => true,
        (VR::OF, T::F32) | (VR::OD, T::F64) => true,
        (VR::OB, T::Bytes)
        | (VR::OW, T::Bytes)
        | (VR::OL, T::Bytes)
        | (VR::OV, T::Bytes)
        | (VR::OF, T::Bytes)
        | (VR::OD, T::Bytes)
        | (VR::NA, T::Bytes) => true,
        (vr, T::Text) | (vr, T::Bytes) => is_textual(vr),
        _ => false,
    }
}

fn is_textual(vr: VR) -> bool {
    matches!(
        vr,
        VR::AE
            | VR::AS
            | VR::CS
            | VR::DA
            | VR::DS
            | VR::DT
            | VR::IS
            | VR::LO
            | VR::LT
            | VR::PN
            | VR::SH
            | VR::ST
            | VR::TM
            | VR::UC
            | VR::UI
            | VR::UR
            | VR::UT
    )
}

/// Describe the value types admitted by a VR, for error reporting.
fn expected_type(vr: VR) -> &'static str {
    match vr {
        VR::US => "u16",
        VR::SS => "i16",
        VR::UL => "u32",
        VR::SL => "i32",
        VR::UV => "u64",
        VR::SV => "i64",
        VR::FL => "f32",
        VR::FD => "f64",
        VR::AT => "tags",
        VR::OB | VR::NA => "bytes",
        VR::OW => "u16 or bytes",
        VR::OL => "u32 or bytes",
        VR::OV => "u64 or bytes",
        VR::OF => "f32 or bytes",
        VR::OD => "f64 or bytes",
        VR::SQ => "items",
        VR::UN => "any primitive value",
        _ => "text or bytes",
    }
}

/// Ensure that a primitive value can be written under the given VR.
pub(crate) fn check_primitive(tag: Tag, vr: VR, value: &Value) -> Result<()> {
    let actual = value.value_type();
    ensure!(
        accepts(vr, actual),
        ValueTypeMismatchSnafu {
            tag,
            vr,
            expected: expected_type(vr),
            actual,
        }
    );
    Ok(())
}

/// Write a primitive value in the sink's byte order.
///
/// Text and raw bytes are written verbatim,
/// so they must already be padded to an even length.
pub(crate) fn write_primitive<W>(sink: &mut ByteSink<W>, tag: Tag, value: &Value) -> Result<()>
where
    W: Write,
{
    match value {
        Value::Empty | Value::Sequence(_) | Value::PixelSequence(_) => Ok(()),
        Value::U16(values) => values
            .iter()
            .try_for_each(|v| sink.write_u16(*v))
            .context(WriteElementSnafu { tag }),
        Value::I16(values) => values
            .iter()
            .try_for_each(|v| sink.write_i16(*v))
            .context(WriteElementSnafu { tag }),
        Value::U32(values) => values
            .iter()
            .try_for_each(|v| sink.write_u32(*v))
            .context(WriteElementSnafu { tag }),
        Value::I32(values) => values
            .iter()
            .try_for_each(|v| sink.write_i32(*v))
            .context(WriteElementSnafu { tag }),
        Value::U64(values) => values
            .iter()
            .try_for_each(|v| sink.write_u64(*v))
            .context(WriteElementSnafu { tag }),
        Value::I64(values) => values
            .iter()
            .try_for_each(|v| sink.write_i64(*v))
            .context(WriteElementSnafu { tag }),
        Value::F32(values) => values
            .iter()
            .try_for_each(|v| sink.write_f32(*v))
            .context(WriteElementSnafu { tag }),
        Value::F64(values) => values
            .iter()
            .try_for_each(|v| sink.write_f64(*v))
            .context(WriteElementSnafu { tag }),
        // attribute tags are written as a pair of 16-bit numbers
        Value::Tags(values) => values
            .iter()
            .try_for_each(|t| {
                sink.write_u16(t.group())?;
                sink.write_u16(t.element())
            })
            .context(WriteElementSnafu { tag }),
        Value::Bytes(bytes) => sink.write_bytes(bytes).context(WriteElementSnafu { tag }),
        Value::Text(text) => sink
            .write_fixed_string(text)
            .context(WriteElementSnafu { tag }),
    }
}
