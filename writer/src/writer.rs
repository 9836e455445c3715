//! Module containing the DICOM file writer,
//! which orchestrates the file header and the main data set.
use crate::element::encode_element;
use crate::error::{
    FlushSnafu, MissingMetaElementSnafu, Result, UnimplementedSnafu,
    UnsupportedTransferSyntaxSnafu, ValueTypeMismatchSnafu, WriteFileSnafu,
};
use crate::meta;
use crate::options::WriteOptions;
use p10_core::dictionary::DataDictionary;
use p10_core::{DataElement, DataSet, VR};
use p10_dictionary_std::{tags, StandardDataDictionary};
use p10_encoding::transfer_syntax::get_registry;
use p10_encoding::{ByteSink, Framing, TransferSyntax};
use snafu::{ensure, OptionExt, ResultExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Write a data set as a complete DICOM file
/// into the given writer.
///
/// The data set must contain its file meta group elements,
/// which are written first in explicit VR little endian.
/// The remaining elements are written in order,
/// in the transfer syntax given by the options
/// or by the _Transfer Syntax UID_ element.
///
/// On error, the output is left in an unspecified state.
pub fn write<W, D>(to: W, dataset: &DataSet, options: &WriteOptions<D>) -> Result<()>
where
    W: Write,
    D: DataDictionary,
    D: Clone,
{
    let mut writer = FileWriter::new(to, options.clone());
    writer.write_dataset(dataset)?;
    writer.flush()
}

/// Write a data set as a complete DICOM file
/// into the given file path.
///
/// See [`write`] for the details.
pub fn write_to_file<P, D>(path: P, dataset: &DataSet, options: &WriteOptions<D>) -> Result<()>
where
    P: AsRef<Path>,
    D: DataDictionary,
    D: Clone,
{
    let path = path.as_ref();
    let file = File::create(path).context(WriteFileSnafu { filename: path })?;
    let mut writer = FileWriter::new(BufWriter::new(file), options.clone());
    writer.write_dataset(dataset)?;
    writer
        .into_inner()
        .flush()
        .context(WriteFileSnafu { filename: path })
}

/// Determine the transfer syntax of a data set's main body:
/// the one given in the options if any,
/// otherwise the one identified by its _Transfer Syntax UID_.
pub fn resolve_transfer_syntax<D>(
    dataset: &DataSet,
    options: &WriteOptions<D>,
) -> Result<TransferSyntax> {
    if let Some(ts) = options.transfer_syntax {
        return Ok(ts);
    }

    let element = dataset
        .element(tags::TRANSFER_SYNTAX_UID)
        .context(MissingMetaElementSnafu {
            tag: tags::TRANSFER_SYNTAX_UID,
            alias: "TransferSyntaxUID",
        })?;
    let uid = element.value().as_text().context(ValueTypeMismatchSnafu {
        tag: tags::TRANSFER_SYNTAX_UID,
        vr: VR::UI,
        expected: "text",
        actual: element.value().value_type(),
    })?;
    get_registry()
        .get(uid)
        .copied()
        .with_context(|| UnsupportedTransferSyntaxSnafu {
            uid: uid.trim_end_matches(|c| c == '\0' || c == ' ').to_string(),
        })
}

/// A DICOM file writer, which can write a data set in one go
/// or piece by piece.
///
/// To write a file element by element,
/// call [`write_file_header`](FileWriter::write_file_header),
/// then [`set_transfer_syntax`](FileWriter::set_transfer_syntax),
/// then [`write_element`](FileWriter::write_element)
/// for each element of the main data set.
#[derive(Debug)]
pub struct FileWriter<W, D = StandardDataDictionary> {
    sink: ByteSink<W>,
    options: WriteOptions<D>,
}

impl<W, D> FileWriter<W, D>
where
    W: Write,
    D: DataDictionary,
{
    /// Create a new file writer over the given destination.
    pub fn new(to: W, options: WriteOptions<D>) -> Self {
        FileWriter {
            sink: ByteSink::new(to, Framing::EXPLICIT_VR_LE),
            options,
        }
    }

    /// Write the preamble, magic code and file meta group
    /// from the meta elements of the given data set.
    /// Elements outside of group `0002` are ignored.
    pub fn write_file_header(&mut self, dataset: &DataSet) -> Result<()> {
        meta::write_file_header(&mut self.sink, dataset.meta_elements(), &self.options)
    }

    /// Set the transfer syntax of all elements written next.
    pub fn set_transfer_syntax(&mut self, ts: &TransferSyntax) -> Result<()> {
        ensure!(
            !ts.is_deflated(),
            UnimplementedSnafu {
                feature: "deflated data set encoding",
            }
        );
        debug!("Writing data set in {}", ts);
        self.sink.set_transfer_syntax(ts.framing());
        Ok(())
    }

    /// Write a single data element in the current transfer syntax.
    pub fn write_element(&mut self, element: &DataElement) -> Result<()> {
        encode_element(&mut self.sink, element, &self.options)
    }

    /// Write the whole data set:
    /// the file header followed by all elements
    /// which are not part of the file meta group.
    pub fn write_dataset(&mut self, dataset: &DataSet) -> Result<()> {
        let ts = resolve_transfer_syntax(dataset, &self.options)?;
        // fail before writing anything
        ensure!(
            !ts.is_deflated(),
            UnimplementedSnafu {
                feature: "deflated data set encoding",
            }
        );

        self.write_file_header(dataset)?;
        self.set_transfer_syntax(&ts)?;
        for element in dataset.body_elements() {
            self.write_element(element)?;
        }
        Ok(())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush().context(FlushSnafu)
    }

    /// The number of bytes written so far.
    pub fn bytes_written(&self) -> u64 {
        self.sink.bytes_written()
    }

    /// Retrieve the write options of this writer.
    pub fn options(&self) -> &WriteOptions<D> {
        &self.options
    }

    /// Unwrap the file writer, returning the underlying destination.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}
