//! Write configuration.
use p10_dictionary_std::StandardDataDictionary;
use p10_encoding::TransferSyntax;

/// A builder type for writing a DICOM file with additional options.
///
/// Options are resolved once into this value before writing begins,
/// and are passed by reference through every encoding step.
/// Adaptor methods are applied in call order,
/// so a later call overrides the effect of an earlier one.
///
/// # Example
///
/// ```no_run
/// # use p10_core::DataSet;
/// # use p10_writer::WriteOptions;
/// # let dataset = DataSet::new();
/// let options = WriteOptions::new()
///     .skip_vr_verification(true)
///     .transfer_syntax(p10_encoding::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN);
/// p10_writer::write_to_file("path/to/file.dcm", &dataset, &options)?;
/// # Result::<(), Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Debug, Default, Clone)]
#[non_exhaustive]
pub struct WriteOptions<D = StandardDataDictionary> {
    pub(crate) dictionary: D,
    pub(crate) skip_vr_verification: bool,
    pub(crate) transfer_syntax: Option<TransferSyntax>,
}

impl WriteOptions {
    pub fn new() -> Self {
        WriteOptions::default()
    }
}

impl<D> WriteOptions<D> {
    /// Set whether to write each element's declared VR verbatim,
    /// without checking it against the data dictionary.
    ///
    /// Elements without a declared VR then fail to encode.
    /// Verification is enabled by default.
    pub fn skip_vr_verification(mut self, skip: bool) -> Self {
        self.skip_vr_verification = skip;
        self
    }

    /// Set the transfer syntax of the main data set,
    /// instead of resolving it from the _Transfer Syntax UID_ meta element.
    pub fn transfer_syntax(mut self, ts: TransferSyntax) -> Self {
        self.transfer_syntax = Some(ts);
        self
    }

    /// Set the data element dictionary used to resolve value representations.
    pub fn dictionary<Di>(self, dict: Di) -> WriteOptions<Di> {
        WriteOptions {
            dictionary: dict,
            skip_vr_verification: self.skip_vr_verification,
            transfer_syntax: self.transfer_syntax,
        }
    }

    /// Whether VR verification is skipped.
    pub fn skips_vr_verification(&self) -> bool {
        self.skip_vr_verification
    }

    /// The main data set transfer syntax override, if any.
    pub fn transfer_syntax_override(&self) -> Option<&TransferSyntax> {
        self.transfer_syntax.as_ref()
    }

    /// The data element dictionary in use.
    pub fn data_dictionary(&self) -> &D {
        &self.dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::WriteOptions;
    use p10_core::dictionary::StubDataDictionary;
    use p10_encoding::transfer_syntax::entries;

    #[test]
    fn later_options_override_earlier_ones() {
        let options = WriteOptions::new()
            .skip_vr_verification(true)
            .transfer_syntax(entries::EXPLICIT_VR_BIG_ENDIAN)
            .skip_vr_verification(false)
            .transfer_syntax(entries::IMPLICIT_VR_LITTLE_ENDIAN);

        assert!(!options.skips_vr_verification());
        assert_eq!(
            options.transfer_syntax_override(),
            Some(&entries::IMPLICIT_VR_LITTLE_ENDIAN)
        );
    }

    #[test]
    fn swapping_the_dictionary_keeps_other_options() {
        let options = WriteOptions::new()
            .skip_vr_verification(true)
            .dictionary(StubDataDictionary);
        assert!(options.skips_vr_verification());
        assert!(options.transfer_syntax_override().is_none());
    }

    #[test]
    fn defaults() {
        let options = WriteOptions::new();
        assert!(!options.skips_vr_verification());
        assert!(options.transfer_syntax_override().is_none());
    }
}
