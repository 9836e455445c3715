//! In-memory DICOM data sets.
use crate::element::DataElement;
use crate::header::Tag;
use std::iter::FromIterator;

/// An ordered collection of data elements,
/// possibly including the file meta group.
///
/// Insertion order is preserved.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataSet {
    elements: Vec<DataElement>,
}

impl DataSet {
    /// Create an empty data set.
    pub fn new() -> Self {
        DataSet::default()
    }

    /// Append a data element to the end of the data set.
    pub fn push(&mut self, element: DataElement) {
        self.elements.push(element);
    }

    /// Fetch the first data element with the given tag.
    pub fn element(&self, tag: Tag) -> Option<&DataElement> {
        self.elements.iter().find(|e| e.tag() == tag)
    }

    /// Iterate over all data elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, DataElement> {
        self.elements.iter()
    }

    /// Iterate over the file meta group elements `(0002,xxxx)`.
    pub fn meta_elements(&self) -> impl Iterator<Item = &DataElement> {
        self.elements.iter().filter(|e| e.tag().is_file_meta())
    }

    /// Iterate over the data elements outside of the file meta group.
    pub fn body_elements(&self) -> impl Iterator<Item = &DataElement> {
        self.elements.iter().filter(|e| !e.tag().is_file_meta())
    }

    /// The number of data elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the data set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<DataElement> for DataSet {
    fn from_iter<I: IntoIterator<Item = DataElement>>(iter: I) -> Self {
        DataSet {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Extend<DataElement> for DataSet {
    fn extend<I: IntoIterator<Item = DataElement>>(&mut self, iter: I) {
        self.elements.extend(iter)
    }
}

impl<'a> IntoIterator for &'a DataSet {
    type Item = &'a DataElement;
    type IntoIter = std::slice::Iter<'a, DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for DataSet {
    type Item = DataElement;
    type IntoIter = std::vec::IntoIter<DataElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}
