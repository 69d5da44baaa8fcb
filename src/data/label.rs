use std::fmt;

use tracing::warn;

use crate::data::record::{EncodedRecord, Record};
use crate::error::{Error, Result};

/// The three iris species, in the fixed index order used by the one-hot
/// targets and by the network's output layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLabel {
    Setosa,
    Virginica,
    Versicolor,
}

impl ClassLabel {
    pub const ALL: [ClassLabel; 3] = [ClassLabel::Setosa, ClassLabel::Virginica, ClassLabel::Versicolor];

    pub const COUNT: usize = 3;

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<ClassLabel> {
        ClassLabel::ALL.get(index).copied()
    }

    /// The exact string the dataset uses for this class.
    pub fn dataset_name(self) -> &'static str {
        match self {
            ClassLabel::Setosa => "setosa",
            ClassLabel::Virginica => "virginica",
            ClassLabel::Versicolor => "versicolor",
        }
    }

    /// Human-readable name printed for predictions.
    pub fn display_name(self) -> &'static str {
        match self {
            ClassLabel::Setosa => "Setosa",
            ClassLabel::Virginica => "Virginica",
            ClassLabel::Versicolor => "Versicolor",
        }
    }

    /// Indicator vector with a single `1.0` at this class's index.
    pub fn one_hot(self) -> [f64; 3] {
        let mut target = [0.0; 3];
        target[self.index()] = 1.0;
        target
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// What to do with a label that matches none of the known class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
    /// Fail with `Error::LabelEncoding`.
    #[default]
    Strict,
    /// Emit an all-zero target and log a warning.
    Permissive,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LabelEncoder {
    pub policy: EncodingPolicy,
}

impl LabelEncoder {
    pub fn new(policy: EncodingPolicy) -> Self {
        LabelEncoder { policy }
    }

    /// Replaces the record's label with its indicator vector.
    ///
    /// Each class is tested independently with a case-sensitive comparison,
    /// so an unmatched label leaves every slot at zero.
    pub fn encode(&self, record: Record) -> Result<EncodedRecord> {
        let mut target = [0.0; 3];
        for class in ClassLabel::ALL {
            if record.label == class.dataset_name() {
                target[class.index()] = 1.0;
            }
        }

        if target.iter().all(|&t| t == 0.0) {
            match self.policy {
                EncodingPolicy::Strict => {
                    return Err(Error::LabelEncoding { row: record.row, label: record.label });
                }
                EncodingPolicy::Permissive => {
                    warn!(row = record.row, label = %record.label, "unknown label encoded as all zeros");
                }
            }
        }

        Ok(EncodedRecord { features: record.features, target })
    }

    /// Lazily encodes a stream of records, passing upstream errors through.
    pub fn encode_all<I>(self, records: I) -> impl Iterator<Item = Result<EncodedRecord>>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        records.into_iter().map(move |r| r.and_then(|record| self.encode(record)))
    }
}
