use crate::data::record::EncodedRecord;
use crate::error::{Error, Result};

/// A group of encoded records presented together to one optimizer step.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub records: Vec<EncodedRecord>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn inputs(&self) -> impl Iterator<Item = &[f64]> {
        self.records.iter().map(|r| r.features.as_slice())
    }

    pub fn targets(&self) -> impl Iterator<Item = &[f64; 3]> {
        self.records.iter().map(|r| &r.target)
    }
}

/// Lazy grouping of a record stream into batches of `size`.
///
/// Order is preserved and only the final batch may be short. An upstream
/// error is yielded in place of the batch it interrupted and ends the stream.
pub struct Batches<I> {
    inner: I,
    size: usize,
    done: bool,
}

impl<I> Batches<I>
where
    I: Iterator<Item = Result<EncodedRecord>>,
{
    pub fn new(inner: I, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("batch size must be at least 1".into()));
        }
        Ok(Batches { inner, size, done: false })
    }
}

impl<I> Iterator for Batches<I>
where
    I: Iterator<Item = Result<EncodedRecord>>,
{
    type Item = Result<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut records = Vec::with_capacity(self.size);
        while records.len() < self.size {
            match self.inner.next() {
                Some(Ok(record)) => records.push(record),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }
        if records.is_empty() {
            None
        } else {
            Some(Ok(Batch { records }))
        }
    }
}

/// Convenience wrapper around `Batches::new`.
pub fn batch<I>(records: I, size: usize) -> Result<Batches<I::IntoIter>>
where
    I: IntoIterator<Item = Result<EncodedRecord>>,
{
    Batches::new(records.into_iter(), size)
}
