//! Definition of records held in a [`RecordRing`](crate::RecordRing).

use crate::Result;
use std::ops::Deref;

/// A complete, delimiter terminated sequence of bytes.
///
/// Records are the unit of retention and eviction in a ring buffer. Once built
/// a record never changes, its length is the length of the bytes it owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record(Box<[u8]>);

impl Record {
    /// Build a record from the concatenation of some byte slices.
    ///
    /// Exactly one allocation is made for the record. Returns an error
    /// rather than aborting if that allocation cannot be made.
    ///
    /// # Arguments
    ///
    /// * `parts` - Byte slices to concatenate, in order.
    pub(crate) fn try_concat(parts: &[&[u8]]) -> Result<Self> {
        let len = parts.iter().map(|part| part.len()).sum();

        // Allocate all memory upfront.
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(len)?;

        for part in parts {
            bytes.extend_from_slice(part);
        }

        Ok(Self(bytes.into_boxed_slice()))
    }

    /// Number of bytes in this record.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// true if this record holds no bytes, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reference to bytes held in this record.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume this record, returning ownership of its bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_vec()
    }
}

impl Deref for Record {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for Record {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Record {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

impl From<&[u8]> for Record {
    #[inline]
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolero::check;

    #[test]
    fn concat() {
        check!()
            .with_type::<Vec<Vec<u8>>>()
            .for_each(|parts| {
                let slices: Vec<&[u8]> = parts.iter().map(Vec::as_slice).collect();
                let record = Record::try_concat(&slices).expect("Should allocate record");

                // Record holds every part back to back.
                let expected = parts.concat();
                assert_eq!(record.len(), expected.len());
                assert_eq!(record.is_empty(), expected.is_empty());
                assert_eq!(record.as_bytes(), expected.as_slice());
                assert_eq!(record.into_bytes(), expected);
            });
    }

    #[test]
    fn conversions() {
        let record = Record::from(b"AA\n".as_slice());
        assert_eq!(&*record, b"AA\n");
        assert_eq!(record.as_ref(), b"AA\n");
        assert_eq!(record, Record::from(b"AA\n".to_vec()));

        let empty = Record::try_concat(&[]).expect("Should allocate record");
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
    }
}
