// Growable output buffer with geometric, fallible growth.
// A failed growth releases the partial contents and poisons the buffer.

use std::fmt;

use crate::error::ReportError;

#[derive(Debug)]
pub struct OutputBuffer {
    bytes: Vec<u8>,
    limit: Option<usize>,
    reallocations: usize,
    failed: Option<ReportError>,
}

impl OutputBuffer {
    /// Buffer with room for `initial` bytes, never growing past `limit` when set.
    pub fn new(initial: usize, limit: Option<usize>) -> Result<Self, ReportError> {
        let initial = limit.map_or(initial, |l| initial.min(l));
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(initial)
            .map_err(|_| ReportError::AllocationFailure { requested: initial })?;
        Ok(Self {
            bytes,
            limit,
            reallocations: 0,
            failed: None,
        })
    }

    pub fn append(&mut self, data: &[u8]) -> Result<(), ReportError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        if let Err(err) = self.reserve(data.len()) {
            self.bytes = Vec::new();
            self.failed = Some(err.clone());
            return Err(err);
        }
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    pub fn append_str(&mut self, s: &str) -> Result<(), ReportError> {
        self.append(s.as_bytes())
    }

    pub fn append_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), ReportError> {
        match fmt::Write::write_fmt(self, args) {
            Ok(()) => Ok(()),
            Err(_) => Err(self
                .failed
                .clone()
                .unwrap_or(ReportError::AllocationFailure {
                    requested: self.bytes.len(),
                })),
        }
    }

    // Doubles capacity until `additional` fits, capped at the limit.
    fn reserve(&mut self, additional: usize) -> Result<(), ReportError> {
        let required = self
            .bytes
            .len()
            .checked_add(additional)
            .ok_or(ReportError::AllocationFailure {
                requested: usize::MAX,
            })?;
        if required <= self.bytes.capacity() {
            return Ok(());
        }
        if self.limit.is_some_and(|limit| required > limit) {
            return Err(ReportError::AllocationFailure {
                requested: required,
            });
        }

        let mut new_cap = self.bytes.capacity().max(1);
        while new_cap < required {
            new_cap = new_cap.saturating_mul(2);
        }
        if let Some(limit) = self.limit {
            new_cap = new_cap.min(limit);
        }
        self.bytes
            .try_reserve_exact(new_cap - self.bytes.len())
            .map_err(|_| ReportError::AllocationFailure { requested: new_cap })?;
        self.reallocations += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// Number of times the buffer had to grow.
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl fmt::Write for OutputBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s.as_bytes()).map_err(|_| fmt::Error)
    }
}
