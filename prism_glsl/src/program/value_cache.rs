//! Uniform value cache
//!
//! One contiguous byte buffer holding the last value uploaded for every
//! locatable uniform, so identical re-uploads can be skipped without a
//! driver round trip.

/// Last-uploaded-value cache for a program's uniforms
#[derive(Debug)]
pub(crate) struct UniformValueCache {
    buffer: Vec<u8>,
    written: Vec<bool>,
}

impl UniformValueCache {
    /// Create a cache covering `total_bytes` of uniform storage
    pub(crate) fn new(total_bytes: usize) -> Self {
        Self {
            buffer: vec![0; total_bytes],
            written: vec![false; total_bytes],
        }
    }

    /// Compare `bytes` against the region at `offset`, storing them if they
    /// differ. Returns true when the region already held exactly these bytes
    /// and the upload can be skipped.
    pub(crate) fn check_and_store(&mut self, offset: usize, bytes: &[u8]) -> bool {
        let end = offset + bytes.len();
        if end > self.buffer.len() {
            // Out of range (should not happen); never suppress the upload.
            return false;
        }

        let unchanged = self.written[offset..end].iter().all(|w| *w)
            && self.buffer[offset..end] == *bytes;
        if unchanged {
            return true;
        }

        self.buffer[offset..end].copy_from_slice(bytes);
        for w in &mut self.written[offset..end] {
            *w = true;
        }
        false
    }
}

#[cfg(test)]
#[path = "value_cache_tests.rs"]
mod tests;
