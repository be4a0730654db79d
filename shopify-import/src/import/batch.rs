//! Fixed-size batching of records for the sink

/// Default number of records per insert call
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Collects items into groups of `size`, preserving order
#[derive(Debug)]
pub struct BatchAccumulator<T> {
    size: usize,
    buffer: Vec<T>,
}

impl<T> BatchAccumulator<T> {
    /// A size of zero is treated as one
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            buffer: Vec::with_capacity(size),
        }
    }

    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Add an item; returns the full batch once `size` items are buffered
    pub fn push(&mut self, item: T) -> Option<Vec<T>> {
        self.buffer.push(item);
        if self.buffer.len() >= self.size {
            Some(std::mem::replace(
                &mut self.buffer,
                Vec::with_capacity(self.size),
            ))
        } else {
            None
        }
    }

    /// Remaining partial batch, if any
    pub fn finish(self) -> Option<Vec<T>> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }
}

impl<T> Default for BatchAccumulator<T> {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}
