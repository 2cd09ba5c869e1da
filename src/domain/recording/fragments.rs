//! Ordered buffer of captured audio fragments

/// In-memory sequence of audio fragments collected during one session.
///
/// The capture device delivers audio in fragments (sample chunks). Each
/// fragment is appended in arrival order, and the assembled sample stream
/// is exactly the concatenation of the fragments in that order.
#[derive(Debug, Default)]
pub struct FragmentBuffer {
    samples: Vec<i16>,
    fragment_count: usize,
}

impl FragmentBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            fragment_count: 0,
        }
    }

    /// Append one fragment, preserving arrival order
    pub fn push_fragment(&mut self, fragment: &[i16]) {
        self.samples.extend_from_slice(fragment);
        self.fragment_count += 1;
    }

    /// Number of fragments appended so far
    pub fn fragment_count(&self) -> usize {
        self.fragment_count
    }

    /// Total number of samples across all fragments
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check whether any samples were collected
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Discard all collected fragments
    pub fn clear(&mut self) {
        self.samples.clear();
        self.fragment_count = 0;
    }

    /// Consume the buffer, yielding the concatenated sample stream
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}
