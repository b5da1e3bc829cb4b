use std::{fmt, sync::Arc};

use crate::binary_attributes::{BinaryAttributeDetector, BinaryAttributes};

/// Read-only settings shared by every decoder of a process.
#[derive(Clone)]
pub struct DecoderConfig {
    /// Largest accepted envelope, header included. `None` is unlimited.
    pub max_pdu_size: Option<usize>,
    pub binary_attributes: Arc<dyn BinaryAttributeDetector>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_pdu_size: None,
            binary_attributes: Arc::new(BinaryAttributes::default()),
        }
    }
}

impl DecoderConfig {
    pub fn with_max_pdu_size(mut self, limit: usize) -> Self {
        self.max_pdu_size = Some(limit);
        self
    }

    pub fn with_binary_attributes(mut self, detector: Arc<dyn BinaryAttributeDetector>) -> Self {
        self.binary_attributes = detector;
        self
    }
}

impl fmt::Debug for DecoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoderConfig")
            .field("max_pdu_size", &self.max_pdu_size)
            .finish_non_exhaustive()
    }
}
