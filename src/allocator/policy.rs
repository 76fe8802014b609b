use serde::{Deserialize, Serialize};

/// Fixed time budget shared by every allocable roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationPolicy {
    /// Total time available for the round in seconds
    /// Default: 900 seconds (15 minutes)
    pub total_secs: u32,

    /// Hand-over buffer between two adjacent entries in seconds
    pub buffer_secs: u32,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            total_secs: 900,
            buffer_secs: 5,
        }
    }
}

impl AllocationPolicy {
    /// Equal share for each of `count` entries after the buffers are taken out
    pub fn per_speaker_secs(&self, count: usize) -> u32 {
        if count == 0 {
            return 0;
        }

        let count = u32::try_from(count).unwrap_or(u32::MAX);
        let buffers = self.buffer_secs.saturating_mul(count - 1);

        self.total_secs.saturating_sub(buffers) / count
    }
}
