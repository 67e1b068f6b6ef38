//! Planning horizon and rotation cycles.
//!
//! # Slot Model
//! Slots are 1-based weekend indices `1..=length`, ordered and
//! contiguous. Cycles partition the horizon into consecutive blocks
//! of `cycle_length` slots; the last block is truncated when the
//! horizon is not a multiple of the cycle length.

use serde::{Deserialize, Serialize};

/// A weekend slot index (1-based).
pub type Slot = u32;

/// Default horizon: one weekend per week of a 52-week year.
pub const DEFAULT_HORIZON: u32 = 52;

/// Default rotation cycle length (slots).
pub const DEFAULT_CYCLE_LENGTH: u32 = 16;

/// Planning horizon with its rotation cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    /// Number of slots.
    pub length: u32,
    /// Slots per rotation cycle.
    pub cycle_length: u32,
}

/// A contiguous block of slots `[start, end]` (both inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// First slot of the cycle.
    pub start: Slot,
    /// Last slot of the cycle.
    pub end: Slot,
}

impl Cycle {
    /// Whether the slot belongs to this cycle.
    #[inline]
    pub fn contains(&self, slot: Slot) -> bool {
        slot >= self.start && slot <= self.end
    }

    /// Slots of this cycle, ascending.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        self.start..=self.end
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON, DEFAULT_CYCLE_LENGTH)
    }
}

impl Horizon {
    /// Creates a horizon.
    pub fn new(length: u32, cycle_length: u32) -> Self {
        Self {
            length,
            cycle_length,
        }
    }

    /// All slots, ascending.
    pub fn slots(&self) -> impl Iterator<Item = Slot> {
        1..=self.length
    }

    /// Whether a slot index lies inside the horizon.
    #[inline]
    pub fn contains(&self, slot: Slot) -> bool {
        slot >= 1 && slot <= self.length
    }

    /// Partitions the horizon into rotation cycles.
    ///
    /// Returns an empty list when either length is zero.
    pub fn cycles(&self) -> Vec<Cycle> {
        if self.length == 0 || self.cycle_length == 0 {
            return Vec::new();
        }
        (1..=self.length)
            .step_by(self.cycle_length as usize)
            .map(|start| Cycle {
                start,
                end: (start + self.cycle_length - 1).min(self.length),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_horizon_cycles() {
        let h = Horizon::default();
        let cycles = h.cycles();
        // 1-16, 17-32, 33-48, 49-52
        assert_eq!(cycles.len(), 4);
        assert_eq!(cycles[0], Cycle { start: 1, end: 16 });
        assert_eq!(cycles[2], Cycle { start: 33, end: 48 });
        assert_eq!(cycles[3], Cycle { start: 49, end: 52 });
        assert_eq!(cycles[3].slots().count(), 4);
    }

    #[test]
    fn test_exact_multiple() {
        let cycles = Horizon::new(8, 4).cycles();
        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[1], Cycle { start: 5, end: 8 });
    }

    #[test]
    fn test_cycle_longer_than_horizon() {
        let cycles = Horizon::new(3, 16).cycles();
        assert_eq!(cycles, vec![Cycle { start: 1, end: 3 }]);
    }

    #[test]
    fn test_zero_lengths() {
        assert!(Horizon::new(0, 16).cycles().is_empty());
        assert!(Horizon::new(52, 0).cycles().is_empty());
    }

    #[test]
    fn test_contains() {
        let h = Horizon::new(10, 4);
        assert!(!h.contains(0));
        assert!(h.contains(10));
        assert!(!h.contains(11));
        assert_eq!(h.slots().count(), 10);

        let last = h.cycles()[2];
        assert!(last.contains(10));
        assert!(!last.contains(8));
    }
}
