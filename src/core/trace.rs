use super::state::{ProcessKey, Ticks};

pub const IDLE: &str = "IDLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Run(ProcessKey),
    Idle,
}

/// Maximal run of identical consecutive slots, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub slot: Slot,
    pub start: Ticks,
    pub end: Ticks,
}

impl Segment {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }
}

/// One slot per simulated unit, append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    slots: Vec<Slot>,
}

impl Trace {
    pub fn push(&mut self, slot: Slot) {
        self.slots.push(slot);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn get(&self, unit: Ticks) -> Option<Slot> {
        usize::try_from(unit)
            .ok()
            .and_then(|unit| self.slots.get(unit))
            .copied()
    }

    pub fn dispatch_count(&self, key: ProcessKey) -> usize {
        self.slots
            .iter()
            .filter(|slot| **slot == Slot::Run(key))
            .count()
    }

    pub fn idle_units(&self) -> usize {
        self.slots.iter().filter(|slot| **slot == Slot::Idle).count()
    }

    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();
        for (unit, &slot) in (0..).zip(&self.slots) {
            match segments.last_mut() {
                Some(last) if last.slot == slot => last.end = unit + 1,
                _ => segments.push(Segment {
                    slot,
                    start: unit,
                    end: unit + 1,
                }),
            }
        }
        segments
    }

    // Changes of running process, idle units skipped
    pub fn context_switches(&self) -> usize {
        let mut running = self.slots.iter().filter_map(|slot| match slot {
            Slot::Run(key) => Some(*key),
            Slot::Idle => None,
        });
        let Some(mut prev) = running.next() else {
            return 0;
        };
        let mut switches = 0;
        for key in running {
            if key != prev {
                switches += 1;
                prev = key;
            }
        }
        switches
    }

    pub fn longest_idle_run(&self) -> Ticks {
        self.segments()
            .iter()
            .filter(|segment| segment.slot == Slot::Idle)
            .map(Segment::len)
            .max()
            .unwrap_or(0)
    }
}
