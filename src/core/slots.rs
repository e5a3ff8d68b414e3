use egui::Pos2;

pub const SLOT_CAPACITY: usize = 60;
pub const INITIAL_COUNTDOWN: u8 = 255;

/// One reusable record tracking an on-screen note visual and its remaining
/// lifetime. `countdown` doubles as the draw alpha: 0 means the slot is free.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteVisual {
    pub countdown: u8,
    pub position: Pos2,
    pub note: u8,
    pub velocity: u8,
}

impl NoteVisual {
    const FREE: NoteVisual = NoteVisual {
        countdown: 0,
        position: Pos2::ZERO,
        note: 0,
        velocity: 0,
    };

    pub fn is_active(&self) -> bool {
        self.countdown > 0
    }
}

/// Fixed-capacity arena of note visuals. Allocation scans for the first free
/// slot by ascending index; a full table drops the note (no eviction).
pub struct NoteSlotTable {
    slots: [NoteVisual; SLOT_CAPACITY],
}

impl NoteSlotTable {
    pub fn new() -> Self {
        Self {
            slots: [NoteVisual::FREE; SLOT_CAPACITY],
        }
    }

    /// Claims the first free slot for a note, returning false when the table
    /// is saturated. A failed allocation has no effect.
    pub fn allocate(&mut self, note: u8, velocity: u8, position: Pos2) -> bool {
        for slot in self.slots.iter_mut() {
            if !slot.is_active() {
                *slot = NoteVisual {
                    countdown: INITIAL_COUNTDOWN,
                    position,
                    note,
                    velocity,
                };
                return true;
            }
        }
        false
    }

    /// Snapshots every active slot for drawing, then ages each by one step.
    /// The fade rate is coupled to the call rate: this must run exactly once
    /// per rendered frame.
    pub fn age_and_collect(&mut self) -> Vec<NoteVisual> {
        let mut active = Vec::new();
        for slot in self.slots.iter_mut() {
            if slot.is_active() {
                active.push(*slot);
                slot.countdown -= 1;
            }
        }
        active
    }

    pub fn active_len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_allocate_fills_slots_in_index_order() {
        let mut table = NoteSlotTable::new();
        assert!(table.allocate(60, 100, pos2(5., 5.)));
        assert!(table.allocate(61, 90, pos2(6., 6.)));

        assert_eq!(table.slots[0].note, 60);
        assert_eq!(table.slots[0].countdown, INITIAL_COUNTDOWN);
        assert_eq!(table.slots[1].note, 61);
        assert_eq!(table.active_len(), 2);
    }

    #[test]
    fn test_allocate_fails_when_saturated() {
        let mut table = NoteSlotTable::new();
        for i in 0..SLOT_CAPACITY {
            assert!(table.allocate(i as u8, 100, pos2(1., 1.)));
        }
        assert_eq!(table.active_len(), SLOT_CAPACITY);

        // 61st note is dropped and the table is untouched
        assert!(!table.allocate(127, 127, pos2(2., 2.)));
        assert_eq!(table.active_len(), SLOT_CAPACITY);
        assert!(table.slots.iter().all(|s| s.velocity == 100));
    }

    #[test]
    fn test_countdown_reaches_zero_in_exactly_255_steps() {
        let mut table = NoteSlotTable::new();
        table.allocate(60, 100, pos2(5., 5.));

        for step in 0..u8::MAX {
            let active = table.age_and_collect();
            assert_eq!(active.len(), 1);
            // snapshot carries the pre-decrement value
            assert_eq!(active[0].countdown, INITIAL_COUNTDOWN - step);
        }
        assert_eq!(table.active_len(), 0);
        assert!(table.age_and_collect().is_empty());
        assert_eq!(table.slots[0].countdown, 0);
    }

    #[test]
    fn test_freed_slot_is_reallocated_first() {
        let mut table = NoteSlotTable::new();
        table.allocate(60, 100, pos2(1., 1.));
        table.allocate(61, 100, pos2(2., 2.));

        // run the first slot down by hand, leaving the second active
        table.slots[0].countdown = 0;

        assert!(table.allocate(72, 50, pos2(3., 3.)));
        assert_eq!(table.slots[0].note, 72);
        assert_eq!(table.slots[1].note, 61);
    }

    #[test]
    fn test_aging_only_touches_active_slots() {
        let mut table = NoteSlotTable::new();
        table.allocate(60, 100, pos2(1., 1.));
        table.slots[0].countdown = 1;

        assert_eq!(table.age_and_collect().len(), 1);
        assert_eq!(table.slots[0].countdown, 0);
        // a free slot never goes negative or wraps
        assert!(table.age_and_collect().is_empty());
        assert_eq!(table.slots[0].countdown, 0);
    }
}
