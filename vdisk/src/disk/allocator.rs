// Free space is never tracked separately. Every allocation rescans the partition table and derives,
// for each inactive slot, the gap it could occupy between its active neighbours in table order.
// Active slots therefore stay physically ordered by table index and holes left by deletions are
// only reachable through the slot that was cleared.

use super::disk_blocks::{BootRecord, PARTITION_SLOTS};
use crate::FitStrategy;

/// A half-open byte range `[start, end)` on the disk.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Extent {
    start: u64,
    end: u64,
}

impl Extent {
    pub fn new(start: u64, end: u64) -> Self {
        return Self { start, end };
    }

    #[inline]
    pub fn start(&self) -> u64 {
        return self.start;
    }

    #[inline]
    pub fn end(&self) -> u64 {
        return self.end;
    }

    #[inline]
    pub fn len(&self) -> u64 {
        return self.end.saturating_sub(self.start);
    }

    pub fn is_empty(&self) -> bool {
        return self.len() == 0;
    }
}

/// For every inactive slot, the free extent a new partition placed there could use. Active slots map to None.
pub fn candidate_extents(record: &BootRecord) -> [Option<Extent>; PARTITION_SLOTS] {
    let mut result = [None; PARTITION_SLOTS];
    let slots = record.slots();

    for (i, slot) in slots.iter().enumerate() {
        if slot.is_active() {
            continue;
        }

        let start = slots[..i]
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.end())
            .max()
            .unwrap_or(BootRecord::first_usable_byte())
            .max(BootRecord::first_usable_byte());

        let end = slots[i + 1..]
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.start())
            .min()
            .unwrap_or(record.total_size())
            .min(record.total_size());

        result[i] = Some(Extent::new(start, end.max(start)));
    }

    return result;
}

/// Pick the slot whose candidate extent satisfies the fit. Ties go to the lowest slot index.
pub fn choose_slot(fit: FitStrategy, candidates: &[Option<Extent>], size: u64) -> Option<usize> {
    let mut fitting = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.map(|extent| (i, extent.len())))
        .filter(|(_, available)| *available >= size);

    return match fit {
        FitStrategy::FirstFit => fitting.next().map(|(i, _)| i),
        FitStrategy::BestFit => {
            let mut best: Option<(usize, u64)> = None;

            for (i, available) in fitting {
                let leftover = available - size;

                match best {
                    Some((_, current)) if current <= leftover => (),
                    _ => best = Some((i, leftover)),
                }
            }

            best.map(|(i, _)| i)
        }
        FitStrategy::WorstFit => {
            let mut worst: Option<(usize, u64)> = None;

            for (i, available) in fitting {
                match worst {
                    Some((_, current)) if current >= available => (),
                    _ => worst = Some((i, available)),
                }
            }

            worst.map(|(i, _)| i)
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PartitionKind, PartitionName, PartitionSlot};
    use chrono::{TimeZone, Utc};

    fn record(total_size: u64) -> BootRecord {
        return BootRecord::new(
            total_size,
            Utc.timestamp_opt(0, 0).unwrap(),
            0,
            FitStrategy::FirstFit,
        );
    }

    fn primary(name: &str, start: u64, size: u64) -> PartitionSlot {
        return PartitionSlot::new(
            PartitionKind::Primary,
            FitStrategy::FirstFit,
            start,
            size,
            PartitionName::new(name).unwrap(),
        );
    }

    #[test]
    fn test_empty_table() {
        let candidates = candidate_extents(&record(10_192));

        for c in candidates.iter() {
            assert_eq!(*c, Some(Extent::new(192, 10_192)));
        }
    }

    #[test]
    fn test_extents_between_neighbours() {
        let mut record = record(10_192);
        record.slots_mut()[0] = primary("a", 192, 1000);
        record.slots_mut()[2] = primary("c", 3192, 1000);

        let candidates = candidate_extents(&record);

        assert_eq!(candidates[0], None);
        assert_eq!(candidates[1], Some(Extent::new(1192, 3192)));
        assert_eq!(candidates[2], None);
        assert_eq!(candidates[3], Some(Extent::new(4192, 10_192)));
    }

    #[test]
    fn test_full_table() {
        let mut record = record(10_192);

        for i in 0..4 {
            record.slots_mut()[i] = primary(["a", "b", "c", "d"][i], 192 + i as u64 * 100, 100);
        }

        assert!(candidate_extents(&record).iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_squeezed_slot_is_empty() {
        let mut record = record(10_192);
        record.slots_mut()[0] = primary("a", 192, 1000);
        record.slots_mut()[2] = primary("c", 1192, 1000);

        let candidates = candidate_extents(&record);

        assert!(candidates[1].unwrap().is_empty());
        assert_eq!(choose_slot(FitStrategy::FirstFit, &candidates, 1), Some(3));
    }

    // Three candidates of differing sizes: 500, 2000 and 1000 bytes.
    fn differing_candidates() -> [Option<Extent>; 4] {
        return [
            Some(Extent::new(192, 692)),
            None,
            Some(Extent::new(1000, 3000)),
            Some(Extent::new(5000, 6000)),
        ];
    }

    #[test]
    fn test_first_fit_picks_lowest_qualifying_index() {
        let candidates = differing_candidates();

        assert_eq!(choose_slot(FitStrategy::FirstFit, &candidates, 400), Some(0));
        assert_eq!(choose_slot(FitStrategy::FirstFit, &candidates, 800), Some(2));
    }

    #[test]
    fn test_best_fit_picks_smallest_leftover() {
        let candidates = differing_candidates();

        assert_eq!(choose_slot(FitStrategy::BestFit, &candidates, 400), Some(0));
        assert_eq!(choose_slot(FitStrategy::BestFit, &candidates, 800), Some(3));
        assert_eq!(choose_slot(FitStrategy::BestFit, &candidates, 1500), Some(2));
    }

    #[test]
    fn test_worst_fit_picks_largest_extent() {
        let candidates = differing_candidates();

        assert_eq!(choose_slot(FitStrategy::WorstFit, &candidates, 100), Some(2));
        assert_eq!(choose_slot(FitStrategy::WorstFit, &candidates, 2000), Some(2));
    }

    #[test]
    fn test_no_candidate_fits() {
        let candidates = differing_candidates();

        for fit in [FitStrategy::FirstFit, FitStrategy::BestFit, FitStrategy::WorstFit].iter() {
            assert_eq!(choose_slot(*fit, &candidates, 2001), None);
        }
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let candidates = [
            None,
            Some(Extent::new(0, 100)),
            Some(Extent::new(200, 300)),
            Some(Extent::new(400, 500)),
        ];

        assert_eq!(choose_slot(FitStrategy::BestFit, &candidates, 50), Some(1));
        assert_eq!(choose_slot(FitStrategy::WorstFit, &candidates, 50), Some(1));
    }
}
