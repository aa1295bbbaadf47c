//! Per-move time budgeting: main time plus canonical byo-yomi.
//!
//! The allocation policy is deliberately simple: spend a fixed fraction of
//! main time per move, then pace each byo-yomi period across its stone quota
//! with a safety margin. All internal accounting is in milliseconds.

use std::time::Instant;

#[derive(Debug, Clone)]
pub struct Timer {
    using_main_time: bool,
    clock_start: Option<Instant>,
    remaining_time: i64,
    remaining_stones: i64,
    main_time: i64,
    byo_yomi: i64,
    byo_yomi_stones: i64,
}

impl Timer {
    /// Times are in seconds, matching GTP `time_settings`. A zero main time
    /// starts the clock straight in byo-yomi.
    pub fn new(main_time: u32, byo_yomi: u32, byo_yomi_stones: u32) -> Timer {
        let main_time = main_time as i64 * 1000;
        let byo_yomi = byo_yomi as i64 * 1000;
        let using_main_time = main_time > 0;

        Timer {
            using_main_time,
            clock_start: None,
            remaining_time: if using_main_time { main_time } else { byo_yomi },
            remaining_stones: byo_yomi_stones as i64,
            main_time,
            byo_yomi,
            byo_yomi_stones: byo_yomi_stones as i64,
        }
    }

    /// Budget in milliseconds for the move about to be searched.
    pub fn alloc(&self) -> i64 {
        if self.using_main_time {
            // with no real byo-yomi to fall back on, pace the live clock
            // instead of the configured total
            let base = if self.byo_yomi < 100 {
                self.remaining_time
            } else {
                self.main_time
            };
            base / 25
        } else {
            self.remaining_time / (self.remaining_stones + 2)
        }
    }

    pub fn start(&mut self) {
        self.clock_start = Some(Instant::now());
    }

    /// Milliseconds since the last `start`; zero if never started.
    pub fn elapsed(&self) -> i64 {
        match self.clock_start {
            Some(start) => start.elapsed().as_millis() as i64,
            None => 0,
        }
    }

    /// Deduct the elapsed time and, when main time is spent or the stone
    /// quota is used up, roll into a fresh byo-yomi period. Passes do not
    /// consume a byo-yomi stone.
    pub fn stop(&mut self, was_pass: bool) {
        self.remaining_time -= self.elapsed();
        if !was_pass {
            self.remaining_stones -= 1;
        }

        let rollover = if self.using_main_time {
            self.remaining_time <= 0
        } else {
            self.remaining_stones <= 0
        };

        if rollover {
            if !self.using_main_time {
                // unspent period time does not carry over
                self.remaining_time = 0;
            }
            self.using_main_time = false;
            self.remaining_time += self.byo_yomi;
            self.remaining_stones = self.byo_yomi_stones;
        }
    }

    #[inline]
    pub fn in_byo_yomi(&self) -> bool {
        !self.using_main_time
    }

    /// Back to the configured starting clock.
    pub fn reset(&mut self) {
        self.using_main_time = self.main_time > 0;
        self.clock_start = None;
        self.remaining_time = if self.using_main_time {
            self.main_time
        } else {
            self.byo_yomi
        };
        self.remaining_stones = self.byo_yomi_stones;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_time_paces_at_a_fixed_fraction() {
        let timer = Timer::new(10, 30, 5);
        assert!(!timer.in_byo_yomi());
        assert_eq!(timer.alloc(), 10_000 / 25);
    }

    #[test]
    fn absolute_time_paces_the_live_clock() {
        // byo-yomi of zero means absolute time: the allocation must shrink
        // as the clock runs down rather than tracking the configured total
        let timer = Timer::new(10, 0, 0);
        assert_eq!(timer.alloc(), 10_000 / 25);
    }

    #[test]
    fn byo_yomi_paces_across_the_stone_quota() {
        let timer = Timer::new(0, 30, 5);
        assert!(timer.in_byo_yomi());
        assert_eq!(timer.alloc(), 30_000 / 7);
    }

    #[test]
    fn stone_quota_exhaustion_starts_a_fresh_period() {
        let mut timer = Timer::new(0, 30, 1);
        // no start() call, so no elapsed time is deducted
        timer.stop(false);
        assert!(timer.in_byo_yomi());
        // quota reset to 1 stone, full period on the clock again
        assert_eq!(timer.alloc(), 30_000 / 3);
    }

    #[test]
    fn passes_do_not_consume_stones() {
        let mut timer = Timer::new(0, 30, 1);
        timer.stop(true);
        timer.stop(true);
        // still one stone left in the quota
        assert_eq!(timer.alloc(), 30_000 / 3);
        timer.stop(false);
        assert_eq!(timer.alloc(), 30_000 / 3);
    }

    #[test]
    fn reset_restores_the_starting_clock() {
        let mut timer = Timer::new(0, 30, 2);
        timer.stop(false);
        timer.stop(false);
        timer.reset();
        assert_eq!(timer.alloc(), 30_000 / 4);
    }
}
