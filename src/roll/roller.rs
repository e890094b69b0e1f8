use crate::common::Int;
use rand::Rng;
use std::num::NonZeroU64;

/// Source of die results. Every [`Rng`] is one.
pub trait Roller {
    /// A uniformly random face in `1..=faces`.
    fn roll_die(&mut self, faces: NonZeroU64) -> u64;

    /// Total of `count` dice rolled in order, or `None` as soon as the running
    /// total leaves [`Int`].
    fn roll_sum(&mut self, count: u64, faces: NonZeroU64) -> Option<Int> {
        (0..count).try_fold(0, |total: Int, _| {
            Int::try_from(self.roll_die(faces))
                .ok()
                .and_then(|die| total.checked_add(die))
        })
    }
}

impl<R: Rng> Roller for R {
    fn roll_die(&mut self, faces: NonZeroU64) -> u64 {
        self.gen_range(1..=faces.get())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;

#[cfg(test)]
mod step {
    use super::*;

    /// Yields `initial`, `initial + step`, ... wrapped into the face range.
    pub(crate) struct StepRoller {
        current: u64,
        step: u64,
    }

    impl StepRoller {
        pub fn new(initial: NonZeroU64, step: u64) -> Self {
            Self {
                current: initial.get(),
                step,
            }
        }
    }

    impl Roller for StepRoller {
        fn roll_die(&mut self, faces: NonZeroU64) -> u64 {
            let ret = (self.current - 1) % faces.get() + 1;
            self.current += self.step;
            ret
        }
    }
}
