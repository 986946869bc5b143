/// Fixed physics step in seconds.
pub(super) const TICK_SECONDS: f32 = 0.010;

/// Upper bound on catch-up steps per frame after a stall.
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Converts variable frame times into whole fixed-size physics steps.
#[derive(Default)]
pub(super) struct TickClock {
    accumulator_secs: f32,
}

impl TickClock {
    pub(super) fn advance(&mut self, frame_secs: f32) -> u32 {
        self.accumulator_secs += frame_secs.max(0.0);
        let steps = (self.accumulator_secs / TICK_SECONDS).floor() as u32;
        if steps > MAX_STEPS_PER_FRAME {
            self.accumulator_secs = 0.0;
            return MAX_STEPS_PER_FRAME;
        }
        self.accumulator_secs -= steps as f32 * TICK_SECONDS;
        steps
    }

    pub(super) fn reset(&mut self) {
        self.accumulator_secs = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_remainder_between_frames() {
        let mut clock = TickClock::default();
        assert_eq!(clock.advance(0.006), 0);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.025), 2);
    }

    #[test]
    fn caps_catch_up_after_stall() {
        let mut clock = TickClock::default();
        assert_eq!(clock.advance(2.0), MAX_STEPS_PER_FRAME);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn reset_drops_pending_time() {
        let mut clock = TickClock::default();
        clock.advance(0.009);
        clock.reset();
        assert_eq!(clock.advance(0.002), 0);
    }
}
