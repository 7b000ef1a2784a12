pub use self::timer::Timer;

mod timer {
    use std::time;

    /// One-shot timer the scheduler re-arms after every generation.
    ///
    /// Time is always passed in by the caller so the loop can be driven by a
    /// wall clock or stepped by hand.
    #[derive(Debug)]
    pub struct Timer {
        interval: time::Duration,
        deadline: Option<instant::Instant>,
    }

    impl Timer {
        pub fn new(interval: time::Duration) -> Timer {
            Timer {
                interval,
                deadline: None,
            }
        }

        pub fn interval(&self) -> time::Duration {
            self.interval
        }

        /// Takes effect the next time the timer is armed.
        pub fn set_interval(&mut self, interval: time::Duration) {
            self.interval = interval;
        }

        pub fn arm(&mut self, now: instant::Instant) {
            self.deadline = Some(now + self.interval);
        }

        /// Fires on the next `tick` regardless of the interval.
        pub fn arm_immediately(&mut self, now: instant::Instant) {
            self.deadline = Some(now);
        }

        pub fn disarm(&mut self) {
            self.deadline = None;
        }

        pub fn is_armed(&self) -> bool {
            self.deadline.is_some()
        }

        pub fn deadline(&self) -> Option<instant::Instant> {
            self.deadline
        }

        /// Returns `true` once when the deadline has passed, disarming the
        /// timer.
        pub fn tick(&mut self, now: instant::Instant) -> bool {
            match self.deadline {
                Some(deadline) if now >= deadline => {
                    self.deadline = None;
                    true
                }
                _ => false,
            }
        }

        pub fn remaining(&self, now: instant::Instant) -> Option<time::Duration> {
            self.deadline.map(|deadline| {
                if deadline > now {
                    deadline - now
                } else {
                    time::Duration::from_secs(0)
                }
            })
        }
    }

}
