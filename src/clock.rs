/// Whole-second count-up clock. Ticks are ignored while stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    elapsed_seconds: u32,
    running: bool,
}

impl Clock {
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting, keeping the elapsed value
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Zero the value; the running flag is unchanged
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
    }

    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTick {
    /// Clock not started yet, or already stopped
    Idle,
    Running(u32),
    /// The limit was reached on this tick. Reported once.
    Expired,
}

/// The whole-session clock: starts once, stops itself at the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionClock {
    clock: Clock,
    limit_seconds: u32,
    started: bool,
    expired: bool,
}

impl SessionClock {
    pub fn new(limit_seconds: u32) -> Self {
        Self {
            clock: Clock::default(),
            limit_seconds,
            started: false,
            expired: false,
        }
    }

    /// Start the clock the first time this is called. Returns whether this
    /// call started it.
    pub fn start_once(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.clock.start();
        true
    }

    pub fn tick(&mut self) -> SessionTick {
        if !self.clock.is_running() {
            return SessionTick::Idle;
        }
        self.clock.tick();
        if self.clock.elapsed_seconds() >= self.limit_seconds {
            self.clock.stop();
            self.expired = true;
            return SessionTick::Expired;
        }
        SessionTick::Running(self.clock.elapsed_seconds())
    }

    pub fn stop(&mut self) {
        self.clock.stop();
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed_seconds()
    }

    pub fn limit_seconds(&self) -> u32 {
        self.limit_seconds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.limit_seconds.saturating_sub(self.clock.elapsed_seconds())
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

/// `m:ss`, minutes unpadded
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_counts_only_while_running() {
        let mut clock = Clock::default();
        clock.tick();
        assert_eq!(clock.elapsed_seconds(), 0);

        clock.start();
        clock.tick();
        clock.tick();
        assert_eq!(clock.elapsed_seconds(), 2);

        clock.stop();
        clock.tick();
        assert_eq!(clock.elapsed_seconds(), 2);

        clock.reset();
        assert_eq!(clock.elapsed_seconds(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn test_clock_is_monotonic_while_running() {
        let mut clock = Clock::default();
        clock.start();
        let mut last = clock.elapsed_seconds();
        for _ in 0..100 {
            clock.tick();
            assert!(clock.elapsed_seconds() >= last);
            last = clock.elapsed_seconds();
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_session_clock_starts_once() {
        let mut clock = SessionClock::new(60);
        assert_eq!(clock.tick(), SessionTick::Idle);

        assert!(clock.start_once());
        for _ in 0..5 {
            assert!(!clock.start_once());
        }
        assert_eq!(clock.tick(), SessionTick::Running(1));
        assert_eq!(clock.elapsed_seconds(), 1);
    }

    #[test]
    fn test_session_clock_expires_once() {
        let mut clock = SessionClock::new(3);
        clock.start_once();

        assert_eq!(clock.tick(), SessionTick::Running(1));
        assert_eq!(clock.tick(), SessionTick::Running(2));
        assert_eq!(clock.tick(), SessionTick::Expired);
        assert!(clock.is_expired());
        assert!(!clock.is_running());

        assert_eq!(clock.tick(), SessionTick::Idle);
        assert_eq!(clock.elapsed_seconds(), 3);
        assert_eq!(clock.remaining_seconds(), 0);
    }

    #[test]
    fn test_session_clock_does_not_restart_after_stop() {
        let mut clock = SessionClock::new(10);
        clock.start_once();
        clock.tick();
        clock.stop();

        assert!(!clock.start_once());
        assert_eq!(clock.tick(), SessionTick::Idle);
        assert_eq!(clock.remaining_seconds(), 9);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(75), "1:15");
        assert_eq!(format_clock(600), "10:00");
    }
}
