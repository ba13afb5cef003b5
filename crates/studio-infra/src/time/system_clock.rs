use chrono::{DateTime, Utc};
use studio_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_matches_now() {
        let clock = SystemClock;
        assert_eq!(clock.today(), clock.now().date_naive());
    }
}
