use chrono::Utc;

use crate::datetime::DateTimeFields;

/// Supplies the current date and time to callers that fall back to "now".
pub trait Clock {
    fn now(&self) -> DateTimeFields;
}

/// Wall-clock time in UTC, with millisecond precision.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTimeFields {
        Utc::now().naive_utc().into()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTimeFields);

impl Clock for FixedClock {
    fn now(&self) -> DateTimeFields {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTimeFields {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DosDateTime, Validation};

    #[test]
    fn fixed_clock_repeats_itself() {
        let mut fields = DateTimeFields::new(2024, 6, 15, 13, 30, 45);
        fields.millisecond = 123;
        let clock = FixedClock(fields);
        assert_eq!(clock.now(), fields);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_is_encodable() {
        let now = SystemClock.now();
        assert!(now.millisecond <= 999);
        assert!(now.to_naive_datetime().is_some());
        DosDateTime::encode_with(&now, Validation::Strict).unwrap();
    }

    #[test]
    fn clocks_work_behind_a_reference() {
        fn read(clock: impl Clock) -> DateTimeFields {
            clock.now()
        }
        let clock = FixedClock(DateTimeFields::default());
        assert_eq!(read(&clock), DateTimeFields::default());
        let dynamic: &dyn Clock = &clock;
        assert_eq!(read(dynamic), DateTimeFields::default());
    }
}
