use std::fmt;

use chrono::{Datelike, NaiveDate};

/// One calendar month of source punches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePeriod {
    pub month: u32,
    pub year: i32,
}

impl SourcePeriod {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }
}

impl fmt::Display for SourcePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodTables {
    pub current: SourcePeriod,
    pub fallback: SourcePeriod,
}

impl PeriodTables {
    pub fn for_date(today: NaiveDate) -> Self {
        let current = SourcePeriod::containing(today);
        Self {
            current,
            fallback: current.previous(),
        }
    }
}
