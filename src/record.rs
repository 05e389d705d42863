//! Daily loss records
//!
//! One [`DailyLossRecord`] per calendar date. Records are built by the
//! crawler's parser and written once by the storage layer.

use chrono::NaiveDate;
use std::collections::HashSet;

/// Dates already represented in the store or in the current batch
pub type KnownDates = HashSet<NaiveDate>;

/// Loss categories tracked per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossCategory {
    Planes,
    Helicopters,
    Uav,
    CruiseMissiles,
    BallisticMissiles,
}

impl LossCategory {
    /// All categories, in column order
    pub const ALL: [LossCategory; 5] = [
        Self::Planes,
        Self::Helicopters,
        Self::Uav,
        Self::CruiseMissiles,
        Self::BallisticMissiles,
    ];

    /// Column name used by the storage layer
    pub fn column(&self) -> &'static str {
        match self {
            Self::Planes => "planes",
            Self::Helicopters => "helicopters",
            Self::Uav => "uav",
            Self::CruiseMissiles => "cruise_missiles",
            Self::BallisticMissiles => "ballistic_missiles",
        }
    }
}

/// Losses reported for a single day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyLossRecord {
    pub report_date: NaiveDate,
    pub planes: u32,
    pub helicopters: u32,
    pub uav: u32,
    pub cruise_missiles: u32,
    pub ballistic_missiles: u32,
}

impl DailyLossRecord {
    /// Creates a record with every count at zero
    pub fn new(report_date: NaiveDate) -> Self {
        Self {
            report_date,
            planes: 0,
            helicopters: 0,
            uav: 0,
            cruise_missiles: 0,
            ballistic_missiles: 0,
        }
    }

    /// Overwrites the count for a category
    pub fn set(&mut self, category: LossCategory, count: u32) {
        match category {
            LossCategory::Planes => self.planes = count,
            LossCategory::Helicopters => self.helicopters = count,
            LossCategory::Uav => self.uav = count,
            LossCategory::CruiseMissiles => self.cruise_missiles = count,
            LossCategory::BallisticMissiles => self.ballistic_missiles = count,
        }
    }

    /// Returns the count for a category
    pub fn get(&self, category: LossCategory) -> u32 {
        match category {
            LossCategory::Planes => self.planes,
            LossCategory::Helicopters => self.helicopters,
            LossCategory::Uav => self.uav,
            LossCategory::CruiseMissiles => self.cruise_missiles,
            LossCategory::BallisticMissiles => self.ballistic_missiles,
        }
    }

    /// Canonical `YYYY-MM-DD` form of the report date
    pub fn date_key(&self) -> String {
        self.report_date.format("%Y-%m-%d").to_string()
    }
}
