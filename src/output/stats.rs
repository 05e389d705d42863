//! Statistics generation from the loss database
//!
//! This module provides functionality for extracting and displaying
//! aggregate figures from the storage layer.

use crate::record::LossCategory;
use crate::storage::{LossStore, LossTotals};
use crate::AirLossError;
use chrono::NaiveDate;

/// Aggregate view of the stored records
#[derive(Debug, Clone)]
pub struct LossStatistics {
    /// Number of stored days
    pub total_days: u64,

    /// Earliest stored date
    pub first_date: Option<NaiveDate>,

    /// Latest stored date
    pub last_date: Option<NaiveDate>,

    /// Per-category sums over all days
    pub totals: LossTotals,
}

impl LossStatistics {
    /// Sum for one category
    pub fn total_for(&self, category: LossCategory) -> u64 {
        match category {
            LossCategory::Planes => self.totals.planes,
            LossCategory::Helicopters => self.totals.helicopters,
            LossCategory::Uav => self.totals.uav,
            LossCategory::CruiseMissiles => self.totals.cruise_missiles,
            LossCategory::BallisticMissiles => self.totals.ballistic_missiles,
        }
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `storage` - The storage backend to query
///
/// # Returns
///
/// * `Ok(LossStatistics)` - Successfully loaded statistics
/// * `Err(AirLossError)` - Failed to query statistics
pub fn load_statistics(storage: &dyn LossStore) -> Result<LossStatistics, AirLossError> {
    let total_days = storage.count_days()?;
    let range = storage.date_range()?;
    let totals = storage.totals()?;

    Ok(LossStatistics {
        total_days,
        first_date: range.map(|(first, _)| first),
        last_date: range.map(|(_, last)| last),
        totals,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &LossStatistics) {
    println!("=== Air Loss Statistics ===\n");

    println!("Days stored: {}", stats.total_days);
    match (stats.first_date, stats.last_date) {
        (Some(first), Some(last)) => println!("Period: {} .. {}", first, last),
        _ => println!("Period: (empty)"),
    }
    println!();

    println!("Totals:");
    for category in LossCategory::ALL {
        println!("  {}: {}", category.column(), stats.total_for(category));
    }
}
