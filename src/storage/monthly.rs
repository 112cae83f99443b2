//! Monthly analytics repository (monthly.json)

use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::LodgeError;
use crate::models::{Month, MonthlyData};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MonthlyFile {
    months: Vec<MonthlyData>,
}

/// Repository for the `(month, year)` summary table
pub struct MonthlyRepository {
    path: PathBuf,
    data: RwLock<Vec<MonthlyData>>,
}

impl MonthlyRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), LodgeError> {
        let file_data: MonthlyFile = read_json(&self.path)?;
        let mut data = self
            .data
            .write()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data.months;
        Ok(())
    }

    pub fn save(&self) -> Result<(), LodgeError> {
        let data = self
            .data
            .read()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        write_json_atomic(
            &self.path,
            &MonthlyFile {
                months: data.clone(),
            },
        )
    }

    /// All months, oldest first
    pub fn get_all(&self) -> Result<Vec<MonthlyData>, LodgeError> {
        let data = self
            .data
            .read()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let mut months = data.clone();
        months.sort_by_key(|m| m.sort_key());
        Ok(months)
    }

    pub fn get(&self, month: Month, year: i32) -> Result<Option<MonthlyData>, LodgeError> {
        let data = self
            .data
            .read()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data
            .iter()
            .find(|m| m.month == month && m.year == year)
            .cloned())
    }

    /// Only the months of one year
    pub fn for_year(&self, year: i32) -> Result<Vec<MonthlyData>, LodgeError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|m| m.year == year)
            .collect())
    }

    pub fn replace_all(&self, months: Vec<MonthlyData>) -> Result<(), LodgeError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LodgeError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = months;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_and_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("monthly.json");
        let repo = MonthlyRepository::new(path.clone());
        repo.replace_all(vec![
            MonthlyData::new(Month::Mar, 2025),
            MonthlyData::new(Month::Nov, 2024),
        ])
        .unwrap();
        repo.save().unwrap();

        let reloaded = MonthlyRepository::new(path);
        reloaded.load().unwrap();
        let keys: Vec<_> = reloaded.get_all().unwrap().iter().map(|m| m.key()).collect();
        assert_eq!(keys, vec!["Nov-2024", "Mar-2025"]);
        assert!(reloaded.get(Month::Mar, 2025).unwrap().is_some());
        assert!(reloaded.get(Month::Mar, 2024).unwrap().is_none());
        assert_eq!(reloaded.for_year(2024).unwrap().len(), 1);
    }
}
