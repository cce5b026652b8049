use chrono::NaiveDate;

use super::DrillDown;
use crate::models::{CieStatus, ScheduleEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CieBucket {
    pub department: String,
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CieScheduleView {
    entries: Vec<ScheduleEntry>,
    drill: DrillDown<String>,
}

impl CieScheduleView {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries,
            drill: DrillDown::default(),
        }
    }

    /// One bucket per subject department, in first-seen order.
    pub fn buckets(&self) -> Vec<CieBucket> {
        let mut buckets: Vec<CieBucket> = Vec::new();
        for entry in &self.entries {
            let index = match buckets
                .iter()
                .position(|bucket| bucket.department == entry.subject.department)
            {
                Some(index) => index,
                None => {
                    buckets.push(CieBucket {
                        department: entry.subject.department.clone(),
                        total: 0,
                        scheduled: 0,
                        completed: 0,
                    });
                    buckets.len() - 1
                }
            };

            let bucket = &mut buckets[index];
            bucket.total += 1;
            match entry.status {
                CieStatus::Scheduled => bucket.scheduled += 1,
                CieStatus::Completed => bucket.completed += 1,
                CieStatus::Other(_) => {}
            }
        }
        buckets
    }

    pub fn select(&mut self, department: &str) -> bool {
        if self
            .entries
            .iter()
            .any(|entry| entry.subject.department == department)
        {
            self.drill.select(department.to_string());
            true
        } else {
            false
        }
    }

    pub fn back(&mut self) {
        self.drill.back();
    }

    pub fn selected(&self) -> Option<&str> {
        self.drill.selected().map(String::as_str)
    }

    pub fn selected_entries(&self) -> Vec<&ScheduleEntry> {
        match self.drill.selected() {
            Some(department) => self
                .entries
                .iter()
                .filter(|entry| &entry.subject.department == department)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Scheduled entries on or after `today`; undated entries are kept.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.status == CieStatus::Scheduled)
            .filter(|entry| entry.date.map_or(true, |date| date >= today))
            .collect()
    }
}
