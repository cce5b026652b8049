use crate::models::{Grievance, GrievancePriority};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GrievancesView {
    grievances: Vec<Grievance>,
}

impl GrievancesView {
    pub fn new(grievances: Vec<Grievance>) -> Self {
        Self { grievances }
    }

    pub fn rows(&self) -> &[Grievance] {
        &self.grievances
    }

    pub fn find(&self, id: &str) -> Option<&Grievance> {
        self.grievances.iter().find(|grievance| grievance.id == id)
    }

    pub fn priority_counts(&self) -> PriorityCounts {
        let mut counts = PriorityCounts::default();
        for grievance in &self.grievances {
            match grievance.priority {
                GrievancePriority::High => counts.high += 1,
                GrievancePriority::Medium => counts.medium += 1,
                GrievancePriority::Low => counts.low += 1,
            }
        }
        counts
    }
}
