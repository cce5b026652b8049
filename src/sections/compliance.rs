use crate::filters::{filter_submissions, ComplianceFilter};
use crate::metrics::{compliance_summary, completion_color, CompletionColor, ComplianceSummary};
use crate::models::HodSubmission;

#[derive(Debug, Clone, Default)]
pub struct ComplianceView {
    records: Vec<HodSubmission>,
    filter: ComplianceFilter,
    selected: Option<String>,
    modal_open: bool,
}

impl ComplianceView {
    pub fn new(records: Vec<HodSubmission>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn filter(&self) -> ComplianceFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ComplianceFilter) {
        self.filter = filter;
    }

    pub fn rows(&self) -> Vec<&HodSubmission> {
        filter_submissions(&self.records, self.filter)
    }

    /// Over the unfiltered records.
    pub fn summary(&self) -> ComplianceSummary {
        compliance_summary(&self.records)
    }

    pub fn completion_color(record: &HodSubmission) -> CompletionColor {
        completion_color(record.completion)
    }

    pub fn view_details(&mut self, department_id: &str) -> Option<&HodSubmission> {
        let record = self
            .records
            .iter()
            .find(|record| record.department_id == department_id)?;
        self.selected = Some(record.department_id.clone());
        self.modal_open = true;
        Some(record)
    }

    pub fn close_details(&mut self) {
        self.modal_open = false;
    }

    pub fn selected(&self) -> Option<&HodSubmission> {
        let id = self.selected.as_deref()?;
        self.records.iter().find(|record| record.department_id == id)
    }

    pub fn modal(&self) -> Option<&HodSubmission> {
        if self.modal_open {
            self.selected()
        } else {
            None
        }
    }
}
