use crate::models::ReportRecord;

#[derive(Debug, Clone, Default)]
pub struct ReportsView {
    reports: Vec<ReportRecord>,
}

impl ReportsView {
    pub fn new(reports: Vec<ReportRecord>) -> Self {
        Self { reports }
    }

    pub fn rows(&self) -> &[ReportRecord] {
        &self.reports
    }

    pub fn find(&self, id: &str) -> Option<&ReportRecord> {
        self.reports.iter().find(|report| report.id == id)
    }

    /// Hands the report to `handler`; unknown ids never reach it.
    pub fn download<R>(&self, id: &str, handler: impl FnOnce(&ReportRecord) -> R) -> Option<R> {
        self.find(id).map(handler)
    }
}
