use crate::filters::search_students;
use crate::metrics::{branch_scores, confidence_tier, focus_list, BranchScore, ConfidenceTier};
use crate::models::{
    CieStats, DashboardPayload, FacultyAnalytics, InstituteStats, LowPerformer, PendingApproval,
    ScheduleEntry, Student, Trend,
};

pub const SENTINEL_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidenceRow {
    pub department: String,
    pub score: u8,
    pub tier: ConfidenceTier,
}

#[derive(Debug, Clone, Default)]
pub struct OverviewView {
    pub stats: InstituteStats,
    pub scores: Vec<BranchScore>,
    pub faculty_analytics: FacultyAnalytics,
    pub cie_stats: CieStats,
    pub low_performers: Vec<LowPerformer>,
    pub trends: Trend,
    pub dates: Vec<ScheduleEntry>,
    pub approvals: Vec<PendingApproval>,
}

impl OverviewView {
    pub fn from_payload(payload: &DashboardPayload) -> Self {
        Self {
            stats: payload.stats.clone(),
            scores: branch_scores(
                &payload.branches,
                &payload.branch_performance,
                &payload.submissions,
            ),
            faculty_analytics: payload.faculty_analytics.clone(),
            cie_stats: payload.cie_stats.clone(),
            low_performers: payload.low_performers.clone(),
            trends: payload.trends.clone(),
            dates: payload.dates.clone(),
            approvals: payload.approvals.clone(),
        }
    }

    pub fn confidence_rows(&self) -> Vec<ConfidenceRow> {
        self.scores
            .iter()
            .map(|score| {
                let value = score.confidence();
                ConfidenceRow {
                    department: score.department.clone(),
                    score: value,
                    tier: confidence_tier(value),
                }
            })
            .collect()
    }

    pub fn focus_list(&self) -> Vec<&BranchScore> {
        focus_list(&self.scores)
    }
}

/// Quick student lookup. The result panel has its own visibility flag: a
/// short query hides it without touching the last results.
#[derive(Debug, Clone, Default)]
pub struct StudentSentinel {
    query: String,
    results: Vec<Student>,
    visible: bool,
}

impl StudentSentinel {
    pub fn search(&mut self, students: &[Student], query: &str) {
        self.query = query.to_string();
        if query.chars().count() > 1 {
            self.results = search_students(students, query)
                .take(SENTINEL_LIMIT)
                .cloned()
                .collect();
            self.visible = true;
        } else {
            self.visible = false;
        }
    }

    pub fn blur(&mut self) {
        self.visible = false;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Results to show, or `None` when the panel is hidden or empty.
    pub fn panel(&self) -> Option<&[Student]> {
        (self.visible && !self.results.is_empty()).then_some(self.results.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::normalize::FromRecord;

    fn students(count: usize) -> Vec<Student> {
        (0..count)
            .map(|i| {
                Student::from_record(&json!({
                    "regNo": format!("1EC{i:03}"),
                    "name": format!("Anita {i}")
                }))
            })
            .collect()
    }

    #[test]
    fn short_query_hides_panel() {
        let roster = students(10);
        let mut sentinel = StudentSentinel::default();

        sentinel.search(&roster, "a");
        assert!(!sentinel.is_visible());
        assert!(sentinel.panel().is_none());

        sentinel.search(&roster, "");
        assert!(sentinel.panel().is_none());
    }

    #[test]
    fn two_characters_cap_at_five_in_order() {
        let roster = students(8);
        let mut sentinel = StudentSentinel::default();

        sentinel.search(&roster, "AN");
        let regs: Vec<&str> = sentinel.panel().unwrap().iter().map(|s| s.reg_no.as_str()).collect();
        assert_eq!(regs, vec!["1EC000", "1EC001", "1EC002", "1EC003", "1EC004"]);
    }

    #[test]
    fn reg_no_matches_case_insensitively() {
        let roster = students(3);
        let mut sentinel = StudentSentinel::default();

        sentinel.search(&roster, "1ec002");
        assert_eq!(sentinel.panel().map(<[Student]>::len), Some(1));

        sentinel.search(&roster, "x");
        assert!(!sentinel.is_visible());
        sentinel.search(&roster, "zz");
        assert!(sentinel.is_visible());
        assert!(sentinel.panel().is_none());
    }

    #[test]
    fn blur_hides_without_clearing_query() {
        let roster = students(3);
        let mut sentinel = StudentSentinel::default();
        sentinel.search(&roster, "anita");
        sentinel.blur();
        assert!(sentinel.panel().is_none());
        assert_eq!(sentinel.query(), "anita");
    }

    #[test]
    fn overview_ranks_departments() {
        let payload = DashboardPayload::from_record(&json!({
            "branches": ["CS", "EC"],
            "branchPerformance": [90, 60],
            "hodSubmissionStatus": [
                {"id": "CS", "status": "Approved", "punctuality": "On Time"},
                {"id": "EC", "status": "Pending", "punctuality": "On Time"}
            ]
        }));
        let overview = OverviewView::from_payload(&payload);

        assert_eq!(
            overview.confidence_rows(),
            vec![
                ConfidenceRow { department: "CS".into(), score: 94, tier: ConfidenceTier::High },
                ConfidenceRow { department: "EC".into(), score: 56, tier: ConfidenceTier::Low },
            ]
        );
        let focus: Vec<&str> = overview
            .focus_list()
            .iter()
            .map(|s| s.department.as_str())
            .collect();
        assert_eq!(focus, vec!["EC"]);
    }
}
