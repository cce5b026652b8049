use crate::models::{HodSubmission, Punctuality, Student, SubmissionStatus};
use crate::normalize::PLACEHOLDER;

const PERFORMANCE_WEIGHT: f64 = 0.6;
const COMPLIANCE_WEIGHT: f64 = 0.4;
const FOCUS_PERFORMANCE_FLOOR: f64 = 70.0;
const CIE_MAX_TOTAL: f64 = 40.0;
const CIE_RISK_THRESHOLD: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionColor {
    Good,
    Warning,
    Critical,
}

/// Values outside 0..=100 land in the nearest bound's category; NaN is
/// critical.
pub fn completion_color(pct: f64) -> CompletionColor {
    if pct >= 90.0 {
        CompletionColor::Good
    } else if pct >= 50.0 {
        CompletionColor::Warning
    } else {
        CompletionColor::Critical
    }
}

pub fn compliance_contribution(status: Option<&SubmissionStatus>) -> f64 {
    match status {
        Some(SubmissionStatus::Approved) => 100.0,
        _ => 50.0,
    }
}

pub fn confidence_score(performance: f64, status: Option<&SubmissionStatus>) -> u8 {
    let blended =
        performance * PERFORMANCE_WEIGHT + compliance_contribution(status) * COMPLIANCE_WEIGHT;
    if blended.is_nan() {
        return 0;
    }
    blended.round().clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Moderate,
    Low,
}

pub fn confidence_tier(score: u8) -> ConfidenceTier {
    match score {
        81..=u8::MAX => ConfidenceTier::High,
        61..=80 => ConfidenceTier::Moderate,
        _ => ConfidenceTier::Low,
    }
}

/// A department with no performance figure is only flagged when delayed.
pub fn focus_flag(performance: Option<f64>, punctuality: Punctuality) -> bool {
    performance.is_some_and(|value| value < FOCUS_PERFORMANCE_FLOOR)
        || punctuality == Punctuality::Delayed
}

/// One department's performance joined with its HOD submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchScore {
    pub department: String,
    pub performance: Option<f64>,
    pub status: Option<SubmissionStatus>,
    pub punctuality: Punctuality,
}

impl BranchScore {
    pub fn confidence(&self) -> u8 {
        confidence_score(self.performance.unwrap_or(f64::NAN), self.status.as_ref())
    }

    pub fn performance_label(&self) -> String {
        match self.performance {
            Some(value) => format!("{value:.1}%"),
            None => PLACEHOLDER.to_string(),
        }
    }

    pub fn needs_focus(&self) -> bool {
        focus_flag(self.performance, self.punctuality)
    }
}

pub fn branch_scores(
    branches: &[String],
    performance: &[f64],
    submissions: &[HodSubmission],
) -> Vec<BranchScore> {
    branches
        .iter()
        .enumerate()
        .map(|(index, department)| {
            let submission = submissions
                .iter()
                .find(|submission| &submission.department_id == department);
            BranchScore {
                department: department.clone(),
                performance: performance.get(index).copied(),
                status: submission.map(|submission| submission.status.clone()),
                punctuality: submission.map_or(Punctuality::Unknown, |s| s.punctuality),
            }
        })
        .collect()
}

/// Flagged departments in source order.
pub fn focus_list(scores: &[BranchScore]) -> Vec<&BranchScore> {
    scores.iter().filter(|score| score.needs_focus()).collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComplianceSummary {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub delayed: usize,
}

pub fn compliance_summary(records: &[HodSubmission]) -> ComplianceSummary {
    records.iter().fold(
        ComplianceSummary {
            total: records.len(),
            ..ComplianceSummary::default()
        },
        |mut summary, record| {
            match record.status {
                SubmissionStatus::Approved => summary.approved += 1,
                SubmissionStatus::Pending => summary.pending += 1,
                _ => {}
            }
            if record.punctuality == Punctuality::Delayed {
                summary.delayed += 1;
            }
            summary
        },
    )
}

pub fn cie_total(student: &Student) -> f64 {
    student.cie1 + student.cie2
}

pub fn cie_progress(student: &Student) -> f64 {
    cie_total(student) / CIE_MAX_TOTAL * 100.0
}

pub fn student_at_risk(student: &Student) -> bool {
    cie_total(student) < CIE_RISK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::normalize::FromRecord;

    fn submission(id: &str, status: &str, punctuality: &str) -> HodSubmission {
        HodSubmission::from_record(&json!({
            "id": id, "status": status, "punctuality": punctuality
        }))
    }

    #[test]
    fn completion_color_boundaries() {
        assert_eq!(completion_color(0.0), CompletionColor::Critical);
        assert_eq!(completion_color(49.99), CompletionColor::Critical);
        assert_eq!(completion_color(50.0), CompletionColor::Warning);
        assert_eq!(completion_color(89.9), CompletionColor::Warning);
        assert_eq!(completion_color(90.0), CompletionColor::Good);
        assert_eq!(completion_color(100.0), CompletionColor::Good);
    }

    #[test]
    fn completion_color_outside_range() {
        assert_eq!(completion_color(140.0), CompletionColor::Good);
        assert_eq!(completion_color(-5.0), CompletionColor::Critical);
        assert_eq!(completion_color(f64::NAN), CompletionColor::Critical);
    }

    #[test]
    fn completion_color_covers_every_integer_percent() {
        for pct in 0..=100 {
            let expected = match pct {
                0..=49 => CompletionColor::Critical,
                50..=89 => CompletionColor::Warning,
                _ => CompletionColor::Good,
            };
            assert_eq!(completion_color(pct as f64), expected, "pct {pct}");
        }
    }

    #[test]
    fn confidence_blends_performance_and_compliance() {
        let approved = SubmissionStatus::Approved;
        let pending = SubmissionStatus::Pending;
        assert_eq!(confidence_score(100.0, Some(&approved)), 100);
        assert_eq!(confidence_score(0.0, Some(&pending)), 20);
        assert_eq!(confidence_score(70.0, Some(&approved)), 82);
        assert_eq!(confidence_score(70.0, None), 62);
    }

    #[test]
    fn confidence_is_clamped() {
        let approved = SubmissionStatus::Approved;
        assert_eq!(confidence_score(250.0, Some(&approved)), 100);
        assert_eq!(confidence_score(-200.0, None), 0);
        assert_eq!(confidence_score(f64::NAN, None), 0);
    }

    #[test]
    fn confidence_tiers_follow_thresholds() {
        assert_eq!(confidence_tier(100), ConfidenceTier::High);
        assert_eq!(confidence_tier(81), ConfidenceTier::High);
        assert_eq!(confidence_tier(80), ConfidenceTier::Moderate);
        assert_eq!(confidence_tier(61), ConfidenceTier::Moderate);
        assert_eq!(confidence_tier(60), ConfidenceTier::Low);
    }

    #[test]
    fn focus_list_keeps_source_order() {
        let branches: Vec<String> =
            ["CS", "EC", "ME", "CV"].iter().map(|s| s.to_string()).collect();
        let submissions = vec![
            submission("CS", "Approved", "On Time"),
            submission("EC", "Approved", "Delayed"),
            submission("CV", "Pending", "On Time"),
        ];
        let scores = branch_scores(&branches, &[92.0, 88.0, 55.0], &submissions);

        let flagged: Vec<&str> = focus_list(&scores)
            .into_iter()
            .map(|score| score.department.as_str())
            .collect();
        assert_eq!(flagged, vec!["EC", "ME"]);
        assert_eq!(scores[0].confidence(), 95);
        assert_eq!(scores[2].punctuality, Punctuality::Unknown);
    }

    #[test]
    fn missing_performance_is_not_low_performance() {
        let branches: Vec<String> = ["CS", "CV"].iter().map(|s| s.to_string()).collect();
        let submissions = vec![submission("CV", "Approved", "Delayed")];

        let scores = branch_scores(&branches, &[], &submissions);
        assert!(!scores[0].needs_focus());
        assert!(scores[1].needs_focus());
        assert_eq!(scores[0].confidence(), 0);
        assert_eq!(scores[0].performance_label(), "N/A");
        assert!(!focus_flag(None, Punctuality::OnTime));
        assert!(focus_flag(Some(69.9), Punctuality::OnTime));
    }

    #[test]
    fn summary_counts_status_and_punctuality_separately() {
        let records = vec![
            submission("CS", "Approved", "Delayed"),
            submission("EC", "Pending", "On Time"),
            submission("ME", "Submitted", "Delayed"),
        ];
        let summary = compliance_summary(&records);
        assert_eq!(
            summary,
            ComplianceSummary {
                total: 3,
                approved: 1,
                pending: 1,
                delayed: 2
            }
        );
    }

    #[test]
    fn at_risk_below_forty_percent() {
        let mut student = Student::from_record(&json!({"marks": {"cie1": 8, "cie2": 8}}));
        assert!(!student_at_risk(&student));
        assert_eq!(cie_progress(&student), 40.0);

        student.cie2 = 7.5;
        assert!(student_at_risk(&student));
    }
}
