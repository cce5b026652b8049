use std::fmt::Write as _;
use std::io;

use anyhow::Context;
use serde::Serialize;

use crate::metrics::{
    branch_scores, cie_total, compliance_summary, confidence_tier, focus_list, student_at_risk,
    ConfidenceTier,
};
use crate::models::{department_display_name, DashboardPayload, Student};

const LOW_PERFORMER_LIMIT: usize = 10;

fn tier_label(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "high",
        ConfidenceTier::Moderate => "moderate",
        ConfidenceTier::Low => "low",
    }
}

pub fn build_report(payload: &DashboardPayload) -> String {
    let scores = branch_scores(
        &payload.branches,
        &payload.branch_performance,
        &payload.submissions,
    );
    let mut ranked: Vec<_> = scores.iter().collect();
    ranked.sort_by(|a, b| b.confidence().cmp(&a.confidence()));
    let focus = focus_list(&scores);
    let compliance = compliance_summary(&payload.submissions);

    let mut output = String::new();

    let _ = writeln!(output, "# Institute Summary");
    let _ = writeln!(
        output,
        "{} students, {} faculty across {} departments",
        payload.stats.total_students,
        payload.stats.total_faculty,
        payload.branches.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Department Confidence");

    if ranked.is_empty() {
        let _ = writeln!(output, "No departments reported.");
    } else {
        for score in &ranked {
            let confidence = score.confidence();
            let _ = writeln!(
                output,
                "- {} ({}): {} ({}), performance {}",
                department_display_name(&score.department),
                score.department,
                confidence,
                tier_label(confidence_tier(confidence)),
                score.performance_label()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Focus Required");

    if focus.is_empty() {
        let _ = writeln!(output, "All departments on track.");
    } else {
        for score in focus {
            let _ = writeln!(
                output,
                "- {}: performance {}, submission {}",
                score.department,
                score.performance_label(),
                score.punctuality.label()
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## HOD Compliance");
    let _ = writeln!(
        output,
        "{} submissions: {} approved, {} pending, {} delayed",
        compliance.total, compliance.approved, compliance.pending, compliance.delayed
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Low Performers");

    if payload.low_performers.is_empty() {
        let _ = writeln!(output, "No low performers flagged.");
    } else {
        for student in payload.low_performers.iter().take(LOW_PERFORMER_LIMIT) {
            let _ = writeln!(
                output,
                "- {} ({}, {}) {} marks in {}",
                student.name,
                student.reg_no,
                student.department,
                student.marks,
                student.subject_code
            );
        }
    }

    output
}

#[derive(Serialize)]
struct StudentRow<'a> {
    reg_no: &'a str,
    name: &'a str,
    semester: &'a str,
    section: &'a str,
    cie_total: f64,
    at_risk: bool,
}

pub fn write_students_csv<W: io::Write>(writer: W, students: &[&Student]) -> anyhow::Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for student in students {
        csv.serialize(StudentRow {
            reg_no: &student.reg_no,
            name: &student.name,
            semester: &student.semester,
            section: &student.section,
            cie_total: cie_total(student),
            at_risk: student_at_risk(student),
        })
        .with_context(|| format!("failed to write row for {}", student.reg_no))?;
    }
    csv.flush().context("failed to flush student export")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::normalize::FromRecord;

    #[test]
    fn report_ranks_and_flags_departments() {
        let payload = DashboardPayload::from_record(&json!({
            "stats": {"totalStudents": 900, "totalFaculty": 60},
            "branches": ["EC", "CS"],
            "branchPerformance": [62, 88],
            "hodSubmissionStatus": [
                {"id": "CS", "status": "Approved", "punctuality": "On Time"},
                {"id": "EC", "status": "Pending", "punctuality": "Delayed"}
            ],
            "lowPerformers": [
                {
                    "student": {"name": "Ravi", "regNo": "1EC010", "department": "EC"},
                    "subject": {"code": "EC301"},
                    "marks": 9
                }
            ]
        }));

        let report = build_report(&payload);

        assert!(report
            .starts_with("# Institute Summary\n900 students, 60 faculty across 2 departments"));
        let cs = report.find("- Computer Science (CS): 93 (high)").unwrap();
        let ec = report.find("- Electronics & Communication (EC): 57 (low)").unwrap();
        assert!(cs < ec);
        assert!(report.contains("- EC: performance 62.0%, submission Delayed"));
        assert!(report.contains("2 submissions: 1 approved, 1 pending, 1 delayed"));
        assert!(report.contains("- Ravi (1EC010, EC) 9 marks in EC301"));
    }

    #[test]
    fn empty_payload_renders_placeholders() {
        let report = build_report(&DashboardPayload::default());
        assert!(report.contains("No departments reported."));
        assert!(report.contains("All departments on track."));
        assert!(report.contains("No low performers flagged."));
    }

    #[test]
    fn csv_export_includes_totals_and_risk() {
        let strong = Student::from_record(&json!({
            "regNo": "1CS001",
            "name": "Asha",
            "semester": 5,
            "section": "A",
            "marks": {"cie1": 18, "cie2": 20}
        }));
        let weak = Student::from_record(&json!({
            "regNo": "1CS002",
            "name": "Bala",
            "semester": 5,
            "section": "B",
            "marks": {"cie1": 7, "cie2": 6.5}
        }));

        let mut buffer = Vec::new();
        write_students_csv(&mut buffer, &[&strong, &weak]).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "reg_no,name,semester,section,cie_total,at_risk\n\
             1CS001,Asha,5,A,38.0,false\n\
             1CS002,Bala,5,B,13.5,true\n"
        );
    }
}
