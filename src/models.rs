use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::{
    child, keys, resolve, resolve_bool, resolve_count, resolve_f64, resolve_opt_str, resolve_str,
    FromRecord, PLACEHOLDER,
};

const DEPARTMENT_NAMES: &[(&str, &str)] = &[
    ("CS", "Computer Science"),
    ("CSE", "Computer Science"),
    ("EC", "Electronics & Communication"),
    ("ECE", "Electronics & Communication"),
    ("EE", "Electrical & Electronics"),
    ("ME", "Mechanical"),
    ("CV", "Civil"),
    ("IS", "Information Science"),
];

const DEPARTMENT_COLORS: &[&str] = &[
    "#3b82f6", "#f59e0b", "#10b981", "#8b5cf6", "#ef4444", "#06b6d4",
];

pub const HOD_NOT_ASSIGNED: &str = "Not Assigned";

#[derive(Debug, Clone, PartialEq)]
pub struct FacultyRecord {
    pub id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub qualifications: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subjects: Vec<String>,
    pub status: String,
}

impl FromRecord for FacultyRecord {
    fn from_record(record: &Value) -> Self {
        let subjects = match resolve(record, &["subjects", "subject"]) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|subject| !subject.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::String(list)) => split_list(list),
            _ => Vec::new(),
        };

        Self {
            id: resolve_str(record, keys::FACULTY_ID, PLACEHOLDER),
            name: resolve_str(record, keys::FACULTY_NAME, PLACEHOLDER),
            department: resolve_str(record, keys::FACULTY_DEPARTMENT, ""),
            designation: resolve_str(record, &["designation"], ""),
            qualifications: resolve_str(record, &["qualifications", "qualification"], ""),
            email: resolve_opt_str(record, &["email"]).filter(|v| !v.is_empty()),
            phone: resolve_opt_str(record, &["phone", "contact"]).filter(|v| !v.is_empty()),
            subjects,
            status: resolve_str(record, &["status"], "Active"),
        }
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentSummary {
    pub id: String,
    pub name: String,
    pub hod: String,
    pub color: String,
}

impl DepartmentSummary {
    pub fn from_branches(branches: &[String], submissions: &[HodSubmission]) -> Vec<Self> {
        branches
            .iter()
            .enumerate()
            .map(|(index, code)| {
                let hod = submissions
                    .iter()
                    .find(|submission| &submission.department_id == code)
                    .map(|submission| submission.hod.clone())
                    .filter(|hod| !hod.is_empty())
                    .unwrap_or_else(|| HOD_NOT_ASSIGNED.to_string());

                Self {
                    id: code.clone(),
                    name: department_display_name(code),
                    hod,
                    color: DEPARTMENT_COLORS[index % DEPARTMENT_COLORS.len()].to_string(),
                }
            })
            .collect()
    }
}

pub fn department_display_name(code: &str) -> String {
    DEPARTMENT_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepartmentStats {
    pub student_count: u64,
    pub faculty_count: u64,
    pub pass_percentage: f64,
    pub at_risk_count: u64,
}

impl FromRecord for DepartmentStats {
    fn from_record(record: &Value) -> Self {
        Self {
            student_count: resolve_count(record, &["studentCount", "totalStudents"]),
            faculty_count: resolve_count(record, &["facultyCount", "totalFaculty"]),
            pass_percentage: resolve_f64(record, &["passPercentage"], 0.0),
            at_risk_count: resolve_count(record, &["atRiskCount"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Approved,
    Pending,
    Submitted,
    Other(String),
}

impl SubmissionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Approved" => Self::Approved,
            "Pending" => Self::Pending,
            "Submitted" => Self::Submitted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuality {
    OnTime,
    Delayed,
    Unknown,
}

impl Punctuality {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Delayed" => Self::Delayed,
            "On Time" | "OnTime" | "On-Time" => Self::OnTime,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Delayed => "Delayed",
            Self::Unknown => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HodSubmission {
    pub department_id: String,
    pub hod: String,
    pub status: SubmissionStatus,
    pub punctuality: Punctuality,
    pub submitted_on: Option<String>,
    pub delay_days: u64,
    pub completion: f64,
    pub high_priority: bool,
    pub remarks: String,
}

impl FromRecord for HodSubmission {
    fn from_record(record: &Value) -> Self {
        let high_priority = match resolve(record, &["priority"]) {
            Some(Value::String(priority)) => priority == "High Priority" || priority == "High",
            Some(Value::Bool(flag)) => *flag,
            _ => false,
        };

        Self {
            department_id: resolve_str(record, keys::SUBMISSION_DEPARTMENT, PLACEHOLDER),
            hod: resolve_str(record, keys::SUBMISSION_HOD, HOD_NOT_ASSIGNED),
            status: SubmissionStatus::parse(&resolve_str(record, &["status"], "")),
            punctuality: Punctuality::parse(&resolve_str(record, &["punctuality"], "")),
            submitted_on: resolve_opt_str(record, &["submissionDate", "date"]),
            delay_days: resolve_count(record, &["delayDays"]),
            completion: resolve_f64(record, &["completion", "completionPercentage"], 0.0),
            high_priority,
            remarks: resolve_str(record, &["remarks"], ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CieStatus {
    Scheduled,
    Completed,
    Other(String),
}

impl CieStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("SCHEDULED") => Self::Scheduled,
            Some("COMPLETED") => Self::Completed,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRef {
    pub name: String,
    pub code: String,
    pub department: String,
    pub semester: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: String,
    pub subject: SubjectRef,
    pub cie_number: String,
    pub status: CieStatus,
    pub date: Option<NaiveDate>,
    pub start_time: String,
    pub room: String,
    pub duration_minutes: Option<u64>,
    pub faculty_username: Option<String>,
    pub syllabus_coverage: Option<String>,
}

impl FromRecord for ScheduleEntry {
    fn from_record(record: &Value) -> Self {
        let subject = child(record, "subject");
        let faculty_username = resolve_opt_str(child(record, "faculty"), &["username"])
            .or_else(|| resolve_opt_str(record, &["facultyUsername"]));
        let duration = resolve_count(record, &["durationMinutes", "duration"]);

        Self {
            id: resolve_str(record, &["id"], PLACEHOLDER),
            subject: SubjectRef {
                name: resolve_str(subject, &["name"], PLACEHOLDER),
                code: resolve_str(subject, &["code"], ""),
                department: resolve_str(subject, &["department"], PLACEHOLDER),
                semester: resolve_str(subject, &["semester"], ""),
            },
            cie_number: resolve_str(record, &["cieNumber"], ""),
            status: CieStatus::parse(resolve_opt_str(record, &["status"]).as_deref()),
            date: resolve_opt_str(record, &["scheduledDate", "date"])
                .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok()),
            start_time: resolve_str(record, &["startTime", "time"], ""),
            room: resolve_str(record, &["examRoom", "room"], ""),
            duration_minutes: (duration > 0).then_some(duration),
            faculty_username,
            syllabus_coverage: resolve_opt_str(record, &["syllabusCoverage"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
    Error,
    Other(String),
}

impl NotificationKind {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "" | "INFO" => Self::Info,
            "WARNING" => Self::Warning,
            "SUCCESS" => Self::Success,
            "ERROR" => Self::Error,
            _ => Self::Other(raw.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: Option<String>,
    pub read: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl FromRecord for NotificationRecord {
    fn from_record(record: &Value) -> Self {
        Self {
            id: resolve_str(record, &["id"], PLACEHOLDER),
            message: resolve_str(record, &["message", "title"], ""),
            kind: NotificationKind::parse(&resolve_str(record, &["type"], "")),
            category: resolve_opt_str(record, &["category"]).filter(|v| !v.is_empty()),
            read: resolve_bool(record, &["read", "isRead"], false),
            created_at: resolve_opt_str(record, &["createdAt", "date"])
                .and_then(|raw| parse_timestamp(&raw)),
        }
    }
}

/// Accepts RFC 3339 as well as the naive ISO form the backend emits.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|stamp| stamp.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub size: String,
    pub generated_on: String,
}

impl FromRecord for ReportRecord {
    fn from_record(record: &Value) -> Self {
        Self {
            id: resolve_str(record, &["id"], PLACEHOLDER),
            name: resolve_str(record, &["name", "title"], PLACEHOLDER),
            kind: resolve_str(record, &["type"], ""),
            size: resolve_str(record, &["size"], ""),
            generated_on: resolve_str(record, &["date", "generatedDate"], ""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrievancePriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grievance {
    pub id: String,
    pub subject: String,
    pub raised_by: String,
    pub priority: GrievancePriority,
    pub status: String,
    pub date: String,
}

impl FromRecord for Grievance {
    fn from_record(record: &Value) -> Self {
        let priority = match resolve_str(record, &["priority"], "").as_str() {
            "High" => GrievancePriority::High,
            "Medium" => GrievancePriority::Medium,
            _ => GrievancePriority::Low,
        };

        Self {
            id: resolve_str(record, &["id"], PLACEHOLDER),
            subject: resolve_str(record, &["subject", "title"], ""),
            raised_by: resolve_str(record, &["from", "raisedBy", "student"], PLACEHOLDER),
            priority,
            status: resolve_str(record, &["status"], "Open"),
            date: resolve_str(record, &["date"], ""),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub reg_no: String,
    pub name: String,
    pub semester: String,
    pub section: String,
    pub cie1: f64,
    pub cie2: f64,
    pub mentoring_done: bool,
}

impl FromRecord for Student {
    fn from_record(record: &Value) -> Self {
        let marks = child(record, "marks");
        Self {
            reg_no: resolve_str(record, keys::STUDENT_REG_NO, PLACEHOLDER),
            name: resolve_str(record, &["name", "fullName"], PLACEHOLDER),
            semester: resolve_str(record, &["semester"], ""),
            section: resolve_str(record, &["section"], ""),
            cie1: resolve_f64(marks, &["cie1"], 0.0),
            cie2: resolve_f64(marks, &["cie2"], 0.0),
            mentoring_done: resolve_str(record, &["mentoringStatus"], "") == "Done",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstituteStats {
    pub total_students: u64,
    pub total_faculty: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacultyAnalytics {
    pub avg_score: f64,
    pub pass_rate: f64,
    pub evaluated: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CieStats {
    pub conducted: u64,
    pub pending: u64,
    pub graded: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LowPerformer {
    pub name: String,
    pub reg_no: String,
    pub department: String,
    pub subject_code: String,
    pub marks: f64,
}

impl FromRecord for LowPerformer {
    fn from_record(record: &Value) -> Self {
        let student = child(record, "student");
        Self {
            name: resolve_str(student, &["name"], PLACEHOLDER),
            reg_no: resolve_str(student, keys::STUDENT_REG_NO, PLACEHOLDER),
            department: resolve_str(student, &["department"], ""),
            subject_code: resolve_str(child(record, "subject"), &["code"], ""),
            marks: resolve_f64(record, &["marks"], 0.0),
        }
    }
}

/// CIE marks awaiting approval.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingApproval {
    pub id: String,
    pub student: String,
    pub reg_no: String,
    pub subject_code: String,
    pub cie_type: String,
    pub marks: Option<f64>,
    pub status: String,
}

impl FromRecord for PendingApproval {
    fn from_record(record: &Value) -> Self {
        let student = child(record, "student");
        Self {
            id: resolve_str(record, &["id"], PLACEHOLDER),
            student: resolve_str(student, &["name"], PLACEHOLDER),
            reg_no: resolve_str(student, keys::STUDENT_REG_NO, PLACEHOLDER),
            subject_code: resolve_str(child(record, "subject"), &["code"], ""),
            cie_type: resolve_str(record, &["cieType"], ""),
            marks: resolve(record, &["marks"]).and_then(Value::as_f64),
            status: resolve_str(record, &["status"], "PENDING"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trend {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardPayload {
    pub stats: InstituteStats,
    pub branches: Vec<String>,
    pub branch_performance: Vec<f64>,
    pub submissions: Vec<HodSubmission>,
    pub dept_student_counts: BTreeMap<String, u64>,
    pub low_performers: Vec<LowPerformer>,
    pub dates: Vec<ScheduleEntry>,
    pub approvals: Vec<PendingApproval>,
    pub faculty_analytics: FacultyAnalytics,
    pub cie_stats: CieStats,
    pub trends: Trend,
}

impl FromRecord for DashboardPayload {
    fn from_record(record: &Value) -> Self {
        let stats = child(record, "stats");
        let analytics = child(record, "facultyAnalytics");
        let cie = child(record, "cieStats");
        let trends = child(record, "trends");

        let branches = match child(record, "branches") {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(code) => Some(code.clone()),
                    other => resolve_opt_str(other, &["id", "code"]),
                })
                .collect(),
            _ => Vec::new(),
        };

        let dept_student_counts = match child(record, "deptStudentCounts") {
            Value::Object(entries) => entries
                .iter()
                .map(|(code, count)| (code.clone(), count.as_u64().unwrap_or(0)))
                .collect(),
            _ => BTreeMap::new(),
        };

        let trend_data = child(trends, "datasets")
            .get(0)
            .map(|dataset| numbers(child(dataset, "data")))
            .unwrap_or_default();

        Self {
            stats: InstituteStats {
                total_students: resolve_count(stats, &["totalStudents"]),
                total_faculty: resolve_count(stats, &["totalFaculty"]),
            },
            branches,
            branch_performance: numbers(child(record, "branchPerformance")),
            submissions: Vec::from_record(child(record, "hodSubmissionStatus")),
            dept_student_counts,
            low_performers: Vec::from_record(child(record, "lowPerformers")),
            dates: Vec::from_record(child(record, "dates")),
            approvals: Vec::from_record(child(record, "approvals")),
            faculty_analytics: FacultyAnalytics {
                avg_score: resolve_f64(analytics, &["avgScore"], 0.0),
                pass_rate: resolve_f64(analytics, &["passRate"], 0.0),
                evaluated: resolve_count(analytics, &["evaluated"]),
                pending: resolve_count(analytics, &["pending"]),
            },
            cie_stats: CieStats {
                conducted: resolve_count(cie, &["conducted"]),
                pending: resolve_count(cie, &["pending"]),
                graded: resolve_count(cie, &["graded"]),
            },
            trends: Trend {
                labels: match child(trends, "labels") {
                    Value::Array(labels) => labels
                        .iter()
                        .map(|label| match label {
                            Value::String(text) => text.clone(),
                            other => other.to_string(),
                        })
                        .collect(),
                    _ => Vec::new(),
                },
                data: trend_data,
            },
        }
    }
}

fn numbers(value: &Value) -> Vec<f64> {
    match value {
        Value::Array(items) => items.iter().map(|item| item.as_f64().unwrap_or(0.0)).collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn faculty_normalizes_alternate_keys() {
        let record = json!({
            "EmployeeID": "E7",
            "name": "Asha Rao",
            "Department": "CS",
            "subjects": "DBMS, OS ,, Networks"
        });
        let faculty = FacultyRecord::from_record(&record);

        assert_eq!(faculty.id, "E7");
        assert_eq!(faculty.name, "Asha Rao");
        assert_eq!(faculty.department, "CS");
        assert_eq!(faculty.subjects, vec!["DBMS", "OS", "Networks"]);
        assert_eq!(faculty.status, "Active");
        assert_eq!(faculty.email, None);
    }

    #[test]
    fn faculty_subjects_accept_arrays() {
        let faculty = FacultyRecord::from_record(&json!({"subjects": ["Maths", " "]}));
        assert_eq!(faculty.subjects, vec!["Maths"]);
        assert_eq!(faculty.id, PLACEHOLDER);
        assert_eq!(faculty.name, PLACEHOLDER);
    }

    #[test]
    fn submission_parses_backend_shape() {
        let record = json!({
            "id": "EC",
            "hod": "Dr. Menon",
            "status": "Approved",
            "punctuality": "On Time",
            "delayDays": 0,
            "priority": "High Priority"
        });
        let submission = HodSubmission::from_record(&record);

        assert_eq!(submission.department_id, "EC");
        assert_eq!(submission.status, SubmissionStatus::Approved);
        assert_eq!(submission.punctuality, Punctuality::OnTime);
        assert!(submission.high_priority);
    }

    #[test]
    fn unknown_status_is_preserved() {
        let submission = HodSubmission::from_record(&json!({"dept": "ME", "status": "Rejected"}));
        assert_eq!(submission.department_id, "ME");
        assert_eq!(submission.status, SubmissionStatus::Other("Rejected".into()));
        assert_eq!(submission.punctuality, Punctuality::Unknown);
        assert_eq!(submission.hod, HOD_NOT_ASSIGNED);
    }

    #[test]
    fn schedule_entry_defaults_to_scheduled() {
        let record = json!({
            "id": 3,
            "subject": {"name": "DBMS", "code": "CS501", "department": "CS", "semester": 5},
            "cieNumber": "CIE-1",
            "scheduledDate": "2026-03-04",
            "examRoom": "Room 101",
            "durationMinutes": 90,
            "faculty": {"username": "asha"}
        });
        let entry = ScheduleEntry::from_record(&record);

        assert_eq!(entry.status, CieStatus::Scheduled);
        assert_eq!(entry.subject.semester, "5");
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 3, 4));
        assert_eq!(entry.duration_minutes, Some(90));
        assert_eq!(entry.faculty_username.as_deref(), Some("asha"));
    }

    #[test]
    fn notification_parses_timestamps() {
        let record = json!({
            "id": 9,
            "message": "Marks due",
            "type": "WARNING",
            "createdAt": "2026-02-01T09:30:00"
        });
        let notification = NotificationRecord::from_record(&record);

        assert_eq!(notification.id, "9");
        assert_eq!(notification.kind, NotificationKind::Warning);
        assert!(notification.created_at.is_some());
        assert!(parse_timestamp("2026-02-01T09:30:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn departments_join_hod_names() {
        let submissions = vec![HodSubmission::from_record(&json!({"id": "CS", "hod": "Dr. Iyer"}))];
        let branches = vec!["CS".to_string(), "XY".to_string()];
        let departments = DepartmentSummary::from_branches(&branches, &submissions);

        assert_eq!(departments[0].name, "Computer Science");
        assert_eq!(departments[0].hod, "Dr. Iyer");
        assert_eq!(departments[1].name, "XY");
        assert_eq!(departments[1].hod, HOD_NOT_ASSIGNED);
        assert_ne!(departments[0].color, departments[1].color);
    }

    #[test]
    fn dashboard_payload_tolerates_missing_sections() {
        let payload = DashboardPayload::from_record(&json!({
            "stats": {"totalStudents": 1200},
            "branches": ["CS", "EC"],
            "branchPerformance": [78.5, 64.0],
            "trends": {"labels": ["2024", 2025], "datasets": [{"data": [65, 70]}]}
        }));

        assert_eq!(payload.stats.total_students, 1200);
        assert_eq!(payload.stats.total_faculty, 0);
        assert_eq!(payload.branches, vec!["CS", "EC"]);
        assert!(payload.submissions.is_empty());
        assert_eq!(payload.trends.labels, vec!["2024", "2025"]);
        assert_eq!(payload.trends.data, vec![65.0, 70.0]);
        assert_eq!(DashboardPayload::from_record(&json!(null)), DashboardPayload::default());
    }

    #[test]
    fn dashboard_payload_reads_dates_and_approvals() {
        let payload = DashboardPayload::from_record(&json!({
            "dates": [{
                "id": 4,
                "subject": {"name": "DBMS", "department": "CS"},
                "scheduledDate": "2026-03-10"
            }],
            "approvals": [
                {
                    "id": 9,
                    "student": {"name": "Kiran", "regNo": "1CS040"},
                    "subject": {"code": "CS501"},
                    "cieType": "CIE1",
                    "marks": 17
                },
                {"id": 10, "marks": null}
            ]
        }));

        assert_eq!(payload.dates[0].subject.name, "DBMS");
        assert_eq!(payload.approvals.len(), 2);
        assert_eq!(payload.approvals[0].reg_no, "1CS040");
        assert_eq!(payload.approvals[0].marks, Some(17.0));
        assert_eq!(payload.approvals[1].status, "PENDING");
        assert_eq!(payload.approvals[1].marks, None);
        assert!(DashboardPayload::default().approvals.is_empty());
    }

    #[test]
    fn student_reads_nested_marks() {
        let student = Student::from_record(&json!({
            "regNo": "1CS21001", "name": "Ravi", "semester": 2, "marks": {"cie1": 9, "cie2": 5.5}
        }));
        assert_eq!(student.semester, "2");
        assert_eq!(student.cie1 + student.cie2, 14.5);
    }
}
