//! List predicates behind the searchable sections. Every filter is a full
//! recomputation over the source list and keeps source order.

use std::str::FromStr;

use crate::metrics::student_at_risk;
use crate::models::{
    DepartmentSummary, FacultyRecord, HodSubmission, Punctuality, Student, SubmissionStatus,
};

pub const ALL_DEPARTMENTS: &str = "All Departments";
pub const STUDENTS_PER_PAGE: usize = 100;

const DEPARTMENT_ALIASES: &[(&str, &str)] = &[("CS", "CSE"), ("EC", "ECE")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentFilter {
    All,
    Named(String),
}

impl DepartmentFilter {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL_DEPARTMENTS {
            Self::All
        } else {
            Self::Named(raw.to_string())
        }
    }

    pub fn matches(&self, department: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == department,
        }
    }
}

/// Name matches case-insensitively; identity matches the query as typed.
pub fn faculty_matches(
    faculty: &FacultyRecord,
    query: &str,
    department: &DepartmentFilter,
) -> bool {
    let matches_search = faculty.name.to_lowercase().contains(&query.to_lowercase())
        || faculty.id.contains(query);
    matches_search && department.matches(&faculty.department)
}

pub fn filter_faculty<'a>(
    items: &'a [FacultyRecord],
    query: &str,
    department: &DepartmentFilter,
) -> Vec<&'a FacultyRecord> {
    items
        .iter()
        .filter(|faculty| faculty_matches(faculty, query, department))
        .collect()
}

fn is_alias(a: &str, b: &str) -> bool {
    DEPARTMENT_ALIASES
        .iter()
        .any(|(left, right)| (*left == a && *right == b) || (*left == b && *right == a))
}

/// Faculty belonging to `department` by code, display name, or alias.
pub fn department_faculty<'a>(
    all: &'a [FacultyRecord],
    department: &DepartmentSummary,
) -> Vec<&'a FacultyRecord> {
    all.iter()
        .filter(|faculty| {
            faculty.department == department.id
                || faculty.department == department.name
                || is_alias(&department.id, &faculty.department)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComplianceFilter {
    #[default]
    All,
    Approved,
    Pending,
    Delayed,
}

impl ComplianceFilter {
    pub const ALL: [ComplianceFilter; 4] =
        [Self::All, Self::Approved, Self::Pending, Self::Delayed];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Delayed => "Delayed",
        }
    }

    /// `Delayed` reads punctuality, the others read status.
    pub fn matches(self, record: &HodSubmission) -> bool {
        match self {
            Self::All => true,
            Self::Approved => record.status == SubmissionStatus::Approved,
            Self::Pending => record.status == SubmissionStatus::Pending,
            Self::Delayed => record.punctuality == Punctuality::Delayed,
        }
    }
}

impl FromStr for ComplianceFilter {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|filter| filter.label().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown compliance filter `{raw}`, expected All, Approved, Pending or Delayed"
                )
            })
    }
}

pub fn filter_submissions(
    records: &[HodSubmission],
    filter: ComplianceFilter,
) -> Vec<&HodSubmission> {
    records.iter().filter(|record| filter.matches(record)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SemesterFilter {
    #[default]
    All,
    Number(String),
}

impl SemesterFilter {
    /// `"2nd"` and `"2"` both select semester 2.
    pub fn parse(raw: &str) -> Self {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        if raw.trim().eq_ignore_ascii_case("all") || digits.is_empty() {
            Self::All
        } else {
            Self::Number(digits)
        }
    }

    pub fn matches(&self, semester: &str) -> bool {
        match self {
            Self::All => true,
            Self::Number(number) => semester.trim() == number,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    pub search: String,
    pub semester: SemesterFilter,
    pub at_risk_only: bool,
}

impl StudentQuery {
    pub fn matches(&self, student: &Student) -> bool {
        let matches_search = student.name.to_lowercase().contains(&self.search.to_lowercase())
            || student.reg_no.contains(&self.search);
        let matches_risk = !self.at_risk_only || student_at_risk(student);
        matches_search && self.semester.matches(&student.semester) && matches_risk
    }
}

pub fn filter_students<'a>(students: &'a [Student], query: &StudentQuery) -> Vec<&'a Student> {
    students.iter().filter(|student| query.matches(student)).collect()
}

/// Case-insensitive name or registration number match.
pub fn search_students<'a>(
    students: &'a [Student],
    query: &str,
) -> impl Iterator<Item = &'a Student> {
    let needle = query.to_lowercase();
    students.iter().filter(move |student| {
        student.name.to_lowercase().contains(&needle)
            || student.reg_no.to_lowercase().contains(&needle)
    })
}

/// One-based page slice; pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if per_page == 0 {
        return &[];
    }
    let start = page.saturating_sub(1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        len.div_ceil(per_page)
    }
}
