use crate::filters::{filter_faculty, DepartmentFilter, ALL_DEPARTMENTS};
use crate::models::FacultyRecord;
use crate::normalize::PLACEHOLDER;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacultyDraft {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub department: String,
    pub designation: String,
}

impl FacultyDraft {
    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full name", &self.full_name),
            ("username", &self.username),
            ("department", &self.department),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn into_record(self) -> FacultyRecord {
        FacultyRecord {
            id: self.username.trim().to_string(),
            name: self.full_name.trim().to_string(),
            department: self.department.trim().to_string(),
            designation: self.designation.trim().to_string(),
            qualifications: String::new(),
            email: Some(self.email.trim().to_string()).filter(|email| !email.is_empty()),
            phone: None,
            subjects: Vec::new(),
            status: "Active".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FacultyDirectoryView {
    faculty: Vec<FacultyRecord>,
    query: String,
    department: DepartmentFilter,
    selected: Option<String>,
    modal_open: bool,
}

impl FacultyDirectoryView {
    pub fn new(faculty: Vec<FacultyRecord>) -> Self {
        Self {
            faculty,
            query: String::new(),
            department: DepartmentFilter::All,
            selected: None,
            modal_open: false,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn set_department(&mut self, department: DepartmentFilter) {
        self.department = department;
    }

    pub fn rows(&self) -> Vec<&FacultyRecord> {
        filter_faculty(&self.faculty, &self.query, &self.department)
    }

    /// Selector options: the sentinel, then departments in first-seen order.
    pub fn department_options(&self) -> Vec<String> {
        let mut options = vec![ALL_DEPARTMENTS.to_string()];
        for faculty in &self.faculty {
            if !faculty.department.is_empty() && !options.contains(&faculty.department) {
                options.push(faculty.department.clone());
            }
        }
        options
    }

    pub fn open(&mut self, id: &str) -> Option<&FacultyRecord> {
        let record = self.faculty.iter().find(|faculty| faculty.id == id)?;
        self.selected = Some(record.id.clone());
        self.modal_open = true;
        Some(record)
    }

    pub fn close(&mut self) {
        self.modal_open = false;
    }

    pub fn modal(&self) -> Option<&FacultyRecord> {
        if !self.modal_open {
            return None;
        }
        let id = self.selected.as_deref()?;
        self.faculty.iter().find(|faculty| faculty.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<FacultyRecord> {
        let index = self.faculty.iter().position(|faculty| faculty.id == id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
            self.modal_open = false;
        }
        Some(self.faculty.remove(index))
    }

    /// Records with placeholder identity cannot be told apart, so they are
    /// rejected.
    pub fn add(&mut self, record: FacultyRecord) -> Result<(), String> {
        if record.id.is_empty() || record.id == PLACEHOLDER {
            return Err("faculty record needs an identity".to_string());
        }
        if self.faculty.iter().any(|faculty| faculty.id == record.id) {
            return Err(format!("faculty `{}` already exists", record.id));
        }
        self.faculty.push(record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.faculty.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faculty.is_empty()
    }

    pub fn into_records(self) -> Vec<FacultyRecord> {
        self.faculty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::normalize::FromRecord;

    fn view() -> FacultyDirectoryView {
        let faculty = [
            json!({"id": "F1", "fullName": "Meera Shah", "department": "CS"}),
            json!({"EmployeeID": "F2", "name": "Arun Patil", "dept": "ME"}),
            json!({"id": "F3", "fullName": "Mohan Rao", "department": "CS"}),
        ]
        .iter()
        .map(FacultyRecord::from_record)
        .collect();
        FacultyDirectoryView::new(faculty)
    }

    #[test]
    fn rows_follow_query_and_department() {
        let mut view = view();
        view.set_query("m");
        view.set_department(DepartmentFilter::parse("CS"));
        let ids: Vec<&str> = view.rows().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["F1", "F3"]);

        view.set_department(DepartmentFilter::parse(ALL_DEPARTMENTS));
        view.set_query("");
        assert_eq!(view.rows().len(), 3);
    }

    #[test]
    fn department_options_start_with_sentinel() {
        assert_eq!(view().department_options(), vec![ALL_DEPARTMENTS, "CS", "ME"]);
    }

    #[test]
    fn reopening_after_close_shows_same_record() {
        let mut view = view();
        view.open("F2");
        view.close();
        assert!(view.modal().is_none());
        view.open("F2");
        assert_eq!(view.modal().map(|f| f.name.as_str()), Some("Arun Patil"));
    }

    #[test]
    fn removing_selected_record_closes_modal() {
        let mut view = view();
        view.open("F1");
        assert_eq!(view.remove("F1").map(|f| f.id), Some("F1".to_string()));
        assert!(view.modal().is_none());
        assert_eq!(view.len(), 2);
        assert!(view.remove("F1").is_none());
        assert!(FacultyDirectoryView::new(Vec::new()).is_empty());
    }

    #[test]
    fn draft_validation_and_add() {
        let draft = FacultyDraft {
            full_name: "Lata Desai".into(),
            username: " lata ".into(),
            ..FacultyDraft::default()
        };
        assert_eq!(draft.missing_fields(), vec!["department"]);

        let draft = FacultyDraft {
            department: "EC".into(),
            ..draft
        };
        assert!(draft.missing_fields().is_empty());

        let mut view = view();
        view.add(draft.clone().into_record()).unwrap();
        assert_eq!(view.len(), 4);
        assert!(view.add(draft.into_record()).is_err());
        assert!(view.add(FacultyRecord::from_record(&json!({}))).is_err());
    }
}
