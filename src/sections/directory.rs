use std::collections::BTreeSet;

use super::{DrillDown, Loadable, Ticket};
use crate::client::{DashboardClient, Transport};
use crate::error::ErrorPolicy;
use crate::filters::{filter_students, paginate, total_pages, StudentQuery, STUDENTS_PER_PAGE};
use crate::models::{DepartmentSummary, Student};

/// Student directory: pick a department, then search its roster.
#[derive(Debug, Clone)]
pub struct StudentDirectoryView {
    departments: Vec<DepartmentSummary>,
    drill: DrillDown<String>,
    students: Loadable<Vec<Student>>,
    query: StudentQuery,
    page: usize,
    selected: BTreeSet<String>,
    profile: Option<String>,
}

impl StudentDirectoryView {
    pub fn new(departments: Vec<DepartmentSummary>) -> Self {
        Self {
            departments,
            drill: DrillDown::default(),
            students: Loadable::Ready(Vec::new()),
            query: StudentQuery::default(),
            page: 1,
            selected: BTreeSet::new(),
            profile: None,
        }
    }

    pub fn departments(&self) -> &[DepartmentSummary] {
        &self.departments
    }

    pub fn selected_department(&self) -> Option<&DepartmentSummary> {
        let id = self.drill.selected()?;
        self.departments.iter().find(|department| &department.id == id)
    }

    pub fn select_department(&mut self, department_id: &str) -> Option<Ticket<String>> {
        let id = self
            .departments
            .iter()
            .find(|department| department.id == department_id)?
            .id
            .clone();
        self.students = Loadable::Loading;
        self.selected.clear();
        self.profile = None;
        self.page = 1;
        Some(self.drill.select(id))
    }

    pub fn back(&mut self) {
        self.drill.back();
        self.students = Loadable::Ready(Vec::new());
        self.selected.clear();
        self.profile = None;
    }

    pub fn apply_students(&mut self, ticket: &Ticket<String>, students: Vec<Student>) -> bool {
        if !self.drill.accepts(ticket) {
            return false;
        }
        self.students = Loadable::Ready(students);
        true
    }

    pub fn is_loading(&self) -> bool {
        self.students.is_loading()
    }

    /// Any query change returns to the first page.
    pub fn set_query(&mut self, query: StudentQuery) {
        self.query = query;
        self.page = 1;
    }

    pub fn query(&self) -> &StudentQuery {
        &self.query
    }

    pub fn clear_filters(&mut self) {
        self.query.search.clear();
        self.query.at_risk_only = false;
        self.page = 1;
    }

    pub fn filtered(&self) -> Vec<&Student> {
        match &self.students {
            Loadable::Ready(students) => filter_students(students, &self.query),
            Loadable::Loading => Vec::new(),
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        total_pages(self.filtered().len(), STUDENTS_PER_PAGE)
    }

    pub fn page_rows(&self) -> Vec<&Student> {
        paginate(&self.filtered(), self.page, STUDENTS_PER_PAGE).to_vec()
    }

    pub fn toggle_selected(&mut self, reg_no: &str) {
        if !self.selected.remove(reg_no) {
            self.selected.insert(reg_no.to_string());
        }
    }

    pub fn select_page(&mut self) {
        self.selected = self
            .page_rows()
            .into_iter()
            .map(|student| student.reg_no.clone())
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn open_profile(&mut self, reg_no: &str) {
        self.profile = Some(reg_no.to_string());
    }

    pub fn close_profile(&mut self) {
        self.profile = None;
    }

    pub fn profile(&self) -> Option<&Student> {
        let reg_no = self.profile.as_deref()?;
        self.students
            .ready()?
            .iter()
            .find(|student| student.reg_no == reg_no)
    }
}

pub async fn fetch_students<T: Transport>(
    client: &DashboardClient<T>,
    ticket: Ticket<String>,
) -> (Ticket<String>, Vec<Student>) {
    let students = client
        .department_students(&ticket.key, ErrorPolicy::Fallback)
        .await
        .unwrap_or_default();
    (ticket, students)
}
