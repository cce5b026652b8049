//! Department cards and the drill-down detail view.
//!
//! Cards load their own stats independently of the department list. The
//! detail view loads stats again under a [`Ticket`], and the student roster
//! modal loads under a ticket of the same selection, so a response that
//! arrives after the user moved on is dropped instead of overwriting the
//! current department.

use futures::future::join_all;

use super::{DrillDown, Loadable, Ticket};
use crate::client::{DashboardClient, Transport};
use crate::error::ErrorPolicy;
use crate::filters::department_faculty;
use crate::models::{DepartmentStats, DepartmentSummary, FacultyRecord, Student};

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentCard {
    pub summary: DepartmentSummary,
    pub stats: Loadable<DepartmentStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentDetail {
    pub department: DepartmentSummary,
    pub stats: Loadable<DepartmentStats>,
    pub faculty: Vec<FacultyRecord>,
    /// `None` while the roster modal is closed.
    pub roster: Option<Loadable<Vec<Student>>>,
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentsView {
    cards: Vec<DepartmentCard>,
    drill: DrillDown<String>,
    detail: Option<DepartmentDetail>,
}

impl DepartmentsView {
    pub fn new(departments: Vec<DepartmentSummary>) -> Self {
        Self {
            cards: departments
                .into_iter()
                .map(|summary| DepartmentCard {
                    summary,
                    stats: Loadable::Loading,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn cards(&self) -> &[DepartmentCard] {
        &self.cards
    }

    pub fn apply_card_stats(&mut self, department_id: &str, stats: DepartmentStats) {
        if let Some(card) = self
            .cards
            .iter_mut()
            .find(|card| card.summary.id == department_id)
        {
            card.stats = Loadable::Ready(stats);
        }
    }

    /// Opens the detail view with fresh loading state.
    pub fn select(
        &mut self,
        department_id: &str,
        all_faculty: &[FacultyRecord],
    ) -> Option<Ticket<String>> {
        let department = self
            .cards
            .iter()
            .find(|card| card.summary.id == department_id)?
            .summary
            .clone();

        let faculty = department_faculty(all_faculty, &department)
            .into_iter()
            .cloned()
            .collect();
        let ticket = self.drill.select(department.id.clone());
        self.detail = Some(DepartmentDetail {
            department,
            stats: Loadable::Loading,
            faculty,
            roster: None,
        });
        Some(ticket)
    }

    pub fn back(&mut self) {
        self.drill.back();
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&DepartmentDetail> {
        self.detail.as_ref()
    }

    pub fn apply_stats(&mut self, ticket: &Ticket<String>, stats: DepartmentStats) -> bool {
        if !self.drill.accepts(ticket) {
            tracing::debug!(department = %ticket.key, "discarding stale stats response");
            return false;
        }
        match self.detail.as_mut() {
            Some(detail) => {
                detail.stats = Loadable::Ready(stats);
                true
            }
            None => false,
        }
    }

    pub fn open_roster(&mut self) -> Option<Ticket<String>> {
        let detail = self.detail.as_mut()?;
        detail.roster = Some(Loadable::Loading);
        self.drill.current_ticket()
    }

    pub fn close_roster(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            detail.roster = None;
        }
    }

    pub fn apply_roster(&mut self, ticket: &Ticket<String>, students: Vec<Student>) -> bool {
        if !self.drill.accepts(ticket) {
            tracing::debug!(department = %ticket.key, "discarding stale roster response");
            return false;
        }
        match self.detail.as_mut().and_then(|detail| detail.roster.as_mut()) {
            Some(roster) => {
                *roster = Loadable::Ready(students);
                true
            }
            None => false,
        }
    }
}

/// Loads every card's stats concurrently; failures show as zeroed stats.
pub async fn load_card_stats<T: Transport>(
    view: &mut DepartmentsView,
    client: &DashboardClient<T>,
) {
    let ids: Vec<String> = view.cards.iter().map(|card| card.summary.id.clone()).collect();
    let results = join_all(
        ids.iter()
            .map(|id| client.department_stats(id, ErrorPolicy::Fallback)),
    )
    .await;

    for (id, result) in ids.iter().zip(results) {
        view.apply_card_stats(id, result.unwrap_or_default());
    }
}

pub async fn fetch_stats<T: Transport>(
    client: &DashboardClient<T>,
    ticket: Ticket<String>,
) -> (Ticket<String>, DepartmentStats) {
    let stats = client
        .department_stats(&ticket.key, ErrorPolicy::Fallback)
        .await
        .unwrap_or_default();
    (ticket, stats)
}

pub async fn fetch_roster<T: Transport>(
    client: &DashboardClient<T>,
    ticket: Ticket<String>,
) -> (Ticket<String>, Vec<Student>) {
    let students = client
        .department_students(&ticket.key, ErrorPolicy::Fallback)
        .await
        .unwrap_or_default();
    (ticket, students)
}
