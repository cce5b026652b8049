//! Page-level state: the fan-out load, active tab, toast and the single
//! active modal. Sections receive their slice through the builders below.

use crate::client::{DashboardClient, Transport};
use crate::error::{ApiError, ErrorPolicy};
use crate::models::{
    DashboardPayload, DepartmentSummary, FacultyRecord, Grievance, NotificationRecord,
    ReportRecord, ScheduleEntry,
};
use crate::sections::cie::CieScheduleView;
use crate::sections::compliance::ComplianceView;
use crate::sections::departments::DepartmentsView;
use crate::sections::directory::StudentDirectoryView;
use crate::sections::faculty::{FacultyDirectoryView, FacultyDraft};
use crate::sections::grievances::GrievancesView;
use crate::sections::notifications::{BroadcastDraft, NotificationsView};
use crate::sections::overview::OverviewView;
use crate::sections::reports::ReportsView;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Compliance,
    Departments,
    Directory,
    Faculty,
    CieSchedule,
    Notifications,
    Reports,
    Grievances,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

/// At most one modal is open, and it carries its own payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ActiveModal {
    #[default]
    None,
    FacultyAdd(FacultyDraft),
    Broadcast(BroadcastDraft),
    GrievanceDetail(Grievance),
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub payload: Option<DashboardPayload>,
    pub faculty: Option<Vec<FacultyRecord>>,
    pub schedule: Option<Vec<ScheduleEntry>>,
    pub circulars: Option<Vec<NotificationRecord>>,
    pub reports: Option<Vec<ReportRecord>>,
    pub grievances: Option<Vec<Grievance>>,
    pub active_tab: Tab,
    pub toast: Option<Toast>,
    pub modal: ActiveModal,
    pub loading: bool,
}

fn settle<T>(result: Result<T, ApiError>, failures: &mut Vec<ApiError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            failures.push(err);
            None
        }
    }
}

impl DashboardState {
    /// Fetches every slice concurrently and waits for all of them. Failed
    /// slices stay unset and raise a single error toast.
    pub async fn load<T: Transport>(&mut self, client: &DashboardClient<T>) {
        self.loading = true;
        let policy = ErrorPolicy::Surface;
        let (payload, faculty, schedule, circulars, reports, grievances) = futures::join!(
            client.dashboard(policy),
            client.faculty(policy),
            client.timetables(policy),
            client.circulars(policy),
            client.reports(policy),
            client.grievances(policy),
        );

        let mut failures = Vec::new();
        self.payload = settle(payload, &mut failures);
        self.faculty = settle(faculty, &mut failures);
        self.schedule = settle(schedule, &mut failures);
        self.circulars = settle(circulars, &mut failures);
        self.reports = settle(reports, &mut failures);
        self.grievances = settle(grievances, &mut failures);
        self.loading = false;

        if let Some(first) = failures.first() {
            tracing::warn!(failed = failures.len(), "dashboard loaded partially");
            self.show_toast(format!("Failed to load dashboard data: {first}"), ToastKind::Error);
        } else {
            tracing::info!("dashboard loaded");
        }
    }

    /// Drops everything fetched under the previous credentials and reloads.
    pub async fn reload<T: Transport>(&mut self, client: &DashboardClient<T>) {
        let active_tab = self.active_tab;
        *self = Self {
            active_tab,
            ..Self::default()
        };
        self.load(client).await;
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
        });
    }

    pub fn open_modal(&mut self, modal: ActiveModal) {
        self.modal = modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = ActiveModal::None;
    }

    pub fn open_grievance(&mut self, id: &str) -> bool {
        let grievance = self
            .grievances
            .as_deref()
            .and_then(|grievances| grievances.iter().find(|grievance| grievance.id == id))
            .cloned();
        match grievance {
            Some(grievance) => {
                self.modal = ActiveModal::GrievanceDetail(grievance);
                true
            }
            None => false,
        }
    }

    /// Adds the drafted faculty member to the loaded list.
    pub fn submit_faculty(&mut self) -> bool {
        let ActiveModal::FacultyAdd(draft) = &self.modal else {
            return false;
        };

        let missing = draft.missing_fields();
        if !missing.is_empty() {
            self.show_toast(format!("Missing {}", missing.join(", ")), ToastKind::Error);
            return false;
        }

        let record = draft.clone().into_record();
        let mut directory = FacultyDirectoryView::new(self.faculty.take().unwrap_or_default());
        let outcome = directory.add(record.clone());
        self.faculty = Some(directory.into_records());

        match outcome {
            Ok(()) => {
                self.show_toast(format!("Added {}", record.name), ToastKind::Success);
                self.close_modal();
                true
            }
            Err(message) => {
                self.show_toast(message, ToastKind::Error);
                false
            }
        }
    }

    pub async fn submit_broadcast<T: Transport>(
        &mut self,
        client: &DashboardClient<T>,
        sender_id: &str,
    ) -> bool {
        let ActiveModal::Broadcast(draft) = &self.modal else {
            return false;
        };
        if !draft.is_sendable() {
            self.show_toast("Broadcast message is empty", ToastKind::Error);
            return false;
        }

        let draft = draft.clone();
        match client
            .broadcast(sender_id, &draft.message, &draft.target_role)
            .await
        {
            Ok(confirmation) => {
                let message = confirmation.unwrap_or_else(|| "Broadcast sent".to_string());
                self.show_toast(message, ToastKind::Success);
                self.close_modal();
                true
            }
            Err(err) => {
                self.show_toast(format!("Broadcast failed: {err}"), ToastKind::Error);
                false
            }
        }
    }

    pub fn department_summaries(&self) -> Vec<DepartmentSummary> {
        self.payload
            .as_ref()
            .map(|payload| {
                DepartmentSummary::from_branches(&payload.branches, &payload.submissions)
            })
            .unwrap_or_default()
    }

    pub fn overview(&self) -> OverviewView {
        self.payload
            .as_ref()
            .map(OverviewView::from_payload)
            .unwrap_or_default()
    }

    pub fn compliance(&self) -> ComplianceView {
        ComplianceView::new(
            self.payload
                .as_ref()
                .map(|payload| payload.submissions.clone())
                .unwrap_or_default(),
        )
    }

    pub fn departments(&self) -> DepartmentsView {
        DepartmentsView::new(self.department_summaries())
    }

    pub fn student_directory(&self) -> StudentDirectoryView {
        StudentDirectoryView::new(self.department_summaries())
    }

    pub fn faculty_list(&self) -> &[FacultyRecord] {
        self.faculty.as_deref().unwrap_or_default()
    }

    pub fn faculty_directory(&self) -> FacultyDirectoryView {
        FacultyDirectoryView::new(self.faculty_list().to_vec())
    }

    pub fn cie_schedule(&self) -> CieScheduleView {
        CieScheduleView::new(self.schedule.clone().unwrap_or_default())
    }

    pub fn notifications(&self) -> NotificationsView {
        NotificationsView::new(self.circulars.clone().unwrap_or_default())
    }

    pub fn reports(&self) -> ReportsView {
        ReportsView::new(self.reports.clone().unwrap_or_default())
    }

    pub fn grievances(&self) -> GrievancesView {
        GrievancesView::new(self.grievances.clone().unwrap_or_default())
    }
}
