use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use principal_dashboard::client::{DashboardClient, HttpTransport};
use principal_dashboard::config::{self, Config, DEFAULT_API_URL};
use principal_dashboard::dashboard::{ActiveModal, DashboardState};
use principal_dashboard::error::ErrorPolicy;
use principal_dashboard::filters::{
    self, ComplianceFilter, DepartmentFilter, SemesterFilter, StudentQuery,
};
use principal_dashboard::sections::faculty::FacultyDraft;
use principal_dashboard::sections::notifications::{BroadcastDraft, DEFAULT_BROADCAST_ROLE};
use principal_dashboard::sections::overview::{OverviewView, StudentSentinel};
use principal_dashboard::sections::{self, Loadable};
use principal_dashboard::{metrics, normalize, report};

#[derive(Parser)]
#[command(name = "principal-dashboard")]
#[command(about = "Institute overview for the principal's office", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "PRINCIPAL_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,
    /// Bearer token from a previous login
    #[arg(long, env = "PRINCIPAL_TOKEN", global = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, print the session token and check the dashboard loads
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "PRINCIPAL_PASSWORD")]
        password: String,
    },
    /// Key stats, department confidence and focus list
    Overview,
    /// HOD submission compliance
    Compliance {
        #[arg(long, default_value = "All")]
        filter: ComplianceFilter,
        /// Show one department's submission details
        #[arg(long)]
        dept: Option<String>,
    },
    /// Department cards, or one department's detail
    Departments {
        #[arg(long)]
        dept: Option<String>,
        /// Also list the department's students
        #[arg(long, requires = "dept")]
        roster: bool,
    },
    /// Faculty directory
    Faculty {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = filters::ALL_DEPARTMENTS)]
        department: String,
        /// Show one faculty member's profile
        #[arg(long)]
        id: Option<String>,
    },
    /// Validate a new faculty entry against the loaded directory
    AddFaculty {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        username: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long, default_value = "")]
        designation: String,
    },
    /// Student directory for one department
    Students {
        #[arg(long)]
        dept: String,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "All")]
        semester: String,
        #[arg(long)]
        at_risk: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Write the filtered students to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
        /// Show one student's profile
        #[arg(long)]
        profile: Option<String>,
    },
    /// Quick student lookup across departments
    Search {
        #[arg(long)]
        query: String,
    },
    /// CIE schedule by department
    Cie {
        #[arg(long)]
        dept: Option<String>,
        /// Only scheduled exams from today on
        #[arg(long, conflicts_with = "dept")]
        upcoming: bool,
    },
    /// Circulars and notifications
    #[command(group(
        ArgGroup::new("action")
            .args(["delete", "read", "clear"])
            .multiple(false)
    ))]
    Notifications {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        delete: Option<String>,
        #[arg(long)]
        read: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Generated reports
    Reports {
        #[arg(long)]
        download: Option<String>,
    },
    /// Open grievances
    Grievances {
        #[arg(long)]
        id: Option<String>,
    },
    /// Broadcast a notification
    Broadcast {
        #[arg(long)]
        sender: String,
        #[arg(long)]
        message: String,
        #[arg(long, default_value = DEFAULT_BROADCAST_ROLE)]
        role: String,
    },
    /// Write a markdown institute summary
    Report {
        #[arg(long, default_value = "principal-report.md")]
        out: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("principal_dashboard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn warn_on_toast(state: &DashboardState) {
    if let Some(toast) = &state.toast {
        eprintln!("warning: {}", toast.message);
    }
}

async fn load_state(client: &DashboardClient<HttpTransport>) -> DashboardState {
    let mut state = DashboardState::default();
    state.load(client).await;
    warn_on_toast(&state);
    state
}

fn print_overview(overview: &OverviewView) {
    println!(
        "{} students, {} faculty",
        overview.stats.total_students, overview.stats.total_faculty
    );
    println!(
        "CIE: {} conducted, {} pending, {} graded",
        overview.cie_stats.conducted, overview.cie_stats.pending, overview.cie_stats.graded
    );
    let analytics = &overview.faculty_analytics;
    println!(
        "Faculty: avg score {:.1}, pass rate {:.1}%, {} evaluated, {} pending",
        analytics.avg_score, analytics.pass_rate, analytics.evaluated, analytics.pending
    );
    println!(
        "{} upcoming dates, {} pending approvals",
        overview.dates.len(),
        overview.approvals.len()
    );

    if !overview.trends.labels.is_empty() {
        let points: Vec<String> = overview
            .trends
            .labels
            .iter()
            .zip(&overview.trends.data)
            .map(|(label, value)| format!("{label} {value:.1}"))
            .collect();
        println!("Trend: {}", points.join(", "));
    }

    println!("Department confidence:");
    for row in overview.confidence_rows() {
        println!("- {}: {} ({:?})", row.department, row.score, row.tier);
    }

    let focus = overview.focus_list();
    if focus.is_empty() {
        println!("All departments on track.");
    } else {
        println!("Focus required:");
        for score in focus {
            println!(
                "- {} performance {} ({})",
                score.department,
                score.performance_label(),
                score.punctuality.label()
            );
        }
    }

    if !overview.low_performers.is_empty() {
        println!("Low performers:");
        for student in &overview.low_performers {
            println!(
                "- {} ({}, {}) {} in {}",
                student.name,
                student.reg_no,
                student.department,
                student.marks,
                student.subject_code
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv()?;
    init_tracing();

    let cli = Cli::parse();
    let config = Config::new(&cli.api_url, cli.token.as_deref())
        .context("invalid dashboard configuration")?;
    let mut client =
        DashboardClient::new(HttpTransport::new(config.api_url.clone()), config.token.clone());

    match cli.command {
        Commands::Login { username, password } => {
            let login = client
                .login(&username, &password)
                .await
                .context("login failed")?;
            client.set_token(login.token.clone());
            if let Some(token) = login.token {
                println!("{token}");
            }

            let mut state = DashboardState::default();
            state.reload(&client).await;
            warn_on_toast(&state);
        }
        Commands::Overview => {
            let payload = client
                .dashboard(ErrorPolicy::Surface)
                .await
                .context("failed to load dashboard")?;
            print_overview(&OverviewView::from_payload(&payload));
        }
        Commands::Compliance { filter, dept } => {
            let payload = client
                .dashboard(ErrorPolicy::Surface)
                .await
                .context("failed to load dashboard")?;
            let mut view = sections::compliance::ComplianceView::new(payload.submissions);
            view.set_filter(filter);

            if let Some(dept) = dept {
                view.view_details(&dept)
                    .with_context(|| format!("no submission for `{dept}`"))?;
                if let Some(record) = view.modal() {
                    println!("{} (HOD {})", record.department_id, record.hod);
                    println!(
                        "Status {}, {}, {} days late",
                        record.status.label(),
                        record.punctuality.label(),
                        record.delay_days
                    );
                    println!(
                        "Submitted {}, {:.0}% complete{}",
                        record.submitted_on.as_deref().unwrap_or(normalize::PLACEHOLDER),
                        record.completion,
                        if record.high_priority { ", high priority" } else { "" }
                    );
                    if !record.remarks.is_empty() {
                        println!("Remarks: {}", record.remarks);
                    }
                }
                return Ok(());
            }

            let summary = view.summary();
            println!(
                "{} submissions: {} approved, {} pending, {} delayed",
                summary.total, summary.approved, summary.pending, summary.delayed
            );
            for record in view.rows() {
                println!(
                    "- {} {} {} {} {:.0}% ({:?})",
                    record.department_id,
                    record.hod,
                    record.status.label(),
                    record.punctuality.label(),
                    record.completion,
                    sections::compliance::ComplianceView::completion_color(record)
                );
            }
        }
        Commands::Departments { dept, roster } => {
            let state = load_state(&client).await;
            let mut view = state.departments();

            match dept {
                None => {
                    sections::departments::load_card_stats(&mut view, &client).await;
                    for card in view.cards() {
                        let stats = card.stats.ready().cloned().unwrap_or_default();
                        println!(
                            "- {} ({}) HOD {}: {} students, {} faculty, {:.1}% pass",
                            card.summary.name,
                            card.summary.id,
                            card.summary.hod,
                            stats.student_count,
                            stats.faculty_count,
                            stats.pass_percentage
                        );
                    }
                }
                Some(dept) => {
                    let ticket = view
                        .select(&dept, state.faculty_list())
                        .with_context(|| format!("unknown department `{dept}`"))?;
                    let (ticket, stats) =
                        sections::departments::fetch_stats(&client, ticket).await;
                    view.apply_stats(&ticket, stats);

                    if roster {
                        if let Some(ticket) = view.open_roster() {
                            let (ticket, students) =
                                sections::departments::fetch_roster(&client, ticket).await;
                            view.apply_roster(&ticket, students);
                        }
                    }

                    if let Some(detail) = view.detail() {
                        println!("{} (HOD {})", detail.department.name, detail.department.hod);
                        if let Loadable::Ready(stats) = &detail.stats {
                            println!(
                                "{} students, {} at risk, {:.1}% pass",
                                stats.student_count, stats.at_risk_count, stats.pass_percentage
                            );
                        }
                        for faculty in &detail.faculty {
                            println!("- {} ({})", faculty.name, faculty.designation);
                        }
                        if let Some(Loadable::Ready(students)) = &detail.roster {
                            println!("Students:");
                            for student in students {
                                println!("- {} {}", student.reg_no, student.name);
                            }
                        }
                    }
                    view.close_roster();
                }
            }
        }
        Commands::Faculty {
            query,
            department,
            id,
        } => {
            let faculty = client
                .faculty(ErrorPolicy::Surface)
                .await
                .context("failed to load faculty")?;
            let mut view = sections::faculty::FacultyDirectoryView::new(faculty);

            if let Some(id) = id {
                let record = view
                    .open(&id)
                    .with_context(|| format!("unknown faculty `{id}`"))?;
                println!("{} ({})", record.name, record.id);
                println!("{}, {}", record.designation, record.department);
                println!("Email: {}", record.email.as_deref().unwrap_or(normalize::PLACEHOLDER));
                println!("Subjects: {}", record.subjects.join(", "));
                return Ok(());
            }

            view.set_query(query);
            view.set_department(DepartmentFilter::parse(&department));
            println!("Departments: {}", view.department_options().join(", "));
            for faculty in view.rows() {
                println!(
                    "- {} {} ({}, {}) {}",
                    faculty.id,
                    faculty.name,
                    faculty.department,
                    faculty.designation,
                    faculty.status
                );
            }
        }
        Commands::AddFaculty {
            full_name,
            username,
            email,
            department,
            designation,
        } => {
            let mut state = load_state(&client).await;
            state.open_modal(ActiveModal::FacultyAdd(FacultyDraft {
                full_name,
                username,
                email,
                department,
                designation,
            }));
            let added = state.submit_faculty();
            if let Some(toast) = &state.toast {
                println!("{}", toast.message);
            }
            if !added {
                anyhow::bail!("faculty entry rejected");
            }
            println!("{} faculty in directory.", state.faculty_directory().len());
        }
        Commands::Students {
            dept,
            search,
            semester,
            at_risk,
            page,
            export,
            profile,
        } => {
            let state = load_state(&client).await;
            let mut view = state.student_directory();
            let ticket = view
                .select_department(&dept)
                .with_context(|| format!("unknown department `{dept}`"))?;
            let (ticket, students) = sections::directory::fetch_students(&client, ticket).await;
            view.apply_students(&ticket, students);

            if let Some(reg_no) = profile {
                view.open_profile(&reg_no);
                let student = view
                    .profile()
                    .with_context(|| format!("no student `{reg_no}` in {dept}"))?;
                println!("{} ({})", student.name, student.reg_no);
                println!("Semester {}, section {}", student.semester, student.section);
                println!(
                    "CIE 1 {:.1}, CIE 2 {:.1}, progress {:.0}%",
                    student.cie1,
                    student.cie2,
                    metrics::cie_progress(student)
                );
                println!("Mentoring {}", if student.mentoring_done { "done" } else { "pending" });
                return Ok(());
            }

            view.set_query(StudentQuery {
                search,
                semester: SemesterFilter::parse(&semester),
                at_risk_only: at_risk,
            });

            if let Some(path) = export {
                let file = File::create(&path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let filtered = view.filtered();
                report::write_students_csv(file, &filtered)?;
                println!("Exported {} students to {}.", filtered.len(), path.display());
                return Ok(());
            }

            view.set_page(page);
            println!("Page {} of {}", view.page(), view.page_count());
            for student in view.page_rows() {
                println!(
                    "- {} {} sem {} sec {} CIE {:.1}{}",
                    student.reg_no,
                    student.name,
                    student.semester,
                    student.section,
                    metrics::cie_total(student),
                    if metrics::student_at_risk(student) { " at risk" } else { "" }
                );
            }
        }
        Commands::Search { query } => {
            let state = load_state(&client).await;
            let ids: Vec<String> = state
                .department_summaries()
                .into_iter()
                .map(|department| department.id)
                .collect();
            let rosters = futures::future::join_all(
                ids.iter()
                    .map(|id| client.department_students(id, ErrorPolicy::Fallback)),
            )
            .await;
            let students: Vec<_> = rosters
                .into_iter()
                .flat_map(Result::unwrap_or_default)
                .collect();

            let mut sentinel = StudentSentinel::default();
            sentinel.search(&students, &query);
            match sentinel.panel() {
                Some(results) => {
                    for student in results {
                        println!("- {} {} sem {}", student.reg_no, student.name, student.semester);
                    }
                }
                None if sentinel.is_visible() => println!("No students match `{query}`."),
                None => println!("Type at least two characters to search."),
            }
        }
        Commands::Cie { dept, upcoming } => {
            let state = load_state(&client).await;
            let mut view = state.cie_schedule();

            let entries = if upcoming {
                view.upcoming(chrono::Local::now().date_naive())
            } else if let Some(dept) = &dept {
                if !view.select(dept) {
                    anyhow::bail!("no CIE schedule for `{dept}`");
                }
                view.selected_entries()
            } else {
                for bucket in view.buckets() {
                    println!(
                        "- {}: {} exams ({} scheduled, {} completed)",
                        bucket.department, bucket.total, bucket.scheduled, bucket.completed
                    );
                }
                return Ok(());
            };

            for entry in entries {
                let date = entry
                    .date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| normalize::PLACEHOLDER.to_string());
                println!(
                    "- CIE {} {} ({}) on {} {} room {} [{}]",
                    entry.cie_number,
                    entry.subject.name,
                    entry.subject.code,
                    date,
                    entry.start_time,
                    entry.room,
                    entry.status.label()
                );
            }
        }
        Commands::Notifications {
            category,
            delete,
            read,
            clear,
        } => {
            let circulars = client
                .circulars(ErrorPolicy::Surface)
                .await
                .context("failed to load notifications")?;
            let mut view = sections::notifications::NotificationsView::new(circulars);

            if let Some(id) = delete {
                let removed = sections::notifications::delete(&mut view, &client, &id)
                    .await
                    .with_context(|| format!("failed to delete notification {id}"))?;
                if !removed {
                    anyhow::bail!("unknown notification `{id}`");
                }
                println!("Deleted notification {id}.");
            } else if let Some(id) = read {
                sections::notifications::mark_read(&mut view, &client, &id)
                    .await
                    .with_context(|| format!("failed to mark notification {id} read"))?;
                println!("Marked notification {id} read.");
            } else if clear {
                let count = sections::notifications::clear(&mut view, &client)
                    .await
                    .context("failed to clear notifications")?;
                println!("Cleared {count} notifications.");
            }

            view.set_category(category);
            if view.is_empty() {
                println!("No notifications.");
                return Ok(());
            }
            println!("Categories: {}", view.categories().join(", "));
            println!("{} unread, {} warnings", view.unread_count(), view.warning_count());
            for item in view.rows() {
                println!(
                    "- [{}] {}{}",
                    item.id,
                    item.message,
                    if item.read { "" } else { " (unread)" }
                );
            }
        }
        Commands::Reports { download } => {
            let reports = client
                .reports(ErrorPolicy::Surface)
                .await
                .context("failed to load reports")?;
            let view = sections::reports::ReportsView::new(reports);

            if let Some(id) = download {
                view.download(&id, |report| {
                    println!("Downloading {} ({}, {})", report.name, report.kind, report.size);
                })
                .with_context(|| format!("unknown report `{id}`"))?;
                return Ok(());
            }

            for report in view.rows() {
                println!(
                    "- {} {} ({}, {}) {}",
                    report.id, report.name, report.kind, report.size, report.generated_on
                );
            }
        }
        Commands::Grievances { id } => {
            let grievances = client
                .grievances(ErrorPolicy::Surface)
                .await
                .context("failed to load grievances")?;

            if let Some(id) = id {
                let mut state = DashboardState {
                    grievances: Some(grievances),
                    ..DashboardState::default()
                };
                if !state.open_grievance(&id) {
                    anyhow::bail!("unknown grievance `{id}`");
                }
                if let ActiveModal::GrievanceDetail(grievance) = &state.modal {
                    println!("{}: {}", grievance.id, grievance.subject);
                    println!(
                        "Raised by {} on {}, {:?} priority, {}",
                        grievance.raised_by, grievance.date, grievance.priority, grievance.status
                    );
                }
                state.close_modal();
                return Ok(());
            }

            let view = sections::grievances::GrievancesView::new(grievances);
            let counts = view.priority_counts();
            println!("{} high, {} medium, {} low", counts.high, counts.medium, counts.low);
            for grievance in view.rows() {
                println!(
                    "- {} {} by {} [{}] {}",
                    grievance.id,
                    grievance.subject,
                    grievance.raised_by,
                    grievance.status,
                    grievance.date
                );
            }
        }
        Commands::Broadcast {
            sender,
            message,
            role,
        } => {
            let mut state = DashboardState::default();
            state.open_modal(ActiveModal::Broadcast(BroadcastDraft {
                message,
                target_role: role,
            }));
            let sent = state.submit_broadcast(&client, &sender).await;
            if let Some(toast) = &state.toast {
                println!("{}", toast.message);
            }
            if !sent {
                anyhow::bail!("broadcast was not sent");
            }
        }
        Commands::Report { out } => {
            let payload = client
                .dashboard(ErrorPolicy::Surface)
                .await
                .context("failed to load dashboard")?;
            let report = report::build_report(&payload);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
