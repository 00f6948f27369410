//! Answer generation: remote grounded completion with a local fallback.
//!
//! Two interchangeable strategies turn a [`QueryContext`] into a
//! human-readable answer. The remote strategy calls an OpenAI-compatible
//! chat-completions endpoint with the serialized context embedded in the
//! prompt; the local strategy renders a deterministic template. The
//! orchestrating [`ResponseGenerator`] tries them in order and never
//! fails: every remote failure mode degrades silently to the template.

use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use rota_core::config::RemoteConfig;

use crate::context::QueryContext;

/// Shown when no strategy produced an answer; also the template for
/// context shapes the renderer has no specific text for.
const GENERIC_HELP: &str = "I've retrieved the relevant data. Please ask a more specific \
     question about employees, attendance, leaves, or recruitment.";

const SYSTEM_PROMPT: &str = "You are an HR assistant for a hospital staffing system. \
You help HR managers and administrators analyze workforce data.

IMPORTANT RULES:
1. ONLY use the data provided in the context. Never make up or guess information.
2. If the data doesn't contain the answer, say \"I don't have that information in the current data.\"
3. Be concise and professional.
4. Format numbers and lists clearly.
5. If asked about something not in the context, explain what data IS available.
6. Always mention the date when discussing attendance or leave data.

You are speaking to an HR professional who needs accurate, actionable insights.";

// =============================================================================
// Errors
// =============================================================================

/// Failure modes of a single generation strategy.
///
/// All of them are caught by [`ResponseGenerator::generate`]; none ever
/// reaches a caller.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("context serialization failed: {0}")]
    Serialize(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("remote service returned HTTP {0}: {1}")]
    Status(u16, String),
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
    #[error("remote service returned an empty completion")]
    EmptyCompletion,
}

// =============================================================================
// Strategy trait
// =============================================================================

/// One way of turning a context into an answer.
#[async_trait]
pub trait GenerateStrategy: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Produce an answer grounded in `context`.
    async fn generate(&self, query: &str, context: &QueryContext)
        -> Result<String, GenerationError>;
}

// =============================================================================
// Remote strategy
// =============================================================================

/// OpenAI-compatible chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI-compatible chat completion response.
#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageBody,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    content: Option<String>,
}

/// Calls a remote text-generation endpoint with the context embedded in
/// the prompt and returns the completion verbatim.
pub struct RemoteGenerator {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
}

impl RemoteGenerator {
    /// Build a generator from config. Returns `None` when no credential
    /// is configured, in which case the remote strategy is never tried.
    pub fn from_config(config: &RemoteConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Some(Self {
            client,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl GenerateStrategy for RemoteGenerator {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(
        &self,
        query: &str,
        context: &QueryContext,
    ) -> Result<String, GenerationError> {
        let context_json = serde_json::to_string_pretty(context)
            .map_err(|e| GenerationError::Serialize(e.to_string()))?;

        let user_message = format!(
            "User Question: {query}\n\n\
             HR Database Context (this is the ONLY data you can use):\n{context_json}\n\n\
             Please provide a helpful, accurate response based ONLY on the above data."
        );

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_message,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status(status, body));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyCompletion);
        }
        Ok(text)
    }
}

// =============================================================================
// Local strategy
// =============================================================================

/// Deterministic template renderer, one branch per context variant.
///
/// Pure: the same context always renders the same text.
pub struct TemplateRenderer;

impl TemplateRenderer {
    /// Render the fallback answer for a context.
    pub fn render(&self, context: &QueryContext) -> String {
        match context {
            QueryContext::LeaveToday {
                date,
                total_on_leave,
                employees,
            } => {
                if *total_on_leave == 0 {
                    return format!("No employees are on approved leave today ({date}).");
                }
                let mut out = format!("**{total_on_leave} employee(s) on leave today** ({date}):\n\n");
                for emp in employees.iter().take(10) {
                    let _ = writeln!(
                        out,
                        "- **{}** ({}) - {}",
                        emp.employee_name, emp.department, emp.leave_type
                    );
                }
                out
            }

            QueryContext::AbsentToday {
                date,
                marked_absent,
                absent_employees,
                no_attendance_record,
                ..
            } => {
                let mut out = format!("**Absence Report for {date}:**\n\n");
                let _ = writeln!(out, "- Marked Absent: **{marked_absent}**");
                let _ = writeln!(out, "- No Attendance Record: **{no_attendance_record}**\n");
                if !absent_employees.is_empty() {
                    out.push_str("**Absent Employees:**\n");
                    for emp in absent_employees.iter().take(10) {
                        let _ = writeln!(out, "- {} ({})", emp.employee_name, emp.department);
                    }
                }
                out
            }

            QueryContext::AttendanceSummary {
                date,
                total_active_employees,
                present,
                absent,
                late,
                half_day,
                on_leave,
                not_marked,
                ..
            } => {
                let mut out = format!("**Attendance Summary for {date}:**\n\n");
                let _ = writeln!(out, "- Total Active Employees: **{total_active_employees}**");
                let _ = writeln!(out, "- Present: **{present}**");
                let _ = writeln!(out, "- Absent: **{absent}**");
                let _ = writeln!(out, "- Late: **{late}**");
                let _ = writeln!(out, "- Half Day: **{half_day}**");
                let _ = writeln!(out, "- On Leave: **{on_leave}**");
                let _ = writeln!(out, "- Not Marked: **{not_marked}**");
                out
            }

            QueryContext::DepartmentAttendance {
                department,
                date,
                total_staff,
                present,
                absent,
                late,
                on_leave,
            } => {
                let mut out = format!("**{department} Attendance for {date}:**\n\n");
                let _ = writeln!(out, "- Total Staff: **{total_staff}**");
                let _ = writeln!(out, "- Present: **{present}**");
                let _ = writeln!(out, "- Absent: **{absent}**");
                let _ = writeln!(out, "- Late: **{late}**");
                let _ = writeln!(out, "- On Leave: **{on_leave}**");
                out
            }

            QueryContext::AllDepartmentsAttendance { date, departments } => {
                let mut out = format!("**Attendance by Department ({date}):**\n\n");
                for dept in departments {
                    let _ = writeln!(
                        out,
                        "- **{}**: {} present, {} absent of {} staff",
                        dept.department, dept.present, dept.absent, dept.total_staff
                    );
                }
                out
            }

            QueryContext::EmployeeCount {
                total_employees,
                active_employees,
                on_leave,
                by_department,
                ..
            } => {
                let mut out = String::from("**Employee Statistics:**\n\n");
                let _ = writeln!(out, "- Total Employees: **{total_employees}**");
                let _ = writeln!(out, "- Active: **{active_employees}**");
                let _ = writeln!(out, "- On Leave: **{on_leave}**\n");
                if !by_department.is_empty() {
                    out.push_str("**By Department:**\n");
                    for dept in by_department.iter().take(5) {
                        let _ = writeln!(out, "- {}: {}", dept.department, dept.count);
                    }
                }
                out
            }

            QueryContext::DepartmentInfo {
                total_departments,
                departments,
            } => {
                let mut out = format!("**{total_departments} Active Departments:**\n\n");
                for dept in departments {
                    let _ = writeln!(
                        out,
                        "- **{}** ({}): {} staff, Head: {}",
                        dept.name, dept.code, dept.staff_count, dept.head
                    );
                }
                out
            }

            QueryContext::JobApplications {
                total_applications,
                by_status,
                ..
            } => {
                let mut out = String::from("**Job Applications Summary:**\n\n");
                let _ = writeln!(out, "- Total Applications: **{total_applications}**\n");
                if !by_status.is_empty() {
                    out.push_str("**By Status:**\n");
                    for status in by_status {
                        let _ = writeln!(out, "- {}: {}", title_case(&status.status), status.count);
                    }
                }
                out
            }

            QueryContext::OpenPositions {
                total_open_jobs,
                jobs,
            } => {
                let mut out = format!("**{total_open_jobs} Open Positions:**\n\n");
                for job in jobs {
                    let _ = writeln!(
                        out,
                        "- **{}** ({}): {} vacancies, {} applications",
                        job.title, job.department, job.vacancies, job.applications
                    );
                }
                out
            }

            QueryContext::LeaveRequests {
                total_pending,
                pending_requests,
            } => {
                let mut out = format!("**{total_pending} Pending Leave Requests:**\n\n");
                for req in pending_requests {
                    let _ = writeln!(
                        out,
                        "- **{}** ({}): {} from {} to {} ({} days)",
                        req.employee,
                        req.department,
                        req.leave_type,
                        req.start_date,
                        req.end_date,
                        req.days
                    );
                }
                out
            }

            QueryContext::EmployeesByDepartment {
                department,
                total_employees,
                employees,
            } => {
                let mut out = format!("**{total_employees} Employees in {department}:**\n\n");
                for emp in employees {
                    let _ = writeln!(
                        out,
                        "- **{}** ({}): {}, {}",
                        emp.name, emp.employee_id, emp.designation, emp.category
                    );
                }
                out
            }

            QueryContext::DepartmentNotFound {
                available_departments,
                ..
            } => {
                if available_departments.is_empty() {
                    return "I couldn't find that department, and there are no active \
                            departments on record."
                        .to_string();
                }
                format!(
                    "I couldn't find that department. Available departments: {}.",
                    available_departments.join(", ")
                )
            }

            QueryContext::NursingStaff {
                total_nurses,
                today_attendance,
                ..
            } => {
                let mut out = String::from("**Nursing Staff Summary:**\n\n");
                let _ = writeln!(out, "- Total Nurses: **{total_nurses}**");
                let _ = writeln!(out, "- Present Today: **{}**", today_attendance.present);
                let _ = writeln!(out, "- Absent Today: **{}**", today_attendance.absent);
                out
            }

            QueryContext::MedicalStaff {
                total_doctors,
                doctors,
            } => {
                let mut out = String::from("**Medical Staff Summary:**\n\n");
                let _ = writeln!(out, "- Total Doctors: **{total_doctors}**\n");
                for doc in doctors.iter().take(10) {
                    if doc.specialization.is_empty() {
                        let _ = writeln!(out, "- **{}** ({})", doc.name, doc.department);
                    } else {
                        let _ = writeln!(
                            out,
                            "- **{}** ({}) - {}",
                            doc.name, doc.department, doc.specialization
                        );
                    }
                }
                out
            }

            QueryContext::GeneralSummary {
                date,
                employees,
                departments,
                attendance_today,
                leave_requests,
                recruitment,
            } => {
                let mut out = format!("**HR Dashboard Summary ({date}):**\n\n");

                let _ = writeln!(out, "**Departments ({}):**", departments.total);
                for dept in &departments.list {
                    let _ = writeln!(
                        out,
                        "- **{}** ({}): {} staff, Head: {}, Location: {}",
                        dept.name, dept.code, dept.staff_count, dept.head, dept.location
                    );
                }
                out.push('\n');

                let _ = writeln!(
                    out,
                    "**Employees:** {} active / {} total",
                    employees.active, employees.total
                );
                if !employees.by_department.is_empty() {
                    out.push_str("**By Department:**\n");
                    for dept in employees.by_department.iter().take(5) {
                        let _ = writeln!(out, "  - {}: {}", dept.department, dept.count);
                    }
                }
                out.push('\n');

                let _ = writeln!(
                    out,
                    "**Today's Attendance:** {} present, {} absent, {} late\n",
                    attendance_today.present, attendance_today.absent, attendance_today.late
                );

                let _ = writeln!(
                    out,
                    "**Leave:** {} pending requests, {} on leave today\n",
                    leave_requests.pending, leave_requests.on_leave_today
                );

                let _ = writeln!(
                    out,
                    "**Recruitment:** {} open positions, {} pending applications",
                    recruitment.open_positions, recruitment.pending_applications
                );
                out
            }
        }
    }
}

#[async_trait]
impl GenerateStrategy for TemplateRenderer {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn generate(
        &self,
        _query: &str,
        context: &QueryContext,
    ) -> Result<String, GenerationError> {
        Ok(self.render(context))
    }
}

/// "under_review" -> "Under Review".
fn title_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// ResponseGenerator
// =============================================================================

/// Tries generation strategies in priority order until one succeeds.
///
/// The template renderer is always last and cannot fail, so `generate`
/// is total: it never panics and never returns an empty string.
pub struct ResponseGenerator {
    strategies: Vec<Box<dyn GenerateStrategy>>,
}

impl ResponseGenerator {
    /// Build the strategy chain from remote-service config.
    pub fn new(remote: &RemoteConfig) -> Self {
        let mut strategies: Vec<Box<dyn GenerateStrategy>> = Vec::new();
        match RemoteGenerator::from_config(remote) {
            Some(generator) => {
                debug!(model = %remote.model, "Remote generation enabled");
                strategies.push(Box::new(generator));
            }
            None => {
                debug!("No remote credential configured; answers come from the local renderer");
            }
        }
        strategies.push(Box::new(TemplateRenderer));
        Self { strategies }
    }

    /// A generator that only uses the local template renderer.
    pub fn local_only() -> Self {
        Self {
            strategies: vec![Box::new(TemplateRenderer)],
        }
    }

    /// Produce an answer. Infallible; blank output from a strategy counts
    /// as a failure and falls through to the next one.
    pub async fn generate(&self, query: &str, context: &QueryContext) -> String {
        for strategy in &self.strategies {
            match strategy.generate(query, context).await {
                Ok(text) if !text.trim().is_empty() => return text,
                Ok(_) => {
                    warn!(
                        strategy = strategy.name(),
                        "strategy returned a blank answer; trying next"
                    );
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "generation strategy failed; trying next"
                    );
                }
            }
        }
        GENERIC_HELP.to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{
        AbsentEntry, AttendanceOverview, DepartmentAttendanceEntry, DepartmentOverview,
        EmployeeOverview, LeaveEntry, LeaveOverview, RecruitmentOverview, RosterAttendance,
    };
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn leave_context() -> QueryContext {
        QueryContext::LeaveToday {
            date: date(),
            total_on_leave: 2,
            employees: vec![
                LeaveEntry {
                    employee_name: "Asha Nair".to_string(),
                    employee_id: "EMP-0001".to_string(),
                    department: "Cardiology".to_string(),
                    leave_type: "Sick Leave".to_string(),
                    start_date: date(),
                    end_date: date(),
                },
                LeaveEntry {
                    employee_name: "Ravi Menon".to_string(),
                    employee_id: "EMP-0002".to_string(),
                    department: "N/A".to_string(),
                    leave_type: "Casual Leave".to_string(),
                    start_date: date(),
                    end_date: date(),
                },
            ],
        }
    }

    fn unreachable_remote() -> rota_core::config::RemoteConfig {
        rota_core::config::RemoteConfig {
            // Port 9 is the discard service; nothing listens there.
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "test-model".to_string(),
            api_key: Some("test-key".to_string()),
            temperature: 0.3,
            max_tokens: 64,
            timeout_secs: 2,
        }
    }

    // ---- Template renderer ----

    #[test]
    fn test_leave_today_template_lists_employees() {
        let text = TemplateRenderer.render(&leave_context());
        assert!(text.contains("2 employee(s) on leave today"));
        assert!(text.contains("Asha Nair"));
        assert!(text.contains("Cardiology"));
        assert!(text.contains("Sick Leave"));
        assert!(text.contains("Ravi Menon"));
        assert!(text.contains("N/A"));
        assert!(text.contains("2026-03-02"));
    }

    #[test]
    fn test_leave_today_template_zero_case() {
        let ctx = QueryContext::LeaveToday {
            date: date(),
            total_on_leave: 0,
            employees: vec![],
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("No employees are on approved leave today"));
        assert!(text.contains("2026-03-02"));
    }

    #[test]
    fn test_leave_today_template_caps_listing_at_ten() {
        let employees: Vec<LeaveEntry> = (0..15)
            .map(|n| LeaveEntry {
                employee_name: format!("Person {n:02}"),
                employee_id: format!("EMP-{n:04}"),
                department: "Ward".to_string(),
                leave_type: "Earned Leave".to_string(),
                start_date: date(),
                end_date: date(),
            })
            .collect();
        let ctx = QueryContext::LeaveToday {
            date: date(),
            total_on_leave: 15,
            employees,
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("Person 09"));
        assert!(!text.contains("Person 10"));
        // The uncapped count still shows.
        assert!(text.contains("15 employee(s)"));
    }

    #[test]
    fn test_absent_today_template() {
        let ctx = QueryContext::AbsentToday {
            date: date(),
            marked_absent: 1,
            absent_employees: vec![AbsentEntry {
                employee_name: "Asha Nair".to_string(),
                employee_id: "EMP-0001".to_string(),
                department: "Cardiology".to_string(),
                designation: "Nurse".to_string(),
            }],
            no_attendance_record: 3,
            employees_without_record: vec![],
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("Absence Report for 2026-03-02"));
        assert!(text.contains("Marked Absent: **1**"));
        assert!(text.contains("No Attendance Record: **3**"));
        assert!(text.contains("Asha Nair"));
    }

    #[test]
    fn test_attendance_summary_template() {
        let ctx = QueryContext::AttendanceSummary {
            date: date(),
            total_active_employees: 10,
            total_attendance_marked: 8,
            present: 6,
            absent: 1,
            late: 1,
            half_day: 0,
            on_leave: 0,
            not_marked: 2,
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("Total Active Employees: **10**"));
        assert!(text.contains("Present: **6**"));
        assert!(text.contains("Not Marked: **2**"));
    }

    #[test]
    fn test_department_not_found_template_names_alternatives() {
        let ctx = QueryContext::DepartmentNotFound {
            error: "Department not found in query".to_string(),
            available_departments: vec!["Cardiology".to_string(), "Radiology".to_string()],
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("couldn't find that department"));
        assert!(text.contains("Cardiology, Radiology"));
    }

    #[test]
    fn test_all_departments_template() {
        let ctx = QueryContext::AllDepartmentsAttendance {
            date: date(),
            departments: vec![DepartmentAttendanceEntry {
                department: "Cardiology".to_string(),
                total_staff: 12,
                present: 10,
                absent: 2,
            }],
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("Attendance by Department"));
        assert!(text.contains("10 present, 2 absent of 12 staff"));
    }

    #[test]
    fn test_nursing_staff_template() {
        let ctx = QueryContext::NursingStaff {
            total_nurses: 30,
            nurses: vec![],
            today_attendance: RosterAttendance {
                present: 25,
                absent: 2,
                on_leave: 3,
            },
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("Total Nurses: **30**"));
        assert!(text.contains("Present Today: **25**"));
    }

    #[test]
    fn test_general_summary_template() {
        let ctx = QueryContext::GeneralSummary {
            date: date(),
            employees: EmployeeOverview {
                total: 100,
                active: 90,
                on_leave: 5,
                by_department: vec![],
                by_category: vec![],
            },
            departments: DepartmentOverview {
                total: 0,
                list: vec![],
            },
            attendance_today: AttendanceOverview {
                marked: 80,
                present: 70,
                absent: 5,
                late: 5,
                on_leave: 0,
            },
            leave_requests: LeaveOverview {
                pending: 4,
                approved: 10,
                rejected: 1,
                on_leave_today: 3,
            },
            recruitment: RecruitmentOverview {
                open_positions: 2,
                closed_positions: 7,
                total_applications: 40,
                pending_applications: 12,
                shortlisted: 6,
                rejected_applications: 9,
            },
        };
        let text = TemplateRenderer.render(&ctx);
        assert!(text.contains("HR Dashboard Summary (2026-03-02)"));
        assert!(text.contains("90 active / 100 total"));
        assert!(text.contains("70 present, 5 absent, 5 late"));
        assert!(text.contains("4 pending requests, 3 on leave today"));
        assert!(text.contains("2 open positions, 12 pending applications"));
    }

    #[test]
    fn test_every_variant_renders_non_empty() {
        let contexts = vec![
            leave_context(),
            QueryContext::AbsentToday {
                date: date(),
                marked_absent: 0,
                absent_employees: vec![],
                no_attendance_record: 0,
                employees_without_record: vec![],
            },
            QueryContext::DepartmentAttendance {
                department: "Cardiology".to_string(),
                date: date(),
                total_staff: 0,
                present: 0,
                absent: 0,
                late: 0,
                on_leave: 0,
            },
            QueryContext::EmployeeCount {
                total_employees: 0,
                active_employees: 0,
                on_leave: 0,
                by_category: vec![],
                by_department: vec![],
            },
            QueryContext::DepartmentInfo {
                total_departments: 0,
                departments: vec![],
            },
            QueryContext::JobApplications {
                total_applications: 0,
                by_status: vec![],
                recent_applications: vec![],
            },
            QueryContext::OpenPositions {
                total_open_jobs: 0,
                jobs: vec![],
            },
            QueryContext::LeaveRequests {
                total_pending: 0,
                pending_requests: vec![],
            },
            QueryContext::EmployeesByDepartment {
                department: "Cardiology".to_string(),
                total_employees: 0,
                employees: vec![],
            },
            QueryContext::DepartmentNotFound {
                error: String::new(),
                available_departments: vec![],
            },
            QueryContext::MedicalStaff {
                total_doctors: 0,
                doctors: vec![],
            },
        ];
        for ctx in contexts {
            let text = TemplateRenderer.render(&ctx);
            assert!(!text.trim().is_empty(), "blank render for {}", ctx.type_name());
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("under_review"), "Under Review");
        assert_eq!(title_case("submitted"), "Submitted");
        assert_eq!(title_case("interview_scheduled"), "Interview Scheduled");
    }

    // ---- Strategy orchestration ----

    #[tokio::test]
    async fn test_no_credential_uses_template() {
        let config = rota_core::config::RemoteConfig::default();
        assert!(config.api_key.is_none());
        let generator = ResponseGenerator::new(&config);

        let ctx = leave_context();
        let answer = generator.generate("who is on leave today", &ctx).await;
        assert_eq!(answer, TemplateRenderer.render(&ctx));
    }

    #[tokio::test]
    async fn test_unreachable_remote_falls_back_to_template() {
        let generator = ResponseGenerator::new(&unreachable_remote());

        let ctx = leave_context();
        let answer = generator.generate("who is on leave today", &ctx).await;
        assert!(!answer.is_empty());
        assert_eq!(answer, TemplateRenderer.render(&ctx));
    }

    #[tokio::test]
    async fn test_fallback_answer_is_stable_across_calls() {
        let generator = ResponseGenerator::new(&unreachable_remote());

        let ctx = leave_context();
        let first = generator.generate("who is on leave today", &ctx).await;
        let second = generator.generate("who is on leave today", &ctx).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_never_empty_for_any_variant() {
        let generator = ResponseGenerator::local_only();
        let ctx = QueryContext::EmployeeCount {
            total_employees: 0,
            active_employees: 0,
            on_leave: 0,
            by_category: vec![],
            by_department: vec![],
        };
        let answer = generator.generate("how many employees", &ctx).await;
        assert!(!answer.trim().is_empty());
    }

    // ---- Remote wire format ----

    #[test]
    fn test_chat_request_serializes_expected_shape() {
        let body = ChatRequest {
            model: "llama-3.1-8b-instant".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "instructions".to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: "question".to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: 1024,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llama-3.1-8b-instant");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 1024);
        assert!((json["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_chat_completion_parses_content() {
        let raw = r#"{"choices":[{"message":{"content":"Two employees are on leave."}}]}"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert_eq!(
            completion.choices[0].message.content.as_deref(),
            Some("Two employees are on leave.")
        );
    }

    #[test]
    fn test_remote_generator_requires_credential() {
        let config = rota_core::config::RemoteConfig::default();
        assert!(RemoteGenerator::from_config(&config).is_none());
        assert!(RemoteGenerator::from_config(&unreachable_remote()).is_some());
    }
}
