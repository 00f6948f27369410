//! Typed context payloads for answer generation.
//!
//! A [`QueryContext`] is the bounded snapshot of record-store data
//! retrieved for one query. It is a discriminated union keyed by a
//! `type` field; each variant carries exactly the fields its intent
//! needs, nothing more. The JSON serialization of a context is embedded
//! verbatim into the remote prompt, so the shapes here are a wire
//! format as much as an in-process type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Leaf entry types
// =============================================================================

/// One employee currently on approved leave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveEntry {
    pub employee_name: String,
    pub employee_id: String,
    /// Department name, or "N/A" when the employee has none.
    pub department: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One employee in an absence listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbsentEntry {
    pub employee_name: String,
    pub employee_id: String,
    pub department: String,
    pub designation: String,
}

/// Per-department attendance roll-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentAttendanceEntry {
    pub department: String,
    pub total_staff: i64,
    pub present: i64,
    pub absent: i64,
}

/// Headcount for one staff category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Headcount for one department.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

/// Full department card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDetail {
    pub name: String,
    pub code: String,
    pub location: String,
    /// Head's display name, or "Not Assigned".
    pub head: String,
    pub staff_count: i64,
    pub total_beds: i64,
}

/// Count of applications in one review status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// One recently submitted application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplicationEntry {
    pub applicant: String,
    pub job: String,
    pub status: String,
    pub applied_date: NaiveDate,
}

/// One open job posting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpenJobEntry {
    pub title: String,
    pub department: String,
    pub vacancies: i64,
    pub applications: i64,
    pub posted_date: NaiveDate,
}

/// One pending leave request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PendingLeaveEntry {
    pub employee: String,
    pub department: String,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: i64,
}

/// One employee in a department roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffEntry {
    pub name: String,
    pub employee_id: String,
    pub designation: String,
    pub category: String,
}

/// One nurse in the nursing roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NurseEntry {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub designation: String,
    pub shift: String,
}

/// One doctor in the medical roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoctorEntry {
    pub name: String,
    pub employee_id: String,
    pub department: String,
    pub designation: String,
    pub specialization: String,
}

/// Today's attendance restricted to one roster.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RosterAttendance {
    pub present: i64,
    pub absent: i64,
    pub on_leave: i64,
}

// ---- General summary sub-structures ----

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmployeeOverview {
    pub total: i64,
    pub active: i64,
    pub on_leave: i64,
    pub by_department: Vec<DepartmentCount>,
    pub by_category: Vec<CategoryCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepartmentOverview {
    pub total: i64,
    pub list: Vec<DepartmentDetail>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttendanceOverview {
    pub marked: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub on_leave: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveOverview {
    pub pending: i64,
    pub approved: i64,
    pub rejected: i64,
    pub on_leave_today: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecruitmentOverview {
    pub open_positions: i64,
    pub closed_positions: i64,
    pub total_applications: i64,
    pub pending_applications: i64,
    pub shortlisted: i64,
    pub rejected_applications: i64,
}

// =============================================================================
// QueryContext
// =============================================================================

/// The bounded, typed snapshot of retrieved data for one query.
///
/// Immutable once built; every list that could grow without bound in
/// production data is capped at retrieval time (the counts next to the
/// lists stay uncapped).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryContext {
    LeaveToday {
        date: NaiveDate,
        total_on_leave: i64,
        employees: Vec<LeaveEntry>,
    },
    AbsentToday {
        date: NaiveDate,
        marked_absent: i64,
        absent_employees: Vec<AbsentEntry>,
        no_attendance_record: i64,
        employees_without_record: Vec<AbsentEntry>,
    },
    AttendanceSummary {
        date: NaiveDate,
        total_active_employees: i64,
        total_attendance_marked: i64,
        present: i64,
        absent: i64,
        late: i64,
        half_day: i64,
        on_leave: i64,
        not_marked: i64,
    },
    DepartmentAttendance {
        department: String,
        date: NaiveDate,
        total_staff: i64,
        present: i64,
        absent: i64,
        late: i64,
        on_leave: i64,
    },
    AllDepartmentsAttendance {
        date: NaiveDate,
        departments: Vec<DepartmentAttendanceEntry>,
    },
    EmployeeCount {
        total_employees: i64,
        active_employees: i64,
        on_leave: i64,
        by_category: Vec<CategoryCount>,
        by_department: Vec<DepartmentCount>,
    },
    DepartmentInfo {
        total_departments: i64,
        departments: Vec<DepartmentDetail>,
    },
    JobApplications {
        total_applications: i64,
        by_status: Vec<StatusCount>,
        recent_applications: Vec<ApplicationEntry>,
    },
    OpenPositions {
        total_open_jobs: i64,
        jobs: Vec<OpenJobEntry>,
    },
    LeaveRequests {
        total_pending: i64,
        pending_requests: Vec<PendingLeaveEntry>,
    },
    EmployeesByDepartment {
        department: String,
        total_employees: i64,
        employees: Vec<StaffEntry>,
    },
    /// The explicit not-found payload: the query named no active
    /// department, so the valid alternatives are returned as data.
    DepartmentNotFound {
        error: String,
        available_departments: Vec<String>,
    },
    NursingStaff {
        total_nurses: i64,
        nurses: Vec<NurseEntry>,
        today_attendance: RosterAttendance,
    },
    MedicalStaff {
        total_doctors: i64,
        doctors: Vec<DoctorEntry>,
    },
    GeneralSummary {
        date: NaiveDate,
        employees: EmployeeOverview,
        departments: DepartmentOverview,
        attendance_today: AttendanceOverview,
        leave_requests: LeaveOverview,
        recruitment: RecruitmentOverview,
    },
}

impl QueryContext {
    /// The `type` tag this variant serializes under.
    pub fn type_name(&self) -> &'static str {
        match self {
            QueryContext::LeaveToday { .. } => "leave_today",
            QueryContext::AbsentToday { .. } => "absent_today",
            QueryContext::AttendanceSummary { .. } => "attendance_summary",
            QueryContext::DepartmentAttendance { .. } => "department_attendance",
            QueryContext::AllDepartmentsAttendance { .. } => "all_departments_attendance",
            QueryContext::EmployeeCount { .. } => "employee_count",
            QueryContext::DepartmentInfo { .. } => "department_info",
            QueryContext::JobApplications { .. } => "job_applications",
            QueryContext::OpenPositions { .. } => "open_positions",
            QueryContext::LeaveRequests { .. } => "leave_requests",
            QueryContext::EmployeesByDepartment { .. } => "employees_by_department",
            QueryContext::DepartmentNotFound { .. } => "department_not_found",
            QueryContext::NursingStaff { .. } => "nursing_staff",
            QueryContext::MedicalStaff { .. } => "medical_staff",
            QueryContext::GeneralSummary { .. } => "general_summary",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
