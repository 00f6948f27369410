use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Staffing category an employee belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffCategory {
    Medical,
    Nursing,
    Paramedical,
    AdminSupport,
}

impl StaffCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffCategory::Medical => "medical",
            StaffCategory::Nursing => "nursing",
            StaffCategory::Paramedical => "paramedical",
            StaffCategory::AdminSupport => "admin_support",
        }
    }

    /// Human-readable label used in reports and answers.
    pub fn label(&self) -> &'static str {
        match self {
            StaffCategory::Medical => "Medical Staff",
            StaffCategory::Nursing => "Nursing Staff",
            StaffCategory::Paramedical => "Paramedical & Technical",
            StaffCategory::AdminSupport => "Admin & Support",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "medical" => Some(StaffCategory::Medical),
            "nursing" => Some(StaffCategory::Nursing),
            "paramedical" => Some(StaffCategory::Paramedical),
            "admin_support" => Some(StaffCategory::AdminSupport),
            _ => None,
        }
    }
}

/// Working shift assigned to an employee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
    #[default]
    General,
    Rotating,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Night => "night",
            Shift::General => "general",
            Shift::Rotating => "rotating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning (6 AM - 2 PM)",
            Shift::Afternoon => "Afternoon (2 PM - 10 PM)",
            Shift::Night => "Night (10 PM - 6 AM)",
            Shift::General => "General (9 AM - 5 PM)",
            Shift::Rotating => "Rotating Shifts",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Shift::Morning),
            "afternoon" => Some(Shift::Afternoon),
            "night" => Some(Shift::Night),
            "general" => Some(Shift::General),
            "rotating" => Some(Shift::Rotating),
            _ => None,
        }
    }
}

/// Employment status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    Active,
    OnLeave,
    Suspended,
    Resigned,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::OnLeave => "on_leave",
            EmployeeStatus::Suspended => "suspended",
            EmployeeStatus::Resigned => "resigned",
            EmployeeStatus::Terminated => "terminated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(EmployeeStatus::Active),
            "on_leave" => Some(EmployeeStatus::OnLeave),
            "suspended" => Some(EmployeeStatus::Suspended),
            "resigned" => Some(EmployeeStatus::Resigned),
            "terminated" => Some(EmployeeStatus::Terminated),
            _ => None,
        }
    }
}

/// Daily attendance marking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    HalfDay,
    OnLeave,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 5] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::Late,
        AttendanceStatus::HalfDay,
        AttendanceStatus::OnLeave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::OnLeave => "on_leave",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" => Some(AttendanceStatus::Present),
            "absent" => Some(AttendanceStatus::Absent),
            "late" => Some(AttendanceStatus::Late),
            "half_day" => Some(AttendanceStatus::HalfDay),
            "on_leave" => Some(AttendanceStatus::OnLeave),
            _ => None,
        }
    }
}

/// Category of a leave request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    Sick,
    Casual,
    Earned,
    Maternity,
    Paternity,
    Emergency,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Sick => "sick",
            LeaveType::Casual => "casual",
            LeaveType::Earned => "earned",
            LeaveType::Maternity => "maternity",
            LeaveType::Paternity => "paternity",
            LeaveType::Emergency => "emergency",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::Sick => "Sick Leave",
            LeaveType::Casual => "Casual Leave",
            LeaveType::Earned => "Earned Leave",
            LeaveType::Maternity => "Maternity Leave",
            LeaveType::Paternity => "Paternity Leave",
            LeaveType::Emergency => "Emergency Leave",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sick" => Some(LeaveType::Sick),
            "casual" => Some(LeaveType::Casual),
            "earned" => Some(LeaveType::Earned),
            "maternity" => Some(LeaveType::Maternity),
            "paternity" => Some(LeaveType::Paternity),
            "emergency" => Some(LeaveType::Emergency),
            _ => None,
        }
    }
}

/// Approval state of a leave request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            "cancelled" => Some(LeaveStatus::Cancelled),
            _ => None,
        }
    }
}

/// Lifecycle state of a job posting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
    OnHold,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "open",
            JobStatus::Closed => "closed",
            JobStatus::OnHold => "on_hold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(JobStatus::Open),
            "closed" => Some(JobStatus::Closed),
            "on_hold" => Some(JobStatus::OnHold),
            _ => None,
        }
    }
}

/// Review state of a job application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    UnderReview,
    Shortlisted,
    InterviewScheduled,
    Selected,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::InterviewScheduled => "interview_scheduled",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Withdrawn => "Withdrawn",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(ApplicationStatus::Submitted),
            "under_review" => Some(ApplicationStatus::UnderReview),
            "shortlisted" => Some(ApplicationStatus::Shortlisted),
            "interview_scheduled" => Some(ApplicationStatus::InterviewScheduled),
            "selected" => Some(ApplicationStatus::Selected),
            "rejected" => Some(ApplicationStatus::Rejected),
            "withdrawn" => Some(ApplicationStatus::Withdrawn),
            _ => None,
        }
    }
}

/// Physical location of a department within the hospital campus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[default]
    MainBuilding,
    BlockA,
    BlockB,
    BlockC,
    EmergencyWing,
    ResearchCenter,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::MainBuilding => "main_building",
            Location::BlockA => "block_a",
            Location::BlockB => "block_b",
            Location::BlockC => "block_c",
            Location::EmergencyWing => "emergency_wing",
            Location::ResearchCenter => "research_center",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Location::MainBuilding => "Main Building",
            Location::BlockA => "Block A",
            Location::BlockB => "Block B",
            Location::BlockC => "Block C",
            Location::EmergencyWing => "Emergency Wing",
            Location::ResearchCenter => "Research Center",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "main_building" => Some(Location::MainBuilding),
            "block_a" => Some(Location::BlockA),
            "block_b" => Some(Location::BlockB),
            "block_c" => Some(Location::BlockC),
            "emergency_wing" => Some(Location::EmergencyWing),
            "research_center" => Some(Location::ResearchCenter),
            _ => None,
        }
    }
}

// =============================================================================
// Entities
// =============================================================================

/// A hospital department.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    /// Short unique code, e.g. "CARD" for Cardiology.
    pub code: String,
    pub location: Location,
    /// Display name of the department head, if one is assigned.
    pub head_name: Option<String>,
    pub total_beds: i64,
    pub is_active: bool,
}

/// A staff member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    /// Badge code, e.g. "EMP-0042". Distinct from the row id.
    pub employee_id: String,
    pub name: String,
    pub department_id: Option<Uuid>,
    pub category: StaffCategory,
    pub designation: String,
    pub specialization: String,
    pub shift: Shift,
    pub status: EmployeeStatus,
}

/// One attendance marking for one employee on one date.
///
/// The store enforces at most one row per (employee, date).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub department_id: Option<Uuid>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

/// A request for leave over an inclusive date range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Whether this request puts the employee on leave on `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved && self.start_date <= date && date <= self.end_date
    }
}

/// A job posting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub department_id: Uuid,
    pub status: JobStatus,
    pub vacancies: i64,
    pub posted_date: NaiveDate,
}

/// An application against a job posting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_name: String,
    pub status: ApplicationStatus,
    pub applied_date: DateTime<Utc>,
}

// =============================================================================
// Tests
// =============================================================================
