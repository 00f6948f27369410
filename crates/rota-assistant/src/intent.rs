//! Intent classification for HR queries.
//!
//! Maps a raw query string to one fixed intent label using an ordered
//! table of regular-expression rules. The table is scanned in declaration
//! order and the first matching pattern wins, so overlaps between rules
//! are resolved by position — the order below is part of the contract.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// The fixed category a query is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    LeaveToday,
    AbsentToday,
    AttendanceSummary,
    DepartmentAttendance,
    EmployeeCount,
    DepartmentInfo,
    JobApplications,
    OpenPositions,
    LeaveRequests,
    EmployeeByDepartment,
    Nurses,
    Doctors,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::LeaveToday => "leave_today",
            Intent::AbsentToday => "absent_today",
            Intent::AttendanceSummary => "attendance_summary",
            Intent::DepartmentAttendance => "department_attendance",
            Intent::EmployeeCount => "employee_count",
            Intent::DepartmentInfo => "department_info",
            Intent::JobApplications => "job_applications",
            Intent::OpenPositions => "open_positions",
            Intent::LeaveRequests => "leave_requests",
            Intent::EmployeeByDepartment => "employee_by_department",
            Intent::Nurses => "nurses",
            Intent::Doctors => "doctors",
            Intent::General => "general",
        }
    }
}

// =============================================================================
// Rule table (compiled once, scanned in declaration order)
// =============================================================================

static INTENT_RULES: LazyLock<Vec<(Intent, Vec<Regex>)>> = LazyLock::new(|| {
    let mk = |pats: &[&str]| -> Vec<Regex> {
        pats.iter()
            .map(|p| Regex::new(p).expect("Invalid intent regex"))
            .collect()
    };

    vec![
        (
            Intent::LeaveToday,
            mk(&[
                r"(?i)on leave today",
                r"(?i)leave today",
                r"(?i)employees.*leave.*today",
                r"(?i)who.*on leave",
                r"(?i)how many.*leave",
            ]),
        ),
        (
            Intent::AbsentToday,
            mk(&[
                r"(?i)absent today",
                r"(?i)absentees",
                r"(?i)who.*absent",
                r"(?i)how many.*absent",
                r"(?i)missing today",
            ]),
        ),
        (
            Intent::AttendanceSummary,
            mk(&[
                r"(?i)attendance.*summary",
                r"(?i)attendance.*report",
                r"(?i)attendance.*status",
                r"(?i)present today",
                r"(?i)how many.*present",
            ]),
        ),
        (
            Intent::DepartmentAttendance,
            mk(&[
                r"(?i)attendance.*department",
                r"(?i)department.*attendance",
                r"(?i)(\w+).*department.*absent",
                r"(?i)absent.*(\w+).*department",
                r"(?i)(\w+).*attendance",
            ]),
        ),
        (
            Intent::EmployeeCount,
            mk(&[
                r"(?i)how many employees",
                r"(?i)total employees",
                r"(?i)employee count",
                r"(?i)number of employees",
                r"(?i)staff count",
            ]),
        ),
        (
            Intent::DepartmentInfo,
            mk(&[
                r"(?i)department.*info",
                r"(?i)list.*departments",
                r"(?i)all departments",
                r"(?i)department.*details",
                r"(?i)which departments",
                r"(?i)show.*departments",
                r"(?i)department.*names",
                r"(?i)departments.*names",
                r"(?i)what.*departments",
                r"(?i)tell.*about.*departments",
                r"(?i)department.*list",
            ]),
        ),
        (
            Intent::JobApplications,
            mk(&[
                r"(?i)job applications",
                r"(?i)pending applications",
                r"(?i)how many.*applications",
                r"(?i)application.*status",
                r"(?i)recruitment.*status",
            ]),
        ),
        (
            Intent::OpenPositions,
            mk(&[
                r"(?i)open positions",
                r"(?i)job openings",
                r"(?i)vacancies",
                r"(?i)open jobs",
                r"(?i)hiring",
            ]),
        ),
        (
            Intent::LeaveRequests,
            mk(&[
                r"(?i)leave requests",
                r"(?i)pending.*leave",
                r"(?i)leave.*pending",
                r"(?i)leave.*approval",
                r"(?i)approve.*leave",
            ]),
        ),
        (
            Intent::EmployeeByDepartment,
            mk(&[
                r"(?i)employees.*in.*(\w+)",
                r"(?i)(\w+).*employees",
                r"(?i)staff.*in.*(\w+)",
                r"(?i)list.*(\w+).*staff",
            ]),
        ),
        (
            Intent::Nurses,
            mk(&[r"(?i)nurses", r"(?i)nursing staff", r"(?i)nursing"]),
        ),
        (
            Intent::Doctors,
            mk(&[r"(?i)doctors", r"(?i)medical staff", r"(?i)physicians"]),
        ),
    ]
});

/// Classify a raw query into an [`Intent`].
///
/// Total and deterministic: always returns a label, `Intent::General`
/// when nothing matches.
pub fn classify(query: &str) -> Intent {
    let query = query.trim().to_lowercase();
    for (intent, patterns) in INTENT_RULES.iter() {
        for re in patterns {
            if re.is_match(&query) {
                return *intent;
            }
        }
    }
    Intent::General
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ---- One check per rule ----

    #[test]
    fn test_leave_today() {
        assert_eq!(classify("who is on leave today"), Intent::LeaveToday);
        assert_eq!(classify("employees on leave today"), Intent::LeaveToday);
        assert_eq!(classify("who is on leave"), Intent::LeaveToday);
    }

    #[test]
    fn test_absent_today() {
        assert_eq!(classify("who is absent today"), Intent::AbsentToday);
        assert_eq!(classify("show me the absentees"), Intent::AbsentToday);
        assert_eq!(classify("anyone missing today?"), Intent::AbsentToday);
    }

    #[test]
    fn test_attendance_summary() {
        assert_eq!(
            classify("give me an attendance summary"),
            Intent::AttendanceSummary
        );
        assert_eq!(classify("attendance report please"), Intent::AttendanceSummary);
        assert_eq!(classify("how many are present"), Intent::AttendanceSummary);
    }

    #[test]
    fn test_department_attendance() {
        assert_eq!(
            classify("attendance for the cardiology department"),
            Intent::DepartmentAttendance
        );
        assert_eq!(
            classify("cardiology attendance"),
            Intent::DepartmentAttendance
        );
    }

    #[test]
    fn test_employee_count() {
        assert_eq!(classify("how many employees are there"), Intent::EmployeeCount);
        assert_eq!(classify("total employees"), Intent::EmployeeCount);
        assert_eq!(classify("what is the staff count"), Intent::EmployeeCount);
    }

    #[test]
    fn test_department_info() {
        assert_eq!(classify("show me all departments"), Intent::DepartmentInfo);
        assert_eq!(classify("list the departments"), Intent::DepartmentInfo);
        assert_eq!(classify("which departments do we have"), Intent::DepartmentInfo);
    }

    #[test]
    fn test_job_applications() {
        assert_eq!(classify("any new job applications"), Intent::JobApplications);
        assert_eq!(classify("recruitment status"), Intent::JobApplications);
    }

    #[test]
    fn test_open_positions() {
        assert_eq!(classify("what open positions do we have"), Intent::OpenPositions);
        assert_eq!(classify("current vacancies"), Intent::OpenPositions);
        assert_eq!(classify("are we hiring"), Intent::OpenPositions);
    }

    #[test]
    fn test_leave_requests() {
        assert_eq!(classify("show leave requests"), Intent::LeaveRequests);
        assert_eq!(classify("leaves waiting for approval"), Intent::LeaveRequests);
    }

    #[test]
    fn test_employee_by_department() {
        assert_eq!(
            classify("employees in radiology"),
            Intent::EmployeeByDepartment
        );
        assert_eq!(
            classify("list the cardiology staff"),
            Intent::EmployeeByDepartment
        );
    }

    #[test]
    fn test_nurses() {
        assert_eq!(classify("how is the nursing roster"), Intent::Nurses);
    }

    #[test]
    fn test_doctors() {
        assert_eq!(classify("list physicians"), Intent::Doctors);
    }

    #[test]
    fn test_general_fallback() {
        assert_eq!(classify("hello there"), Intent::General);
        assert_eq!(classify(""), Intent::General);
        assert_eq!(classify("what is the cafeteria menu"), Intent::General);
    }

    // ---- Order sensitivity ----

    #[test]
    fn test_leave_today_beats_leave_requests() {
        // "how many.*leave" sits in the leave_today rule, which is declared
        // before leave_requests, so pending-leave wording with "how many"
        // still routes to leave_today.
        assert_eq!(
            classify("how many pending leave requests"),
            Intent::LeaveToday
        );
    }

    #[test]
    fn test_absent_today_beats_department_attendance() {
        // "who.*absent" (rule 2) wins over "(\w+).*department.*absent" (rule 4).
        assert_eq!(
            classify("who in the cardiology department is absent"),
            Intent::AbsentToday
        );
    }

    #[test]
    fn test_department_attendance_beats_employee_by_department() {
        assert_eq!(
            classify("radiology department attendance"),
            Intent::DepartmentAttendance
        );
    }

    #[test]
    fn test_nurses_pattern_shadowed_by_earlier_rules() {
        // "nursing employees" hits the employee_by_department rule first.
        assert_eq!(
            classify("nursing employees"),
            Intent::EmployeeByDepartment
        );
    }

    // ---- Determinism and normalization ----

    #[test]
    fn test_classification_is_deterministic() {
        for _ in 0..10 {
            assert_eq!(classify("who is on leave today"), Intent::LeaveToday);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("WHO IS ON LEAVE TODAY"), Intent::LeaveToday);
        assert_eq!(classify("Show Me All Departments"), Intent::DepartmentInfo);
        assert_eq!(classify("HOW MANY EMPLOYEES"), Intent::EmployeeCount);
    }

    #[test]
    fn test_surrounding_whitespace_ignored() {
        assert_eq!(classify("   who is on leave today   "), Intent::LeaveToday);
    }

    #[test]
    fn test_unicode_input_does_not_panic() {
        assert_eq!(classify("qui est absent aujourd'hui \u{1f3e5}"), Intent::General);
    }

    #[test]
    fn test_intent_as_str() {
        assert_eq!(Intent::LeaveToday.as_str(), "leave_today");
        assert_eq!(Intent::EmployeeByDepartment.as_str(), "employee_by_department");
        assert_eq!(Intent::General.as_str(), "general");
    }

    #[test]
    fn test_intent_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&Intent::AttendanceSummary).unwrap(),
            "\"attendance_summary\""
        );
    }
}
