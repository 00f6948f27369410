//! Context retrieval: one bounded record-store snapshot per intent.
//!
//! Each intent has its own aggregation routine. All date filters use the
//! `today` value injected at construction, so a retriever instance always
//! observes a single point in time. Unmatched lookups ("no such
//! department") come back as data-carrying variants, never as errors.

use std::sync::Arc;

use chrono::NaiveDate;

use rota_core::types::{
    ApplicationStatus, AttendanceStatus, Department, EmployeeStatus, JobStatus, LeaveStatus,
    StaffCategory,
};
use rota_core::RotaError;
use rota_store::{
    AttendanceRepository, Database, DepartmentRepository, EmployeeRepository, LeaveRepository,
    RecruitmentRepository, StaffRow,
};

use crate::context::{
    AbsentEntry, ApplicationEntry, AttendanceOverview, CategoryCount, DepartmentAttendanceEntry,
    DepartmentCount, DepartmentDetail, DepartmentOverview, DoctorEntry, EmployeeOverview,
    LeaveEntry, LeaveOverview, NurseEntry, OpenJobEntry, PendingLeaveEntry, QueryContext,
    RecruitmentOverview, RosterAttendance, StaffEntry, StatusCount,
};
use crate::intent::Intent;

/// Cap on rosters and the "no attendance record" list.
const ROSTER_CAP: usize = 20;
/// Cap on "most recent" listings.
const RECENT_CAP: usize = 10;
/// Cap on the per-department breakdown in employee counts.
const TOP_DEPARTMENTS: usize = 10;

/// Placeholder for a missing department relation.
const NO_DEPARTMENT: &str = "N/A";
/// Placeholder for a department without a head.
const NO_HEAD: &str = "Not Assigned";

/// Retrieves a [`QueryContext`] snapshot for a classified query.
pub struct ContextRetriever {
    departments: DepartmentRepository,
    employees: EmployeeRepository,
    attendance: AttendanceRepository,
    leave: LeaveRepository,
    recruitment: RecruitmentRepository,
    today: NaiveDate,
}

impl ContextRetriever {
    /// Create a retriever fixed to the given `today`.
    pub fn new(db: Arc<Database>, today: NaiveDate) -> Self {
        Self {
            departments: DepartmentRepository::new(db.clone()),
            employees: EmployeeRepository::new(db.clone()),
            attendance: AttendanceRepository::new(db.clone()),
            leave: LeaveRepository::new(db.clone()),
            recruitment: RecruitmentRepository::new(db),
            today,
        }
    }

    /// The date this retriever's snapshots are taken "as of".
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Build the context snapshot for one intent.
    ///
    /// `raw_query` is consulted only by the department-matching intents.
    pub fn retrieve(&self, intent: Intent, raw_query: &str) -> Result<QueryContext, RotaError> {
        match intent {
            Intent::LeaveToday => self.leave_today(),
            Intent::AbsentToday => self.absent_today(),
            Intent::AttendanceSummary => self.attendance_summary(),
            Intent::DepartmentAttendance => self.department_attendance(raw_query),
            Intent::EmployeeCount => self.employee_count(),
            Intent::DepartmentInfo => self.department_info(),
            Intent::JobApplications => self.job_applications(),
            Intent::OpenPositions => self.open_positions(),
            Intent::LeaveRequests => self.leave_requests(),
            Intent::EmployeeByDepartment => self.employees_by_department(raw_query),
            Intent::Nurses => self.nursing_staff(),
            Intent::Doctors => self.medical_staff(),
            Intent::General => self.general_summary(),
        }
    }

    // -----------------------------------------------------------------
    // Per-intent routines
    // -----------------------------------------------------------------

    fn leave_today(&self) -> Result<QueryContext, RotaError> {
        let rows = self.leave.approved_spanning(self.today)?;
        let employees: Vec<LeaveEntry> = rows
            .into_iter()
            .map(|row| LeaveEntry {
                employee_name: row.employee_name,
                employee_id: row.employee_code,
                department: row
                    .department_name
                    .unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                leave_type: row.request.leave_type.label().to_string(),
                start_date: row.request.start_date,
                end_date: row.request.end_date,
            })
            .collect();

        Ok(QueryContext::LeaveToday {
            date: self.today,
            total_on_leave: employees.len() as i64,
            employees,
        })
    }

    fn absent_today(&self) -> Result<QueryContext, RotaError> {
        let absent_employees: Vec<AbsentEntry> = self
            .attendance
            .absent_on(self.today)?
            .into_iter()
            .map(|row| AbsentEntry {
                employee_name: row.employee_name,
                employee_id: row.employee_code,
                department: row
                    .department_name
                    .unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                designation: row.designation,
            })
            .collect();

        // Employees with no marking at all are potentially absent too;
        // the list is capped, the marked-absent list is not.
        let employees_without_record: Vec<AbsentEntry> = self
            .employees
            .active_without_attendance_on(self.today, ROSTER_CAP)?
            .into_iter()
            .map(staff_to_absent_entry)
            .collect();

        Ok(QueryContext::AbsentToday {
            date: self.today,
            marked_absent: absent_employees.len() as i64,
            absent_employees,
            no_attendance_record: employees_without_record.len() as i64,
            employees_without_record,
        })
    }

    fn attendance_summary(&self) -> Result<QueryContext, RotaError> {
        let counts = self.attendance.status_counts_on(self.today)?;
        let count_of = |status: AttendanceStatus| -> i64 {
            counts
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, c)| *c)
                .unwrap_or(0)
        };
        let total_marked: i64 = counts.iter().map(|(_, c)| c).sum();
        let total_active = self.employees.count_by_status(EmployeeStatus::Active)?;

        Ok(QueryContext::AttendanceSummary {
            date: self.today,
            total_active_employees: total_active,
            total_attendance_marked: total_marked,
            present: count_of(AttendanceStatus::Present),
            absent: count_of(AttendanceStatus::Absent),
            late: count_of(AttendanceStatus::Late),
            half_day: count_of(AttendanceStatus::HalfDay),
            on_leave: count_of(AttendanceStatus::OnLeave),
            not_marked: total_active - total_marked,
        })
    }

    fn department_attendance(&self, raw_query: &str) -> Result<QueryContext, RotaError> {
        let departments = self.departments.active()?;

        if let Some(dept) = match_department(raw_query, &departments) {
            let counts = self
                .attendance
                .status_counts_for_department(self.today, dept.id)?;
            let count_of = |status: AttendanceStatus| -> i64 {
                counts
                    .iter()
                    .find(|(s, _)| *s == status)
                    .map(|(_, c)| *c)
                    .unwrap_or(0)
            };

            return Ok(QueryContext::DepartmentAttendance {
                department: dept.name.clone(),
                date: self.today,
                total_staff: self.departments.staff_count(dept.id)?,
                present: count_of(AttendanceStatus::Present),
                absent: count_of(AttendanceStatus::Absent),
                late: count_of(AttendanceStatus::Late),
                on_leave: count_of(AttendanceStatus::OnLeave),
            });
        }

        // No department named in the query: roll up every active one.
        let mut entries = Vec::with_capacity(departments.len());
        for dept in &departments {
            let counts = self
                .attendance
                .status_counts_for_department(self.today, dept.id)?;
            let count_of = |status: AttendanceStatus| -> i64 {
                counts
                    .iter()
                    .find(|(s, _)| *s == status)
                    .map(|(_, c)| *c)
                    .unwrap_or(0)
            };
            entries.push(DepartmentAttendanceEntry {
                department: dept.name.clone(),
                total_staff: self.departments.staff_count(dept.id)?,
                present: count_of(AttendanceStatus::Present),
                absent: count_of(AttendanceStatus::Absent),
            });
        }

        Ok(QueryContext::AllDepartmentsAttendance {
            date: self.today,
            departments: entries,
        })
    }

    fn employee_count(&self) -> Result<QueryContext, RotaError> {
        let by_category = self
            .employees
            .active_count_by_category()?
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.as_str().to_string(),
                count,
            })
            .collect();

        let by_department = self
            .employees
            .active_count_by_department(Some(TOP_DEPARTMENTS))?
            .into_iter()
            .map(|(name, count)| DepartmentCount {
                department: name.unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                count,
            })
            .collect();

        Ok(QueryContext::EmployeeCount {
            total_employees: self.employees.count_all()?,
            active_employees: self.employees.count_by_status(EmployeeStatus::Active)?,
            on_leave: self.employees.count_by_status(EmployeeStatus::OnLeave)?,
            by_category,
            by_department,
        })
    }

    fn department_info(&self) -> Result<QueryContext, RotaError> {
        let departments = self.department_details()?;
        Ok(QueryContext::DepartmentInfo {
            total_departments: departments.len() as i64,
            departments,
        })
    }

    fn job_applications(&self) -> Result<QueryContext, RotaError> {
        let by_status = self
            .recruitment
            .application_status_counts()?
            .into_iter()
            .map(|(status, count)| StatusCount {
                status: status.as_str().to_string(),
                count,
            })
            .collect();

        let recent_applications = self
            .recruitment
            .recent_applications(RECENT_CAP)?
            .into_iter()
            .map(|row| ApplicationEntry {
                applicant: row.application.applicant_name,
                job: row.job_title,
                status: row.application.status.label().to_string(),
                applied_date: row.application.applied_date.date_naive(),
            })
            .collect();

        Ok(QueryContext::JobApplications {
            total_applications: self.recruitment.count_applications()?,
            by_status,
            recent_applications,
        })
    }

    fn open_positions(&self) -> Result<QueryContext, RotaError> {
        let jobs: Vec<OpenJobEntry> = self
            .recruitment
            .open_jobs()?
            .into_iter()
            .map(|row| OpenJobEntry {
                title: row.job.title,
                department: row.department_name,
                vacancies: row.job.vacancies,
                applications: row.application_count,
                posted_date: row.job.posted_date,
            })
            .collect();

        Ok(QueryContext::OpenPositions {
            total_open_jobs: jobs.len() as i64,
            jobs,
        })
    }

    fn leave_requests(&self) -> Result<QueryContext, RotaError> {
        let pending_requests = self
            .leave
            .pending_recent(RECENT_CAP)?
            .into_iter()
            .map(|row| PendingLeaveEntry {
                employee: row.employee_name,
                department: row
                    .department_name
                    .unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                leave_type: row.request.leave_type.label().to_string(),
                start_date: row.request.start_date,
                end_date: row.request.end_date,
                days: row.request.total_days,
            })
            .collect();

        Ok(QueryContext::LeaveRequests {
            total_pending: self.leave.count_by_status(LeaveStatus::Pending)?,
            pending_requests,
        })
    }

    fn employees_by_department(&self, raw_query: &str) -> Result<QueryContext, RotaError> {
        let departments = self.departments.active()?;

        let matched = match_department(raw_query, &departments).map(|d| (d.id, d.name.clone()));
        let Some((dept_id, dept_name)) = matched else {
            return Ok(QueryContext::DepartmentNotFound {
                error: "Department not found in query".to_string(),
                available_departments: departments.into_iter().map(|d| d.name).collect(),
            });
        };

        let employees: Vec<StaffEntry> = self
            .employees
            .active_in_department(dept_id)?
            .into_iter()
            .map(|row| StaffEntry {
                name: row.employee.name,
                employee_id: row.employee.employee_id,
                designation: row.employee.designation,
                category: row.employee.category.label().to_string(),
            })
            .collect();

        Ok(QueryContext::EmployeesByDepartment {
            department: dept_name,
            total_employees: employees.len() as i64,
            employees,
        })
    }

    fn nursing_staff(&self) -> Result<QueryContext, RotaError> {
        let roster = self.employees.active_by_category(StaffCategory::Nursing)?;
        let total_nurses = roster.len() as i64;
        let nurses: Vec<NurseEntry> = roster
            .into_iter()
            .take(ROSTER_CAP)
            .map(|row| NurseEntry {
                department: row
                    .department_name
                    .unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                name: row.employee.name,
                employee_id: row.employee.employee_id,
                designation: row.employee.designation,
                shift: row.employee.shift.label().to_string(),
            })
            .collect();

        let counts = self
            .attendance
            .status_counts_for_category(self.today, StaffCategory::Nursing)?;
        let count_of = |status: AttendanceStatus| -> i64 {
            counts
                .iter()
                .find(|(s, _)| *s == status)
                .map(|(_, c)| *c)
                .unwrap_or(0)
        };

        Ok(QueryContext::NursingStaff {
            total_nurses,
            nurses,
            today_attendance: RosterAttendance {
                present: count_of(AttendanceStatus::Present),
                absent: count_of(AttendanceStatus::Absent),
                on_leave: count_of(AttendanceStatus::OnLeave),
            },
        })
    }

    fn medical_staff(&self) -> Result<QueryContext, RotaError> {
        let roster = self.employees.active_by_category(StaffCategory::Medical)?;
        let total_doctors = roster.len() as i64;
        let doctors: Vec<DoctorEntry> = roster
            .into_iter()
            .take(ROSTER_CAP)
            .map(|row| DoctorEntry {
                department: row
                    .department_name
                    .unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                name: row.employee.name,
                employee_id: row.employee.employee_id,
                designation: row.employee.designation,
                specialization: row.employee.specialization,
            })
            .collect();

        Ok(QueryContext::MedicalStaff {
            total_doctors,
            doctors,
        })
    }

    fn general_summary(&self) -> Result<QueryContext, RotaError> {
        let department_list = self.department_details()?;

        let by_department = self
            .employees
            .active_count_by_department(None)?
            .into_iter()
            .map(|(name, count)| DepartmentCount {
                department: name.unwrap_or_else(|| NO_DEPARTMENT.to_string()),
                count,
            })
            .collect();
        let by_category = self
            .employees
            .active_count_by_category()?
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.as_str().to_string(),
                count,
            })
            .collect();

        Ok(QueryContext::GeneralSummary {
            date: self.today,
            employees: EmployeeOverview {
                total: self.employees.count_all()?,
                active: self.employees.count_by_status(EmployeeStatus::Active)?,
                on_leave: self.employees.count_by_status(EmployeeStatus::OnLeave)?,
                by_department,
                by_category,
            },
            departments: DepartmentOverview {
                total: department_list.len() as i64,
                list: department_list,
            },
            attendance_today: AttendanceOverview {
                marked: self.attendance.count_on(self.today)?,
                present: self
                    .attendance
                    .count_on_with_status(self.today, AttendanceStatus::Present)?,
                absent: self
                    .attendance
                    .count_on_with_status(self.today, AttendanceStatus::Absent)?,
                late: self
                    .attendance
                    .count_on_with_status(self.today, AttendanceStatus::Late)?,
                on_leave: self
                    .attendance
                    .count_on_with_status(self.today, AttendanceStatus::OnLeave)?,
            },
            leave_requests: LeaveOverview {
                pending: self.leave.count_by_status(LeaveStatus::Pending)?,
                approved: self.leave.count_by_status(LeaveStatus::Approved)?,
                rejected: self.leave.count_by_status(LeaveStatus::Rejected)?,
                on_leave_today: self.leave.count_approved_spanning(self.today)?,
            },
            recruitment: RecruitmentOverview {
                open_positions: self.recruitment.count_jobs_by_status(JobStatus::Open)?,
                closed_positions: self.recruitment.count_jobs_by_status(JobStatus::Closed)?,
                total_applications: self.recruitment.count_applications()?,
                pending_applications: self
                    .recruitment
                    .count_applications_by_status(ApplicationStatus::Submitted)?,
                shortlisted: self
                    .recruitment
                    .count_applications_by_status(ApplicationStatus::Shortlisted)?,
                rejected_applications: self
                    .recruitment
                    .count_applications_by_status(ApplicationStatus::Rejected)?,
            },
        })
    }

    // -----------------------------------------------------------------
    // Shared helpers
    // -----------------------------------------------------------------

    fn department_details(&self) -> Result<Vec<DepartmentDetail>, RotaError> {
        let mut details = Vec::new();
        for dept in self.departments.active()? {
            details.push(DepartmentDetail {
                staff_count: self.departments.staff_count(dept.id)?,
                name: dept.name,
                code: dept.code,
                location: dept.location.label().to_string(),
                head: dept.head_name.unwrap_or_else(|| NO_HEAD.to_string()),
                total_beds: dept.total_beds,
            });
        }
        Ok(details)
    }
}

/// Find the first active department whose name or code appears in the
/// query, case-insensitively.
///
/// First match in listing order wins; a short code that happens to be a
/// substring of another department's name can shadow it.
fn match_department<'a>(raw_query: &str, departments: &'a [Department]) -> Option<&'a Department> {
    let query = raw_query.to_lowercase();
    departments
        .iter()
        .find(|d| query.contains(&d.name.to_lowercase()) || query.contains(&d.code.to_lowercase()))
}

fn staff_to_absent_entry(row: StaffRow) -> AbsentEntry {
    AbsentEntry {
        department: row
            .department_name
            .unwrap_or_else(|| NO_DEPARTMENT.to_string()),
        employee_name: row.employee.name,
        employee_id: row.employee.employee_id,
        designation: row.employee.designation,
    }
}

// =============================================================================
// Tests
// =============================================================================
