//! Repository implementations for SQLite-backed persistence.
//!
//! One repository per aggregate (departments, employees, attendance,
//! leave, recruitment), each operating on the shared [`Database`] with
//! raw SQL. Listing queries resolve display data (department names, job
//! titles) with joins so callers never chase foreign keys.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rusqlite::Row;
use uuid::Uuid;

use rota_core::types::{
    Application, ApplicationStatus, Attendance, AttendanceStatus, Department, Employee,
    EmployeeStatus, Job, JobStatus, LeaveRequest, LeaveStatus, LeaveType, Location, Shift,
    StaffCategory,
};
use rota_core::RotaError;

use crate::db::Database;

// =============================================================================
// Joined row types
// =============================================================================

/// An employee with display data resolved from the departments table.
#[derive(Debug, Clone)]
pub struct StaffRow {
    pub employee: Employee,
    pub department_name: Option<String>,
}

/// One attendance marking with employee display data.
#[derive(Debug, Clone)]
pub struct AttendanceRow {
    pub employee_name: String,
    pub employee_code: String,
    pub department_name: Option<String>,
    pub designation: String,
}

/// A leave request with employee and department display data.
#[derive(Debug, Clone)]
pub struct LeaveRow {
    pub request: LeaveRequest,
    pub employee_name: String,
    pub employee_code: String,
    pub department_name: Option<String>,
}

/// A job posting with its department name and live application count.
#[derive(Debug, Clone)]
pub struct JobRow {
    pub job: Job,
    pub department_name: String,
    pub application_count: i64,
}

/// An application with its job title.
#[derive(Debug, Clone)]
pub struct ApplicationRow {
    pub application: Application,
    pub job_title: String,
}

// =============================================================================
// Column helpers
// =============================================================================

fn store_err<E: std::fmt::Display>(e: E) -> RotaError {
    RotaError::Store(e.to_string())
}

fn col<T: rusqlite::types::FromSql>(row: &Row<'_>, idx: usize) -> Result<T, RotaError> {
    row.get(idx).map_err(store_err)
}

fn parse_uuid(s: &str) -> Result<Uuid, RotaError> {
    Uuid::parse_str(s).map_err(|e| RotaError::Store(format!("Invalid UUID: {}", e)))
}

fn parse_uuid_opt(s: Option<String>) -> Result<Option<Uuid>, RotaError> {
    s.map(|v| parse_uuid(&v)).transpose()
}

fn parse_date(s: &str) -> Result<NaiveDate, RotaError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| RotaError::Store(format!("Invalid date '{}': {}", s, e)))
}

fn parse_instant(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

fn parse_variant<T>(s: &str, parse: fn(&str) -> Option<T>, what: &str) -> Result<T, RotaError> {
    parse(s).ok_or_else(|| RotaError::Store(format!("Unknown {} value '{}'", what, s)))
}

// =============================================================================
// DepartmentRepository
// =============================================================================

/// Repository for department records.
pub struct DepartmentRepository {
    db: Arc<Database>,
}

impl DepartmentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn insert(&self, dept: &Department) -> Result<(), RotaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO departments (id, name, code, location, head_name, total_beds, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    dept.id.to_string(),
                    dept.name,
                    dept.code,
                    dept.location.as_str(),
                    dept.head_name,
                    dept.total_beds,
                    dept.is_active as i32,
                ],
            )
            .map_err(|e| RotaError::Store(format!("Failed to insert department: {}", e)))?;
            Ok(())
        })
    }

    /// All active departments, ordered by name.
    pub fn active(&self) -> Result<Vec<Department>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT id, name, code, location, head_name, total_beds, is_active
                     FROM departments WHERE is_active = 1 ORDER BY name",
                )
                .map_err(store_err)?;

            let rows = stmt
                .query_map([], |row| Ok(row_to_department(row)))
                .map_err(store_err)?;

            let mut departments = Vec::new();
            for row in rows {
                departments.push(row.map_err(store_err)??);
            }
            Ok(departments)
        })
    }

    /// Number of active employees assigned to a department.
    pub fn staff_count(&self, department_id: Uuid) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM employees WHERE department_id = ?1 AND status = 'active'",
                rusqlite::params![department_id.to_string()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }
}

fn row_to_department(row: &Row<'_>) -> Result<Department, RotaError> {
    let id: String = col(row, 0)?;
    let location: String = col(row, 3)?;
    let is_active: i32 = col(row, 6)?;
    Ok(Department {
        id: parse_uuid(&id)?,
        name: col(row, 1)?,
        code: col(row, 2)?,
        location: parse_variant(&location, Location::parse, "location")?,
        head_name: col(row, 4)?,
        total_beds: col(row, 5)?,
        is_active: is_active != 0,
    })
}

// =============================================================================
// EmployeeRepository
// =============================================================================

const EMPLOYEE_COLS: &str =
    "e.id, e.employee_id, e.name, e.department_id, e.category, e.designation, \
     e.specialization, e.shift, e.status";

/// Repository for employee records.
pub struct EmployeeRepository {
    db: Arc<Database>,
}

impl EmployeeRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn insert(&self, emp: &Employee) -> Result<(), RotaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO employees
                 (id, employee_id, name, department_id, category, designation,
                  specialization, shift, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    emp.id.to_string(),
                    emp.employee_id,
                    emp.name,
                    emp.department_id.map(|d| d.to_string()),
                    emp.category.as_str(),
                    emp.designation,
                    emp.specialization,
                    emp.shift.as_str(),
                    emp.status.as_str(),
                ],
            )
            .map_err(|e| RotaError::Store(format!("Failed to insert employee: {}", e)))?;
            Ok(())
        })
    }

    pub fn count_all(&self) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))
                .map_err(store_err)
        })
    }

    pub fn count_by_status(&self, status: EmployeeStatus) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM employees WHERE status = ?1",
                rusqlite::params![status.as_str()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    /// Active headcount grouped by staff category.
    pub fn active_count_by_category(&self) -> Result<Vec<(StaffCategory, i64)>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT category, COUNT(*) FROM employees
                     WHERE status = 'active' GROUP BY category ORDER BY category",
                )
                .map_err(store_err)?;

            let rows = stmt
                .query_map([], |row| {
                    let cat: String = row.get(0)?;
                    let count: i64 = row.get(1)?;
                    Ok((cat, count))
                })
                .map_err(store_err)?;

            let mut counts = Vec::new();
            for row in rows {
                let (cat, count) = row.map_err(store_err)?;
                counts.push((parse_variant(&cat, StaffCategory::parse, "category")?, count));
            }
            Ok(counts)
        })
    }

    /// Active headcount grouped by department name, largest first.
    ///
    /// Employees without a department group under `None`. `limit` of
    /// `None` returns every group.
    pub fn active_count_by_department(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<(Option<String>, i64)>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT d.name, COUNT(*) AS c FROM employees e
                     LEFT JOIN departments d ON e.department_id = d.id
                     WHERE e.status = 'active'
                     GROUP BY d.name ORDER BY c DESC LIMIT ?1",
                )
                .map_err(store_err)?;

            let limit = limit.map(|l| l as i64).unwrap_or(-1);
            let rows = stmt
                .query_map(rusqlite::params![limit], |row| {
                    let name: Option<String> = row.get(0)?;
                    let count: i64 = row.get(1)?;
                    Ok((name, count))
                })
                .map_err(store_err)?;

            let mut counts = Vec::new();
            for row in rows {
                counts.push(row.map_err(store_err)?);
            }
            Ok(counts)
        })
    }

    /// Active employees in one department, ordered by badge code.
    pub fn active_in_department(&self, department_id: Uuid) -> Result<Vec<StaffRow>, RotaError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLS}, d.name FROM employees e
             LEFT JOIN departments d ON e.department_id = d.id
             WHERE e.status = 'active' AND e.department_id = ?1
             ORDER BY e.employee_id"
        );
        self.staff_query(&sql, rusqlite::params![department_id.to_string()])
    }

    /// Active employees in one staff category, ordered by badge code.
    pub fn active_by_category(&self, category: StaffCategory) -> Result<Vec<StaffRow>, RotaError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLS}, d.name FROM employees e
             LEFT JOIN departments d ON e.department_id = d.id
             WHERE e.status = 'active' AND e.category = ?1
             ORDER BY e.employee_id"
        );
        self.staff_query(&sql, rusqlite::params![category.as_str()])
    }

    /// Active employees with no attendance row on `date`, capped at `limit`.
    pub fn active_without_attendance_on(
        &self,
        date: NaiveDate,
        limit: usize,
    ) -> Result<Vec<StaffRow>, RotaError> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLS}, d.name FROM employees e
             LEFT JOIN departments d ON e.department_id = d.id
             WHERE e.status = 'active'
               AND e.id NOT IN (SELECT employee_id FROM attendance WHERE date = ?1)
             ORDER BY e.employee_id LIMIT ?2"
        );
        self.staff_query(&sql, rusqlite::params![date.to_string(), limit as i64])
    }

    fn staff_query(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<StaffRow>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(sql).map_err(store_err)?;
            let rows = stmt
                .query_map(params, |row| Ok(row_to_staff_row(row)))
                .map_err(store_err)?;

            let mut staff = Vec::new();
            for row in rows {
                staff.push(row.map_err(store_err)??);
            }
            Ok(staff)
        })
    }
}

fn row_to_employee(row: &Row<'_>) -> Result<Employee, RotaError> {
    let id: String = col(row, 0)?;
    let department_id: Option<String> = col(row, 3)?;
    let category: String = col(row, 4)?;
    let shift: String = col(row, 7)?;
    let status: String = col(row, 8)?;
    Ok(Employee {
        id: parse_uuid(&id)?,
        employee_id: col(row, 1)?,
        name: col(row, 2)?,
        department_id: parse_uuid_opt(department_id)?,
        category: parse_variant(&category, StaffCategory::parse, "category")?,
        designation: col(row, 5)?,
        specialization: col(row, 6)?,
        shift: parse_variant(&shift, Shift::parse, "shift")?,
        status: parse_variant(&status, EmployeeStatus::parse, "status")?,
    })
}

fn row_to_staff_row(row: &Row<'_>) -> Result<StaffRow, RotaError> {
    Ok(StaffRow {
        employee: row_to_employee(row)?,
        department_name: col(row, 9)?,
    })
}

// =============================================================================
// AttendanceRepository
// =============================================================================

/// Repository for attendance records.
pub struct AttendanceRepository {
    db: Arc<Database>,
}

impl AttendanceRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn insert(&self, att: &Attendance) -> Result<(), RotaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO attendance
                 (id, employee_id, department_id, date, status, check_in, check_out)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    att.id.to_string(),
                    att.employee_id.to_string(),
                    att.department_id.map(|d| d.to_string()),
                    att.date.to_string(),
                    att.status.as_str(),
                    att.check_in.map(|t| t.format("%H:%M:%S").to_string()),
                    att.check_out.map(|t| t.format("%H:%M:%S").to_string()),
                ],
            )
            .map_err(|e| RotaError::Store(format!("Failed to insert attendance: {}", e)))?;
            Ok(())
        })
    }

    /// Employees marked absent on `date`, with display data.
    pub fn absent_on(&self, date: NaiveDate) -> Result<Vec<AttendanceRow>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT e.name, e.employee_id, d.name, e.designation
                     FROM attendance a
                     JOIN employees e ON a.employee_id = e.id
                     LEFT JOIN departments d ON a.department_id = d.id
                     WHERE a.date = ?1 AND a.status = 'absent'
                     ORDER BY e.name",
                )
                .map_err(store_err)?;

            let rows = stmt
                .query_map(rusqlite::params![date.to_string()], |row| {
                    Ok(AttendanceRow {
                        employee_name: row.get(0)?,
                        employee_code: row.get(1)?,
                        department_name: row.get(2)?,
                        designation: row.get(3)?,
                    })
                })
                .map_err(store_err)?;

            let mut records = Vec::new();
            for row in rows {
                records.push(row.map_err(store_err)?);
            }
            Ok(records)
        })
    }

    /// Marking counts per status for `date`, across all departments.
    pub fn status_counts_on(&self, date: NaiveDate) -> Result<Vec<(AttendanceStatus, i64)>, RotaError> {
        self.status_counts(
            "SELECT status, COUNT(*) FROM attendance WHERE date = ?1 GROUP BY status",
            rusqlite::params![date.to_string()],
        )
    }

    /// Marking counts per status for `date` within one department.
    pub fn status_counts_for_department(
        &self,
        date: NaiveDate,
        department_id: Uuid,
    ) -> Result<Vec<(AttendanceStatus, i64)>, RotaError> {
        self.status_counts(
            "SELECT status, COUNT(*) FROM attendance
             WHERE date = ?1 AND department_id = ?2 GROUP BY status",
            rusqlite::params![date.to_string(), department_id.to_string()],
        )
    }

    /// Marking counts per status for `date`, restricted to active
    /// employees of one staff category.
    pub fn status_counts_for_category(
        &self,
        date: NaiveDate,
        category: StaffCategory,
    ) -> Result<Vec<(AttendanceStatus, i64)>, RotaError> {
        self.status_counts(
            "SELECT a.status, COUNT(*) FROM attendance a
             JOIN employees e ON a.employee_id = e.id
             WHERE a.date = ?1 AND e.category = ?2 AND e.status = 'active'
             GROUP BY a.status",
            rusqlite::params![date.to_string(), category.as_str()],
        )
    }

    pub fn count_on(&self, date: NaiveDate) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM attendance WHERE date = ?1",
                rusqlite::params![date.to_string()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    pub fn count_on_with_status(
        &self,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM attendance WHERE date = ?1 AND status = ?2",
                rusqlite::params![date.to_string(), status.as_str()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    fn status_counts(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<(AttendanceStatus, i64)>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(sql).map_err(store_err)?;
            let rows = stmt
                .query_map(params, |row| {
                    let status: String = row.get(0)?;
                    let count: i64 = row.get(1)?;
                    Ok((status, count))
                })
                .map_err(store_err)?;

            let mut counts = Vec::new();
            for row in rows {
                let (status, count) = row.map_err(store_err)?;
                counts.push((
                    parse_variant(&status, AttendanceStatus::parse, "attendance status")?,
                    count,
                ));
            }
            Ok(counts)
        })
    }
}

// =============================================================================
// LeaveRepository
// =============================================================================

const LEAVE_COLS: &str =
    "l.id, l.employee_id, l.leave_type, l.start_date, l.end_date, l.total_days, \
     l.status, l.created_at";

/// Repository for leave requests.
pub struct LeaveRepository {
    db: Arc<Database>,
}

impl LeaveRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn insert(&self, req: &LeaveRequest) -> Result<(), RotaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO leave_requests
                 (id, employee_id, leave_type, start_date, end_date, total_days, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    req.id.to_string(),
                    req.employee_id.to_string(),
                    req.leave_type.as_str(),
                    req.start_date.to_string(),
                    req.end_date.to_string(),
                    req.total_days,
                    req.status.as_str(),
                    req.created_at.timestamp(),
                ],
            )
            .map_err(|e| RotaError::Store(format!("Failed to insert leave request: {}", e)))?;
            Ok(())
        })
    }

    /// Approved requests whose date range contains `date`.
    pub fn approved_spanning(&self, date: NaiveDate) -> Result<Vec<LeaveRow>, RotaError> {
        let sql = format!(
            "SELECT {LEAVE_COLS}, e.name, e.employee_id, d.name
             FROM leave_requests l
             JOIN employees e ON l.employee_id = e.id
             LEFT JOIN departments d ON e.department_id = d.id
             WHERE l.status = 'approved' AND l.start_date <= ?1 AND l.end_date >= ?1
             ORDER BY e.name"
        );
        self.leave_query(&sql, rusqlite::params![date.to_string()])
    }

    pub fn count_approved_spanning(&self, date: NaiveDate) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM leave_requests
                 WHERE status = 'approved' AND start_date <= ?1 AND end_date >= ?1",
                rusqlite::params![date.to_string()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    pub fn count_by_status(&self, status: LeaveStatus) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM leave_requests WHERE status = ?1",
                rusqlite::params![status.as_str()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    /// Most recently filed pending requests, newest first.
    pub fn pending_recent(&self, limit: usize) -> Result<Vec<LeaveRow>, RotaError> {
        let sql = format!(
            "SELECT {LEAVE_COLS}, e.name, e.employee_id, d.name
             FROM leave_requests l
             JOIN employees e ON l.employee_id = e.id
             LEFT JOIN departments d ON e.department_id = d.id
             WHERE l.status = 'pending'
             ORDER BY l.created_at DESC LIMIT ?1"
        );
        self.leave_query(&sql, rusqlite::params![limit as i64])
    }

    fn leave_query(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<LeaveRow>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(sql).map_err(store_err)?;
            let rows = stmt
                .query_map(params, |row| Ok(row_to_leave_row(row)))
                .map_err(store_err)?;

            let mut leaves = Vec::new();
            for row in rows {
                leaves.push(row.map_err(store_err)??);
            }
            Ok(leaves)
        })
    }
}

fn row_to_leave_row(row: &Row<'_>) -> Result<LeaveRow, RotaError> {
    let id: String = col(row, 0)?;
    let employee_id: String = col(row, 1)?;
    let leave_type: String = col(row, 2)?;
    let start_date: String = col(row, 3)?;
    let end_date: String = col(row, 4)?;
    let status: String = col(row, 6)?;
    let created_at: i64 = col(row, 7)?;
    Ok(LeaveRow {
        request: LeaveRequest {
            id: parse_uuid(&id)?,
            employee_id: parse_uuid(&employee_id)?,
            leave_type: parse_variant(&leave_type, LeaveType::parse, "leave type")?,
            start_date: parse_date(&start_date)?,
            end_date: parse_date(&end_date)?,
            total_days: col(row, 5)?,
            status: parse_variant(&status, LeaveStatus::parse, "leave status")?,
            created_at: parse_instant(created_at),
        },
        employee_name: col(row, 8)?,
        employee_code: col(row, 9)?,
        department_name: col(row, 10)?,
    })
}

// =============================================================================
// RecruitmentRepository
// =============================================================================

/// Repository for job postings and applications.
pub struct RecruitmentRepository {
    db: Arc<Database>,
}

impl RecruitmentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn insert_job(&self, job: &Job) -> Result<(), RotaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO jobs (id, title, department_id, status, vacancies, posted_date)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    job.id.to_string(),
                    job.title,
                    job.department_id.to_string(),
                    job.status.as_str(),
                    job.vacancies,
                    job.posted_date.to_string(),
                ],
            )
            .map_err(|e| RotaError::Store(format!("Failed to insert job: {}", e)))?;
            Ok(())
        })
    }

    pub fn insert_application(&self, app: &Application) -> Result<(), RotaError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO applications (id, job_id, applicant_name, status, applied_date)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    app.id.to_string(),
                    app.job_id.to_string(),
                    app.applicant_name,
                    app.status.as_str(),
                    app.applied_date.timestamp(),
                ],
            )
            .map_err(|e| RotaError::Store(format!("Failed to insert application: {}", e)))?;
            Ok(())
        })
    }

    /// Open postings with department name and application count, newest first.
    pub fn open_jobs(&self) -> Result<Vec<JobRow>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT j.id, j.title, j.department_id, j.status, j.vacancies, j.posted_date,
                            d.name,
                            (SELECT COUNT(*) FROM applications a WHERE a.job_id = j.id)
                     FROM jobs j
                     JOIN departments d ON j.department_id = d.id
                     WHERE j.status = 'open'
                     ORDER BY j.posted_date DESC",
                )
                .map_err(store_err)?;

            let rows = stmt
                .query_map([], |row| Ok(row_to_job_row(row)))
                .map_err(store_err)?;

            let mut jobs = Vec::new();
            for row in rows {
                jobs.push(row.map_err(store_err)??);
            }
            Ok(jobs)
        })
    }

    pub fn count_jobs_by_status(&self, status: JobStatus) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM jobs WHERE status = ?1",
                rusqlite::params![status.as_str()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    pub fn count_applications(&self) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM applications", [], |row| row.get(0))
                .map_err(store_err)
        })
    }

    pub fn count_applications_by_status(&self, status: ApplicationStatus) -> Result<i64, RotaError> {
        self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM applications WHERE status = ?1",
                rusqlite::params![status.as_str()],
                |row| row.get(0),
            )
            .map_err(store_err)
        })
    }

    /// Application counts per review status.
    pub fn application_status_counts(&self) -> Result<Vec<(ApplicationStatus, i64)>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("SELECT status, COUNT(*) FROM applications GROUP BY status ORDER BY status")
                .map_err(store_err)?;

            let rows = stmt
                .query_map([], |row| {
                    let status: String = row.get(0)?;
                    let count: i64 = row.get(1)?;
                    Ok((status, count))
                })
                .map_err(store_err)?;

            let mut counts = Vec::new();
            for row in rows {
                let (status, count) = row.map_err(store_err)?;
                counts.push((
                    parse_variant(&status, ApplicationStatus::parse, "application status")?,
                    count,
                ));
            }
            Ok(counts)
        })
    }

    /// Most recently submitted applications with job titles, newest first.
    pub fn recent_applications(&self, limit: usize) -> Result<Vec<ApplicationRow>, RotaError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(
                    "SELECT a.id, a.job_id, a.applicant_name, a.status, a.applied_date, j.title
                     FROM applications a
                     JOIN jobs j ON a.job_id = j.id
                     ORDER BY a.applied_date DESC LIMIT ?1",
                )
                .map_err(store_err)?;

            let rows = stmt
                .query_map(rusqlite::params![limit as i64], |row| {
                    Ok(row_to_application_row(row))
                })
                .map_err(store_err)?;

            let mut apps = Vec::new();
            for row in rows {
                apps.push(row.map_err(store_err)??);
            }
            Ok(apps)
        })
    }
}

fn row_to_job_row(row: &Row<'_>) -> Result<JobRow, RotaError> {
    let id: String = col(row, 0)?;
    let department_id: String = col(row, 2)?;
    let status: String = col(row, 3)?;
    let posted_date: String = col(row, 5)?;
    Ok(JobRow {
        job: Job {
            id: parse_uuid(&id)?,
            title: col(row, 1)?,
            department_id: parse_uuid(&department_id)?,
            status: parse_variant(&status, JobStatus::parse, "job status")?,
            vacancies: col(row, 4)?,
            posted_date: parse_date(&posted_date)?,
        },
        department_name: col(row, 6)?,
        application_count: col(row, 7)?,
    })
}

fn row_to_application_row(row: &Row<'_>) -> Result<ApplicationRow, RotaError> {
    let id: String = col(row, 0)?;
    let job_id: String = col(row, 1)?;
    let status: String = col(row, 3)?;
    let applied_date: i64 = col(row, 4)?;
    Ok(ApplicationRow {
        application: Application {
            id: parse_uuid(&id)?,
            job_id: parse_uuid(&job_id)?,
            applicant_name: col(row, 2)?,
            status: parse_variant(&status, ApplicationStatus::parse, "application status")?,
            applied_date: parse_instant(applied_date),
        },
        job_title: col(row, 5)?,
    })
}

// =============================================================================
// Tests
// =============================================================================
