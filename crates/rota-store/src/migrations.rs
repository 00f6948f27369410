//! Database schema migrations.
//!
//! Applies the initial HR schema: departments, employees, attendance,
//! leave_requests, jobs, applications, and the schema_migrations table.

use rusqlite::Connection;
use tracing::info;

use rota_core::RotaError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), RotaError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| RotaError::Store(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| RotaError::Store(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
///
/// Dates are stored as ISO-8601 TEXT so that lexicographic comparison
/// matches chronological order; instants are stored as epoch seconds.
fn apply_v1(conn: &Connection) -> Result<(), RotaError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS departments (
            id          TEXT PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL UNIQUE,
            code        TEXT NOT NULL UNIQUE,
            location    TEXT NOT NULL
                        CHECK (location IN ('main_building', 'block_a', 'block_b',
                                            'block_c', 'emergency_wing', 'research_center')),
            head_name   TEXT,
            total_beds  INTEGER NOT NULL DEFAULT 0,
            is_active   INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS employees (
            id              TEXT PRIMARY KEY NOT NULL,
            employee_id     TEXT NOT NULL UNIQUE,
            name            TEXT NOT NULL,
            department_id   TEXT REFERENCES departments(id),
            category        TEXT NOT NULL
                            CHECK (category IN ('medical', 'nursing', 'paramedical', 'admin_support')),
            designation     TEXT NOT NULL DEFAULT '',
            specialization  TEXT NOT NULL DEFAULT '',
            shift           TEXT NOT NULL DEFAULT 'general'
                            CHECK (shift IN ('morning', 'afternoon', 'night', 'general', 'rotating')),
            status          TEXT NOT NULL DEFAULT 'active'
                            CHECK (status IN ('active', 'on_leave', 'suspended', 'resigned', 'terminated'))
        );
        CREATE INDEX IF NOT EXISTS idx_employees_status ON employees(status);
        CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department_id);

        -- One marking per employee per date at most.
        CREATE TABLE IF NOT EXISTS attendance (
            id              TEXT PRIMARY KEY NOT NULL,
            employee_id     TEXT NOT NULL REFERENCES employees(id),
            department_id   TEXT REFERENCES departments(id),
            date            TEXT NOT NULL,
            status          TEXT NOT NULL
                            CHECK (status IN ('present', 'absent', 'late', 'half_day', 'on_leave')),
            check_in        TEXT,
            check_out       TEXT,
            UNIQUE (employee_id, date)
        );
        CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance(date);

        CREATE TABLE IF NOT EXISTS leave_requests (
            id          TEXT PRIMARY KEY NOT NULL,
            employee_id TEXT NOT NULL REFERENCES employees(id),
            leave_type  TEXT NOT NULL
                        CHECK (leave_type IN ('sick', 'casual', 'earned',
                                              'maternity', 'paternity', 'emergency')),
            start_date  TEXT NOT NULL,
            end_date    TEXT NOT NULL,
            total_days  INTEGER NOT NULL,
            status      TEXT NOT NULL DEFAULT 'pending'
                        CHECK (status IN ('pending', 'approved', 'rejected', 'cancelled')),
            created_at  INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_leave_status ON leave_requests(status);

        CREATE TABLE IF NOT EXISTS jobs (
            id            TEXT PRIMARY KEY NOT NULL,
            title         TEXT NOT NULL,
            department_id TEXT NOT NULL REFERENCES departments(id),
            status        TEXT NOT NULL DEFAULT 'open'
                          CHECK (status IN ('open', 'closed', 'on_hold')),
            vacancies     INTEGER NOT NULL DEFAULT 1,
            posted_date   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS applications (
            id             TEXT PRIMARY KEY NOT NULL,
            job_id         TEXT NOT NULL REFERENCES jobs(id),
            applicant_name TEXT NOT NULL,
            status         TEXT NOT NULL DEFAULT 'submitted'
                           CHECK (status IN ('submitted', 'under_review', 'shortlisted',
                                             'interview_scheduled', 'selected', 'rejected', 'withdrawn')),
            applied_date   INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_applications_applied ON applications(applied_date);

        INSERT INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| RotaError::Store(format!("Migration v1 failed: {}", e)))?;

    Ok(())
}
