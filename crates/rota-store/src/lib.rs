//! SQLite-backed record store for Rota.
//!
//! Holds the HR records (departments, employees, attendance, leave,
//! recruitment) and exposes typed read queries plus the write operations
//! used to populate the store. The assistant core only ever reads.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{
    ApplicationRow, AttendanceRepository, AttendanceRow, DepartmentRepository, EmployeeRepository,
    JobRow, LeaveRepository, LeaveRow, RecruitmentRepository, StaffRow,
};
