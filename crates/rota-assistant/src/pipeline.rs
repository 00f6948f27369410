//! Query pipeline: classify, retrieve, generate.
//!
//! Control flow is strictly linear per call: text in, one classification,
//! one retrieval, one generation, text out. Retrieval ([`HrAssistant::process`])
//! and generation ([`HrAssistant::answer`]) are split so callers can
//! log or persist the structured context independently of which strategy
//! produced the answer text, and so tests can exercise each half alone.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use rota_core::config::AssistantConfig;
use rota_store::Database;

use crate::context::QueryContext;
use crate::error::AssistantError;
use crate::generate::ResponseGenerator;
use crate::intent::{classify, Intent};
use crate::retriever::ContextRetriever;

/// The structured result of one classified and retrieved query.
#[derive(Clone, Debug, Serialize)]
pub struct QueryOutcome {
    pub intent: Intent,
    pub context: QueryContext,
    pub original_query: String,
    pub timestamp: DateTime<Utc>,
}

/// The HR assistant pipeline.
///
/// Holds no mutable state: `today` is fixed at construction and every
/// call recomputes its context from the record store fresh.
pub struct HrAssistant {
    retriever: ContextRetriever,
    generator: ResponseGenerator,
    config: AssistantConfig,
}

impl HrAssistant {
    /// Wire the pipeline against a record store, fixed to `today`.
    pub fn new(db: Arc<Database>, config: AssistantConfig, today: NaiveDate) -> Self {
        let retriever = ContextRetriever::new(db, today);
        let generator = ResponseGenerator::new(&config.remote);
        Self {
            retriever,
            generator,
            config,
        }
    }

    /// Classify a query and retrieve its context snapshot.
    pub fn process(&self, query: &str) -> Result<QueryOutcome, AssistantError> {
        if !self.config.enabled {
            return Err(AssistantError::Disabled);
        }
        if query.is_empty() {
            return Err(AssistantError::EmptyQuery);
        }
        if query.len() > self.config.max_query_length {
            return Err(AssistantError::QueryTooLong(self.config.max_query_length));
        }

        let intent = classify(query);
        debug!(intent = intent.as_str(), "Query classified");

        let context = self.retriever.retrieve(intent, query)?;

        Ok(QueryOutcome {
            intent,
            context,
            original_query: query.to_string(),
            timestamp: Utc::now(),
        })
    }

    /// Generate the answer text for an already-retrieved context.
    ///
    /// Never fails and never returns an empty string.
    pub async fn answer(&self, query: &str, context: &QueryContext) -> String {
        self.generator.generate(query, context).await
    }

    /// Process a query end to end.
    pub async fn ask(&self, query: &str) -> Result<(QueryOutcome, String), AssistantError> {
        let outcome = self.process(query)?;
        let answer = self.answer(query, &outcome.context).await;
        Ok((outcome, answer))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rota_core::config::RemoteConfig;
    use rota_core::types::{
        Department, Employee, EmployeeStatus, LeaveRequest, LeaveStatus, LeaveType, Location,
        Shift, StaffCategory,
    };
    use rota_store::{DepartmentRepository, EmployeeRepository, LeaveRepository};
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn seeded_db() -> Arc<Database> {
        let db = Arc::new(Database::in_memory().unwrap());
        let depts = DepartmentRepository::new(db.clone());
        let emps = EmployeeRepository::new(db.clone());
        let leaves = LeaveRepository::new(db.clone());

        let cardio = Department {
            id: Uuid::new_v4(),
            name: "Cardiology".to_string(),
            code: "CARD".to_string(),
            location: Location::BlockA,
            head_name: Some("Dr. Rao".to_string()),
            total_beds: 40,
            is_active: true,
        };
        depts.insert(&cardio).unwrap();

        let asha = Employee {
            id: Uuid::new_v4(),
            employee_id: "EMP-0001".to_string(),
            name: "Asha Nair".to_string(),
            department_id: Some(cardio.id),
            category: StaffCategory::Nursing,
            designation: "Staff Nurse".to_string(),
            specialization: String::new(),
            shift: Shift::Morning,
            status: EmployeeStatus::Active,
        };
        let ravi = Employee {
            id: Uuid::new_v4(),
            employee_id: "EMP-0002".to_string(),
            name: "Ravi Menon".to_string(),
            department_id: None,
            category: StaffCategory::Medical,
            designation: "Registrar".to_string(),
            specialization: "General Medicine".to_string(),
            shift: Shift::General,
            status: EmployeeStatus::Active,
        };
        emps.insert(&asha).unwrap();
        emps.insert(&ravi).unwrap();

        for (emp, leave_type) in [(&asha, LeaveType::Sick), (&ravi, LeaveType::Casual)] {
            leaves
                .insert(&LeaveRequest {
                    id: Uuid::new_v4(),
                    employee_id: emp.id,
                    leave_type,
                    start_date: today(),
                    end_date: today(),
                    total_days: 1,
                    status: LeaveStatus::Approved,
                    created_at: Utc::now(),
                })
                .unwrap();
        }

        db
    }

    fn assistant() -> HrAssistant {
        HrAssistant::new(seeded_db(), AssistantConfig::default(), today())
    }

    // ---- Validation ----

    #[test]
    fn test_disabled_returns_error() {
        let config = AssistantConfig {
            enabled: false,
            ..AssistantConfig::default()
        };
        let assistant = HrAssistant::new(seeded_db(), config, today());
        assert!(matches!(
            assistant.process("who is on leave today"),
            Err(AssistantError::Disabled)
        ));
    }

    #[test]
    fn test_empty_query_returns_error() {
        assert!(matches!(
            assistant().process(""),
            Err(AssistantError::EmptyQuery)
        ));
    }

    #[test]
    fn test_too_long_query_returns_error() {
        let assistant = assistant();
        let long = "a".repeat(2001);
        assert!(matches!(
            assistant.process(&long),
            Err(AssistantError::QueryTooLong(2000))
        ));
        // Exactly at the limit is fine.
        let at_limit = "a".repeat(2000);
        assert!(assistant.process(&at_limit).is_ok());
    }

    // ---- End to end ----

    #[tokio::test]
    async fn test_leave_today_end_to_end() {
        let (outcome, answer) = assistant()
            .ask("How many employees are on leave today?")
            .await
            .unwrap();

        assert_eq!(outcome.intent, Intent::LeaveToday);
        assert_eq!(outcome.original_query, "How many employees are on leave today?");

        let QueryContext::LeaveToday {
            total_on_leave,
            ref employees,
            ..
        } = outcome.context
        else {
            panic!("wrong variant");
        };
        assert_eq!(total_on_leave, 2);
        assert_eq!(employees.len(), 2);

        // No credential configured, so this is the fallback text; it must
        // enumerate both employees with department and leave type.
        assert!(answer.contains("Asha Nair"));
        assert!(answer.contains("Cardiology"));
        assert!(answer.contains("Sick Leave"));
        assert!(answer.contains("Ravi Menon"));
        assert!(answer.contains("N/A"));
        assert!(answer.contains("Casual Leave"));
    }

    #[tokio::test]
    async fn test_unknown_department_yields_all_departments_aggregate() {
        let (outcome, answer) = assistant()
            .ask("attendance for Radiology department")
            .await
            .unwrap();

        assert_eq!(outcome.intent, Intent::DepartmentAttendance);
        assert!(matches!(
            outcome.context,
            QueryContext::AllDepartmentsAttendance { .. }
        ));
        assert!(!answer.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_remote_still_answers_deterministically() {
        let config = AssistantConfig {
            remote: RemoteConfig {
                api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
                api_key: Some("key".to_string()),
                timeout_secs: 2,
                ..RemoteConfig::default()
            },
            ..AssistantConfig::default()
        };
        let assistant = HrAssistant::new(seeded_db(), config, today());

        let (_, first) = assistant.ask("who is on leave today").await.unwrap();
        let (_, second) = assistant.ask("who is on leave today").await.unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert!(first.contains("Asha Nair"));
    }

    #[tokio::test]
    async fn test_general_query_end_to_end() {
        let (outcome, answer) = assistant().ask("tell me something").await.unwrap();
        assert_eq!(outcome.intent, Intent::General);
        assert!(matches!(outcome.context, QueryContext::GeneralSummary { .. }));
        assert!(answer.contains("HR Dashboard Summary"));
    }

    #[test]
    fn test_outcome_serializes_with_intent_and_context_tags() {
        let outcome = assistant().process("who is on leave today").unwrap();
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["intent"], "leave_today");
        assert_eq!(json["context"]["type"], "leave_today");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_process_is_deterministic_for_same_store_state() {
        let assistant = assistant();
        let a = assistant.process("who is on leave today").unwrap();
        let b = assistant.process("who is on leave today").unwrap();
        assert_eq!(a.intent, b.intent);
        assert_eq!(a.context, b.context);
    }
}
