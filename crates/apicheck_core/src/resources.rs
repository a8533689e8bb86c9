//! Resource catalogue, typed records and synthetic payloads.

use crate::client::{ApiPath, ApiResponse};
use crate::error::{ApiCheckError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Resource collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Students,
    Classes,
    Instructors,
    CoursePackages,
    Enrollments,
    SalaryPolicies,
}

impl Resource {
    /// Every resource, in suite order.
    pub const ALL: [Resource; 6] = [
        Resource::Students,
        Resource::Classes,
        Resource::Instructors,
        Resource::CoursePackages,
        Resource::Enrollments,
        Resource::SalaryPolicies,
    ];

    /// URL segment under `/api/`.
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Classes => "classes",
            Self::Instructors => "instructors",
            Self::CoursePackages => "course-packages",
            Self::Enrollments => "enrollments",
            Self::SalaryPolicies => "salary-policies",
        }
    }

    /// Collection path, e.g. `/api/course-packages`.
    pub fn path(&self) -> ApiPath {
        ApiPath::new().segment("api").segment(self.segment())
    }

    /// Path of a single record.
    pub fn item_path(&self, id: &RecordId) -> ApiPath {
        self.path().segment(id)
    }

    /// Key the list endpoint wraps its array under.
    pub fn collection_key(&self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Classes => "classes",
            Self::Instructors => "instructors",
            Self::CoursePackages => "course_packages",
            Self::Enrollments => "enrollments",
            Self::SalaryPolicies => "salary_policies",
        }
    }

    /// Key a single created or fetched record is wrapped under.
    pub fn entity_key(&self) -> &'static str {
        match self {
            Self::Students => "student",
            Self::Classes => "class",
            Self::Instructors => "instructor",
            Self::CoursePackages => "course_package",
            Self::Enrollments => "enrollment",
            Self::SalaryPolicies => "salary_policy",
        }
    }

    /// Label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Students => "학생",
            Self::Classes => "클래스",
            Self::Instructors => "강사",
            Self::CoursePackages => "코스패키지",
            Self::Enrollments => "수강등록",
            Self::SalaryPolicies => "급여정책",
        }
    }

    /// List path with page size and optional tenant scope.
    pub fn list_path(&self, limit: u32, tenant_id: Option<&str>) -> ApiPath {
        let path = self.path().query("limit", limit);
        match tenant_id {
            Some(tenant) => path.query("tenantId", tenant),
            None => path,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// Record identifier; the backend uses UUID strings but numeric ids are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(i64),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub student_number: Option<String>,
    #[serde(default)]
    pub grade_level: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Student {
    /// Whether the record still counts as an active student.
    pub fn is_active(&self) -> bool {
        matches!(self.status.as_deref(), None | Some("active"))
    }
}

/// Minimal view shared by classes, instructors, course packages and salary policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRecord {
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Finds `key` at the top level of `body`, or inside a `data` envelope.
pub fn lookup<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    body.get(key)
        .or_else(|| body.get("data").and_then(|data| data.get(key)))
}

/// Decodes the value under `key` into `T`.
pub fn extract<T: DeserializeOwned>(response: &ApiResponse, key: &str, context: &str) -> Result<T> {
    let value = lookup(&response.body, key).ok_or_else(|| ApiCheckError::MissingField {
        field: key.to_string(),
        context: context.to_string(),
    })?;
    serde_json::from_value(value.clone()).map_err(|e| ApiCheckError::Malformed {
        field: key.to_string(),
        context: context.to_string(),
        reason: e.to_string(),
    })
}

/// Length of the array under `key`; absent or non-array values count as empty.
pub fn collection_len(response: &ApiResponse, key: &str) -> usize {
    lookup(&response.body, key)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

/// Payload for `POST /api/students`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStudent {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    pub student_number: String,
    pub phone: String,
    pub email: String,
    pub grade_level: String,
    pub status: String,
}

impl NewStudent {
    /// Synthetic student made unique by the Unix timestamp `now`.
    pub fn generate(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            name: format!("테스트학생_{now}"),
            student_number: format!("TEST{:04}", now.rem_euclid(10_000)),
            phone: "010-1234-5678".to_string(),
            email: "test.student@example.com".to_string(),
            grade_level: "중1".to_string(),
            status: "active".to_string(),
        }
    }
}

/// Payload for `PUT /api/students/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentUpdate {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    pub grade_level: String,
}

impl StudentUpdate {
    /// Renames the student and moves them to `중2`.
    pub fn generate(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            name: format!("수정된학생_{now}"),
            grade_level: "중2".to_string(),
        }
    }
}

/// Payload for `POST /api/classes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewClass {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    pub grade: String,
    pub course: String,
    pub max_students: u32,
    pub status: String,
}

impl NewClass {
    pub fn generate(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            name: format!("테스트클래스_{now}"),
            grade: "중1".to_string(),
            course: "수학".to_string(),
            max_students: 20,
            status: "active".to_string(),
        }
    }
}

/// Payload for `POST /api/instructors`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInstructor {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub status: String,
}

impl NewInstructor {
    pub fn generate(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            name: format!("테스트강사_{now}"),
            email: format!("instructor{now}@example.com"),
            phone: "010-9876-5432".to_string(),
            specialization: "수학".to_string(),
            status: "active".to_string(),
        }
    }
}

/// Payload for `POST /api/course-packages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCoursePackage {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    pub price: u64,
    pub billing_type: String,
    pub currency: String,
    pub hours: u32,
    pub sessions: u32,
    pub is_active: bool,
}

impl NewCoursePackage {
    pub fn generate(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            name: format!("테스트패키지_{now}"),
            price: 100_000,
            billing_type: "monthly".to_string(),
            currency: "KRW".to_string(),
            hours: 40,
            sessions: 10,
            is_active: true,
        }
    }
}

/// Payload for `POST /api/salary-policies`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSalaryPolicy {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    pub name: String,
    pub policy_type: String,
    pub base_amount: u64,
    pub is_active: bool,
}

impl NewSalaryPolicy {
    pub fn generate(tenant_id: &str, now: i64) -> Self {
        Self {
            tenant_id: tenant_id.to_string(),
            name: format!("테스트정책_{now}"),
            policy_type: "hourly".to_string(),
            base_amount: 50_000,
            is_active: true,
        }
    }
}
