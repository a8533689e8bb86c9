//! apicheck core library
//!
//! Drives a remote multi-tenant CRUD API one blocking call at a time and
//! classifies each response:
//! - guard suite: every resource endpoint rejects anonymous callers
//! - crud suite: log in, then list/create/read/update/delete each resource
//!
//! # Quick Start
//!
//! ```no_run
//! use apicheck_core::{run_crud_suite, system_now, ApiClient, Config};
//!
//! let config = Config::default();
//! let client = ApiClient::new(&config.server).unwrap();
//! let report = run_crud_suite(&client, &config, &system_now).unwrap();
//! println!("{}", report.summary_line());
//! ```
//!
//! # Results
//!
//! Every call returns either a JSON object body or a [`RequestError`]. A body
//! carrying an `error` field is folded into the error side, so cases only
//! need to check one thing:
//!
//! ```
//! use apicheck_core::{ErrorKind, RequestError};
//!
//! let err = RequestError::new(ErrorKind::Connection, "Connection failed");
//! assert!(err.is_transport());
//! ```

mod cases;
mod client;
mod config;
mod error;
mod guard;
mod resources;
mod session;
mod suite;

pub use cases::{
    classes_crud, course_packages_crud, crud_suite, enrollments_crud, instructors_crud,
    run_crud_suite, salary_policies_crud, students_crud, CrudContext,
};
pub use client::{describe_error, ApiClient, ApiPath, ApiResponse, Method, RequestResult};
pub use config::{Config, Credentials, ServerConfig, SuiteConfig, DEFAULT_CONFIG_FILE};
pub use error::{excerpt, ApiCheckError, ErrorKind, RequestError, Result, RAW_EXCERPT_CHARS};
pub use guard::{expect_rejected, guard_suite, health_check, resource_guarded, run_guard_suite};
pub use resources::{
    collection_len, extract, lookup, NamedRecord, NewClass, NewCoursePackage, NewInstructor,
    NewSalaryPolicy, NewStudent, RecordId, Resource, Student, StudentUpdate,
};
pub use session::{login, Session, UserProfile, LOGIN_PATH};
pub use suite::{CaseOutcome, Suite, SuiteReport, TestCase};

/// Time provider trait for testing.
///
/// Synthetic records embed the current Unix timestamp to stay unique across
/// runs; tests inject a fixed clock to make payloads predictable.
pub trait TimeProvider: Send + Sync {
    /// Returns the current Unix timestamp in seconds.
    fn now(&self) -> i64;
}

impl<F> TimeProvider for F
where
    F: Fn() -> i64 + Send + Sync,
{
    fn now(&self) -> i64 {
        self()
    }
}

/// Current Unix timestamp in seconds from the system clock.
pub fn system_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
