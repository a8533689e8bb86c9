use super::backend::FakeBackend;
use anyhow::Result;
use apicheck_core::Resource;

/// Declarative assertions on suite results and backend state
pub enum Assertion {
    // Last suite report
    Passed(usize),
    Total(usize),
    Succeeded,
    NotSucceeded,
    SummaryLine(String),
    CasePassed(String),
    CaseFailed(String),
    CaseFailedWith { case: String, text: String },

    // Last run aborted before any case ran
    Aborted { contains: String },

    // Sessions from `Login` steps
    SessionsShareTenant,
    SessionCount(usize),

    // Backend state
    RecordCount { resource: Resource, count: usize },
    RecordField {
        resource: Resource,
        field: String,
        value: String,
    },
    NoAuthorizedRequests,
    RequestMade { method: String, path_prefix: String },

    // Custom
    Custom(Box<dyn Fn(&FakeBackend) -> Result<()> + Send + Sync>),
}

impl std::fmt::Debug for Assertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed(n) => write!(f, "Passed({})", n),
            Self::Total(n) => write!(f, "Total({})", n),
            Self::Succeeded => write!(f, "Succeeded"),
            Self::NotSucceeded => write!(f, "NotSucceeded"),
            Self::SummaryLine(s) => write!(f, "SummaryLine({:?})", s),
            Self::CasePassed(s) => write!(f, "CasePassed({:?})", s),
            Self::CaseFailed(s) => write!(f, "CaseFailed({:?})", s),
            Self::CaseFailedWith { case, text } => {
                write!(f, "CaseFailedWith {{ case: {:?}, text: {:?} }}", case, text)
            }
            Self::Aborted { contains } => write!(f, "Aborted {{ contains: {:?} }}", contains),
            Self::SessionsShareTenant => write!(f, "SessionsShareTenant"),
            Self::SessionCount(n) => write!(f, "SessionCount({})", n),
            Self::RecordCount { resource, count } => {
                write!(f, "RecordCount {{ resource: {}, count: {} }}", resource, count)
            }
            Self::RecordField {
                resource,
                field,
                value,
            } => write!(
                f,
                "RecordField {{ resource: {}, field: {:?}, value: {:?} }}",
                resource, field, value
            ),
            Self::NoAuthorizedRequests => write!(f, "NoAuthorizedRequests"),
            Self::RequestMade {
                method,
                path_prefix,
            } => write!(
                f,
                "RequestMade {{ method: {:?}, path_prefix: {:?} }}",
                method, path_prefix
            ),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}
