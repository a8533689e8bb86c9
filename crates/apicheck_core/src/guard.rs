//! Unauthenticated access checks.
//!
//! Every resource endpoint must refuse callers without a bearer token with
//! `401` and an `error` body.

use crate::client::{ApiClient, ApiPath, Method};
use crate::error::{ApiCheckError, Result};
use crate::resources::Resource;
use crate::suite::{Suite, SuiteReport};
use serde_json::json;
use tracing::{error, info};

/// Status every anonymous call must be answered with.
pub const UNAUTHORIZED: u16 = 401;

/// Confirms the server answers at all. Any HTTP status counts as reachable.
pub fn health_check(client: &ApiClient) -> Result<u16> {
    info!("=== 서버 상태 확인 ===");
    let (status, _) = client.probe(Method::Get, &ApiPath::from("/"), None)?;
    Ok(status)
}

/// Calls `path` without credentials and requires a 401 carrying an `error` field.
pub fn expect_rejected(
    client: &ApiClient,
    method: Method,
    path: &ApiPath,
    payload: Option<&serde_json::Value>,
) -> Result<()> {
    let (status, body) = client.probe(method, path, payload)?;
    if status != UNAUTHORIZED {
        error!("{} {} 인증 없이 {} 응답", method, path, status);
        return Err(ApiCheckError::UnexpectedStatus {
            path: path.to_string(),
            expected: UNAUTHORIZED,
            actual: status,
        });
    }
    match body {
        Some(body) if body.contains_key("error") => Ok(()),
        _ => Err(ApiCheckError::MissingField {
            field: "error".to_string(),
            context: format!("401 response of {path}"),
        }),
    }
}

/// Checks one resource's list endpoint; students additionally check create.
pub fn resource_guarded(client: &ApiClient, resource: Resource, limit: u32) -> Result<()> {
    info!("=== {} 인증 필요 확인 ===", resource.label());
    expect_rejected(client, Method::Get, &resource.list_path(limit, None), None)?;

    if resource == Resource::Students {
        let payload = json!({
            "tenantId": "test-tenant-id",
            "name": "테스트 학생",
            "student_number": "TEST001",
        });
        expect_rejected(client, Method::Post, &resource.path(), Some(&payload))?;
    }
    Ok(())
}

/// One case per resource; all of them must pass.
pub fn guard_suite(client: &ApiClient, limit: u32) -> Suite<'_> {
    Resource::ALL
        .iter()
        .fold(Suite::new("인증 필요 API 테스트", 1.0), |suite, &resource| {
            let name = format!("{} 인증 확인", resource.label());
            suite.case(&name, move || resource_guarded(client, resource, limit))
        })
}

/// Health check, then [`guard_suite`].
///
/// An unreachable server is returned as an error and no case runs.
pub fn run_guard_suite(client: &ApiClient, limit: u32) -> Result<SuiteReport> {
    health_check(client).map_err(|err| {
        error!("서버가 응답하지 않습니다. 테스트를 중단합니다.");
        err
    })?;
    Ok(guard_suite(client, limit).run())
}
