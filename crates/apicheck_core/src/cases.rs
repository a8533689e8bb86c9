//! Authenticated CRUD cases, one per resource.
//!
//! Each case walks its resource as far as the backend allows: list, then
//! create, and for students also read, update and soft delete. The first
//! failing step ends the case.

use crate::client::{ApiClient, ApiPath, ApiResponse, Method};
use crate::config::{Config, SuiteConfig};
use crate::error::{ApiCheckError, Result};
use crate::resources::{
    collection_len, extract, NamedRecord, NewClass, NewCoursePackage, NewInstructor,
    NewSalaryPolicy, NewStudent, Resource, Student, StudentUpdate,
};
use crate::session::{login, Session};
use crate::suite::{Suite, SuiteReport};
use crate::TimeProvider;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

/// Status that confirms a deleted record is gone.
const NOT_FOUND: u16 = 404;

/// Everything a CRUD case needs, passed explicitly.
pub struct CrudContext<'a> {
    pub client: &'a ApiClient,
    pub session: &'a Session,
    pub config: &'a SuiteConfig,
    pub clock: &'a dyn TimeProvider,
}

impl CrudContext<'_> {
    fn tenant(&self) -> Result<&str> {
        self.session.tenant_id().ok_or_else(|| {
            warn!("테넌트 ID가 없어 테스트를 건너뜁니다");
            ApiCheckError::Skipped("session has no tenant id".to_string())
        })
    }

    fn call(
        &self,
        method: Method,
        path: &ApiPath,
        payload: Option<&Value>,
    ) -> Result<ApiResponse> {
        Ok(self
            .client
            .request(Some(self.session), method, path, payload, 200)?)
    }

    /// Lists `resource` and logs how many records came back.
    fn list(&self, resource: Resource, tenant_id: Option<&str>) -> Result<usize> {
        let path = resource.list_path(self.config.list_limit, tenant_id);
        let response = self.call(Method::Get, &path, None)?;
        let count = collection_len(&response, resource.collection_key());
        info!("   조회된 {} 수: {}", resource.label(), count);
        Ok(count)
    }

    /// Posts a synthetic record and returns the response.
    fn create<T: Serialize>(&self, resource: Resource, record: &T) -> Result<ApiResponse> {
        let payload = to_payload(record)?;
        let response = self.call(Method::Post, &resource.path(), Some(&payload))?;
        info!("   {} 생성 성공", resource.label());
        Ok(response)
    }
}

fn to_payload<T: Serialize>(record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| ApiCheckError::Malformed {
        field: "payload".to_string(),
        context: "request".to_string(),
        reason: e.to_string(),
    })
}

/// Students: list, create, read, update, soft delete.
pub fn students_crud(ctx: &CrudContext) -> Result<()> {
    let resource = Resource::Students;
    info!("=== 학생 CRUD 테스트 ===");

    info!("1. 학생 목록 조회");
    ctx.list(resource, ctx.session.tenant_id())?;

    let tenant = ctx.tenant()?;

    info!("2. 학생 생성 테스트");
    let created = ctx.create(resource, &NewStudent::generate(tenant, ctx.clock.now()))?;
    let student: Student = extract(&created, resource.entity_key(), "student create")?;
    info!("   학생 생성 성공: {} (ID: {})", student.name, student.id);

    info!("3. 개별 학생 조회");
    let item = resource.item_path(&student.id);
    let fetched = ctx.call(Method::Get, &item.clone().query("tenantId", tenant), None)?;
    let fetched: Student = extract(&fetched, resource.entity_key(), "student read")?;
    if fetched.name != student.name {
        return Err(ApiCheckError::Mismatch {
            field: "student.name".to_string(),
            expected: student.name,
            actual: fetched.name,
        });
    }
    info!("   개별 조회 성공: {}", fetched.name);

    info!("4. 학생 정보 수정");
    let update = StudentUpdate::generate(tenant, ctx.clock.now());
    let updated = ctx.call(Method::Put, &item, Some(&to_payload(&update)?))?;
    let updated: Student = extract(&updated, resource.entity_key(), "student update")?;
    if updated.grade_level.as_deref() != Some(update.grade_level.as_str()) {
        return Err(ApiCheckError::Mismatch {
            field: "student.grade_level".to_string(),
            expected: update.grade_level,
            actual: updated.grade_level.unwrap_or_default(),
        });
    }
    info!("   수정 성공: {}", updated.name);

    info!("5. 학생 삭제 (소프트)");
    let delete = item
        .clone()
        .query("tenantId", tenant)
        .query("forceDelete", false);
    ctx.call(Method::Delete, &delete, None)?;
    info!("   소프트 삭제 성공");

    if ctx.config.verify_soft_delete {
        verify_soft_deleted(ctx, &item, tenant)?;
    }

    Ok(())
}

/// Re-fetches a deleted student; passes when it answers 404 or comes back
/// no longer active. Any other failure fails the check.
fn verify_soft_deleted(ctx: &CrudContext, item: &ApiPath, tenant: &str) -> Result<()> {
    info!("6. 소프트 삭제 확인");
    let path = item.clone().query("tenantId", tenant);
    match ctx
        .client
        .request(Some(ctx.session), Method::Get, &path, None, 200)
    {
        Ok(response) => {
            let student: Student =
                extract(&response, Resource::Students.entity_key(), "student re-read")?;
            if student.is_active() {
                error!("   삭제된 학생이 여전히 활성 상태입니다");
                return Err(ApiCheckError::Mismatch {
                    field: "student.status".to_string(),
                    expected: "inactive".to_string(),
                    actual: student.status.unwrap_or_else(|| "active".to_string()),
                });
            }
            info!(
                "   상태 확인: {}",
                student.status.as_deref().unwrap_or("unknown")
            );
            Ok(())
        }
        Err(err) if err.status == Some(NOT_FOUND) => {
            info!("   삭제된 학생은 조회되지 않습니다");
            Ok(())
        }
        Err(err) => {
            error!("   삭제 확인 조회 실패: {}", err);
            Err(err.into())
        }
    }
}

/// Classes: list, create, read back.
pub fn classes_crud(ctx: &CrudContext) -> Result<()> {
    let resource = Resource::Classes;
    info!("=== 클래스 CRUD 테스트 ===");

    let tenant = ctx.tenant()?;
    ctx.list(resource, Some(tenant))?;

    let created = ctx.create(resource, &NewClass::generate(tenant, ctx.clock.now()))?;
    let class: NamedRecord = extract(&created, resource.entity_key(), "class create")?;
    info!(
        "   클래스 생성 성공: {}",
        class.name.as_deref().unwrap_or("-")
    );

    let path = resource.item_path(&class.id).query("tenantId", tenant);
    ctx.call(Method::Get, &path, None)?;
    info!("   개별 조회 성공");
    Ok(())
}

/// Instructors: list, create.
pub fn instructors_crud(ctx: &CrudContext) -> Result<()> {
    info!("=== 강사 CRUD 테스트 ===");
    let tenant = ctx.tenant()?;
    ctx.list(Resource::Instructors, Some(tenant))?;
    ctx.create(
        Resource::Instructors,
        &NewInstructor::generate(tenant, ctx.clock.now()),
    )?;
    Ok(())
}

/// Course packages: list, create.
pub fn course_packages_crud(ctx: &CrudContext) -> Result<()> {
    info!("=== 코스패키지 CRUD 테스트 ===");
    let tenant = ctx.tenant()?;
    ctx.list(Resource::CoursePackages, Some(tenant))?;
    ctx.create(
        Resource::CoursePackages,
        &NewCoursePackage::generate(tenant, ctx.clock.now()),
    )?;
    Ok(())
}

/// Enrollments: list only.
pub fn enrollments_crud(ctx: &CrudContext) -> Result<()> {
    info!("=== 수강등록 CRUD 테스트 ===");
    let tenant = ctx.tenant()?;
    ctx.list(Resource::Enrollments, Some(tenant))?;
    Ok(())
}

/// Salary policies: list, create.
pub fn salary_policies_crud(ctx: &CrudContext) -> Result<()> {
    info!("=== 급여정책 CRUD 테스트 ===");
    let tenant = ctx.tenant()?;
    ctx.list(Resource::SalaryPolicies, Some(tenant))?;
    ctx.create(
        Resource::SalaryPolicies,
        &NewSalaryPolicy::generate(tenant, ctx.clock.now()),
    )?;
    Ok(())
}

/// The six CRUD cases in reporting order.
pub fn crud_suite<'a>(ctx: &'a CrudContext<'a>) -> Suite<'a> {
    Suite::new("인증된 CRUD API 테스트", ctx.config.pass_threshold)
        .case("학생 CRUD", move || students_crud(ctx))
        .case("클래스 CRUD", move || classes_crud(ctx))
        .case("강사 CRUD", move || instructors_crud(ctx))
        .case("코스패키지 CRUD", move || course_packages_crud(ctx))
        .case("수강등록 CRUD", move || enrollments_crud(ctx))
        .case("급여정책 CRUD", move || salary_policies_crud(ctx))
}

/// Logs in, then runs [`crud_suite`].
///
/// A failed login is returned as an error and no resource case runs.
pub fn run_crud_suite(
    client: &ApiClient,
    config: &Config,
    clock: &dyn TimeProvider,
) -> Result<SuiteReport> {
    let session = login(client, &config.credentials).map_err(|err| {
        error!("로그인 실패로 테스트를 중단합니다.");
        err
    })?;

    let ctx = CrudContext {
        client,
        session: &session,
        config: &config.suite,
        clock,
    };
    let report = crud_suite(&ctx).run();
    Ok(report)
}
