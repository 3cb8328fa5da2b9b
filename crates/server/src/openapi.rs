use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct StudentInputDoc { pub first_name: String, pub last_name: String }

#[derive(ToSchema)]
pub struct StudentRecordDoc { pub first_name: String, pub last_name: String }

#[derive(ToSchema)]
pub struct StudentDoc { pub id: i64, pub first_name: String, pub last_name: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub detail: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::create_student,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::update_student,
    ),
    components(
        schemas(
            HealthResponse,
            StudentInputDoc,
            StudentRecordDoc,
            StudentDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
