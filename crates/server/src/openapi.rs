use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDoc {
    pub id: i64,
    pub hospital_name: String,
    pub patient_count: i64,
    pub location: String,
}

/// Absent fields are stored as empty string / zero.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HospitalInputDoc {
    pub hospital_name: Option<String>,
    pub patient_count: Option<i64>,
    pub location: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::hospitals::list,
        crate::routes::hospitals::get,
        crate::routes::hospitals::create,
        crate::routes::hospitals::update,
        crate::routes::hospitals::delete,
    ),
    components(
        schemas(
            HealthResponse,
            HospitalDoc,
            HospitalInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "hospitals")
    )
)]
pub struct ApiDoc;
