use crate::api::attendance::AttendanceResponse;
use crate::model::employee::Employee;
use crate::model::office::Office;
use crate::models::{OtpRequestDto, OtpVerifyDto};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracking API",
        version = "1.0.0",
        description = r#"
## Attendance Tracking Backend

Employees submit check-in / check-out events (optionally with a selfie and
geolocation) over multipart HTTP; the dashboard reads stored records,
employee names and office locations as JSON.

### 🔹 Key Features
- **Attendance Submission**
  - Multipart form with optional selfie upload, lenient field handling
- **Dashboard Queries**
  - Attendance list filtered by employee and/or date, employee names, offices
- **OTP Login**
  - Email allow list, one-time codes, JWT for the protected maps-key endpoint

### 📦 Response Format
- JSON-based RESTful responses
- Uploaded selfies served statically under `/uploads`

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::status::index,

        crate::api::attendance::record_attendance,
        crate::api::attendance::attendance_list,

        crate::api::directory::list_employees,
        crate::api::directory::list_offices,

        crate::api::maps::maps_key,

        crate::auth::handlers::request_otp,
        crate::auth::handlers::verify_otp
    ),
    components(
        schemas(
            AttendanceResponse,
            Employee,
            Office,
            OtpRequestDto,
            OtpVerifyDto
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Status", description = "Health check"),
        (name = "Attendance", description = "Attendance submission and dashboard listing"),
        (name = "Directory", description = "Employee and office lookups"),
        (name = "Config", description = "Dashboard configuration"),
        (name = "Auth", description = "OTP login APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
