//! HTTP routing and OpenAPI documentation.
//!
//! Every handler is registered through `routes!` so its `#[utoipa::path]` lands in the OpenAPI
//! document served at `/api/docs/openapi.json`, with Swagger UI at `/api/docs`.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Adds the `bearer_auth` scheme referenced by the handlers' `security(...)` attributes
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
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

#[derive(OpenApi)]
#[openapi(
    info(title = "Roster", description = "Roster API"),
    modifiers(&SecurityAddon),
    tags(
        (name = controller::health::HEALTH_TAG, description = "Liveness check"),
        (name = controller::auth::AUTH_TAG, description = "Registration and current user"),
        (name = controller::user::USER_TAG, description = "User administration"),
        (name = controller::department::DEPARTMENT_TAG, description = "Departments"),
        (name = controller::character::CHARACTER_TAG, description = "Role-play characters"),
        (name = controller::application::APPLICATION_TAG, description = "Applications and review"),
        (name = controller::notification::NOTIFICATION_TAG, description = "In-app notifications"),
        (name = controller::report::REPORT_TAG, description = "Activity reports"),
        (name = controller::report::SUPPORT_TAG, description = "Support tickets"),
        (name = controller::report::COMPLAINT_TAG, description = "Complaints"),
        (name = controller::template::TEMPLATE_TAG, description = "Report templates and filled reports"),
        (name = controller::exam::EXAM_TAG, description = "Exams"),
        (name = controller::forum::FORUM_TAG, description = "Forum"),
        (name = controller::cad::CAD_TAG, description = "Computer-aided dispatch"),
        (name = controller::scheduler::SCHEDULER_TAG, description = "Scheduled jobs"),
    )
)]
pub struct ApiDoc;

/// Builds the API router with Swagger UI.
///
/// The returned router still needs its [`AppState`].
pub fn routes() -> Router<AppState> {
    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::health::health))
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::me))
        .routes(routes!(controller::user::list_users))
        .routes(routes!(controller::user::update_role))
        .routes(routes!(controller::user::add_warning))
        .routes(routes!(
            controller::department::list_departments,
            controller::department::create_department
        ))
        .routes(routes!(controller::department::get_department))
        .routes(routes!(
            controller::character::list_characters,
            controller::character::create_character
        ))
        .routes(routes!(
            controller::character::update_character,
            controller::character::delete_character
        ))
        .routes(routes!(
            controller::application::submit_application,
            controller::application::list_applications
        ))
        .routes(routes!(controller::application::check_eligibility))
        .routes(routes!(controller::application::get_application))
        .routes(routes!(controller::application::review_queue))
        .routes(routes!(controller::application::advance_application))
        .routes(routes!(controller::notification::list_notifications))
        .routes(routes!(controller::notification::mark_read))
        .routes(routes!(controller::notification::mark_all_read))
        .routes(routes!(
            controller::report::create_report,
            controller::report::list_reports
        ))
        .routes(routes!(controller::report::list_all_reports))
        .routes(routes!(controller::report::update_report_status))
        .routes(routes!(
            controller::report::create_ticket,
            controller::report::list_tickets
        ))
        .routes(routes!(controller::report::list_all_tickets))
        .routes(routes!(controller::report::update_ticket))
        .routes(routes!(
            controller::report::create_complaint,
            controller::report::list_complaints
        ))
        .routes(routes!(controller::report::list_all_complaints))
        .routes(routes!(controller::report::update_complaint))
        .routes(routes!(controller::template::list_templates))
        .routes(routes!(controller::template::get_template))
        .routes(routes!(controller::template::create_template))
        .routes(routes!(
            controller::template::submit_filled_report,
            controller::template::list_template_reports
        ))
        .routes(routes!(controller::template::list_filled_reports))
        .routes(routes!(controller::exam::list_exams))
        .routes(routes!(controller::exam::create_exam))
        .routes(routes!(controller::exam::start_session))
        .routes(routes!(controller::exam::submit_session))
        .routes(routes!(controller::exam::list_results))
        .routes(routes!(
            controller::forum::list_categories,
            controller::forum::create_category
        ))
        .routes(routes!(
            controller::forum::list_topics,
            controller::forum::create_topic
        ))
        .routes(routes!(
            controller::forum::list_posts,
            controller::forum::create_post
        ))
        .routes(routes!(controller::forum::lock_topic))
        .routes(routes!(
            controller::cad::list_units,
            controller::cad::create_unit
        ))
        .routes(routes!(controller::cad::update_unit_status))
        .routes(routes!(
            controller::cad::list_calls,
            controller::cad::create_call
        ))
        .routes(routes!(controller::cad::update_call))
        .routes(routes!(controller::cad::search))
        .routes(routes!(controller::cad::announce))
        .routes(routes!(controller::cad::socket))
        .routes(routes!(controller::scheduler::status))
        .routes(routes!(controller::scheduler::run))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
