use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admins::{
    dtos as admins_dtos, handlers as admins_handlers, models as admins_models,
};
use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers, model as auth_model};
use crate::features::exports::{dtos as exports_dtos, handlers as exports_handlers};
use crate::features::rankings::{dtos as rankings_dtos, handlers as rankings_handlers};
use crate::features::results::{
    dtos as results_dtos, handlers as results_handlers, models as results_models,
};
use crate::features::settings::{dtos as settings_dtos, handlers as settings_handlers};
use crate::features::standards::{dtos as standards_dtos, handlers as standards_handlers};
use crate::features::villages::{dtos as villages_dtos, handlers as villages_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::auth_handler::login,
        auth_handlers::auth_handler::get_me,
        auth_handlers::auth_handler::change_password,
        // Admins (super admin)
        admins_handlers::admin_handler::list_admins,
        admins_handlers::admin_handler::create_admin,
        admins_handlers::admin_handler::update_admin,
        admins_handlers::admin_handler::deactivate_admin,
        // Standards
        standards_handlers::standard_handler::list_standards,
        standards_handlers::standard_handler::get_standard,
        standards_handlers::standard_handler::create_standard,
        standards_handlers::standard_handler::update_standard,
        standards_handlers::standard_handler::delete_standard,
        // Villages
        villages_handlers::village_handler::list_villages,
        villages_handlers::village_handler::get_village,
        villages_handlers::village_handler::create_village,
        villages_handlers::village_handler::update_village,
        villages_handlers::village_handler::delete_village,
        // Settings
        settings_handlers::settings_handler::get_settings,
        settings_handlers::settings_handler::update_settings,
        // Results
        results_handlers::result_handler::submit_result,
        results_handlers::result_handler::list_results,
        results_handlers::result_handler::get_result,
        results_handlers::result_handler::update_result,
        results_handlers::result_handler::toggle_approved,
        results_handlers::result_handler::toggle_verified,
        results_handlers::result_handler::delete_result,
        // Rankings
        rankings_handlers::ranking_handler::get_toppers,
        rankings_handlers::ranking_handler::get_summary,
        rankings_handlers::ranking_handler::get_groups,
        // Reports
        exports_handlers::report_handler::get_toppers_report,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_model::AuthenticatedAdmin,
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            auth_dtos::ChangePasswordDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Admins
            admins_models::AdminRole,
            admins_dtos::AdminResponseDto,
            admins_dtos::CreateAdminDto,
            admins_dtos::UpdateAdminDto,
            ApiResponse<admins_dtos::AdminResponseDto>,
            ApiResponse<Vec<admins_dtos::AdminResponseDto>>,
            // Standards
            standards_dtos::StandardResponseDto,
            standards_dtos::CreateStandardDto,
            standards_dtos::UpdateStandardDto,
            ApiResponse<standards_dtos::StandardResponseDto>,
            ApiResponse<Vec<standards_dtos::StandardResponseDto>>,
            // Villages
            villages_dtos::VillageResponseDto,
            villages_dtos::CreateVillageDto,
            villages_dtos::UpdateVillageDto,
            ApiResponse<villages_dtos::VillageResponseDto>,
            ApiResponse<Vec<villages_dtos::VillageResponseDto>>,
            // Settings
            settings_dtos::SettingsResponseDto,
            settings_dtos::UpdateSettingsDto,
            ApiResponse<settings_dtos::SettingsResponseDto>,
            // Results
            results_models::Medium,
            results_dtos::SubmitResultDto,
            results_dtos::UpdateResultDto,
            results_dtos::ResultResponseDto,
            ApiResponse<results_dtos::ResultResponseDto>,
            ApiResponse<Vec<results_dtos::ResultResponseDto>>,
            // Rankings
            rankings_dtos::GroupBy,
            rankings_dtos::RankedResultDto,
            rankings_dtos::StandardGroupDto,
            rankings_dtos::SummaryDto,
            rankings_dtos::GroupCountDto,
            ApiResponse<Vec<rankings_dtos::StandardGroupDto>>,
            ApiResponse<rankings_dtos::SummaryDto>,
            ApiResponse<Vec<rankings_dtos::GroupCountDto>>,
            // Reports
            exports_dtos::ReportFormat,
            exports_dtos::ReportRow,
            exports_dtos::ReportGroup,
            exports_dtos::ReportDocument,
            ApiResponse<exports_dtos::ReportDocument>,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Parinam API",
        version = "0.1.0",
        description = "Community exam results management API",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
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
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
