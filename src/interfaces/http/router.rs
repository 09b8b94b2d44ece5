//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::identity::ProfileService;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::ProfileRepository;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, PermissionsDto};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{auth, catalogs, health, quotations, requirements, users};

/// Security scheme modifier for OpenAPI
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
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::register,
        auth::get_current_profile,
        auth::change_password,
        // Users
        users::list_profiles,
        users::get_profile,
        users::create_profile,
        users::update_profile,
        users::set_role,
        users::set_permissions,
        users::approve_profile,
        users::block_profile,
        users::reactivate_profile,
        users::delete_profile,
        // Quotations
        quotations::list_quotations,
        quotations::get_quotation,
        quotations::create_quotation,
        quotations::update_quotation,
        quotations::delete_quotation,
        quotations::next_code,
        quotations::check_code,
        // Requirements
        requirements::list_requirements,
        requirements::create_requirement,
        requirements::update_requirement,
        requirements::delete_requirement,
        // Catalogs & contacts
        catalogs::list_options,
        catalogs::create_option,
        catalogs::update_option,
        catalogs::delete_option,
        catalogs::list_contacts,
        catalogs::create_contact,
        catalogs::update_contact,
        catalogs::delete_contact,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<users::ProfileDto>,
            PaginatedResponse<quotations::QuotationDto>,
            PaginatedResponse<requirements::RequirementItemDto>,
            PermissionsDto,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::RegisterRequest,
            auth::ProfileInfo,
            auth::MeResponse,
            auth::ChangePasswordRequest,
            // Users
            users::ProfileDto,
            users::CreateProfileRequest,
            users::UpdateProfileRequest,
            users::SetRoleRequest,
            users::SetPermissionsRequest,
            // Quotations
            quotations::QuotationDto,
            quotations::QuotationFields,
            quotations::CreateQuotationRequest,
            quotations::UpdateQuotationRequest,
            quotations::NextCodeResponse,
            quotations::CheckCodeResponse,
            // Requirements
            requirements::RequirementItemDto,
            requirements::CreateRequirementRequest,
            requirements::UpdateRequirementRequest,
            // Catalogs & contacts
            catalogs::CatalogOptionDto,
            catalogs::CatalogOptionRequest,
            catalogs::ContactDto,
            catalogs::ContactRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Login (JWT), registration, current profile with effective permissions"),
        (name = "Users", description = "Account administration: roles, activation, permission overrides"),
        (name = "Quotations", description = "Quotation log CRUD plus code suggestion"),
        (name = "Requirements", description = "Requirement line-item registration"),
        (name = "Catalogs", description = "Dropdown option catalogs"),
        (name = "Contacts", description = "Requester and responsible contact directories"),
    ),
    info(
        title = "Gestión Comercial API",
        version = "1.0.0",
        description = "REST API for the quotation tracking system",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(db: DatabaseConnection, jwt_config: JwtConfig) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
        db: db.clone(),
    };

    let profile_service = Arc::new(ProfileService::new(
        Arc::new(ProfileRepository::new(db.clone())),
        jwt_config,
    ));

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_state = auth::AuthHandlerState {
        profile_service: profile_service.clone(),
    };
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_profile))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // User administration routes (protected; handlers additionally
    // require the caller's effective admin section)
    let user_state = users::ProfileHandlerState { profile_service };
    let user_routes = Router::new()
        .route("/", get(users::list_profiles).post(users::create_profile))
        .route(
            "/{id}",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_profile),
        )
        .route("/{id}/role", put(users::set_role))
        .route("/{id}/permissions", put(users::set_permissions))
        .route("/{id}/approve", post(users::approve_profile))
        .route("/{id}/block", post(users::block_profile))
        .route("/{id}/reactivate", post(users::reactivate_profile))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(user_state);

    // Quotation routes (protected)
    let quotation_state = quotations::QuotationHandlerState { db: db.clone() };
    let quotation_routes = Router::new()
        .route(
            "/",
            get(quotations::list_quotations).post(quotations::create_quotation),
        )
        .route("/next-code", get(quotations::next_code))
        .route("/check-code", get(quotations::check_code))
        .route(
            "/{id}",
            get(quotations::get_quotation)
                .put(quotations::update_quotation)
                .delete(quotations::delete_quotation),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(quotation_state);

    // Requirement routes (protected)
    let requirement_state = requirements::RequirementHandlerState { db: db.clone() };
    let requirement_routes = Router::new()
        .route(
            "/",
            get(requirements::list_requirements).post(requirements::create_requirement),
        )
        .route(
            "/{id}",
            put(requirements::update_requirement).delete(requirements::delete_requirement),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(requirement_state);

    // Catalog and contact routes (protected)
    let catalog_state = catalogs::CatalogHandlerState { db: db.clone() };
    let catalog_routes = Router::new()
        .route(
            "/{kind}",
            get(catalogs::list_options).post(catalogs::create_option),
        )
        .route(
            "/{kind}/{id}",
            put(catalogs::update_option).delete(catalogs::delete_option),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(catalog_state.clone());

    let contact_routes = Router::new()
        .route(
            "/{kind}",
            get(catalogs::list_contacts).post(catalogs::create_contact),
        )
        .route(
            "/{kind}/{id}",
            put(catalogs::update_contact).delete(catalogs::delete_contact),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(catalog_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1/auth", auth_routes.merge(auth_protected_routes))
        .nest("/api/v1/users", user_routes)
        .nest("/api/v1/quotations", quotation_routes)
        .nest("/api/v1/requirements", requirement_routes)
        .nest("/api/v1/catalogs", catalog_routes)
        .nest("/api/v1/contacts", contact_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
