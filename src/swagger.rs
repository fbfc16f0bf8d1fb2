use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::{DrawStatus, TicketStatus};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::draw::list_draws,
        handlers::draw::get_draw,
        handlers::ticket::book_ticket,
        handlers::contact::save_contact,
        handlers::admin::create_draw,
        handlers::admin::delete_draw,
        handlers::admin::mark_winner,
        handlers::admin::list_draw_tickets,
        handlers::admin::export_draw_tickets,
        handlers::admin::list_all_tickets,
        handlers::admin::delete_ticket,
        handlers::admin::list_contacts,
    ),
    components(
        schemas(
            LoginRequest,
            AuthResponse,
            AdminUserResponse,
            CreateDrawRequest,
            MarkWinnerRequest,
            DrawResponse,
            DrawStatus,
            BookTicketRequest,
            BookTicketResponse,
            TicketResponse,
            TicketStatus,
            TicketQuery,
            ContactRequest,
            ContactResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin authentication API"),
        (name = "draw", description = "Public draw browsing API"),
        (name = "ticket", description = "Ticket booking API"),
        (name = "contact", description = "Contact form API"),
        (name = "admin", description = "Admin dashboard API"),
    ),
    info(
        title = "Land Draw Backend API",
        version = "1.0.0",
        description = "Lucky draw ticketing REST API documentation",
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
