//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use todos::Trace;
#[cfg(debug_assertions)]
use todos::doc::ApiDoc;
use todos::inbound::http::health::{HealthState, live, ready};
use todos::inbound::http::json_error_handler;
use todos::inbound::http::state::HttpState;
use todos::inbound::http::todos::{create_todo, delete_todo, get_todo, list_todos, update_todo};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(list_todos)
        .service(get_todo)
        .service(create_todo)
        .service(update_todo)
        .service(delete_todo)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] carrying the bind address and pool.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn app_serves_probes_and_todo_routes() {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let config = ServerConfig::new(std::net::SocketAddr::from(([127, 0, 0, 1], 0)));
        let app = test::init_service(build_app(health, build_http_state(&config))).await;

        let ready_res =
            test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
                .await;
        assert_eq!(ready_res.status(), StatusCode::OK);

        let list_res =
            test::call_service(&app, test::TestRequest::get().uri("/todos").to_request()).await;
        assert_eq!(list_res.status(), StatusCode::OK);
        assert!(list_res.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn bad_json_uses_the_error_envelope() {
        let config = ServerConfig::new(std::net::SocketAddr::from(([127, 0, 0, 1], 0)));
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config),
        ))
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/todos")
                .insert_header(("content-type", "application/json"))
                .set_payload("not json")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
    }
}
