//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{
    BillingService, ExpenseService, MealService, MemberService, MenuService, PaymentService,
};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::{
    auth, bills, expenses, health, meals, members, menu, metrics, payments, request_id,
};
use crate::shared::RetryConfig;

/// Everything the handlers need. Each handler extracts only its own
/// service through `FromRef`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: AuthState,
    pub members: Arc<MemberService>,
    pub meals: Arc<MealService>,
    pub expenses: Arc<ExpenseService>,
    pub payments: Arc<PaymentService>,
    pub menu: Arc<MenuService>,
    pub billing: Arc<BillingService>,
    pub started_at: Arc<Instant>,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        repos: Arc<dyn RepositoryProvider>,
        jwt_config: JwtConfig,
        retry: RetryConfig,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            db,
            auth: AuthState {
                jwt_config: jwt_config.clone(),
            },
            members: Arc::new(MemberService::new(repos.clone(), jwt_config)),
            meals: Arc::new(MealService::new(repos.clone())),
            expenses: Arc::new(ExpenseService::new(repos.clone())),
            payments: Arc::new(PaymentService::new(repos.clone())),
            menu: Arc::new(MenuService::new(repos.clone())),
            billing: Arc::new(BillingService::new(repos).with_retry(retry)),
            started_at: Arc::new(Instant::now()),
            metrics_handle,
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: s.started_at.clone(),
        }
    }
}

impl FromRef<AppState> for metrics::MetricsState {
    fn from_ref(s: &AppState) -> Self {
        metrics::MetricsState {
            handle: s.metrics_handle.clone(),
        }
    }
}

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
                        .description(Some("Token from POST /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::me,
        auth::change_password,
        members::list_members,
        members::get_member,
        members::create_member,
        members::deactivate_member,
        members::update_role,
        members::set_mess_start_date,
        meals::list_meals,
        meals::submit_cancellation,
        meals::cancellation_report,
        expenses::list_expenses,
        expenses::create_expense,
        payments::list_payments,
        payments::submit_payment,
        payments::decide_payment,
        menu::list_month,
        menu::week_view,
        menu::weekly_fees,
        menu::save_day,
        menu::save_week,
        bills::generate_month_bills,
        bills::my_bill,
        bills::member_bill,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<members::MemberDto>,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::ChangePasswordRequest,
            members::MemberDto,
            members::CreateMemberRequest,
            members::UpdateRoleRequest,
            members::MessStartDateRequest,
            meals::MealDto,
            meals::CancellationRequestDto,
            meals::CancellationDto,
            expenses::ExpenseDto,
            expenses::CreateExpenseRequest,
            expenses::ExpenseListDto,
            payments::PaymentDto,
            payments::SubmitPaymentRequest,
            payments::DecisionRequest,
            menu::MenuDayDto,
            menu::SaveMenuRequest,
            menu::SaveWeekRequest,
            menu::WeekDayDto,
            menu::WeeklyFeeDto,
            bills::BillDto,
            bills::StatementDto,
            bills::MemberBillDto,
            bills::BillSummaryDto,
            bills::MonthBillsDto,
            health::HealthResponse,
            health::ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Authentication", description = "Login (JWT), current member, password change"),
        (name = "Members", description = "Member enrollment and administration"),
        (name = "Meals", description = "Opt-outs for tomorrow's meals and the cancellation report"),
        (name = "Expenses", description = "Organization-wide mess expenses"),
        (name = "Payments", description = "Member payments and admin approval"),
        (name = "Menu", description = "Daily menu, week view and weekday fees"),
        (name = "Bills", description = "Monthly bills and statements"),
    ),
    info(
        title = "Mess Hall Management API",
        version = "1.0.0",
        description = "REST API for members, meals, expenses, payments, menu and monthly bills",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let admin = || middleware::from_fn(require_admin);

    let member_routes = Router::new()
        .route(
            "/",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/{id}",
            get(members::get_member).delete(members::deactivate_member),
        )
        .route("/{id}/role", put(members::update_role))
        .route("/{id}/mess-start-date", put(members::set_mess_start_date))
        .route_layer(admin());

    // Paths shared by members and admins gate only the admin methods.
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/auth/change-password", put(auth::change_password))
        .nest("/members", member_routes)
        .route("/meals", get(meals::list_meals))
        .route(
            "/meals/cancellations",
            get(meals::cancellation_report)
                .route_layer(admin())
                .post(meals::submit_cancellation),
        )
        .route(
            "/expenses",
            get(expenses::list_expenses)
                .post(expenses::create_expense)
                .route_layer(admin()),
        )
        .route(
            "/payments",
            get(payments::list_payments).post(payments::submit_payment),
        )
        .route(
            "/payments/{id}/decision",
            post(payments::decide_payment).route_layer(admin()),
        )
        .route("/menu", get(menu::list_month))
        .route("/menu/fees", get(menu::weekly_fees))
        .route(
            "/menu/week",
            put(menu::save_week)
                .route_layer(admin())
                .get(menu::week_view),
        )
        .route(
            "/menu/days/{date}",
            put(menu::save_day).route_layer(admin()),
        )
        .route(
            "/bills",
            get(bills::generate_month_bills).route_layer(admin()),
        )
        .route("/bills/me", get(bills::my_bill))
        .route("/bills/{member_id}", get(bills::member_bill))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::prometheus_metrics))
        .route("/api/v1/auth/login", post(auth::login));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(public_routes)
        .nest("/api/v1", protected_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Days, Local};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::Service;

    use super::*;
    use crate::config::AdminConfig;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

    struct TestApp {
        router: Router,
        state: AppState,
    }

    impl TestApp {
        async fn new() -> Self {
            let db = test_database().await;
            let repos: Arc<dyn RepositoryProvider> =
                Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
            let handle = PrometheusBuilder::new().build_recorder().handle();
            let state = AppState::new(
                db,
                repos,
                JwtConfig::default(),
                RetryConfig::default(),
                handle,
            );
            state
                .members
                .ensure_default_admin(&AdminConfig::default())
                .await
                .unwrap();

            Self {
                router: create_api_router(state.clone()),
                state,
            }
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header("authorization", format!("Bearer {}", token));
            }
            let body = match body {
                Some(value) => {
                    builder = builder.header("content-type", "application/json");
                    Body::from(value.to_string())
                }
                None => Body::empty(),
            };

            let mut svc = self.router.clone().into_service();
            let resp = svc.call(builder.body(body).unwrap()).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, value)
        }

        async fn login(&self, email: &str, password: &str) -> String {
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/auth/login",
                    None,
                    Some(json!({ "email": email, "password": password })),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["data"]["token"].as_str().unwrap().to_string()
        }

        async fn admin_token(&self) -> String {
            let admin = AdminConfig::default();
            self.login(&admin.email, &admin.password).await
        }

        /// Enroll a member through the API and return (id, token)
        async fn enroll(&self, admin: &str, name: &str, start: &str) -> (String, String) {
            let email = format!("{}@mess.com", name.to_lowercase());
            let (status, body) = self
                .send(
                    "POST",
                    "/api/v1/members",
                    Some(admin),
                    Some(json!({
                        "name": name,
                        "email": email,
                        "password": "password123",
                        "mess_start_date": start,
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            let id = body["data"]["id"].as_str().unwrap().to_string();
            (id, self.login(&email, "password123").await)
        }
    }

    #[tokio::test]
    async fn health_and_login_are_public() {
        let app = TestApp::new().await;

        let (status, body) = app.send("GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"]["status"], "ok");

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/auth/login",
                None,
                Some(json!({ "email": "admin@mess.com", "password": "wrong-password" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn protected_routes_need_a_token() {
        let app = TestApp::new().await;

        let (status, _) = app.send("GET", "/api/v1/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send("GET", "/api/v1/bills/me", Some("not-a-token"), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let token = app.admin_token().await;
        let (status, body) = app.send("GET", "/api/v1/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["role"], "admin");
    }

    #[tokio::test]
    async fn members_are_kept_out_of_admin_routes() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;
        let (rahim_id, rahim) = app.enroll(&admin, "Rahim", "2024-06-01").await;
        let (karim_id, _) = app.enroll(&admin, "Karim", "2024-06-01").await;

        for (method, uri) in [
            ("GET", "/api/v1/members".to_string()),
            ("GET", "/api/v1/expenses".to_string()),
            ("GET", "/api/v1/bills?month=2024-06".to_string()),
            ("GET", "/api/v1/meals/cancellations".to_string()),
            ("GET", format!("/api/v1/bills/{}?month=2024-06", karim_id)),
        ] {
            let (status, _) = app.send(method, &uri, Some(&rahim), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        }

        let (status, _) = app
            .send(
                "PUT",
                "/api/v1/menu/week",
                Some(&rahim),
                Some(json!({ "week_start": "2024-06-02", "items": { "lunch": "Rice" } })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send("GET", "/api/v1/menu/week?start=2024-06-02", Some(&rahim), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 7);

        let uri = format!("/api/v1/bills/{}?month=2024-06", rahim_id);
        let (status, _) = app.send("GET", &uri, Some(&rahim), None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn payment_flow_reduces_the_bill() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;
        let (_, rahim) = app.enroll(&admin, "Rahim", "2024-06-01").await;

        let (status, _) = app
            .send(
                "POST",
                "/api/v1/expenses",
                Some(&admin),
                Some(json!({ "date": "2024-06-03", "amount": 900.0, "category": "Groceries" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/payments",
                Some(&rahim),
                Some(json!({ "date": "2024-06-05", "amount": 300.0, "method": "cash" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["status"], "pending");
        let payment_id = body["data"]["id"].as_i64().unwrap();

        let decision = format!("/api/v1/payments/{}/decision", payment_id);
        let (status, body) = app
            .send("POST", &decision, Some(&admin), Some(json!({ "action": "approve" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "approved");

        let (status, _) = app
            .send("POST", &decision, Some(&admin), Some(json!({ "action": "reject" })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // No meal rows anywhere: rate is zero, so the whole payment is credit.
        let (status, body) = app
            .send("GET", "/api/v1/bills/me?month=2024-06", Some(&rahim), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let bill = &body["data"]["bill"];
        assert_eq!(bill["billable_meals"], 90);
        assert_eq!(bill["meal_rate"], 0.0);
        assert_eq!(bill["paid_amount"], 300.0);
        assert_eq!(bill["due_amount"], -300.0);
        assert_eq!(bill["status"], "paid");
        assert_eq!(body["data"]["payments"].as_array().unwrap().len(), 1);

        let (status, body) = app
            .send("GET", "/api/v1/bills?month=2024-06", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["summary"]["total_members"], 1);
        assert_eq!(body["data"]["summary"]["total_paid"], 300.0);
    }

    #[tokio::test]
    async fn cancellations_are_for_tomorrow_only() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;
        let (_, rahim) = app.enroll(&admin, "Rahim", "2024-06-01").await;

        let today = Local::now().date_naive();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

        let (status, body) = app
            .send(
                "POST",
                "/api/v1/meals/cancellations",
                Some(&rahim),
                Some(json!({ "date": tomorrow, "lunch": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["breakfast"], true);
        assert_eq!(body["data"]["lunch"], false);

        let (status, _) = app
            .send(
                "POST",
                "/api/v1/meals/cancellations",
                Some(&rahim),
                Some(json!({ "date": today, "dinner": true })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(
                "POST",
                "/api/v1/meals/cancellations",
                Some(&admin),
                Some(json!({ "date": tomorrow, "dinner": true })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let month = format!("/api/v1/meals/cancellations?month={}", tomorrow.format("%Y-%m"));
        let (status, body) = app.send("GET", &month, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["cancelled"], json!(["lunch"]));
    }

    #[tokio::test]
    async fn bad_input_is_rejected() {
        let app = TestApp::new().await;
        let admin = app.admin_token().await;

        let (status, body) = app
            .send("GET", "/api/v1/expenses?month=2024-13", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = app
            .send(
                "POST",
                "/api/v1/members",
                Some(&admin),
                Some(json!({ "name": "", "email": "nope", "password": "short" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = app
            .send(
                "POST",
                "/api/v1/expenses",
                Some(&admin),
                Some(json!({ "date": "2024-06-03", "amount": -5.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send("GET", "/api/v1/members/unknown-id", Some(&admin), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let members = app.state.members.list_members(Default::default()).await.unwrap();
        assert_eq!(members.total, 1);
    }
}
