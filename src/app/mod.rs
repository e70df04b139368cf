//! 应用层：路由、共享状态和各业务模块

pub mod access;
pub mod employee;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::core::middleware::{
    bearer_auth, request_logging_middleware, require_login, session_middleware,
};
use access::session::SessionStore;
use employee::repository::EmployeeStore;
use employee::service::EmployeeService;
use employee::{api, handler};

/// 所有处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub employees: EmployeeService,
    pub sessions: SessionStore,
    pub password: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, password: &str, session_ttl: Duration) -> Self {
        Self {
            employees: EmployeeService::new(store),
            sessions: SessionStore::new(session_ttl),
            password: Arc::from(password),
        }
    }
}

/// 创建路由
pub fn create_routes(state: AppState, request_timeout: Duration) -> Router {
    // 需要先通过口令的表单页面
    let forms = Router::new()
        .route(
            "/employees/view",
            get(handler::view_form).post(handler::view_submit),
        )
        .route(
            "/employees/update",
            get(handler::update_form).post(handler::update_submit),
        )
        .route(
            "/transfers",
            get(handler::transfer_form).post(handler::transfer_submit),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_login));

    let api_routes = Router::new()
        .route(
            "/api/employees/:ssn",
            get(api::get_employee).put(api::update_employee),
        )
        .route("/api/transfers", post(api::transfer))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    // 只有浏览器页面需要会话 cookie
    let pages = Router::new()
        .route("/", get(access::handler::home))
        .route("/login", post(access::handler::login))
        .route("/logout", post(access::handler::logout))
        .merge(forms)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/health", get(api::health_check))
        .merge(pages)
        .merge(api_routes)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
