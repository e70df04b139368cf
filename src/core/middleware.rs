//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::{
        header::{AUTHORIZATION, SET_COOKIE},
        HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::time::Instant;
use tracing::{info, warn};

use crate::app::access::session::SessionId;
use crate::app::access::verify_password;
use crate::app::AppState;
use crate::core::error::CoreError;

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        "{} {} - {} - {}ms - User-Agent: {:?}",
        method,
        uri,
        status,
        duration.as_millis(),
        user_agent
    );

    response
}

/// 会话中间件：没有有效会话 cookie 时发一个新 ID，并把 [`SessionId`] 放进请求扩展
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = SessionId::from_headers(req.headers()).filter(|id| state.sessions.touch(id));
    let (id, fresh) = match existing {
        Some(id) => (id, false),
        None => (state.sessions.issue(), true),
    };

    req.extensions_mut().insert(id.clone());
    let mut response = next.run(req).await;

    if fresh {
        if let Ok(cookie) = HeaderValue::from_str(&id.cookie()) {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
    }

    response
}

/// 表单页面门禁：未通过口令的会话回到登录页
pub async fn require_login(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let verified = req
        .extensions()
        .get::<SessionId>()
        .is_some_and(|id| state.sessions.is_verified(id));

    if !verified {
        return Redirect::to("/").into_response();
    }

    next.run(req).await
}

/// JSON 接口认证：`Authorization: Bearer <口令>`
pub async fn bearer_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .is_some_and(|token| verify_password(token, &state.password));

    if !authorized {
        warn!("接口认证失败: {} {}", req.method(), req.uri().path());
        return Err(CoreError::Unauthorized);
    }

    Ok(next.run(req).await)
}
