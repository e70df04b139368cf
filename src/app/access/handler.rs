//! 登录、退出和首页

use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use serde::Deserialize;
use tracing::{info, warn};

use super::session::SessionId;
use super::verify_password;
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::page::{self, Alert, Page};

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

pub fn login_page(alert: Option<Alert>) -> Page {
    Page::new("").maybe_alert(alert).push(page::form(
        "/login",
        &[page::password_input(
            "password",
            "Enter the access password to proceed:",
        )],
        "Log In",
    ))
}

pub fn menu_page(alert: Option<Alert>) -> Page {
    Page::new("")
        .logged_in(true)
        .maybe_alert(alert)
        .push("<p>Choose an action from the menu above.</p>")
}

pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Page {
    if state.sessions.is_verified(&session) {
        menu_page(None)
    } else {
        login_page(None)
    }
}

pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<LoginForm>,
) -> Page {
    if verify_password(&form.password, &state.password) {
        state.sessions.mark_verified(&session);
        info!("口令验证通过");
        menu_page(Some(Alert::Success(
            "Password verified. You may proceed.".to_string(),
        )))
    } else {
        warn!("口令验证失败");
        let err = CoreError::Unauthorized;
        login_page(Some(Alert::Error(err.to_string()))).status(err.status())
    }
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Response {
    state.sessions.logout(&session);
    info!("已退出登录");
    Redirect::to("/").into_response()
}
