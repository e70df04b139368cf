//! 服务端渲染的 HTML 页面骨架和表单控件
//!
//! 所有插入页面的用户输入和数据库内容都要经过 [`escape`]。

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub const APP_TITLE: &str = "Employee Management System";

const STYLE: &str = r#"
    body { background-color: #FFFFFF; color: #333333; font-family: sans-serif; margin: 0; }
    main { max-width: 720px; margin: 0 auto; padding: 32px 16px; }
    .logout-form { position: absolute; top: 20px; right: 20px; z-index: 1000; }
    button {
        background-color: #FF6F61; color: #FFFFFF; border: none; border-radius: 5px;
        padding: 10px 20px; font-size: 16px; margin: 10px 0; cursor: pointer;
        transition: background-color 0.3s;
    }
    button:hover { background-color: #FF8A65; }
    label { display: block; margin-top: 12px; }
    input[type=text], input[type=password], input[type=number] {
        background-color: #F7F7F7; color: #333333; font-size: 14px; padding: 10px;
        border-radius: 5px; border: 1px solid #CCCCCC; width: 100%; box-sizing: border-box;
    }
    input[type=text]:focus, input[type=password]:focus, input[type=number]:focus {
        border-color: #FF6F61; box-shadow: 0 0 5px rgba(255, 111, 97, 0.5);
    }
    nav a { margin-right: 16px; color: #FF6F61; }
    .alert { padding: 12px 16px; border-radius: 5px; margin: 12px 0; }
    .alert-success { background-color: #E6F4EA; color: #1E4620; }
    .alert-warning { background-color: #FFF8E1; color: #663C00; }
    .alert-error { background-color: #FDECEA; color: #611A15; }
    .details dt { font-weight: bold; }
"#;

/// 页面提示条
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success(String),
    Warning(String),
    Error(String),
}

impl Alert {
    fn class(&self) -> &'static str {
        match self {
            Alert::Success(_) => "alert-success",
            Alert::Warning(_) => "alert-warning",
            Alert::Error(_) => "alert-error",
        }
    }

    fn text(&self) -> &str {
        match self {
            Alert::Success(text) | Alert::Warning(text) | Alert::Error(text) => text,
        }
    }
}

/// 一个完整的 HTML 页面
#[derive(Debug, Clone)]
pub struct Page {
    heading: String,
    logged_in: bool,
    alerts: Vec<Alert>,
    body: String,
    status: StatusCode,
}

impl Page {
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            logged_in: false,
            alerts: Vec::new(),
            body: String::new(),
            status: StatusCode::OK,
        }
    }

    /// 已登录的页面带退出按钮和操作菜单
    pub fn logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }

    pub fn alert(mut self, alert: Alert) -> Self {
        self.alerts.push(alert);
        self
    }

    pub fn maybe_alert(self, alert: Option<Alert>) -> Self {
        match alert {
            Some(alert) => self.alert(alert),
            None => self,
        }
    }

    /// 追加已渲染好的 HTML 片段
    pub fn push(mut self, html: impl AsRef<str>) -> Self {
        self.body.push_str(html.as_ref());
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn render(&self) -> String {
        let mut html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n",
            title = escape(APP_TITLE),
        );

        if self.logged_in {
            html.push_str(
                "<form class=\"logout-form\" method=\"post\" action=\"/logout\"><button type=\"submit\">Logout</button></form>\n",
            );
        }

        html.push_str(&format!("<h1>{}</h1>\n", escape(APP_TITLE)));

        if self.logged_in {
            html.push_str(
                "<nav><a href=\"/employees/view\">View Employee Details</a><a href=\"/employees/update\">Update Employee Details</a><a href=\"/transfers\">Transfer Funds</a></nav>\n",
            );
        }

        if !self.heading.is_empty() {
            html.push_str(&format!("<h2>{}</h2>\n", escape(&self.heading)));
        }

        for alert in &self.alerts {
            html.push_str(&format!(
                "<div class=\"alert {}\">{}</div>\n",
                alert.class(),
                escape(alert.text())
            ));
        }

        html.push_str(&self.body);
        html.push_str("\n</main>\n</body>\n</html>\n");
        html
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        (self.status, Html(self.render())).into_response()
    }
}

/// HTML 转义
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// `<form method="post">` 包裹若干控件和一个提交按钮
pub fn form(action: &str, fields: &[String], submit_label: &str) -> String {
    let mut html = format!("<form method=\"post\" action=\"{}\">\n", escape(action));
    for field in fields {
        html.push_str(field);
        html.push('\n');
    }
    html.push_str(&format!(
        "<button type=\"submit\">{}</button>\n</form>\n",
        escape(submit_label)
    ));
    html
}

pub fn text_input(name: &str, label: &str, value: &str) -> String {
    input("text", name, label, value)
}

pub fn password_input(name: &str, label: &str) -> String {
    input("password", name, label, "")
}

pub fn number_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label><input type=\"number\" id=\"{name}\" name=\"{name}\" value=\"{value}\" min=\"0\" step=\"any\">",
        name = escape(name),
        label = escape(label),
        value = escape(value),
    )
}

fn input(kind: &str, name: &str, label: &str, value: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label><input type=\"{kind}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">",
        name = escape(name),
        label = escape(label),
        value = escape(value),
    )
}

/// 单选组，`options` 为 (取值, 显示名)
pub fn radio_group(name: &str, legend: &str, options: &[(&str, &str)], selected: &str) -> String {
    let mut html = format!("<fieldset><legend>{}</legend>", escape(legend));
    for (value, label) in options {
        let checked = if *value == selected { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type=\"radio\" name=\"{}\" value=\"{}\"{}> {}</label>",
            escape(name),
            escape(value),
            checked,
            escape(label)
        ));
    }
    html.push_str("</fieldset>");
    html
}
