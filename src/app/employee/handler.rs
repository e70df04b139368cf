//! 员工表单页面处理器

use axum::{
    extract::{Form, State},
    Extension,
};
use serde::Deserialize;

use super::model::{Employee, EmployeeField};
use super::validation::format_ssn;
use crate::app::access::session::SessionId;
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::page::{self, escape, Alert, Page};

const SSN_LABEL: &str = "Enter the employee's SSN:";

#[derive(Debug, Default, Deserialize)]
pub struct ViewForm {
    #[serde(default)]
    pub ssn: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub ssn: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransferForm {
    #[serde(default)]
    pub from_ssn: String,
    #[serde(default)]
    pub to_ssn: String,
    #[serde(default)]
    pub amount: String,
}

fn error_page(page: Page, err: &CoreError) -> Page {
    err.log();
    page.alert(err.alert()).status(err.status())
}

fn view_page(ssn: &str) -> Page {
    Page::new("View Employee Details")
        .logged_in(true)
        .push(page::form(
            "/employees/view",
            &[page::text_input("ssn", SSN_LABEL, ssn)],
            "View Details",
        ))
}

/// 员工详情块
pub fn render_details(employee: &Employee) -> String {
    let mut html = format!(
        "<h3>Employee Details for {}</h3>\n<hr>\n<dl class=\"details\">",
        escape(&employee.full_name())
    );
    let balance = format!("${}", employee.balance);
    for (label, value) in [
        ("SSN", employee.ssn.as_str()),
        ("First Name", employee.first_name.as_str()),
        ("Last Name", employee.last_name.as_str()),
        ("Email", employee.email.as_str()),
        ("City", employee.city.as_str()),
        ("Balance", balance.as_str()),
    ] {
        html.push_str(&format!("<dt>{}:</dt><dd>{}</dd>", label, escape(value)));
    }
    html.push_str("</dl>\n<hr>");
    html
}

pub async fn view_form() -> Page {
    view_page("")
}

pub async fn view_submit(State(state): State<AppState>, Form(form): Form<ViewForm>) -> Page {
    let page = view_page(&form.ssn);
    match state.employees.view(&form.ssn).await {
        Ok(Some(employee)) => page.push(render_details(&employee)),
        Ok(None) => {
            let err = CoreError::NotFound(format!(
                "No employee found with SSN: {}",
                format_ssn(&form.ssn)
            ));
            error_page(page, &err)
        }
        Err(err) => error_page(page, &err),
    }
}

fn update_page(ssn: &str, field: &str, value: &str) -> Page {
    let options: Vec<(&str, &str)> = EmployeeField::ALL
        .iter()
        .map(|f| (f.column(), f.label()))
        .collect();
    let selected = EmployeeField::from_column(field).unwrap_or(EmployeeField::LastName);

    Page::new("Update Employee Details")
        .logged_in(true)
        .push(page::form(
            "/employees/update",
            &[
                page::text_input("ssn", SSN_LABEL, ssn),
                page::radio_group("field", "Select detail to update:", &options, selected.column()),
                page::text_input("value", "Enter the new value:", value),
            ],
            "Update Details",
        ))
}

pub async fn update_form(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> Page {
    let remembered = state.sessions.get(&session).remembered_ssn;
    update_page(&remembered, EmployeeField::LastName.column(), "")
}

pub async fn update_submit(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<UpdateForm>,
) -> Page {
    state.sessions.remember_ssn(&session, &form.ssn);
    let page = update_page(&form.ssn, &form.field, &form.value);

    let Some(field) = EmployeeField::from_column(&form.field) else {
        let err = CoreError::Validation("No valid column selected for update.".to_string());
        return error_page(page, &err);
    };

    match state.employees.update(&form.ssn, field, &form.value).await {
        Ok(outcome) => page.alert(Alert::Success(outcome.message())),
        Err(err) => error_page(page, &err),
    }
}

fn transfer_page(form: &TransferForm) -> Page {
    Page::new("Transfer Funds").logged_in(true).push(page::form(
        "/transfers",
        &[
            page::text_input(
                "from_ssn",
                "SSN to transfer FROM (format XXX-XX-XXXX):",
                &form.from_ssn,
            ),
            page::text_input(
                "to_ssn",
                "SSN to transfer TO (format XXX-XX-XXXX):",
                &form.to_ssn,
            ),
            page::number_input("amount", "Amount to transfer:", &form.amount),
        ],
        "Transfer Funds",
    ))
}

pub async fn transfer_form() -> Page {
    transfer_page(&TransferForm::default())
}

pub async fn transfer_submit(State(state): State<AppState>, Form(form): Form<TransferForm>) -> Page {
    let page = transfer_page(&form);
    match state
        .employees
        .transfer(&form.from_ssn, &form.to_ssn, &form.amount)
    {
        Ok(receipt) => page.alert(Alert::Success(receipt.message())),
        Err(err) => error_page(page, &err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_render_details_escapes_values() {
        let employee = Employee {
            ssn: "123-45-6789".to_string(),
            first_name: "Ann".to_string(),
            last_name: "<O'Neil>".to_string(),
            email: "ann@example.com".to_string(),
            city: "Austin".to_string(),
            balance: Decimal::new(120050, 2),
        };
        let html = render_details(&employee);
        assert!(html.contains("Employee Details for Ann &lt;O&#x27;Neil&gt;"));
        assert!(html.contains("<dt>Balance:</dt><dd>$1200.50</dd>"));
        assert!(!html.contains("<O'Neil>"));
    }

    #[test]
    fn test_update_page_defaults_to_last_name() {
        let html = update_page("", "bogus", "").render();
        assert!(html.contains("value=\"last_name\" checked"));
    }
}
