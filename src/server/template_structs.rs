//! Askama template structs for the portal pages.
//!
//! Each struct corresponds to an HTML template in the templates/
//! directory. Askama verifies the templates at compile time.

use askama::Template;

use crate::models::{InputKind, KtpRecord, KTP_FIELDS};
use crate::session::Flash;

/// One row of the dashboard listing.
pub struct RecordRow {
    pub nik: String,
    pub full_name: String,
    pub birth_place: String,
    pub birth_date: String,
    pub gender: String,
    pub address: String,
}

impl RecordRow {
    pub fn from_record(record: &KtpRecord) -> Self {
        let text = |name: &str| record.value(name).unwrap_or("").to_string();
        Self {
            nik: text("nik"),
            full_name: text("full_name"),
            birth_place: text("birth_place"),
            birth_date: text("birth_date"),
            gender: text("gender"),
            address: text("address"),
        }
    }
}

/// A select choice in the record form.
pub struct SelectOption {
    pub value: String,
    pub selected: bool,
}

/// One rendered field of the record form.
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub options: Vec<SelectOption>,
}

impl FormFieldView {
    pub fn is_select(&self) -> bool {
        !self.options.is_empty()
    }
}

/// Build the form field views for a record, one per schema entry.
///
/// Select fields keep a current value the choice list does not know
/// (raw OCR output, or a record written by another client) as an extra
/// option so re-rendering never drops it.
pub fn form_fields(record: &KtpRecord) -> Vec<FormFieldView> {
    KTP_FIELDS
        .iter()
        .map(|spec| {
            let value = record.value(spec.name).unwrap_or("").to_string();
            let options = match spec.input {
                InputKind::Text => Vec::new(),
                InputKind::Select(choices) => {
                    let mut options = vec![SelectOption {
                        value: String::new(),
                        selected: value.is_empty(),
                    }];
                    let mut seen = value.is_empty();
                    for choice in choices {
                        let selected = *choice == value;
                        seen = seen || selected;
                        options.push(SelectOption {
                            value: choice.to_string(),
                            selected,
                        });
                    }
                    if !seen {
                        options.push(SelectOption {
                            value: value.clone(),
                            selected: true,
                        });
                    }
                    options
                }
            };
            FormFieldView {
                name: spec.name,
                label: spec.label,
                value,
                options,
            }
        })
        .collect()
}

/// Login page.
#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    pub logged_in: bool,
}

impl LoginTemplate {
    pub fn new(flashes: Vec<Flash>) -> Self {
        Self {
            title: "Login",
            flashes,
            logged_in: false,
        }
    }
}

/// Dashboard listing page.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    pub logged_in: bool,
    pub records: Vec<RecordRow>,
    pub page: u64,
    pub total_pages: u64,
    pub total_records: u64,
    pub search: String,
    pub prev_href: String,
    pub next_href: String,
}

impl DashboardTemplate {
    pub fn new(
        flashes: Vec<Flash>,
        records: Vec<RecordRow>,
        page: u64,
        total_pages: u64,
        total_records: u64,
        search: String,
    ) -> Self {
        let href = |target: u64| {
            if search.is_empty() {
                format!("/?page={}", target)
            } else {
                format!("/?page={}&search={}", target, urlencoding::encode(&search))
            }
        };

        Self {
            title: "KTP Records",
            flashes,
            logged_in: true,
            prev_href: href(page.saturating_sub(1).max(1)),
            next_href: href(page + 1),
            records,
            page,
            total_pages,
            total_records,
            search,
        }
    }
}

/// Shared create/edit form page.
#[derive(Template)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    pub logged_in: bool,
    pub action: String,
    pub submit_label: &'static str,
    pub fields: Vec<FormFieldView>,
}

impl FormTemplate {
    pub fn create(flashes: Vec<Flash>, record: &KtpRecord) -> Self {
        Self {
            title: "Add KTP Record",
            flashes,
            logged_in: true,
            action: "/ktp/add".to_string(),
            submit_label: "Create Record",
            fields: form_fields(record),
        }
    }

    pub fn edit(flashes: Vec<Flash>, nik: &str, record: &KtpRecord) -> Self {
        Self {
            title: "Edit KTP Record",
            flashes,
            logged_in: true,
            action: format!("/ktp/edit/{}", nik),
            submit_label: "Update Record",
            fields: form_fields(record),
        }
    }
}

/// Document upload page.
#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub title: &'static str,
    pub flashes: Vec<Flash>,
    pub logged_in: bool,
}

impl UploadTemplate {
    pub fn new(flashes: Vec<Flash>) -> Self {
        Self {
            title: "Scan KTP Document",
            flashes,
            logged_in: true,
        }
    }
}
