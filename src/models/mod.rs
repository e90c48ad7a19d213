//! Data structures passed between the browser forms and the backend API.

mod ktp;

pub use ktp::{ocr_fields_from_json, FieldSpec, InputKind, KtpRecord, OcrFields, KTP_FIELDS};
