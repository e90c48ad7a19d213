//! The KTP record type and its shared field schema.
//!
//! The portal never validates these fields; it marshals them between
//! HTML forms and the backend's JSON. The schema below is the single
//! source of truth for field order, labels, and input widgets, consumed
//! by both the form renderer and the payload assembly so the create and
//! edit paths cannot drift.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extracted OCR fields keyed by record field name.
pub type OcrFields = HashMap<String, String>;

/// Widget used to render a field in the record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Free text input.
    Text,
    /// Fixed choice list.
    Select(&'static [&'static str]),
}

/// One entry in the record field schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
}

/// Ordered schema of every KTP record field.
///
/// Date-like fields stay free text: scanned cards carry values such as
/// "SEUMUR HIDUP" that a date widget would reject.
pub const KTP_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "nik",
        label: "NIK",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "full_name",
        label: "Full Name",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "birth_place",
        label: "Birth Place",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "birth_date",
        label: "Birth Date",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "gender",
        label: "Gender",
        input: InputKind::Select(&["LAKI-LAKI", "PEREMPUAN"]),
    },
    FieldSpec {
        name: "blood_type",
        label: "Blood Type",
        input: InputKind::Select(&["A", "B", "AB", "O", "-"]),
    },
    FieldSpec {
        name: "address",
        label: "Address",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "rt_rw",
        label: "RT/RW",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "village_kelurahan",
        label: "Village (Kelurahan)",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "district_kecamatan",
        label: "District (Kecamatan)",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "religion",
        label: "Religion",
        input: InputKind::Select(&[
            "ISLAM", "KRISTEN", "KATOLIK", "HINDU", "BUDDHA", "KONGHUCU",
        ]),
    },
    FieldSpec {
        name: "marital_status",
        label: "Marital Status",
        input: InputKind::Select(&["BELUM KAWIN", "KAWIN", "CERAI HIDUP", "CERAI MATI"]),
    },
    FieldSpec {
        name: "occupation",
        label: "Occupation",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "citizenship",
        label: "Citizenship",
        input: InputKind::Select(&["WNI", "WNA"]),
    },
    FieldSpec {
        name: "expiry_date",
        label: "Expiry Date",
        input: InputKind::Text,
    },
    FieldSpec {
        name: "registration_date",
        label: "Registration Date",
        input: InputKind::Text,
    },
];

/// A citizen identity card record, passed through unmodified.
///
/// Every field is optional: the backend owns validation, and absent
/// form fields travel as JSON null just like absent OCR fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KtpRecord {
    pub nik: Option<String>,
    pub full_name: Option<String>,
    pub birth_place: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub blood_type: Option<String>,
    pub address: Option<String>,
    pub rt_rw: Option<String>,
    pub village_kelurahan: Option<String>,
    pub district_kecamatan: Option<String>,
    pub religion: Option<String>,
    pub marital_status: Option<String>,
    pub occupation: Option<String>,
    pub citizenship: Option<String>,
    pub expiry_date: Option<String>,
    pub registration_date: Option<String>,
}

impl KtpRecord {
    /// Look up a field value by schema name.
    pub fn value(&self, name: &str) -> Option<&str> {
        let field = match name {
            "nik" => &self.nik,
            "full_name" => &self.full_name,
            "birth_place" => &self.birth_place,
            "birth_date" => &self.birth_date,
            "gender" => &self.gender,
            "blood_type" => &self.blood_type,
            "address" => &self.address,
            "rt_rw" => &self.rt_rw,
            "village_kelurahan" => &self.village_kelurahan,
            "district_kecamatan" => &self.district_kecamatan,
            "religion" => &self.religion,
            "marital_status" => &self.marital_status,
            "occupation" => &self.occupation,
            "citizenship" => &self.citizenship,
            "expiry_date" => &self.expiry_date,
            "registration_date" => &self.registration_date,
            _ => return None,
        };
        field.as_deref()
    }

    /// Set a field value by schema name. Unknown names are ignored.
    pub fn set(&mut self, name: &str, value: String) {
        let field = match name {
            "nik" => &mut self.nik,
            "full_name" => &mut self.full_name,
            "birth_place" => &mut self.birth_place,
            "birth_date" => &mut self.birth_date,
            "gender" => &mut self.gender,
            "blood_type" => &mut self.blood_type,
            "address" => &mut self.address,
            "rt_rw" => &mut self.rt_rw,
            "village_kelurahan" => &mut self.village_kelurahan,
            "district_kecamatan" => &mut self.district_kecamatan,
            "religion" => &mut self.religion,
            "marital_status" => &mut self.marital_status,
            "occupation" => &mut self.occupation,
            "citizenship" => &mut self.citizenship,
            "expiry_date" => &mut self.expiry_date,
            "registration_date" => &mut self.registration_date,
            _ => return,
        };
        *field = Some(value);
    }

    /// Build a record from an OCR field mapping, ignoring unknown keys.
    pub fn from_prefill(fields: &OcrFields) -> Self {
        let mut record = Self::default();
        for spec in KTP_FIELDS {
            if let Some(value) = fields.get(spec.name) {
                record.set(spec.name, value.clone());
            }
        }
        record
    }

    /// JSON body for the backend update endpoint: every field except
    /// the key, which travels in the URL.
    pub fn update_payload(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(map) = value.as_object_mut() {
            map.remove("nik");
        }
        value
    }
}

/// Flatten a backend OCR response object into string fields.
///
/// String values pass through; anything else keeps its JSON rendering
/// so nothing the backend extracted is silently dropped.
pub fn ocr_fields_from_json(data: &serde_json::Map<String, Value>) -> OcrFields {
    data.iter()
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}
