//! Medical appendix clause appended to an event's detail

use crate::config::{fill, MedicalPhrasing};
use crate::normalizer::normalize_sentence;
use shared_types::MedicalRecord;

/// Build the appendix clause, or an empty string when nothing is recorded
///
/// Fields appear in a fixed order: visit type, facility, department,
/// diagnosis, severity (unless unknown), proof documents, memo.
pub fn build_appendix(
    medical: Option<&MedicalRecord>,
    phrasing: &MedicalPhrasing,
    terminal: &str,
) -> String {
    let Some(medical) = medical else {
        return String::new();
    };

    let mut fields = Vec::new();
    let mut push = |label: &str, value: &str| {
        fields.push(fill(&phrasing.field, &[("label", label), ("value", value)]));
    };

    if let Some(v) = present(&medical.visit_type) {
        push(&phrasing.visit_type, v);
    }
    if let Some(v) = present(&medical.facility) {
        push(&phrasing.facility, v);
    }
    if let Some(v) = present(&medical.department) {
        push(&phrasing.department, v);
    }
    if let Some(v) = present(&medical.diagnosis) {
        push(&phrasing.diagnosis, v);
    }
    if let Some(v) = present(&medical.severity) {
        if v != phrasing.unknown_severity {
            push(&phrasing.severity, v);
        }
    }

    let proofs: Vec<&str> = medical
        .proofs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if !proofs.is_empty() {
        push(&phrasing.proofs, &proofs.join(&phrasing.proof_delimiter));
    }

    if let Some(v) = present(&medical.memo) {
        push(&phrasing.memo, v);
    }

    if fields.is_empty() {
        return String::new();
    }

    let clause = fill(
        &phrasing.clause,
        &[("fields", fields.join(&phrasing.field_separator).as_str())],
    );
    normalize_sentence(&clause, terminal)
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
