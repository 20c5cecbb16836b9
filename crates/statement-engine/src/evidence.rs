use shared_types::{Attachment, MedicalRecord};

/// Whether a record has corroborating evidence
///
/// Attachments always count. A medical visit counts when it has proof
/// documents, a diagnosis, or a visit type other than the routine default.
pub fn has_evidence(
    attachments: &[Attachment],
    medical: Option<&MedicalRecord>,
    default_visit_type: &str,
) -> bool {
    !attachments.is_empty() || medical.is_some_and(|m| has_medical_evidence(m, default_visit_type))
}

fn has_medical_evidence(medical: &MedicalRecord, default_visit_type: &str) -> bool {
    if !medical.proofs.is_empty() {
        return true;
    }

    let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.trim().is_empty());

    let special_visit = present(&medical.visit_type)
        && medical.visit_type.as_deref().map(str::trim) != Some(default_visit_type);

    special_visit || present(&medical.diagnosis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn photo() -> Attachment {
        Attachment {
            kind: "image".to_string(),
            name: "bruise.jpg".to_string(),
            size: None,
        }
    }

    #[test]
    fn test_no_inputs_means_no_evidence() {
        assert!(!has_evidence(&[], None, "outpatient"));
        assert!(!has_evidence(&[], Some(&MedicalRecord::default()), "outpatient"));
    }

    #[test]
    fn test_attachments_are_evidence() {
        assert!(has_evidence(&[photo()], None, "outpatient"));
    }

    #[test]
    fn test_medical_evidence_rules() {
        let proofs = MedicalRecord {
            proofs: vec!["receipt".to_string()],
            ..Default::default()
        };
        assert!(has_evidence(&[], Some(&proofs), "outpatient"));

        let routine = MedicalRecord {
            visit_type: Some("outpatient".to_string()),
            ..Default::default()
        };
        assert!(!has_evidence(&[], Some(&routine), "outpatient"));

        let emergency = MedicalRecord {
            visit_type: Some("emergency".to_string()),
            ..Default::default()
        };
        assert!(has_evidence(&[], Some(&emergency), "outpatient"));

        let diagnosed = MedicalRecord {
            diagnosis: Some("contusion".to_string()),
            ..Default::default()
        };
        assert!(has_evidence(&[], Some(&diagnosed), "outpatient"));

        let blank_diagnosis = MedicalRecord {
            diagnosis: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!has_evidence(&[], Some(&blank_diagnosis), "outpatient"));
    }

    proptest! {
        /// Property: a record with any attachment always has evidence
        #[test]
        fn attachments_imply_evidence(count in 1usize..5, visit in "[a-z]{0,8}") {
            let attachments = vec![photo(); count];
            let medical = MedicalRecord {
                visit_type: Some(visit),
                ..Default::default()
            };
            prop_assert!(has_evidence(&attachments, Some(&medical), "outpatient"));
            prop_assert!(has_evidence(&attachments, None, "outpatient"));
        }
    }
}
