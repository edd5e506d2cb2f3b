use crate::models::{DirectoryMatch, DocumentType};

/// Peppol BIS Billing 3.0 invoice profile
pub const BILLING_3_INVOICE: &str = "urn:oasis:names:specification:ubl:schema:xsd:Invoice-2::Invoice##urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0::2.1";

/// Peppol BIS Billing 3.0 credit note profile
pub const BILLING_3_CREDIT_NOTE: &str = "urn:oasis:names:specification:ubl:schema:xsd:CreditNote-2::CreditNote##urn:cen.eu:en16931:2017#compliant#urn:fdc:peppol.eu:2017:poacc:billing:3.0::2.1";

/// Document type values that make a participant compliant
pub const COMPLIANT_PROFILES: [&str; 2] = [BILLING_3_INVOICE, BILLING_3_CREDIT_NOTE];

/// Exact string match against the compliant allow-list
#[inline]
pub fn is_compliant_profile(value: &str) -> bool {
    COMPLIANT_PROFILES.contains(&value)
}

/// True iff any of the document types is a compliant profile
#[inline]
pub fn is_compliant(doc_types: &[DocumentType]) -> bool {
    doc_types.iter().any(|d| is_compliant_profile(&d.value))
}

#[inline]
pub fn match_is_compliant(m: &DirectoryMatch) -> bool {
    is_compliant(&m.doc_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SchemedValue;

    fn doc(value: &str) -> DocumentType {
        SchemedValue {
            scheme: Some("busdox-docid-qns".to_string()),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_invoice_profile_is_compliant() {
        assert!(is_compliant(&[doc(BILLING_3_INVOICE)]));
    }

    #[test]
    fn test_credit_note_profile_is_compliant() {
        assert!(is_compliant(&[doc("urn:other"), doc(BILLING_3_CREDIT_NOTE)]));
    }

    #[test]
    fn test_no_doc_types_is_not_compliant() {
        assert!(!is_compliant(&[]));
    }

    #[test]
    fn test_match_is_exact() {
        // Older billing version and trailing whitespace must not count
        let older = BILLING_3_INVOICE.replace("::2.1", "::2.0");
        assert!(!is_compliant(&[doc(&older)]));
        assert!(!is_compliant(&[doc(&format!("{} ", BILLING_3_INVOICE))]));
        assert!(!is_compliant_profile(&BILLING_3_INVOICE.to_uppercase()));
    }

    #[test]
    fn test_match_is_compliant() {
        let m = DirectoryMatch {
            participant_id: None,
            doc_types: vec![doc(BILLING_3_INVOICE)],
        };
        assert!(match_is_compliant(&m));
    }
}
