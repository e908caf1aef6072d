//! Display codes for commercial documents.

/// Format a document display code such as "FAC-003" from the stored kind
/// text and the row id. Known kinds map through a fixed prefix table; any
/// other text falls back to its first three characters uppercased, so the
/// function is total over whatever the journal's free-form document_type
/// column contains. Ids are zero-padded to three digits and never truncated.
pub fn format_document_code(kind: &str, id: i64) -> String {
    let prefix = match kind {
        "FACTURA" => "FAC".to_string(),
        "COTACAO" | "COTAÇÃO" => "COT".to_string(),
        "VD" => "VD".to_string(),
        "RECIBO" => "REC".to_string(),
        other => other.chars().take(3).collect::<String>().to_uppercase(),
    };
    format!("{prefix}-{id:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DocumentKind;

    #[test]
    fn known_kinds_use_the_prefix_table() {
        assert_eq!(format_document_code("FACTURA", 3), "FAC-003");
        assert_eq!(format_document_code("COTACAO", 0), "COT-000");
        assert_eq!(format_document_code("VD", 12), "VD-012");
        assert_eq!(format_document_code("RECIBO", 7), "REC-007");
    }

    #[test]
    fn large_ids_are_not_truncated() {
        assert_eq!(format_document_code("VD", 1500), "VD-1500");
        assert_eq!(format_document_code("FACTURA", 99999), "FAC-99999");
    }

    #[test]
    fn unknown_kinds_fall_back_to_first_three_letters() {
        assert_eq!(format_document_code("NOTA", 1), "NOT-001");
        assert_eq!(format_document_code("guia", 45), "GUI-045");
        assert_eq!(format_document_code("NC", 2), "NC-002");
    }

    #[test]
    fn accepts_enum_wire_names() {
        assert_eq!(
            format_document_code(DocumentKind::Quotation.as_str(), 8),
            "COT-008"
        );
    }
}
