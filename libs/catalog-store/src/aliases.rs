//! Column-name alias normalization
//!
//! Reference CSVs come from several sources and eras, so the same logical
//! column shows up under English, Portuguese and spreadsheet-styled
//! headers ("codigo_retorno", "OD Min (mm)", "S_mm2", ...). Every header
//! is mapped onto one canonical name here, at the ingestion boundary, so
//! the core logic only ever sees canonical schemas.

/// Canonical column names used across all logical schemas
pub mod canonical {
    pub const LOWER_BOUND: &str = "lower_bound";
    pub const UPPER_BOUND: &str = "upper_bound";
    pub const CODE: &str = "code";
    pub const CONDUCTOR_TYPE: &str = "conductor_type";
    pub const CROSS_SECTION_MM2: &str = "cross_section_mm2";
    pub const VOLTAGE_CLASS: &str = "voltage_class";
    pub const BRAND: &str = "brand";
    pub const CABLE_NAME: &str = "cable_name";
    pub const OUTER_DIAMETER_MM: &str = "outer_diameter_mm";
    pub const PART_NUMBER: &str = "part_number";
    pub const OD_MIN_MM: &str = "od_min_mm";
    pub const OD_MAX_MM: &str = "od_max_mm";
    pub const STANDARD: &str = "standard";
    pub const VOLTAGE_CLASS_KV: &str = "voltage_class_kv";
    pub const CURRENT_CLASS_A: &str = "current_class_a";
    pub const DISPLAY_NAME: &str = "display_name";
    pub const BASE_CODE: &str = "base_code";
    pub const FAMILY: &str = "family";
}

/// Alias table: normalized header token -> canonical column name.
/// Tokens are compared after [`normalize_header`].
const ALIASES: &[(&str, &str)] = &[
    // range bounds
    ("lower_bound", canonical::LOWER_BOUND),
    ("min_mm", canonical::LOWER_BOUND),
    ("min_mm2", canonical::LOWER_BOUND),
    ("minimo", canonical::LOWER_BOUND),
    ("upper_bound", canonical::UPPER_BOUND),
    ("max_mm", canonical::UPPER_BOUND),
    ("max_mm2", canonical::UPPER_BOUND),
    ("maximo", canonical::UPPER_BOUND),
    // return codes
    ("code", canonical::CODE),
    ("return_code", canonical::CODE),
    ("codigo", canonical::CODE),
    ("codigo_retorno", canonical::CODE),
    // conductor tables
    ("conductor_type", canonical::CONDUCTOR_TYPE),
    ("tipo_condutor", canonical::CONDUCTOR_TYPE),
    // cross-section
    ("cross_section_mm2", canonical::CROSS_SECTION_MM2),
    ("s_mm2", canonical::CROSS_SECTION_MM2),
    ("secao_mm2", canonical::CROSS_SECTION_MM2),
    ("section_mm2", canonical::CROSS_SECTION_MM2),
    // cable database
    ("voltage_class", canonical::VOLTAGE_CLASS),
    ("cable_voltage", canonical::VOLTAGE_CLASS),
    ("tensao_cabo", canonical::VOLTAGE_CLASS),
    ("brand", canonical::BRAND),
    ("marca", canonical::BRAND),
    ("manufacturer", canonical::BRAND),
    ("cable_name", canonical::CABLE_NAME),
    ("cable", canonical::CABLE_NAME),
    ("cabo", canonical::CABLE_NAME),
    ("outer_diameter_mm", canonical::OUTER_DIAMETER_MM),
    ("od_iso_mm", canonical::OUTER_DIAMETER_MM),
    ("od_mm", canonical::OUTER_DIAMETER_MM),
    ("diametro_mm", canonical::OUTER_DIAMETER_MM),
    // termination table
    ("part_number", canonical::PART_NUMBER),
    ("codigo_peca", canonical::PART_NUMBER),
    ("od_min_mm", canonical::OD_MIN_MM),
    ("od_min", canonical::OD_MIN_MM),
    ("od_max_mm", canonical::OD_MAX_MM),
    ("od_max", canonical::OD_MAX_MM),
    // base products
    ("standard", canonical::STANDARD),
    ("padrao", canonical::STANDARD),
    ("voltage_class_kv", canonical::VOLTAGE_CLASS_KV),
    ("classe_tensao", canonical::VOLTAGE_CLASS_KV),
    ("current_class_a", canonical::CURRENT_CLASS_A),
    ("classe_corrente", canonical::CURRENT_CLASS_A),
    ("display_name", canonical::DISPLAY_NAME),
    ("nome_exibicao", canonical::DISPLAY_NAME),
    ("base_code", canonical::BASE_CODE),
    ("codigo_base", canonical::BASE_CODE),
    ("family", canonical::FAMILY),
    ("id_logica", canonical::FAMILY),
];

/// Normalize a raw header for alias lookup: trim, lowercase, collapse
/// spaces/hyphens to underscores, drop parentheses ("OD Min (mm)" ->
/// "od_min_mm")
pub fn normalize_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_sep = false;
    for ch in raw.trim().chars() {
        let mapped = match ch {
            'A'..='Z' => Some(ch.to_ascii_lowercase()),
            'a'..='z' | '0'..='9' => Some(ch),
            ' ' | '-' | '_' | '\t' => {
                if last_was_sep || out.is_empty() {
                    None
                } else {
                    Some('_')
                }
            },
            // parentheses and other punctuation vanish
            _ => None,
        };
        match mapped {
            Some('_') => {
                out.push('_');
                last_was_sep = true;
            },
            Some(c) => {
                out.push(c);
                last_was_sep = false;
            },
            None => {},
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Map a raw CSV header onto its canonical column name, if recognized
pub fn canonical_column(raw: &str) -> Option<&'static str> {
    let token = normalize_header(raw);
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map(|(_, canonical)| *canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_normalization() {
        assert_eq!(normalize_header("OD Min (mm)"), "od_min_mm");
        assert_eq!(normalize_header("  Cable Voltage "), "cable_voltage");
        assert_eq!(normalize_header("S_mm2"), "s_mm2");
        assert_eq!(normalize_header("codigo_retorno"), "codigo_retorno");
        assert_eq!(normalize_header("OD-iso-mm"), "od_iso_mm");
    }

    #[test]
    fn test_multilanguage_aliases_collapse() {
        assert_eq!(canonical_column("codigo_retorno"), Some("code"));
        assert_eq!(canonical_column("Return Code"), Some("code"));
        assert_eq!(canonical_column("OD Min (mm)"), Some("od_min_mm"));
        assert_eq!(canonical_column("S_mm2"), Some("cross_section_mm2"));
        assert_eq!(canonical_column("secao_mm2"), Some("cross_section_mm2"));
        assert_eq!(canonical_column("tipo_condutor"), Some("conductor_type"));
        assert_eq!(canonical_column("Cable Voltage"), Some("voltage_class"));
        assert_eq!(canonical_column("OD_iso_mm"), Some("outer_diameter_mm"));
        assert_eq!(canonical_column("id_logica"), Some("family"));
    }

    #[test]
    fn test_unknown_header_is_rejected() {
        assert_eq!(canonical_column("unrelated_column"), None);
    }
}
