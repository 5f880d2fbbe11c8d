use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Specs for a SKU name found in the curated table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownSpec {
    pub vcpus: u32,
    pub memory_gb: f64,
    pub family: &'static str,
}

const fn spec(vcpus: u32, memory_gb: f64, family: &'static str) -> KnownSpec {
    KnownSpec {
        vcpus,
        memory_gb,
        family,
    }
}

/// Curated specs for the sizes that show up most often in price data,
/// so common SKUs resolve without an authenticated capability feed.
/// Lookups are exact and case-sensitive.
const KNOWN_SKU_TABLE: &[(&str, KnownSpec)] = &[
    // General purpose (D-series v5)
    ("Standard_D2s_v5", spec(2, 8.0, "D v5 Series")),
    ("Standard_D4s_v5", spec(4, 16.0, "D v5 Series")),
    ("Standard_D8s_v5", spec(8, 32.0, "D v5 Series")),
    ("Standard_D16s_v5", spec(16, 64.0, "D v5 Series")),
    ("Standard_D32s_v5", spec(32, 128.0, "D v5 Series")),
    // D-series v4
    ("Standard_D2s_v4", spec(2, 8.0, "D v4 Series")),
    ("Standard_D4s_v4", spec(4, 16.0, "D v4 Series")),
    ("Standard_D8s_v4", spec(8, 32.0, "D v4 Series")),
    // D-series v3
    ("Standard_D2s_v3", spec(2, 8.0, "D v3 Series")),
    ("Standard_D4s_v3", spec(4, 16.0, "D v3 Series")),
    ("Standard_D8s_v3", spec(8, 32.0, "D v3 Series")),
    // Memory optimized (E-series v5)
    ("Standard_E2s_v5", spec(2, 16.0, "E v5 Series")),
    ("Standard_E4s_v5", spec(4, 32.0, "E v5 Series")),
    ("Standard_E8s_v5", spec(8, 64.0, "E v5 Series")),
    ("Standard_E16s_v5", spec(16, 128.0, "E v5 Series")),
    ("Standard_E32s_v5", spec(32, 256.0, "E v5 Series")),
    // E-series v4
    ("Standard_E2s_v4", spec(2, 16.0, "E v4 Series")),
    ("Standard_E4s_v4", spec(4, 32.0, "E v4 Series")),
    // E-series v3
    ("Standard_E2s_v3", spec(2, 16.0, "E v3 Series")),
    ("Standard_E4s_v3", spec(4, 32.0, "E v3 Series")),
    // Compute optimized (F-series v2)
    ("Standard_F2s_v2", spec(2, 4.0, "F v2 Series")),
    ("Standard_F4s_v2", spec(4, 8.0, "F v2 Series")),
    ("Standard_F8s_v2", spec(8, 16.0, "F v2 Series")),
    ("Standard_F16s_v2", spec(16, 32.0, "F v2 Series")),
    // Burstable (B-series)
    ("Standard_B1s", spec(1, 1.0, "B Series")),
    ("Standard_B1ms", spec(1, 2.0, "B Series")),
    ("Standard_B2s", spec(2, 4.0, "B Series")),
    ("Standard_B2ms", spec(2, 8.0, "B Series")),
    ("Standard_B4ms", spec(4, 16.0, "B Series")),
    ("Standard_B8ms", spec(8, 32.0, "B Series")),
    // Storage optimized (L-series v3)
    ("Standard_L8s_v3", spec(8, 64.0, "L v3 Series")),
    ("Standard_L16s_v3", spec(16, 128.0, "L v3 Series")),
];

static KNOWN_SKUS: Lazy<HashMap<&'static str, KnownSpec>> =
    Lazy::new(|| KNOWN_SKU_TABLE.iter().copied().collect());

pub fn lookup(name: &str) -> Option<KnownSpec> {
    KNOWN_SKUS.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_returns_specs() {
        let spec = lookup("Standard_D2s_v5").unwrap();
        assert_eq!(spec.vcpus, 2);
        assert_eq!(spec.memory_gb, 8.0);
        assert_eq!(spec.family, "D v5 Series");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("standard_d2s_v5").is_none());
    }

    #[test]
    fn test_unlisted_name_misses() {
        assert!(lookup("Standard_D48s_v5").is_none());
    }
}
