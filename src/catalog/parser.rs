use once_cell::sync::Lazy;
use regex::Regex;

/// First run of letters followed by digits, e.g. `D2` in `Standard_D2s_v3`.
static CPU_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+(\d+)").expect("valid regex"));

/// Letter, digits, then a trailing `s` (the premium storage naming
/// convention), e.g. `d2s`.
static PREMIUM_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]\d+s").expect("valid regex"));

/// Family classes recognizable from a marker in the SKU name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyClass {
    GeneralPurpose,
    MemoryOptimized,
    ComputeOptimized,
    EntryLevel,
    Burstable,
    StorageOptimized,
    HighMemory,
    Gpu,
    Unknown,
}

impl FamilyClass {
    pub fn label(&self) -> &'static str {
        match self {
            FamilyClass::GeneralPurpose => "General Purpose",
            FamilyClass::MemoryOptimized => "Memory Optimized",
            FamilyClass::ComputeOptimized => "Compute Optimized",
            FamilyClass::EntryLevel => "Entry Level",
            FamilyClass::Burstable => "Burstable",
            FamilyClass::StorageOptimized => "Storage Optimized",
            FamilyClass::HighMemory => "High Memory",
            FamilyClass::Gpu => "GPU",
            FamilyClass::Unknown => "Unknown",
        }
    }
}

/// Classify by the first family marker found in the lower-cased name.
pub fn classify_family(name: &str) -> FamilyClass {
    let lower = name.to_lowercase();
    if lower.contains("_d") {
        FamilyClass::GeneralPurpose
    } else if lower.contains("_e") {
        FamilyClass::MemoryOptimized
    } else if lower.contains("_f") {
        FamilyClass::ComputeOptimized
    } else if lower.contains("_a") {
        FamilyClass::EntryLevel
    } else if lower.contains("_b") {
        FamilyClass::Burstable
    } else if lower.contains("_l") {
        FamilyClass::StorageOptimized
    } else if lower.contains("_m") {
        FamilyClass::HighMemory
    } else if lower.contains("_n") {
        FamilyClass::Gpu
    } else {
        FamilyClass::Unknown
    }
}

/// Extract the vCPU count from the first letters-then-digits run,
/// `Standard_D16s_v5` -> 16. `None` when the name carries no digit run.
pub fn extract_vcpus(name: &str) -> Option<u32> {
    CPU_RUN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Memory from the per-family vCPU ratio. Families without a usable ratio
/// (GPU, unclassified) yield `None`.
pub fn memory_gb_for(family: FamilyClass, vcpus: u32, name: &str) -> Option<f64> {
    let ratio = match family {
        FamilyClass::GeneralPurpose => 4.0,
        FamilyClass::MemoryOptimized | FamilyClass::StorageOptimized => 8.0,
        FamilyClass::ComputeOptimized => 2.0,
        FamilyClass::HighMemory => 28.0,
        FamilyClass::Burstable => {
            // The small burstable sizes break the 1:4 ratio.
            return Some(match vcpus {
                1 => 1.0,
                2 => 4.0,
                _ => 4.0 * f64::from(vcpus),
            });
        }
        FamilyClass::EntryLevel => {
            if name.to_lowercase().contains("_v2") {
                2.0
            } else {
                1.0
            }
        }
        FamilyClass::Gpu | FamilyClass::Unknown => return None,
    };
    Some(ratio * f64::from(vcpus))
}

/// Boolean capabilities guessed from the name. Only consulted when no
/// authoritative capability entry exists for the SKU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub premium_io: bool,
    pub ephemeral_os: bool,
    pub accelerated_networking: bool,
    pub nested_virtualization: bool,
}

pub fn infer_features(name: &str, family: FamilyClass, vcpus: Option<u32>) -> FeatureFlags {
    let lower = name.to_lowercase();

    let premium_io = PREMIUM_SUFFIX.is_match(&lower) || lower.ends_with('s');
    let v3_plus = lower.contains("_v3") || lower.contains("_v4") || lower.contains("_v5");

    let accelerated_networking = (v3_plus
        && vcpus.unwrap_or(0) >= 2
        && family != FamilyClass::Burstable
        && family != FamilyClass::EntryLevel)
        || (family == FamilyClass::ComputeOptimized && lower.contains('s'));

    let nested_virtualization = v3_plus
        && matches!(
            family,
            FamilyClass::GeneralPurpose | FamilyClass::MemoryOptimized
        );

    FeatureFlags {
        premium_io,
        // Ephemeral OS disks ride on the same temp-disk naming convention.
        ephemeral_os: premium_io,
        accelerated_networking,
        nested_virtualization,
    }
}

pub fn max_data_disks(vcpus: u32) -> u32 {
    vcpus.saturating_mul(2).min(64)
}

pub fn max_nics(vcpus: u32) -> u32 {
    if vcpus >= 16 {
        8
    } else if vcpus >= 4 {
        4
    } else {
        2
    }
}

pub fn is_spot(name: &str) -> bool {
    name.to_lowercase().contains("spot")
}
