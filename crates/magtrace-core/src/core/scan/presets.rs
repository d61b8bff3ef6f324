use phf::{Map, phf_map};

pub const DEFAULT_PRESET: &str = "magnetization-x";

/// A named block layout: the marker text and how many header lines follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPreset {
    pub name: &'static str,
    pub marker: &'static str,
    pub header_skip: usize,
    pub description: &'static str,
}

// All of these blocks print `# of ion  s  p  d  tot` followed by a dashed rule, then one line
// per ion.
static PRESETS: Map<&'static str, BlockPreset> = phf_map! {
    "magnetization-x" => BlockPreset {
        name: "magnetization-x",
        marker: "magnetization (x)",
        header_skip: 3,
        description: "Per-ion magnetic moment, x component (collinear total).",
    },
    "magnetization-y" => BlockPreset {
        name: "magnetization-y",
        marker: "magnetization (y)",
        header_skip: 3,
        description: "Per-ion magnetic moment, y component (non-collinear runs).",
    },
    "magnetization-z" => BlockPreset {
        name: "magnetization-z",
        marker: "magnetization (z)",
        header_skip: 3,
        description: "Per-ion magnetic moment, z component (non-collinear runs).",
    },
    "total-charge" => BlockPreset {
        name: "total-charge",
        marker: "total charge",
        header_skip: 3,
        description: "Per-ion integrated charge inside the RWIGS sphere.",
    },
};

pub fn lookup(name: &str) -> Option<&'static BlockPreset> {
    PRESETS.get(name)
}

pub fn default_preset() -> &'static BlockPreset {
    &PRESETS[DEFAULT_PRESET]
}

/// All presets, sorted by name.
pub fn all() -> Vec<&'static BlockPreset> {
    let mut presets: Vec<_> = PRESETS.values().collect();
    presets.sort_by_key(|p| p.name);
    presets
}
