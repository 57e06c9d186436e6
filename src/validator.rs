//! Mesh validation and the generation gate.
//!
//! Checks are split into error-level findings (abort generation) and
//! warning-level findings (recorded but non-fatal), mirroring the
//! distinction the original draws between `errors` and `warnings` on its
//! validation result.

use crate::config::KernelConfig;
use crate::errors::{KernelError, KernelResult};
use crate::mesh::WallMesh;
use crate::vertical::floor_elevations;

const ZERO_AREA_THRESHOLD: f64 = 1e-8;
const SHORT_EDGE_FACTOR: f64 = 0.1;
const ROOF_GAP_NEAR: f64 = 0.1;
const ROOF_GAP_EXACT: f64 = 1e-4;

/// A single validation finding.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    NonManifoldEdge { incidence: u32 },
    ZeroAreaFace { area: f64 },
    ShortEdge { length: f64 },
    RoofWallGap { z: f64, expected_z: f64 },
}

impl Finding {
    /// Whether this finding aborts generation (as opposed to being a warning).
    pub fn is_error(&self) -> bool {
        !matches!(self, Finding::ShortEdge { .. })
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Finding::NonManifoldEdge { incidence } => {
                write!(f, "non-manifold edge (incident faces: {incidence})")
            }
            Finding::ZeroAreaFace { area } => write!(f, "zero-area face (area: {area:.2e})"),
            Finding::ShortEdge { length } => write!(f, "short edge (length: {length:.4}m)"),
            Finding::RoofWallGap { z, expected_z } => write!(
                f,
                "roof-wall gap at z={z:.4} (expected {expected_z:.4})"
            ),
        }
    }
}

/// Aggregate outcome of [validate_mesh].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs every check against `mesh` for a building with `floors` floors.
///
/// Every wall strip [crate::walls::build_wall_strip] produces is a sealed
/// hexahedron (outer, inner, two caps, bottom, top), so no boundary edge ever
/// sits open at the roof line regardless of roof style; the non-manifold
/// check below needs no `roof_type` input to stay correct.
pub fn validate_mesh(mesh: &WallMesh, floors: u32, cfg: &KernelConfig) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (_, incidence) in mesh.edge_incidence() {
        if incidence != 2 {
            result
                .errors
                .push(Finding::NonManifoldEdge { incidence });
        }
    }

    for face in &mesh.faces {
        let area = mesh.face_area(face);
        if area < ZERO_AREA_THRESHOLD {
            result.errors.push(Finding::ZeroAreaFace { area });
        }

        let shortest = mesh.shortest_edge(face);
        if shortest < cfg.grid * SHORT_EDGE_FACTOR {
            result.warnings.push(Finding::ShortEdge { length: shortest });
        }
    }

    if floors > 0 {
        let expected_top = floor_elevations(floors - 1, cfg).wall_top_z;
        for vertex in &mesh.vertices {
            let gap = (vertex.z - expected_top).abs();
            if gap > ROOF_GAP_EXACT && gap < ROOF_GAP_NEAR {
                result.errors.push(Finding::RoofWallGap {
                    z: vertex.z,
                    expected_z: expected_top,
                });
            }
        }
    }

    result
}

/// Raises a [KernelError::GenerationError] if `result` contains any
/// error-level finding; otherwise logs warnings (if any) and returns `Ok`.
pub fn generation_gate(result: &ValidationResult, spec_id: &str) -> KernelResult<()> {
    for warning in &result.warnings {
        log::warn!("[{spec_id}] {warning}");
    }

    if result.passed() {
        return Ok(());
    }

    let report = result
        .errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n");
    Err(KernelError::GenerationError {
        spec_id: spec_id.to_string(),
        report,
    })
}
