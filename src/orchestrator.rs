//! Sequences the per-floor pipeline and produces the export manifest.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::KernelConfig;
use crate::edges::classify_edges;
use crate::errors::KernelResult;
use crate::floorplan::{BuildingSpec, FloorplanSource};
use crate::geometry::robust_union;
use crate::mesh::{accumulate, WallMesh};
use crate::validator::{generation_gate, validate_mesh};
use crate::vertical::floor_elevations;
use crate::walls::build_wall_strip;

/// Per-floor statistics recorded in the manifest.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloorOutput {
    pub index: u32,
    pub room_count: usize,
    pub wall_segment_count: usize,
}

/// Full result of a generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOutput {
    pub floors: Vec<FloorOutput>,
    pub roof_type: String,
    pub manifest_path: PathBuf,
    /// Path to an exported mesh file, if a mesh export step was run. This
    /// crate only writes the stats manifest; mesh export is an external
    /// collaborator's responsibility, so this is always `None` here.
    pub mesh_path: Option<PathBuf>,
}

#[derive(Serialize)]
struct Manifest<'a> {
    building: &'a str,
    floors: &'a [FloorOutput],
    roof: &'a str,
    format: &'a str,
    created_at: String,
}

/// Runs the full pipeline for `spec`, writing the export manifest under
/// `output_dir`, and returns the generation's summary output.
///
/// `created_at` is supplied by the caller (as an RFC 3339 timestamp) rather
/// than read from the system clock, so the pipeline itself stays a pure
/// function of its inputs.
pub fn generate(
    spec: &BuildingSpec,
    floorplan: &dyn FloorplanSource,
    output_dir: &Path,
    created_at: &str,
    cfg: &KernelConfig,
) -> KernelResult<GenerationOutput> {
    spec.validate()?;

    log::info!(
        "starting generation: {}x{} x{} floors, roof={}",
        spec.width,
        spec.depth,
        spec.floors,
        spec.roof_type
    );

    let mut mesh = WallMesh::new();
    let mut floor_outputs = Vec::with_capacity(spec.floors as usize);

    for floor_index in 0..spec.floors {
        let layout = floorplan.generate_floorplan(spec, floor_index);
        let footprint = robust_union(&layout.rooms, cfg)?;
        let edges = classify_edges(&footprint, &layout.rooms, cfg);
        let elev = floor_elevations(floor_index, cfg);
        let centroid = footprint_centroid(&footprint);

        let mut segment_count = 0;
        for edge in &edges {
            if let Some(strip) = build_wall_strip(edge, &elev, centroid, cfg) {
                accumulate(&mut mesh, &strip, cfg);
                segment_count += 1;
            }
        }

        log::debug!(
            "floor {floor_index}: {} rooms, {segment_count} wall segments",
            layout.rooms.len()
        );

        floor_outputs.push(FloorOutput {
            index: floor_index,
            room_count: layout.rooms.len(),
            wall_segment_count: segment_count,
        });
    }

    let validation = validate_mesh(&mesh, spec.floors, cfg);
    let spec_id = format!("building-seed-{}", spec.seed);
    if let Err(err) = generation_gate(&validation, &spec_id) {
        log::error!("generation aborted: {err}");
        return Err(err);
    }

    let manifest_path = output_dir.join(format!("{spec_id}.manifest.json"));
    let manifest = Manifest {
        building: &spec_id,
        floors: &floor_outputs,
        roof: &spec.roof_type.to_string(),
        format: "glb",
        created_at: created_at.to_string(),
    };
    std::fs::create_dir_all(output_dir)?;
    std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    log::info!("generation finished: {} floors written", floor_outputs.len());

    Ok(GenerationOutput {
        floors: floor_outputs,
        roof_type: spec.roof_type.to_string(),
        manifest_path,
        mesh_path: None,
    })
}

/// Centroid of a polygon's exterior ring, used to orient inward normals.
fn footprint_centroid(footprint: &crate::geometry::Footprint) -> (f64, f64) {
    use geo::Centroid;
    footprint
        .centroid()
        .map(|c| (c.x(), c.y()))
        .unwrap_or((0.0, 0.0))
}
