//! Explicit, immutable configuration for the geometry kernel.
//!
//! Every tunable constant the kernel uses is carried by a [KernelConfig] value
//! rather than read from process-wide globals, so a single process can run
//! multiple generations with different settings without interference.

use std::collections::HashMap;
use std::env;

use crate::errors::KernelError;

/// Named quantization granularity, expressed as a multiple of [KernelConfig::micro_unit].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapMode {
    /// 1x MICRO_UNIT (2.5 cm by default)
    Micro,
    /// 10x MICRO_UNIT (25 cm by default)
    Meso,
    /// 40x MICRO_UNIT (100 cm by default)
    Macro,
}

impl SnapMode {
    /// Multiple of [KernelConfig::micro_unit] this mode snaps to.
    pub fn multiple(self) -> i64 {
        match self {
            SnapMode::Micro => 1,
            SnapMode::Meso => 10,
            SnapMode::Macro => 40,
        }
    }

    /// Parses a snap mode from its canonical name or one of the legacy aliases
    /// (`LOOSE` -> Meso, `STRICT` -> Micro). `MODULAR` has no exact multiple of
    /// MICRO_UNIT in the canonical set and is rejected.
    pub fn parse(name: &str) -> Result<SnapMode, KernelError> {
        match name.to_ascii_uppercase().as_str() {
            "MICRO" => Ok(SnapMode::Micro),
            "MESO" => Ok(SnapMode::Meso),
            "MACRO" => Ok(SnapMode::Macro),
            "STRICT" => Ok(SnapMode::Micro),
            "LOOSE" => Ok(SnapMode::Meso),
            other => Err(KernelError::InvalidSnapMode {
                name: other.to_string(),
            }),
        }
    }
}

/// A single standard size entry, width/height in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeStandard {
    pub width: f64,
    pub height: f64,
    /// Sill height above the floor, meters. Unused for doors.
    pub sill: f64,
}

/// Wall height/thickness standards, mirroring the architectural constants of
/// the original configuration module.
#[derive(Clone, Debug, PartialEq)]
pub struct WallStandards {
    pub height_min: f64,
    pub height_default: f64,
    pub height_max: f64,
    pub height_step: f64,
    pub thickness_thin: f64,
    pub thickness_standard: f64,
    pub thickness_thick: f64,
}

/// Immutable configuration record threaded through every kernel entry point.
///
/// Replaces the original module-level mutable globals with a value that can
/// be constructed once (via [KernelConfig::default]) and overridden from the
/// environment (via [KernelConfig::from_env]) without any process-wide state.
#[derive(Clone, Debug, PartialEq)]
pub struct KernelConfig {
    /// Base integer-grid unit, in meters.
    pub micro_unit: f64,
    /// Standard grid spacing (10x micro_unit by default), in meters.
    pub grid: f64,
    /// Vertical distance between floor base elevations, in meters.
    pub story_height: f64,
    /// Wall height above the floor base elevation, in meters.
    pub wall_height: f64,
    /// Nominal wall thickness, in meters.
    pub wall_thickness: f64,
    /// Vertex welding tolerance used when accumulating wall strips into a mesh.
    pub merge_distance: f64,
    pub wall_standards: WallStandards,
    pub door_standards: HashMap<&'static str, SizeStandard>,
    pub window_standards: HashMap<&'static str, SizeStandard>,
}

impl Default for KernelConfig {
    fn default() -> Self {
        let mut door_standards = HashMap::new();
        door_standards.insert(
            "single",
            SizeStandard {
                width: 0.9,
                height: 2.1,
                sill: 0.0,
            },
        );
        door_standards.insert(
            "double",
            SizeStandard {
                width: 1.8,
                height: 2.1,
                sill: 0.0,
            },
        );
        door_standards.insert(
            "garage",
            SizeStandard {
                width: 2.4,
                height: 2.4,
                sill: 0.0,
            },
        );

        let mut window_standards = HashMap::new();
        window_standards.insert(
            "small",
            SizeStandard {
                width: 0.6,
                height: 0.6,
                sill: 1.2,
            },
        );
        window_standards.insert(
            "standard",
            SizeStandard {
                width: 1.2,
                height: 1.4,
                sill: 0.9,
            },
        );
        window_standards.insert(
            "large",
            SizeStandard {
                width: 1.8,
                height: 1.6,
                sill: 0.8,
            },
        );
        window_standards.insert(
            "panoramic",
            SizeStandard {
                width: 2.4,
                height: 1.8,
                sill: 0.6,
            },
        );

        KernelConfig {
            micro_unit: 0.025,
            grid: 0.25,
            story_height: 3.20,
            wall_height: 3.00,
            wall_thickness: 0.20,
            merge_distance: 0.005,
            wall_standards: WallStandards {
                height_min: 2.4,
                height_default: 3.0,
                height_max: 4.5,
                height_step: 0.25,
                thickness_thin: 0.1,
                thickness_standard: 0.2,
                thickness_thick: 0.3,
            },
            door_standards,
            window_standards,
        }
    }
}

impl KernelConfig {
    /// Builds a [KernelConfig] starting from defaults and overriding individual
    /// fields from environment variables, mirroring the original's
    /// `os.getenv`-based configuration surface.
    ///
    /// Recognized variables: `GEOKERNEL_MICRO_UNIT`, `GEOKERNEL_GRID`,
    /// `GEOKERNEL_STORY_HEIGHT`, `GEOKERNEL_WALL_HEIGHT`,
    /// `GEOKERNEL_WALL_THICKNESS`, `GEOKERNEL_MERGE_DISTANCE`.
    pub fn from_env() -> Self {
        let mut cfg = KernelConfig::default();
        for (var, slot) in [
            ("GEOKERNEL_MICRO_UNIT", &mut cfg.micro_unit),
            ("GEOKERNEL_GRID", &mut cfg.grid),
            ("GEOKERNEL_STORY_HEIGHT", &mut cfg.story_height),
            ("GEOKERNEL_WALL_HEIGHT", &mut cfg.wall_height),
            ("GEOKERNEL_WALL_THICKNESS", &mut cfg.wall_thickness),
            ("GEOKERNEL_MERGE_DISTANCE", &mut cfg.merge_distance),
        ] {
            if let Ok(raw) = env::var(var) {
                match raw.parse::<f64>() {
                    Ok(value) => {
                        log::debug!("config override: {var}={value}");
                        *slot = value;
                    }
                    Err(_) => log::warn!("ignoring unparseable override {var}={raw}"),
                }
            }
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_mode_aliases_resolve() {
        assert_eq!(SnapMode::parse("micro").unwrap(), SnapMode::Micro);
        assert_eq!(SnapMode::parse("STRICT").unwrap(), SnapMode::Micro);
        assert_eq!(SnapMode::parse("loose").unwrap(), SnapMode::Meso);
        assert_eq!(SnapMode::parse("MACRO").unwrap(), SnapMode::Macro);
    }

    #[test]
    fn modular_alias_is_rejected() {
        assert!(SnapMode::parse("MODULAR").is_err());
    }

    #[test]
    fn default_constants_match_architectural_spec() {
        let cfg = KernelConfig::default();
        assert_eq!(cfg.micro_unit, 0.025);
        assert_eq!(cfg.grid, 0.25);
        assert_eq!(cfg.story_height, 3.20);
        assert_eq!(cfg.wall_height, 3.00);
        assert_eq!(cfg.wall_thickness, 0.20);
        assert_eq!(cfg.merge_distance, 0.005);
    }
}
