//! Product-family assembly recipes
//!
//! Thin orchestration over the range resolver: each family lists which
//! tables feed which fragments and in what order. The recipes take
//! validated selections (what the interactive configurator collects) and
//! either produce a complete part number or name the first fragment that
//! could not be resolved, together with the underlying cause.

use crate::assembler::{assemble, Fragment, JoinStyle};
use crate::context::{CatalogContext, CurrentClass, TableId};
use crate::error::SelectionError;
use crate::resolver::resolve;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Filter key carried by conductor and compression-lug tables
pub const FILTER_CONDUCTOR_TYPE: &str = "conductor_type";

/// A part number could not be completed; names the offending fragment
#[derive(Debug, Error, Clone, PartialEq)]
#[error("fragment '{fragment}' could not be resolved: {source}")]
pub struct BuildFailure {
    /// Which fragment of the recipe failed
    pub fragment: &'static str,

    /// Why the resolver could not produce it
    #[source]
    pub source: SelectionError,
}

/// Conductor specification shared by both families
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConductorSpec {
    /// Conductor construction type (e.g. "Copper", "Aluminum Stranded")
    pub conductor_type: String,

    /// Nominal cross-section in mm2
    pub size_mm2: f64,
}

/// Terminal material for 200 A elbows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElbowMaterial {
    /// Copper terminal, code "C"
    Copper,
    /// Bimetallic terminal, code "B"
    Bimetallic,
}

impl ElbowMaterial {
    fn code(self) -> &'static str {
        match self {
            ElbowMaterial::Copper => "C",
            ElbowMaterial::Bimetallic => "B",
        }
    }
}

/// Validated selection for a 200 A loadbreak elbow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Elbow200Selection {
    /// Voltage class of the chosen base product, in kV
    pub voltage_kv: u16,

    /// Include a capacitive test point (adds the "T" option letter)
    pub test_point: bool,

    /// Cable diameter over insulation in mm
    pub diameter_mm: f64,

    /// Conductor type and size, looked up in the 2-digit conductor table
    pub conductor: ConductorSpec,

    /// Terminal material
    pub material: ElbowMaterial,
}

/// Build a 200 A elbow part number.
///
/// Fragment order: optional "T", cable-range code, 2-digit conductor code,
/// material letter.
pub fn build_elbow200(
    ctx: &CatalogContext,
    base_code: &str,
    selection: &Elbow200Selection,
) -> Result<String, BuildFailure> {
    let range_table = TableId::CableRange {
        voltage_kv: selection.voltage_kv,
        current: CurrentClass::A200,
    };

    let range_code =
        resolve(ctx, range_table, &[], selection.diameter_mm).map_err(|source| BuildFailure {
            fragment: "cable_range",
            source,
        })?;

    let conductor_code = resolve(
        ctx,
        TableId::Conductor200,
        &[(
            FILTER_CONDUCTOR_TYPE,
            selection.conductor.conductor_type.as_str(),
        )],
        selection.conductor.size_mm2,
    )
    .map_err(|source| BuildFailure {
        fragment: "conductor_code",
        source,
    })?;

    let mut fragments = Vec::new();
    if selection.test_point {
        fragments.push(Fragment::literal("T"));
    }
    fragments.push(Fragment::Code(range_code));
    fragments.push(Fragment::Code(conductor_code));
    fragments.push(Fragment::literal(selection.material.code()));

    let part_number = assemble(base_code, &fragments, JoinStyle::Concat);
    debug!(%part_number, "assembled 200A elbow part number");
    Ok(part_number)
}

/// Continuous-current rating for T-body products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmpRating {
    #[serde(rename = "600A")]
    A600,
    #[serde(rename = "900A")]
    A900,
}

impl AmpRating {
    /// Rating fragment; the test-point option replaces the "A" suffix
    /// with "T" per the catalog convention
    fn code(self, test_point: bool) -> String {
        let rating = match self {
            AmpRating::A600 => "600",
            AmpRating::A900 => "900",
        };
        if test_point {
            format!("{}T", rating)
        } else {
            rating.to_string()
        }
    }
}

/// Lug material for 600 A compression connectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LugMaterial {
    /// Copper lug, suffix "CC"
    Copper,
    /// Aluminum or bimetallic lug, suffix "A"
    Aluminum,
}

impl LugMaterial {
    fn suffix(self) -> &'static str {
        match self {
            LugMaterial::Copper => "CC",
            LugMaterial::Aluminum => "A",
        }
    }
}

/// Connector choice for a 600 A T-body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LugChoice {
    /// Compression connector: 4-digit lug code plus material suffix
    Compression {
        conductor: ConductorSpec,
        material: LugMaterial,
    },

    /// Shear-bolt connector: range-matched over conductor cross-section
    ShearBolt { size_mm2: f64 },
}

/// Validated selection for a 600 A deadbreak T-body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TBody600Selection {
    /// Voltage class of the chosen base product, in kV
    pub voltage_kv: u16,

    /// Continuous-current rating
    pub amp_rating: AmpRating,

    /// Include a test point
    pub test_point: bool,

    /// Cable diameter over insulation in mm
    pub diameter_mm: f64,

    /// Connector specification
    pub lug: LugChoice,
}

/// Build a 600 A T-body part number.
///
/// Fragment order: rating code, cable-range code, lug code.
pub fn build_tbody600(
    ctx: &CatalogContext,
    base_code: &str,
    selection: &TBody600Selection,
) -> Result<String, BuildFailure> {
    let range_table = TableId::CableRange {
        voltage_kv: selection.voltage_kv,
        current: CurrentClass::A600,
    };

    let range_code =
        resolve(ctx, range_table, &[], selection.diameter_mm).map_err(|source| BuildFailure {
            fragment: "cable_range",
            source,
        })?;

    let lug_code = match &selection.lug {
        LugChoice::Compression {
            conductor,
            material,
        } => {
            let code = resolve(
                ctx,
                TableId::CompressionLug600,
                &[(FILTER_CONDUCTOR_TYPE, conductor.conductor_type.as_str())],
                conductor.size_mm2,
            )
            .map_err(|source| BuildFailure {
                fragment: "compression_lug",
                source,
            })?;
            format!("{}{}", code, material.suffix())
        },
        LugChoice::ShearBolt { size_mm2 } => resolve(ctx, TableId::ShearBolt, &[], *size_mm2)
            .map_err(|source| BuildFailure {
                fragment: "shear_bolt_lug",
                source,
            })?,
    };

    let fragments = [
        Fragment::Code(selection.amp_rating.code(selection.test_point)),
        Fragment::Code(range_code),
        Fragment::Code(lug_code),
    ];

    let part_number = assemble(base_code, &fragments, JoinStyle::Concat);
    debug!(%part_number, "assembled 600A T-body part number");
    Ok(part_number)
}
