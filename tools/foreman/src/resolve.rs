//! Part-number resolution command
//!
//! Maps CLI arguments onto validated family selections and runs the
//! assembly recipes. Failures print the offending fragment and its cause,
//! never a placeholder code.

use anyhow::{bail, Result};
use catalog_model::{
    build_elbow200, build_tbody600, AmpRating, BuildFailure, CatalogContext, ConductorSpec,
    Elbow200Selection, ElbowMaterial, LugChoice, LugMaterial, TBody600Selection,
};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;

#[derive(Subcommand)]
pub enum ResolveCommands {
    /// Build a 200 A loadbreak elbow part number
    #[command(about = "Build a 200A loadbreak elbow part number")]
    Elbow200(Elbow200Args),

    /// Build a 600 A deadbreak T-body part number
    #[command(about = "Build a 600A deadbreak T-body part number")]
    Tbody600(TBody600Args),
}

#[derive(Args)]
pub struct Elbow200Args {
    /// Base code of the chosen product (e.g. 15-LE200)
    pub base_code: String,

    /// Voltage class in kV (15, 25 or 35)
    #[arg(short = 'v', long)]
    pub voltage: u16,

    /// Cable diameter over insulation in mm
    #[arg(short = 'd', long)]
    pub diameter: f64,

    /// Conductor construction type (must match the conductor table)
    #[arg(long)]
    pub conductor_type: String,

    /// Conductor cross-section in mm2
    #[arg(long)]
    pub conductor_size: f64,

    /// Terminal material
    #[arg(long, value_enum)]
    pub material: ElbowMaterialArg,

    /// Include a capacitive test point
    #[arg(short = 't', long)]
    pub test_point: bool,
}

#[derive(Args)]
pub struct TBody600Args {
    /// Base code of the chosen product (e.g. DT625)
    pub base_code: String,

    /// Voltage class in kV (15, 25 or 35)
    #[arg(short = 'v', long)]
    pub voltage: u16,

    /// Continuous-current rating
    #[arg(long, value_enum, default_value = "600")]
    pub rating: RatingArg,

    /// Cable diameter over insulation in mm
    #[arg(short = 'd', long)]
    pub diameter: f64,

    /// Include a test point
    #[arg(short = 't', long)]
    pub test_point: bool,

    /// Compression lug: conductor type (requires --compression-size)
    #[arg(long, requires = "compression_size", conflicts_with = "shear_bolt_size")]
    pub compression_type: Option<String>,

    /// Compression lug: conductor cross-section in mm2
    #[arg(long, requires = "compression_type")]
    pub compression_size: Option<f64>,

    /// Compression lug material
    #[arg(long, value_enum, default_value = "copper")]
    pub compression_material: LugMaterialArg,

    /// Shear-bolt lug: conductor cross-section in mm2
    #[arg(long, conflicts_with = "compression_type")]
    pub shear_bolt_size: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ElbowMaterialArg {
    /// Copper terminal ("C")
    Copper,
    /// Bimetallic terminal ("B")
    Bimetallic,
}

impl From<ElbowMaterialArg> for ElbowMaterial {
    fn from(arg: ElbowMaterialArg) -> Self {
        match arg {
            ElbowMaterialArg::Copper => ElbowMaterial::Copper,
            ElbowMaterialArg::Bimetallic => ElbowMaterial::Bimetallic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RatingArg {
    #[value(name = "600")]
    R600,
    #[value(name = "900")]
    R900,
}

impl From<RatingArg> for AmpRating {
    fn from(arg: RatingArg) -> Self {
        match arg {
            RatingArg::R600 => AmpRating::A600,
            RatingArg::R900 => AmpRating::A900,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LugMaterialArg {
    /// Copper lug (suffix "CC")
    Copper,
    /// Aluminum/bimetallic lug (suffix "A")
    Aluminum,
}

impl From<LugMaterialArg> for LugMaterial {
    fn from(arg: LugMaterialArg) -> Self {
        match arg {
            LugMaterialArg::Copper => LugMaterial::Copper,
            LugMaterialArg::Aluminum => LugMaterial::Aluminum,
        }
    }
}

pub fn handle_command(cmd: ResolveCommands, ctx: &CatalogContext) -> Result<()> {
    let outcome = match cmd {
        ResolveCommands::Elbow200(args) => {
            let selection = Elbow200Selection {
                voltage_kv: args.voltage,
                test_point: args.test_point,
                diameter_mm: args.diameter,
                conductor: ConductorSpec {
                    conductor_type: args.conductor_type.clone(),
                    size_mm2: args.conductor_size,
                },
                material: args.material.into(),
            };
            build_elbow200(ctx, &args.base_code, &selection)
        },
        ResolveCommands::Tbody600(args) => {
            let lug = lug_choice(&args)?;
            let selection = TBody600Selection {
                voltage_kv: args.voltage,
                amp_rating: args.rating.into(),
                test_point: args.test_point,
                diameter_mm: args.diameter,
                lug,
            };
            build_tbody600(ctx, &args.base_code, &selection)
        },
    };

    match outcome {
        Ok(part_number) => {
            println!("{} {}", "Part number:".bold(), part_number.green().bold());
            Ok(())
        },
        Err(failure) => {
            print_failure(&failure);
            std::process::exit(1);
        },
    }
}

fn lug_choice(args: &TBody600Args) -> Result<LugChoice> {
    match (&args.compression_type, args.shear_bolt_size) {
        (Some(conductor_type), None) => Ok(LugChoice::Compression {
            conductor: ConductorSpec {
                conductor_type: conductor_type.clone(),
                // guarded by clap's `requires`
                size_mm2: args.compression_size.unwrap_or_default(),
            },
            material: args.compression_material.into(),
        }),
        (None, Some(size_mm2)) => Ok(LugChoice::ShearBolt { size_mm2 }),
        _ => bail!("specify either --compression-type/--compression-size or --shear-bolt-size"),
    }
}

fn print_failure(failure: &BuildFailure) {
    eprintln!(
        "{} fragment '{}' could not be resolved",
        "ERROR".red().bold(),
        failure.fragment.yellow()
    );
    eprintln!("  cause: {}", failure.source);
    if failure.source.is_table_missing() {
        eprintln!(
            "  {}",
            "the named reference table is not present in the data directory".dimmed()
        );
    }
}
