use anyhow::{Context, Result};
use aoer_procgeo::prelude::*;
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::PathBuf;
use svg::node::element::Path;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShapeKind {
    Rect,
    Line,
    Triangle,
}

/// Draw a handful of random bounded shapes and write each one out as an SVG.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Which generator to run
    #[arg(short, long, value_enum, default_value = "triangle")]
    shape: ShapeKind,

    /// Number of shapes (and files) to generate
    #[arg(short, long, default_value_t = 10)]
    count: usize,

    /// Seed for the random source, so runs are repeatable
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// RON generator config; overrides width/height below
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 500)]
    width: u32,

    #[arg(long, default_value_t = 500)]
    height: u32,

    /// Margin to use when no config file is given. Open triangles take their
    /// arm length from this too, so keep it above 10.
    #[arg(long, default_value_t = 60)]
    margin: u32,

    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start_angle: i64,

    #[arg(long, default_value_t = 360, allow_negative_numbers = true)]
    end_angle: i64,

    /// Minimum separation between the two arms of an open triangle
    #[arg(long, default_value_t = 5)]
    min_angle: i64,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "images")]
    out: PathBuf,
}

fn generate(cli: &Cli, procgeo: &ProcGeo, rng: &mut SmallRng) -> Result<Path> {
    let path = match cli.shape {
        ShapeKind::Rect => procgeo.get_random_rect(rng, true)?.to_path(),
        ShapeKind::Line => procgeo
            .get_random_line(rng, cli.start_angle, cli.end_angle, false)?
            .to_path(),
        ShapeKind::Triangle => procgeo
            .get_random_open_triangles(rng, cli.start_angle, cli.end_angle, cli.min_angle, false)?
            .to_path(),
    };
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ProcGeoConfig::load(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => ProcGeoConfig {
            margin_safe_area: cli.margin,
            ..ProcGeoConfig::new(cli.width, cli.height)
        },
    };
    info!("Generating {} {:?} shape(s) with {:?}", cli.count, cli.shape, config);

    std::fs::create_dir_all(&cli.out)
        .with_context(|| format!("Failed to create output dir {:?}", cli.out))?;

    let mut rng = SmallRng::seed_from_u64(cli.seed);
    let mut written = 0usize;
    for i in 0..cli.count {
        // Fresh generator per shape.
        let procgeo = ProcGeo::from_config(&config)?;
        let path = match generate(&cli, &procgeo, &mut rng) {
            Ok(path) => path,
            Err(err) => {
                warn!("Shape {} failed: {}", i, err);
                continue;
            }
        };
        let document = create_svg_document(config.width, config.height).add(path);
        let fname = cli
            .out
            .join(format!("procgeo_{:?}_{}.svg", cli.shape, i).to_lowercase());
        svg::save(&fname, &document).with_context(|| format!("Failed to write {:?}", fname))?;
        written += 1;
    }
    info!("Wrote {} of {} file(s) to {:?}", written, cli.count, cli.out);
    Ok(())
}
