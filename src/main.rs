use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use graftmark::report::{fenestration_table, template_table};
use graftmark::request::apply_requests;
use graftmark::{
    export_to_file, init_logging, AngleConvention, CenteringMode, Config, FenestrationRequest,
    JsonExporter, LogFormat, Pattern, PatternRenderer, PlanningSession, SvgRenderer, YOrientation,
};
use graftmark_planner::{angle_to_hour, resolve_angle};
use std::path::{Path, PathBuf};
use tracing::{info, info_span, warn};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Configuration file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the graft templates
    Templates,
    /// Convert between clock hours and canonical angles
    Angle(AngleArgs),
    /// Plan fenestrations on a graft and export the cutting pattern
    Plan(PlanArgs),
}

#[derive(Args)]
#[command(group(ArgGroup::new("input").required(true).args(["hour", "degrees"])))]
struct AngleArgs {
    /// Clock hour (1-12)
    #[arg(long)]
    hour: Option<u8>,
    /// Canonical angle in degrees [0, 360)
    #[arg(long)]
    degrees: Option<f64>,
    /// Clock hour facing anterior
    #[arg(long)]
    anterior: Option<u8>,
}

#[derive(Args)]
struct PlanArgs {
    /// Graft template id
    #[arg(short, long)]
    template: String,
    /// Fenestration as VESSEL@DISTANCE:ANGLE:DIAMETER (e.g. sma@50:12:6 or rra@70:270deg:6)
    #[arg(short, long = "fen")]
    fenestrations: Vec<FenestrationRequest>,
    /// Anterior line position: edge or center
    #[arg(long)]
    centering: Option<CenteringMode>,
    /// proximal-down or distal-down
    #[arg(long)]
    orientation: Option<YOrientation>,
    /// Clock hour facing anterior
    #[arg(long)]
    anterior: Option<u8>,
    /// Minimum axial spacing between openings (mm)
    #[arg(long)]
    min_spacing: Option<f64>,
    /// Write the true-scale print template here
    #[arg(long)]
    svg: Option<PathBuf>,
    /// Write the gridded preview here
    #[arg(long)]
    preview: Option<PathBuf>,
    /// Write the pattern as JSON here
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    init_logging(format, level)?;
    info!("graftmark {} (built {})", graftmark::VERSION, graftmark::BUILD_DATE);

    let config = Config::load_or_default(cli.config.as_deref()).context("loading configuration")?;

    match cli.command {
        Command::Templates => {
            let catalog = config.catalog()?;
            print!("{}", template_table(catalog.list()));
        }
        Command::Angle(args) => run_angle(&config, args)?,
        Command::Plan(args) => run_plan(&config, args)?,
    }

    Ok(())
}

fn run_angle(config: &Config, args: AngleArgs) -> anyhow::Result<()> {
    let anterior = args.anterior.unwrap_or(config.convention.anterior_hour);
    if let Some(hour) = args.hour {
        let degrees = resolve_angle(hour, anterior)?;
        println!(
            "{} o'clock with {} o'clock anterior = {}°",
            hour, anterior, degrees
        );
    } else if let Some(degrees) = args.degrees {
        let hour = angle_to_hour(degrees, anterior)?;
        println!(
            "{}° with {} o'clock anterior ≈ {} o'clock",
            degrees, anterior, hour
        );
    }
    Ok(())
}

fn write_export<R: PatternRenderer + ?Sized>(
    renderer: &R,
    pattern: &Pattern,
    path: &Path,
) -> anyhow::Result<()> {
    export_to_file(renderer, pattern, path)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {} to {}", renderer.name(), path.display());
    Ok(())
}

fn run_plan(config: &Config, args: PlanArgs) -> anyhow::Result<()> {
    let catalog = config.catalog()?;
    let template = catalog.lookup(&args.template)?.clone();

    let mut options = config.pattern_options()?;
    options.convention = AngleConvention::new(
        args.anterior.unwrap_or(options.convention.anterior_hour),
        args.centering.unwrap_or(options.convention.centering),
    )?;
    if let Some(orientation) = args.orientation {
        options.orientation = orientation;
    }

    let mut limits = config.validation_limits();
    if let Some(spacing) = args.min_spacing {
        limits.min_spacing = spacing;
    }

    let mut session = PlanningSession::new(template, options, limits, config.layout_config())?;
    let span = info_span!("plan", session = %session.id());
    let _enter = span.enter();

    let rejected = apply_requests(&mut session, &args.fenestrations)?;
    for (request, e) in &rejected {
        eprintln!("Rejected {}: {}", request, e);
    }

    let pattern = session.pattern();
    print!("{}", fenestration_table(pattern));
    if !rejected.is_empty() {
        warn!(
            "{} of {} fenestrations rejected",
            rejected.len(),
            args.fenestrations.len()
        );
        println!(
            "{} of {} fenestrations rejected",
            rejected.len(),
            args.fenestrations.len()
        );
    }

    let export = &config.export;
    if let Some(path) = &args.svg {
        let renderer = SvgRenderer::print(export.margin_mm)
            .with_page(export.page)
            .with_timestamp(true);
        write_export(&renderer, pattern, &export.resolve_output(path))?;
    }
    if let Some(path) = &args.preview {
        let renderer = SvgRenderer::preview(export.margin_mm);
        write_export(&renderer, pattern, &export.resolve_output(path))?;
    }
    if let Some(path) = &args.json {
        write_export(&JsonExporter::pretty(), pattern, &export.resolve_output(path))?;
    }

    Ok(())
}
