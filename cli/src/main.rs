
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde_json::{Value, json};
use studio::campaign::{self, CampaignError, CampaignSpec, TemplateRef};
use studio::doc::{DrawableObject, Scene};
use studio::engine::{Action, EngineCore};
use studio::export::{ExportConfig, ExportError, Exporter, export_filename};
use studio::input::Tool;
use studio::platform::Platform;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Campaign(#[from] CampaignError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("no template `{id}` for {platform}")]
    UnknownTemplate { platform: Platform, id: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("tool `{0}` does not add an object")]
    UnsupportedTool(String),
    #[error("edit rejected: {0:?}")]
    Rejected(studio::engine::Rejection),
}

#[derive(Parser, Debug)]
#[command(name = "studio-cli", about = "Compose and export campaign graphics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the template gallery for a platform.
    Templates {
        #[arg(long, default_value = "instagram")]
        platform: String,
    },
    /// Build the starting scene for a campaign and export it as PNG.
    Render(RenderArgs),
    /// Print the starting scene for a campaign, one object per line.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct CampaignArgs {
    #[arg(long, help = "Campaign JSON file as produced by the form")]
    campaign: PathBuf,

    #[arg(long, help = "Image file; overrides sourceImage in the campaign")]
    image: Option<PathBuf>,

    #[arg(long, default_value = "1")]
    template: String,

    #[arg(long = "tool", help = "Add an object with this tool (text, rectangle, circle); repeatable")]
    tools: Vec<String>,

    #[arg(long, help = "Fill color for the last added object")]
    color: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: CampaignArgs,

    #[arg(long, env = "STUDIO_EXPORT_MULTIPLIER")]
    multiplier: Option<f32>,

    #[arg(long, env = "STUDIO_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: CampaignArgs,

    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Templates { platform } => {
            run_templates(Platform::parse(&platform));
            Ok(())
        }
        Command::Render(args) => run_render(args),
        Command::Inspect(args) => run_inspect(args),
    };
    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

fn run_templates(platform: Platform) {
    let size = studio::platform::dimensions_for(platform);
    println!("{platform} ({}x{})", size.width, size.height);
    for t in campaign::catalog(platform) {
        println!("  {}\t{}", t.id, t.name);
    }
}

fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let (spec, template) = load(&args.input)?;
    let engine = open_session(&args.input, &spec, &template)?;

    let mut config = ExportConfig::from_env();
    if let Some(m) = args.multiplier {
        config.multiplier = m;
    }
    let exporter = Exporter::new(config);
    let png = exporter.export_default(engine.scene())?;

    fs::create_dir_all(&args.out_dir).map_err(|source| CliError::Io { path: args.out_dir.clone(), source })?;
    let path = args.out_dir.join(export_filename(spec.platform));
    fs::write(&path, &png).map_err(|source| CliError::Io { path: path.clone(), source })?;
    info!(path = %path.display(), bytes = png.len(), template = %template.name, "campaign exported");
    println!("{}", path.display());
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<(), CliError> {
    let (spec, template) = load(&args.input)?;
    let engine = open_session(&args.input, &spec, &template)?;
    let scene = engine.scene();

    if args.json {
        let rendered = serde_json::to_string_pretty(&scene_json(scene))?;
        println!("{rendered}");
        return Ok(());
    }

    let size = scene.canvas_size();
    println!("{} {}x{} template={}", spec.platform, size.width, size.height, template.name);
    for (index, obj) in scene.objects().iter().enumerate() {
        println!("{index:>2} {:<10} ({}, {}) {}", obj.kind.name(), obj.position.x, obj.position.y, obj.id);
    }
    Ok(())
}

/// Read the campaign, apply the image override, and resolve the template.
fn load(args: &CampaignArgs) -> Result<(CampaignSpec, TemplateRef), CliError> {
    let json = fs::read_to_string(&args.campaign)
        .map_err(|source| CliError::Io { path: args.campaign.clone(), source })?;
    let mut spec = CampaignSpec::from_json(&json)?;
    if let Some(image) = &args.image {
        spec.source_image = Some(read_file(image)?);
    }
    let template = campaign::find_template(spec.platform, &args.template)
        .ok_or_else(|| CliError::UnknownTemplate { platform: spec.platform, id: args.template.clone() })?;
    Ok((spec, template))
}

/// Open the starting scene, then replay `--tool` and `--color` edits.
fn open_session(args: &CampaignArgs, spec: &CampaignSpec, template: &TemplateRef) -> Result<EngineCore, CliError> {
    let mut engine = EngineCore::open(spec, template);
    for name in &args.tools {
        let tool = Tool::from_name(&name.to_ascii_lowercase())
            .filter(|t| t.creates_object())
            .ok_or_else(|| CliError::UnsupportedTool(name.clone()))?;
        check(engine.set_tool(tool))?;
    }
    if let Some(color) = &args.color {
        check(engine.set_color(color))?;
    }
    Ok(engine)
}

fn check(actions: Vec<Action>) -> Result<(), CliError> {
    for action in actions {
        if let Action::Rejected(reason) = action {
            return Err(CliError::Rejected(reason));
        }
    }
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })
}

fn scene_json(scene: &Scene) -> Value {
    let size = scene.canvas_size();
    let objects: Vec<Value> = scene.objects().iter().map(object_json).collect();
    json!({
        "width": size.width,
        "height": size.height,
        "objects": objects,
    })
}

fn object_json(obj: &DrawableObject) -> Value {
    json!({
        "id": obj.id.to_string(),
        "kind": obj.kind.name(),
        "x": obj.position.x,
        "y": obj.position.y,
        "scaleX": obj.scale.sx,
        "scaleY": obj.scale.sy,
        "fill": obj.fill().map(|c| c.to_string()),
    })
}
