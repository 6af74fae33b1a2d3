//! MD2 Exporter CLI
//!
//! Convert JSON scene descriptions to Quake II MD2 models.

use clap::{Parser, Subcommand};
use md2_exporter::{load_scene, ExportConfig, Md2Writer, SceneSummary};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "md2-exporter")]
#[command(author, version, about = "Export meshes to the Quake II MD2 format", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene to an .md2 file
    Export {
        /// Input JSON scene file
        input: PathBuf,

        /// Output file path (defaults to the input name with .md2)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with export options; flags below override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scene units to MD2 units multiplier (default 10)
        #[arg(short, long)]
        scale: Option<f32>,

        /// Export every frame of the scene's frame range
        #[arg(short, long)]
        animation: bool,

        /// Quantize each frame against its own bounding box
        #[arg(long)]
        per_frame_bbox: bool,

        /// Keep directories in skin paths when they fit
        #[arg(long)]
        full_skin_paths: bool,

        /// Do not copy textures next to the output file
        #[arg(long)]
        no_copy_textures: bool,

        /// Keep the first texture's file name when copying
        #[arg(long)]
        keep_texture_names: bool,
    },

    /// Show vertex, triangle and skin counts and check the MD2 limits
    Info {
        /// Input JSON scene file
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Export {
            input,
            output,
            config,
            scale,
            animation,
            per_frame_bbox,
            full_skin_paths,
            no_copy_textures,
            keep_texture_names,
        } => {
            let mut export_config = match &config {
                Some(path) => ExportConfig::from_json_str(&fs::read_to_string(path)?)?,
                None => ExportConfig::default(),
            };
            if let Some(scale) = scale {
                export_config.scale = scale;
            }
            if animation {
                export_config.export_animation = true;
            }
            if per_frame_bbox {
                export_config.shared_bounding_box = false;
            }
            if full_skin_paths {
                export_config.export_only_basename_skins = false;
            }
            if no_copy_textures {
                export_config.copy_textures_beside_output = false;
            }
            if keep_texture_names {
                export_config.rename_first_texture_to_output_basename = false;
            }

            let output = output_path(&input, output);
            export_scene(&input, &output, export_config)?;
        }
        Commands::Info { input, json } => {
            show_scene_info(&input, json)?;
        }
    }

    Ok(())
}

fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    match output {
        Some(path) if path.extension().is_some() => path,
        Some(path) => path.with_extension("md2"),
        None => input.with_extension("md2"),
    }
}

fn export_scene(input: &Path, output: &Path, config: ExportConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Loading scene from {:?}...", input);
    let scene = load_scene(input)?;

    let summary = SceneSummary::from_provider(&scene);
    tracing::info!(
        "  Found {} meshes, {} vertices, {} triangles",
        summary.meshes.len(),
        summary.total_vertices,
        summary.total_triangles
    );
    summary.check_limits()?;

    tracing::info!("Exporting with config:");
    tracing::info!("  - Scale: {}", config.scale);
    tracing::info!("  - Animation: {}", config.export_animation);
    if config.export_animation {
        tracing::info!("  - Shared bounding box: {}", config.shared_bounding_box);
    }
    tracing::info!("  - Basename-only skins: {}", config.export_only_basename_skins);
    tracing::info!("  - Copy textures: {}", config.copy_textures_beside_output);

    let writer = Md2Writer::new(config);
    let report = writer.write_to_path(&scene, output)?;

    let failed = report.textures.iter().filter(|t| !t.succeeded()).count();
    if failed > 0 {
        tracing::warn!("{} of {} textures could not be copied", failed, report.textures.len());
    }
    tracing::info!(
        "Exported {} frames ({} bytes) to {:?}",
        report.header.num_frames,
        report.bytes_written,
        report.path
    );

    Ok(())
}

fn show_scene_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(input)?;
    let summary = SceneSummary::from_provider(&scene);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Scene Info:");
        for mesh in &summary.meshes {
            println!("  {}: {} vertices, {} faces", mesh.name, mesh.vertices, mesh.triangles);
        }
        println!("  Total: {} vertices, {} faces", summary.total_vertices, summary.total_triangles);
        println!("  Skins: {}", summary.skins.len());
        for skin in &summary.skins {
            println!("    {}", skin);
        }
        println!("  Frames: {} - {}", summary.frame_range.0, summary.frame_range.1);
    }

    match summary.check_limits() {
        Ok(()) => println!("Scene fits the MD2 limits."),
        Err(e) => println!("Scene cannot be exported: {}", e),
    }

    Ok(())
}
