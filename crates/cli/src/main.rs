#![deny(unsafe_code)]
//! CLI binary for the tessel shading engine.
//!
//! Subcommands:
//! - `render <shader>`: shade one frame with a single program, write PNG or PPM
//! - `scene <file>`: render a multi-pass scene description
//! - `list`: print available shader programs (and their schemas with `--json`)
//! - `gamma`: dump a gamma lookup table

mod error;
mod logging;

use clap::{Parser, Subcommand};
use error::CliError;
use std::path::{Path, PathBuf};
use std::process;
use tessel_core::gamma::{GammaTable, GAMMA_TABLE_SIZE};
use tessel_core::ppm::save_ppm;
use tessel_core::{FrameBuffer, Pass, Rgb8, Scene, Shader, TileRenderer};
use tessel_programs::snapshot::{load_sprite, write_png};
use tessel_programs::{Overlay, ShaderProgram, Stencil};

#[derive(Parser)]
#[command(name = "tessel", about = "Parallel procedural shading engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Shade one frame with a single program and write it to disk.
    Render {
        /// Program name (e.g. "star").
        shader: String,

        /// Frame width in pixels.
        #[arg(short = 'W', long, default_value_t = 256)]
        width: usize,

        /// Frame height in pixels.
        #[arg(short = 'H', long, default_value_t = 256)]
        height: usize,

        /// Frame index; elapsed time is frame / fps.
        #[arg(long, default_value_t = 0)]
        frame: u32,

        /// Frames per second.
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Worker threads (defaults to available parallelism).
        #[arg(long)]
        workers: Option<usize>,

        /// Program parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Background color the frame starts from.
        #[arg(long, default_value = "#000000")]
        background: String,

        /// Image composited over the result, top-left aligned.
        #[arg(long)]
        overlay: Option<PathBuf>,

        /// Opacity of the overlay image.
        #[arg(long, default_value_t = 1.0)]
        overlay_alpha: f32,

        /// Mask image whose red channel stencils a flat color over the result.
        #[arg(long)]
        stencil: Option<PathBuf>,

        /// Color painted through the stencil mask.
        #[arg(long, default_value = "#ffffff")]
        stencil_color: String,

        /// Opacity of the stencil color at full mask coverage.
        #[arg(long, default_value_t = 1.0)]
        stencil_alpha: f32,

        /// Output file path; a .ppm extension writes PPM, anything else PNG.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Render a multi-pass scene described by a JSON file.
    Scene {
        /// Scene file path.
        file: PathBuf,

        /// Output file path; a .ppm extension writes PPM, anything else PNG.
        #[arg(short, long, default_value = "scene.png")]
        output: PathBuf,
    },
    /// List available shader programs.
    List,
    /// Print a gamma lookup table.
    Gamma {
        /// Number of samples.
        #[arg(long, default_value_t = GAMMA_TABLE_SIZE)]
        size: usize,

        /// Dump the decoding (sRGB to linear) curve instead of the encoding one.
        #[arg(long)]
        inverse: bool,
    },
}

/// Builds every pass's program up front, then shades them in order over one
/// frame. `layers` are composited last, in order.
fn render_scene(scene: &Scene, layers: &[&dyn Shader]) -> Result<FrameBuffer, CliError> {
    let ctx = scene.context()?;
    let programs = scene
        .passes
        .iter()
        .map(|pass| ShaderProgram::from_name(&pass.shader, &pass.params))
        .collect::<Result<Vec<_>, _>>()?;
    let renderer = match scene.workers {
        Some(n) => TileRenderer::new(n)?,
        None => TileRenderer::from_hardware()?,
    };

    let mut frame = scene.blank_frame()?;
    for program in &programs {
        renderer.render(&mut frame, &ctx, program)?;
        log::debug!("pass '{}' done", program.name());
    }
    for layer in layers {
        renderer.render(&mut frame, &ctx, *layer)?;
    }
    Ok(frame)
}

fn write_frame(frame: &FrameBuffer, path: &Path) -> Result<(), CliError> {
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        save_ppm(frame, path).map_err(CliError::on_write(path))?;
    } else {
        write_png(frame, path).map_err(CliError::on_write(path))?;
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

fn read_scene(path: &Path) -> Result<Scene, CliError> {
    let text = std::fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let scene: Scene = serde_json::from_str(&text).map_err(|e| CliError::Scene {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    scene.validate()?;
    Ok(scene)
}

fn report(json: bool, info: serde_json::Value, summary: String) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!("{summary}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let programs = ShaderProgram::list_programs();
            if cli.json {
                let schemas = programs
                    .iter()
                    .map(|name| {
                        ShaderProgram::param_schema(name).map(|schema| (name.to_string(), schema))
                    })
                    .collect::<Result<serde_json::Map<_, _>, _>>()?;
                let info = serde_json::json!({
                    "programs": programs,
                    "schemas": schemas,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Programs:");
                for name in programs {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            shader,
            width,
            height,
            frame,
            fps,
            workers,
            params,
            background,
            overlay,
            overlay_alpha,
            stencil,
            stencil_color,
            stencil_alpha,
            output,
        } => {
            let params: serde_json::Value =
                serde_json::from_str(&params).map_err(|e| CliError::flag("params", e))?;
            let background =
                Rgb8::from_hex(&background).map_err(|e| CliError::flag("background", e))?;
            let stencil_color =
                Rgb8::from_hex(&stencil_color).map_err(|e| CliError::flag("stencil-color", e))?;

            let scene = Scene {
                width,
                height,
                frame,
                fps,
                background,
                workers,
                passes: vec![Pass {
                    shader: shader.clone(),
                    params,
                }],
            };
            scene.validate()?;

            let overlay = overlay
                .as_deref()
                .map(|path| -> Result<Overlay, CliError> {
                    let sprite = load_sprite(path).map_err(CliError::on_read(path))?;
                    Ok(Overlay::new(sprite, (0, 0), overlay_alpha)?)
                })
                .transpose()?;
            let stencil = stencil
                .as_deref()
                .map(|path| -> Result<Stencil, CliError> {
                    let mask = load_sprite(path).map_err(CliError::on_read(path))?;
                    Ok(Stencil::new(mask, (0, 0), stencil_color, stencil_alpha)?)
                })
                .transpose()?;

            let mut layers: Vec<&dyn Shader> = Vec::new();
            if let Some(overlay) = &overlay {
                layers.push(overlay);
            }
            if let Some(stencil) = &stencil {
                layers.push(stencil);
            }
            let image = render_scene(&scene, &layers)?;
            write_frame(&image, &output)?;

            report(
                cli.json,
                serde_json::json!({
                    "shader": shader,
                    "width": width,
                    "height": height,
                    "frame": frame,
                    "fps": fps,
                    "output": output.display().to_string(),
                }),
                format!(
                    "rendered {shader} ({width}x{height}, frame {frame} @ {fps} fps) -> {}",
                    output.display()
                ),
            )?;
        }
        Command::Scene { file, output } => {
            let scene = read_scene(&file)?;
            let image = render_scene(&scene, &[])?;
            write_frame(&image, &output)?;

            report(
                cli.json,
                serde_json::json!({
                    "scene": file.display().to_string(),
                    "width": scene.width,
                    "height": scene.height,
                    "passes": scene.passes.len(),
                    "output": output.display().to_string(),
                }),
                format!(
                    "rendered {} ({} passes) -> {}",
                    file.display(),
                    scene.passes.len(),
                    output.display()
                ),
            )?;
        }
        Command::Gamma { size, inverse } => {
            let table = if inverse {
                GammaTable::inverse(size)?
            } else {
                GammaTable::forward(size)?
            };
            if cli.json {
                let info = serde_json::json!({
                    "curve": if inverse { "inverse" } else { "forward" },
                    "size": table.size(),
                    "samples": table.samples(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for (i, v) in table.samples().iter().enumerate() {
                    println!("{i}\t{v:.6}");
                }
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(logging::LoggingConfig::from_env(cli.verbose));
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({
                "error": e.to_string(),
                "exit_code": e.exit_code(),
                "path": e.path().map(|p| p.display().to_string()),
            });
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
