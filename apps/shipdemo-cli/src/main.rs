use anyhow::Context;
use clap::{Parser, Subcommand};
use shipdemo_assets::{AttributeMask, VertexLayout, ship_model};
use shipdemo_common::DemoConfig;
use shipdemo_ground::{GroundField, WireGrid};
use shipdemo_input::{AxisMap, RawAxes, ScriptedInput};
use shipdemo_kernel::Demo;
use shipdemo_render::{DebugTextRenderer, FrameComposer, Renderer};
use shipdemo_tools::DemoInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Frame rate of the headless clock.
const SIM_HZ: u64 = 60;

#[derive(Parser)]
#[command(name = "shipdemo-cli", about = "Headless tools for the spaceship demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config overriding the built-in tuning
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, effective config and ship model info
    Info,
    /// Fly the ship headless at a fixed 60 Hz clock
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        /// Raw left stick X held for every frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        stick_x: i32,
        /// Raw left trigger held for every frame
        #[arg(long, default_value = "0")]
        trigger_left: i32,
        /// Raw right trigger held for every frame
        #[arg(long, default_value = "0")]
        trigger_right: i32,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
        /// Dump the final frame's draw commands
        #[arg(long)]
        trace: bool,
    },
    /// Sample the ground height field
    Ground {
        /// Animation time in seconds
        #[arg(short, long, default_value = "0")]
        time: f32,
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        x: f32,
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        z: f32,
    },
    /// Resolve the vertex layout for an attribute bitmask
    Layout {
        /// Bitmask, decimal or with a 0x / 0b prefix
        #[arg(short, long, value_parser = parse_mask)]
        mask: u32,
    },
}

fn parse_mask(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u32::from_str_radix(bin, 2)
    } else {
        s.parse()
    };
    parsed.map_err(|e| format!("invalid mask {s:?}: {e}"))
}

/// Timestamp of frame `i` on the fixed headless clock.
fn sim_time_ms(i: u64) -> u64 {
    i * 1000 / SIM_HZ
}

fn held_axes(stick_x: i32, trigger_left: i32, trigger_right: i32) -> RawAxes {
    let map = AxisMap::default();
    let mut raw = RawAxes::default();
    raw.set(map.left_x, stick_x);
    raw.set(map.left_trigger, trigger_left);
    raw.set(map.right_trigger, trigger_right);
    raw
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = DemoConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;

    match cli.command {
        Commands::Info => {
            println!("shipdemo-cli v{}", env!("CARGO_PKG_VERSION"));
            let model = ship_model()?;
            println!(
                "model: {} meshes={} triangles={}",
                model.name,
                model.meshes().len(),
                model.triangle_count()
            );
            for layout in model.layouts() {
                println!(
                    "  layout {} stride={} mask={}",
                    layout.name(),
                    layout.stride(),
                    layout.mask()
                );
            }
            let grid = WireGrid::new(GroundField::from(&config.ground));
            println!(
                "ground: cells={}x{} extent=±{:.0} vertices={}",
                grid.cells_per_side(),
                grid.cells_per_side(),
                grid.field().half_extent(),
                grid.vertex_count()
            );
            print!("{}", config.to_yaml()?);
        }
        Commands::Simulate {
            frames,
            stick_x,
            trigger_left,
            trigger_right,
            json,
            trace,
        } => {
            let mut demo = Demo::new(&config);
            let raw = held_axes(stick_x, trigger_left, trigger_right);
            let mut input = ScriptedInput::constant(raw, frames as usize);
            for i in 1..=frames {
                demo.update_from(&mut input, sim_time_ms(i));
            }
            tracing::info!(frames, "simulation finished");

            let summary = DemoInspector::summary(&demo);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }

            if trace {
                let model = ship_model()?;
                let mut composer = FrameComposer::new(&config);
                let scene = composer.compose(&demo);
                print!("{}", DebugTextRenderer::new().render(&scene, &model));
            }
        }
        Commands::Ground { time, x, z } => {
            let field = GroundField::from(&config.ground);
            println!(
                "height(t={time:.3}, x={x:.2}, z={z:.2}) = {:.4}",
                field.height(time, x, z)
            );
        }
        Commands::Layout { mask } => {
            let mask = AttributeMask(mask);
            let layout = VertexLayout::for_mask(mask)?;
            println!(
                "{mask} -> {} stride={} floats={}",
                layout.name(),
                layout.stride(),
                layout.floats_per_vertex()
            );
            for attr in layout.attributes() {
                println!(
                    "  {:<10} components={} offset={}",
                    attr.attribute.name(),
                    attr.components,
                    attr.offset
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_accepts_long_coordinates() {
        let cli = Cli::try_parse_from(["shipdemo-cli", "ground", "--x", "16", "--z", "-32"])
            .unwrap();
        match cli.command {
            Commands::Ground { time, x, z } => {
                assert_eq!(time, 0.0);
                assert_eq!(x, 16.0);
                assert_eq!(z, -32.0);
            }
            _ => panic!("expected ground command"),
        }
    }

    #[test]
    fn masks_parse_in_three_bases() {
        assert_eq!(parse_mask("17"), Ok(17));
        assert_eq!(parse_mask("0x13"), Ok(0x13));
        assert_eq!(parse_mask("0b10011"), Ok(0b10011));
        assert!(parse_mask("pnt").is_err());
    }

    #[test]
    fn fixed_clock_counts_sixty_frames_per_second() {
        assert_eq!(sim_time_ms(0), 0);
        assert_eq!(sim_time_ms(60), 1000);
        assert_eq!(sim_time_ms(1), 16);
    }

    #[test]
    fn held_axes_use_default_slots() {
        let raw = held_axes(-32767, 0, 32767);
        let map = AxisMap::default();
        assert_eq!(raw.get(map.left_x), -32767);
        assert_eq!(raw.get(map.right_trigger), 32767);
        assert_eq!(raw.get(map.left_y), 0);
    }
}
