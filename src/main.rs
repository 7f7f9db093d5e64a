use clap::Parser;
use cpu_rasterizer::app::run_headless;
use cpu_rasterizer::io::config::Config;
use cpu_rasterizer::pipeline::settings::ShadingMode;
use log::info;

/// Headless CPU rasterizer driven by a TOML scene file.
#[derive(Parser, Debug)]
#[command(name = "cpu-rasterizer")]
#[command(about = "Renders a TOML-described scene on the CPU and saves it as an image")]
struct Cli {
    /// Scene configuration file (TOML). Built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Output image path; overrides `[render] output`.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Number of frames to render.
    #[arg(short, long)]
    frames: Option<usize>,

    /// observed-area, diffuse, specular or combined.
    #[arg(long, value_name = "MODE")]
    shading_mode: Option<String>,

    /// Ignore bound normal maps.
    #[arg(long)]
    no_normal_map: bool,

    /// Output remapped depth instead of shading.
    #[arg(long)]
    depth: bool,

    /// Fill triangle bounding boxes instead of triangles.
    #[arg(long)]
    bounding_box: bool,

    /// Use the darker uniform clear color.
    #[arg(long)]
    uniform_clear_color: bool,

    /// Keep objects still between frames.
    #[arg(long)]
    no_rotation: bool,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            Config::load(path)?
        }
        None => {
            info!("Using default scene");
            Config::default()
        }
    };

    if let Some(output) = cli.output {
        config.render.output = output;
    }
    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }

    let mut settings = config.render.settings();
    if let Some(mode) = &cli.shading_mode {
        settings.shading_mode = ShadingMode::parse_or_default(mode);
    }
    if cli.no_normal_map && settings.use_normal_map {
        settings.toggle_normal_map();
    }
    if cli.depth && !settings.show_depth {
        settings.toggle_depth_view();
    }
    if cli.bounding_box && !settings.show_bounding_box {
        settings.toggle_bounding_box_view();
    }
    if cli.uniform_clear_color && !settings.uniform_clear_color {
        settings.toggle_uniform_clear_color();
    }
    if cli.no_rotation && settings.rotation_enabled {
        settings.toggle_rotation();
    }

    info!("Shading mode: {}", settings.shading_mode);
    run_headless(&config, &settings)
}
