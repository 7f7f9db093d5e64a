use crate::io::config::Config;
use crate::io::image::save_rgb_to_image;
use crate::pipeline::passes::post_process_to_rgb;
use crate::pipeline::renderer::Renderer;
use crate::pipeline::settings::RenderSettings;
use crate::scene::context::RenderContext;
use crate::scene::loader::init_scene_resources;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Spins every object about its own Y axis by `speed * dt` radians.
pub fn update_scene(context: &mut RenderContext, settings: &RenderSettings, speed: f32, dt: f32) {
    if !settings.rotation_enabled {
        return;
    }
    for obj in &mut context.scene_objects {
        obj.rotate_y(speed * dt);
    }
}

/// `out.png` -> `out_003.png` when several frames are written.
pub fn frame_output_path(output: &str, frame: usize, frame_count: usize) -> PathBuf {
    let path = Path::new(output);
    if frame_count <= 1 {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    let file_name = match path.extension() {
        Some(ext) => format!("{}_{:03}.{}", stem, frame, ext.to_string_lossy()),
        None => format!("{}_{:03}", stem, frame),
    };
    path.with_file_name(file_name)
}

/// Runs the renderer without a window: renders `config.render.frames` frames
/// and writes each one to disk.
pub fn run_headless(config: &Config, settings: &RenderSettings) -> Result<(), String> {
    let (width, height) = (config.render.width, config.render.height);
    if width == 0 || height == 0 {
        return Err(format!("Invalid output size {}x{}", width, height));
    }

    info!("Starting headless render ({}x{})...", width, height);

    let mut context = init_scene_resources(config);
    let mut renderer = Renderer::new(width, height);
    let frame_count = config.render.frames.max(1);
    let total_start = Instant::now();

    for frame in 0..frame_count {
        if frame > 0 {
            update_scene(
                &mut context,
                settings,
                config.render.rotation_speed,
                config.render.frame_time,
            );
        }

        let start = Instant::now();
        renderer.render_frame(&mut context, settings);
        debug!("Frame {} rendered in {:.2?}", frame, start.elapsed());

        let rgb = post_process_to_rgb(&renderer.framebuffer);
        save_rgb_to_image(
            rgb,
            width,
            height,
            frame_output_path(&config.render.output, frame, frame_count),
        )?;
    }

    info!(
        "Rendered {} frame(s) in {:.2?}",
        frame_count,
        total_start.elapsed()
    );
    Ok(())
}
