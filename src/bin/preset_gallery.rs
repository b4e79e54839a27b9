use perspective_grid::raster::io::save_png;
use perspective_grid::raster::rasterize;
use perspective_grid::{compute_render_plan, Canvas, Distortion, GridConfig, Preset};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let out_dir = PathBuf::from(args.next().ok_or_else(usage)?);
    let canvas = match (args.next(), args.next()) {
        (Some(w), Some(h)) => Canvas::new(parse_dim(&w)?, parse_dim(&h)?),
        (None, None) => Canvas::default(),
        _ => return Err(usage()),
    };

    for preset in Preset::ALL {
        let distortion = match preset {
            Preset::CartoonFishEye => Distortion::Fisheye { strength: 0.6 },
            _ => Distortion::None,
        };
        let config = GridConfig {
            canvas,
            preset: Some(preset),
            distortion,
            subdivisions: if distortion.is_identity() { 1 } else { 24 },
            show_vp_markers: true,
            ..Default::default()
        };
        let plan = compute_render_plan(&config);
        let path = out_dir.join(format!("{}.png", preset.slug()));
        save_png(&rasterize(&plan), &path)?;
        println!(
            "{:<18} {:>5} segments -> {}",
            preset.name(),
            plan.segments.len(),
            path.display()
        );
    }
    Ok(())
}

fn parse_dim(s: &str) -> Result<u32, String> {
    match s.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("Invalid canvas dimension {s:?}")),
    }
}

fn usage() -> String {
    "Usage: preset_gallery <out_dir> [width height]".to_string()
}
