use perspective_grid::compute_render_plan;
use perspective_grid::config::render::{GridSettings, HorizonSettings};
use perspective_grid::raster::io::save_png;
use perspective_grid::raster::rasterize;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    // Demo: classic one-point grid, 24 converging lines and 10 guides.
    let settings = GridSettings {
        horizon: Some(HorizonSettings::default()),
        ..Default::default()
    };
    let config = settings.to_grid_config()?;
    let plan = compute_render_plan(&config);
    let image = rasterize(&plan);
    let path = Path::new("one_point_grid.png");
    save_png(&image, path)?;
    println!(
        "segments={} canvas={}x{} -> {}",
        plan.segments.len(),
        plan.canvas.width,
        plan.canvas.height,
        path.display()
    );
    Ok(())
}
