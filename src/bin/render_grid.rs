use perspective_grid::compute_render_plan;
use perspective_grid::config::render;
use perspective_grid::diagnostics::RenderReport;
use perspective_grid::raster::io::{save_png, write_json_file};
use perspective_grid::raster::rasterize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = render::load_config(Path::new(&config_path))?;
    let grid = config.grid.to_grid_config()?;

    let t0 = Instant::now();
    let plan = compute_render_plan(&grid);
    let plan_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let export_canvas = config.grid.export_canvas();
    let plan = if export_canvas != plan.canvas {
        plan.rescaled(export_canvas)
    } else {
        plan
    };

    let t1 = Instant::now();
    let image = rasterize(&plan);
    let raster_ms = t1.elapsed().as_secs_f64() * 1000.0;

    save_png(&image, &config.output.image)?;
    println!(
        "Saved {}x{} grid with {} segments to {}",
        export_canvas.width,
        export_canvas.height,
        plan.segments.len(),
        config.output.image.display()
    );

    if let Some(path) = &config.output.plan_json {
        write_json_file(path, &plan)?;
        println!("Render plan written to {}", path.display());
    }

    if let Some(path) = &config.output.report_json {
        let mut report = RenderReport::new(
            &plan,
            export_canvas,
            grid.preset.map(|p| p.name().to_string()),
        );
        report.canvas = grid.canvas;
        report.timings.push("plan", plan_ms);
        report.timings.push("rasterize", raster_ms);
        write_json_file(path, &report)?;
        println!("Render report written to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: render_grid <config.json>".to_string()
}
