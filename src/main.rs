//! softraster command line
//!
//! Usage: `softraster [CONFIG.ron] [--dump-config]`
//!
//! Without a config file the stock scene is rendered: `bunny.obj` in the
//! working directory to `bunny.bmp`.

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use softraster::config::RenderConfig;
use softraster::mesh::load_obj;
use softraster::output::save_image;
use softraster::pipeline::render_scene;
use softraster::VERSION;

fn print_usage() {
    println!("softraster {}", VERSION);
    println!();
    println!("Usage: softraster [CONFIG.ron] [--dump-config]");
    println!();
    println!("  CONFIG.ron      render settings (mesh, output, projection, background, tint)");
    println!("  --dump-config   print the effective config as RON and exit");
    println!("  -h, --help      show this message");
    println!("  -V, --version   show the version");
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    match ProgressStyle::with_template("{spinner} rasterizing [{bar:40}] {pos}/{len} faces ({elapsed})") {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(e) => log::warn!("Progress bar template rejected: {}", e),
    }
    bar
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config_path: Option<PathBuf> = None;
    let mut dump_config = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dump-config" => dump_config = true,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "-V" | "--version" => {
                println!("softraster {}", VERSION);
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option '{}' (see --help)", flag).into());
            }
            _ => {
                if config_path.replace(PathBuf::from(&arg)).is_some() {
                    return Err("only one config file may be given".into());
                }
            }
        }
    }

    let config = match &config_path {
        Some(path) => RenderConfig::load(path)
            .map_err(|e| format!("{}: {}", path.display(), e))?,
        None => RenderConfig::default(),
    };

    if dump_config {
        print!("{}", config.to_ron()?);
        return Ok(());
    }

    println!("=== softraster v{} ===", VERSION);
    let now = Instant::now();

    let mesh = load_obj(&config.mesh, &config.tint)?;
    println!(
        "Loaded {} ({} vertices, {} faces)",
        config.mesh.display(),
        mesh.vertices.len(),
        mesh.faces.len()
    );

    let fb = render_scene(&mesh, &config, &progress_bar());
    save_image(&fb, &config.output)?;

    println!(
        "Wrote {} ({}x{}) in {:.1} ms",
        config.output.display(),
        fb.size(),
        fb.size(),
        now.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}
