use std::path::Path;

use formation_grid::{BUILTIN_SCENE, parse_scene, write_svg};

const OUTPUT: &str = "grid.svg";

fn main() -> miette::Result<()> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let scene = parse_scene("builtin.scene", BUILTIN_SCENE)?;
    write_svg(&scene.document(), Path::new(OUTPUT))?;

    println!("{OUTPUT} has been generated!");
    Ok(())
}
