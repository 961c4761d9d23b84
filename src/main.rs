#[cfg(not(target_arch = "wasm32"))]
fn main() -> axiscope::Result<()> {
    use axiscope::config::Config;
    use clap::Parser;

    let cli = Config::parse();
    let scene = cli.scene()?;
    axiscope::runtime::run_app(scene, &cli.log_filter);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
