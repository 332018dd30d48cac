// --- WASM ---
// The content script is driven through `hourvest::wasm::HourvestHandle`;
// the binary target still needs a main() when built for wasm32.
#[cfg(target_arch = "wasm32")]
fn main() {}

// --- NATIVE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use hourvest::Cli;

    let args = Cli::parse();

    let level = if args.settings.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    #[cfg(debug_assertions)]
    log::debug!("Parsed arguments: {:?}", args);

    let output = hourvest::cli::run(&args)?;
    println!("{output}");
    Ok(())
}
