// SPDX-License-Identifier: MPL-2.0
use folio_gallery::app::{self, paths, Flags};
use pico_args::Arguments;

const HELP: &str = "\
Usage: folio_gallery [OPTIONS] [PORTFOLIO.toml]

Options:
  --lang LANG          Interface language (e.g. en-US, fr)
  --config-dir DIR     Directory holding settings.toml
  --media-root DIR     Directory gallery media paths are relative to
  --open GALLERY:POS   Open a gallery at startup (POS -1 is the cover,
                       0.. are thumbnails)
  -h, --help           Print this help
";

fn setup_logging() {
    use tracing_subscriber::prelude::*;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,folio_gallery=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

fn parse_flags(mut args: Arguments) -> Result<Flags, pico_args::Error> {
    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let media_root = args.opt_value_from_str("--media-root")?;
    let open = args.opt_value_from_str("--open")?;
    let portfolio_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Flags {
        lang,
        config_dir,
        media_root,
        portfolio_path,
        open,
    })
}

fn main() -> iced::Result {
    setup_logging();

    let mut args = Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}
