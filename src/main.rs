use anyhow::Result;
use blogpaste::{
    cli::{
        Cli, Commands,
        config::handle_config,
        paste::{PasteSource, handle_convert, handle_localize, handle_paste, handle_upload},
    },
    config::AppConfig,
    console::{console, init_console},
};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config to get configured verbosity level
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: {:#}; using defaults", e);
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        config
    });

    // CLI takes precedence over config
    let effective_verbosity = cli.get_effective_verbosity(config.get_verbosity());
    init_console(effective_verbosity);

    if let Some(url) = cli.api_url.clone() {
        config.gateway.base_url = url;
    }
    console().debug(&format!("Upload endpoint: {}", config.gateway.upload_url()));

    let succeeded = match cli.command {
        Commands::Convert { file } => {
            handle_convert(file.as_deref())?;
            true
        }
        Commands::Paste {
            doc,
            caret,
            html,
            text,
            image,
            from_clipboard,
        } => {
            let source = PasteSource {
                html,
                text,
                image,
                from_clipboard,
            };
            handle_paste(&config.gateway, &doc, caret.as_deref(), source).await?
        }
        Commands::Upload { file, doc, caret } => {
            let target = doc.as_deref().map(|path| (path, caret.as_deref()));
            handle_upload(&config.gateway, &file, target).await?
        }
        Commands::Localize { url } => handle_localize(&config.gateway, &url).await?,
        Commands::Config { action } => {
            handle_config(action)?;
            true
        }
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
