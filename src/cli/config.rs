use crate::cli::ConfigAction;
use crate::{AppConfig, console};

pub fn handle_config(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let config = AppConfig::load()?;
            if let Some(ref verbosity) = config.verbosity {
                console().plain(&format!("verbosity = \"{}\"", verbosity));
            }

            let gateway = &config.gateway;
            console().newline();
            console().section("gateway");
            console().setting("base_url", &format!("\"{}\"", gateway.base_url));
            if let Some(ref origin) = gateway.public_origin {
                console().setting("public_origin", &format!("\"{}\"", origin));
            }
            console().setting("upload_path", &format!("\"{}\"", gateway.upload_path));
            console().setting("field_name", &format!("\"{}\"", gateway.field_name));
            console().setting("max_file_size", &gateway.max_file_size.to_string());
            console().setting("timeout_secs", &gateway.timeout_secs.to_string());
            console().setting(
                "localize_html_images",
                &gateway.localize_html_images.to_string(),
            );
            console().newline();
            console().plain(&format!("upload endpoint: {}", gateway.upload_url()));
        }
        ConfigAction::Set { key, value } => {
            let mut config = AppConfig::load()?;
            match config.update_setting(&key, value) {
                Ok(()) => {
                    config.save()?;
                    console().success("Configuration updated successfully");
                }
                Err(e) => {
                    console().error(&e.to_string());
                    console().plain(
                        "Valid keys: verbosity, base_url, public_origin, upload_path, field_name, max_file_size, timeout_secs, localize_html_images",
                    );
                }
            }
        }
    }

    Ok(())
}
