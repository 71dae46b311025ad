use anyhow::Context;
use clap::Parser;
use public_api_config::config::loader;
use public_api_config::utils::{logger, scrubbing, validation::Validate};
use public_api_config::{CliArgs, Configuration};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    logger::init_logger(args.verbose, args.json_logs);

    tracing::info!("Loading configuration from: {}", args.config);

    let config = match loader::read(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    match scrubbing::scrub_serializable(&config, true) {
        Ok(scrubbed) => tracing::debug!("Effective configuration: {}", scrubbed),
        Err(e) => tracing::warn!("Could not prepare configuration for logging: {}", e),
    }

    if args.print {
        let rendered = loader::render(&config, args.format)
            .with_context(|| format!("Failed to render configuration as {}", args.format))?;
        println!("{}", rendered);
    }

    Ok(())
}

fn display_config_summary(config: &Configuration) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Gitpod service: {}", config.gitpod_service_url);

    let Some(server) = &config.server else {
        tracing::info!("  Server: not configured");
        return;
    };

    let services = [
        ("gRPC", server.services.grpc.as_ref()),
        ("HTTP", server.services.http.as_ref()),
    ];
    for (name, service) in services {
        match service {
            Some(service) => tracing::info!(
                "  {} listener: {} (TLS: {})",
                name,
                service.address,
                if service.is_tls() { "on" } else { "off" }
            ),
            None => tracing::info!("  {} listener: disabled", name),
        }
    }
}
