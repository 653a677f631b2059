fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let value = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com".to_string());

    let mut config = qrpath::RenderConfig::new(value).size(200.0).padding(16.0);
    if let Some(logo) = std::env::args().nth(2) {
        config = config.logo(logo).logo_border_radius(6.0);
    }

    tracing::debug!(?config, "rendering");

    if let Err(e) = config.validate() {
        eprintln!("Error: {:?}", miette::Report::new(e));
        std::process::exit(1);
    }

    match qrpath::render_svg(&config) {
        Ok(svg) => {
            tracing::info!(bytes = svg.len(), "rendered");
            println!("{}", svg);
        }
        Err(e) => {
            tracing::error!(error = %e, "render failed");
            eprintln!("Error: {:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
}
