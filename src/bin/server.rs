// src/bin/server.rs
use swimrank::config::options::ServerOptions;
use swimrank::server;

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let opts = match ServerOptions::from_args(std::env::args().skip(1)) {
        Ok(Some(opts)) => opts,
        Ok(None) => return, // help printed
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    if let Err(e) = server::serve(opts).await {
        tracing::error!(error = %e, "server exited");
        std::process::exit(1);
    }
}
