use clap::Parser;
use quillpost::cli::{
    Args, build_config, build_lifetime_policy, handle_create_admin, init_logging,
    load_jwt_secret, open_database,
};
use quillpost::{init_cleanup, run_server};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(&args.log_format);

    let Some(jwt_secret) = load_jwt_secret(args.jwt_secret_file.as_deref()) else {
        std::process::exit(1);
    };

    let Some(token_lifetimes) = build_lifetime_policy(
        args.access_token_hours,
        args.refresh_token_days,
        args.max_token_days,
    ) else {
        std::process::exit(1);
    };

    let Some(db) = open_database(&args.database).await else {
        std::process::exit(1);
    };

    if let Some(email) = args.create_admin.as_deref() {
        handle_create_admin(&db, email).await;
    }

    init_cleanup(&db).await;

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            error!(address = %addr, error = %e, "Failed to bind");
            std::process::exit(1);
        });

    let local_addr = listener.local_addr().unwrap_or_else(|e| {
        error!(error = %e, "Failed to get local address");
        std::process::exit(1);
    });

    info!(
        address = %local_addr,
        issuer = %args.jwt_issuer,
        access_secs = token_lifetimes.access.as_secs(),
        refresh_secs = token_lifetimes.refresh.as_secs(),
        "Listening"
    );

    let config = build_config(db, jwt_secret, args.jwt_issuer, token_lifetimes);
    if let Err(e) = run_server(config, listener).await {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }
}
