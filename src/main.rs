//! Camera streaming server binary
//!
//! Run with: camcast [BIND_ADDR]
//!
//! Examples:
//!   camcast                    # binds to 0.0.0.0:5000
//!   camcast localhost          # binds to 127.0.0.1:5000
//!   camcast 127.0.0.1:8000     # binds to 127.0.0.1:8000
//!
//! The viewer page is served at `/`, the raw MJPEG stream at `/video`.
//! By default cameras are synthetic test patterns; build with the
//! `capture-v4l2` feature to drive real devices.

use std::net::SocketAddr;

use camcast::{CameraServer, ServerConfig};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:5000
/// - "localhost:8000" -> 127.0.0.1:8000
/// - "0.0.0.0" -> 0.0.0.0:5000
/// - "192.168.1.5:8000" -> 192.168.1.5:8000
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 5000;

    let normalized = arg.replace("localhost", "127.0.0.1");

    // Full address with port, else a bare IP on the default port
    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: camcast [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:5000)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  camcast                    # binds to 0.0.0.0:5000");
    eprintln!("  camcast localhost          # binds to 127.0.0.1:5000");
    eprintln!("  camcast 127.0.0.1:8000     # binds to 127.0.0.1:8000");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:5000".parse()?,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("camcast=debug".parse()?),
        )
        .init();

    let config = ServerConfig {
        bind_addr,
        ..ServerConfig::default()
    };

    let server = CameraServer::new(config);
    server.open_initial_device().await;

    println!("Viewer page: http://{}/", bind_addr);
    println!("MJPEG feed:  http://{}/video", bind_addr);

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
        println!("\nShutting down...");
    };

    server.run_until(shutdown).await?;

    Ok(())
}
