use env_loadr::Registry;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut registry = Registry::new();
    let bind_address = registry.string(
        "BIND_ADDRESS",
        true,
        "",
        "bind address for server, i.e. localhost",
    );
    let bind_port = registry.int("BIND_PORT", true, 0, "bind port for server, i.e. 9090");
    let read_timeout = registry.duration(
        "READ_TIMEOUT",
        false,
        Duration::from_secs(5),
        "maximum time to read a request, i.e. 30s",
    );
    let debug = registry.boolean("DEBUG", false, false, "enable debug endpoints");
    let rate_limit = registry.float(
        "RATE_LIMIT",
        false,
        0.0,
        "requests per second per client, 0 disables limiting",
    );

    registry.load_or_exit();

    println!("Config loaded successfully!");
    println!("  BIND_ADDRESS: {}", bind_address.get_or_default());
    println!("  BIND_PORT: {}", bind_port.get_or_default());
    println!(
        "  READ_TIMEOUT: {}",
        humantime::format_duration(read_timeout.get_or_default())
    );
    println!("  DEBUG: {}", debug.get_or_default());
    println!("  RATE_LIMIT: {}", rate_limit.get_or_default());
}
