use std::env;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let raw_args: Vec<String> = env::args().collect();
    match raw_args.get(1).map(|s| s.as_str()) {
        Some("serve") => {
            let port = raw_args
                .get(2)
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(8080);
            if let Err(e) = rentvsbuy::api::run_http_server(port).await {
                log::error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Some("project") => {
            let code = rentvsbuy::api::run_projection_cli(&raw_args[1..]);
            std::process::exit(code);
        }
        _ => {
            eprintln!("Usage: rentvsbuy serve [port]");
            eprintln!("       rentvsbuy project [--help | flags...]");
            std::process::exit(1);
        }
    }
}
