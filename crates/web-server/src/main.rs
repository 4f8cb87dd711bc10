// Entry point for `cargo run -p web-server`: serve with ./config.toml and the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = configuration::load_config(None)?;
    let _guard = configuration::init_tracing(&config.logging);
    web_server::run_server(&config).await
}
