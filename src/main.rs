#[tokio::main]
async fn main() {
    env_logger::init();
    let code = command::exec().await;
    std::process::exit(code);
}
