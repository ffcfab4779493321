#[tokio::main]
async fn main() {
    if let Err(e) = healthmind_lib::run().await {
        eprintln!("healthmind: {e}");
        std::process::exit(1);
    }
}
