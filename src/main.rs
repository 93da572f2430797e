#[tokio::main]
async fn main() {
    roster_backend::run().await;
}
