#[tokio::main]
async fn main() {
    planner_client::run().await;
}
