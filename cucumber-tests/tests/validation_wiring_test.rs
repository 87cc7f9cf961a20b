use cucumber::World;
use cucumber_tests::features::WiringWorld;

#[tokio::main]
async fn main() {
    WiringWorld::cucumber()
        .run_and_exit("src/features/core/validation_wiring.feature")
        .await;
}
