#![allow(dead_code)]

use std::time::Duration;

use tokio::time::sleep;

/// Wait for a specified duration
pub async fn wait(duration: Duration) {
    sleep(duration).await;
}

/// Generate a random IP address for testing
pub fn random_ip() -> String {
    format!(
        "{}.{}.{}.{}",
        rand::random::<u8>(),
        rand::random::<u8>(),
        rand::random::<u8>(),
        rand::random::<u8>()
    )
}
