#![allow(dead_code)]

pub mod mock_api;
pub mod mock_dispatcher;

use std::time::Duration;

/// Poll `condition` every few milliseconds until it holds or the step
/// timeout elapses. Returns the final outcome.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(3);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
