use std::time::Duration;
use tokio::time::sleep;

/// Fixed pause after every provider call
///
/// Calls are strictly sequential, so a delay after each one bounds the request
/// rate without any shared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    delay: Duration,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::from_millis(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pause_waits_at_least_delay() {
        let throttle = Throttle::from_millis(30);
        let start = std::time::Instant::now();
        throttle.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_zero_delay_returns_immediately() {
        let throttle = Throttle::from_millis(0);
        let start = std::time::Instant::now();
        throttle.pause().await;
        assert!(start.elapsed() < Duration::from_millis(10));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(Throttle::default().delay(), Duration::from_millis(10));
    }
}
