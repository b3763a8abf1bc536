/// Liveness and readiness probe; the gateway holds no state to check.
pub async fn ok() -> &'static str {
    "OK"
}
