/// Liveness probe; answers `ok` while the process serves requests
pub(crate) async fn health_handler() -> &'static str {
    "ok"
}
