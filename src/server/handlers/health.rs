pub const HEALTH_MESSAGE: &str = "ORS relay is running";

pub async fn root() -> &'static str {
    HEALTH_MESSAGE
}
