use axum::Json;

use crate::stats::{MetricInfo, MetricKey};

/// Registry listing for column headers and legends; content only, nothing
/// here is computed.
pub async fn list_metrics() -> Json<Vec<MetricInfo>> {
    Json(MetricKey::ALL.iter().map(|key| key.info()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_every_registered_metric() {
        let Json(infos) = list_metrics().await;
        assert_eq!(infos.len(), MetricKey::ALL.len());
        assert!(infos.iter().any(|i| i.name == "roi"));
        assert!(infos.iter().any(|i| i.name == "net_profit"));
    }
}
