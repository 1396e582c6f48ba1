//! DescribeTable integration tests against an in-process TableStack server.

#[cfg(test)]
mod tests {
    use tablestack_dynamodb_http::service::TableHttpConfig;

    use crate::{start_server, start_server_with};

    async fn get_json(url: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let resp = reqwest::get(url).await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_should_describe_hash_only_table() {
        let base = start_server().await.unwrap();
        let url = format!("{base}/v1/p1/data/tables/t1");

        let (status, json) = get_json(&url).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "Table": {
                    "AttributeDefinitions": [
                        {"AttributeName": "id", "AttributeType": "S"},
                        {"AttributeName": "val", "AttributeType": "N"}
                    ],
                    "CreationDateTime": 0,
                    "ItemCount": 0,
                    "KeySchema": [{"AttributeName": "id", "KeyType": "HASH"}],
                    "LocalSecondaryIndexes": [],
                    "TableName": "t1",
                    "TableStatus": "ACTIVE",
                    "TableSizeBytes": 0,
                    "Links": [
                        {"Href": url, "Rel": "self"},
                        {"Href": url, "Rel": "bookmark"}
                    ]
                }
            })
        );
    }

    #[tokio::test]
    async fn test_should_describe_table_with_indexes() {
        let base = start_server().await.unwrap();
        let (status, json) = get_json(&format!("{base}/v1/p1/data/tables/events")).await;
        assert_eq!(status, reqwest::StatusCode::OK);

        let table = &json["Table"];
        assert_eq!(
            table["KeySchema"],
            serde_json::json!([
                {"AttributeName": "id", "KeyType": "HASH"},
                {"AttributeName": "ts", "KeyType": "RANGE"}
            ])
        );
        assert_eq!(
            table["LocalSecondaryIndexes"],
            serde_json::json!([
                {
                    "IndexName": "by_score",
                    "KeySchema": [
                        {"AttributeName": "id", "KeyType": "HASH"},
                        {"AttributeName": "score", "KeyType": "RANGE"}
                    ],
                    "Projection": {"ProjectionType": "INCLUDE", "NonKeyAttributes": ["title"]},
                    "IndexSizeBytes": 0,
                    "ItemCount": 0
                },
                {
                    "IndexName": "by_title",
                    "KeySchema": [
                        {"AttributeName": "id", "KeyType": "HASH"},
                        {"AttributeName": "title", "KeyType": "RANGE"}
                    ],
                    "Projection": {"ProjectionType": "ALL"},
                    "IndexSizeBytes": 0,
                    "ItemCount": 0
                }
            ])
        );
    }

    #[tokio::test]
    async fn test_should_render_identical_bodies_for_repeated_requests() {
        let base = start_server().await.unwrap();
        let url = format!("{base}/v1/p1/data/tables/events");

        let first = reqwest::get(&url).await.unwrap().bytes().await.unwrap();
        let second = reqwest::get(&url).await.unwrap().bytes().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_should_set_response_headers() {
        let base = start_server().await.unwrap();
        let resp = reqwest::get(format!("{base}/v1/p1/data/tables/t1"))
            .await
            .unwrap();

        let headers = resp.headers().clone();
        assert_eq!(headers["content-type"], "application/json");
        assert_eq!(headers["server"], "TableStack");
        assert!(headers.contains_key("x-amzn-requestid"));

        let body = resp.bytes().await.unwrap();
        let crc = crc32fast::hash(&body).to_string();
        assert_eq!(headers["x-amz-crc32"].to_str().unwrap(), crc);
    }

    #[tokio::test]
    async fn test_should_decode_percent_encoded_table_name() {
        let base = start_server().await.unwrap();
        let (status, json) = get_json(&format!("{base}/v1/p1/data/tables/order%2Ev2")).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(json["Table"]["TableName"], "order.v2");
    }

    #[tokio::test]
    async fn test_should_use_public_host_in_links() {
        let base = start_server_with(TableHttpConfig {
            public_scheme: "https".to_owned(),
            public_host: Some("tables.example.com".to_owned()),
            ..TableHttpConfig::default()
        })
        .await
        .unwrap();

        let (_, json) = get_json(&format!("{base}/v1/p2/data/tables/other?verbose=1")).await;
        let links = json["Table"]["Links"].as_array().unwrap();
        assert_eq!(links.len(), 2);
        for link in links {
            assert_eq!(
                link["Href"],
                "https://tables.example.com/v1/p2/data/tables/other"
            );
        }
        assert_eq!(
            json["Table"]["AttributeDefinitions"],
            serde_json::json!([{"AttributeName": "pk", "AttributeType": "B"}])
        );
    }

    #[tokio::test]
    async fn test_should_answer_health_check() {
        let base = start_server().await.unwrap();
        let (status, json) = get_json(&format!("{base}/health")).await;
        assert_eq!(status, reqwest::StatusCode::OK);
        assert_eq!(json["status"], "running");
        assert!(json["version"].is_string());
    }
}
