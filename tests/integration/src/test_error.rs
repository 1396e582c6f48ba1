//! Error-path integration tests.

#[cfg(test)]
mod tests {
    use crate::start_server;

    async fn error_of(resp: reqwest::Response) -> (reqwest::StatusCode, String, String) {
        let status = resp.status();
        let json: serde_json::Value = resp.json().await.unwrap();
        let code = json["__type"]
            .as_str()
            .and_then(|t| t.rsplit('#').next())
            .unwrap_or_default()
            .to_owned();
        let message = json["Message"].as_str().unwrap_or_default().to_owned();
        (status, code, message)
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_missing_table() {
        let base = start_server().await.unwrap();
        let resp = reqwest::get(format!("{base}/v1/p1/data/tables/nope"))
            .await
            .unwrap();

        let (status, code, message) = error_of(resp).await;
        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        assert_eq!(code, "ResourceNotFoundException");
        assert_eq!(message, "Requested resource not found: Table: nope not found");
    }

    #[tokio::test]
    async fn test_should_not_see_tables_of_other_projects() {
        let base = start_server().await.unwrap();
        let resp = reqwest::get(format!("{base}/v1/p2/data/tables/t1"))
            .await
            .unwrap();

        let (status, code, _) = error_of(resp).await;
        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        assert_eq!(code, "ResourceNotFoundException");
    }

    #[tokio::test]
    async fn test_should_reject_blank_project() {
        let base = start_server().await.unwrap();
        let resp = reqwest::get(format!("{base}/v1/%20/data/tables/t1"))
            .await
            .unwrap();

        let (status, code, _) = error_of(resp).await;
        assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(code, "ValidationException");
    }

    #[tokio::test]
    async fn test_should_reject_wrong_method() {
        let base = start_server().await.unwrap();
        let resp = reqwest::Client::new()
            .delete(format!("{base}/v1/p1/data/tables/t1"))
            .send()
            .await
            .unwrap();

        let (status, code, _) = error_of(resp).await;
        assert_eq!(status, reqwest::StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(code, "MethodNotAllowed");
    }

    #[tokio::test]
    async fn test_should_reject_unknown_path() {
        let base = start_server().await.unwrap();
        let resp = reqwest::get(format!("{base}/v1/p1/data/indexes/t1"))
            .await
            .unwrap();

        let (status, code, _) = error_of(resp).await;
        assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
        assert_eq!(code, "UnknownOperationException");
    }
}
