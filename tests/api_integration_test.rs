//! Router tests for the checkout and postback endpoints
//!
//! Run with: cargo test --features server --test api_integration_test

#[cfg(feature = "server")]
mod api_tests {
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use http::{header, Request, StatusCode};
    use payflow_link_adapter::api::{router, AppState};
    use payflow_link_adapter::config::{Config, PayflowConfig, ServerConfig};
    use payflow_link_adapter::payments::traits::Transport;
    use payflow_link_adapter::payments::types::Mode;
    use payflow_link_adapter::{PayflowError, PayflowResult};
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tower::ServiceExt;

    struct CannedGateway {
        response: Result<String, String>,
        bodies: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for CannedGateway {
        async fn post(&self, _url: &str, body: Vec<u8>) -> PayflowResult<Vec<u8>> {
            self.bodies
                .lock()
                .unwrap()
                .push(String::from_utf8(body).unwrap());
            match &self.response {
                Ok(body) => Ok(body.clone().into_bytes()),
                Err(message) => Err(PayflowError::network_error(message.as_str())),
            }
        }
    }

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            payflow: PayflowConfig {
                mode: Mode::Test,
                login: "merchant".to_string(),
                password: "secret".to_string(),
                partner: "PayPal".to_string(),
                user: Some("clerk".to_string()),
                timeout: Duration::from_secs(30),
            },
        }
    }

    fn setup(response: Result<String, String>) -> (axum::Router, Arc<CannedGateway>) {
        let gateway = Arc::new(CannedGateway {
            response,
            bodies: Mutex::new(Vec::new()),
        });
        let transport: Arc<dyn Transport> = gateway.clone();
        let app = router(AppState::new(create_test_config(), transport));
        (app, gateway)
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn checkout_request() -> Request<Body> {
        let payload = serde_json::json!({
            "order_id": "A-100",
            "amount": "19.99",
            "description": "Two #2 pencils",
            "customer": { "first_name": "Cody", "last_name": "Fauser" },
            "billing_address": {
                "address1": "1 Main St",
                "city": "Ottawa",
                "country": "Canada",
                "fax": "555-0100"
            }
        });
        Request::builder()
            .method("POST")
            .uri("/checkout")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = setup(Ok(String::new()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["mode"], "test");
        assert_eq!(json["service_url"], "https://payflowlink.paypal.com");
    }

    #[tokio::test]
    async fn test_checkout_returns_hosted_form() {
        let (app, gateway) = setup(Ok(
            "RESULT=0&RESPMSG=Approved&SECURETOKEN=tok&SECURETOKENID=tokid".to_string(),
        ));

        let response = app.oneshot(checkout_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["form"]["action"], "https://payflowlink.paypal.com");
        assert_eq!(json["form"]["fields"]["securetoken"], "tok");
        assert_eq!(json["form"]["fields"]["securetokenid"], "tokid");
        assert_eq!(json["form"]["fields"]["mode"], "test");
        assert!(json["html"]
            .as_str()
            .unwrap()
            .contains("name=\"securetoken\" value=\"tok\""));

        let bodies = gateway.bodies.lock().unwrap();
        let body = &bodies[0];
        assert!(body.contains("user[5]=clerk"));
        assert!(body.contains("amt[5]=19.99"));
        assert!(body.contains("description[13]=Two 2 pencils"));
        assert!(body.contains("country[2]=CA"));
        assert!(body.contains("state[3]=N/A"));
        assert!(!body.contains("fax"));
    }

    #[tokio::test]
    async fn test_checkout_declined() {
        let (app, _) = setup(Ok("RESULT=1&RESPMSG=User authentication failed".to_string()));

        let response = app.oneshot(checkout_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = read_json(response).await;
        assert_eq!(
            json["error"],
            "Secure token not approved: User authentication failed"
        );
    }

    #[tokio::test]
    async fn test_checkout_gateway_unreachable() {
        let (app, _) = setup(Err("connection refused".to_string()));

        let response = app.oneshot(checkout_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_notification_is_normalized() {
        let (app, _) = setup(Ok(String::new()));
        let request = Request::builder()
            .method("POST")
            .uri("/notifications")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "RESULT=0&PNREF=V19A2E4C5C7D&TYPE=S&AMT=19.99&USER1=A-100&USER2=true&INVNUM=A-100&ACCT=1111&TRANSTIME=2024-03-05+09%3A30%3A00",
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["status"], "Completed");
        assert_eq!(json["complete"], true);
        assert_eq!(json["transaction_id"], "V19A2E4C5C7D");
        assert_eq!(json["item_id"], "A-100");
        assert_eq!(json["gross_cents"], 1999);
        assert_eq!(json["test"], true);
        assert_eq!(json["received_at"], "2024-03-05T09:30:00Z");
        assert_eq!(json["acknowledged"], true);
    }

    #[tokio::test]
    async fn test_failed_notification_still_acknowledged() {
        let (app, _) = setup(Ok(String::new()));
        let request = Request::builder()
            .method("POST")
            .uri("/notifications")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("RESULT=12&TRANSTIME=garbage"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = read_json(response).await;
        assert_eq!(json["status"], "Failed");
        assert_eq!(json["received_at"], Value::Null);
        assert_eq!(json["acknowledged"], true);
    }
}
