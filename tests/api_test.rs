use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use material_market::api::{router, AppState, DiscoverySettings};
use material_market::lifecycle::MarketSystem;
use material_market::seed::{seed_demo, DemoSeed};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

// Demo seed layout: party_1 and party_2 are located suppliers, party_3 is a supplier
// still on (0,0), party_4 is the vendor. material_1 is Ravi's cement (500 bags),
// material_2 Ravi's sand (40 t). address_2 is the vendor's site.
const RAVI: &str = "demo-party_1";
const ANITA: &str = "demo-party_2";
const KIRAN: &str = "demo-party_4";

struct TestApp {
    app: Router,
    _system: MarketSystem,
    _seed: DemoSeed,
}

async fn app() -> TestApp {
    let system = MarketSystem::new(32);
    let seed = seed_demo(&system).await.unwrap();
    let state = AppState::new(
        &system,
        Arc::new(seed.verifier()),
        DiscoverySettings::default(),
    );
    TestApp {
        app: router(state),
        _system: system,
        _seed: seed,
    }
}

impl TestApp {
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(Body::from(body.unwrap_or_default().to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn place(&self, material_id: u32, quantity: u32) -> (StatusCode, Value) {
        let body = json!({
            "materialId": material_id,
            "quantity": quantity,
            "supplierId": 1,
            "vendorAddressId": 2,
        })
        .to_string();
        self.send(Method::POST, "/order/vendor", Some(KIRAN), Some(&body))
            .await
    }
}

#[tokio::test]
async fn test_missing_or_bad_token_is_401() {
    let t = app().await;
    let (status, body) = t.send(Method::GET, "/order/vendor", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = t
        .send(Method::GET, "/order/vendor", Some("forged"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_lifecycle_over_http() {
    let t = app().await;

    let (status, order) = t.place(1, 10).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    let id = order["id"].as_u64().unwrap();

    let (status, order) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/accept"),
            Some(RAVI),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "accepted");

    let (status, err) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/delivery"),
            Some(RAVI),
            Some("{}"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["status"], 400);
    assert_eq!(err["availableActions"], json!(["start preparing", "cancel"]));

    let (status, order) = t
        .send(
            Method::PATCH,
            &format!("/order/supplier/order_{id}/status"),
            Some(RAVI),
            Some(r#"{"status":"preparing","note":"Loading at dock 3"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "preparing");
    assert_eq!(order["notes"][2]["message"], "Loading at dock 3");

    let (status, probe) = t
        .send(Method::GET, &format!("/order/{id}/status"), Some(KIRAN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(probe["currentStatus"], "preparing");
    assert_eq!(probe["supplierId"], 1);
    assert_eq!(probe["vendor"]["businessName"], "Kiran Constructions");

    let (status, list) = t.send(Method::GET, "/order/vendor", Some(KIRAN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["material"]["name"], "Portland cement");
    assert_eq!(list[0]["supplier"]["name"], "Ravi Patil");
    assert_eq!(list[0]["vendorAddress"]["label"], "Andheri site");

    let (status, stats) = t
        .send(Method::GET, "/order/supplier/stats", Some(RAVI), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalOrders"], 1);
    assert_eq!(stats["byStatus"]["preparing"], 1);
    assert_eq!(stats["activeOrders"], 1);
}

#[tokio::test]
async fn test_permissions_and_validation() {
    let t = app().await;
    let (_, order) = t.place(1, 1).await;
    let id = order["id"].as_u64().unwrap();

    let (status, _) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/accept"),
            Some(KIRAN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/accept"),
            Some(ANITA),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/reject"),
            Some(RAVI),
            Some(r#"{"note":"no reason field"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = t
        .send(
            Method::PATCH,
            &format!("/order/supplier/{id}/status"),
            Some(RAVI),
            Some(r#"{"status":"shipped"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/teleport"),
            Some(RAVI),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = t
        .send(Method::GET, &format!("/order/{id}/status"), Some(ANITA), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = t
        .send(Method::POST, "/order/vendor", Some(RAVI), Some("{}"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .send(Method::POST, "/order/vendor", Some(KIRAN), Some("{not json"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, rejected) = t
        .send(
            Method::POST,
            &format!("/order/supplier/{id}/reject"),
            Some(RAVI),
            Some(r#"{"reason":"Kiln under repair"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
    assert!(rejected["notes"][1]["message"]
        .as_str()
        .unwrap()
        .contains("Kiln under repair"));
}

#[tokio::test]
async fn test_short_stock_is_409() {
    let t = app().await;
    let (status, body) = t.place(2, 41).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn test_materials_listing() {
    let t = app().await;
    let (status, created) = t
        .send(
            Method::POST,
            "/material",
            Some(ANITA),
            Some(r#"{"name":"Fly ash bricks","unit":"piece","pricePerUnit":"7.25","availableQuantity":20000}"#),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["supplierId"], 2);

    let (status, list) = t
        .send(Method::GET, "/material?supplierId=2", Some(KIRAN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, _) = t
        .send(Method::GET, "/material?supplierId=abc", Some(KIRAN), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_supplier_discovery() {
    let t = app().await;

    let (status, view) = t
        .send(
            Method::GET,
            "/discovery/suppliers?sort=nearest",
            Some(KIRAN),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let located = view["withLocation"].as_array().unwrap();
    assert_eq!(located.len(), 2);
    assert_eq!(located[0]["name"], "Anita Shah");
    assert_eq!(located[0]["proximity"]["kind"], "distance");
    assert_eq!(view["withoutLocation"][0]["name"], "Legacy Stone Works");

    let (_, view) = t
        .send(
            Method::GET,
            "/discovery/suppliers?lat=19.076&lon=72.8777&radiusKm=10",
            Some(KIRAN),
            None,
        )
        .await;
    let located = view["withLocation"].as_array().unwrap();
    assert_eq!(located.len(), 1);
    assert_eq!(located[0]["proximity"]["display"], "0m");

    let (status, _) = t
        .send(Method::GET, "/discovery/suppliers?lat=19.0", Some(KIRAN), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_discovery_for_supplier() {
    let t = app().await;
    t.place(1, 2).await;

    let (status, view) = t
        .send(
            Method::GET,
            "/discovery/orders?status=pending",
            Some(RAVI),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let located = view["withLocation"].as_array().unwrap();
    assert_eq!(located.len(), 1);
    assert_eq!(located[0]["status"], "pending");
    assert_eq!(located[0]["proximity"]["kind"], "distance");

    let (_, view) = t
        .send(
            Method::GET,
            "/discovery/orders?status=delivered",
            Some(RAVI),
            None,
        )
        .await;
    assert!(view["withLocation"].as_array().unwrap().is_empty());

    let (status, _) = t
        .send(Method::GET, "/discovery/orders?status=lost", Some(RAVI), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_out_of_range_prices_are_rejected_and_orders_keep_working() {
    let t = app().await;

    let (status, body) = t
        .send(
            Method::POST,
            "/material",
            Some(RAVI),
            Some(r#"{"name":"Gold sand","unit":"ton","pricePerUnit":"79228162514264337593543950335","availableQuantity":5}"#),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);

    let (status, _) = t
        .send(
            Method::PATCH,
            "/material/1",
            Some(RAVI),
            Some(r#"{"pricePerUnit":"1000000000.01"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, dearest) = t
        .send(
            Method::POST,
            "/material",
            Some(RAVI),
            Some(r#"{"name":"Granite block","unit":"piece","pricePerUnit":"1000000000","availableQuantity":4294967295}"#),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let dearest = dearest["id"].as_u64().unwrap();

    let (status, order) = t.place(dearest as u32, u32::MAX).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["totalAmount"], "4294967295000000000");

    let (status, _) = t.place(1, 3).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, stats) = t
        .send(Method::GET, "/order/vendor/stats", Some(KIRAN), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalOrders"], 2);
}

#[tokio::test]
async fn test_supplier_edits_only_own_materials() {
    let t = app().await;

    let (status, updated) = t
        .send(
            Method::PATCH,
            "/material/1",
            Some(RAVI),
            Some(r#"{"pricePerUnit":"395.00","availableQuantity":450}"#),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["pricePerUnit"], "395.00");
    assert_eq!(updated["availableQuantity"], 450);

    let (status, _) = t
        .send(
            Method::PATCH,
            "/material/1",
            Some(ANITA),
            Some(r#"{"availableQuantity":0}"#),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = t
        .send(
            Method::PATCH,
            "/material/1",
            Some(KIRAN),
            Some(r#"{"availableQuantity":0}"#),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_location_feeds_discovery() {
    let t = app().await;
    let legacy = "demo-party_3";

    let (status, me) = t.send(Method::GET, "/profile", Some(legacy), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["name"], "Legacy Stone Works");

    let (status, _) = t
        .send(Method::PATCH, "/profile", Some(legacy), Some(r#"{"latitude":18.6}"#))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, me) = t
        .send(
            Method::PATCH,
            "/profile",
            Some(legacy),
            Some(r#"{"latitude":19.2183,"longitude":72.9781,"phone":"+91 22 2500 0000"}"#),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["phone"], "+91 22 2500 0000");

    let (_, view) = t
        .send(Method::GET, "/discovery/suppliers", Some(KIRAN), None)
        .await;
    assert_eq!(view["withLocation"].as_array().unwrap().len(), 3);
    assert!(view["withoutLocation"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_address_book_is_per_party() {
    let t = app().await;

    let (status, mine) = t.send(Method::GET, "/address", Some(KIRAN), None).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["label"], "Andheri site");

    let (_, none) = t.send(Method::GET, "/address", Some(ANITA), None).await;
    assert!(none.as_array().unwrap().is_empty());
}
