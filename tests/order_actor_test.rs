use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use chrono::Utc;
use material_market::clients::{AddressClient, MaterialClient, OrderClient, PartyClient};
use material_market::material_actor::{MaterialActionResult, MaterialError};
use material_market::model::{
    Address, Material, MaterialId, OrderCreate, OrderStatus, OrderStep, Party, PartyId, Role,
};
use material_market::order_actor::{OrderContext, OrderError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::task::JoinHandle;

const VENDOR: PartyId = PartyId(1);
const SUPPLIER: PartyId = PartyId(2);
const CEMENT: MaterialId = MaterialId(1);

fn party(id: PartyId, role: Role) -> Party {
    Party {
        id,
        role,
        name: format!("{role} {id}"),
        business_name: None,
        phone: None,
        latitude: None,
        longitude: None,
        created_at: Utc::now(),
    }
}

fn cement() -> Material {
    Material {
        id: CEMENT,
        supplier_id: SUPPLIER,
        name: "Portland cement".to_string(),
        category: None,
        unit: "bag".to_string(),
        price_per_unit: dec!(380.50),
        available_quantity: 100,
        created_at: Utc::now(),
    }
}

fn params(quantity: u32) -> OrderCreate {
    OrderCreate {
        vendor_id: VENDOR,
        supplier_id: SUPPLIER,
        material_id: CEMENT,
        quantity,
        vendor_address_id: None,
        supplier_address_id: None,
    }
}

struct Harness {
    parties: MockClient<Party>,
    materials: MockClient<Material>,
    addresses: MockClient<Address>,
    orders: OrderClient,
    handle: JoinHandle<()>,
}

/// Real Order actor, scripted dependencies.
fn harness() -> Harness {
    let parties = MockClient::<Party>::new();
    let materials = MockClient::<Material>::new();
    let addresses = MockClient::<Address>::new();

    let (order_actor, order_client) = material_market::order_actor::new(8);
    let handle = tokio::spawn(order_actor.run(OrderContext {
        parties: PartyClient::new(parties.client()),
        materials: MaterialClient::new(materials.client()),
        addresses: AddressClient::new(addresses.client()),
    }));

    Harness {
        parties,
        materials,
        addresses,
        orders: OrderClient::new(order_client),
        handle,
    }
}

impl Harness {
    fn expect_placement_lookups(&mut self) {
        self.parties
            .expect_get(VENDOR)
            .return_ok(Some(party(VENDOR, Role::Vendor)));
        self.parties
            .expect_get(SUPPLIER)
            .return_ok(Some(party(SUPPLIER, Role::Supplier)));
        self.materials.expect_get(CEMENT).return_ok(Some(cement()));
    }

    async fn finish(self) {
        self.parties.verify();
        self.materials.verify();
        self.addresses.verify();
        drop(self.orders);
        self.handle.await.unwrap();
    }
}

#[tokio::test]
async fn test_placement_reserves_and_cancel_releases() {
    let mut h = harness();
    h.expect_placement_lookups();
    h.materials
        .expect_action(CEMENT)
        .return_ok(MaterialActionResult::ReserveStock(96));

    let order = h.orders.place_order(params(4)).await.unwrap();
    assert_eq!(order.total_amount, dec!(1522.00));
    assert_eq!(order.status, OrderStatus::Pending);

    h.orders
        .apply_step(order.id, OrderStep::Accept, SUPPLIER, None)
        .await
        .unwrap();

    h.materials
        .expect_action(CEMENT)
        .return_ok(MaterialActionResult::ReleaseStock(100));
    let cancelled = h
        .orders
        .apply_step(order.id, OrderStep::Cancel, SUPPLIER, None)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        cancelled.notes.last().unwrap().message,
        "Order cancelled by supplier"
    );

    h.finish().await;
}

#[tokio::test]
async fn test_short_stock_surfaces_as_order_error() {
    let mut h = harness();
    h.expect_placement_lookups();
    h.materials
        .expect_action(CEMENT)
        .return_err(FrameworkError::EntityError(Box::new(
            MaterialError::InsufficientStock {
                requested: 500,
                available: 100,
            },
        )));

    let err = h.orders.place_order(params(500)).await.unwrap_err();
    assert!(matches!(err, OrderError::InsufficientStock(_)));
    assert!(err.to_string().contains("available 100"));
    assert!(h.orders.list(|_| true).await.unwrap().is_empty());

    h.finish().await;
}

#[tokio::test]
async fn test_failed_release_aborts_the_cancel() {
    let mut h = harness();
    h.expect_placement_lookups();
    h.materials
        .expect_action(CEMENT)
        .return_ok(MaterialActionResult::ReserveStock(99));
    let order = h.orders.place_order(params(1)).await.unwrap();

    h.materials
        .expect_action(CEMENT)
        .return_err(FrameworkError::ActorClosed);
    let err = h
        .orders
        .reject(order.id, SUPPLIER, Some("No trucks".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ActorCommunicationError(_)));

    let stored = h.orders.get(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Pending);
    assert_eq!(stored.notes.len(), 1);

    h.finish().await;
}

#[tokio::test]
async fn test_unknown_vendor_is_not_found() {
    let mut h = harness();
    h.parties.expect_get(VENDOR).return_ok(None);

    let err = h.orders.place_order(params(1)).await.unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));

    h.finish().await;
}

#[tokio::test]
async fn test_out_of_range_total_is_rejected_and_actor_survives() {
    let mut h = harness();
    h.parties
        .expect_get(VENDOR)
        .return_ok(Some(party(VENDOR, Role::Vendor)));
    h.parties
        .expect_get(SUPPLIER)
        .return_ok(Some(party(SUPPLIER, Role::Supplier)));
    let mut priceless = cement();
    priceless.price_per_unit = Decimal::MAX;
    h.materials.expect_get(CEMENT).return_ok(Some(priceless));

    let err = h.orders.place_order(params(2)).await.unwrap_err();
    assert!(matches!(err, OrderError::ValidationError(_)));

    h.expect_placement_lookups();
    h.materials
        .expect_action(CEMENT)
        .return_ok(MaterialActionResult::ReserveStock(99));
    let order = h.orders.place_order(params(1)).await.unwrap();
    assert_eq!(order.total_amount, dec!(380.50));
    assert_eq!(h.orders.list(|_| true).await.unwrap().len(), 1);

    h.finish().await;
}
