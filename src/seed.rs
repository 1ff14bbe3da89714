//! Demo data for local runs.

use crate::address_actor::AddressError;
use crate::api::StaticTokenVerifier;
use crate::lifecycle::MarketSystem;
use crate::material_actor::MaterialError;
use crate::model::{AddressCreate, MaterialCreate, PartyCreate, PartyId, Role};
use crate::party_actor::PartyError;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Party(#[from] PartyError),
    #[error(transparent)]
    Material(#[from] MaterialError),
    #[error(transparent)]
    Address(#[from] AddressError),
}

#[derive(Debug, Clone)]
pub struct DemoAccount {
    pub token: String,
    pub party_id: PartyId,
    pub role: Role,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct DemoSeed {
    pub accounts: Vec<DemoAccount>,
}

impl DemoSeed {
    pub fn verifier(&self) -> StaticTokenVerifier {
        self.accounts
            .iter()
            .fold(StaticTokenVerifier::new(), |v, a| {
                v.with_token(a.token.clone(), a.party_id)
            })
    }
}

/// Two located suppliers, one still on the `(0,0)` placeholder, and one vendor with a
/// site address.
pub async fn seed_demo(system: &MarketSystem) -> Result<DemoSeed, SeedError> {
    let parties = [
        PartyCreate::new(Role::Supplier, "Ravi Patil")
            .business("Ravi Building Supplies")
            .located_at(18.5204, 73.8567),
        PartyCreate::new(Role::Supplier, "Anita Shah")
            .business("Anita Cement Depot")
            .located_at(19.0760, 72.8777),
        PartyCreate::new(Role::Supplier, "Legacy Stone Works").located_at(0.0, 0.0),
        PartyCreate::new(Role::Vendor, "Kiran Rao")
            .business("Kiran Constructions")
            .located_at(19.1136, 72.8697),
    ];

    let mut seed = DemoSeed::default();
    for params in parties {
        let role = params.role;
        let name = params.name.clone();
        let party_id = system.party_client.create_party(params).await?;
        seed.accounts.push(DemoAccount {
            token: format!("demo-{}", party_id),
            party_id,
            role,
            name,
        });
    }

    let ravi = seed.accounts[0].party_id;
    let anita = seed.accounts[1].party_id;
    let kiran = seed.accounts[3].party_id;

    system
        .address_client
        .create_address(AddressCreate {
            owner_id: ravi,
            label: "Warehouse".to_string(),
            line1: "Plot 14, Bhosari MIDC".to_string(),
            city: "Pune".to_string(),
            pincode: Some("411026".to_string()),
            latitude: Some(18.6298),
            longitude: Some(73.8470),
        })
        .await?;
    system
        .address_client
        .create_address(AddressCreate {
            owner_id: kiran,
            label: "Andheri site".to_string(),
            line1: "Veera Desai Road".to_string(),
            city: "Mumbai".to_string(),
            pincode: Some("400053".to_string()),
            latitude: Some(19.1310),
            longitude: Some(72.8330),
        })
        .await?;

    let materials = [
        (ravi, "Portland cement", "bag", Decimal::new(38000, 2), 500),
        (ravi, "River sand", "ton", Decimal::new(120000, 2), 40),
        (anita, "TMT steel bar", "kg", Decimal::new(6550, 2), 10_000),
    ];
    for (supplier_id, name, unit, price_per_unit, available_quantity) in materials {
        system
            .material_client
            .create_material(MaterialCreate {
                supplier_id,
                name: name.to_string(),
                category: Some("construction".to_string()),
                unit: unit.to_string(),
                price_per_unit,
                available_quantity,
            })
            .await?;
    }

    for account in &seed.accounts {
        info!(party_id = %account.party_id, role = %account.role, token = %account.token, "Demo account");
    }
    Ok(seed)
}
