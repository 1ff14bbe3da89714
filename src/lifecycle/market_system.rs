use crate::clients::{AddressClient, MaterialClient, OrderClient, PartyClient};
use crate::order_actor::OrderContext;
use tracing::{error, info};

/// Starts, wires and stops the four resource actors.
///
/// Party, material and address actors have no dependencies. The order actor gets
/// clones of their clients as its [`OrderContext`], so calls only ever flow
/// order -> {party, material, address} and shutdown by channel closure is safe.
///
/// ```rust,ignore
/// let system = MarketSystem::new(32);
/// let supplier = system.party_client.create_party(PartyCreate::new(Role::Supplier, "Ravi")).await?;
/// // ...
/// system.shutdown().await?;
/// ```
pub struct MarketSystem {
    pub party_client: PartyClient,
    pub material_client: MaterialClient,
    pub address_client: AddressClient,
    pub order_client: OrderClient,

    /// Task handles for all running actors (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    /// Spawns every actor with a channel of `buffer_size` and injects the order
    /// actor's context.
    pub fn new(buffer_size: usize) -> Self {
        let (party_actor, party_client) = crate::party_actor::new(buffer_size);
        let (material_actor, material_client) = crate::material_actor::new(buffer_size);
        let (address_actor, address_client) = crate::address_actor::new(buffer_size);
        let (order_actor, order_client) = crate::order_actor::new(buffer_size);

        let party_client = PartyClient::new(party_client);
        let material_client = MaterialClient::new(material_client);
        let address_client = AddressClient::new(address_client);
        let order_client = OrderClient::new(order_client);

        let party_handle = tokio::spawn(party_actor.run(()));
        let material_handle = tokio::spawn(material_actor.run(()));
        let address_handle = tokio::spawn(address_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            parties: party_client.clone(),
            materials: material_client.clone(),
            addresses: address_client.clone(),
        }));

        Self {
            party_client,
            material_client,
            address_client,
            order_client,
            // The order actor holds the other clients, so it has to stop first.
            handles: vec![order_handle, party_handle, material_handle, address_handle],
        }
    }

    /// Drops every client, then waits for each actor to drain and stop.
    ///
    /// Clones held elsewhere (for example by the HTTP state) keep their actor alive,
    /// so drop those before calling this.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.party_client);
        drop(self.material_client);
        drop(self.address_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
