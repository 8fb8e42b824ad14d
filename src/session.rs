use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::cart::Cart;

pub const CART_IDLE_EXPIRY: Duration = Duration::from_secs(30 * 60);

struct Entry {
    cart: Cart,
    touched: Instant,
}

/// Keyed session store (user id -> cart). Injected as a collaborator; there
/// is no process-global cart state. Every mutation writes the whole cart back
/// (last write wins across concurrent requests for the same key).
pub struct CartStore {
    ttl: Duration,
    entries: RwLock<HashMap<i32, Entry>>,
}

impl CartStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the session's cart, or an empty one when none exists or the
    /// previous one sat idle past the ttl. Never fails.
    pub async fn load(&self, key: i32) -> Cart {
        let mut entries = self.entries.write().await;
        match entries.get(&key) {
            Some(entry) if entry.touched.elapsed() < self.ttl => entry.cart.clone(),
            Some(_) => {
                entries.remove(&key);
                Cart::new()
            }
            None => Cart::new(),
        }
    }

    pub async fn store(&self, key: i32, cart: Cart) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            Entry {
                cart,
                touched: Instant::now(),
            },
        );
    }

    pub async fn clear(&self, key: i32) {
        let mut entries = self.entries.write().await;
        entries.remove(&key);
    }
}
