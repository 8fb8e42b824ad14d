use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which catalog table a cart line points at. Together with the item id it
/// forms the line's identity: at most one line per (item_id, item_type).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    Product,
    Material,
}

/// A catalog snapshot taken at add-time. Name, price and image are frozen
/// here; later catalog edits do not flow into carts already holding the item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: i32,
    pub item_type: ItemType,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
}

impl CartItem {
    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.total_price()).sum()
    }

    pub fn find(&self, item_id: i32, item_type: ItemType) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.item_id == item_id && item.item_type == item_type)
    }

    /// Bumps the quantity of an existing line. Returns false when no line
    /// matches, in which case the caller snapshots the catalog record and
    /// calls `add_item`.
    pub fn increment(&mut self, item_id: i32, item_type: ItemType, quantity: i32) -> bool {
        match self
            .items
            .iter_mut()
            .find(|item| item.item_id == item_id && item.item_type == item_type)
        {
            Some(item) => {
                // The merge path skips the stock gate, so cap instead of
                // overflowing into a negative quantity.
                item.quantity = item.quantity.saturating_add(quantity);
                true
            }
            None => false,
        }
    }

    pub fn add_item(&mut self, item: CartItem) {
        if !self.increment(item.item_id, item.item_type, item.quantity) {
            self.items.push(item);
        }
    }

    /// Quantity above zero sets it; zero or below removes the line. A miss is
    /// a silent no-op.
    pub fn update_quantity(&mut self, item_id: i32, item_type: ItemType, quantity: i32) {
        if quantity > 0 {
            if let Some(item) = self
                .items
                .iter_mut()
                .find(|item| item.item_id == item_id && item.item_type == item_type)
            {
                item.quantity = quantity;
            }
        } else {
            self.remove_item(item_id, item_type);
        }
    }

    pub fn remove_item(&mut self, item_id: i32, item_type: ItemType) {
        self.items
            .retain(|item| !(item.item_id == item_id && item.item_type == item_type));
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
