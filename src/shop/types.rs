//! Shop item definitions.

/// Whether an item is a fishing spot or a piece of gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopItemKind {
    Environment,
    Upgrade,
}

/// What owning an item does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    /// Added to the level-derived rarity bias while this environment is selected
    RarityBonus(f64),
    /// Multiplies reel power per tap
    ReelPower(f64),
    /// Multiplies reel progress lost per decay tick (below 1.0 helps)
    EscapeReduction(f64),
    /// Multiplies XP per catch
    XpMultiplier(f64),
    /// Multiplies coins per fish sold
    SaleMultiplier(f64),
}

#[derive(Debug, Clone)]
pub struct ShopItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ShopItemKind,
    pub price: u64,
    pub required_level: u32,
    pub effect: ItemEffect,
}

/// Immutable shop table injected into the session.
#[derive(Debug, Clone)]
pub struct ShopCatalog {
    items: Vec<ShopItem>,
}

impl ShopCatalog {
    pub fn new(items: Vec<ShopItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn environments(&self) -> impl Iterator<Item = &ShopItem> {
        self.items
            .iter()
            .filter(|item| item.kind == ShopItemKind::Environment)
    }

    pub fn upgrades(&self) -> impl Iterator<Item = &ShopItem> {
        self.items
            .iter()
            .filter(|item| item.kind == ShopItemKind::Upgrade)
    }
}

impl Default for ShopCatalog {
    fn default() -> Self {
        Self::new(super::data::SHOP_ITEMS.to_vec())
    }
}
