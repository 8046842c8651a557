use soroban_sdk::{contracttype, Address, String, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct Package {
    /// Unique package name
    pub name: Symbol,
    /// Human-readable description
    pub description: String,
    /// Actions purchasable with this package
    pub quota: u64,
    /// Subscription lifetime in seconds
    pub expiry_secs: u64,
    /// Price of the package
    pub cost_amount: i128,
    /// Token contract the price is denominated in
    pub cost_token: Address,
    /// Inactive packages cannot be purchased
    pub active: bool,
    /// Whether UIs should list the package
    pub display: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    /// Package this subscription was bought from
    pub package: Symbol,
    /// Ledger time of the purchase
    pub assigned_at: u64,
    /// Absolute expiry, compared lazily against ledger time on every read
    pub expires_at: u64,
    /// Actions left to consume
    pub quota_remaining: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    Package(Symbol),
    Subscription(Address), // org → current subscription
}
