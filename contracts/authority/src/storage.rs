use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    /// (scope, permission, grantee) → granted. Absence means deny.
    Grant(Address, Symbol, Address),
}
