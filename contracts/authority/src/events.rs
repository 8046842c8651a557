use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct GrantEvent {
    pub scope: Address,
    pub permission: Symbol,
    pub grantee: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RevokeEvent {
    pub scope: Address,
    pub permission: Symbol,
    pub grantee: Address,
}
