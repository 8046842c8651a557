use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct PackageDefinedEvent {
    pub name: Symbol,
    pub quota: u64,
    pub expiry_secs: u64,
    pub cost_amount: i128,
    pub cost_token: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PackagePurchasedEvent {
    pub org: Address,
    pub package: Symbol,
    pub payer: Address,
    pub amount: i128,
    pub expires_at: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct QuotaConsumedEvent {
    pub org: Address,
    pub actions: u64,
    pub remaining: u64,
}
