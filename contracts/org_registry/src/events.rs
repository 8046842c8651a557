use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone, Debug)]
pub struct OrgInitializedEvent {
    pub org: Address,
    pub org_code: Symbol,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProfileUpdatedEvent {
    pub org: Address,
    pub field: Symbol,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct MemberAddedEvent {
    pub org: Address,
    pub account: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct MemberRemovedEvent {
    pub org: Address,
    pub account: Address,
}
