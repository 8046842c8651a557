use soroban_sdk::{contracttype, Address, String, Symbol};

/// Capability queried in the authority contract for member mutation.
pub const PERMISSION_MANAGE_MEMBERS: &str = "manage_members";

#[contracttype]
#[derive(Clone, Debug)]
pub struct Organization {
    /// Org account, the primary key
    pub org: Address,
    /// 4-character lowercase code, unique across organizations
    pub org_code: Symbol,
    /// On-chain profile: display name
    pub display_name: String,
    /// Off-chain profile: IPFS image reference
    pub ipfs_image: String,
    /// Ledger time of initialization
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Member {
    pub account: Address,
    pub added_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Initialized,
    SubscriptionContract,
    AuthorityContract,
    Org(Address),
    /// Secondary uniqueness index: org code → org account
    OrgCode(Symbol),
    Member(Address, Address), // (org, account)
}
