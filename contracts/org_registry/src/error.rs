use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-15)
    // ============================================
    /// Caller is neither the org nor a manage_members grantee
    Unauthorized = 10,

    // ============================================
    // ORGANIZATION ERRORS (20-29)
    // ============================================
    /// Org code must be exactly 4 characters
    InvalidCodeLength = 20,
    /// Org code must be lowercase ASCII alphabetic
    InvalidCodeChar = 21,
    /// Organization already initialized for this account
    OrganizationExists = 22,
    /// Org code already taken by another organization
    DuplicateOrgCode = 23,
    /// Organization not found
    UnknownOrganization = 24,
    /// No unexpired subscription backs this organization
    NoActiveSubscription = 25,

    // ============================================
    // MEMBERSHIP ERRORS (30-39)
    // ============================================
    /// Account is already a member of this organization
    DuplicateMember = 30,
    /// Account is not a member of this organization
    UnknownMember = 31,
}
