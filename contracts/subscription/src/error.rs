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
    // PACKAGE ERRORS (10-19)
    // ============================================
    /// Package with this name already exists
    DuplicatePackage = 10,
    /// Package not found or not active
    UnknownPackage = 11,
    /// Package fields fail validation (empty description, zero quota/expiry, negative cost)
    InvalidPackageConfig = 12,

    // ============================================
    // PAYMENT ERRORS (20-29)
    // ============================================
    /// Memo does not match "<org>:<package>"
    MalformedMemo = 20,
    /// Payment amount or token does not equal the package cost
    CostMismatch = 21,
    /// Amount must be positive
    InvalidAmount = 22,

    // ============================================
    // SUBSCRIPTION ERRORS (30-39)
    // ============================================
    /// No unexpired subscription for this org
    NoActiveSubscription = 30,
    /// Subscription has fewer actions remaining than requested
    QuotaExhausted = 31,
}
