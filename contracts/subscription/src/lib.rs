#![no_std]

mod error;
mod events;
mod memo;
mod storage;

pub use error::Error;
use events::{PackageDefinedEvent, PackagePurchasedEvent, QuotaConsumedEvent};
pub use storage::{Package, Subscription};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, token, Address, Env, String, Symbol};

#[contract]
pub struct SubscriptionLedger;

#[contractimpl]
impl SubscriptionLedger {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);

        Ok(())
    }

    // ============================================
    // PACKAGE REGISTRY
    // ============================================

    /// Define a new subscription package
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidPackageConfig`: Empty description, zero quota/expiry, or negative cost
    /// - `DuplicatePackage`: Package name already taken
    #[allow(clippy::too_many_arguments)]
    pub fn define_package(
        env: Env,
        name: Symbol,
        description: String,
        quota: u64,
        expiry_secs: u64,
        cost_amount: i128,
        cost_token: Address,
        active: bool,
        display: bool,
    ) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if description.len() == 0 || quota == 0 || expiry_secs == 0 || cost_amount < 0 {
            return Err(Error::InvalidPackageConfig);
        }

        if env.storage().instance().has(&DataKey::Package(name.clone())) {
            return Err(Error::DuplicatePackage);
        }

        let package = Package {
            name: name.clone(),
            description,
            quota,
            expiry_secs,
            cost_amount,
            cost_token: cost_token.clone(),
            active,
            display,
        };

        env.storage()
            .instance()
            .set(&DataKey::Package(name.clone()), &package);

        env.events().publish(
            (Symbol::new(&env, "pack_defined"), name.clone()),
            PackageDefinedEvent {
                name,
                quota,
                expiry_secs,
                cost_amount,
                cost_token,
            },
        );

        Ok(())
    }

    /// Enable or disable purchasing of a package
    ///
    /// Subscriptions already assigned are unaffected: quota and expiry
    /// were copied at purchase time.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnknownPackage`: Package doesn't exist
    pub fn set_package_active(env: Env, name: Symbol, active: bool) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        let mut package: Package = env
            .storage()
            .instance()
            .get(&DataKey::Package(name.clone()))
            .ok_or(Error::UnknownPackage)?;

        package.active = active;
        env.storage().instance().set(&DataKey::Package(name), &package);

        Ok(())
    }

    /// Show or hide a package in listings
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnknownPackage`: Package doesn't exist
    pub fn set_package_display(env: Env, name: Symbol, display: bool) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        let mut package: Package = env
            .storage()
            .instance()
            .get(&DataKey::Package(name.clone()))
            .ok_or(Error::UnknownPackage)?;

        package.display = display;
        env.storage().instance().set(&DataKey::Package(name), &package);

        Ok(())
    }

    /// Get a package definition
    ///
    /// # Errors
    /// - `UnknownPackage`: Package doesn't exist
    pub fn get_package(env: Env, name: Symbol) -> Result<Package, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Package(name))
            .ok_or(Error::UnknownPackage)
    }

    // ============================================
    // PAYMENT NOTIFICATION
    // ============================================

    /// Handle an incoming package payment
    ///
    /// The memo encodes the intended assignment as `"<org>:<package>"`.
    /// On success the payment is pulled into the contract and the org's
    /// subscription is replaced outright: latest payment wins, no
    /// proration.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Amount must be positive
    /// - `MalformedMemo`: Memo does not match `"<org>:<package>"`
    /// - `UnknownPackage`: Named package absent or inactive
    /// - `CostMismatch`: Amount or token does not equal the package cost
    pub fn on_payment(
        env: Env,
        payer: Address,
        amount: i128,
        token: Address,
        memo: String,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let (org, package_name) = memo::parse_memo(&env, &memo)?;

        payer.require_auth();

        let package: Package = env
            .storage()
            .instance()
            .get(&DataKey::Package(package_name.clone()))
            .ok_or(Error::UnknownPackage)?;

        // Inactive packages are not purchasable.
        if !package.active {
            return Err(Error::UnknownPackage);
        }

        if token != package.cost_token || amount != package.cost_amount {
            return Err(Error::CostMismatch);
        }

        let token_client = token::Client::new(&env, &token);
        token_client.transfer(&payer, &env.current_contract_address(), &amount);

        let now = env.ledger().timestamp();
        let expires_at = now.saturating_add(package.expiry_secs);
        let subscription = Subscription {
            package: package_name.clone(),
            assigned_at: now,
            expires_at,
            quota_remaining: package.quota,
        };

        env.storage()
            .instance()
            .set(&DataKey::Subscription(org.clone()), &subscription);

        env.events().publish(
            (Symbol::new(&env, "purchased"), org.clone()),
            PackagePurchasedEvent {
                org,
                package: package_name,
                payer,
                amount,
                expires_at,
            },
        );

        Ok(())
    }

    // ============================================
    // SUBSCRIPTION QUERIES & BILLING
    // ============================================

    /// Get the org's subscription if it has not expired
    ///
    /// Expiry is lazy: the stored timestamp is compared against ledger
    /// time on every read, never swept in the background.
    ///
    /// # Errors
    /// - `NoActiveSubscription`: No subscription, or past expiry
    pub fn get_active_subscription(env: Env, org: Address) -> Result<Subscription, Error> {
        let subscription: Subscription = env
            .storage()
            .instance()
            .get(&DataKey::Subscription(org))
            .ok_or(Error::NoActiveSubscription)?;

        if env.ledger().timestamp() >= subscription.expires_at {
            return Err(Error::NoActiveSubscription);
        }

        Ok(subscription)
    }

    /// Check whether the org holds an unexpired subscription
    ///
    /// Boolean form of `get_active_subscription` for cross-contract
    /// gating; the caller owns the error it raises on deny.
    pub fn has_active(env: Env, org: Address) -> bool {
        match env
            .storage()
            .instance()
            .get::<DataKey, Subscription>(&DataKey::Subscription(org))
        {
            Some(subscription) => env.ledger().timestamp() < subscription.expires_at,
            None => false,
        }
    }

    /// Consume actions from the org's subscription quota
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: Zero actions requested
    /// - `NoActiveSubscription`: No subscription, or past expiry
    /// - `QuotaExhausted`: Fewer actions remaining than requested
    pub fn consume_quota(env: Env, org: Address, actions: u64) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();

        if actions == 0 {
            return Err(Error::InvalidAmount);
        }

        let mut subscription: Subscription = env
            .storage()
            .instance()
            .get(&DataKey::Subscription(org.clone()))
            .ok_or(Error::NoActiveSubscription)?;

        if env.ledger().timestamp() >= subscription.expires_at {
            return Err(Error::NoActiveSubscription);
        }

        if subscription.quota_remaining < actions {
            return Err(Error::QuotaExhausted);
        }

        subscription.quota_remaining -= actions;
        let remaining = subscription.quota_remaining;

        env.storage()
            .instance()
            .set(&DataKey::Subscription(org.clone()), &subscription);

        env.events().publish(
            (Symbol::new(&env, "quota_used"), org.clone()),
            QuotaConsumedEvent {
                org,
                actions,
                remaining,
            },
        );

        Ok(())
    }
}
