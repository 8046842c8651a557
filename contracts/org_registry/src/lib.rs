#![no_std]

mod error;
mod events;
mod storage;
mod validation;

pub use error::Error;
use events::{MemberAddedEvent, MemberRemovedEvent, OrgInitializedEvent, ProfileUpdatedEvent};
pub use storage::{Member, Organization};
use storage::{DataKey, PERMISSION_MANAGE_MEMBERS};

use soroban_sdk::{contract, contractimpl, vec, Address, Env, IntoVal, String, Symbol};

#[contract]
pub struct OrgRegistry;

#[contractimpl]
impl OrgRegistry {
    // ============================================
    // INITIALIZATION
    // ============================================

    /// Initialize the registry and wire its collaborator contracts
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        subscription: Address,
        authority: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::SubscriptionContract, &subscription);
        env.storage()
            .instance()
            .set(&DataKey::AuthorityContract, &authority);

        Ok(())
    }

    // ============================================
    // ORGANIZATION LIFECYCLE
    // ============================================

    /// Initialize an organization (Uninitialized → Active, terminal)
    ///
    /// Requires the org account's own signing authority and an unexpired
    /// subscription in the subscription contract.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidCodeLength`: Org code not exactly 4 characters
    /// - `InvalidCodeChar`: Org code not lowercase alphabetic
    /// - `OrganizationExists`: Org account already registered
    /// - `DuplicateOrgCode`: Code already taken by another org
    /// - `NoActiveSubscription`: No unexpired paid subscription for the org
    pub fn init_org(
        env: Env,
        org: Address,
        org_code: String,
        ipfs_image: String,
        display_name: String,
    ) -> Result<(), Error> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::NotInitialized);
        }

        org.require_auth();

        let code = validation::validate_org_code(&env, &org_code)?;

        if env.storage().instance().has(&DataKey::Org(org.clone())) {
            return Err(Error::OrganizationExists);
        }
        if env.storage().instance().has(&DataKey::OrgCode(code.clone())) {
            return Err(Error::DuplicateOrgCode);
        }

        // Initialization is payment-gated by the subscription contract.
        if !Self::subscription_active(&env, &org)? {
            return Err(Error::NoActiveSubscription);
        }

        let organization = Organization {
            org: org.clone(),
            org_code: code.clone(),
            display_name,
            ipfs_image,
            created_at: env.ledger().timestamp(),
        };

        env.storage()
            .instance()
            .set(&DataKey::Org(org.clone()), &organization);
        env.storage()
            .instance()
            .set(&DataKey::OrgCode(code.clone()), &org);

        env.events().publish(
            (Symbol::new(&env, "org_init"), org.clone()),
            OrgInitializedEvent {
                org,
                org_code: code,
            },
        );

        Ok(())
    }

    /// Get an organization row
    ///
    /// # Errors
    /// - `UnknownOrganization`: Organization not found
    pub fn get_organization(env: Env, org: Address) -> Result<Organization, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Org(org))
            .ok_or(Error::UnknownOrganization)
    }

    /// Update the on-chain display name (org authority only)
    ///
    /// # Errors
    /// - `UnknownOrganization`: Organization not found
    pub fn set_display_name(env: Env, org: Address, display_name: String) -> Result<(), Error> {
        org.require_auth();

        let mut organization: Organization = env
            .storage()
            .instance()
            .get(&DataKey::Org(org.clone()))
            .ok_or(Error::UnknownOrganization)?;

        organization.display_name = display_name;
        env.storage()
            .instance()
            .set(&DataKey::Org(org.clone()), &organization);

        env.events().publish(
            (Symbol::new(&env, "profile"), org.clone()),
            ProfileUpdatedEvent {
                org,
                field: Symbol::new(&env, "display_name"),
            },
        );

        Ok(())
    }

    /// Update the off-chain image reference (org authority only)
    ///
    /// # Errors
    /// - `UnknownOrganization`: Organization not found
    pub fn set_image(env: Env, org: Address, ipfs_image: String) -> Result<(), Error> {
        org.require_auth();

        let mut organization: Organization = env
            .storage()
            .instance()
            .get(&DataKey::Org(org.clone()))
            .ok_or(Error::UnknownOrganization)?;

        organization.ipfs_image = ipfs_image;
        env.storage()
            .instance()
            .set(&DataKey::Org(org.clone()), &organization);

        env.events().publish(
            (Symbol::new(&env, "profile"), org.clone()),
            ProfileUpdatedEvent {
                org,
                field: Symbol::new(&env, "ipfs_image"),
            },
        );

        Ok(())
    }

    // ============================================
    // MEMBERSHIP
    // ============================================

    /// Add a member to an organization
    ///
    /// The caller must be the org account itself or hold the
    /// `manage_members` capability for the org's scope.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnknownOrganization`: Organization not found
    /// - `Unauthorized`: Caller lacks the capability
    /// - `DuplicateMember`: Account already a member
    pub fn add_member(env: Env, caller: Address, org: Address, account: Address) -> Result<(), Error> {
        caller.require_auth();

        if !env.storage().instance().has(&DataKey::Org(org.clone())) {
            return Err(Error::UnknownOrganization);
        }
        if !Self::is_authorized_manager(&env, &org, &caller)? {
            return Err(Error::Unauthorized);
        }

        let key = DataKey::Member(org.clone(), account.clone());
        if env.storage().instance().has(&key) {
            return Err(Error::DuplicateMember);
        }

        env.storage().instance().set(
            &key,
            &Member {
                account: account.clone(),
                added_at: env.ledger().timestamp(),
            },
        );

        env.events().publish(
            (Symbol::new(&env, "member_add"), org.clone()),
            MemberAddedEvent { org, account },
        );

        Ok(())
    }

    /// Remove a member from an organization
    ///
    /// Same authorization rule as `add_member`. Absence of the member is
    /// an error, not a no-op.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnknownOrganization`: Organization not found
    /// - `Unauthorized`: Caller lacks the capability
    /// - `UnknownMember`: Account is not a member
    pub fn remove_member(
        env: Env,
        caller: Address,
        org: Address,
        account: Address,
    ) -> Result<(), Error> {
        caller.require_auth();

        if !env.storage().instance().has(&DataKey::Org(org.clone())) {
            return Err(Error::UnknownOrganization);
        }
        if !Self::is_authorized_manager(&env, &org, &caller)? {
            return Err(Error::Unauthorized);
        }

        let key = DataKey::Member(org.clone(), account.clone());
        if !env.storage().instance().has(&key) {
            return Err(Error::UnknownMember);
        }

        env.storage().instance().remove(&key);

        env.events().publish(
            (Symbol::new(&env, "member_del"), org.clone()),
            MemberRemovedEvent { org, account },
        );

        Ok(())
    }

    /// Check membership
    pub fn is_member(env: Env, org: Address, account: Address) -> bool {
        env.storage()
            .instance()
            .has(&DataKey::Member(org, account))
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn subscription_active(env: &Env, org: &Address) -> Result<bool, Error> {
        let subscription: Address = env
            .storage()
            .instance()
            .get(&DataKey::SubscriptionContract)
            .ok_or(Error::NotInitialized)?;

        Ok(env.invoke_contract::<bool>(
            &subscription,
            &Symbol::new(env, "has_active"),
            vec![env, org.to_val()],
        ))
    }

    fn is_authorized_manager(env: &Env, org: &Address, caller: &Address) -> Result<bool, Error> {
        // Owner override: the org account manages its own members.
        if caller == org {
            return Ok(true);
        }

        let authority: Address = env
            .storage()
            .instance()
            .get(&DataKey::AuthorityContract)
            .ok_or(Error::NotInitialized)?;

        Ok(env.invoke_contract::<bool>(
            &authority,
            &Symbol::new(env, "check"),
            vec![
                env,
                org.to_val(),
                Symbol::new(env, PERMISSION_MANAGE_MEMBERS).into_val(env),
                caller.to_val(),
            ],
        ))
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::*;
    use authority::{Authority, AuthorityClient};
    use soroban_sdk::{
        testutils::{Address as _, Ledger, LedgerInfo},
        token::StellarAssetClient,
        Address, Env,
    };
    use std::format;
    use std::string::String as StdString;
    use subscription::{SubscriptionLedger, SubscriptionLedgerClient};

    const SCALE: i128 = 10_000_000;
    const PACKAGE_COST: i128 = 10 * SCALE;

    struct TestContext {
        env: Env,
        registry: OrgRegistryClient<'static>,
        authority: AuthorityClient<'static>,
        subscription: SubscriptionLedgerClient<'static>,
        org: Address,
        token: Address,
    }

    fn setup() -> TestContext {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let org = Address::generate(&env);
        let token_admin = Address::generate(&env);

        let authority_id = env.register_contract(None, Authority);
        let authority = AuthorityClient::new(&env, &authority_id);
        authority.initialize(&admin);

        let subscription_id = env.register_contract(None, SubscriptionLedger);
        let subscription = SubscriptionLedgerClient::new(&env, &subscription_id);
        subscription.initialize(&admin);

        let registry_id = env.register_contract(None, OrgRegistry);
        let registry = OrgRegistryClient::new(&env, &registry_id);
        registry.initialize(&admin, &subscription_id, &authority_id);

        let token = env
            .register_stellar_asset_contract_v2(token_admin)
            .address();
        StellarAssetClient::new(&env, &token).mint(&org, &(1_000_000i128 * SCALE));

        subscription.define_package(
            &Symbol::new(&env, "gold"),
            &String::from_str(&env, "Gold tier"),
            &1000u64,
            &3600u64,
            &PACKAGE_COST,
            &token,
            &true,
            &true,
        );

        set_time(&env, 1000);

        TestContext {
            env,
            registry,
            authority,
            subscription,
            org,
            token,
        }
    }

    fn set_time(env: &Env, timestamp: u64) {
        env.ledger().set(LedgerInfo {
            timestamp,
            protocol_version: 22,
            sequence_number: 10,
            network_id: Default::default(),
            base_reserve: 10,
            min_temp_entry_ttl: 10,
            min_persistent_entry_ttl: 10,
            max_entry_ttl: 3110400,
        });
    }

    fn strkey_of(addr: &Address) -> StdString {
        let s = addr.to_string();
        let mut buf = std::vec![0u8; s.len() as usize];
        s.copy_into_slice(&mut buf);
        StdString::from_utf8(buf).unwrap()
    }

    fn buy_package(ctx: &TestContext, org: &Address) {
        let memo = String::from_str(&ctx.env, &format!("{}:gold", strkey_of(org)));
        ctx.subscription
            .on_payment(org, &PACKAGE_COST, &ctx.token, &memo);
    }

    fn init_org(ctx: &TestContext, org: &Address, code: &str) {
        ctx.registry.init_org(
            org,
            &String::from_str(&ctx.env, code),
            &String::from_str(&ctx.env, "ipfs://image"),
            &String::from_str(&ctx.env, "Test Organization"),
        );
    }

    #[test]
    fn test_init_org_happy_path() {
        let ctx = setup();

        buy_package(&ctx, &ctx.org);

        let subscription = ctx.subscription.get_active_subscription(&ctx.org);
        assert_eq!(subscription.expires_at, 4600);

        init_org(&ctx, &ctx.org, "test");

        let organization = ctx.registry.get_organization(&ctx.org);
        assert_eq!(organization.org, ctx.org);
        assert_eq!(organization.org_code, Symbol::new(&ctx.env, "test"));
        assert_eq!(
            organization.display_name,
            String::from_str(&ctx.env, "Test Organization")
        );
        assert_eq!(
            organization.ipfs_image,
            String::from_str(&ctx.env, "ipfs://image")
        );
        assert_eq!(organization.created_at, 1000);
    }

    #[test]
    fn test_init_org_rejects_bad_code_length() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);

        for bad in ["abc", "abcde", ""] {
            let result = ctx.registry.try_init_org(
                &ctx.org,
                &String::from_str(&ctx.env, bad),
                &String::from_str(&ctx.env, "ipfs://image"),
                &String::from_str(&ctx.env, "Test Organization"),
            );
            assert_eq!(result, Err(Ok(Error::InvalidCodeLength)));
        }
    }

    #[test]
    fn test_init_org_rejects_bad_code_charset() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);

        for bad in ["Test", "ab1d", "ab-d"] {
            let result = ctx.registry.try_init_org(
                &ctx.org,
                &String::from_str(&ctx.env, bad),
                &String::from_str(&ctx.env, "ipfs://image"),
                &String::from_str(&ctx.env, "Test Organization"),
            );
            assert_eq!(result, Err(Ok(Error::InvalidCodeChar)));
        }
    }

    #[test]
    fn test_init_org_is_write_once() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        // Different inputs don't matter: the account is taken.
        let result = ctx.registry.try_init_org(
            &ctx.org,
            &String::from_str(&ctx.env, "othr"),
            &String::from_str(&ctx.env, "ipfs://other"),
            &String::from_str(&ctx.env, "Other Name"),
        );
        assert_eq!(result, Err(Ok(Error::OrganizationExists)));
    }

    #[test]
    fn test_init_org_rejects_duplicate_code() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let second_org = Address::generate(&ctx.env);
        StellarAssetClient::new(&ctx.env, &ctx.token)
            .mint(&second_org, &(100i128 * SCALE));
        buy_package(&ctx, &second_org);

        let result = ctx.registry.try_init_org(
            &second_org,
            &String::from_str(&ctx.env, "test"),
            &String::from_str(&ctx.env, "ipfs://image"),
            &String::from_str(&ctx.env, "Second Organization"),
        );
        assert_eq!(result, Err(Ok(Error::DuplicateOrgCode)));

        // A fresh code goes through.
        init_org(&ctx, &second_org, "scnd");
    }

    #[test]
    fn test_init_org_requires_subscription() {
        let ctx = setup();

        let result = ctx.registry.try_init_org(
            &ctx.org,
            &String::from_str(&ctx.env, "test"),
            &String::from_str(&ctx.env, "ipfs://image"),
            &String::from_str(&ctx.env, "Test Organization"),
        );
        assert_eq!(result, Err(Ok(Error::NoActiveSubscription)));
    }

    #[test]
    fn test_init_org_rejects_expired_subscription() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);

        set_time(&ctx.env, 4600);

        let result = ctx.registry.try_init_org(
            &ctx.org,
            &String::from_str(&ctx.env, "test"),
            &String::from_str(&ctx.env, "ipfs://image"),
            &String::from_str(&ctx.env, "Test Organization"),
        );
        assert_eq!(result, Err(Ok(Error::NoActiveSubscription)));
    }

    #[test]
    fn test_underpayment_leaves_init_gated() {
        let ctx = setup();

        let memo = String::from_str(&ctx.env, &format!("{}:gold", strkey_of(&ctx.org)));
        let result =
            ctx.subscription
                .try_on_payment(&ctx.org, &(PACKAGE_COST - 1), &ctx.token, &memo);
        assert_eq!(result, Err(Ok(subscription::Error::CostMismatch)));

        let result = ctx.registry.try_init_org(
            &ctx.org,
            &String::from_str(&ctx.env, "test"),
            &String::from_str(&ctx.env, "ipfs://image"),
            &String::from_str(&ctx.env, "Test Organization"),
        );
        assert_eq!(result, Err(Ok(Error::NoActiveSubscription)));
    }

    #[test]
    fn test_profile_updates() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        ctx.registry
            .set_display_name(&ctx.org, &String::from_str(&ctx.env, "Renamed"));
        ctx.registry
            .set_image(&ctx.org, &String::from_str(&ctx.env, "ipfs://new"));

        let organization = ctx.registry.get_organization(&ctx.org);
        assert_eq!(
            organization.display_name,
            String::from_str(&ctx.env, "Renamed")
        );
        assert_eq!(
            organization.ipfs_image,
            String::from_str(&ctx.env, "ipfs://new")
        );
        // The code never changes.
        assert_eq!(organization.org_code, Symbol::new(&ctx.env, "test"));
    }

    #[test]
    fn test_profile_update_requires_org() {
        let ctx = setup();

        let result = ctx
            .registry
            .try_set_display_name(&ctx.org, &String::from_str(&ctx.env, "Renamed"));
        assert_eq!(result, Err(Ok(Error::UnknownOrganization)));
    }

    #[test]
    fn test_add_member_by_org_account() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let member = Address::generate(&ctx.env);
        ctx.registry.add_member(&ctx.org, &ctx.org, &member);

        assert!(ctx.registry.is_member(&ctx.org, &member));
    }

    #[test]
    fn test_add_member_by_grantee() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let manager = Address::generate(&ctx.env);
        let member = Address::generate(&ctx.env);

        ctx.authority.grant(
            &ctx.org,
            &ctx.org,
            &Symbol::new(&ctx.env, "manage_members"),
            &manager,
        );

        ctx.registry.add_member(&manager, &ctx.org, &member);
        assert!(ctx.registry.is_member(&ctx.org, &member));
    }

    #[test]
    fn test_add_member_rejects_outsider() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let outsider = Address::generate(&ctx.env);
        let member = Address::generate(&ctx.env);

        let result = ctx.registry.try_add_member(&outsider, &ctx.org, &member);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
        assert!(!ctx.registry.is_member(&ctx.org, &member));
    }

    #[test]
    fn test_revoked_manager_cannot_add() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let manager = Address::generate(&ctx.env);
        let permission = Symbol::new(&ctx.env, "manage_members");

        ctx.authority.grant(&ctx.org, &ctx.org, &permission, &manager);
        ctx.registry
            .add_member(&manager, &ctx.org, &Address::generate(&ctx.env));

        ctx.authority.revoke(&ctx.org, &ctx.org, &permission, &manager);

        let member = Address::generate(&ctx.env);
        let result = ctx.registry.try_add_member(&manager, &ctx.org, &member);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));
    }

    #[test]
    fn test_add_member_rejects_unknown_org() {
        let ctx = setup();

        let member = Address::generate(&ctx.env);
        let result = ctx.registry.try_add_member(&ctx.org, &ctx.org, &member);
        assert_eq!(result, Err(Ok(Error::UnknownOrganization)));
    }

    #[test]
    fn test_add_member_rejects_duplicate() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let member = Address::generate(&ctx.env);
        ctx.registry.add_member(&ctx.org, &ctx.org, &member);

        let result = ctx.registry.try_add_member(&ctx.org, &ctx.org, &member);
        assert_eq!(result, Err(Ok(Error::DuplicateMember)));
    }

    #[test]
    fn test_member_round_trip() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let member = Address::generate(&ctx.env);
        ctx.registry.add_member(&ctx.org, &ctx.org, &member);
        ctx.registry.remove_member(&ctx.org, &ctx.org, &member);

        assert!(!ctx.registry.is_member(&ctx.org, &member));

        let result = ctx.registry.try_remove_member(&ctx.org, &ctx.org, &member);
        assert_eq!(result, Err(Ok(Error::UnknownMember)));
    }

    #[test]
    fn test_unauthorized_removal_leaves_row() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let member = Address::generate(&ctx.env);
        ctx.registry.add_member(&ctx.org, &ctx.org, &member);

        let outsider = Address::generate(&ctx.env);
        let result = ctx.registry.try_remove_member(&outsider, &ctx.org, &member);
        assert_eq!(result, Err(Ok(Error::Unauthorized)));

        assert!(ctx.registry.is_member(&ctx.org, &member));
    }

    #[test]
    fn test_membership_is_scoped_per_org() {
        let ctx = setup();
        buy_package(&ctx, &ctx.org);
        init_org(&ctx, &ctx.org, "test");

        let second_org = Address::generate(&ctx.env);
        StellarAssetClient::new(&ctx.env, &ctx.token)
            .mint(&second_org, &(100i128 * SCALE));
        buy_package(&ctx, &second_org);
        init_org(&ctx, &second_org, "scnd");

        let member = Address::generate(&ctx.env);
        ctx.registry.add_member(&ctx.org, &ctx.org, &member);

        assert!(ctx.registry.is_member(&ctx.org, &member));
        assert!(!ctx.registry.is_member(&second_org, &member));
    }
}
