#![no_std]

mod error;
mod events;
mod storage;

pub use error::Error;
use events::{GrantEvent, RevokeEvent};
use storage::DataKey;

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

#[contract]
pub struct Authority;

#[contractimpl]
impl Authority {
    /// Initialize the capability store
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

    /// Grant `permission` within `scope` to `grantee`
    ///
    /// Idempotent: granting an existing capability is a no-op.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is neither the scope account nor the admin
    pub fn grant(
        env: Env,
        caller: Address,
        scope: Address,
        permission: Symbol,
        grantee: Address,
    ) -> Result<(), Error> {
        Self::check_grantor(&env, &caller, &scope)?;

        env.storage().instance().set(
            &DataKey::Grant(scope.clone(), permission.clone(), grantee.clone()),
            &true,
        );

        env.events().publish(
            (Symbol::new(&env, "grant"), scope.clone()),
            GrantEvent {
                scope,
                permission,
                grantee,
            },
        );

        Ok(())
    }

    /// Revoke `permission` within `scope` from `grantee`
    ///
    /// Idempotent: revoking an absent capability is a no-op.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `Unauthorized`: Caller is neither the scope account nor the admin
    pub fn revoke(
        env: Env,
        caller: Address,
        scope: Address,
        permission: Symbol,
        grantee: Address,
    ) -> Result<(), Error> {
        Self::check_grantor(&env, &caller, &scope)?;

        env.storage().instance().remove(&DataKey::Grant(
            scope.clone(),
            permission.clone(),
            grantee.clone(),
        ));

        env.events().publish(
            (Symbol::new(&env, "revoke"), scope.clone()),
            RevokeEvent {
                scope,
                permission,
                grantee,
            },
        );

        Ok(())
    }

    /// Check whether `grantee` holds `permission` within `scope`
    ///
    /// Pure read. Absence of a grant is deny.
    pub fn check(env: Env, scope: Address, permission: Symbol, grantee: Address) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Grant(scope, permission, grantee))
            .unwrap_or(false)
    }

    fn check_grantor(env: &Env, caller: &Address, scope: &Address) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;

        caller.require_auth();

        if caller != scope && caller != &admin {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}
