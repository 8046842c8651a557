use crate::error::Error;

use soroban_sdk::{Env, String, Symbol};

pub const ORG_CODE_LEN: usize = 4;

/// Validate an org code: exactly 4 lowercase ASCII alphabetic characters.
///
/// Returns the code as a `Symbol`, ready to serve as the index key.
///
/// # Errors
/// - `InvalidCodeLength`: not exactly 4 characters
/// - `InvalidCodeChar`: a character outside `a`..`z`
pub fn validate_org_code(env: &Env, code: &String) -> Result<Symbol, Error> {
    if code.len() as usize != ORG_CODE_LEN {
        return Err(Error::InvalidCodeLength);
    }

    let mut buf = [0u8; ORG_CODE_LEN];
    code.copy_into_slice(&mut buf);

    let code_str = core::str::from_utf8(&buf).map_err(|_| Error::InvalidCodeChar)?;
    if !code_str.bytes().all(|b| b.is_ascii_lowercase()) {
        return Err(Error::InvalidCodeChar);
    }

    Ok(Symbol::new(env, code_str))
}
