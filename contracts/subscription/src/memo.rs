use crate::error::Error;

use soroban_sdk::{Address, Env, String, Symbol};

/// Strkey-encoded addresses are always 56 characters.
const STRKEY_LEN: usize = 56;
/// Symbols are capped at 32 characters by the host.
const MAX_PACKAGE_LEN: usize = 32;
/// Longest well-formed memo: strkey + ':' + package name.
const MAX_MEMO_LEN: usize = STRKEY_LEN + 1 + MAX_PACKAGE_LEN;

/// Parse a payment memo of the form `"<org_strkey>:<package_name>"`.
///
/// Rejects anything that is not exactly two fields: the first a
/// well-shaped strkey address, the second a valid symbol name.
///
/// # Errors
/// - `MalformedMemo`: the memo does not match the expected shape
pub fn parse_memo(env: &Env, memo: &String) -> Result<(Address, Symbol), Error> {
    let len = memo.len() as usize;
    if len == 0 || len > MAX_MEMO_LEN {
        return Err(Error::MalformedMemo);
    }

    let mut buf = [0u8; MAX_MEMO_LEN];
    let bytes = &mut buf[..len];
    memo.copy_into_slice(bytes);

    let mut split = None;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b':' {
            if split.is_some() {
                // Exactly two fields.
                return Err(Error::MalformedMemo);
            }
            split = Some(i);
        }
    }
    let split = split.ok_or(Error::MalformedMemo)?;

    let (org_part, rest) = bytes.split_at(split);
    let package_part = &rest[1..];

    if org_part.len() != STRKEY_LEN
        || !org_part
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return Err(Error::MalformedMemo);
    }
    if package_part.is_empty()
        || package_part.len() > MAX_PACKAGE_LEN
        || !package_part
            .iter()
            .all(|b| b.is_ascii_alphanumeric() || *b == b'_')
    {
        return Err(Error::MalformedMemo);
    }

    // Both parts are ASCII-checked above, so from_utf8 cannot fail.
    let org_str = core::str::from_utf8(org_part).map_err(|_| Error::MalformedMemo)?;
    let package_str = core::str::from_utf8(package_part).map_err(|_| Error::MalformedMemo)?;

    // A well-shaped but checksum-invalid strkey aborts in the host here,
    // which still rolls the whole invocation back.
    let org = Address::from_string(&String::from_str(env, org_str));
    let package = Symbol::new(env, package_str);

    Ok((org, package))
}
