//! # Ethereum Personal-Message Signatures
//!
//! Recovers the signer of an EIP-191 (`personal_sign`) message, the scheme
//! used by `web3.eth.accounts.sign` and `ethers` `signMessage`:
//!
//! ```text
//! digest  = keccak256("\x19Ethereum Signed Message:\n" ‖ decimal(len(m)) ‖ m)
//! pubkey  = secp256k1_recover(digest, r ‖ s, v - 27)
//! address = keccak256(pubkey[1..65])[12..32]
//! ```
//!
//! Signatures are 65 bytes, `r ‖ s ‖ v`. Only low-s signatures are
//! accepted, which is what every standard signer emits. `r` must be the
//! x-coordinate of a curve point; the host traps on any other value, so
//! it is checked here first.

use k256::elliptic_curve::point::DecompressPoint;
use k256::elliptic_curve::subtle::Choice;
use k256::{AffinePoint, FieldBytes};
use soroban_sdk::{crypto::Hash, Bytes, BytesN, Env};

use crate::CommonError;

const PERSONAL_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LEN: u32 = 65;

/// secp256k1 group order `n`.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// `n / 2`, the largest accepted `s`.
const HALF_CURVE_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46, 0x68, 0x1b, 0x20, 0xa0,
];

fn decimal(mut n: u32, out: &mut [u8; 10]) -> &[u8] {
    let mut i = out.len();
    loop {
        i -= 1;
        out[i] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    &out[i..]
}

/// EIP-191 digest of `message`.
pub fn hash_personal_message(env: &Env, message: &Bytes) -> Hash<32> {
    let mut digits = [0u8; 10];
    let mut buf = Bytes::from_slice(env, PERSONAL_PREFIX);
    buf.extend_from_slice(decimal(message.len(), &mut digits));
    buf.append(message);
    env.crypto().keccak256(&buf)
}

/// Ethereum address of an uncompressed (`0x04 ‖ x ‖ y`) public key.
pub fn address_from_public_key(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
    let raw = public_key.to_array();
    let hash = env.crypto().keccak256(&Bytes::from_slice(env, &raw[1..])).to_array();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &address)
}

fn is_zero(scalar: &[u8; 32]) -> bool {
    scalar.iter().all(|b| *b == 0)
}

/// `true` when some curve point has x-coordinate `x`. Either parity works:
/// `(x, y)` on the curve implies `(x, -y)` is too.
fn is_curve_x(x: &[u8; 32]) -> bool {
    AffinePoint::decompress(&FieldBytes::from(*x), Choice::from(0))
        .is_some()
        .into()
}

/// Splits `r ‖ s ‖ v` into the compact signature and a recovery id,
/// rejecting anything the host recovery would trap on.
fn split_signature(env: &Env, signature: &Bytes) -> Result<(BytesN<64>, u32), CommonError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(CommonError::InvalidSignature);
    }
    let mut raw = [0u8; 65];
    signature.copy_into_slice(&mut raw);

    let recovery_id = match raw[64] {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CommonError::InvalidSignature),
    };

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&raw[..32]);
    s.copy_from_slice(&raw[32..64]);

    // Big-endian arrays compare numerically.
    if is_zero(&r) || r >= CURVE_ORDER || is_zero(&s) || s > HALF_CURVE_ORDER {
        return Err(CommonError::InvalidSignature);
    }
    if !is_curve_x(&r) {
        return Err(CommonError::InvalidSignature);
    }

    let mut compact = [0u8; 64];
    compact.copy_from_slice(&raw[..64]);
    Ok((BytesN::from_array(env, &compact), recovery_id))
}

/// Recovers the address that signed `message` under EIP-191.
///
/// This does not know which address is expected; callers compare the
/// result themselves.
///
/// # Errors
/// [`CommonError::InvalidSignature`] if the signature is not 65 bytes, has
/// an unknown `v`, out-of-range `r`/`s`, an `r` off the curve, or recovers
/// to the zero address.
pub fn recover_signer(
    env: &Env,
    message: &Bytes,
    signature: &Bytes,
) -> Result<BytesN<20>, CommonError> {
    let (compact, recovery_id) = split_signature(env, signature)?;
    let digest = hash_personal_message(env, message);
    let public_key = env
        .crypto()
        .secp256k1_recover(&digest, &compact, recovery_id);
    let address = address_from_public_key(env, &public_key);
    if address.to_array() == [0u8; 20] {
        return Err(CommonError::InvalidSignature);
    }
    Ok(address)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
