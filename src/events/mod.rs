pub mod address;
pub mod hex_int;
pub mod records;

use borsh::{BorshDeserialize, BorshSerialize};
use strum::{IntoEnumIterator, VariantNames};
use tracing::debug;

use crate::error::Error;

pub use address::Address;
pub use records::*;

/// Tag Anchor prefixes to every self-CPI event instruction (`sha256("anchor:event")[..8]`, LE).
pub const EVENT_IX_TAG: [u8; 8] = [0xe4, 0x45, 0xa5, 0x2e, 0x51, 0xcb, 0x9a, 0x1d];
pub const EVENT_IX_TAG_LEN: usize = 8;
pub const DISCRIMINATOR_LEN: usize = 8;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
pub enum EventKind {
    InitializedPool,
    CreatePurchaseAuthorisation,
    PurchasedPresale,
    CheckClaim,
    ClaimRewards,
    LaunchTokenAmm,
    WithdrawLpToken,
    Withdraw,
    CreatorClaimVesting,
    CreatorWithdrawLpToken,
}

impl EventKind {
    /// Anchor event discriminator: `sha256("event:<Name>")[..8]`.
    pub fn discriminator(self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Self::InitializedPool => [129, 123, 179, 229, 161, 231, 12, 247],
            Self::CreatePurchaseAuthorisation => [134, 112, 119, 170, 147, 121, 114, 57],
            Self::PurchasedPresale => [160, 55, 197, 247, 71, 138, 206, 25],
            Self::CheckClaim => [96, 226, 191, 226, 0, 55, 81, 62],
            Self::ClaimRewards => [218, 57, 135, 162, 126, 124, 190, 79],
            Self::LaunchTokenAmm => [142, 15, 249, 132, 171, 211, 230, 113],
            Self::WithdrawLpToken => [52, 8, 212, 1, 75, 59, 101, 97],
            Self::Withdraw => [192, 241, 201, 217, 70, 150, 90, 247],
            Self::CreatorClaimVesting => [89, 242, 75, 80, 4, 116, 8, 210],
            Self::CreatorWithdrawLpToken => [100, 200, 185, 29, 123, 171, 50, 50],
        }
    }

    pub fn from_discriminator(discriminator: &[u8; DISCRIMINATOR_LEN]) -> Option<Self> {
        Self::iter().find(|kind| kind.discriminator() == *discriminator)
    }

    fn decode_body(self, body: &mut &[u8]) -> std::io::Result<DecodedEvent> {
        Ok(match self {
            Self::InitializedPool => {
                DecodedEvent::InitializedPool(InitializedPoolEvent::deserialize(body)?)
            }
            Self::CreatePurchaseAuthorisation => DecodedEvent::CreatePurchaseAuthorisation(
                CreatePurchaseAuthorisationEvent::deserialize(body)?,
            ),
            Self::PurchasedPresale => {
                DecodedEvent::PurchasedPresale(PurchasedPresaleEvent::deserialize(body)?)
            }
            Self::CheckClaim => DecodedEvent::CheckClaim(CheckClaimEvent::deserialize(body)?),
            Self::ClaimRewards => DecodedEvent::ClaimRewards(ClaimRewardsEvent::deserialize(body)?),
            Self::LaunchTokenAmm => {
                DecodedEvent::LaunchTokenAmm(LaunchTokenAmmEvent::deserialize(body)?)
            }
            Self::WithdrawLpToken => {
                DecodedEvent::WithdrawLpToken(WithdrawLpTokenEvent::deserialize(body)?)
            }
            Self::Withdraw => DecodedEvent::Withdraw(WithdrawEvent::deserialize(body)?),
            Self::CreatorClaimVesting => {
                DecodedEvent::CreatorClaimVesting(CreatorClaimVestingEvent::deserialize(body)?)
            }
            Self::CreatorWithdrawLpToken => DecodedEvent::CreatorWithdrawLpToken(
                CreatorWithdrawLpTokenEvent::deserialize(body)?,
            ),
        })
    }
}

/// Every event the presale program emits, with typed fields.
///
/// Serde uses the decoder's named-wrapper form `{"EventName": {..}}`.
#[derive(
    Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, strum_macros::VariantNames,
)]
pub enum DecodedEvent {
    InitializedPool(InitializedPoolEvent),
    CreatePurchaseAuthorisation(CreatePurchaseAuthorisationEvent),
    PurchasedPresale(PurchasedPresaleEvent),
    CheckClaim(CheckClaimEvent),
    ClaimRewards(ClaimRewardsEvent),
    LaunchTokenAmm(LaunchTokenAmmEvent),
    WithdrawLpToken(WithdrawLpTokenEvent),
    Withdraw(WithdrawEvent),
    CreatorClaimVesting(CreatorClaimVestingEvent),
    CreatorWithdrawLpToken(CreatorWithdrawLpTokenEvent),
}

impl DecodedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::InitializedPool(_) => EventKind::InitializedPool,
            Self::CreatePurchaseAuthorisation(_) => EventKind::CreatePurchaseAuthorisation,
            Self::PurchasedPresale(_) => EventKind::PurchasedPresale,
            Self::CheckClaim(_) => EventKind::CheckClaim,
            Self::ClaimRewards(_) => EventKind::ClaimRewards,
            Self::LaunchTokenAmm(_) => EventKind::LaunchTokenAmm,
            Self::WithdrawLpToken(_) => EventKind::WithdrawLpToken,
            Self::Withdraw(_) => EventKind::Withdraw,
            Self::CreatorClaimVesting(_) => EventKind::CreatorClaimVesting,
            Self::CreatorWithdrawLpToken(_) => EventKind::CreatorWithdrawLpToken,
        }
    }

    /// The pool every event is scoped to.
    pub fn pool(&self) -> &Address {
        match self {
            Self::InitializedPool(e) => &e.pool,
            Self::CreatePurchaseAuthorisation(e) => &e.pool,
            Self::PurchasedPresale(e) => &e.pool,
            Self::CheckClaim(e) => &e.pool,
            Self::ClaimRewards(e) => &e.pool,
            Self::LaunchTokenAmm(e) => &e.pool,
            Self::WithdrawLpToken(e) => &e.pool,
            Self::Withdraw(e) => &e.pool,
            Self::CreatorClaimVesting(e) => &e.pool,
            Self::CreatorWithdrawLpToken(e) => &e.pool,
        }
    }

    /// Encode as self-CPI instruction data: tag, discriminator, Borsh body.
    pub fn to_instruction_data(&self) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(EVENT_IX_TAG_LEN + DISCRIMINATOR_LEN + 128);
        out.extend_from_slice(&EVENT_IX_TAG);
        out.extend_from_slice(&self.kind().discriminator());
        let written = match self {
            Self::InitializedPool(e) => e.serialize(&mut out),
            Self::CreatePurchaseAuthorisation(e) => e.serialize(&mut out),
            Self::PurchasedPresale(e) => e.serialize(&mut out),
            Self::CheckClaim(e) => e.serialize(&mut out),
            Self::ClaimRewards(e) => e.serialize(&mut out),
            Self::LaunchTokenAmm(e) => e.serialize(&mut out),
            Self::WithdrawLpToken(e) => e.serialize(&mut out),
            Self::Withdraw(e) => e.serialize(&mut out),
            Self::CreatorClaimVesting(e) => e.serialize(&mut out),
            Self::CreatorWithdrawLpToken(e) => e.serialize(&mut out),
        };
        written.map_err(|e| Error::Parse {
            reason: format!("failed to encode {} event: {e}", self.kind()),
        })?;
        Ok(out)
    }

    /// Base58 form of [`Self::to_instruction_data`], as webhooks deliver it.
    pub fn to_base58(&self) -> Result<String, Error> {
        Ok(bs58::encode(self.to_instruction_data()?).into_string())
    }
}

/// Decode the base58 `data` of a self-CPI event instruction.
///
/// `Ok(None)` means the discriminator is not one of this program's events.
pub fn decode_event_data(data: &str) -> Result<Option<DecodedEvent>, Error> {
    let bytes = bs58::decode(data).into_vec().map_err(|e| Error::Decode {
        reason: format!("invalid base58 event data: {e}"),
    })?;
    decode_event_bytes(&bytes)
}

/// Decode raw self-CPI instruction bytes. The leading instruction tag is skipped, not checked.
pub fn decode_event_bytes(bytes: &[u8]) -> Result<Option<DecodedEvent>, Error> {
    let Some((discriminator, mut body)) = bytes
        .get(EVENT_IX_TAG_LEN..)
        .and_then(|event| event.split_first_chunk::<DISCRIMINATOR_LEN>())
    else {
        return Err(Error::Decode {
            reason: format!(
                "event data too short: {} bytes, need at least {}",
                bytes.len(),
                EVENT_IX_TAG_LEN + DISCRIMINATOR_LEN
            ),
        });
    };

    let Some(kind) = EventKind::from_discriminator(discriminator) else {
        debug!(?discriminator, "unknown event discriminator");
        return Ok(None);
    };

    kind.decode_body(&mut body)
        .map(Some)
        .map_err(|e| Error::Decode {
            reason: format!("failed to decode {kind} body: {e}"),
        })
}

/// Resolve a decoder field map of the form `{"EventName": {..}}`.
///
/// Returns `None` for names this program does not emit and `Some(Err)` when a
/// known event carries malformed fields.
pub fn resolve_field_map(fields: &serde_json::Value) -> Option<Result<DecodedEvent, Error>> {
    match serde_json::from_value::<DecodedEvent>(fields.clone()) {
        Ok(event) => Some(Ok(event)),
        Err(err) => {
            if !contains_known_variant(fields, DecodedEvent::VARIANTS) {
                return None;
            }
            Some(Err(Error::Protocol {
                reason: format!("failed to parse event field map: {err}"),
            }))
        }
    }
}

pub fn contains_known_variant(value: &serde_json::Value, variants: &[&str]) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.keys().any(|key| variants.contains(&key.as_str())))
}

/// Converts an unsigned event amount into the store's native signed integer.
pub fn checked_u64_to_i64(value: u64, field: &str) -> Result<i64, Error> {
    i64::try_from(value).map_err(|_| Error::Protocol {
        reason: format!("{field} value {value} exceeds i64::MAX"),
    })
}
