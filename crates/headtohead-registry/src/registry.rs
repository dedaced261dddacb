//! Asset registry seam and the in-memory card registry.
//!
//! The engine only ever talks to a registry through [`AssetRegistry`]. The
//! registry is the source of truth for who owns which card; the engine
//! re-reads it at the start of every call instead of caching answers.

use std::collections::{BTreeMap, HashSet};

use headtohead_types::{Address, CardAttributes, HeadToHeadError, Result, TokenId};

/// The narrow interface the engine consumes from an asset registry.
pub trait AssetRegistry {
    /// Current owner of `token_id`.
    fn owner_of(&self, token_id: TokenId) -> Result<Address>;

    /// Has `owner` granted `operator` authority over all of its cards?
    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool;

    /// Move `token_id` from `from` to `to`, acting as `operator`.
    fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<()>;

    /// The card's four attribute values.
    fn attributes(&self, token_id: TokenId) -> Result<CardAttributes>;

    /// Number of cards ever minted.
    fn total_supply(&self) -> u64;
}

#[derive(Debug, Clone)]
struct CardRecord {
    owner: Address,
    attributes: CardAttributes,
}

/// In-memory card registry.
///
/// Mints cards with sequential ids from 0 and tracks owner-wide operator
/// approvals. Only the `minter` account may mint or change attributes.
pub struct CardRegistry {
    minter: Address,
    cards: BTreeMap<TokenId, CardRecord>,
    /// `(owner, operator)` pairs with blanket approval.
    approvals: HashSet<(Address, Address)>,
    next_token: TokenId,
}

impl CardRegistry {
    /// Create an empty registry administered by `minter`.
    #[must_use]
    pub fn new(minter: Address) -> Self {
        Self {
            minter,
            cards: BTreeMap::new(),
            approvals: HashSet::new(),
            next_token: TokenId(0),
        }
    }

    /// Mint a new card to `to`.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the minter
    /// - `TransferFailed` if `to` is the zero address
    pub fn mint(
        &mut self,
        caller: Address,
        to: Address,
        attributes: CardAttributes,
    ) -> Result<TokenId> {
        self.ensure_minter(caller)?;
        if to.is_zero() {
            return Err(HeadToHeadError::TransferFailed {
                reason: "cannot mint to the zero address".into(),
            });
        }

        let token_id = self.next_token;
        self.next_token = token_id.next();
        self.cards.insert(
            token_id,
            CardRecord {
                owner: to,
                attributes,
            },
        );
        tracing::debug!(token = %token_id, owner = %to, "Card minted");
        Ok(token_id)
    }

    /// Overwrite a card's attributes.
    pub fn set_attributes(
        &mut self,
        caller: Address,
        token_id: TokenId,
        attributes: CardAttributes,
    ) -> Result<()> {
        self.ensure_minter(caller)?;
        let card = self
            .cards
            .get_mut(&token_id)
            .ok_or(HeadToHeadError::TokenNotFound(token_id))?;
        card.attributes = attributes;
        Ok(())
    }

    /// Grant or revoke `operator`'s authority over all of `owner`'s cards.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.approvals.insert((owner, operator));
        } else {
            self.approvals.remove(&(owner, operator));
        }
        tracing::debug!(%owner, %operator, approved, "Approval for all updated");
    }

    /// Every card `owner` currently holds, in id order.
    #[must_use]
    pub fn tokens_of_owner(&self, owner: Address) -> Vec<TokenId> {
        self.cards
            .iter()
            .filter(|(_, card)| card.owner == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of cards `owner` currently holds.
    #[must_use]
    pub fn balance_of(&self, owner: Address) -> usize {
        self.cards.values().filter(|card| card.owner == owner).count()
    }

    fn ensure_minter(&self, caller: Address) -> Result<()> {
        if caller == self.minter {
            Ok(())
        } else {
            Err(HeadToHeadError::Unauthorized(caller))
        }
    }

    fn card(&self, token_id: TokenId) -> Result<&CardRecord> {
        self.cards
            .get(&token_id)
            .ok_or(HeadToHeadError::TokenNotFound(token_id))
    }
}

impl AssetRegistry for CardRegistry {
    fn owner_of(&self, token_id: TokenId) -> Result<Address> {
        self.card(token_id).map(|card| card.owner)
    }

    fn is_approved_for_all(&self, owner: Address, operator: Address) -> bool {
        self.approvals.contains(&(owner, operator))
    }

    fn transfer_from(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        token_id: TokenId,
    ) -> Result<()> {
        if to.is_zero() {
            return Err(HeadToHeadError::TransferFailed {
                reason: format!("cannot transfer {token_id} to the zero address"),
            });
        }
        if operator != from && !self.is_approved_for_all(from, operator) {
            return Err(HeadToHeadError::NotApproved { owner: from, operator });
        }

        let card = self
            .cards
            .get_mut(&token_id)
            .ok_or(HeadToHeadError::TokenNotFound(token_id))?;
        if card.owner != from {
            return Err(HeadToHeadError::TransferFailed {
                reason: format!("{token_id} is owned by {}, not {from}", card.owner),
            });
        }

        card.owner = to;
        tracing::debug!(token = %token_id, %from, %to, %operator, "Card transferred");
        Ok(())
    }

    fn attributes(&self, token_id: TokenId) -> Result<CardAttributes> {
        self.card(token_id).map(|card| card.attributes)
    }

    fn total_supply(&self) -> u64 {
        self.next_token.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (CardRegistry, Address) {
        let minter = Address::from_low_u64(0xc0);
        (CardRegistry::new(minter), minter)
    }

    #[test]
    fn mint_assigns_sequential_ids() {
        let (mut reg, minter) = setup();
        let alice = Address::random();
        let a = reg.mint(minter, alice, CardAttributes::default()).unwrap();
        let b = reg.mint(minter, alice, CardAttributes::default()).unwrap();
        assert_eq!(a, TokenId(0));
        assert_eq!(b, TokenId(1));
        assert_eq!(reg.total_supply(), 2);
        assert_eq!(reg.tokens_of_owner(alice), vec![a, b]);
        assert_eq!(reg.balance_of(alice), 2);
    }

    #[test]
    fn only_minter_mints() {
        let (mut reg, _) = setup();
        let stranger = Address::random();
        let err = reg
            .mint(stranger, stranger, CardAttributes::default())
            .unwrap_err();
        assert!(matches!(err, HeadToHeadError::Unauthorized(a) if a == stranger));
        assert_eq!(reg.total_supply(), 0);
    }

    #[test]
    fn attributes_can_be_updated_by_minter() {
        let (mut reg, minter) = setup();
        let token = reg
            .mint(minter, Address::random(), CardAttributes::new(1, 1, 1, 1))
            .unwrap();
        reg.set_attributes(minter, token, CardAttributes::new(10, 10, 10, 10))
            .unwrap();
        assert_eq!(
            reg.attributes(token).unwrap(),
            CardAttributes::new(10, 10, 10, 10)
        );
        assert!(reg
            .set_attributes(minter, TokenId(99), CardAttributes::default())
            .is_err());
    }

    #[test]
    fn unknown_token_errors() {
        let (reg, _) = setup();
        let err = reg.owner_of(TokenId(3)).unwrap_err();
        assert!(matches!(err, HeadToHeadError::TokenNotFound(TokenId(3))));
    }

    #[test]
    fn approval_toggles() {
        let (mut reg, _) = setup();
        let owner = Address::random();
        let operator = Address::random();
        assert!(!reg.is_approved_for_all(owner, operator));
        reg.set_approval_for_all(owner, operator, true);
        assert!(reg.is_approved_for_all(owner, operator));
        assert!(!reg.is_approved_for_all(operator, owner));
        reg.set_approval_for_all(owner, operator, false);
        assert!(!reg.is_approved_for_all(owner, operator));
    }

    #[test]
    fn approved_operator_transfers() {
        let (mut reg, minter) = setup();
        let alice = Address::random();
        let bob = Address::random();
        let operator = Address::random();
        let token = reg.mint(minter, alice, CardAttributes::default()).unwrap();

        let err = reg.transfer_from(operator, alice, bob, token).unwrap_err();
        assert!(matches!(err, HeadToHeadError::NotApproved { .. }));
        assert_eq!(reg.owner_of(token).unwrap(), alice);

        reg.set_approval_for_all(alice, operator, true);
        reg.transfer_from(operator, alice, bob, token).unwrap();
        assert_eq!(reg.owner_of(token).unwrap(), bob);
    }

    #[test]
    fn transfer_from_wrong_owner_fails() {
        let (mut reg, minter) = setup();
        let alice = Address::random();
        let bob = Address::random();
        let token = reg.mint(minter, alice, CardAttributes::default()).unwrap();

        reg.set_approval_for_all(bob, bob, true);
        let err = reg.transfer_from(bob, bob, alice, token).unwrap_err();
        assert!(matches!(err, HeadToHeadError::TransferFailed { .. }));
        assert_eq!(reg.owner_of(token).unwrap(), alice);
    }

    #[test]
    fn transfer_to_zero_rejected() {
        let (mut reg, minter) = setup();
        let alice = Address::random();
        let token = reg.mint(minter, alice, CardAttributes::default()).unwrap();
        assert!(reg.transfer_from(alice, alice, Address::ZERO, token).is_err());
    }
}
