//! Confirmation check shared by highlighting, edit interception and posting.

use mentions_types::{KnownEntitySet, Token};
use mentions_util::looks_like_email;

/// Known entities viewed through the optional email-shape requirement.
#[derive(Clone, Copy, Debug)]
pub struct ConfirmedEntities<'a> {
    entities: &'a KnownEntitySet,
    require_email_shape: bool,
}

impl<'a> ConfirmedEntities<'a> {
    pub fn new(entities: &'a KnownEntitySet, require_email_shape: bool) -> Self {
        Self {
            entities,
            require_email_shape,
        }
    }

    pub fn entities(&self) -> &'a KnownEntitySet {
        self.entities
    }

    /// Whether `text` is a known entity (and email shaped, when required).
    pub fn is_confirmed(&self, text: &str) -> bool {
        self.entities.contains(text) && (!self.require_email_shape || looks_like_email(text))
    }

    /// Whether `token` was carved out as an entity and is still confirmed.
    pub fn is_confirmed_token(&self, token: &Token) -> bool {
        token.is_tagged_entity() && self.is_confirmed(&token.text)
    }
}
