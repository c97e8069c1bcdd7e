//! # Highlighting
//!
//! Assigns a style to each token through an ordered chain of rules. The first
//! rule whose predicate holds claims the token; later rules never see it.
//!
//! The standard chain is:
//!
//! 1. `Default`: not under the cursor and not a confirmed entity
//! 2. `TaggedEntity`: a confirmed entity, even while the cursor sits on it
//! 3. `UnderCursor`: under the cursor and not a confirmed entity
//!
//! Highlighting is a pure function of the token sequence, the cursor and the
//! known entities, so it is recomputed wholesale after every change.

use mentions_types::{HighlightKind, HighlightedSpan, StyledRun, Token, TokenStyle};
use mentions_util::CursorPolicy;

use crate::{config::HighlightPalette, confirmed::ConfirmedEntities};

/// One link of the highlight chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightRule {
    pub kind: HighlightKind,
    pub style: TokenStyle,
}

impl HighlightRule {
    pub fn new(kind: HighlightKind, style: TokenStyle) -> Self {
        Self { kind, style }
    }

    /// Whether this rule claims `token` for a cursor at `cursor`.
    pub fn matches(&self, token: &Token, cursor: usize, confirmed: &ConfirmedEntities<'_>) -> bool {
        let under_cursor = CursorPolicy::HighlightEdit.contains(token, cursor);
        let is_confirmed = confirmed.is_confirmed(&token.text);
        match self.kind {
            HighlightKind::Default => !under_cursor && !is_confirmed,
            HighlightKind::TaggedEntity => is_confirmed,
            HighlightKind::UnderCursor => under_cursor && !is_confirmed,
        }
    }
}

/// Ordered, first-match-wins highlight chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightDispatcher {
    rules: Vec<HighlightRule>,
}

impl Default for HighlightDispatcher {
    fn default() -> Self {
        Self::from_palette(&HighlightPalette::default())
    }
}

impl HighlightDispatcher {
    /// Standard three-rule chain styled from `palette`.
    pub fn from_palette(palette: &HighlightPalette) -> Self {
        Self::with_rules(vec![
            HighlightRule::new(HighlightKind::Default, palette.default_style()),
            HighlightRule::new(HighlightKind::TaggedEntity, palette.confirmed_style()),
            HighlightRule::new(HighlightKind::UnderCursor, palette.under_cursor_style()),
        ])
    }

    pub fn with_rules(rules: Vec<HighlightRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[HighlightRule] {
        &self.rules
    }

    /// First rule that claims `token`, if any.
    pub fn rule_for(&self, token: &Token, cursor: usize, confirmed: &ConfirmedEntities<'_>) -> Option<&HighlightRule> {
        self.rules.iter().find(|rule| rule.matches(token, cursor, confirmed))
    }

    /// Style decisions for every claimed token, in token order.
    pub fn highlight(&self, tokens: &[Token], cursor: usize, confirmed: &ConfirmedEntities<'_>) -> Vec<HighlightedSpan> {
        tokens
            .iter()
            .filter_map(|token| {
                self.rule_for(token, cursor, confirmed).map(|rule| HighlightedSpan {
                    token_id: token.id,
                    start: token.start,
                    length: token.length,
                    kind: rule.kind,
                    style: rule.style,
                })
            })
            .collect()
    }

    /// Partition `text` into styled and unstyled runs covering every byte.
    ///
    /// Adjacent tokens stay separate runs even when they share a style, so
    /// a confirmed entity glued to punctuation keeps its own run.
    pub fn styled_runs(&self, text: &str, tokens: &[Token], cursor: usize, confirmed: &ConfirmedEntities<'_>) -> Vec<StyledRun> {
        let mut runs = Vec::with_capacity(tokens.len() * 2 + 1);
        let mut position = 0usize;

        for token in tokens {
            if token.start > position {
                runs.push(unstyled_run(position, token.start));
            }
            let rule = self.rule_for(token, cursor, confirmed);
            runs.push(StyledRun {
                start: token.start,
                length: token.length,
                kind: rule.map(|rule| rule.kind),
                style: rule.map(|rule| rule.style),
            });
            position = token.end();
        }

        if position < text.len() {
            runs.push(unstyled_run(position, text.len()));
        }
        runs
    }
}

fn unstyled_run(start: usize, end: usize) -> StyledRun {
    StyledRun {
        start,
        length: end - start,
        kind: None,
        style: None,
    }
}
