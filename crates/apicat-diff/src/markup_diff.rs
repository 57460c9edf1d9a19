//! Token-level diff of two declarations.

use apicat_types::{DiffKind, Markup, Token};

use crate::edit::{edit_script, Edit};

/// One token of a markup diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenDiff<'a> {
    pub kind: DiffKind,
    pub token: &'a Token,
}

impl<'a> TokenDiff<'a> {
    fn new(kind: DiffKind, token: &'a Token) -> Self {
        Self { kind, token }
    }
}

/// The result of comparing two markups token by token.
///
/// Tokens never carry [`DiffKind::Changed`]: an unequal pairing is reported
/// as the old token `Removed` followed by the new token `Added`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkupDiff<'a> {
    tokens: Vec<TokenDiff<'a>>,
}

impl<'a> MarkupDiff<'a> {
    pub fn tokens(&self) -> &[TokenDiff<'a>] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenDiff<'a>> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of added tokens.
    pub fn additions(&self) -> usize {
        self.count(DiffKind::Added)
    }

    /// Number of removed tokens.
    pub fn removals(&self) -> usize {
        self.count(DiffKind::Removed)
    }

    /// Returns `true` if every token is unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.tokens.iter().all(|t| t.kind == DiffKind::Unchanged)
    }

    fn count(&self, kind: DiffKind) -> usize {
        self.tokens.iter().filter(|t| t.kind == kind).count()
    }
}

impl<'a, 'b> IntoIterator for &'b MarkupDiff<'a> {
    type Item = &'b TokenDiff<'a>;
    type IntoIter = std::slice::Iter<'b, TokenDiff<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Diff two optional markups.
///
/// A missing side means the declaration does not exist in that context: the
/// other side is reported wholly added or wholly removed. Both missing yields
/// an empty diff.
pub fn diff_markup<'a>(old: Option<&'a Markup>, new: Option<&'a Markup>) -> MarkupDiff<'a> {
    let tokens = match (old, new) {
        (None, None) => Vec::new(),
        (None, Some(new)) => whole(DiffKind::Added, new),
        (Some(old), None) => whole(DiffKind::Removed, old),
        (Some(old), Some(new)) => {
            let (a, b) = (old.tokens(), new.tokens());
            let mut tokens = Vec::with_capacity(a.len().max(b.len()));
            for edit in edit_script(a.len(), b.len(), |i, j| a[i] == b[j]) {
                match edit {
                    Edit::Delete(i) => tokens.push(TokenDiff::new(DiffKind::Removed, &a[i])),
                    Edit::Insert(j) => tokens.push(TokenDiff::new(DiffKind::Added, &b[j])),
                    Edit::Update(i, j) if a[i] == b[j] => {
                        tokens.push(TokenDiff::new(DiffKind::Unchanged, &a[i]));
                    }
                    Edit::Update(i, j) => {
                        tokens.push(TokenDiff::new(DiffKind::Removed, &a[i]));
                        tokens.push(TokenDiff::new(DiffKind::Added, &b[j]));
                    }
                }
            }
            tokens
        }
    };
    MarkupDiff { tokens }
}

fn whole(kind: DiffKind, markup: &Markup) -> Vec<TokenDiff<'_>> {
    markup
        .tokens()
        .iter()
        .map(|token| TokenDiff::new(kind, token))
        .collect()
}
