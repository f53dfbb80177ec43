use crate::lexer::SourceToken;
use crate::lexer::TokenKind;
use crate::lexer::tokenize;
use crate::pattern::SCOPE_SEPARATOR;

/// Lazily yields the qualified identifiers of a token stream.
///
/// An identifier absorbs every directly following `(::, identifier)` pair, so
/// `std :: chrono :: seconds` is yielded once as `std::chrono::seconds`.
/// Identifiers are yielded in source order and are not deduplicated.
#[derive(Debug, Clone)]
pub struct QualifiedIdentifiers<'a> {
	tokens: Vec<SourceToken<'a>>,
	cursor: usize,
}

impl<'a> QualifiedIdentifiers<'a> {
	/// Walk an already lexed token stream.
	pub fn from_tokens(tokens: Vec<SourceToken<'a>>) -> Self {
		Self { tokens, cursor: 0 }
	}

	fn kind_at(&self, index: usize) -> Option<TokenKind> {
		self.tokens.get(index).map(|token| token.kind)
	}

	/// Whether a `(::, identifier)` pair starts at the cursor.
	fn at_scoped_segment(&self) -> bool {
		self.kind_at(self.cursor) == Some(TokenKind::ScopeOperator)
			&& self.kind_at(self.cursor + 1) == Some(TokenKind::Identifier)
	}
}

impl Iterator for QualifiedIdentifiers<'_> {
	type Item = String;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(token) = self.tokens.get(self.cursor) {
			self.cursor += 1;

			if token.kind != TokenKind::Identifier {
				continue;
			}

			let mut identifier = token.text.to_string();

			while self.at_scoped_segment() {
				identifier.push_str(SCOPE_SEPARATOR);
				identifier.push_str(self.tokens[self.cursor + 1].text);
				self.cursor += 2;
			}

			return Some(identifier);
		}

		None
	}
}

/// Lex `source` and return the iterator over its qualified identifiers.
pub fn extract_identifiers(source: &str) -> QualifiedIdentifiers<'_> {
	QualifiedIdentifiers::from_tokens(tokenize(source))
}
