use logos::Logos;

/// Raw tokens produced by logos for a C or C++ translation unit.
///
/// Only identifiers and `::` matter downstream. Literals and comments are
/// still lexed as whole tokens so that words inside them are never reported
/// as identifiers.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n\f\v]+")]
enum RawToken {
	#[token("::")]
	Scope,
	#[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
	Ident,
	#[regex(r"//[^\n]*", allow_greedy = true)]
	LineComment,
	#[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
	BlockComment,
	#[regex(r#""([^"\\\n]|\\.)*""#)]
	StringLiteral,
	#[regex(r"'([^'\\\n]|\\.)*'")]
	CharLiteral,
	/// Preprocessing numbers such as `42`, `0x1Fu`, `1.5e-3f` or `1'000`.
	#[regex(r"\.?[0-9]([0-9a-zA-Z_.']|[eEpP][+-])*")]
	Number,
}

/// The token classes the identifier extractor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
	/// A name, e.g. `vector`.
	Identifier,
	/// `::`
	ScopeOperator,
	/// Anything else: punctuation, literals, comments.
	Other,
}

/// A lexed token and the source text it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceToken<'a> {
	pub kind: TokenKind,
	pub text: &'a str,
}

impl<'a> SourceToken<'a> {
	pub const fn new(kind: TokenKind, text: &'a str) -> Self {
		Self { kind, text }
	}

	pub const fn identifier(text: &'a str) -> Self {
		Self::new(TokenKind::Identifier, text)
	}

	pub const fn scope() -> Self {
		Self::new(TokenKind::ScopeOperator, "::")
	}
}

/// Lex `source` into a flat token stream. Bytes logos does not recognise
/// become [`TokenKind::Other`] tokens.
pub fn tokenize(source: &str) -> Vec<SourceToken<'_>> {
	RawToken::lexer(source)
		.spanned()
		.map(|(result, span)| {
			let kind = match result {
				Ok(RawToken::Ident) => TokenKind::Identifier,
				Ok(RawToken::Scope) => TokenKind::ScopeOperator,
				Ok(_) | Err(()) => TokenKind::Other,
			};

			SourceToken::new(kind, &source[span])
		})
		.collect()
}
