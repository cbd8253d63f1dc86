//! Token model produced by the [`Scanner`](super::scanner::Scanner)
//!
//! Tokens are a closed sum type. Words (identifiers and reserved words) are
//! interned: every occurrence of the same lexeme within one scanning session
//! shares a single [`Word`] allocation.

use std::fmt;
use std::rc::Rc;

/// Reserved words known to every scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    True,
    False,
}

impl Keyword {
    pub const ALL: [Keyword; 2] = [Keyword::True, Keyword::False];

    pub fn lexeme(self) -> &'static str {
        match self {
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }
}

/// Relational and assignment operators built from `< > = !`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rel {
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Assign, // =
    Eq,     // ==
    Not,    // !
    Ne,     // !=
}

impl Rel {
    /// The single-character operator starting with `first`, if any.
    pub fn from_char(first: char) -> Option<Self> {
        match first {
            '<' => Some(Rel::Lt),
            '>' => Some(Rel::Gt),
            '=' => Some(Rel::Assign),
            '!' => Some(Rel::Not),
            _ => None,
        }
    }

    /// The two-character form obtained by appending `=`.
    pub fn with_eq(self) -> Self {
        match self {
            Rel::Lt => Rel::Le,
            Rel::Gt => Rel::Ge,
            Rel::Assign => Rel::Eq,
            Rel::Not => Rel::Ne,
            two_char => two_char,
        }
    }

    pub fn lexeme(self) -> &'static str {
        match self {
            Rel::Lt => "<",
            Rel::Le => "<=",
            Rel::Gt => ">",
            Rel::Ge => ">=",
            Rel::Assign => "=",
            Rel::Eq => "==",
            Rel::Not => "!",
            Rel::Ne => "!=",
        }
    }
}

/// Discriminator of a token.
///
/// Punctuation carries its own character, so it cannot collide with the
/// structural tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Num,
    Id,
    Rel,
    True,
    False,
    Char(char),
}

impl From<Keyword> for Tag {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::True => Tag::True,
            Keyword::False => Tag::False,
        }
    }
}

#[derive(Debug)]
struct WordEntry {
    keyword: Option<Keyword>,
    lexeme: Box<str>,
}

/// Handle to an interned word.
///
/// Cloning is cheap. `==` compares content; use [`Word::same_instance`] to
/// check that two handles come from the same intern table entry.
#[derive(Debug, Clone)]
pub struct Word(Rc<WordEntry>);

impl Word {
    pub(crate) fn identifier(lexeme: &str) -> Self {
        Word(Rc::new(WordEntry {
            keyword: None,
            lexeme: lexeme.into(),
        }))
    }

    pub(crate) fn reserved(keyword: Keyword) -> Self {
        Word(Rc::new(WordEntry {
            keyword: Some(keyword),
            lexeme: keyword.lexeme().into(),
        }))
    }

    pub fn lexeme(&self) -> &str {
        &self.0.lexeme
    }

    pub fn keyword(&self) -> Option<Keyword> {
        self.0.keyword
    }

    pub fn tag(&self) -> Tag {
        self.0.keyword.map_or(Tag::Id, Tag::from)
    }

    pub fn same_instance(&self, other: &Word) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.same_instance(other)
            || (self.0.keyword == other.0.keyword && self.0.lexeme == other.0.lexeme)
    }
}

impl Eq for Word {}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// All token variants produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(i32),
    Identifier(Word),
    Keyword(Word),
    Operator(Rel),
    Punctuation(char),
}

impl Token {
    pub fn tag(&self) -> Tag {
        match self {
            Token::Number(_) => Tag::Num,
            Token::Identifier(word) | Token::Keyword(word) => word.tag(),
            Token::Operator(_) => Tag::Rel,
            Token::Punctuation(ch) => Tag::Char(*ch),
        }
    }

    /// The interned word behind an identifier or keyword token.
    pub fn word(&self) -> Option<&Word> {
        match self {
            Token::Identifier(word) | Token::Keyword(word) => Some(word),
            _ => None,
        }
    }

    /// Short kind name used in listings and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Number(_) => "number",
            Token::Identifier(_) => "identifier",
            Token::Keyword(_) => "keyword",
            Token::Operator(_) => "operator",
            Token::Punctuation(_) => "punctuation",
        }
    }
}

impl From<Word> for Token {
    fn from(word: Word) -> Self {
        if word.keyword().is_some() {
            Token::Keyword(word)
        } else {
            Token::Identifier(word)
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Identifier(word) | Token::Keyword(word) => write!(f, "{}", word),
            Token::Operator(rel) => f.write_str(rel.lexeme()),
            Token::Punctuation(ch) => write!(f, "{}", ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rel_lexemes() {
        assert_eq!(Rel::from_char('<').map(|r| r.with_eq().lexeme()), Some("<="));
        assert_eq!(Rel::from_char('!').map(Rel::lexeme), Some("!"));
        assert_eq!(Rel::from_char('+'), None);
        assert_eq!(Rel::Ge.with_eq(), Rel::Ge);
    }

    #[test]
    fn test_word_equality_vs_identity() {
        let a = Word::identifier("foo");
        let b = Word::identifier("foo");
        assert_eq!(a, b);
        assert!(!a.same_instance(&b));
        assert!(a.same_instance(&a.clone()));
    }

    #[test]
    fn test_keyword_word_differs_from_identifier() {
        let reserved = Word::reserved(Keyword::True);
        let ident = Word::identifier("true");
        assert_ne!(reserved, ident);
        assert_eq!(reserved.tag(), Tag::True);
        assert_eq!(ident.tag(), Tag::Id);
    }

    #[test]
    fn test_tags_do_not_collide() {
        assert_ne!(Token::Number(1).tag(), Token::Punctuation('1').tag());
        assert_eq!(Token::Operator(Rel::Eq).tag(), Tag::Rel);
        assert_eq!(Token::Punctuation('+').tag(), Tag::Char('+'));
    }
}
