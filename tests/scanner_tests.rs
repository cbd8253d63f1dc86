// Scanner behaviour over whole inputs

use dragonlex::lexer::{
    tokenize, Keyword, LexErrorKind, ReadSource, Rel, Scanner, Tag, Token,
};

#[test]
fn test_whitespace_and_newlines_only() {
    for k in 0..5 {
        let input = format!("  \t{}\t ", "\n ".repeat(k));
        let mut scanner = Scanner::for_str(&input);
        assert!(scanner.scan_token().unwrap().is_none(), "input {:?}", input);
        assert_eq!(scanner.line(), k + 1);
    }
}

#[test]
fn test_numbers_and_punctuation() {
    let tokens = tokenize("12+3-45").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Number(12),
            Token::Punctuation('+'),
            Token::Number(3),
            Token::Punctuation('-'),
            Token::Number(45),
        ]
    );
}

#[test]
fn test_identifiers_are_interned() {
    let tokens = tokenize("foo bar foo").unwrap();
    assert_eq!(tokens.len(), 3);

    let words: Vec<_> = tokens.iter().map(|t| t.word().unwrap()).collect();
    assert!(tokens.iter().all(|t| t.tag() == Tag::Id));
    assert!(words[0].same_instance(words[2]));
    assert!(!words[0].same_instance(words[1]));
    assert!(!words[1].same_instance(words[2]));
}

#[test]
fn test_reserved_words_are_preregistered() {
    let mut scanner = Scanner::for_str("true false true");
    let reserved: Vec<_> = scanner.words().into_iter().cloned().collect();

    let first = scanner.scan_token().unwrap().unwrap();
    let second = scanner.scan_token().unwrap().unwrap();
    let third = scanner.scan_token().unwrap().unwrap();

    assert!(matches!(first, Token::Keyword(_)));
    assert_eq!(first.word().unwrap().keyword(), Some(Keyword::True));
    assert_eq!(second.tag(), Tag::False);

    let true_entry = reserved.iter().find(|w| w.lexeme() == "true").unwrap();
    let false_entry = reserved.iter().find(|w| w.lexeme() == "false").unwrap();
    assert!(first.word().unwrap().same_instance(true_entry));
    assert!(second.word().unwrap().same_instance(false_entry));
    assert!(third.word().unwrap().same_instance(true_entry));
    assert_eq!(scanner.word_count(), 2);
}

#[test]
fn test_two_character_relational() {
    assert_eq!(tokenize("<=").unwrap(), vec![Token::Operator(Rel::Le)]);
}

#[test]
fn test_single_character_relational_keeps_lookahead() {
    let mut scanner = Scanner::for_str("< \n5");
    assert_eq!(scanner.scan_token().unwrap(), Some(Token::Operator(Rel::Lt)));
    assert_eq!(scanner.line(), 1);
    assert_eq!(scanner.scan_token().unwrap(), Some(Token::Number(5)));
    assert_eq!(scanner.line(), 2);

    let tokens = tokenize("a<b").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[1], Token::Operator(Rel::Lt));
    assert_eq!(tokens[2].to_string(), "b");
}

#[test]
fn test_line_comment_counts_one_line() {
    let mut scanner = Scanner::for_str("1 // c\n+2");
    let mut tokens = Vec::new();
    while let Some(token) = scanner.scan_token().unwrap() {
        tokens.push(token);
    }
    assert_eq!(
        tokens,
        vec![Token::Number(1), Token::Punctuation('+'), Token::Number(2)]
    );
    assert_eq!(scanner.line(), 2);
}

#[test]
fn test_unterminated_block_comment_is_an_error() {
    let mut scanner = Scanner::for_str("/* never closes");
    let err = scanner.scan_token().unwrap_err();
    assert!(matches!(err.kind, LexErrorKind::UnterminatedComment));
    assert_eq!(err.line, 1);
    assert!(err.to_string().contains("unterminated block comment"));
}

#[test]
fn test_reader_source_matches_string_source() {
    let input = "{ int x; x; }\n// done\n";
    let from_reader: Vec<Token> = Scanner::new(ReadSource::new(input.as_bytes()))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(from_reader, tokenize(input).unwrap());
}

#[test]
fn test_operators_demo() {
    let source = std::fs::read_to_string("demos/operators.txt").expect("Failed to read demo file");
    let tokens = tokenize(&source).unwrap();
    let ops: Vec<&str> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Operator(rel) => Some(rel.lexeme()),
            _ => None,
        })
        .collect();
    assert_eq!(ops, ["<=", "!=", "==", "=", "!"]);
}
