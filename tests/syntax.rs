use simian::{
    ast::{Program, Statement},
    interpreter::{
        lexer::{Token, lex},
        parser::parse_program,
    },
};

fn tokens_of(source: &str) -> Vec<Token> {
    let (tokens, errors) = lex(source);
    assert!(errors.is_empty(), "Unexpected lexer errors for {source:?}: {errors:?}");
    tokens.into_iter().map(|(token, _)| token).collect()
}

fn parse(source: &str) -> Program {
    let (tokens, lex_errors) = lex(source);
    assert!(lex_errors.is_empty(), "Unexpected lexer errors for {source:?}: {lex_errors:?}");

    let (program, errors) = parse_program(&tokens);
    assert!(errors.is_empty(), "Unexpected parse errors for {source:?}: {errors:?}");
    program
}

fn parsed_display(source: &str) -> String {
    parse(source).to_string()
}

#[test]
fn lexes_a_representative_statement() {
    let tokens = tokens_of("let five = 5;");

    assert_eq!(tokens,
               vec![Token::Let,
                    Token::Identifier("five".to_string()),
                    Token::Assign,
                    Token::Int(5),
                    Token::Semicolon]);
}

#[test]
fn lexes_operators_and_delimiters() {
    let tokens = tokens_of("=+-!*/%<>(){}[],;:");

    assert_eq!(tokens,
               vec![Token::Assign,
                    Token::Plus,
                    Token::Minus,
                    Token::Bang,
                    Token::Asterisk,
                    Token::Slash,
                    Token::Percent,
                    Token::Less,
                    Token::Greater,
                    Token::LParen,
                    Token::RParen,
                    Token::LBrace,
                    Token::RBrace,
                    Token::LBracket,
                    Token::RBracket,
                    Token::Comma,
                    Token::Semicolon,
                    Token::Colon]);
}

#[test]
fn two_character_operators_are_never_split() {
    assert_eq!(tokens_of("=="), vec![Token::Equal]);
    assert_eq!(tokens_of("!="), vec![Token::NotEqual]);
    assert_eq!(tokens_of("a==b != c"),
               vec![Token::Identifier("a".to_string()),
                    Token::Equal,
                    Token::Identifier("b".to_string()),
                    Token::NotEqual,
                    Token::Identifier("c".to_string())]);
    assert_eq!(tokens_of("= ="), vec![Token::Assign, Token::Assign]);
}

#[test]
fn lexes_keywords() {
    assert_eq!(tokens_of("fn let const true false if else return while"),
               vec![Token::Function,
                    Token::Let,
                    Token::Const,
                    Token::Bool(true),
                    Token::Bool(false),
                    Token::If,
                    Token::Else,
                    Token::Return,
                    Token::While]);
}

#[test]
fn keyword_prefixes_are_identifiers() {
    assert_eq!(tokens_of("lettuce whiles fns truey"),
               vec![Token::Identifier("lettuce".to_string()),
                    Token::Identifier("whiles".to_string()),
                    Token::Identifier("fns".to_string()),
                    Token::Identifier("truey".to_string())]);
}

#[test]
fn identifiers_keep_their_exact_literal() {
    assert_eq!(tokens_of("_under score9 camelCase"),
               vec![Token::Identifier("_under".to_string()),
                    Token::Identifier("score9".to_string()),
                    Token::Identifier("camelCase".to_string())]);
}

#[test]
fn lexes_numbers() {
    assert_eq!(tokens_of("5 10 3.14 0.5"),
               vec![Token::Int(5), Token::Int(10), Token::Float(3.14), Token::Float(0.5)]);
}

#[test]
fn a_trailing_dot_is_illegal() {
    let (tokens, errors) = lex("1.");

    assert!(tokens.is_empty());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 1: illegal token '1.'");
}

#[test]
fn an_out_of_range_integer_is_illegal() {
    let (_, errors) = lex("99999999999999999999");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("illegal token"));
}

#[test]
fn lexes_strings_with_escapes() {
    assert_eq!(tokens_of(r#""hello""#), vec![Token::Str("hello".to_string())]);
    assert_eq!(tokens_of(r#""say \"hi\"""#), vec![Token::Str("say \"hi\"".to_string())]);
    assert_eq!(tokens_of(r#""a\nb\tc\\d""#), vec![Token::Str("a\nb\tc\\d".to_string())]);
    // Unknown escapes keep their backslash.
    assert_eq!(tokens_of(r#""a\qb""#), vec![Token::Str("a\\qb".to_string())]);
    assert_eq!(tokens_of(r#""""#), vec![Token::Str(String::new())]);
}

#[test]
fn an_unterminated_string_is_illegal() {
    let (_, errors) = lex("\"never closed");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("illegal token"));
}

#[test]
fn stray_characters_are_illegal_but_lexing_continues() {
    let (tokens, errors) = lex("1 @ 2 $ 3");

    assert_eq!(tokens.into_iter().map(|(t, _)| t).collect::<Vec<_>>(),
               vec![Token::Int(1), Token::Int(2), Token::Int(3)]);
    assert_eq!(errors.len(), 2);
}

#[test]
fn the_token_stream_ends_cleanly() {
    let (tokens, errors) = lex("");
    assert!(tokens.is_empty());
    assert!(errors.is_empty());

    let (tokens, errors) = lex("   \n\t  // only trivia\n");
    assert!(tokens.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn tokens_carry_their_line() {
    let (tokens, _) = lex("1\n2\n\n3");

    assert_eq!(tokens,
               vec![(Token::Int(1), 1), (Token::Int(2), 2), (Token::Int(3), 4)]);
}

#[test]
fn comments_run_to_end_of_line() {
    assert_eq!(tokens_of("1 // 2 + 3\n4"), vec![Token::Int(1), Token::Int(4)]);
}

#[test]
fn operator_precedence_is_preserved() {
    let cases = [("-a * b", "((-a) * b)"),
                 ("!-a", "(!(-a))"),
                 ("a + b + c", "((a + b) + c)"),
                 ("a + b - c", "((a + b) - c)"),
                 ("a * b * c", "((a * b) * c)"),
                 ("a + b / c", "(a + (b / c))"),
                 ("a % b + c", "((a % b) + c)"),
                 ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
                 ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
                 ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
                 ("(5 + 5) * 2", "((5 + 5) * 2)"),
                 ("2 / (5 + 5)", "(2 / (5 + 5))"),
                 ("-(5 + 5)", "(-(5 + 5))"),
                 ("!(true == true)", "(!(true == true))"),
                 ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
                 ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
                 ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
                 ("add(a * b[2], b[1], 2 * [1, 2][1])",
                  "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))")];

    for (source, expected) in cases {
        assert_eq!(parsed_display(source), expected, "for source {source:?}");
    }
}

#[test]
fn parsed_display_is_stable() {
    let sources = ["let x = 1 + 2 * 3;",
                   "const limit = 10;",
                   "while (i < 10) { i = i + 1 }",
                   "if (x < y) { x } else { y }",
                   "fn(a, b) { return a + b; }",
                   "{\"one\": 1, 2: \"two\", true: 3.5}",
                   "[1, \"two\", 3.0][2]",
                   "x = x + 1"];

    for source in sources {
        let printed = parsed_display(source);
        assert_eq!(parsed_display(&printed), printed, "for source {source:?}");
    }
}

#[test]
fn binding_statements_record_mutability() {
    let program = parse("let a = 1; const b = 2;");

    match &program.statements[0] {
        Statement::Let { name, mutable, .. } => {
            assert_eq!(name, "a");
            assert!(mutable);
        },
        other => panic!("Expected a let statement, got {other:?}"),
    }
    match &program.statements[1] {
        Statement::Let { name, mutable, .. } => {
            assert_eq!(name, "b");
            assert!(!mutable);
        },
        other => panic!("Expected a const statement, got {other:?}"),
    }
}

#[test]
fn reassignment_parses_only_at_statement_start() {
    // Statement position: an assignment expression statement.
    assert_eq!(parsed_display("x = y + 1"), "x = (y + 1)");
    // Operand position: `==` stays an ordinary comparison.
    assert_eq!(parsed_display("x == y"), "(x == y)");
}

#[test]
fn while_statements_parse() {
    let program = parse("while (x < 3) { x = x + 1; }");

    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0], Statement::While { .. }));
    assert_eq!(program.to_string(), "while ((x < 3)) { x = (x + 1) }");
}

#[test]
fn if_else_parses_with_optional_alternative() {
    assert_eq!(parsed_display("if (x) { 1 }"), "if (x) { 1 }");
    assert_eq!(parsed_display("if (x) { 1 } else { 2 }"), "if (x) { 1 } else { 2 }");
}

#[test]
fn function_literals_parse_parameter_lists() {
    assert_eq!(parsed_display("fn() { 1 }"), "fn() { 1 }");
    assert_eq!(parsed_display("fn(x) { x }"), "fn(x) { x }");
    assert_eq!(parsed_display("fn(x, y, z) { x }"), "fn(x, y, z) { x }");
}

#[test]
fn hash_literals_parse() {
    assert_eq!(parsed_display("{}"), "{}");
    assert_eq!(parsed_display("{\"a\": 1}"), "{\"a\": 1}");
    assert_eq!(parsed_display("{1: 1, 2.5: 2, true: 3, \"k\": 4}"),
               "{1: 1, 2.5: 2, true: 3, \"k\": 4}");
}

#[test]
fn string_literals_redisplay_escaped() {
    assert_eq!(parsed_display(r#""a\"b\nc""#), r#""a\"b\nc""#);
}

#[test]
fn float_literals_redisplay_with_a_fraction() {
    assert_eq!(parsed_display("2.0"), "2.0");
    assert_eq!(parsed_display("0.25"), "0.25");
}

#[test]
fn trailing_commas_are_rejected() {
    let (tokens, _) = lex("[1, 2,]");
    let (_, errors) = parse_program(&tokens);
    assert!(!errors.is_empty());

    let (tokens, _) = lex("{\"a\": 1,}");
    let (_, errors) = parse_program(&tokens);
    assert!(!errors.is_empty());
}

#[test]
fn missing_tokens_are_reported() {
    let (tokens, _) = lex("if (x { 1 }");
    let (_, errors) = parse_program(&tokens);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("expected ')'"),
            "unexpected message: {}",
            errors[0]);

    let (tokens, _) = lex("let x 5");
    let (_, errors) = parse_program(&tokens);
    assert!(errors[0].to_string().contains("expected '='"));
}

#[test]
fn no_prefix_rule_errors_name_the_token() {
    let (tokens, _) = lex("let x = ;");
    let (_, errors) = parse_program(&tokens);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "line 1: no expression may start with ';'");
}

#[test]
fn parsing_recovers_and_reports_several_errors() {
    let (tokens, _) = lex("let = 1;\nlet y 2;\nlet z = 3;");
    let (program, errors) = parse_program(&tokens);

    assert_eq!(errors.len(), 2, "errors: {errors:?}");
    // The healthy statement behind the bad ones still parses.
    assert!(program.statements.iter().any(|statement| {
        matches!(statement, Statement::Let { name, .. } if name == "z")
    }));
}

#[test]
fn lexer_errors_surface_as_parse_errors() {
    use simian::{RunError, interpreter::environment::Environment, run_program};

    let env = Environment::root();
    match run_program("let x = 1.;", &env) {
        Err(RunError::Parse(errors)) => {
            assert!(errors.iter().any(|e| e.to_string().contains("illegal token")));
        },
        other => panic!("Expected parse errors, got {other:?}"),
    }
}
