use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lazy_static::lazy_static;
use lexparse::grammar::{Grammar, Production, Symbol};
use lexparse::lexer::{LexicalRule, Tokenizer};

lazy_static! {
    static ref C_LIKE_RULES: Vec<LexicalRule> = vec![
        LexicalRule::new("int", "KW_INT", 0, false),
        LexicalRule::new("if", "KW_IF", 0, false),
        LexicalRule::new("else", "KW_ELSE", 0, false),
        LexicalRule::new("while", "KW_WHILE", 0, false),
        LexicalRule::new("return", "KW_RETURN", 0, false),
        LexicalRule::new("[a-zA-Z_][a-zA-Z0-9_]*", "IDENT", 1, false),
        LexicalRule::new("[0-9]+", "NUMBER", 1, false),
        LexicalRule::new("<=", "LE", 2, false),
        LexicalRule::new(">=", "GE", 2, false),
        LexicalRule::new("==", "EQ", 2, false),
        LexicalRule::new("<", "LT", 3, false),
        LexicalRule::new(">", "GT", 3, false),
        LexicalRule::new("=", "ASSIGN", 3, false),
        LexicalRule::new("\\+", "PLUS", 3, false),
        LexicalRule::new("-", "MINUS", 3, false),
        LexicalRule::new("\\*", "STAR", 3, false),
        LexicalRule::new(";", "SEMI", 3, false),
        LexicalRule::new("\\(", "LPAREN", 3, false),
        LexicalRule::new("\\)", "RPAREN", 3, false),
        LexicalRule::new("\\{", "LBRACE", 3, false),
        LexicalRule::new("\\}", "RBRACE", 3, false),
        LexicalRule::new("[ \\t\\n\\r]+", "WS", 4, true),
    ];
    static ref SOURCE_SAMPLE: String = {
        let mut s = String::new();
        for i in 0..200 {
            s.push_str(&format!(
                "int x{i} = {i};\nif (x{i} <= {i}) {{ return x{i}; }} else {{ x{i} = x{i} + 1; }}\n"
            ));
        }
        s
    };
}

fn arithmetic_grammar() -> Grammar {
    Grammar::new(
        vec![
            Production::new(
                "E",
                vec![Symbol::non_terminal("E"), Symbol::terminal("+"), Symbol::non_terminal("T")],
            ),
            Production::new("E", vec![Symbol::non_terminal("T")]),
            Production::new(
                "T",
                vec![Symbol::non_terminal("T"), Symbol::terminal("*"), Symbol::non_terminal("F")],
            ),
            Production::new("T", vec![Symbol::non_terminal("F")]),
            Production::new(
                "F",
                vec![Symbol::terminal("("), Symbol::non_terminal("E"), Symbol::terminal(")")],
            ),
            Production::new("F", vec![Symbol::terminal("id")]),
        ],
        "E",
    )
    .unwrap()
}

pub fn tokenizer_build(c: &mut Criterion) {
    c.bench_function("tokenizer build (21 rules)", |b| {
        b.iter(|| Tokenizer::build(black_box(&C_LIKE_RULES)).unwrap())
    });
}

pub fn tokenize_throughput(c: &mut Criterion) {
    let tokenizer = Tokenizer::build(&C_LIKE_RULES).unwrap();
    c.bench_function("tokenize (200 statements)", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&SOURCE_SAMPLE)))
    });
}

pub fn lalr_table_build(c: &mut Criterion) {
    c.bench_function("LALR(1) table build (arithmetic grammar)", |b| {
        b.iter(|| arithmetic_grammar().build_table())
    });
}

pub fn lr_parse(c: &mut Criterion) {
    let grammar = arithmetic_grammar();
    let table = grammar.build_table();
    let rules = vec![
        LexicalRule::new("[a-zA-Z][a-zA-Z0-9]*", "id", 0, false),
        LexicalRule::new("\\+", "+", 1, false),
        LexicalRule::new("\\*", "*", 1, false),
        LexicalRule::new("\\(", "(", 1, false),
        LexicalRule::new("\\)", ")", 1, false),
        LexicalRule::new(" +", "WS", 2, true),
    ];
    let tokenizer = Tokenizer::build(&rules).unwrap();
    let tokens = tokenizer.tokenize("a + b * (c + d) * e + f * g + h");

    c.bench_function("LR parse (33-token expression)", |b| {
        b.iter(|| table.parse(black_box(&tokens)).unwrap())
    });
}

criterion_group!(benches, tokenizer_build, tokenize_throughput, lalr_table_build, lr_parse);
criterion_main!(benches);
