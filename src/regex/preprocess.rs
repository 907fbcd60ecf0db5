//! Expands a source pattern into the primitive infix operator grammar: character
//! classes, `.` and the `\s \d \w` escapes are rewritten as parenthesized
//! alternations over single characters, then the implicit concatenation operator is
//! inserted between adjacent atoms.

use std::collections::BTreeSet;

use nom::branch::alt;
use nom::bytes::complete::take;
use nom::character::complete::{char, none_of};
use nom::combinator::{map, opt, verify};
use nom::multi::many1;
use nom::sequence::preceded;
use nom::IResult;

use super::{fixed_alphabet, BadRegex, Token};

const RESERVED: &str = "()|*+?.[]\\";
const CONCAT_MARKER: char = '·';

pub(super) fn preprocess(pattern: &str) -> Result<Vec<Token>, BadRegex> {
    if pattern.is_empty() {
        return Ok(Vec::new());
    }
    let (rest, chunks) = many1(token_chunk)(pattern).unwrap_or((pattern, Vec::new()));
    if rest.is_empty() {
        let tokens: Vec<Token> = chunks.into_iter().flatten().collect();
        return Ok(insert_concat(tokens));
    }
    let position = pattern.len() - rest.len();
    if rest.starts_with(CONCAT_MARKER) {
        Err(BadRegex::ReservedConcatMarker(position))
    } else {
        Err(BadRegex::MalformedClass(position))
    }
}

fn token_chunk(input: &str) -> IResult<&str, Vec<Token>> {
    alt((
        map(char('('), |_| vec![Token::LParen]),
        map(char(')'), |_| vec![Token::RParen]),
        map(char('|'), |_| vec![Token::Alt]),
        map(char('*'), |_| vec![Token::Star]),
        map(char('+'), |_| vec![Token::Plus]),
        map(char('?'), |_| vec![Token::Opt]),
        map(char('.'), |_| wrap_alternation(&dot_set())),
        char_class,
        escape,
        literal_char,
    ))(input)
}

fn literal_char(input: &str) -> IResult<&str, Vec<Token>> {
    let (rest, c) = verify(none_of(RESERVED), |&c| c != CONCAT_MARKER)(input)?;
    Ok((rest, vec![Token::Char(c)]))
}

fn escape(input: &str) -> IResult<&str, Vec<Token>> {
    let (rest, c) = preceded(char('\\'), take(1usize))(input)?;
    let c = c.chars().next().unwrap();
    let tokens = match c {
        's' => wrap_alternation(&whitespace_set()),
        'd' => wrap_alternation(&digit_set()),
        'w' => wrap_alternation(&word_set()),
        other => vec![Token::Char(other)],
    };
    Ok((rest, tokens))
}

fn char_class(input: &str) -> IResult<&str, Vec<Token>> {
    let (input, _) = char('[')(input)?;
    let (input, negate) = opt(char('^'))(input)?;
    let (input, items) = many1(class_item)(input)?;
    let (input, _) = char(']')(input)?;

    let literal: BTreeSet<char> = items.into_iter().flatten().collect();
    let resolved: BTreeSet<char> = if negate.is_some() {
        fixed_alphabet().difference(&literal).copied().collect()
    } else {
        literal
    };
    if resolved.is_empty() {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((input, wrap_alternation(&resolved)))
}

fn class_item(input: &str) -> IResult<&str, Vec<char>> {
    alt((class_range, map(class_atom, |c| vec![c])))(input)
}

fn class_range(input: &str) -> IResult<&str, Vec<char>> {
    let (input, lo) = class_atom(input)?;
    let (input, _) = char('-')(input)?;
    let (input, hi) = class_atom(input)?;
    if lo > hi {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((input, (lo..=hi).collect()))
}

fn class_atom(input: &str) -> IResult<&str, char> {
    alt((
        map(preceded(char('\\'), take(1usize)), |s: &str| {
            s.chars().next().unwrap()
        }),
        none_of("]"),
    ))(input)
}

fn wrap_alternation(set: &BTreeSet<char>) -> Vec<Token> {
    let mut out = Vec::with_capacity(set.len() * 2 + 2);
    out.push(Token::LParen);
    for (i, &c) in set.iter().enumerate() {
        if i > 0 {
            out.push(Token::Alt);
        }
        out.push(Token::Char(c));
    }
    out.push(Token::RParen);
    out
}

fn dot_set() -> BTreeSet<char> {
    let mut set = fixed_alphabet();
    set.remove(&'\n');
    set
}

fn whitespace_set() -> BTreeSet<char> {
    [' ', '\t', '\n', '\r'].into_iter().collect()
}

fn digit_set() -> BTreeSet<char> {
    ('0'..='9').collect()
}

fn word_set() -> BTreeSet<char> {
    let mut set: BTreeSet<char> = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
    set.insert('_');
    set
}

fn closes_value(t: Token) -> bool {
    matches!(
        t,
        Token::Char(_) | Token::RParen | Token::Star | Token::Plus | Token::Opt
    )
}

fn opens_value(t: Token) -> bool {
    matches!(t, Token::Char(_) | Token::LParen)
}

fn insert_concat(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len() * 2);
    for (i, &tok) in tokens.iter().enumerate() {
        if i > 0 && closes_value(tokens[i - 1]) && opens_value(tok) {
            out.push(Token::Concat);
        }
        out.push(tok);
    }
    out
}
