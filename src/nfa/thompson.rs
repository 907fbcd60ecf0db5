//! Folds a postfix regex token stream into a single Thompson [Fragment] (C3), one
//! arena push per primitive operator. Each case below is a textbook Thompson
//! construction rule; the postfix stream guarantees operators only ever see the
//! operand(s) they need on top of the fragment stack.

use crate::regex::{BadRegex, Token};

use super::{Builder, Fragment, Label};

pub(crate) fn build_fragment(builder: &mut Builder, postfix: &[Token]) -> Result<Fragment, BadRegex> {
    let mut stack: Vec<Fragment> = Vec::new();

    for &tok in postfix {
        match tok {
            Token::Char(c) => {
                let start = builder.fresh_state();
                let end = builder.fresh_state();
                builder.add_transition(start, Label::Char(c), end);
                stack.push(Fragment { start, end });
            }
            Token::Concat => {
                let b = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                let a = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                builder.add_transition(a.end, Label::Epsilon, b.start);
                stack.push(Fragment { start: a.start, end: b.end });
            }
            Token::Alt => {
                let b = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                let a = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                let start = builder.fresh_state();
                let end = builder.fresh_state();
                builder.add_transition(start, Label::Epsilon, a.start);
                builder.add_transition(start, Label::Epsilon, b.start);
                builder.add_transition(a.end, Label::Epsilon, end);
                builder.add_transition(b.end, Label::Epsilon, end);
                stack.push(Fragment { start, end });
            }
            Token::Star => {
                let a = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                let start = builder.fresh_state();
                let end = builder.fresh_state();
                builder.add_transition(start, Label::Epsilon, a.start);
                builder.add_transition(start, Label::Epsilon, end);
                builder.add_transition(a.end, Label::Epsilon, a.start);
                builder.add_transition(a.end, Label::Epsilon, end);
                stack.push(Fragment { start, end });
            }
            Token::Plus => {
                let a = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                let start = builder.fresh_state();
                let end = builder.fresh_state();
                builder.add_transition(start, Label::Epsilon, a.start);
                builder.add_transition(a.end, Label::Epsilon, a.start);
                builder.add_transition(a.end, Label::Epsilon, end);
                stack.push(Fragment { start, end });
            }
            Token::Opt => {
                let a = stack.pop().ok_or(BadRegex::EmptyOperand)?;
                let start = builder.fresh_state();
                let end = builder.fresh_state();
                builder.add_transition(start, Label::Epsilon, a.start);
                builder.add_transition(start, Label::Epsilon, end);
                builder.add_transition(a.end, Label::Epsilon, end);
                stack.push(Fragment { start, end });
            }
            Token::LParen | Token::RParen => {
                unreachable!("shunting-yard output never contains parentheses")
            }
        }
    }

    match stack.len() {
        1 => Ok(stack.pop().unwrap()),
        0 => Err(BadRegex::EmptyPattern),
        n => Err(BadRegex::UnconsumedOperands(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_char_fragment_has_one_transition() {
        let mut builder = Builder::new();
        let postfix = vec![Token::Char('a')];
        let fragment = build_fragment(&mut builder, &postfix).unwrap();
        assert_ne!(fragment.start, fragment.end);
    }

    #[test]
    fn concat_chains_two_fragments() {
        let mut builder = Builder::new();
        // postfix for "ab": a b ·
        let postfix = vec![Token::Char('a'), Token::Char('b'), Token::Concat];
        let fragment = build_fragment(&mut builder, &postfix).unwrap();
        assert_ne!(fragment.start, fragment.end);
    }

    #[test]
    fn star_has_an_epsilon_skip_from_start_to_end() {
        let mut builder = Builder::new();
        // postfix for "a*": a *
        let postfix = vec![Token::Char('a'), Token::Star];
        let fragment = build_fragment(&mut builder, &postfix).unwrap();
        let nfa = builder.fuse(vec![fragment.start]);
        let fragment_start_state = &nfa.states[fragment.start];
        assert!(fragment_start_state
            .transitions
            .iter()
            .any(|t| t.label == Label::Epsilon && t.target == fragment.end));
    }

    #[test]
    fn empty_postfix_is_an_error() {
        let mut builder = Builder::new();
        assert!(matches!(
            build_fragment(&mut builder, &[]),
            Err(BadRegex::EmptyPattern)
        ));
    }

    #[test]
    fn operator_with_no_operands_is_an_error() {
        let mut builder = Builder::new();
        assert!(matches!(
            build_fragment(&mut builder, &[Token::Concat]),
            Err(BadRegex::EmptyOperand)
        ));
    }

    #[test]
    fn leftover_operands_is_an_error() {
        let mut builder = Builder::new();
        let postfix = vec![Token::Char('a'), Token::Char('b')];
        assert!(matches!(
            build_fragment(&mut builder, &postfix),
            Err(BadRegex::UnconsumedOperands(2))
        ));
    }
}
