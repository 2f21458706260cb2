//! Shorthand condition parser using nom.
//!
//! Turns a compact, SQL-looking filter string into [`Where`] nodes.
//!
//! # Syntax Overview
//!
//! ```text
//! (nombre = 'test2' OR nombre = 'test3') AND integer:codigo|ref >= 100
//! ───────────────────┬──────────────────  ─┬─ ──────┬──────────── ─┬─ ─┬─
//!                    │                     │        │              │   │
//!                    │                     │        │              │   └── Value
//!                    │                     │        │              └── Operator
//!                    │                     │        └── Fields (cast prefix, `|` alternatives)
//!                    │                     └── Joiner
//!                    └── Sub-group
//! ```
//!
//! Operators: `= != <> > < >= <=`, `BETWEEN a AND b`, `IN (a, b)`, `IN (SELECT ...)`,
//! `LIKE p`, `IS NULL`, `IS NOT NULL`. Keywords are case-insensitive.

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, digit1, multispace0, multispace1, satisfy},
    combinator::{all_consuming, map, map_res, not, opt, peek, recognize, value},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

use crate::ast::*;
use crate::ast::conditions::is_subquery;
use crate::error::{WhereError, WhereResult};

/// Deepest accepted sub-group nesting.
pub const MAX_DEPTH: usize = 128;

/// Parsed but not yet validated term.
#[derive(Debug)]
enum Term<'a> {
    Condition {
        fields: &'a str,
        op: Operator,
        operand: Operand,
    },
    Group(Vec<(Joiner, Term<'a>)>),
}

/// Parse a shorthand condition string into a node sequence.
///
/// An empty (or whitespace-only) input yields an empty sequence.
pub fn parse(input: &str) -> WhereResult<Vec<Where>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let offset = input.len() - input.trim_start().len();
    match parse_sequence(trimmed, 0) {
        Ok((remaining, items)) => {
            let remaining = remaining.trim_start();
            if !remaining.is_empty() {
                return Err(WhereError::parse(
                    offset + trimmed.len() - remaining.len(),
                    format!("Unexpected trailing content: '{}'", remaining),
                ));
            }
            build_sequence(items)
        }
        Err(nom::Err::Failure(e)) if e.code == nom::error::ErrorKind::TooLarge => {
            Err(WhereError::parse(
                offset + trimmed.len() - e.input.len(),
                format!("Groups nested deeper than {} levels", MAX_DEPTH),
            ))
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(WhereError::parse(
            offset + trimmed.len() - e.input.len(),
            format!("Parse failed near '{}' ({:?})", e.input, e.code),
        )),
        Err(nom::Err::Incomplete(_)) => Err(WhereError::parse(input.len(), "Incomplete input")),
    }
}

fn build_sequence(items: Vec<(Joiner, Term<'_>)>) -> WhereResult<Vec<Where>> {
    items
        .into_iter()
        .map(|(joiner, term)| build(joiner, term))
        .collect()
}

fn build(joiner: Joiner, term: Term<'_>) -> WhereResult<Where> {
    match term {
        Term::Condition {
            fields,
            op,
            operand,
        } => Where::build(fields, op, operand, joiner),
        Term::Group(items) => Where::sub_with(build_sequence(items)?, joiner),
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive keyword not followed by an identifier character.
fn keyword<'a>(kw: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(kw), not(peek(satisfy(is_ident_char))))
}

/// Parse `term (joiner term)*`. The first term always gets `AND`, which is never rendered.
fn parse_sequence(input: &str, depth: usize) -> IResult<&str, Vec<(Joiner, Term<'_>)>> {
    let (input, first) = parse_term(input, depth)?;
    let (input, rest) = many0(pair(
        delimited(multispace0, parse_joiner, multispace0),
        |i| parse_term(i, depth),
    ))(input)?;

    let mut items = vec![(Joiner::And, first)];
    items.extend(rest);
    Ok((input, items))
}

fn parse_joiner(input: &str) -> IResult<&str, Joiner> {
    alt((
        value(Joiner::And, keyword("AND")),
        value(Joiner::Or, keyword("OR")),
    ))(input)
}

fn parse_term(input: &str, depth: usize) -> IResult<&str, Term<'_>> {
    alt((|i| parse_group(i, depth), parse_condition))(input)
}

/// Parse a parenthesized sub-group. Nesting stops at [`MAX_DEPTH`].
fn parse_group(input: &str, depth: usize) -> IResult<&str, Term<'_>> {
    let (rest, _) = char('(')(input)?;
    if depth >= MAX_DEPTH {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        )));
    }
    let (input, _) = multispace0(rest)?;
    let (input, items) = parse_sequence(input, depth + 1)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Term::Group(items)))
}

/// Parse a single condition.
fn parse_condition(input: &str) -> IResult<&str, Term<'_>> {
    let (input, fields) = parse_fields(input)?;
    let (input, _) = multispace0(input)?;
    let (input, (op, operand)) = parse_operator_and_operand(input)?;
    Ok((input, Term::Condition { fields, op, operand }))
}

/// Field list: identifiers with optional cast prefix, `|`-separated, possibly dotted.
fn parse_fields(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| is_ident_char(c) || matches!(c, '.' | ':' | '|'))(input)
}

fn parse_operator_and_operand(input: &str) -> IResult<&str, (Operator, Operand)> {
    alt((
        parse_null_check,
        parse_between,
        parse_in,
        parse_like,
        parse_comparison,
    ))(input)
}

/// `IS NULL` / `IS NOT NULL`.
fn parse_null_check(input: &str) -> IResult<&str, (Operator, Operand)> {
    let (input, _) = keyword("IS")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, negated) = opt(terminated(keyword("NOT"), multispace1))(input)?;
    let (input, _) = keyword("NULL")(input)?;

    let op = if negated.is_some() {
        Operator::IsNotNull
    } else {
        Operator::IsNull
    };
    Ok((input, (op, Operand::None)))
}

/// `BETWEEN low AND high`.
fn parse_between(input: &str) -> IResult<&str, (Operator, Operand)> {
    let (input, (_, _, low, _, _, _, high)) = tuple((
        keyword("BETWEEN"),
        multispace0,
        parse_value,
        multispace1,
        keyword("AND"),
        multispace0,
        parse_value,
    ))(input)?;
    Ok((input, (Operator::Between, Operand::Range(low, high))))
}

/// `IN (a, b, c)` or `IN (SELECT ...)`.
fn parse_in(input: &str) -> IResult<&str, (Operator, Operand)> {
    let (input, _) = keyword("IN")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, inner) = parse_parenthesized(input)?;

    if is_subquery(inner) {
        return Ok((input, (Operator::In, Operand::Subquery(inner.trim().to_string()))));
    }

    let (_, values) = all_consuming(delimited(
        multispace0,
        separated_list1(delimited(multispace0, char(','), multispace0), parse_value),
        multispace0,
    ))(inner)?;
    Ok((input, (Operator::In, Operand::List(values))))
}

/// Contents of a balanced `( ... )`, skipping parentheses inside quoted strings.
fn parse_parenthesized(input: &str) -> IResult<&str, &str> {
    let (body, _) = char('(')(input)?;
    let mut depth = 0usize;
    let mut in_quote = false;

    for (i, c) in body.char_indices() {
        match c {
            '\'' => in_quote = !in_quote,
            '(' if !in_quote => depth += 1,
            ')' if !in_quote && depth == 0 => return Ok((&body[i + 1..], &body[..i])),
            ')' if !in_quote => depth -= 1,
            _ => {}
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

/// `LIKE pattern`.
fn parse_like(input: &str) -> IResult<&str, (Operator, Operand)> {
    let (input, _) = keyword("LIKE")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pattern) = parse_value(input)?;
    Ok((input, (Operator::Like, Operand::Scalar(pattern))))
}

/// Symbolic comparison followed by a value.
fn parse_comparison(input: &str) -> IResult<&str, (Operator, Operand)> {
    let (input, op) = alt((
        value(Operator::Gte, tag(">=")),
        value(Operator::Lte, tag("<=")),
        value(Operator::Ne, tag("!=")),
        value(Operator::Ne, tag("<>")),
        value(Operator::Gt, tag(">")),
        value(Operator::Lt, tag("<")),
        value(Operator::Eq, tag("=")),
    ))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, v) = parse_value(input)?;
    Ok((input, (op, Operand::Scalar(v))))
}

/// Parse a value.
fn parse_value(input: &str) -> IResult<&str, Value> {
    alt((
        parse_quoted_string,
        value(Value::Null, keyword("NULL")),
        value(Value::Bool(true), keyword("TRUE")),
        value(Value::Bool(false), keyword("FALSE")),
        parse_number,
        // Bare word: column references (`field:x`), LIKE patterns, plain text
        map(
            take_while1(|c: char| is_ident_char(c) || matches!(c, '.' | ':' | '%' | '-')),
            |s: &str| Value::String(s.to_string()),
        ),
    ))(input)
}

/// Parse a number (integer or float) not glued to a word.
fn parse_number(input: &str) -> IResult<&str, Value> {
    terminated(
        alt((
            map_res(
                recognize(tuple((opt(char('-')), digit1, char('.'), digit1))),
                |s: &str| s.parse::<f64>().map(Value::Float),
            ),
            map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
                s.parse::<i64>().map(Value::Int)
            }),
        )),
        not(peek(satisfy(|c: char| is_ident_char(c) || matches!(c, '.' | ':' | '%' | '-')))),
    )(input)
}

/// Parse a single-quoted string; `''` inside stands for one quote.
fn parse_quoted_string(input: &str) -> IResult<&str, Value> {
    let (mut rest, _) = char('\'')(input)?;
    let mut content = String::new();

    loop {
        match rest.find('\'') {
            Some(pos) => {
                content.push_str(&rest[..pos]);
                let after = &rest[pos + 1..];
                if let Some(stripped) = after.strip_prefix('\'') {
                    content.push('\'');
                    rest = stripped;
                } else {
                    return Ok((after, Value::String(content)));
                }
            }
            None => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}
