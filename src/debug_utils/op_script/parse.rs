use core::str::FromStr;

use anyhow::Result;
use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::{Parser, Span};
use pest_derive::Parser;

use super::{Op, OpScript};

#[derive(Parser)]
#[grammar = "debug_utils/op_script/grammar.pest"]
struct ScriptParser;

/// Helper function to extract N sub-pairs when the layout of a rule is fixed.
fn extract<const N: usize>(pair: Pair<'_, Rule>, expected_rules: [Rule; N]) -> [Pair<'_, Rule>; N] {
    let mut out = [(); N].map(|()| pair.clone());
    let mut i = 0;
    for pair in pair.into_inner() {
        assert_eq!(pair.as_rule(), expected_rules[i]);
        out[i] = pair;
        i += 1;
    }
    assert_eq!(i, N);
    out
}

/// Helper function to emit a custom error at the given span.
fn custom_error(span: Span<'_>, msg: &str) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::<Rule>::CustomError {
            message: msg.into(),
        },
        span,
    )
}

fn parse_number<T: FromStr>(pair: Pair<'_, Rule>) -> Result<T> {
    Ok(pair.as_str().parse().map_err(|_| {
        // The rule only allows digits so this can only be an overflow.
        custom_error(pair.as_span(), "integer overflow")
    })?)
}

fn parse_id_value(pair: Pair<'_, Rule>) -> Result<(u32, u32)> {
    let [id, value] = extract(pair, [Rule::number, Rule::number]);
    Ok((parse_number(id)?, parse_number(value)?))
}

fn parse_id(pair: Pair<'_, Rule>) -> Result<u32> {
    let [id] = extract(pair, [Rule::number]);
    parse_number(id)
}

fn parse_op(pair: Pair<'_, Rule>) -> Result<Op> {
    Ok(match pair.as_rule() {
        Rule::grow => {
            let [n] = extract(pair, [Rule::number]);
            Op::Grow(parse_number(n)?)
        }
        Rule::insert => {
            let (id, value) = parse_id_value(pair)?;
            Op::Insert(id, value)
        }
        Rule::replace => {
            let (id, value) = parse_id_value(pair)?;
            Op::Replace(id, value)
        }
        Rule::erase => Op::Erase(parse_id(pair)?),
        Rule::get => Op::Get(parse_id(pair)?),
        Rule::shrink => Op::Shrink,
        Rule::clear => Op::Clear,
        _ => unreachable!(),
    })
}

impl OpScript {
    /// Parses an `OpScript` from its text representation.
    ///
    /// Only the syntax is checked here: use
    /// [`validate_script`](crate::debug_utils::validate_script) to check that
    /// the script respects the preconditions of the set.
    pub fn parse(input: &str) -> Result<Self> {
        let script = ScriptParser::parse(Rule::script, input)?.next().unwrap();
        let mut ops = OpScript::new();
        for pair in script.into_inner() {
            if pair.as_rule() == Rule::EOI {
                break;
            }
            ops.push(parse_op(pair)?);
        }
        Ok(ops)
    }
}
