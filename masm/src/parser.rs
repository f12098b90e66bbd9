use matches::debug_assert_matches;
use pest::iterators::Pair;
use pest::{Parser, Span};
use pest_derive::Parser;

use crate::args::{parse_immediate, parse_register, Argument};
use crate::error::{AssembleError, Error};
use crate::instructions::Mnemonic;
use crate::program::Program;

#[derive(Parser)]
#[grammar = "masm.pest"]
pub struct MasmParser;

fn new_parser_error(span: Span, message: String) -> Error {
    Error::Parse(pest::error::Error::new_from_span(
        pest::error::ErrorVariant::CustomError { message },
        span,
    ))
}

/// Parses source text into a type-checked program with its label table.
pub fn parse_program(input: &str) -> Result<Program, Error> {
    let pair = MasmParser::parse(Rule::program, input)?.next().unwrap();
    process_program(pair)
}

fn process_program(pair: Pair<Rule>) -> Result<Program, Error> {
    debug_assert_matches!(pair.as_rule(), Rule::program);

    let mut program = Program::new();
    let mut label_refs = Vec::new();

    for statement in pair.into_inner() {
        match statement.as_rule() {
            Rule::label => {
                let identifier = statement.into_inner().next().unwrap();
                if !program.mark_label(identifier.as_str()) {
                    return Err(new_parser_error(
                        identifier.as_span(),
                        "Duplicate label".to_owned(),
                    ));
                }
            }
            Rule::instruction => process_instruction(statement, &mut program, &mut label_refs)?,
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    for (name, span) in label_refs {
        if !program.has_label(&name) {
            return Err(new_parser_error(span, "Label not found".to_owned()));
        }
    }

    Ok(program)
}

fn process_instruction<'i>(
    pair: Pair<'i, Rule>,
    program: &mut Program,
    label_refs: &mut Vec<(String, Span<'i>)>,
) -> Result<(), Error> {
    let mut pairs = pair.into_inner();
    let mnemonic_pair = pairs.next().unwrap();
    let mnemonic = Mnemonic::lookup(&mnemonic_pair.as_str().to_lowercase())
        .ok_or_else(|| AssembleError::UnknownInstruction(mnemonic_pair.as_str().to_owned()))?;

    let mut args = Vec::new();
    if let Some(arguments) = pairs.next() {
        debug_assert_matches!(arguments.as_rule(), Rule::arguments);
        for argument in arguments.into_inner() {
            process_argument(argument, &mut args, label_refs)?;
        }
    }

    program.push(mnemonic, args)?;
    Ok(())
}

fn process_argument<'i>(
    pair: Pair<'i, Rule>,
    args: &mut Vec<Argument>,
    label_refs: &mut Vec<(String, Span<'i>)>,
) -> Result<(), Error> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::immediate => {
            args.push(parse_immediate(strip_immediate(inner.as_str()))?);
        }
        Rule::memory => {
            let mut pairs = inner.into_inner();
            let register = pairs.next().unwrap();
            args.push(Argument::Register(parse_register(register.as_str())?));
            if let Some(offset) = pairs.next() {
                args.push(parse_immediate(strip_immediate(offset.as_str()))?);
            }
        }
        Rule::identifier => {
            // A bare identifier is a register if the name resolves,
            // otherwise a label reference.
            match parse_register(inner.as_str()) {
                Ok(id) => args.push(Argument::Register(id)),
                Err(_) => {
                    label_refs.push((inner.as_str().to_owned(), inner.as_span()));
                    args.push(Argument::Label(inner.as_str().to_owned()));
                }
            }
        }
        _ => unreachable!(),
    }
    Ok(())
}

// Drops the `#` marker and an explicit `+` sign; `parse_immediate`
// handles the rest.
fn strip_immediate(text: &str) -> &str {
    let text = if text.starts_with('#') { &text[1..] } else { text };
    if text.starts_with('+') {
        &text[1..]
    } else {
        text
    }
}
