use winnow::combinator::{fail, opt, preceded, trace};
use winnow::error::{ModalResult, StrContext};
use winnow::token::{take, take_till, take_while};
use winnow::Parser;

type Summary<'a> = (&'a str, Option<&'a str>, &'a str);

/// Match the whole grammar once against the start of `i`.
///
/// The subject is returned with trailing whitespace removed; it may be empty,
/// and so may the scope. Deciding what an empty field means is up to the
/// caller.
pub(crate) fn parse<'a>(i: &mut &'a str) -> ModalResult<Summary<'a>> {
    trace("summary", summary).parse_next(i)
}

// <LF>              ::= "0x000A"
//
// A lone <CR> stays part of the line; a <CR> before <LF> is trimmed with the
// subject.
fn is_line_ending(c: char) -> bool {
    c == '\n'
}

// <TAB>             ::= "U+0009"
// <FF>              ::= "U+000C"
// <SP>              ::= "U+0020"
// <whitespace>      ::= <TAB> | <FF> | <SP>
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0C')
}

// <summary>         ::= <type>, ["(", <scope>, ")"], <separator>, <subject>
fn summary<'a>(i: &mut &'a str) -> ModalResult<Summary<'a>> {
    (
        trace("type", type_),
        opt(trace("scope_block", scope_block)),
        preceded(separator, trace("subject", subject)),
    )
        .parse_next(i)
}

// <type>            ::= ("a".."z" | "A".."Z")+
pub(crate) fn type_<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphabetic())
        .context(StrContext::Label(TYPE))
        .parse_next(i)
}

pub(crate) const TYPE: &str = "type";

// <scope>           ::= <any UTF8-octets except newline>*
//
// The closing paren is the last one on the line that is directly followed by
// a <separator>, so a scope may itself contain parens.
fn scope_block<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    '('.parse_next(i)?;

    let line = &i[..i.find(is_line_ending).unwrap_or(i.len())];
    let close = line
        .rmatch_indices(')')
        .map(|(offset, _)| offset)
        .find(|offset| separator.parse_peek(&line[offset + 1..]).is_ok());
    let Some(close) = close else {
        return fail.context(StrContext::Label(SCOPE)).parse_next(i);
    };

    let scope = take(line[..close].chars().count()).parse_next(i)?;
    ')'.parse_next(i)?;
    Ok(scope)
}

pub(crate) const SCOPE: &str = "scope";

// <separator>       ::= ":", <whitespace>+
fn separator(i: &mut &str) -> ModalResult<()> {
    (':', take_while(1.., is_whitespace))
        .void()
        .context(StrContext::Label(SEPARATOR))
        .parse_next(i)
}

pub(crate) const SEPARATOR: &str = "separator";

// <subject>         ::= <any UTF8-octets except newline>*
fn subject<'a>(i: &mut &'a str) -> ModalResult<&'a str> {
    take_till(0.., is_line_ending)
        .map(str::trim_end)
        .parse_next(i)
}
