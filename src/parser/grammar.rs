//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::units::{parse_density, parse_length, UnitError};

/// Parse a screen specification such as `2560x1440/59.8cm@-2cm+1cm`
pub fn parse_screen(input: &str) -> Result<ScreenSpec, Vec<ParseError>> {
    let len = input.len();
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let decl = screen_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .map(ParseError::screen_syntax)
                .collect::<Vec<_>>()
        })?;

    lower_screen(&decl).map_err(|e| vec![e])
}

/// Parse a crop region such as `1920x1080+100-50`
pub fn parse_region(input: &str) -> Result<Region, Vec<ParseError>> {
    let len = input.len();
    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    let decl = region_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .map(ParseError::region_syntax)
                .collect::<Vec<_>>()
        })?;

    lower_region(&decl).map_err(|e| vec![e])
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn screen_parser<'a, I>() -> impl Parser<'a, I, ScreenDecl, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let integer = select! {
        Token::Integer(n) => n,
    }
    .map_with(|n, e| Spanned::new(n, span_range(&e.span())));

    let number = select! {
        Token::Integer(n) => f64::from(n),
        Token::Decimal(n) => n,
    };

    let unit = select! {
        Token::Word(w) => w,
    }
    .map_with(|w, e| Spanned::new(w, span_range(&e.span())));

    let quantity = number
        .clone()
        .then(unit.clone().or_not())
        .map_with(|(value, unit), e| Spanned::new(Quantity { value, unit }, span_range(&e.span())));

    // Vertical offsets may lie above the reference line
    let signed_quantity = just(Token::Minus)
        .or_not()
        .then(number)
        .then(unit.or_not())
        .map_with(|((neg, value), unit), e| {
            let value = if neg.is_some() { -value } else { value };
            Spanned::new(Quantity { value, unit }, span_range(&e.span()))
        });

    integer
        .clone()
        .then_ignore(just(Token::Times))
        .then(integer)
        .then_ignore(just(Token::Slash))
        .then(quantity.clone())
        .then(just(Token::At).ignore_then(signed_quantity).or_not())
        .then(just(Token::Plus).ignore_then(quantity).or_not())
        .then_ignore(end())
        .map(|((((width, height), density), top), gap)| ScreenDecl {
            width,
            height,
            density,
            top,
            gap,
        })
}

fn region_parser<'a, I>() -> impl Parser<'a, I, RegionDecl, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let integer = select! {
        Token::Integer(n) => n,
    };

    let spanned_integer = integer
        .clone()
        .map_with(|n, e| Spanned::new(n, span_range(&e.span())));

    let side = choice((
        just(Token::Plus).to(Side::Start),
        just(Token::Minus).to(Side::End),
    ));

    let offset = side.then(integer);

    spanned_integer
        .clone()
        .then_ignore(just(Token::Times))
        .then(spanned_integer)
        .then(offset.clone().or_not())
        .then(offset.or_not())
        .then_ignore(end())
        .map(|(((width, height), x), y)| RegionDecl {
            width,
            height,
            x,
            y,
        })
}

fn positive(size: &Spanned<u32>, what: &str) -> Result<u32, ParseError> {
    if size.node == 0 {
        return Err(ParseError::invalid_value(
            size.span.clone(),
            format!("{} must be a positive number of pixels", what),
        ));
    }
    Ok(size.node)
}

fn unit_error(quantity: &Spanned<Quantity>, err: UnitError) -> ParseError {
    let span = quantity
        .node
        .unit
        .as_ref()
        .map(|u| u.span.clone())
        .unwrap_or_else(|| quantity.span.clone());
    match err {
        UnitError::InvalidUnit { unit } => ParseError::InvalidUnit { unit, span },
    }
}

fn length(quantity: Option<&Spanned<Quantity>>) -> Result<f64, ParseError> {
    let Some(quantity) = quantity else {
        return Ok(0.0);
    };
    parse_length(Some(quantity.node.value), quantity.node.unit_str())
        .map(|m| m.unwrap_or(0.0))
        .map_err(|e| unit_error(quantity, e))
}

/// Resolve the units of a parsed screen declaration
fn lower_screen(decl: &ScreenDecl) -> Result<ScreenSpec, ParseError> {
    let width_px = positive(&decl.width, "width")?;
    let height_px = positive(&decl.height, "height")?;

    let density = &decl.density;
    if !density.node.value.is_finite() || density.node.value <= 0.0 {
        return Err(ParseError::invalid_value(
            density.span.clone(),
            "density must be a positive finite number",
        ));
    }
    let density_ppm = parse_density(width_px, density.node.value, density.node.unit_str())
        .map_err(|e| unit_error(density, e))?;
    if !density_ppm.is_finite() {
        return Err(ParseError::invalid_value(
            density.span.clone(),
            "density is out of range",
        ));
    }

    Ok(ScreenSpec {
        width_px,
        height_px,
        density_ppm,
        top_m: length(decl.top.as_ref())?,
        gap_m: length(decl.gap.as_ref())?,
    })
}

fn lower_region(decl: &RegionDecl) -> Result<Region, ParseError> {
    let (x_side, x_px) = decl.x.unwrap_or_default();
    let (y_side, y_px) = decl.y.unwrap_or_default();
    Ok(Region {
        width_px: positive(&decl.width, "width")?,
        height_px: positive(&decl.height, "height")?,
        x_px,
        x_side,
        y_px,
        y_side,
    })
}
