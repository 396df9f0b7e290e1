//! Dice formula parsing
//!
//! Supports standard notation: `XdY`, `dY`, keep highest/lowest (`kh`, `kl`,
//! with an optional count) and flat modifiers, e.g. `1d20 + 5`, `4d6kh3`,
//! `d20+1d4-1`.

use crate::domain::entities::{
    DiceError, DieTerm, KeepRule, MAX_DICE_PER_TERM, MAX_DIE_FACES, MAX_TERMS,
};

/// Die terms and flat modifier of a parsed formula.
#[derive(Debug, Clone)]
pub struct ParsedFormula {
    pub terms: Vec<DieTerm>,
    pub modifier: i32,
}

/// Parse a dice notation string.
///
/// Whitespace separates tokens but never joins them: every operand must be
/// preceded by an operator, except a leading one.
pub fn parse_formula(notation: &str) -> Result<ParsedFormula, DiceError> {
    let notation = notation.trim().to_lowercase();
    if notation.is_empty() {
        return Err(DiceError::NoDice);
    }

    let mut terms = Vec::new();
    let mut modifier: i32 = 0;
    let mut current = String::new();
    let mut sign: i32 = 1;
    let mut last_was_operator = false;
    // An operand ended and no operator has followed it yet
    let mut after_operand = false;

    for ch in notation.chars() {
        match ch {
            '+' | '-' => {
                if !current.is_empty() {
                    parse_component(&current, sign, &mut terms, &mut modifier)?;
                    current.clear();
                } else if last_was_operator {
                    return Err(DiceError::InvalidNotation(notation.clone()));
                }
                sign = if ch == '+' { 1 } else { -1 };
                last_was_operator = true;
                after_operand = false;
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    parse_component(&current, sign, &mut terms, &mut modifier)?;
                    current.clear();
                    after_operand = true;
                }
            }
            _ => {
                if current.is_empty() && after_operand {
                    // Two operands with only whitespace between them
                    return Err(DiceError::InvalidNotation(notation.clone()));
                }
                current.push(ch);
                last_was_operator = false;
            }
        }
    }

    if !current.is_empty() {
        parse_component(&current, sign, &mut terms, &mut modifier)?;
    } else if last_was_operator {
        return Err(DiceError::InvalidNotation(notation));
    }

    if terms.is_empty() {
        return Err(DiceError::NoDice);
    }

    Ok(ParsedFormula { terms, modifier })
}

fn parse_component(
    s: &str,
    sign: i32,
    terms: &mut Vec<DieTerm>,
    modifier: &mut i32,
) -> Result<(), DiceError> {
    let Some(d_pos) = s.find('d') else {
        let value: i32 = s
            .parse()
            .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;
        *modifier = modifier
            .checked_add(sign * value)
            .ok_or_else(|| DiceError::InvalidNotation(s.to_string()))?;
        return Ok(());
    };

    if sign < 0 {
        // Subtracted dice are not part of any supported roll shape
        return Err(DiceError::InvalidNotation(format!("-{s}")));
    }

    let count_str = &s[..d_pos];
    let rest = &s[d_pos + 1..];

    let count: u32 = if count_str.is_empty() {
        1
    } else {
        count_str
            .parse()
            .map_err(|_| DiceError::InvalidNotation(s.to_string()))?
    };
    if count == 0 {
        return Err(DiceError::NoDice);
    }
    if count > MAX_DICE_PER_TERM {
        return Err(DiceError::TooManyDice(count));
    }

    let (sides_str, keep) = if let Some(pos) = rest.find("kh") {
        (&rest[..pos], Some(KeepRule::Highest(parse_keep(&rest[pos + 2..], s)?)))
    } else if let Some(pos) = rest.find("kl") {
        (&rest[..pos], Some(KeepRule::Lowest(parse_keep(&rest[pos + 2..], s)?)))
    } else {
        (rest, None)
    };

    let faces: u32 = sides_str
        .parse()
        .map_err(|_| DiceError::InvalidNotation(s.to_string()))?;
    if !(2..=MAX_DIE_FACES).contains(&faces) {
        return Err(DiceError::InvalidDieSize(faces));
    }

    if terms.len() >= MAX_TERMS {
        return Err(DiceError::TooManyTerms(MAX_TERMS));
    }

    let mut term = DieTerm::new(count, faces);
    if let Some(keep) = keep {
        if keep.count() > count {
            return Err(DiceError::InvalidKeepCount {
                keep: keep.count(),
                count,
                notation: s.to_string(),
            });
        }
        term = term.with_keep(keep);
    }
    terms.push(term);

    Ok(())
}

/// `kh` alone keeps one die.
fn parse_keep(count: &str, component: &str) -> Result<u32, DiceError> {
    if count.is_empty() {
        return Ok(1);
    }
    count
        .parse()
        .map_err(|_| DiceError::InvalidNotation(component.to_string()))
}
