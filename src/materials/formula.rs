//! Parser für Summenformeln (`H2O`, `CaCO3`, `C6H4(CH3)2`).

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Element mit optionaler Anzahl, öffnende Klammer, schließende Klammer mit Anzahl
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]?)(\d*)|(\()|\)(\d*)").expect("Formel-Regex ist konstant gültig")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Formel ist leer")]
    Empty,
    #[error("Unerwartetes Zeichen '{1}' an Position {0}")]
    UnexpectedChar(usize, char),
    #[error("Klammern nicht ausgeglichen")]
    UnbalancedParentheses,
    #[error("Anzahl 0 an Position {0}")]
    ZeroCount(usize),
}

fn parse_count(text: &str, position: usize) -> Result<u32, FormulaError> {
    if text.is_empty() {
        return Ok(1);
    }
    match text.parse::<u32>() {
        Ok(0) => Err(FormulaError::ZeroCount(position)),
        Ok(count) => Ok(count),
        Err(_) => Err(FormulaError::UnexpectedChar(position, '#')),
    }
}

fn merge(target: &mut Vec<(String, u32)>, symbol: &str, count: u32) {
    match target.iter_mut().find(|(s, _)| s == symbol) {
        Some((_, existing)) => *existing = existing.saturating_add(count),
        None => target.push((symbol.to_string(), count)),
    }
}

/// Zerlegt eine Summenformel in (Symbol, Atomanzahl)-Paare.
///
/// Die Reihenfolge folgt dem ersten Auftreten; mehrfach vorkommende
/// Symbole werden zusammengefasst. Ob ein Symbol ein echtes Element ist,
/// wird hier nicht geprüft.
pub fn parse_formula(formula: &str) -> Result<Vec<(String, u32)>, FormulaError> {
    let formula = formula.trim();
    if formula.is_empty() {
        return Err(FormulaError::Empty);
    }

    let mut stack: Vec<Vec<(String, u32)>> = vec![Vec::new()];
    let mut position = 0;

    for caps in TOKEN.captures_iter(formula) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() != position {
            let c = formula[position..].chars().next().unwrap_or('?');
            return Err(FormulaError::UnexpectedChar(position, c));
        }
        position = whole.end();

        if let Some(symbol) = caps.get(1) {
            let count = parse_count(caps.get(2).map_or("", |m| m.as_str()), whole.start())?;
            if let Some(group) = stack.last_mut() {
                merge(group, symbol.as_str(), count);
            }
        } else if caps.get(3).is_some() {
            stack.push(Vec::new());
        } else {
            let count = parse_count(caps.get(4).map_or("", |m| m.as_str()), whole.start())?;
            if stack.len() < 2 {
                return Err(FormulaError::UnbalancedParentheses);
            }
            let group = stack.pop().unwrap_or_default();
            if let Some(outer) = stack.last_mut() {
                for (symbol, n) in group {
                    merge(outer, &symbol, n.saturating_mul(count));
                }
            }
        }
    }

    if position != formula.len() {
        let c = formula[position..].chars().next().unwrap_or('?');
        return Err(FormulaError::UnexpectedChar(position, c));
    }
    if stack.len() != 1 {
        return Err(FormulaError::UnbalancedParentheses);
    }
    let atoms = stack.pop().unwrap_or_default();
    if atoms.is_empty() {
        return Err(FormulaError::Empty);
    }
    Ok(atoms)
}
