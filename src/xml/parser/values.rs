//! Auswertung numerischer GDML-Attribute (Zahlen, Konstanten, einfache Ausdrücke).

use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Benannte Werte aus `<define>` (constant, variable, quantity)
#[derive(Debug, Clone, Default)]
pub(crate) struct Constants {
    values: HashMap<String, f64>,
}

impl Constants {
    pub(crate) fn insert(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    fn lookup(&self, name: &str) -> Option<f64> {
        if let Some(value) = self.values.get(name) {
            return Some(*value);
        }
        match name {
            "pi" => Some(PI),
            "twopi" => Some(2.0 * PI),
            "halfpi" => Some(PI / 2.0),
            _ => None,
        }
    }

    /// Wertet einen Ausdruck wie `2*pi`, `-half_length` oder `(a+b)/2` aus.
    pub(crate) fn evaluate(&self, text: &str) -> Result<f64> {
        let text = text.trim();
        if let Ok(value) = text.parse::<f64>() {
            return Ok(value);
        }

        let tokens = tokenize(text).with_context(|| format!("Ausdruck '{}' ungueltig", text))?;
        let mut parser = ExprParser {
            tokens: &tokens,
            pos: 0,
            constants: self,
        };
        let value = parser
            .expression()
            .with_context(|| format!("Ausdruck '{}' ungueltig", text))?;
        if parser.pos != tokens.len() {
            bail!("Ausdruck '{}' ungueltig: unerwartetes Ende", text);
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            // Exponent (1e-3, 2.5E+2)
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal
                .parse::<f64>()
                .with_context(|| format!("Zahl '{}' ungueltig", literal))?;
            tokens.push(Token::Number(value));
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else if "+-*/()".contains(c) {
            tokens.push(Token::Op(c));
            i += 1;
        } else {
            bail!("Zeichen '{}' nicht unterstuetzt", c);
        }
    }
    Ok(tokens)
}

struct ExprParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    constants: &'a Constants,
}

impl ExprParser<'_> {
    fn peek_op(&self) -> Option<char> {
        match self.tokens.get(self.pos) {
            Some(Token::Op(c)) => Some(*c),
            _ => None,
        }
    }

    fn expression(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek_op() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64> {
        let mut value = self.factor()?;
        while let Some(op @ ('*' | '/')) = self.peek_op() {
            self.pos += 1;
            let rhs = self.factor()?;
            value = if op == '*' { value * rhs } else { value / rhs };
        }
        Ok(value)
    }

    fn factor(&mut self) -> Result<f64> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or_else(|| anyhow!("Operand fehlt"))?;
        self.pos += 1;
        match token {
            Token::Number(value) => Ok(*value),
            Token::Ident(name) => self
                .constants
                .lookup(name)
                .ok_or_else(|| anyhow!("Unbekannte Konstante '{}'", name)),
            Token::Op('-') => Ok(-self.factor()?),
            Token::Op('+') => self.factor(),
            Token::Op('(') => {
                let value = self.expression()?;
                if self.peek_op() != Some(')') {
                    bail!("')' fehlt");
                }
                self.pos += 1;
                Ok(value)
            }
            Token::Op(c) => bail!("Unerwarteter Operator '{}'", c),
        }
    }
}

/// Liefert den Wert eines Attributs aus einer Attributliste.
pub(crate) fn attr<'a>(attributes: &'a [(String, String)], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Wie `attr`, aber Pflichtattribut.
pub(crate) fn required_attr<'a>(
    attributes: &'a [(String, String)],
    key: &str,
    tag: &str,
) -> Result<&'a str> {
    attr(attributes, key).ok_or_else(|| anyhow!("<{}> ohne Attribut '{}'", tag, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plain_numbers_and_constants() {
        let mut constants = Constants::default();
        constants.insert("half", 50.0);
        assert_relative_eq!(constants.evaluate("1.5e2").expect("Zahl"), 150.0);
        assert_relative_eq!(constants.evaluate(" half ").expect("Konstante"), 50.0);
        assert_relative_eq!(constants.evaluate("-half").expect("Negation"), -50.0);
    }

    #[test]
    fn test_expressions() {
        let mut constants = Constants::default();
        constants.insert("a", 3.0);
        assert_relative_eq!(constants.evaluate("2*pi").expect("Ausdruck"), 2.0 * PI);
        assert_relative_eq!(constants.evaluate("(a+1)/2").expect("Ausdruck"), 2.0);
        assert_relative_eq!(constants.evaluate("a-1-1").expect("Ausdruck"), 1.0);
        assert_relative_eq!(constants.evaluate("1e-3*a").expect("Ausdruck"), 0.003);
    }

    #[test]
    fn test_invalid_expressions() {
        let constants = Constants::default();
        assert!(constants.evaluate("unknown").is_err());
        assert!(constants.evaluate("(1+2").is_err());
        assert!(constants.evaluate("1 2").is_err());
        assert!(constants.evaluate("2^3").is_err());
    }
}
