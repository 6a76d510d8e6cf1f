// src/noyau/postfixe.rs
//
// Machine à pile : RPN -> Rational
//
// - opérande        : lu en Rational, empilé
// - binaire         : op2 = pop, op1 = pop (op1 est l’opérande de gauche)
//     + - * /       : exact ; '/' par zéro exact => DivisionParZero
//     ^ ** %        : pont flottant (f64) puis retour en Rational
//     < <= > >= == != : comparaison exacte, 1 (vrai) ou 0 (faux)
// - "@"             : négation exacte d’un seul opérande
// - fonction        : pont flottant
// - fin             : exactement UNE valeur, sinon Malformee

use tracing::trace;

use super::erreur::Faute;
use super::jetons::{is_relational, Token, TokenKind, MOINS_UNAIRE};
use super::lecture::{float_to_rational, rational_to_float};
use super::rationnel::Rational;

fn depiler(pile: &mut Vec<Rational>, sous: &str) -> Result<Rational, Faute> {
    pile.pop().ok_or_else(|| Faute::PileVide(sous.to_string()))
}

/// Retour du pont flottant ; NaN / ±inf refusés.
fn pont(op: &str, f: f64) -> Result<Rational, Faute> {
    float_to_rational(f).ok_or_else(|| Faute::NonFini(op.to_string()))
}

/// Comparaison exacte : vrai -> 1, faux -> 0.
fn comparer(op: &str, op1: &Rational, op2: &Rational) -> Result<Rational, Faute> {
    let vrai = match op {
        "<" => op1 < op2,
        "<=" => op1 <= op2,
        ">" => op1 > op2,
        ">=" => op1 >= op2,
        "==" => op1 == op2,
        "!=" => op1 != op2,
        _ => return Err(Faute::JetonInconnu(op.to_string())),
    };
    Ok(Rational::from(vrai))
}

fn appliquer_binaire(op: &str, op1: &Rational, op2: &Rational) -> Result<Rational, Faute> {
    if is_relational(op) {
        return comparer(op, op1, op2);
    }
    let r = match op {
        "+" => op1 + op2,
        "-" => op1 - op2,
        "*" => op1 * op2,
        "/" => op1.checked_div(op2).ok_or(Faute::DivisionParZero)?,

        "^" | "**" => pont(op, rational_to_float(op1).powf(rational_to_float(op2)))?,
        "%" => pont(op, rational_to_float(op1) % rational_to_float(op2))?,

        _ => return Err(Faute::JetonInconnu(op.to_string())),
    };
    Ok(r)
}

fn appliquer_fonction(nom: &str, x: &Rational) -> Result<Rational, Faute> {
    let f = rational_to_float(x);
    let y = match nom {
        "sin" => f.sin(),
        "cos" => f.cos(),
        "tan" => f.tan(),
        "arcsin" => f.asin(),
        "arccos" => f.acos(),
        "arctan" => f.atan(),
        "ln" => f.ln(),
        "sqrt" => f.sqrt(),
        _ => return Err(Faute::JetonInconnu(nom.to_string())),
    };
    pont(nom, y)
}

/// Évalue une RPN. Aucun état hors de l’appel.
pub fn evaluate_postfix(rpn: &[Token]) -> Result<Rational, Faute> {
    let mut pile: Vec<Rational> = Vec::with_capacity(rpn.len());

    for tok in rpn {
        let t = tok.texte();
        match tok.kind() {
            TokenKind::Operand => {
                let r = t
                    .parse::<Rational>()
                    .map_err(|_| Faute::JetonInconnu(t.to_string()))?;
                pile.push(r);
            }

            TokenKind::Operator if t == MOINS_UNAIRE => {
                let x = depiler(&mut pile, t)?;
                pile.push(-x);
            }

            TokenKind::Operator => {
                let op2 = depiler(&mut pile, t)?;
                let op1 = depiler(&mut pile, t)?;
                pile.push(appliquer_binaire(t, &op1, &op2)?);
            }

            TokenKind::Function => {
                let x = depiler(&mut pile, t)?;
                pile.push(appliquer_fonction(t, &x)?);
            }

            TokenKind::OpenParen | TokenKind::CloseParen | TokenKind::Unknown => {
                return Err(Faute::JetonInconnu(t.to_string()));
            }
        }
    }

    trace!(profondeur = pile.len(), "fin de RPN");
    match (pile.pop(), pile.is_empty()) {
        (Some(r), true) => Ok(r),
        (Some(_), false) => Err(Faute::Malformee(pile.len() + 1)),
        (None, _) => Err(Faute::Malformee(0)),
    }
}
