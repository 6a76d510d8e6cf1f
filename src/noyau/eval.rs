//! Noyau : évaluation (pipeline réel)
//!
//! garde-fou taille -> jetons -> RPN -> machine à pile -> Rational
//!
//! Toute faute d’étape est remontée par `Result` ; la façade la rabat sur
//! `EvalError` (division par zéro à part, le reste en `InvalidExpression`
//! avec le texte d’origine).

use std::collections::HashMap;

use tracing::debug;

use super::erreur::{EvalError, Faute};
use super::jetons::{decouper, format_tokens, Symboles, Token};
use super::postfixe::evaluate_postfix;
use super::rationnel::Rational;
use super::rpn::to_rpn;

/// Garde-fou : longueur maximale d’une expression (en caractères).
pub const LONGUEUR_MAX: usize = 10_000;

/// Trace lisible du pipeline (jetons puis RPN, séparés par des espaces).
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
}

/// Évalue une expression sans variables.
///
/// ```
/// use evaluateur_qpur::{eval, Rational};
/// assert_eq!(eval("5 / 2").unwrap(), Rational::from_i64(5, 2));
/// ```
pub fn eval(expr: &str) -> Result<Rational, EvalError> {
    eval_with_variables(expr, &Symboles::new())
}

/// Évalue avec une table de symboles propre à CET appel (empruntée, jamais
/// conservée).
pub fn eval_with_variables(
    expr: &str,
    variables: &HashMap<String, String>,
) -> Result<Rational, EvalError> {
    eval_detaille(expr, variables).map(|(r, _)| r)
}

/// API détaillée : résultat + démarche (jetons, RPN).
pub fn eval_detaille(
    expr: &str,
    variables: &HashMap<String, String>,
) -> Result<(Rational, Demarche), EvalError> {
    // 0) Garde-fou taille (validation en amont, pas d’annulation en cours de route)
    let longueur = expr.chars().count();
    if longueur > LONGUEUR_MAX {
        return Err(Faute::TropLong(longueur).en_erreur(expr));
    }

    // 1) Jetons
    let jetons = decouper(expr, variables);

    // 2) RPN
    let rpn = to_rpn(&jetons, variables);

    let demarche = Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_tokens(&rpn),
    };
    debug!(expr, jetons = %demarche.jetons, rpn = %demarche.rpn, "évaluation");

    // 3) Machine à pile
    match evaluate_postfix(&rpn) {
        Ok(r) => {
            debug!(expr, resultat = %r, "évaluation réussie");
            Ok((r, demarche))
        }
        Err(faute) => {
            debug!(expr, %faute, "évaluation refusée");
            Err(faute.en_erreur(expr))
        }
    }
}

/// Rejoue une RPN déjà écrite (jetons séparés par des espaces, ex: le champ
/// `rpn` d’une `Demarche`).
///
/// Vue « étape » : un jeton que la machine à pile ne sait pas lire remonte
/// en `UnknownToken` au lieu d’être rabattu en `InvalidExpression`.
pub fn eval_rpn(rpn: &str) -> Result<Rational, EvalError> {
    let longueur = rpn.chars().count();
    if longueur > LONGUEUR_MAX {
        return Err(Faute::TropLong(longueur).en_erreur(rpn));
    }

    let jetons: Vec<Token> = rpn.split_whitespace().map(Token::new).collect();
    evaluate_postfix(&jetons).map_err(|faute| {
        debug!(rpn, %faute, "rejeu RPN refusé");
        faute.en_erreur_etape(rpn)
    })
}
