// src/noyau/erreur.rs
//
// Deux niveaux d’erreurs :
// - Faute     : ce que remontent les étapes (jetons / RPN / pile)
// - EvalError : ce que voit l’appelant de la façade (4 sortes seulement)

use thiserror::Error;

/// Erreur publique de l’évaluateur.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Expression mal formée (parenthèses, opérandes manquants, jeton inconnu…).
    #[error("Invalid Expression: {expression} ({detail})")]
    InvalidExpression { expression: String, detail: String },

    #[error("Divide by Zero")]
    DivideByZero,

    /// Jeton ni opérande, ni opérateur, ni fonction (niveau machine à pile).
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// Conversion entière hors de la largeur cible.
    #[error("Overflow: value does not fit in 64 bits")]
    Overflow,
}

/// Faute d’étape (tokenisation, conversion, évaluation postfixe).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Faute {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("jeton inconnu: '{0}'")]
    JetonInconnu(String),

    /// Opérateur ou fonction sans assez d’opérandes sur la pile.
    #[error("pile vide sous '{0}'")]
    PileVide(String),

    /// Fin de RPN : la pile doit contenir exactement une valeur.
    #[error("expression mal formée: {0} valeur(s) restante(s)")]
    Malformee(usize),

    /// Le pont flottant a produit NaN ou ±inf.
    #[error("résultat non fini pour '{0}'")]
    NonFini(String),

    /// Entrée refusée avant toute analyse (garde-fou taille).
    #[error("entrée trop longue: {0} caractères")]
    TropLong(usize),
}

impl Faute {
    /// Démotion vers l’erreur publique : tout sauf la division par zéro
    /// devient `InvalidExpression` avec le texte d’origine.
    pub fn en_erreur(self, expression: &str) -> EvalError {
        match self {
            Faute::DivisionParZero => EvalError::DivideByZero,
            autre => EvalError::InvalidExpression {
                expression: expression.to_string(),
                detail: autre.to_string(),
            },
        }
    }

    /// Vue « machine à pile » : le jeton inconnu garde sa sorte propre.
    pub fn en_erreur_etape(self, expression: &str) -> EvalError {
        match self {
            Faute::JetonInconnu(t) => EvalError::UnknownToken(t),
            autre => autre.en_erreur(expression),
        }
    }
}
