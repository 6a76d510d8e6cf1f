// src/lib.rs
//
// Évaluateur Q-pur : expressions infixes évaluées en rationnels exacts.
// -------------------------------------------------------------------
// Pipeline : texte -> jetons -> RPN (shunting-yard) -> pile -> Rational
//
// Aucun état global : chaque appel construit ses jetons, ses piles et
// reçoit sa table de symboles en emprunt.

pub mod noyau;

pub use noyau::erreur::EvalError;
pub use noyau::eval::{eval, eval_detaille, eval_rpn, eval_with_variables, Demarche};
pub use noyau::jetons::{tokenize, Token, TokenKind};
pub use noyau::lecture::{
    float_to_rational, rational_to_bigint, rational_to_float, rational_to_int,
};
pub use noyau::rationnel::Rational;
