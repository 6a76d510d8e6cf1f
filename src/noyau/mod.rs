//! Noyau exact Q-pur
//!
//! Organisation interne :
//! - rationnel.rs : nombre rationnel exact (newtype sur BigRational)
//! - lecture.rs   : conversions i64 / BigInt / f64 (pont flottant, 10 décimales)
//! - jetons.rs    : tokenisation + moins unaire + symboles
//! - rpn.rs       : shunting-yard (infixe -> postfixe)
//! - postfixe.rs  : machine à pile sur Rational
//! - erreur.rs    : erreurs publiques + fautes d’étape
//! - eval.rs      : pipeline complet (façade)

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod lecture;
pub mod postfixe;
pub mod rationnel;
pub mod rpn;


#[cfg(test)]
mod tests_fuzz_safe;


// API publique minimale
pub use eval::{eval, eval_with_variables};
