// src/noyau/lecture.rs
//
// Conversions Rational <-> i64 / BigInt / f64.
//
// Pont flottant (perte assumée) :
// - Rational -> f64 : arrondi à DIGITS_PONT décimales (demi loin de zéro),
//   puis lecture du texte décimal.
// - f64 -> Rational : valeur exacte de la plus courte écriture décimale
//   du flottant (`Display` de f64, sans exposant).

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use super::erreur::EvalError;
use super::rationnel::Rational;

/// Nombre de décimales conservées quand un rationnel passe en f64.
pub const DIGITS_PONT: usize = 10;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    let abs = scaled.abs();

    let scale = pow10(digits);
    let int_part = &abs / &scale;
    let frac_part = &abs % &scale;

    let signe = if neg { "-" } else { "" };
    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// r -> round(r * 10^digits), demi loin de zéro.
fn rational_scaled_round(r: &Rational, digits: usize) -> BigInt {
    let scale = Rational::from_integer(pow10(digits));
    (r * &scale).as_inner().round().to_integer()
}

/* ------------------------ API de conversion ------------------------ */

/// Partie entière tronquée vers zéro, refusée hors i64.
pub fn rational_to_int(r: &Rational) -> Result<i64, EvalError> {
    r.trunc().to_i64().ok_or(EvalError::Overflow)
}

/// Partie entière tronquée vers zéro (jamais d’échec).
pub fn rational_to_bigint(r: &Rational) -> BigInt {
    r.trunc()
}

/// Approximation flottante à DIGITS_PONT décimales.
/// Une magnitude hors de f64 donne ±inf.
pub fn rational_to_float(r: &Rational) -> f64 {
    let texte = scaled_to_decimal(&rational_scaled_round(r, DIGITS_PONT), DIGITS_PONT);
    // le texte est toujours un décimal bien formé
    texte.parse::<f64>().unwrap_or(f64::NAN)
}

/// Rationnel exact de l’écriture décimale la plus courte de `f`.
/// `None` pour NaN et ±inf.
pub fn float_to_rational(f: f64) -> Option<Rational> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}").parse().ok()
}
