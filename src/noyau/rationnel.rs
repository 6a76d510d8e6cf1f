// src/noyau/rationnel.rs
//
// Rationnel exact (toujours réduit, dénominateur > 0).
// Newtype sur BigRational : la division est vérifiée (pas de panique),
// le reste de l’arithmétique est exact.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use thiserror::Error;

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

/// Littéral décimal refusé (ex: ".", "1.2.3", "x").
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("littéral décimal invalide: '{0}'")]
pub struct LitteralInvalide(pub String);

/// Nombre rationnel exact.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// n/d réduit.
    ///
    /// # Panics
    ///
    /// Panique si `d` est nul.
    pub fn new(n: BigInt, d: BigInt) -> Self {
        Self(BigRational::new(n, d))
    }

    /// Raccourci i64 (tests, constantes).
    ///
    /// # Panics
    ///
    /// Panique si `d` est nul.
    pub fn from_i64(n: i64, d: i64) -> Self {
        Self::new(BigInt::from(n), BigInt::from(d))
    }

    pub fn from_integer(n: BigInt) -> Self {
        Self(BigRational::from_integer(n))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    /// Partie entière tronquée vers zéro.
    pub fn trunc(&self) -> BigInt {
        self.0.trunc().to_integer()
    }

    /// Division exacte ; `None` si le diviseur est exactement nul.
    pub fn checked_div(&self, rhs: &Rational) -> Option<Rational> {
        if rhs.is_zero() {
            return None;
        }
        Some(Self(&self.0 / &rhs.0))
    }

    pub fn as_inner(&self) -> &BigRational {
        &self.0
    }
}

impl From<BigRational> for Rational {
    fn from(r: BigRational) -> Self {
        Self(r)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self(BigRational::from_integer(BigInt::from(n)))
    }
}

/// Vrai -> 1, faux -> 0 (résultat des comparaisons).
impl From<bool> for Rational {
    fn from(b: bool) -> Self {
        if b {
            Self::one()
        } else {
            Self::zero()
        }
    }
}

/* ------------------------ Littéral décimal ------------------------ */

/// Accepte : [+-]? ( D+ | D+. | D+.D+ | .D+ )
/// Refuse : "", ".", "-", "1.2.3", exposants, espaces.
impl FromStr for Rational {
    type Err = LitteralInvalide;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || LitteralInvalide(s.to_string());

        let (neg, corps) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (ent, frac) = corps.split_once('.').unwrap_or((corps, ""));
        if ent.is_empty() && frac.is_empty() {
            return Err(err());
        }
        let chiffres_ok = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if !chiffres_ok(ent) || !chiffres_ok(frac) {
            return Err(err());
        }

        // "12.345" -> 12345 / 10^3
        let mantisse = format!("{ent}{frac}");
        let n = BigInt::parse_bytes(mantisse.as_bytes(), 10).ok_or_else(err)?;
        let d = BigInt::from(10).pow(frac.len() as u32);

        let r = BigRational::new(n, d);
        Ok(Self(if neg { -r } else { r }))
    }
}

/* ------------------------ Traits num ------------------------ */

impl Zero for Rational {
    fn zero() -> Self {
        Self(BigRational::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(BigRational::one())
    }
}

/* ------------------------ Arithmétique exacte ------------------------ */

impl Add for Rational {
    type Output = Rational;

    fn add(self, rhs: Rational) -> Rational {
        Rational(self.0 + rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Rational;

    fn sub(self, rhs: Rational) -> Rational {
        Rational(self.0 - rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Rational;

    fn mul(self, rhs: Rational) -> Rational {
        Rational(self.0 * rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational(&self.0 * &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

/* ------------------------ Affichage ------------------------ */

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.numer();
        let d = self.denom();
        if d.is_one() {
            write!(f, "{n}")
        } else {
            write!(f, "{n}/{d}")
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}
