// src/noyau/jetons.rs
//
// Tokenisation : texte -> suite ordonnée de jetons (sans espaces).
//
// Règles:
// - nombres décimaux : 12, 1.5, .5, 1.  (un "." seul reste un jeton inconnu)
// - opérateurs : + - * / ^ ** % < > <= >= == !=
// - moins unaire : un '-' en début d’entrée, après un opérateur ou après '('
//   devient le jeton synthétique "@"
// - fonctions : sin cos tan arcsin arccos arctan ln sqrt
// - symboles : noms présents dans la table fournie pour CET appel
// - tout autre caractère devient son propre jeton (échec différé à l’évaluation)
//
// La sorte d’un jeton n’est jamais stockée : elle se déduit du texte.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use super::rationnel::Rational;

/// Table de symboles d’un appel : nom -> texte littéral de remplacement.
pub type Symboles = HashMap<String, String>;

/// Jeton synthétique du moins unaire (jamais lu tel quel dans l’entrée).
pub const MOINS_UNAIRE: &str = "@";

pub const FONCTIONS: [&str; 8] = [
    "sin", "cos", "tan", "arcsin", "arccos", "arctan", "ln", "sqrt",
];

const OPERATEURS_DOUBLES: [&str; 5] = ["**", "<=", ">=", "==", "!="];
const OPERATEURS_SIMPLES: [char; 8] = ['+', '-', '*', '/', '^', '%', '<', '>'];
const RELATIONNELS: [&str; 6] = ["<", ">", "<=", ">=", "==", "!="];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Operand,
    Operator,
    Function,
    OpenParen,
    CloseParen,
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(texte: impl Into<String>) -> Self {
        Self(texte.into())
    }

    pub fn texte(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> TokenKind {
        classer(&self.0)
    }

    pub fn into_texte(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/* ------------------------ Classification (prédicats purs) ------------------------ */

pub fn is_operator(t: &str) -> bool {
    t == MOINS_UNAIRE
        || OPERATEURS_DOUBLES.contains(&t)
        || (t.chars().count() == 1 && t.chars().all(|c| OPERATEURS_SIMPLES.contains(&c)))
}

pub fn is_relational(t: &str) -> bool {
    RELATIONNELS.contains(&t)
}

pub fn is_function(t: &str) -> bool {
    FONCTIONS.contains(&t)
}

/// Opérande = littéral décimal lisible en Rational (signe accepté, pour
/// les remplacements de symboles comme "-.5").
pub fn is_operand(t: &str) -> bool {
    t.parse::<Rational>().is_ok()
}

pub fn classer(t: &str) -> TokenKind {
    if t == "(" {
        TokenKind::OpenParen
    } else if t == ")" {
        TokenKind::CloseParen
    } else if is_operator(t) {
        TokenKind::Operator
    } else if is_function(t) {
        TokenKind::Function
    } else if is_operand(t) {
        TokenKind::Operand
    } else {
        TokenKind::Unknown
    }
}

/* ------------------------ Tokenisation ------------------------ */

/// Tokenize sans table de symboles (usage diagnostic).
pub fn tokenize(expr: &str) -> Vec<String> {
    decouper(expr, &Symboles::new())
        .into_iter()
        .map(Token::into_texte)
        .collect()
}

/// Tokenize avec la table de symboles de l’appel.
pub fn decouper(expr: &str, symboles: &Symboles) -> Vec<Token> {
    let chars: Vec<char> = expr.chars().collect();
    let mut out: Vec<Token> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' || c == ')' {
            out.push(Token::new(c));
            i += 1;
            continue;
        }

        // Nombre : D* ( . D* )?  (au moins un caractère consommé)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            out.push(Token::new(chars[start..i].iter().collect::<String>()));
            continue;
        }

        // Opérateurs (les doubles d’abord : "**" avant "*", "<=" avant "<")
        if let Some(op) = operateur_en(&chars, i) {
            i += op.len();
            if op == "-" && attend_operande(out.last()) {
                out.push(Token::new(MOINS_UNAIRE));
            } else {
                out.push(Token::new(op));
            }
            continue;
        }

        // Identifiants : [a-zA-Z_][a-zA-Z0-9_]*  -> fonctions / symboles
        if c.is_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            out.extend(decouper_mot(&mot, symboles));
            continue;
        }

        // Caractère isolé (ex: '#', '=', '!') : jeton inconnu
        out.push(Token::new(c));
        i += 1;
    }

    trace!(expr, jetons = out.len(), "tokenisation");
    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::texte)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Opérateur (ASCII) qui commence en `i`, le plus long d’abord.
fn operateur_en(chars: &[char], i: usize) -> Option<String> {
    if i + 1 < chars.len() {
        let deux: String = chars[i..i + 2].iter().collect();
        if OPERATEURS_DOUBLES.contains(&deux.as_str()) {
            return Some(deux);
        }
    }
    let c = chars[i];
    OPERATEURS_SIMPLES.contains(&c).then(|| c.to_string())
}

/// Vrai si le prochain jeton doit être un opérande : début d’entrée,
/// après un opérateur (relationnels et "@" compris) ou après '('.
fn attend_operande(prev: Option<&Token>) -> bool {
    match prev {
        None => true,
        Some(t) => t.texte() == "(" || is_operator(t.texte()),
    }
}

/// Découpe un identifiant en fonctions / symboles connus.
///
/// - mot exact (fonction ou symbole) : un seul jeton ("tan" reste "tan",
///   même si "t" est un symbole)
/// - sinon : plus long nom connu à chaque position ("sinx" -> sin, x),
///   les morceaux non reconnus restent groupés ("pix" -> "pix")
fn decouper_mot(mot: &str, symboles: &Symboles) -> Vec<Token> {
    if is_function(mot) || symboles.contains_key(mot) {
        return vec![Token::new(mot)];
    }

    let noms: Vec<&str> = FONCTIONS
        .iter()
        .copied()
        .chain(symboles.keys().map(String::as_str))
        .filter(|n| !n.is_empty())
        .collect();

    let mut out = Vec::new();
    let mut reste = String::new();
    let mut i = 0;

    while i < mot.len() {
        let suite = &mot[i..];
        let plus_long = noms
            .iter()
            .filter(|n| suite.starts_with(**n))
            .max_by_key(|n| n.len());

        match plus_long {
            Some(nom) => {
                if !reste.is_empty() {
                    out.push(Token::new(std::mem::take(&mut reste)));
                }
                out.push(Token::new(*nom));
                i += nom.len();
            }
            None => {
                let Some(c) = suite.chars().next() else { break };
                reste.push(c);
                i += c.len_utf8();
            }
        }
    }

    if !reste.is_empty() {
        out.push(Token::new(reste));
    }
    out
}
