// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> RPN (postfix)
//
// Règles:
// - opérande            : sortie directe
// - symbole (inconnu)   : texte de remplacement si présent dans la table,
//                         sinon le jeton brut (échec différé à l’évaluation)
// - opérateur           : dépile EN BOUCLE tant que prec(sommet) >= prec(op)
// - '@' (préfixe)       : associatif à droite, dépile tant que prec(sommet) > 4
// - fonction            : UN SEUL test du sommet, puis empile
// - '(' empile ; ')' dépile jusqu’à '(' (une ')' orpheline ne fait rien)
// - fin                 : vide la pile (LIFO), '(' restantes comprises
//
// Précédences : + - (1) ; * / (2) ; ^ ** % (3) ; @ (4) ; fonctions (5) ;
// relationnels et '(' tombent à 0.

use tracing::trace;

use super::jetons::{is_function, Symboles, Token, TokenKind, MOINS_UNAIRE};

const PRECEDENCE_FONCTION: u8 = 5;

fn precedence(t: &str) -> u8 {
    match t {
        "+" | "-" => 1,
        "*" | "/" => 2,
        "^" | "**" | "%" => 3,
        MOINS_UNAIRE => 4,
        _ if is_function(t) => PRECEDENCE_FONCTION,
        _ => 0,
    }
}

fn est_ouvrante(t: &Token) -> bool {
    t.texte() == "("
}

/// Opérateur : sort tous les opérateurs de précédence >= avant d’empiler.
/// Le moins unaire est préfixe : un '@' déjà empilé attend encore son
/// opérande, seul un sommet strictement plus fort sort.
fn pousser_operateur(pile: &mut Vec<Token>, sortie: &mut Vec<Token>, op: Token) {
    let p_op = precedence(op.texte());
    let prefixe = op.texte() == MOINS_UNAIRE;
    while let Some(top) = pile.last() {
        let p_top = precedence(top.texte());
        if est_ouvrante(top) || p_top < p_op || (prefixe && p_top == p_op) {
            break;
        }
        if let Some(t) = pile.pop() {
            sortie.push(t);
        }
    }
    pile.push(op);
}

/// Fonction : un seul test du sommet (pas de boucle), puis empile.
fn pousser_fonction(pile: &mut Vec<Token>, sortie: &mut Vec<Token>, fonction: Token) {
    let doit_pop = pile
        .last()
        .is_some_and(|top| !est_ouvrante(top) && precedence(top.texte()) >= PRECEDENCE_FONCTION);
    if doit_pop {
        if let Some(t) = pile.pop() {
            sortie.push(t);
        }
    }
    pile.push(fonction);
}

/// ')' : dépile jusqu’à '(' puis la jette. Sans '(' : vide la pile, rien d’autre.
fn fermer_parenthese(pile: &mut Vec<Token>, sortie: &mut Vec<Token>) {
    while let Some(top) = pile.pop() {
        if est_ouvrante(&top) {
            break;
        }
        sortie.push(top);
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [sin, (, 1, ), +, 1]
///   rpn:    [1, sin, 1, +]
pub fn to_rpn(jetons: &[Token], symboles: &Symboles) -> Vec<Token> {
    let mut sortie: Vec<Token> = Vec::with_capacity(jetons.len());
    let mut pile: Vec<Token> = Vec::new();

    for tok in jetons.iter().cloned() {
        match tok.kind() {
            TokenKind::Operand => sortie.push(tok),
            TokenKind::Operator => pousser_operateur(&mut pile, &mut sortie, tok),
            TokenKind::Function => pousser_fonction(&mut pile, &mut sortie, tok),
            TokenKind::OpenParen => pile.push(tok),
            TokenKind::CloseParen => fermer_parenthese(&mut pile, &mut sortie),
            TokenKind::Unknown => match symboles.get(tok.texte()) {
                Some(valeur) => sortie.push(Token::new(valeur.as_str())),
                None => sortie.push(tok),
            },
        }
    }

    // vide la pile ops
    while let Some(op) = pile.pop() {
        sortie.push(op);
    }

    trace!(rpn = sortie.len(), "shunting-yard");
    sortie
}
