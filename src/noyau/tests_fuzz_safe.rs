//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : jamais de panique, et une erreur est TOUJOURS
//!   DivideByZero ou InvalidExpression portant le texte d’origine

use std::time::{Duration, Instant};

use super::erreur::EvalError;
use super::eval::eval;
use super::rationnel::Rational;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn choisir<'a>(&mut self, v: &[&'a str]) -> &'a str {
        v[self.pick(v.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_erreur(expr: &str, e: &EvalError) {
    match e {
        EvalError::DivideByZero => {}
        EvalError::InvalidExpression { expression, .. } => {
            assert_eq!(expression, expr, "texte d’origine perdu");
        }
        autre => panic!("sorte d’erreur non attendue via la façade: expr={expr:?} err={autre:?}"),
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    rng.choisir(&["0", "1", "2", "3", "5", "0.5", ".25", "1.", "10", "2.75"])
        .to_string()
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(8) {
        0 => gen_nombre(rng),
        1 => {
            let op = rng.choisir(&["+", "-", "*", "/"]);
            format!("({}{op}{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1))
        }
        2 => {
            let op = rng.choisir(&["<", ">", "<=", ">=", "==", "!="]);
            format!("({} {op} {})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1))
        }
        3 => format!("-{}", gen_expr(rng, depth - 1)),
        4 => {
            let f = rng.choisir(&["sin", "cos", "arctan", "sqrt", "ln"]);
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
        5 => format!("{}**{}", gen_nombre(rng), rng.choisir(&["2", "0.5", "-1"])),
        6 => format!("{} % {}", gen_expr(rng, depth - 1), gen_nombre(rng)),
        _ => format!("{}*{}", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
    }
}

/// Bruit : on casse une expression valide (jetons en trop, parenthèses, lettres).
fn gen_bruit(rng: &mut Rng, base: &str) -> String {
    let bruit = rng.choisir(&["(", ")", "+", "*", "U", ".", "#", "--", "= ", " ", "sin"]);
    let chars: Vec<char> = base.chars().collect();
    let pos = rng.pick(chars.len() as u32 + 1) as usize;
    let mut out: String = chars[..pos].iter().collect();
    out.push_str(bruit);
    out.extend(chars[pos..].iter());
    out
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_sortes_d_erreur() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);
    let mut rng_bis = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        assert_eq!(expr, gen_expr(&mut rng_bis, 4));

        let r = eval(&expr);
        assert_eq!(r, eval(&expr), "non déterministe: {expr:?}");

        match r {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                check_erreur(&expr, &e);
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_entrees_cassees_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let expr = gen_bruit(&mut rng, &base);

        if let Err(e) = eval(&expr) {
            check_erreur(&expr, &e);
        }
    }
}

#[test]
fn fuzz_safe_caracteres_quelconques() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let alphabet = [
        "1", "9", ".", "+", "-", "*", "/", "^", "%", "<", ">", "=", "!", "(", ")", " ", "x",
        "s", "i", "n", "@", "é", "π", "\t",
    ];
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = rng.pick(12) as usize;
        let expr: String = (0..n).map(|_| rng.choisir(&alphabet)).collect();

        if let Err(e) = eval(&expr) {
            check_erreur(&expr, &e);
        }
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let expr = somme_balancee("1/2", 800);
    let r = eval(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(r, Rational::from(400i64));
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    let profondeur = 2000;
    let expr = format!("{}1{}", "(".repeat(profondeur), ")".repeat(profondeur));
    assert_eq!(eval(&expr), Ok(Rational::from(1i64)));

    let negations = format!("{}7{}", "-(".repeat(500), ")".repeat(500));
    assert_eq!(eval(&negations), Ok(Rational::from(7i64)));
}
