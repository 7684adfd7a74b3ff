// Copyright (c) 2018 Fabian Schuiki
#[macro_use]
extern crate clap;
extern crate chomsky;
extern crate stderrlog;

use clap::{App, Arg};

use chomsky::classify::classify;
use chomsky::closure::{closure, product, union};
use chomsky::grammar::Grammar;

fn main() {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about("Classifies grammars and builds their union, product, and Kleene closure")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .get_matches();

    stderrlog::new()
        .module(module_path!())
        .verbosity(matches.occurrences_of("verbosity") as usize)
        .init()
        .expect("unable to initialize logging");

    let g1 = first_sample();
    let g2 = second_sample();

    print_analysis("first grammar", &g1);
    print_analysis("second grammar", &g2);

    match union(g1.clone(), g2.clone()) {
        Ok(g) => print_analysis("union", &g),
        Err(err) => println!("union failed: {}", err),
    }
    match product(g1.clone(), g2.clone()) {
        Ok(g) => print_analysis("product", &g),
        Err(err) => println!("product failed: {}", err),
    }
    match closure(g1) {
        Ok(g) => print_analysis("closure of the first grammar", &g),
        Err(err) => println!("closure failed: {}", err),
    }
}

/// Print a grammar together with its class.
fn print_analysis(title: &str, grammar: &Grammar) {
    println!("{}:", title);
    println!("{}", grammar);
    match classify(grammar) {
        Ok(class) => println!("class: {}", class),
        Err(err) => println!("classification failed: {}", err),
    }
    println!();
}

/// A right-linear grammar deriving letter-prefixed digit strings.
fn first_sample() -> Grammar {
    let mut g = Grammar::new();
    for name in &["A", "B", "C", "D", "E", "F", "S"] {
        g.add_nonterminal(*name);
    }
    for name in &["a", "b", "c", "d", "0", "1", "5"] {
        g.add_terminal(*name);
    }
    g.set_start("S");
    g.add_rule("S", "aA");
    g.add_rule("S", "bB");
    g.add_rule("S", "cC");
    g.add_rule("S", "dD");
    g.add_rule("A", "1");
    g.add_rule("B", "5");
    g.add_rule("C", "5E");
    g.add_rule("C", "1F");
    g.add_rule("D", "10");
    g.add_rule("E", "1");
    g.add_rule("F", "5");
    g
}

/// A second right-linear grammar sharing some of the first one's terminals.
fn second_sample() -> Grammar {
    let mut g = Grammar::new();
    for name in &["X", "Y", "Z", "W", "R", "S"] {
        g.add_nonterminal(*name);
    }
    for name in &["x", "y", "w", "z", "0", "1", "5"] {
        g.add_terminal(*name);
    }
    g.set_start("S");
    g.add_rule("S", "xX");
    g.add_rule("S", "yY");
    g.add_rule("S", "zZ");
    g.add_rule("S", "wW");
    g.add_rule("Y", "1R");
    g.add_rule("R", "1");
    g.add_rule("X", "1");
    g.add_rule("Z", "5");
    g.add_rule("W", "10");
    g
}
