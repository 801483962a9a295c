//! Command-line front end that loads a small set of documents into a
//! [`TripleStore`] and reports whether the load succeeded.
//!
//! This does not parse Turtle, RDF/XML or any other real RDF syntax: it
//! reads a line-oriented fixture format of the shape
//! `<iri-or-literal> <iri> <iri-or-literal> [<doc-iri>] .` intended for
//! exercising the store from the shell, not for production ingestion.

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use log::warn;
use rdf_quadstore::{Pattern, TripleStore};

#[derive(Parser, Debug)]
#[command(name = "validate", about = "Load quad fixtures into a triple store and report success")]
struct Cli {
    /// Primary input file to load.
    input: String,

    /// Additional files to load after the primary input. May be repeated.
    #[arg(short = 'i', long = "include")]
    include: Vec<String>,

    /// Skip malformed lines with a warning instead of aborting the load.
    #[arg(long)]
    lax: bool,

    /// Reflect the load outcome in the process exit code: 0 if every file
    /// loaded cleanly, 1 otherwise. Without this flag the exit code is
    /// always 0.
    #[arg(short = 'S', long = "return-success")]
    return_success: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut store = TripleStore::default();
    let mut ok = true;

    for path in std::iter::once(&cli.input).chain(cli.include.iter()) {
        match fs::read_to_string(path) {
            Ok(contents) => {
                if let Err(line) = load_fixture(&mut store, &contents, cli.lax) {
                    eprintln!("validate: malformed line in {path}: {line}");
                    ok = false;
                    if !cli.lax {
                        break;
                    }
                }
            }
            Err(e) => {
                eprintln!("validate: could not read {path}: {e}");
                ok = false;
                if !cli.lax {
                    break;
                }
            }
        }
    }

    println!(
        "{} ({} quads loaded)",
        if ok { "consistent" } else { "inconsistent" },
        store.quad_count()
    );
    let _ = store.find_triple(Pattern::any());

    if cli.return_success {
        if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else {
        ExitCode::SUCCESS
    }
}

/// Loads every line of `contents` as a quad. Returns the offending line text
/// on the first unparseable line when `lax` is false; in lax mode, bad lines
/// are logged and skipped and this always returns `Ok`.
fn load_fixture(store: &mut TripleStore, contents: &str, lax: bool) -> Result<(), String> {
    let (doc, _) = store.insert_doc(None, None, "<stdin-fixture>");
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match load_line(store, line, doc) {
            Ok(()) => {}
            Err(reason) => {
                if lax {
                    warn!("skipping malformed line '{line}': {reason}");
                } else {
                    return Err(line.to_string());
                }
            }
        }
    }
    Ok(())
}

fn load_line(store: &mut TripleStore, line: &str, default_doc: rdf_quadstore::DocId) -> Result<(), String> {
    let line = line.strip_suffix('.').ok_or("missing trailing '.'")?.trim();
    let mut tokens = tokenize(line)?;
    if tokens.len() < 3 || tokens.len() > 4 {
        return Err(format!("expected 3 or 4 terms, found {}", tokens.len()));
    }
    let doc = if tokens.len() == 4 {
        let doc_term = tokens.pop().unwrap();
        let doc_iri = doc_term
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .ok_or("document term must be an IRI")?;
        let (ns_iri, local) = split_iri(doc_iri);
        let doc_ns = store.insert_ns(ns_iri);
        let doc_node = store
            .insert_iri_node(doc_ns, local)
            .map_err(|e| e.to_string())?;
        store.insert_doc(Some(doc_node), None, doc_iri).0
    } else {
        default_doc
    };

    let o_term = tokens.pop().unwrap();
    let p_term = tokens.pop().unwrap();
    let s_term = tokens.pop().unwrap();

    let s = term_to_node(store, &s_term)?;
    let p = term_to_node(store, &p_term)?;
    let o = term_to_node(store, &o_term)?;
    store.insert_triple(s, p, o, doc);
    Ok(())
}

fn term_to_node(store: &mut TripleStore, term: &str) -> Result<rdf_quadstore::NodeId, String> {
    if let Some(iri) = term.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
        let (ns_iri, local) = split_iri(iri);
        let ns = store.insert_ns(ns_iri);
        store.insert_iri_node(ns, local).map_err(|e| e.to_string())
    } else if let Some(lexical) = term.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Ok(store.insert_plain_literal(lexical))
    } else {
        Err(format!("term '{term}' is neither an IRI nor a quoted literal"))
    }
}

/// Splits an IRI into a namespace prefix and local name at its last `#` or
/// `/`, matching how the rest of the store keys IRI nodes.
fn split_iri(iri: &str) -> (&str, &str) {
    let cut = iri
        .rfind(['#', '/'])
        .map(|i| i + 1)
        .unwrap_or(iri.len());
    iri.split_at(cut)
}

fn tokenize(line: &str) -> Result<Vec<String>, String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '<' {
            let mut tok = String::from("<");
            chars.next();
            for c in chars.by_ref() {
                tok.push(c);
                if c == '>' {
                    break;
                }
            }
            if !tok.ends_with('>') {
                return Err("unterminated IRI".to_string());
            }
            tokens.push(tok);
        } else if c == '"' {
            let mut tok = String::from("\"");
            chars.next();
            for c in chars.by_ref() {
                tok.push(c);
                if c == '"' {
                    break;
                }
            }
            if !tok.ends_with('"') || tok.len() < 2 {
                return Err("unterminated literal".to_string());
            }
            tokens.push(tok);
        } else {
            return Err(format!("unexpected character '{c}'"));
        }
    }
    Ok(tokens)
}
