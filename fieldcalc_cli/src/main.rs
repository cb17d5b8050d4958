//! # Fieldcalc CLI
//!
//! Terminal front end for the fieldcalc formula catalog. The loop is plain
//! prompt/answer: pick a template by id, fill in its inputs (last-used values
//! and descriptor defaults are offered as prefills), and get the formatted
//! result list back. Favorites, history, and settings persist to a single
//! JSON state file between runs.
//!
//! State file location: `$FIELDCALC_STATE` if set, else `fieldcalc_state.json`
//! in the working directory.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use fieldcalc_core::catalog::{build_templates, by_group, find};
use fieldcalc_core::eval::evaluate;
use fieldcalc_core::history::HistoryRecord;
use fieldcalc_core::numeric::{format_number, parse_number};
use fieldcalc_core::store::{load_or_default, save_state, StateFile};
use fieldcalc_core::template::{parse_inputs, Group, InputKind, Template};

fn state_path() -> PathBuf {
    std::env::var_os("FIELDCALC_STATE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("fieldcalc_state.json"))
}

/// Prompt and read one trimmed line. `None` means stdin is closed.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return None;
    }
    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn print_catalog(templates: &[Template], state: &StateFile, query: &str) {
    for group in Group::ALL {
        let members: Vec<&Template> = by_group(templates, group)
            .into_iter()
            .filter(|t| query.is_empty() || t.matches_query(query))
            .collect();
        if members.is_empty() {
            continue;
        }
        println!();
        println!("{}", group.title());
        for t in members {
            let star = if state.is_favorite(t.id) { "*" } else { " " };
            println!("  {star} {:<14} {}", t.id, t.title);
        }
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  <id>             run a template (see `list`)");
    println!("  list [query]     show the catalog, optionally filtered");
    println!("  fav <id>         toggle a favorite star");
    println!("  history          show saved calculations, newest first");
    println!("  history clear    delete all saved calculations");
    println!("  settings         show current settings");
    println!("  set dp <n>       decimal places for display");
    println!("  set density <x>  default density in g/cm3");
    println!("  help             this text");
    println!("  quit             exit");
}

fn print_history(state: &StateFile) {
    if state.history.is_empty() {
        println!("(history is empty)");
        return;
    }
    for record in state.history.iter() {
        println!(
            "{}  {}  {}",
            record.at.format("%Y-%m-%d %H:%M"),
            record.template_title,
            record.result
        );
    }
}

/// Prefill order: last-used value for this template, then descriptor default.
fn prefill<'a>(state: &'a StateFile, template: &'a Template, key: &str) -> Option<&'a str> {
    state
        .recall_inputs(template.id)
        .and_then(|raw| raw.get(key))
        .map(String::as_str)
        .or_else(|| {
            template
                .inputs
                .iter()
                .find(|f| f.key == key)
                .and_then(|f| f.default.as_deref())
        })
}

/// Collect raw input text for every field. `None` means the user aborted.
fn collect_inputs(template: &Template, state: &StateFile) -> Option<BTreeMap<String, String>> {
    let mut raw = BTreeMap::new();
    for field in &template.inputs {
        if let InputKind::Select { options } = &field.kind {
            println!("{}:", field.label);
            for opt in options {
                println!("    {:<6} {}", opt.code, opt.label);
            }
        }
        let prefilled = prefill(state, template, field.key);
        let prompt = match (prefilled, field.hint.as_deref()) {
            (Some(p), _) => format!("  {} [{}]: ", field.label, p),
            (None, Some(hint)) => format!("  {} ({}): ", field.label, hint),
            (None, None) => format!("  {}: ", field.label),
        };
        let typed = read_line(&prompt)?;
        let value = if typed.is_empty() {
            prefilled.unwrap_or_default().to_string()
        } else {
            typed
        };
        raw.insert(field.key.to_string(), value);
    }
    Some(raw)
}

fn run_template(template: &Template, state: &mut StateFile) -> bool {
    println!();
    println!("{} - {}", template.title, template.description);
    let raw = match collect_inputs(template, state) {
        Some(raw) => raw,
        None => return false,
    };

    let values = parse_inputs(template, &raw);
    let eval = evaluate(template, &values);
    let places = state.settings.decimal_places;

    println!();
    if eval.is_complete() {
        for v in &eval.values {
            println!("  {}: {} {}", v.label, format_number(v.value, places), v.unit);
        }
    } else if let Some(message) = eval.message() {
        println!("  {message}");
    }
    println!();

    state.remember_inputs(template.id, raw.clone());

    if eval.is_complete() {
        if let Some(answer) = read_line("Save to history? [y/N]: ") {
            if answer.eq_ignore_ascii_case("y") {
                state
                    .history
                    .push(HistoryRecord::new(template, raw, &eval.values, places));
            }
        }
    }
    true
}

fn handle_set(state: &mut StateFile, key: &str, value: &str) {
    match key {
        "dp" => match value.parse::<u32>() {
            Ok(n) if n <= 10 => {
                state.settings.decimal_places = n;
                println!("decimal places = {n}");
            }
            _ => println!("expected an integer between 0 and 10"),
        },
        "density" => match parse_number(value) {
            Some(d) if d > 0.0 => {
                state.settings.density_default = d;
                println!("default density = {d} g/cm3");
            }
            _ => println!("expected a positive number"),
        },
        _ => println!("unknown setting '{key}' (try `set dp <n>` or `set density <x>`)"),
    }
}

fn persist(state: &StateFile, path: &std::path::Path) {
    if let Err(e) = save_state(state, path) {
        eprintln!("warning: could not save state: {e}");
    }
}

fn main() {
    let path = state_path();
    let mut state = load_or_default(&path);
    let mut templates = build_templates(&state.settings);

    println!("Fieldcalc - Shop-Floor Calculator");
    println!("=================================");
    println!("Type `list` for the catalog, `help` for commands.");

    loop {
        let line = match read_line("\nfieldcalc> ") {
            Some(line) => line,
            None => break,
        };
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(c) => c,
            None => continue,
        };
        let rest: Vec<&str> = parts.collect();

        match command {
            "quit" | "exit" | "q" => break,
            "help" => print_help(),
            "list" => print_catalog(&templates, &state, &rest.join(" ")),
            "fav" => match rest.first().and_then(|id| find(&templates, id)) {
                Some(t) => {
                    let now = state.toggle_favorite(t.id);
                    println!(
                        "{} is {} a favorite",
                        t.id,
                        if now { "now" } else { "no longer" }
                    );
                    persist(&state, &path);
                }
                None => println!("usage: fav <template id>"),
            },
            "history" => match rest.first() {
                Some(&"clear") => {
                    state.history.clear();
                    persist(&state, &path);
                    println!("history cleared");
                }
                _ => print_history(&state),
            },
            "settings" => {
                println!("decimal places  = {}", state.settings.decimal_places);
                println!("default density = {} g/cm3", state.settings.density_default);
            }
            "set" => match (rest.first(), rest.get(1)) {
                (Some(key), Some(value)) => {
                    handle_set(&mut state, key, value);
                    // density is baked into descriptors; rebuild the catalog
                    templates = build_templates(&state.settings);
                    persist(&state, &path);
                }
                _ => println!("usage: set dp <n> | set density <x>"),
            },
            id => match find(&templates, id) {
                Some(template) => {
                    if !run_template(template, &mut state) {
                        break;
                    }
                    persist(&state, &path);
                }
                None => println!("unknown command or template id '{id}' (try `list`)"),
            },
        }
    }

    persist(&state, &path);
    println!("bye");
}
