#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

pub fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read fixture {name}: {err}"))
}

/// Reads a golden file written with `\t`/`\n` escapes, dropping the final newline.
pub fn read_unescaped(name: &str) -> String {
    let raw = read_fixture(name);
    let mut normalized = raw.replace("\r\n", "\n");
    if normalized.ends_with('\n') {
        normalized.pop();
    }
    unescape(&normalized)
}

pub fn unescape(input: &str) -> String {
    let mut out = String::new();
    let mut iter = input.chars();

    while let Some(ch) = iter.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match iter.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
