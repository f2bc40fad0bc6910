//! `sui move disassemble` listing of one compiled module.

use crate::extract::text::lenient_u64;
use crate::extract::types::ParseStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^//\s*Move bytecode v([0-9]+)").expect("valid regex"));

static MODULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^module\s+([0-9A-Za-z_]+)(?:\.|::)([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex")
});

static STRUCT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:public\s+)?(?:native\s+)?struct\s+([A-Za-z_][A-Za-z0-9_]*)(?:<[^>]*>)?(?:\s+has\s+([A-Za-z_,\s]+?))?\s*(\{\s*\}?)?\s*$",
    )
    .expect("valid regex")
});

static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?:(?:public(?:\([a-z]+\))?|entry|native)\s+)*)([A-Za-z_][A-Za-z0-9_]*)(?:<[^>]*>)?\(",
    )
    .expect("valid regex")
});

static INSTRUCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+:\s").expect("valid regex"));

static CONSTANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\s*=>").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    pub abilities: Vec<String>,
    pub fields: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDef {
    pub name: String,
    /// `public`, `private`, `public(friend)`, `public(package)`
    pub visibility: String,
    pub is_entry: bool,
    pub is_native: bool,
    pub instructions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disassembly {
    pub status: ParseStatus,
    pub bytecode_version: u32,
    pub address: String,
    pub module: String,
    pub uses: Vec<String>,
    pub structs: Vec<StructDef>,
    pub functions: Vec<FunctionDef>,
    pub constants: u32,
    pub raw_output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Top,
    Struct,
    Function,
    Constants,
}

pub fn parse(text: &str) -> Disassembly {
    let mut listing = Disassembly {
        raw_output: text.to_string(),
        ..Default::default()
    };
    let mut block = Block::Top;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        match block {
            Block::Struct => {
                if line.starts_with('}') {
                    block = Block::Top;
                } else if line.contains(':') {
                    if let Some(def) = listing.structs.last_mut() {
                        def.fields += 1;
                    }
                }
                continue;
            }
            Block::Function => {
                if line == "}" {
                    block = Block::Top;
                } else if INSTRUCTION_RE.is_match(line) {
                    if let Some(def) = listing.functions.last_mut() {
                        def.instructions += 1;
                    }
                }
                continue;
            }
            Block::Constants => {
                if line.starts_with(']') {
                    block = Block::Top;
                } else if CONSTANT_RE.is_match(line) {
                    listing.constants += 1;
                }
                continue;
            }
            Block::Top => {}
        }

        if let Some(caps) = VERSION_RE.captures(line) {
            listing.bytecode_version = u32::try_from(lenient_u64(&caps[1])).unwrap_or(0);
        } else if let Some(caps) = MODULE_RE.captures(line) {
            listing.address = caps[1].to_string();
            listing.module = caps[2].to_string();
        } else if let Some(rest) = line.strip_prefix("use ") {
            listing
                .uses
                .push(rest.trim_end_matches(';').trim().to_string());
        } else if line.starts_with("Constants") && line.ends_with('[') {
            block = Block::Constants;
        } else if let Some(caps) = STRUCT_RE.captures(line) {
            listing.structs.push(StructDef {
                name: caps[1].to_string(),
                abilities: caps
                    .get(2)
                    .map(|m| {
                        m.as_str()
                            .split(',')
                            .map(str::trim)
                            .filter(|a| !a.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
                fields: 0,
            });
            // `{` without a closing `}` on the same line opens a field block
            let opens = caps.get(3).is_some_and(|m| !m.as_str().contains('}'));
            if opens {
                block = Block::Struct;
            }
        } else if let Some(caps) = FUNCTION_RE.captures(line) {
            let modifiers = &caps[1];
            let is_native = modifiers.contains("native");
            listing.functions.push(FunctionDef {
                name: caps[2].to_string(),
                visibility: visibility(modifiers),
                is_entry: modifiers.contains("entry"),
                is_native,
                instructions: 0,
            });
            if line.ends_with('{') {
                block = Block::Function;
            }
        }
    }

    listing.status = ParseStatus::from_found(!listing.module.is_empty());
    listing
}

fn visibility(modifiers: &str) -> String {
    modifiers
        .split_whitespace()
        .find(|m| m.starts_with("public"))
        .unwrap_or("private")
        .to_string()
}
