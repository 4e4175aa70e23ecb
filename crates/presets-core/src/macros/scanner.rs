//! Single-pass tokenizer for macro references
//!
//! Recognized forms, all closed by the first following `}`:
//!
//! | Token          | Namespace               |
//! |----------------|-------------------------|
//! | `${name}`      | [`MacroNamespace::Standard`]  |
//! | `$env{name}`   | [`MacroNamespace::Env`]       |
//! | `$penv{name}`  | [`MacroNamespace::ParentEnv`] |
//! | `$vendor{name}`| [`MacroNamespace::Vendor`]    |
//!
//! Anything else, including a `$` with no closing brace or an empty name,
//! is plain text.

/// Where a macro's value is looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroNamespace {
    Standard,
    Env,
    ParentEnv,
    Vendor,
}

impl MacroNamespace {
    const PREFIXES: [(&'static str, MacroNamespace); 4] = [
        ("${", MacroNamespace::Standard),
        ("$env{", MacroNamespace::Env),
        ("$penv{", MacroNamespace::ParentEnv),
        ("$vendor{", MacroNamespace::Vendor),
    ];
}

/// A piece of scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Macro {
        namespace: MacroNamespace,
        name: &'a str,
        /// The whole token, e.g. `$env{HOME}`.
        raw: &'a str,
    },
}

/// Split `input` into text and macro segments.
///
/// Concatenating the `Text` contents and the `raw` of every `Macro` gives
/// back `input` exactly.
pub fn scan(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(offset) = input[cursor..].find('$') {
        let start = cursor + offset;
        match macro_at(input, start) {
            Some((namespace, name, end)) => {
                if text_start < start {
                    segments.push(Segment::Text(&input[text_start..start]));
                }
                segments.push(Segment::Macro {
                    namespace,
                    name,
                    raw: &input[start..end],
                });
                text_start = end;
                cursor = end;
            }
            None => cursor = start + 1,
        }
    }

    if text_start < input.len() {
        segments.push(Segment::Text(&input[text_start..]));
    }
    segments
}

/// Parse a macro token starting at byte `start` (which holds `$`).
fn macro_at(input: &str, start: usize) -> Option<(MacroNamespace, &str, usize)> {
    let rest = &input[start..];
    let (prefix, namespace) = MacroNamespace::PREFIXES
        .iter()
        .find(|(prefix, _)| rest.starts_with(prefix))?;
    let body = &rest[prefix.len()..];
    let close = body.find('}')?;
    if close == 0 {
        return None;
    }
    let end = start + prefix.len() + close + 1;
    Some((*namespace, &body[..close], end))
}

/// Whether `input` still holds something that looks like a resolvable macro.
pub fn has_pending_macros(input: &str) -> bool {
    input.contains("${") || input.contains("$env{") || input.contains("$penv{")
}

/// Names of the `$vendor{...}` tokens in `input`.
pub fn vendor_macros(input: &str) -> Vec<&str> {
    scan(input)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Macro {
                namespace: MacroNamespace::Vendor,
                name,
                ..
            } => Some(name),
            _ => None,
        })
        .collect()
}
