use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw TOML using the process environment
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are passed through unchanged so a
/// commented-out secret never has to exist.
pub fn expand_env(input: &str) -> Result<String, String> {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expand placeholders resolving variables through `lookup`
pub fn expand_with<F>(input: &str, lookup: F) -> Result<String, String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(input.len());

    for (i, line) in input.lines().enumerate() {
        if i > 0 {
            output.push('\n');
        }

        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            expand_line(line, &lookup, &mut output)?;
        }
    }

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();

    // 1: scoped key such as `env.OPENAI_API_KEY`, 2: optional default
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_line<F>(line: &str, lookup: &F, output: &mut String) -> Result<(), String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut last_end = 0;

    for captures in placeholder().captures_iter(line) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        output.push_str(&line[last_end..whole.start()]);

        let var_name = key
            .as_str()
            .strip_prefix("env.")
            .filter(|name| !name.is_empty() && !name.contains('.'))
            .ok_or_else(|| format!("only variables scoped with 'env.' are supported: `{}`", key.as_str()))?;

        match (lookup(var_name), captures.get(2)) {
            (Some(value), _) => output.push_str(&value),
            (None, Some(default)) => output.push_str(default.as_str()),
            (None, None) => return Err(format!("environment variable not found: `{var_name}`")),
        }

        last_end = whole.end();
    }

    output.push_str(&line[last_end..]);
    Ok(())
}
